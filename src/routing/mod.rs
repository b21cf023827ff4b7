//! Routing subsystem.
//!
//! # Data Flow
//! ```text
//! Registration (BUILD phase):
//!     (method, "/hello/:name", handler)
//!     → matcher.rs (compile RoutePattern)
//!     → http::middleware (wrap handler with current chain)
//!     → router.rs (append immutable Route)
//!
//! Incoming Request (SERVE phase):
//!     (method, path, raw query)
//!     → router.rs (linear scan, first match wins)
//!     → matcher.rs (segment match → path Params)
//!     → params.rs (query string → query Params)
//!     → Return: matched handler or not-found handler
//! ```
//!
//! # Design Decisions
//! - Routes compiled at registration, immutable afterwards
//! - No regex, no trees: fixed-arity segment comparison
//! - Deterministic: same input always matches same route
//! - First match wins (ordered by registration)

pub mod matcher;
pub mod params;
pub mod router;

pub use matcher::{PatternError, RoutePattern, Segment};
pub use params::Params;
pub use router::{Resolved, Route, Router};
