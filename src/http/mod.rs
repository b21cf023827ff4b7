//! HTTP-facing pieces of the router.
//!
//! # Data Flow
//! ```text
//! hosting server (axum / hyper)
//!     → server.rs (RouterService: tower::Service adapter)
//!     → routing::Router (dispatch)
//!     → request.rs (PathParams / QueryParams extensions)
//!     → middleware/ (composed chain)
//!     → handler.rs (user handler or not-found)
//! ```

pub mod handler;
pub mod middleware;
pub mod request;
pub mod server;

pub use handler::{boxed, BoxHandler, Handler, NotFound};
pub use middleware::{compose, from_fn, AccessLog, BoxMiddleware, Middleware};
pub use request::{PathParams, QueryParams, RequestParamsExt};
pub use server::RouterService;
