//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! router / middleware / server
//!     → tracing events (structured fields)
//!     → logging.rs (subscriber: env filter + fmt)
//!     → stdout
//! ```
//!
//! # Design Decisions
//! - The library only emits events; installing a subscriber is the host's job
//! - Access logs go to an injected dispatcher (see `http::middleware::access_log`)

pub mod logging;
