//! Segment Router Library
//!
//! Method + path request routing for axum/hyper hosts: `:name` captures,
//! raw query parameters, registration-time middleware composition and a
//! replaceable not-found fallback.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod observability;
pub mod routing;

pub use config::RouterConfig;
pub use http::{BoxHandler, Handler, Middleware, RequestParamsExt};
pub use lifecycle::Shutdown;
pub use routing::{Params, RoutePattern, Router};
