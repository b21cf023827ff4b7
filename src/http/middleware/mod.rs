//! Middleware composition.
//!
//! # Data Flow
//! ```text
//! Registration:
//!     middlewares [M1, M2] + terminal handler T
//!     → compose()
//!     → M1(M2(T))  (stored on the route)
//!
//! Request:
//!     M1 pre → M2 pre → T → M2 post → M1 post
//! ```
//!
//! # Design Decisions
//! - Composition happens once, at registration time
//! - The first-added middleware sees the request first and the response last
//! - A middleware that never calls `next` short-circuits the route

pub mod access_log;

use std::future::Future;
use std::sync::Arc;

use axum::{body::Body, http::Request, response::IntoResponse};

use crate::http::handler::{boxed, BoxHandler};

pub use access_log::AccessLog;

/// A transformation over handlers.
pub trait Middleware: Send + Sync + 'static {
    /// Wrap `next`, returning the handler to install in its place.
    fn wrap(&self, next: BoxHandler) -> BoxHandler;
}

/// Shared, type-erased middleware.
pub type BoxMiddleware = Arc<dyn Middleware>;

impl<F> Middleware for F
where
    F: Fn(BoxHandler) -> BoxHandler + Send + Sync + 'static,
{
    fn wrap(&self, next: BoxHandler) -> BoxHandler {
        self(next)
    }
}

/// Wrap `terminal` so that `middlewares[0]` is outermost.
pub fn compose(middlewares: &[BoxMiddleware], terminal: BoxHandler) -> BoxHandler {
    middlewares
        .iter()
        .rev()
        .fold(terminal, |next, mw| mw.wrap(next))
}

/// Middleware built from an async function taking the request and `next`.
pub struct FromFn<F> {
    f: Arc<F>,
}

/// Build middleware from `async fn(Request<Body>, BoxHandler) -> impl IntoResponse`.
pub fn from_fn<F, Fut, R>(f: F) -> FromFn<F>
where
    F: Fn(Request<Body>, BoxHandler) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = R> + Send + 'static,
    R: IntoResponse,
{
    FromFn { f: Arc::new(f) }
}

impl<F, Fut, R> Middleware for FromFn<F>
where
    F: Fn(Request<Body>, BoxHandler) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = R> + Send + 'static,
    R: IntoResponse,
{
    fn wrap(&self, next: BoxHandler) -> BoxHandler {
        let f = Arc::clone(&self.f);
        boxed(move |req: Request<Body>| (*f)(req, Arc::clone(&next)))
    }
}
