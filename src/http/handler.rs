//! The handler capability.
//!
//! A handler takes a request and produces a response. The router stores and
//! invokes handlers but never creates them, except for the default not-found
//! handler defined here.

use std::future::Future;
use std::sync::Arc;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    response::{IntoResponse, Response},
};
use futures_util::future::BoxFuture;

/// Body written by the default not-found handler.
pub const NOT_FOUND_BODY: &str = "404 Not Found";

/// Something that can answer a request.
///
/// Implemented for async closures, so plain functions can be registered
/// directly:
///
/// ```
/// # use segment_router::Router;
/// # use axum::{body::Body, http::Request};
/// let mut router = Router::new();
/// router.get("/ping", |_req: Request<Body>| async { "pong" });
/// ```
pub trait Handler: Send + Sync + 'static {
    fn call(&self, req: Request<Body>) -> BoxFuture<'static, Response>;
}

/// Shared, type-erased handler. Also the `next` argument handed to middleware.
pub type BoxHandler = Arc<dyn Handler>;

impl<F, Fut, R> Handler for F
where
    F: Fn(Request<Body>) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = R> + Send + 'static,
    R: IntoResponse,
{
    fn call(&self, req: Request<Body>) -> BoxFuture<'static, Response> {
        let fut = self(req);
        Box::pin(async move { fut.await.into_response() })
    }
}

/// Erase a handler's concrete type.
pub fn boxed<H: Handler>(handler: H) -> BoxHandler {
    Arc::new(handler)
}

/// Responds with a fixed status and body.
#[derive(Debug, Clone)]
pub struct NotFound {
    status: StatusCode,
    body: String,
}

impl NotFound {
    pub fn new(status: StatusCode, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }
}

impl Default for NotFound {
    fn default() -> Self {
        Self::new(StatusCode::NOT_FOUND, NOT_FOUND_BODY)
    }
}

impl Handler for NotFound {
    fn call(&self, _req: Request<Body>) -> BoxFuture<'static, Response> {
        let response = (self.status, self.body.clone()).into_response();
        Box::pin(async move { response })
    }
}
