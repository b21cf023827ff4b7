//! Access logging middleware.
//!
//! Logs method, status, path, body size and duration once the wrapped
//! handler has produced its response.
//!
//! A `tracing` dispatcher may be injected so routers log independently;
//! otherwise the subscriber current when the request completes is used.
//! There is no process-wide logger to configure.

use std::time::Instant;

use axum::{
    body::{Body, HttpBody},
    http::Request,
    response::Response,
};
use futures_util::future::BoxFuture;
use tracing::Dispatch;

use crate::http::handler::{boxed, BoxHandler, Handler};
use crate::http::middleware::Middleware;

/// Event target used for access log lines.
pub const ACCESS_LOG_TARGET: &str = "segment_router::access";

/// Access log middleware.
///
/// Without an injected dispatcher, each line goes to whichever subscriber is
/// current when the request completes, so a router may be built before
/// logging is installed.
#[derive(Clone, Default)]
pub struct AccessLog {
    dispatch: Option<Dispatch>,
}

impl AccessLog {
    /// Log through the subscriber current at request time.
    pub fn new() -> Self {
        Self::default()
    }

    /// Log through an explicit dispatcher.
    pub fn with_dispatch(dispatch: Dispatch) -> Self {
        Self {
            dispatch: Some(dispatch),
        }
    }
}

impl std::fmt::Debug for AccessLog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccessLog")
            .field("injected", &self.dispatch.is_some())
            .finish()
    }
}

impl Middleware for AccessLog {
    fn wrap(&self, next: BoxHandler) -> BoxHandler {
        boxed(Logged {
            next,
            dispatch: self.dispatch.clone(),
        })
    }
}

struct Logged {
    next: BoxHandler,
    dispatch: Option<Dispatch>,
}

impl Handler for Logged {
    fn call(&self, req: Request<Body>) -> BoxFuture<'static, Response> {
        let method = req.method().clone();
        let path = req.uri().path().to_string();
        let next = self.next.clone();
        let dispatch = self.dispatch.clone();

        Box::pin(async move {
            let start = Instant::now();
            let response = next.call(req).await;
            let elapsed = start.elapsed();

            // Streaming bodies have no exact size until sent.
            let size = response.body().size_hint().exact();
            let emit = || {
                tracing::info!(
                    target: ACCESS_LOG_TARGET,
                    method = %method,
                    status = response.status().as_u16(),
                    path = %path,
                    size = ?size,
                    duration_us = elapsed.as_micros() as u64,
                    "request completed"
                );
            };
            match &dispatch {
                Some(dispatch) => tracing::dispatcher::with_default(dispatch, emit),
                None => emit(),
            }
            response
        })
    }
}
