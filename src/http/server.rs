//! Mounting the router in a hosting server.
//!
//! # Responsibilities
//! - Adapt a built [`Router`] to `tower::Service` for axum/hyper hosts
//! - Wire the request timeout layer
//! - Run the listener until shutdown is signalled
//!
//! # Design Decisions
//! - `into_service` consumes the router: the BUILD phase ends there
//! - The router sits behind an `Arc`; every connection shares it read-only

use std::convert::Infallible;
use std::sync::Arc;
use std::task::{Context, Poll};
use std::time::Duration;

use axum::{body::Body, http::Request, response::Response};
use futures_util::future::BoxFuture;
use tokio::net::TcpListener;
use tower::Service;
use tower_http::timeout::TimeoutLayer;

use crate::config::ServerConfig;
use crate::http::handler::Handler;
use crate::lifecycle::Shutdown;
use crate::routing::Router;

/// Cloneable `tower::Service` wrapping a frozen router.
#[derive(Clone, Debug)]
pub struct RouterService {
    router: Arc<Router>,
}

impl RouterService {
    pub fn router(&self) -> &Router {
        &self.router
    }
}

impl Router {
    /// Freeze the router for serving.
    pub fn into_service(self) -> RouterService {
        RouterService {
            router: Arc::new(self),
        }
    }
}

impl Service<Request<Body>> for RouterService {
    type Response = Response;
    type Error = Infallible;
    type Future = BoxFuture<'static, Result<Response, Infallible>>;

    fn poll_ready(&mut self, _cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        Poll::Ready(Ok(()))
    }

    fn call(&mut self, req: Request<Body>) -> Self::Future {
        let response = self.router.call(req);
        Box::pin(async move { Ok(response.await) })
    }
}

/// Build the axum application with the router as its only service.
#[allow(deprecated)]
pub fn build_app(router: Router, config: &ServerConfig) -> axum::Router {
    axum::Router::new()
        .fallback_service(router.into_service())
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.request_timeout_secs,
        )))
}

/// Serve `router` on `listener` until a shutdown signal arrives.
pub async fn serve(
    router: Router,
    listener: TcpListener,
    config: &ServerConfig,
    shutdown: Shutdown,
) -> Result<(), std::io::Error> {
    let addr = listener.local_addr()?;
    tracing::info!(
        address = %addr,
        routes = router.routes().count(),
        "HTTP server starting"
    );

    let app = build_app(router, config);
    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            shutdown.signalled().await;
            tracing::info!("Shutdown signal received");
        })
        .await?;

    tracing::info!("HTTP server stopped");
    Ok(())
}
