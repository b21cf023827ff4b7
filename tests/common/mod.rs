//! Shared utilities for integration testing.

use std::net::SocketAddr;

use tokio::net::TcpListener;

use segment_router::config::ServerConfig;
use segment_router::http::server::serve;
use segment_router::{Router, Shutdown};

/// A router served on an ephemeral loopback port.
pub struct TestServer {
    pub addr: SocketAddr,
    pub shutdown: Shutdown,
    handle: tokio::task::JoinHandle<Result<(), std::io::Error>>,
}

impl TestServer {
    /// Bind `127.0.0.1:0` and serve `router` in the background.
    pub async fn start(router: Router) -> Self {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let shutdown = Shutdown::new();
        let server_shutdown = shutdown.clone();

        let handle = tokio::spawn(async move {
            let config = ServerConfig::default();
            serve(router, listener, &config, server_shutdown).await
        });

        Self {
            addr,
            shutdown,
            handle,
        }
    }

    pub fn url(&self, path_and_query: &str) -> String {
        format!("http://{}{}", self.addr, path_and_query)
    }

    /// Trigger shutdown and wait for the server task to exit cleanly.
    #[allow(dead_code)]
    pub async fn stop(self) {
        self.shutdown.trigger();
        self.handle.await.unwrap().unwrap();
    }
}

/// A client that never reuses pooled connections between tests.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}
