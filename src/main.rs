//! Segment Router demo server.
//!
//! Registers a handful of routes and serves them until Ctrl+C / SIGTERM.
//!
//! ```text
//!   GET  /                                  usage text
//!   GET  /hello                             greeting
//!   GET  /hello/:name                       named greeting
//!   GET  /category/:category/:product       product overview (?color=)
//!   POST /category/:category/:product       place an order (?color=, default white)
//!   GET  /debug/params/:a/:b                echo path + query params as JSON
//! ```

use std::path::PathBuf;

use axum::{
    body::Body,
    http::{Request, StatusCode},
    response::IntoResponse,
    Json,
};
use clap::Parser;
use serde_json::json;
use tokio::net::TcpListener;

use segment_router::config::{load_config, RouterConfig};
use segment_router::http::server::serve;
use segment_router::lifecycle::{signals::spawn_signal_listener, Shutdown};
use segment_router::observability::logging;
use segment_router::{RequestParamsExt, Router};

#[derive(Parser)]
#[command(name = "segment-router")]
#[command(about = "Demo server for the segment router", long_about = None)]
struct Cli {
    /// TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the configured bind address.
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => RouterConfig::default(),
    };
    if let Some(bind) = cli.bind {
        config.server.bind_address = bind;
    }

    logging::init(&config.observability)?;
    tracing::info!("segment-router v0.1.0 starting");

    // Built after logging so the access log captures the installed subscriber.
    let router = build_router(&config);

    let listener = TcpListener::bind(&config.server.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    spawn_signal_listener(shutdown.clone());
    serve(router, listener, &config.server, shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}

fn build_router(config: &RouterConfig) -> Router {
    let mut router = Router::from_config(config);
    router
        .get("/", welcome)
        .get("/hello", hello_world)
        .get("/hello/:name", hello_name)
        .get("/category/:category/:product", get_product)
        .post("/category/:category/:product", order_product)
        .get("/debug/params/:a/:b", echo_params);
    router
}

async fn welcome(_req: Request<Body>) -> &'static str {
    "Try out the following endpoints:\n\
     \tGET /hello/:name\n\
     \tGET /category/:category/:product?color=color\n\
     \tPOST /category/:category/:product?color=color\n"
}

async fn hello_world(_req: Request<Body>) -> &'static str {
    "Hello World!\n"
}

async fn hello_name(req: Request<Body>) -> String {
    format!("Hello {}!", req.path_param("name").unwrap_or_default())
}

async fn get_product(req: Request<Body>) -> String {
    format!(
        "Overview of product {} in {} from category {}",
        req.path_param("product").unwrap_or_default(),
        req.query_param("color").unwrap_or_default(),
        req.path_param("category").unwrap_or_default(),
    )
}

async fn order_product(req: Request<Body>) -> impl IntoResponse {
    let color = match req.query_param("color") {
        Some(c) if !c.is_empty() => c,
        _ => "white",
    };
    let body = format!(
        "Order Successful:\n\tproduct {} in {} from category {}",
        req.path_param("product").unwrap_or_default(),
        color,
        req.path_param("category").unwrap_or_default(),
    );
    (StatusCode::CREATED, body)
}

async fn echo_params(req: Request<Body>) -> Json<serde_json::Value> {
    Json(json!({
        "path": req.path_params(),
        "query": req.query_params(),
    }))
}
