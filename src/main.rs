//! multifetch gateway binary.
//!
//! Serves a small sample API with the batch endpoint mounted on top, so the
//! multiplexing behavior can be exercised end to end:
//!
//! ```text
//! curl 'http://localhost:8080/api?status=/status&version=/version'
//! ```

use std::path::PathBuf;

use axum::routing::get;
use axum::{Json, Router};
use clap::Parser;
use serde_json::json;
use tokio::net::TcpListener;

use multifetch::config::{load_config, GatewayConfig};
use multifetch::lifecycle::Shutdown;
use multifetch::observability::logging;
use multifetch::server::GatewayServer;

#[derive(Parser)]
#[command(name = "multifetch", about = "Request-multiplexing HTTP gateway")]
struct Cli {
    /// Path to a TOML configuration file. Defaults apply when omitted.
    #[arg(long)]
    config: Option<PathBuf>,
}

fn sample_api() -> Router {
    Router::new()
        .route("/status", get(|| async { Json(json!({"status": "ok"})) }))
        .route(
            "/version",
            get(|| async { Json(json!({"version": env!("CARGO_PKG_VERSION")})) }),
        )
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let config = match cli.config {
        Some(path) => load_config(&path)?,
        None => GatewayConfig::default(),
    };

    logging::init(&config.observability.log_filter);

    tracing::info!(
        bind_address = %config.listener.bind_address,
        mount_path = %config.batch.mount_path,
        request_timeout_secs = config.timeouts.request_secs,
        "configuration loaded"
    );

    let listener = TcpListener::bind(&config.listener.bind_address).await?;

    let shutdown = Shutdown::new();
    let receiver = shutdown.subscribe();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("shutdown signal received");
            shutdown.trigger();
        }
    });

    GatewayServer::new(config, sample_api())
        .run(listener, receiver)
        .await?;

    tracing::info!("shutdown complete");
    Ok(())
}
