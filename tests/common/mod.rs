//! Shared fixtures for integration tests.

use std::net::SocketAddr;

use axum::extract::Path;
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};

use multifetch::config::GatewayConfig;
use multifetch::lifecycle::Shutdown;
use multifetch::server::GatewayServer;

/// The application the batch endpoint multiplexes over.
pub fn sample_app() -> Router {
    Router::new()
        .route("/resource1", get(resource1))
        .route("/resource2/{id}", get(resource2))
        .route("/boom", get(boom))
        .route("/teapot", get(teapot))
        .route("/whoami", get(whoami))
}

async fn resource1() -> impl IntoResponse {
    (
        [("Custom-Header", "why not")],
        Json(json!({"result": "resource1"})),
    )
}

async fn resource2(Path(id): Path<String>) -> impl IntoResponse {
    (
        [("Other-Custom-Header", "useful")],
        Json(json!({"result": format!("resource2/{id}")})),
    )
}

async fn boom() -> Json<Value> {
    panic!("boom");
}

async fn teapot() -> impl IntoResponse {
    (StatusCode::IM_A_TEAPOT, Json(json!({"short": "stout"})))
}

async fn whoami(headers: HeaderMap) -> Json<Value> {
    let cookie = headers
        .get("cookie")
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default();
    Json(json!({"cookie": cookie}))
}

/// Start a gateway over [`sample_app`] on an ephemeral port.
pub async fn spawn_gateway() -> (SocketAddr, Shutdown) {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let mut config = GatewayConfig::default();
    config.listener.bind_address = addr.to_string();

    let shutdown = Shutdown::new();
    let receiver = shutdown.subscribe();
    let server = GatewayServer::new(config, sample_app());
    tokio::spawn(async move {
        let _ = server.run(listener, receiver).await;
    });

    (addr, shutdown)
}
