//! Gateway server assembly.
//!
//! # Responsibilities
//! - Attach the batch endpoint to the application router
//! - Wire up middleware (tracing, request timeout)
//! - Serve with graceful shutdown driven by [`Shutdown`]
//!
//! [`Shutdown`]: crate::lifecycle::Shutdown

use std::time::Duration;

use axum::Router;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::batch::{attach, BatchLimits};
use crate::config::GatewayConfig;

/// HTTP server hosting an application router plus its batch endpoint.
pub struct GatewayServer {
    app: Router,
    config: GatewayConfig,
}

impl GatewayServer {
    /// Wrap `app` with the batch endpoint and the middleware stack.
    ///
    /// The batch pipeline snapshots `app` before the layers are added, so
    /// sub-requests skip the outer timeout and are bounded only by the outer
    /// call that carries them.
    pub fn new(config: GatewayConfig, app: Router) -> Self {
        let app = attach(
            app,
            &config.batch.mount_path,
            BatchLimits::from(&config.batch),
        )
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.timeouts.request_secs,
        )))
        .layer(TraceLayer::new_for_http());
        Self { app, config }
    }

    /// Run the server until the shutdown signal fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            mount_path = %self.config.batch.mount_path,
            "multifetch gateway starting"
        );

        axum::serve(listener, self.app)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
            })
            .await?;

        tracing::info!("multifetch gateway stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }
}
