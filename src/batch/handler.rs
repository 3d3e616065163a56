//! Batch endpoint wiring and response aggregation.
//!
//! # Responsibilities
//! - Mount one GET+POST handler at the batch path
//! - Snapshot the application router as the dispatch pipeline
//! - Run extract → fan-out → aggregate and write the outer JSON response
//!
//! The outer call answers 200 whenever the batch mechanism itself ran;
//! per-key failures live inside the payload. Only an unreadable batch spec
//! maps to an outer 400.

use std::sync::Arc;

use axum::body::Body;
use axum::extract::State;
use axum::http::request::Parts;
use axum::http::{Method, Request};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};

use crate::batch::dispatch::{DispatchPipeline, RouterPipeline};
use crate::batch::fanout::fan_out;
use crate::batch::spec::{BatchSpec, ExtractionError};

/// Protective bounds on a single batch call.
#[derive(Debug, Clone)]
pub struct BatchLimits {
    /// Upper bound on sub-requests per call; exceeding it fails the call
    /// with 400. `None` means unlimited.
    pub max_sub_requests: Option<usize>,
    /// Cap on the inbound POST spec body, in bytes.
    pub body_limit: usize,
}

impl Default for BatchLimits {
    fn default() -> Self {
        Self {
            max_sub_requests: None,
            body_limit: 1024 * 1024,
        }
    }
}

#[derive(Clone)]
struct BatchState {
    pipeline: Arc<dyn DispatchPipeline>,
    limits: BatchLimits,
}

/// Mount the batch endpoint at `mount_path` on `app`.
///
/// The pipeline is a snapshot of `app` taken before the endpoint is added,
/// so a sub-path naming the mount path itself cannot recurse. Sub-paths are
/// absolute against the whole application, not relative to `mount_path`.
pub fn attach(app: Router, mount_path: &str, limits: BatchLimits) -> Router {
    let state = BatchState {
        pipeline: Arc::new(RouterPipeline::new(app.clone())),
        limits,
    };
    app.route(
        mount_path,
        get(batch_handler).post(batch_handler).with_state(state),
    )
}

async fn batch_handler(State(state): State<BatchState>, request: Request<Body>) -> Response {
    let (parts, body) = request.into_parts();
    let spec = match extract(&parts, body, &state.limits).await {
        Ok(spec) => spec,
        Err(error) => {
            tracing::warn!(method = %parts.method, error = %error, "rejecting batch call");
            return error.into_response();
        }
    };
    tracing::debug!(method = %parts.method, keys = spec.len(), "dispatching batch call");
    let results = fan_out(state.pipeline.clone(), spec, &parts.headers).await;
    Json(results).into_response()
}

async fn extract(
    parts: &Parts,
    body: Body,
    limits: &BatchLimits,
) -> Result<BatchSpec, ExtractionError> {
    let spec = if parts.method == Method::POST {
        let bytes = axum::body::to_bytes(body, limits.body_limit).await?;
        BatchSpec::from_json_body(&bytes)?
    } else {
        BatchSpec::from_query(parts.uri.query().unwrap_or(""))
    };
    if let Some(limit) = limits.max_sub_requests {
        if spec.len() > limit {
            return Err(ExtractionError::TooManyKeys {
                got: spec.len(),
                limit,
            });
        }
    }
    Ok(spec)
}
