//! Dispatch pipeline seam and sub-request invocation.
//!
//! # Responsibilities
//! - Define the [`DispatchPipeline`] capability the fan-out consumes
//! - Provide [`RouterPipeline`], the axum-backed implementation that pushes a
//!   sub-request through the identical code path a real request takes
//! - Normalize every dispatch outcome into exactly one [`SubResult`]; nothing
//!   propagates past this boundary
//!
//! # Design Decisions
//! - "No route matched" is detected with a fallback handler that tags its
//!   response via a private extension; any application 404 with a body is
//!   passed through as a real result
//! - Transport headers added during serialization (content-type, date, ...)
//!   are excluded from the captured header list, leaving what the handler set

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{HeaderMap, Request, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Router;
use serde_json::{Map, Value};
use tower::ServiceExt;

use crate::batch::result::{Header, SubResult};

pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// What the pipeline reported for one sub-request.
#[derive(Debug)]
pub enum PipelineOutcome {
    /// A route matched and produced a response.
    Matched(Response),
    /// No route matched the sub-path.
    NoRoute,
}

/// The host application's routing/handler capability.
///
/// Must tolerate concurrent invocation: the fan-out drives it from one task
/// per key, and multiple batch calls run at once.
#[async_trait]
pub trait DispatchPipeline: Send + Sync + 'static {
    async fn dispatch(&self, request: Request<Body>) -> Result<PipelineOutcome, BoxError>;
}

/// Response extension marking the no-route fallback.
#[derive(Debug, Clone, Copy)]
struct NoRouteSentinel;

async fn no_route_sentinel() -> Response {
    let mut response = StatusCode::NOT_FOUND.into_response();
    response.extensions_mut().insert(NoRouteSentinel);
    response
}

/// [`DispatchPipeline`] over an [`axum::Router`].
///
/// Sub-requests see the same routes, middleware, and shared state as a real
/// top-level request. Construction installs the no-route fallback, replacing
/// any fallback already on the snapshot; applications that rely on a custom
/// fallback should add it to the outer router after [`attach`].
///
/// [`attach`]: crate::batch::handler::attach
#[derive(Clone)]
pub struct RouterPipeline {
    router: Router,
}

impl RouterPipeline {
    pub fn new(app: Router) -> Self {
        Self {
            router: app.fallback(no_route_sentinel),
        }
    }
}

#[async_trait]
impl DispatchPipeline for RouterPipeline {
    async fn dispatch(&self, request: Request<Body>) -> Result<PipelineOutcome, BoxError> {
        // Router is cheap to clone (shared internals) and infallible.
        let response = match self.router.clone().oneshot(request).await {
            Ok(response) => response,
            Err(never) => match never {},
        };
        if response.extensions().get::<NoRouteSentinel>().is_some() {
            return Ok(PipelineOutcome::NoRoute);
        }
        Ok(PipelineOutcome::Matched(response))
    }
}

/// Headers the serialization layer adds on its own; not part of what the
/// handler produced for the caller.
const TRANSPORT_HEADERS: [&str; 4] = [
    "content-type",
    "content-length",
    "date",
    "transfer-encoding",
];

/// Push one synthesized sub-request through the pipeline and fold whatever
/// happens into a [`SubResult`]. Errors are swallowed for the batch and
/// logged here.
pub(crate) async fn invoke(
    pipeline: &dyn DispatchPipeline,
    key: &str,
    request: Request<Body>,
) -> SubResult {
    match pipeline.dispatch(request).await {
        Ok(PipelineOutcome::Matched(response)) => normalize(key, response).await,
        Ok(PipelineOutcome::NoRoute) => SubResult::NotFound,
        Err(error) => {
            tracing::error!(key = %key, error = %error, "sub-request dispatch failed");
            SubResult::ServerError
        }
    }
}

async fn normalize(key: &str, response: Response) -> SubResult {
    let code = response.status().as_u16();
    let headers = captured_headers(response.headers());
    let bytes = match axum::body::to_bytes(response.into_body(), usize::MAX).await {
        Ok(bytes) => bytes,
        Err(error) => {
            tracing::error!(key = %key, error = %error, "failed to read sub-response body");
            return SubResult::ServerError;
        }
    };
    SubResult::Success {
        code,
        headers,
        body: decode_body(&bytes),
    }
}

fn captured_headers(headers: &HeaderMap) -> Vec<Header> {
    headers
        .iter()
        .filter(|(name, _)| !TRANSPORT_HEADERS.contains(&name.as_str()))
        .map(|(name, value)| {
            Header::new(
                name.as_str(),
                String::from_utf8_lossy(value.as_bytes()).into_owned(),
            )
        })
        .collect()
}

fn decode_body(bytes: &[u8]) -> Value {
    if bytes.is_empty() {
        return Value::Object(Map::new());
    }
    serde_json::from_slice(bytes)
        .unwrap_or_else(|_| Value::String(String::from_utf8_lossy(bytes).into_owned()))
}
