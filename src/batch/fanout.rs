//! Concurrent fan-out with a join barrier.
//!
//! # Responsibilities
//! - Spawn one task per spec key (no ordering between keys)
//! - Wait for every task before handing off; no partial results
//! - Contain per-key failures: a panicking handler is absorbed at the task
//!   boundary and becomes a 500 result for that key only
//!
//! Invariant: the returned aggregate holds exactly one result for every key
//! in the spec.

use std::sync::Arc;

use axum::http::HeaderMap;
use futures_util::future::join_all;
use tokio::task::JoinHandle;

use crate::batch::dispatch::{self, DispatchPipeline};
use crate::batch::result::{BatchResponse, SubResult};
use crate::batch::spec::{BatchSpec, SpecEntry};
use crate::batch::subrequest;

enum Pending {
    /// Resolved during extraction, nothing to dispatch.
    Ready(String, SubResult),
    Spawned(String, JoinHandle<SubResult>),
}

/// Dispatch every spec entry concurrently and join on all of them.
pub async fn fan_out(
    pipeline: Arc<dyn DispatchPipeline>,
    spec: BatchSpec,
    outer_headers: &HeaderMap,
) -> BatchResponse {
    let mut pending = Vec::with_capacity(spec.len());
    for (key, entry) in spec.into_entries() {
        let path = match entry {
            SpecEntry::Path(path) => path,
            SpecEntry::Rejected => {
                pending.push(Pending::Ready(key, SubResult::NotFound));
                continue;
            }
        };
        let pipeline = pipeline.clone();
        let headers = outer_headers.clone();
        let task_key = key.clone();
        let handle = tokio::spawn(async move {
            let request = match subrequest::synthesize(&path, &headers) {
                Ok(request) => request,
                Err(error) => {
                    tracing::warn!(key = %task_key, error = %error, "sub-request not dispatchable");
                    return SubResult::NotFound;
                }
            };
            dispatch::invoke(pipeline.as_ref(), &task_key, request).await
        });
        pending.push(Pending::Spawned(key, handle));
    }

    // Join barrier: every key resolves before anything is emitted.
    join_all(pending.into_iter().map(|entry| async move {
        match entry {
            Pending::Ready(key, result) => (key, result),
            Pending::Spawned(key, handle) => match handle.await {
                Ok(result) => (key, result),
                Err(error) if error.is_panic() => {
                    tracing::error!(key = %key, "sub-request handler panicked");
                    (key, SubResult::ServerError)
                }
                Err(error) => {
                    tracing::error!(key = %key, error = %error, "sub-request task failed");
                    (key, SubResult::ServerError)
                }
            },
        }
    }))
    .await
    .into_iter()
    .collect()
}
