//! Batch spec extraction.
//!
//! # Responsibilities
//! - Read {key: path} pairs from the inbound call (query string on GET,
//!   flat JSON object on POST)
//! - Reject malformed entries per key, never aborting the whole call
//! - Surface an unreadable outer body as the one whole-call failure (400)
//!
//! # Design Decisions
//! - Duplicate keys resolve last-write-wins, matching standard query parsing
//! - An empty query string / empty body is an empty spec, not an error

use std::collections::HashMap;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::Value;
use thiserror::Error;
use url::form_urlencoded;

/// Whole-call extraction failures. Each maps to an outer 400; anything less
/// severe is downgraded to a per-key [`SpecEntry::Rejected`].
#[derive(Debug, Error)]
pub enum ExtractionError {
    #[error("request body is not valid JSON: {0}")]
    InvalidJson(#[from] serde_json::Error),

    #[error("request body must be a flat JSON object mapping keys to paths")]
    NotAnObject,

    #[error("failed to read request body: {0}")]
    BodyRead(#[from] axum::Error),

    #[error("batch of {got} sub-requests exceeds the limit of {limit}")]
    TooManyKeys { got: usize, limit: usize },
}

impl IntoResponse for ExtractionError {
    fn into_response(self) -> Response {
        (StatusCode::BAD_REQUEST, self.to_string()).into_response()
    }
}

/// One extracted spec entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpecEntry {
    /// A sub-path to dispatch.
    Path(String),
    /// Rejected during extraction (e.g. a non-string POST value); resolves
    /// to a 404 result without ever being dispatched.
    Rejected,
}

/// The set of (key, path) pairs carried by one batch call.
///
/// Built once per inbound call and immutable afterwards; key order is not
/// meaningful.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchSpec {
    entries: HashMap<String, SpecEntry>,
}

impl BatchSpec {
    /// Extract from a GET query string. Parameter names become keys, decoded
    /// values become sub-paths.
    pub fn from_query(query: &str) -> Self {
        let mut entries = HashMap::new();
        for (key, path) in form_urlencoded::parse(query.as_bytes()) {
            // last-write-wins on duplicates
            entries.insert(key.into_owned(), SpecEntry::Path(path.into_owned()));
        }
        Self { entries }
    }

    /// Extract from a POST body holding a flat JSON object. Non-string values
    /// are rejected per key; a body that is not a JSON object fails the call.
    pub fn from_json_body(bytes: &[u8]) -> Result<Self, ExtractionError> {
        if bytes.is_empty() {
            return Ok(Self::default());
        }
        let parsed: Value = serde_json::from_slice(bytes)?;
        let Value::Object(fields) = parsed else {
            return Err(ExtractionError::NotAnObject);
        };
        let mut entries = HashMap::new();
        for (key, value) in fields {
            match value {
                Value::String(path) => {
                    entries.insert(key, SpecEntry::Path(path));
                }
                other => {
                    tracing::warn!(
                        key = %key,
                        value = %other,
                        "rejecting sub-request with non-string path"
                    );
                    entries.insert(key, SpecEntry::Rejected);
                }
            }
        }
        Ok(Self { entries })
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Consume the spec in no particular order.
    pub fn into_entries(self) -> impl Iterator<Item = (String, SpecEntry)> {
        self.entries.into_iter()
    }
}
