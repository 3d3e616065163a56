//! Per-key result types and their wire shape.
//!
//! Every sub-request resolves to exactly one [`SubResult`], regardless of how
//! it went. All three variants serialize to the same `{code, body, headers}`
//! object so callers can branch on `code` alone.

use std::collections::BTreeMap;

use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};
use serde_json::{Map, Value};

/// One captured response header. Names are lower-cased.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Header {
    pub name: String,
    pub value: String,
}

impl Header {
    pub fn new(name: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }
}

/// Outcome of dispatching one sub-request.
#[derive(Debug, Clone, PartialEq)]
pub enum SubResult {
    /// A route matched and its handler completed.
    Success {
        code: u16,
        headers: Vec<Header>,
        body: Value,
    },
    /// No route matched the sub-path (or the path never became a
    /// dispatchable request). Serializes as code 404 with an empty body.
    NotFound,
    /// The matched handler failed (panicked or the pipeline returned an
    /// error). Serializes as code 500 with an empty body.
    ServerError,
}

impl SubResult {
    /// Status code this result carries on the wire.
    pub fn code(&self) -> u16 {
        match self {
            SubResult::Success { code, .. } => *code,
            SubResult::NotFound => 404,
            SubResult::ServerError => 500,
        }
    }
}

impl Serialize for SubResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let empty = Value::Object(Map::new());
        let (body, headers): (&Value, &[Header]) = match self {
            SubResult::Success { headers, body, .. } => (body, headers),
            SubResult::NotFound | SubResult::ServerError => (&empty, &[]),
        };
        let mut state = serializer.serialize_struct("SubResult", 3)?;
        state.serialize_field("code", &self.code())?;
        state.serialize_field("body", body)?;
        state.serialize_field("headers", &headers)?;
        state.end()
    }
}

/// Aggregate of one batch call: every spec key maps to exactly one result.
pub type BatchResponse = BTreeMap<String, SubResult>;

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn success_serializes_code_body_headers() {
        let result = SubResult::Success {
            code: 200,
            headers: vec![Header::new("custom-header", "why not")],
            body: json!({"result": "resource1"}),
        };
        assert_eq!(
            serde_json::to_value(&result).unwrap(),
            json!({
                "code": 200,
                "body": {"result": "resource1"},
                "headers": [{"name": "custom-header", "value": "why not"}],
            })
        );
    }

    #[test]
    fn not_found_serializes_as_empty_404() {
        assert_eq!(
            serde_json::to_value(SubResult::NotFound).unwrap(),
            json!({"code": 404, "body": {}, "headers": []})
        );
    }

    #[test]
    fn server_error_serializes_as_empty_500() {
        assert_eq!(
            serde_json::to_value(SubResult::ServerError).unwrap(),
            json!({"code": 500, "body": {}, "headers": []})
        );
    }
}
