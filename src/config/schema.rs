//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from config files, with
//! defaults so a partial (or absent) file is always usable.

use serde::{Deserialize, Serialize};

use crate::batch::BatchLimits;

/// Root configuration for the multifetch gateway.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct GatewayConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Batch endpoint configuration.
    pub batch: BatchConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8080").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8080".to_string(),
        }
    }
}

/// Timeout configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Whole-request timeout for the outer call, in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Batch endpoint configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct BatchConfig {
    /// Path the batch endpoint is mounted at.
    pub mount_path: String,

    /// Upper bound on sub-requests per call (unset = unlimited).
    pub max_sub_requests: Option<usize>,

    /// Cap on the inbound POST spec body, in bytes.
    pub body_limit_bytes: usize,
}

impl Default for BatchConfig {
    fn default() -> Self {
        Self {
            mount_path: "/api".to_string(),
            max_sub_requests: None,
            body_limit_bytes: 1024 * 1024,
        }
    }
}

impl From<&BatchConfig> for BatchLimits {
    fn from(config: &BatchConfig) -> Self {
        Self {
            max_sub_requests: config.max_sub_requests,
            body_limit: config.body_limit_bytes,
        }
    }
}

/// Observability settings.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Default tracing filter when RUST_LOG is not set.
    pub log_filter: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_filter: "multifetch=debug,tower_http=debug".to_string(),
        }
    }
}
