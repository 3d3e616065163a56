//! Configuration validation.

use thiserror::Error;

use crate::config::schema::GatewayConfig;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("listener.bind_address must not be empty")]
    EmptyBindAddress,

    #[error("batch.mount_path must start with '/' (got {0:?})")]
    BadMountPath(String),

    #[error("timeouts.request_secs must be greater than zero")]
    ZeroRequestTimeout,

    #[error("batch.max_sub_requests must be greater than zero when set")]
    ZeroMaxSubRequests,

    #[error("batch.body_limit_bytes must be greater than zero")]
    ZeroBodyLimit,
}

/// Check the whole configuration, collecting every violation.
pub fn validate_config(config: &GatewayConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.is_empty() {
        errors.push(ValidationError::EmptyBindAddress);
    }
    if !config.batch.mount_path.starts_with('/') {
        errors.push(ValidationError::BadMountPath(
            config.batch.mount_path.clone(),
        ));
    }
    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::ZeroRequestTimeout);
    }
    if config.batch.max_sub_requests == Some(0) {
        errors.push(ValidationError::ZeroMaxSubRequests);
    }
    if config.batch.body_limit_bytes == 0 {
        errors.push(ValidationError::ZeroBodyLimit);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
