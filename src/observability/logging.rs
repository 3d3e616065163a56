//! Structured logging.
//!
//! # Design Decisions
//! - Uses the tracing crate for structured logging
//! - RUST_LOG overrides the configured filter when set

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the global tracing subscriber.
///
/// `default_filter` applies when RUST_LOG is absent. Call once at startup;
/// a second call panics, so this stays out of library paths.
pub fn init(default_filter: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
