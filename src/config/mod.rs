//! Configuration subsystem.
//!
//! # Data Flow
//! ```text
//! TOML file (optional)
//!     → loader.rs (read + parse)
//!     → validation.rs (reject unusable values, collect all violations)
//!     → schema.rs types consumed by the server and batch endpoint
//! ```
//!
//! Every field has a default, so the gateway runs with no config file at all.

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::{BatchConfig, GatewayConfig, ListenerConfig, ObservabilityConfig, TimeoutConfig};
pub use validation::{validate_config, ValidationError};
