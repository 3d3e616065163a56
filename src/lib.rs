//! Request multiplexing ("multifetch") for axum.
//!
//! One HTTP call carries a set of named sub-request paths; each sub-path is
//! dispatched through the application's own `Router` exactly as a real
//! request would be, concurrently and with per-key failure isolation, and the
//! outer response is a single JSON object keyed by the sub-request names:
//!
//! ```text
//! GET /api?resource1=/resource1&resource2=/resource2/5
//!
//! 200 OK
//! {
//!   "resource1": {"code": 200, "body": {...}, "headers": [{"name": ..., "value": ...}]},
//!   "resource2": {"code": 200, "body": {...}, "headers": [...]}
//! }
//! ```
//!
//! The same spec can be POSTed as a flat JSON object. A sub-path with no
//! matching route answers `{"code": 404, "body": {}}` for its key; a handler
//! failure answers `{"code": 500, "body": {}}`; neither disturbs the other
//! keys or the outer 200.
//!
//! Mount it with [`attach`], or let [`GatewayServer`] wire everything from a
//! [`GatewayConfig`].

pub mod batch;
pub mod config;
pub mod lifecycle;
pub mod observability;
pub mod server;

pub use batch::{
    attach, BatchLimits, BatchResponse, DispatchPipeline, Header, PipelineOutcome, RouterPipeline,
    SubResult,
};
pub use config::GatewayConfig;
pub use lifecycle::Shutdown;
pub use server::GatewayServer;
