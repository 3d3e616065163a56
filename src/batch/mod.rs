//! Request multiplexing subsystem.
//!
//! # Data Flow
//! ```text
//! Inbound batch call (GET query / POST JSON body)
//!     → spec.rs (extract {key: path} pairs, reject malformed entries per key)
//!     → subrequest.rs (synthesize one virtual GET request per key)
//!     → dispatch.rs (push each through the application's own Router)
//!     → fanout.rs (one task per key, join on all, contain panics)
//!     → result.rs (uniform {code, body, headers} per key)
//!     → handler.rs (aggregate into one JSON object, outer status 200)
//! ```
//!
//! # Design Decisions
//! - Sub-requests run through the identical `Router` a real request would hit,
//!   so routing, middleware, and shared state behave exactly as standalone.
//! - Every per-key failure (no route, handler panic, pipeline error) is
//!   terminal at the key level and encoded in the payload; nothing escapes
//!   the fan-out boundary.
//! - The outer call fails (400) only when the batch spec itself is unreadable.

pub mod dispatch;
pub mod fanout;
pub mod handler;
pub mod result;
pub mod spec;
pub mod subrequest;

pub use dispatch::{DispatchPipeline, PipelineOutcome, RouterPipeline};
pub use handler::{attach, BatchLimits};
pub use result::{BatchResponse, Header, SubResult};
pub use spec::{BatchSpec, ExtractionError};
