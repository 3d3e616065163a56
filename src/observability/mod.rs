//! Observability subsystem.
//!
//! Structured logging via `tracing`. Per-key sub-request failures are
//! swallowed by the batch mechanism, so the log stream is the only place
//! they surface in full; every swallow site records the key and the error.

pub mod logging;
