//! metricsink core: transport-agnostic metric types, request decoding, and errors.
//!
//! This crate defines the wire-level contracts and error surface shared by the
//! server and its tests. It intentionally carries no transport, storage, or
//! runtime dependencies.
//!
//! Panics, `unwrap`, and `expect` are compile-denied here.
//! All fallible paths surface as `MetricError`/`Result`.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod error;
pub mod protocol;

/// Shared result type.
pub use error::{MetricError, Result};
pub use protocol::{decode_metric_body, Envelope, MetricPayload, MetricRecord, NewMetric, ReportFilter};
