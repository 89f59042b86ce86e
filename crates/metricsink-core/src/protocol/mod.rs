//! Wire formats for the HTTP surface.
//!
//! - `metric`: ingest body and stored record shapes, panic-free body decoding.
//! - `report`: the closed set of report filters.
//! - `envelope`: the `{success, message, data}` response wrapper.

pub mod envelope;
pub mod metric;
pub mod report;

pub use envelope::Envelope;
pub use metric::{decode_metric_body, MetricPayload, MetricRecord, NewMetric};
pub use report::ReportFilter;
