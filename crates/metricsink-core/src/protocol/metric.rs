//! Metric ingest body and stored record.
//!
//! Decoding rules:
//! - Only the first JSON value of the body is read; trailing bytes are ignored.
//! - An empty or whitespace-only body is a client error.
//! - Any other decode failure (syntax, truncation, wrong types, a top-level
//!   value that is not an object) is a server error.
//! - Missing fields default to zero, unknown fields are ignored.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{MetricError, Result};

/// Body of `POST /metrics`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct MetricPayload {
    #[serde(rename = "percentage_cpu_used", default)]
    pub cpu_used: i64,
    #[serde(rename = "percentage_memory_used", default)]
    pub memory_used: i64,
}

impl MetricPayload {
    /// Both readings zero is treated as "fields absent".
    /// A genuine 0/0 sample cannot be told apart from a missing one.
    pub fn is_missing_fields(&self) -> bool {
        self.cpu_used == 0 && self.memory_used == 0
    }

    /// Attach the server-derived source address.
    pub fn with_ip(self, ip: impl Into<String>) -> NewMetric {
        NewMetric {
            cpu_used: self.cpu_used,
            memory_used: self.memory_used,
            ip: ip.into(),
        }
    }
}

/// A sample ready for insertion; `recorded_at` is assigned by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMetric {
    pub cpu_used: i64,
    pub memory_used: i64,
    /// Parsed IP string, or empty when the remote address was unusable.
    pub ip: String,
}

/// A stored sample as returned by the report endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct MetricRecord {
    #[serde(rename = "percentage_cpu_used")]
    pub cpu_used: i64,
    #[serde(rename = "percentage_memory_used")]
    pub memory_used: i64,
    pub ip: String,
    #[serde(rename = "date")]
    pub recorded_at: DateTime<Utc>,
}

/// Decode an ingest body.
pub fn decode_metric_body(body: &[u8]) -> Result<MetricPayload> {
    let mut values = serde_json::Deserializer::from_slice(body).into_iter::<Value>();
    let value = match values.next() {
        None => return Err(MetricError::BadRequest("failed to read body params: empty body".into())),
        Some(Err(e)) => return Err(MetricError::Internal(format!("failed to parse json body: {e}"))),
        Some(Ok(value)) => value,
    };
    match value {
        // `null` decodes to the zero payload and is rejected later as missing fields.
        Value::Null => Ok(MetricPayload::default()),
        // Derived struct impls also take sequences; only objects are accepted here.
        Value::Object(_) => serde_json::from_value(value)
            .map_err(|e| MetricError::Internal(format!("failed to parse json body: {e}"))),
        other => Err(MetricError::Internal(format!(
            "failed to parse json body: expected an object, got {other}"
        ))),
    }
}
