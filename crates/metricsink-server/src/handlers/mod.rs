//! HTTP handlers.
//!
//! - `GET  /health-check`
//! - `POST /metrics`
//! - `GET  /report?filter=cpu|memory`
//!
//! Handlers return `Result<Response, ApiError>`; errors are rendered by
//! `recovery`. The two "explain yourself" 400s (missing fields, bad filter)
//! are built here directly.

pub mod health;
pub mod ingest;
pub mod report;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use metricsink_core::Envelope;

pub use health::health_check;
pub use ingest::ingest_metric;
pub use report::fetch_report;

fn bad_request(detail: &str) -> Response {
    (StatusCode::BAD_REQUEST, Json(Envelope::failure(400, detail))).into_response()
}
