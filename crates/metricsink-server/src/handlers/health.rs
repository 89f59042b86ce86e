use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

use metricsink_core::Envelope;

pub const HEALTH_MESSAGE: &str = "healthy";
pub const HEALTH_DETAIL: &str = "server is working and ready to accept connections";

pub async fn health_check() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(Envelope::success(HEALTH_MESSAGE, json!({ "message": HEALTH_DETAIL }))),
    )
}
