use std::net::SocketAddr;

use axum::{
    extract::{rejection::BytesRejection, ConnectInfo, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use bytes::Bytes;

use metricsink_core::decode_metric_body;

use crate::app_state::AppState;
use crate::context::client_ip;
use crate::recovery::ApiError;

pub const MISSING_FIELDS: &str = "percentage_cpu_used and percentage_memory_used are required";
pub const RECORDED: &str = "metric recorded";

/// `POST /metrics`
///
/// Empty body is a 400, any other undecodable body a 500. A payload with both
/// readings at zero counts as missing fields. The source IP always comes from
/// the connection; an unusable address is stored as empty.
pub async fn ingest_metric(
    State(state): State<AppState>,
    connect: Option<ConnectInfo<SocketAddr>>,
    body: Result<Bytes, BytesRejection>,
) -> Result<Response, ApiError> {
    let payload = decode_metric_body(&body?)?;

    if payload.is_missing_fields() {
        tracing::warn!("rejecting metric without cpu/memory readings");
        return Ok(super::bad_request(MISSING_FIELDS));
    }

    let metric = payload.with_ip(client_ip(connect));
    state.store().insert(None, &metric).await?;
    tracing::debug!(ip = %metric.ip, cpu = metric.cpu_used, memory = metric.memory_used, "metric recorded");

    Ok((StatusCode::OK, RECORDED).into_response())
}
