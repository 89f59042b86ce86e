use axum::{
    extract::{rejection::QueryRejection, Query, State},
    response::{IntoResponse, Response},
    Json,
};

use metricsink_core::ReportFilter;

use crate::app_state::AppState;
use crate::recovery::ApiError;
use crate::storage::scan_metric_row;

pub const INVALID_FILTER: &str = "please provide a valid filter either cpu or memory";

/// First `filter` value; repeats are ignored.
fn first_filter(params: &[(String, String)]) -> Option<&str> {
    params
        .iter()
        .find(|(key, _)| key == "filter")
        .map(|(_, value)| value.as_str())
}

/// `GET /report?filter=cpu|memory`
///
/// One row per IP carrying the max of the filtered column. Rows that fail to
/// scan are logged and left out; only a failed query aborts the response.
pub async fn fetch_report(
    State(state): State<AppState>,
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Result<Response, ApiError> {
    let Query(params) = query?;
    let filter = match ReportFilter::from_query(first_filter(&params)) {
        Ok(f) => f,
        Err(e) => {
            tracing::warn!("{e}");
            return Ok(super::bad_request(INVALID_FILTER));
        }
    };

    let rows = state.store().report_rows(filter).await?;

    let mut records = Vec::with_capacity(rows.len());
    for row in &rows {
        match scan_metric_row(row) {
            Ok(rec) => records.push(rec),
            Err(e) => tracing::error!(%filter, "failed to parse row - {e}"),
        }
    }

    tracing::debug!(%filter, rows = rows.len(), kept = records.len(), "report built");
    Ok(Json(records).into_response())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    #[test]
    fn first_filter_wins() {
        assert_eq!(first_filter(&params(&[])), None);
        assert_eq!(first_filter(&params(&[("x", "1"), ("filter", "memory")])), Some("memory"));
        assert_eq!(
            first_filter(&params(&[("filter", "cpu"), ("filter", "bogus")])),
            Some("cpu")
        );
    }
}
