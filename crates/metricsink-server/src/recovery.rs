//! Failure-to-response translation.
//!
//! Every handler returns `Result<Response, ApiError>`. `ApiError::into_response`
//! is the only place an error becomes a wire response:
//! - 4xx: status text plus the descriptive detail in `data.message`
//! - 5xx: status text only; the detail is logged, never sent
//!
//! Extractor rejections are folded into the same path: a rejection the caller
//! caused becomes `BadRequest`, anything else `Internal`.
//!
//! Panics below the router are caught by `CatchPanicLayer` and answered with
//! the same opaque 500 envelope, so a request always gets exactly one response.

use std::any::Any;

use axum::{
    extract::rejection::{BytesRejection, QueryRejection},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};

use metricsink_core::error::MetricError;
use metricsink_core::Envelope;

/// Plain-text body for wrong method / unknown path.
pub const NOT_FOUND_BODY: &str = "resource not found";

#[derive(Debug)]
pub struct ApiError(pub MetricError);

impl From<MetricError> for ApiError {
    fn from(e: MetricError) -> Self {
        Self(e)
    }
}

fn from_rejection(status: StatusCode, text: String) -> ApiError {
    if status.is_client_error() {
        ApiError(MetricError::BadRequest(text))
    } else {
        ApiError(MetricError::Internal(text))
    }
}

impl From<QueryRejection> for ApiError {
    fn from(r: QueryRejection) -> Self {
        from_rejection(r.status(), r.body_text())
    }
}

impl From<BytesRejection> for ApiError {
    fn from(r: BytesRejection) -> Self {
        from_rejection(r.status(), r.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let err = self.0;
        let code = err.status_code();
        let status = StatusCode::from_u16(code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        if matches!(err, MetricError::NotFound) {
            return not_found_response();
        }

        let body = if err.is_client_error() {
            tracing::warn!(code = err.client_code().as_str(), "{err}");
            let detail = match err {
                MetricError::BadRequest(detail) => detail,
                other => other.to_string(),
            };
            Envelope::failure(code, detail)
        } else {
            tracing::error!(code = err.client_code().as_str(), "{err}");
            Envelope::opaque_failure(code)
        };

        (status, Json(body)).into_response()
    }
}

fn not_found_response() -> Response {
    (
        StatusCode::NOT_FOUND,
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        NOT_FOUND_BODY,
    )
        .into_response()
}

/// Method fallback and router fallback.
pub async fn not_found() -> ApiError {
    ApiError(MetricError::NotFound)
}

/// `CatchPanicLayer` handler.
pub fn panic_response(payload: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = payload.downcast_ref::<String>() {
        s.as_str()
    } else if let Some(s) = payload.downcast_ref::<&str>() {
        s
    } else {
        "unknown panic payload"
    };
    tracing::error!(panic = detail, "handler panicked");

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(Envelope::opaque_failure(500)),
    )
        .into_response()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    async fn body_of(resp: Response) -> String {
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    #[tokio::test]
    async fn not_found_is_plain_text() {
        let resp = not_found().await.into_response();
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            resp.headers()[header::CONTENT_TYPE],
            "text/plain; charset=utf-8"
        );
        assert_eq!(body_of(resp).await, NOT_FOUND_BODY);
    }

    #[tokio::test]
    async fn client_errors_carry_detail_server_errors_do_not() {
        let resp = ApiError(MetricError::BadRequest("bad filter".into())).into_response();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        assert!(body_of(resp).await.contains("bad filter"));

        let resp = ApiError(MetricError::Query("no such table: metrics".into())).into_response();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(!body_of(resp).await.contains("no such table"));
    }

    #[test]
    fn rejections_split_on_status() {
        let e = from_rejection(StatusCode::PAYLOAD_TOO_LARGE, "too big".into());
        assert!(matches!(e.0, MetricError::BadRequest(_)));
        let e = from_rejection(StatusCode::INTERNAL_SERVER_ERROR, "io".into());
        assert!(matches!(e.0, MetricError::Internal(_)));
    }
}
