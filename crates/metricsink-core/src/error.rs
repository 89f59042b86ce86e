//! Shared error type across metricsink crates.

use thiserror::Error;

/// Client-facing error codes (stable API).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientCode {
    /// Invalid input / missing fields / unknown filter.
    BadRequest,
    /// Wrong method or unknown path.
    NotFound,
    /// Internal server error.
    Internal,
}

impl ClientCode {
    /// String representation used in logs and tests.
    pub fn as_str(self) -> &'static str {
        match self {
            ClientCode::BadRequest => "BAD_REQUEST",
            ClientCode::NotFound => "NOT_FOUND",
            ClientCode::Internal => "INTERNAL",
        }
    }

    /// HTTP status carried by this code.
    pub fn status_code(self) -> u16 {
        match self {
            ClientCode::BadRequest => 400,
            ClientCode::NotFound => 404,
            ClientCode::Internal => 500,
        }
    }
}

/// Fixed status text for the statuses the service emits.
pub fn status_message(status: u16) -> &'static str {
    match status {
        400 => "Bad request",
        404 => "Not found",
        _ => "Internal server error",
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, MetricError>;

/// Unified error type used by core and server.
#[derive(Debug, Error)]
pub enum MetricError {
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("resource not found")]
    NotFound,
    #[error("internal: {0}")]
    Internal(String),
    #[error("schema error: {0}")]
    Schema(String),
    #[error("insert failed: {0}")]
    Insert(String),
    #[error("query failed: {0}")]
    Query(String),
    #[error("config error: {0}")]
    Config(String),
}

impl MetricError {
    /// Map internal error to a stable client-facing code.
    pub fn client_code(&self) -> ClientCode {
        match self {
            MetricError::BadRequest(_) => ClientCode::BadRequest,
            MetricError::NotFound => ClientCode::NotFound,
            MetricError::Internal(_)
            | MetricError::Schema(_)
            | MetricError::Insert(_)
            | MetricError::Query(_)
            | MetricError::Config(_) => ClientCode::Internal,
        }
    }

    pub fn status_code(&self) -> u16 {
        self.client_code().status_code()
    }

    /// Whether the detail may be shown to the caller.
    /// Server-side failures only ever expose the generic status text.
    pub fn is_client_error(&self) -> bool {
        self.status_code() < 500
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn storage_errors_are_internal() {
        for e in [
            MetricError::Schema("x".into()),
            MetricError::Insert("x".into()),
            MetricError::Query("x".into()),
            MetricError::Config("x".into()),
        ] {
            assert_eq!(e.status_code(), 500);
            assert!(!e.is_client_error());
        }
    }

    #[test]
    fn client_errors_keep_their_status() {
        assert_eq!(MetricError::BadRequest("x".into()).status_code(), 400);
        assert_eq!(MetricError::NotFound.status_code(), 404);
        assert_eq!(status_message(404), "Not found");
        assert_eq!(status_message(503), "Internal server error");
    }
}
