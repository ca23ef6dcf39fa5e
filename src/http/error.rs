//! Mapping of request failures onto HTTP responses.
//!
//! Bodies are short plain-text messages; internal detail is logged, never
//! returned.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::enrichment::EnrichError;

pub const INVALID_BODY: &str = "invalid json, expected {\"text\":\"...\"}";
pub const EMPTY_TEXT: &str = "text must not be empty";

#[derive(Debug, Error)]
pub enum ApiError {
    /// Bad client input.
    #[error("{0}")]
    Validation(&'static str),

    #[error(transparent)]
    Enrichment(#[from] EnrichError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Enrichment(e) if e.is_internal() => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::Enrichment(_) => StatusCode::BAD_GATEWAY,
        }
    }

    fn message(&self) -> &'static str {
        match self {
            ApiError::Validation(message) => *message,
            ApiError::Enrichment(EnrichError::Build(_)) => "failed to build worker request",
            ApiError::Enrichment(EnrichError::Transport(_)) => "worker call failed",
            ApiError::Enrichment(EnrichError::Timeout(_)) => "worker call timed out",
            ApiError::Enrichment(EnrichError::Upstream { .. }) => "worker returned non-200",
            ApiError::Enrichment(EnrichError::Decode(_)) => "failed to decode worker response",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), self.message()).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn status_of(err: impl Into<ApiError>) -> StatusCode {
        err.into().into_response().status()
    }

    #[test]
    fn test_status_mapping() {
        assert_eq!(status_of(ApiError::Validation(INVALID_BODY)), StatusCode::BAD_REQUEST);
        assert_eq!(status_of(EnrichError::Build("bad uri".into())), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(status_of(EnrichError::Transport("refused".into())), StatusCode::BAD_GATEWAY);
        assert_eq!(status_of(EnrichError::Timeout(Duration::from_secs(3))), StatusCode::BAD_GATEWAY);
        assert_eq!(
            status_of(EnrichError::Upstream { status: StatusCode::INTERNAL_SERVER_ERROR }),
            StatusCode::BAD_GATEWAY
        );
        let decode = serde_json::from_str::<crate::enrichment::Enrichment>("{").unwrap_err();
        assert_eq!(status_of(EnrichError::Decode(decode)), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn test_message_hides_internal_detail() {
        let err = ApiError::from(EnrichError::Transport("connect to 10.0.0.7:8090 refused".into()));
        assert_eq!(err.message(), "worker call failed");
    }
}
