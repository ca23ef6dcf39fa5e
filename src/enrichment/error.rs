//! Enrichment failure taxonomy.

use std::time::Duration;

use axum::http::StatusCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EnrichError {
    /// The outbound request could not be constructed.
    #[error("failed to build worker request: {0}")]
    Build(String),

    /// Connection refused, reset, or body read failure.
    #[error("worker call failed: {0}")]
    Transport(String),

    /// The per-call timeout or the caller's deadline expired first.
    #[error("worker call timed out after {0:?}")]
    Timeout(Duration),

    /// The worker answered with something other than 200.
    #[error("worker returned status {status}")]
    Upstream { status: StatusCode },

    /// The 200 body was not the expected JSON shape.
    #[error("failed to decode worker response: {0}")]
    Decode(#[source] serde_json::Error),
}

impl EnrichError {
    /// Metric and span label for this failure.
    pub fn outcome(&self) -> &'static str {
        match self {
            EnrichError::Build(_) => "build_error",
            EnrichError::Transport(_) => "transport_error",
            EnrichError::Timeout(_) => "timeout",
            EnrichError::Upstream { .. } => "upstream_error",
            EnrichError::Decode(_) => "decode_error",
        }
    }

    /// Failures on our side of the boundary rather than the worker's.
    pub fn is_internal(&self) -> bool {
        matches!(self, EnrichError::Build(_))
    }
}
