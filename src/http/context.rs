//! Per-request context handed explicitly from handlers to outbound calls.

use std::time::Instant;

/// What an inbound request passes on to the calls it makes.
#[derive(Debug, Clone)]
pub struct RequestContext {
    /// The inbound server span. Outbound calls open their client span
    /// under it.
    pub span: tracing::Span,
    /// Point after which the inbound request is abandoned.
    pub deadline: Option<Instant>,
}
