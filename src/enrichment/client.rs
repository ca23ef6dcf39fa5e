//! Enrichment worker client.
//!
//! # Responsibilities
//! - One `POST {worker}/enrich` per task creation
//! - Inject the caller's trace context into outbound headers
//! - Bound the call by the worker timeout and the caller's deadline
//! - Decode the worker's answer
//!
//! # Design Decisions
//! - The pooled hyper client is shared read-only by all requests
//! - Dropping the returned future aborts the call (inbound cancellation)
//! - No retries: creation is not idempotent and every failure is terminal

use std::time::{Duration, Instant};

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use hyper_util::{
    client::legacy::{connect::HttpConnector, Client},
    rt::TokioExecutor,
};
use tokio::time;
use tracing::{field, Instrument};

use crate::config::WorkerConfig;
use crate::enrichment::error::EnrichError;
use crate::enrichment::types::{EnrichRequest, Enrichment};
use crate::http::context::RequestContext;
use crate::observability::{metrics, propagation};
use crate::resilience::effective_timeout;

/// Upper bound on a worker response body.
const MAX_RESPONSE_BYTES: usize = 64 * 1024;

#[derive(Clone)]
pub struct EnrichmentClient {
    client: Client<HttpConnector, Body>,
    enrich_url: String,
    timeout: Duration,
}

impl EnrichmentClient {
    pub fn new(config: &WorkerConfig) -> Self {
        let client = Client::builder(TokioExecutor::new()).build(HttpConnector::new());
        Self {
            client,
            enrich_url: config.enrich_url(),
            timeout: Duration::from_millis(config.timeout_ms),
        }
    }

    /// Ask the worker for priority, score and status of `text`.
    ///
    /// The client span is a child of `ctx.span` and closes on every exit
    /// path, including when the caller drops this future.
    pub async fn enrich(&self, ctx: &RequestContext, text: &str) -> Result<Enrichment, EnrichError> {
        let span = tracing::info_span!(
            parent: &ctx.span,
            "enrich",
            otel.name = "POST /enrich",
            otel.kind = "client",
            otel.status_code = field::Empty,
            otel.status_message = field::Empty,
            http.request.method = "POST",
            url.full = %self.enrich_url,
            http.response.status_code = field::Empty,
            outcome = field::Empty,
        );

        let timeout = effective_timeout(self.timeout, ctx.deadline, Instant::now());
        let call = time::timeout(timeout, self.call(&span, text)).instrument(span.clone());
        let result = match call.await {
            Ok(result) => result,
            Err(_) => Err(EnrichError::Timeout(timeout)),
        };

        metrics::record_enrich_call(match &result {
            Ok(_) => "ok",
            Err(e) => e.outcome(),
        });
        let _entered = span.enter();
        match &result {
            Ok(enrichment) => {
                span.record("outcome", "ok");
                span.record("otel.status_code", "OK");
                tracing::debug!(
                    priority = enrichment.priority,
                    status = %enrichment.status,
                    "Enrichment succeeded"
                );
            }
            Err(e) => {
                span.record("outcome", e.outcome());
                span.record("otel.status_code", "ERROR");
                span.record("otel.status_message", e.to_string().as_str());
                tracing::warn!(url = %self.enrich_url, error = %e, "Enrichment failed");
            }
        }

        result
    }

    async fn call(&self, span: &tracing::Span, text: &str) -> Result<Enrichment, EnrichError> {
        let body = serde_json::to_vec(&EnrichRequest { text }).map_err(|e| EnrichError::Build(e.to_string()))?;

        let mut request = Request::builder()
            .method(Method::POST)
            .uri(self.enrich_url.as_str())
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body))
            .map_err(|e| EnrichError::Build(e.to_string()))?;
        propagation::inject(span, request.headers_mut());

        let response = self
            .client
            .request(request)
            .await
            .map_err(|e| EnrichError::Transport(e.to_string()))?;

        let status = response.status();
        span.record("http.response.status_code", status.as_u16());
        if status != StatusCode::OK {
            return Err(EnrichError::Upstream { status });
        }

        let bytes = axum::body::to_bytes(Body::new(response.into_body()), MAX_RESPONSE_BYTES)
            .await
            .map_err(|e| EnrichError::Transport(e.to_string()))?;

        serde_json::from_slice(&bytes).map_err(EnrichError::Decode)
    }
}
