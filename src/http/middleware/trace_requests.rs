//! Server span middleware.
//!
//! Wraps every request, routed or not, in a server span named after its
//! route (the raw path when nothing matched), continues the caller's trace
//! when a valid `traceparent` arrives, and leaves a [`RequestContext`] in
//! the request extensions for handlers.

use std::time::Instant;

use axum::{
    body::Body,
    extract::{MatchedPath, State},
    http::Request,
    middleware::Next,
    response::Response,
};
use tracing::{field, Instrument};
use tracing_opentelemetry::OpenTelemetrySpanExt;

use crate::http::context::RequestContext;
use crate::http::server::AppState;
use crate::observability::{metrics, propagation};

pub async fn trace_requests(
    State(state): State<AppState>,
    mut req: Request<Body>,
    next: Next,
) -> Response {
    let start = Instant::now();
    let route = req
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_string())
        .unwrap_or_else(|| req.uri().path().to_string());
    let method = req.method().to_string();

    let span = tracing::info_span!(
        "request",
        otel.name = %route,
        otel.kind = "server",
        otel.status_code = field::Empty,
        http.request.method = %method,
        http.route = %route,
        http.response.status_code = field::Empty,
        trace_id = field::Empty,
    );
    span.set_parent(propagation::extract(req.headers()));
    if let Some(trace_id) = propagation::trace_id(&span) {
        span.record("trace_id", trace_id.as_str());
    }

    req.extensions_mut().insert(RequestContext {
        span: span.clone(),
        deadline: Some(start + state.request_timeout),
    });

    let response = next.run(req).instrument(span.clone()).await;

    let status = response.status();
    span.record("http.response.status_code", status.as_u16());
    span.record(
        "otel.status_code",
        if status.is_server_error() { "ERROR" } else { "OK" },
    );
    metrics::record_request(&method, &route, status.as_u16(), start);

    response
}
