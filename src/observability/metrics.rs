//! Metrics collection and exposition.
//!
//! # Metrics
//! - `task_api_requests_total` (counter): requests by method, route, status
//! - `task_api_request_duration_seconds` (histogram): latency by route
//! - `task_api_enrich_calls_total` (counter): worker calls by outcome
//! - `task_api_tasks_stored` (gauge): tasks held in memory
//!
//! Without an installed recorder every call is a no-op.

use std::net::SocketAddr;
use std::time::Instant;

use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::PrometheusBuilder;

/// Start the Prometheus scrape endpoint.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

pub fn record_request(method: &str, route: &str, status: u16, start: Instant) {
    counter!(
        "task_api_requests_total",
        "method" => method.to_string(),
        "route" => route.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
    histogram!("task_api_request_duration_seconds", "route" => route.to_string())
        .record(start.elapsed().as_secs_f64());
}

pub fn record_enrich_call(outcome: &'static str) {
    counter!("task_api_enrich_calls_total", "outcome" => outcome).increment(1);
}

pub fn record_tasks_stored(count: usize) {
    gauge!("task_api_tasks_stored").set(count as f64);
}
