//! Shared utilities for integration and load testing.

use std::future::Future;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{
    body::Bytes,
    http::{HeaderMap, StatusCode},
    routing::post,
    Router,
};
use serde_json::Value;
use task_api::config::{ServiceConfig, TracingConfig};
use task_api::observability::TelemetryProvider;
use task_api::{HttpServer, Shutdown};
use tokio::net::TcpListener;
use tracing::subscriber::DefaultGuard;
use tracing_subscriber::layer::SubscriberExt;

/// What the stub worker saw for one call.
#[derive(Debug, Clone)]
pub struct WorkerCall {
    pub headers: HeaderMap,
    pub body: Bytes,
}

/// Start a stub enrichment worker that always answers 200 with `response`.
#[allow(dead_code)]
pub async fn start_mock_worker(response: &'static str) -> SocketAddr {
    start_programmable_worker(move |_| async move { (200, response.to_string()) }).await
}

/// Start a stub enrichment worker whose `/enrich` answer is computed per call.
#[allow(dead_code)]
pub async fn start_programmable_worker<F, Fut>(f: F) -> SocketAddr
where
    F: Fn(WorkerCall) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = (u16, String)> + Send + 'static,
{
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let f = Arc::new(f);

    let app = Router::new().route(
        "/enrich",
        post(move |headers: HeaderMap, body: Bytes| {
            let f = f.clone();
            async move {
                let (status, body) = f(WorkerCall { headers, body }).await;
                (StatusCode::from_u16(status).unwrap(), body)
            }
        }),
    );

    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    addr
}

/// Start a stub OTLP collector recording every posted payload.
#[allow(dead_code)]
pub async fn start_collector() -> (SocketAddr, Arc<Mutex<Vec<Value>>>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let received = Arc::new(Mutex::new(Vec::new()));

    let sink = received.clone();
    let app = Router::new().route(
        "/v1/traces",
        post(move |body: Bytes| {
            let sink = sink.clone();
            async move {
                if let Ok(json) = serde_json::from_slice::<Value>(&body) {
                    sink.lock().unwrap().push(json);
                }
                StatusCode::OK
            }
        }),
    );

    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    (addr, received)
}

/// Tracing configuration exporting to the stub collector at `collector`.
#[allow(dead_code)]
pub fn collector_config(collector: SocketAddr) -> TracingConfig {
    TracingConfig {
        collector_endpoint: format!("http://{}/v1/traces", collector),
        strict: true,
        flush_interval_ms: 60_000,
        ..TracingConfig::default()
    }
}

/// Route this thread's spans through `telemetry` until the guard drops.
/// Tests using it must stay on the current-thread runtime.
#[allow(dead_code)]
pub fn install(telemetry: &TelemetryProvider) -> DefaultGuard {
    tracing::subscriber::set_default(tracing_subscriber::registry().with(telemetry.layer()))
}

/// Every span in a list of OTLP/JSON payloads.
#[allow(dead_code)]
pub fn exported_spans(payloads: &[Value]) -> Vec<Value> {
    payloads
        .iter()
        .flat_map(|p| p["resourceSpans"].as_array().cloned().unwrap_or_default())
        .flat_map(|rs| rs["scopeSpans"].as_array().cloned().unwrap_or_default())
        .flat_map(|ss| ss["spans"].as_array().cloned().unwrap_or_default())
        .collect()
}

/// An address nothing is listening on.
#[allow(dead_code)]
pub async fn closed_port() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    listener.local_addr().unwrap()
}

/// Service configuration pointing at `worker`, with metrics and span
/// export turned off.
#[allow(dead_code)]
pub fn config_for(worker: SocketAddr) -> ServiceConfig {
    let mut config = ServiceConfig::default();
    config.listener.bind_address = "127.0.0.1:0".into();
    config.worker.base_url = format!("http://{}", worker);
    config.tracing.enabled = false;
    config.observability.metrics_enabled = false;
    config
}

/// Serve `config` on an ephemeral port. Trigger the returned handle to stop.
#[allow(dead_code)]
pub async fn start_service(config: ServiceConfig) -> (String, Shutdown) {
    let shutdown = Shutdown::new();
    let server = HttpServer::new(config);
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let server_shutdown = shutdown.subscribe();

    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    tokio::time::sleep(Duration::from_millis(50)).await;
    (format!("http://{}", addr), shutdown)
}

/// A client that never reuses connections, so each request is independent.
#[allow(dead_code)]
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .pool_max_idle_per_host(0)
        .no_proxy()
        .build()
        .unwrap()
}
