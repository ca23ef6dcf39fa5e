//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with all handlers
//! - Wire up middleware (request logs, limits, request ID, server spans)
//! - Bind server to listener
//! - Stop accepting on shutdown and drain in-flight requests

use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::DefaultBodyLimit,
    middleware,
    routing::get,
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::config::ServiceConfig;
use crate::enrichment::EnrichmentClient;
use crate::http::handlers::{create_task, health, list_tasks, method_not_allowed, not_found};
use crate::http::middleware::trace_requests;
use crate::store::TaskStore;

/// Headroom between the handler deadline and the outer timeout layer, so
/// a late worker call is answered by the handler with 502 rather than
/// cut off by the layer.
const TIMEOUT_LAYER_GRACE: Duration = Duration::from_secs(1);

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<TaskStore>,
    pub enrichment: EnrichmentClient,
    pub request_timeout: Duration,
}

/// HTTP server for the task API.
pub struct HttpServer {
    router: Router,
    config: ServiceConfig,
}

impl HttpServer {
    /// Create a new HTTP server with a fresh, empty task store.
    pub fn new(config: ServiceConfig) -> Self {
        let state = AppState {
            store: Arc::new(TaskStore::new()),
            enrichment: EnrichmentClient::new(&config.worker),
            request_timeout: Duration::from_secs(config.timeouts.request_secs),
        };

        let router = Self::build_router(&config, state);
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    #[allow(deprecated)]
    fn build_router(config: &ServiceConfig, state: AppState) -> Router {
        Router::new()
            .route(
                "/tasks",
                get(list_tasks)
                    .head(method_not_allowed)
                    .post(create_task)
                    .fallback(method_not_allowed),
            )
            .route("/health", get(health))
            .fallback(not_found)
            .layer(middleware::from_fn_with_state(state.clone(), trace_requests))
            .with_state(state)
            .layer(DefaultBodyLimit::max(config.security.max_body_size))
            .layer(TimeoutLayer::new(
                Duration::from_secs(config.timeouts.request_secs) + TIMEOUT_LAYER_GRACE,
            ))
            .layer(TraceLayer::new_for_http())
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
    }

    /// Run the server, accepting connections on the given listener until
    /// `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            worker = %self.config.worker.enrich_url(),
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("HTTP server draining connections");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}
