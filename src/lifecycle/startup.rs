//! Startup orchestration.
//!
//! # Responsibilities
//! - Initialize subsystems in dependency order
//! - Install logging with the span export layer attached
//! - Start background tasks (metrics, span export)
//! - Bind the listener and begin accepting traffic
//! - Tear down in reverse order: stop accepting, drain, flush spans
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - Subsystems initialize in order, not concurrently
//! - Listener starts last (traffic only when ready)

use std::net::SocketAddr;

use thiserror::Error;
use tokio::net::TcpListener;

use crate::config::ServiceConfig;
use crate::http::HttpServer;
use crate::lifecycle::{signals, Shutdown};
use crate::observability::logging::init_logging;
use crate::observability::{metrics, TelemetryProvider, TracingError};

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("tracing initialization failed: {0}")]
    Tracing(#[from] TracingError),
    #[error("failed to bind {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: std::io::Error,
    },
    #[error("server error: {0}")]
    Serve(#[source] std::io::Error),
}

/// Run the service until a shutdown signal arrives.
pub async fn run(config: ServiceConfig) -> Result<(), StartupError> {
    let telemetry = TelemetryProvider::init(&config.tracing).await?;
    init_logging(&config.observability.log_level, &telemetry);
    tracing::info!("task-api v{} starting", env!("CARGO_PKG_VERSION"));
    if let Some(e) = telemetry.degraded() {
        tracing::warn!(error = %e, "Collector unavailable, continuing with span export disabled");
    } else if telemetry.is_exporting() {
        tracing::info!(collector = %config.tracing.collector_endpoint, "Span export enabled");
    }

    tracing::info!(
        bind_address = %config.listener.bind_address,
        worker = %config.worker.base_url,
        worker_timeout_ms = config.worker.timeout_ms,
        collector = %config.tracing.collector_endpoint,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse::<SocketAddr>() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let listener = TcpListener::bind(&config.listener.bind_address)
        .await
        .map_err(|source| StartupError::Bind {
            address: config.listener.bind_address.clone(),
            source,
        })?;

    let shutdown = Shutdown::new();
    let trigger = shutdown.clone();
    tokio::spawn(async move {
        signals::wait_for_signal().await;
        trigger.trigger();
    });

    let server = HttpServer::new(config);
    let served = server.run(listener, shutdown.subscribe()).await;

    telemetry.shutdown().await;
    served.map_err(StartupError::Serve)
}
