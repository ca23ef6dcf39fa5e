//! Process-wide tracer provider.
//!
//! Built once at startup and shut down once at exit. Owns the SDK provider
//! and its batch span processor; the rest of the service only sees the
//! `tracing` layer returned by [`TelemetryProvider::layer`].

use std::time::Duration;

use axum::http::Uri;
use opentelemetry::trace::{TraceError, TracerProvider as _};
use opentelemetry::KeyValue;
use opentelemetry_otlp::{Protocol, SpanExporter, WithExportConfig};
use opentelemetry_sdk::trace::{self as sdktrace, BatchConfigBuilder, BatchSpanProcessor};
use opentelemetry_sdk::{runtime, Resource};
use thiserror::Error;
use tokio::net::TcpStream;
use tokio::time;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::registry::LookupSpan;

use crate::config::TracingConfig;

#[derive(Debug, Error)]
pub enum TracingError {
    #[error("invalid collector endpoint '{endpoint}': {reason}")]
    InvalidEndpoint { endpoint: String, reason: String },
    #[error("collector {endpoint} unreachable: {source}")]
    Unreachable {
        endpoint: String,
        #[source]
        source: std::io::Error,
    },
    #[error("collector {endpoint} did not answer within {timeout:?}")]
    HandshakeTimeout { endpoint: String, timeout: Duration },
    #[error("span exporter: {0}")]
    Exporter(#[from] TraceError),
}

/// Owner of the span export pipeline.
pub struct TelemetryProvider {
    provider: sdktrace::TracerProvider,
    scope: String,
    exporting: bool,
    degraded: Option<TracingError>,
}

impl TelemetryProvider {
    /// Initialize tracing from configuration.
    ///
    /// When the collector cannot be reached, `strict` configurations fail
    /// and all others fall back to a provider that exports nothing. The
    /// reason is kept in [`degraded`](Self::degraded) so it can be logged
    /// once logging is up.
    pub async fn init(config: &TracingConfig) -> Result<Self, TracingError> {
        if !config.enabled {
            return Ok(Self::disabled(config));
        }

        let attempt = match handshake(config).await {
            Ok(()) => Self::start(config),
            Err(e) => Err(e),
        };
        match attempt {
            Ok(provider) => Ok(provider),
            Err(e) if config.strict => Err(e),
            Err(e) => {
                let mut provider = Self::disabled(config);
                provider.degraded = Some(e);
                Ok(provider)
            }
        }
    }

    /// A provider without a span processor. Spans still get trace and span
    /// ids, so context keeps propagating, but nothing is exported.
    pub fn disabled(config: &TracingConfig) -> Self {
        Self {
            provider: builder(config).build(),
            scope: config.service_name.clone(),
            exporting: false,
            degraded: None,
        }
    }

    /// Build the exporting pipeline without checking the collector first.
    /// Must run inside a Tokio runtime.
    pub fn start(config: &TracingConfig) -> Result<Self, TracingError> {
        let export_timeout = Duration::from_millis(config.export_timeout_ms);
        let exporter = SpanExporter::builder()
            .with_http()
            .with_protocol(Protocol::HttpJson)
            .with_endpoint(config.collector_endpoint.clone())
            .with_timeout(export_timeout)
            .build()?;

        let batch = BatchConfigBuilder::default()
            .with_max_queue_size(config.queue_capacity.max(1))
            .with_max_export_batch_size(config.max_batch_size.max(1))
            .with_scheduled_delay(Duration::from_millis(config.flush_interval_ms))
            .with_max_export_timeout(export_timeout)
            .build();
        let processor = BatchSpanProcessor::builder(exporter, runtime::Tokio)
            .with_batch_config(batch)
            .build();

        tracing::debug!(
            endpoint = %config.collector_endpoint,
            max_batch_size = config.max_batch_size,
            flush_interval_ms = config.flush_interval_ms,
            "Span exporter starting"
        );

        Ok(Self {
            provider: builder(config).with_span_processor(processor).build(),
            scope: config.service_name.clone(),
            exporting: true,
            degraded: None,
        })
    }

    /// Layer bridging `tracing` spans into this provider.
    pub fn layer<S>(&self) -> OpenTelemetryLayer<S, sdktrace::Tracer>
    where
        S: tracing::Subscriber + for<'span> LookupSpan<'span>,
    {
        tracing_opentelemetry::layer().with_tracer(self.tracer())
    }

    pub fn tracer(&self) -> sdktrace::Tracer {
        self.provider.tracer(self.scope.clone())
    }

    pub fn is_exporting(&self) -> bool {
        self.exporting
    }

    /// Why export was disabled in lenient mode, if it was.
    pub fn degraded(&self) -> Option<&TracingError> {
        self.degraded.as_ref()
    }

    /// Flush queued spans and stop the exporter.
    pub async fn shutdown(self) {
        if !self.exporting {
            return;
        }
        // The SDK blocks the calling thread until the processor task has
        // flushed, and that task needs the runtime.
        let provider = self.provider;
        match tokio::task::spawn_blocking(move || provider.shutdown()).await {
            Ok(Ok(())) => tracing::info!("Span exporter stopped"),
            Ok(Err(e)) => tracing::warn!(error = %e, "Span exporter shutdown failed"),
            Err(e) => tracing::error!(error = %e, "Span exporter task failed"),
        }
    }
}

#[allow(deprecated)]
fn builder(config: &TracingConfig) -> sdktrace::Builder {
    let resource = Resource::new(vec![
        KeyValue::new("service.name", config.service_name.clone()),
        KeyValue::new("service.version", config.service_version.clone()),
    ]);
    sdktrace::TracerProvider::builder().with_config(sdktrace::Config::default().with_resource(resource))
}

/// Confirm the collector accepts TCP connections.
async fn handshake(config: &TracingConfig) -> Result<(), TracingError> {
    let endpoint = config.collector_endpoint.as_str();
    let invalid = |reason: String| TracingError::InvalidEndpoint {
        endpoint: endpoint.to_string(),
        reason,
    };
    let uri: Uri = endpoint.parse().map_err(|e: axum::http::uri::InvalidUri| invalid(e.to_string()))?;
    let host = uri.host().ok_or_else(|| invalid("missing host".into()))?;
    let port = uri.port_u16().unwrap_or(80);
    let host = host.trim_start_matches('[').trim_end_matches(']');
    let timeout = Duration::from_millis(config.export_timeout_ms);

    match time::timeout(timeout, TcpStream::connect((host, port))).await {
        Ok(Ok(_)) => Ok(()),
        Ok(Err(source)) => Err(TracingError::Unreachable {
            endpoint: endpoint.to_string(),
            source,
        }),
        Err(_) => Err(TracingError::HandshakeTimeout {
            endpoint: endpoint.to_string(),
            timeout,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unreachable_config(strict: bool) -> TracingConfig {
        TracingConfig {
            // Port 9 (discard) on loopback is closed in test environments.
            collector_endpoint: "http://127.0.0.1:9/v1/traces".into(),
            strict,
            export_timeout_ms: 500,
            ..TracingConfig::default()
        }
    }

    #[tokio::test]
    async fn test_strict_mode_fails_without_collector() {
        let result = TelemetryProvider::init(&unreachable_config(true)).await;
        assert!(matches!(result, Err(TracingError::Unreachable { .. })));
    }

    #[tokio::test]
    async fn test_lenient_mode_disables_export() {
        let provider = TelemetryProvider::init(&unreachable_config(false)).await.unwrap();
        assert!(!provider.is_exporting());
        assert!(matches!(provider.degraded(), Some(TracingError::Unreachable { .. })));
        provider.shutdown().await;
    }

    #[tokio::test]
    async fn test_disabled_by_config() {
        let config = TracingConfig {
            enabled: false,
            ..TracingConfig::default()
        };
        let provider = TelemetryProvider::init(&config).await.unwrap();
        assert!(!provider.is_exporting());
        assert!(provider.degraded().is_none());
    }

    #[tokio::test]
    async fn test_invalid_endpoint_is_reported() {
        let config = TracingConfig {
            collector_endpoint: "not a url".into(),
            strict: true,
            ..TracingConfig::default()
        };
        let result = TelemetryProvider::init(&config).await;
        assert!(matches!(result, Err(TracingError::InvalidEndpoint { .. })));
    }
}
