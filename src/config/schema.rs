//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the service.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Root configuration for the task API.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct ServiceConfig {
    /// Listener configuration (bind address).
    pub listener: ListenerConfig,

    /// Enrichment worker settings.
    pub worker: WorkerConfig,

    /// Inbound timeout configuration.
    pub timeouts: TimeoutConfig,

    /// Span export settings.
    pub tracing: TracingConfig,

    /// Logging and metrics settings.
    pub observability: ObservabilityConfig,

    #[serde(default)]
    pub security: SecurityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ListenerConfig {
    /// Bind address (e.g., "0.0.0.0:8081").
    pub bind_address: String,
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            bind_address: "0.0.0.0:8081".to_string(),
        }
    }
}

/// Enrichment worker configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct WorkerConfig {
    /// Base URL of the enrichment service; `/enrich` is appended.
    pub base_url: String,

    /// Client-side timeout for one enrichment call in milliseconds.
    pub timeout_ms: u64,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:8090".to_string(),
            timeout_ms: 3000,
        }
    }
}

impl WorkerConfig {
    /// Full URL of the enrich endpoint.
    pub fn enrich_url(&self) -> String {
        format!("{}/enrich", self.base_url.trim_end_matches('/'))
    }
}

/// Timeout configuration for inbound requests.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Request timeout (total time for request/response) in seconds.
    pub request_secs: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self { request_secs: 30 }
    }
}

/// Distributed tracing configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct TracingConfig {
    /// Export finished spans to the collector.
    pub enabled: bool,

    /// OTLP/HTTP JSON endpoint spans are posted to.
    pub collector_endpoint: String,

    /// Reported as the `service.name` resource attribute.
    pub service_name: String,

    /// Reported as the `service.version` resource attribute.
    pub service_version: String,

    /// Refuse to start when the collector cannot be reached.
    /// When false the service runs with span export disabled instead.
    pub strict: bool,

    /// Capacity of the queue between request handlers and the exporter.
    pub queue_capacity: usize,

    /// Spans per export request.
    pub max_batch_size: usize,

    /// Maximum time a finished span waits before being exported.
    pub flush_interval_ms: u64,

    /// Timeout for the collector handshake and each export request.
    pub export_timeout_ms: u64,
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            collector_endpoint: "http://127.0.0.1:4318/v1/traces".to_string(),
            service_name: "task-api".to_string(),
            service_version: env!("CARGO_PKG_VERSION").to_string(),
            strict: false,
            queue_capacity: 2048,
            max_batch_size: 512,
            flush_interval_ms: 5000,
            export_timeout_ms: 10_000,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,

    /// Enable metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            metrics_enabled: true,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

/// Security hardening configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SecurityConfig {
    /// Maximum request body size in bytes.
    pub max_body_size: usize,
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            max_body_size: 64 * 1024,
        }
    }
}
