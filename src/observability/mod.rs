//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Inbound request
//!     → propagation.rs (extract `traceparent`/`tracestate`, or start a new trace)
//!     → tracing spans (server span per request, client span per enrichment call)
//!     → tracing-opentelemetry layer
//!     → provider.rs (SDK batch span processor, OTLP/HTTP JSON to collector)
//!
//! All subsystems also produce:
//!     → logging.rs (structured log events)
//!     → metrics.rs (counters, gauges, histograms)
//! ```
//!
//! # Design Decisions
//! - Parent spans are handed over explicitly; outbound headers are written
//!   from the client span's own context
//! - Finishing a span never waits on export
//! - provider.rs owns the pipeline lifecycle: init once, shutdown flushes

pub mod logging;
pub mod metrics;
pub mod propagation;
pub mod provider;

pub use provider::{TelemetryProvider, TracingError};
