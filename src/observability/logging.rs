//! Structured logging.
//!
//! # Responsibilities
//! - Initialize logging subsystem
//! - Configure log level from config, overridable through `RUST_LOG`
//! - Attach the OpenTelemetry layer so service spans reach the exporter
//!
//! # Design Decisions
//! - Uses tracing crate for structured logging
//! - The log filter and the span filter are separate: lowering the log
//!   level never stops service spans from being exported

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

use crate::observability::TelemetryProvider;

/// Install the global subscriber. `RUST_LOG` wins over `level`.
pub fn init_logging(level: &str, telemetry: &TelemetryProvider) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_filter(level).into());

    let _ = tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_filter(filter))
        .with(telemetry.layer().with_filter(EnvFilter::new(SPAN_FILTER)))
        .try_init();
}

/// Only this crate's spans are exported.
const SPAN_FILTER: &str = "task_api=info";

fn default_filter(level: &str) -> String {
    format!("task_api={level},tower_http={level}")
}
