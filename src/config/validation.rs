//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate addresses and URLs
//! - Validate value ranges (timeouts > 0, batch sizes fit the queue)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ServiceConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use axum::http::Uri;
use thiserror::Error;

use crate::config::schema::ServiceConfig;

/// A single semantic problem found in the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {message}")]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Check a parsed configuration for semantic errors.
pub fn validate_config(config: &ServiceConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::new(
            "listener.bind_address",
            format!("'{}' is not a socket address", config.listener.bind_address),
        ));
    }

    check_http_url(&mut errors, "worker.base_url", &config.worker.base_url);
    if config.worker.timeout_ms == 0 {
        errors.push(ValidationError::new("worker.timeout_ms", "must be greater than zero"));
    }

    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::new("timeouts.request_secs", "must be greater than zero"));
    }

    let tracing = &config.tracing;
    if tracing.enabled {
        check_http_url(&mut errors, "tracing.collector_endpoint", &tracing.collector_endpoint);
        if tracing.service_name.is_empty() {
            errors.push(ValidationError::new("tracing.service_name", "must not be empty"));
        }
        if tracing.queue_capacity == 0 {
            errors.push(ValidationError::new("tracing.queue_capacity", "must be greater than zero"));
        }
        if tracing.max_batch_size == 0 {
            errors.push(ValidationError::new("tracing.max_batch_size", "must be greater than zero"));
        } else if tracing.max_batch_size > tracing.queue_capacity {
            errors.push(ValidationError::new(
                "tracing.max_batch_size",
                "must not exceed tracing.queue_capacity",
            ));
        }
        if tracing.flush_interval_ms == 0 {
            errors.push(ValidationError::new("tracing.flush_interval_ms", "must be greater than zero"));
        }
        if tracing.export_timeout_ms == 0 {
            errors.push(ValidationError::new("tracing.export_timeout_ms", "must be greater than zero"));
        }
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::new(
            "observability.metrics_address",
            format!("'{}' is not a socket address", config.observability.metrics_address),
        ));
    }

    if config.security.max_body_size == 0 {
        errors.push(ValidationError::new("security.max_body_size", "must be greater than zero"));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_http_url(errors: &mut Vec<ValidationError>, field: &'static str, value: &str) {
    match value.parse::<Uri>() {
        Ok(uri) if uri.scheme_str() == Some("http") && uri.host().is_some() => {}
        Ok(_) => errors.push(ValidationError::new(field, format!("'{}' must be an absolute http:// URL", value))),
        Err(e) => errors.push(ValidationError::new(field, format!("'{}' is not a URL: {}", value, e))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert_eq!(validate_config(&ServiceConfig::default()), Ok(()));
    }

    #[test]
    fn test_reports_every_error() {
        let mut config = ServiceConfig::default();
        config.listener.bind_address = "not-an-address".into();
        config.worker.base_url = "ftp://worker".into();
        config.worker.timeout_ms = 0;

        let errors = validate_config(&config).unwrap_err();
        let fields: Vec<_> = errors.iter().map(|e| e.field).collect();
        assert_eq!(fields, vec!["listener.bind_address", "worker.base_url", "worker.timeout_ms"]);
    }

    #[test]
    fn test_batch_larger_than_queue_rejected() {
        let mut config = ServiceConfig::default();
        config.tracing.queue_capacity = 10;
        config.tracing.max_batch_size = 20;

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "tracing.max_batch_size");
    }

    #[test]
    fn test_tracing_settings_ignored_when_disabled() {
        let mut config = ServiceConfig::default();
        config.tracing.enabled = false;
        config.tracing.collector_endpoint = String::new();

        assert!(validate_config(&config).is_ok());
    }
}
