//! Configuration validation.
//!
//! Semantic checks only; serde handles the syntax. Every problem is reported,
//! not just the first one.

use std::net::SocketAddr;
use thiserror::Error;

use crate::config::schema::DashboardConfig;

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error"];

/// A single semantic problem found in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{field} is not a valid socket address: {value}")]
    InvalidAddress { field: &'static str, value: String },

    #[error("{0} must not be empty")]
    EmptyPath(&'static str),

    #[error("probe.timeout_secs must be greater than zero")]
    ZeroProbeTimeout,

    #[error("timeouts.request_secs ({request}) must exceed probe.timeout_secs ({probe})")]
    RequestTimeoutTooShort { request: u64, probe: u64 },

    #[error("probe.max_redirects must be greater than zero when redirects are followed")]
    ZeroRedirects,

    #[error("unknown log level: {0}")]
    UnknownLogLevel(String),
}

/// Validate a deserialized configuration.
pub fn validate_config(config: &DashboardConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidAddress {
            field: "listener.bind_address",
            value: config.listener.bind_address.clone(),
        });
    }

    let paths = [
        ("paths.sites_available", &config.paths.sites_available),
        ("paths.sites_enabled", &config.paths.sites_enabled),
        ("paths.log_dir", &config.paths.log_dir),
    ];
    for (field, path) in paths {
        if path.as_os_str().is_empty() {
            errors.push(ValidationError::EmptyPath(field));
        }
    }

    if config.probe.timeout_secs == 0 {
        errors.push(ValidationError::ZeroProbeTimeout);
    } else if config.timeouts.request_secs <= config.probe.timeout_secs {
        errors.push(ValidationError::RequestTimeoutTooShort {
            request: config.timeouts.request_secs,
            probe: config.probe.timeout_secs,
        });
    }

    if config.probe.follow_redirects && config.probe.max_redirects == 0 {
        errors.push(ValidationError::ZeroRedirects);
    }

    let level = config.observability.log_level.to_ascii_lowercase();
    if !LOG_LEVELS.contains(&level.as_str()) {
        errors.push(ValidationError::UnknownLogLevel(config.observability.log_level.clone()));
    }

    if config.observability.metrics_enabled
        && config.observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::InvalidAddress {
            field: "observability.metrics_address",
            value: config.observability.metrics_address.clone(),
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
