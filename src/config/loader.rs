//! Configuration loading from disk and the environment.

use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::config::schema::DashboardConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Environment variable overriding `paths.sites_available`.
pub const ENV_SITES_AVAILABLE: &str = "NGINX_SITES_AVAILABLE";
/// Environment variable overriding `paths.sites_enabled`.
pub const ENV_SITES_ENABLED: &str = "NGINX_SITES_ENABLED";
/// Environment variable overriding `paths.log_dir`.
pub const ENV_LOG_DIR: &str = "NGINX_LOG_DIR";
/// Environment variable overriding `listener.bind_address`.
pub const ENV_BIND_ADDRESS: &str = "DASHBOARD_BIND_ADDRESS";

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load configuration from an optional TOML file, apply environment
/// overrides, then validate.
///
/// Without a file every field keeps its default.
pub fn load_config(path: Option<&Path>) -> Result<DashboardConfig, ConfigError> {
    let mut config = match path {
        Some(path) => parse_file(path)?,
        None => DashboardConfig::default(),
    };

    apply_overrides(&mut config, |key| std::env::var(key).ok());
    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

fn parse_file(path: &Path) -> Result<DashboardConfig, ConfigError> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(toml::from_str(&content)?)
}

/// Apply overrides found through `lookup`. Empty values are ignored.
pub fn apply_overrides<F>(config: &mut DashboardConfig, lookup: F)
where
    F: Fn(&str) -> Option<String>,
{
    let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

    if let Some(v) = get(ENV_SITES_AVAILABLE) {
        config.paths.sites_available = PathBuf::from(v);
    }
    if let Some(v) = get(ENV_SITES_ENABLED) {
        config.paths.sites_enabled = PathBuf::from(v);
    }
    if let Some(v) = get(ENV_LOG_DIR) {
        config.paths.log_dir = PathBuf::from(v);
    }
    if let Some(v) = get(ENV_BIND_ADDRESS) {
        config.listener.bind_address = v;
    }
}
