//! Startup checks.
//!
//! Missing directories are not fatal: the API reports them per request, so
//! the service can start before nginx is installed or logs are rotated in.

use std::path::Path;

use crate::config::PathsConfig;

/// Log a warning for every configured directory that is missing.
/// Returns the names of the missing settings.
pub fn check_directories(paths: &PathsConfig) -> Vec<&'static str> {
    let checks: [(&'static str, &Path); 3] = [
        ("sites_available", &paths.sites_available),
        ("sites_enabled", &paths.sites_enabled),
        ("log_dir", &paths.log_dir),
    ];

    let mut missing = Vec::new();
    for (name, path) in checks {
        if path.is_dir() {
            tracing::debug!(setting = name, path = %path.display(), "Directory present");
        } else {
            tracing::warn!(setting = name, path = %path.display(), "Configured directory does not exist");
            missing.push(name);
        }
    }
    missing
}
