//! Log directory access.
//!
//! # Responsibilities
//! - List log files in the configured directory
//! - Resolve a requested name strictly inside that directory
//! - Return the tail of a log file
//!
//! # Design Decisions
//! - Names must be a single plain path component
//! - Symlinks are resolved before the containment check
//! - Content is never cached; every request reads the file again

pub mod tail;

use std::fs::{self, File};
use std::io;
use std::path::{Component, Path, PathBuf};
use thiserror::Error;

pub use tail::tail_lines;

/// Error type for log access.
#[derive(Debug, Error)]
pub enum LogError {
    #[error("Log file not found")]
    NotFound,

    #[error("Log directory not found")]
    DirectoryNotFound,

    #[error("Invalid log file name")]
    InvalidName,

    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// List regular files in the log directory, sorted by name.
pub fn list_logs(dir: &Path) -> Result<Vec<String>, LogError> {
    let entries = fs::read_dir(dir).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => LogError::DirectoryNotFound,
        _ => LogError::Io(e),
    })?;

    let mut names = Vec::new();
    for entry in entries {
        let entry = entry?;
        if !fs::metadata(entry.path()).map(|m| m.is_file()).unwrap_or(false) {
            continue;
        }
        if let Some(name) = entry.file_name().to_str() {
            names.push(name.to_string());
        }
    }

    names.sort();
    Ok(names)
}

/// Resolve `name` to a file inside `dir`.
///
/// Rejects anything that is not a single normal path component, and any
/// name whose resolved target escapes `dir`.
pub fn resolve_log_path(dir: &Path, name: &str) -> Result<PathBuf, LogError> {
    let mut components = Path::new(name).components();
    match (components.next(), components.next()) {
        (Some(Component::Normal(_)), None) => {}
        _ => return Err(LogError::InvalidName),
    }
    if name.contains('\\') {
        return Err(LogError::InvalidName);
    }

    let root = dir.canonicalize().map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => LogError::NotFound,
        _ => LogError::Io(e),
    })?;

    let resolved = root.join(name).canonicalize().map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => LogError::NotFound,
        _ => LogError::Io(e),
    })?;

    if !resolved.starts_with(&root) {
        tracing::warn!(name = %name, "Rejected log path outside the log directory");
        return Err(LogError::InvalidName);
    }

    if !resolved.is_file() {
        return Err(LogError::NotFound);
    }

    Ok(resolved)
}

/// Read the last `lines` lines of the named log file.
pub fn read_log_tail(dir: &Path, name: &str, lines: usize) -> Result<String, LogError> {
    let path = resolve_log_path(dir, name)?;
    let mut file = File::open(&path).map_err(|e| match e.kind() {
        io::ErrorKind::NotFound => LogError::NotFound,
        _ => LogError::Io(e),
    })?;

    let bytes = tail_lines(&mut file, lines)?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
