//! Directory scanning for site configuration files.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

/// A configuration file found in the available directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScannedFile {
    /// File name, unique within the scanned directory.
    pub name: String,
    /// Full path to the file.
    pub path: PathBuf,
    /// True iff a same-named entry exists in the enabled directory.
    pub active: bool,
}

/// List regular files in `available` and mark those mirrored in `enabled`.
///
/// Symlinks are followed. Entries that are not regular files, and names that
/// are not valid UTF-8, are skipped. Fails when `available` itself cannot be
/// read; a missing `enabled` directory simply makes every site inactive.
pub fn scan_sites(available: &Path, enabled: &Path) -> io::Result<Vec<ScannedFile>> {
    let mut files = Vec::new();

    for entry in fs::read_dir(available)? {
        let entry = entry?;
        let path = entry.path();

        if !fs::metadata(&path).map(|m| m.is_file()).unwrap_or(false) {
            continue;
        }

        let Some(name) = entry.file_name().to_str().map(str::to_string) else {
            tracing::debug!(path = %path.display(), "Skipping non UTF-8 file name");
            continue;
        };

        let active = is_enabled(enabled, &name);
        files.push(ScannedFile { name, path, active });
    }

    Ok(files)
}

/// Existence check evaluated at call time; nothing is cached.
pub fn is_enabled(enabled: &Path, name: &str) -> bool {
    enabled.join(name).exists()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lists_regular_files_only() {
        let available = tempfile::tempdir().unwrap();
        let enabled = tempfile::tempdir().unwrap();
        fs::write(available.path().join("default"), "server {}").unwrap();
        fs::write(available.path().join("blog"), "server {}").unwrap();
        fs::create_dir(available.path().join("snippets")).unwrap();
        fs::write(enabled.path().join("blog"), "").unwrap();

        let mut files = scan_sites(available.path(), enabled.path()).unwrap();
        files.sort_by(|a, b| a.name.cmp(&b.name));

        assert_eq!(files.len(), 2);
        assert_eq!(files[0].name, "blog");
        assert!(files[0].active);
        assert_eq!(files[1].name, "default");
        assert!(!files[1].active);
    }

    #[test]
    fn test_missing_available_directory_fails() {
        let root = tempfile::tempdir().unwrap();
        let err = scan_sites(&root.path().join("missing"), root.path()).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
    }

    #[test]
    fn test_missing_enabled_directory_means_inactive() {
        let available = tempfile::tempdir().unwrap();
        fs::write(available.path().join("default"), "").unwrap();

        let files = scan_sites(available.path(), Path::new("/nonexistent/sites-enabled")).unwrap();
        assert_eq!(files.len(), 1);
        assert!(!files[0].active);
    }

    #[test]
    fn test_active_tracks_enabled_directory_between_calls() {
        let available = tempfile::tempdir().unwrap();
        let enabled = tempfile::tempdir().unwrap();
        fs::write(available.path().join("shop"), "").unwrap();

        assert!(!scan_sites(available.path(), enabled.path()).unwrap()[0].active);

        fs::write(enabled.path().join("shop"), "").unwrap();
        assert!(scan_sites(available.path(), enabled.path()).unwrap()[0].active);

        fs::remove_file(enabled.path().join("shop")).unwrap();
        assert!(!scan_sites(available.path(), enabled.path()).unwrap()[0].active);
    }

    #[cfg(unix)]
    #[test]
    fn test_symlinks_follow_their_target() {
        let available = tempfile::tempdir().unwrap();
        let enabled = tempfile::tempdir().unwrap();
        let target = available.path().join("real");
        fs::write(&target, "").unwrap();
        std::os::unix::fs::symlink(&target, available.path().join("linked")).unwrap();
        std::os::unix::fs::symlink(available.path(), available.path().join("dir-link")).unwrap();
        std::os::unix::fs::symlink(&target, enabled.path().join("real")).unwrap();

        let mut files = scan_sites(available.path(), enabled.path()).unwrap();
        files.sort_by(|a, b| a.name.cmp(&b.name));

        let names: Vec<_> = files.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["linked", "real"]);
        assert!(files[1].active);
    }
}
