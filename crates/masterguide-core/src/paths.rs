//! Centralized path utilities
//!
//! All persisted files live under one data directory.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// Visit counter file within a data directory.
pub fn visit_counter_path(data_dir: &Path) -> PathBuf {
    data_dir.join("visits.json")
}

/// Visit log file within a data directory.
pub fn visit_log_path(data_dir: &Path) -> PathBuf {
    data_dir.join("users.json")
}

/// Content catalog file within a data directory.
pub fn catalog_path(data_dir: &Path) -> PathBuf {
    data_dir.join("content.json")
}

/// Uploads directory within a data directory. Created on startup; unused
/// by any route in this build.
pub fn uploads_dir(data_dir: &Path) -> PathBuf {
    data_dir.join("uploads")
}

/// Ensure the data directory and the uploads directory exist.
///
/// The uploads directory keeps the site's historical 0755 mode on Unix.
pub fn ensure_layout(data_dir: &Path) -> Result<()> {
    std::fs::create_dir_all(data_dir)
        .with_context(|| format!("failed to create {}", data_dir.display()))?;

    let uploads = uploads_dir(data_dir);
    std::fs::create_dir_all(&uploads)
        .with_context(|| format!("failed to create {}", uploads.display()))?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        if let Ok(metadata) = std::fs::metadata(&uploads) {
            let mut permissions = metadata.permissions();
            permissions.set_mode(0o755);
            let _ = std::fs::set_permissions(&uploads, permissions);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ensure_layout_creates_data_and_uploads_dirs() {
        let dir = tempfile::tempdir().expect("tempdir");
        let data_dir = dir.path().join("data");
        ensure_layout(&data_dir).expect("layout");

        assert!(data_dir.is_dir());
        assert!(uploads_dir(&data_dir).is_dir());
    }

    #[test]
    fn ensure_layout_is_idempotent() {
        let dir = tempfile::tempdir().expect("tempdir");
        let data_dir = dir.path().join("data");
        ensure_layout(&data_dir).expect("first");
        ensure_layout(&data_dir).expect("second");
    }

    #[cfg(unix)]
    #[test]
    fn uploads_dir_is_world_readable() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().expect("tempdir");
        let data_dir = dir.path().join("data");
        ensure_layout(&data_dir).expect("layout");

        let mode = std::fs::metadata(uploads_dir(&data_dir))
            .expect("metadata")
            .permissions()
            .mode();
        assert_eq!(mode & 0o777, 0o755);
    }
}
