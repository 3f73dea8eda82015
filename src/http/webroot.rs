//! Files served from a base directory.

use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct Webroot {
    root: PathBuf,
}

impl Webroot {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Maps a normalized request path onto the filesystem.
    ///
    /// Returns `None` when the path cannot name a regular file under the
    /// root: a trailing `/`, or a `.` or `..` segment.
    pub fn resolve(&self, request_path: &str) -> Option<PathBuf> {
        if request_path.ends_with('/') {
            return None;
        }

        let mut resolved = self.root.clone();
        for segment in request_path.split('/').filter(|s| !s.is_empty()) {
            if segment == "." || segment == ".." {
                return None;
            }
            resolved.push(segment);
        }

        Some(resolved)
    }

    /// True only for an existing regular file (following symlinks).
    pub async fn is_file(path: &Path) -> bool {
        tokio::fs::metadata(path)
            .await
            .map(|meta| meta.is_file())
            .unwrap_or(false)
    }

    pub async fn read(path: &Path) -> std::io::Result<Vec<u8>> {
        tokio::fs::read(path).await
    }
}
