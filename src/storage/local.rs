//! Directory-rooted storage backend.
//!
//! Serves resolution runs over a freshly extracted upload or a session's
//! private directory. Containment is enforced twice: lexically on the
//! root-relative path, and (for paths that exist) against the canonicalized
//! root, so a symlink planted inside an upload cannot lead reads outside it.

use async_trait::async_trait;
use std::path::{Path, PathBuf};

use super::{StorageBackend, StorageEntry};
use crate::core::{NetvizError, Result};
use crate::utils::paths;

/// Storage backend rooted at a local directory.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    root: PathBuf,
}

impl LocalStorage {
    /// Create a backend rooted at `root`, creating the directory if missing.
    ///
    /// The root is canonicalized up front so later containment checks compare
    /// like with like.
    pub fn new(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        std::fs::create_dir_all(&root)?;
        Ok(Self {
            root: root.canonicalize()?,
        })
    }

    /// The canonical root directory.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Map a root-relative path onto the filesystem, enforcing containment.
    fn resolve(&self, path: &str) -> Result<PathBuf> {
        let normalized = paths::normalize(path).ok_or_else(|| NetvizError::PathEscapesRoot {
            path: path.to_string(),
        })?;
        let full = self.root.join(normalized);

        // Symlink defense: an existing path must still canonicalize inside
        // the root.
        if full.exists() {
            let canonical = full.canonicalize()?;
            if !canonical.starts_with(&self.root) {
                return Err(NetvizError::PathEscapesRoot {
                    path: path.to_string(),
                });
            }
        }
        Ok(full)
    }
}

#[async_trait]
impl StorageBackend for LocalStorage {
    fn describe(&self, path: &str) -> String {
        self.root.join(path).display().to_string()
    }

    async fn exists(&self, path: &str) -> Result<bool> {
        let full = self.resolve(path)?;
        Ok(tokio::fs::try_exists(&full).await? && full.is_file())
    }

    async fn read(&self, path: &str) -> Result<Vec<u8>> {
        let full = self.resolve(path)?;
        Ok(tokio::fs::read(&full).await?)
    }

    async fn write(&self, path: &str, bytes: &[u8]) -> Result<()> {
        let full = self.resolve(path)?;
        if let Some(parent) = full.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        Ok(tokio::fs::write(&full, bytes).await?)
    }

    async fn list_under(&self, prefix: &str) -> Result<Vec<StorageEntry>> {
        let dir = self.resolve(prefix)?;
        if !dir.is_dir() {
            return Ok(Vec::new());
        }
        let mut entries = Vec::new();
        let mut reader = tokio::fs::read_dir(&dir).await?;
        while let Some(entry) = reader.next_entry().await? {
            let name = entry.file_name().to_string_lossy().into_owned();
            let is_dir = entry.file_type().await?.is_dir();
            entries.push(StorageEntry { name, is_dir });
        }
        entries.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(entries)
    }

    async fn delete_prefix(&self, prefix: &str) -> Result<()> {
        let target = self.resolve(prefix)?;
        if target.is_dir() {
            tokio::fs::remove_dir_all(&target).await?;
        } else if target.is_file() {
            tokio::fs::remove_file(&target).await?;
        }
        Ok(())
    }
}
