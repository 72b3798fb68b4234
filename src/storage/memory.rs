//! In-memory storage backend.
//!
//! The substitute backend unit and property tests run the resolver against,
//! so no test needs a real filesystem or a blob store. Keys are normalized
//! root-relative paths; directories exist implicitly as key prefixes.

use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::RwLock;

use super::{StorageBackend, StorageEntry};
use crate::core::{NetvizError, Result};
use crate::utils::paths;

/// Map-backed storage for tests and ephemeral use.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    files: RwLock<BTreeMap<String, Vec<u8>>>,
}

impl MemoryStorage {
    /// Create an empty backend.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a backend pre-populated with `(path, contents)` pairs.
    #[must_use]
    pub fn with_files(files: &[(&str, &str)]) -> Self {
        let storage = Self::new();
        {
            let mut map = storage.files.write().expect("lock poisoned");
            for (path, contents) in files {
                map.insert((*path).to_string(), contents.as_bytes().to_vec());
            }
        }
        storage
    }

    fn check(path: &str) -> Result<String> {
        paths::normalize(path).ok_or_else(|| NetvizError::PathEscapesRoot {
            path: path.to_string(),
        })
    }
}

#[async_trait]
impl StorageBackend for MemoryStorage {
    fn describe(&self, path: &str) -> String {
        format!("mem://{path}")
    }

    async fn exists(&self, path: &str) -> Result<bool> {
        let key = Self::check(path)?;
        Ok(self.files.read().expect("lock poisoned").contains_key(&key))
    }

    async fn read(&self, path: &str) -> Result<Vec<u8>> {
        let key = Self::check(path)?;
        self.files
            .read()
            .expect("lock poisoned")
            .get(&key)
            .cloned()
            .ok_or(NetvizError::TargetNotFound { path: key })
    }

    async fn write(&self, path: &str, bytes: &[u8]) -> Result<()> {
        let key = Self::check(path)?;
        self.files
            .write()
            .expect("lock poisoned")
            .insert(key, bytes.to_vec());
        Ok(())
    }

    async fn list_under(&self, prefix: &str) -> Result<Vec<StorageEntry>> {
        let prefix = Self::check(prefix)?;
        let lead = if prefix.is_empty() {
            String::new()
        } else {
            format!("{prefix}/")
        };
        let mut entries: Vec<StorageEntry> = Vec::new();
        for key in self.files.read().expect("lock poisoned").keys() {
            let Some(rest) = key.strip_prefix(&lead) else {
                continue;
            };
            let entry = match rest.split_once('/') {
                Some((dir, _)) => StorageEntry { name: dir.to_string(), is_dir: true },
                None => StorageEntry { name: rest.to_string(), is_dir: false },
            };
            if !entries.contains(&entry) {
                entries.push(entry);
            }
        }
        Ok(entries)
    }

    async fn delete_prefix(&self, prefix: &str) -> Result<()> {
        let prefix = Self::check(prefix)?;
        let mut map = self.files.write().expect("lock poisoned");
        if prefix.is_empty() {
            map.clear();
        } else {
            let lead = format!("{prefix}/");
            map.retain(|key, _| key != &prefix && !key.starts_with(&lead));
        }
        Ok(())
    }
}
