//! Storage abstraction behind the reference resolver.
//!
//! One capability set serves every environment the resolver runs in: a local
//! directory (an extracted upload or a session's private directory), a remote
//! blob namespace rooted at `<namespace>/<sessionId>/`, and an in-memory map
//! for tests. The resolver, subgraph service, and preset catalog are all
//! written against [`StorageBackend`] trait objects, so the recursive
//! resolution algorithm exists exactly once.
//!
//! All paths are forward-slash strings relative to the backend's root. Every
//! implementation re-checks containment on entry: a path that lexically
//! escapes the root is rejected with [`NetvizError::PathEscapesRoot`] before
//! it can touch the underlying filesystem or bucket.

mod local;
mod memory;
mod remote;

pub use local::LocalStorage;
pub use memory::MemoryStorage;
pub use remote::{RemoteBlobStorage, RemoteStoreOptions};

use async_trait::async_trait;

use crate::core::Result;

/// One immediate child of a storage prefix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageEntry {
    /// Name of the entry (no path separators).
    pub name: String,
    /// Whether the entry is a directory / common prefix.
    pub is_dir: bool,
}

/// Capability set shared by all storage implementations.
///
/// Methods take root-relative paths. `list_under` returns the *immediate*
/// children of a prefix; callers needing a deep listing recurse themselves
/// (see [`presets::copy_tree`](crate::presets::copy_tree)).
#[async_trait]
pub trait StorageBackend: std::fmt::Debug + Send + Sync {
    /// Human-readable concrete location for a root-relative path, used for
    /// the `_resolved_config_path` diagnostic.
    fn describe(&self, path: &str) -> String;

    /// Whether a file exists at `path`.
    async fn exists(&self, path: &str) -> Result<bool>;

    /// Read the file at `path` into a transient buffer.
    async fn read(&self, path: &str) -> Result<Vec<u8>>;

    /// Write `bytes` to `path`, creating intermediate directories as needed.
    async fn write(&self, path: &str, bytes: &[u8]) -> Result<()>;

    /// List the immediate children of `prefix`.
    async fn list_under(&self, prefix: &str) -> Result<Vec<StorageEntry>>;

    /// Remove everything under `prefix`. Removing an absent prefix is a no-op.
    async fn delete_prefix(&self, prefix: &str) -> Result<()>;
}
