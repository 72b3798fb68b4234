//! Upload sessions: opaque ids mapped to storage roots.
//!
//! A session is created once per upload - a single file, a zip bundle, or a
//! preset cloned from a shared catalog - and is the only handle by which
//! later subgraph fetches locate that upload's files. Ids are uuid-v4 and
//! globally unique, so concurrent creation and lookup never contend on one
//! entry; the id→root map is a [`DashMap`].
//!
//! Sessions are inert: no background expiry, no quotas. Callers invoke
//! [`SessionManager::destroy`] when the corresponding workflow ends; destroy
//! is idempotent and storage errors during cleanup are logged, never
//! propagated.

use dashmap::DashMap;
use std::io::Read;
use std::path::PathBuf;

use crate::core::{NetvizError, Result};
use crate::presets::{self, Preset};
use crate::storage::{LocalStorage, RemoteBlobStorage, RemoteStoreOptions, StorageBackend};
use crate::utils::paths;

/// Opaque session identifier.
pub type SessionId = String;

/// Where session roots live.
#[derive(Debug, Clone)]
enum SessionLayout {
    /// Each session owns `<base>/<sessionId>/` on the local filesystem.
    Local { base: PathBuf },
    /// Each session owns `<namespace>/<sessionId>/` in a blob store.
    Remote {
        options: RemoteStoreOptions,
        namespace: String,
    },
}

/// Maps opaque session ids to storage roots and drives their lifecycle.
pub struct SessionManager {
    layout: SessionLayout,
    sessions: DashMap<SessionId, ()>,
}

impl SessionManager {
    /// Sessions backed by subdirectories of `base`.
    pub fn new_local(base: impl Into<PathBuf>) -> Result<Self> {
        let base = base.into();
        std::fs::create_dir_all(&base)?;
        Ok(Self {
            layout: SessionLayout::Local { base },
            sessions: DashMap::new(),
        })
    }

    /// Sessions backed by per-id prefixes in a remote blob namespace.
    #[must_use]
    pub fn new_remote(options: RemoteStoreOptions, namespace: impl Into<String>) -> Self {
        Self {
            layout: SessionLayout::Remote {
                options,
                namespace: namespace.into(),
            },
            sessions: DashMap::new(),
        }
    }

    /// Mint a fresh session and prepare its root.
    pub fn create(&self) -> Result<SessionId> {
        let id = uuid::Uuid::new_v4().to_string();
        if let SessionLayout::Local { base } = &self.layout {
            std::fs::create_dir_all(base.join(&id))?;
        }
        self.sessions.insert(id.clone(), ());
        tracing::info!("created session {id}");
        Ok(id)
    }

    /// The storage backend rooted at an existing session.
    ///
    /// # Errors
    ///
    /// Returns [`NetvizError::SessionNotFound`] for ids that were never
    /// created or have been destroyed.
    pub fn backend(&self, session_id: &str) -> Result<Box<dyn StorageBackend>> {
        if !self.sessions.contains_key(session_id) {
            return Err(NetvizError::SessionNotFound {
                session_id: session_id.to_string(),
            });
        }
        match &self.layout {
            SessionLayout::Local { base } => {
                Ok(Box::new(LocalStorage::new(base.join(session_id))?))
            }
            SessionLayout::Remote { options, namespace } => Ok(Box::new(
                RemoteBlobStorage::new(options, namespace, session_id)?,
            )),
        }
    }

    /// Store one uploaded file under the session root.
    pub async fn ingest_file(&self, session_id: &str, name: &str, bytes: &[u8]) -> Result<()> {
        let storage = self.backend(session_id)?;
        let name = name.strip_prefix('/').unwrap_or(name);
        storage.write(name, bytes).await
    }

    /// Extract an uploaded zip bundle into the session root.
    ///
    /// Entry names are containment-checked before extraction; an entry that
    /// would land outside the session root fails the whole ingestion.
    /// Returns the number of files written.
    pub async fn ingest_archive(&self, session_id: &str, archive: &[u8]) -> Result<usize> {
        let storage = self.backend(session_id)?;
        let mut zip = zip::ZipArchive::new(std::io::Cursor::new(archive))?;
        let mut written = 0;
        for index in 0..zip.len() {
            let mut entry = zip.by_index(index)?;
            if entry.is_dir() {
                continue;
            }
            let name = entry.name().replace('\\', "/");
            let Some(target) = paths::normalize(name.strip_prefix('/').unwrap_or(&name)) else {
                return Err(NetvizError::ArchiveEntryEscape { name });
            };
            let mut bytes = Vec::with_capacity(entry.size() as usize);
            entry.read_to_end(&mut bytes)?;
            storage.write(&target, &bytes).await?;
            written += 1;
        }
        tracing::info!("session {session_id}: extracted {written} files from archive");
        Ok(written)
    }

    /// Clone a preset's files into the session root.
    ///
    /// Folder presets are copied recursively; single-file presets copy just
    /// the entry document. Returns the number of files copied.
    pub async fn clone_preset(
        &self,
        session_id: &str,
        source: &dyn StorageBackend,
        preset: &Preset,
    ) -> Result<usize> {
        let storage = self.backend(session_id)?;
        let preset_dir = paths::parent(&preset.entry_path);
        let copied = if paths::file_name(&preset.entry_path) == presets::PRESET_MARKER {
            presets::copy_tree(source, preset_dir, storage.as_ref(), "").await?
        } else {
            let bytes = source.read(&preset.entry_path).await?;
            storage
                .write(paths::file_name(&preset.entry_path), &bytes)
                .await?;
            1
        };
        tracing::info!(
            "session {session_id}: cloned preset '{}' ({copied} files)",
            preset.name
        );
        Ok(copied)
    }

    /// Tear down a session and its storage root.
    ///
    /// Idempotent: destroying an unknown or already-destroyed id is a no-op.
    /// Storage failures during cleanup are logged and swallowed.
    pub async fn destroy(&self, session_id: &str) {
        if self.sessions.remove(session_id).is_none() {
            return;
        }
        let storage: Result<Box<dyn StorageBackend>> = match &self.layout {
            SessionLayout::Local { base } => {
                LocalStorage::new(base.join(session_id)).map(|s| Box::new(s) as _)
            }
            SessionLayout::Remote { options, namespace } => {
                RemoteBlobStorage::new(options, namespace, session_id).map(|s| Box::new(s) as _)
            }
        };
        match storage {
            Ok(storage) => {
                if let Err(err) = storage.delete_prefix("").await {
                    tracing::warn!("failed to clean up session {session_id}: {err}");
                }
            }
            Err(err) => {
                tracing::warn!("failed to open session {session_id} for cleanup: {err}");
            }
        }
        tracing::info!("destroyed session {session_id}");
    }
}
