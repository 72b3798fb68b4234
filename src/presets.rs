//! Preset catalog discovery.
//!
//! A preset is a ready-made model definition shipped under a storage prefix.
//! Two layouts are recognized:
//!
//! - a subfolder containing the canonical marker file [`PRESET_MARKER`]
//!   (`model.yaml`), whose folder name becomes the preset name;
//! - a single `.yaml`/`.yml` file directly under the prefix (the shortcut
//!   layout), named after its file stem.
//!
//! [`copy_tree`] clones a preset's files into a session namespace so the
//! regular resolution pipeline can run against the session as usual.

use std::collections::VecDeque;

use crate::core::Result;
use crate::storage::StorageBackend;
use crate::utils::paths;

/// Canonical marker file identifying a preset folder.
pub const PRESET_MARKER: &str = "model.yaml";

/// One selectable preset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Preset {
    /// Display name (folder name or file stem).
    pub name: String,
    /// Root-relative path of the preset's entry document.
    pub entry_path: String,
}

/// Enumerate the presets available under `prefix`.
///
/// # Errors
///
/// Propagates storage failures; an empty or missing prefix yields an empty
/// catalog rather than an error.
pub async fn list_presets(storage: &dyn StorageBackend, prefix: &str) -> Result<Vec<Preset>> {
    let mut presets = Vec::new();
    for entry in storage.list_under(prefix).await? {
        if entry.is_dir {
            let marker = paths::join(&paths::join(prefix, &entry.name), PRESET_MARKER);
            if storage.exists(&marker).await? {
                presets.push(Preset {
                    name: entry.name,
                    entry_path: marker,
                });
            }
        } else if paths::has_yaml_extension(&entry.name) {
            presets.push(Preset {
                name: paths::file_stem(&entry.name).to_string(),
                entry_path: paths::join(prefix, &entry.name),
            });
        }
    }
    presets.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(presets)
}

/// Recursively copy every file under `src_prefix` to `dst_prefix`.
///
/// Returns the number of files copied. Works across backend types, which is
/// how a preset stored in a shared bucket lands in a local session directory.
pub async fn copy_tree(
    src: &dyn StorageBackend,
    src_prefix: &str,
    dst: &dyn StorageBackend,
    dst_prefix: &str,
) -> Result<usize> {
    let mut copied = 0;
    let mut queue = VecDeque::from([(src_prefix.to_string(), dst_prefix.to_string())]);
    while let Some((from, to)) = queue.pop_front() {
        for entry in src.list_under(&from).await? {
            let src_path = paths::join(&from, &entry.name);
            let dst_path = paths::join(&to, &entry.name);
            if entry.is_dir {
                queue.push_back((src_path, dst_path));
            } else {
                let bytes = src.read(&src_path).await?;
                dst.write(&dst_path, &bytes).await?;
                copied += 1;
            }
        }
    }
    Ok(copied)
}
