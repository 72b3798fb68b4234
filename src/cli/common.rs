//! Shared helpers for CLI commands.

use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

use crate::storage::LocalStorage;

/// Open a resolution root around a local document.
///
/// When `root` is given, `file` must live under it; otherwise the file's own
/// directory becomes the root. Returns the storage backend plus the file's
/// root-relative path in forward-slash form.
pub fn open_target(file: &Path, root: Option<&Path>) -> Result<(LocalStorage, String)> {
    let file = file
        .canonicalize()
        .with_context(|| format!("cannot open '{}'", file.display()))?;
    let root = match root {
        Some(root) => root
            .canonicalize()
            .with_context(|| format!("cannot open root '{}'", root.display()))?,
        None => file
            .parent()
            .map_or_else(|| PathBuf::from("/"), Path::to_path_buf),
    };
    let relative = file.strip_prefix(&root).with_context(|| {
        format!(
            "'{}' is not under the resolution root '{}'",
            file.display(),
            root.display()
        )
    })?;
    let relative = relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/");
    Ok((LocalStorage::new(root)?, relative))
}
