//! Logical path handling for storage-rooted references.
//!
//! Every path handed to a [`StorageBackend`](crate::storage::StorageBackend)
//! is a forward-slash, root-relative string ("nested/sub.yaml"). Keeping the
//! representation textual lets one normalization routine serve both the local
//! filesystem backend and the remote blob backend, and makes the containment
//! check a pure lexical operation: a path that still needs to climb above the
//! root after folding `.` and `..` segments is rejected.

/// Lexically normalizes a root-relative path.
///
/// Folds `.` segments, collapses repeated separators, and resolves `..`
/// against preceding segments. Returns `None` when the path escapes the
/// root - this is the containment check used throughout the crate.
///
/// # Examples
///
/// ```
/// use netviz::utils::paths::normalize;
///
/// assert_eq!(normalize("a/./b/../c.yaml"), Some("a/c.yaml".to_string()));
/// assert_eq!(normalize("../outside.yaml"), None);
/// assert_eq!(normalize("a/../../outside.yaml"), None);
/// ```
#[must_use]
pub fn normalize(path: &str) -> Option<String> {
    let mut segments: Vec<&str> = Vec::new();
    for segment in path.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                // Popping an empty stack means the path climbs above the root.
                segments.pop()?;
            }
            other => segments.push(other),
        }
    }
    Some(segments.join("/"))
}

/// Joins a directory and a relative reference without normalizing.
///
/// An empty `base` denotes the storage root, so the reference passes through
/// unchanged.
#[must_use]
pub fn join(base: &str, reference: &str) -> String {
    if base.is_empty() {
        reference.to_string()
    } else {
        format!("{base}/{reference}")
    }
}

/// Returns the directory portion of a root-relative path.
///
/// The root itself is represented by the empty string.
#[must_use]
pub fn parent(path: &str) -> &str {
    match path.rfind('/') {
        Some(idx) => &path[..idx],
        None => "",
    }
}

/// Returns the final segment of a root-relative path.
#[must_use]
pub fn file_name(path: &str) -> &str {
    match path.rfind('/') {
        Some(idx) => &path[idx + 1..],
        None => path,
    }
}

/// Returns the file stem of the final segment (name without extension).
#[must_use]
pub fn file_stem(path: &str) -> &str {
    let name = file_name(path);
    match name.rfind('.') {
        Some(0) | None => name,
        Some(idx) => &name[..idx],
    }
}

/// True when the final segment carries a YAML extension.
#[must_use]
pub fn has_yaml_extension(path: &str) -> bool {
    let name = file_name(path);
    name.ends_with(".yaml") || name.ends_with(".yml")
}
