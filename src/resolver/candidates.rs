//! Candidate path construction and probing for one reference string.
//!
//! The precedence rule lives in a single ordered list so tests can enumerate
//! it directly:
//!
//! 1. `currentDir/reference` - relative to the file containing the reference
//! 2. `reference` against the resolution root - the fallback for references
//!    authored assuming a flattened layout
//!
//! A root-prefixed reference (leading `/`) resolves only against the root.
//! Candidates are lexically normalized and deduplicated preserving priority
//! order; normalization doubles as the containment check, so a candidate that
//! escapes the root is dropped with a warning before it is ever probed.

use crate::storage::StorageBackend;
use crate::utils::paths;

/// Build the ordered, deduplicated candidate list for a reference string.
///
/// Every returned path is normalized and contained within the root.
#[must_use]
pub fn candidate_paths(reference: &str, current_dir: &str) -> Vec<String> {
    let raw = if let Some(rooted) = reference.strip_prefix('/') {
        vec![rooted.to_string()]
    } else {
        vec![
            paths::join(current_dir, reference),
            reference.to_string(),
        ]
    };

    let mut candidates: Vec<String> = Vec::with_capacity(raw.len());
    for candidate in raw {
        match paths::normalize(&candidate) {
            Some(normalized) if !normalized.is_empty() => {
                if !candidates.contains(&normalized) {
                    candidates.push(normalized);
                }
            }
            _ => {
                tracing::warn!(
                    "candidate '{candidate}' escapes the resolution root, skipping"
                );
            }
        }
    }
    candidates
}

/// Probe the candidates in order; first existing, contained path wins.
///
/// Storage probe failures are soft: they are logged and the next candidate
/// is tried, so a flaky backend degrades to "not found" instead of aborting
/// the walk.
pub async fn resolve_reference(
    storage: &dyn StorageBackend,
    reference: &str,
    current_dir: &str,
) -> Option<String> {
    for candidate in candidate_paths(reference, current_dir) {
        match storage.exists(&candidate).await {
            Ok(true) => {
                tracing::debug!("reference '{reference}' resolved to '{candidate}'");
                return Some(candidate);
            }
            Ok(false) => {}
            Err(err) => {
                tracing::warn!("probe of candidate '{candidate}' failed: {err}");
            }
        }
    }
    None
}
