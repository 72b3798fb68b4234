//! On-demand resolution of one lazy subgraph.
//!
//! When a client drills into a `ComposableModel` node, the boundary layer
//! presents the session id minted at upload time plus the canonical relative
//! path recorded on the node's `config` field. This re-enters the same
//! pipeline as top-level resolution - read, parse, interpolate, resolve -
//! except the entry point is a single named file inside an existing session.
//!
//! The two context-level failures stay distinguishable so the boundary layer
//! can map them precisely: an unknown session id yields
//! [`NetvizError::SessionNotFound`], an absent target file yields
//! [`NetvizError::TargetNotFound`].

use crate::core::{NetvizError, Result};
use crate::document::ConfigDocument;
use crate::resolver::ReferenceResolver;
use crate::session::SessionManager;
use crate::utils::paths;

/// Fetch and fully resolve the subgraph rooted at `relative_path`.
///
/// The file's own nested references resolve relative to its directory, so a
/// subgraph behaves exactly as it would have if it had been the top-level
/// upload.
///
/// # Errors
///
/// - [`NetvizError::SessionNotFound`] - the session was never created or has
///   been destroyed
/// - [`NetvizError::TargetNotFound`] - the file is absent under the session
///   root (paths escaping the root are treated the same way)
/// - [`NetvizError::DocumentParse`] / [`NetvizError::Interpolation`] - the
///   target file itself is unusable
pub async fn fetch_subgraph(
    sessions: &SessionManager,
    session_id: &str,
    relative_path: &str,
) -> Result<ConfigDocument> {
    let storage = sessions.backend(session_id)?;

    let trimmed = relative_path.strip_prefix('/').unwrap_or(relative_path);
    let Some(path) = paths::normalize(trimmed) else {
        return Err(NetvizError::TargetNotFound {
            path: relative_path.to_string(),
        });
    };
    if path.is_empty() || !storage.exists(&path).await? {
        return Err(NetvizError::TargetNotFound { path });
    }

    let bytes = storage.read(&path).await?;
    let text = String::from_utf8(bytes).map_err(|err| NetvizError::DocumentParse {
        reason: format!("'{path}' is not valid UTF-8: {err}"),
    })?;
    let mut doc = ConfigDocument::parse(&text)?;

    ReferenceResolver::new(storage.as_ref())
        .resolve_document(&mut doc, paths::parent(&path))
        .await;
    Ok(doc)
}
