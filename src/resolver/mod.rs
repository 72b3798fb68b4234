//! Recursive resolution of cross-file configuration references.
//!
//! [`ReferenceResolver`] walks a document's module map and replaces each
//! string-valued `config` field according to the module's classification:
//!
//! - **Eager** (any ordinary `cls`): the referenced file is read through the
//!   storage backend, parsed, interpolation-resolved, and recursively
//!   expanded with the current directory moved to the referenced file's
//!   directory. The resulting sub-tree replaces the string in place.
//! - **Lazy** (`cls: ComposableModel`): the content is never inlined. A
//!   resolved reference is rewritten to its canonical root-relative path so
//!   later [`fetch_subgraph`](crate::subgraph::fetch_subgraph) calls use a
//!   stable key; an unresolved one keeps the original string.
//!
//! Everything that goes wrong mid-walk - a reference that does not resolve, a
//! candidate escaping the root, unreadable or unparseable referenced files, a
//! reference cycle - is isolated to the affected module and logged as a
//! warning. The walk always completes and the document is always usable, so
//! partially-successful graphs can still be rendered.
//!
//! Eager recursion carries a per-call chain of visited paths plus a depth
//! bound; a self-referential document degrades to a soft per-node failure
//! instead of recursing without bound.

pub mod candidates;

use futures::FutureExt;
use futures::future::BoxFuture;
use serde_yaml::Value;
use std::collections::{HashSet, VecDeque};

use crate::document::{self, ConfigDocument, MODULES_KEY};
use crate::storage::StorageBackend;
use crate::utils::paths;

/// Default bound on eager recursion depth.
pub const DEFAULT_MAX_DEPTH: usize = 32;

/// The recursive reference-graph resolver.
///
/// One resolver walks one document tree to completion per call; there is no
/// shared mutable state between calls, so resolvers are freely constructed
/// per request.
pub struct ReferenceResolver<'a> {
    storage: &'a dyn StorageBackend,
    max_depth: usize,
}

impl<'a> ReferenceResolver<'a> {
    /// Create a resolver over the given storage backend.
    #[must_use]
    pub fn new(storage: &'a dyn StorageBackend) -> Self {
        Self {
            storage,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    /// Override the eager recursion depth bound.
    #[must_use]
    pub const fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Resolve every eligible reference in `doc`, in place.
    ///
    /// `current_dir` is the root-relative directory of the file the document
    /// was read from (empty string for the root itself). This call never
    /// fails: per-module problems are recorded as warnings and the affected
    /// fields keep their original values.
    pub async fn resolve_document(&self, doc: &mut ConfigDocument, current_dir: &str) {
        let mut chain = Vec::new();
        self.resolve_modules(doc.root_mut(), current_dir.to_string(), &mut chain, 0)
            .await;
    }

    fn resolve_modules<'b>(
        &'b self,
        root: &'b mut Value,
        current_dir: String,
        chain: &'b mut Vec<String>,
        depth: usize,
    ) -> BoxFuture<'b, ()> {
        async move {
            let Some(modules) = root.get_mut(MODULES_KEY).and_then(Value::as_mapping_mut)
            else {
                return;
            };

            for (name, module) in modules.iter_mut() {
                let module_name = name.as_str().unwrap_or_default().to_string();
                if document::is_reserved(&module_name) {
                    continue;
                }
                // Inline mappings (and already-resolved sub-trees) are left
                // untouched; only string-valued config fields are references.
                let Some(reference) = document::config_reference(module).map(str::to_string)
                else {
                    continue;
                };

                let Some(found) =
                    candidates::resolve_reference(self.storage, &reference, &current_dir).await
                else {
                    tracing::warn!(
                        "module '{module_name}': reference '{reference}' did not resolve, keeping it as-is"
                    );
                    continue;
                };
                let location = self.storage.describe(&found);

                if document::is_lazy(module) {
                    // Canonical root-relative path; this is the key a later
                    // on-demand subgraph fetch presents.
                    document::set_config(module, Value::String(found.clone()));
                    document::set_resolved_path(module, &location);
                    tracing::debug!(
                        "module '{module_name}': lazy reference recorded as '{found}'"
                    );
                    continue;
                }

                if depth >= self.max_depth {
                    tracing::warn!(
                        "module '{module_name}': recursion depth limit ({}) reached at '{found}', keeping the reference",
                        self.max_depth
                    );
                    continue;
                }
                if chain.contains(&found) {
                    tracing::warn!(
                        "module '{module_name}': reference cycle through '{found}', keeping the reference"
                    );
                    continue;
                }

                let bytes = match self.storage.read(&found).await {
                    Ok(bytes) => bytes,
                    Err(err) => {
                        tracing::warn!(
                            "module '{module_name}': failed to read '{found}': {err}"
                        );
                        continue;
                    }
                };
                let text = match String::from_utf8(bytes) {
                    Ok(text) => text,
                    Err(err) => {
                        tracing::warn!(
                            "module '{module_name}': '{found}' is not valid UTF-8: {err}"
                        );
                        continue;
                    }
                };
                let mut sub = match ConfigDocument::parse(&text) {
                    Ok(sub) => sub,
                    Err(err) => {
                        tracing::warn!(
                            "module '{module_name}': failed to parse '{found}': {err}"
                        );
                        continue;
                    }
                };

                chain.push(found.clone());
                self.resolve_modules(
                    sub.root_mut(),
                    paths::parent(&found).to_string(),
                    chain,
                    depth + 1,
                )
                .await;
                chain.pop();

                document::set_config(module, sub.into_value());
                document::set_resolved_path(module, &location);
            }
        }
        .boxed()
    }

    /// Enumerate every file transitively referenced from `entry_path`.
    ///
    /// Breadth-first walk over string-valued `config` fields (the entry file
    /// itself is not included). Files that cannot be read or parsed are
    /// skipped with a warning, mirroring the soft-failure policy of
    /// [`resolve_document`](Self::resolve_document).
    pub async fn collect_references(&self, entry_path: &str) -> Vec<String> {
        let mut ordered = Vec::new();
        let mut seen = HashSet::new();
        let mut queue = VecDeque::new();

        if let Some(start) = paths::normalize(entry_path) {
            seen.insert(start.clone());
            queue.push_back(start);
        }

        while let Some(file) = queue.pop_front() {
            let text = match self.storage.read(&file).await {
                Ok(bytes) => match String::from_utf8(bytes) {
                    Ok(text) => text,
                    Err(err) => {
                        tracing::warn!("'{file}' is not valid UTF-8: {err}");
                        continue;
                    }
                },
                Err(err) => {
                    tracing::warn!("failed to read '{file}': {err}");
                    continue;
                }
            };
            let doc = match ConfigDocument::parse(&text) {
                Ok(doc) => doc,
                Err(err) => {
                    tracing::warn!("failed to parse '{file}': {err}");
                    continue;
                }
            };

            let dir = paths::parent(&file).to_string();
            let Some(modules) = doc.modules() else {
                continue;
            };
            for (name, module) in modules {
                let module_name = name.as_str().unwrap_or_default();
                if document::is_reserved(module_name) {
                    continue;
                }
                let Some(reference) = document::config_reference(module) else {
                    continue;
                };
                match candidates::resolve_reference(self.storage, reference, &dir).await {
                    Some(found) => {
                        if seen.insert(found.clone()) {
                            ordered.push(found.clone());
                            queue.push_back(found);
                        }
                    }
                    None => {
                        tracing::warn!(
                            "module '{module_name}': reference '{reference}' not found while collecting references"
                        );
                    }
                }
            }
        }

        ordered
    }
}
