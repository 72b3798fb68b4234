//! netviz - configuration reference resolution for model graph documents.
//!
//! Neural-network visualizer backends describe models as YAML documents whose
//! `modules` map may point at other YAML files through string-valued `config`
//! fields. This crate turns such a document into a single self-contained
//! graph: eager references are read, parsed, interpolation-resolved, and
//! inlined recursively; `ComposableModel` nodes stay lazy and are fetched on
//! demand when a client drills into them.
//!
//! # Architecture Overview
//!
//! Resolution always happens inside a *root* - a session directory, a blob
//! store prefix, or an in-memory tree - and no reference may escape it.
//! Uploads (single files, zip bundles, cloned presets) each get an opaque
//! session id; later subgraph fetches present that id plus a canonical
//! root-relative path.
//!
//! # Core Modules
//!
//! - [`document`] - the model document shape: `modules`, `cls`, `config`
//! - [`interpolate`] - `${a.b}` expression substitution within one document
//! - [`resolver`] - candidate generation and recursive reference expansion
//! - [`storage`] - the [`storage::StorageBackend`] seam with local
//!   directory, remote blob store, and in-memory implementations
//! - [`session`] - upload sessions mapping opaque ids to storage roots
//! - [`subgraph`] - on-demand resolution of one lazy subgraph
//! - [`presets`] - preset catalog discovery and cloning
//!
//! ## Supporting Modules
//!
//! - [`cli`] - the `netviz` command-line interface
//! - [`config`] - engine configuration (TOML file plus `NETVIZ_*` overrides)
//! - [`core`] - error taxonomy and user-facing error display
//! - [`utils`] - root-relative path normalization and joining
//!
//! # Example
//!
//! ```no_run
//! use netviz::document::ConfigDocument;
//! use netviz::resolver::ReferenceResolver;
//! use netviz::storage::LocalStorage;
//!
//! # async fn demo() -> anyhow::Result<()> {
//! let storage = LocalStorage::new("/data/session")?;
//! let text = std::fs::read_to_string("/data/session/model.yaml")?;
//! let mut doc = ConfigDocument::parse(&text)?;
//! ReferenceResolver::new(&storage).resolve_document(&mut doc, "").await;
//! println!("{}", doc.to_yaml()?);
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod config;
pub mod core;
pub mod document;
pub mod interpolate;
pub mod presets;
pub mod resolver;
pub mod session;
pub mod storage;
pub mod subgraph;
pub mod utils;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
