//! The `refs` command: list a document's transitive references.

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

use super::common;
use crate::resolver::ReferenceResolver;

/// List every file transitively referenced by a model document, one
/// root-relative path per line in breadth-first order.
#[derive(Args)]
pub struct RefsCommand {
    /// The model document to walk.
    file: PathBuf,

    /// Resolution root; defaults to the document's own directory.
    #[arg(long)]
    root: Option<PathBuf>,
}

impl RefsCommand {
    pub async fn execute(self) -> Result<()> {
        let (storage, relative) = common::open_target(&self.file, self.root.as_deref())?;

        let references = ReferenceResolver::new(&storage)
            .collect_references(&relative)
            .await;
        for reference in references {
            println!("{reference}");
        }
        Ok(())
    }
}
