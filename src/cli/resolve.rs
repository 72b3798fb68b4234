//! The `resolve` command: expand a document and print the result.

use anyhow::{Context, Result};
use clap::Args;
use std::path::PathBuf;

use super::common;
use crate::config::EngineConfig;
use crate::document::ConfigDocument;
use crate::resolver::ReferenceResolver;
use crate::storage::StorageBackend;
use crate::utils::paths;

/// Resolve every reference in a model document and print the expanded graph.
#[derive(Args)]
pub struct ResolveCommand {
    /// The model document to resolve.
    file: PathBuf,

    /// Resolution root; references may not escape it. Defaults to the
    /// document's own directory.
    #[arg(long)]
    root: Option<PathBuf>,

    /// Write the expanded document here instead of stdout.
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Emit JSON instead of YAML.
    #[arg(long)]
    json: bool,

    /// Override the recursion depth bound.
    #[arg(long)]
    max_depth: Option<usize>,
}

impl ResolveCommand {
    pub async fn execute(self, config: &EngineConfig) -> Result<()> {
        let (storage, relative) = common::open_target(&self.file, self.root.as_deref())?;

        let bytes = storage.read(&relative).await?;
        let text = String::from_utf8(bytes)
            .with_context(|| format!("'{relative}' is not valid UTF-8"))?;
        let mut doc = ConfigDocument::parse(&text)?;

        ReferenceResolver::new(&storage)
            .with_max_depth(self.max_depth.unwrap_or(config.max_depth))
            .resolve_document(&mut doc, paths::parent(&relative))
            .await;

        let rendered = if self.json {
            let mut json = serde_json::to_string_pretty(doc.root())
                .context("expanded document is not representable as JSON")?;
            json.push('\n');
            json
        } else {
            doc.to_yaml()?
        };

        match &self.output {
            Some(path) => {
                std::fs::write(path, &rendered)
                    .with_context(|| format!("cannot write '{}'", path.display()))?;
                tracing::info!("wrote expanded document to {}", path.display());
            }
            None => print!("{rendered}"),
        }
        Ok(())
    }
}
