//! The `presets` command: enumerate a local preset catalog.

use anyhow::Result;
use clap::Args;
use std::path::PathBuf;

use crate::presets::list_presets;
use crate::storage::LocalStorage;

/// List the presets available under a catalog directory.
#[derive(Args)]
pub struct PresetsCommand {
    /// The catalog directory to scan.
    dir: PathBuf,
}

impl PresetsCommand {
    pub async fn execute(self) -> Result<()> {
        let storage = LocalStorage::new(&self.dir)?;
        let presets = list_presets(&storage, "").await?;
        if presets.is_empty() {
            println!("no presets found");
            return Ok(());
        }
        for preset in presets {
            println!("{}\t{}", preset.name, preset.entry_path);
        }
        Ok(())
    }
}
