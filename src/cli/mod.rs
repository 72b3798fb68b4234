//! Command-line interface for the reference resolution engine.
//!
//! Each subcommand lives in its own module with its own argument struct and
//! execution logic:
//!
//! - `resolve` - expand a model document's references and print the result
//! - `refs` - list every file a document transitively references
//! - `presets` - enumerate the presets available under a catalog directory
//!
//! Global options (`--verbose`, `--quiet`, `--config`) apply to every
//! subcommand. Verbosity maps onto the `tracing` filter: `--verbose` enables
//! debug output, `--quiet` suppresses everything below errors, and the
//! default honors `RUST_LOG` with a fallback of `warn`.

mod common;
mod presets;
mod refs;
mod resolve;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use crate::config::EngineConfig;

/// Top-level CLI parser.
#[derive(Parser)]
#[command(
    name = "netviz",
    about = "Resolve cross-file references in model configuration graphs",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable debug output.
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    verbose: bool,

    /// Suppress all output except errors.
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Path to an engine configuration file (TOML).
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,
}

/// Available subcommands.
#[derive(Subcommand)]
enum Commands {
    /// Resolve a document's references and print the expanded graph.
    Resolve(resolve::ResolveCommand),
    /// List every file transitively referenced by a document.
    Refs(refs::RefsCommand),
    /// List the presets available under a catalog directory.
    Presets(presets::PresetsCommand),
}

impl Cli {
    /// The log filter implied by the verbosity flags, or `None` for quiet
    /// mode.
    ///
    /// `RUST_LOG` wins over the default level but not over `--verbose`.
    #[must_use]
    pub fn log_filter(&self) -> Option<EnvFilter> {
        if self.quiet {
            return None;
        }
        if self.verbose {
            return Some(EnvFilter::new("debug"));
        }
        Some(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
    }

    /// Execute the selected subcommand.
    pub async fn execute(self) -> Result<()> {
        let config = EngineConfig::load(self.config.as_deref())?;
        match self.command {
            Commands::Resolve(cmd) => cmd.execute(&config).await,
            Commands::Refs(cmd) => cmd.execute().await,
            Commands::Presets(cmd) => cmd.execute().await,
        }
    }
}
