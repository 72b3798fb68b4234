//! Engine configuration.
//!
//! Configuration is layered the usual way: built-in defaults, then an
//! optional TOML file (`NETVIZ_CONFIG` or an explicit path), then `NETVIZ_*`
//! environment variables. Nothing here is required - the engine runs with
//! defaults against a local temp directory.
//!
//! ```toml
//! max_depth = 32
//! session_base_dir = "/var/lib/netviz/sessions"
//!
//! [remote]
//! endpoint = "http://filer:8888"
//! namespace = "uploads"
//! read_timeout_secs = 30
//! ```

use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::core::{NetvizError, Result};
use crate::resolver::DEFAULT_MAX_DEPTH;
use crate::storage::RemoteStoreOptions;

/// Environment variable naming the configuration file.
pub const CONFIG_ENV: &str = "NETVIZ_CONFIG";

/// Resolved engine configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineConfig {
    /// Bound on eager reference recursion.
    pub max_depth: usize,
    /// Directory local session roots are created under.
    pub session_base_dir: PathBuf,
    /// Remote blob store settings; absent means local-only operation.
    pub remote: Option<RemoteSettings>,
}

/// Connection settings for the remote blob store.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RemoteSettings {
    /// Base URL of the store.
    pub endpoint: String,
    /// Namespace prefix session roots are created under.
    pub namespace: String,
    /// Per-request timeout in seconds.
    #[serde(default = "default_timeout_secs")]
    pub read_timeout_secs: u64,
}

const fn default_timeout_secs() -> u64 {
    30
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            session_base_dir: std::env::temp_dir().join("netviz-sessions"),
            remote: None,
        }
    }
}

impl EngineConfig {
    /// Load configuration from `path`, `NETVIZ_CONFIG`, or defaults, then
    /// apply environment overrides.
    ///
    /// # Errors
    ///
    /// Returns [`NetvizError::Config`] when a named file is unreadable or
    /// not valid TOML.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let file = path
            .map(Path::to_path_buf)
            .or_else(|| std::env::var(CONFIG_ENV).ok().map(PathBuf::from));

        let mut config = match file {
            Some(file) => {
                let text = std::fs::read_to_string(&file).map_err(|err| NetvizError::Config {
                    path: file.display().to_string(),
                    reason: err.to_string(),
                })?;
                toml::from_str(&text).map_err(|err| NetvizError::Config {
                    path: file.display().to_string(),
                    reason: err.to_string(),
                })?
            }
            None => Self::default(),
        };
        config.apply_overrides(|name| std::env::var(name).ok());
        Ok(config)
    }

    /// Apply `NETVIZ_*` overrides from an arbitrary variable source.
    fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(depth) = var("NETVIZ_MAX_DEPTH").and_then(|v| v.parse().ok()) {
            self.max_depth = depth;
        }
        if let Some(dir) = var("NETVIZ_SESSION_DIR") {
            self.session_base_dir = PathBuf::from(dir);
        }
        if let (Some(endpoint), Some(namespace)) =
            (var("NETVIZ_REMOTE_ENDPOINT"), var("NETVIZ_REMOTE_NAMESPACE"))
        {
            let read_timeout_secs = var("NETVIZ_REMOTE_TIMEOUT_SECS")
                .and_then(|v| v.parse().ok())
                .unwrap_or_else(|| {
                    self.remote
                        .as_ref()
                        .map_or_else(default_timeout_secs, |r| r.read_timeout_secs)
                });
            self.remote = Some(RemoteSettings {
                endpoint,
                namespace,
                read_timeout_secs,
            });
        }
    }

    /// Connection options for the configured remote store, if any.
    #[must_use]
    pub fn remote_options(&self) -> Option<(RemoteStoreOptions, String)> {
        self.remote.as_ref().map(|remote| {
            (
                RemoteStoreOptions {
                    endpoint: remote.endpoint.clone(),
                    timeout: Duration::from_secs(remote.read_timeout_secs),
                },
                remote.namespace.clone(),
            )
        })
    }
}
