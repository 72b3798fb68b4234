//! Remote blob storage backend.
//!
//! Talks to a filer-style HTTP object store (one URL per object, directory
//! listings served as JSON), rooted at `<namespace>/<sessionId>/`. Reads
//! materialize the blob into a transient in-memory buffer that the caller
//! drops as soon as the YAML parser is done with it, on every exit path.
//!
//! # Endpoints used
//!
//! - `HEAD <endpoint>/<root>/<path>` - existence probe
//! - `GET <endpoint>/<root>/<path>` - object bytes
//! - `PUT <endpoint>/<root>/<path>` - object upload
//! - `GET <endpoint>/<root>/<prefix>/` with `Accept: application/json` -
//!   one-level directory listing (`Entries` array; entries without chunk
//!   metadata are directories)
//! - `DELETE <endpoint>/<root>/<prefix>?recursive=true` - subtree removal
//!
//! Every request runs under a bounded timeout so a stalled store cannot hang
//! a resolution call indefinitely.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::time::Duration;

use super::{StorageBackend, StorageEntry};
use crate::core::{NetvizError, Result};
use crate::utils::paths;

/// Connection settings for the blob store.
#[derive(Debug, Clone)]
pub struct RemoteStoreOptions {
    /// Base URL of the store, e.g. `http://localhost:8888`.
    pub endpoint: String,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl RemoteStoreOptions {
    /// Options with the default 30 second timeout.
    #[must_use]
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            timeout: Duration::from_secs(30),
        }
    }
}

/// Storage backend rooted at `<namespace>/<sessionId>/` in a blob store.
#[derive(Debug, Clone)]
pub struct RemoteBlobStorage {
    client: Client,
    endpoint: String,
    root: String,
}

#[derive(Debug, Deserialize)]
struct DirListing {
    #[serde(rename = "Entries", default)]
    entries: Option<Vec<DirEntry>>,
}

#[derive(Debug, Deserialize)]
struct DirEntry {
    #[serde(rename = "FullPath")]
    full_path: String,
    #[serde(rename = "Chunks", default)]
    chunks: Option<serde_json::Value>,
}

impl RemoteBlobStorage {
    /// Create a backend scoped to one session's namespace prefix.
    pub fn new(options: &RemoteStoreOptions, namespace: &str, session_id: &str) -> Result<Self> {
        let client = Client::builder().timeout(options.timeout).build()?;
        Ok(Self {
            client,
            endpoint: options.endpoint.trim_end_matches('/').to_string(),
            root: format!("{namespace}/{session_id}"),
        })
    }

    fn check(&self, path: &str) -> Result<String> {
        paths::normalize(path).ok_or_else(|| NetvizError::PathEscapesRoot {
            path: path.to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        if path.is_empty() {
            format!("{}/{}", self.endpoint, self.root)
        } else {
            format!("{}/{}/{}", self.endpoint, self.root, path)
        }
    }

    fn failure(operation: &str, path: &str, reason: impl ToString) -> NetvizError {
        NetvizError::RemoteStorage {
            operation: operation.to_string(),
            path: path.to_string(),
            reason: reason.to_string(),
        }
    }
}

#[async_trait]
impl StorageBackend for RemoteBlobStorage {
    fn describe(&self, path: &str) -> String {
        self.url(path)
    }

    async fn exists(&self, path: &str) -> Result<bool> {
        let path = self.check(path)?;
        let response = self.client.head(self.url(&path)).send().await?;
        match response.status() {
            StatusCode::OK => Ok(true),
            StatusCode::NOT_FOUND => Ok(false),
            status => Err(Self::failure("probe", &path, format!("HTTP {status}"))),
        }
    }

    async fn read(&self, path: &str) -> Result<Vec<u8>> {
        let path = self.check(path)?;
        let response = self.client.get(self.url(&path)).send().await?;
        match response.status() {
            StatusCode::OK => Ok(response.bytes().await?.to_vec()),
            StatusCode::NOT_FOUND => Err(NetvizError::TargetNotFound { path }),
            status => Err(Self::failure("read", &path, format!("HTTP {status}"))),
        }
    }

    async fn write(&self, path: &str, bytes: &[u8]) -> Result<()> {
        let path = self.check(path)?;
        let response = self
            .client
            .put(self.url(&path))
            .body(bytes.to_vec())
            .send()
            .await?;
        if response.status().is_success() {
            Ok(())
        } else {
            Err(Self::failure("write", &path, format!("HTTP {}", response.status())))
        }
    }

    async fn list_under(&self, prefix: &str) -> Result<Vec<StorageEntry>> {
        let prefix = self.check(prefix)?;
        let url = format!("{}/", self.url(&prefix));
        let response = self
            .client
            .get(url)
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await?;
        match response.status() {
            StatusCode::NOT_FOUND => Ok(Vec::new()),
            StatusCode::OK => {
                let listing: DirListing = response
                    .json()
                    .await
                    .map_err(|e| Self::failure("list", &prefix, e))?;
                Ok(listing
                    .entries
                    .unwrap_or_default()
                    .into_iter()
                    .map(|entry| StorageEntry {
                        name: paths::file_name(&entry.full_path).to_string(),
                        is_dir: entry.chunks.is_none(),
                    })
                    .collect())
            }
            status => Err(Self::failure("list", &prefix, format!("HTTP {status}"))),
        }
    }

    async fn delete_prefix(&self, prefix: &str) -> Result<()> {
        let prefix = self.check(prefix)?;
        let response = self
            .client
            .delete(self.url(&prefix))
            .query(&[("recursive", "true"), ("ignoreRecursiveError", "true")])
            .send()
            .await?;
        match response.status() {
            StatusCode::NOT_FOUND => Ok(()),
            status if status.is_success() => Ok(()),
            status => Err(Self::failure("delete", &prefix, format!("HTTP {status}"))),
        }
    }
}
