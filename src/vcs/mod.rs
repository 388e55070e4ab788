//! Repository fetching and tag listing
//!
//! This module provides:
//! - The VcsClient trait that version-control backends implement
//! - A git backend that shells out to the local client
//! - Transient per-fetch workspaces that are removed on every exit path
//! - The SSH to HTTPS fallback on connection timeouts

mod git;
#[cfg(test)]
pub(crate) mod mock;

pub use git::GitClient;

use crate::domain::RemoteLocation;
use crate::error::{FetchError, RepositoryError, TagListError};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tempfile::TempDir;
use tracing::{debug, info, warn};

/// Prefix of transient workspace directories
const WORKSPACE_PREFIX: &str = "gopkg-outdated-";

/// A version-control backend
#[async_trait]
pub trait VcsClient: Send + Sync {
    /// Backend name, for logs
    fn name(&self) -> &'static str;

    /// Clone `remote` into `dest`, which does not exist yet
    async fn materialize(&self, remote: &str, dest: &Path) -> Result<(), FetchError>;

    /// List tag names of the repository at `repo`
    async fn list_tags(&self, repo: &Path) -> Result<Vec<String>, TagListError>;
}

/// A materialized repository inside its own transient workspace
///
/// Dropping the handle deletes the workspace.
#[derive(Debug)]
pub struct RepositoryHandle {
    workspace: TempDir,
    path: PathBuf,
    remote: String,
}

impl RepositoryHandle {
    /// Path of the materialized repository
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Workspace directory that owns the repository
    pub fn workspace(&self) -> &Path {
        self.workspace.path()
    }

    /// Remote the repository was fetched from
    pub fn remote(&self) -> &str {
        &self.remote
    }
}

/// Fetches repositories and lists their tags
#[derive(Clone)]
pub struct RepositoryFetcher {
    client: Arc<dyn VcsClient>,
}

impl RepositoryFetcher {
    /// Create a fetcher on top of a version-control backend
    pub fn new(client: Arc<dyn VcsClient>) -> Self {
        Self { client }
    }

    /// Materialize `remote` into a fresh workspace
    ///
    /// The fallback remote is tried once, in the same workspace, only when
    /// the primary attempt failed with a connection timeout.
    pub async fn fetch(&self, remote: &RemoteLocation) -> Result<RepositoryHandle, FetchError> {
        let workspace = tempfile::Builder::new()
            .prefix(WORKSPACE_PREFIX)
            .tempdir()
            .map_err(|source| FetchError::Workspace { source })?;
        let path = workspace.path().join("repo");

        debug!("load {} via {}", remote.primary, self.client.name());
        let used = match self.attempt(&remote.primary, &path).await {
            Ok(()) => remote.primary.clone(),
            Err(e) => {
                warn!("{}: {}", remote.primary, e);
                match remote.fallback.as_deref() {
                    Some(fallback) if e.is_connection_timeout() => {
                        info!("retrying with {}", fallback);
                        self.attempt(fallback, &path).await?;
                        fallback.to_string()
                    }
                    _ => return Err(e),
                }
            }
        };

        Ok(RepositoryHandle {
            workspace,
            path,
            remote: used,
        })
    }

    /// Fetch `remote` and return all of its tag names
    ///
    /// The workspace is gone by the time this returns, whatever the outcome.
    pub async fn fetch_tags(&self, remote: &RemoteLocation) -> Result<Vec<String>, RepositoryError> {
        let handle = self.fetch(remote).await?;
        let tags = self.client.list_tags(handle.path()).await?;
        debug!("{}: {} tags", handle.remote(), tags.len());
        Ok(tags)
    }

    async fn attempt(&self, remote: &str, path: &Path) -> Result<(), FetchError> {
        if path.exists() {
            tokio::fs::remove_dir_all(path)
                .await
                .map_err(|source| FetchError::Workspace { source })?;
        }
        self.client.materialize(remote, path).await
    }
}
