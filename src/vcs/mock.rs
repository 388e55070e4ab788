//! In-memory version-control backend for tests
//!
//! `materialize` writes the configured tags into the destination directory
//! and `list_tags` reads them back, so workspace handling is exercised for real.

use crate::error::{FetchError, TagListError};
use crate::vcs::VcsClient;
use async_trait::async_trait;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

const TAG_FILE: &str = "TAGS";

enum Outcome {
    Tags(Vec<String>),
    Failure(String),
    PartialFailure(String),
}

/// Scripted backend keyed by remote
pub(crate) struct MockVcs {
    outcomes: HashMap<String, Outcome>,
    fail_tag_list: bool,
    calls: Mutex<Vec<(String, PathBuf)>>,
}

impl MockVcs {
    pub(crate) fn new() -> Self {
        Self {
            outcomes: HashMap::new(),
            fail_tag_list: false,
            calls: Mutex::new(Vec::new()),
        }
    }

    /// `remote` clones successfully and carries `tags`
    pub(crate) fn with_tags(mut self, remote: &str, tags: &[&str]) -> Self {
        let tags = tags.iter().map(|t| t.to_string()).collect();
        self.outcomes.insert(remote.to_string(), Outcome::Tags(tags));
        self
    }

    /// `remote` fails with `message`
    pub(crate) fn with_failure(mut self, remote: &str, message: &str) -> Self {
        self.outcomes
            .insert(remote.to_string(), Outcome::Failure(message.to_string()));
        self
    }

    /// `remote` leaves a half-written destination behind, then fails
    pub(crate) fn with_partial_failure(mut self, remote: &str, message: &str) -> Self {
        self.outcomes.insert(
            remote.to_string(),
            Outcome::PartialFailure(message.to_string()),
        );
        self
    }

    /// Every tag listing fails
    pub(crate) fn failing_tag_list(mut self) -> Self {
        self.fail_tag_list = true;
        self
    }

    /// Remotes passed to `materialize`, in call order
    pub(crate) fn attempted_remotes(&self) -> Vec<String> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .map(|(remote, _)| remote.clone())
            .collect()
    }

    /// Destinations passed to `materialize`, in call order
    pub(crate) fn destinations(&self) -> Vec<PathBuf> {
        self.calls
            .lock()
            .unwrap()
            .iter()
            .map(|(_, dest)| dest.clone())
            .collect()
    }
}

#[async_trait]
impl VcsClient for MockVcs {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn materialize(&self, remote: &str, dest: &Path) -> Result<(), FetchError> {
        self.calls
            .lock()
            .unwrap()
            .push((remote.to_string(), dest.to_path_buf()));

        match self.outcomes.get(remote) {
            Some(Outcome::Tags(tags)) => {
                assert!(!dest.exists(), "destination must be empty before a clone");
                std::fs::create_dir_all(dest).map_err(|source| FetchError::Workspace { source })?;
                std::fs::write(dest.join(TAG_FILE), tags.join("\n"))
                    .map_err(|source| FetchError::Workspace { source })?;
                Ok(())
            }
            Some(Outcome::Failure(message)) => Err(FetchError::command(remote, message.clone())),
            Some(Outcome::PartialFailure(message)) => {
                std::fs::create_dir_all(dest).map_err(|source| FetchError::Workspace { source })?;
                Err(FetchError::command(remote, message.clone()))
            }
            None => Err(FetchError::command(
                remote,
                format!("repository '{}' not found", remote),
            )),
        }
    }

    async fn list_tags(&self, repo: &Path) -> Result<Vec<String>, TagListError> {
        if self.fail_tag_list {
            return Err(TagListError::new(repo, "fatal: not a git repository"));
        }
        let content = std::fs::read_to_string(repo.join(TAG_FILE))
            .map_err(|e| TagListError::new(repo, e.to_string()))?;
        Ok(content
            .lines()
            .filter(|l| !l.is_empty())
            .map(str::to_string)
            .collect())
    }
}
