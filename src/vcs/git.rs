//! Version-control client backed by the local `git` binary
//!
//! Credentials, SSH keys and proxies are whatever the user's git and ssh
//! configuration provide; nothing here manages them.

use crate::error::{FetchError, TagListError};
use crate::vcs::VcsClient;
use async_trait::async_trait;
use std::path::Path;
use std::process::{Output, Stdio};
use std::time::Duration;
use tokio::process::Command;
use tracing::debug;

/// Default git program
const DEFAULT_PROGRAM: &str = "git";

/// Failure to obtain output from a git invocation
enum RunError {
    Spawn(std::io::Error),
    TimedOut(Duration),
}

/// Runs git as a child process
#[derive(Debug, Clone)]
pub struct GitClient {
    program: String,
    timeout: Option<Duration>,
}

impl GitClient {
    /// Create a client using `git` from PATH and no deadline
    pub fn new() -> Self {
        Self {
            program: DEFAULT_PROGRAM.to_string(),
            timeout: None,
        }
    }

    /// Use a different git executable
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    /// Kill any git invocation that runs longer than `timeout`
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// The git executable in use
    pub fn program(&self) -> &str {
        &self.program
    }

    async fn run(&self, args: &[&str]) -> Result<Output, RunError> {
        debug!("{} {}", self.program, args.join(" "));

        let mut command = Command::new(&self.program);
        command
            .args(args)
            .env("GIT_TERMINAL_PROMPT", "0")
            .stdin(Stdio::null())
            .kill_on_drop(true);

        match self.timeout {
            Some(limit) => match tokio::time::timeout(limit, command.output()).await {
                Ok(output) => output.map_err(RunError::Spawn),
                Err(_) => Err(RunError::TimedOut(limit)),
            },
            None => command.output().await.map_err(RunError::Spawn),
        }
    }
}

impl Default for GitClient {
    fn default() -> Self {
        Self::new()
    }
}

/// stderr of a failed command, or its exit status when stderr is empty
fn failure_message(output: &Output) -> String {
    let stderr = String::from_utf8_lossy(&output.stderr);
    let stderr = stderr.trim();
    if stderr.is_empty() {
        format!("git exited with {}", output.status)
    } else {
        stderr.to_string()
    }
}

/// Parse `git tag --list` output
fn parse_tag_list(stdout: &[u8]) -> Vec<String> {
    String::from_utf8_lossy(stdout)
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

#[async_trait]
impl VcsClient for GitClient {
    fn name(&self) -> &'static str {
        "git"
    }

    async fn materialize(&self, remote: &str, dest: &Path) -> Result<(), FetchError> {
        let dest_str = dest.to_string_lossy();
        let args = [
            "clone",
            "--quiet",
            "--bare",
            "--filter=blob:none",
            "--",
            remote,
            dest_str.as_ref(),
        ];

        let output = self.run(&args).await.map_err(|e| match e {
            RunError::Spawn(source) => FetchError::Spawn {
                program: self.program.clone(),
                source,
            },
            RunError::TimedOut(after) => FetchError::TimedOut {
                remote: remote.to_string(),
                after,
            },
        })?;

        if output.status.success() {
            Ok(())
        } else {
            Err(FetchError::command(remote, failure_message(&output)))
        }
    }

    async fn list_tags(&self, repo: &Path) -> Result<Vec<String>, TagListError> {
        let repo_str = repo.to_string_lossy();
        let args = ["--git-dir", repo_str.as_ref(), "tag", "--list"];

        let output = self.run(&args).await.map_err(|e| match e {
            RunError::Spawn(source) => TagListError::new(repo, source.to_string()),
            RunError::TimedOut(after) => {
                TagListError::new(repo, format!("timed out after {}s", after.as_secs()))
            }
        })?;

        if !output.status.success() {
            return Err(TagListError::new(repo, failure_message(&output)));
        }
        Ok(parse_tag_list(&output.stdout))
    }
}
