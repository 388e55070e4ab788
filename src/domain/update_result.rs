//! Update decision result types

use super::Dependency;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Reason why a dependency is not reported as updatable
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum SkipReason {
    /// Already at (or past) the latest tagged version
    UpToDate,
    /// Repository has no tags that parse as versions
    NoVersionTags,
    /// Locked version is not a semantic version
    InvalidLockedVersion(String),
    /// Repository could not be fetched
    FetchFailed(String),
    /// Name could not be resolved to a repository (only with --keep-going)
    Unresolvable(String),
    /// Tags could not be listed (only with --keep-going)
    TagListFailed(String),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::UpToDate => write!(f, "up to date"),
            SkipReason::NoVersionTags => write!(f, "no version tags"),
            SkipReason::InvalidLockedVersion(v) => {
                if v.is_empty() {
                    write!(f, "no locked version")
                } else {
                    write!(f, "locked version '{}' is not semver", v)
                }
            }
            SkipReason::FetchFailed(msg) => write!(f, "fetch failed: {}", msg),
            SkipReason::Unresolvable(msg) => write!(f, "unresolvable: {}", msg),
            SkipReason::TagListFailed(msg) => write!(f, "tag listing failed: {}", msg),
        }
    }
}

/// Outcome of checking one dependency
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateResult {
    /// Dependency name
    pub name: String,
    /// Locked version, as written in the lock file
    pub current_version: String,
    /// Raw tag of the highest version upstream, if any tag parsed
    pub latest_version: Option<String>,
    /// True iff both versions parse and latest is strictly newer
    pub updatable: bool,
    /// Why the dependency is not updatable; None iff updatable
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<SkipReason>,
}

impl UpdateResult {
    /// Creates an updatable result
    pub fn update(dependency: &Dependency, latest: impl Into<String>) -> Self {
        Self {
            name: dependency.name.clone(),
            current_version: dependency.version.clone(),
            latest_version: Some(latest.into()),
            updatable: true,
            reason: None,
        }
    }

    /// Creates a non-updatable result
    pub fn skip(dependency: &Dependency, latest: Option<String>, reason: SkipReason) -> Self {
        Self {
            name: dependency.name.clone(),
            current_version: dependency.version.clone(),
            latest_version: latest,
            updatable: false,
            reason: Some(reason),
        }
    }

    /// Creates a result for a dependency whose repository could not be fetched
    pub fn fetch_failed(dependency: &Dependency, message: impl Into<String>) -> Self {
        Self::skip(dependency, None, SkipReason::FetchFailed(message.into()))
    }

    /// Latest version for display, with a marker when absent
    pub fn latest_display(&self) -> &str {
        self.latest_version.as_deref().unwrap_or("-")
    }
}

impl fmt::Display for UpdateResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.reason {
            None => write!(
                f,
                "{}: {} -> {}",
                self.name,
                self.current_version,
                self.latest_display()
            ),
            Some(reason) => write!(f, "{}: {} ({})", self.name, self.current_version, reason),
        }
    }
}
