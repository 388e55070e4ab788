//! Dependency information structures

use serde::{Deserialize, Serialize};
use std::fmt;

/// A pinned dependency from the merged manifest and lock data
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dependency {
    /// Import path (e.g. "github.com/pkg/errors"), the unique key
    pub name: String,
    /// Explicit remote that replaces any derived location
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    /// Locked version string, may be empty for branch- or revision-pinned entries
    pub version: String,
    /// Locked branch
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub branch: Option<String>,
    /// Locked revision
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub revision: Option<String>,
}

impl Dependency {
    /// Creates a new dependency locked at `version`
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            source: None,
            version: version.into(),
            branch: None,
            revision: None,
        }
    }

    /// Sets an explicit source (builder pattern)
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Returns the explicit source, treating an empty string as absent
    pub fn explicit_source(&self) -> Option<&str> {
        self.source.as_deref().filter(|s| !s.is_empty())
    }
}

impl fmt::Display for Dependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.name, self.version)
    }
}
