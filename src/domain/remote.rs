//! Remote locations derived from a dependency

use serde::Serialize;
use std::fmt;

/// Where to fetch a dependency from
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RemoteLocation {
    /// Remote tried first
    pub primary: String,
    /// Remote tried once if the primary times out
    pub fallback: Option<String>,
}

impl RemoteLocation {
    /// A single remote with no fallback
    pub fn explicit(primary: impl Into<String>) -> Self {
        Self {
            primary: primary.into(),
            fallback: None,
        }
    }

    /// A primary remote with a fallback; an empty fallback counts as none
    pub fn with_fallback(primary: impl Into<String>, fallback: impl Into<String>) -> Self {
        let fallback = fallback.into();
        Self {
            primary: primary.into(),
            fallback: (!fallback.is_empty()).then_some(fallback),
        }
    }
}

impl fmt::Display for RemoteLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.fallback {
            Some(fallback) => write!(f, "{} (fallback {})", self.primary, fallback),
            None => write!(f, "{}", self.primary),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_has_no_fallback() {
        let remote = RemoteLocation::explicit("git@example.com:x.git");
        assert_eq!(remote.primary, "git@example.com:x.git");
        assert!(remote.fallback.is_none());
    }

    #[test]
    fn test_empty_fallback_is_none() {
        let remote = RemoteLocation::with_fallback("a", "");
        assert!(remote.fallback.is_none());
    }

    #[test]
    fn test_display() {
        let remote = RemoteLocation::with_fallback(
            "git@github.com:foo/bar.git",
            "https://github.com/foo/bar",
        );
        assert_eq!(
            remote.to_string(),
            "git@github.com:foo/bar.git (fallback https://github.com/foo/bar)"
        );
    }
}
