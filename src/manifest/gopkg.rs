//! Gopkg.toml and Gopkg.lock documents
//!
//! Handles:
//! - [[constraint]] and [[override]] tables
//! - ignored / required lists
//! - [[projects]] in the lock file (digest, packages, pruneopts and
//!   [solve-meta] are accepted and ignored)

use crate::error::ManifestError;
use serde::Deserialize;
use std::path::Path;

/// Manifest file name
pub const MANIFEST_FILE: &str = "Gopkg.toml";

/// Lock file name
pub const LOCK_FILE: &str = "Gopkg.lock";

/// A project entry, shared by manifest constraints and lock projects
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RawProject {
    pub name: String,
    #[serde(default)]
    pub branch: String,
    #[serde(default)]
    pub revision: String,
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub source: String,
}

/// Parsed Gopkg.toml
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RawManifest {
    #[serde(default, rename = "constraint")]
    pub constraints: Vec<RawProject>,
    #[serde(default, rename = "override")]
    pub overrides: Vec<RawProject>,
    #[serde(default)]
    pub ignored: Vec<String>,
    #[serde(default)]
    pub required: Vec<String>,
}

/// Parsed Gopkg.lock
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct RawLock {
    #[serde(default)]
    pub projects: Vec<RawProject>,
}

impl RawManifest {
    /// Parse manifest content; `path` is only used in error messages
    pub fn parse(content: &str, path: &Path) -> Result<Self, ManifestError> {
        toml::from_str(content).map_err(|e| ManifestError::toml_parse_error(path, e.to_string()))
    }
}

impl RawLock {
    /// Parse lock content; `path` is only used in error messages
    pub fn parse(content: &str, path: &Path) -> Result<Self, ManifestError> {
        toml::from_str(content).map_err(|e| ManifestError::toml_parse_error(path, e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_manifest() {
        let content = r#"
required = ["github.com/golang/mock/mockgen"]
ignored = ["github.com/foo/ignored"]

[[constraint]]
  name = "github.com/pkg/errors"
  version = "0.8.0"

[[constraint]]
  name = "github.com/sirupsen/logrus"
  branch = "master"

[[override]]
  name = "gopkg.in/yaml.v2"
  source = "https://github.com/go-yaml/yaml.git"
  version = "2.2.1"
"#;
        let manifest = RawManifest::parse(content, Path::new(MANIFEST_FILE)).unwrap();
        assert_eq!(manifest.constraints.len(), 2);
        assert_eq!(manifest.constraints[0].name, "github.com/pkg/errors");
        assert_eq!(manifest.constraints[0].version, "0.8.0");
        assert_eq!(manifest.constraints[1].branch, "master");
        assert!(manifest.constraints[1].version.is_empty());
        assert_eq!(manifest.overrides.len(), 1);
        assert_eq!(manifest.ignored, vec!["github.com/foo/ignored"]);
        assert_eq!(manifest.required, vec!["github.com/golang/mock/mockgen"]);
    }

    #[test]
    fn test_parse_lock_ignores_unknown_keys() {
        let content = r#"
[[projects]]
  digest = "1:abc"
  name = "github.com/pkg/errors"
  packages = ["."]
  pruneopts = "UT"
  revision = "645ef00459ed84a119197bfb8d8205042c6df63d"
  version = "v0.8.0"

[solve-meta]
  analyzer-name = "dep"
  analyzer-version = 1
  input-imports = []
  solver-name = "gps-cdcl"
  solver-version = 1
"#;
        let lock = RawLock::parse(content, Path::new(LOCK_FILE)).unwrap();
        assert_eq!(lock.projects.len(), 1);
        assert_eq!(lock.projects[0].version, "v0.8.0");
        assert_eq!(
            lock.projects[0].revision,
            "645ef00459ed84a119197bfb8d8205042c6df63d"
        );
    }

    #[test]
    fn test_parse_empty_documents() {
        assert_eq!(
            RawManifest::parse("", Path::new(MANIFEST_FILE)).unwrap(),
            RawManifest::default()
        );
        assert_eq!(
            RawLock::parse("", Path::new(LOCK_FILE)).unwrap(),
            RawLock::default()
        );
    }

    #[test]
    fn test_parse_invalid_toml() {
        let err = RawLock::parse("[[projects]\nname=", Path::new(LOCK_FILE)).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("failed to parse TOML"));
        assert!(msg.contains("Gopkg.lock"));
    }

    #[test]
    fn test_project_without_name_is_error() {
        let result = RawLock::parse("[[projects]]\nversion = \"1.0.0\"\n", Path::new(LOCK_FILE));
        assert!(result.is_err());
    }
}
