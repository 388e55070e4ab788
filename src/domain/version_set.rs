//! Semantic versions parsed from repository tags
//!
//! Tags are parsed leniently: a leading `v` is accepted and missing
//! minor/patch components are filled with zeros, so `v1.2` reads as `1.2.0`.
//! Anything still not a semantic version is dropped.

use semver::Version;
use serde::Serialize;
use std::cmp::Ordering;

/// Parse a tag or locked version string as a semantic version
pub fn parse_version(raw: &str) -> Option<Version> {
    let raw = raw.trim();
    let raw = raw.strip_prefix(['v', 'V']).unwrap_or(raw);
    if raw.is_empty() {
        return None;
    }

    let split_at = raw.find(['-', '+']).unwrap_or(raw.len());
    let (core, rest) = raw.split_at(split_at);
    let padding = match core.matches('.').count() {
        0 => ".0.0",
        1 => ".0",
        _ => "",
    };

    Version::parse(&format!("{}{}{}", core, padding, rest)).ok()
}

/// Compare two versions by semantic-version precedence (build metadata ignored)
pub fn compare_precedence(a: &Version, b: &Version) -> Ordering {
    (a.major, a.minor, a.patch, &a.pre).cmp(&(b.major, b.minor, b.patch, &b.pre))
}

/// A tag together with the version parsed from it
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaggedVersion {
    /// Tag name exactly as listed by the repository
    pub tag: String,
    /// Parsed version
    #[serde(serialize_with = "serialize_version")]
    pub version: Version,
}

fn serialize_version<S: serde::Serializer>(version: &Version, s: S) -> Result<S::Ok, S::Error> {
    s.collect_str(version)
}

impl TaggedVersion {
    /// Parse a tag, returning None when it is not a version
    pub fn parse(tag: &str) -> Option<Self> {
        parse_version(tag).map(|version| Self {
            tag: tag.to_string(),
            version,
        })
    }
}

/// Ascending collection of versions extracted from tags
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct VersionSet {
    versions: Vec<TaggedVersion>,
}

impl VersionSet {
    /// Build a set from raw tag names, dropping tags that are not versions
    pub fn from_tags<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut versions: Vec<TaggedVersion> = tags
            .into_iter()
            .filter_map(|tag| TaggedVersion::parse(tag.as_ref()))
            .collect();

        versions.sort_by(|a, b| {
            compare_precedence(&a.version, &b.version)
                .then_with(|| a.version.cmp(&b.version))
                .then_with(|| a.tag.cmp(&b.tag))
        });

        Self { versions }
    }

    /// Highest version, if any tag parsed
    pub fn latest(&self) -> Option<&TaggedVersion> {
        self.versions.last()
    }

    /// Number of parsed versions
    pub fn len(&self) -> usize {
        self.versions.len()
    }

    /// Returns true when no tag parsed as a version
    pub fn is_empty(&self) -> bool {
        self.versions.is_empty()
    }

    /// Iterate in ascending order
    pub fn iter(&self) -> impl Iterator<Item = &TaggedVersion> {
        self.versions.iter()
    }

    /// Raw tag names in ascending version order
    pub fn tags(&self) -> Vec<&str> {
        self.versions.iter().map(|v| v.tag.as_str()).collect()
    }
}
