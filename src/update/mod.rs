//! Update judgment logic for dependencies
//!
//! This module provides:
//! - The comparison policy between a locked version and upstream tags
//! - UpdateChecker, which resolves, fetches and judges one dependency

use crate::domain::{
    compare_precedence, parse_version, Dependency, SkipReason, UpdateResult, VersionSet,
};
use crate::error::{CheckError, RepositoryError};
use crate::resolver::SourceResolver;
use crate::vcs::RepositoryFetcher;
use std::cmp::Ordering;
use tracing::debug;

/// Decide whether `dependency` can move to the latest version in `versions`
///
/// Only strict semantic-version precedence counts: a lexically different
/// tag of equal precedence, or an unparseable locked version, is never an update.
pub fn judge(dependency: &Dependency, versions: &VersionSet) -> UpdateResult {
    let latest = versions.latest();
    let latest_tag = latest.map(|v| v.tag.clone());

    let Some(current) = parse_version(&dependency.version) else {
        return UpdateResult::skip(
            dependency,
            latest_tag,
            SkipReason::InvalidLockedVersion(dependency.version.clone()),
        );
    };

    let Some(latest) = latest else {
        return UpdateResult::skip(dependency, None, SkipReason::NoVersionTags);
    };

    match compare_precedence(&latest.version, &current) {
        Ordering::Greater => UpdateResult::update(dependency, latest.tag.clone()),
        Ordering::Equal | Ordering::Less => {
            UpdateResult::skip(dependency, latest_tag, SkipReason::UpToDate)
        }
    }
}

impl CheckError {
    /// Turn a fatal check error into a per-dependency skip reason
    pub fn into_skip_reason(self) -> SkipReason {
        match self {
            CheckError::Resolution(e) => SkipReason::Unresolvable(e.message),
            CheckError::TagList { source, .. } => SkipReason::TagListFailed(source.message),
        }
    }
}

/// Checks a single dependency against its upstream repository
#[derive(Clone)]
pub struct UpdateChecker {
    resolver: SourceResolver,
    fetcher: RepositoryFetcher,
}

impl UpdateChecker {
    /// Create a checker from a resolver and a fetcher
    pub fn new(resolver: SourceResolver, fetcher: RepositoryFetcher) -> Self {
        Self { resolver, fetcher }
    }

    /// Check `dependency` for a newer tagged version
    ///
    /// Fetch failures degrade to a non-updatable result. Resolution and
    /// tag-listing failures are returned as errors.
    pub async fn check(&self, dependency: &Dependency) -> Result<UpdateResult, CheckError> {
        let remote = self.resolver.resolve(dependency).await?;

        let tags = match self.fetcher.fetch_tags(&remote).await {
            Ok(tags) => tags,
            Err(RepositoryError::Fetch(e)) => {
                debug!("{}: {}", dependency.name, e);
                return Ok(UpdateResult::fetch_failed(dependency, e.to_string()));
            }
            Err(RepositoryError::TagList(source)) => {
                return Err(CheckError::TagList {
                    name: dependency.name.clone(),
                    source,
                });
            }
        };

        let versions = VersionSet::from_tags(&tags);
        debug!(
            "{}: {} of {} tags are versions",
            dependency.name,
            versions.len(),
            tags.len()
        );
        Ok(judge(dependency, &versions))
    }
}
