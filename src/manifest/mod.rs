//! Manifest and lock file loading
//!
//! This module provides functionality to:
//! - Read Gopkg.toml and Gopkg.lock from a project directory
//! - Merge constraints and locked projects into the working dependency set

mod gopkg;

pub use gopkg::{RawLock, RawManifest, RawProject, LOCK_FILE, MANIFEST_FILE};

use crate::domain::Dependency;
use crate::error::ManifestError;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::debug;

/// Load the working dependency set of the project in `dir`
pub fn load_project(dir: &Path) -> Result<Vec<Dependency>, ManifestError> {
    let lock_path = dir.join(LOCK_FILE);
    if !lock_path.is_file() {
        return Err(ManifestError::lock_not_found(lock_path));
    }
    let manifest_path = dir.join(MANIFEST_FILE);
    if !manifest_path.is_file() {
        return Err(ManifestError::not_found(manifest_path));
    }

    let lock_content = std::fs::read_to_string(&lock_path)
        .map_err(|e| ManifestError::read_error(&lock_path, e))?;
    let lock = RawLock::parse(&lock_content, &lock_path)?;

    let manifest_content = std::fs::read_to_string(&manifest_path)
        .map_err(|e| ManifestError::read_error(&manifest_path, e))?;
    let manifest = RawManifest::parse(&manifest_content, &manifest_path)?;

    let dependencies = merge(&manifest, &lock);
    debug!(
        "loaded {} constraints, {} locked projects, {} dependencies to check",
        manifest.constraints.len(),
        lock.projects.len(),
        dependencies.len()
    );
    Ok(dependencies)
}

/// Merge manifest constraints with locked projects
///
/// Only constraints with a version are kept. A locked project with the same
/// name replaces the constraint entirely; locked projects without such a
/// constraint are ignored. The result is ordered by name.
pub fn merge(manifest: &RawManifest, lock: &RawLock) -> Vec<Dependency> {
    let mut projects: BTreeMap<&str, &RawProject> = manifest
        .constraints
        .iter()
        .filter(|p| !p.version.is_empty())
        .map(|p| (p.name.as_str(), p))
        .collect();

    for project in &lock.projects {
        if let Some(entry) = projects.get_mut(project.name.as_str()) {
            *entry = project;
        }
    }

    projects.into_values().map(to_dependency).collect()
}

fn to_dependency(project: &RawProject) -> Dependency {
    let non_empty = |s: &str| (!s.is_empty()).then(|| s.to_string());
    Dependency {
        name: project.name.clone(),
        source: non_empty(&project.source),
        version: project.version.clone(),
        branch: non_empty(&project.branch),
        revision: non_empty(&project.revision),
    }
}
