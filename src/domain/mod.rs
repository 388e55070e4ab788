//! Core domain models for gopkg-outdated
//!
//! This module contains the fundamental types used throughout the application:
//! - Dependencies merged from Gopkg.toml and Gopkg.lock
//! - Remote locations a dependency is fetched from
//! - Version sets parsed from repository tags
//! - Per-dependency results and the run summary

mod dependency;
mod remote;
mod summary;
mod update_result;
mod version_set;

pub use dependency::Dependency;
pub use remote::RemoteLocation;
pub use summary::CheckSummary;
pub use update_result::{SkipReason, UpdateResult};
pub use version_set::{compare_precedence, parse_version, TaggedVersion, VersionSet};
