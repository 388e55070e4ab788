//! Application error types using thiserror
//!
//! Error hierarchy:
//! - ManifestError: Issues reading Gopkg.toml / Gopkg.lock
//! - ResolutionError: A dependency name that is not a host+path identifier
//! - RedirectError: Vanity-import discovery failures (always recovered)
//! - FetchError / TagListError: Version-control failures
//! - CheckError: Per-dependency failures that abort the run
//! - DispatchError: Failures of the concurrent pipeline as a whole
//! - ConfigError: Issues with CLI configuration

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Messages a version-control client prints when a connection times out
const TIMEOUT_MARKERS: [&str; 2] = ["Operation timed out", "Connection timed out"];

/// Application-level error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Manifest or lock file related errors
    #[error(transparent)]
    Manifest(#[from] ManifestError),

    /// Pipeline related errors
    #[error(transparent)]
    Dispatch(#[from] DispatchError),

    /// Configuration related errors
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Errors related to manifest and lock file operations
#[derive(Error, Debug)]
pub enum ManifestError {
    /// Manifest file not found
    #[error("manifest file not found: {path}")]
    NotFound { path: PathBuf },

    /// Lock file not found
    #[error("lock file not found: {path} (run `dep ensure` first)")]
    LockNotFound { path: PathBuf },

    /// Failed to read a file
    #[error("failed to read {path}: {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// TOML parsing error
    #[error("failed to parse TOML in {path}: {message}")]
    TomlParseError { path: PathBuf, message: String },
}

/// A dependency name that cannot be turned into remote locations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("cannot resolve '{name}' to a repository: {message}")]
pub struct ResolutionError {
    pub name: String,
    pub message: String,
}

/// Errors while probing for a go-import meta tag
#[derive(Error, Debug)]
pub enum RedirectError {
    /// HTTP client could not be built
    #[error("failed to create HTTP client: {message}")]
    Client { message: String },

    /// Request failed
    #[error("request to {url} failed: {message}")]
    Request { url: String, message: String },

    /// Request exceeded the configured timeout
    #[error("request to {url} timed out")]
    Timeout { url: String },

    /// Body could not be read
    #[error("failed to read response from {url}: {message}")]
    Body { url: String, message: String },
}

/// Errors while materializing a repository
#[derive(Error, Debug)]
pub enum FetchError {
    /// Workspace directory could not be created or prepared
    #[error("failed to prepare workspace: {source}")]
    Workspace {
        #[source]
        source: std::io::Error,
    },

    /// Version-control program could not be started
    #[error("failed to run {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    /// Version-control program reported a failure
    #[error("unable to get {remote}: {message}")]
    Command { remote: String, message: String },

    /// Our own per-command deadline fired
    #[error("unable to get {remote}: Operation timed out after {}s", .after.as_secs())]
    TimedOut { remote: String, after: Duration },
}

/// Tag enumeration failed on an already materialized repository
#[derive(Error, Debug)]
#[error("unable to list tags in {path}: {message}")]
pub struct TagListError {
    pub path: PathBuf,
    pub message: String,
}

/// Outcome of fetching and listing tags for one remote
#[derive(Error, Debug)]
pub enum RepositoryError {
    /// Neither primary nor fallback could be fetched
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// Fetch succeeded but tags could not be listed
    #[error(transparent)]
    TagList(#[from] TagListError),
}

/// Per-dependency errors that are fatal for the run
#[derive(Error, Debug)]
pub enum CheckError {
    /// Dependency name is not a host+path identifier
    #[error(transparent)]
    Resolution(#[from] ResolutionError),

    /// Tags could not be listed after a successful fetch
    #[error("{name}: {source}")]
    TagList {
        name: String,
        #[source]
        source: TagListError,
    },
}

/// Errors of the dispatcher as a whole
#[derive(Error, Debug)]
pub enum DispatchError {
    /// A dependency failed in a way that aborts the run
    #[error(transparent)]
    Fatal(#[from] CheckError),

    /// A worker task panicked or was cancelled
    #[error("worker task failed: {message}")]
    TaskFailed { message: String },

    /// Not every dependency produced a result
    #[error("received {received} results for {total} dependencies")]
    Incomplete { received: usize, total: usize },
}

/// Errors related to configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Invalid duration format
    #[error("invalid duration format '{value}': expected format like '15s', '2m' or '30'")]
    InvalidDuration { value: String },

    /// Invalid path
    #[error("invalid path '{path}': {message}")]
    InvalidPath { path: PathBuf, message: String },

    /// Conflicting options
    #[error("conflicting options: {message}")]
    ConflictingOptions { message: String },
}

impl ManifestError {
    /// Creates a new NotFound error
    pub fn not_found(path: impl Into<PathBuf>) -> Self {
        ManifestError::NotFound { path: path.into() }
    }

    /// Creates a new LockNotFound error
    pub fn lock_not_found(path: impl Into<PathBuf>) -> Self {
        ManifestError::LockNotFound { path: path.into() }
    }

    /// Creates a new ReadError
    pub fn read_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ManifestError::ReadError {
            path: path.into(),
            source,
        }
    }

    /// Creates a new TomlParseError
    pub fn toml_parse_error(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        ManifestError::TomlParseError {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl ResolutionError {
    /// Creates a new ResolutionError
    pub fn new(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            message: message.into(),
        }
    }
}

impl FetchError {
    /// Creates a new Command error
    pub fn command(remote: impl Into<String>, message: impl Into<String>) -> Self {
        FetchError::Command {
            remote: remote.into(),
            message: message.into(),
        }
    }

    /// Whether the failure was a connection timeout, the only class that
    /// warrants a retry against the fallback remote
    pub fn is_connection_timeout(&self) -> bool {
        match self {
            FetchError::TimedOut { .. } => true,
            FetchError::Command { message, .. } => {
                TIMEOUT_MARKERS.iter().any(|marker| message.contains(marker))
            }
            FetchError::Workspace { .. } | FetchError::Spawn { .. } => false,
        }
    }
}

impl TagListError {
    /// Creates a new TagListError
    pub fn new(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}
