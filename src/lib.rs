//! gopkg-outdated - find newer tagged releases of dep-managed Go dependencies
//!
//! This library provides the core functionality:
//! - Reading Gopkg.toml and Gopkg.lock into one dependency set
//! - Resolving each dependency to SSH / HTTPS remotes, following go-import redirects
//! - Listing upstream tags through git and comparing them as semantic versions
//! - Checking dependencies concurrently and streaming the results

pub mod cli;
pub mod config;
pub mod dispatcher;
pub mod domain;
pub mod error;
pub mod logging;
pub mod manifest;
pub mod output;
pub mod progress;
pub mod resolver;
pub mod update;
pub mod vcs;
