//! Diagnostic logging setup
//!
//! Logs go to stderr so stdout carries only the report. `GOPKG_OUTDATED_LOG`
//! takes an `EnvFilter` directive and overrides the level chosen by flags.

use crate::output::Verbosity;
use tracing_subscriber::EnvFilter;

/// Environment variable holding a filter directive
pub const LOG_ENV: &str = "GOPKG_OUTDATED_LOG";

/// Filter directive used when `GOPKG_OUTDATED_LOG` is unset
pub fn default_directive(verbosity: Verbosity) -> &'static str {
    match verbosity {
        Verbosity::Quiet => "error",
        Verbosity::Normal => "warn",
        Verbosity::Verbose => "warn,gopkg_outdated=debug",
    }
}

/// Install the global subscriber; a second call is a no-op
pub fn init(verbosity: Verbosity) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbosity)));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
