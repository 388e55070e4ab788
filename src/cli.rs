//! CLI argument parsing module for gopkg-outdated

use crate::config::parse_duration;
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

/// Adapter so clap reports duration errors with our message
fn duration_arg(s: &str) -> Result<Duration, String> {
    parse_duration(s).map_err(|e| e.to_string())
}

/// Report dependencies of a dep-managed Go project that have newer tagged releases
#[derive(Parser, Debug, Clone)]
#[command(
    name = "gopkg-outdated",
    version,
    about = "Report outdated dependencies of a Gopkg.toml / Gopkg.lock project"
)]
pub struct CliArgs {
    /// Project directory containing Gopkg.toml and Gopkg.lock
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Number of dependencies checked concurrently
    #[arg(short, long, default_value_t = 10, value_parser = clap::value_parser!(u32).range(1..))]
    pub jobs: u32,

    /// Timeout for go-import redirect discovery (e.g. 15s, 1m)
    #[arg(long, default_value = "15s", value_parser = duration_arg)]
    pub redirect_timeout: Duration,

    /// Kill git commands running longer than this (e.g. 90s, 5m)
    #[arg(long, value_parser = duration_arg)]
    pub fetch_timeout: Option<Duration>,

    /// Skip go-import redirect discovery
    #[arg(long)]
    pub no_redirect: bool,

    /// Report failing dependencies as skipped instead of aborting
    #[arg(long)]
    pub keep_going: bool,

    /// Git executable to use
    #[arg(long, default_value = "git", value_name = "PROGRAM")]
    pub git: String,

    // Output options
    /// Output results in JSON format
    #[arg(long)]
    pub json: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Enable quiet mode - minimal output
    #[arg(short, long)]
    pub quiet: bool,
}
