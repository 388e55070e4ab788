//! Run configuration derived from command-line arguments

use crate::cli::CliArgs;
use crate::dispatcher::DispatchConfig;
use crate::error::ConfigError;
use crate::output::OutputConfig;
use crate::resolver::DEFAULT_TIMEOUT;
use std::path::PathBuf;
use std::time::Duration;

/// Parse a duration: `Ns` (seconds), `Nm` (minutes) or a bare number of seconds
pub fn parse_duration(s: &str) -> Result<Duration, ConfigError> {
    let s = s.trim();
    let invalid = || ConfigError::InvalidDuration {
        value: s.to_string(),
    };

    let (num_str, multiplier) = if let Some(n) = s.strip_suffix('s') {
        (n, 1)
    } else if let Some(n) = s.strip_suffix('m') {
        (n, 60)
    } else {
        (s, 1)
    };

    let num: u64 = num_str.parse().map_err(|_| invalid())?;
    let seconds = num.checked_mul(multiplier).ok_or_else(invalid)?;
    if seconds == 0 {
        return Err(invalid());
    }
    Ok(Duration::from_secs(seconds))
}

/// Everything a run needs, independent of how it was requested
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory holding Gopkg.toml and Gopkg.lock
    pub project_dir: PathBuf,
    /// Probe import paths for go-import redirects
    pub redirect: bool,
    /// Timeout of one redirect probe
    pub redirect_timeout: Duration,
    /// Deadline of one git invocation, if any
    pub fetch_timeout: Option<Duration>,
    /// Git executable
    pub git_program: String,
    /// Dispatcher settings
    pub dispatch: DispatchConfig,
    /// Rendering settings
    pub output: OutputConfig,
}

impl Config {
    /// Validate CLI arguments and build a configuration
    pub fn from_cli(args: &CliArgs) -> Result<Self, ConfigError> {
        if args.verbose && args.quiet {
            return Err(ConfigError::ConflictingOptions {
                message: "--verbose cannot be used with --quiet".to_string(),
            });
        }
        if !args.path.is_dir() {
            return Err(ConfigError::InvalidPath {
                path: args.path.clone(),
                message: "not a directory".to_string(),
            });
        }

        Ok(Self {
            project_dir: args.path.clone(),
            redirect: !args.no_redirect,
            redirect_timeout: args.redirect_timeout,
            fetch_timeout: args.fetch_timeout,
            git_program: args.git.clone(),
            dispatch: DispatchConfig {
                concurrency: args.jobs as usize,
                keep_going: args.keep_going,
            },
            output: OutputConfig::from_cli(args.json, args.verbose, args.quiet),
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            project_dir: PathBuf::from("."),
            redirect: true,
            redirect_timeout: DEFAULT_TIMEOUT,
            fetch_timeout: None,
            git_program: "git".to_string(),
            dispatch: DispatchConfig::default(),
            output: OutputConfig::default(),
        }
    }
}
