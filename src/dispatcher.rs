//! Concurrent dispatch of dependency checks
//!
//! This module provides:
//! - Bounded fan-out: one task per dependency behind a semaphore
//! - A single consumer that sees results in completion order
//! - Fail-fast handling of fatal errors, or per-dependency skips with keep-going

use crate::config::Config;
use crate::domain::{CheckSummary, Dependency, UpdateResult};
use crate::error::{CheckError, DispatchError, RedirectError};
use crate::resolver::{HttpClient, MetaTagProbe, RedirectProbe, SourceResolver};
use crate::update::UpdateChecker;
use crate::vcs::{GitClient, RepositoryFetcher};
use std::sync::Arc;
use tokio::sync::{mpsc, Semaphore};
use tokio::task::JoinSet;
use tracing::{debug, error};

/// Default number of dependencies checked at once
pub const DEFAULT_CONCURRENCY: usize = 10;

/// Receives results as the dispatcher produces them
pub trait ResultSink {
    /// Called once before any result, with the number of dependencies
    fn begin(&mut self, total: usize);

    /// Called once per dependency; `completed` counts from 1
    fn accept(&mut self, result: &UpdateResult, completed: usize, total: usize);

    /// Called after the last result, not called when the run aborts
    fn finish(&mut self);

    /// Called instead of `finish` when the run fails
    fn abort(&mut self) {}
}

/// Sink that discards everything
pub struct NullSink;

impl ResultSink for NullSink {
    fn begin(&mut self, _total: usize) {}
    fn accept(&mut self, _result: &UpdateResult, _completed: usize, _total: usize) {}
    fn finish(&mut self) {}
}

/// Dispatcher settings
#[derive(Debug, Clone)]
pub struct DispatchConfig {
    /// Maximum number of dependencies checked at once
    pub concurrency: usize,
    /// Degrade fatal per-dependency errors to skipped results
    pub keep_going: bool,
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            concurrency: DEFAULT_CONCURRENCY,
            keep_going: false,
        }
    }
}

/// Runs update checks for a whole dependency set
pub struct Dispatcher {
    checker: UpdateChecker,
    config: DispatchConfig,
}

impl Dispatcher {
    /// Create a dispatcher around an existing checker
    pub fn new(checker: UpdateChecker, config: DispatchConfig) -> Self {
        Self { checker, config }
    }

    /// Build the production pipeline described by `config`
    pub fn from_config(config: &Config) -> Result<Self, RedirectError> {
        let probe: Option<Arc<dyn RedirectProbe>> = if config.redirect {
            let client = HttpClient::with_timeout(config.redirect_timeout)?;
            Some(Arc::new(MetaTagProbe::new(client)))
        } else {
            None
        };
        let git = GitClient::new()
            .with_program(config.git_program.clone())
            .with_timeout(config.fetch_timeout);

        let checker = UpdateChecker::new(
            SourceResolver::new(probe),
            RepositoryFetcher::new(Arc::new(git)),
        );
        Ok(Self::new(checker, config.dispatch.clone()))
    }

    /// Dispatcher settings in use
    pub fn config(&self) -> &DispatchConfig {
        &self.config
    }

    /// Check every dependency and feed results to `sink` as they complete
    ///
    /// Returns once every dependency produced exactly one result. In
    /// fail-fast mode the first fatal error cancels the remaining tasks.
    pub async fn run(
        &self,
        dependencies: Vec<Dependency>,
        sink: &mut dyn ResultSink,
    ) -> Result<CheckSummary, DispatchError> {
        let total = dependencies.len();
        let mut summary = CheckSummary::new(total);
        sink.begin(total);

        let semaphore = Arc::new(Semaphore::new(self.config.concurrency.max(1)));
        let (tx, mut rx) = mpsc::channel::<Result<UpdateResult, CheckError>>(total.max(1));
        let mut tasks = JoinSet::new();

        for dependency in dependencies {
            let checker = self.checker.clone();
            let semaphore = Arc::clone(&semaphore);
            let tx = tx.clone();
            let keep_going = self.config.keep_going;

            tasks.spawn(async move {
                // Closed only when the dispatcher is gone
                let Ok(_permit) = semaphore.acquire_owned().await else {
                    return;
                };
                debug!("checking {}", dependency);
                let outcome = match checker.check(&dependency).await {
                    Err(e) if keep_going => {
                        error!("{}", e);
                        Ok(UpdateResult::skip(&dependency, None, e.into_skip_reason()))
                    }
                    other => other,
                };
                let _ = tx.send(outcome).await;
            });
        }
        drop(tx);

        while let Some(outcome) = rx.recv().await {
            match outcome {
                Ok(result) => {
                    let completed = summary.completed() + 1;
                    sink.accept(&result, completed, total);
                    summary.push(result);
                }
                Err(e) => {
                    tasks.abort_all();
                    sink.abort();
                    return Err(DispatchError::Fatal(e));
                }
            }
        }

        while let Some(joined) = tasks.join_next().await {
            if let Err(e) = joined {
                sink.abort();
                return Err(DispatchError::TaskFailed {
                    message: e.to_string(),
                });
            }
        }

        if !summary.is_complete() {
            sink.abort();
            return Err(DispatchError::Incomplete {
                received: summary.completed(),
                total,
            });
        }

        sink.finish();
        Ok(summary)
    }
}
