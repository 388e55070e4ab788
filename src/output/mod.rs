//! Output formatting for check results
//!
//! This module provides:
//! - Text output streamed row by row as results arrive
//! - JSON output for machine processing, written once at the end
//! - ConsoleSink, which connects a formatter and the progress bar to the dispatcher

mod json;
mod text;

pub use json::JsonFormatter;
pub use text::TextFormatter;

use crate::dispatcher::ResultSink;
use crate::domain::{CheckSummary, UpdateResult};
use crate::progress::Progress;
use std::io::{self, Write};

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human-readable text output
    #[default]
    Text,
    /// JSON output for machine processing
    Json,
}

/// Output verbosity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Verbosity {
    /// Minimal output
    Quiet,
    /// Normal output
    #[default]
    Normal,
    /// Detailed output with additional information
    Verbose,
}

/// Configuration for output formatting
#[derive(Debug, Clone)]
pub struct OutputConfig {
    /// Output format (text, json)
    pub format: OutputFormat,
    /// Verbosity level
    pub verbosity: Verbosity,
    /// Whether to use colors (when supported)
    pub color: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            verbosity: Verbosity::default(),
            color: true,
        }
    }
}

impl OutputConfig {
    /// Create a new output configuration
    pub fn new(format: OutputFormat, verbosity: Verbosity) -> Self {
        Self {
            format,
            verbosity,
            color: true,
        }
    }

    /// Create configuration from CLI arguments
    pub fn from_cli(json: bool, verbose: bool, quiet: bool) -> Self {
        let format = if json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        };

        let verbosity = if quiet {
            Verbosity::Quiet
        } else if verbose {
            Verbosity::Verbose
        } else {
            Verbosity::Normal
        };

        Self {
            format,
            verbosity,
            color: true,
        }
    }

    /// Whether a progress bar should be drawn
    pub fn shows_progress(&self) -> bool {
        self.format == OutputFormat::Text && self.verbosity != Verbosity::Quiet
    }
}

/// Trait for output formatters
pub trait OutputFormatter {
    /// Write whatever precedes the first result
    fn format_header(&self, writer: &mut dyn Write) -> io::Result<()>;

    /// Write one result as soon as it arrives
    fn format_result(&self, result: &UpdateResult, writer: &mut dyn Write) -> io::Result<()>;

    /// Write the end-of-run report
    fn format_summary(&self, summary: &CheckSummary, writer: &mut dyn Write) -> io::Result<()>;
}

/// Create an output formatter based on configuration
pub fn create_formatter(config: &OutputConfig) -> Box<dyn OutputFormatter> {
    match config.format {
        OutputFormat::Text => Box::new(TextFormatter::with_color(config.verbosity, config.color)),
        OutputFormat::Json => Box::new(JsonFormatter::new(config.verbosity)),
    }
}

/// Result sink that renders to a writer and drives the progress bar
///
/// The first write error is kept and every later write is skipped; callers
/// collect it with [`ConsoleSink::write_summary`].
pub struct ConsoleSink<W: Write> {
    formatter: Box<dyn OutputFormatter>,
    writer: W,
    progress: Progress,
    error: Option<io::Error>,
}

impl<W: Write> ConsoleSink<W> {
    /// Create a sink for `config` writing to `writer`
    pub fn new(config: &OutputConfig, writer: W) -> Self {
        Self::with_progress(config, writer, Progress::new(config.shows_progress()))
    }

    /// Create a sink with an explicit progress reporter
    pub fn with_progress(config: &OutputConfig, writer: W, progress: Progress) -> Self {
        Self {
            formatter: create_formatter(config),
            writer,
            progress,
            error: None,
        }
    }

    /// Write the end-of-run report and flush, surfacing any earlier write error
    pub fn write_summary(&mut self, summary: &CheckSummary) -> io::Result<()> {
        if let Some(e) = self.error.take() {
            return Err(e);
        }
        self.formatter.format_summary(summary, &mut self.writer)?;
        self.writer.flush()
    }

    /// Consume the sink and return its writer
    pub fn into_inner(self) -> W {
        self.writer
    }

    fn record(&mut self, result: io::Result<()>) {
        if let Err(e) = result {
            if self.error.is_none() {
                self.error = Some(e);
            }
        }
    }
}

impl<W: Write> ResultSink for ConsoleSink<W> {
    fn begin(&mut self, total: usize) {
        if self.error.is_some() {
            return;
        }
        let written = self.formatter.format_header(&mut self.writer);
        self.record(written);
        self.progress.start(total as u64, "Checking dependencies");
    }

    fn accept(&mut self, result: &UpdateResult, _completed: usize, _total: usize) {
        self.progress.set_message(&result.name);
        if self.error.is_none() {
            let Self {
                formatter,
                writer,
                progress,
                ..
            } = self;
            let written = progress.suspend(|| {
                formatter.format_result(result, &mut *writer)?;
                writer.flush()
            });
            self.record(written);
        }
        self.progress.inc();
    }

    fn finish(&mut self) {
        self.progress.finish_and_clear();
    }

    fn abort(&mut self) {
        self.progress.finish_and_clear();
    }
}
