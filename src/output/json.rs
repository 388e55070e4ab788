//! JSON output formatter for machine processing
//!
//! Nothing is written until the run is over; the document is then
//! printed in one piece.

use crate::domain::{CheckSummary, SkipReason, UpdateResult};
use crate::output::{OutputFormatter, Verbosity};
use serde::Serialize;
use std::io::Write;

/// JSON formatter for machine-readable output
pub struct JsonFormatter {
    /// Verbosity level affects detail in output
    verbosity: Verbosity,
}

impl JsonFormatter {
    /// Create a new JSON formatter
    pub fn new(verbosity: Verbosity) -> Self {
        Self { verbosity }
    }
}

/// JSON representation of the full result
#[derive(Serialize)]
struct JsonOutput<'a> {
    /// Number of dependencies checked
    total: usize,
    /// Dependencies with a newer version
    updates: Vec<JsonUpdate<'a>>,
    /// Everything else
    skipped: Vec<JsonSkip<'a>>,
}

/// JSON representation of an update
#[derive(Serialize)]
struct JsonUpdate<'a> {
    name: &'a str,
    current: &'a str,
    latest: &'a str,
}

/// JSON representation of a skip
#[derive(Serialize)]
struct JsonSkip<'a> {
    name: &'a str,
    current: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    latest: Option<&'a str>,
    reason: Option<&'a SkipReason>,
    /// Human-readable reason, verbose only
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
}

impl JsonFormatter {
    fn to_json<'a>(&self, summary: &'a CheckSummary) -> JsonOutput<'a> {
        let updates = summary
            .updatable()
            .map(|r| JsonUpdate {
                name: &r.name,
                current: &r.current_version,
                latest: r.latest_display(),
            })
            .collect();

        let skipped = summary
            .skipped()
            .map(|r| JsonSkip {
                name: &r.name,
                current: &r.current_version,
                latest: r.latest_version.as_deref(),
                reason: r.reason.as_ref(),
                message: match self.verbosity {
                    Verbosity::Verbose => r.reason.as_ref().map(|reason| reason.to_string()),
                    _ => None,
                },
            })
            .collect();

        JsonOutput {
            total: summary.total,
            updates,
            skipped,
        }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_header(&self, _writer: &mut dyn Write) -> std::io::Result<()> {
        Ok(())
    }

    fn format_result(&self, _result: &UpdateResult, _writer: &mut dyn Write) -> std::io::Result<()> {
        Ok(())
    }

    fn format_summary(&self, summary: &CheckSummary, writer: &mut dyn Write) -> std::io::Result<()> {
        let output = self.to_json(summary);
        serde_json::to_writer_pretty(&mut *writer, &output)?;
        writeln!(writer)
    }
}
