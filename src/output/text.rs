//! Text output formatter for human-readable display
//!
//! This module provides:
//! - A `Current  New  Name` table, one row per updatable dependency as it arrives
//! - Skipped dependency display with reasons (verbose)
//! - A one-line summary

use crate::domain::{CheckSummary, UpdateResult};
use crate::output::{OutputFormatter, Verbosity};
use colored::Colorize;
use std::io::Write;

/// Width of the version columns
const VERSION_WIDTH: usize = 16;

/// Text formatter for human-readable output
pub struct TextFormatter {
    /// Verbosity level
    verbosity: Verbosity,
    /// Whether to use colors
    color: bool,
}

impl TextFormatter {
    /// Create a new text formatter
    pub fn new(verbosity: Verbosity) -> Self {
        Self {
            verbosity,
            color: true,
        }
    }

    /// Create a new text formatter with color option
    pub fn with_color(verbosity: Verbosity, color: bool) -> Self {
        Self { verbosity, color }
    }

    /// Format a single update row
    fn format_update_line(&self, result: &UpdateResult, writer: &mut dyn Write) -> std::io::Result<()> {
        let current = format!("{:width$}", result.current_version, width = VERSION_WIDTH);
        let latest = format!("{:width$}", result.latest_display(), width = VERSION_WIDTH);

        if self.color {
            writeln!(
                writer,
                "{} {} {}",
                current.dimmed(),
                latest.green().bold(),
                result.name
            )
        } else {
            writeln!(writer, "{} {} {}", current, latest, result.name)
        }
    }

    /// Format the skipped list
    fn format_skipped(&self, summary: &CheckSummary, writer: &mut dyn Write) -> std::io::Result<()> {
        let skipped: Vec<&UpdateResult> = summary.skipped().collect();
        if skipped.is_empty() {
            return Ok(());
        }

        let width = skipped.iter().map(|r| r.name.len()).max().unwrap_or(0);

        writeln!(writer)?;
        if self.color {
            writeln!(writer, "{}", "Skipped:".dimmed())?;
        } else {
            writeln!(writer, "Skipped:")?;
        }
        for result in skipped {
            let name = format!("{:width$}", result.name, width = width);
            let reason = result
                .reason
                .as_ref()
                .map(|r| r.to_string())
                .unwrap_or_default();
            if self.color {
                writeln!(
                    writer,
                    "  {} {} {}",
                    name.dimmed(),
                    result.current_version.dimmed(),
                    format!("({})", reason).dimmed()
                )?;
            } else {
                writeln!(writer, "  {} {} ({})", name, result.current_version, reason)?;
            }
        }
        Ok(())
    }
}

impl OutputFormatter for TextFormatter {
    fn format_header(&self, writer: &mut dyn Write) -> std::io::Result<()> {
        let header = format!(
            "{:width$} {:width$} {}",
            "Current",
            "New",
            "Name",
            width = VERSION_WIDTH
        );
        if self.color {
            writeln!(writer, "{}", header.bold())
        } else {
            writeln!(writer, "{}", header)
        }
    }

    fn format_result(&self, result: &UpdateResult, writer: &mut dyn Write) -> std::io::Result<()> {
        if result.updatable {
            self.format_update_line(result, writer)?;
        }
        Ok(())
    }

    fn format_summary(&self, summary: &CheckSummary, writer: &mut dyn Write) -> std::io::Result<()> {
        if self.verbosity == Verbosity::Verbose {
            self.format_skipped(summary, writer)?;
        }
        if self.verbosity == Verbosity::Quiet {
            return Ok(());
        }

        let updates = summary.update_count();
        writeln!(writer)?;
        if updates == 0 {
            let line = format!("All {} dependencies are up to date", summary.total);
            if self.color {
                writeln!(writer, "{}", line.green())
            } else {
                writeln!(writer, "{}", line)
            }
        } else {
            let line = format!(
                "{} of {} dependencies can be updated",
                updates, summary.total
            );
            if self.color {
                writeln!(writer, "{}", line.yellow().bold())
            } else {
                writeln!(writer, "{}", line)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{Dependency, SkipReason};

    fn render<F>(formatter: &TextFormatter, f: F) -> String
    where
        F: FnOnce(&TextFormatter, &mut Vec<u8>) -> std::io::Result<()>,
    {
        let mut out = Vec::new();
        f(formatter, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    fn summary() -> CheckSummary {
        let bar = Dependency::new("github.com/foo/bar", "1.0.0");
        let baz = Dependency::new("github.com/foo/baz", "master");
        let mut summary = CheckSummary::new(2);
        summary.push(UpdateResult::update(&bar, "v1.2.0"));
        summary.push(UpdateResult::skip(
            &baz,
            Some("2.0.0".into()),
            SkipReason::InvalidLockedVersion("master".into()),
        ));
        summary
    }

    #[test]
    fn test_header_columns() {
        let formatter = TextFormatter::with_color(Verbosity::Normal, false);
        let out = render(&formatter, |f, w| f.format_header(w));
        let columns: Vec<&str> = out.split_whitespace().collect();
        assert_eq!(columns, vec!["Current", "New", "Name"]);
    }

    #[test]
    fn test_update_row() {
        let formatter = TextFormatter::with_color(Verbosity::Normal, false);
        let dep = Dependency::new("github.com/foo/bar", "1.0.0");
        let out = render(&formatter, |f, w| {
            f.format_result(&UpdateResult::update(&dep, "v1.2.0"), w)
        });
        let columns: Vec<&str> = out.split_whitespace().collect();
        assert_eq!(columns, vec!["1.0.0", "v1.2.0", "github.com/foo/bar"]);
    }

    #[test]
    fn test_skipped_result_prints_nothing() {
        let formatter = TextFormatter::with_color(Verbosity::Verbose, false);
        let dep = Dependency::new("github.com/foo/bar", "1.0.0");
        let result = UpdateResult::skip(&dep, Some("1.0.0".into()), SkipReason::UpToDate);
        let out = render(&formatter, |f, w| f.format_result(&result, w));
        assert!(out.is_empty());
    }

    #[test]
    fn test_summary_normal() {
        let formatter = TextFormatter::with_color(Verbosity::Normal, false);
        let out = render(&formatter, |f, w| f.format_summary(&summary(), w));
        assert!(out.contains("1 of 2 dependencies can be updated"));
        assert!(!out.contains("Skipped:"));
    }

    #[test]
    fn test_summary_verbose_lists_skipped() {
        let formatter = TextFormatter::with_color(Verbosity::Verbose, false);
        let out = render(&formatter, |f, w| f.format_summary(&summary(), w));
        assert!(out.contains("Skipped:"));
        assert!(out.contains("github.com/foo/baz"));
        assert!(out.contains("locked version 'master' is not semver"));
    }

    #[test]
    fn test_summary_quiet() {
        let formatter = TextFormatter::with_color(Verbosity::Quiet, false);
        let out = render(&formatter, |f, w| f.format_summary(&summary(), w));
        assert!(out.is_empty());
    }

    #[test]
    fn test_summary_all_up_to_date() {
        let formatter = TextFormatter::with_color(Verbosity::Normal, false);
        let out = render(&formatter, |f, w| f.format_summary(&CheckSummary::new(3), w));
        assert!(out.contains("All 3 dependencies are up to date"));
    }

    #[test]
    fn test_new_uses_color() {
        let formatter = TextFormatter::new(Verbosity::Normal);
        assert!(formatter.color);
    }
}
