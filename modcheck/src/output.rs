//! Shared output formatting for validation reports.
//!
//! Provides the human-readable summary, JSON, and the cumulative results
//! record. Color/terminal formatting is excluded from this module; that
//! concern belongs to the CLI layer.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;

use crate::report::{RunStatus, ValidationReport};

const RULE_WIDTH: usize = 50;

/// Headline printed at the end of the summary for each status.
#[must_use]
pub fn status_headline(status: RunStatus) -> &'static str {
    match status {
        RunStatus::Passed => "ALL FILES VALIDATED SUCCESSFULLY!",
        RunStatus::PassedWithWarnings => "VALIDATION COMPLETED WITH WARNINGS",
        RunStatus::Failed => "VALIDATION FAILED WITH ERRORS",
    }
}

/// Format a `ValidationReport` as JSON to a writer.
///
/// # Errors
///
/// Returns an error if serialization or writing fails.
pub fn write_json(report: &ValidationReport, writer: &mut dyn Write) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(report)?;
    writeln!(writer, "{json}")?;
    Ok(())
}

/// Format a `ValidationReport` as a human-readable summary to a writer.
///
/// Errors and warnings are itemized in the order they were produced.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn write_human(report: &ValidationReport, writer: &mut dyn Write) -> anyhow::Result<()> {
    writeln!(writer, "{}", "=".repeat(RULE_WIDTH))?;
    writeln!(writer, "VALIDATION SUMMARY")?;
    writeln!(writer, "{}", "=".repeat(RULE_WIDTH))?;
    writeln!(writer, "Files validated: {}", report.validated_files)?;
    writeln!(writer, "Errors found: {}", report.errors_count())?;
    writeln!(writer, "Warnings found: {}", report.warnings_count())?;

    if !report.errors.is_empty() {
        writeln!(writer)?;
        writeln!(writer, "ERRORS:")?;
        for error in &report.errors {
            writeln!(writer, "  {error}")?;
        }
    }

    if !report.warnings.is_empty() {
        writeln!(writer)?;
        writeln!(writer, "WARNINGS:")?;
        for warning in &report.warnings {
            writeln!(writer, "  {warning}")?;
        }
    }

    writeln!(writer)?;
    writeln!(writer, "{}", status_headline(report.status))?;
    Ok(())
}

/// Render the summary into a string (one summary line per `\n`).
///
/// # Errors
///
/// Returns an error if formatting the summary fails.
pub fn render_human(report: &ValidationReport) -> anyhow::Result<String> {
    let mut buf = Vec::new();
    write_human(report, &mut buf)?;
    Ok(String::from_utf8(buf)?)
}

/// Write the fixed-shape results block appended to the cumulative results file.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn write_results_record(report: &ValidationReport, writer: &mut dyn Write) -> anyhow::Result<()> {
    writeln!(writer)?;
    writeln!(writer, "File Validation Results:")?;
    writeln!(writer, "  Files validated: {}", report.validated_files)?;
    writeln!(writer, "  Errors: {}", report.errors_count())?;
    writeln!(writer, "  Warnings: {}", report.warnings_count())?;
    writeln!(writer, "  Status: {}", report.status)?;
    Ok(())
}

/// Append the results block to `path`, creating the file and its parents if needed.
///
/// Earlier blocks are never rewritten, so repeated runs accumulate history.
///
/// # Errors
///
/// Returns an error if the file cannot be opened or written.
pub fn append_results_record(report: &ValidationReport, path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent)?;
    }
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    write_results_record(report, &mut file)?;
    file.flush()?;
    Ok(())
}
