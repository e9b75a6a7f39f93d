//! Run accumulation and report types.

use std::fmt;

use serde::Serialize;

use crate::verdict::{Severity, Verdict};

/// Overall outcome of a run.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RunStatus {
    Passed,
    PassedWithWarnings,
    Failed,
}

impl RunStatus {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Passed => "PASSED",
            Self::PassedWithWarnings => "PASSED_WITH_WARNINGS",
            Self::Failed => "FAILED",
        }
    }

    /// Process exit code: non-zero only for `Failed`.
    #[must_use]
    pub fn exit_code(self) -> u8 {
        match self {
            Self::Passed | Self::PassedWithWarnings => 0,
            Self::Failed => 1,
        }
    }
}

impl fmt::Display for RunStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Mutable accumulator for a single run.
///
/// Messages are kept in the order they were recorded.
#[derive(Debug, Clone, Default)]
pub struct RunState {
    pub validated_count: usize,
    pub errors: Vec<String>,
    pub warnings: Vec<String>,
    pub verdicts: Vec<Verdict>,
}

impl RunState {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one validated file and file its diagnostics under errors/warnings.
    pub fn record_verdict(&mut self, verdict: Verdict) {
        self.validated_count += 1;
        for diagnostic in &verdict.diagnostics {
            let message = diagnostic.format_human_readable(&verdict.target.path);
            self.record(diagnostic.severity, message);
        }
        self.verdicts.push(verdict);
    }

    /// Record a message that is not tied to a verdict (missing root, walk failure).
    pub fn record(&mut self, severity: Severity, message: String) {
        match severity {
            Severity::Error => self.errors.push(message),
            Severity::Warning => self.warnings.push(message),
            Severity::Info => {}
        }
    }

    #[must_use]
    pub fn status(&self) -> RunStatus {
        if !self.errors.is_empty() {
            RunStatus::Failed
        } else if !self.warnings.is_empty() {
            RunStatus::PassedWithWarnings
        } else {
            RunStatus::Passed
        }
    }

    /// Freeze the accumulator into a report.
    #[must_use]
    pub fn into_report(self) -> ValidationReport {
        let status = self.status();
        ValidationReport {
            validated_files: self.validated_count,
            status,
            errors: self.errors,
            warnings: self.warnings,
            verdicts: self.verdicts,
        }
    }
}

/// Result of a validation run.
#[derive(Debug, Clone, Serialize)]
#[non_exhaustive]
pub struct ValidationReport {
    /// Number of classified files that were checked (including unreadable ones).
    pub validated_files: usize,
    pub status: RunStatus,
    /// Every ERROR message, in the order produced.
    pub errors: Vec<String>,
    /// Every WARNING message, in the order produced.
    pub warnings: Vec<String>,
    /// One verdict per checked file, in processing order.
    pub verdicts: Vec<Verdict>,
}

impl ValidationReport {
    #[must_use]
    pub fn errors_count(&self) -> usize {
        self.errors.len()
    }

    #[must_use]
    pub fn warnings_count(&self) -> usize {
        self.warnings.len()
    }

    /// Whether the run should exit successfully.
    #[must_use]
    pub fn ok(&self) -> bool {
        self.status != RunStatus::Failed
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::verdict::{Diagnostic, ValidationTarget};
    use std::path::Path;

    fn verdict(path: &str, diagnostics: Vec<Diagnostic>) -> Verdict {
        Verdict::new(ValidationTarget::new(Path::new(path)), diagnostics)
    }

    #[test]
    fn test_empty_run_passes() {
        let report = RunState::new().into_report();
        assert_eq!(report.status, RunStatus::Passed);
        assert_eq!(report.validated_files, 0);
        assert!(report.ok());
    }

    #[test]
    fn test_warnings_only_pass_with_warnings() {
        let mut state = RunState::new();
        state.record_verdict(verdict("a.json", vec![]));
        state.record_verdict(verdict(
            "b.ws",
            vec![Diagnostic::warning("Missing semicolon after variable declaration").at_line(3)],
        ));
        let report = state.into_report();
        assert_eq!(report.validated_files, 2);
        assert_eq!(report.status, RunStatus::PassedWithWarnings);
        assert_eq!(
            report.warnings,
            vec!["b.ws:3: Missing semicolon after variable declaration".to_owned()]
        );
        assert_eq!(report.status.exit_code(), 0);
    }

    #[test]
    fn test_any_error_fails() {
        let mut state = RunState::new();
        state.record_verdict(verdict("b.ws", vec![Diagnostic::warning("style")]));
        state.record(Severity::Error, "Directory not found: mod/config".to_owned());
        assert_eq!(state.status(), RunStatus::Failed);
        assert_eq!(state.validated_count, 1);
        assert_eq!(state.status().exit_code(), 1);
    }

    #[test]
    fn test_info_messages_are_not_counted() {
        let mut state = RunState::new();
        state.record(Severity::Info, "note".to_owned());
        assert!(state.errors.is_empty());
        assert!(state.warnings.is_empty());
    }

    #[test]
    fn test_messages_keep_recording_order() {
        let mut state = RunState::new();
        state.record_verdict(verdict(
            "x.json",
            vec![Diagnostic::error("Invalid JSON: one")],
        ));
        state.record(Severity::Error, "two".to_owned());
        state.record_verdict(verdict("y.xml", vec![Diagnostic::error("Invalid XML: three")]));
        assert_eq!(
            state.errors,
            vec![
                "x.json: Invalid JSON: one".to_owned(),
                "two".to_owned(),
                "y.xml: Invalid XML: three".to_owned()
            ]
        );
    }

    #[test]
    fn test_status_serializes_screaming_case() {
        assert_eq!(
            serde_json::to_string(&RunStatus::PassedWithWarnings).unwrap(),
            "\"PASSED_WITH_WARNINGS\""
        );
        assert_eq!(RunStatus::Failed.to_string(), "FAILED");
    }
}
