//! Per-file validation results.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::Serialize;

use crate::error::ConfigError;
use crate::strategy::{FileFormat, classify};

/// Severity of a diagnostic, also used as the level of a log entry.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[serde(rename_all = "UPPERCASE")]
pub enum Severity {
    Info,
    Warning,
    Error,
}

impl Severity {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Info => "INFO",
            Self::Warning => "WARNING",
            Self::Error => "ERROR",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Severity {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "INFO" => Ok(Self::Info),
            "WARNING" => Ok(Self::Warning),
            "ERROR" => Ok(Self::Error),
            _ => Err(ConfigError::UnknownLevel(s.to_owned())),
        }
    }
}

/// A file selected for checking, with the format it was classified as.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ValidationTarget {
    pub path: PathBuf,
    pub detected_format: FileFormat,
}

impl ValidationTarget {
    /// Classify `path` by extension.
    #[must_use]
    pub fn new(path: &Path) -> Self {
        Self {
            path: path.to_path_buf(),
            detected_format: classify(path),
        }
    }
}

/// One reported issue.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Diagnostic {
    pub severity: Severity,
    pub message: String,
    /// 1-indexed line, when the checker can locate the issue.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<usize>,
    /// 1-indexed column, when the underlying parser reports one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub column: Option<usize>,
}

impl Diagnostic {
    #[must_use]
    pub fn new(severity: Severity, message: impl Into<String>) -> Self {
        Self {
            severity,
            message: message.into(),
            line: None,
            column: None,
        }
    }

    #[must_use]
    pub fn error(message: impl Into<String>) -> Self {
        Self::new(Severity::Error, message)
    }

    #[must_use]
    pub fn warning(message: impl Into<String>) -> Self {
        Self::new(Severity::Warning, message)
    }

    #[must_use]
    pub fn at_line(mut self, line: usize) -> Self {
        self.line = Some(line);
        self
    }

    #[must_use]
    pub fn at_position(mut self, line: usize, column: usize) -> Self {
        self.line = Some(line);
        self.column = Some(column);
        self
    }

    /// `{file}:{line}: {message}` when a line is known, `{file}: {message}` otherwise.
    #[must_use]
    pub fn format_human_readable(&self, file: &Path) -> String {
        match self.line {
            Some(line) => format!("{}:{line}: {}", file.display(), self.message),
            None => format!("{}: {}", file.display(), self.message),
        }
    }
}

/// The result of checking one file.
///
/// `ok` is derived from the diagnostics and holds exactly when none of them is
/// an ERROR.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Verdict {
    pub target: ValidationTarget,
    pub ok: bool,
    pub diagnostics: Vec<Diagnostic>,
}

impl Verdict {
    #[must_use]
    pub fn new(target: ValidationTarget, diagnostics: Vec<Diagnostic>) -> Self {
        let ok = !diagnostics.iter().any(|d| d.severity == Severity::Error);
        Self {
            target,
            ok,
            diagnostics,
        }
    }

    /// Whether the file produced no diagnostics at all.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }

    #[must_use]
    pub fn count(&self, severity: Severity) -> usize {
        self.diagnostics
            .iter()
            .filter(|d| d.severity == severity)
            .count()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    fn target() -> ValidationTarget {
        ValidationTarget::new(Path::new("mod/scripts/player.ws"))
    }

    #[test]
    fn test_severity_parse_is_case_insensitive() {
        assert_eq!("warning".parse::<Severity>().unwrap(), Severity::Warning);
        assert_eq!("ERROR".parse::<Severity>().unwrap(), Severity::Error);
    }

    #[test]
    fn test_severity_parse_rejects_unknown_level() {
        let err = "DEBUG".parse::<Severity>().unwrap_err();
        assert_eq!(err, ConfigError::UnknownLevel("DEBUG".to_owned()));
    }

    #[test]
    fn test_verdict_ok_ignores_warnings() {
        let verdict = Verdict::new(target(), vec![Diagnostic::warning("style")]);
        assert!(verdict.ok);
        assert!(!verdict.is_clean());
        assert_eq!(verdict.count(Severity::Warning), 1);
    }

    #[test]
    fn test_verdict_not_ok_with_error() {
        let verdict = Verdict::new(
            target(),
            vec![Diagnostic::warning("style"), Diagnostic::error("broken")],
        );
        assert!(!verdict.ok);
        assert_eq!(verdict.count(Severity::Error), 1);
    }

    #[test]
    fn test_format_with_and_without_line() {
        let path = Path::new("a.ws");
        assert_eq!(
            Diagnostic::warning("Missing semicolon")
                .at_line(4)
                .format_human_readable(path),
            "a.ws:4: Missing semicolon"
        );
        assert_eq!(
            Diagnostic::error("Unreadable").format_human_readable(path),
            "a.ws: Unreadable"
        );
    }

    #[test]
    fn test_severity_serializes_uppercase() {
        let json = serde_json::to_string(&Severity::Warning).unwrap();
        assert_eq!(json, "\"WARNING\"");
    }
}
