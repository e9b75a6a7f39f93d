//! Error types for file validation.

use std::path::PathBuf;

use serde::Serialize;
use thiserror::Error;

/// A misconfigured run. Raised before any file is processed.
#[derive(Debug, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum ConfigError {
    /// The run has nothing to validate.
    #[error("No scan targets configured")]
    NoTargets,

    /// A glob pattern (include or exclude) could not be parsed.
    #[error("Invalid glob pattern '{pattern}': {reason}")]
    InvalidPattern {
        /// The raw pattern string.
        pattern: String,
        /// Parser message.
        reason: String,
    },

    /// A log level string that is not INFO, WARNING or ERROR.
    #[error("Unknown log level '{0}' (expected INFO, WARNING or ERROR)")]
    UnknownLevel(String),

    /// An output format string that is not recognized.
    #[error("Unknown output format '{0}' (expected human or json)")]
    UnknownFormat(String),

    /// A `ROOT=PATTERN[,PATTERN...]` target specification that does not parse.
    #[error("Invalid target '{0}': expected ROOT=PATTERN[,PATTERN...]")]
    InvalidTarget(String),
}

/// The kind of access failure that prevented a file from being checked.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[non_exhaustive]
pub enum ScanErrorKind {
    /// An I/O error occurred while opening or reading the file.
    IoError,
    /// The file exceeded the configured maximum size limit.
    FileTooLarge,
    /// The file content is not valid UTF-8.
    InvalidEncoding,
    /// A directory traversal error (permission denied, loop detected, etc.).
    WalkError,
}

/// A file (or directory entry) that could not be checked at all.
///
/// Distinct from a syntax diagnostic: the content was never inspected.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[non_exhaustive]
pub struct ScanError {
    /// The path that could not be scanned.
    pub file: PathBuf,
    /// The kind of failure.
    pub kind: ScanErrorKind,
    /// Human-readable description of the failure.
    pub message: String,
}

impl ScanError {
    /// Prefix carried by every access-failure message.
    pub const MESSAGE_PREFIX: &'static str = "Error reading file";

    pub(crate) fn new(file: PathBuf, kind: ScanErrorKind, message: String) -> Self {
        Self {
            file,
            kind,
            message,
        }
    }

    /// Message used for the diagnostic that replaces a verdict on this file.
    #[must_use]
    pub fn diagnostic_message(&self) -> String {
        format!("{}: {}", Self::MESSAGE_PREFIX, self.message)
    }

    /// Format the error for human-readable output.
    #[must_use]
    pub fn format_human_readable(&self) -> String {
        format!("{}: {}", self.file.display(), self.diagnostic_message())
    }
}
