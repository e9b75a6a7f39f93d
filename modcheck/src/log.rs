//! Persistent validation log.
//!
//! Every entry is appended to the log file and echoed to a console writer
//! before [`ValidationLog::log`] returns. Both sinks are flushed on each call
//! so nothing is lost if the process dies mid-run.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::Local;
use serde::Serialize;

use crate::verdict::Severity;

/// Timestamp format used for the header and every entry.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// First line of every log file.
pub const LOG_BANNER: &str = "=== File Validation Log ===";

fn timestamp() -> String {
    Local::now().format(TIMESTAMP_FORMAT).to_string()
}

/// One appended log line.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct LogEntry {
    pub timestamp: String,
    pub level: Severity,
    pub message: String,
}

impl LogEntry {
    /// `[<timestamp>] [<LEVEL>] <message>`
    #[must_use]
    pub fn render(&self) -> String {
        format!("[{}] [{}] {}", self.timestamp, self.level, self.message)
    }
}

/// Append-only log writing to a file and a console at the same time.
pub struct ValidationLog<W: Write> {
    path: PathBuf,
    file: File,
    console: W,
    entries: Vec<LogEntry>,
}

impl<W: Write> ValidationLog<W> {
    /// Truncate (or create) the log file at `path` and write the header banner.
    ///
    /// Missing parent directories are created.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory or file cannot be created or written.
    pub fn create(path: &Path, console: W) -> io::Result<Self> {
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            fs::create_dir_all(parent)?;
        }

        let mut file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(path)?;
        writeln!(file, "{LOG_BANNER}")?;
        writeln!(file, "Validation started at: {}", timestamp())?;
        writeln!(file)?;
        file.flush()?;

        tracing::debug!(path = %path.display(), "validation log opened");
        Ok(Self {
            path: path.to_path_buf(),
            file,
            console,
            entries: Vec::new(),
        })
    }

    /// Append one entry to both sinks.
    ///
    /// # Errors
    ///
    /// Returns an error if writing or flushing either sink fails.
    pub fn log(&mut self, level: Severity, message: impl Into<String>) -> io::Result<()> {
        let entry = LogEntry {
            timestamp: timestamp(),
            level,
            message: message.into(),
        };
        let line = entry.render();

        writeln!(self.file, "{line}")?;
        self.file.flush()?;
        writeln!(self.console, "{line}")?;
        self.console.flush()?;

        self.entries.push(entry);
        Ok(())
    }

    /// # Errors
    ///
    /// See [`ValidationLog::log`].
    pub fn info(&mut self, message: impl Into<String>) -> io::Result<()> {
        self.log(Severity::Info, message)
    }

    /// # Errors
    ///
    /// See [`ValidationLog::log`].
    pub fn warning(&mut self, message: impl Into<String>) -> io::Result<()> {
        self.log(Severity::Warning, message)
    }

    /// # Errors
    ///
    /// See [`ValidationLog::log`].
    pub fn error(&mut self, message: impl Into<String>) -> io::Result<()> {
        self.log(Severity::Error, message)
    }

    /// Entries written so far, in append order.
    #[must_use]
    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub fn console(&self) -> &W {
        &self.console
    }

    #[must_use]
    pub fn into_console(self) -> W {
        self.console
    }
}
