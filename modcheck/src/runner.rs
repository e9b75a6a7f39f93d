//! Pipeline driver: walk, classify, check, record.

use std::io::Write;
use std::path::{Path, PathBuf};

use crate::config::{CompiledConfig, CompiledTarget};
use crate::format;
use crate::log::ValidationLog;
use crate::output::render_human;
use crate::report::{RunState, ValidationReport};
use crate::strategy::FileFormat;
use crate::strategy::fs::{read_file_bounded, walk};
use crate::verdict::{Diagnostic, Severity, ValidationTarget, Verdict};

/// Drives one validation run over a compiled configuration.
///
/// Per-file failures never abort the run: they are turned into diagnostics and
/// the runner moves on. Only a failure of the log sink itself is returned.
pub struct ValidationRunner<'a, W: Write> {
    config: &'a CompiledConfig,
    log: &'a mut ValidationLog<W>,
    state: RunState,
}

impl<'a, W: Write> ValidationRunner<'a, W> {
    #[must_use]
    pub fn new(config: &'a CompiledConfig, log: &'a mut ValidationLog<W>) -> Self {
        Self {
            config,
            log,
            state: RunState::new(),
        }
    }

    /// Accumulated state so far.
    #[must_use]
    pub fn state(&self) -> &RunState {
        &self.state
    }

    /// Validate every configured target, then summarize.
    ///
    /// # Errors
    ///
    /// Returns an error only if the log cannot be written.
    pub fn run(mut self) -> anyhow::Result<ValidationReport> {
        let config = self.config;
        for target in &config.targets {
            self.validate_target(target)?;
        }
        self.finish()
    }

    /// Walk one target root and check every matching file, in path order.
    ///
    /// A missing root is logged and recorded as an error.
    ///
    /// # Errors
    ///
    /// Returns an error only if the log cannot be written.
    pub fn validate_target(&mut self, target: &CompiledTarget) -> anyhow::Result<()> {
        let config = self.config;
        let root = &target.root;
        if !root.is_dir() {
            self.report_error(format!("Directory not found: {}", root.display()))?;
            return Ok(());
        }
        self.log
            .info(format!("Validating files in: {}", root.display()))?;

        let mut files: Vec<PathBuf> = Vec::new();
        for item in walk(root, &target.patterns, &config.walk) {
            match item {
                Ok(path) => files.push(path),
                Err(scan_err) => self.report_error(scan_err.format_human_readable())?,
            }
        }
        files.sort();
        files.dedup();
        tracing::debug!(root = %root.display(), files = files.len(), "walk complete");

        for path in &files {
            self.validate_file(path)?;
        }
        Ok(())
    }

    /// Classify, read and check a single file.
    ///
    /// Files of unknown format are skipped without a verdict.
    ///
    /// # Errors
    ///
    /// Returns an error only if the log cannot be written.
    pub fn validate_file(&mut self, path: &Path) -> anyhow::Result<()> {
        let target = ValidationTarget::new(path);
        if target.detected_format == FileFormat::Unknown {
            tracing::debug!(path = %path.display(), "skipping file of unknown format");
            return Ok(());
        }

        let verdict = match read_file_bounded(path, self.config.max_file_size) {
            Ok(content) => format::check(target, &content, self.config.script_policy),
            Err(scan_err) => {
                tracing::warn!(path = %path.display(), kind = ?scan_err.kind, "file could not be read");
                Some(Verdict::new(
                    target,
                    vec![Diagnostic::error(scan_err.diagnostic_message())],
                ))
            }
        };

        if let Some(verdict) = verdict {
            self.record_verdict(verdict)?;
        }
        Ok(())
    }

    fn record_verdict(&mut self, verdict: Verdict) -> anyhow::Result<()> {
        let path = &verdict.target.path;
        if verdict.is_clean() {
            self.log.info(format!(
                "{} - Valid {}",
                path.display(),
                verdict.target.detected_format
            ))?;
        } else {
            for diagnostic in &verdict.diagnostics {
                self.log
                    .log(diagnostic.severity, diagnostic.format_human_readable(path))?;
            }
        }
        self.state.record_verdict(verdict);
        Ok(())
    }

    fn report_error(&mut self, message: String) -> anyhow::Result<()> {
        self.log.error(message.clone())?;
        self.state.record(Severity::Error, message);
        Ok(())
    }

    /// Freeze the run state and log the summary, one entry per line.
    ///
    /// # Errors
    ///
    /// Returns an error only if the log cannot be written.
    pub fn finish(self) -> anyhow::Result<ValidationReport> {
        let report = self.state.into_report();
        for line in render_human(&report)?.lines().filter(|l| !l.is_empty()) {
            self.log.info(line)?;
        }
        tracing::debug!(status = %report.status, "validation finished");
        Ok(report)
    }
}
