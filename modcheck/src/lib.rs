//! # modcheck
//!
//! Syntax validator for the files that make up a Witcher 3 mod tree: JSON and
//! XML configuration, and WitcherScript (`.ws`) sources.
//!
//! The crate separates **checkers** (pure functions from content to
//! diagnostics, see [`format`]) from the **runner** that walks directories,
//! classifies files, and records verdicts in a [`ValidationLog`].
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use modcheck::{ScanTarget, ValidationConfig, ValidationLog, output, run};
//!
//! let mut config = ValidationConfig::default();
//! config.targets = vec![
//!     ScanTarget::new("mod/config", &["*.json", "*.xml"]),
//!     ScanTarget::new("mod/scripts", &["*.ws"]),
//! ];
//!
//! let mut log = ValidationLog::create("logs/validation.log".as_ref(), std::io::stdout())?;
//! let report = run(&config, &mut log)?;
//! output::append_results_record(&report, "logs/test_results.log".as_ref())?;
//! println!("Status: {}", report.status);
//! # Ok::<(), anyhow::Error>(())
//! ```

mod config;
mod error;
pub mod format;
mod log;
pub mod output;
mod report;
mod runner;
pub mod strategy;
mod verdict;

use std::io::Write;

pub use config::{
    CompiledConfig, CompiledTarget, ScanTarget, ScriptPolicy, ValidationConfig, default_targets,
};
pub use error::{ConfigError, ScanError, ScanErrorKind};
pub use log::{LOG_BANNER, LogEntry, TIMESTAMP_FORMAT, ValidationLog};
pub use report::{RunState, RunStatus, ValidationReport};
pub use runner::ValidationRunner;
pub use strategy::{FileFormat, classify};
pub use verdict::{Diagnostic, Severity, ValidationTarget, Verdict};

/// Validate every target of `config`, writing entries to `log`.
///
/// The configuration is compiled first, so a bad pattern fails before any
/// file is read. Per-file problems (syntax errors, unreadable files, missing
/// roots) are recorded in the returned report and never abort the run.
///
/// # Errors
///
/// Returns a [`ConfigError`] (wrapped in `anyhow`) if the configuration is
/// invalid, or an I/O error if the log cannot be written.
pub fn run<W: Write>(
    config: &ValidationConfig,
    log: &mut ValidationLog<W>,
) -> anyhow::Result<ValidationReport> {
    let compiled = config.compile()?;
    run_compiled(&compiled, log)
}

/// Like [`run`], for a configuration that has already been compiled.
///
/// # Errors
///
/// Returns an error if the log cannot be written.
pub fn run_compiled<W: Write>(
    config: &CompiledConfig,
    log: &mut ValidationLog<W>,
) -> anyhow::Result<ValidationReport> {
    tracing::debug!(targets = config.targets.len(), "starting validation run");
    ValidationRunner::new(config, log).run()
}
