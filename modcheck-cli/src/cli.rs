use std::fmt;
use std::io;
use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use modcheck::{
    ConfigError, RunStatus, ScanTarget, ScriptPolicy, ValidationConfig, ValidationLog,
    ValidationReport, output, run_compiled,
};

use crate::logging;

/// How the final report is printed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Log mirror and summary on stdout.
    #[default]
    Human,
    /// Pretty JSON report on stdout; the log mirror moves to stderr.
    Json,
}

impl FromStr for OutputFormat {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "human" => Ok(Self::Human),
            "json" => Ok(Self::Json),
            _ => Err(ConfigError::UnknownFormat(s.to_owned())),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Human => f.write_str("human"),
            Self::Json => f.write_str("json"),
        }
    }
}

#[derive(Parser, Debug)]
#[command(
    name = "modcheck",
    version,
    about = "Validate JSON, XML and WitcherScript files in a mod tree"
)]
pub struct Cli {
    /// Directory to scan and the file globs to collect in it, e.g. `mod/config=*.json,*.xml`.
    /// Repeatable. Defaults to `mod/config`, `config` and `mod/scripts`.
    #[arg(long = "target", value_name = "ROOT=PATTERN[,PATTERN...]")]
    pub targets: Vec<ScanTarget>,

    /// Glob of paths to skip (matched against the full path and the file name). Repeatable.
    #[arg(long, value_name = "GLOB")]
    pub exclude: Vec<String>,

    /// Log file, truncated at the start of every run.
    #[arg(long, default_value = "logs/validation.log")]
    pub log_file: PathBuf,

    /// Cumulative results file; one block is appended per run.
    #[arg(long, default_value = "logs/test_results.log")]
    pub results_file: PathBuf,

    /// Report format: human or json.
    #[arg(long, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,

    /// Treat unbalanced braces/parentheses in scripts as errors.
    #[arg(long)]
    pub strict_scripts: bool,

    /// Follow symbolic links while walking.
    #[arg(long)]
    pub follow_links: bool,

    /// Largest file to read, in bytes.
    #[arg(long, value_name = "BYTES")]
    pub max_file_size: Option<u64>,

    /// Deepest directory level to walk.
    #[arg(long)]
    pub max_depth: Option<usize>,

    /// Disable colored output.
    #[arg(long)]
    pub no_color: bool,

    /// Increase diagnostic output on stderr (-v debug, -vv trace).
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    /// Build the library configuration from the parsed arguments.
    #[must_use]
    pub fn validation_config(&self) -> ValidationConfig {
        let mut config = ValidationConfig::with_default_targets();
        if !self.targets.is_empty() {
            config.targets.clone_from(&self.targets);
        }
        config.exclude.clone_from(&self.exclude);
        config.follow_links = self.follow_links;
        if let Some(size) = self.max_file_size {
            config.max_file_size = size;
        }
        if let Some(depth) = self.max_depth {
            config.max_depth = depth;
        }
        if self.strict_scripts {
            config.script_policy = ScriptPolicy::Strict;
        }
        config
    }
}

fn open_log<W: io::Write>(cli: &Cli, console: W) -> Result<ValidationLog<W>> {
    ValidationLog::create(&cli.log_file, console)
        .with_context(|| format!("failed to open log file {}", cli.log_file.display()))
}

/// Parse arguments, run the validation and persist the results record.
///
/// # Errors
///
/// Returns an error for configuration problems or if the log/results files
/// cannot be written. Validation failures are reported through the status.
pub fn run() -> Result<RunStatus> {
    let cli = Cli::parse();
    if cli.no_color {
        logging::disable_colors();
    }
    logging::init_tracing(cli.verbose);

    let compiled = cli.validation_config().compile()?;

    let report: ValidationReport = match cli.format {
        OutputFormat::Human => {
            let mut log = open_log(&cli, io::stdout())?;
            run_compiled(&compiled, &mut log)?
        }
        OutputFormat::Json => {
            let mut log = open_log(&cli, io::stderr())?;
            let report = run_compiled(&compiled, &mut log)?;
            output::write_json(&report, &mut io::stdout().lock())?;
            report
        }
    };

    output::append_results_record(&report, &cli.results_file).with_context(|| {
        format!(
            "failed to append results to {}",
            cli.results_file.display()
        )
    })?;

    let line = logging::status_line(report.status);
    match cli.format {
        OutputFormat::Human => println!("{line}"),
        OutputFormat::Json => eprintln!("{line}"),
    }
    Ok(report.status)
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        let mut argv = vec!["modcheck"];
        argv.extend_from_slice(args);
        Cli::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_defaults_use_conventional_layout() {
        let cli = parse(&[]);
        assert_eq!(cli.log_file, PathBuf::from("logs/validation.log"));
        assert_eq!(cli.results_file, PathBuf::from("logs/test_results.log"));
        assert_eq!(cli.format, OutputFormat::Human);

        let config = cli.validation_config();
        assert_eq!(config.targets, modcheck::default_targets());
        assert_eq!(config.script_policy, ScriptPolicy::Lenient);
    }

    #[test]
    fn test_targets_replace_defaults() {
        let cli = parse(&[
            "--target",
            "data=*.json,*.xml",
            "--target",
            "src/scripts=*.ws",
            "--strict-scripts",
            "--max-file-size",
            "2048",
        ]);
        let config = cli.validation_config();
        assert_eq!(
            config.targets,
            vec![
                ScanTarget::new("data", &["*.json", "*.xml"]),
                ScanTarget::new("src/scripts", &["*.ws"]),
            ]
        );
        assert_eq!(config.script_policy, ScriptPolicy::Strict);
        assert_eq!(config.max_file_size, 2048);
    }

    #[test]
    fn test_malformed_target_is_rejected() {
        let result = Cli::try_parse_from(["modcheck", "--target", "no-patterns"]);
        assert!(result.is_err());
    }

    #[test]
    fn test_format_flag() {
        assert_eq!(parse(&["--format", "json"]).format, OutputFormat::Json);
        assert!(Cli::try_parse_from(["modcheck", "--format", "yaml"]).is_err());
    }

    #[test]
    fn test_verbose_counts() {
        assert_eq!(parse(&["-vv"]).verbose, 2);
    }

    #[test]
    fn test_unknown_format_error_message() {
        let err = "xml".parse::<OutputFormat>().unwrap_err();
        assert_eq!(err, ConfigError::UnknownFormat("xml".to_owned()));
    }
}
