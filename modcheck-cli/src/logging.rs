use colored::Colorize;
use modcheck::RunStatus;
use tracing_subscriber::EnvFilter;

/// Install the stderr tracing subscriber.
///
/// `RUST_LOG` wins when set; otherwise `-v` enables debug and `-vv` trace
/// output for the validator crates.
pub fn init_tracing(verbose: u8) {
    let default_directive = match verbose {
        0 => "warn",
        1 => "modcheck=debug,modcheck_cli=debug",
        _ => "modcheck=trace,modcheck_cli=trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

    // A second init (e.g. in tests) is harmless; keep the first subscriber.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Disable ANSI colors globally (`--no-color`).
pub fn disable_colors() {
    colored::control::set_override(false);
}

/// One-line colored verdict printed after the run.
#[must_use]
pub fn status_line(status: RunStatus) -> String {
    let text = format!("Status: {status}");
    match status {
        RunStatus::Passed => text.green().bold().to_string(),
        RunStatus::PassedWithWarnings => text.yellow().bold().to_string(),
        RunStatus::Failed => text.red().bold().to_string(),
    }
}
