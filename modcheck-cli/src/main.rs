// These Clippy lints are disabled because this is a CLI binary, not a library:
// - print_stdout/print_stderr: CLI tools are expected to print to stdout/stderr for user output.
// - exit: Calling `std::process::exit()` is standard for CLI apps to signal failure to the shell.
#![allow(clippy::print_stdout, clippy::print_stderr, clippy::exit)]

mod cli;
mod logging;

/// Exit code for configuration errors and fatal I/O failures.
const EXIT_USAGE: i32 = 2;

fn main() {
    match cli::run() {
        Ok(status) => std::process::exit(i32::from(status.exit_code())),
        Err(e) => {
            eprintln!("Error: {e:#}");
            std::process::exit(EXIT_USAGE);
        }
    }
}
