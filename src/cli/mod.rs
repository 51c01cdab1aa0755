//! CLI module
//!
//! Command-line arguments and logging setup

mod args;

pub use args::{CliArgs, DEBUG_ENV_VAR};

use clap::Parser;
use tracing::Level;

/// Parse command-line arguments using clap
///
/// If parsing fails (unknown option, or `--help`), clap prints the error or
/// help text and exits the process.
pub fn parse_args() -> CliArgs {
    CliArgs::parse()
}

/// Install the global tracing subscriber
///
/// Diagnostics go to stderr so they never mix with the interactive output
/// on stdout. Without `debug`, only warnings and errors are shown.
pub fn init_logging(debug: bool) {
    let level = if debug { Level::DEBUG } else { Level::WARN };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
