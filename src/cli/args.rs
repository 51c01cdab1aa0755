use crate::io::DEFAULT_DATABASE_PATH;
use clap::Parser;
use std::path::PathBuf;

/// Environment variable that turns on debug logging
pub const DEBUG_ENV_VAR: &str = "CASHFLOW_DEBUG";

/// Interactive personal finance tracker
#[derive(Parser, Debug)]
#[command(name = "cashflow")]
#[command(about = "Track accounts, balances and transactions from the terminal", long_about = None)]
pub struct CliArgs {
    /// Path of the JSON document holding accounts, transactions and settings
    #[arg(
        long = "database",
        value_name = "PATH",
        default_value = DEFAULT_DATABASE_PATH,
        help = "Path to the JSON database (created if missing)"
    )]
    pub database: PathBuf,

    /// Log diagnostics to stderr
    #[arg(long = "debug", help = "Enable debug logging (also CASHFLOW_DEBUG=true)")]
    pub debug: bool,
}

impl CliArgs {
    /// Whether debug logging is requested by the flag or the environment
    ///
    /// # Arguments
    ///
    /// * `env_value` - Value of `CASHFLOW_DEBUG`, if set
    ///
    /// # Returns
    ///
    /// `true` if `--debug` was given or `env_value` is `true` (any case).
    pub fn debug_enabled(&self, env_value: Option<&str>) -> bool {
        self.debug || env_value.is_some_and(|value| value.trim().eq_ignore_ascii_case("true"))
    }
}
