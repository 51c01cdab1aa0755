//! CashFlow CLI
//!
//! Interactive terminal application for tracking accounts and transactions.
//!
//! # Usage
//!
//! ```bash
//! cargo run
//! cargo run -- --database ~/money.json
//! cargo run -- --debug
//! CASHFLOW_DEBUG=true cargo run
//! ```
//!
//! All data lives in one JSON document which is created on first start and
//! rewritten after every change.
//!
//! # Exit Codes
//!
//! - 0: The user left the root menu or input ended
//! - 1: The database could not be opened or created

use cashflow::cli;
use cashflow::core::{FunnyNameGenerator, Store};
use cashflow::io::JsonFileBackend;
use cashflow::menu::{run_session, ConsoleInput, ConsoleReporter, Session};
use std::{env, io, process};
use tracing::error;

fn main() {
    let args = cli::parse_args();
    let debug = args.debug_enabled(env::var(cli::DEBUG_ENV_VAR).ok().as_deref());
    cli::init_logging(debug);

    let mut store = match Store::open(JsonFileBackend::new(&args.database)) {
        Ok(store) => store,
        Err(e) => {
            error!("{}", e);
            eprintln!("Error: {}", e);
            process::exit(1);
        }
    };

    let stdin = io::stdin();
    let mut input = ConsoleInput::new(stdin.lock(), io::stdout());
    let mut output = ConsoleReporter::new(io::stdout());
    let mut names = FunnyNameGenerator;
    let mut session = Session::new(&mut store, &mut input, &mut output, &mut names);

    run_session(&mut session);
}
