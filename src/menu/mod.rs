//! Interactive menus
//!
//! Every context (root, account, settings, exchange) is a [`Menu`]: a prompt
//! plus a closed set of verbs. [`dispatch`] turns one input line into a verb
//! and its arguments, and [`run_loop`] repeats that until the user leaves
//! the context. Nested contexts run their own loop on the same [`Session`],
//! so every menu sees the same store.
//!
//! # Dispatch Rules
//!
//! - blank input does nothing
//! - `exit` (any case) leaves the current loop, before any table lookup
//! - `help` lists `help`, `exit` and the context's verbs
//! - an unknown verb is reported and the loop continues
//! - a known verb runs its handler; errors are reported and the loop continues

pub mod account;
pub mod exchange;
pub mod input;
pub mod output;
pub mod root;
pub mod settings;

pub use account::AccountMenu;
pub use exchange::ExchangeMenu;
pub use input::{ConsoleInput, LineReader};
pub use output::{ConsoleReporter, Level, RecordingReporter, Reporter};
pub use root::{run_session, RootMenu};
pub use settings::SettingsMenu;

use crate::core::{NameGenerator, RateTable, Store};
use crate::types::{CashFlowError, Currency};
use rust_decimal::Decimal;
use tracing::{debug, error, warn};

const EXIT: &str = "exit";
const HELP: &str = "help";

/// Whether the current loop keeps running
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// Closed set of verbs understood by one context
pub trait Verb: Copy + 'static {
    /// Every verb, in the order `help` lists them
    const ALL: &'static [Self];

    fn name(self) -> &'static str;

    /// Case-insensitive lookup
    fn parse(token: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|verb| verb.name().eq_ignore_ascii_case(token))
    }
}

/// An interactive context
pub trait Menu {
    type Verb: Verb;

    /// Label shown before each input line
    fn prompt(&self) -> String;

    /// Run a verb with the remaining tokens
    fn handle(
        &mut self,
        verb: Self::Verb,
        args: &[&str],
        session: &mut Session<'_>,
    ) -> Result<(), CashFlowError>;

    /// Called once when the context is entered
    fn on_enter(&mut self, _session: &mut Session<'_>) {}
}

/// Everything a handler works with
pub struct Session<'a> {
    pub store: &'a mut Store,
    pub input: &'a mut dyn LineReader,
    pub output: &'a mut dyn Reporter,
    pub names: &'a mut dyn NameGenerator,
    pub rates: RateTable,
}

impl<'a> Session<'a> {
    pub fn new(
        store: &'a mut Store,
        input: &'a mut dyn LineReader,
        output: &'a mut dyn Reporter,
        names: &'a mut dyn NameGenerator,
    ) -> Self {
        Session {
            store,
            input,
            output,
            names,
            rates: RateTable::offline(),
        }
    }

    /// Ask a follow-up question
    ///
    /// Blank answers, end of input and read errors all yield `default`.
    pub fn ask(&mut self, question: &str, default: &str) -> String {
        match self.input.read_line(question) {
            Ok(Some(answer)) if !answer.trim().is_empty() => answer.trim().to_string(),
            Ok(_) => default.to_string(),
            Err(e) => {
                warn!("Cannot read input: {}", e);
                default.to_string()
            }
        }
    }

    /// Use the inline argument if given, otherwise ask
    pub fn arg_or_ask(&mut self, arg: Option<&str>, question: &str, default: &str) -> String {
        match arg {
            Some(value) => value.to_string(),
            None => self.ask(question, default),
        }
    }

    /// Balance text in PLN, with the preferred currency alongside
    pub fn describe_balance(&self, balance: Decimal) -> String {
        let preferred = self.store.settings().preferred_currency;
        if preferred == Currency::Pln {
            return format!("{} PLN", balance);
        }
        match self.rates.convert(balance, Currency::Pln, preferred) {
            Ok(converted) => format!("{} PLN ({:.2} {})", balance, converted.round_dp(2), preferred),
            Err(_) => format!("{} PLN", balance),
        }
    }
}

/// Handle one input line
///
/// # Returns
///
/// `Flow::Exit` only for the `exit` verb; every other input yields
/// `Flow::Continue`.
pub fn dispatch<M: Menu>(menu: &mut M, session: &mut Session<'_>, line: &str) -> Flow {
    let mut tokens = line.split_whitespace();
    let Some(first) = tokens.next() else {
        return Flow::Continue;
    };
    let args: Vec<&str> = tokens.collect();

    if first.eq_ignore_ascii_case(EXIT) {
        return Flow::Exit;
    }
    if first.eq_ignore_ascii_case(HELP) {
        print_help::<M::Verb>(&mut *session.output);
        return Flow::Continue;
    }

    let Some(verb) = M::Verb::parse(first) else {
        session
            .output
            .info("Invalid command. Type 'help' for a list of commands.");
        return Flow::Continue;
    };

    debug!("Running '{}' with {:?}", verb.name(), args);
    if let Err(e) = menu.handle(verb, &args, session) {
        report_error(session, &e);
    }
    Flow::Continue
}

/// Read and dispatch lines until the context is left
pub fn run_loop<M: Menu>(menu: &mut M, session: &mut Session<'_>) {
    menu.on_enter(session);
    loop {
        let line = match session.input.read_line(&menu.prompt()) {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(e) => {
                warn!("Cannot read input: {}", e);
                break;
            }
        };
        if dispatch(menu, session, &line) == Flow::Exit {
            break;
        }
    }
}

/// List the verbs of a context
pub fn print_help<V: Verb>(output: &mut dyn Reporter) {
    output.info("Available Commands:");
    for name in [HELP, EXIT].into_iter().chain(V::ALL.iter().map(|v| v.name())) {
        output.line(&format!("- {}", name));
    }
}

fn report_error(session: &mut Session<'_>, error: &CashFlowError) {
    if error.is_fatal() {
        error!("{}", error);
    } else if matches!(error, CashFlowError::DatabaseSave { .. }) {
        warn!("Change kept in memory only: {}", error);
    }
    session.output.error(&error.to_string());
}

/// Resolve a 1-based position or a name to an existing account name
///
/// A number that is not a valid position is looked up as a name.
fn resolve_account(store: &Store, input: &str) -> Option<String> {
    let by_position = input
        .parse::<usize>()
        .ok()
        .and_then(|index| index.checked_sub(1))
        .and_then(|i| store.accounts().get(i));
    by_position
        .or_else(|| store.get_account(input).ok())
        .map(|account| account.name().to_string())
}

fn parse_amount(input: &str) -> Result<Decimal, CashFlowError> {
    input
        .trim()
        .parse::<Decimal>()
        .map_err(|_| CashFlowError::invalid_amount(input))
}
