//! Settings context

use super::{print_help, Menu, Session, Verb};
use crate::types::settings::DEFAULT_TRANSACTIONS_PER_PAGE;
use crate::types::{CashFlowError, Currency};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettingsVerb {
    Show,
    Set,
}

impl Verb for SettingsVerb {
    const ALL: &'static [Self] = &[SettingsVerb::Show, SettingsVerb::Set];

    fn name(self) -> &'static str {
        match self {
            SettingsVerb::Show => "show",
            SettingsVerb::Set => "set",
        }
    }
}

/// A setting the user can change, selected by number or key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Choice {
    TransactionsPerPage,
    PreferredCurrency,
}

impl Choice {
    fn parse(input: &str) -> Option<Self> {
        match input.to_ascii_lowercase().as_str() {
            "1" | "transactionsperpage" => Some(Choice::TransactionsPerPage),
            "2" | "preferredcurrency" => Some(Choice::PreferredCurrency),
            _ => None,
        }
    }
}

#[derive(Debug, Default)]
pub struct SettingsMenu;

impl Menu for SettingsMenu {
    type Verb = SettingsVerb;

    fn prompt(&self) -> String {
        "SETTINGS >".to_string()
    }

    fn handle(
        &mut self,
        verb: SettingsVerb,
        args: &[&str],
        session: &mut Session<'_>,
    ) -> Result<(), CashFlowError> {
        match verb {
            SettingsVerb::Show => {
                show(session);
                Ok(())
            }
            SettingsVerb::Set => set(args, session),
        }
    }

    fn on_enter(&mut self, session: &mut Session<'_>) {
        print_help::<SettingsVerb>(&mut *session.output);
    }
}

fn show(session: &mut Session<'_>) {
    let settings = session.store.settings();
    session.output.info(&format!(
        "Current settings\n1. transactionsPerPage: {}\n2. preferredCurrency: {}",
        settings.transactions_per_page, settings.preferred_currency
    ));
}

fn set(args: &[&str], session: &mut Session<'_>) -> Result<(), CashFlowError> {
    if args.len() > 2 {
        session.output.info("Too many arguments");
        return Ok(());
    }

    let input = session.arg_or_ask(
        args.first().copied(),
        "? What setting should be changed (1. transactionsPerPage, 2. preferredCurrency):",
        "",
    );
    let Some(choice) = Choice::parse(&input) else {
        session.output.info("Unknown choice");
        return Ok(());
    };

    match choice {
        Choice::TransactionsPerPage => {
            let default = DEFAULT_TRANSACTIONS_PER_PAGE.to_string();
            let value = session.arg_or_ask(
                args.get(1).copied(),
                &format!("? Transactions per page [{}]:", default),
                &default,
            );
            let Ok(value) = value.parse::<i64>() else {
                session
                    .output
                    .info("Invalid input. Please enter a valid integer.");
                return Ok(());
            };
            session.store.set_transactions_per_page(value)?;
            session
                .output
                .success(&format!("transactionsPerPage set to {}", value));
        }
        Choice::PreferredCurrency => {
            let default = Currency::default().to_string();
            let value = session.arg_or_ask(
                args.get(1).copied(),
                &format!("? Preferred currency (PLN, USD, EUR) [{}]:", default),
                &default,
            );
            let currency = session.store.set_preferred_currency(&value)?;
            session
                .output
                .success(&format!("preferredCurrency set to {}", currency));
        }
    }
    Ok(())
}
