//! Exchange context
//!
//! Reachable from the root menu and from an account menu. Conversions use
//! the session's [`RateTable`](crate::core::RateTable) and never touch the
//! store.

use super::{parse_amount, print_help, Menu, Session, Verb};
use crate::types::{CashFlowError, Currency};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExchangeVerb {
    Show,
    Convert,
}

impl Verb for ExchangeVerb {
    const ALL: &'static [Self] = &[ExchangeVerb::Show, ExchangeVerb::Convert];

    fn name(self) -> &'static str {
        match self {
            ExchangeVerb::Show => "show",
            ExchangeVerb::Convert => "convert",
        }
    }
}

#[derive(Debug, Default)]
pub struct ExchangeMenu;

impl Menu for ExchangeMenu {
    type Verb = ExchangeVerb;

    fn prompt(&self) -> String {
        "EXCHANGE >".to_string()
    }

    fn handle(
        &mut self,
        verb: ExchangeVerb,
        args: &[&str],
        session: &mut Session<'_>,
    ) -> Result<(), CashFlowError> {
        match verb {
            ExchangeVerb::Show => {
                show(session);
                Ok(())
            }
            ExchangeVerb::Convert => convert(args, session),
        }
    }

    fn on_enter(&mut self, session: &mut Session<'_>) {
        print_help::<ExchangeVerb>(&mut *session.output);
    }
}

fn show(session: &mut Session<'_>) {
    session.output.info("Exchange rates:");
    for currency in [Currency::Usd, Currency::Eur] {
        let rate = session.rates.rate_to_pln(currency);
        session
            .output
            .line(&format!("1 {} = {:.2} {}", currency, rate, Currency::Pln));
    }
}

fn convert(args: &[&str], session: &mut Session<'_>) -> Result<(), CashFlowError> {
    if args.len() > 3 {
        session.output.info("Too many arguments");
        return Ok(());
    }

    let input = session.arg_or_ask(args.first().copied(), "? Amount to convert:", "");
    let amount = parse_amount(&input)?;
    let from: Currency = session
        .arg_or_ask(args.get(1).copied(), "? From currency (PLN, USD, EUR):", "")
        .parse()?;
    let to: Currency = session
        .arg_or_ask(args.get(2).copied(), "? To currency (PLN, USD, EUR):", "")
        .parse()?;

    if from == to {
        session.output.info("Currencies cannot be the same");
        return Ok(());
    }

    let result = session.rates.convert(amount, from, to)?.round_dp(2);
    session
        .output
        .success(&format!("{} {} to {} = {:.2}", amount, from, to, result));
    Ok(())
}
