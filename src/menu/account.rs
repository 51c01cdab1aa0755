//! Account context
//!
//! Entered from the root menu with `select`. The menu only keeps the account
//! name and reads the account from the store on every command, so it never
//! works on a stale copy.

use super::{parse_amount, run_loop, ExchangeMenu, Menu, Session, Verb};
use crate::types::{validate_text_field, CashFlowError, Transaction, TIMESTAMP_FORMAT};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountVerb {
    Balance,
    Transactions,
    Topup,
    Exchange,
}

impl Verb for AccountVerb {
    const ALL: &'static [Self] = &[
        AccountVerb::Balance,
        AccountVerb::Transactions,
        AccountVerb::Topup,
        AccountVerb::Exchange,
    ];

    fn name(self) -> &'static str {
        match self {
            AccountVerb::Balance => "balance",
            AccountVerb::Transactions => "transactions",
            AccountVerb::Topup => "topup",
            AccountVerb::Exchange => "exchange",
        }
    }
}

/// Menu bound to one account
#[derive(Debug)]
pub struct AccountMenu {
    account: String,
}

impl AccountMenu {
    pub fn new(account: impl Into<String>) -> Self {
        AccountMenu {
            account: account.into(),
        }
    }

    fn balance(&self, session: &mut Session<'_>) -> Result<(), CashFlowError> {
        let balance = session.store.get_account(&self.account)?.balance();
        let text = session.describe_balance(balance);
        session.output.info(&format!("Account balance: {}", text));
        Ok(())
    }

    fn topup(&self, args: &[&str], session: &mut Session<'_>) -> Result<(), CashFlowError> {
        if args.len() > 1 {
            session.output.info("Too many arguments");
            return Ok(());
        }

        let input = session.arg_or_ask(
            args.first().copied(),
            "? How much should be added (negative to take money out):",
            "",
        );
        let amount = parse_amount(&input)?;
        let balance = session.store.adjust_balance(&self.account, amount)?;
        let text = session.describe_balance(balance);
        session.output.success(&format!("Balance changed to {}", text));
        Ok(())
    }

    fn transactions(&self, args: &[&str], session: &mut Session<'_>) -> Result<(), CashFlowError> {
        match args {
            [] => self.list_transactions(1, session),
            [sub] if sub.eq_ignore_ascii_case("create") => self.create_transaction(session),
            [sub] if sub.eq_ignore_ascii_case("remove") => self.remove_transaction(session),
            [page] => match page.parse::<usize>() {
                Ok(page) => self.list_transactions(page, session),
                Err(_) => {
                    session
                        .output
                        .info("Invalid command. Type 'help' for a list of commands.");
                    Ok(())
                }
            },
            _ => {
                session.output.info("Too many arguments");
                Ok(())
            }
        }
    }

    fn list_transactions(&self, page: usize, session: &mut Session<'_>) -> Result<(), CashFlowError> {
        let per_page = session.store.settings().transactions_per_page as usize;
        let lines: Vec<String> = session
            .store
            .account_transactions(&self.account)
            .into_iter()
            .map(|(index, tx)| {
                format!(
                    "{}. {} {} {}",
                    index,
                    tx.timestamp.format(TIMESTAMP_FORMAT),
                    tx.label,
                    tx.amount
                )
            })
            .collect();

        if lines.is_empty() {
            session
                .output
                .info(&format!("No transactions recorded for {}", self.account));
            return Ok(());
        }

        let pages = lines.len().div_ceil(per_page);
        if page == 0 || page > pages {
            session
                .output
                .info(&format!("Page {} does not exist ({} pages)", page, pages));
            return Ok(());
        }

        session.output.info(&format!(
            "Transactions of {} (page {}/{}):",
            self.account, page, pages
        ));
        for line in lines.iter().skip((page - 1) * per_page).take(per_page) {
            session.output.line(line);
        }
        Ok(())
    }

    fn create_transaction(&self, session: &mut Session<'_>) -> Result<(), CashFlowError> {
        let label = session.ask("? What is this transaction for:", "");
        validate_text_field("label", &label)?;

        let input = session.ask("? Amount (negative for expenses):", "");
        let amount = parse_amount(&input)?;

        session
            .store
            .add_transaction(Transaction::new(amount, label, self.account.as_str()))?;
        session.output.success("Successfully added a transaction.");
        Ok(())
    }

    fn remove_transaction(&self, session: &mut Session<'_>) -> Result<(), CashFlowError> {
        if session.store.account_transactions(&self.account).is_empty() {
            session.output.info("There is nothing to delete");
            return Ok(());
        }

        let input = session.ask("? What transaction should be deleted (type its number)", "");
        let Ok(index) = input.parse::<usize>() else {
            session.output.info("Not a number");
            return Ok(());
        };

        let removed = session
            .store
            .remove_account_transaction(&self.account, index)?;
        session.output.success(&format!(
            "Successfully deleted transaction {} ({})",
            index, removed.label
        ));
        Ok(())
    }
}

impl Menu for AccountMenu {
    type Verb = AccountVerb;

    fn prompt(&self) -> String {
        format!("{} >", self.account)
    }

    fn handle(
        &mut self,
        verb: AccountVerb,
        args: &[&str],
        session: &mut Session<'_>,
    ) -> Result<(), CashFlowError> {
        match verb {
            AccountVerb::Balance => self.balance(session),
            AccountVerb::Transactions => self.transactions(args, session),
            AccountVerb::Topup => self.topup(args, session),
            AccountVerb::Exchange => {
                run_loop(&mut ExchangeMenu, session);
                Ok(())
            }
        }
    }
}
