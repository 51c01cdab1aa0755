//! Root context
//!
//! Lists, creates, removes and selects accounts, and opens the settings and
//! exchange contexts.

use super::{
    resolve_account, run_loop, AccountMenu, ExchangeMenu, Menu, Session, SettingsMenu, Verb,
};
use crate::types::{validate_text_field, Account, CashFlowError};
use rust_decimal::Decimal;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RootVerb {
    Select,
    Accounts,
    Settings,
    Exchange,
}

impl Verb for RootVerb {
    const ALL: &'static [Self] = &[
        RootVerb::Select,
        RootVerb::Accounts,
        RootVerb::Settings,
        RootVerb::Exchange,
    ];

    fn name(self) -> &'static str {
        match self {
            RootVerb::Select => "select",
            RootVerb::Accounts => "accounts",
            RootVerb::Settings => "settings",
            RootVerb::Exchange => "exchange",
        }
    }
}

/// The top-level menu
#[derive(Debug, Default)]
pub struct RootMenu;

impl Menu for RootMenu {
    type Verb = RootVerb;

    fn prompt(&self) -> String {
        ">".to_string()
    }

    fn handle(
        &mut self,
        verb: RootVerb,
        args: &[&str],
        session: &mut Session<'_>,
    ) -> Result<(), CashFlowError> {
        match verb {
            RootVerb::Select => select(args, session),
            RootVerb::Accounts => accounts(args, session),
            RootVerb::Settings => {
                run_loop(&mut SettingsMenu, session);
                Ok(())
            }
            RootVerb::Exchange => {
                run_loop(&mut ExchangeMenu, session);
                Ok(())
            }
        }
    }
}

/// Run a whole interactive session
///
/// On a store without accounts the user is asked to create one first.
/// Returns when the root loop receives `exit` or input ends.
pub fn run_session(session: &mut Session<'_>) {
    if session.store.accounts().is_empty() {
        session
            .output
            .info("You don't seem to have an account, please create one.");
        if let Err(e) = create_account(session) {
            session.output.error(&e.to_string());
        }
    }

    session.output.info(
        "For command list you can use `help`.\n\
         To list available accounts - `accounts`.\n\
         Selecting an account - `select`",
    );
    run_loop(&mut RootMenu, session);
}

fn accounts(args: &[&str], session: &mut Session<'_>) -> Result<(), CashFlowError> {
    match args {
        [] => {
            list_accounts(session);
            Ok(())
        }
        [sub] if sub.eq_ignore_ascii_case("create") => create_account(session),
        [sub] if sub.eq_ignore_ascii_case("remove") => remove_account(session),
        [_] => {
            session
                .output
                .info("Invalid command. Type 'help' for a list of commands.");
            Ok(())
        }
        _ => {
            session.output.info("Too many arguments");
            Ok(())
        }
    }
}

fn list_accounts(session: &mut Session<'_>) {
    session.output.info("Available accounts:");
    if session.store.accounts().is_empty() {
        session
            .output
            .info("There is nothing to show. Please create an account using `accounts create`");
        return;
    }

    let lines: Vec<String> = session
        .store
        .accounts()
        .iter()
        .enumerate()
        .map(|(i, account)| {
            format!(
                "{}. {} - {}",
                i + 1,
                account.name(),
                session.describe_balance(account.balance())
            )
        })
        .collect();
    for line in &lines {
        session.output.line(line);
    }

    session
        .output
        .info("Available options:\n- accounts create\n- accounts remove");
}

fn create_account(session: &mut Session<'_>) -> Result<(), CashFlowError> {
    let generated = session.names.generate_default_name();
    let name = session.ask(
        &format!("? How should we call this account [{}]:", generated),
        &generated,
    );
    validate_text_field("account name", &name)?;

    if session.store.add_account(Account::new(name, Decimal::ZERO))? {
        session.output.success("Successfully created an account.");
    } else {
        session.output.info("Account already exists.");
    }
    Ok(())
}

fn remove_account(session: &mut Session<'_>) -> Result<(), CashFlowError> {
    if session.store.accounts().is_empty() {
        session.output.info("There is nothing to delete");
        return Ok(());
    }

    let input = session.ask("? What account should be deleted (type account id or name)", "");
    let Some(name) = resolve_account(session.store, &input) else {
        session.output.info("Account does not exist");
        return Ok(());
    };

    session.store.remove_account(&name)?;
    session
        .output
        .success(&format!("Successfully deleted the account {}", name));

    let kept = session.store.account_transactions(&name).len();
    if kept > 0 {
        session
            .output
            .info(&format!("{} transaction(s) of {} were kept", kept, name));
    }
    Ok(())
}

fn select(args: &[&str], session: &mut Session<'_>) -> Result<(), CashFlowError> {
    if session.store.accounts().is_empty() {
        session
            .output
            .info("There is nothing to select. Please create an account using `accounts create`");
        return Ok(());
    }

    let input = if args.is_empty() {
        session.ask("? What account should be selected (type account id or name)", "")
    } else {
        args.join(" ")
    };
    let Some(name) = resolve_account(session.store, &input) else {
        session.output.info("Account does not exist");
        return Ok(());
    };

    session
        .output
        .success(&format!("You've chosen an account called {}", name));
    run_loop(&mut AccountMenu::new(name), session);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::super::testing::Harness;
    use super::super::{dispatch, Flow, Level};
    use super::*;

    fn seed(harness: &mut Harness, names: &[&str]) {
        for name in names {
            harness
                .store
                .add_account(Account::new(*name, Decimal::ZERO))
                .unwrap();
        }
    }

    #[test]
    fn test_first_run_creates_default_account() {
        let mut harness = Harness::new();

        harness.with_script("\nexit\n", run_session);

        assert_eq!(harness.store.accounts().len(), 1);
        assert_eq!(harness.store.accounts()[0].name(), "Main");
        assert!(harness.output.contains("Successfully created an account."));
    }

    #[test]
    fn test_first_run_with_typed_name() {
        let mut harness = Harness::new();

        harness.with_script("Wallet\nexit\n", run_session);

        assert!(harness.store.account_exists("Wallet"));
    }

    #[test]
    fn test_existing_accounts_skip_creation() {
        let mut harness = Harness::new();
        seed(&mut harness, &["Main"]);

        harness.with_script("exit\n", run_session);

        assert_eq!(harness.store.accounts().len(), 1);
        assert!(!harness.output.contains("please create one"));
    }

    #[test]
    fn test_accounts_lists_with_positions() {
        let mut harness = Harness::new();
        seed(&mut harness, &["Main", "Savings"]);

        harness.with_script("", |s| dispatch(&mut RootMenu, s, "accounts"));

        assert_eq!(
            harness.output.of_level(Level::Line),
            ["1. Main - 0 PLN", "2. Savings - 0 PLN"]
        );
    }

    #[test]
    fn test_accounts_too_many_arguments() {
        let mut harness = Harness::new();

        let flow = harness.with_script("", |s| dispatch(&mut RootMenu, s, "accounts create now"));

        assert_eq!(flow, Flow::Continue);
        assert!(harness.output.contains("Too many arguments"));
        assert!(harness.store.accounts().is_empty());
    }

    #[test]
    fn test_accounts_unknown_subcommand() {
        let mut harness = Harness::new();

        harness.with_script("", |s| dispatch(&mut RootMenu, s, "accounts rename"));

        assert!(harness.output.contains("Invalid command"));
    }

    #[test]
    fn test_accounts_create_duplicate() {
        let mut harness = Harness::new();
        seed(&mut harness, &["Main"]);

        harness.with_script("Main\n", |s| dispatch(&mut RootMenu, s, "accounts create"));

        assert_eq!(harness.store.accounts().len(), 1);
        assert!(harness.output.contains("Account already exists."));
    }

    #[test]
    fn test_accounts_create_rejects_colon() {
        let mut harness = Harness::new();

        harness.with_script("bad:name\n", |s| dispatch(&mut RootMenu, s, "accounts create"));

        assert!(harness.store.accounts().is_empty());
        assert_eq!(harness.output.of_level(Level::Error).len(), 1);
    }

    #[rstest::rstest]
    #[case::by_position("2\n", "Savings")]
    #[case::by_name("Main\n", "Main")]
    fn test_accounts_remove(#[case] script: &str, #[case] removed: &str) {
        let mut harness = Harness::new();
        seed(&mut harness, &["Main", "Savings"]);

        harness.with_script(script, |s| dispatch(&mut RootMenu, s, "accounts remove"));

        assert!(!harness.store.account_exists(removed));
        assert_eq!(harness.store.accounts().len(), 1);
    }

    #[test]
    fn test_accounts_remove_unknown() {
        let mut harness = Harness::new();
        seed(&mut harness, &["Main"]);

        harness.with_script("7\n", |s| dispatch(&mut RootMenu, s, "accounts remove"));

        assert!(harness.output.contains("Account does not exist"));
        assert_eq!(harness.store.accounts().len(), 1);
    }

    #[test]
    fn test_select_enters_account_menu() {
        let mut harness = Harness::new();
        seed(&mut harness, &["Main"]);

        harness.with_script("topup 50\nexit\n", |s| dispatch(&mut RootMenu, s, "select Main"));

        assert!(harness.output.contains("You've chosen an account called Main"));
        assert_eq!(
            harness.store.get_account("Main").unwrap().balance(),
            Decimal::new(50, 0)
        );
    }

    #[test]
    fn test_select_multi_word_name() {
        let mut harness = Harness::new();
        seed(&mut harness, &["Silly Cat"]);

        harness.with_script("exit\n", |s| dispatch(&mut RootMenu, s, "select Silly Cat"));

        assert!(harness.output.contains("You've chosen an account called Silly Cat"));
    }

    #[test]
    fn test_select_without_accounts() {
        let mut harness = Harness::new();

        harness.with_script("", |s| dispatch(&mut RootMenu, s, "select"));

        assert!(harness.output.contains("There is nothing to select"));
    }

    #[test]
    fn test_nested_exit_returns_to_root() {
        let mut harness = Harness::new();
        seed(&mut harness, &["Main"]);

        harness.with_script("settings\nexit\naccounts\nexit\n", run_session);

        assert!(harness.output.contains("Available accounts:"));
    }
}
