//! Store
//!
//! The `Store` is the single owner of the account, transaction and settings
//! collections. Every mutating operation validates its input, applies the
//! change in memory and then writes the whole document through the backend.
//!
//! # Write-through
//!
//! There is no dirty flag and no batching: once a mutating call returns,
//! the backend holds the new state. If the save fails the in-memory change
//! is kept and `DatabaseSave` is returned, so the caller can report it and
//! carry on.
//!
//! # Referential Integrity
//!
//! Transactions refer to accounts by name. A transaction can only be added
//! for an existing account, but removing an account keeps its transactions.

use crate::core::traits::DocumentBackend;
use crate::io::{PersistedDocument, Records};
use crate::types::{validate_text_field, Account, CashFlowError, Currency, Settings, Transaction};
use rust_decimal::Decimal;
use tracing::{debug, info, warn};

/// Durable collections of accounts, transactions and settings
pub struct Store {
    backend: Box<dyn DocumentBackend>,
    accounts: Vec<Account>,
    transactions: Vec<Transaction>,
    settings: Settings,
}

impl Store {
    /// Load the store from `backend`
    ///
    /// When the backend holds no document yet, an empty one with default
    /// settings is created and written.
    ///
    /// # Errors
    ///
    /// Returns `DatabaseInit` if the document cannot be read, is missing a
    /// key, contains a malformed record, or the initial document cannot be
    /// written.
    pub fn open(backend: impl DocumentBackend + 'static) -> Result<Self, CashFlowError> {
        let mut backend: Box<dyn DocumentBackend> = Box::new(backend);
        let location = backend.describe();

        let records = match backend.load()? {
            Some(document) => document
                .decode()
                .map_err(|e| CashFlowError::database_init(&location, e.to_string()))?,
            None => {
                info!("Creating a new document at {}", location);
                let records = Records::default();
                let document = PersistedDocument::encode(&[], &[], records.settings);
                backend
                    .save(&document)
                    .map_err(|e| CashFlowError::database_init(&location, e.to_string()))?;
                records
            }
        };

        debug!(
            "Store opened with {} accounts and {} transactions",
            records.accounts.len(),
            records.transactions.len()
        );

        Ok(Store {
            backend,
            accounts: records.accounts,
            transactions: records.transactions,
            settings: records.settings,
        })
    }

    pub fn accounts(&self) -> &[Account] {
        &self.accounts
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn settings(&self) -> Settings {
        self.settings
    }

    /// Location of the backing document
    pub fn location(&self) -> String {
        self.backend.describe()
    }

    /// Serialize the current state
    pub fn document(&self) -> PersistedDocument {
        PersistedDocument::encode(&self.accounts, &self.transactions, self.settings)
    }

    /// Look up an account by name
    ///
    /// # Errors
    ///
    /// Returns `AccountNotFound` if no account has this name.
    pub fn get_account(&self, name: &str) -> Result<&Account, CashFlowError> {
        self.accounts
            .iter()
            .find(|account| account.name() == name)
            .ok_or_else(|| CashFlowError::account_not_found(name))
    }

    pub fn account_exists(&self, name: &str) -> bool {
        self.accounts.iter().any(|account| account.name() == name)
    }

    /// Add a new account
    ///
    /// # Returns
    ///
    /// * `Ok(true)` - The account was appended and saved
    /// * `Ok(false)` - An account with this name already exists; nothing changed
    ///
    /// # Errors
    ///
    /// - `EmptyField` / `ReservedCharacter` for an unusable name
    /// - `InvalidBalance` for a negative opening balance
    /// - `DatabaseSave` if the write failed (the account is kept in memory)
    pub fn add_account(&mut self, account: Account) -> Result<bool, CashFlowError> {
        validate_text_field("account name", account.name())?;
        if account.balance() < Decimal::ZERO {
            return Err(CashFlowError::invalid_balance(account.name(), account.balance()));
        }
        if self.account_exists(account.name()) {
            return Ok(false);
        }

        debug!("Adding account '{}'", account.name());
        self.accounts.push(account);
        self.save()?;
        Ok(true)
    }

    /// Remove the first account with this name
    ///
    /// Transactions of the account are left in place.
    ///
    /// # Returns
    ///
    /// `Ok(false)` if no account matched.
    pub fn remove_account(&mut self, name: &str) -> Result<bool, CashFlowError> {
        let Some(position) = self.accounts.iter().position(|a| a.name() == name) else {
            return Ok(false);
        };

        debug!("Removing account '{}'", name);
        self.accounts.remove(position);
        self.save()?;
        Ok(true)
    }

    /// Replace the first account whose name matches `account`
    ///
    /// # Returns
    ///
    /// `Ok(false)` if no account matched.
    pub fn update_account(&mut self, account: Account) -> Result<bool, CashFlowError> {
        let Some(slot) = self.accounts.iter_mut().find(|a| a.name() == account.name()) else {
            return Ok(false);
        };

        *slot = account;
        self.save()?;
        Ok(true)
    }

    /// Add `delta` to the balance of account `name`
    ///
    /// # Returns
    ///
    /// The new balance.
    ///
    /// # Errors
    ///
    /// - `AccountNotFound` if the account does not exist
    /// - `InvalidBalance` if the result would be negative (nothing changes)
    /// - `ArithmeticOverflow` if the result is out of the decimal range (nothing changes)
    /// - `DatabaseSave` if the write failed
    pub fn adjust_balance(&mut self, name: &str, delta: Decimal) -> Result<Decimal, CashFlowError> {
        let mut account = self.get_account(name)?.clone();
        let new_balance = account
            .balance()
            .checked_add(delta)
            .ok_or_else(|| CashFlowError::arithmetic_overflow("topup"))?;
        account.update_balance(new_balance)?;
        self.update_account(account)?;
        Ok(new_balance)
    }

    /// Record a transaction
    ///
    /// # Errors
    ///
    /// - `AccountNotFound` if the owning account does not exist
    /// - `EmptyField` / `ReservedCharacter` for an unusable label
    /// - `DatabaseSave` if the write failed
    pub fn add_transaction(&mut self, transaction: Transaction) -> Result<(), CashFlowError> {
        validate_text_field("label", &transaction.label)?;
        if !self.account_exists(&transaction.account) {
            return Err(CashFlowError::account_not_found(&transaction.account));
        }

        debug!(
            "Adding transaction '{}' to account '{}'",
            transaction.label, transaction.account
        );
        self.transactions.push(transaction);
        self.save()
    }

    /// Remove the transaction at a 1-based position among all transactions
    ///
    /// # Returns
    ///
    /// The removed transaction.
    ///
    /// # Errors
    ///
    /// - `TransactionIndexOutOfRange` if `index` is 0 or past the end
    /// - `DatabaseSave` if the write failed
    pub fn remove_transaction_at(&mut self, index: usize) -> Result<Transaction, CashFlowError> {
        self.check_transaction_index(index)?;

        let removed = self.transactions.remove(index - 1);
        self.save()?;
        Ok(removed)
    }

    /// Remove a transaction on behalf of an account
    ///
    /// Same as [`Store::remove_transaction_at`], but the transaction at
    /// `index` must belong to `account`.
    ///
    /// # Errors
    ///
    /// Additionally returns `TransactionNotOwned` when it does not.
    pub fn remove_account_transaction(
        &mut self,
        account: &str,
        index: usize,
    ) -> Result<Transaction, CashFlowError> {
        self.check_transaction_index(index)?;
        if self.transactions[index - 1].account != account {
            return Err(CashFlowError::TransactionNotOwned {
                index,
                account: account.to_string(),
            });
        }
        self.remove_transaction_at(index)
    }

    /// Transactions of one account with their 1-based global positions
    pub fn account_transactions(&self, account: &str) -> Vec<(usize, &Transaction)> {
        self.transactions
            .iter()
            .enumerate()
            .filter(|(_, tx)| tx.account == account)
            .map(|(i, tx)| (i + 1, tx))
            .collect()
    }

    /// Change the page size
    ///
    /// # Errors
    ///
    /// - `Range` if `value` is outside [10, 100]; the previous value is kept
    /// - `DatabaseSave` if the write failed
    pub fn set_transactions_per_page(&mut self, value: i64) -> Result<(), CashFlowError> {
        self.settings.transactions_per_page = Settings::validate_transactions_per_page(value)?;
        self.save()
    }

    /// Change the preferred currency
    ///
    /// The code is matched case-insensitively and stored upper-case.
    ///
    /// # Returns
    ///
    /// The normalized currency.
    ///
    /// # Errors
    ///
    /// - `UnsupportedCurrency` if `code` is not PLN, USD or EUR
    /// - `DatabaseSave` if the write failed
    pub fn set_preferred_currency(&mut self, code: &str) -> Result<Currency, CashFlowError> {
        let currency: Currency = code.parse()?;
        self.settings.preferred_currency = currency;
        self.save()?;
        Ok(currency)
    }

    fn check_transaction_index(&self, index: usize) -> Result<(), CashFlowError> {
        if index == 0 || index > self.transactions.len() {
            return Err(CashFlowError::TransactionIndexOutOfRange {
                index,
                len: self.transactions.len(),
            });
        }
        Ok(())
    }

    fn save(&mut self) -> Result<(), CashFlowError> {
        let document = self.document();
        self.backend.save(&document).inspect_err(|e| {
            warn!("{}", e);
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::MemoryBackend;
    use chrono::NaiveDate;
    use rstest::rstest;

    fn open() -> (Store, MemoryBackend) {
        let handle = MemoryBackend::new();
        let store = Store::open(handle.clone()).unwrap();
        (store, handle)
    }

    fn reopen(handle: &MemoryBackend) -> Store {
        Store::open(handle.clone()).unwrap()
    }

    fn tx(label: &str, account: &str) -> Transaction {
        let at = NaiveDate::from_ymd_opt(2024, 1, 2)
            .unwrap()
            .and_hms_opt(3, 4, 5)
            .unwrap();
        Transaction::at(Decimal::new(125, 1), label, account, at)
    }

    #[test]
    fn test_open_empty_backend_writes_default_document() {
        let (store, handle) = open();

        assert!(store.accounts().is_empty());
        assert!(store.transactions().is_empty());
        assert_eq!(store.settings(), Settings::default());
        assert_eq!(handle.document(), Some(PersistedDocument::default()));
    }

    #[rstest]
    #[case::malformed_account(vec!["no-balance"], vec![])]
    #[case::empty_account_name(vec![":5"], vec![])]
    #[case::negative_balance(vec!["Main:-5"], vec![])]
    #[case::empty_transaction_fields(vec!["Main:5"], vec!["::1:2024-01-01 00:00:00"])]
    fn test_open_rejects_invalid_record(
        #[case] accounts: Vec<&str>,
        #[case] transactions: Vec<&str>,
    ) {
        let handle = MemoryBackend::with_document(PersistedDocument {
            accounts: accounts.into_iter().map(String::from).collect(),
            transactions: transactions.into_iter().map(String::from).collect(),
            ..PersistedDocument::default()
        });

        let result = Store::open(handle);

        assert!(matches!(result, Err(CashFlowError::DatabaseInit { .. })));
    }

    #[test]
    fn test_open_fails_when_initial_save_fails() {
        let handle = MemoryBackend::new();
        handle.set_fail_saves(true);

        let result = Store::open(handle);

        assert!(matches!(result, Err(CashFlowError::DatabaseInit { .. })));
    }

    #[test]
    fn test_get_account() {
        let (mut store, _) = open();
        store.add_account(Account::new("Main", Decimal::new(5, 0))).unwrap();

        assert_eq!(store.get_account("Main").unwrap().balance(), Decimal::new(5, 0));
        assert!(matches!(
            store.get_account("main"),
            Err(CashFlowError::AccountNotFound { .. })
        ));
        assert!(store.account_exists("Main"));
        assert!(!store.account_exists("Other"));
    }

    #[test]
    fn test_add_account_twice_is_rejected_without_saving() {
        let (mut store, handle) = open();

        assert!(store.add_account(Account::new("Main", Decimal::ZERO)).unwrap());
        let saves = handle.save_count();
        assert!(!store.add_account(Account::new("Main", Decimal::new(9, 0))).unwrap());

        assert_eq!(store.accounts().len(), 1);
        assert_eq!(store.get_account("Main").unwrap().balance(), Decimal::ZERO);
        assert_eq!(handle.save_count(), saves);
    }

    #[rstest]
    #[case::colon("Main:1")]
    #[case::empty("")]
    fn test_add_account_rejects_bad_names(#[case] name: &str) {
        let (mut store, _) = open();
        assert!(store.add_account(Account::new(name, Decimal::ZERO)).is_err());
        assert!(store.accounts().is_empty());
    }

    #[test]
    fn test_mutations_are_written_through() {
        let (mut store, handle) = open();

        store.add_account(Account::new("Main", Decimal::ZERO)).unwrap();
        store.add_transaction(tx("coffee", "Main")).unwrap();
        store.set_transactions_per_page(50).unwrap();

        let reloaded = reopen(&handle);
        assert_eq!(reloaded.accounts(), store.accounts());
        assert_eq!(reloaded.transactions(), store.transactions());
        assert_eq!(reloaded.settings().transactions_per_page, 50);
    }

    #[test]
    fn test_remove_account_keeps_transactions() {
        let (mut store, _) = open();
        store.add_account(Account::new("Main", Decimal::ZERO)).unwrap();
        store.add_transaction(tx("coffee", "Main")).unwrap();

        assert!(store.remove_account("Main").unwrap());
        assert!(!store.remove_account("Main").unwrap());

        assert!(store.accounts().is_empty());
        assert_eq!(store.transactions().len(), 1);
        assert_eq!(store.transactions()[0].account, "Main");
    }

    #[test]
    fn test_update_account_unknown_name() {
        let (mut store, _) = open();
        assert!(!store.update_account(Account::new("Ghost", Decimal::ONE)).unwrap());
    }

    #[test]
    fn test_adjust_balance_scenario() {
        let (mut store, _) = open();
        store.add_account(Account::new("Main", Decimal::ZERO)).unwrap();

        assert_eq!(store.adjust_balance("Main", Decimal::new(500, 0)).unwrap(), Decimal::new(500, 0));

        let result = store.adjust_balance("Main", Decimal::new(-700, 0));
        assert!(matches!(result, Err(CashFlowError::InvalidBalance { .. })));
        assert_eq!(store.get_account("Main").unwrap().balance(), Decimal::new(500, 0));

        assert!(matches!(
            store.adjust_balance("Ghost", Decimal::ONE),
            Err(CashFlowError::AccountNotFound { .. })
        ));
    }

    #[rstest]
    #[case::past_max(Decimal::MAX, Decimal::ONE)]
    #[case::max_plus_max(Decimal::MAX, Decimal::MAX)]
    fn test_adjust_balance_overflow_keeps_balance(#[case] start: Decimal, #[case] delta: Decimal) {
        let (mut store, handle) = open();
        store.add_account(Account::new("Main", start)).unwrap();
        let saves = handle.save_count();

        let result = store.adjust_balance("Main", delta);

        assert!(matches!(result, Err(CashFlowError::ArithmeticOverflow { .. })));
        assert_eq!(store.get_account("Main").unwrap().balance(), start);
        assert_eq!(handle.save_count(), saves);
    }

    #[test]
    fn test_add_transaction_requires_existing_account() {
        let (mut store, _) = open();

        let result = store.add_transaction(tx("coffee", "Main"));

        assert!(matches!(result, Err(CashFlowError::AccountNotFound { .. })));
        assert!(store.transactions().is_empty());
    }

    #[test]
    fn test_add_transaction_rejects_colon_in_label() {
        let (mut store, _) = open();
        store.add_account(Account::new("Main", Decimal::ZERO)).unwrap();

        let result = store.add_transaction(tx("a:b", "Main"));

        assert!(matches!(result, Err(CashFlowError::ReservedCharacter { .. })));
    }

    #[test]
    fn test_remove_transaction_then_reload() {
        let (mut store, handle) = open();
        store.add_account(Account::new("Main", Decimal::ZERO)).unwrap();
        for label in ["a", "b", "c"] {
            store.add_transaction(tx(label, "Main")).unwrap();
        }

        let removed = store.remove_transaction_at(2).unwrap();

        assert_eq!(removed.label, "b");
        let reloaded = reopen(&handle);
        assert_eq!(reloaded.transactions(), store.transactions());
        let labels: Vec<&str> = reloaded.transactions().iter().map(|t| t.label.as_str()).collect();
        assert_eq!(labels, ["a", "c"]);
    }

    #[rstest]
    #[case::zero(0)]
    #[case::past_end(3)]
    fn test_remove_transaction_out_of_range(#[case] index: usize) {
        let (mut store, _) = open();
        store.add_account(Account::new("Main", Decimal::ZERO)).unwrap();
        store.add_transaction(tx("a", "Main")).unwrap();
        store.add_transaction(tx("b", "Main")).unwrap();

        let result = store.remove_transaction_at(index);

        assert!(matches!(
            result,
            Err(CashFlowError::TransactionIndexOutOfRange { len: 2, .. })
        ));
        assert_eq!(store.transactions().len(), 2);
    }

    #[test]
    fn test_remove_account_transaction_checks_owner() {
        let (mut store, _) = open();
        store.add_account(Account::new("Main", Decimal::ZERO)).unwrap();
        store.add_account(Account::new("Savings", Decimal::ZERO)).unwrap();
        store.add_transaction(tx("rent", "Main")).unwrap();
        store.add_transaction(tx("interest", "Savings")).unwrap();

        let result = store.remove_account_transaction("Main", 2);
        assert!(matches!(result, Err(CashFlowError::TransactionNotOwned { index: 2, .. })));

        let removed = store.remove_account_transaction("Savings", 2).unwrap();
        assert_eq!(removed.label, "interest");
        assert_eq!(store.transactions().len(), 1);
    }

    #[test]
    fn test_account_transactions_use_global_positions() {
        let (mut store, _) = open();
        store.add_account(Account::new("Main", Decimal::ZERO)).unwrap();
        store.add_account(Account::new("Savings", Decimal::ZERO)).unwrap();
        store.add_transaction(tx("a", "Main")).unwrap();
        store.add_transaction(tx("b", "Savings")).unwrap();
        store.add_transaction(tx("c", "Main")).unwrap();

        let positions: Vec<usize> = store
            .account_transactions("Main")
            .into_iter()
            .map(|(i, _)| i)
            .collect();
        assert_eq!(positions, [1, 3]);
    }

    #[rstest]
    #[case::lower_bound(10)]
    #[case::upper_bound(100)]
    #[case::middle(42)]
    fn test_set_transactions_per_page_in_range(#[case] value: i64) {
        let (mut store, _) = open();
        store.set_transactions_per_page(value).unwrap();
        assert_eq!(i64::from(store.settings().transactions_per_page), value);
    }

    #[rstest]
    #[case::below(9)]
    #[case::above(101)]
    #[case::negative(-1)]
    fn test_set_transactions_per_page_out_of_range(#[case] value: i64) {
        let (mut store, handle) = open();
        let saves = handle.save_count();

        let result = store.set_transactions_per_page(value);

        assert!(matches!(result, Err(CashFlowError::Range { .. })));
        assert_eq!(store.settings().transactions_per_page, 30);
        assert_eq!(handle.save_count(), saves);
    }

    #[rstest]
    #[case::lower("usd", Currency::Usd)]
    #[case::upper("EUR", Currency::Eur)]
    #[case::mixed("pLn", Currency::Pln)]
    fn test_set_preferred_currency_normalizes(#[case] code: &str, #[case] expected: Currency) {
        let (mut store, handle) = open();

        assert_eq!(store.set_preferred_currency(code).unwrap(), expected);

        let saved = handle.document().unwrap();
        assert_eq!(saved.settings.preferred_currency, expected);
    }

    #[rstest]
    #[case::gbp("GBP")]
    #[case::empty("")]
    fn test_set_preferred_currency_rejects_unknown(#[case] code: &str) {
        let (mut store, _) = open();
        store.set_preferred_currency("USD").unwrap();

        let result = store.set_preferred_currency(code);

        assert!(matches!(result, Err(CashFlowError::UnsupportedCurrency { .. })));
        assert_eq!(store.settings().preferred_currency, Currency::Usd);
    }

    #[test]
    fn test_failed_save_keeps_memory_state() {
        let (mut store, handle) = open();
        handle.set_fail_saves(true);

        let result = store.add_account(Account::new("Main", Decimal::ZERO));

        assert!(matches!(result, Err(CashFlowError::DatabaseSave { .. })));
        assert!(store.account_exists("Main"));
        assert!(handle.document().unwrap().accounts.is_empty());

        handle.set_fail_saves(false);
        store.set_transactions_per_page(20).unwrap();
        assert_eq!(handle.document().unwrap().accounts, ["Main:0"]);
    }
}
