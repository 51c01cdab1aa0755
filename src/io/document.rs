//! Persisted document schema
//!
//! The on-disk document has exactly three top-level keys:
//!
//! ```json
//! {
//!   "accounts": ["name:balance"],
//!   "transactions": ["account:label:amount:yyyy-MM-dd HH:mm:ss"],
//!   "settings": { "transactionsPerPage": 30, "preferredCurrency": "PLN" }
//! }
//! ```
//!
//! Records are stored as delimited strings rather than nested objects.
//! This module converts between that schema and the typed collections.
//! All functions are pure (no I/O).

use crate::types::{validate_text_field, Account, CashFlowError, Settings, Transaction};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// The document as written to disk
///
/// No field has a serde default: a document missing any of the three keys
/// fails to deserialize.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PersistedDocument {
    pub accounts: Vec<String>,
    pub transactions: Vec<String>,
    pub settings: Settings,
}

/// Typed contents of a document
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Records {
    pub accounts: Vec<Account>,
    pub transactions: Vec<Transaction>,
    pub settings: Settings,
}

impl PersistedDocument {
    /// Build a document from the typed collections
    pub fn encode(accounts: &[Account], transactions: &[Transaction], settings: Settings) -> Self {
        PersistedDocument {
            accounts: accounts.iter().map(Account::to_text).collect(),
            transactions: transactions.iter().map(Transaction::to_text).collect(),
            settings,
        }
    }

    /// Decode every record and check the document-wide invariants
    ///
    /// # Errors
    ///
    /// - `Format` for the first malformed account or transaction string
    /// - `Format` for an empty name, account or label, or a negative balance
    /// - `Format` if two accounts share a name
    /// - `Range` if `transactionsPerPage` is out of bounds
    pub fn decode(&self) -> Result<Records, CashFlowError> {
        let mut seen = HashSet::new();
        let mut accounts = Vec::with_capacity(self.accounts.len());
        for text in &self.accounts {
            let account = Account::from_text(text)?;
            check_field("account", text, "account name", account.name())?;
            if account.balance() < Decimal::ZERO {
                return Err(CashFlowError::format("account", text, "balance is negative"));
            }
            if !seen.insert(account.name().to_string()) {
                return Err(CashFlowError::format("account", text, "duplicate account name"));
            }
            accounts.push(account);
        }

        let transactions = self
            .transactions
            .iter()
            .map(|text| {
                let transaction = Transaction::from_text(text)?;
                check_field("transaction", text, "account name", &transaction.account)?;
                check_field("transaction", text, "label", &transaction.label)?;
                Ok(transaction)
            })
            .collect::<Result<Vec<_>, CashFlowError>>()?;

        Settings::validate_transactions_per_page(i64::from(self.settings.transactions_per_page))?;

        Ok(Records {
            accounts,
            transactions,
            settings: self.settings,
        })
    }

    /// Parse the JSON text of a document
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }

    /// Render the document as pretty-printed JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

/// Apply the input rules for names and labels to a stored record
fn check_field(
    record: &'static str,
    text: &str,
    field: &'static str,
    value: &str,
) -> Result<(), CashFlowError> {
    validate_text_field(field, value).map_err(|e| CashFlowError::format(record, text, e.to_string()))
}
