//! Account-related types for CashFlow
//!
//! An account is a named balance. Names are the unique key the store and
//! the transactions refer to.

use super::error::CashFlowError;
use rust_decimal::Decimal;
use std::str::FromStr;

/// A named account and its balance
#[derive(Debug, Clone, PartialEq)]
pub struct Account {
    /// Unique, case-sensitive name
    name: String,

    /// Current balance, never negative after an update
    balance: Decimal,
}

impl Account {
    /// Create an account with the given balance
    pub fn new(name: impl Into<String>, balance: Decimal) -> Self {
        Account {
            name: name.into(),
            balance,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn balance(&self) -> Decimal {
        self.balance
    }

    /// Replace the balance
    ///
    /// # Errors
    ///
    /// Returns `InvalidBalance` if `new_balance` is negative; the account is
    /// left untouched in that case.
    pub fn update_balance(&mut self, new_balance: Decimal) -> Result<(), CashFlowError> {
        if new_balance < Decimal::ZERO {
            return Err(CashFlowError::invalid_balance(&self.name, new_balance));
        }
        self.balance = new_balance;
        Ok(())
    }

    /// Encode as `name:balance`
    pub fn to_text(&self) -> String {
        format!("{}:{}", self.name, self.balance)
    }

    /// Decode a `name:balance` string
    ///
    /// # Errors
    ///
    /// Returns `Format` when the text does not split into exactly two
    /// fields or the balance is not a decimal.
    pub fn from_text(input: &str) -> Result<Self, CashFlowError> {
        let parts: Vec<&str> = input.split(':').collect();
        if parts.len() != 2 {
            return Err(CashFlowError::format(
                "account",
                input,
                format!("expected 2 fields, found {}", parts.len()),
            ));
        }

        let balance = Decimal::from_str(parts[1].trim())
            .map_err(|_| CashFlowError::format("account", input, "balance is not a number"))?;

        Ok(Account::new(parts[0], balance))
    }
}
