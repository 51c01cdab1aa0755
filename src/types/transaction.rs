//! Transaction-related types for CashFlow
//!
//! A transaction is a labelled amount attached to an account by name.
//! Its text form is `account:label:amount:yyyy-MM-dd HH:mm:ss`.

use super::error::CashFlowError;
use chrono::{Local, NaiveDateTime, Timelike};
use rust_decimal::Decimal;
use std::str::FromStr;

/// Fixed timestamp pattern of the persisted form
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A recorded transaction
#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    /// Signed amount
    pub amount: Decimal,

    /// Free-text description
    pub label: String,

    /// Name of the owning account (foreign key by name)
    pub account: String,

    /// Creation time, whole seconds
    pub timestamp: NaiveDateTime,
}

impl Transaction {
    /// Create a transaction stamped with the current local time
    pub fn new(amount: Decimal, label: impl Into<String>, account: impl Into<String>) -> Self {
        Self::at(amount, label, account, Local::now().naive_local())
    }

    /// Create a transaction with an explicit timestamp
    ///
    /// Sub-second precision is dropped so that the text form round-trips.
    pub fn at(
        amount: Decimal,
        label: impl Into<String>,
        account: impl Into<String>,
        timestamp: NaiveDateTime,
    ) -> Self {
        Transaction {
            amount,
            label: label.into(),
            account: account.into(),
            timestamp: timestamp.with_nanosecond(0).unwrap_or(timestamp),
        }
    }

    /// Encode as `account:label:amount:timestamp`
    pub fn to_text(&self) -> String {
        format!(
            "{}:{}:{}:{}",
            self.account,
            self.label,
            self.amount,
            self.timestamp.format(TIMESTAMP_FORMAT)
        )
    }

    /// Decode the text form
    ///
    /// The timestamp itself contains colons, so only the first three
    /// delimiters separate fields.
    ///
    /// # Errors
    ///
    /// Returns `Format` on a wrong field count, a non-numeric amount or a
    /// timestamp that does not match [`TIMESTAMP_FORMAT`] exactly.
    pub fn from_text(input: &str) -> Result<Self, CashFlowError> {
        let parts: Vec<&str> = input.splitn(4, ':').collect();
        if parts.len() != 4 {
            return Err(CashFlowError::format(
                "transaction",
                input,
                format!("expected 4 fields, found {}", parts.len()),
            ));
        }

        let amount = Decimal::from_str(parts[2].trim())
            .map_err(|_| CashFlowError::format("transaction", input, "amount is not a number"))?;

        let timestamp = NaiveDateTime::parse_from_str(parts[3], TIMESTAMP_FORMAT).map_err(|e| {
            CashFlowError::format("transaction", input, format!("bad timestamp: {}", e))
        })?;

        Ok(Transaction {
            amount,
            label: parts[1].to_string(),
            account: parts[0].to_string(),
            timestamp,
        })
    }
}
