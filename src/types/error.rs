//! Error types for CashFlow
//!
//! This module defines every error that can surface from the record codec,
//! the store and the command handlers.
//!
//! # Error Categories
//!
//! - **Persistence Errors**: the document cannot be loaded (fatal) or saved (recoverable)
//! - **Record Errors**: a persisted account/transaction string is malformed
//! - **Validation Errors**: negative balances, settings out of range, unsupported currencies,
//!   reserved characters in names and labels
//! - **Lookup Errors**: missing accounts, transaction indexes out of range or owned by another account

use rust_decimal::Decimal;
use thiserror::Error;

/// Main error type for CashFlow
///
/// Only `DatabaseInit` is fatal; every other variant is reported by the
/// command that triggered it and the interactive loop keeps running.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CashFlowError {
    /// A persisted record could not be decoded
    #[error("Invalid {record} record '{input}': {reason}")]
    Format {
        /// Kind of record ("account" or "transaction")
        record: &'static str,
        /// The offending text
        input: String,
        /// What was wrong with it
        reason: String,
    },

    /// The document could not be loaded at startup
    ///
    /// This is a fatal error that aborts the session.
    #[error("Cannot initialise database {path}: {message}")]
    DatabaseInit {
        /// Location of the document
        path: String,
        /// Description of the failure
        message: String,
    },

    /// The document could not be written
    ///
    /// The in-memory state is kept and the loop continues.
    #[error("Cannot save database {path}: {message}")]
    DatabaseSave {
        /// Location of the document
        path: String,
        /// Description of the failure
        message: String,
    },

    /// No account carries the requested name
    #[error("Account '{name}' does not exist")]
    AccountNotFound {
        /// Name that was looked up
        name: String,
    },

    /// A numeric setting is outside its bounds
    #[error("{setting} must be between {min} and {max}, got {value}")]
    Range {
        /// Setting name as it appears in the document
        setting: &'static str,
        /// Rejected value
        value: i64,
        /// Inclusive lower bound
        min: i64,
        /// Inclusive upper bound
        max: i64,
    },

    /// Currency code outside {PLN, USD, EUR}
    #[error("Currency '{code}' is not supported")]
    UnsupportedCurrency {
        /// Rejected code as typed
        code: String,
    },

    /// A balance update would leave the account negative
    #[error("Balance of account '{account}' cannot become negative ({balance})")]
    InvalidBalance {
        /// Account name
        account: String,
        /// Rejected balance
        balance: Decimal,
    },

    /// A name or label contains the record delimiter
    #[error("{field} '{value}' must not contain ':'")]
    ReservedCharacter {
        /// Which input was rejected ("account name", "label")
        field: &'static str,
        /// Rejected value
        value: String,
    },

    /// A required text input was empty
    #[error("{field} must not be empty")]
    EmptyField {
        /// Which input was rejected
        field: &'static str,
    },

    /// User input that should be a number is not one
    #[error("'{input}' is not a valid amount")]
    InvalidAmount {
        /// Rejected text
        input: String,
    },

    /// A computation on user supplied amounts left the decimal range
    ///
    /// The operation is rejected and nothing changes.
    #[error("Arithmetic overflow in {operation}")]
    ArithmeticOverflow {
        /// Operation that would overflow
        operation: &'static str,
    },

    /// A 1-based transaction index is outside the collection
    #[error("Transaction {index} does not exist ({len} recorded)")]
    TransactionIndexOutOfRange {
        /// Requested 1-based index
        index: usize,
        /// Number of stored transactions
        len: usize,
    },

    /// The transaction at an index belongs to another account
    #[error("Transaction {index} does not belong to account '{account}'")]
    TransactionNotOwned {
        /// Requested 1-based index
        index: usize,
        /// Account the removal was requested from
        account: String,
    },
}

// Helper functions for creating common errors

impl CashFlowError {
    /// Create a Format error
    pub fn format(record: &'static str, input: &str, reason: impl Into<String>) -> Self {
        CashFlowError::Format {
            record,
            input: input.to_string(),
            reason: reason.into(),
        }
    }

    /// Create a DatabaseInit error
    pub fn database_init(path: &str, message: impl Into<String>) -> Self {
        CashFlowError::DatabaseInit {
            path: path.to_string(),
            message: message.into(),
        }
    }

    /// Create a DatabaseSave error
    pub fn database_save(path: &str, message: impl Into<String>) -> Self {
        CashFlowError::DatabaseSave {
            path: path.to_string(),
            message: message.into(),
        }
    }

    /// Create an AccountNotFound error
    pub fn account_not_found(name: &str) -> Self {
        CashFlowError::AccountNotFound {
            name: name.to_string(),
        }
    }

    /// Create an UnsupportedCurrency error
    pub fn unsupported_currency(code: &str) -> Self {
        CashFlowError::UnsupportedCurrency {
            code: code.to_string(),
        }
    }

    /// Create an InvalidBalance error
    pub fn invalid_balance(account: &str, balance: Decimal) -> Self {
        CashFlowError::InvalidBalance {
            account: account.to_string(),
            balance,
        }
    }

    /// Create an InvalidAmount error
    pub fn invalid_amount(input: &str) -> Self {
        CashFlowError::InvalidAmount {
            input: input.to_string(),
        }
    }

    /// Create an ArithmeticOverflow error
    pub fn arithmetic_overflow(operation: &'static str) -> Self {
        CashFlowError::ArithmeticOverflow { operation }
    }

    /// Returns true for errors that must abort the session
    pub fn is_fatal(&self) -> bool {
        matches!(self, CashFlowError::DatabaseInit { .. })
    }
}

/// Reject names and labels that would corrupt the colon-delimited records
///
/// # Arguments
///
/// * `field` - Human readable name of the input, used in the error
/// * `value` - The text to check
///
/// # Errors
///
/// - `EmptyField` if `value` is blank
/// - `ReservedCharacter` if `value` contains `:`
pub fn validate_text_field(field: &'static str, value: &str) -> Result<(), CashFlowError> {
    if value.trim().is_empty() {
        return Err(CashFlowError::EmptyField { field });
    }
    if value.contains(':') {
        return Err(CashFlowError::ReservedCharacter {
            field,
            value: value.to_string(),
        });
    }
    Ok(())
}
