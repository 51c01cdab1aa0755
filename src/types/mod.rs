//! Types module
//!
//! Contains core data structures used throughout the application.
//! This module organizes types into logical submodules:
//! - `account`: Account record and its text codec
//! - `transaction`: Transaction record and its text codec
//! - `currency`: Supported currency codes
//! - `settings`: Page size and preferred currency
//! - `error`: Error types for CashFlow

pub mod account;
pub mod currency;
pub mod error;
pub mod settings;
pub mod transaction;

pub use account::Account;
pub use currency::Currency;
pub use error::{validate_text_field, CashFlowError};
pub use settings::Settings;
pub use transaction::{Transaction, TIMESTAMP_FORMAT};
