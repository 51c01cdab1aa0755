//! CashFlow Library
//! # Overview
//!
//! This library provides an interactive, line-oriented personal finance
//! tracker: named accounts with PLN balances, labelled transactions, two user
//! settings and an offline currency converter. Everything is kept in a single
//! JSON document that is rewritten after every change.
//!
//! # Architecture
//!
//! The system is organized into several key components:
//!
//! - [`types`] - Core data types (Account, Transaction, Currency, Settings, errors)
//! - [`cli`] - CLI arguments parsing and logging setup
//! - [`core`] - Business logic components:
//!   - [`core::store`] - Accounts, transactions and settings with write-through persistence
//!   - [`core::exchange`] - Static exchange-rate table
//!   - [`core::names`] - Default account name suggestions
//! - [`io`] - The persisted document and its backends (JSON file, memory)
//! - [`menu`] - Interactive contexts (root, account, settings, exchange)
//!
//! # Record Format
//!
//! Inside the document, accounts and transactions are stored as
//! colon-separated strings:
//!
//! - account: `name:balance`
//! - transaction: `account:label:amount:YYYY-MM-DD HH:MM:SS`
//!
//! Names and labels therefore cannot contain `:`.

// Module declarations
pub mod cli;
pub mod core;
pub mod io;
pub mod menu;
pub mod types;

pub use core::{RateTable, Store};
pub use io::{JsonFileBackend, MemoryBackend, PersistedDocument};
pub use menu::{run_session, Session};
pub use types::{Account, CashFlowError, Currency, Settings, Transaction};
