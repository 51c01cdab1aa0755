//! User settings kept in the persisted document

use super::currency::Currency;
use super::error::CashFlowError;
use serde::{Deserialize, Serialize};

/// Smallest accepted page size
pub const MIN_TRANSACTIONS_PER_PAGE: u32 = 10;
/// Largest accepted page size
pub const MAX_TRANSACTIONS_PER_PAGE: u32 = 100;
/// Page size of a fresh document
pub const DEFAULT_TRANSACTIONS_PER_PAGE: u32 = 30;

/// Application settings
///
/// Both keys are always present; the serialized form uses the camel-case
/// names of the document schema.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    pub transactions_per_page: u32,
    pub preferred_currency: Currency,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            transactions_per_page: DEFAULT_TRANSACTIONS_PER_PAGE,
            preferred_currency: Currency::default(),
        }
    }
}

impl Settings {
    /// Check that a page size lies within the accepted bounds
    ///
    /// # Errors
    ///
    /// Returns `Range` when `value` is outside
    /// [`MIN_TRANSACTIONS_PER_PAGE`, `MAX_TRANSACTIONS_PER_PAGE`].
    pub fn validate_transactions_per_page(value: i64) -> Result<u32, CashFlowError> {
        let min = i64::from(MIN_TRANSACTIONS_PER_PAGE);
        let max = i64::from(MAX_TRANSACTIONS_PER_PAGE);
        if value < min || value > max {
            return Err(CashFlowError::Range {
                setting: "transactionsPerPage",
                value,
                min,
                max,
            });
        }
        // In range, so the conversion cannot truncate
        Ok(value as u32)
    }
}
