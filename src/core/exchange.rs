//! Offline currency conversion
//!
//! Rates are fixed and expressed in PLN per unit of currency:
//! 1 USD = 4.0 PLN, 1 EUR = 4.5 PLN. Cross rates go through PLN.

use crate::types::{CashFlowError, Currency};
use rust_decimal::Decimal;

/// Static exchange-rate table
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RateTable {
    usd_pln: Decimal,
    eur_pln: Decimal,
}

impl Default for RateTable {
    fn default() -> Self {
        Self::offline()
    }
}

impl RateTable {
    /// The built-in rates
    pub fn offline() -> Self {
        RateTable {
            usd_pln: Decimal::new(40, 1),
            eur_pln: Decimal::new(45, 1),
        }
    }

    /// Value of one unit of `currency` in PLN
    pub fn rate_to_pln(&self, currency: Currency) -> Decimal {
        match currency {
            Currency::Pln => Decimal::ONE,
            Currency::Usd => self.usd_pln,
            Currency::Eur => self.eur_pln,
        }
    }

    /// Convert `amount` from one currency to another
    ///
    /// Converting a currency to itself returns `amount` unchanged; rejecting
    /// such a request is left to the caller.
    ///
    /// # Errors
    ///
    /// Returns `ArithmeticOverflow` if the result is out of the decimal range.
    pub fn convert(&self, amount: Decimal, from: Currency, to: Currency) -> Result<Decimal, CashFlowError> {
        if from == to {
            return Ok(amount);
        }
        amount
            .checked_mul(self.rate_to_pln(from))
            .and_then(|pln| pln.checked_div(self.rate_to_pln(to)))
            .ok_or_else(|| CashFlowError::arithmetic_overflow("conversion"))
    }

    /// Convert between currency codes
    ///
    /// # Errors
    ///
    /// - `UnsupportedCurrency` if either code is not PLN, USD or EUR
    /// - `ArithmeticOverflow` if the result is out of the decimal range
    pub fn convert_codes(&self, amount: Decimal, from: &str, to: &str) -> Result<Decimal, CashFlowError> {
        let from: Currency = from.parse()?;
        let to: Currency = to.parse()?;
        self.convert(amount, from, to)
    }
}
