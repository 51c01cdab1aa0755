//! Supported currencies
//!
//! Only three codes are known to the application. Parsing is
//! case-insensitive and the canonical form is upper-case.

use super::error::CashFlowError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Currency code accepted by the settings and the exchange menu
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    /// Polish zloty, the currency balances are kept in
    #[default]
    Pln,
    /// US dollar
    Usd,
    /// Euro
    Eur,
}

impl Currency {
    /// All supported currencies in display order
    pub const ALL: [Currency; 3] = [Currency::Pln, Currency::Usd, Currency::Eur];

    /// Upper-case ISO code
    pub fn code(self) -> &'static str {
        match self {
            Currency::Pln => "PLN",
            Currency::Usd => "USD",
            Currency::Eur => "EUR",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Currency {
    type Err = CashFlowError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim();
        Currency::ALL
            .into_iter()
            .find(|currency| currency.code().eq_ignore_ascii_case(code))
            .ok_or_else(|| CashFlowError::unsupported_currency(code))
    }
}
