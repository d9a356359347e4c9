//! Unit cost representation using decimal arithmetic.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A monetary amount with its currency, as reported by Shopify.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Money {
    /// Amount in the currency's standard unit (e.g., dollars, not cents).
    pub amount: Decimal,
    /// ISO 4217 currency code.
    pub currency_code: String,
}

impl Money {
    /// Create a new amount.
    #[must_use]
    pub fn new(amount: Decimal, currency_code: impl Into<String>) -> Self {
        Self {
            amount,
            currency_code: currency_code.into(),
        }
    }
}

impl std::fmt::Display for Money {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.amount, self.currency_code)
    }
}

/// Parse a unit cost cell from the source file.
///
/// Accepts plain decimals (`5.50`), an optional leading `$`, and thousands
/// separators (`$1,200.00`). Empty or unparseable cells yield `None`, which
/// the sync driver treats as "no cost supplied".
#[must_use]
pub fn parse_unit_cost(raw: &str) -> Option<Decimal> {
    let trimmed = raw.trim();
    let unsigned = trimmed.strip_prefix('$').unwrap_or(trimmed).trim_start();
    if unsigned.is_empty() {
        return None;
    }

    let cleaned: String = unsigned.chars().filter(|c| *c != ',').collect();
    Decimal::from_str(&cleaned).ok()
}
