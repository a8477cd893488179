//! Type-safe price representation using decimal arithmetic.
//!
//! Money is accumulated in exact decimal units and only rounded when it is
//! displayed, so sums such as `45.99 * 2 + 5.99 * 2` come out exactly.

use core::fmt;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Number of fractional digits used when displaying a price.
pub const DISPLAY_SCALE: u32 = 2;

/// A price with currency information.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Price {
    /// Amount in the currency's standard unit (e.g., dollars, not cents).
    #[serde(with = "rust_decimal::serde::str")]
    pub amount: Decimal,
    /// ISO 4217 currency code.
    pub currency_code: CurrencyCode,
}

impl Price {
    /// Create a new price.
    #[must_use]
    pub const fn new(amount: Decimal, currency_code: CurrencyCode) -> Self {
        Self {
            amount,
            currency_code,
        }
    }

    /// Create a price in US dollars.
    #[must_use]
    pub const fn usd(amount: Decimal) -> Self {
        Self::new(amount, CurrencyCode::USD)
    }

    /// A zero US dollar price.
    #[must_use]
    pub const fn zero() -> Self {
        Self::usd(Decimal::ZERO)
    }

    /// Multiply the price by a whole number of units.
    #[must_use]
    pub fn times(self, units: u32) -> Self {
        Self::new(self.amount * Decimal::from(units), self.currency_code)
    }

    /// Add two prices of the same currency.
    ///
    /// Returns `None` when the currencies differ or the sum overflows.
    #[must_use]
    pub fn checked_add(self, other: Self) -> Option<Self> {
        if self.currency_code != other.currency_code {
            return None;
        }
        self.amount
            .checked_add(other.amount)
            .map(|amount| Self::new(amount, self.currency_code))
    }

    /// The amount rounded half away from zero to two fractional digits.
    #[must_use]
    pub fn rounded(&self) -> Decimal {
        self.amount
            .round_dp_with_strategy(DISPLAY_SCALE, RoundingStrategy::MidpointAwayFromZero)
    }

    /// Format for display (e.g., "$19.99").
    #[must_use]
    pub fn display(&self) -> String {
        format!("{}{:.2}", self.currency_code.symbol(), self.rounded())
    }
}

impl Default for Price {
    fn default() -> Self {
        Self::zero()
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display())
    }
}

/// ISO 4217 currency codes.
///
/// The storefront prices everything in a single display currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CurrencyCode {
    #[default]
    USD,
}

impl CurrencyCode {
    /// Currency symbol used when formatting amounts.
    #[must_use]
    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::USD => "$",
        }
    }

    /// Lowercase code as used by price quote services (e.g., "usd").
    #[must_use]
    pub const fn quote_code(&self) -> &'static str {
        match self {
            Self::USD => "usd",
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_times_and_add_are_exact() {
        let line = Price::usd(Decimal::new(4599, 2)).times(2);
        let shipping = Price::usd(Decimal::new(599, 2)).times(2);

        assert_eq!(line.amount, Decimal::new(9198, 2));
        assert_eq!(shipping.amount, Decimal::new(1198, 2));
        assert_eq!(
            line.checked_add(shipping).unwrap().amount,
            Decimal::new(10396, 2)
        );
    }

    #[test]
    fn test_display_pads_and_rounds() {
        assert_eq!(Price::usd(Decimal::new(475, 0)).display(), "$475.00");
        assert_eq!(Price::usd(Decimal::new(25, 1)).display(), "$2.50");
        assert_eq!(Price::usd(Decimal::new(10005, 3)).display(), "$10.01");
        assert_eq!(Price::zero().to_string(), "$0.00");
    }

    #[test]
    fn test_serializes_amount_as_string() {
        let price = Price::usd(Decimal::new(1899, 2));
        let json = serde_json::to_value(price).unwrap();
        assert_eq!(json["amount"], "18.99");
        assert_eq!(json["currency_code"], "USD");
    }
}
