//! Amount of the payment asset owed for a cart.

use core::fmt;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Serialize, Serializer};

/// Fractional digits of the payment asset's smallest unit (satoshi).
pub const ASSET_SCALE: u32 = 8;

/// A cart total converted into the payment asset at 8-digit precision.
///
/// Always renders with exactly eight fractional digits, including the zero
/// value shown before a rate is known.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PayableAmount(Decimal);

impl PayableAmount {
    /// The zero amount, rendered as `0.00000000`.
    #[must_use]
    pub const fn zero() -> Self {
        Self(Decimal::ZERO)
    }

    /// Convert a currency total at `rate` currency units per asset unit.
    ///
    /// A non-positive rate means no usable quote, which yields zero. So does
    /// a division that overflows the decimal range.
    #[must_use]
    pub fn from_total(total: Decimal, rate: Decimal) -> Self {
        if rate <= Decimal::ZERO {
            return Self::zero();
        }
        total.checked_div(rate).map_or_else(Self::zero, |amount| {
            Self(amount.round_dp_with_strategy(ASSET_SCALE, RoundingStrategy::MidpointAwayFromZero))
        })
    }

    /// The underlying decimal amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.0
    }

    /// Whether the amount is zero.
    #[must_use]
    pub const fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}

impl fmt::Display for PayableAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.8}", self.0)
    }
}

impl Serialize for PayableAmount {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
