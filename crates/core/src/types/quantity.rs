//! Bounded purchase quantity.

use core::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// A pending or requested quantity, always within `1..=100`.
///
/// Construction through [`Quantity::new`] rejects anything out of range, so
/// a `Quantity` in hand is always valid. Deserialization applies the same
/// check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Quantity(u32);

impl Quantity {
    /// Smallest accepted quantity.
    pub const MIN: Self = Self(1);
    /// Largest accepted quantity.
    pub const MAX: Self = Self(100);

    /// Create a quantity, returning `None` outside `1..=100`.
    #[must_use]
    pub fn new(value: i64) -> Option<Self> {
        if (i64::from(Self::MIN.0)..=i64::from(Self::MAX.0)).contains(&value) {
            u32::try_from(value).ok().map(Self)
        } else {
            None
        }
    }

    /// The underlying value.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }

    /// One more, or `None` at the upper bound.
    #[must_use]
    pub fn increment(self) -> Option<Self> {
        Self::new(i64::from(self.0) + 1)
    }

    /// One less, or `None` at the lower bound.
    #[must_use]
    pub fn decrement(self) -> Option<Self> {
        Self::new(i64::from(self.0) - 1)
    }
}

impl Default for Quantity {
    fn default() -> Self {
        Self::MIN
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<Quantity> for u32 {
    fn from(quantity: Quantity) -> Self {
        quantity.0
    }
}

impl<'de> Deserialize<'de> for Quantity {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = i64::deserialize(deserializer)?;
        Self::new(value).ok_or_else(|| {
            serde::de::Error::custom(format!(
                "quantity must be between {} and {}, got {value}",
                Self::MIN,
                Self::MAX
            ))
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_new_accepts_range() {
        assert_eq!(Quantity::new(1), Some(Quantity::MIN));
        assert_eq!(Quantity::new(100), Some(Quantity::MAX));
        assert_eq!(Quantity::new(42).unwrap().get(), 42);
    }

    #[test]
    fn test_new_rejects_out_of_range() {
        for value in [i64::MIN, -1, 0, 101, 1_000, i64::MAX] {
            assert_eq!(Quantity::new(value), None, "value {value}");
        }
    }

    #[test]
    fn test_increment_decrement_stop_at_bounds() {
        assert_eq!(Quantity::MAX.increment(), None);
        assert_eq!(Quantity::MIN.decrement(), None);
        assert_eq!(Quantity::MIN.increment().unwrap().get(), 2);
        assert_eq!(Quantity::MAX.decrement().unwrap().get(), 99);
    }

    #[test]
    fn test_default_is_one() {
        assert_eq!(Quantity::default().get(), 1);
    }

    #[test]
    fn test_deserialize_validates() {
        assert_eq!(serde_json::from_str::<Quantity>("7").unwrap().get(), 7);
        assert!(serde_json::from_str::<Quantity>("0").is_err());
        assert!(serde_json::from_str::<Quantity>("101").is_err());
    }
}
