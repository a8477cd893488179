//! Payment status for a checkout.

use serde::{Deserialize, Serialize};

/// Whether the shopper has confirmed sending payment.
///
/// Starts `Pending`. The only transition is [`PaymentStatus::confirm`], which
/// is terminal: confirming again leaves the status at `Confirmed`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    #[default]
    Pending,
    Confirmed,
}

impl PaymentStatus {
    /// Apply the confirmation transition.
    #[must_use]
    pub const fn confirm(self) -> Self {
        Self::Confirmed
    }

    /// Whether payment has been confirmed.
    #[must_use]
    pub const fn is_confirmed(self) -> bool {
        matches!(self, Self::Confirmed)
    }
}
