//! Exchange-rate quote types.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

/// Notice shown when checkout prices against the fallback rate.
pub const FALLBACK_NOTICE: &str = "rate unavailable, using estimate";

/// Where a quote came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RateSource {
    /// Fetched from the price service (possibly served from cache).
    Live,
    /// The configured constant, used after a failed fetch.
    Fallback,
}

/// Display-currency price of one unit of the payment asset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RateQuote {
    #[serde(with = "rust_decimal::serde::str")]
    pub rate: Decimal,
    pub source: RateSource,
    pub fetched_at: DateTime<Utc>,
}

impl RateQuote {
    /// A quote fetched from the price service just now.
    #[must_use]
    pub fn live(rate: Decimal) -> Self {
        Self {
            rate,
            source: RateSource::Live,
            fetched_at: Utc::now(),
        }
    }

    /// A quote built from the fallback constant.
    #[must_use]
    pub fn fallback(rate: Decimal) -> Self {
        Self {
            rate,
            source: RateSource::Fallback,
            fetched_at: Utc::now(),
        }
    }

    /// Whether this quote is the fallback estimate.
    #[must_use]
    pub const fn is_fallback(&self) -> bool {
        matches!(self.source, RateSource::Fallback)
    }

    /// Notice to show alongside a fallback quote.
    #[must_use]
    pub const fn notice(&self) -> Option<&'static str> {
        if self.is_fallback() {
            Some(FALLBACK_NOTICE)
        } else {
            None
        }
    }
}
