//! Application state shared across handlers.

use std::sync::Arc;

use crate::config::StorefrontConfig;
use crate::rates::{ExchangeRateClient, RateError};

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// configuration and the exchange-rate client. Per-shopper state lives in
/// the session, not here.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    rates: ExchangeRateClient,
}

impl AppState {
    /// Create a new application state.
    ///
    /// # Errors
    ///
    /// Returns `RateError` if the exchange-rate HTTP client cannot be built.
    pub fn new(config: StorefrontConfig) -> Result<Self, RateError> {
        let rates = ExchangeRateClient::new(&config.exchange_rate)?;
        Ok(Self {
            inner: Arc::new(AppStateInner { config, rates }),
        })
    }

    /// Get a reference to the configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the exchange-rate client.
    #[must_use]
    pub fn rates(&self) -> &ExchangeRateClient {
        &self.inner.rates
    }
}
