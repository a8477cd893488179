//! Spot exchange-rate client.
//!
//! # Architecture
//!
//! - One GET to a `CoinGecko`-style `simple/price` endpoint per quote, no retry
//! - Live quotes are cached in memory via `moka` for a short TTL
//! - Any failure (network, timeout, status, parse) is logged and replaced by
//!   the configured fallback rate; callers never see an error from [`ExchangeRateClient::quote`]
//!
//! # Response shape
//!
//! ```json
//! { "bitcoin": { "usd": 67187.12 } }
//! ```

mod types;

pub use types::{FALLBACK_NOTICE, RateQuote, RateSource};

use std::collections::HashMap;
use std::sync::Arc;

use bitbazaar_core::CurrencyCode;
use moka::future::Cache;
use reqwest::header::ACCEPT;
use rust_decimal::Decimal;
use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;
use tracing::{debug, instrument, warn};
use url::Url;

use crate::config::ExchangeRateConfig;

/// Header carrying the optional `CoinGecko` demo API key.
const API_KEY_HEADER: &str = "x-cg-demo-api-key";

/// Errors that can occur when fetching a spot price.
#[derive(Debug, Error)]
pub enum RateError {
    /// HTTP request failed (connect, timeout, body read).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The price service answered with a non-success status.
    #[error("Price service returned HTTP {0}")]
    Status(reqwest::StatusCode),

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// The response did not contain the requested pair.
    #[error("No {currency} price for {asset} in response")]
    MissingPrice { asset: String, currency: String },

    /// The service reported a zero or negative price.
    #[error("Price service returned non-positive price {0}")]
    NonPositive(Decimal),
}

// =============================================================================
// ExchangeRateClient
// =============================================================================

/// Client for the spot price service.
#[derive(Clone)]
pub struct ExchangeRateClient {
    inner: Arc<ExchangeRateClientInner>,
}

struct ExchangeRateClientInner {
    client: reqwest::Client,
    url: Url,
    asset: String,
    currency: CurrencyCode,
    fallback_rate: Decimal,
    api_key: Option<SecretString>,
    cache: Cache<String, RateQuote>,
}

impl ExchangeRateClient {
    /// Create a new client.
    ///
    /// # Errors
    ///
    /// Returns `RateError::Http` if the HTTP client cannot be built.
    pub fn new(config: &ExchangeRateConfig) -> Result<Self, RateError> {
        let client = reqwest::Client::builder().timeout(config.timeout).build()?;
        let currency = CurrencyCode::default();

        let mut url = config.endpoint.clone();
        url.query_pairs_mut()
            .append_pair("ids", &config.asset)
            .append_pair("vs_currencies", currency.quote_code());

        let cache = Cache::builder()
            .max_capacity(16)
            .time_to_live(config.cache_ttl)
            .build();

        Ok(Self {
            inner: Arc::new(ExchangeRateClientInner {
                client,
                url,
                asset: config.asset.clone(),
                currency,
                fallback_rate: config.fallback_rate,
                api_key: config.api_key.clone(),
                cache,
            }),
        })
    }

    /// The full request URL, including query string.
    #[must_use]
    pub fn url(&self) -> &Url {
        &self.inner.url
    }

    /// The rate used when a fetch fails.
    #[must_use]
    pub fn fallback_rate(&self) -> Decimal {
        self.inner.fallback_rate
    }

    /// Fetch the current spot price once.
    ///
    /// # Errors
    ///
    /// Returns `RateError` on any network, status, or parse failure, or if
    /// the reported price is not positive.
    #[instrument(skip(self), fields(asset = %self.inner.asset))]
    pub async fn fetch_rate(&self) -> Result<Decimal, RateError> {
        let mut request = self
            .inner
            .client
            .get(self.inner.url.clone())
            .header(ACCEPT, "application/json");
        if let Some(key) = &self.inner.api_key {
            request = request.header(API_KEY_HEADER, key.expose_secret());
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(RateError::Status(status));
        }

        let body = response.text().await?;
        let rate = parse_spot_price(&body, &self.inner.asset, self.inner.currency)?;
        debug!(%rate, "Fetched spot price");
        Ok(rate)
    }

    /// Current quote: cached live rate, fresh live rate, or the fallback.
    ///
    /// Failures are logged and never surfaced. Fallback quotes are not cached,
    /// so the next checkout load tries the service again.
    pub async fn quote(&self) -> RateQuote {
        if let Some(cached) = self.inner.cache.get(&self.inner.asset).await {
            return cached;
        }

        match self.fetch_rate().await {
            Ok(rate) => {
                let quote = RateQuote::live(rate);
                self.inner
                    .cache
                    .insert(self.inner.asset.clone(), quote.clone())
                    .await;
                quote
            }
            Err(e) => {
                warn!(
                    error = %e,
                    fallback = %self.inner.fallback_rate,
                    "Exchange rate fetch failed, using fallback"
                );
                RateQuote::fallback(self.inner.fallback_rate)
            }
        }
    }
}

/// Extract `asset.currency` from a `simple/price` response body.
fn parse_spot_price(body: &str, asset: &str, currency: CurrencyCode) -> Result<Decimal, RateError> {
    let prices: HashMap<String, HashMap<String, Decimal>> = serde_json::from_str(body)?;

    let rate = prices
        .get(asset)
        .and_then(|quotes| quotes.get(currency.quote_code()))
        .copied()
        .ok_or_else(|| RateError::MissingPrice {
            asset: asset.to_string(),
            currency: currency.quote_code().to_string(),
        })?;

    if rate <= Decimal::ZERO {
        return Err(RateError::NonPositive(rate));
    }
    Ok(rate)
}
