//! Storefront configuration loaded from environment variables.
//!
//! Every variable is optional; the defaults run a local storefront against the
//! public `CoinGecko` price endpoint.
//!
//! # Environment Variables
//!
//! - `STOREFRONT_HOST` - Bind address (default: 127.0.0.1)
//! - `STOREFRONT_PORT` - Listen port (default: 3000)
//! - `STOREFRONT_BASE_URL` - Public URL; `https://` enables secure cookies
//!   (default: <http://localhost:3000>)
//! - `EXCHANGE_RATE_URL` - Spot price endpoint (default: `CoinGecko` `simple/price`)
//! - `EXCHANGE_RATE_ASSET` - Asset id at the price service (default: bitcoin)
//! - `EXCHANGE_RATE_FALLBACK` - Rate used when the fetch fails (default: 100000)
//! - `EXCHANGE_RATE_TIMEOUT_MS` - Request timeout (default: 5000)
//! - `EXCHANGE_RATE_CACHE_SECS` - How long a live quote is reused (default: 60)
//! - `COINGECKO_API_KEY` - Optional demo API key, sent as `x-cg-demo-api-key`
//! - `PAYMENT_ADDRESS` - Address shoppers pay to (default: the store wallet)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name

use std::collections::HashMap;
use std::net::{IpAddr, SocketAddr};
use std::str::FromStr;
use std::time::Duration;

use rust_decimal::Decimal;
use secrecy::SecretString;
use thiserror::Error;
use url::Url;

/// Default spot price endpoint.
pub const DEFAULT_EXCHANGE_RATE_URL: &str = "https://api.coingecko.com/api/v3/simple/price";

/// Default payment address.
pub const DEFAULT_PAYMENT_ADDRESS: &str = "bc1qar0srrr7xfkvy5l643lydnw9re59gtzzwf5mdq";

/// How long a "copied" indicator stays lit.
pub const COPY_FLAG_DURATION: Duration = Duration::from_millis(2000);

const MIN_ENTROPY_BITS_PER_CHAR: f64 = 3.0;

/// Blocklist of common placeholder patterns (case-insensitive)
const PLACEHOLDER_PATTERNS: &[&str] = &[
    "your-",
    "changeme",
    "replace",
    "placeholder",
    "example",
    "xxx",
    "todo",
    "insert",
    "put-your",
];

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Insecure secret in {0}: {1}")]
    InsecureSecret(String, String),
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Public base URL for the storefront
    pub base_url: String,
    /// Spot price service configuration
    pub exchange_rate: ExchangeRateConfig,
    /// Checkout page reference data
    pub checkout: CheckoutConfig,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment name
    pub sentry_environment: Option<String>,
}

/// Spot price service configuration.
///
/// Implements `Debug` manually to redact the API key.
#[derive(Clone)]
pub struct ExchangeRateConfig {
    /// Price endpoint, without query string
    pub endpoint: Url,
    /// Asset id understood by the price service
    pub asset: String,
    /// Rate substituted when the fetch fails
    pub fallback_rate: Decimal,
    /// Request timeout
    pub timeout: Duration,
    /// Lifetime of a cached live quote
    pub cache_ttl: Duration,
    /// Optional API key
    pub api_key: Option<SecretString>,
}

impl std::fmt::Debug for ExchangeRateConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExchangeRateConfig")
            .field("endpoint", &self.endpoint.as_str())
            .field("asset", &self.asset)
            .field("fallback_rate", &self.fallback_rate)
            .field("timeout", &self.timeout)
            .field("cache_ttl", &self.cache_ttl)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

impl Default for ExchangeRateConfig {
    fn default() -> Self {
        Self {
            endpoint: default_exchange_rate_url(),
            asset: "bitcoin".to_string(),
            fallback_rate: Decimal::from(100_000),
            timeout: Duration::from_secs(5),
            cache_ttl: Duration::from_secs(60),
            api_key: None,
        }
    }
}

/// Checkout reference data.
#[derive(Debug, Clone)]
pub struct CheckoutConfig {
    /// Address shoppers send payment to
    pub payment_address: String,
    /// How long a copy indicator stays set
    pub copy_flag_duration: Duration,
}

impl Default for CheckoutConfig {
    fn default() -> Self {
        Self {
            payment_address: DEFAULT_PAYMENT_ADDRESS.to_string(),
            copy_flag_duration: COPY_FLAG_DURATION,
        }
    }
}

impl Default for StorefrontConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::from([127, 0, 0, 1]),
            port: 3000,
            base_url: "http://localhost:3000".to_string(),
            exchange_rate: ExchangeRateConfig::default(),
            checkout: CheckoutConfig::default(),
            sentry_dsn: None,
            sentry_environment: None,
        }
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable fails to parse or the API key looks
    /// like a placeholder.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let defaults = Self::default();

        Ok(Self {
            host: parse_env_or("STOREFRONT_HOST", defaults.host)?,
            port: parse_env_or("STOREFRONT_PORT", defaults.port)?,
            base_url: get_optional_env("STOREFRONT_BASE_URL").unwrap_or(defaults.base_url),
            exchange_rate: ExchangeRateConfig::from_env()?,
            checkout: CheckoutConfig {
                payment_address: get_optional_env("PAYMENT_ADDRESS")
                    .unwrap_or(defaults.checkout.payment_address),
                copy_flag_duration: COPY_FLAG_DURATION,
            },
            sentry_dsn: get_optional_env("SENTRY_DSN"),
            sentry_environment: get_optional_env("SENTRY_ENVIRONMENT"),
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Whether the storefront is served over HTTPS.
    #[must_use]
    pub fn is_secure(&self) -> bool {
        self.base_url.starts_with("https://")
    }
}

impl ExchangeRateConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let fallback_rate: Decimal = parse_env_or("EXCHANGE_RATE_FALLBACK", defaults.fallback_rate)?;
        if fallback_rate <= Decimal::ZERO {
            return Err(ConfigError::InvalidEnvVar(
                "EXCHANGE_RATE_FALLBACK".to_string(),
                "must be positive".to_string(),
            ));
        }

        Ok(Self {
            endpoint: parse_env_or("EXCHANGE_RATE_URL", defaults.endpoint)?,
            asset: get_optional_env("EXCHANGE_RATE_ASSET").unwrap_or(defaults.asset),
            fallback_rate,
            timeout: Duration::from_millis(parse_env_or("EXCHANGE_RATE_TIMEOUT_MS", 5000_u64)?),
            cache_ttl: Duration::from_secs(parse_env_or("EXCHANGE_RATE_CACHE_SECS", 60_u64)?),
            api_key: get_optional_env("COINGECKO_API_KEY")
                .map(|key| {
                    validate_secret_strength(&key, "COINGECKO_API_KEY")?;
                    Ok(SecretString::from(key))
                })
                .transpose()?,
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

#[allow(clippy::expect_used)] // The literal is a valid URL
fn default_exchange_rate_url() -> Url {
    Url::parse(DEFAULT_EXCHANGE_RATE_URL).expect("default exchange rate URL is valid")
}

/// Get an optional environment variable, treating empty values as unset.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

/// Parse an environment variable, or return `default` when it is unset.
fn parse_env_or<T>(key: &str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    get_optional_env(key).map_or(Ok(default), |raw| {
        raw.trim()
            .parse::<T>()
            .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
    })
}

/// Calculate Shannon entropy in bits per character.
fn shannon_entropy(s: &str) -> f64 {
    if s.is_empty() {
        return 0.0;
    }

    let mut freq: HashMap<char, usize> = HashMap::new();
    for c in s.chars() {
        *freq.entry(c).or_insert(0) += 1;
    }

    #[allow(clippy::cast_precision_loss)] // String length will never exceed f64 precision
    let len = s.chars().count() as f64;
    freq.values()
        .map(|&count| {
            #[allow(clippy::cast_precision_loss)] // Character count will never exceed f64 precision
            let p = count as f64 / len;
            -p * p.log2()
        })
        .sum()
}

/// Validate that a secret is not a placeholder and has sufficient entropy.
fn validate_secret_strength(secret: &str, var_name: &str) -> Result<(), ConfigError> {
    let lower = secret.to_lowercase();

    for pattern in PLACEHOLDER_PATTERNS {
        if lower.contains(pattern) {
            return Err(ConfigError::InsecureSecret(
                var_name.to_string(),
                format!("appears to be a placeholder (contains '{pattern}')"),
            ));
        }
    }

    let entropy = shannon_entropy(secret);
    if entropy < MIN_ENTROPY_BITS_PER_CHAR {
        return Err(ConfigError::InsecureSecret(
            var_name.to_string(),
            format!(
                "entropy too low ({entropy:.2} bits/char, need >= {MIN_ENTROPY_BITS_PER_CHAR:.1})"
            ),
        ));
    }

    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = StorefrontConfig::default();
        assert_eq!(config.socket_addr().to_string(), "127.0.0.1:3000");
        assert!(!config.is_secure());
        assert_eq!(config.exchange_rate.fallback_rate, Decimal::from(100_000));
        assert_eq!(config.exchange_rate.endpoint.as_str(), DEFAULT_EXCHANGE_RATE_URL);
        assert_eq!(config.checkout.payment_address, DEFAULT_PAYMENT_ADDRESS);
        assert_eq!(config.checkout.copy_flag_duration, Duration::from_millis(2000));
    }

    #[test]
    fn test_is_secure() {
        let config = StorefrontConfig {
            base_url: "https://shop.example".to_string(),
            ..StorefrontConfig::default()
        };
        assert!(config.is_secure());
    }

    #[test]
    fn test_shannon_entropy() {
        assert!((shannon_entropy("") - 0.0).abs() < f64::EPSILON);
        assert!((shannon_entropy("aaaaaaa") - 0.0).abs() < f64::EPSILON);
        assert!((shannon_entropy("ab") - 1.0).abs() < 0.01);
    }

    #[test]
    fn test_validate_secret_strength() {
        assert!(matches!(
            validate_secret_strength("your-api-key-here", "KEY"),
            Err(ConfigError::InsecureSecret(_, _))
        ));
        assert!(validate_secret_strength("aaaaaaaaaaaaaaaa", "KEY").is_err());
        assert!(validate_secret_strength("CG-q8Zr3LmN5vT2kWx9", "KEY").is_ok());
    }

    #[test]
    fn test_exchange_rate_debug_redacts_key() {
        let config = ExchangeRateConfig {
            api_key: Some(SecretString::from("CG-super-secret-value")),
            ..ExchangeRateConfig::default()
        };
        let debug_output = format!("{config:?}");
        assert!(debug_output.contains("[REDACTED]"));
        assert!(!debug_output.contains("super-secret"));
        assert!(debug_output.contains("bitcoin"));
    }
}
