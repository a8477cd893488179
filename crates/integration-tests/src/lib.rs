//! Integration tests for `BitBazaar`.
//!
//! Tests start the storefront in-process on an ephemeral port, optionally
//! alongside a stub exchange-rate server, and drive it over HTTP with a
//! cookie-keeping client so the session survives between requests.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p bitbazaar-integration-tests
//! ```

use std::net::SocketAddr;

use axum::{Json, Router, routing::get};
use reqwest::Client;
use serde_json::Value;
use tokio::net::TcpListener;
use url::Url;

use bitbazaar_storefront::config::StorefrontConfig;
use bitbazaar_storefront::state::AppState;

/// Rate endpoint nothing listens on, forcing the fallback rate.
pub const UNREACHABLE_RATE_URL: &str = "http://127.0.0.1:9/simple/price";

/// A running storefront and a client bound to it.
pub struct TestContext {
    pub client: Client,
    pub base_url: String,
}

impl TestContext {
    /// Start a storefront that prices against `rate_endpoint`.
    ///
    /// # Panics
    ///
    /// Panics if the server cannot be started.
    pub async fn new(rate_endpoint: Url) -> Self {
        let mut config = StorefrontConfig::default();
        config.exchange_rate.endpoint = rate_endpoint;

        let state = AppState::new(config).expect("Failed to build storefront state");
        let addr = serve(bitbazaar_storefront::app(state)).await;

        let client = Client::builder()
            .cookie_store(true)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            base_url: format!("http://{addr}"),
        }
    }

    /// Start a storefront whose rate lookups always fail.
    ///
    /// # Panics
    ///
    /// Panics if the server cannot be started.
    pub async fn offline() -> Self {
        let endpoint = Url::parse(UNREACHABLE_RATE_URL).expect("valid URL");
        Self::new(endpoint).await
    }

    /// Absolute URL for `path`.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// GET `path` and decode the JSON body.
    ///
    /// # Panics
    ///
    /// Panics on transport or decode failure.
    pub async fn get_json(&self, path: &str) -> Value {
        self.client
            .get(self.url(path))
            .send()
            .await
            .expect("request failed")
            .json()
            .await
            .expect("invalid JSON")
    }

    /// POST `body` to `path` and decode the JSON response.
    ///
    /// # Panics
    ///
    /// Panics on transport or decode failure.
    pub async fn post_json(&self, path: &str, body: &Value) -> Value {
        self.client
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .expect("request failed")
            .json()
            .await
            .expect("invalid JSON")
    }
}

/// Start a stub exchange-rate server that answers every request with `body`.
///
/// Returns the `simple/price` URL to configure the storefront with.
///
/// # Panics
///
/// Panics if the server cannot be started.
pub async fn spawn_rate_server(body: Value) -> Url {
    let app = Router::new().route(
        "/simple/price",
        get(move || {
            let body = body.clone();
            async move { Json(body) }
        }),
    );
    let addr = serve(app).await;
    Url::parse(&format!("http://{addr}/simple/price")).expect("valid URL")
}

async fn serve(app: Router) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind test listener");
    let addr = listener.local_addr().expect("listener has an address");
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    addr
}
