//! `BitBazaar` storefront library.
//!
//! A mock storefront: a product listing with likes and a cart, a session
//! hand-off to checkout, and a checkout that prices the order in BTC from a
//! live exchange rate. This crate provides the storefront as a library,
//! allowing it to be tested and reused.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod catalog;
pub mod config;
pub mod error;
pub mod handoff;
pub mod middleware;
pub mod models;
pub mod rates;
pub mod routes;
pub mod services;
pub mod state;

use axum::Router;
use tower_http::trace::TraceLayer;

use state::AppState;

/// Build the storefront router with sessions, request IDs, and tracing.
///
/// Sentry layers are added by the binary so tests can drive this router
/// without a Sentry client.
pub fn app(state: AppState) -> Router {
    let session_layer = middleware::create_session_layer(state.config());

    routes::routes()
        .layer(session_layer)
        .layer(axum::middleware::from_fn(middleware::request_id_middleware))
        .layer(TraceLayer::new_for_http().make_span_with(middleware::make_request_span))
        .with_state(state)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::{
        body::Body,
        http::{Request, StatusCode, header},
    };
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use super::*;
    use crate::config::StorefrontConfig;

    fn test_app() -> Router {
        let mut config = StorefrontConfig::default();
        // Nothing listens on port 9; rate lookups fall back immediately.
        config.exchange_rate.endpoint = "http://127.0.0.1:9/simple/price".parse().unwrap();
        app(AppState::new(config).unwrap())
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn post_json(uri: &str, body: &Value) -> Request<Body> {
        Request::post(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let response = test_app()
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().contains_key(middleware::REQUEST_ID_HEADER));
    }

    #[tokio::test]
    async fn test_request_id_is_echoed() {
        let response = test_app()
            .oneshot(
                Request::get("/health")
                    .header(middleware::REQUEST_ID_HEADER, "abc-123")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(
            response.headers().get(middleware::REQUEST_ID_HEADER).unwrap(),
            "abc-123"
        );
    }

    #[tokio::test]
    async fn test_products_listing() {
        let response = test_app()
            .oneshot(Request::get("/products").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = body_json(response).await;
        let products = body.as_array().unwrap();
        assert_eq!(products.len(), 5);
        assert_eq!(products[0]["id"], 1);
        assert_eq!(products[0]["quantity"], 1);
        assert_eq!(products[0]["liked"], false);
    }

    #[tokio::test]
    async fn test_unknown_product_is_not_found() {
        let response = test_app()
            .oneshot(
                Request::post("/products/2/like")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = test_app()
            .oneshot(post_json("/cart/add", &json!({ "product_id": 42 })))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_out_of_range_quantity_is_ignored() {
        let response = test_app()
            .oneshot(post_json("/products/1/quantity", &json!({ "quantity": 101 })))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["quantity"], 1);
    }

    #[tokio::test]
    async fn test_empty_checkout() {
        let response = test_app()
            .oneshot(Request::get("/checkout").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, json!({ "status": "empty" }));

        let response = test_app()
            .oneshot(
                Request::post("/checkout/copy/address")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn test_cart_checkout_redirects() {
        let response = test_app()
            .oneshot(Request::post("/cart/checkout").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);
        assert_eq!(response.headers().get(header::LOCATION).unwrap(), "/checkout");
    }
}
