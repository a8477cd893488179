//! End-to-end storefront flow over HTTP.
//!
//! Each test starts its own storefront; the client keeps the session cookie,
//! so the listing, cart, and checkout all see the same shopper.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

use bitbazaar_integration_tests::{TestContext, spawn_rate_server};
use reqwest::StatusCode;
use serde_json::{Value, json};

async fn fill_cart_with_two_headphones(ctx: &TestContext) {
    let card = ctx
        .post_json("/products/3/quantity", &json!({ "quantity": 2 }))
        .await;
    assert_eq!(card["quantity"], 2);

    let cart = ctx
        .post_json("/cart/add", &json!({ "product_id": 3 }))
        .await;
    assert_eq!(cart["item_count"], 2);
    assert_eq!(cart["total"], "$91.98");
}

/// POST the checkout hand-off; the client follows the 303 to `/checkout`.
async fn hand_off(ctx: &TestContext) -> Value {
    let response = ctx.client.post(ctx.url("/cart/checkout")).send().await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.url().path(), "/checkout");
    response.json().await.unwrap()
}

#[tokio::test]
async fn test_cart_to_checkout_with_live_rate() {
    let rate_url = spawn_rate_server(json!({ "bitcoin": { "usd": 51980 } })).await;
    let ctx = TestContext::new(rate_url).await;

    fill_cart_with_two_headphones(&ctx).await;
    let view = hand_off(&ctx).await;

    assert_eq!(view["status"], "ready");
    let summary = &view["summary"];
    assert_eq!(summary["lines"].as_array().unwrap().len(), 1);
    assert_eq!(summary["lines"][0]["quantity"], 2);
    assert_eq!(summary["subtotal"], "$91.98");
    assert_eq!(summary["shipping_total"], "$11.98");
    assert_eq!(summary["total"], "$103.96");
    assert_eq!(summary["payable_amount"], "0.00200000");
    assert_eq!(summary["asset"], "BTC");
    assert_eq!(summary["quote"]["source"], "live");
    assert_eq!(summary["rate_notice"], Value::Null);
    assert_eq!(summary["payment_status"], "pending");
}

#[tokio::test]
async fn test_checkout_falls_back_when_rate_unavailable() {
    let ctx = TestContext::offline().await;

    fill_cart_with_two_headphones(&ctx).await;
    let view = hand_off(&ctx).await;

    let summary = &view["summary"];
    assert_eq!(summary["total"], "$103.96");
    // 103.96 / 100000
    assert_eq!(summary["payable_amount"], "0.00103960");
    assert_eq!(summary["quote"]["source"], "fallback");
    assert_eq!(summary["rate_notice"], "rate unavailable, using estimate");
}

#[tokio::test]
async fn test_malformed_rate_response_falls_back() {
    let rate_url = spawn_rate_server(json!({ "ethereum": { "usd": 3000 } })).await;
    let ctx = TestContext::new(rate_url).await;

    fill_cart_with_two_headphones(&ctx).await;
    let view = hand_off(&ctx).await;

    assert_eq!(view["summary"]["quote"]["source"], "fallback");
    assert_eq!(view["summary"]["payable_amount"], "0.00103960");
}

#[tokio::test]
async fn test_checkout_without_handoff_is_empty() {
    let ctx = TestContext::offline().await;

    // Items in the cart are not visible to checkout until handed off
    fill_cart_with_two_headphones(&ctx).await;
    let view = ctx.get_json("/checkout").await;
    assert_eq!(view, json!({ "status": "empty" }));

    let response = ctx
        .client
        .post(ctx.url("/checkout/confirm"))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_empty_cart_handoff_shows_empty_checkout() {
    let ctx = TestContext::offline().await;
    let view = hand_off(&ctx).await;
    assert_eq!(view, json!({ "status": "empty" }));
}

#[tokio::test]
async fn test_confirm_payment_persists() {
    let ctx = TestContext::offline().await;
    fill_cart_with_two_headphones(&ctx).await;
    hand_off(&ctx).await;

    let confirmed = ctx.post_json("/checkout/confirm", &json!({})).await;
    assert_eq!(confirmed["payment_status"], "confirmed");

    // Confirming again is idempotent
    let confirmed = ctx.post_json("/checkout/confirm", &json!({})).await;
    assert_eq!(confirmed["payment_status"], "confirmed");

    let view = ctx.get_json("/checkout").await;
    assert_eq!(view["summary"]["payment_status"], "confirmed");
    // The handed-off cart is still there after confirmation
    assert_eq!(view["summary"]["total"], "$103.96");
}

#[tokio::test]
async fn test_confirm_empties_listing_cart() {
    let ctx = TestContext::offline().await;
    fill_cart_with_two_headphones(&ctx).await;
    hand_off(&ctx).await;

    ctx.post_json("/checkout/confirm", &json!({})).await;

    let cart = ctx.get_json("/cart").await;
    assert_eq!(cart["items"], json!([]));
    assert_eq!(cart["item_count"], 0);
}

#[tokio::test]
async fn test_next_order_starts_pending() {
    let ctx = TestContext::offline().await;
    fill_cart_with_two_headphones(&ctx).await;
    hand_off(&ctx).await;
    ctx.post_json("/checkout/confirm", &json!({})).await;

    ctx.post_json("/cart/add", &json!({ "product_id": 5 })).await;
    let view = hand_off(&ctx).await;

    let summary = &view["summary"];
    assert_eq!(summary["total"], "$21.49");
    assert_eq!(summary["payment_status"], "pending");
}

#[tokio::test]
async fn test_copy_actions_return_text() {
    let ctx = TestContext::offline().await;
    fill_cart_with_two_headphones(&ctx).await;
    let view = hand_off(&ctx).await;

    let copied = ctx.post_json("/checkout/copy/address", &json!({})).await;
    assert_eq!(copied["text"], view["summary"]["payment_address"]);
    assert_eq!(copied["copied"], true);
    assert_eq!(copied["reset_after_ms"], 2000);

    let copied = ctx.post_json("/checkout/copy/shipping", &json!({})).await;
    let text = copied["text"].as_str().unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 5);
    assert!(lines[0].starts_with("Receiver Name: "));
    assert!(lines[4].starts_with("Phone: "));
    assert_eq!(copied["copied"], true);

    // The indicator is the browser's to show; a fresh load reports it clear
    let view = ctx.get_json("/checkout").await;
    assert_eq!(view["summary"]["address_copied"], false);
    assert_eq!(view["summary"]["shipping_copied"], false);
}

#[tokio::test]
async fn test_listing_state_survives_between_requests() {
    let ctx = TestContext::offline().await;

    let card = ctx.post_json("/products/4/like", &json!({})).await;
    assert_eq!(card["liked"], true);
    assert_eq!(card["likes"], 235);

    ctx.post_json("/products/4/increment", &json!({})).await;
    ctx.post_json("/products/4/increment", &json!({})).await;
    ctx.post_json("/products/4/decrement", &json!({})).await;

    let products = ctx.get_json("/products").await;
    let strip = products
        .as_array()
        .unwrap()
        .iter()
        .find(|p| p["id"] == 4)
        .unwrap();
    assert_eq!(strip["liked"], true);
    assert_eq!(strip["likes"], 235);
    assert_eq!(strip["quantity"], 2);

    let card = ctx.post_json("/products/4/like", &json!({})).await;
    assert_eq!(card["liked"], false);
    assert_eq!(card["likes"], 234);
}

#[tokio::test]
async fn test_cart_update_and_remove() {
    let ctx = TestContext::offline().await;

    ctx.post_json("/cart/add", &json!({ "product_id": 5 })).await;
    ctx.post_json("/cart/add", &json!({ "product_id": 5 })).await;
    let cart = ctx.get_json("/cart").await;
    assert_eq!(cart["items"].as_array().unwrap().len(), 1);
    assert_eq!(cart["items"][0]["quantity"], 2);

    let cart = ctx
        .post_json("/cart/update", &json!({ "product_id": 5, "quantity": 7 }))
        .await;
    assert_eq!(cart["items"][0]["quantity"], 7);

    // Out of range: unchanged
    let cart = ctx
        .post_json("/cart/update", &json!({ "product_id": 5, "quantity": 0 }))
        .await;
    assert_eq!(cart["items"][0]["quantity"], 7);

    let cart = ctx
        .post_json("/cart/remove", &json!({ "product_id": 5 }))
        .await;
    assert_eq!(cart["items"], json!([]));
    assert_eq!(cart["total"], "$0.00");
    assert_eq!(cart["item_count"], 0);
}

#[tokio::test]
async fn test_sessions_are_isolated() {
    let ctx = TestContext::offline().await;
    fill_cart_with_two_headphones(&ctx).await;

    let other = reqwest::Client::new();
    let cart: Value = other
        .get(ctx.url("/cart"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(cart["item_count"], 0);
}
