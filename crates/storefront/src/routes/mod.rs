//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                    - Health check
//!
//! # Products
//! GET  /products                  - Catalog with likes and pending quantities
//! POST /products/{id}/like        - Toggle like
//! POST /products/{id}/quantity    - Set pending quantity
//! POST /products/{id}/increment   - Pending quantity + 1
//! POST /products/{id}/decrement   - Pending quantity - 1
//!
//! # Cart
//! GET  /cart                      - Cart lines, total, item count
//! POST /cart/add                  - Add product at its pending quantity
//! POST /cart/update               - Set a line's quantity
//! POST /cart/remove               - Remove a line
//! POST /cart/checkout             - Hand off the cart, 303 to /checkout
//!
//! # Checkout
//! GET  /checkout                  - Priced summary or empty state
//! POST /checkout/confirm          - Mark payment confirmed
//! POST /checkout/copy/address     - Copy the payment address
//! POST /checkout/copy/shipping    - Copy the shipping details
//! ```

pub mod cart;
pub mod checkout;
pub mod products;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::index))
        .route("/{id}/like", post(products::toggle_like))
        .route("/{id}/quantity", post(products::set_quantity))
        .route("/{id}/increment", post(products::increment))
        .route("/{id}/decrement", post(products::decrement))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/add", post(cart::add))
        .route("/update", post(cart::update))
        .route("/remove", post(cart::remove))
        .route("/checkout", post(cart::checkout))
}

/// Create the checkout routes router.
pub fn checkout_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(checkout::show))
        .route("/confirm", post(checkout::confirm))
        .route("/copy/address", post(checkout::copy_address))
        .route("/copy/shipping", post(checkout::copy_shipping))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .nest("/products", product_routes())
        .nest("/cart", cart_routes())
        .nest("/checkout", checkout_routes())
}

/// Liveness health check endpoint.
async fn health() -> &'static str {
    "ok"
}
