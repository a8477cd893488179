//! Cart route handlers.
//!
//! The cart lives inside the shopper's [`CartManager`] in the session.
//! Checkout hands the cart off under its own session key and redirects.

use axum::{
    Json,
    response::{IntoResponse, Redirect, Response},
};
use serde::{Deserialize, Serialize};
use tower_sessions::Session;
use tracing::instrument;

use bitbazaar_core::{CartLineItem, ProductId};

use crate::catalog;
use crate::error::{AppError, Result, add_breadcrumb};
use crate::models::session::{load_cart_manager, reset_payment_status, save_cart_manager};
use crate::services::CartManager;

/// Cart line display data.
#[derive(Debug, Clone, Serialize)]
pub struct CartItemView {
    pub product_id: i32,
    pub title: String,
    pub image: String,
    pub price: String,
    pub quantity: u32,
    pub line_total: String,
}

impl From<&CartLineItem> for CartItemView {
    fn from(item: &CartLineItem) -> Self {
        Self {
            product_id: item.product_id().as_i32(),
            title: item.product.title.clone(),
            image: item.product.image.clone(),
            price: item.product.unit_price().display(),
            quantity: item.quantity,
            line_total: item.line_total().display(),
        }
    }
}

/// Cart display data.
#[derive(Debug, Clone, Serialize)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    pub total: String,
    pub item_count: u32,
}

impl From<&CartManager> for CartView {
    fn from(manager: &CartManager) -> Self {
        Self {
            items: manager.cart().items().iter().map(CartItemView::from).collect(),
            total: manager.cart_total().display(),
            item_count: manager.cart_item_count(),
        }
    }
}

/// Add-to-cart body.
#[derive(Debug, Deserialize)]
pub struct AddToCartRequest {
    pub product_id: i32,
}

/// Update-quantity body.
#[derive(Debug, Deserialize)]
pub struct UpdateCartRequest {
    pub product_id: i32,
    pub quantity: i64,
}

/// Remove-line body.
#[derive(Debug, Deserialize)]
pub struct RemoveFromCartRequest {
    pub product_id: i32,
}

/// Show the cart.
#[instrument(skip(session))]
pub async fn show(session: Session) -> Json<CartView> {
    let manager = load_cart_manager(&session).await;
    Json(CartView::from(&manager))
}

/// Add the product at its pending quantity.
#[instrument(skip(session))]
pub async fn add(
    session: Session,
    Json(request): Json<AddToCartRequest>,
) -> Result<Json<CartView>> {
    let id = ProductId::new(request.product_id);
    let product = catalog::find(id).ok_or(AppError::ProductNotFound(id))?;

    let mut manager = load_cart_manager(&session).await;
    let quantity = manager.add_to_cart(product);
    save_cart_manager(&session, &manager).await?;

    add_breadcrumb(
        "cart",
        "Added to cart",
        &[
            ("product_id", id.to_string()),
            ("quantity", quantity.to_string()),
        ],
    );

    Ok(Json(CartView::from(&manager)))
}

/// Change a line's quantity. Out-of-range values and unknown lines are
/// ignored.
#[instrument(skip(session))]
pub async fn update(
    session: Session,
    Json(request): Json<UpdateCartRequest>,
) -> Result<Json<CartView>> {
    let mut manager = load_cart_manager(&session).await;
    manager.update_cart_quantity(ProductId::new(request.product_id), request.quantity);
    save_cart_manager(&session, &manager).await?;

    Ok(Json(CartView::from(&manager)))
}

/// Drop a line from the cart.
#[instrument(skip(session))]
pub async fn remove(
    session: Session,
    Json(request): Json<RemoveFromCartRequest>,
) -> Result<Json<CartView>> {
    let mut manager = load_cart_manager(&session).await;
    manager.remove_from_cart(ProductId::new(request.product_id));
    save_cart_manager(&session, &manager).await?;

    Ok(Json(CartView::from(&manager)))
}

/// Hand the cart off to checkout and redirect there.
///
/// Each hand-off starts a new order, so any earlier confirmation is dropped.
#[instrument(skip(session))]
pub async fn checkout(session: Session) -> Result<Response> {
    let manager = load_cart_manager(&session).await;
    let redirect = manager.initiate_checkout(&session).await?;
    reset_payment_status(&session).await?;

    add_breadcrumb(
        "checkout",
        "Cart handed off",
        &[("item_count", manager.cart_item_count().to_string())],
    );

    Ok(Redirect::to(redirect.path).into_response())
}
