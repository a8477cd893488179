//! Product listing handlers.
//!
//! Every mutation loads the shopper's [`CartManager`] from the session,
//! applies one operation, saves it back, and returns the updated card.

use axum::{Json, extract::Path};
use serde::{Deserialize, Serialize};
use tower_sessions::Session;
use tracing::instrument;

use bitbazaar_core::{Price, Product, ProductId};

use crate::catalog;
use crate::error::{AppError, Result};
use crate::models::session::{load_cart_manager, save_cart_manager};
use crate::services::CartManager;

/// One product card on the listing page.
#[derive(Debug, Clone, Serialize)]
pub struct ProductView {
    pub id: i32,
    pub title: String,
    pub image: String,
    pub price: String,
    pub original_price: Option<String>,
    pub discount: Option<String>,
    pub shipping: String,
    pub delivery_date: String,
    pub sold: u32,
    pub likes: u32,
    pub liked: bool,
    /// Quantity the "Add to Cart" button will add.
    pub quantity: u32,
}

impl ProductView {
    fn new(product: &Product, manager: &CartManager) -> Self {
        Self {
            id: product.id.as_i32(),
            title: product.title.clone(),
            image: product.image.clone(),
            price: product.unit_price().display(),
            original_price: product.original_price.map(|p| Price::usd(p).display()),
            discount: product.discount.clone(),
            shipping: product.unit_shipping().display(),
            delivery_date: product.delivery_date.clone(),
            sold: product.sold,
            likes: manager.display_likes(product),
            liked: manager.is_liked(product.id),
            quantity: manager.quantity(product.id).get(),
        }
    }
}

/// Body for setting a pending quantity.
#[derive(Debug, Deserialize)]
pub struct SetQuantityRequest {
    pub quantity: i64,
}

/// List the catalog with the shopper's likes and pending quantities.
#[instrument(skip(session))]
pub async fn index(session: Session) -> Json<Vec<ProductView>> {
    let manager = load_cart_manager(&session).await;
    Json(
        catalog::products()
            .iter()
            .map(|product| ProductView::new(product, &manager))
            .collect(),
    )
}

/// Toggle the shopper's like on a product.
#[instrument(skip(session))]
pub async fn toggle_like(session: Session, Path(id): Path<i32>) -> Result<Json<ProductView>> {
    update_product(&session, id, |manager, product| {
        manager.toggle_like(product.id);
    })
    .await
}

/// Set the pending quantity. Out-of-range values leave it unchanged.
#[instrument(skip(session))]
pub async fn set_quantity(
    session: Session,
    Path(id): Path<i32>,
    Json(request): Json<SetQuantityRequest>,
) -> Result<Json<ProductView>> {
    update_product(&session, id, |manager, product| {
        manager.set_quantity(product.id, request.quantity);
    })
    .await
}

/// Step the pending quantity up.
#[instrument(skip(session))]
pub async fn increment(session: Session, Path(id): Path<i32>) -> Result<Json<ProductView>> {
    update_product(&session, id, |manager, product| {
        manager.increment_quantity(product.id);
    })
    .await
}

/// Step the pending quantity down.
#[instrument(skip(session))]
pub async fn decrement(session: Session, Path(id): Path<i32>) -> Result<Json<ProductView>> {
    update_product(&session, id, |manager, product| {
        manager.decrement_quantity(product.id);
    })
    .await
}

/// Look up the product, apply `op`, persist, and render the card.
async fn update_product<F>(session: &Session, id: i32, op: F) -> Result<Json<ProductView>>
where
    F: FnOnce(&mut CartManager, &Product),
{
    let id = ProductId::new(id);
    let product = catalog::find(id).ok_or(AppError::ProductNotFound(id))?;

    let mut manager = load_cart_manager(session).await;
    op(&mut manager, product);
    save_cart_manager(session, &manager).await?;

    Ok(Json(ProductView::new(product, &manager)))
}
