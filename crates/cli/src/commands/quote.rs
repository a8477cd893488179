//! Price a cart in BTC.
//!
//! Runs the same path as the storefront: items go through a [`CartManager`],
//! the cart is handed off to an in-memory store, and a [`Checkout`] reads it
//! back and applies an exchange-rate quote.

use std::str::FromStr;

use thiserror::Error;
use tokio::time::Instant;
use tracing::{info, warn};

use bitbazaar_core::{ProductId, Quantity};
use bitbazaar_storefront::catalog;
use bitbazaar_storefront::config::StorefrontConfig;
use bitbazaar_storefront::handoff::MemoryHandoff;
use bitbazaar_storefront::rates::{ExchangeRateClient, RateQuote};
use bitbazaar_storefront::services::{CartManager, Checkout, CheckoutView};

/// Errors parsing or applying a `PRODUCT_ID:QUANTITY` argument.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ItemSpecError {
    #[error("expected PRODUCT_ID:QUANTITY, got {0:?}")]
    Format(String),

    #[error("invalid product id {0:?}")]
    Id(String),

    #[error("quantity must be between {min} and {max}, got {0:?}", min = Quantity::MIN, max = Quantity::MAX)]
    Quantity(String),

    #[error("no product with id {0}")]
    UnknownProduct(ProductId),
}

/// One cart line requested on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemSpec {
    pub product_id: ProductId,
    pub quantity: Quantity,
}

impl FromStr for ItemSpec {
    type Err = ItemSpecError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (id, quantity) = s
            .split_once(':')
            .ok_or_else(|| ItemSpecError::Format(s.to_string()))?;

        let product_id = id
            .trim()
            .parse::<i32>()
            .map(ProductId::new)
            .map_err(|_| ItemSpecError::Id(id.to_string()))?;

        let quantity = quantity
            .trim()
            .parse::<i64>()
            .ok()
            .and_then(Quantity::new)
            .ok_or_else(|| ItemSpecError::Quantity(quantity.to_string()))?;

        Ok(Self {
            product_id,
            quantity,
        })
    }
}

/// Build a cart from `items` and log its checkout summary.
///
/// # Errors
///
/// Returns an error if configuration fails to load, an item names an unknown
/// product, or the hand-off fails.
pub async fn run(items: &[ItemSpec], offline: bool) -> Result<(), Box<dyn std::error::Error>> {
    let config = StorefrontConfig::from_env()?;

    let mut manager = CartManager::new();
    for item in items {
        let product =
            catalog::find(item.product_id).ok_or(ItemSpecError::UnknownProduct(item.product_id))?;
        manager.set_quantity(product.id, i64::from(item.quantity.get()));
        manager.add_to_cart(product);
    }

    let store = MemoryHandoff::new();
    manager.initiate_checkout(&store).await?;

    let mut checkout = Checkout::load(&store, &config.checkout).await;
    let quote = if offline {
        RateQuote::fallback(config.exchange_rate.fallback_rate)
    } else {
        ExchangeRateClient::new(&config.exchange_rate)?.quote().await
    };
    checkout.apply_quote(quote);

    let CheckoutView::Ready(summary) = checkout.view(Instant::now()) else {
        warn!("No items to checkout");
        return Ok(());
    };

    for line in &summary.lines {
        info!(
            product_id = line.product_id,
            title = %line.title,
            quantity = line.quantity,
            unit_price = %line.unit_price,
            line_total = %line.line_total,
            "Line"
        );
    }

    if let Some(notice) = summary.rate_notice {
        warn!("{notice}");
    }

    info!(
        subtotal = %summary.subtotal,
        shipping = %summary.shipping_total,
        total = %summary.total,
        rate = ?summary.quote.as_ref().map(|q| q.rate),
        payable = %summary.payable_amount,
        asset = summary.asset,
        address = %summary.payment_address,
        "Checkout"
    );

    Ok(())
}
