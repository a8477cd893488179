//! Catalog products and cart line items.
//!
//! Both types serialize with camelCase field names so a serialized cart reads
//! the same as the listing page's own representation (`originalPrice`,
//! `deliveryDate`). Decimal fields are written as strings and accept either
//! strings or plain JSON numbers when read back.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::id::ProductId;
use super::price::Price;

/// An immutable catalog entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub title: String,
    /// Unit price in the display currency.
    pub price: Decimal,
    /// Pre-discount price shown struck through, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_price: Option<Decimal>,
    /// Image path or URL.
    pub image: String,
    /// Units sold, for display.
    #[serde(default)]
    pub sold: u32,
    /// Promotional label (e.g., "$15.00 off").
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discount: Option<String>,
    /// Shipping cost charged per unit.
    pub shipping: Decimal,
    /// Estimated delivery label (e.g., "Dec. 29").
    #[serde(default)]
    pub delivery_date: String,
    /// Base like count before the shopper's own like.
    #[serde(default)]
    pub likes: u32,
}

impl Product {
    /// Unit price as a [`Price`].
    #[must_use]
    pub const fn unit_price(&self) -> Price {
        Price::usd(self.price)
    }

    /// Per-unit shipping as a [`Price`].
    #[must_use]
    pub const fn unit_shipping(&self) -> Price {
        Price::usd(self.shipping)
    }
}

/// A product paired with a purchased quantity.
///
/// The quantity is a plain integer rather than a bounded quantity because
/// repeated additions of the same product may accumulate past the per-input
/// limit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLineItem {
    #[serde(flatten)]
    pub product: Product,
    pub quantity: u32,
}

impl CartLineItem {
    /// Create a line item.
    #[must_use]
    pub const fn new(product: Product, quantity: u32) -> Self {
        Self { product, quantity }
    }

    /// The product ID of this line.
    #[must_use]
    pub const fn product_id(&self) -> ProductId {
        self.product.id
    }

    /// Unit price times quantity.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.product.unit_price().times(self.quantity)
    }

    /// Per-unit shipping times quantity.
    #[must_use]
    pub fn line_shipping(&self) -> Price {
        self.product.unit_shipping().times(self.quantity)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn headphones() -> Product {
        Product {
            id: ProductId::new(3),
            title: "Wireless Bluetooth Headphones".to_string(),
            price: Decimal::new(4599, 2),
            original_price: None,
            image: "/bluetooth-headphones.png".to_string(),
            sold: 1523,
            discount: None,
            shipping: Decimal::new(599, 2),
            delivery_date: "Dec. 27".to_string(),
            likes: 89,
        }
    }

    #[test]
    fn test_line_totals() {
        let line = CartLineItem::new(headphones(), 2);
        assert_eq!(line.line_total().amount, Decimal::new(9198, 2));
        assert_eq!(line.line_shipping().amount, Decimal::new(1198, 2));
    }

    #[test]
    fn test_line_item_json_is_flat_camel_case() {
        let line = CartLineItem::new(headphones(), 2);
        let json = serde_json::to_value(&line).unwrap();

        assert_eq!(json["id"], 3);
        assert_eq!(json["quantity"], 2);
        assert_eq!(json["deliveryDate"], "Dec. 27");
        assert_eq!(json["price"], "45.99");
        assert!(json.get("originalPrice").is_none());
    }

    #[test]
    fn test_line_item_accepts_numeric_prices() {
        let raw = r#"{
            "id": 3,
            "title": "Wireless Bluetooth Headphones",
            "price": 45.99,
            "image": "/bluetooth-headphones.png",
            "quantity": 2,
            "shipping": 5.99
        }"#;
        let line: CartLineItem = serde_json::from_str(raw).unwrap();

        assert_eq!(line.product.price, Decimal::new(4599, 2));
        assert_eq!(line.product.shipping, Decimal::new(599, 2));
        assert_eq!(line.quantity, 2);
        assert_eq!(line.product.likes, 0);
    }
}
