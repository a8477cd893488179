//! Static product catalog.
//!
//! The listing is fixed reference data, built once and shared for the life of
//! the process. Order is display order.

use std::sync::LazyLock;

use bitbazaar_core::{Product, ProductId};
use rust_decimal::Decimal;

static CATALOG: LazyLock<Vec<Product>> = LazyLock::new(|| {
    vec![
        Product {
            id: ProductId::new(1),
            title: "TO Antminer S19k Pro 120Th 2760w BTC Bitcoin Miner Asic Miner include PSU"
                .to_string(),
            price: Decimal::from(475),
            original_price: Some(Decimal::from(480)),
            image: "/images/image.png".to_string(),
            sold: 1,
            discount: Some("$3.00 off on $23.00".to_string()),
            shipping: Decimal::new(4716, 2),
            delivery_date: "Dec. 29".to_string(),
            likes: 0,
        },
        Product {
            id: ProductId::new(3),
            title: "Wireless Bluetooth Headphones Over Ear with Noise Cancelling".to_string(),
            price: Decimal::new(4599, 2),
            original_price: None,
            image: "/bluetooth-headphones.png".to_string(),
            sold: 1523,
            discount: None,
            shipping: Decimal::new(599, 2),
            delivery_date: "Dec. 27".to_string(),
            likes: 89,
        },
        Product {
            id: ProductId::new(4),
            title: "RGB LED Strip Lights 50ft with Remote Control App Controlled".to_string(),
            price: Decimal::new(2499, 2),
            original_price: Some(Decimal::new(3999, 2)),
            image: "/led-strip-lights.jpg".to_string(),
            sold: 3421,
            discount: Some("$15.00 off".to_string()),
            shipping: Decimal::new(399, 2),
            delivery_date: "Dec. 26".to_string(),
            likes: 234,
        },
        Product {
            id: ProductId::new(5),
            title: "Fast USB C Charger 65W PD Multi-Port Wall Adapter".to_string(),
            price: Decimal::new(1899, 2),
            original_price: None,
            image: "/usb-c-charger.jpg".to_string(),
            sold: 892,
            discount: None,
            shipping: Decimal::new(250, 2),
            delivery_date: "Dec. 28".to_string(),
            likes: 45,
        },
        Product {
            id: ProductId::new(6),
            title: "Mechanical Gaming Keyboard RGB Backlit 104 Keys Wired USB".to_string(),
            price: Decimal::new(6799, 2),
            original_price: Some(Decimal::new(8999, 2)),
            image: "/gaming-keyboard.png".to_string(),
            sold: 567,
            discount: Some("$22.00 off".to_string()),
            shipping: Decimal::new(899, 2),
            delivery_date: "Dec. 30".to_string(),
            likes: 156,
        },
    ]
});

/// All products, in display order.
#[must_use]
pub fn products() -> &'static [Product] {
    &CATALOG
}

/// Look up a product by ID.
#[must_use]
pub fn find(id: ProductId) -> Option<&'static Product> {
    CATALOG.iter().find(|product| product.id == id)
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    #[test]
    fn test_ids_are_unique() {
        let ids: HashSet<ProductId> = products().iter().map(|p| p.id).collect();
        assert_eq!(ids.len(), products().len());
    }

    #[test]
    fn test_display_order() {
        let ids: Vec<i32> = products().iter().map(|p| p.id.as_i32()).collect();
        assert_eq!(ids, vec![1, 3, 4, 5, 6]);
    }

    #[test]
    fn test_find() {
        let headphones = find(ProductId::new(3));
        assert_eq!(headphones.map(|p| p.price), Some(Decimal::new(4599, 2)));
        assert!(find(ProductId::new(2)).is_none());
    }
}
