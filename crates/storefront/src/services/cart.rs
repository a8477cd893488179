//! Catalog and cart manager.
//!
//! Holds the shopper's listing-page state: liked products, pending
//! quantities, and the cart itself. Every operation is a synchronous state
//! transition. Invalid input never raises an error; out-of-range quantities
//! and unknown lines leave the state unchanged.

use std::collections::{BTreeMap, BTreeSet};

use bitbazaar_core::{CartLineItem, Price, Product, ProductId, Quantity};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::handoff::{self, HandoffError, HandoffStore};

/// Path the shopper is sent to once the cart is handed off.
pub const CHECKOUT_PATH: &str = "/checkout";

/// How a repeated add merges into an existing line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MergePolicy {
    /// Add the pending quantity to the line with no upper bound.
    #[default]
    Accumulate,
    /// Add the pending quantity, saturating at [`Quantity::MAX`].
    Cap,
}

impl MergePolicy {
    fn merge(self, current: u32, added: Quantity) -> u32 {
        let merged = current.saturating_add(added.get());
        match self {
            Self::Accumulate => merged,
            Self::Cap => merged.min(Quantity::MAX.get()),
        }
    }
}

/// Ordered line items, at most one per product.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Cart {
    items: Vec<CartLineItem>,
}

impl Cart {
    /// Line items in insertion order.
    #[must_use]
    pub fn items(&self) -> &[CartLineItem] {
        &self.items
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sum of unit price times quantity over all lines.
    #[must_use]
    pub fn total(&self) -> Price {
        self.items
            .iter()
            .map(CartLineItem::line_total)
            .fold(Price::zero(), |sum, line| {
                sum.checked_add(line).unwrap_or(sum)
            })
    }

    /// Sum of quantities over all lines.
    #[must_use]
    pub fn item_count(&self) -> u32 {
        self.items
            .iter()
            .fold(0_u32, |count, item| count.saturating_add(item.quantity))
    }

    fn line_mut(&mut self, id: ProductId) -> Option<&mut CartLineItem> {
        self.items.iter_mut().find(|item| item.product_id() == id)
    }
}

/// Signal that the cart was handed off and the shopper should navigate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CheckoutRedirect {
    pub path: &'static str,
}

/// Listing-page state container.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartManager {
    #[serde(default)]
    liked: BTreeSet<ProductId>,
    #[serde(default)]
    selected: BTreeMap<ProductId, Quantity>,
    #[serde(default)]
    cart: Cart,
    #[serde(default)]
    merge_policy: MergePolicy,
}

impl CartManager {
    /// Create an empty manager with the default merge policy.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty manager with an explicit merge policy.
    #[must_use]
    pub fn with_merge_policy(merge_policy: MergePolicy) -> Self {
        Self {
            merge_policy,
            ..Self::default()
        }
    }

    /// The current cart.
    #[must_use]
    pub const fn cart(&self) -> &Cart {
        &self.cart
    }

    // -------------------------------------------------------------------------
    // Likes
    // -------------------------------------------------------------------------

    /// Flip whether the shopper likes `id`.
    pub fn toggle_like(&mut self, id: ProductId) {
        if !self.liked.remove(&id) {
            self.liked.insert(id);
        }
    }

    /// Whether the shopper likes `id`.
    #[must_use]
    pub fn is_liked(&self, id: ProductId) -> bool {
        self.liked.contains(&id)
    }

    /// Like count shown for `product`: base likes plus the shopper's own.
    #[must_use]
    pub fn display_likes(&self, product: &Product) -> u32 {
        product
            .likes
            .saturating_add(u32::from(self.is_liked(product.id)))
    }

    // -------------------------------------------------------------------------
    // Pending quantities
    // -------------------------------------------------------------------------

    /// Pending quantity for `id`, defaulting to 1.
    #[must_use]
    pub fn quantity(&self, id: ProductId) -> Quantity {
        self.selected.get(&id).copied().unwrap_or_default()
    }

    /// Set the pending quantity. Values outside `1..=100` are ignored.
    pub fn set_quantity(&mut self, id: ProductId, quantity: i64) {
        if let Some(quantity) = Quantity::new(quantity) {
            self.selected.insert(id, quantity);
        }
    }

    /// Raise the pending quantity by one, stopping at 100.
    pub fn increment_quantity(&mut self, id: ProductId) {
        if let Some(next) = self.quantity(id).increment() {
            self.selected.insert(id, next);
        }
    }

    /// Lower the pending quantity by one, stopping at 1.
    pub fn decrement_quantity(&mut self, id: ProductId) {
        if let Some(next) = self.quantity(id).decrement() {
            self.selected.insert(id, next);
        }
    }

    // -------------------------------------------------------------------------
    // Cart
    // -------------------------------------------------------------------------

    /// Add `product` at its pending quantity, then reset that quantity to 1.
    ///
    /// An existing line for the product grows by the pending quantity
    /// according to the merge policy; otherwise a new line is appended.
    /// Returns the quantity that was added.
    pub fn add_to_cart(&mut self, product: &Product) -> Quantity {
        let quantity = self.quantity(product.id);
        let policy = self.merge_policy;

        match self.cart.line_mut(product.id) {
            Some(line) => line.quantity = policy.merge(line.quantity, quantity),
            None => self
                .cart
                .items
                .push(CartLineItem::new(product.clone(), quantity.get())),
        }
        self.selected.insert(product.id, Quantity::MIN);

        debug!(product_id = %product.id, quantity = %quantity, "Added to cart");
        quantity
    }

    /// Remove the line for `id`, if present.
    pub fn remove_from_cart(&mut self, id: ProductId) {
        self.cart.items.retain(|item| item.product_id() != id);
    }

    /// Empty the cart once its order is paid. Likes and pending quantities
    /// are kept.
    pub fn clear_cart(&mut self) {
        self.cart.items.clear();
    }

    /// Replace a line's quantity. Values outside `1..=100` are ignored.
    pub fn update_cart_quantity(&mut self, id: ProductId, quantity: i64) {
        let Some(quantity) = Quantity::new(quantity) else {
            return;
        };
        if let Some(line) = self.cart.line_mut(id) {
            line.quantity = quantity.get();
        }
    }

    /// Cart total in the display currency.
    #[must_use]
    pub fn cart_total(&self) -> Price {
        self.cart.total()
    }

    /// Number of units in the cart.
    #[must_use]
    pub fn cart_item_count(&self) -> u32 {
        self.cart.item_count()
    }

    /// Hand the cart off to checkout.
    ///
    /// The write is not rolled back if the shopper never reaches checkout.
    ///
    /// # Errors
    ///
    /// Returns `HandoffError` if the cart cannot be written to `store`.
    pub async fn initiate_checkout<S: HandoffStore>(
        &self,
        store: &S,
    ) -> Result<CheckoutRedirect, HandoffError> {
        handoff::write_cart(store, self.cart.items()).await?;
        tracing::info!(
            lines = self.cart.items().len(),
            units = self.cart_item_count(),
            "Cart handed off to checkout"
        );
        Ok(CheckoutRedirect {
            path: CHECKOUT_PATH,
        })
    }
}
