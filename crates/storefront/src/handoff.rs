//! Hand-off store: passes the cart from the listing to checkout.
//!
//! The listing writes the serialized cart under [`CHECKOUT_CART_KEY`] when
//! checkout starts; checkout reads it once when it loads. In the server the
//! store is the shopper's session. [`MemoryHandoff`] backs the CLI and tests.
//!
//! There is no schema versioning. Anything that does not parse as a cart is
//! treated as an empty cart.

use std::collections::{HashMap, HashSet};
use std::future::Future;

use bitbazaar_core::CartLineItem;
use thiserror::Error;
use tokio::sync::Mutex;
use tower_sessions::Session;

/// Key the serialized cart is stored under.
pub const CHECKOUT_CART_KEY: &str = "checkout_cart";

/// Errors raised by a hand-off store.
#[derive(Debug, Error)]
pub enum HandoffError {
    /// The session backend failed.
    #[error("Session error: {0}")]
    Session(#[from] tower_sessions::session::Error),

    /// The cart could not be serialized.
    #[error("Serialization error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// A text key-value store scoped to one shopper.
pub trait HandoffStore {
    /// Store `value` under `key`, replacing any previous value.
    fn put(&self, key: &str, value: String)
    -> impl Future<Output = Result<(), HandoffError>> + Send;

    /// Read the value under `key`.
    fn get(&self, key: &str) -> impl Future<Output = Result<Option<String>, HandoffError>> + Send;

    /// Delete the value under `key`, if any.
    fn remove(&self, key: &str) -> impl Future<Output = Result<(), HandoffError>> + Send;
}

impl HandoffStore for Session {
    async fn put(&self, key: &str, value: String) -> Result<(), HandoffError> {
        self.insert(key, value).await?;
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<String>, HandoffError> {
        Ok(Self::get::<String>(self, key).await?)
    }

    async fn remove(&self, key: &str) -> Result<(), HandoffError> {
        Self::remove::<String>(self, key).await?;
        Ok(())
    }
}

/// In-process hand-off store.
#[derive(Debug, Default)]
pub struct MemoryHandoff {
    entries: Mutex<HashMap<String, String>>,
}

impl MemoryHandoff {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl HandoffStore for MemoryHandoff {
    async fn put(&self, key: &str, value: String) -> Result<(), HandoffError> {
        self.entries.lock().await.insert(key.to_string(), value);
        Ok(())
    }

    async fn get(&self, key: &str) -> Result<Option<String>, HandoffError> {
        Ok(self.entries.lock().await.get(key).cloned())
    }

    async fn remove(&self, key: &str) -> Result<(), HandoffError> {
        self.entries.lock().await.remove(key);
        Ok(())
    }
}

/// Serialize `items` and store them under [`CHECKOUT_CART_KEY`].
///
/// # Errors
///
/// Returns `HandoffError` if serialization or the store write fails.
pub async fn write_cart<S: HandoffStore>(
    store: &S,
    items: &[CartLineItem],
) -> Result<(), HandoffError> {
    let payload = serde_json::to_string(items)?;
    store.put(CHECKOUT_CART_KEY, payload).await
}

/// Read the handed-off cart.
///
/// Absent, unreadable, or malformed data yields an empty cart. A payload
/// with zero quantities or repeated product IDs counts as malformed.
pub async fn read_cart<S: HandoffStore>(store: &S) -> Vec<CartLineItem> {
    let raw = match store.get(CHECKOUT_CART_KEY).await {
        Ok(Some(raw)) => raw,
        Ok(None) => return Vec::new(),
        Err(e) => {
            tracing::warn!(error = %e, "Failed to read handed-off cart");
            return Vec::new();
        }
    };

    let items: Vec<CartLineItem> = match serde_json::from_str(&raw) {
        Ok(items) => items,
        Err(e) => {
            tracing::warn!(error = %e, "Discarding malformed handed-off cart");
            return Vec::new();
        }
    };

    let mut seen = HashSet::new();
    let well_formed = items
        .iter()
        .all(|item| item.quantity > 0 && seen.insert(item.product_id()));
    if !well_formed {
        tracing::warn!(lines = items.len(), "Discarding inconsistent handed-off cart");
        return Vec::new();
    }

    items
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use bitbazaar_core::ProductId;

    use super::*;
    use crate::catalog;

    fn line(id: i32, quantity: u32) -> CartLineItem {
        CartLineItem::new(catalog::find(ProductId::new(id)).unwrap().clone(), quantity)
    }

    #[tokio::test]
    async fn test_write_then_read() {
        let store = MemoryHandoff::new();
        let items = vec![line(3, 2), line(5, 1)];

        write_cart(&store, &items).await.unwrap();

        assert_eq!(read_cart(&store).await, items);
    }

    #[tokio::test]
    async fn test_absent_is_empty() {
        let store = MemoryHandoff::new();
        assert!(read_cart(&store).await.is_empty());
    }

    #[tokio::test]
    async fn test_malformed_is_empty() {
        let store = MemoryHandoff::new();
        store
            .put(CHECKOUT_CART_KEY, "{not json".to_string())
            .await
            .unwrap();
        assert!(read_cart(&store).await.is_empty());

        store
            .put(CHECKOUT_CART_KEY, r#"{"id": 3}"#.to_string())
            .await
            .unwrap();
        assert!(read_cart(&store).await.is_empty());
    }

    #[tokio::test]
    async fn test_duplicate_products_are_rejected() {
        let store = MemoryHandoff::new();
        write_cart(&store, &[line(3, 1), line(3, 2)]).await.unwrap();
        assert!(read_cart(&store).await.is_empty());
    }

    #[tokio::test]
    async fn test_zero_quantity_is_rejected() {
        let store = MemoryHandoff::new();
        write_cart(&store, &[line(4, 0)]).await.unwrap();
        assert!(read_cart(&store).await.is_empty());
    }

    #[tokio::test]
    async fn test_remove() {
        let store = MemoryHandoff::new();
        write_cart(&store, &[line(1, 1)]).await.unwrap();
        store.remove(CHECKOUT_CART_KEY).await.unwrap();
        assert_eq!(store.get(CHECKOUT_CART_KEY).await.unwrap(), None);
    }
}
