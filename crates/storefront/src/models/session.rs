//! Session-stored state.
//!
//! Each shopper's session carries the listing-page state, the handed-off
//! cart, and the payment status. Reads that fail are logged and fall back to
//! defaults so a damaged session never blocks browsing.

use bitbazaar_core::PaymentStatus;
use tower_sessions::Session;

use crate::services::CartManager;

/// Session keys.
pub mod keys {
    /// Key for the listing-page state (likes, pending quantities, cart).
    pub const CART_MANAGER: &str = "cart_manager";

    /// Key for the handed-off cart, shared with checkout.
    pub const CHECKOUT_CART: &str = crate::handoff::CHECKOUT_CART_KEY;

    /// Key for the checkout payment status.
    pub const PAYMENT_STATUS: &str = "payment_status";
}

/// Load the listing-page state, or a fresh one.
pub async fn load_cart_manager(session: &Session) -> CartManager {
    match session.get::<CartManager>(keys::CART_MANAGER).await {
        Ok(manager) => manager.unwrap_or_default(),
        Err(e) => {
            tracing::warn!(error = %e, "Failed to read cart state from session");
            CartManager::default()
        }
    }
}

/// Save the listing-page state.
///
/// # Errors
///
/// Returns the session error if the write fails.
pub async fn save_cart_manager(
    session: &Session,
    manager: &CartManager,
) -> Result<(), tower_sessions::session::Error> {
    session.insert(keys::CART_MANAGER, manager).await
}

/// Load the payment status, defaulting to pending.
pub async fn load_payment_status(session: &Session) -> PaymentStatus {
    match session.get::<PaymentStatus>(keys::PAYMENT_STATUS).await {
        Ok(status) => status.unwrap_or_default(),
        Err(e) => {
            tracing::warn!(error = %e, "Failed to read payment status from session");
            PaymentStatus::default()
        }
    }
}

/// Save the payment status.
///
/// # Errors
///
/// Returns the session error if the write fails.
pub async fn save_payment_status(
    session: &Session,
    status: PaymentStatus,
) -> Result<(), tower_sessions::session::Error> {
    session.insert(keys::PAYMENT_STATUS, status).await
}

/// Forget the payment status so the next order starts pending.
///
/// # Errors
///
/// Returns the session error if the write fails.
pub async fn reset_payment_status(
    session: &Session,
) -> Result<(), tower_sessions::session::Error> {
    session
        .remove::<PaymentStatus>(keys::PAYMENT_STATUS)
        .await
        .map(|_| ())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use tower_sessions::MemoryStore;

    use super::*;

    fn session() -> Session {
        Session::new(None, Arc::new(MemoryStore::default()), None)
    }

    #[tokio::test]
    async fn test_payment_status_defaults_to_pending() {
        assert_eq!(load_payment_status(&session()).await, PaymentStatus::Pending);
    }

    #[tokio::test]
    async fn test_reset_payment_status() {
        let session = session();
        save_payment_status(&session, PaymentStatus::Confirmed)
            .await
            .unwrap();
        assert_eq!(load_payment_status(&session).await, PaymentStatus::Confirmed);

        reset_payment_status(&session).await.unwrap();
        assert_eq!(load_payment_status(&session).await, PaymentStatus::Pending);
    }

    #[tokio::test]
    async fn test_unreadable_payment_status_is_pending() {
        let session = session();
        session
            .insert(keys::PAYMENT_STATUS, "not-a-status")
            .await
            .unwrap();
        assert_eq!(load_payment_status(&session).await, PaymentStatus::Pending);
    }
}
