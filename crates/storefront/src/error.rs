//! Unified error handling with Sentry integration.
//!
//! Provides a unified `AppError` type that captures errors to Sentry before
//! responding to the client. Cart and checkout operations themselves never
//! fail on bad input; errors here come from the session backend, the hand-off
//! store, or requests naming products that do not exist.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

use bitbazaar_core::ProductId;

use crate::handoff::HandoffError;
use crate::services::ClipboardError;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// Session backend failed.
    #[error("Session error: {0}")]
    Session(#[from] tower_sessions::session::Error),

    /// Hand-off store failed.
    #[error("Hand-off error: {0}")]
    Handoff(#[from] HandoffError),

    /// Clipboard sink failed.
    #[error("Clipboard error: {0}")]
    Clipboard(#[from] ClipboardError),

    /// No such product in the catalog.
    #[error("Product not found: {0}")]
    ProductNotFound(ProductId),

    /// Checkout requested with nothing handed off.
    #[error("No items to checkout")]
    EmptyCheckout,

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// HTTP status for this error.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::Session(_) | Self::Handoff(_) | Self::Clipboard(_) | Self::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            Self::ProductNotFound(_) => StatusCode::NOT_FOUND,
            Self::EmptyCheckout => StatusCode::CONFLICT,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        // Capture server errors to Sentry
        if status.is_server_error() {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        }

        // Don't expose internal error details to clients
        let message = if status.is_server_error() {
            "Internal server error".to_string()
        } else {
            self.to_string()
        };

        (status, Json(json!({ "error": message }))).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

/// Add a breadcrumb for shopper actions.
///
/// Breadcrumbs appear in Sentry error reports to show the trail of actions
/// leading up to an error.
pub fn add_breadcrumb(category: &str, message: &str, data: &[(&str, String)]) {
    let mut breadcrumb = sentry::Breadcrumb {
        category: Some(category.to_string()),
        message: Some(message.to_string()),
        level: sentry::Level::Info,
        ..Default::default()
    };

    for (key, value) in data {
        breadcrumb
            .data
            .insert((*key).to_string(), serde_json::Value::String(value.clone()));
    }

    sentry::add_breadcrumb(breadcrumb);
}
