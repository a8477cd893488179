//! Checkout route handlers.
//!
//! The checkout reads the handed-off cart from the session on every request.
//! Copy handlers return the copied text so the browser performs the actual
//! clipboard write, together with how long the "copied" indicator stays lit.

use axum::{Json, extract::State};
use serde::Serialize;
use tokio::time::Instant;
use tower_sessions::Session;
use tracing::instrument;

use bitbazaar_core::PaymentStatus;

use crate::error::{AppError, Result, add_breadcrumb};
use crate::models::session::{
    load_cart_manager, load_payment_status, save_cart_manager, save_payment_status,
};
use crate::services::{CapturedClipboard, Checkout, CheckoutView};
use crate::state::AppState;

/// Response for a copy action.
#[derive(Debug, Clone, Serialize)]
pub struct CopyResponse {
    /// Text the browser should place on the clipboard.
    pub text: String,
    pub copied: bool,
    /// Milliseconds until the indicator clears.
    pub reset_after_ms: u64,
}

/// Response for payment confirmation.
#[derive(Debug, Clone, Serialize)]
pub struct ConfirmResponse {
    pub payment_status: PaymentStatus,
}

/// Load the checkout for this session with its recorded payment status.
async fn load_checkout(state: &AppState, session: &Session) -> Checkout {
    Checkout::load(session, &state.config().checkout)
        .await
        .with_payment_status(load_payment_status(session).await)
}

/// Load a checkout that has something in it.
async fn load_non_empty(state: &AppState, session: &Session) -> Result<Checkout> {
    let checkout = load_checkout(state, session).await;
    if checkout.is_empty() {
        return Err(AppError::EmptyCheckout);
    }
    Ok(checkout)
}

/// Show the priced checkout, or the empty state.
///
/// The exchange rate is only fetched when there is something to price.
#[instrument(skip(state, session))]
pub async fn show(State(state): State<AppState>, session: Session) -> Json<CheckoutView> {
    let mut checkout = load_checkout(&state, &session).await;
    if !checkout.is_empty() {
        checkout.apply_quote(state.rates().quote().await);
    }
    Json(checkout.view(Instant::now()))
}

/// Record that the shopper has paid and empty their listing cart.
///
/// The handed-off order stays readable so the checkout keeps showing it as
/// paid until the next hand-off.
#[instrument(skip(state, session))]
pub async fn confirm(
    State(state): State<AppState>,
    session: Session,
) -> Result<Json<ConfirmResponse>> {
    let mut checkout = load_non_empty(&state, &session).await?;
    let payment_status = checkout.confirm_payment();
    save_payment_status(&session, payment_status).await?;

    let mut manager = load_cart_manager(&session).await;
    manager.clear_cart();
    save_cart_manager(&session, &manager).await?;

    add_breadcrumb(
        "checkout",
        "Payment confirmed",
        &[("line_count", checkout.items().len().to_string())],
    );

    Ok(Json(ConfirmResponse { payment_status }))
}

/// Copy the payment address.
#[instrument(skip(state, session))]
pub async fn copy_address(
    State(state): State<AppState>,
    session: Session,
) -> Result<Json<CopyResponse>> {
    let mut checkout = load_non_empty(&state, &session).await?;
    let mut clipboard = CapturedClipboard::default();
    let now = Instant::now();
    checkout.copy_payment_address(&mut clipboard, now)?;

    Ok(Json(copy_response(
        &state,
        clipboard,
        checkout.address_copied(now),
    )?))
}

/// Copy the shipping details.
#[instrument(skip(state, session))]
pub async fn copy_shipping(
    State(state): State<AppState>,
    session: Session,
) -> Result<Json<CopyResponse>> {
    let mut checkout = load_non_empty(&state, &session).await?;
    let mut clipboard = CapturedClipboard::default();
    let now = Instant::now();
    checkout.copy_shipping_details(&mut clipboard, now)?;

    Ok(Json(copy_response(
        &state,
        clipboard,
        checkout.shipping_copied(now),
    )?))
}

fn copy_response(
    state: &AppState,
    clipboard: CapturedClipboard,
    copied: bool,
) -> Result<CopyResponse> {
    let text = clipboard
        .into_last()
        .ok_or_else(|| AppError::Internal("clipboard write not captured".to_string()))?;
    let reset_after_ms =
        u64::try_from(state.config().checkout.copy_flag_duration.as_millis()).unwrap_or(u64::MAX);

    Ok(CopyResponse {
        text,
        copied,
        reset_after_ms,
    })
}
