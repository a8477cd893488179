//! Checkout calculator.
//!
//! Loads the handed-off cart, prices it against a spot exchange rate, and
//! tracks the shopper's payment confirmation.
//!
//! # Payment state
//!
//! ```text
//! Pending --confirm_payment--> Confirmed
//! ```
//!
//! Confirmation is terminal and idempotent. An empty cart is a terminal view
//! of its own: nothing is computed and checkout is not possible.

use std::time::Duration;

use bitbazaar_core::{CartLineItem, Email, PayableAmount, PaymentStatus, Price, ShippingProfile};
use rust_decimal::Decimal;
use serde::Serialize;
use tokio::time::Instant;
use tracing::info;

use crate::config::CheckoutConfig;
use crate::handoff::{self, HandoffStore};
use crate::rates::RateQuote;
use crate::services::clipboard::{Clipboard, ClipboardError, CopyFlag};

/// Ticker of the payment asset.
pub const PAYMENT_ASSET: &str = "BTC";

/// Receiver details printed on every order.
#[must_use]
#[allow(clippy::expect_used)] // The literal is a valid address
pub fn default_shipping_profile() -> ShippingProfile {
    ShippingProfile {
        name: "Jordan Avery".to_string(),
        address: "8 Harbour Road, Greater Manchester, England, United Kingdom, M1 1AA".to_string(),
        zip_code: "M1 1AA".to_string(),
        email: Email::parse("orders@bitbazaar.example").expect("literal email is valid"),
        phone: "+44 0161 496 0000".to_string(),
    }
}

// =============================================================================
// Pure computations
// =============================================================================

/// Subtotal, shipping, and grand total for a cart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CheckoutTotals {
    pub subtotal: Price,
    pub shipping_total: Price,
    pub total: Price,
}

/// Sum line prices and per-unit shipping over `items`.
///
/// Accumulates exactly; round only for display.
#[must_use]
pub fn compute_totals(items: &[CartLineItem]) -> CheckoutTotals {
    let sum = |f: fn(&CartLineItem) -> Price| {
        items
            .iter()
            .map(f)
            .fold(Price::zero(), |acc, p| acc.checked_add(p).unwrap_or(acc))
    };

    let subtotal = sum(CartLineItem::line_total);
    let shipping_total = sum(CartLineItem::line_shipping);
    let total = subtotal.checked_add(shipping_total).unwrap_or(subtotal);

    CheckoutTotals {
        subtotal,
        shipping_total,
        total,
    }
}

/// Convert `total` into the payment asset at `rate`.
///
/// Zero when `rate` is not positive (for example, before a quote arrives).
#[must_use]
pub fn compute_payable_amount(total: Decimal, rate: Decimal) -> PayableAmount {
    PayableAmount::from_total(total, rate)
}

// =============================================================================
// Checkout
// =============================================================================

/// One checkout page session.
#[derive(Debug, Clone)]
pub struct Checkout {
    items: Vec<CartLineItem>,
    quote: Option<RateQuote>,
    payment: PaymentStatus,
    payment_address: String,
    shipping: ShippingProfile,
    copy_flag_duration: Duration,
    address_copied: CopyFlag,
    shipping_copied: CopyFlag,
}

impl Checkout {
    /// Build a checkout over `items`.
    #[must_use]
    pub fn new(items: Vec<CartLineItem>, config: &CheckoutConfig) -> Self {
        Self {
            items,
            quote: None,
            payment: PaymentStatus::default(),
            payment_address: config.payment_address.clone(),
            shipping: default_shipping_profile(),
            copy_flag_duration: config.copy_flag_duration,
            address_copied: CopyFlag::default(),
            shipping_copied: CopyFlag::default(),
        }
    }

    /// Load the handed-off cart from `store`.
    ///
    /// Absent or malformed data yields an empty checkout.
    pub async fn load<S: HandoffStore>(store: &S, config: &CheckoutConfig) -> Self {
        let items = handoff::read_cart(store).await;
        Self::new(items, config)
    }

    /// Restore a previously recorded payment status.
    #[must_use]
    pub const fn with_payment_status(mut self, payment: PaymentStatus) -> Self {
        self.payment = payment;
        self
    }

    /// Whether there is nothing to check out.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Loaded line items.
    #[must_use]
    pub fn items(&self) -> &[CartLineItem] {
        &self.items
    }

    /// Apply an exchange-rate quote.
    pub fn apply_quote(&mut self, quote: RateQuote) {
        self.quote = Some(quote);
    }

    /// The applied quote, if any.
    #[must_use]
    pub const fn quote(&self) -> Option<&RateQuote> {
        self.quote.as_ref()
    }

    /// Totals, or `None` for an empty cart.
    #[must_use]
    pub fn totals(&self) -> Option<CheckoutTotals> {
        (!self.is_empty()).then(|| compute_totals(&self.items))
    }

    /// Amount owed in the payment asset; zero until a quote is applied.
    #[must_use]
    pub fn payable_amount(&self) -> PayableAmount {
        match (self.totals(), &self.quote) {
            (Some(totals), Some(quote)) => compute_payable_amount(totals.total.amount, quote.rate),
            _ => PayableAmount::zero(),
        }
    }

    /// Current payment status.
    #[must_use]
    pub const fn payment_status(&self) -> PaymentStatus {
        self.payment
    }

    /// Record that the shopper sent payment. Repeat calls are no-ops.
    pub fn confirm_payment(&mut self) -> PaymentStatus {
        if !self.payment.is_confirmed() {
            info!(
                amount = %self.payable_amount(),
                asset = PAYMENT_ASSET,
                "Payment confirmed by shopper"
            );
        }
        self.payment = self.payment.confirm();
        self.payment
    }

    /// Address shoppers pay to.
    #[must_use]
    pub fn payment_address(&self) -> &str {
        &self.payment_address
    }

    /// Shipping destination.
    #[must_use]
    pub const fn shipping(&self) -> &ShippingProfile {
        &self.shipping
    }

    /// Copy the payment address and light the address indicator.
    ///
    /// # Errors
    ///
    /// Returns `ClipboardError` if the sink rejects the write; the indicator
    /// stays clear in that case.
    pub fn copy_payment_address<C: Clipboard>(
        &mut self,
        clipboard: &mut C,
        now: Instant,
    ) -> Result<(), ClipboardError> {
        clipboard.write_text(&self.payment_address)?;
        self.address_copied.arm(now, self.copy_flag_duration);
        Ok(())
    }

    /// Copy the shipping summary and light the shipping indicator.
    ///
    /// # Errors
    ///
    /// Returns `ClipboardError` if the sink rejects the write; the indicator
    /// stays clear in that case.
    pub fn copy_shipping_details<C: Clipboard>(
        &mut self,
        clipboard: &mut C,
        now: Instant,
    ) -> Result<(), ClipboardError> {
        clipboard.write_text(&self.shipping.summary())?;
        self.shipping_copied.arm(now, self.copy_flag_duration);
        Ok(())
    }

    /// Whether the address indicator is lit at `now`.
    #[must_use]
    pub fn address_copied(&self, now: Instant) -> bool {
        self.address_copied.is_set(now)
    }

    /// Whether the shipping indicator is lit at `now`.
    #[must_use]
    pub fn shipping_copied(&self, now: Instant) -> bool {
        self.shipping_copied.is_set(now)
    }

    /// Render the checkout at `now`.
    #[must_use]
    pub fn view(&self, now: Instant) -> CheckoutView {
        let Some(totals) = self.totals() else {
            return CheckoutView::Empty;
        };

        CheckoutView::Ready(Box::new(CheckoutSummary {
            lines: self.items.iter().map(CheckoutLine::from).collect(),
            subtotal: totals.subtotal.display(),
            shipping_total: totals.shipping_total.display(),
            total: totals.total.display(),
            payable_amount: self.payable_amount(),
            asset: PAYMENT_ASSET,
            quote: self.quote.clone(),
            rate_notice: self.quote.as_ref().and_then(RateQuote::notice),
            payment_status: self.payment,
            payment_address: self.payment_address.clone(),
            shipping: self.shipping.clone(),
            address_copied: self.address_copied(now),
            shipping_copied: self.shipping_copied(now),
        }))
    }
}

/// What the checkout page shows.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "summary", rename_all = "snake_case")]
pub enum CheckoutView {
    /// No items to check out.
    Empty,
    /// Priced order ready for payment.
    Ready(Box<CheckoutSummary>),
}

/// Priced order summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckoutSummary {
    pub lines: Vec<CheckoutLine>,
    pub subtotal: String,
    pub shipping_total: String,
    pub total: String,
    pub payable_amount: PayableAmount,
    pub asset: &'static str,
    pub quote: Option<RateQuote>,
    pub rate_notice: Option<&'static str>,
    pub payment_status: PaymentStatus,
    pub payment_address: String,
    pub shipping: ShippingProfile,
    /// Address indicator state of this `Checkout` value. The HTTP checkout
    /// is rebuilt per request, so there it is always false and the browser
    /// lights its own indicator from the copy response's `reset_after_ms`.
    pub address_copied: bool,
    /// Shipping indicator state; same caveat as `address_copied`.
    pub shipping_copied: bool,
}

/// One order summary row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckoutLine {
    pub product_id: i32,
    pub title: String,
    pub image: String,
    pub quantity: u32,
    pub unit_price: String,
    pub line_total: String,
}

impl From<&CartLineItem> for CheckoutLine {
    fn from(item: &CartLineItem) -> Self {
        Self {
            product_id: item.product_id().as_i32(),
            title: item.product.title.clone(),
            image: item.product.image.clone(),
            quantity: item.quantity,
            unit_price: item.product.unit_price().display(),
            line_total: item.line_total().display(),
        }
    }
}
