//! Business logic services for storefront.
//!
//! # Services
//!
//! - `cart` - Catalog and cart manager (likes, pending quantities, cart lines)
//! - `checkout` - Checkout calculator (totals, payable amount, payment state)
//! - `clipboard` - Clipboard sink and timed "copied" indicator

pub mod cart;
pub mod checkout;
pub mod clipboard;

pub use cart::{Cart, CartManager, CheckoutRedirect, MergePolicy};
pub use checkout::{
    Checkout, CheckoutLine, CheckoutSummary, CheckoutTotals, CheckoutView, compute_payable_amount,
    compute_totals,
};
pub use clipboard::{CapturedClipboard, Clipboard, ClipboardError, CopyFlag};
