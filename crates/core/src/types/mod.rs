//! Core types for Bitbazaar.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod email;
pub mod id;
pub mod payable;
pub mod price;
pub mod product;
pub mod quantity;
pub mod shipping;
pub mod status;

pub use email::{Email, EmailError};
pub use id::*;
pub use payable::PayableAmount;
pub use price::{CurrencyCode, Price};
pub use product::{CartLineItem, Product};
pub use quantity::Quantity;
pub use shipping::ShippingProfile;
pub use status::PaymentStatus;
