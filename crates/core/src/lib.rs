//! Bitbazaar Core - Shared types library.
//!
//! This crate provides common types used across all Bitbazaar components:
//! - `storefront` - Catalog, cart, and checkout service
//! - `cli` - Command-line tools for inspecting the catalog and quoting carts
//!
//! # Architecture
//!
//! The core crate contains only types and pure arithmetic - no I/O, no HTTP
//! clients, no session access. This keeps it lightweight and allows it to be
//! used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, quantities, prices,
//!   payable amounts, emails, and payment status, plus the catalog records

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
