//! Domain models for storefront.
//!
//! Catalog and cart records live in `bitbazaar-core`; this module only holds
//! what the storefront keeps in the shopper's session.

pub mod session;

pub use session::keys as session_keys;
