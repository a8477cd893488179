//! HTTP middleware stack for storefront.
//!
//! # Middleware Order (outermost first)
//!
//! 1. Sentry layers (capture errors, transactions)
//! 2. `TraceLayer` (request span carrying `request_id`)
//! 3. Request ID (reuse upstream `x-request-id` or generate one)
//! 4. Session layer (tower-sessions with in-memory store)

pub mod request_id;
pub mod session;

pub use request_id::{REQUEST_ID_HEADER, make_request_span, request_id_middleware};
pub use session::create_session_layer;
