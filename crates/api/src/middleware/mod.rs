//! HTTP middleware stack for the gateway.
//!
//! # Middleware Order (outermost first)
//!
//! 1. Sentry layers (hub per request, HTTP transaction)
//! 2. `TraceLayer` (request span with a `request_id` field)
//! 3. Request ID (fills the span field, echoes `x-request-id`)
//! 4. `Cache-Control: no-store, max-age=0` (catalog routes only)

pub mod request_id;

pub use request_id::{REQUEST_ID_HEADER, request_id_middleware};
