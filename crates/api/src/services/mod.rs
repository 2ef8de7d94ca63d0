//! Business logic services for the gateway.
//!
//! # Services
//!
//! - `webhook` - Shopify webhook signature verification and revalidation

pub mod webhook;
