//! Shopfront Core - Shared catalog types.
//!
//! This crate provides the types exchanged between the Shopfront gateway and
//! its callers:
//! - Catalog entities as served by the Shopify Storefront API
//! - The `edges`/`node` pagination envelope
//! - Validated request parameters (handles, page sizes)
//! - Webhook topic classification
//!
//! # Architecture
//!
//! The core crate contains only types and traits - no I/O, no HTTP clients.
//! This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Catalog entities, connections and request newtypes

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
