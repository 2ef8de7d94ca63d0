//! Shopfront gateway library.
//!
//! A read-only JSON facade over the Shopify Storefront API. Exposed as a
//! library so the router can be driven in tests without a network.

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod catalog;
pub mod config;
pub mod error;
pub mod middleware;
pub mod routes;
pub mod services;
pub mod shopify;
pub mod state;

pub use routes::router;
pub use state::AppState;
