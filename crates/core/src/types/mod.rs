//! Core types for Shopfront.
//!
//! This module provides the catalog entities served by the gateway and
//! type-safe wrappers for request parameters.

pub mod catalog;
pub mod connection;
pub mod handle;
pub mod page_size;
pub mod price;
pub mod topic;

pub use catalog::{Collection, CollectionProducts, Image, Page, Product, ProductVariant};
pub use connection::{Connection, Edge};
pub use handle::{Handle, HandleError};
pub use page_size::{PageSize, PageSizeError};
pub use price::{Money, PriceRange};
pub use topic::WebhookTopic;
