//! Catalog entities as returned by the Shopify Storefront API.
//!
//! These are pass-through representations: field names follow the upstream
//! schema (camelCase on the wire) and the gateway only ever normalizes the
//! envelope around them, never the entities themselves.

use serde::{Deserialize, Serialize};

use super::connection::Connection;
use super::price::{Money, PriceRange};

/// Product or collection image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Image {
    /// Image URL.
    pub url: String,
    /// Alt text for accessibility.
    #[serde(default)]
    pub alt_text: Option<String>,
}

/// A product variant.
///
/// Listing queries only request `id` and `price`; the product detail query
/// also requests `title` and `availableForSale`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductVariant {
    /// Variant ID.
    pub id: String,
    /// Variant title (combination of option values).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Current price.
    pub price: Money,
    /// Whether this variant can currently be bought.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub available_for_sale: Option<bool>,
}

/// A product in the store.
///
/// `handle` is unique within a catalog snapshot and is the key used for
/// routing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Product ID.
    pub id: String,
    /// Product title.
    pub title: String,
    /// URL handle.
    pub handle: String,
    /// Plain text description.
    #[serde(default)]
    pub description: String,
    /// Price range across variants.
    pub price_range: PriceRange,
    /// Leading product images.
    #[serde(default)]
    pub images: Connection<Image>,
    /// Leading product variants.
    #[serde(default)]
    pub variants: Connection<ProductVariant>,
}

impl Product {
    /// Minimum variant price.
    #[must_use]
    pub const fn min_price(&self) -> &Money {
        &self.price_range.min_variant_price
    }
}

/// A collection of products.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Collection {
    /// Collection ID.
    pub id: String,
    /// Collection title.
    pub title: String,
    /// URL handle.
    pub handle: String,
    /// Plain text description.
    #[serde(default)]
    pub description: String,
    /// Cover image.
    #[serde(default)]
    pub image: Option<Image>,
}

/// A collection together with a page of its products.
///
/// When the handle does not resolve upstream, or the lookup failed, only the
/// empty `products` connection is present so callers still find `edges`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CollectionProducts {
    /// Collection ID.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Collection title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// URL handle.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub handle: Option<String>,
    /// Products in this collection.
    #[serde(default)]
    pub products: Connection<Product>,
}

/// An online store page. Body content is not fetched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    /// Page ID.
    pub id: String,
    /// Page title.
    pub title: String,
    /// URL handle.
    pub handle: String,
}
