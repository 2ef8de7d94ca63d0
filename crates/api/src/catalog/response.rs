//! Catalog response bodies.
//!
//! Every catalog endpoint answers `{ "data": { <resource>: .. } }`. On failure
//! the same envelope carries an empty payload next to `error` and `message`,
//! so consumers never need a separate failure branch to render.

use std::marker::PhantomData;

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use shopfront_core::{
    Collection, CollectionProducts, Connection, HandleError, Page, PageSizeError, Product,
};
use thiserror::Error;

/// Body of every catalog response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogResponse<T> {
    /// Short failure summary, e.g. `Failed to fetch products`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    /// Failure detail.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// The payload, empty on failure.
    pub data: T,
}

impl<T> CatalogResponse<T> {
    /// A successful response.
    pub const fn ok(data: T) -> Self {
        Self {
            error: None,
            message: None,
            data,
        }
    }

    /// Whether the response carries a failure.
    #[must_use]
    pub const fn is_error(&self) -> bool {
        self.error.is_some()
    }
}

impl<T: Default> CatalogResponse<T> {
    /// An empty payload with a failure summary and detail.
    pub fn failed(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: Some(error.into()),
            message: Some(message.into()),
            data: T::default(),
        }
    }

    /// An empty payload with no failure fields.
    #[must_use]
    pub fn empty() -> Self {
        Self::ok(T::default())
    }
}

impl<T: Serialize> IntoResponse for CatalogResponse<T> {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}

// =============================================================================
// Payloads
// =============================================================================

/// `{ "products": { "edges": [..] } }`
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct ProductsData {
    pub products: Connection<Product>,
}

/// `{ "product": {..} }`, or `{ "product": null }` when not found.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct ProductData {
    pub product: Option<Product>,
}

/// `{ "collections": { "edges": [..] } }`
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct CollectionsData {
    pub collections: Connection<Collection>,
}

/// `{ "collection": { "products": { "edges": [..] } } }`
///
/// An unknown collection is reported with an empty product list rather than
/// `null`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct CollectionProductsData {
    pub collection: CollectionProducts,
}

/// `{ "pages": { "edges": [..] } }`
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct PagesData {
    pub pages: Connection<Page>,
}

// =============================================================================
// Validation
// =============================================================================

/// A request parameter that fails validation before any upstream call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Invalid handle: {0}")]
    InvalidHandle(#[from] HandleError),
    #[error("Invalid page size: {0}")]
    InvalidPageSize(#[from] PageSizeError),
    /// The query string or path could not be decoded at all, e.g. a repeated
    /// `first` or a handle that is not UTF-8.
    #[error("Malformed request: {0}")]
    Malformed(String),
}

/// HTTP 400 carrying the empty payload of the endpoint that rejected the
/// request.
#[derive(Debug)]
pub struct Rejection<T> {
    error: ValidationError,
    payload: PhantomData<fn() -> T>,
}

impl<T> Rejection<T> {
    /// The validation failure.
    #[must_use]
    pub const fn error(&self) -> &ValidationError {
        &self.error
    }
}

impl<T> From<ValidationError> for Rejection<T> {
    fn from(error: ValidationError) -> Self {
        Self {
            error,
            payload: PhantomData,
        }
    }
}

impl<T> From<HandleError> for Rejection<T> {
    fn from(error: HandleError) -> Self {
        ValidationError::from(error).into()
    }
}

impl<T> From<PageSizeError> for Rejection<T> {
    fn from(error: PageSizeError) -> Self {
        ValidationError::from(error).into()
    }
}

impl<T: Default + Serialize> IntoResponse for Rejection<T> {
    fn into_response(self) -> Response {
        tracing::debug!(error = %self.error, "Rejected catalog request");
        let body = CatalogResponse::<T>::failed("Invalid request", self.error.to_string());
        (StatusCode::BAD_REQUEST, Json(body)).into_response()
    }
}
