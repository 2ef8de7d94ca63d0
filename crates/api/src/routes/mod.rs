//! HTTP route handlers for the gateway.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                          - Liveness check
//! GET  /health/ready                    - Readiness (Shopify configured)
//!
//! # Catalog (always 200 unless parameters are invalid)
//! GET  /products?first=N                - Product listing (default 12)
//! GET  /products/{handle}               - Product detail
//! GET  /collections?first=N             - Collection listing (default 10)
//! GET  /collections/{handle}/products   - Collection products (default 24)
//! GET  /pages?first=N                   - Content pages (default 10)
//!
//! # Webhooks
//! POST /webhooks/upstream               - Shopify webhook receiver
//! GET  /webhooks/upstream               - Endpoint probe
//! ```

pub mod collections;
pub mod health;
pub mod pages;
pub mod products;
pub mod webhooks;

use axum::{
    Router,
    extract::{
        Path, Query, Request,
        rejection::{PathRejection, QueryRejection},
    },
    http::{HeaderValue, Uri, header::CACHE_CONTROL},
    middleware::from_fn,
    response::{IntoResponse, Response},
    routing::get,
};
use serde::Deserialize;
use shopfront_core::{Handle, HandleError, PageSize};
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

use crate::catalog::{CollectionProductsData, ProductData, Rejection, ValidationError};
use crate::error::AppError;
use crate::middleware::request_id_middleware;
use crate::state::AppState;

/// Catalog responses are never cached by the gateway or downstream.
pub const CATALOG_CACHE_CONTROL: &str = "no-store, max-age=0";

/// Query parameters shared by the listing endpoints.
///
/// `first` is parsed by `PageSize::parse`, not by the extractor.
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    pub first: Option<String>,
}

/// `first` from the query string, or `default` when absent or blank.
fn page_size<T>(
    query: Result<Query<ListParams>, QueryRejection>,
    default: PageSize,
) -> Result<PageSize, Rejection<T>> {
    let Query(params) = query.map_err(|e| ValidationError::Malformed(e.body_text()))?;
    Ok(PageSize::parse(params.first.as_deref(), default)?)
}

/// The `{handle}` path segment.
fn handle<T>(path: Result<Path<String>, PathRejection>) -> Result<Handle, Rejection<T>> {
    let Path(raw) = path.map_err(|e| ValidationError::Malformed(e.body_text()))?;
    Ok(Handle::parse(&raw)?)
}

/// Create the catalog routes router.
pub fn catalog_routes() -> Router<AppState> {
    Router::new()
        .route("/products", get(products::index))
        .route("/products/{handle}", get(products::show))
        .route("/collections", get(collections::index))
        .route("/collections/{handle}/products", get(collections::products))
        .route("/pages", get(pages::index))
        .layer(SetResponseHeaderLayer::overriding(
            CACHE_CONTROL,
            HeaderValue::from_static(CATALOG_CACHE_CONTROL),
        ))
}

/// Create the full application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health))
        .route("/health/ready", get(health::readiness))
        .route(
            "/webhooks/upstream",
            get(webhooks::status).post(webhooks::receive),
        )
        .merge(catalog_routes())
        .fallback(not_found)
        .layer(from_fn(request_id_middleware))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &Request| {
                tracing::info_span!(
                    "http_request",
                    method = %request.method(),
                    uri = %request.uri(),
                    request_id = tracing::field::Empty,
                )
            }),
        )
        .with_state(state)
}

/// Unmatched paths. `{handle}` never matches an empty segment, so requests
/// with a blank handle land here and are rejected as invalid.
async fn not_found(uri: Uri) -> Response {
    let cache_control = [(CACHE_CONTROL, CATALOG_CACHE_CONTROL)];
    match uri.path() {
        "/collections//products" | "/collections//products/" => (
            cache_control,
            Rejection::<CollectionProductsData>::from(HandleError::Empty),
        )
            .into_response(),
        "/products/" => (
            cache_control,
            Rejection::<ProductData>::from(HandleError::Empty),
        )
            .into_response(),
        path => AppError::NotFound(path.to_string()).into_response(),
    }
}
