//! Collection route handlers.

use axum::extract::rejection::{PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use shopfront_core::PageSize;
use tracing::instrument;

use crate::catalog::{self, CatalogResponse, CollectionProductsData, CollectionsData, Rejection};
use crate::routes::{ListParams, handle, page_size};
use crate::state::AppState;

const DEFAULT_FIRST: PageSize = PageSize::saturating(10);
const DEFAULT_PRODUCTS_FIRST: PageSize = PageSize::saturating(24);

/// `GET /collections?first=N`
#[instrument(skip_all)]
pub async fn index(
    State(state): State<AppState>,
    query: Result<Query<ListParams>, QueryRejection>,
) -> Result<CatalogResponse<CollectionsData>, Rejection<CollectionsData>> {
    let first = page_size(query, DEFAULT_FIRST)?;
    Ok(catalog::collections(state.shopify(), first).await)
}

/// `GET /collections/{handle}/products?first=N`
///
/// The handle is validated before the page size, and neither reaches
/// Shopify when invalid.
#[instrument(skip_all)]
pub async fn products(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
    query: Result<Query<ListParams>, QueryRejection>,
) -> Result<CatalogResponse<CollectionProductsData>, Rejection<CollectionProductsData>> {
    let handle = handle(path)?;
    let first = page_size(query, DEFAULT_PRODUCTS_FIRST)?;
    Ok(catalog::collection_products(state.shopify(), handle, first).await)
}
