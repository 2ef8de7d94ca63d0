//! Product route handlers.

use axum::extract::rejection::{PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use shopfront_core::PageSize;
use tracing::instrument;

use crate::catalog::{self, CatalogResponse, ProductData, ProductsData, Rejection};
use crate::routes::{ListParams, handle, page_size};
use crate::state::AppState;

const DEFAULT_FIRST: PageSize = PageSize::saturating(12);

/// `GET /products?first=N`
#[instrument(skip_all)]
pub async fn index(
    State(state): State<AppState>,
    query: Result<Query<ListParams>, QueryRejection>,
) -> Result<CatalogResponse<ProductsData>, Rejection<ProductsData>> {
    let first = page_size(query, DEFAULT_FIRST)?;
    Ok(catalog::products(state.shopify(), first).await)
}

/// `GET /products/{handle}`
#[instrument(skip_all)]
pub async fn show(
    State(state): State<AppState>,
    path: Result<Path<String>, PathRejection>,
) -> Result<CatalogResponse<ProductData>, Rejection<ProductData>> {
    let handle = handle(path)?;
    Ok(catalog::product(state.shopify(), handle).await)
}
