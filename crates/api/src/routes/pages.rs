//! Content page route handlers.

use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use shopfront_core::PageSize;
use tracing::instrument;

use crate::catalog::{self, CatalogResponse, PagesData, Rejection};
use crate::routes::{ListParams, page_size};
use crate::state::AppState;

const DEFAULT_FIRST: PageSize = PageSize::saturating(10);

/// `GET /pages?first=N`
#[instrument(skip_all)]
pub async fn index(
    State(state): State<AppState>,
    query: Result<Query<ListParams>, QueryRejection>,
) -> Result<CatalogResponse<PagesData>, Rejection<PagesData>> {
    let first = page_size(query, DEFAULT_FIRST)?;
    Ok(catalog::pages(state.shopify(), first).await)
}
