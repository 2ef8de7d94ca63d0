//! Fetch-and-normalize facade over the Storefront client.
//!
//! Each function performs one upstream call and never fails: configuration,
//! transport, status, GraphQL and decoding failures all become a
//! [`CatalogResponse`] with an empty payload and an `error` summary, logged
//! once with enough detail for an operator.

mod response;

pub use response::{
    CatalogResponse, CollectionProductsData, CollectionsData, PagesData, ProductData,
    ProductsData, Rejection, ValidationError,
};

use std::future::Future;

use shopfront_core::{Handle, PageSize};
use tracing::instrument;

use crate::shopify::{ClientFactory, ShopifyError, StorefrontClient};

/// A catalog resource served by the gateway.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resource {
    Products,
    Product,
    Collections,
    CollectionProducts,
    Pages,
}

impl Resource {
    /// Name used in failure summaries and logs.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Products => "products",
            Self::Product => "product",
            Self::Collections => "collections",
            Self::CollectionProducts => "collection products",
            Self::Pages => "pages",
        }
    }

    /// Summary placed in the `error` field of a failed response.
    #[must_use]
    pub fn failure_summary(self) -> String {
        format!("Failed to fetch {}", self.label())
    }
}

/// First `first` products.
#[instrument(skip(factory))]
pub async fn products(factory: &ClientFactory, first: PageSize) -> CatalogResponse<ProductsData> {
    fetch(factory, Resource::Products, |client| async move {
        let products = client.get_products(first).await?;
        Ok(ProductsData { products })
    })
    .await
}

/// A single product. An unknown handle is a success with `product: null`.
#[instrument(skip(factory), fields(handle = %handle))]
pub async fn product(factory: &ClientFactory, handle: Handle) -> CatalogResponse<ProductData> {
    fetch(factory, Resource::Product, |client| async move {
        let product = client.get_product_by_handle(&handle).await?;
        Ok(ProductData { product })
    })
    .await
}

/// First `first` collections.
#[instrument(skip(factory))]
pub async fn collections(
    factory: &ClientFactory,
    first: PageSize,
) -> CatalogResponse<CollectionsData> {
    fetch(factory, Resource::Collections, |client| async move {
        let collections = client.get_collections(first).await?;
        Ok(CollectionsData { collections })
    })
    .await
}

/// First `first` products of a collection.
#[instrument(skip(factory), fields(handle = %handle))]
pub async fn collection_products(
    factory: &ClientFactory,
    handle: Handle,
    first: PageSize,
) -> CatalogResponse<CollectionProductsData> {
    fetch(factory, Resource::CollectionProducts, |client| async move {
        let collection = client.get_collection_products(&handle, first).await?;
        Ok(CollectionProductsData { collection })
    })
    .await
}

/// First `first` content pages.
///
/// A token without the `unauthenticated_read_content` scope is a known
/// deployment state, so that denial yields an empty list with no `error`.
#[instrument(skip(factory))]
pub async fn pages(factory: &ClientFactory, first: PageSize) -> CatalogResponse<PagesData> {
    fetch(factory, Resource::Pages, |client| async move {
        let pages = client.get_pages(first).await?;
        Ok(PagesData { pages })
    })
    .await
}

/// Obtain the client, run `op`, and degrade any failure.
async fn fetch<T, F, Fut>(factory: &ClientFactory, resource: Resource, op: F) -> CatalogResponse<T>
where
    T: Default,
    F: FnOnce(StorefrontClient) -> Fut,
    Fut: Future<Output = Result<T, ShopifyError>>,
{
    let client = match factory.client().await {
        Ok(client) => client,
        Err(e) => return degrade(resource, &e, None),
    };
    let store = client.masked_domain().to_owned();

    match op(client).await {
        Ok(data) => CatalogResponse::ok(data),
        Err(e) => degrade(resource, &e, Some(&store)),
    }
}

/// Turn a failure into the empty payload for `resource`, logging it once.
fn degrade<T: Default>(
    resource: Resource,
    err: &ShopifyError,
    store: Option<&str>,
) -> CatalogResponse<T> {
    let store = store.unwrap_or("unconfigured");

    if resource == Resource::Pages && err.is_permission_denied() {
        tracing::info!(
            resource = resource.label(),
            store,
            "Pages access denied, token lacks the unauthenticated_read_content scope"
        );
        return CatalogResponse::empty();
    }

    let graphql_errors = match err {
        ShopifyError::GraphQL(errors) => Some(format!("{errors:?}")),
        _ => None,
    };
    tracing::error!(
        resource = resource.label(),
        error = %err,
        graphql_errors,
        store,
        configuration = err.is_configuration(),
        "Shopify catalog request failed"
    );

    CatalogResponse::failed(resource.failure_summary(), err.public_message())
}
