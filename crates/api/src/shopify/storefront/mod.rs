//! Shopify Storefront API client implementation.
//!
//! Uses `graphql_client` query types with `reqwest` 0.13 for HTTP. Nothing is
//! cached: each method performs exactly one upstream request.

mod envelope;
pub mod queries;
mod transport;

pub use envelope::unwrap_data;
pub use transport::{ACCESS_TOKEN_HEADER, GraphQLTransport, HttpTransport};

use std::sync::Arc;

use shopfront_core::{Collection, CollectionProducts, Connection, Handle, Page, PageSize, Product};
use tracing::{debug, instrument};

use crate::config::ShopifyStorefrontConfig;
use crate::shopify::{ShopifyError, mask_store_domain};

use queries::{
    CatalogQuery, GetCollections, GetPages, GetProductByHandle, GetProducts,
    GetProductsByCollection, get_collections, get_pages, get_product_by_handle, get_products,
    get_products_by_collection,
};

// =============================================================================
// StorefrontClient
// =============================================================================

/// Client for the Shopify Storefront API.
///
/// Cheap to clone; clones share one transport.
#[derive(Clone)]
pub struct StorefrontClient {
    inner: Arc<StorefrontClientInner>,
}

struct StorefrontClientInner {
    transport: Arc<dyn GraphQLTransport>,
    /// Store domain with the store name masked, for logs.
    masked_domain: String,
}

impl std::fmt::Debug for StorefrontClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StorefrontClient")
            .field("store", &self.inner.masked_domain)
            .finish_non_exhaustive()
    }
}

impl StorefrontClient {
    /// Create a client that talks HTTP to the configured store.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP transport cannot be built.
    pub fn new(config: &ShopifyStorefrontConfig) -> Result<Self, ShopifyError> {
        let transport = HttpTransport::new(config)?;
        Ok(Self::with_transport(
            Arc::new(transport),
            mask_store_domain(&config.store_domain),
        ))
    }

    /// Create a client over an arbitrary transport.
    #[must_use]
    pub fn with_transport(
        transport: Arc<dyn GraphQLTransport>,
        masked_domain: impl Into<String>,
    ) -> Self {
        Self {
            inner: Arc::new(StorefrontClientInner {
                transport,
                masked_domain: masked_domain.into(),
            }),
        }
    }

    /// The store domain with the store name masked.
    #[must_use]
    pub fn masked_domain(&self) -> &str {
        &self.inner.masked_domain
    }

    /// Execute a catalog query and decode its normalized response.
    async fn execute<Q: CatalogQuery>(
        &self,
        variables: Q::Variables,
    ) -> Result<Q::ResponseData, ShopifyError>
    where
        Q::Variables: serde::Serialize,
        Q::ResponseData: serde::de::DeserializeOwned,
    {
        let request_body = serde_json::to_value(Q::build_query(variables))?;
        let raw = self.inner.transport.post(request_body).await?;
        let data = unwrap_data(Q::RESOURCE, raw)?;

        serde_json::from_value(data).map_err(|e| {
            debug!(resource = Q::RESOURCE, error = %e, "Response did not match query shape");
            ShopifyError::Parse(e)
        })
    }

    // =========================================================================
    // Product Methods
    // =========================================================================

    /// Get the first `first` products.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self), fields(first = first.get()))]
    pub async fn get_products(&self, first: PageSize) -> Result<Connection<Product>, ShopifyError> {
        let variables = get_products::Variables {
            first: i64::from(first),
        };
        let mut products = self.execute::<GetProducts>(variables).await?.products;
        products.truncate(first.as_usize());
        Ok(products)
    }

    /// Get a product by its handle. `None` when no product has that handle.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self), fields(handle = %handle))]
    pub async fn get_product_by_handle(
        &self,
        handle: &Handle,
    ) -> Result<Option<Product>, ShopifyError> {
        let variables = get_product_by_handle::Variables {
            handle: handle.to_string(),
        };
        Ok(self.execute::<GetProductByHandle>(variables).await?.product)
    }

    // =========================================================================
    // Collection Methods
    // =========================================================================

    /// Get the first `first` collections.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self), fields(first = first.get()))]
    pub async fn get_collections(
        &self,
        first: PageSize,
    ) -> Result<Connection<Collection>, ShopifyError> {
        let variables = get_collections::Variables {
            first: i64::from(first),
        };
        let mut collections = self.execute::<GetCollections>(variables).await?.collections;
        collections.truncate(first.as_usize());
        Ok(collections)
    }

    /// Get the first `first` products of a collection.
    ///
    /// An unknown collection yields an empty product list.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self), fields(handle = %handle, first = first.get()))]
    pub async fn get_collection_products(
        &self,
        handle: &Handle,
        first: PageSize,
    ) -> Result<CollectionProducts, ShopifyError> {
        let variables = get_products_by_collection::Variables {
            handle: handle.to_string(),
            first: i64::from(first),
        };
        let mut collection = self
            .execute::<GetProductsByCollection>(variables)
            .await?
            .collection
            .unwrap_or_default();
        collection.products.truncate(first.as_usize());
        Ok(collection)
    }

    // =========================================================================
    // Content Methods
    // =========================================================================

    /// Get the first `first` content pages.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails, including when the token
    /// lacks the `unauthenticated_read_content` scope.
    #[instrument(skip(self), fields(first = first.get()))]
    pub async fn get_pages(&self, first: PageSize) -> Result<Connection<Page>, ShopifyError> {
        let variables = get_pages::Variables {
            first: i64::from(first),
        };
        let mut pages = self.execute::<GetPages>(variables).await?.pages;
        pages.truncate(first.as_usize());
        Ok(pages)
    }
}
