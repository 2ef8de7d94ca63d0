//! GraphQL query catalog for the Shopify Storefront API.
//!
//! Each query is a fixed document plus typed variables and response data.
//! They implement `graphql_client::GraphQLQuery` by hand rather than through
//! the derive, since the gateway carries no copy of the Storefront schema.

use graphql_client::{GraphQLQuery, QueryBody};
use serde::{Deserialize, Serialize};
use shopfront_core::{Collection, CollectionProducts, Connection, Page, Product};

/// A catalog query whose result lives under a single top-level field.
pub trait CatalogQuery: GraphQLQuery {
    /// The top-level response field, used to locate the payload inside
    /// either envelope shape.
    const RESOURCE: &'static str;
}

macro_rules! catalog_query {
    ($name:ident, $module:ident, $resource:literal) => {
        pub struct $name;

        impl GraphQLQuery for $name {
            type Variables = $module::Variables;
            type ResponseData = $module::ResponseData;

            fn build_query(variables: Self::Variables) -> QueryBody<Self::Variables> {
                QueryBody {
                    variables,
                    query: $module::QUERY,
                    operation_name: $module::OPERATION_NAME,
                }
            }
        }

        impl CatalogQuery for $name {
            const RESOURCE: &'static str = $resource;
        }
    };
}

catalog_query!(GetProducts, get_products, "products");
catalog_query!(GetProductByHandle, get_product_by_handle, "product");
catalog_query!(GetCollections, get_collections, "collections");
catalog_query!(
    GetProductsByCollection,
    get_products_by_collection,
    "collection"
);
catalog_query!(GetPages, get_pages, "pages");

pub mod get_products {
    use super::{Connection, Deserialize, Product, Serialize};

    pub const OPERATION_NAME: &str = "getProducts";
    pub const QUERY: &str = r"
query getProducts($first: Int!) {
  products(first: $first) {
    edges {
      node {
        id
        title
        handle
        description
        priceRange {
          minVariantPrice {
            amount
            currencyCode
          }
        }
        images(first: 1) {
          edges {
            node {
              url
              altText
            }
          }
        }
        variants(first: 1) {
          edges {
            node {
              id
              price {
                amount
                currencyCode
              }
            }
          }
        }
      }
    }
  }
}
";

    #[derive(Debug, Clone, Serialize)]
    pub struct Variables {
        pub first: i64,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct ResponseData {
        pub products: Connection<Product>,
    }
}

pub mod get_product_by_handle {
    use super::{Deserialize, Product, Serialize};

    pub const OPERATION_NAME: &str = "getProductByHandle";
    pub const QUERY: &str = r"
query getProductByHandle($handle: String!) {
  product(handle: $handle) {
    id
    title
    handle
    description
    priceRange {
      minVariantPrice {
        amount
        currencyCode
      }
    }
    images(first: 5) {
      edges {
        node {
          url
          altText
        }
      }
    }
    variants(first: 10) {
      edges {
        node {
          id
          title
          price {
            amount
            currencyCode
          }
          availableForSale
        }
      }
    }
  }
}
";

    #[derive(Debug, Clone, Serialize)]
    pub struct Variables {
        pub handle: String,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct ResponseData {
        pub product: Option<Product>,
    }
}

pub mod get_collections {
    use super::{Collection, Connection, Deserialize, Serialize};

    pub const OPERATION_NAME: &str = "getCollections";
    pub const QUERY: &str = r"
query getCollections($first: Int!) {
  collections(first: $first) {
    edges {
      node {
        id
        title
        handle
        description
        image {
          url
          altText
        }
      }
    }
  }
}
";

    #[derive(Debug, Clone, Serialize)]
    pub struct Variables {
        pub first: i64,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct ResponseData {
        pub collections: Connection<Collection>,
    }
}

pub mod get_products_by_collection {
    use super::{CollectionProducts, Deserialize, Serialize};

    pub const OPERATION_NAME: &str = "getProductsByCollection";
    pub const QUERY: &str = r"
query getProductsByCollection($handle: String!, $first: Int!) {
  collection(handle: $handle) {
    id
    title
    handle
    products(first: $first) {
      edges {
        node {
          id
          title
          handle
          description
          priceRange {
            minVariantPrice {
              amount
              currencyCode
            }
          }
          images(first: 1) {
            edges {
              node {
                url
                altText
              }
            }
          }
          variants(first: 1) {
            edges {
              node {
                id
                price {
                  amount
                  currencyCode
                }
              }
            }
          }
        }
      }
    }
  }
}
";

    #[derive(Debug, Clone, Serialize)]
    pub struct Variables {
        pub handle: String,
        pub first: i64,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct ResponseData {
        pub collection: Option<CollectionProducts>,
    }
}

pub mod get_pages {
    use super::{Connection, Deserialize, Page, Serialize};

    pub const OPERATION_NAME: &str = "getPages";
    pub const QUERY: &str = r"
query getPages($first: Int!) {
  pages(first: $first) {
    edges {
      node {
        id
        title
        handle
      }
    }
  }
}
";

    #[derive(Debug, Clone, Serialize)]
    pub struct Variables {
        pub first: i64,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct ResponseData {
        pub pages: Connection<Page>,
    }
}
