//! Lazily constructed, shared Storefront client.

use std::sync::Arc;

use tokio::sync::OnceCell;

use crate::config::{ConfigSource, ProcessEnv, ShopifyStorefrontConfig};
use crate::shopify::{ShopifyError, StorefrontClient};

/// Builds the [`StorefrontClient`] on first use and hands out clones of it.
///
/// Configuration is read from the [`ConfigSource`] at the first call rather
/// than at startup. Only a successful build is memoized; while configuration
/// is missing every call re-reads the source.
pub struct ClientFactory {
    source: Arc<dyn ConfigSource>,
    client: OnceCell<StorefrontClient>,
}

impl std::fmt::Debug for ClientFactory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientFactory")
            .field("client", &self.client.get())
            .finish_non_exhaustive()
    }
}

impl ClientFactory {
    /// Factory reading from `source`.
    #[must_use]
    pub fn new(source: Arc<dyn ConfigSource>) -> Self {
        Self {
            source,
            client: OnceCell::new(),
        }
    }

    /// Factory reading from the process environment.
    #[must_use]
    pub fn from_env() -> Self {
        Self::new(Arc::new(ProcessEnv))
    }

    /// Factory that always returns `client`.
    #[must_use]
    pub fn with_client(client: StorefrontClient) -> Self {
        Self {
            source: Arc::new(ProcessEnv),
            client: OnceCell::new_with(Some(client)),
        }
    }

    /// Get the shared client, building it if needed.
    ///
    /// # Errors
    ///
    /// Returns [`ShopifyError::NotConfigured`] naming the missing variables,
    /// or a transport construction error.
    pub async fn client(&self) -> Result<StorefrontClient, ShopifyError> {
        self.client
            .get_or_try_init(|| async { self.build() })
            .await
            .cloned()
    }

    /// Whether a client exists or could be built right now.
    #[must_use]
    pub fn is_configured(&self) -> bool {
        self.client.initialized()
            || ShopifyStorefrontConfig::from_source(self.source.as_ref()).is_ok()
    }

    fn build(&self) -> Result<StorefrontClient, ShopifyError> {
        let config = ShopifyStorefrontConfig::from_source(self.source.as_ref())?;
        let client = StorefrontClient::new(&config)?;
        tracing::info!(
            store = %client.masked_domain(),
            api_version = %config.api_version,
            "Shopify Storefront client initialized"
        );
        Ok(client)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::RwLock;

    use super::*;
    use crate::config::{ACCESS_TOKEN_VAR, ConfigError, STORE_DOMAIN_VAR};

    /// A source whose values can change between calls.
    #[derive(Default)]
    struct Mutable(RwLock<HashMap<String, String>>);

    impl ConfigSource for Mutable {
        fn get(&self, key: &str) -> Option<String> {
            ConfigSource::get(&*self.0.read().unwrap(), key)
        }
    }

    #[tokio::test]
    async fn test_missing_config_names_variables() {
        let factory = ClientFactory::new(Arc::new(HashMap::<String, String>::new()));

        let err = factory.client().await.unwrap_err();

        assert!(err.is_configuration());
        let ShopifyError::NotConfigured(ConfigError::Missing(names)) = err else {
            panic!("expected missing config");
        };
        assert_eq!(names, vec![STORE_DOMAIN_VAR, ACCESS_TOKEN_VAR]);
        assert!(!factory.is_configured());
    }

    #[tokio::test]
    async fn test_failure_is_not_memoized() {
        let source = Arc::new(Mutable::default());
        let factory = ClientFactory::new(source.clone());
        assert!(factory.client().await.is_err());

        {
            let mut values = source.0.write().unwrap();
            values.insert(STORE_DOMAIN_VAR.to_string(), "late.myshopify.com".to_string());
            values.insert(ACCESS_TOKEN_VAR.to_string(), "token".to_string());
        }

        let client = factory.client().await.unwrap();
        assert_eq!(client.masked_domain(), "lat***.myshopify.com");
        assert!(factory.is_configured());
    }

    #[tokio::test]
    async fn test_success_is_memoized() {
        let source = Arc::new(Mutable::default());
        {
            let mut values = source.0.write().unwrap();
            values.insert(STORE_DOMAIN_VAR.to_string(), "first.myshopify.com".to_string());
            values.insert(ACCESS_TOKEN_VAR.to_string(), "token".to_string());
        }
        let factory = ClientFactory::new(source.clone());
        factory.client().await.unwrap();

        source.0.write().unwrap().clear();

        let client = factory.client().await.unwrap();
        assert_eq!(client.masked_domain(), "fir***.myshopify.com");
    }
}
