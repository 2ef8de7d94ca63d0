//! Application state shared across handlers.

use std::sync::Arc;

use crate::config::ShopfrontConfig;
use crate::services::webhook::{LogRevalidator, Revalidate};
use crate::shopify::ClientFactory;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc`.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: ShopfrontConfig,
    shopify: ClientFactory,
    revalidator: Arc<dyn Revalidate>,
}

impl AppState {
    /// Create application state reading Shopify settings from the process
    /// environment on first use.
    #[must_use]
    pub fn new(config: ShopfrontConfig) -> Self {
        Self::with_parts(config, ClientFactory::from_env(), Arc::new(LogRevalidator))
    }

    /// Create application state from explicit parts.
    #[must_use]
    pub fn with_parts(
        config: ShopfrontConfig,
        shopify: ClientFactory,
        revalidator: Arc<dyn Revalidate>,
    ) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config,
                shopify,
                revalidator,
            }),
        }
    }

    /// Get a reference to the gateway configuration.
    #[must_use]
    pub fn config(&self) -> &ShopfrontConfig {
        &self.inner.config
    }

    /// Get a reference to the Shopify client factory.
    #[must_use]
    pub fn shopify(&self) -> &ClientFactory {
        &self.inner.shopify
    }

    /// Get a reference to the revalidation hook.
    #[must_use]
    pub fn revalidator(&self) -> &dyn Revalidate {
        self.inner.revalidator.as_ref()
    }
}
