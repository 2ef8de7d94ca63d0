//! GraphQL-over-HTTP transport.

use std::time::Duration;

use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde_json::Value;
use url::Url;

use crate::config::{ConfigError, ShopifyStorefrontConfig};
use crate::shopify::ShopifyError;

/// Header carrying the public Storefront API access token.
pub const ACCESS_TOKEN_HEADER: &str = "X-Shopify-Storefront-Access-Token";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Number of body characters kept in logs and error values.
const BODY_PREVIEW_CHARS: usize = 500;

/// Sends one GraphQL request body and returns the raw JSON response.
///
/// Implementations perform exactly one attempt: no retries, no backoff.
#[async_trait]
pub trait GraphQLTransport: Send + Sync {
    /// POST `body` to the GraphQL endpoint.
    async fn post(&self, body: Value) -> Result<Value, ShopifyError>;
}

/// `reqwest`-backed transport bound to one store's Storefront endpoint.
pub struct HttpTransport {
    client: reqwest::Client,
    endpoint: Url,
    access_token: SecretString,
}

impl HttpTransport {
    /// Build a transport for the configured store.
    ///
    /// # Errors
    ///
    /// Returns an error if the endpoint is not a valid URL or the HTTP client
    /// cannot be constructed.
    pub fn new(config: &ShopifyStorefrontConfig) -> Result<Self, ShopifyError> {
        let endpoint = Url::parse(&config.endpoint()).map_err(|e| {
            ConfigError::InvalidEnvVar(crate::config::STORE_DOMAIN_VAR.to_string(), e.to_string())
        })?;
        Self::with_endpoint(endpoint, config.access_token.clone())
    }

    /// Build a transport that posts to an explicit GraphQL endpoint.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn with_endpoint(endpoint: Url, access_token: SecretString) -> Result<Self, ShopifyError> {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            client,
            endpoint,
            access_token,
        })
    }
}

#[async_trait]
impl GraphQLTransport for HttpTransport {
    async fn post(&self, body: Value) -> Result<Value, ShopifyError> {
        let response = self
            .client
            .post(self.endpoint.clone())
            .header(ACCESS_TOKEN_HEADER, self.access_token.expose_secret())
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await?;

        let status = response.status();

        // Check for rate limiting
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get("Retry-After")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse::<u64>().ok())
                .unwrap_or(1);
            return Err(ShopifyError::RateLimited(retry_after));
        }

        // Get response body as text first for better error diagnostics
        let response_text = response.text().await?;

        if !status.is_success() {
            let preview = preview(&response_text);
            tracing::warn!(
                status = %status,
                body = %preview,
                "Shopify API returned non-success status"
            );
            return Err(ShopifyError::Status {
                status: status.as_u16(),
                body: preview,
            });
        }

        serde_json::from_str(&response_text).map_err(|e| {
            tracing::warn!(
                error = %e,
                body = %preview(&response_text),
                "Failed to parse Shopify GraphQL response"
            );
            ShopifyError::Parse(e)
        })
    }
}

fn preview(body: &str) -> String {
    body.chars().take(BODY_PREVIEW_CHARS).collect()
}
