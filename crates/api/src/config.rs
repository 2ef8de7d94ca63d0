//! Gateway configuration loaded from environment variables.
//!
//! Server settings are read once at startup. Shopify credentials are read
//! lazily through a [`ConfigSource`] the first time a catalog endpoint needs
//! a client, so a missing credential degrades catalog responses instead of
//! stopping the process.
//!
//! # Environment Variables
//!
//! ## Shopify (read on first use)
//! - `SHOPIFY_STORE_DOMAIN` - Shopify store domain (e.g., your-store.myshopify.com)
//! - `SHOPIFY_STOREFRONT_ACCESS_TOKEN` - Storefront API public access token
//! - `SHOPIFY_API_VERSION` - API version (default: 2024-01)
//!
//! ## Optional
//! - `SHOPFRONT_HOST` - Bind address (default: 127.0.0.1)
//! - `SHOPFRONT_PORT` - Listen port (default: 3000)
//! - `SHOPIFY_WEBHOOK_SECRET` - Shared secret used to verify webhook signatures
//! - `LOG_FORMAT` - `json` for JSON log lines (default: human readable)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name
//! - `SENTRY_SAMPLE_RATE` - Error event sample rate (default: 1.0)
//! - `SENTRY_TRACES_SAMPLE_RATE` - Performance trace sample rate (default: 0.0)

use std::collections::HashMap;
use std::net::{IpAddr, SocketAddr};

use secrecy::SecretString;
use thiserror::Error;

pub const STORE_DOMAIN_VAR: &str = "SHOPIFY_STORE_DOMAIN";
pub const ACCESS_TOKEN_VAR: &str = "SHOPIFY_STOREFRONT_ACCESS_TOKEN";
pub const API_VERSION_VAR: &str = "SHOPIFY_API_VERSION";
pub const WEBHOOK_SECRET_VAR: &str = "SHOPIFY_WEBHOOK_SECRET";

const DEFAULT_API_VERSION: &str = "2024-01";
const MIN_ENTROPY_BITS_PER_CHAR: f64 = 3.0;

/// Blocklist of common placeholder patterns (case-insensitive)
const PLACEHOLDER_PATTERNS: &[&str] = &[
    "your-",
    "changeme",
    "replace",
    "placeholder",
    "example",
    "password",
    "xxx",
    "todo",
    "fixme",
    "insert",
    "enter-",
    "put-your",
    "add-your",
];

/// Configuration errors that can occur during loading.
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    #[error("Missing environment variables: {}", .0.join(", "))]
    Missing(Vec<String>),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Insecure secret in {0}: {1}")]
    InsecureSecret(String, String),
}

// =============================================================================
// Config sources
// =============================================================================

/// Where configuration values are looked up.
///
/// Blank values count as absent.
pub trait ConfigSource: Send + Sync {
    /// Look up a single key.
    fn get(&self, key: &str) -> Option<String>;
}

/// The process environment.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessEnv;

impl ConfigSource for ProcessEnv {
    fn get(&self, key: &str) -> Option<String> {
        std::env::var(key).ok().filter(|v| !v.trim().is_empty())
    }
}

impl ConfigSource for HashMap<String, String> {
    fn get(&self, key: &str) -> Option<String> {
        HashMap::get(self, key)
            .filter(|v| !v.trim().is_empty())
            .cloned()
    }
}

// =============================================================================
// Server configuration
// =============================================================================

/// Log line format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human readable lines.
    #[default]
    Pretty,
    /// One JSON object per line.
    Json,
}

/// Gateway server configuration.
#[derive(Debug, Clone)]
pub struct ShopfrontConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Shared secret for webhook signature verification
    pub webhook_secret: Option<SecretString>,
    /// Log line format
    pub log_format: LogFormat,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment name
    pub sentry_environment: Option<String>,
    /// Sentry error event sample rate
    pub sentry_sample_rate: f32,
    /// Sentry performance trace sample rate
    pub sentry_traces_sample_rate: f32,
}

impl Default for ShopfrontConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::from([127, 0, 0, 1]),
            port: 3000,
            webhook_secret: None,
            log_format: LogFormat::Pretty,
            sentry_dsn: None,
            sentry_environment: None,
            sentry_sample_rate: 1.0,
            sentry_traces_sample_rate: 0.0,
        }
    }
}

impl ShopfrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is present but invalid, or if the
    /// webhook secret fails validation (placeholder detection, entropy check).
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_source(&ProcessEnv)
    }

    /// Load configuration from an arbitrary source.
    ///
    /// # Errors
    ///
    /// See [`ShopfrontConfig::from_env`].
    pub fn from_source(source: &dyn ConfigSource) -> Result<Self, ConfigError> {
        let host = parse_or_default(source, "SHOPFRONT_HOST", IpAddr::from([127, 0, 0, 1]))?;
        let port = parse_or_default(source, "SHOPFRONT_PORT", 3000_u16)?;

        let webhook_secret = source
            .get(WEBHOOK_SECRET_VAR)
            .map(|value| {
                validate_secret_strength(&value, WEBHOOK_SECRET_VAR)?;
                Ok::<_, ConfigError>(SecretString::from(value))
            })
            .transpose()?;

        let log_format = match source.get("LOG_FORMAT").as_deref() {
            Some(v) if v.eq_ignore_ascii_case("json") => LogFormat::Json,
            _ => LogFormat::Pretty,
        };

        Ok(Self {
            host,
            port,
            webhook_secret,
            log_format,
            sentry_dsn: source.get("SENTRY_DSN"),
            sentry_environment: source.get("SENTRY_ENVIRONMENT"),
            sentry_sample_rate: parse_or_default(source, "SENTRY_SAMPLE_RATE", 1.0_f32)?,
            sentry_traces_sample_rate: parse_or_default(
                source,
                "SENTRY_TRACES_SAMPLE_RATE",
                0.0_f32,
            )?,
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

// =============================================================================
// Shopify configuration
// =============================================================================

/// Shopify Storefront API configuration.
///
/// Implements `Debug` manually to redact the access token.
#[derive(Clone)]
pub struct ShopifyStorefrontConfig {
    /// Shopify store domain (e.g., your-store.myshopify.com)
    pub store_domain: String,
    /// Shopify API version (e.g., 2024-01)
    pub api_version: String,
    /// Storefront API access token
    pub access_token: SecretString,
}

impl std::fmt::Debug for ShopifyStorefrontConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ShopifyStorefrontConfig")
            .field("store_domain", &self.store_domain)
            .field("api_version", &self.api_version)
            .field("access_token", &"[REDACTED]")
            .finish()
    }
}

impl ShopifyStorefrontConfig {
    /// Read the Shopify settings from `source`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Missing`] naming every required variable that
    /// is absent.
    pub fn from_source(source: &dyn ConfigSource) -> Result<Self, ConfigError> {
        match (source.get(STORE_DOMAIN_VAR), source.get(ACCESS_TOKEN_VAR)) {
            (Some(store_domain), Some(access_token)) => Ok(Self {
                store_domain: normalize_store_domain(&store_domain),
                api_version: source
                    .get(API_VERSION_VAR)
                    .unwrap_or_else(|| DEFAULT_API_VERSION.to_string()),
                access_token: SecretString::from(access_token),
            }),
            (store_domain, access_token) => {
                let mut missing = Vec::new();
                if store_domain.is_none() {
                    missing.push(STORE_DOMAIN_VAR.to_string());
                }
                if access_token.is_none() {
                    missing.push(ACCESS_TOKEN_VAR.to_string());
                }
                Err(ConfigError::Missing(missing))
            }
        }
    }

    /// The Storefront GraphQL endpoint for this store.
    #[must_use]
    pub fn endpoint(&self) -> String {
        format!(
            "https://{}/api/{}/graphql.json",
            self.store_domain, self.api_version
        )
    }
}

/// Strip a scheme and trailing slashes so both `my-store.myshopify.com` and
/// `https://my-store.myshopify.com/` produce the same endpoint.
fn normalize_store_domain(raw: &str) -> String {
    let trimmed = raw.trim();
    let without_scheme = trimmed
        .strip_prefix("https://")
        .or_else(|| trimmed.strip_prefix("http://"))
        .unwrap_or(trimmed);
    without_scheme.trim_end_matches('/').to_string()
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Parse an optional variable, falling back to `default` when absent.
fn parse_or_default<T>(source: &dyn ConfigSource, key: &str, default: T) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    source.get(key).map_or(Ok(default), |value| {
        value
            .trim()
            .parse::<T>()
            .map_err(|e| ConfigError::InvalidEnvVar(key.to_string(), e.to_string()))
    })
}

/// Calculate Shannon entropy in bits per character.
fn shannon_entropy(s: &str) -> f64 {
    if s.is_empty() {
        return 0.0;
    }

    let mut freq: HashMap<char, usize> = HashMap::new();
    for c in s.chars() {
        *freq.entry(c).or_insert(0) += 1;
    }

    #[allow(clippy::cast_precision_loss)] // String length will never exceed f64 precision
    let len = s.chars().count() as f64;
    freq.values()
        .map(|&count| {
            #[allow(clippy::cast_precision_loss)] // Character count will never exceed f64 precision
            let p = count as f64 / len;
            -p * p.log2()
        })
        .sum()
}

/// Validate that a secret is not a placeholder and has sufficient entropy.
fn validate_secret_strength(secret: &str, var_name: &str) -> Result<(), ConfigError> {
    let lower = secret.to_lowercase();

    for pattern in PLACEHOLDER_PATTERNS {
        if lower.contains(pattern) {
            return Err(ConfigError::InsecureSecret(
                var_name.to_string(),
                format!("appears to be a placeholder (contains '{pattern}')"),
            ));
        }
    }

    let entropy = shannon_entropy(secret);
    if entropy < MIN_ENTROPY_BITS_PER_CHAR {
        return Err(ConfigError::InsecureSecret(
            var_name.to_string(),
            format!(
                "entropy too low ({entropy:.2} bits/char, need >= {MIN_ENTROPY_BITS_PER_CHAR:.1}). Use a randomly generated secret."
            ),
        ));
    }

    Ok(())
}
