//! Shopify Storefront API access.
//!
//! # Architecture
//!
//! - [`ClientFactory`] builds a [`StorefrontClient`] from configuration on
//!   first use and shares it across requests
//! - The query catalog uses `graphql_client`'s `GraphQLQuery` trait with
//!   hand-written query documents; requests go out over `reqwest`
//! - Responses are normalized to one envelope before decoding, whether the
//!   upstream answered `{ "data": { .. } }` or the bare `{ .. }`
//! - No caching: every call is one upstream round-trip
//!
//! # Example
//!
//! ```rust,ignore
//! use shopfront_api::shopify::ClientFactory;
//! use shopfront_core::PageSize;
//!
//! let factory = ClientFactory::from_env();
//! let client = factory.client().await?;
//! let products = client.get_products(PageSize::saturating(12)).await?;
//! ```

mod factory;
pub mod storefront;

pub use factory::ClientFactory;
pub use storefront::{GraphQLTransport, HttpTransport, StorefrontClient};

use thiserror::Error;

use crate::config::ConfigError;

/// Upstream messages that mean the access token lacks a scope.
const PERMISSION_DENIED_MARKERS: &[&str] = &["Access denied", "unauthenticated_read_content"];

/// Errors that can occur when interacting with Shopify APIs.
#[derive(Debug, Error)]
pub enum ShopifyError {
    /// Store domain or access token is not configured.
    #[error("Shopify client not configured: {0}")]
    NotConfigured(#[from] ConfigError),

    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Shopify answered with a non-success status.
    #[error("HTTP {status}: {body}")]
    Status {
        /// Response status code.
        status: u16,
        /// Leading part of the response body.
        body: String,
    },

    /// GraphQL query returned errors.
    #[error("GraphQL errors: {}", format_graphql_errors(.0))]
    GraphQL(Vec<GraphQLError>),

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// The response carried neither the requested field nor a `data` wrapper.
    #[error("Response has no `{0}` field")]
    MissingResource(String),

    /// Rate limited by Shopify.
    #[error("Rate limited, retry after {0} seconds")]
    RateLimited(u64),
}

impl ShopifyError {
    /// Whether this is the known, expected denial of a scope the storefront
    /// token was never granted (e.g. `unauthenticated_read_content` for pages).
    #[must_use]
    pub fn is_permission_denied(&self) -> bool {
        match self {
            Self::GraphQL(errors) => errors.iter().any(|e| {
                e.code.as_deref() == Some("ACCESS_DENIED")
                    || PERMISSION_DENIED_MARKERS
                        .iter()
                        .any(|marker| e.message.contains(marker))
            }),
            Self::Status { body, .. } => PERMISSION_DENIED_MARKERS
                .iter()
                .any(|marker| body.contains(marker)),
            _ => false,
        }
    }

    /// Whether the failure is missing configuration rather than an upstream
    /// condition.
    #[must_use]
    pub const fn is_configuration(&self) -> bool {
        matches!(self, Self::NotConfigured(_))
    }

    /// A message safe to show to API callers.
    ///
    /// Transport internals stay in the logs; configuration names and GraphQL
    /// messages (which come from Shopify itself) are passed through.
    #[must_use]
    pub fn public_message(&self) -> String {
        match self {
            Self::NotConfigured(err) => err.to_string(),
            Self::Http(err) if err.is_timeout() => "Upstream request timed out".to_string(),
            Self::Http(_) => "Upstream request failed".to_string(),
            Self::Status { status, .. } => format!("Upstream returned HTTP {status}"),
            Self::GraphQL(errors) => format_graphql_errors(errors),
            Self::Parse(_) | Self::MissingResource(_) => {
                "Upstream returned an unexpected response".to_string()
            }
            Self::RateLimited(secs) => format!("Upstream rate limited, retry after {secs} seconds"),
        }
    }
}

/// A GraphQL error returned by the Shopify API.
#[derive(Debug, Clone)]
pub struct GraphQLError {
    /// Error message.
    pub message: String,
    /// `extensions.code`, when Shopify provides one (e.g. `ACCESS_DENIED`).
    pub code: Option<String>,
    /// Source locations in the query.
    pub locations: Vec<GraphQLErrorLocation>,
    /// Path to the error in the response.
    pub path: Vec<serde_json::Value>,
}

impl GraphQLError {
    /// An error with only a message.
    #[must_use]
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            code: None,
            locations: vec![],
            path: vec![],
        }
    }
}

impl From<graphql_client::Error> for GraphQLError {
    fn from(e: graphql_client::Error) -> Self {
        Self {
            message: e.message,
            code: e
                .extensions
                .as_ref()
                .and_then(|ext| ext.get("code"))
                .and_then(serde_json::Value::as_str)
                .map(str::to_string),
            locations: e.locations.map_or_else(Vec::new, |locs| {
                locs.into_iter()
                    .map(|l| GraphQLErrorLocation {
                        line: i64::from(l.line),
                        column: i64::from(l.column),
                    })
                    .collect()
            }),
            path: e.path.map_or_else(Vec::new, |p| {
                p.into_iter()
                    .map(|fragment| match fragment {
                        graphql_client::PathFragment::Key(s) => serde_json::Value::String(s),
                        graphql_client::PathFragment::Index(i) => {
                            serde_json::Value::Number(i.into())
                        }
                    })
                    .collect()
            }),
        }
    }
}

/// Location in a GraphQL query where an error occurred.
#[derive(Debug, Clone)]
pub struct GraphQLErrorLocation {
    /// Line number (1-indexed).
    pub line: i64,
    /// Column number (1-indexed).
    pub column: i64,
}

fn format_graphql_errors(errors: &[GraphQLError]) -> String {
    if errors.is_empty() {
        return "(no error details provided)".to_string();
    }

    errors
        .iter()
        .enumerate()
        .map(|(i, e)| {
            let mut parts = Vec::new();

            if !e.message.is_empty() {
                parts.push(e.message.clone());
            }

            if !e.path.is_empty() {
                let path_str = e
                    .path
                    .iter()
                    .map(|p| match p {
                        serde_json::Value::String(s) => s.clone(),
                        other => other.to_string(),
                    })
                    .collect::<Vec<_>>()
                    .join(".");
                parts.push(format!("path: {path_str}"));
            }

            if let Some(loc) = e.locations.first() {
                parts.push(format!("at line {}:{}", loc.line, loc.column));
            }

            if parts.is_empty() {
                format!("[error {}]: (no details)", i + 1)
            } else {
                parts.join(" ")
            }
        })
        .collect::<Vec<_>>()
        .join("; ")
}

/// Mask the store part of a Shopify domain for logging.
///
/// `acme-outfitters.myshopify.com` becomes `acm***.myshopify.com`.
#[must_use]
pub fn mask_store_domain(domain: &str) -> String {
    let (store, rest) = domain.split_once('.').unwrap_or((domain, ""));
    let visible: String = store.chars().take(3).collect();
    if rest.is_empty() {
        format!("{visible}***")
    } else {
        format!("{visible}***.{rest}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_graphql_error_formatting() {
        let errors = vec![
            GraphQLError::message("Field not found"),
            GraphQLError::message("Invalid ID"),
        ];
        let err = ShopifyError::GraphQL(errors);
        assert_eq!(err.to_string(), "GraphQL errors: Field not found; Invalid ID");
    }

    #[test]
    fn test_graphql_error_empty_messages() {
        let errors = vec![GraphQLError {
            message: String::new(),
            code: None,
            locations: vec![GraphQLErrorLocation { line: 5, column: 10 }],
            path: vec![
                serde_json::Value::String("products".to_string()),
                serde_json::Value::Number(0.into()),
            ],
        }];
        let err = ShopifyError::GraphQL(errors);
        assert_eq!(
            err.to_string(),
            "GraphQL errors: path: products.0 at line 5:10"
        );
    }

    #[test]
    fn test_graphql_error_no_details() {
        let err = ShopifyError::GraphQL(vec![GraphQLError::message("")]);
        assert_eq!(err.to_string(), "GraphQL errors: [error 1]: (no details)");
    }

    #[test]
    fn test_graphql_error_empty_vec() {
        let err = ShopifyError::GraphQL(vec![]);
        assert_eq!(err.to_string(), "GraphQL errors: (no error details provided)");
    }

    #[test]
    fn test_graphql_error_from_client_error() {
        let raw: graphql_client::Error = serde_json::from_value(serde_json::json!({
            "message": "Access denied for pages field.",
            "locations": [{ "line": 2, "column": 3 }],
            "path": ["pages"],
            "extensions": { "code": "ACCESS_DENIED" }
        }))
        .unwrap();
        let err = GraphQLError::from(raw);
        assert_eq!(err.code.as_deref(), Some("ACCESS_DENIED"));
        assert_eq!(err.locations.len(), 1);
        assert_eq!(err.path, vec![serde_json::Value::String("pages".into())]);
    }

    #[test]
    fn test_permission_denied_by_message() {
        let err = ShopifyError::GraphQL(vec![GraphQLError::message(
            "Access denied for pages field. Required access: `unauthenticated_read_content` access scope.",
        )]);
        assert!(err.is_permission_denied());
    }

    #[test]
    fn test_permission_denied_by_code() {
        let mut error = GraphQLError::message("Forbidden");
        error.code = Some("ACCESS_DENIED".to_string());
        assert!(ShopifyError::GraphQL(vec![error]).is_permission_denied());
    }

    #[test]
    fn test_generic_failures_are_not_permission_denied() {
        assert!(
            !ShopifyError::GraphQL(vec![GraphQLError::message("Throttled")]).is_permission_denied()
        );
        assert!(
            !ShopifyError::Status {
                status: 502,
                body: "Bad gateway".to_string()
            }
            .is_permission_denied()
        );
        assert!(!ShopifyError::NotConfigured(ConfigError::Missing(vec![])).is_permission_denied());
    }

    #[test]
    fn test_forbidden_status_needs_scope_marker() {
        let locked = ShopifyError::Status {
            status: 403,
            body: "Storefront is password protected".to_string(),
        };
        assert!(!locked.is_permission_denied());

        let scope = ShopifyError::Status {
            status: 403,
            body: r#"{"errors":"Access denied for pages field"}"#.to_string(),
        };
        assert!(scope.is_permission_denied());
    }

    #[test]
    fn test_public_message_hides_transport_detail() {
        let err = ShopifyError::Status {
            status: 500,
            body: "stack trace with internals".to_string(),
        };
        assert_eq!(err.public_message(), "Upstream returned HTTP 500");
    }

    #[test]
    fn test_public_message_names_missing_config() {
        let err = ShopifyError::from(ConfigError::Missing(vec![
            "SHOPIFY_STORE_DOMAIN".to_string(),
        ]));
        assert!(err.is_configuration());
        assert_eq!(
            err.public_message(),
            "Missing environment variables: SHOPIFY_STORE_DOMAIN"
        );
    }

    #[test]
    fn test_rate_limited_error() {
        let err = ShopifyError::RateLimited(60);
        assert_eq!(err.to_string(), "Rate limited, retry after 60 seconds");
    }

    #[test]
    fn test_mask_store_domain() {
        assert_eq!(
            mask_store_domain("acme-outfitters.myshopify.com"),
            "acm***.myshopify.com"
        );
        assert_eq!(mask_store_domain("ab"), "ab***");
    }
}
