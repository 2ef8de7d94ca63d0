//! Shopify webhook verification and revalidation.
//!
//! Shopify signs each delivery with an HMAC-SHA256 of the raw request body
//! keyed by the app's webhook secret and sends it base64-encoded in the
//! `X-Shopify-Hmac-Sha256` header.

use async_trait::async_trait;
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use hmac::{Hmac, Mac};
use sha2::Sha256;
use shopfront_core::WebhookTopic;
use thiserror::Error;
use tracing::instrument;

type HmacSha256 = Hmac<Sha256>;

pub const TOPIC_HEADER: &str = "x-shopify-topic";
pub const SHOP_DOMAIN_HEADER: &str = "x-shopify-shop-domain";
pub const HMAC_HEADER: &str = "x-shopify-hmac-sha256";

/// Catalog paths whose cached renderings go stale for each topic.
#[must_use]
pub const fn revalidation_paths(topic: WebhookTopic) -> &'static [&'static str] {
    match topic {
        WebhookTopic::Product => &["/products", "/collections"],
        WebhookTopic::Collection => &["/collections", "/products"],
        WebhookTopic::Page => &["/pages"],
        WebhookTopic::Other => &[],
    }
}

/// Webhook verification errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum WebhookError {
    #[error("Missing webhook signature")]
    MissingSignature,
    #[error("Webhook signature is not valid base64")]
    MalformedSignature,
    #[error("Webhook signature mismatch")]
    SignatureMismatch,
}

/// Verify a base64 HMAC-SHA256 `signature` of `body` under `secret`.
///
/// The comparison is constant-time (`Mac::verify_slice`).
///
/// # Errors
///
/// Returns an error if the signature is absent, undecodable or wrong.
#[instrument(skip_all)]
pub fn verify_signature(
    secret: &[u8],
    body: &[u8],
    signature: Option<&str>,
) -> Result<(), WebhookError> {
    let signature = signature
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or(WebhookError::MissingSignature)?;

    let provided = STANDARD
        .decode(signature)
        .map_err(|_| WebhookError::MalformedSignature)?;

    // HMAC accepts keys of any length
    let Ok(mut mac) = HmacSha256::new_from_slice(secret) else {
        return Err(WebhookError::SignatureMismatch);
    };
    mac.update(body);

    mac.verify_slice(&provided)
        .map_err(|_| WebhookError::SignatureMismatch)
}

/// Compute the base64 signature Shopify would send for `body`.
#[must_use]
pub fn sign(secret: &[u8], body: &[u8]) -> String {
    let Ok(mut mac) = HmacSha256::new_from_slice(secret) else {
        return String::new();
    };
    mac.update(body);
    STANDARD.encode(mac.finalize().into_bytes())
}

/// Receives the paths that a webhook made stale.
#[async_trait]
pub trait Revalidate: Send + Sync {
    /// Mark `paths` stale.
    async fn revalidate(&self, topic: WebhookTopic, paths: &[&'static str]);
}

/// Records revalidations in the log.
///
/// The gateway keeps no cache of its own, so there is nothing to evict.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogRevalidator;

#[async_trait]
impl Revalidate for LogRevalidator {
    async fn revalidate(&self, topic: WebhookTopic, paths: &[&'static str]) {
        if paths.is_empty() {
            tracing::debug!(%topic, "Webhook topic needs no revalidation");
        } else {
            tracing::info!(%topic, ?paths, "Revalidated catalog paths");
        }
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    const SECRET: &[u8] = b"kQ8#vZ2!pL5$wN9@";

    #[test]
    fn test_verify_accepts_own_signature() {
        let body = br#"{"id":1}"#;
        let signature = sign(SECRET, body);
        assert!(verify_signature(SECRET, body, Some(&signature)).is_ok());
    }

    #[test]
    fn test_verify_rejects_tampered_body() {
        let signature = sign(SECRET, br#"{"id":1}"#);
        assert_eq!(
            verify_signature(SECRET, br#"{"id":2}"#, Some(&signature)),
            Err(WebhookError::SignatureMismatch)
        );
    }

    #[test]
    fn test_verify_rejects_missing_signature() {
        assert_eq!(
            verify_signature(SECRET, b"{}", None),
            Err(WebhookError::MissingSignature)
        );
        assert_eq!(
            verify_signature(SECRET, b"{}", Some("  ")),
            Err(WebhookError::MissingSignature)
        );
    }

    #[test]
    fn test_verify_rejects_non_base64() {
        assert_eq!(
            verify_signature(SECRET, b"{}", Some("not base64!")),
            Err(WebhookError::MalformedSignature)
        );
    }

    #[test]
    fn test_known_signature() {
        // echo -n 'hello' | openssl dgst -sha256 -hmac 'key' -binary | base64
        assert_eq!(
            sign(b"key", b"hello"),
            "kwezuRXvtRcf8U2MtV+8x5jGwO8UVtZt7RpqpyOli3s="
        );
    }

    #[rstest]
    #[case("products/update", &["/products", "/collections"])]
    #[case("collections/delete", &["/collections", "/products"])]
    #[case("pages/create", &["/pages"])]
    #[case("orders/create", &[])]
    fn test_revalidation_paths(#[case] topic: &str, #[case] expected: &[&str]) {
        assert_eq!(revalidation_paths(WebhookTopic::classify(topic)), expected);
    }
}
