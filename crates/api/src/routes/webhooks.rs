//! Shopify webhook receiver.

use axum::{
    Json,
    body::Bytes,
    extract::State,
    http::HeaderMap,
};
use secrecy::ExposeSecret;
use serde::Serialize;
use shopfront_core::WebhookTopic;
use tracing::instrument;

use crate::error::{AppError, Result, add_breadcrumb};
use crate::services::webhook::{
    HMAC_HEADER, SHOP_DOMAIN_HEADER, TOPIC_HEADER, revalidation_paths, verify_signature,
};
use crate::state::AppState;

/// Acknowledgement returned for a processed webhook.
#[derive(Debug, Serialize)]
pub struct WebhookAck {
    pub success: bool,
    pub message: &'static str,
    pub topic: String,
    pub shop: String,
}

/// Answer to `GET`, which Shopify sometimes uses to probe the endpoint.
#[derive(Debug, Serialize)]
pub struct WebhookStatus {
    pub message: &'static str,
    pub status: &'static str,
}

/// `POST /webhooks/upstream`
///
/// Verifies the signature when a webhook secret is configured, requires a
/// JSON body, then hands the topic's stale paths to the revalidator.
#[instrument(skip_all, fields(topic, shop))]
pub async fn receive(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<WebhookAck>> {
    let topic = header(&headers, TOPIC_HEADER);
    let shop = header(&headers, SHOP_DOMAIN_HEADER);
    let span = tracing::Span::current();
    span.record("topic", topic.as_str());
    span.record("shop", shop.as_str());

    tracing::info!("Webhook received");
    add_breadcrumb("webhook", "Webhook received", Some(&[("topic", topic.as_str())]));

    if let Some(secret) = state.config().webhook_secret.as_ref() {
        let signature = headers.get(HMAC_HEADER).and_then(|v| v.to_str().ok());
        verify_signature(secret.expose_secret().as_bytes(), &body, signature)?;
    } else {
        tracing::debug!("Webhook signature verification disabled");
    }

    serde_json::from_slice::<serde_json::Value>(&body)
        .map_err(|e| AppError::WebhookProcessing(e.to_string()))?;

    let kind = WebhookTopic::classify(&topic);
    state
        .revalidator()
        .revalidate(kind, revalidation_paths(kind))
        .await;

    Ok(Json(WebhookAck {
        success: true,
        message: "Webhook processed",
        topic,
        shop,
    }))
}

/// `GET /webhooks/upstream`
pub async fn status() -> Json<WebhookStatus> {
    Json(WebhookStatus {
        message: "Shopify webhook endpoint is active",
        status: "ok",
    })
}

/// A header as a string, empty when absent or not UTF-8.
fn header(headers: &HeaderMap, name: &str) -> String {
    headers
        .get(name)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string()
}
