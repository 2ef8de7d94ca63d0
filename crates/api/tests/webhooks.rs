//! Router tests for the webhook receiver and health checks.

#![allow(clippy::unwrap_used, clippy::indexing_slicing)]

mod common;

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use secrecy::SecretString;
use serde_json::json;
use shopfront_api::config::ShopfrontConfig;
use shopfront_api::services::webhook::sign;
use shopfront_core::WebhookTopic;

use common::{FakeTransport, RecordingRevalidator, app, app_with, get, send, unconfigured_app};

const SECRET: &str = "Vq7#kP2!xR9$mZ4@tL8&";
const BODY: &str = r#"{"id":632910392,"title":"IPod Nano - 8GB"}"#;

fn signed_app() -> (axum::Router, Arc<RecordingRevalidator>) {
    let revalidator = Arc::new(RecordingRevalidator::default());
    let config = ShopfrontConfig {
        webhook_secret: Some(SecretString::from(SECRET)),
        ..ShopfrontConfig::default()
    };
    let app = app_with(
        FakeTransport::returning(json!({})),
        config,
        revalidator.clone(),
    );
    (app, revalidator)
}

fn webhook(topic: &str, body: &str, signature: Option<&str>) -> Request<Body> {
    let mut builder = Request::post("/webhooks/upstream")
        .header("content-type", "application/json")
        .header("x-shopify-topic", topic)
        .header("x-shopify-shop-domain", "acme.myshopify.com");
    if let Some(signature) = signature {
        builder = builder.header("x-shopify-hmac-sha256", signature);
    }
    builder.body(Body::from(body.to_owned())).unwrap()
}

// =============================================================================
// Webhooks
// =============================================================================

#[tokio::test]
async fn test_signed_webhook_is_processed() {
    let (app, revalidator) = signed_app();
    let signature = sign(SECRET.as_bytes(), BODY.as_bytes());

    let response = send(app, webhook("products/update", BODY, Some(&signature))).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(
        response.body,
        json!({
            "success": true,
            "message": "Webhook processed",
            "topic": "products/update",
            "shop": "acme.myshopify.com"
        })
    );
    assert_eq!(
        revalidator.calls(),
        vec![(WebhookTopic::Product, vec!["/products", "/collections"])]
    );
}

#[tokio::test]
async fn test_wrong_signature_is_unauthorized() {
    let (app, revalidator) = signed_app();
    let signature = sign(b"some-other-secret", BODY.as_bytes());

    let response = send(app, webhook("products/update", BODY, Some(&signature))).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["error"], "Unauthorized");
    assert!(revalidator.calls().is_empty());
}

#[tokio::test]
async fn test_missing_signature_is_unauthorized() {
    let (app, _) = signed_app();

    let response = send(app, webhook("products/update", BODY, None)).await;

    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    assert_eq!(response.body["message"], "Missing webhook signature");
}

#[tokio::test]
async fn test_unsigned_webhook_accepted_without_secret() {
    let revalidator = Arc::new(RecordingRevalidator::default());
    let app = app_with(
        FakeTransport::returning(json!({})),
        ShopfrontConfig::default(),
        revalidator.clone(),
    );

    let response = send(app, webhook("pages/create", BODY, None)).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(
        revalidator.calls(),
        vec![(WebhookTopic::Page, vec!["/pages"])]
    );
}

#[tokio::test]
async fn test_invalid_json_fails_processing() {
    let (app, revalidator) = signed_app();
    let body = "not json";
    let signature = sign(SECRET.as_bytes(), body.as_bytes());

    let response = send(app, webhook("collections/update", body, Some(&signature))).await;

    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response.body["error"], "Webhook processing failed");
    assert!(response.body["message"].is_string());
    assert!(revalidator.calls().is_empty());
}

#[tokio::test]
async fn test_unrelated_topic_revalidates_nothing() {
    let (app, revalidator) = signed_app();
    let signature = sign(SECRET.as_bytes(), BODY.as_bytes());

    let response = send(app, webhook("orders/create", BODY, Some(&signature))).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(revalidator.calls(), vec![(WebhookTopic::Other, Vec::<&str>::new())]);
}

#[tokio::test]
async fn test_webhook_probe() {
    let response = get(unconfigured_app(), "/webhooks/upstream").await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(
        response.body,
        json!({ "message": "Shopify webhook endpoint is active", "status": "ok" })
    );
}

// =============================================================================
// Health
// =============================================================================

#[tokio::test]
async fn test_health_is_ok() {
    let response = get(unconfigured_app(), "/health").await;
    assert_eq!(response.status, StatusCode::OK);
}

#[tokio::test]
async fn test_readiness_without_configuration() {
    let response = get(unconfigured_app(), "/health/ready").await;
    assert_eq!(response.status, StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn test_readiness_with_client() {
    let transport = FakeTransport::returning(json!({}));

    let response = get(app(transport.clone()), "/health/ready").await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(transport.calls(), 0);
}

#[tokio::test]
async fn test_unknown_route_is_json_not_found() {
    let response = get(unconfigured_app(), "/admin").await;

    assert_eq!(response.status, StatusCode::NOT_FOUND);
    assert_eq!(response.body["error"], "Not found");
}
