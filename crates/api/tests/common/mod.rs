//! Shared fixtures for router tests.
//!
//! The router runs against a scripted [`GraphQLTransport`], so no test
//! touches the network.

#![allow(dead_code, clippy::unwrap_used)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{HeaderMap, Request, StatusCode};
use serde_json::{Value, json};
use shopfront_api::config::ShopfrontConfig;
use shopfront_api::services::webhook::Revalidate;
use shopfront_api::shopify::{ClientFactory, GraphQLTransport, ShopifyError, StorefrontClient};
use shopfront_api::{AppState, router};
use shopfront_core::WebhookTopic;
use tower::ServiceExt;

type Responder = dyn Fn(&Value) -> Result<Value, ShopifyError> + Send + Sync;

/// Transport that answers from a closure and records each request body.
pub struct FakeTransport {
    respond: Box<Responder>,
    requests: Mutex<Vec<Value>>,
    calls: AtomicUsize,
}

impl FakeTransport {
    pub fn new(
        respond: impl Fn(&Value) -> Result<Value, ShopifyError> + Send + Sync + 'static,
    ) -> Arc<Self> {
        Arc::new(Self {
            respond: Box::new(respond),
            requests: Mutex::new(Vec::new()),
            calls: AtomicUsize::new(0),
        })
    }

    /// Always answer with `response`.
    pub fn returning(response: Value) -> Arc<Self> {
        Self::new(move |_| Ok(response.clone()))
    }

    /// Number of upstream calls made.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Request bodies in call order.
    pub fn requests(&self) -> Vec<Value> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl GraphQLTransport for FakeTransport {
    async fn post(&self, body: Value) -> Result<Value, ShopifyError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let response = (self.respond)(&body);
        self.requests.lock().unwrap().push(body);
        response
    }
}

/// Revalidator that remembers what it was asked to revalidate.
#[derive(Default)]
pub struct RecordingRevalidator {
    calls: Mutex<Vec<(WebhookTopic, Vec<&'static str>)>>,
}

impl RecordingRevalidator {
    pub fn calls(&self) -> Vec<(WebhookTopic, Vec<&'static str>)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Revalidate for RecordingRevalidator {
    async fn revalidate(&self, topic: WebhookTopic, paths: &[&'static str]) {
        self.calls.lock().unwrap().push((topic, paths.to_vec()));
    }
}

// =============================================================================
// Apps
// =============================================================================

/// Router backed by `transport`.
pub fn app(transport: Arc<FakeTransport>) -> Router {
    app_with(transport, ShopfrontConfig::default(), Arc::new(RecordingRevalidator::default()))
}

/// Router backed by `transport` with explicit config and revalidator.
pub fn app_with(
    transport: Arc<FakeTransport>,
    config: ShopfrontConfig,
    revalidator: Arc<RecordingRevalidator>,
) -> Router {
    let client = StorefrontClient::with_transport(transport, "tes***.myshopify.com");
    router(AppState::with_parts(
        config,
        ClientFactory::with_client(client),
        revalidator,
    ))
}

/// Router whose Shopify settings are missing.
pub fn unconfigured_app() -> Router {
    let factory = ClientFactory::new(Arc::new(HashMap::<String, String>::new()));
    router(AppState::with_parts(
        ShopfrontConfig::default(),
        factory,
        Arc::new(RecordingRevalidator::default()),
    ))
}

// =============================================================================
// Requests
// =============================================================================

/// A decoded response.
pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Value,
}

/// Send `request` and decode the body as JSON (`Value::Null` if it isn't).
pub async fn send(app: Router, request: Request<Body>) -> TestResponse {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    TestResponse {
        status,
        headers,
        body,
    }
}

/// `GET uri`.
pub async fn get(app: Router, uri: &str) -> TestResponse {
    send(app, Request::get(uri).body(Body::empty()).unwrap()).await
}

// =============================================================================
// Catalog fixtures
// =============================================================================

pub fn product(n: usize, amount: &str) -> Value {
    json!({
        "id": format!("gid://shopify/Product/{n}"),
        "title": format!("Product {n}"),
        "handle": format!("product-{n}"),
        "description": format!("Description {n}"),
        "priceRange": { "minVariantPrice": { "amount": amount, "currencyCode": "USD" } },
        "images": { "edges": [{ "node": { "url": format!("https://cdn.example.com/{n}.jpg"), "altText": null } }] },
        "variants": { "edges": [{ "node": { "id": format!("gid://shopify/ProductVariant/{n}"), "price": { "amount": amount, "currencyCode": "USD" } } }] }
    })
}

pub fn edges(nodes: impl IntoIterator<Item = Value>) -> Value {
    json!({ "edges": nodes.into_iter().map(|node| json!({ "node": node })).collect::<Vec<_>>() })
}

pub fn products_response(count: usize) -> Value {
    json!({ "data": { "products": edges((0..count).map(|n| product(n, "19.99"))) } })
}
