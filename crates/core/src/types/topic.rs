//! Webhook topic classification.

use serde::{Deserialize, Serialize};

/// The catalog area a Shopify webhook topic refers to.
///
/// Shopify topics look like `products/update` or `collections/delete`.
/// Classification is by substring, checked in the order product, collection,
/// page, so `product_listings/add` counts as a product change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WebhookTopic {
    /// Product created, updated or deleted.
    Product,
    /// Collection created, updated or deleted.
    Collection,
    /// Online store page created, updated or deleted.
    Page,
    /// Any topic the gateway does not act on.
    Other,
}

impl WebhookTopic {
    /// Classify a raw `X-Shopify-Topic` header value.
    #[must_use]
    pub fn classify(topic: &str) -> Self {
        let topic = topic.to_ascii_lowercase();
        if topic.contains("product") {
            Self::Product
        } else if topic.contains("collection") {
            Self::Collection
        } else if topic.contains("page") {
            Self::Page
        } else {
            Self::Other
        }
    }
}

impl std::fmt::Display for WebhookTopic {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Product => write!(f, "product"),
            Self::Collection => write!(f, "collection"),
            Self::Page => write!(f, "page"),
            Self::Other => write!(f, "other"),
        }
    }
}

impl From<&str> for WebhookTopic {
    fn from(topic: &str) -> Self {
        Self::classify(topic)
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("products/create", WebhookTopic::Product)]
    #[case("products/update", WebhookTopic::Product)]
    #[case("product_listings/add", WebhookTopic::Product)]
    #[case("collections/delete", WebhookTopic::Collection)]
    #[case("PAGES/UPDATE", WebhookTopic::Page)]
    #[case("orders/create", WebhookTopic::Other)]
    #[case("", WebhookTopic::Other)]
    fn test_classify(#[case] raw: &str, #[case] expected: WebhookTopic) {
        assert_eq!(WebhookTopic::classify(raw), expected);
    }

    #[test]
    fn test_display() {
        assert_eq!(WebhookTopic::Collection.to_string(), "collection");
    }
}
