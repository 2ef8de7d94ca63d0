//! Unified error handling with Sentry integration.
//!
//! `AppError` covers the routes that are allowed to fail with a non-2xx
//! status (webhooks, unknown paths). Catalog routes degrade instead; see
//! [`crate::catalog`]. Server errors are captured to Sentry before
//! responding.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::services::webhook::WebhookError;

/// Application-level error type for the gateway.
#[derive(Debug, Error)]
pub enum AppError {
    /// Webhook signature missing or wrong.
    #[error("Unauthorized: {0}")]
    Unauthorized(#[from] WebhookError),

    /// No route matches.
    #[error("Not found: {0}")]
    NotFound(String),

    /// A verified webhook could not be processed.
    #[error("Webhook processing failed: {0}")]
    WebhookProcessing(String),
}

/// JSON error body.
#[derive(Debug, Serialize)]
struct ErrorBody {
    error: &'static str,
    message: String,
}

impl AppError {
    /// HTTP status for this error.
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::WebhookProcessing(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Capture server errors to Sentry
        if self.status().is_server_error() {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        } else {
            tracing::warn!(error = %self, "Request rejected");
        }

        let status = self.status();
        let body = match self {
            Self::Unauthorized(err) => ErrorBody {
                error: "Unauthorized",
                message: err.to_string(),
            },
            Self::NotFound(path) => ErrorBody {
                error: "Not found",
                message: format!("No route for {path}"),
            },
            Self::WebhookProcessing(message) => ErrorBody {
                error: "Webhook processing failed",
                message,
            },
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

/// Add a breadcrumb for request handling steps.
///
/// Breadcrumbs appear in Sentry error reports to show the trail of actions
/// leading up to an error.
///
/// # Example
///
/// ```rust,ignore
/// add_breadcrumb("webhook", "Webhook received", Some(&[("topic", "products/update")]));
/// ```
pub fn add_breadcrumb(category: &str, message: &str, data: Option<&[(&str, &str)]>) {
    let mut breadcrumb = sentry::Breadcrumb {
        category: Some(category.to_string()),
        message: Some(message.to_string()),
        level: sentry::Level::Info,
        ..Default::default()
    };

    if let Some(pairs) = data {
        for (key, value) in pairs {
            breadcrumb.data.insert(
                (*key).to_string(),
                serde_json::Value::String((*value).to_string()),
            );
        }
    }

    sentry::add_breadcrumb(breadcrumb);
}
