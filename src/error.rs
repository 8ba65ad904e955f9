//! Gateway error types with HTTP status code mapping.
//!
//! [`ApiError`] is the central error type for request handling. Each variant
//! maps to an HTTP status code and the `{"error": "<message>"}` envelope.
//! [`StoreError`] and [`NotifyError`] are the failure kinds of the storage
//! and notification collaborators.

use axum::extract::rejection::{JsonRejection, QueryRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::NotificationChannel;

/// JSON error response body.
///
/// ```json
/// { "error": "Seller is not found" }
/// ```
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    /// Human-readable error message.
    pub error: String,
}

/// Request-level error enum with HTTP status code mapping.
///
/// | Kind                      | HTTP Status               |
/// |---------------------------|---------------------------|
/// | Validation / business rule| 400 Bad Request           |
/// | Unroutable version path   | 404 Not Found             |
/// | Unsupported HTTP method   | 405 Method Not Allowed    |
/// | Storage / serialization   | 500 Internal Server Error |
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Missing or malformed request field.
    #[error("{0}")]
    InvalidRequest(String),

    /// Referenced seller does not exist.
    #[error("Seller is not found")]
    SellerNotFound,

    /// Requested product does not exist.
    #[error("Product is not found")]
    ProductNotFound,

    /// The matched route carries no version segment.
    #[error("invalid path requested")]
    RouteNotFound,

    /// The path exists but does not accept the request method.
    #[error("method not allowed")]
    MethodNotAllowed,

    /// Storage gateway failure. Only `context` reaches the client.
    #[error("{context}")]
    Storage {
        /// Client-facing message.
        context: &'static str,
        /// Underlying storage failure (logged, never returned).
        #[source]
        source: StoreError,
    },

    /// The resolved version token has no view.
    #[error("invalid API version")]
    InvalidVersion(String),

    /// Encoding a response payload failed.
    #[error("{context}")]
    Serialization {
        /// Client-facing message.
        context: &'static str,
        /// Underlying encoder failure.
        #[source]
        source: serde_json::Error,
    },
}

impl ApiError {
    /// Returns a mapper wrapping a [`StoreError`] under a generic message.
    pub fn storage(context: &'static str) -> impl FnOnce(StoreError) -> Self {
        move |source| Self::Storage { context, source }
    }

    /// Returns a mapper wrapping an encoder failure under a generic message.
    pub fn serialization(context: &'static str) -> impl FnOnce(serde_json::Error) -> Self {
        move |source| Self::Serialization { context, source }
    }

    /// Returns the HTTP status code for this variant.
    #[must_use]
    pub const fn status_code(&self) -> StatusCode {
        match self {
            Self::InvalidRequest(_) | Self::SellerNotFound | Self::ProductNotFound => {
                StatusCode::BAD_REQUEST
            }
            Self::RouteNotFound => StatusCode::NOT_FOUND,
            Self::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            Self::Storage { .. } | Self::InvalidVersion(_) | Self::Serialization { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::InvalidRequest(rejection.body_text())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self::InvalidRequest(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            Self::Storage { context, source } => {
                tracing::error!(error = %source, "{context}");
            }
            Self::Serialization { context, source } => {
                tracing::error!(error = %source, "{context}");
            }
            Self::InvalidVersion(version) => {
                tracing::error!(%version, "no view for API version");
            }
            _ => {}
        }

        let status = self.status_code();
        let body = ErrorResponse {
            error: self.to_string(),
        };
        let mut response = axum::Json(body).into_response();
        *response.status_mut() = status;
        response
    }
}

/// Storage gateway failure.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Query or connection failure reported by the driver.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Schema migration failure.
    #[error("migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// A stored row violates an entity invariant.
    #[error("corrupt row: {0}")]
    CorruptRow(String),

    /// A row referenced by the statement no longer exists.
    #[error("referenced row missing: {0}")]
    MissingReference(String),
}

/// Notification channel failure. Logged only, never surfaced to clients.
#[derive(Debug, thiserror::Error)]
#[error("{channel} delivery failed: {reason}")]
pub struct NotifyError {
    /// Channel that failed.
    pub channel: NotificationChannel,
    /// Transport-specific reason.
    pub reason: String,
}
