//! Unified error handling with Sentry integration.
//!
//! Every handler returns `Result<T, ApiError>`. The error renders as
//!
//! ```json
//! { "error": { "code": "NOT_FOUND", "message": "Product not found" } }
//! ```
//!
//! with a status code derived from [`ErrorCode`]. Internal errors are logged
//! and captured to Sentry, and only a generic message reaches the caller.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

/// Stable error codes surfaced to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    BadRequest,
    Forbidden,
    NotFound,
    Conflict,
    InternalServerError,
}

impl ErrorCode {
    /// HTTP status for this code.
    #[must_use]
    pub const fn status(self) -> StatusCode {
        match self {
            Self::BadRequest => StatusCode::BAD_REQUEST,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::Conflict => StatusCode::CONFLICT,
            Self::InternalServerError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Input rejected before reaching the store.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {message}")]
pub struct ValidationError {
    /// Input field the message refers to (camelCase, as sent by the client).
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Application-level error type for the API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// A specific input field failed validation.
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationError),

    /// The request could not be decoded at all (bad JSON, wrong types).
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Caller lacks the required role.
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Uniqueness violation.
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Store or other unclassified failure. `public` goes to the caller,
    /// `detail` only to logs and Sentry.
    #[error("Internal error: {public}: {detail}")]
    Internal { public: String, detail: String },
}

impl ApiError {
    /// Internal error with a caller-safe message and a private cause.
    pub fn internal(public: impl Into<String>, detail: impl std::fmt::Display) -> Self {
        Self::Internal {
            public: public.into(),
            detail: detail.to_string(),
        }
    }

    /// The stable code for this error.
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::Validation(_) | Self::BadRequest(_) => ErrorCode::BadRequest,
            Self::Forbidden(_) => ErrorCode::Forbidden,
            Self::NotFound(_) => ErrorCode::NotFound,
            Self::Conflict(_) => ErrorCode::Conflict,
            Self::Internal { .. } => ErrorCode::InternalServerError,
        }
    }
}

#[derive(Serialize)]
struct ErrorEnvelope<'a> {
    error: ErrorBody<'a>,
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    code: ErrorCode,
    message: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    field: Option<&'static str>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let Self::Internal { public, detail } = &self {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %detail,
                message = %public,
                sentry_event_id = %event_id,
                "Request error"
            );
        }

        let code = self.code();

        // Don't expose internal error details to clients
        let (message, field) = match &self {
            Self::Validation(err) => (err.message.as_str(), Some(err.field)),
            Self::BadRequest(msg)
            | Self::Forbidden(msg)
            | Self::NotFound(msg)
            | Self::Conflict(msg) => (msg.as_str(), None),
            Self::Internal { public, .. } => (public.as_str(), None),
        };

        let body = ErrorEnvelope {
            error: ErrorBody {
                code,
                message,
                field,
            },
        };

        (code.status(), Json(body)).into_response()
    }
}

/// Result type alias for `ApiError`.
pub type Result<T> = std::result::Result<T, ApiError>;

/// Set the Sentry user context from the session identity.
pub fn set_sentry_user(user_id: &str, email: Option<&str>) {
    sentry::configure_scope(|scope| {
        scope.set_user(Some(sentry::User {
            id: Some(user_id.to_owned()),
            email: email.map(String::from),
            ..Default::default()
        }));
    });
}

/// Clear the Sentry user context.
///
/// Call this on logout to stop associating errors with the user.
pub fn clear_sentry_user() {
    sentry::configure_scope(|scope| {
        scope.set_user(None);
    });
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    async fn render(err: ApiError) -> (StatusCode, serde_json::Value) {
        let response = err.into_response();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[test]
    fn test_api_error_display() {
        let err = ApiError::NotFound("Product not found".to_string());
        assert_eq!(err.to_string(), "Not found: Product not found");

        let err = ApiError::from(ValidationError::new("price", "Price must be positive"));
        assert_eq!(err.to_string(), "Validation failed: price: Price must be positive");
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(
            ApiError::BadRequest("x".into()).code().status(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::Forbidden("x".into()).code().status(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            ApiError::NotFound("x".into()).code().status(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::Conflict("x".into()).code().status(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            ApiError::internal("x", "y").code().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[tokio::test]
    async fn test_envelope_shape() {
        let (status, body) = render(ApiError::Conflict("Email already subscribed".into())).await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["error"]["code"], "CONFLICT");
        assert_eq!(body["error"]["message"], "Email already subscribed");
        assert!(body["error"].get("field").is_none());
    }

    #[tokio::test]
    async fn test_validation_includes_field() {
        let (status, body) =
            render(ValidationError::new("stock", "Stock must be non-negative").into()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "BAD_REQUEST");
        assert_eq!(body["error"]["field"], "stock");
    }

    #[tokio::test]
    async fn test_internal_hides_detail() {
        let (status, body) = render(ApiError::internal(
            "Failed to create product",
            "connection refused (os error 111)",
        ))
        .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["error"]["code"], "INTERNAL_SERVER_ERROR");
        assert_eq!(body["error"]["message"], "Failed to create product");
        assert!(!body.to_string().contains("connection refused"));
    }
}
