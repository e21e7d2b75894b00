//! Request extractors that reject with the API error envelope.
//!
//! Axum's own `Json` and `Query` rejections render as plain text. These
//! wrappers turn them into [`ApiError::BadRequest`].

use axum::{
    Json,
    body::Bytes,
    extract::{FromRequest, FromRequestParts, Query, Request},
    http::request::Parts,
};
use serde::de::DeserializeOwned;

use crate::error::ApiError;

/// JSON body extractor for public mutations.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApiJson<T>(pub T);

impl<S, T> FromRequest<S> for ApiJson<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;
        Ok(Self(value))
    }
}

/// Query string extractor for query procedures.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApiQuery<T>(pub T);

impl<S, T> FromRequestParts<S> for ApiQuery<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(value) = Query::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;
        Ok(Self(value))
    }
}

/// Decode a raw JSON body.
///
/// Admin mutations take the body as bytes so the role check runs before decoding.
///
/// # Errors
///
/// Returns `ApiError::BadRequest` if the body is not valid JSON for `T`.
pub fn parse_json<T: DeserializeOwned>(body: &Bytes) -> Result<T, ApiError> {
    serde_json::from_slice(body)
        .map_err(|e| ApiError::BadRequest(format!("Invalid request body: {e}")))
}

/// Parse an entity id. A malformed id cannot name a stored record, so it
/// reads as `NotFound`.
///
/// # Errors
///
/// Returns `ApiError::NotFound` with `not_found` as the message.
pub fn parse_id<T: std::str::FromStr>(raw: &str, not_found: &str) -> Result<T, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::NotFound(not_found.to_owned()))
}

/// `?id=` parameter shared by the `getById` queries.
#[derive(Debug, Clone, serde::Deserialize)]
pub struct IdParams {
    pub id: String,
}

/// Optional `?category=` filter. A blank value means no filter.
#[derive(Debug, Clone, Default, serde::Deserialize)]
pub struct CategoryParams {
    #[serde(default)]
    pub category: Option<String>,
}

impl CategoryParams {
    #[must_use]
    pub fn category(&self) -> Option<&str> {
        self.category
            .as_deref()
            .map(str::trim)
            .filter(|c| !c.is_empty())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_json_rejects_malformed() {
        let err = parse_json::<IdParams>(&Bytes::from_static(b"{not json")).unwrap_err();
        assert!(matches!(err, ApiError::BadRequest(_)));
    }

    #[test]
    fn test_parse_json_requires_fields() {
        let err = parse_json::<IdParams>(&Bytes::from_static(b"{}")).unwrap_err();
        assert!(matches!(err, ApiError::BadRequest(ref m) if m.contains("id")));
    }

    #[test]
    fn test_malformed_id_is_not_found() {
        let err = parse_id::<scalebreakers_core::ProductId>("42", "Product not found").unwrap_err();
        assert!(matches!(err, ApiError::NotFound(ref m) if m == "Product not found"));
    }

    #[test]
    fn test_blank_category_is_no_filter() {
        let params = CategoryParams {
            category: Some("  ".into()),
        };
        assert_eq!(params.category(), None);

        let params = CategoryParams {
            category: Some("diorama".into()),
        };
        assert_eq!(params.category(), Some("diorama"));
    }
}
