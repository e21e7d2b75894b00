//! `newsletter` procedures.
//!
//! Delivery is handled elsewhere; this only records subscribers.

use axum::{Json, extract::State};
use tracing::instrument;

use super::SuccessResponse;
use super::extract::ApiJson;
use crate::db::RepositoryError;
use crate::error::{ApiError, Result};
use crate::models::SubscribeInput;
use crate::state::AppState;

/// `newsletter.subscribe`
///
/// The address is trimmed and lowercased before the uniqueness check, so
/// `Fan@Example.com` and `fan@example.com` are the same subscriber.
#[instrument(skip_all)]
pub async fn subscribe(
    State(state): State<AppState>,
    ApiJson(input): ApiJson<SubscribeInput>,
) -> Result<Json<SuccessResponse>> {
    let (email, name) = input.validate()?;

    state
        .store()
        .subscribe_newsletter(&email, name.as_deref())
        .await
        .map_err(|e| match e {
            RepositoryError::Conflict(_) => ApiError::Conflict("Email already subscribed".to_owned()),
            other => ApiError::internal("Failed to subscribe to newsletter", other),
        })?;

    tracing::info!(email_domain = %email.domain(), "Newsletter subscription created");
    Ok(Json(SuccessResponse::OK))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use axum::http::StatusCode;
    use serde_json::json;

    use crate::db::MemoryStore;
    use crate::routes::test_support::{app, post_json};

    #[tokio::test]
    async fn test_duplicate_is_conflict() {
        let store = Arc::new(MemoryStore::new());
        let app = app(store.clone());

        let (status, body) = post_json(
            &app,
            "/api/newsletter.subscribe",
            &json!({ "email": "fan@example.com", "name": "Fan" }),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "success": true }));

        let (status, body) = post_json(
            &app,
            "/api/newsletter.subscribe",
            &json!({ "email": " FAN@example.com " }),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(body["error"]["message"], "Email already subscribed");
        assert_eq!(store.subscribers().await.len(), 1);
    }

    #[tokio::test]
    async fn test_malformed_body_is_bad_request() {
        let app = app(Arc::new(MemoryStore::new()));
        let (status, body) =
            post_json(&app, "/api/newsletter.subscribe", &json!({ "name": "Fan" }), None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "BAD_REQUEST");
    }

    #[tokio::test]
    async fn test_long_name_is_accepted() {
        let store = Arc::new(MemoryStore::new());
        let app = app(store.clone());
        let name = "n".repeat(300);

        let (status, _) = post_json(
            &app,
            "/api/newsletter.subscribe",
            &json!({ "email": "fan@example.com", "name": name }),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(store.subscribers().await[0].name.as_deref(), Some(name.as_str()));
    }
}
