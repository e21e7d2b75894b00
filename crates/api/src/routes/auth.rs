//! `auth` procedures.

use axum::Json;
use tower_sessions::Session;
use tracing::instrument;

use super::SuccessResponse;
use crate::error::clear_sentry_user;
use crate::middleware::{Caller, clear_current_user};
use crate::models::CurrentUser;

/// `auth.me`: the caller's identity, or `null` when anonymous.
pub async fn me(Caller(user): Caller) -> Json<Option<CurrentUser>> {
    Json(user)
}

/// `auth.logout`: end the session and expire its cookie.
///
/// Always succeeds. The identity is removed first so a failed flush still
/// leaves the session anonymous; failures are logged.
#[instrument(skip_all)]
pub async fn logout(session: Session) -> Json<SuccessResponse> {
    if let Err(e) = clear_current_user(&session).await {
        tracing::warn!(error = %e, "Failed to clear current user on logout");
    }
    if let Err(e) = session.flush().await {
        tracing::warn!(error = %e, "Failed to flush session on logout");
    }
    clear_sentry_user();
    tracing::info!("User logged out");
    Json(SuccessResponse::OK)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Arc;

    use axum::http::StatusCode;
    use scalebreakers_core::Role;

    use crate::db::MemoryStore;
    use crate::routes::test_support::{app, get, login_as, post_json};

    #[tokio::test]
    async fn test_me_anonymous_is_null() {
        let app = app(Arc::new(MemoryStore::new()));
        let (status, body) = get(&app, "/api/auth.me", None).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.is_null());
    }

    #[tokio::test]
    async fn test_me_then_logout() {
        let app = app(Arc::new(MemoryStore::new()));
        let cookie = login_as(&app, Role::Admin).await;

        let (_, body) = get(&app, "/api/auth.me", Some(&cookie)).await;
        assert_eq!(body["role"], "admin");
        assert_eq!(body["id"], "admin-1");

        let (status, body) =
            post_json(&app, "/api/auth.logout", &serde_json::json!({}), Some(&cookie)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, serde_json::json!({ "success": true }));

        let (_, body) = get(&app, "/api/auth.me", Some(&cookie)).await;
        assert!(body.is_null());
    }

    #[tokio::test]
    async fn test_logout_without_session_succeeds() {
        let app = app(Arc::new(MemoryStore::new()));
        let (status, body) =
            post_json(&app, "/api/auth.logout", &serde_json::json!({}), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["success"], true);
    }
}
