//! Typed RPC routes.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                      - Liveness
//! GET  /health/ready                - Readiness (pings the store)
//!
//! # Queries (input in the query string)
//! GET  /api/auth.me
//! GET  /api/system.health
//! GET  /api/workshops.list
//! GET  /api/workshops.getById?id=
//! GET  /api/products.list[?category=]
//! GET  /api/products.getById?id=
//! GET  /api/portfolio.list[?category=]
//!
//! # Mutations (JSON body)
//! POST /api/auth.logout
//! POST /api/products.create         - admin
//! POST /api/products.update         - admin
//! POST /api/products.delete         - admin
//! POST /api/muralRequests.submit
//! POST /api/newsletter.subscribe
//! ```

pub mod auth;
pub mod extract;
pub mod mural_requests;
pub mod newsletter;
pub mod portfolio;
pub mod products;
pub mod system;
pub mod workshops;

use axum::{
    Router,
    body::Body,
    http::{HeaderValue, Method, Request, header},
    routing::{get, post},
};
use serde::{Deserialize, Serialize};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tower_sessions::{SessionManagerLayer, SessionStore};

use crate::middleware::request_id_middleware;
use crate::state::AppState;

/// `{ "success": true }`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SuccessResponse {
    pub success: bool,
}

impl SuccessResponse {
    pub const OK: Self = Self { success: true };
}

/// `{ "success": true, "id": "<uuid>" }` returned by create-style mutations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedResponse<Id> {
    pub success: bool,
    pub id: Id,
}

impl<Id> CreatedResponse<Id> {
    pub const fn new(id: Id) -> Self {
        Self { success: true, id }
    }
}

/// All API and health routes, without layers or state.
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(system::liveness))
        .route("/health/ready", get(system::readiness))
        .route("/api/system.health", get(system::health))
        .route("/api/auth.me", get(auth::me))
        .route("/api/auth.logout", post(auth::logout))
        .route("/api/workshops.list", get(workshops::list))
        .route("/api/workshops.getById", get(workshops::get_by_id))
        .route("/api/products.list", get(products::list))
        .route("/api/products.getById", get(products::get_by_id))
        .route("/api/products.create", post(products::create))
        .route("/api/products.update", post(products::update))
        .route("/api/products.delete", post(products::delete))
        .route("/api/portfolio.list", get(portfolio::list))
        .route("/api/muralRequests.submit", post(mural_requests::submit))
        .route("/api/newsletter.subscribe", post(newsletter::subscribe))
}

/// Wrap `routes` in the session, request-id and trace layers and attach state.
pub fn with_layers<S>(
    routes: Router<AppState>,
    state: AppState,
    session_layer: SessionManagerLayer<S>,
) -> Router
where
    S: SessionStore + Clone,
{
    routes
        .layer(session_layer)
        .layer(axum::middleware::from_fn(request_id_middleware))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
                tracing::info_span!(
                    "request",
                    method = %request.method(),
                    uri = %request.uri(),
                    request_id = tracing::field::Empty,
                )
            }),
        )
        .with_state(state)
}

/// Build the full API router.
pub fn build_router<S>(state: AppState, session_layer: SessionManagerLayer<S>) -> Router
where
    S: SessionStore + Clone,
{
    with_layers(api_routes(), state, session_layer)
}

/// CORS for the client pages served from another origin.
///
/// # Errors
///
/// Returns an error if `origin` is not a valid header value.
pub fn cors_layer(origin: &str) -> Result<CorsLayer, header::InvalidHeaderValue> {
    let origin = HeaderValue::from_str(origin)?;
    Ok(CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE])
        .allow_credentials(true))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
pub(crate) mod test_support {
    //! In-process router harness for handler tests.

    use std::sync::Arc;

    use axum::{
        Json,
        body::Body,
        http::{Request, StatusCode, header},
        response::IntoResponse,
    };
    use tower::ServiceExt;
    use tower_sessions::Session;

    use super::*;
    use crate::db::MemoryStore;
    use crate::middleware::{create_session_layer, set_current_user};
    use crate::models::CurrentUser;
    use scalebreakers_core::Role;

    async fn login(session: Session, Json(user): Json<CurrentUser>) -> impl IntoResponse {
        set_current_user(&session, &user).await.unwrap();
        StatusCode::NO_CONTENT
    }

    pub(crate) fn app(store: Arc<MemoryStore>) -> Router {
        let routes = api_routes().route("/test/login", post(login));
        let sessions = create_session_layer(tower_sessions::MemoryStore::default(), false);
        with_layers(routes, AppState::new(store), sessions)
    }

    /// Log in with `role` and return the session cookie.
    pub(crate) async fn login_as(app: &Router, role: Role) -> String {
        let user = CurrentUser {
            id: format!("{role}-1"),
            name: Some("Test".into()),
            email: None,
            role,
        };
        let response = app
            .clone()
            .oneshot(
                Request::post("/test/login")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(serde_json::to_vec(&user).unwrap()))
                    .unwrap(),
            )
            .await
            .unwrap();
        let cookie = response.headers().get(header::SET_COOKIE).unwrap();
        cookie
            .to_str()
            .unwrap()
            .split(';')
            .next()
            .unwrap()
            .to_owned()
    }

    pub(crate) async fn get(
        app: &Router,
        uri: &str,
        cookie: Option<&str>,
    ) -> (StatusCode, serde_json::Value) {
        let mut request = Request::get(uri);
        if let Some(cookie) = cookie {
            request = request.header(header::COOKIE, cookie);
        }
        send(app, request.body(Body::empty()).unwrap()).await
    }

    pub(crate) async fn post_json(
        app: &Router,
        uri: &str,
        body: &serde_json::Value,
        cookie: Option<&str>,
    ) -> (StatusCode, serde_json::Value) {
        let mut request =
            Request::post(uri).header(header::CONTENT_TYPE, "application/json");
        if let Some(cookie) = cookie {
            request = request.header(header::COOKIE, cookie);
        }
        send(app, request.body(Body::from(body.to_string())).unwrap()).await
    }

    async fn send(app: &Router, request: Request<Body>) -> (StatusCode, serde_json::Value) {
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let body = if bytes.is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::from_slice(&bytes)
                .unwrap_or_else(|_| serde_json::Value::String(String::from_utf8_lossy(&bytes).into()))
        };
        (status, body)
    }
}
