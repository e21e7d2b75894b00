//! Integration test harness for the Scalebreakers API.
//!
//! Each [`TestApp`] serves the real router on an ephemeral local port, over a
//! fresh [`MemoryStore`] and in-memory sessions. Clients talk to it through
//! `reqwest` with a cookie jar, the way the client pages do.
//!
//! The identity provider is external, so the harness mounts one extra route,
//! `POST /test/login`, that writes a [`CurrentUser`] into the session.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p scalebreakers-integration-tests
//! ```

use std::sync::Arc;

use axum::{Json, http::StatusCode, routing::post};
use reqwest::Client;
use serde_json::Value;
use tower_sessions::Session;

use scalebreakers_api::db::MemoryStore;
use scalebreakers_api::middleware::{create_session_layer, set_current_user};
use scalebreakers_api::models::CurrentUser;
use scalebreakers_api::routes::{api_routes, with_layers};
use scalebreakers_api::state::AppState;
use scalebreakers_core::Role;

/// Path of the test-only login route.
pub const TEST_LOGIN_PATH: &str = "/test/login";

async fn test_login(session: Session, Json(user): Json<CurrentUser>) -> StatusCode {
    match set_current_user(&session, &user).await {
        Ok(()) => StatusCode::NO_CONTENT,
        Err(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

/// A running API server plus direct access to its store.
pub struct TestApp {
    pub base_url: String,
    pub store: Arc<MemoryStore>,
}

impl TestApp {
    /// Start a server on `127.0.0.1:0`.
    ///
    /// # Panics
    ///
    /// Panics if the listener cannot be bound.
    pub async fn spawn() -> Self {
        let store = Arc::new(MemoryStore::new());
        let routes = api_routes().route(TEST_LOGIN_PATH, post(test_login));
        let sessions = create_session_layer(tower_sessions::MemoryStore::default(), false);
        let app = with_layers(routes, AppState::new(store.clone()), sessions);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind test listener");
        let addr = listener.local_addr().expect("Failed to read local address");

        tokio::spawn(async move {
            axum::serve(listener, app)
                .await
                .expect("Test server error");
        });

        Self {
            base_url: format!("http://{addr}"),
            store,
        }
    }

    /// A client with no session.
    ///
    /// # Panics
    ///
    /// Panics if the HTTP client cannot be built.
    #[must_use]
    pub fn anonymous(&self) -> ApiClient {
        ApiClient {
            client: Client::builder()
                .cookie_store(true)
                .build()
                .expect("Failed to create HTTP client"),
            base_url: self.base_url.clone(),
        }
    }

    /// A client whose session carries a user with `role`.
    ///
    /// # Panics
    ///
    /// Panics if the login route does not accept the user.
    pub async fn signed_in(&self, role: Role) -> ApiClient {
        let client = self.anonymous();
        let user = CurrentUser {
            id: format!("{role}-test"),
            name: Some(format!("Test {role}")),
            email: Some(format!("{role}@scalebreakers.test")),
            role,
        };
        let resp = client
            .client
            .post(format!("{}{TEST_LOGIN_PATH}", client.base_url))
            .json(&user)
            .send()
            .await
            .expect("Failed to log in");
        assert_eq!(resp.status(), reqwest::StatusCode::NO_CONTENT);
        client
    }
}

/// HTTP client for `resource.operation` calls.
pub struct ApiClient {
    pub client: Client,
    pub base_url: String,
}

impl ApiClient {
    /// Call a query procedure, e.g. `query("products.list?category=diorama")`.
    ///
    /// # Panics
    ///
    /// Panics if the request cannot be sent.
    pub async fn query(&self, procedure: &str) -> (reqwest::StatusCode, Value) {
        let resp = self
            .client
            .get(format!("{}/api/{procedure}", self.base_url))
            .send()
            .await
            .expect("Failed to send query");
        read(resp).await
    }

    /// Call a mutation procedure with a JSON body.
    ///
    /// # Panics
    ///
    /// Panics if the request cannot be sent.
    pub async fn mutate(&self, procedure: &str, input: &Value) -> (reqwest::StatusCode, Value) {
        let resp = self
            .client
            .post(format!("{}/api/{procedure}", self.base_url))
            .json(input)
            .send()
            .await
            .expect("Failed to send mutation");
        read(resp).await
    }

    /// Send a mutation with a raw body and content type.
    ///
    /// # Panics
    ///
    /// Panics if the request cannot be sent.
    pub async fn mutate_raw(
        &self,
        procedure: &str,
        content_type: &str,
        body: &'static str,
    ) -> (reqwest::StatusCode, Value) {
        let resp = self
            .client
            .post(format!("{}/api/{procedure}", self.base_url))
            .header(reqwest::header::CONTENT_TYPE, content_type)
            .body(body)
            .send()
            .await
            .expect("Failed to send mutation");
        read(resp).await
    }

    /// Plain GET against a non-RPC path such as `/health`.
    ///
    /// # Panics
    ///
    /// Panics if the request cannot be sent.
    pub async fn get(&self, path: &str) -> reqwest::Response {
        self.client
            .get(format!("{}{path}", self.base_url))
            .send()
            .await
            .expect("Failed to send request")
    }
}

async fn read(resp: reqwest::Response) -> (reqwest::StatusCode, Value) {
    let status = resp.status();
    let body = resp.json().await.unwrap_or(Value::Null);
    (status, body)
}
