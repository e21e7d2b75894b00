//! Scalebreakers API server.
//!
//! Serves the typed RPC API for the studio website on port 3000.
//!
//! # Store backends
//!
//! - `postgres` (default): `PgStore` plus `PostgreSQL`-backed sessions
//! - `memory`: process-local store and sessions, for demos
//!
//! Migrations are NOT run on startup. Run them explicitly:
//! `cargo run -p scalebreakers-cli -- migrate`

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::sync::Arc;

use axum::Router;
use tower_sessions_sqlx_store::PostgresStore;

use scalebreakers_api::config::{ApiConfig, StoreBackend};
use scalebreakers_api::db::{self, MemoryStore, PgStore};
use scalebreakers_api::middleware::create_session_layer;
use scalebreakers_api::state::AppState;
use scalebreakers_api::{build_router, routes, telemetry};

#[tokio::main]
async fn main() {
    // Load configuration from environment (needed for Sentry init)
    let config = ApiConfig::from_env().expect("Failed to load configuration");

    // Sentry must be initialized before the tracing subscriber
    let _sentry_guard = telemetry::init_sentry(config.sentry.as_ref());
    telemetry::init_tracing(config.log_format);

    if config.sentry.is_some() {
        tracing::info!("Sentry initialized");
    }

    let app = match config.store {
        StoreBackend::Postgres => {
            let database_url = config
                .database_url
                .as_ref()
                .expect("Database URL is required for the postgres store");
            let pool = db::create_pool(database_url)
                .await
                .expect("Failed to create database pool");
            tracing::info!("Database pool created");

            let state = AppState::new(Arc::new(PgStore::new(pool.clone())));
            let sessions = create_session_layer(PostgresStore::new(pool), config.secure_cookies());
            build_router(state, sessions)
        }
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory store; data is lost on restart");
            let state = AppState::new(Arc::new(MemoryStore::new()));
            let sessions = create_session_layer(
                tower_sessions::MemoryStore::default(),
                config.secure_cookies(),
            );
            build_router(state, sessions)
        }
    };

    let app = with_outer_layers(app, &config);

    let addr = config.socket_addr();
    tracing::info!(store = ?config.store, "api listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");
}

/// CORS (when configured) and the Sentry layers, outermost for full coverage.
fn with_outer_layers(app: Router, config: &ApiConfig) -> Router {
    let app = match config.cors_origin.as_deref() {
        Some(origin) => match routes::cors_layer(origin) {
            Ok(cors) => app.layer(cors),
            Err(e) => {
                tracing::warn!(origin, error = %e, "Ignoring invalid CORS origin");
                app
            }
        },
        None => app,
    };

    app.layer(sentry_tower::NewSentryLayer::new_from_top())
        .layer(sentry_tower::SentryHttpLayer::new().enable_transaction())
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}
