//! Data store contract and backends.
//!
//! # Tables (`PostgreSQL`)
//!
//! - `workshops` - Workshop listings (seeded by the CLI)
//! - `products` - Shop catalog
//! - `portfolio_items` - Gallery pieces (seeded by the CLI)
//! - `mural_requests` - Commission requests
//! - `newsletter_subscribers` - Unique by email
//! - `tower_sessions.session` - Session storage, shared with the session provider
//!
//! # Migrations
//!
//! Migrations are stored in `crates/api/migrations/` and run via:
//! ```bash
//! cargo run -p scalebreakers-cli -- migrate
//! ```

pub mod memory;
pub mod postgres;

use std::time::Duration;

use async_trait::async_trait;
use secrecy::ExposeSecret;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use thiserror::Error;

use scalebreakers_core::{Email, MuralRequestId, ProductCategory, ProductId, WorkshopId};

use crate::models::{
    MuralRequest, NewMuralRequest, NewProduct, NewsletterSubscriber, PortfolioItem, Product,
    ProductChanges, Workshop,
};

pub use memory::MemoryStore;
pub use postgres::PgStore;

/// Errors that can occur during repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// Database error from sqlx.
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Data in the database is corrupted or invalid.
    #[error("data corruption: {0}")]
    DataCorruption(String),

    /// Requested entity was not found.
    #[error("not found")]
    NotFound,

    /// Constraint violation (e.g., unique email).
    #[error("constraint violation: {0}")]
    Conflict(String),
}

impl RepositoryError {
    /// Map a sqlx error, turning unique violations into [`RepositoryError::Conflict`].
    pub(crate) fn from_write(err: sqlx::Error, conflict: &str) -> Self {
        if let sqlx::Error::Database(ref db_err) = err
            && db_err.is_unique_violation()
        {
            return Self::Conflict(conflict.to_owned());
        }
        Self::Database(err)
    }
}

/// The data store the API router talks to.
///
/// Reads return `Ok(None)`/empty when nothing matches. Writes return the stored
/// entity, [`RepositoryError::NotFound`] when the target row is absent, and
/// [`RepositoryError::Conflict`] on a uniqueness violation.
#[async_trait]
pub trait Store: Send + Sync {
    /// All workshops in listing order (by date, undated last, then title).
    async fn list_workshops(&self) -> Result<Vec<Workshop>, RepositoryError>;

    async fn get_workshop(&self, id: WorkshopId) -> Result<Option<Workshop>, RepositoryError>;

    /// Products, newest first, optionally restricted to one category.
    async fn list_products(
        &self,
        category: Option<ProductCategory>,
    ) -> Result<Vec<Product>, RepositoryError>;

    async fn get_product(&self, id: ProductId) -> Result<Option<Product>, RepositoryError>;

    async fn create_product(
        &self,
        id: ProductId,
        product: &NewProduct,
    ) -> Result<Product, RepositoryError>;

    async fn update_product(
        &self,
        id: ProductId,
        changes: &ProductChanges,
    ) -> Result<Product, RepositoryError>;

    async fn delete_product(&self, id: ProductId) -> Result<(), RepositoryError>;

    /// Portfolio items in gallery order, optionally restricted to one category.
    async fn list_portfolio(
        &self,
        category: Option<&str>,
    ) -> Result<Vec<PortfolioItem>, RepositoryError>;

    async fn create_mural_request(
        &self,
        id: MuralRequestId,
        request: &NewMuralRequest,
    ) -> Result<MuralRequest, RepositoryError>;

    /// Fails with [`RepositoryError::Conflict`] if the email is already subscribed.
    async fn subscribe_newsletter(
        &self,
        email: &Email,
        name: Option<&str>,
    ) -> Result<NewsletterSubscriber, RepositoryError>;

    /// Cheap connectivity check for readiness probes.
    async fn ping(&self) -> Result<(), RepositoryError>;
}

/// Create a `PostgreSQL` connection pool with sensible defaults.
///
/// # Arguments
///
/// * `database_url` - `PostgreSQL` connection string (wrapped in `SecretString`)
///
/// # Errors
///
/// Returns `sqlx::Error` if the connection cannot be established.
pub async fn create_pool(database_url: &secrecy::SecretString) -> Result<PgPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .min_connections(2)
        .acquire_timeout(Duration::from_secs(10))
        .connect(database_url.expose_secret())
        .await
}
