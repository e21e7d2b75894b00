//! `PostgreSQL` [`Store`] backend.
//!
//! Queries are checked at runtime (`query_as`) so the workspace builds without
//! a live database. Row types convert into domain types, and rows that violate
//! a domain invariant surface as [`RepositoryError::DataCorruption`].

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use sqlx::PgPool;

use scalebreakers_core::{
    Email, MuralRequestId, PortfolioItemId, Price, ProductCategory, ProductId, Stock, WorkshopId,
};

use super::{RepositoryError, Store};
use crate::models::{
    MuralDetails, MuralRequest, NewMuralRequest, NewProduct, NewsletterSubscriber, PortfolioItem,
    Product, ProductChanges, Workshop,
};

const WORKSHOP_COLUMNS: &str = "id, title, description, date, time, location, capacity, price, \
     image_url, qr_code, created_at, updated_at";

const PRODUCT_COLUMNS: &str = "id, name, description, category, price, stock, image_url, \
     is_one_of_one, created_at, updated_at";

const PORTFOLIO_COLUMNS: &str =
    "id, title, description, category, image_url, display_order, created_at";

const MURAL_REQUEST_COLUMNS: &str = "id, name, email, phone, location, wall_size, \
     wall_condition, theme, inspiration, timeline, budget, additional_notes, created_at";

#[derive(sqlx::FromRow)]
struct WorkshopRow {
    id: WorkshopId,
    title: String,
    description: Option<String>,
    date: Option<NaiveDate>,
    time: Option<String>,
    location: Option<String>,
    capacity: Option<i32>,
    price: Option<Decimal>,
    image_url: Option<String>,
    qr_code: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl From<WorkshopRow> for Workshop {
    fn from(r: WorkshopRow) -> Self {
        Self {
            id: r.id,
            title: r.title,
            description: r.description,
            date: r.date,
            time: r.time,
            location: r.location,
            capacity: r.capacity,
            price: r.price,
            image_url: r.image_url,
            qr_code: r.qr_code,
            created_at: r.created_at,
            updated_at: r.updated_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct ProductRow {
    id: ProductId,
    name: String,
    description: String,
    category: ProductCategory,
    price: Decimal,
    stock: i32,
    image_url: Option<String>,
    is_one_of_one: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<ProductRow> for Product {
    type Error = RepositoryError;

    fn try_from(r: ProductRow) -> Result<Self, Self::Error> {
        let price = Price::new(r.price).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid price for product {}: {e}", r.id))
        })?;
        let stock = Stock::new(i64::from(r.stock)).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid stock for product {}: {e}", r.id))
        })?;

        Ok(Self {
            id: r.id,
            name: r.name,
            description: r.description,
            category: r.category,
            price,
            stock,
            image_url: r.image_url,
            is_one_of_one: r.is_one_of_one,
            created_at: r.created_at,
            updated_at: r.updated_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct PortfolioRow {
    id: PortfolioItemId,
    title: String,
    description: Option<String>,
    category: String,
    image_url: Option<String>,
    display_order: i32,
    created_at: DateTime<Utc>,
}

impl From<PortfolioRow> for PortfolioItem {
    fn from(r: PortfolioRow) -> Self {
        Self {
            id: r.id,
            title: r.title,
            description: r.description,
            category: r.category,
            image_url: r.image_url,
            display_order: r.display_order,
            created_at: r.created_at,
        }
    }
}

#[derive(sqlx::FromRow)]
struct MuralRequestRow {
    id: MuralRequestId,
    name: String,
    email: String,
    phone: Option<String>,
    location: Option<String>,
    wall_size: Option<String>,
    wall_condition: Option<String>,
    theme: Option<String>,
    inspiration: Option<String>,
    timeline: Option<String>,
    budget: Option<String>,
    additional_notes: Option<String>,
    created_at: DateTime<Utc>,
}

impl TryFrom<MuralRequestRow> for MuralRequest {
    type Error = RepositoryError;

    fn try_from(r: MuralRequestRow) -> Result<Self, Self::Error> {
        let email = Email::parse(&r.email).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid email in database: {e}"))
        })?;

        Ok(Self {
            id: r.id,
            name: r.name,
            email,
            details: MuralDetails {
                phone: r.phone,
                location: r.location,
                wall_size: r.wall_size,
                wall_condition: r.wall_condition,
                theme: r.theme,
                inspiration: r.inspiration,
                timeline: r.timeline,
                budget: r.budget,
                additional_notes: r.additional_notes,
            },
            created_at: r.created_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct SubscriberRow {
    email: String,
    name: Option<String>,
    subscribed_at: DateTime<Utc>,
}

impl TryFrom<SubscriberRow> for NewsletterSubscriber {
    type Error = RepositoryError;

    fn try_from(r: SubscriberRow) -> Result<Self, Self::Error> {
        let email = Email::parse(&r.email).map_err(|e| {
            RepositoryError::DataCorruption(format!("invalid email in database: {e}"))
        })?;
        Ok(Self {
            email,
            name: r.name,
            subscribed_at: r.subscribed_at,
        })
    }
}

/// Store backed by a `PostgreSQL` pool.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    #[must_use]
    pub const fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Insert a workshop, or overwrite every field of an existing one with the same id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn upsert_workshop(&self, workshop: &Workshop) -> Result<Workshop, RepositoryError> {
        let row = sqlx::query_as::<_, WorkshopRow>(&format!(
            r"
            INSERT INTO workshops
                (id, title, description, date, time, location, capacity, price, image_url, qr_code)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            ON CONFLICT (id) DO UPDATE SET
                title = EXCLUDED.title,
                description = EXCLUDED.description,
                date = EXCLUDED.date,
                time = EXCLUDED.time,
                location = EXCLUDED.location,
                capacity = EXCLUDED.capacity,
                price = EXCLUDED.price,
                image_url = EXCLUDED.image_url,
                qr_code = EXCLUDED.qr_code,
                updated_at = now()
            RETURNING {WORKSHOP_COLUMNS}
            "
        ))
        .bind(workshop.id)
        .bind(&workshop.title)
        .bind(&workshop.description)
        .bind(workshop.date)
        .bind(&workshop.time)
        .bind(&workshop.location)
        .bind(workshop.capacity)
        .bind(workshop.price)
        .bind(&workshop.image_url)
        .bind(&workshop.qr_code)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into())
    }

    /// Insert a portfolio item, or overwrite an existing one with the same id.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn upsert_portfolio_item(
        &self,
        item: &PortfolioItem,
    ) -> Result<PortfolioItem, RepositoryError> {
        let row = sqlx::query_as::<_, PortfolioRow>(&format!(
            r"
            INSERT INTO portfolio_items (id, title, description, category, image_url, display_order)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (id) DO UPDATE SET
                title = EXCLUDED.title,
                description = EXCLUDED.description,
                category = EXCLUDED.category,
                image_url = EXCLUDED.image_url,
                display_order = EXCLUDED.display_order
            RETURNING {PORTFOLIO_COLUMNS}
            "
        ))
        .bind(item.id)
        .bind(&item.title)
        .bind(&item.description)
        .bind(&item.category)
        .bind(&item.image_url)
        .bind(item.display_order)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into())
    }
}

#[async_trait]
impl Store for PgStore {
    async fn list_workshops(&self) -> Result<Vec<Workshop>, RepositoryError> {
        let rows = sqlx::query_as::<_, WorkshopRow>(&format!(
            "SELECT {WORKSHOP_COLUMNS} FROM workshops ORDER BY date ASC NULLS LAST, title ASC"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Workshop::from).collect())
    }

    async fn get_workshop(&self, id: WorkshopId) -> Result<Option<Workshop>, RepositoryError> {
        let row = sqlx::query_as::<_, WorkshopRow>(&format!(
            "SELECT {WORKSHOP_COLUMNS} FROM workshops WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Workshop::from))
    }

    async fn list_products(
        &self,
        category: Option<ProductCategory>,
    ) -> Result<Vec<Product>, RepositoryError> {
        let rows = sqlx::query_as::<_, ProductRow>(&format!(
            r"
            SELECT {PRODUCT_COLUMNS}
            FROM products
            WHERE ($1::product_category IS NULL OR category = $1)
            ORDER BY created_at DESC, id ASC
            "
        ))
        .bind(category)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Product::try_from).collect()
    }

    async fn get_product(&self, id: ProductId) -> Result<Option<Product>, RepositoryError> {
        let row = sqlx::query_as::<_, ProductRow>(&format!(
            "SELECT {PRODUCT_COLUMNS} FROM products WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        row.map(Product::try_from).transpose()
    }

    async fn create_product(
        &self,
        id: ProductId,
        product: &NewProduct,
    ) -> Result<Product, RepositoryError> {
        let row = sqlx::query_as::<_, ProductRow>(&format!(
            r"
            INSERT INTO products
                (id, name, description, category, price, stock, image_url, is_one_of_one)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {PRODUCT_COLUMNS}
            "
        ))
        .bind(id)
        .bind(&product.name)
        .bind(&product.description)
        .bind(product.category)
        .bind(product.price.amount())
        .bind(product.stock.as_i32())
        .bind(&product.image_url)
        .bind(product.is_one_of_one)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| RepositoryError::from_write(e, "product id already exists"))?;

        row.try_into()
    }

    async fn update_product(
        &self,
        id: ProductId,
        changes: &ProductChanges,
    ) -> Result<Product, RepositoryError> {
        let row = sqlx::query_as::<_, ProductRow>(&format!(
            r"
            UPDATE products SET
                name = COALESCE($2, name),
                description = COALESCE($3, description),
                category = COALESCE($4, category),
                price = COALESCE($5, price),
                stock = COALESCE($6, stock),
                image_url = COALESCE($7, image_url),
                is_one_of_one = COALESCE($8, is_one_of_one),
                updated_at = now()
            WHERE id = $1
            RETURNING {PRODUCT_COLUMNS}
            "
        ))
        .bind(id)
        .bind(&changes.name)
        .bind(&changes.description)
        .bind(changes.category)
        .bind(changes.price.map(|p| p.amount()))
        .bind(changes.stock.map(|s| s.as_i32()))
        .bind(&changes.image_url)
        .bind(changes.is_one_of_one)
        .fetch_optional(&self.pool)
        .await?;

        row.ok_or(RepositoryError::NotFound)?.try_into()
    }

    async fn delete_product(&self, id: ProductId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    async fn list_portfolio(
        &self,
        category: Option<&str>,
    ) -> Result<Vec<PortfolioItem>, RepositoryError> {
        let rows = sqlx::query_as::<_, PortfolioRow>(&format!(
            r"
            SELECT {PORTFOLIO_COLUMNS}
            FROM portfolio_items
            WHERE ($1::text IS NULL OR category = $1)
            ORDER BY display_order ASC, created_at DESC
            "
        ))
        .bind(category)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(PortfolioItem::from).collect())
    }

    async fn create_mural_request(
        &self,
        id: MuralRequestId,
        request: &NewMuralRequest,
    ) -> Result<MuralRequest, RepositoryError> {
        let details = &request.details;
        let row = sqlx::query_as::<_, MuralRequestRow>(&format!(
            r"
            INSERT INTO mural_requests
                (id, name, email, phone, location, wall_size, wall_condition, theme,
                 inspiration, timeline, budget, additional_notes)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            RETURNING {MURAL_REQUEST_COLUMNS}
            "
        ))
        .bind(id)
        .bind(&request.name)
        .bind(&request.email)
        .bind(&details.phone)
        .bind(&details.location)
        .bind(&details.wall_size)
        .bind(&details.wall_condition)
        .bind(&details.theme)
        .bind(&details.inspiration)
        .bind(&details.timeline)
        .bind(&details.budget)
        .bind(&details.additional_notes)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| RepositoryError::from_write(e, "mural request id already exists"))?;

        row.try_into()
    }

    async fn subscribe_newsletter(
        &self,
        email: &Email,
        name: Option<&str>,
    ) -> Result<NewsletterSubscriber, RepositoryError> {
        let row = sqlx::query_as::<_, SubscriberRow>(
            r"
            INSERT INTO newsletter_subscribers (email, name)
            VALUES ($1, $2)
            RETURNING email, name, subscribed_at
            ",
        )
        .bind(email)
        .bind(name)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| RepositoryError::from_write(e, "email already subscribed"))?;

        row.try_into()
    }

    async fn ping(&self) -> Result<(), RepositoryError> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }
}
