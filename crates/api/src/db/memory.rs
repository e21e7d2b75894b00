//! In-memory [`Store`] for local demos and tests.
//!
//! Mirrors the Postgres backend's observable behaviour: unique newsletter
//! emails, category filters and listing order.

use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use scalebreakers_core::{
    Email, MuralRequestId, PortfolioItemId, ProductCategory, ProductId, WorkshopId,
};

use super::{RepositoryError, Store};
use crate::models::{
    MuralRequest, NewMuralRequest, NewProduct, NewsletterSubscriber, PortfolioItem, Product,
    ProductChanges, Workshop,
};

#[derive(Default)]
struct Tables {
    workshops: HashMap<WorkshopId, Workshop>,
    products: HashMap<ProductId, Product>,
    portfolio: HashMap<PortfolioItemId, PortfolioItem>,
    mural_requests: HashMap<MuralRequestId, MuralRequest>,
    subscribers: BTreeMap<Email, NewsletterSubscriber>,
}

/// Process-local store guarded by a single `RwLock`.
#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
    unavailable: AtomicBool,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a workshop.
    pub async fn insert_workshop(&self, workshop: Workshop) {
        self.tables
            .write()
            .await
            .workshops
            .insert(workshop.id, workshop);
    }

    /// Insert or replace a portfolio item.
    pub async fn insert_portfolio_item(&self, item: PortfolioItem) {
        self.tables.write().await.portfolio.insert(item.id, item);
    }

    pub async fn product_count(&self) -> usize {
        self.tables.read().await.products.len()
    }

    pub async fn mural_requests(&self) -> Vec<MuralRequest> {
        self.tables
            .read()
            .await
            .mural_requests
            .values()
            .cloned()
            .collect()
    }

    pub async fn subscribers(&self) -> Vec<NewsletterSubscriber> {
        self.tables
            .read()
            .await
            .subscribers
            .values()
            .cloned()
            .collect()
    }

    /// Simulate an outage: every operation fails with a database error until reset.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    fn check_available(&self) -> Result<(), RepositoryError> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(RepositoryError::Database(sqlx::Error::PoolClosed));
        }
        Ok(())
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn list_workshops(&self) -> Result<Vec<Workshop>, RepositoryError> {
        self.check_available()?;
        let mut workshops: Vec<Workshop> =
            self.tables.read().await.workshops.values().cloned().collect();
        workshops.sort_by(Workshop::listing_cmp);
        Ok(workshops)
    }

    async fn get_workshop(&self, id: WorkshopId) -> Result<Option<Workshop>, RepositoryError> {
        self.check_available()?;
        Ok(self.tables.read().await.workshops.get(&id).cloned())
    }

    async fn list_products(
        &self,
        category: Option<ProductCategory>,
    ) -> Result<Vec<Product>, RepositoryError> {
        self.check_available()?;
        let mut products: Vec<Product> = self
            .tables
            .read()
            .await
            .products
            .values()
            .filter(|p| category.is_none_or(|c| p.category == c))
            .cloned()
            .collect();
        products.sort_by(|a, b| {
            b.created_at
                .cmp(&a.created_at)
                .then_with(|| a.id.cmp(&b.id))
        });
        Ok(products)
    }

    async fn get_product(&self, id: ProductId) -> Result<Option<Product>, RepositoryError> {
        self.check_available()?;
        Ok(self.tables.read().await.products.get(&id).cloned())
    }

    async fn create_product(
        &self,
        id: ProductId,
        product: &NewProduct,
    ) -> Result<Product, RepositoryError> {
        self.check_available()?;
        let mut tables = self.tables.write().await;
        if tables.products.contains_key(&id) {
            return Err(RepositoryError::Conflict("product id already exists".to_owned()));
        }

        let now = Utc::now();
        let created = Product {
            id,
            name: product.name.clone(),
            description: product.description.clone(),
            category: product.category,
            price: product.price,
            stock: product.stock,
            image_url: product.image_url.clone(),
            is_one_of_one: product.is_one_of_one,
            created_at: now,
            updated_at: now,
        };
        tables.products.insert(id, created.clone());
        Ok(created)
    }

    async fn update_product(
        &self,
        id: ProductId,
        changes: &ProductChanges,
    ) -> Result<Product, RepositoryError> {
        self.check_available()?;
        let mut tables = self.tables.write().await;
        let product = tables
            .products
            .get_mut(&id)
            .ok_or(RepositoryError::NotFound)?;
        product.apply(changes, Utc::now());
        Ok(product.clone())
    }

    async fn delete_product(&self, id: ProductId) -> Result<(), RepositoryError> {
        self.check_available()?;
        self.tables
            .write()
            .await
            .products
            .remove(&id)
            .map(|_| ())
            .ok_or(RepositoryError::NotFound)
    }

    async fn list_portfolio(
        &self,
        category: Option<&str>,
    ) -> Result<Vec<PortfolioItem>, RepositoryError> {
        self.check_available()?;
        let mut items: Vec<PortfolioItem> = self
            .tables
            .read()
            .await
            .portfolio
            .values()
            .filter(|item| category.is_none_or(|c| item.category == c))
            .cloned()
            .collect();
        items.sort_by(PortfolioItem::gallery_cmp);
        Ok(items)
    }

    async fn create_mural_request(
        &self,
        id: MuralRequestId,
        request: &NewMuralRequest,
    ) -> Result<MuralRequest, RepositoryError> {
        self.check_available()?;
        let mut tables = self.tables.write().await;
        if tables.mural_requests.contains_key(&id) {
            return Err(RepositoryError::Conflict(
                "mural request id already exists".to_owned(),
            ));
        }

        let created = MuralRequest {
            id,
            name: request.name.clone(),
            email: request.email.clone(),
            details: request.details.clone(),
            created_at: Utc::now(),
        };
        tables.mural_requests.insert(id, created.clone());
        Ok(created)
    }

    async fn subscribe_newsletter(
        &self,
        email: &Email,
        name: Option<&str>,
    ) -> Result<NewsletterSubscriber, RepositoryError> {
        self.check_available()?;
        let mut tables = self.tables.write().await;
        if tables.subscribers.contains_key(email) {
            return Err(RepositoryError::Conflict("email already subscribed".to_owned()));
        }

        let subscriber = NewsletterSubscriber {
            email: email.clone(),
            name: name.map(str::to_owned),
            subscribed_at: Utc::now(),
        };
        tables.subscribers.insert(email.clone(), subscriber.clone());
        Ok(subscriber)
    }

    async fn ping(&self) -> Result<(), RepositoryError> {
        self.check_available()
    }
}
