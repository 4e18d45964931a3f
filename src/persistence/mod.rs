//! Persistence layer: storage abstraction, backends and seed data.
//!
//! [`HubStore`] is the async storage interface the service layer talks to.
//! Three backends implement it: [`MemoryStore`] for development and tests,
//! [`MongoStore`] for the compose deployment, and [`PostgresStore`] backed by
//! `sqlx::PgPool`. [`open_store`] picks one from the configuration.

pub mod memory;
pub mod models;
pub mod mongo;
pub mod postgres;
pub mod seed;

use std::sync::Arc;

use async_trait::async_trait;

use crate::config::HubConfig;
use crate::domain::{Category, CategoryId, Guide, GuideId, Subscriber};
use crate::error::HubError;

pub use memory::MemoryStore;
pub use mongo::MongoStore;
pub use postgres::PostgresStore;

/// Opens the backend selected by `config`.
///
/// `MONGODB_URL` wins over `DATABASE_URL`; with neither set the in-memory
/// store is used.
///
/// # Errors
///
/// Propagates connection and migration failures from the chosen backend.
pub async fn open_store(config: &HubConfig) -> Result<Arc<dyn HubStore>, HubError> {
    if let Some(url) = config.mongodb_url.as_deref() {
        return Ok(Arc::new(MongoStore::connect(config, url).await?));
    }
    if let Some(url) = config.database_url.as_deref() {
        return Ok(Arc::new(PostgresStore::connect(config, url).await?));
    }
    tracing::warn!("neither MONGODB_URL nor DATABASE_URL is set, using in-memory store");
    Ok(Arc::new(MemoryStore::new()))
}

/// Async storage interface for guides, categories and subscribers.
///
/// Guide listings are ordered newest first by `created_at`; guides created
/// at the same instant are ordered by insertion, later inserts first.
/// Category listings keep insertion order.
#[async_trait]
pub trait HubStore: Send + Sync + std::fmt::Debug {
    /// Verifies the backend is reachable.
    ///
    /// # Errors
    ///
    /// Returns [`HubError::Unavailable`] if the backend cannot be reached.
    async fn ping(&self) -> Result<(), HubError>;

    /// Returns the number of stored guides.
    ///
    /// # Errors
    ///
    /// Returns [`HubError::Storage`] on backend failure.
    async fn count_guides(&self) -> Result<u64, HubError>;

    /// Returns the number of stored categories.
    ///
    /// # Errors
    ///
    /// Returns [`HubError::Storage`] on backend failure.
    async fn count_categories(&self) -> Result<u64, HubError>;

    /// Returns the number of distinct tag names across all guides.
    ///
    /// # Errors
    ///
    /// Returns [`HubError::Storage`] on backend failure.
    async fn count_distinct_tag_names(&self) -> Result<u64, HubError>;

    /// Inserts guides in order.
    ///
    /// # Errors
    ///
    /// Returns [`HubError::Storage`] on backend failure or duplicate id.
    async fn insert_guides(&self, guides: Vec<Guide>) -> Result<(), HubError>;

    /// Inserts a single guide.
    ///
    /// # Errors
    ///
    /// Returns [`HubError::Storage`] on backend failure or duplicate id.
    async fn insert_guide(&self, guide: Guide) -> Result<(), HubError> {
        self.insert_guides(vec![guide]).await
    }

    /// Looks up a guide by id.
    ///
    /// # Errors
    ///
    /// Returns [`HubError::Storage`] on backend failure.
    async fn get_guide(&self, id: GuideId) -> Result<Option<Guide>, HubError>;

    /// Returns the earliest-inserted guide flagged as featured.
    ///
    /// # Errors
    ///
    /// Returns [`HubError::Storage`] on backend failure.
    async fn find_featured_guide(&self) -> Result<Option<Guide>, HubError>;

    /// Returns up to `limit` guides, newest first, skipping `offset`.
    ///
    /// # Errors
    ///
    /// Returns [`HubError::Storage`] on backend failure.
    async fn list_guides(&self, offset: u64, limit: u64) -> Result<Vec<Guide>, HubError>;

    /// Returns the `limit` newest guides.
    ///
    /// # Errors
    ///
    /// Returns [`HubError::Storage`] on backend failure.
    async fn latest_guides(&self, limit: u64) -> Result<Vec<Guide>, HubError> {
        self.list_guides(0, limit).await
    }

    /// Inserts categories in order.
    ///
    /// # Errors
    ///
    /// Returns [`HubError::Storage`] on backend failure or duplicate id.
    async fn insert_categories(&self, categories: Vec<Category>) -> Result<(), HubError>;

    /// Inserts a single category.
    ///
    /// # Errors
    ///
    /// Returns [`HubError::Storage`] on backend failure or duplicate id.
    async fn insert_category(&self, category: Category) -> Result<(), HubError> {
        self.insert_categories(vec![category]).await
    }

    /// Looks up a category by id.
    ///
    /// # Errors
    ///
    /// Returns [`HubError::Storage`] on backend failure.
    async fn get_category(&self, id: CategoryId) -> Result<Option<Category>, HubError>;

    /// Returns all categories in insertion order.
    ///
    /// # Errors
    ///
    /// Returns [`HubError::Storage`] on backend failure.
    async fn list_categories(&self) -> Result<Vec<Category>, HubError>;

    /// Returns the number of guides referencing `id`.
    ///
    /// # Errors
    ///
    /// Returns [`HubError::Storage`] on backend failure.
    async fn count_guides_in_category(&self, id: CategoryId) -> Result<u64, HubError>;

    /// Adds a newsletter subscriber. The existence check and the insert are
    /// a single atomic step.
    ///
    /// # Errors
    ///
    /// Returns [`HubError::AlreadySubscribed`] if the address is already
    /// present, or [`HubError::Storage`] on backend failure.
    async fn insert_subscriber(&self, subscriber: Subscriber) -> Result<(), HubError>;
}
