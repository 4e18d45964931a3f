//! MongoDB implementation of the persistence layer.

use std::time::Duration;

use async_trait::async_trait;
use bson::{Document, doc};
use futures_util::TryStreamExt;
use mongodb::error::{ErrorKind, WriteFailure};
use mongodb::options::{ClientOptions, IndexOptions};
use mongodb::{Client, Collection, Database, IndexModel};

use super::HubStore;
use super::models::{CategoryDocument, GuideDocument, SubscriberDocument};
use crate::config::HubConfig;
use crate::domain::{Category, CategoryId, Guide, GuideId, Subscriber};
use crate::error::HubError;

const GUIDES: &str = "guides";
const CATEGORIES: &str = "categories";
const SUBSCRIBERS: &str = "subscribers";

/// Server error code for a unique index violation.
const DUPLICATE_KEY: i32 = 11000;

/// MongoDB-backed store.
///
/// Driver-generated `_id` values increase with every insert from this
/// process, so sorting on `_id` yields insertion order.
#[derive(Debug, Clone)]
pub struct MongoStore {
    db: Database,
}

impl MongoStore {
    /// Connects to `url`, selects the configured database and creates the
    /// unique indexes.
    ///
    /// # Errors
    ///
    /// Returns [`HubError::Unavailable`] if the URL is invalid or the server
    /// does not answer a ping, and [`HubError::Storage`] if an index cannot
    /// be created.
    pub async fn connect(config: &HubConfig, url: &str) -> Result<Self, HubError> {
        let mut options = ClientOptions::parse(url)
            .await
            .map_err(|e| HubError::Unavailable(e.to_string()))?;
        let timeout = Duration::from_secs(config.database_connect_timeout_secs);
        options.app_name = Some(env!("CARGO_PKG_NAME").to_string());
        options.connect_timeout = Some(timeout);
        options.server_selection_timeout = Some(timeout);
        options.max_pool_size = Some(config.database_max_connections);
        options.min_pool_size = Some(config.database_min_connections);

        let client =
            Client::with_options(options).map_err(|e| HubError::Unavailable(e.to_string()))?;
        let store = Self::new(client.database(&config.mongodb_database));
        store.ping().await?;
        store.ensure_indexes().await?;

        tracing::info!(
            database = %config.mongodb_database,
            max_pool_size = config.database_max_connections,
            "mongo store ready"
        );
        Ok(store)
    }

    /// Wraps a database handle. Indexes are not created.
    #[must_use]
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    async fn ensure_indexes(&self) -> Result<(), HubError> {
        let unique = |keys: Document| {
            IndexModel::builder()
                .keys(keys)
                .options(IndexOptions::builder().unique(true).build())
                .build()
        };
        self.guides().create_index(unique(doc! { "id": 1 })).await?;
        self.guides()
            .create_index(IndexModel::builder().keys(doc! { "created_at": -1 }).build())
            .await?;
        self.categories().create_index(unique(doc! { "id": 1 })).await?;
        self.subscribers()
            .create_index(unique(doc! { "email": 1 }))
            .await?;
        Ok(())
    }

    fn guides(&self) -> Collection<GuideDocument> {
        self.db.collection(GUIDES)
    }

    fn categories(&self) -> Collection<CategoryDocument> {
        self.db.collection(CATEGORIES)
    }

    fn subscribers(&self) -> Collection<SubscriberDocument> {
        self.db.collection(SUBSCRIBERS)
    }
}

fn is_duplicate_key(err: &mongodb::error::Error) -> bool {
    matches!(
        err.kind.as_ref(),
        ErrorKind::Write(WriteFailure::WriteError(e)) if e.code == DUPLICATE_KEY
    )
}

fn to_limit(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

#[async_trait]
impl HubStore for MongoStore {
    async fn ping(&self) -> Result<(), HubError> {
        self.db
            .run_command(doc! { "ping": 1 })
            .await
            .map_err(|e| HubError::Unavailable(e.to_string()))?;
        Ok(())
    }

    async fn count_guides(&self) -> Result<u64, HubError> {
        Ok(self.guides().count_documents(doc! {}).await?)
    }

    async fn count_categories(&self) -> Result<u64, HubError> {
        Ok(self.categories().count_documents(doc! {}).await?)
    }

    async fn count_distinct_tag_names(&self) -> Result<u64, HubError> {
        let names = self.guides().distinct("tags.name", doc! {}).await?;
        Ok(names.len() as u64)
    }

    async fn insert_guides(&self, guides: Vec<Guide>) -> Result<(), HubError> {
        if guides.is_empty() {
            return Ok(());
        }
        let docs: Vec<GuideDocument> = guides.iter().map(GuideDocument::from).collect();
        self.guides().insert_many(docs).await?;
        tracing::debug!(count = guides.len(), "guides inserted");
        Ok(())
    }

    async fn get_guide(&self, id: GuideId) -> Result<Option<Guide>, HubError> {
        self.guides()
            .find_one(doc! { "id": id.to_string() })
            .await?
            .map(Guide::try_from)
            .transpose()
    }

    async fn find_featured_guide(&self) -> Result<Option<Guide>, HubError> {
        let mut cursor = self
            .guides()
            .find(doc! { "featured": true })
            .sort(doc! { "_id": 1 })
            .limit(1)
            .await?;
        cursor.try_next().await?.map(Guide::try_from).transpose()
    }

    async fn list_guides(&self, offset: u64, limit: u64) -> Result<Vec<Guide>, HubError> {
        if limit == 0 {
            return Ok(Vec::new());
        }
        let docs: Vec<GuideDocument> = self
            .guides()
            .find(doc! {})
            .sort(doc! { "created_at": -1, "_id": -1 })
            .skip(offset)
            .limit(to_limit(limit))
            .await?
            .try_collect()
            .await?;
        docs.into_iter().map(Guide::try_from).collect()
    }

    async fn insert_categories(&self, categories: Vec<Category>) -> Result<(), HubError> {
        if categories.is_empty() {
            return Ok(());
        }
        let docs: Vec<CategoryDocument> =
            categories.iter().map(CategoryDocument::from).collect();
        self.categories().insert_many(docs).await?;
        tracing::debug!(count = categories.len(), "categories inserted");
        Ok(())
    }

    async fn get_category(&self, id: CategoryId) -> Result<Option<Category>, HubError> {
        self.categories()
            .find_one(doc! { "id": id.to_string() })
            .await?
            .map(Category::try_from)
            .transpose()
    }

    async fn list_categories(&self) -> Result<Vec<Category>, HubError> {
        let docs: Vec<CategoryDocument> = self
            .categories()
            .find(doc! {})
            .sort(doc! { "_id": 1 })
            .await?
            .try_collect()
            .await?;
        docs.into_iter().map(Category::try_from).collect()
    }

    async fn count_guides_in_category(&self, id: CategoryId) -> Result<u64, HubError> {
        Ok(self
            .guides()
            .count_documents(doc! { "category_id": id.to_string() })
            .await?)
    }

    async fn insert_subscriber(&self, subscriber: Subscriber) -> Result<(), HubError> {
        match self
            .subscribers()
            .insert_one(SubscriberDocument::from(&subscriber))
            .await
        {
            Ok(_) => Ok(()),
            Err(e) if is_duplicate_key(&e) => Err(HubError::AlreadySubscribed),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::domain::{Email, Tag};

    #[test]
    fn oversized_limits_saturate() {
        assert_eq!(to_limit(u64::MAX), i64::MAX);
        assert_eq!(to_limit(3), 3);
    }

    /// Connects to `MONGODB_TEST_URL` with a fresh database per test.
    async fn live_store() -> MongoStore {
        let Ok(url) = std::env::var("MONGODB_TEST_URL") else {
            panic!("MONGODB_TEST_URL must point at a MongoDB server");
        };
        let config = HubConfig {
            mongodb_database: format!("hub_test_{}", uuid::Uuid::new_v4().simple()),
            ..HubConfig::default()
        };
        let Ok(store) = MongoStore::connect(&config, &url).await else {
            panic!("cannot connect to {url}");
        };
        store
    }

    fn guide(title: &str, featured: bool, tags: &[&str]) -> Guide {
        let now = Utc::now();
        Guide {
            id: GuideId::new(),
            title: title.to_string(),
            description: "d".to_string(),
            content: None,
            icon: "fas fa-book".to_string(),
            color: "blue".to_string(),
            tags: tags.iter().map(|t| Tag::new(*t, "blue")).collect(),
            featured,
            category_id: None,
            created_at: now,
            updated_at: now,
        }
    }

    #[tokio::test]
    #[ignore = "needs MONGODB_TEST_URL"]
    async fn duplicate_subscriber_hits_unique_index() {
        let store = live_store().await;
        let Ok(email) = Email::parse("reader@example.org") else {
            panic!("valid email");
        };
        tokio_test::assert_ok!(store.insert_subscriber(Subscriber::now(email.clone())).await);
        assert!(matches!(
            store.insert_subscriber(Subscriber::now(email)).await,
            Err(HubError::AlreadySubscribed)
        ));
        tokio_test::assert_ok!(store.db.drop().await);
    }

    #[tokio::test]
    #[ignore = "needs MONGODB_TEST_URL"]
    async fn same_timestamp_guides_list_later_insert_first() {
        let store = live_store().await;
        let first = guide("first", true, &["Docker"]);
        let mut second = guide("second", true, &["Docker", "Redis"]);
        second.created_at = first.created_at;
        tokio_test::assert_ok!(
            store
                .insert_guides(vec![first.clone(), second])
                .await
        );

        let Ok(latest) = store.latest_guides(2).await else {
            panic!("listing failed");
        };
        let titles: Vec<&str> = latest.iter().map(|g| g.title.as_str()).collect();
        assert_eq!(titles, ["second", "first"]);

        let Ok(Some(featured)) = store.find_featured_guide().await else {
            panic!("featured guide expected");
        };
        assert_eq!(featured.id, first.id);

        assert!(matches!(store.count_distinct_tag_names().await, Ok(2)));
        tokio_test::assert_ok!(store.db.drop().await);
    }
}
