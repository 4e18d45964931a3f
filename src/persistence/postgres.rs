//! PostgreSQL implementation of the persistence layer.

use std::time::Duration;

use async_trait::async_trait;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use sqlx::types::Json;

use super::HubStore;
use super::models::{CategoryRow, GuideRow};
use crate::config::HubConfig;
use crate::domain::{Category, CategoryId, Guide, GuideId, Subscriber};
use crate::error::HubError;

const GUIDE_COLUMNS: &str = "id, title, description, content, icon, color, tags, featured, \
                             category_id, created_at, updated_at";

/// PostgreSQL-backed store using `sqlx::PgPool`.
///
/// Schema lives in `migrations/` and is applied by [`PostgresStore::connect`].
#[derive(Debug, Clone)]
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    /// Wraps an existing connection pool. Migrations are not run.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Opens a connection pool using the configured limits and applies
    /// pending migrations.
    ///
    /// # Errors
    ///
    /// Returns [`HubError::Unavailable`] if the database cannot be reached
    /// and [`HubError::Storage`] if a migration fails.
    pub async fn connect(config: &HubConfig, url: &str) -> Result<Self, HubError> {
        let pool = PgPoolOptions::new()
            .max_connections(config.database_max_connections)
            .min_connections(config.database_min_connections)
            .acquire_timeout(Duration::from_secs(config.database_connect_timeout_secs))
            .connect(url)
            .await
            .map_err(|e| HubError::Unavailable(e.to_string()))?;

        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .map_err(|e| HubError::Storage(format!("migration failed: {e}")))?;

        tracing::info!(
            max_connections = config.database_max_connections,
            "postgres store ready"
        );
        Ok(Self::new(pool))
    }
}

fn to_count(value: i64) -> u64 {
    u64::try_from(value).unwrap_or(0)
}

fn to_limit(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

#[async_trait]
impl HubStore for PostgresStore {
    async fn ping(&self) -> Result<(), HubError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| HubError::Unavailable(e.to_string()))?;
        Ok(())
    }

    async fn count_guides(&self) -> Result<u64, HubError> {
        let n = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM guides")
            .fetch_one(&self.pool)
            .await?;
        Ok(to_count(n))
    }

    async fn count_categories(&self) -> Result<u64, HubError> {
        let n = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM categories")
            .fetch_one(&self.pool)
            .await?;
        Ok(to_count(n))
    }

    async fn count_distinct_tag_names(&self) -> Result<u64, HubError> {
        let n = sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(DISTINCT tag ->> 'name') FROM guides \
             CROSS JOIN LATERAL jsonb_array_elements(tags) AS tag",
        )
        .fetch_one(&self.pool)
        .await?;
        Ok(to_count(n))
    }

    async fn insert_guides(&self, guides: Vec<Guide>) -> Result<(), HubError> {
        let mut tx = self.pool.begin().await?;
        for guide in &guides {
            sqlx::query(
                "INSERT INTO guides (id, title, description, content, icon, color, tags, \
                 featured, category_id, created_at, updated_at) \
                 VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)",
            )
            .bind(guide.id.as_uuid())
            .bind(&guide.title)
            .bind(&guide.description)
            .bind(&guide.content)
            .bind(&guide.icon)
            .bind(&guide.color)
            .bind(Json(&guide.tags))
            .bind(guide.featured)
            .bind(guide.category_id.map(uuid::Uuid::from))
            .bind(guide.created_at)
            .bind(guide.updated_at)
            .execute(&mut *tx)
            .await?;
        }
        tx.commit().await?;
        tracing::debug!(count = guides.len(), "guides inserted");
        Ok(())
    }

    async fn get_guide(&self, id: GuideId) -> Result<Option<Guide>, HubError> {
        let row = sqlx::query_as::<_, GuideRow>(&format!(
            "SELECT {GUIDE_COLUMNS} FROM guides WHERE id = $1"
        ))
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(Guide::from))
    }

    async fn find_featured_guide(&self) -> Result<Option<Guide>, HubError> {
        let row = sqlx::query_as::<_, GuideRow>(&format!(
            "SELECT {GUIDE_COLUMNS} FROM guides WHERE featured ORDER BY seq ASC LIMIT 1"
        ))
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(Guide::from))
    }

    async fn list_guides(&self, offset: u64, limit: u64) -> Result<Vec<Guide>, HubError> {
        let rows = sqlx::query_as::<_, GuideRow>(&format!(
            "SELECT {GUIDE_COLUMNS} FROM guides \
             ORDER BY created_at DESC, seq DESC LIMIT $1 OFFSET $2"
        ))
        .bind(to_limit(limit))
        .bind(to_limit(offset))
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(Guide::from).collect())
    }

    async fn insert_categories(&self, categories: Vec<Category>) -> Result<(), HubError> {
        let mut tx = self.pool.begin().await?;
        for category in &categories {
            sqlx::query(
                "INSERT INTO categories (id, name, description, icon, color) \
                 VALUES ($1, $2, $3, $4, $5)",
            )
            .bind(category.id.as_uuid())
            .bind(&category.name)
            .bind(&category.description)
            .bind(&category.icon)
            .bind(&category.color)
            .execute(&mut *tx)
            .await?;
        }
        tx.commit().await?;
        tracing::debug!(count = categories.len(), "categories inserted");
        Ok(())
    }

    async fn get_category(&self, id: CategoryId) -> Result<Option<Category>, HubError> {
        let row = sqlx::query_as::<_, CategoryRow>(
            "SELECT id, name, description, icon, color FROM categories WHERE id = $1",
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await?;
        Ok(row.map(Category::from))
    }

    async fn list_categories(&self) -> Result<Vec<Category>, HubError> {
        let rows = sqlx::query_as::<_, CategoryRow>(
            "SELECT id, name, description, icon, color FROM categories ORDER BY seq ASC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(Category::from).collect())
    }

    async fn count_guides_in_category(&self, id: CategoryId) -> Result<u64, HubError> {
        let n = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM guides WHERE category_id = $1")
            .bind(id.as_uuid())
            .fetch_one(&self.pool)
            .await?;
        Ok(to_count(n))
    }

    async fn insert_subscriber(&self, subscriber: Subscriber) -> Result<(), HubError> {
        let result = sqlx::query(
            "INSERT INTO subscribers (email, subscribed_at) VALUES ($1, $2) \
             ON CONFLICT (email) DO NOTHING",
        )
        .bind(subscriber.email.as_str())
        .bind(subscriber.subscribed_at)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(HubError::AlreadySubscribed);
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use chrono::{Duration as ChronoDuration, Utc};

    use super::*;
    use crate::domain::{Email, Tag};

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

    #[test]
    fn negative_counts_clamp_to_zero() {
        assert_eq!(to_count(-1), 0);
        assert_eq!(to_count(42), 42);
    }

    #[test]
    fn oversized_limits_saturate() {
        assert_eq!(to_limit(u64::MAX), i64::MAX);
        assert_eq!(to_limit(2), 2);
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "needs DATABASE_URL"]
    async fn duplicate_subscriber_hits_unique_key(pool: PgPool) {
        let store = PostgresStore::new(pool);
        let Ok(email) = Email::parse("reader@example.org") else {
            panic!("valid email");
        };
        tokio_test::assert_ok!(store.insert_subscriber(Subscriber::now(email)).await);

        let Ok(again) = Email::parse(" reader@EXAMPLE.org ") else {
            panic!("valid email");
        };
        assert!(matches!(
            store.insert_subscriber(Subscriber::now(again)).await,
            Err(HubError::AlreadySubscribed)
        ));
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "needs DATABASE_URL"]
    async fn latest_orders_by_time_then_later_insert(pool: PgPool) {
        let store = PostgresStore::new(pool);
        let mut oldest = guide("oldest", false, &[]);
        oldest.created_at -= ChronoDuration::hours(1);
        let first = guide("first", true, &[]);
        let mut second = guide("second", true, &[]);
        second.created_at = first.created_at;
        tokio_test::assert_ok!(
            store
                .insert_guides(vec![oldest, first.clone(), second])
                .await
        );

        let Ok(latest) = store.latest_guides(3).await else {
            panic!("listing failed");
        };
        let titles: Vec<&str> = latest.iter().map(|g| g.title.as_str()).collect();
        assert_eq!(titles, ["second", "first", "oldest"]);

        let Ok(page) = store.list_guides(1, 1).await else {
            panic!("listing failed");
        };
        assert_eq!(page.first().map(|g| g.title.as_str()), Some("first"));

        let Ok(Some(featured)) = store.find_featured_guide().await else {
            panic!("featured guide expected");
        };
        assert_eq!(featured.id, first.id);
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "needs DATABASE_URL"]
    async fn distinct_tag_names_across_guides(pool: PgPool) {
        let store = PostgresStore::new(pool);
        assert!(matches!(store.count_distinct_tag_names().await, Ok(0)));
        tokio_test::assert_ok!(
            store
                .insert_guides(vec![
                    guide("a", false, &["Docker", "Redis"]),
                    guide("b", false, &["Docker", "docker"]),
                    guide("c", false, &[]),
                ])
                .await
        );
        assert!(matches!(store.count_distinct_tag_names().await, Ok(3)));
        assert!(matches!(store.count_guides().await, Ok(3)));
    }
}
