//! Hub service: business rules on top of the storage backend.

use std::sync::Arc;

use chrono::Utc;
use validator::Validate;

use crate::domain::{
    Category, CategoryWithCount, Email, Guide, GuideId, NewCategory, NewGuide, Stats, Subscriber,
};
use crate::error::HubError;
use crate::persistence::HubStore;
use crate::persistence::seed::{self, SeedReport};

/// Number of guides returned by `/guides/latest` when no limit is given.
pub const DEFAULT_LATEST_LIMIT: i64 = 2;

/// One page of guides plus the total count.
#[derive(Debug, Clone)]
pub struct GuidePage {
    /// Guides on this page, newest first.
    pub guides: Vec<Guide>,
    /// Total number of guides.
    pub total: u64,
}

/// Orchestration layer for all hub operations.
///
/// Stateless apart from the shared store handle; cheap to clone.
#[derive(Debug, Clone)]
pub struct HubService {
    store: Arc<dyn HubStore>,
    latest_max: u32,
}

impl HubService {
    /// Creates a new `HubService`. `latest_max` caps `/guides/latest`.
    #[must_use]
    pub fn new(store: Arc<dyn HubStore>, latest_max: u32) -> Self {
        Self { store, latest_max }
    }

    /// Seeds empty collections with development data.
    ///
    /// # Errors
    ///
    /// Returns a [`HubError`] if the store fails.
    pub async fn seed(&self) -> Result<SeedReport, HubError> {
        let report = seed::seed_if_empty(self.store.as_ref()).await?;
        tracing::info!(
            guides = report.guides,
            categories = report.categories,
            "seed data applied"
        );
        Ok(report)
    }

    /// Probes the storage backend.
    ///
    /// # Errors
    ///
    /// Returns [`HubError::Unavailable`] if the backend is unreachable.
    pub async fn health(&self) -> Result<(), HubError> {
        self.store.ping().await
    }

    /// Returns landing-page counters.
    ///
    /// # Errors
    ///
    /// Returns a [`HubError`] if the store fails.
    pub async fn stats(&self) -> Result<Stats, HubError> {
        let (guides, categories, technologies) = tokio::try_join!(
            self.store.count_guides(),
            self.store.count_categories(),
            self.store.count_distinct_tag_names(),
        )?;
        Ok(Stats {
            guides,
            categories,
            technologies,
        })
    }

    /// Returns the featured guide.
    ///
    /// # Errors
    ///
    /// Returns [`HubError::NoFeaturedGuide`] if no guide is featured.
    pub async fn featured_guide(&self) -> Result<Guide, HubError> {
        self.store
            .find_featured_guide()
            .await?
            .ok_or(HubError::NoFeaturedGuide)
    }

    /// Returns all categories with their guide counts.
    ///
    /// # Errors
    ///
    /// Returns a [`HubError`] if the store fails.
    pub async fn categories(&self) -> Result<Vec<CategoryWithCount>, HubError> {
        let categories = self.store.list_categories().await?;
        let mut result = Vec::with_capacity(categories.len());
        for category in categories {
            let guide_count = self.store.count_guides_in_category(category.id).await?;
            result.push(CategoryWithCount {
                category,
                guide_count,
            });
        }
        Ok(result)
    }

    /// Returns the newest guides.
    ///
    /// `None` means [`DEFAULT_LATEST_LIMIT`]. Values above the configured
    /// maximum are clamped.
    ///
    /// # Errors
    ///
    /// Returns [`HubError::InvalidRequest`] for a negative limit.
    pub async fn latest_guides(&self, limit: Option<i64>) -> Result<Vec<Guide>, HubError> {
        let requested = limit.unwrap_or(DEFAULT_LATEST_LIMIT);
        let Ok(requested) = u64::try_from(requested) else {
            return Err(HubError::InvalidRequest(
                "limit must not be negative".to_string(),
            ));
        };
        let effective = requested.min(u64::from(self.latest_max));
        self.store.latest_guides(effective).await
    }

    /// Returns one page of guides, newest first. `page` is 1-based.
    ///
    /// # Errors
    ///
    /// Returns a [`HubError`] if the store fails.
    pub async fn list_guides(&self, page: u32, per_page: u32) -> Result<GuidePage, HubError> {
        let offset = u64::from(page.saturating_sub(1)) * u64::from(per_page);
        let (guides, total) = tokio::try_join!(
            self.store.list_guides(offset, u64::from(per_page)),
            self.store.count_guides(),
        )?;
        Ok(GuidePage { guides, total })
    }

    /// Returns a single guide.
    ///
    /// # Errors
    ///
    /// Returns [`HubError::GuideNotFound`] if the guide does not exist.
    pub async fn get_guide(&self, id: GuideId) -> Result<Guide, HubError> {
        self.store
            .get_guide(id)
            .await?
            .ok_or(HubError::GuideNotFound(*id.as_uuid()))
    }

    /// Validates and stores a new guide.
    ///
    /// # Errors
    ///
    /// Returns [`HubError::InvalidRequest`] on validation failure and
    /// [`HubError::CategoryNotFound`] if `category_id` is unknown.
    pub async fn create_guide(&self, mut new: NewGuide) -> Result<Guide, HubError> {
        new.normalize();
        new.validate()?;

        if let Some(category_id) = new.category_id
            && self.store.get_category(category_id).await?.is_none()
        {
            return Err(HubError::CategoryNotFound(*category_id.as_uuid()));
        }

        let guide = new.into_guide(Utc::now());
        self.store.insert_guide(guide.clone()).await?;
        tracing::info!(guide_id = %guide.id, title = %guide.title, "guide created");
        Ok(guide)
    }

    /// Validates and stores a new category.
    ///
    /// # Errors
    ///
    /// Returns [`HubError::InvalidRequest`] on validation failure.
    pub async fn create_category(&self, mut new: NewCategory) -> Result<Category, HubError> {
        new.normalize();
        new.validate()?;

        let category = new.into_category();
        self.store.insert_category(category.clone()).await?;
        tracing::info!(category_id = %category.id, name = %category.name, "category created");
        Ok(category)
    }

    /// Adds `raw_email` to the newsletter list.
    ///
    /// # Errors
    ///
    /// Returns [`HubError::InvalidEmail`] for malformed input and
    /// [`HubError::AlreadySubscribed`] for a duplicate.
    pub async fn subscribe(&self, raw_email: &str) -> Result<Subscriber, HubError> {
        let email = Email::parse(raw_email)?;
        let subscriber = Subscriber::now(email);
        match self.store.insert_subscriber(subscriber.clone()).await {
            Ok(()) => {
                tracing::info!("newsletter subscription added");
                Ok(subscriber)
            }
            Err(HubError::AlreadySubscribed) => {
                tracing::debug!("duplicate newsletter subscription rejected");
                Err(HubError::AlreadySubscribed)
            }
            Err(e) => Err(e),
        }
    }
}
