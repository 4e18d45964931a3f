//! In-process storage backend.
//!
//! [`MemoryStore`] keeps every collection behind its own
//! [`tokio::sync::RwLock`], so reads of one collection never wait on writes
//! to another. Data is lost when the process exits.

use std::collections::{HashMap, HashSet};

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::HubStore;
use crate::domain::{Category, CategoryId, Email, Guide, GuideId, Subscriber};
use crate::error::HubError;

/// Volatile store used when no database URL is configured.
///
/// # Concurrency
///
/// - Guides, categories and subscribers are locked independently.
/// - Subscriber insertion checks and inserts under one write lock.
#[derive(Debug, Default)]
pub struct MemoryStore {
    guides: RwLock<Vec<Guide>>,
    categories: RwLock<Vec<Category>>,
    subscribers: RwLock<HashMap<Email, Subscriber>>,
}

impl MemoryStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub(crate) async fn subscriber_count(&self) -> usize {
        self.subscribers.read().await.len()
    }
}

#[async_trait]
impl HubStore for MemoryStore {
    async fn ping(&self) -> Result<(), HubError> {
        Ok(())
    }

    async fn count_guides(&self) -> Result<u64, HubError> {
        Ok(self.guides.read().await.len() as u64)
    }

    async fn count_categories(&self) -> Result<u64, HubError> {
        Ok(self.categories.read().await.len() as u64)
    }

    async fn count_distinct_tag_names(&self) -> Result<u64, HubError> {
        let guides = self.guides.read().await;
        let names: HashSet<&str> = guides
            .iter()
            .flat_map(|g| g.tags.iter().map(|t| t.name.as_str()))
            .collect();
        Ok(names.len() as u64)
    }

    async fn insert_guides(&self, guides: Vec<Guide>) -> Result<(), HubError> {
        let mut stored = self.guides.write().await;
        for guide in &guides {
            if stored.iter().any(|g| g.id == guide.id) {
                return Err(HubError::Storage(format!("guide {} already exists", guide.id)));
            }
        }
        stored.extend(guides);
        Ok(())
    }

    async fn get_guide(&self, id: GuideId) -> Result<Option<Guide>, HubError> {
        let guides = self.guides.read().await;
        Ok(guides.iter().find(|g| g.id == id).cloned())
    }

    async fn find_featured_guide(&self) -> Result<Option<Guide>, HubError> {
        let guides = self.guides.read().await;
        Ok(guides.iter().find(|g| g.featured).cloned())
    }

    async fn list_guides(&self, offset: u64, limit: u64) -> Result<Vec<Guide>, HubError> {
        let guides = self.guides.read().await;
        // Reverse first so the stable sort leaves later inserts ahead on ties.
        let mut ordered: Vec<&Guide> = guides.iter().rev().collect();
        ordered.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        let offset = usize::try_from(offset).unwrap_or(usize::MAX);
        let limit = usize::try_from(limit).unwrap_or(usize::MAX);
        Ok(ordered
            .into_iter()
            .skip(offset)
            .take(limit)
            .cloned()
            .collect())
    }

    async fn insert_categories(&self, categories: Vec<Category>) -> Result<(), HubError> {
        let mut stored = self.categories.write().await;
        for category in &categories {
            if stored.iter().any(|c| c.id == category.id) {
                return Err(HubError::Storage(format!(
                    "category {} already exists",
                    category.id
                )));
            }
        }
        stored.extend(categories);
        Ok(())
    }

    async fn get_category(&self, id: CategoryId) -> Result<Option<Category>, HubError> {
        let categories = self.categories.read().await;
        Ok(categories.iter().find(|c| c.id == id).cloned())
    }

    async fn list_categories(&self) -> Result<Vec<Category>, HubError> {
        Ok(self.categories.read().await.clone())
    }

    async fn count_guides_in_category(&self, id: CategoryId) -> Result<u64, HubError> {
        let guides = self.guides.read().await;
        Ok(guides.iter().filter(|g| g.category_id == Some(id)).count() as u64)
    }

    async fn insert_subscriber(&self, subscriber: Subscriber) -> Result<(), HubError> {
        let mut subscribers = self.subscribers.write().await;
        if subscribers.contains_key(&subscriber.email) {
            return Err(HubError::AlreadySubscribed);
        }
        subscribers.insert(subscriber.email.clone(), subscriber);
        Ok(())
    }
}
