//! Development seed data.
//!
//! On startup the service inserts a small set of guides and categories so
//! that a fresh deployment renders a populated landing page. Each
//! collection is seeded only while it is empty.

use chrono::{DateTime, Utc};

use super::HubStore;
use crate::domain::{Category, CategoryId, Guide, GuideId, Tag};
use crate::error::HubError;

/// Number of records inserted by [`seed_if_empty`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeedReport {
    /// Guides inserted.
    pub guides: usize,
    /// Categories inserted.
    pub categories: usize,
}

/// Development guides, all stamped with `now`.
#[must_use]
pub fn development_guides(now: DateTime<Utc>) -> Vec<Guide> {
    vec![
        Guide {
            id: GuideId::new(),
            title: "Nextcloud mit Redis & MySQL".to_string(),
            description: "Komplettanleitung für eine performante Nextcloud-Installation mit \
                          Docker, Redis Caching und MySQL-Datenbank."
                .to_string(),
            content: None,
            icon: "fas fa-cloud".to_string(),
            color: "blue".to_string(),
            tags: vec![
                Tag::new("Docker", "blue"),
                Tag::new("MySQL", "green"),
                Tag::new("Redis", "red"),
            ],
            featured: true,
            category_id: None,
            created_at: now,
            updated_at: now,
        },
        Guide {
            id: GuideId::new(),
            title: "Sicherheit mit Fail2Ban".to_string(),
            description: "So schützt du deine Server vor Brute-Force-Angriffen mit Fail2Ban \
                          und automatisierten Regeln."
                .to_string(),
            content: None,
            icon: "fas fa-shield-alt".to_string(),
            color: "green".to_string(),
            tags: vec![Tag::new("Sicherheit", "gray"), Tag::new("Ubuntu", "yellow")],
            featured: false,
            category_id: None,
            created_at: now,
            updated_at: now,
        },
    ]
}

/// Development categories.
#[must_use]
pub fn development_categories() -> Vec<Category> {
    let category = |name: &str, description: &str, icon: &str, color: &str| Category {
        id: CategoryId::new(),
        name: name.to_string(),
        description: description.to_string(),
        icon: icon.to_string(),
        color: color.to_string(),
    };
    vec![
        category(
            "Cloud & Storage",
            "Nextcloud, Owncloud, Samba und andere Speicherlösungen für deine Daten.",
            "fas fa-cloud",
            "blue",
        ),
        category(
            "Datenbanken",
            "MySQL, PostgreSQL, MongoDB und andere Datenbank-Systeme.",
            "fas fa-database",
            "green",
        ),
        category(
            "Container",
            "Docker, Portainer, LXC und andere Container-Technologien.",
            "fas fa-boxes",
            "purple",
        ),
    ]
}

/// Inserts development data into each empty collection.
///
/// # Errors
///
/// Returns a [`HubError`] if counting or inserting fails.
pub async fn seed_if_empty(store: &dyn HubStore) -> Result<SeedReport, HubError> {
    let mut report = SeedReport::default();

    if store.count_guides().await? == 0 {
        let guides = development_guides(Utc::now());
        report.guides = guides.len();
        store.insert_guides(guides).await?;
    }

    if store.count_categories().await? == 0 {
        let categories = development_categories();
        report.categories = categories.len();
        store.insert_categories(categories).await?;
    }

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::persistence::MemoryStore;

    #[tokio::test]
    async fn seeds_empty_store() {
        let store = MemoryStore::new();
        let report = seed_if_empty(&store).await;
        assert!(matches!(
            report,
            Ok(SeedReport {
                guides: 2,
                categories: 3
            })
        ));
        assert!(matches!(store.count_distinct_tag_names().await, Ok(5)));
    }

    #[tokio::test]
    async fn second_run_inserts_nothing() {
        let store = MemoryStore::new();
        let _ = seed_if_empty(&store).await;
        let again = seed_if_empty(&store).await;
        assert!(matches!(again, Ok(r) if r == SeedReport::default()));
        assert!(matches!(store.count_guides().await, Ok(2)));
        assert!(matches!(store.count_categories().await, Ok(3)));
    }

    #[tokio::test]
    async fn collections_are_seeded_independently() {
        let store = MemoryStore::new();
        let _ = store.insert_categories(development_categories()).await;

        let report = seed_if_empty(&store).await;
        assert!(matches!(
            report,
            Ok(SeedReport {
                guides: 2,
                categories: 0
            })
        ));
        assert!(matches!(store.count_categories().await, Ok(3)));
    }

    #[test]
    fn exactly_one_development_guide_is_featured() {
        let guides = development_guides(Utc::now());
        assert_eq!(guides.iter().filter(|g| g.featured).count(), 1);
    }
}
