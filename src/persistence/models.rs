//! Persisted models: PostgreSQL rows and MongoDB documents.

use bson::oid::ObjectId;
use bson::serde_helpers::chrono_datetime_as_bson_datetime;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use uuid::Uuid;

use crate::domain::{Category, CategoryId, Guide, GuideId, Subscriber, Tag};
use crate::error::HubError;

/// A row from the `guides` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct GuideRow {
    /// Guide UUID.
    pub id: Uuid,
    /// Title.
    pub title: String,
    /// Short summary.
    pub description: String,
    /// Optional article body.
    pub content: Option<String>,
    /// Icon class.
    pub icon: String,
    /// Accent color.
    pub color: String,
    /// Tags stored as a JSONB array.
    pub tags: Json<Vec<Tag>>,
    /// Featured flag.
    pub featured: bool,
    /// Owning category UUID.
    pub category_id: Option<Uuid>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl From<GuideRow> for Guide {
    fn from(row: GuideRow) -> Self {
        Self {
            id: GuideId::from_uuid(row.id),
            title: row.title,
            description: row.description,
            content: row.content,
            icon: row.icon,
            color: row.color,
            tags: row.tags.0,
            featured: row.featured,
            category_id: row.category_id.map(CategoryId::from_uuid),
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// A row from the `categories` table.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct CategoryRow {
    /// Category UUID.
    pub id: Uuid,
    /// Display name.
    pub name: String,
    /// Short summary.
    pub description: String,
    /// Icon class.
    pub icon: String,
    /// Accent color.
    pub color: String,
}

impl From<CategoryRow> for Category {
    fn from(row: CategoryRow) -> Self {
        Self {
            id: CategoryId::from_uuid(row.id),
            name: row.name,
            description: row.description,
            icon: row.icon,
            color: row.color,
        }
    }
}

fn parse_id<T: std::str::FromStr>(raw: &str, what: &str) -> Result<T, HubError> {
    raw.parse()
        .map_err(|_| HubError::Storage(format!("malformed {what} id {raw:?}")))
}

/// A document in the `guides` collection.
///
/// Identifiers are stored as UUID strings. `_id` is left to the driver and
/// only used to recover insertion order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GuideDocument {
    /// Driver-assigned object id.
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub object_id: Option<ObjectId>,
    /// Guide UUID as a string.
    pub id: String,
    /// Title.
    pub title: String,
    /// Short summary.
    pub description: String,
    /// Optional article body.
    #[serde(default)]
    pub content: Option<String>,
    /// Icon class.
    pub icon: String,
    /// Accent color.
    pub color: String,
    /// Embedded tag documents.
    #[serde(default)]
    pub tags: Vec<Tag>,
    /// Featured flag.
    #[serde(default)]
    pub featured: bool,
    /// Owning category UUID as a string.
    #[serde(default)]
    pub category_id: Option<String>,
    /// Creation timestamp (BSON datetime, millisecond precision).
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub updated_at: DateTime<Utc>,
}

impl From<&Guide> for GuideDocument {
    fn from(guide: &Guide) -> Self {
        Self {
            object_id: None,
            id: guide.id.to_string(),
            title: guide.title.clone(),
            description: guide.description.clone(),
            content: guide.content.clone(),
            icon: guide.icon.clone(),
            color: guide.color.clone(),
            tags: guide.tags.clone(),
            featured: guide.featured,
            category_id: guide.category_id.map(|id| id.to_string()),
            created_at: guide.created_at,
            updated_at: guide.updated_at,
        }
    }
}

impl TryFrom<GuideDocument> for Guide {
    type Error = HubError;

    fn try_from(doc: GuideDocument) -> Result<Self, Self::Error> {
        Ok(Self {
            id: parse_id(&doc.id, "guide")?,
            title: doc.title,
            description: doc.description,
            content: doc.content,
            icon: doc.icon,
            color: doc.color,
            tags: doc.tags,
            featured: doc.featured,
            category_id: doc
                .category_id
                .as_deref()
                .map(|raw| parse_id(raw, "category"))
                .transpose()?,
            created_at: doc.created_at,
            updated_at: doc.updated_at,
        })
    }
}

/// A document in the `categories` collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryDocument {
    /// Driver-assigned object id.
    #[serde(rename = "_id", default, skip_serializing_if = "Option::is_none")]
    pub object_id: Option<ObjectId>,
    /// Category UUID as a string.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Short summary.
    pub description: String,
    /// Icon class.
    pub icon: String,
    /// Accent color.
    pub color: String,
}

impl From<&Category> for CategoryDocument {
    fn from(category: &Category) -> Self {
        Self {
            object_id: None,
            id: category.id.to_string(),
            name: category.name.clone(),
            description: category.description.clone(),
            icon: category.icon.clone(),
            color: category.color.clone(),
        }
    }
}

impl TryFrom<CategoryDocument> for Category {
    type Error = HubError;

    fn try_from(doc: CategoryDocument) -> Result<Self, Self::Error> {
        Ok(Self {
            id: parse_id(&doc.id, "category")?,
            name: doc.name,
            description: doc.description,
            icon: doc.icon,
            color: doc.color,
        })
    }
}

/// A document in the `subscribers` collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubscriberDocument {
    /// Normalized address; unique.
    pub email: String,
    /// Subscription timestamp.
    #[serde(with = "chrono_datetime_as_bson_datetime")]
    pub subscribed_at: DateTime<Utc>,
}

impl From<&Subscriber> for SubscriberDocument {
    fn from(subscriber: &Subscriber) -> Self {
        Self {
            email: subscriber.email.as_str().to_string(),
            subscribed_at: subscriber.subscribed_at,
        }
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn guide_document_keeps_string_ids() {
        let category = CategoryId::new();
        let mut guide = Guide {
            id: GuideId::new(),
            title: "Immich".to_string(),
            description: "Fotos".to_string(),
            content: None,
            icon: "fas fa-book".to_string(),
            color: "blue".to_string(),
            tags: vec![Tag::new("Docker", "blue")],
            featured: false,
            category_id: Some(category),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let doc = GuideDocument::from(&guide);
        assert_eq!(doc.id, guide.id.to_string());
        assert_eq!(doc.category_id, Some(category.to_string()));
        assert!(doc.object_id.is_none());

        let Ok(back) = Guide::try_from(doc) else {
            panic!("document must convert back");
        };
        guide.created_at = back.created_at;
        guide.updated_at = back.updated_at;
        assert_eq!(back, guide);
    }

    #[test]
    fn malformed_document_id_is_a_storage_error() {
        let doc = CategoryDocument {
            object_id: None,
            id: "not-a-uuid".to_string(),
            name: "n".to_string(),
            description: "d".to_string(),
            icon: "i".to_string(),
            color: "c".to_string(),
        };
        assert!(matches!(Category::try_from(doc), Err(HubError::Storage(_))));
    }

    #[test]
    fn guide_document_serializes_timestamps_as_bson_dates() {
        let doc = GuideDocument {
            object_id: None,
            id: GuideId::new().to_string(),
            title: "t".to_string(),
            description: "d".to_string(),
            content: None,
            icon: "i".to_string(),
            color: "c".to_string(),
            tags: Vec::new(),
            featured: true,
            category_id: None,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let Ok(bson) = bson::to_document(&doc) else {
            panic!("document must serialize");
        };
        assert!(!bson.contains_key("_id"));
        assert!(matches!(
            bson.get("created_at"),
            Some(bson::Bson::DateTime(_))
        ));
        assert!(matches!(bson.get_bool("featured"), Ok(true)));
    }
}
