//! Guides and their technology tags.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::{CategoryId, GuideId};

/// Default accent color for guides, tags and categories.
pub const DEFAULT_COLOR: &str = "blue";

/// Default Font Awesome icon for guides.
pub const DEFAULT_GUIDE_ICON: &str = "fas fa-book";

pub(crate) fn default_color() -> String {
    DEFAULT_COLOR.to_string()
}

fn default_guide_icon() -> String {
    DEFAULT_GUIDE_ICON.to_string()
}

/// Technology tag attached to a guide (e.g. `Docker`, `MySQL`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate, ToSchema)]
pub struct Tag {
    /// Technology name. Distinct names are counted as technologies.
    #[validate(length(min = 1, max = 50))]
    pub name: String,
    /// Display color.
    #[serde(default = "default_color")]
    pub color: String,
}

impl Tag {
    /// Creates a tag with the given name and color.
    #[must_use]
    pub fn new(name: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            color: color.into(),
        }
    }
}

/// A stored guide.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Guide {
    /// Guide identifier.
    pub id: GuideId,
    /// Title shown on cards.
    pub title: String,
    /// Short summary.
    pub description: String,
    /// Full article body, if any.
    pub content: Option<String>,
    /// Font Awesome icon class.
    pub icon: String,
    /// Accent color.
    pub color: String,
    /// Technology tags.
    pub tags: Vec<Tag>,
    /// Whether this guide is shown in the hero slot.
    pub featured: bool,
    /// Owning category, if assigned.
    pub category_id: Option<CategoryId>,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// Client-supplied fields for creating a guide.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct NewGuide {
    /// Title shown on cards.
    #[validate(length(min = 1, max = 200))]
    pub title: String,
    /// Short summary.
    #[validate(length(min = 1, max = 2000))]
    pub description: String,
    /// Full article body.
    #[serde(default)]
    pub content: Option<String>,
    /// Font Awesome icon class.
    #[serde(default = "default_guide_icon")]
    pub icon: String,
    /// Accent color.
    #[serde(default = "default_color")]
    pub color: String,
    /// Technology tags.
    #[serde(default)]
    #[validate(nested)]
    pub tags: Vec<Tag>,
    /// Featured flag.
    #[serde(default)]
    pub featured: bool,
    /// Owning category.
    #[serde(default)]
    pub category_id: Option<CategoryId>,
}

impl NewGuide {
    /// Trims free-text fields in place so length limits apply to content.
    pub fn normalize(&mut self) {
        self.title = self.title.trim().to_string();
        self.description = self.description.trim().to_string();
        for tag in &mut self.tags {
            tag.name = tag.name.trim().to_string();
        }
    }

    /// Materializes a [`Guide`] stamped with `now`.
    #[must_use]
    pub fn into_guide(self, now: DateTime<Utc>) -> Guide {
        Guide {
            id: GuideId::new(),
            title: self.title,
            description: self.description,
            content: self.content,
            icon: self.icon,
            color: self.color,
            tags: self.tags,
            featured: self.featured,
            category_id: self.category_id,
            created_at: now,
            updated_at: now,
        }
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn new_guide_applies_defaults() {
        let Ok(new) = serde_json::from_str::<NewGuide>(
            r#"{"title":"Pi-hole","description":"DNS filtering","tags":[{"name":"DNS"}]}"#,
        ) else {
            panic!("minimal body must parse");
        };
        assert_eq!(new.icon, DEFAULT_GUIDE_ICON);
        assert_eq!(new.color, DEFAULT_COLOR);
        assert!(!new.featured);
        assert_eq!(new.tags.first().map(|t| t.color.as_str()), Some("blue"));
    }

    #[test]
    fn blank_title_fails_after_normalize() {
        let Ok(mut new) =
            serde_json::from_str::<NewGuide>(r#"{"title":"   ","description":"x"}"#)
        else {
            panic!("body must parse");
        };
        new.normalize();
        assert!(new.validate().is_err());
    }

    #[test]
    fn empty_tag_name_is_rejected() {
        let Ok(mut new) = serde_json::from_str::<NewGuide>(
            r#"{"title":"t","description":"d","tags":[{"name":""}]}"#,
        ) else {
            panic!("body must parse");
        };
        new.normalize();
        assert!(new.validate().is_err());
    }

    #[test]
    fn into_guide_stamps_both_timestamps() {
        let Ok(new) = serde_json::from_str::<NewGuide>(r#"{"title":"t","description":"d"}"#)
        else {
            panic!("body must parse");
        };
        let now = Utc::now();
        let guide = new.into_guide(now);
        assert_eq!(guide.created_at, now);
        assert_eq!(guide.updated_at, now);
    }
}
