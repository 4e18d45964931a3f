//! Guide categories.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use super::CategoryId;
use super::guide::default_color;

/// Default Font Awesome icon for categories.
pub const DEFAULT_CATEGORY_ICON: &str = "fas fa-tag";

fn default_category_icon() -> String {
    DEFAULT_CATEGORY_ICON.to_string()
}

/// A stored category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Category {
    /// Category identifier.
    pub id: CategoryId,
    /// Display name.
    pub name: String,
    /// Short summary.
    pub description: String,
    /// Font Awesome icon class.
    pub icon: String,
    /// Accent color.
    pub color: String,
}

/// Client-supplied fields for creating a category.
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct NewCategory {
    /// Display name.
    #[validate(length(min = 1, max = 100))]
    pub name: String,
    /// Short summary.
    #[validate(length(min = 1, max = 2000))]
    pub description: String,
    /// Font Awesome icon class.
    #[serde(default = "default_category_icon")]
    pub icon: String,
    /// Accent color.
    #[serde(default = "default_color")]
    pub color: String,
}

impl NewCategory {
    /// Trims free-text fields in place.
    pub fn normalize(&mut self) {
        self.name = self.name.trim().to_string();
        self.description = self.description.trim().to_string();
    }

    /// Materializes a [`Category`] with a fresh identifier.
    #[must_use]
    pub fn into_category(self) -> Category {
        Category {
            id: CategoryId::new(),
            name: self.name,
            description: self.description,
            icon: self.icon,
            color: self.color,
        }
    }
}

/// A category together with the number of guides referencing it.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct CategoryWithCount {
    /// The category.
    #[serde(flatten)]
    pub category: Category,
    /// Number of guides whose `category_id` equals this category's id.
    pub guide_count: u64,
}
