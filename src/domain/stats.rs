//! Platform-wide counters shown on the landing page.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Aggregate counts for the landing page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Stats {
    /// Number of guides.
    pub guides: u64,
    /// Number of categories.
    pub categories: u64,
    /// Number of distinct tag names across all guides.
    pub technologies: u64,
}
