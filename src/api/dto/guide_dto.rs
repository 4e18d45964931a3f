//! Guide listing DTOs.

use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use super::common_dto::PaginationMeta;
use crate::domain::Guide;

/// Query string for `GET /guides/latest`.
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct LatestGuidesQuery {
    /// Maximum number of guides to return. Defaults to 2.
    #[serde(default)]
    pub limit: Option<i64>,
}

/// Paginated list response for `GET /guides`.
#[derive(Debug, Serialize, ToSchema)]
pub struct GuideListResponse {
    /// Guides on this page, newest first.
    pub data: Vec<Guide>,
    /// Pagination metadata.
    pub pagination: PaginationMeta,
}
