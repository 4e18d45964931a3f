//! OpenAPI document for the REST API.

use utoipa::OpenApi;

use super::dto::{GuideListResponse, MessageResponse, PaginationMeta};
use super::handlers::{category, guide, newsletter, stats, system};
use crate::domain::{
    Category, CategoryId, CategoryWithCount, Guide, GuideId, NewCategory, NewGuide, Stats, Tag,
};
use crate::error::{ErrorBody, ErrorResponse};

/// Aggregated OpenAPI description served at [`super::OPENAPI_PATH`].
#[derive(Debug, OpenApi)]
#[openapi(
    info(
        title = "Self-Hosting Hub API",
        description = "API for the self-hosting guide platform"
    ),
    paths(
        system::version_handler,
        system::health_handler,
        stats::stats,
        guide::featured_guide,
        guide::latest_guides,
        guide::list_guides,
        guide::get_guide,
        guide::create_guide,
        category::list_categories,
        category::create_category,
        newsletter::subscribe,
    ),
    components(schemas(
        Guide,
        GuideId,
        NewGuide,
        Tag,
        Category,
        CategoryId,
        CategoryWithCount,
        NewCategory,
        Stats,
        GuideListResponse,
        PaginationMeta,
        MessageResponse,
        ErrorResponse,
        ErrorBody,
        system::VersionResponse,
        system::HealthResponse,
    )),
    tags(
        (name = "System", description = "Banner, version and health"),
        (name = "Stats", description = "Landing page counters"),
        (name = "Guides", description = "Guides and tutorials"),
        (name = "Categories", description = "Guide categories"),
        (name = "Newsletter", description = "Newsletter subscriptions"),
    )
)]
pub struct ApiDoc;
