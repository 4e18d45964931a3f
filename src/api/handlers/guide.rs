//! Guide handlers: featured, latest, list, get, create.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};

use crate::api::dto::{GuideListResponse, LatestGuidesQuery, PaginationMeta, PaginationParams};
use crate::api::extract::{ApiJson, ApiQuery};
use crate::app_state::AppState;
use crate::domain::{Guide, GuideId, NewGuide};
use crate::error::{ErrorResponse, HubError};

/// `GET /guides/featured` — The guide shown in the hero slot.
///
/// # Errors
///
/// Returns [`HubError::NoFeaturedGuide`] if no guide is featured.
#[utoipa::path(
    get,
    path = "/guides/featured",
    tag = "Guides",
    summary = "Featured guide",
    responses(
        (status = 200, description = "The featured guide", body = Guide),
        (status = 404, description = "No featured guide found", body = ErrorResponse),
    )
)]
pub async fn featured_guide(State(state): State<AppState>) -> Result<Json<Guide>, HubError> {
    Ok(Json(state.hub_service.featured_guide().await?))
}

/// `GET /guides/latest` — Newest guides.
///
/// # Errors
///
/// Returns [`HubError::InvalidRequest`] for a negative or non-numeric
/// `limit`.
#[utoipa::path(
    get,
    path = "/guides/latest",
    tag = "Guides",
    summary = "Latest guides",
    description = "Returns the newest guides, newest first. `limit` defaults to 2 and is capped by the server.",
    params(LatestGuidesQuery),
    responses(
        (status = 200, description = "Newest guides", body = Vec<Guide>),
        (status = 400, description = "Invalid limit", body = ErrorResponse),
    )
)]
pub async fn latest_guides(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<LatestGuidesQuery>,
) -> Result<Json<Vec<Guide>>, HubError> {
    Ok(Json(state.hub_service.latest_guides(query.limit).await?))
}

/// `GET /guides` — Paginated guide list.
///
/// # Errors
///
/// Returns [`HubError::InvalidRequest`] for malformed paging parameters.
#[utoipa::path(
    get,
    path = "/guides",
    tag = "Guides",
    summary = "List guides",
    params(PaginationParams),
    responses(
        (status = 200, description = "Paginated guide list", body = GuideListResponse),
        (status = 400, description = "Malformed paging parameters", body = ErrorResponse),
    )
)]
pub async fn list_guides(
    State(state): State<AppState>,
    ApiQuery(params): ApiQuery<PaginationParams>,
) -> Result<Json<GuideListResponse>, HubError> {
    let params = params.clamped();
    let page = state
        .hub_service
        .list_guides(params.page, params.per_page)
        .await?;
    Ok(Json(GuideListResponse {
        data: page.guides,
        pagination: PaginationMeta::new(&params, page.total),
    }))
}

/// `GET /guides/{id}` — Single guide.
///
/// # Errors
///
/// Returns [`HubError::InvalidRequest`] for a malformed id and
/// [`HubError::GuideNotFound`] if the guide does not exist.
#[utoipa::path(
    get,
    path = "/guides/{id}",
    tag = "Guides",
    summary = "Get guide",
    params(
        ("id" = uuid::Uuid, Path, description = "Guide UUID"),
    ),
    responses(
        (status = 200, description = "Guide", body = Guide),
        (status = 400, description = "Malformed id", body = ErrorResponse),
        (status = 404, description = "Guide not found", body = ErrorResponse),
    )
)]
pub async fn get_guide(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<Guide>, HubError> {
    let id: GuideId = raw_id
        .parse()
        .map_err(|_| HubError::InvalidRequest(format!("invalid guide id: {raw_id}")))?;
    Ok(Json(state.hub_service.get_guide(id).await?))
}

/// `POST /guides` — Create a guide.
///
/// # Errors
///
/// Returns [`HubError::InvalidRequest`] for a malformed body or failed
/// validation, and [`HubError::CategoryNotFound`] for an unknown category.
#[utoipa::path(
    post,
    path = "/guides",
    tag = "Guides",
    summary = "Create guide",
    request_body = NewGuide,
    responses(
        (status = 201, description = "Guide created", body = Guide),
        (status = 400, description = "Validation failed", body = ErrorResponse),
        (status = 404, description = "Unknown category", body = ErrorResponse),
    )
)]
pub async fn create_guide(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<NewGuide>,
) -> Result<impl IntoResponse, HubError> {
    let guide = state.hub_service.create_guide(req).await?;
    Ok((StatusCode::CREATED, Json(guide)))
}

/// Guide routes. Static segments take precedence over `{id}`.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/guides", get(list_guides).post(create_guide))
        .route("/guides/featured", get(featured_guide))
        .route("/guides/latest", get(latest_guides))
        .route("/guides/{id}", get(get_guide))
}
