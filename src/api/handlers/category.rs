//! Category handlers.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};

use crate::api::extract::ApiJson;
use crate::app_state::AppState;
use crate::domain::{Category, CategoryWithCount, NewCategory};
use crate::error::{ErrorResponse, HubError};

/// `GET /categories` — All categories with guide counts.
///
/// # Errors
///
/// Returns [`HubError`] on storage failure.
#[utoipa::path(
    get,
    path = "/categories",
    tag = "Categories",
    summary = "List categories",
    responses(
        (status = 200, description = "Categories with guide counts", body = Vec<CategoryWithCount>),
    )
)]
pub async fn list_categories(
    State(state): State<AppState>,
) -> Result<Json<Vec<CategoryWithCount>>, HubError> {
    Ok(Json(state.hub_service.categories().await?))
}

/// `POST /categories` — Create a category.
///
/// # Errors
///
/// Returns [`HubError::InvalidRequest`] for a malformed body or failed
/// validation.
#[utoipa::path(
    post,
    path = "/categories",
    tag = "Categories",
    summary = "Create category",
    request_body = NewCategory,
    responses(
        (status = 201, description = "Category created", body = Category),
        (status = 400, description = "Validation failed", body = ErrorResponse),
    )
)]
pub async fn create_category(
    State(state): State<AppState>,
    ApiJson(req): ApiJson<NewCategory>,
) -> Result<impl IntoResponse, HubError> {
    let category = state.hub_service.create_category(req).await?;
    Ok((StatusCode::CREATED, Json(category)))
}

/// Category routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/categories", get(list_categories).post(create_category))
}
