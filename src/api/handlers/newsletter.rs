//! Newsletter subscription.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::post;
use axum::{Json, Router};

use crate::api::dto::{MessageResponse, SubscribeQuery};
use crate::api::extract::ApiQuery;
use crate::app_state::AppState;
use crate::error::{ErrorResponse, HubError};

/// `POST /newsletter/subscribe?email=…` — Join the newsletter.
///
/// # Errors
///
/// Returns [`HubError::InvalidEmail`] for a missing or malformed address
/// and [`HubError::AlreadySubscribed`] for a duplicate.
#[utoipa::path(
    post,
    path = "/newsletter/subscribe",
    tag = "Newsletter",
    summary = "Subscribe to the newsletter",
    params(SubscribeQuery),
    responses(
        (status = 201, description = "Subscription successful", body = MessageResponse),
        (status = 400, description = "Email already subscribed", body = ErrorResponse),
        (status = 422, description = "Invalid email address", body = ErrorResponse),
    )
)]
pub async fn subscribe(
    State(state): State<AppState>,
    ApiQuery(query): ApiQuery<SubscribeQuery>,
) -> Result<impl IntoResponse, HubError> {
    let email = query.email.unwrap_or_default();
    state.hub_service.subscribe(&email).await?;
    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new("Subscription successful")),
    ))
}

/// Newsletter routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/newsletter/subscribe", post(subscribe))
}
