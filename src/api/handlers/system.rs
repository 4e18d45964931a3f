//! System endpoints: banner, version, health check.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use chrono::Utc;
use serde::Serialize;
use utoipa::ToSchema;

use crate::api::dto::MessageResponse;
use crate::app_state::AppState;
use crate::error::{ErrorResponse, HubError};

/// Banner returned by `GET /`.
pub const API_BANNER: &str = "Self-Hosting Hub API";

/// Version response.
#[derive(Debug, Serialize, ToSchema)]
pub struct VersionResponse {
    /// Crate version.
    pub version: String,
}

/// Health check response.
#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    /// Always `"healthy"` when returned with 200.
    pub status: String,
    /// Server time as an RFC 3339 timestamp.
    pub timestamp: String,
    /// Crate version.
    pub version: String,
}

/// `GET /` — Service banner.
pub async fn root_handler() -> impl IntoResponse {
    Json(MessageResponse::new(API_BANNER))
}

/// `GET /version` — API version.
#[utoipa::path(
    get,
    path = "/version",
    tag = "System",
    summary = "API version",
    responses(
        (status = 200, description = "Current API version", body = VersionResponse),
    )
)]
pub async fn version_handler() -> impl IntoResponse {
    Json(VersionResponse {
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// `GET /health` — Service health status.
///
/// # Errors
///
/// Returns [`HubError::Unavailable`] when the store cannot be reached.
#[utoipa::path(
    get,
    path = "/health",
    tag = "System",
    summary = "Health check",
    description = "Returns service health status, version, and current timestamp. Fails with 503 when the database is unreachable.",
    responses(
        (status = 200, description = "Service is healthy", body = HealthResponse),
        (status = 503, description = "Storage backend unreachable", body = ErrorResponse),
    )
)]
pub async fn health_handler(
    State(state): State<AppState>,
) -> Result<impl IntoResponse, HubError> {
    state.hub_service.health().await?;
    Ok((
        StatusCode::OK,
        Json(HealthResponse {
            status: "healthy".to_string(),
            timestamp: Utc::now().to_rfc3339(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }),
    ))
}

/// System routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(root_handler))
        .route("/version", get(version_handler))
        .route("/health", get(health_handler))
}
