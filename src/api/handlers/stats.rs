//! Landing-page counters.

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};

use crate::app_state::AppState;
use crate::domain::Stats;
use crate::error::HubError;

/// `GET /stats` — Guide, category and technology counts.
///
/// # Errors
///
/// Returns [`HubError`] on storage failure.
#[utoipa::path(
    get,
    path = "/stats",
    tag = "Stats",
    summary = "Landing page counters",
    description = "`technologies` is the number of distinct tag names across all guides.",
    responses(
        (status = 200, description = "Counters", body = Stats),
    )
)]
pub async fn stats(State(state): State<AppState>) -> Result<Json<Stats>, HubError> {
    Ok(Json(state.hub_service.stats().await?))
}

/// Stats routes.
pub fn routes() -> Router<AppState> {
    Router::new().route("/stats", get(stats))
}
