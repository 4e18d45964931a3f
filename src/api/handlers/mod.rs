//! REST endpoint handlers organized by resource.

pub mod category;
pub mod guide;
pub mod newsletter;
pub mod stats;
pub mod system;

use axum::Router;

use crate::app_state::AppState;

/// Composes all resource routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .merge(stats::routes())
        .merge(guide::routes())
        .merge(category::routes())
        .merge(newsletter::routes())
}
