//! REST API layer: route handlers, DTOs, OpenAPI document and router
//! composition.
//!
//! Resource routes are mounted at the root (`/guides`, `/categories`, …)
//! because the web frontend calls them without a prefix.

pub mod dto;
pub mod extract;
pub mod handlers;
pub mod openapi;

use std::time::Duration;

use axum::Router;
#[cfg(not(feature = "swagger-ui"))]
use axum::routing::get;
use tower_http::cors::CorsLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;

use crate::app_state::AppState;
use openapi::ApiDoc;

/// Path of the generated OpenAPI document.
pub const OPENAPI_PATH: &str = "/api-docs/openapi.json";

/// Builds the complete API router with all REST endpoints.
pub fn build_router() -> Router<AppState> {
    let router = Router::new()
        .merge(handlers::routes())
        .merge(handlers::system::routes());

    #[cfg(feature = "swagger-ui")]
    let router = router
        .merge(utoipa_swagger_ui::SwaggerUi::new("/swagger-ui").url(OPENAPI_PATH, ApiDoc::openapi()));

    #[cfg(not(feature = "swagger-ui"))]
    let router = router.route(OPENAPI_PATH, get(openapi_json));

    router
}

#[cfg(not(feature = "swagger-ui"))]
async fn openapi_json() -> axum::Json<utoipa::openapi::OpenApi> {
    axum::Json(ApiDoc::openapi())
}

/// Builds the served application: routes, middleware and state.
///
/// Layers: request timeout, HTTP tracing spans, permissive CORS (any
/// origin, method and header).
pub fn app(state: AppState, request_timeout: Duration) -> Router {
    build_router()
        .layer(TimeoutLayer::new(request_timeout))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
