//! Shared application state injected into all Axum handlers.

use crate::service::HubService;

/// Shared application state available to all handlers via Axum's
/// `State` extractor.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Hub service for all business logic.
    pub hub_service: HubService,
}
