//! Service layer: business logic orchestration.
//!
//! [`HubService`] validates input, applies defaults and limits, and
//! delegates storage to a [`crate::persistence::HubStore`].

pub mod hub_service;

pub use hub_service::{GuidePage, HubService};
