//! Data Transfer Objects for REST request/response serialization.
//!
//! Domain types that are returned as-is (`Guide`, `Category`, `Stats`)
//! serialize directly; the types here cover query strings, envelopes and
//! simple message bodies.

pub mod common_dto;
pub mod guide_dto;
pub mod newsletter_dto;

pub use common_dto::*;
pub use guide_dto::*;
pub use newsletter_dto::*;
