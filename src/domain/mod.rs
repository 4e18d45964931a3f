//! Domain layer: guides, categories, subscribers and their identifiers.
//!
//! Plain data types shared by the store, service and API layers. Input
//! types (`NewGuide`, `NewCategory`) carry their own validation rules.

pub mod category;
pub mod guide;
pub mod ids;
pub mod stats;
pub mod subscriber;

pub use category::{Category, CategoryWithCount, NewCategory};
pub use guide::{Guide, NewGuide, Tag};
pub use ids::{CategoryId, GuideId};
pub use stats::Stats;
pub use subscriber::{Email, Subscriber};
