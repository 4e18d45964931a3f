//! # selfhost-hub
//!
//! REST API backend for the Self-Hosting Hub guide platform.
//!
//! Serves guides, categories, landing-page counters and newsletter
//! subscriptions. Storage is pluggable: MongoDB when `MONGODB_URL` is set,
//! PostgreSQL when only `DATABASE_URL` is set, an in-process store otherwise.
//!
//! ## Architecture
//!
//! ```text
//! Clients (HTTP)
//!     │
//!     ├── REST Handlers (api/)
//!     │
//!     ├── HubService (service/)
//!     │
//!     ├── HubStore trait (persistence/)
//!     │     ├── MemoryStore
//!     │     ├── MongoStore
//!     │     └── PostgresStore
//!     │
//!     └── MongoDB / PostgreSQL
//! ```

pub mod api;
pub mod app_state;
pub mod config;
pub mod domain;
pub mod error;
pub mod persistence;
pub mod service;
