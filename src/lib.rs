//! Family Records - parent/child record service
//!
//! CRUD over HTTP with a read-through cache in front of the list endpoints
//! and mutation-driven invalidation.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod service;
pub mod store;
pub mod tasks;

pub use api::{create_router, AppState};
pub use config::Config;
pub use service::RecordService;
pub use tasks::spawn_cleanup_task;
