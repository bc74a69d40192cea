//! Expiring Cache - a bounded LRU cache with age-based expiry
//!
//! The core type is [`cache::BoundedExpiringCache`]; the `api` and `tasks`
//! modules expose one instance over HTTP and sweep it in the background.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod models;
pub mod tasks;

pub use api::AppState;
pub use cache::{BoundedExpiringCache, Clock, EntryInfo, ManualClock, SystemClock};
pub use config::Config;
pub use error::CacheError;
pub use tasks::spawn_sweep_task;
