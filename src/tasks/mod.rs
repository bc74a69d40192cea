//! Background Tasks Module
//!
//! Contains background tasks that run periodically during server operation.
//!
//! # Tasks
//! - Expiry sweep: removes entries older than the configured maximum age

mod sweep;

pub use sweep::{spawn_sweep_task, SharedCache};
