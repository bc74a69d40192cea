//! Cache Module
//!
//! Bounded LRU cache with per-entry creation timestamps and age-based expiry.

mod clock;
mod entry;
mod list;
mod stats;
mod store;

#[cfg(test)]
mod property_tests;

// Re-export public types
pub use clock::{Clock, ManualClock, SystemClock};
pub use entry::EntryInfo;
pub use stats::CacheStats;
pub use store::BoundedExpiringCache;

// == Public Constants ==
/// Capacity used when none is configured
pub const DEFAULT_CAPACITY: usize = 5;
