//! Cache Entry Module
//!
//! Defines the owned entry stored in the cache and the snapshot handed
//! back to callers.

use chrono::{DateTime, Duration, SecondsFormat, Utc};
use serde::Serialize;

// == Cache Entry ==
/// A key/value pair owned by the cache, stamped with its creation time.
///
/// Never leaves the cache; callers only see [`EntryInfo`] copies.
#[derive(Debug)]
pub(crate) struct Entry<K, V> {
    pub(crate) key: K,
    pub(crate) value: V,
    pub(crate) created_at: DateTime<Utc>,
}

impl<K, V> Entry<K, V> {
    // == Constructor ==
    pub(crate) fn new(key: K, value: V, created_at: DateTime<Utc>) -> Self {
        Self {
            key,
            value,
            created_at,
        }
    }

    // == Age ==
    /// Time elapsed between creation and `now`.
    ///
    /// Negative if `now` lies before the creation time (clock stepped back).
    pub(crate) fn age(&self, now: DateTime<Utc>) -> Duration {
        now - self.created_at
    }

    // == Is Older Than ==
    /// Returns true when the entry's age is strictly greater than `max_age`.
    ///
    /// An entry exactly `max_age` old is still considered fresh.
    pub(crate) fn is_older_than(&self, now: DateTime<Utc>, max_age: Duration) -> bool {
        self.age(now) > max_age
    }
}

impl<K: Clone, V: Clone> Entry<K, V> {
    /// Copies the entry out as a caller-facing snapshot.
    pub(crate) fn info(&self) -> EntryInfo<K, V> {
        EntryInfo {
            key: self.key.clone(),
            value: self.value.clone(),
            created_at: self.created_at,
        }
    }
}

// == Entry Info ==
/// Snapshot of a cache entry returned by `get` and `view`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntryInfo<K, V> {
    /// The lookup key
    pub key: K,
    /// The stored value
    pub value: V,
    /// When the entry was inserted (serialized as RFC 3339)
    pub created_at: DateTime<Utc>,
}

impl<K, V> EntryInfo<K, V> {
    /// Creation time formatted as an ISO-8601 / RFC 3339 string.
    pub fn created_at_iso(&self) -> String {
        self.created_at.to_rfc3339_opts(SecondsFormat::Millis, true)
    }
}
