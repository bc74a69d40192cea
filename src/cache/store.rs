//! Cache Store Module
//!
//! Main cache engine combining a HashMap index with the recency list and
//! per-entry creation timestamps.

use std::borrow::Borrow;
use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;
use std::time::Duration as StdDuration;

use chrono::Duration;
use tracing::debug;

use crate::cache::entry::Entry;
use crate::cache::list::RecencyList;
use crate::cache::{CacheStats, Clock, EntryInfo, SystemClock};
use crate::error::{CacheError, Result};

// == Bounded Expiring Cache ==
/// Fixed-capacity LRU cache whose entries can be swept by age.
///
/// The index and the recency list always hold the same set of keys; every
/// method that touches one updates the other before returning.
#[derive(Debug)]
pub struct BoundedExpiringCache<K, V, C = SystemClock> {
    /// Key to arena slot lookup
    index: HashMap<K, usize>,
    /// Entries ordered from least to most recently used
    list: RecencyList<K, V>,
    /// Performance statistics
    stats: CacheStats,
    /// Maximum number of entries retained
    capacity: usize,
    /// Time source for creation stamps and ages
    clock: C,
}

impl<K, V> BoundedExpiringCache<K, V, SystemClock>
where
    K: Eq + Hash + Clone + Debug,
    V: Clone,
{
    // == Constructor ==
    /// Creates a cache stamped by the system clock.
    ///
    /// # Errors
    /// `CacheError::InvalidCapacity` when `capacity` is zero.
    pub fn new(capacity: usize) -> Result<Self> {
        Self::with_clock(capacity, SystemClock)
    }
}

impl<K, V, C> BoundedExpiringCache<K, V, C>
where
    K: Eq + Hash + Clone + Debug,
    V: Clone,
    C: Clock,
{
    /// Creates a cache that reads time from `clock`.
    ///
    /// # Errors
    /// `CacheError::InvalidCapacity` when `capacity` is zero.
    pub fn with_clock(capacity: usize, clock: C) -> Result<Self> {
        if capacity == 0 {
            return Err(CacheError::InvalidCapacity(capacity));
        }

        Ok(Self {
            index: HashMap::new(),
            list: RecencyList::new(),
            stats: CacheStats::new(),
            capacity,
            clock,
        })
    }

    // == Put ==
    /// Stores `value` under `key` as the most recently used entry.
    ///
    /// An existing entry for `key` is dropped first, so the new entry gets a
    /// fresh creation time. If the insert pushes the cache over capacity the
    /// least recently used entry is evicted.
    pub fn put(&mut self, key: K, value: V) {
        if let Some(idx) = self.index.remove(&key) {
            self.list.remove(idx);
        }

        let entry = Entry::new(key.clone(), value, self.clock.now());
        let idx = self.list.push_back(entry);
        self.index.insert(key, idx);

        if self.index.len() > self.capacity {
            self.evict_lru();
        }

        self.stats.set_total_entries(self.index.len());
    }

    // == Get ==
    /// Returns a snapshot of the entry for `key` and marks it most recently used.
    ///
    /// The entry's creation time is left untouched.
    ///
    /// # Errors
    /// `CacheError::KeyNotFound` if `key` is absent; the cache is not modified.
    pub fn get<Q>(&mut self, key: &Q) -> Result<EntryInfo<K, V>>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + Debug + ?Sized,
    {
        let Some(&idx) = self.index.get(key) else {
            self.stats.record_miss();
            return Err(CacheError::KeyNotFound(format!("{key:?}")));
        };

        self.list.move_to_back(idx);
        self.stats.record_hit();

        self.list
            .get(idx)
            .map(Entry::info)
            .ok_or_else(|| CacheError::Internal(format!("index points at empty slot {idx}")))
    }

    // == View ==
    /// Snapshot of every entry, most recently used first.
    ///
    /// Does not change recency order.
    pub fn view(&self) -> Vec<EntryInfo<K, V>> {
        self.list.iter_rev().map(Entry::info).collect()
    }

    // == Remove Expired ==
    /// Removes every entry whose age is strictly greater than `max_age`.
    ///
    /// Scans the whole list: a `get` refreshes recency but not the creation
    /// time, so list position says nothing about age.
    ///
    /// Returns the number of entries removed.
    pub fn remove_expired(&mut self, max_age: StdDuration) -> usize {
        // Ages beyond chrono's range can never be exceeded.
        let Ok(max_age) = Duration::from_std(max_age) else {
            return 0;
        };
        let now = self.clock.now();

        let stale: Vec<usize> = self
            .list
            .iter()
            .filter(|(_, entry)| entry.is_older_than(now, max_age))
            .map(|(idx, _)| idx)
            .collect();

        let mut removed = 0;
        for idx in stale {
            if let Some(entry) = self.list.remove(idx) {
                self.index.remove(&entry.key);
                removed += 1;
            }
        }

        self.stats.record_expirations(removed);
        self.stats.set_total_entries(self.index.len());
        removed
    }

    /// Same as [`remove_expired`](Self::remove_expired) with the age given in
    /// fractional seconds.
    ///
    /// # Errors
    /// `CacheError::InvalidMaxAge` for negative, NaN or infinite input.
    pub fn remove_expired_secs(&mut self, max_age_seconds: f64) -> Result<usize> {
        if !max_age_seconds.is_finite() || max_age_seconds < 0.0 {
            return Err(CacheError::InvalidMaxAge(format!(
                "{max_age_seconds} seconds (must be a finite, non-negative number)"
            )));
        }

        let max_age = StdDuration::try_from_secs_f64(max_age_seconds).unwrap_or(StdDuration::MAX);
        Ok(self.remove_expired(max_age))
    }

    // == Reset ==
    /// Drops every entry. Statistics counters are kept.
    pub fn reset(&mut self) {
        self.index.clear();
        self.list.clear();
        self.stats.set_total_entries(0);
    }

    // == Contains Key ==
    /// Checks for `key` without touching recency.
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.index.contains_key(key)
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.index.len());
        stats
    }

    // == Length ==
    /// Returns the current number of entries in the cache.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    // == Is Empty ==
    /// Returns true if the cache holds no entries.
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    // == Capacity ==
    /// Returns the maximum number of entries the cache retains.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// The clock this cache stamps entries with.
    pub fn clock(&self) -> &C {
        &self.clock
    }

    fn evict_lru(&mut self) {
        let Some(idx) = self.list.front() else {
            return;
        };

        if let Some(entry) = self.list.remove(idx) {
            self.index.remove(&entry.key);
            self.stats.record_eviction();
            debug!(key = ?entry.key, "Evicted least recently used entry");
        }
    }

    /// Panics unless the index and the recency list hold the same entries.
    #[cfg(test)]
    pub(crate) fn assert_consistent(&self) {
        assert_eq!(self.index.len(), self.list.len());
        assert!(self.index.len() <= self.capacity);
        for (idx, entry) in self.list.iter() {
            assert_eq!(self.index.get(&entry.key), Some(&idx));
        }
        assert_eq!(self.list.iter().count(), self.list.iter_rev().count());
    }
}
