//! Property-Based Tests for Cache Module
//!
//! Uses proptest to check the cache against a simple reference model.

use proptest::prelude::*;
use std::collections::HashSet;
use std::time::Duration;

use crate::cache::{BoundedExpiringCache, ManualClock};
use crate::error::CacheError;

// == Strategies ==
/// Keys drawn from a small alphabet so sequences revisit keys often
fn key_strategy() -> impl Strategy<Value = String> {
    "[a-h]{1,2}"
}

#[derive(Debug, Clone)]
enum CacheOp {
    Put { key: String, value: u32 },
    Get { key: String },
    Tick { secs: i64 },
    Expire { max_age: u64 },
    Reset,
}

fn cache_op_strategy() -> impl Strategy<Value = CacheOp> {
    prop_oneof![
        4 => (key_strategy(), any::<u32>()).prop_map(|(key, value)| CacheOp::Put { key, value }),
        3 => key_strategy().prop_map(|key| CacheOp::Get { key }),
        2 => (0i64..20).prop_map(|secs| CacheOp::Tick { secs }),
        1 => (0u64..30).prop_map(|max_age| CacheOp::Expire { max_age }),
        1 => Just(CacheOp::Reset),
    ]
}

fn new_cache(capacity: usize) -> (BoundedExpiringCache<String, u32, ManualClock>, ManualClock) {
    let clock = ManualClock::default();
    let cache = BoundedExpiringCache::with_clock(capacity, clock.clone()).unwrap();
    (cache, clock)
}

/// Reference model: a vector of (key, value, created_secs), most recent last.
#[derive(Debug, Default)]
struct Model {
    entries: Vec<(String, u32, i64)>,
}

impl Model {
    fn position(&self, key: &str) -> Option<usize> {
        self.entries.iter().position(|(k, _, _)| k == key)
    }

    fn put(&mut self, key: String, value: u32, now: i64, capacity: usize) {
        if let Some(pos) = self.position(&key) {
            self.entries.remove(pos);
        }
        self.entries.push((key, value, now));
        if self.entries.len() > capacity {
            self.entries.remove(0);
        }
    }

    fn get(&mut self, key: &str) -> Option<(u32, i64)> {
        let pos = self.position(key)?;
        let entry = self.entries.remove(pos);
        let found = (entry.1, entry.2);
        self.entries.push(entry);
        Some(found)
    }

    fn expire(&mut self, now: i64, max_age: i64) -> usize {
        let before = self.entries.len();
        self.entries.retain(|(_, _, created)| now - created <= max_age);
        before - self.entries.len()
    }

    fn view(&self) -> Vec<(String, u32)> {
        self.entries
            .iter()
            .rev()
            .map(|(k, v, _)| (k.clone(), *v))
            .collect()
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    // Any interleaving of operations leaves the cache matching the model:
    // same contents, same MRU-first order, same get results.
    #[test]
    fn prop_matches_reference_model(
        capacity in 1usize..6,
        ops in prop::collection::vec(cache_op_strategy(), 1..80)
    ) {
        let (mut cache, clock) = new_cache(capacity);
        let mut model = Model::default();
        let mut now = 0i64;

        for op in ops {
            match op {
                CacheOp::Put { key, value } => {
                    cache.put(key.clone(), value);
                    model.put(key, value, now, capacity);
                }
                CacheOp::Get { key } => {
                    match (cache.get(&key), model.get(&key)) {
                        (Ok(entry), Some((value, created))) => {
                            prop_assert_eq!(entry.value, value);
                            prop_assert_eq!(entry.created_at.timestamp(), created);
                        }
                        (Err(CacheError::KeyNotFound(_)), None) => {}
                        (actual, expected) => {
                            prop_assert!(false, "get({}) gave {:?}, model {:?}", key, actual, expected);
                        }
                    }
                }
                CacheOp::Tick { secs } => {
                    clock.advance_secs(secs);
                    now += secs;
                }
                CacheOp::Expire { max_age } => {
                    let removed = cache.remove_expired(Duration::from_secs(max_age));
                    prop_assert_eq!(removed, model.expire(now, max_age as i64));
                }
                CacheOp::Reset => {
                    cache.reset();
                    model.entries.clear();
                }
            }

            let view: Vec<(String, u32)> =
                cache.view().into_iter().map(|e| (e.key, e.value)).collect();
            prop_assert_eq!(view, model.view());
            prop_assert!(cache.len() <= capacity);
        }
    }

    // After each put the size is min(capacity, distinct keys so far).
    #[test]
    fn prop_capacity_invariant(
        capacity in 1usize..10,
        keys in prop::collection::vec(key_strategy(), 1..100)
    ) {
        let (mut cache, _) = new_cache(capacity);
        let mut seen = HashSet::new();

        for (i, key) in keys.into_iter().enumerate() {
            seen.insert(key.clone());
            cache.put(key, i as u32);
            prop_assert_eq!(cache.len(), capacity.min(seen.len()));
        }
    }

    // N+1 distinct puts without gets evict exactly the first key.
    #[test]
    fn prop_eviction_order(
        keys in prop::collection::hash_set("[a-z]{1,8}", 2..12)
    ) {
        let keys: Vec<String> = keys.into_iter().collect();
        let capacity = keys.len() - 1;
        let (mut cache, _) = new_cache(capacity);

        for (i, key) in keys.iter().enumerate() {
            cache.put(key.clone(), i as u32);
        }

        prop_assert!(matches!(cache.get(&keys[0]), Err(CacheError::KeyNotFound(_))));
        for key in keys.iter().skip(1) {
            prop_assert!(cache.get(key).is_ok(), "key '{}' should survive", key);
        }
    }

    // Touching the oldest key via get shifts eviction to the second oldest.
    #[test]
    fn prop_get_refreshes_recency(
        keys in prop::collection::hash_set("[a-z]{1,8}", 3..10),
        extra in "[0-9]{1,4}"
    ) {
        let keys: Vec<String> = keys.into_iter().collect();
        let (mut cache, _) = new_cache(keys.len());

        for key in &keys {
            cache.put(key.clone(), 0);
        }
        cache.get(&keys[0]).unwrap();
        cache.put(extra, 1);

        prop_assert!(cache.contains_key(&keys[0]));
        prop_assert!(!cache.contains_key(&keys[1]));
    }

    // Overwriting a key keeps a single entry holding the latest value at the MRU end.
    #[test]
    fn prop_overwrite_semantics(
        key in key_strategy(),
        others in prop::collection::vec(key_strategy(), 0..4),
        v1 in any::<u32>(),
        v2 in any::<u32>()
    ) {
        let (mut cache, _) = new_cache(8);

        cache.put(key.clone(), v1);
        for other in others {
            if other != key {
                cache.put(other, 0);
            }
        }
        cache.put(key.clone(), v2);

        let view = cache.view();
        prop_assert_eq!(view.iter().filter(|e| e.key == key).count(), 1);
        prop_assert_eq!(&view[0].key, &key);
        prop_assert_eq!(cache.get(&key).unwrap().value, v2);
    }
}

// == Property Test for Shared Access ==
// Tasks take turns on one cache through Arc<RwLock<_>>; index and list must
// agree after every task's write and after all of them have finished.

proptest! {
    #![proptest_config(ProptestConfig::with_cases(50))]

    #[test]
    fn prop_shared_cache_consistent_after_every_task(
        capacity in 1usize..6,
        ops in prop::collection::vec(cache_op_strategy(), 10..50)
    ) {
        use std::sync::Arc;
        use tokio::sync::RwLock;

        let (cache, clock) = new_cache(capacity);
        let cache = Arc::new(RwLock::new(cache));

        tokio_test::block_on(async {
            let mut handles = vec![];

            for op in ops {
                let cache = Arc::clone(&cache);
                let clock = clock.clone();

                handles.push(tokio::spawn(async move {
                    let mut guard = cache.write().await;
                    match op {
                        CacheOp::Put { key, value } => guard.put(key, value),
                        CacheOp::Get { key } => {
                            let _ = guard.get(&key);
                        }
                        CacheOp::Tick { secs } => clock.advance_secs(secs),
                        CacheOp::Expire { max_age } => {
                            guard.remove_expired(Duration::from_secs(max_age));
                        }
                        CacheOp::Reset => guard.reset(),
                    }
                    guard.assert_consistent();
                }));
            }

            for handle in handles {
                prop_assert!(handle.await.is_ok(), "Task should not panic");
            }

            let guard = cache.read().await;
            guard.assert_consistent();
            let view = guard.view();
            prop_assert!(guard.len() <= capacity);
            prop_assert_eq!(view.len(), guard.len());
            prop_assert_eq!(guard.stats().total_entries, guard.len());

            let distinct: HashSet<&String> = view.iter().map(|e| &e.key).collect();
            prop_assert_eq!(distinct.len(), view.len());
            for entry in &view {
                prop_assert!(guard.contains_key(&entry.key));
            }

            Ok(())
        })?;
    }
}

// == Additional Unit Tests for Edge Cases ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_expire_boundary_matches_cache() {
        let (mut cache, clock) = new_cache(3);
        let mut model = Model::default();

        for (i, key) in ["x", "y", "z"].iter().enumerate() {
            let now = i as i64 * 10;
            clock.set(chrono::DateTime::<chrono::Utc>::UNIX_EPOCH + chrono::Duration::seconds(now));
            cache.put(key.to_string(), i as u32);
            model.put(key.to_string(), i as u32, now, 3);
        }
        clock.advance_secs(5);

        assert_eq!(cache.remove_expired(Duration::from_secs(15)), model.expire(25, 15));
        let view: Vec<(String, u32)> = cache.view().into_iter().map(|e| (e.key, e.value)).collect();
        assert_eq!(view, model.view());
    }
}
