//! # LRU (Least Recently Used) Cache
//!
//! Evicts the entry that was touched longest ago when a new key arrives at a
//! full cache. Both `get` and `put` count as touches.
//!
//! ## Architecture
//!
//! ```text
//!   ┌──────────────────────────────────────────────────────────────────────┐
//!   │                          LruCache<K, V>                              │
//!   │                                                                      │
//!   │   index: FxHashMap<K, SlotId>                                        │
//!   │   ┌─────────┬────────┐                                               │
//!   │   │  key_a  │  id_3  │─────────────────────┐                         │
//!   │   │  key_b  │  id_0  │───────────┐         │                         │
//!   │   │  key_c  │  id_1  │──┐        │         │                         │
//!   │   └─────────┴────────┘  │        │         │                         │
//!   │                         ▼        ▼         ▼                         │
//!   │   list: IntrusiveList<(K, V)>                                        │
//!   │     head (MRU) ─► [c] ◄──► [b] ◄──► [a] ◄── tail (LRU, evict next)   │
//!   │                                                                      │
//!   │   capacity: usize  (fixed, > 0)                                      │
//!   └──────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The index stores the `SlotId` of each list node, so moving a node to the
//! head after a hit is a constant-time relink with no list walk.
//!
//! ## Operations
//!
//! | Method            | Complexity | Description                          |
//! |-------------------|------------|--------------------------------------|
//! | `new(capacity)`   | O(1)       | Panics on zero capacity              |
//! | `try_new(cap)`    | O(1)       | `ConfigError` on zero capacity       |
//! | `get(&k)`         | O(1)       | Hit moves entry to MRU               |
//! | `put(k, v)`       | O(1)       | May evict the LRU entry first        |
//! | `peek(&k)`        | O(1)       | No recency change                    |
//! | `peek_lru()`      | O(1)       | Next eviction victim                 |
//! | `recency_rank(&k)`| O(n)       | 0 = most recently used               |
//!
//! ## Example Usage
//!
//! ```
//! use fixcache::policy::lru::LruCache;
//! use fixcache::traits::FixedCapacityMap;
//!
//! let mut cache = LruCache::new(2);
//! cache.put(1, "one");
//! cache.put(2, "two");
//! assert_eq!(cache.get(&1), Some(&"one"));
//!
//! // Key 2 is now least recently used
//! cache.put(3, "three");
//! assert_eq!(cache.get(&2), None);
//! assert_eq!(cache.get(&3), Some(&"three"));
//! ```
//!
//! ## Thread Safety
//!
//! Not thread-safe. Wrap in `sync::ConcurrentCache` (feature `concurrency`)
//! or an external mutex.

use std::fmt;
use std::hash::Hash;

use rustc_hash::FxHashMap;
use tracing::trace;

use crate::ds::intrusive_list::IntrusiveList;
use crate::ds::slot_arena::SlotId;
use crate::error::{ConfigError, InvariantError};
#[cfg(feature = "metrics")]
use crate::metrics::{
    CacheMetrics, CacheMetricsSnapshot, CoreMetricsRecorder, MetricsSnapshotProvider,
};
use crate::policy::PREALLOC_LIMIT;
use crate::traits::{FixedCapacityMap, LruPolicy};

/// Least-recently-used fixed-capacity map.
///
/// See module-level documentation for details.
pub struct LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    index: FxHashMap<K, SlotId>,
    list: IntrusiveList<(K, V)>,
    capacity: usize,
    #[cfg(feature = "metrics")]
    metrics: CacheMetrics,
}

impl<K, V> LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    /// Creates an empty cache holding at most `capacity` entries.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` is zero. Use [`try_new`](Self::try_new) when the
    /// capacity comes from user input.
    pub fn new(capacity: usize) -> Self {
        match Self::try_new(capacity) {
            Ok(cache) => cache,
            Err(err) => panic!("LruCache::new: {err}"),
        }
    }

    /// Creates an empty cache, rejecting a zero capacity.
    pub fn try_new(capacity: usize) -> Result<Self, ConfigError> {
        let capacity = ConfigError::check_capacity(capacity)?;
        let prealloc = capacity.min(PREALLOC_LIMIT);
        Ok(Self {
            index: FxHashMap::with_capacity_and_hasher(prealloc, Default::default()),
            list: IntrusiveList::with_capacity(prealloc),
            capacity,
            #[cfg(feature = "metrics")]
            metrics: CacheMetrics::default(),
        })
    }

    /// Iterates entries from most to least recently used.
    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.list.iter().map(|(key, value)| (key, value))
    }

    /// Checks that the index and the recency list describe the same entries.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        if self.index.len() > self.capacity {
            return Err(InvariantError::new(format!(
                "len {} exceeds capacity {}",
                self.index.len(),
                self.capacity
            )));
        }
        if self.index.len() != self.list.len() {
            return Err(InvariantError::new(format!(
                "index has {} keys, list has {} nodes",
                self.index.len(),
                self.list.len()
            )));
        }
        for (key, &id) in &self.index {
            match self.list.get(id) {
                Some((node_key, _)) if node_key == key => {},
                _ => return Err(InvariantError::new("index points at a foreign list node")),
            }
        }
        let walked = self.list.iter().count();
        if walked != self.list.len() {
            return Err(InvariantError::new(format!(
                "list walk visited {} of {} nodes",
                walked,
                self.list.len()
            )));
        }
        Ok(())
    }

    fn evict_lru(&mut self) {
        let Some((key, _value)) = self.list.pop_back() else {
            return;
        };
        self.index.remove(&key);
        trace!(
            len = self.index.len(),
            capacity = self.capacity,
            "lru evicted least recently used entry"
        );
        #[cfg(feature = "metrics")]
        self.metrics.record_evicted_entry();
    }
}

impl<K, V> FixedCapacityMap<K, V> for LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn get(&mut self, key: &K) -> Option<&V> {
        let Some(&id) = self.index.get(key) else {
            #[cfg(feature = "metrics")]
            self.metrics.record_get_miss();
            return None;
        };
        self.list.move_to_front(id);
        #[cfg(feature = "metrics")]
        self.metrics.record_get_hit();
        self.list.get(id).map(|(_, value)| value)
    }

    fn put(&mut self, key: K, value: V) -> Option<V> {
        #[cfg(feature = "metrics")]
        self.metrics.record_put_call();

        if let Some(&id) = self.index.get(&key) {
            #[cfg(feature = "metrics")]
            self.metrics.record_put_update();
            self.list.move_to_front(id);
            return self
                .list
                .get_mut(id)
                .map(|(_, slot)| std::mem::replace(slot, value));
        }

        #[cfg(feature = "metrics")]
        self.metrics.record_put_new();

        if self.index.len() >= self.capacity {
            self.evict_lru();
        }
        let id = self.list.push_front((key.clone(), value));
        self.index.insert(key, id);
        None
    }

    fn peek(&self, key: &K) -> Option<&V> {
        let id = *self.index.get(key)?;
        self.list.get(id).map(|(_, value)| value)
    }

    fn contains(&self, key: &K) -> bool {
        self.index.contains_key(key)
    }

    fn len(&self) -> usize {
        self.index.len()
    }

    fn capacity(&self) -> usize {
        self.capacity
    }
}

impl<K, V> LruPolicy<K, V> for LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn peek_lru(&self) -> Option<(&K, &V)> {
        self.list.back().map(|(key, value)| (key, value))
    }

    fn recency_rank(&self, key: &K) -> Option<usize> {
        if !self.index.contains_key(key) {
            return None;
        }
        self.list.iter().position(|(node_key, _)| node_key == key)
    }
}

#[cfg(feature = "metrics")]
impl<K, V> LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    pub fn metrics_snapshot(&self) -> CacheMetricsSnapshot {
        self.metrics.snapshot(self.index.len(), self.capacity)
    }
}

#[cfg(feature = "metrics")]
impl<K, V> MetricsSnapshotProvider<CacheMetricsSnapshot> for LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn snapshot(&self) -> CacheMetricsSnapshot {
        self.metrics_snapshot()
    }
}

impl<K, V> Extend<(K, V)> for LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (key, value) in iter {
            self.put(key, value);
        }
    }
}

impl<K, V> fmt::Debug for LruCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LruCache")
            .field("len", &self.index.len())
            .field("capacity", &self.capacity)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(cache: &LruCache<i32, i32>) -> Vec<i32> {
        cache.iter().map(|(k, _)| *k).collect()
    }

    mod basic_behavior {
        use super::*;

        #[test]
        fn test_new_cache_is_empty() {
            let cache: LruCache<i32, i32> = LruCache::new(10);
            assert_eq!(cache.capacity(), 10);
            assert_eq!(cache.len(), 0);
            assert!(cache.is_empty());
            assert_eq!(cache.peek_lru(), None);
        }

        #[test]
        #[should_panic(expected = "capacity must be greater than zero")]
        fn test_zero_capacity_panics() {
            let _cache: LruCache<i32, i32> = LruCache::new(0);
        }

        #[test]
        fn test_try_new_rejects_zero() {
            let err = LruCache::<i32, i32>::try_new(0).unwrap_err();
            assert!(err.message().contains("capacity"));
            assert!(LruCache::<i32, i32>::try_new(1).is_ok());
        }

        #[test]
        fn test_huge_capacity_does_not_preallocate() {
            let mut cache = LruCache::new(usize::MAX);
            cache.put(1, 1);
            assert_eq!(cache.capacity(), usize::MAX);
            assert_eq!(cache.get(&1), Some(&1));
        }

        #[test]
        fn test_get_missing_key_does_not_mutate() {
            let mut cache = LruCache::new(3);
            cache.put(1, 10);
            cache.put(2, 20);
            let before = keys(&cache);
            assert_eq!(cache.get(&99), None);
            assert_eq!(keys(&cache), before);
        }

        #[test]
        fn test_put_existing_returns_previous_value() {
            let mut cache = LruCache::new(2);
            assert_eq!(cache.put(1, 100), None);
            assert_eq!(cache.put(1, 200), Some(100));
            assert_eq!(cache.len(), 1);
            assert_eq!(cache.get(&1), Some(&200));
        }

        #[test]
        fn test_peek_does_not_touch() {
            let mut cache = LruCache::new(2);
            cache.put(1, 1);
            cache.put(2, 2);
            assert_eq!(cache.peek(&1), Some(&1));
            cache.put(3, 3);
            assert!(!cache.contains(&1));
            assert!(cache.contains(&2));
        }

        #[test]
        fn test_debug_hides_entries() {
            let mut cache = LruCache::new(4);
            cache.put("k", vec![1u8, 2, 3]);
            let dbg = format!("{:?}", cache);
            assert_eq!(dbg, "LruCache { len: 1, capacity: 4 }");
        }
    }

    mod eviction {
        use super::*;

        #[test]
        fn test_reference_scenario_capacity_two() {
            let mut cache = LruCache::new(2);
            cache.put(1, 1);
            cache.put(2, 2);
            assert_eq!(cache.get(&1), Some(&1));
            cache.put(3, 3);
            assert_eq!(cache.get(&2), None);
            assert_eq!(cache.get(&3), Some(&3));
            assert_eq!(cache.get(&1), Some(&1));
            cache.check_invariants().unwrap();
        }

        #[test]
        fn test_put_overwrite_counts_as_touch() {
            let mut cache = LruCache::new(2);
            cache.put(1, 1);
            cache.put(2, 2);
            cache.put(1, 10);
            cache.put(3, 3);
            assert!(!cache.contains(&2));
            assert_eq!(cache.peek(&1), Some(&10));
        }

        #[test]
        fn test_overwrite_on_full_cache_does_not_evict() {
            let mut cache = LruCache::new(2);
            cache.put(1, 1);
            cache.put(2, 2);
            cache.put(2, 22);
            assert_eq!(cache.len(), 2);
            assert!(cache.contains(&1));
        }

        #[test]
        fn test_capacity_one_keeps_latest() {
            let mut cache = LruCache::new(1);
            for i in 0..10 {
                cache.put(i, i);
                assert_eq!(cache.len(), 1);
                assert_eq!(cache.peek_lru(), Some((&i, &i)));
            }
        }

        #[test]
        fn test_recency_order_tracks_gets_and_puts() {
            let mut cache = LruCache::new(4);
            for i in 1..=4 {
                cache.put(i, i);
            }
            assert_eq!(keys(&cache), vec![4, 3, 2, 1]);
            cache.get(&2);
            cache.put(1, 100);
            assert_eq!(keys(&cache), vec![1, 2, 4, 3]);
            assert_eq!(cache.recency_rank(&3), Some(3));
            assert_eq!(cache.recency_rank(&9), None);
            assert_eq!(cache.peek_lru(), Some((&3, &3)));
            cache.check_invariants().unwrap();
        }

        #[test]
        fn test_slots_are_reused_after_eviction() {
            let mut cache = LruCache::new(3);
            for i in 0..1000 {
                cache.put(i, i * 2);
                if i % 3 == 0 {
                    cache.get(&(i / 2));
                }
            }
            assert_eq!(cache.len(), 3);
            assert_eq!(cache.list.len(), 3);
            cache.list.debug_validate_invariants();
            cache.check_invariants().unwrap();
        }

        #[test]
        fn test_extend_applies_puts_in_order() {
            let mut cache = LruCache::new(2);
            cache.extend([(1, 'a'), (2, 'b'), (3, 'c')]);
            assert_eq!(cache.len(), 2);
            assert!(!cache.contains(&1));
            assert_eq!(cache.peek_lru(), Some((&2, &'b')));
        }
    }

    #[cfg(feature = "metrics")]
    mod metrics {
        use super::*;

        #[test]
        fn test_counters_follow_operations() {
            let mut cache = LruCache::new(2);
            cache.put(1, 1);
            cache.put(2, 2);
            cache.put(2, 3);
            cache.get(&1);
            cache.get(&7);
            cache.put(3, 3);

            let snap = cache.snapshot();
            assert_eq!(snap.put_calls, 4);
            assert_eq!(snap.put_new, 3);
            assert_eq!(snap.put_updates, 1);
            assert_eq!(snap.get_hits, 1);
            assert_eq!(snap.get_misses, 1);
            assert_eq!(snap.evicted_entries, 1);
            assert_eq!(snap.cache_len, 2);
            assert_eq!(snap.capacity, 2);
        }
    }
}
