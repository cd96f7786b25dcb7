//! # LFU (Least Frequently Used) Cache
//!
//! Evicts the entry with the lowest access count when a new key arrives at a
//! full cache. Among entries sharing that count, the one that reached it
//! earliest goes first.
//!
//! ## Architecture
//!
//! ```text
//!   ┌──────────────────────────────────────────────────────────────────────────┐
//!   │                          LfuCache<K, V>                                  │
//!   │                                                                          │
//!   │   buckets: FrequencyBuckets<K, V>                                        │
//!   │   ┌────────────────────────────────────────────────────────────────────┐ │
//!   │   │  index: K → SlotId        entries: (key, value, freq, links)       │ │
//!   │   │                                                                    │ │
//!   │   │  min_freq = 1                                                      │ │
//!   │   │  freq=1: [page_3] ◄──► [page_2]        ← newest ... oldest (victim)│ │
//!   │   │  freq=4: [page_1]                                                  │ │
//!   │   └────────────────────────────────────────────────────────────────────┘ │
//!   │                                                                          │
//!   │   capacity: usize  (fixed, > 0)                                          │
//!   └──────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Eviction Flow
//!
//! ```text
//!   put(key, value)
//!        │
//!        ▼
//!   key resident? ── yes ──► overwrite value, freq += 1, return old value
//!        │ no
//!        ▼
//!   len == capacity? ── yes ──► pop oldest entry of the min_freq bucket
//!        │
//!        ▼
//!   insert at freq = 1 (newest in bucket 1), min_freq = 1
//! ```
//!
//! ## LFU vs LRU
//!
//! ```text
//!   capacity 2:  put(1) put(2) get(1) put(3)
//!
//!   LRU: evicts 2 (least recently touched)
//!   LFU: evicts 2 (freq 1 vs key 1's freq 2)
//!
//!   capacity 2:  put(1) put(2) put(3)
//!
//!   LFU: evicts 1 (both at freq 1, key 1 reached it first)
//! ```
//!
//! ## Operations
//!
//! | Method          | Complexity | Description                           |
//! |-----------------|------------|---------------------------------------|
//! | `get(&k)`       | O(1)       | Hit bumps frequency                   |
//! | `put(k, v)`     | O(1)       | Overwrite bumps; new key may evict    |
//! | `peek(&k)`      | O(1)       | No frequency change                   |
//! | `peek_lfu()`    | O(1)       | Next eviction victim                  |
//! | `frequency(&k)` | O(1)       | Current access count                  |
//!
//! ## Implementation Notes
//!
//! - `min_freq` is maintained on every bucket change, never recomputed.
//! - Frequencies saturate at `u64::MAX`.
//! - No aging: a formerly hot key keeps its count until evicted.

use std::fmt;
use std::hash::Hash;

use tracing::trace;

use crate::ds::frequency_buckets::FrequencyBuckets;
use crate::error::{ConfigError, InvariantError};
#[cfg(feature = "metrics")]
use crate::metrics::{
    CacheMetrics, CacheMetricsSnapshot, CoreMetricsRecorder, MetricsSnapshotProvider,
};
use crate::policy::PREALLOC_LIMIT;
use crate::traits::{FixedCapacityMap, LfuPolicy};

/// Least-frequently-used fixed-capacity map.
///
/// See module-level documentation for details.
pub struct LfuCache<K, V>
where
    K: Eq + Hash + Clone,
{
    buckets: FrequencyBuckets<K, V>,
    capacity: usize,
    #[cfg(feature = "metrics")]
    metrics: CacheMetrics,
}

impl<K, V> LfuCache<K, V>
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
            Err(err) => panic!("LfuCache::new: {err}"),
        }
    }

    /// Creates an empty cache, rejecting a zero capacity.
    pub fn try_new(capacity: usize) -> Result<Self, ConfigError> {
        let capacity = ConfigError::check_capacity(capacity)?;
        Ok(Self {
            buckets: FrequencyBuckets::with_capacity(capacity.min(PREALLOC_LIMIT)),
            capacity,
            #[cfg(feature = "metrics")]
            metrics: CacheMetrics::default(),
        })
    }

    /// Smallest access count among resident entries.
    pub fn min_frequency(&self) -> Option<u64> {
        self.buckets.min_freq()
    }

    /// Checks bucket membership, bucket links and the minimum tracker.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        if self.buckets.len() > self.capacity {
            return Err(InvariantError::new(format!(
                "len {} exceeds capacity {}",
                self.buckets.len(),
                self.capacity
            )));
        }
        self.buckets.check_invariants()
    }

    fn evict_lfu(&mut self) {
        let Some((_key, _value, freq)) = self.buckets.pop_min() else {
            return;
        };
        trace!(
            freq,
            len = self.buckets.len(),
            capacity = self.capacity,
            "lfu evicted least frequently used entry"
        );
        #[cfg(feature = "metrics")]
        self.metrics.record_evicted_entry();
    }
}

impl<K, V> FixedCapacityMap<K, V> for LfuCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn get(&mut self, key: &K) -> Option<&V> {
        let value = self.buckets.touch_get(key);
        #[cfg(feature = "metrics")]
        if value.is_some() {
            self.metrics.record_get_hit();
        } else {
            self.metrics.record_get_miss();
        }
        value
    }

    fn put(&mut self, key: K, value: V) -> Option<V> {
        #[cfg(feature = "metrics")]
        self.metrics.record_put_call();

        if let Some(slot) = self.buckets.get_mut(&key) {
            let previous = std::mem::replace(slot, value);
            self.buckets.touch(&key);
            #[cfg(feature = "metrics")]
            self.metrics.record_put_update();
            return Some(previous);
        }

        #[cfg(feature = "metrics")]
        self.metrics.record_put_new();

        if self.buckets.len() >= self.capacity {
            self.evict_lfu();
        }
        self.buckets.insert(key, value);
        None
    }

    fn peek(&self, key: &K) -> Option<&V> {
        self.buckets.get(key)
    }

    fn contains(&self, key: &K) -> bool {
        self.buckets.contains(key)
    }

    fn len(&self) -> usize {
        self.buckets.len()
    }

    fn capacity(&self) -> usize {
        self.capacity
    }
}

impl<K, V> LfuPolicy<K, V> for LfuCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn peek_lfu(&self) -> Option<(&K, &V)> {
        self.buckets.peek_min().map(|(key, value, _)| (key, value))
    }

    fn frequency(&self, key: &K) -> Option<u64> {
        self.buckets.frequency(key)
    }
}

#[cfg(feature = "metrics")]
impl<K, V> LfuCache<K, V>
where
    K: Eq + Hash + Clone,
{
    pub fn metrics_snapshot(&self) -> CacheMetricsSnapshot {
        self.metrics.snapshot(self.buckets.len(), self.capacity)
    }
}

#[cfg(feature = "metrics")]
impl<K, V> MetricsSnapshotProvider<CacheMetricsSnapshot> for LfuCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn snapshot(&self) -> CacheMetricsSnapshot {
        self.metrics_snapshot()
    }
}

impl<K, V> Extend<(K, V)> for LfuCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn extend<T: IntoIterator<Item = (K, V)>>(&mut self, iter: T) {
        for (key, value) in iter {
            self.put(key, value);
        }
    }
}

impl<K, V> fmt::Debug for LfuCache<K, V>
where
    K: Eq + Hash + Clone,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LfuCache")
            .field("len", &self.buckets.len())
            .field("capacity", &self.capacity)
            .field("min_freq", &self.buckets.min_freq())
            .finish()
    }
}
