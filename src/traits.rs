//! # Cache Trait Hierarchy
//!
//! One contract, two eviction policies.
//!
//! ```text
//!                  ┌─────────────────────────────────────────┐
//!                  │        FixedCapacityMap<K, V>           │
//!                  │                                         │
//!                  │  get(&mut, &K) → Option<&V>   (touches) │
//!                  │  put(&mut, K, V) → Option<V>            │
//!                  │  peek(&, &K) → Option<&V>     (no touch)│
//!                  │  contains(&, &K) → bool                 │
//!                  │  len / is_empty / capacity              │
//!                  └──────────────────┬──────────────────────┘
//!                                     │
//!               ┌─────────────────────┴─────────────────────┐
//!               ▼                                           ▼
//!   ┌────────────────────────────┐            ┌────────────────────────────┐
//!   │      LruPolicy<K, V>       │            │      LfuPolicy<K, V>       │
//!   │                            │            │                            │
//!   │  peek_lru() → (&K, &V)     │            │  peek_lfu() → (&K, &V)     │
//!   │  recency_rank(&K) → usize  │            │  frequency(&K) → u64       │
//!   └────────────────────────────┘            └────────────────────────────┘
//! ```
//!
//! There is no `remove` in the hierarchy: entries leave a cache
//! only through capacity-driven eviction.
//!
//! ## Thread Safety
//!
//! Implementations are not thread-safe. `get` mutates eviction order, so a
//! shared cache needs an exclusive lock even for reads; see
//! `sync::ConcurrentCache` behind the `concurrency` feature.

/// Fixed-capacity key-value map with an eviction policy.
///
/// # Example
///
/// ```
/// use fixcache::traits::FixedCapacityMap;
/// use fixcache::policy::lfu::LfuCache;
/// use fixcache::policy::lru::LruCache;
///
/// fn warm<C: FixedCapacityMap<u64, String>>(cache: &mut C, data: &[(u64, &str)]) {
///     for (key, value) in data {
///         cache.put(*key, value.to_string());
///     }
/// }
///
/// let mut lru = LruCache::new(2);
/// let mut lfu = LfuCache::new(2);
/// warm(&mut lru, &[(1, "one"), (2, "two"), (3, "three")]);
/// warm(&mut lfu, &[(1, "one"), (2, "two"), (3, "three")]);
/// assert_eq!(lru.len(), 2);
/// assert_eq!(lfu.len(), 2);
/// ```
pub trait FixedCapacityMap<K, V> {
    /// Returns the value for `key` and records the access with the policy.
    ///
    /// A miss returns `None` and leaves the cache untouched.
    fn get(&mut self, key: &K) -> Option<&V>;

    /// Inserts or overwrites `key`.
    ///
    /// Overwriting counts as an access and returns the previous value. A new
    /// key inserted into a full cache evicts exactly one entry first.
    fn put(&mut self, key: K, value: V) -> Option<V>;

    /// Returns the value for `key` without recording an access.
    fn peek(&self, key: &K) -> Option<&V>;

    /// Checks residency without recording an access.
    fn contains(&self, key: &K) -> bool;

    /// Number of resident entries.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Maximum number of resident entries; fixed at construction.
    fn capacity(&self) -> usize;
}

/// Recency-ordered caches.
///
/// # Example
///
/// ```
/// use fixcache::traits::{FixedCapacityMap, LruPolicy};
/// use fixcache::policy::lru::LruCache;
///
/// let mut cache = LruCache::new(3);
/// cache.put(1, "a");
/// cache.put(2, "b");
/// cache.put(3, "c");
/// cache.get(&1);
///
/// assert_eq!(cache.peek_lru(), Some((&2, &"b")));
/// assert_eq!(cache.recency_rank(&1), Some(0));
/// assert_eq!(cache.recency_rank(&2), Some(2));
/// ```
pub trait LruPolicy<K, V>: FixedCapacityMap<K, V> {
    /// The entry the next eviction would remove.
    fn peek_lru(&self) -> Option<(&K, &V)>;

    /// Position from the most recent end (0 = most recently used). O(n).
    fn recency_rank(&self, key: &K) -> Option<usize>;
}

/// Frequency-ordered caches.
///
/// # Example
///
/// ```
/// use fixcache::traits::{FixedCapacityMap, LfuPolicy};
/// use fixcache::policy::lfu::LfuCache;
///
/// let mut cache = LfuCache::new(3);
/// cache.put(1, "a");
/// cache.put(2, "b");
/// cache.get(&1);
///
/// assert_eq!(cache.frequency(&1), Some(2));
/// assert_eq!(cache.peek_lfu(), Some((&2, &"b")));
/// ```
pub trait LfuPolicy<K, V>: FixedCapacityMap<K, V> {
    /// The entry the next eviction would remove.
    fn peek_lfu(&self) -> Option<(&K, &V)>;

    /// Access count for `key`; 1 right after insertion.
    fn frequency(&self, key: &K) -> Option<u64>;
}
