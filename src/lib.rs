//! fixcache: fixed-capacity LRU and LFU caches with O(1) `get` and `put`.
//!
//! Both policies sit on the same small toolkit in [`ds`]: a slot arena that
//! hands out stable [`ds::SlotId`] handles, an intrusive list threaded
//! through that arena, and frequency buckets for LFU ordering.
//!
//! ```
//! use fixcache::prelude::*;
//!
//! let mut lru = LruCache::new(2);
//! lru.put(1, "one");
//! lru.put(2, "two");
//! lru.get(&1);
//! lru.put(3, "three"); // evicts 2
//! assert!(!lru.contains(&2));
//!
//! let mut lfu = LfuCache::new(2);
//! lfu.put(1, "one");
//! lfu.put(2, "two");
//! lfu.get(&1);
//! lfu.put(3, "three"); // evicts 2, the only key with frequency 1
//! assert!(lfu.contains(&1));
//! ```

pub mod builder;
pub mod ds;
pub mod error;
pub mod policy;

#[cfg(feature = "metrics")]
pub mod metrics;

#[cfg(feature = "concurrency")]
pub mod sync;

pub mod prelude;
pub mod traits;
