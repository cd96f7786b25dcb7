//! Eviction policies.
//!
//! | Policy | Type               | Evicts                                      |
//! |--------|--------------------|---------------------------------------------|
//! | LRU    | [`lru::LruCache`]  | Least recently touched entry                |
//! | LFU    | [`lfu::LfuCache`]  | Lowest frequency; oldest within a frequency |

pub mod lfu;
pub mod lru;

/// Upper bound on up-front allocation; larger caches grow on demand.
pub(crate) const PREALLOC_LIMIT: usize = 4096;
