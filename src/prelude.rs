pub use crate::builder::{Cache, CacheBuilder, CachePolicy};
pub use crate::ds::{FrequencyBuckets, IntrusiveList, SlotArena, SlotId};
pub use crate::error::{ConfigError, InvariantError};
#[cfg(feature = "metrics")]
pub use crate::metrics::snapshot::CacheMetricsSnapshot;
pub use crate::policy::lfu::LfuCache;
pub use crate::policy::lru::LruCache;
#[cfg(feature = "concurrency")]
pub use crate::sync::ConcurrentCache;
pub use crate::traits::{FixedCapacityMap, LfuPolicy, LruPolicy};
