//! Thread-safe wrapper around any [`FixedCapacityMap`].
//!
//! A single `parking_lot::Mutex` guards the whole cache. A reader/writer lock
//! buys nothing here because `get` reorders the cache.
//!
//! Clones share the same underlying cache.
//!
//! ```
//! use std::thread;
//! use fixcache::policy::lru::LruCache;
//! use fixcache::sync::ConcurrentCache;
//!
//! let cache = ConcurrentCache::new(LruCache::<u32, String>::new(64));
//! let handles: Vec<_> = (0..4)
//!     .map(|t| {
//!         let cache = cache.clone();
//!         thread::spawn(move || cache.put(t, format!("worker-{t}")))
//!     })
//!     .collect();
//! for handle in handles {
//!     handle.join().unwrap();
//! }
//! assert_eq!(cache.len(), 4);
//! assert_eq!(cache.get(&2), Some("worker-2".to_string()));
//! ```

use std::fmt;
use std::marker::PhantomData;
use std::sync::Arc;

use parking_lot::Mutex;

use crate::traits::FixedCapacityMap;

pub struct ConcurrentCache<K, V, C> {
    inner: Arc<Mutex<C>>,
    _marker: PhantomData<fn() -> (K, V)>,
}

impl<K, V, C> ConcurrentCache<K, V, C>
where
    C: FixedCapacityMap<K, V>,
{
    pub fn new(cache: C) -> Self {
        Self {
            inner: Arc::new(Mutex::new(cache)),
            _marker: PhantomData,
        }
    }

    /// Returns a clone of the value and records the access.
    pub fn get(&self, key: &K) -> Option<V>
    where
        V: Clone,
    {
        self.inner.lock().get(key).cloned()
    }

    pub fn put(&self, key: K, value: V) -> Option<V> {
        self.inner.lock().put(key, value)
    }

    /// Returns a clone of the value without recording an access.
    pub fn peek(&self, key: &K) -> Option<V>
    where
        V: Clone,
    {
        self.inner.lock().peek(key).cloned()
    }

    pub fn contains(&self, key: &K) -> bool {
        self.inner.lock().contains(key)
    }

    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.inner.lock().capacity()
    }

    /// Runs `f` with exclusive access, so compound operations are atomic.
    pub fn with<R>(&self, f: impl FnOnce(&mut C) -> R) -> R {
        let mut cache = self.inner.lock();
        f(&mut cache)
    }
}

impl<K, V, C> Clone for ConcurrentCache<K, V, C> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
            _marker: PhantomData,
        }
    }
}

impl<K, V, C> fmt::Debug for ConcurrentCache<K, V, C>
where
    C: FixedCapacityMap<K, V>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cache = self.inner.lock();
        f.debug_struct("ConcurrentCache")
            .field("len", &cache.len())
            .field("capacity", &cache.capacity())
            .finish_non_exhaustive()
    }
}
