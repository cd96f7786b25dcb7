//! Error types for fixcache.
//!
//! ## Key Components
//!
//! - [`ConfigError`]: Returned when a cache is configured with an invalid
//!   capacity (zero).
//! - [`InvariantError`]: Returned by `check_invariants` self-checks when the
//!   hash index and ordering structure disagree.
//!
//! A cache miss is never an error; `get` and `peek` return `Option::None`.
//!
//! ## Example Usage
//!
//! ```
//! use fixcache::error::ConfigError;
//! use fixcache::policy::lru::LruCache;
//!
//! let cache: Result<LruCache<u64, String>, ConfigError> = LruCache::try_new(16);
//! assert!(cache.is_ok());
//!
//! // Zero capacity is a configuration error, caught without panicking
//! let bad = LruCache::<u64, String>::try_new(0);
//! assert!(bad.is_err());
//! ```

use std::fmt;

// ---------------------------------------------------------------------------
// ConfigError
// ---------------------------------------------------------------------------

/// Rejected construction parameters.
///
/// Returned by the fallible constructors
/// [`LruCache::try_new`](crate::policy::lru::LruCache::try_new) and
/// [`CacheBuilder::try_build`](crate::builder::CacheBuilder::try_build).
///
/// # Example
///
/// ```
/// use fixcache::policy::lfu::LfuCache;
///
/// let err = LfuCache::<u64, u64>::try_new(0).unwrap_err();
/// assert_eq!(err.to_string(), "capacity must be greater than zero");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigError(String);

impl ConfigError {
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }

    /// Validates a cache capacity, rejecting zero.
    pub(crate) fn check_capacity(capacity: usize) -> Result<usize, ConfigError> {
        if capacity == 0 {
            return Err(ConfigError::new("capacity must be greater than zero"));
        }
        Ok(capacity)
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for ConfigError {}

// ---------------------------------------------------------------------------
// InvariantError
// ---------------------------------------------------------------------------

/// A cache's index and its ordering structure disagree.
///
/// Produced by `check_invariants` on
/// [`LruCache`](crate::policy::lru::LruCache::check_invariants) and
/// [`LfuCache`](crate::policy::lfu::LfuCache::check_invariants).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvariantError(String);

impl InvariantError {
    #[inline]
    pub fn new(msg: impl Into<String>) -> Self {
        Self(msg.into())
    }

    #[inline]
    pub fn message(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for InvariantError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::error::Error for InvariantError {}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
