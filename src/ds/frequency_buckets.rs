//! Frequency buckets for O(1) LFU tracking.
//!
//! Stores entries in a [`SlotArena`] and threads each one into the bucket for
//! its current access frequency. Buckets are intrusive lists ordered newest
//! (head) to oldest (tail), and buckets link to their neighbouring
//! frequencies so the minimum can be advanced without scanning.
//!
//! ## Architecture
//!
//! ```text
//!   index: FxHashMap<K, SlotId>          entries: SlotArena<Entry<K, V>>
//!   ┌──────────┬────────┐                ┌──────┬──────────────────────────────┐
//!   │ "page_a" │  id_0  │──────────────► │ id_0 │ key, value, freq:2, prev/next│
//!   │ "page_b" │  id_1  │──────────────► │ id_1 │ key, value, freq:1, prev/next│
//!   │ "page_c" │  id_2  │──────────────► │ id_2 │ key, value, freq:1, prev/next│
//!   └──────────┴────────┘                └──────┴──────────────────────────────┘
//!
//!   buckets: FxHashMap<u64, Bucket>           min_freq = 1
//!
//!   freq=1: head ──► [id_2] ◄──► [id_1] ◄── tail   (tail evicted first)
//!              │ next
//!              ▼
//!   freq=2: head ──► [id_0] ◄── tail
//! ```
//!
//! ## Touch Flow
//!
//! ```text
//!   touch("page_b"):
//!     1. unlink id_1 from the freq=1 bucket
//!     2. if that bucket is now empty: drop it, and if it was min_freq,
//!        min_freq becomes its successor frequency
//!     3. create the freq=2 bucket if needed, linked after freq=1 (or after
//!        freq=1's predecessor when freq=1 was dropped)
//!     4. push id_1 at the head of freq=2
//!     5. min_freq = min(min_freq, 2)
//! ```
//!
//! ## Operations
//!
//! | Operation   | Time | Notes                                    |
//! |-------------|------|------------------------------------------|
//! | `insert`    | O(1) | New key starts at freq=1                 |
//! | `touch`     | O(1) | freq += 1, becomes newest in new bucket  |
//! | `pop_min`   | O(1) | Oldest entry of the min-frequency bucket |
//! | `peek_min`  | O(1) | Same candidate, not removed              |
//! | `frequency` | O(1) | Current count for a key                  |
//!
//! ## Example Usage
//!
//! ```
//! use fixcache::ds::FrequencyBuckets;
//!
//! let mut freq = FrequencyBuckets::new();
//! freq.insert("page_a", 1);
//! freq.insert("page_b", 2);
//! freq.insert("page_c", 3);
//!
//! freq.touch(&"page_a");
//! freq.touch(&"page_a");
//!
//! // Lowest frequency wins; among ties the oldest goes first
//! assert_eq!(freq.pop_min(), Some(("page_b", 2, 1)));
//! assert_eq!(freq.pop_min(), Some(("page_c", 3, 1)));
//! assert_eq!(freq.pop_min(), Some(("page_a", 1, 3)));
//! ```

use std::hash::Hash;

use rustc_hash::FxHashMap;

use crate::ds::slot_arena::{SlotArena, SlotId};
use crate::error::InvariantError;

/// Default bucket-map pre-allocation; most entries sit at low frequencies.
pub const DEFAULT_BUCKET_PREALLOC: usize = 32;

/// Link fields come first; they are touched on every bucket move.
#[derive(Debug)]
#[repr(C)]
struct Entry<K, V> {
    prev: Option<SlotId>,
    next: Option<SlotId>,
    freq: u64,
    key: K,
    value: V,
}

#[derive(Debug, Default)]
struct Bucket {
    head: Option<SlotId>,
    tail: Option<SlotId>,
    prev: Option<u64>,
    next: Option<u64>,
}

/// O(1) frequency tracker that also owns each key's value.
///
/// # Example
///
/// ```
/// use fixcache::ds::FrequencyBuckets;
///
/// let mut freq = FrequencyBuckets::new();
/// freq.insert("a", 10);
/// freq.insert("b", 20);
/// freq.touch(&"a");
///
/// assert_eq!(freq.frequency(&"a"), Some(2));
/// assert_eq!(freq.min_freq(), Some(1));
/// assert_eq!(freq.peek_min(), Some((&"b", &20, 1)));
/// ```
#[derive(Debug)]
pub struct FrequencyBuckets<K, V> {
    entries: SlotArena<Entry<K, V>>,
    index: FxHashMap<K, SlotId>,
    buckets: FxHashMap<u64, Bucket>,
    // 0 means "no entries"
    min_freq: u64,
}

impl<K, V> FrequencyBuckets<K, V>
where
    K: Eq + Hash + Clone,
{
    pub fn new() -> Self {
        Self::with_capacity(0)
    }

    /// Creates an empty tracker with room for `capacity` entries.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: SlotArena::with_capacity(capacity),
            index: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
            buckets: FxHashMap::with_capacity_and_hasher(
                DEFAULT_BUCKET_PREALLOC,
                Default::default(),
            ),
            min_freq: 0,
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[inline]
    pub fn contains(&self, key: &K) -> bool {
        self.index.contains_key(key)
    }

    /// Returns the value for `key` without changing its frequency.
    pub fn get(&self, key: &K) -> Option<&V> {
        let id = *self.index.get(key)?;
        self.entries.get(id).map(|entry| &entry.value)
    }

    /// Returns a mutable value for `key` without changing its frequency.
    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        let id = *self.index.get(key)?;
        self.entries.get_mut(id).map(|entry| &mut entry.value)
    }

    pub fn frequency(&self, key: &K) -> Option<u64> {
        let id = *self.index.get(key)?;
        self.entries.get(id).map(|entry| entry.freq)
    }

    /// Smallest frequency with a non-empty bucket.
    pub fn min_freq(&self) -> Option<u64> {
        (self.min_freq != 0).then_some(self.min_freq)
    }

    /// Inserts a new key at frequency 1.
    ///
    /// If `key` is already tracked its value is replaced and returned; its
    /// frequency and bucket position are left alone.
    ///
    /// ```
    /// use fixcache::ds::FrequencyBuckets;
    ///
    /// let mut freq = FrequencyBuckets::new();
    /// assert_eq!(freq.insert("a", 1), None);
    /// assert_eq!(freq.insert("a", 2), Some(1));
    /// assert_eq!(freq.frequency(&"a"), Some(1));
    /// ```
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        if let Some(slot) = self.get_mut(&key) {
            return Some(std::mem::replace(slot, value));
        }

        let id = self.entries.insert(Entry {
            prev: None,
            next: None,
            freq: 1,
            key: key.clone(),
            value,
        });
        self.index.insert(key, id);

        if !self.buckets.contains_key(&1) {
            let next = self.min_freq();
            self.insert_bucket(1, None, next);
        }
        self.list_push_front(1, id);
        self.min_freq = 1;
        None
    }

    /// Increments the frequency of `key` and returns the new count.
    ///
    /// The entry becomes the newest member of its new bucket. At `u64::MAX`
    /// the count stays put and only the position within the bucket moves.
    #[inline]
    pub fn touch(&mut self, key: &K) -> Option<u64> {
        let id = *self.index.get(key)?;
        self.touch_slot(id)
    }

    /// Like [`touch`](Self::touch) but returns the value after the bump.
    pub fn touch_get(&mut self, key: &K) -> Option<&V> {
        let id = *self.index.get(key)?;
        self.touch_slot(id)?;
        self.entries.get(id).map(|entry| &entry.value)
    }

    /// Removes and returns the eviction candidate as `(key, value, freq)`.
    ///
    /// The candidate is the tail (oldest member) of the `min_freq` bucket.
    #[inline]
    pub fn pop_min(&mut self) -> Option<(K, V, u64)> {
        let freq = self.min_freq()?;
        let id = self.buckets.get(&freq)?.tail?;
        self.unlink(freq, id)?;
        let entry = self.entries.remove(id)?;
        self.index.remove(&entry.key);
        Some((entry.key, entry.value, entry.freq))
    }

    /// Returns the eviction candidate without removing it.
    pub fn peek_min(&self) -> Option<(&K, &V, u64)> {
        let freq = self.min_freq()?;
        let id = self.buckets.get(&freq)?.tail?;
        let entry = self.entries.get(id)?;
        Some((&entry.key, &entry.value, entry.freq))
    }

    /// Keys of one bucket, newest first.
    pub fn bucket_keys(&self, freq: u64) -> Vec<&K> {
        let mut keys = Vec::new();
        let mut current = self.buckets.get(&freq).and_then(|bucket| bucket.head);
        while let Some(id) = current {
            let Some(entry) = self.entries.get(id) else {
                break;
            };
            keys.push(&entry.key);
            current = entry.next;
        }
        keys
    }

    /// Verifies index, bucket chain and `min_freq` agree.
    pub fn check_invariants(&self) -> Result<(), InvariantError> {
        if self.entries.len() != self.index.len() {
            return Err(InvariantError::new(format!(
                "entry count {} differs from index size {}",
                self.entries.len(),
                self.index.len()
            )));
        }
        if self.is_empty() {
            if self.min_freq != 0 || !self.buckets.is_empty() {
                return Err(InvariantError::new("empty tracker retains buckets"));
            }
            return Ok(());
        }

        let smallest = self.buckets.keys().copied().min();
        if smallest != Some(self.min_freq) {
            return Err(InvariantError::new(format!(
                "min_freq {} but smallest bucket is {:?}",
                self.min_freq, smallest
            )));
        }

        let mut seen = 0usize;
        for (&freq, bucket) in &self.buckets {
            if bucket.head.is_none() {
                return Err(InvariantError::new(format!("bucket {freq} is empty")));
            }
            match bucket.prev {
                Some(prev) if self.buckets.get(&prev).and_then(|b| b.next) != Some(freq) => {
                    return Err(InvariantError::new(format!("bucket {freq} prev link broken")));
                },
                None if freq != self.min_freq => {
                    return Err(InvariantError::new(format!(
                        "bucket {freq} has no predecessor but is not the minimum"
                    )));
                },
                _ => {},
            }
            if let Some(next) = bucket.next
                && (next <= freq || self.buckets.get(&next).and_then(|b| b.prev) != Some(freq))
            {
                return Err(InvariantError::new(format!("bucket {freq} next link broken")));
            }

            let mut last = None;
            let mut current = bucket.head;
            while let Some(id) = current {
                let entry = self
                    .entries
                    .get(id)
                    .ok_or_else(|| InvariantError::new("bucket links a vacant slot"))?;
                if entry.freq != freq || entry.prev != last {
                    return Err(InvariantError::new(format!(
                        "entry in bucket {freq} has freq {} or bad prev link",
                        entry.freq
                    )));
                }
                if self.index.get(&entry.key) != Some(&id) {
                    return Err(InvariantError::new("index does not point at bucket entry"));
                }
                last = Some(id);
                current = entry.next;
                seen += 1;
                if seen > self.entries.len() {
                    return Err(InvariantError::new("cycle in bucket list"));
                }
            }
            if bucket.tail != last {
                return Err(InvariantError::new(format!("bucket {freq} tail mismatch")));
            }
        }

        if seen != self.entries.len() {
            return Err(InvariantError::new(format!(
                "{} entries linked into buckets, {} stored",
                seen,
                self.entries.len()
            )));
        }
        Ok(())
    }

    fn touch_slot(&mut self, id: SlotId) -> Option<u64> {
        let current = self.entries.get(id)?.freq;
        if current == u64::MAX {
            self.list_remove(current, id)?;
            self.list_push_front(current, id);
            return Some(current);
        }
        let next_freq = current + 1;

        let (prev_freq, next_existing) = {
            let bucket = self.buckets.get(&current)?;
            (bucket.prev, bucket.next)
        };
        let bucket_dropped = self.unlink(current, id)?;

        if !self.buckets.contains_key(&next_freq) {
            let prev = if bucket_dropped {
                prev_freq
            } else {
                Some(current)
            };
            self.insert_bucket(next_freq, prev, next_existing);
        }

        if let Some(entry) = self.entries.get_mut(id) {
            entry.freq = next_freq;
        }
        self.list_push_front(next_freq, id);
        if self.min_freq == 0 || next_freq < self.min_freq {
            self.min_freq = next_freq;
        }
        Some(next_freq)
    }

    /// Unlinks `id` from bucket `freq`, dropping the bucket if it empties.
    /// Returns whether the bucket was dropped.
    fn unlink(&mut self, freq: u64, id: SlotId) -> Option<bool> {
        self.list_remove(freq, id)?;
        let bucket = self.buckets.get(&freq)?;
        if bucket.head.is_some() {
            return Some(false);
        }
        let (prev, next) = (bucket.prev, bucket.next);
        self.remove_bucket(freq, prev, next);
        if self.min_freq == freq {
            self.min_freq = next.unwrap_or(0);
        }
        Some(true)
    }

    fn insert_bucket(&mut self, freq: u64, prev: Option<u64>, next: Option<u64>) {
        self.buckets.insert(
            freq,
            Bucket {
                head: None,
                tail: None,
                prev,
                next,
            },
        );
        if let Some(prev) = prev
            && let Some(bucket) = self.buckets.get_mut(&prev)
        {
            bucket.next = Some(freq);
        }
        if let Some(next) = next
            && let Some(bucket) = self.buckets.get_mut(&next)
        {
            bucket.prev = Some(freq);
        }
    }

    fn remove_bucket(&mut self, freq: u64, prev: Option<u64>, next: Option<u64>) {
        if let Some(prev) = prev
            && let Some(bucket) = self.buckets.get_mut(&prev)
        {
            bucket.next = next;
        }
        if let Some(next) = next
            && let Some(bucket) = self.buckets.get_mut(&next)
        {
            bucket.prev = prev;
        }
        self.buckets.remove(&freq);
    }

    fn list_push_front(&mut self, freq: u64, id: SlotId) {
        let Some(bucket) = self.buckets.get_mut(&freq) else {
            return;
        };
        let old_head = bucket.head;
        if let Some(entry) = self.entries.get_mut(id) {
            entry.prev = None;
            entry.next = old_head;
        }
        match old_head.and_then(|head| self.entries.get_mut(head)) {
            Some(entry) => entry.prev = Some(id),
            None => bucket.tail = Some(id),
        }
        bucket.head = Some(id);
    }

    fn list_remove(&mut self, freq: u64, id: SlotId) -> Option<()> {
        let (prev, next) = {
            let entry = self.entries.get(id)?;
            (entry.prev, entry.next)
        };
        let bucket = self.buckets.get_mut(&freq)?;

        match prev.and_then(|prev| self.entries.get_mut(prev)) {
            Some(entry) => entry.next = next,
            None => bucket.head = next,
        }
        match next.and_then(|next| self.entries.get_mut(next)) {
            Some(entry) => entry.prev = prev,
            None => bucket.tail = prev,
        }

        let entry = self.entries.get_mut(id)?;
        entry.prev = None;
        entry.next = None;
        Some(())
    }
}

impl<K, V> Default for FrequencyBuckets<K, V>
where
    K: Eq + Hash + Clone,
{
    fn default() -> Self {
        Self::new()
    }
}
