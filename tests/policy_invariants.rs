// ==============================================
// CROSS-POLICY INVARIANT TESTS (integration)
// ==============================================
//
// Behavioral properties shared by both policies, plus model-based checks
// that replay random operation sequences against a naive reference cache.

use fixcache::builder::{CacheBuilder, CachePolicy};
use fixcache::policy::lfu::LfuCache;
use fixcache::policy::lru::LruCache;
use fixcache::traits::{FixedCapacityMap, LfuPolicy, LruPolicy};
use proptest::prelude::*;

// ==============================================
// Capacity-0 Behavior
// ==============================================

mod zero_capacity {
    use super::*;

    #[test]
    fn try_new_rejects_zero() {
        assert!(LruCache::<u32, u32>::try_new(0).is_err());
        assert!(LfuCache::<u32, u32>::try_new(0).is_err());
        assert!(
            CacheBuilder::new(0)
                .try_build::<u32, u32>(CachePolicy::Lfu)
                .is_err()
        );
    }

    #[test]
    #[should_panic(expected = "capacity must be greater than zero")]
    fn lru_new_panics() {
        let _ = LruCache::<u32, u32>::new(0);
    }

    #[test]
    #[should_panic(expected = "capacity must be greater than zero")]
    fn lfu_new_panics() {
        let _ = LfuCache::<u32, u32>::new(0);
    }
}

// ==============================================
// Shared Contract
// ==============================================

mod shared_contract {
    use super::*;

    type DynCache = Box<dyn FixedCapacityMap<u32, String>>;

    fn both(capacity: usize) -> Vec<DynCache> {
        let lru: DynCache = Box::new(LruCache::new(capacity));
        let lfu: DynCache = Box::new(LfuCache::new(capacity));
        vec![lru, lfu]
    }

    #[test]
    fn round_trip() {
        for mut cache in both(3) {
            for k in 0..10u32 {
                cache.put(k, format!("v{k}"));
                assert_eq!(cache.get(&k), Some(&format!("v{k}")));
            }
        }
    }

    #[test]
    fn overwrite_keeps_len() {
        for mut cache in both(3) {
            cache.put(1, "v1".to_string());
            cache.put(2, "x".to_string());
            let len = cache.len();
            assert_eq!(cache.put(1, "v2".to_string()), Some("v1".to_string()));
            assert_eq!(cache.get(&1), Some(&"v2".to_string()));
            assert_eq!(cache.len(), len);
        }
    }

    #[test]
    fn len_never_exceeds_capacity() {
        for mut cache in both(4) {
            for k in 0..100u32 {
                cache.put(k % 13, k.to_string());
                cache.get(&(k % 7));
                assert!(cache.len() <= cache.capacity());
            }
            assert_eq!(cache.len(), 4);
        }
    }

    #[test]
    fn miss_does_not_change_state() {
        for mut cache in both(2) {
            cache.put(1, "a".to_string());
            assert_eq!(cache.get(&42), None);
            assert_eq!(cache.peek(&42), None);
            assert_eq!(cache.len(), 1);
        }
    }
}

// ==============================================
// Reference-Model Checks
// ==============================================

#[derive(Debug, Clone)]
enum Op {
    Get(u8),
    Put(u8, u32),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0u8..16).prop_map(Op::Get),
        (0u8..16, any::<u32>()).prop_map(|(k, v)| Op::Put(k, v)),
    ]
}

/// Most recently used first.
struct LruModel {
    capacity: usize,
    entries: Vec<(u8, u32)>,
}

impl LruModel {
    fn get(&mut self, key: u8) -> Option<u32> {
        let pos = self.entries.iter().position(|(k, _)| *k == key)?;
        let entry = self.entries.remove(pos);
        self.entries.insert(0, entry);
        Some(entry.1)
    }

    fn put(&mut self, key: u8, value: u32) -> Option<u32> {
        if let Some(pos) = self.entries.iter().position(|(k, _)| *k == key) {
            let (_, old) = self.entries.remove(pos);
            self.entries.insert(0, (key, value));
            return Some(old);
        }
        if self.entries.len() == self.capacity {
            self.entries.pop();
        }
        self.entries.insert(0, (key, value));
        None
    }

    fn victim(&self) -> Option<u8> {
        self.entries.last().map(|(k, _)| *k)
    }
}

struct LfuEntry {
    key: u8,
    value: u32,
    freq: u64,
    // tick at which the entry reached its current frequency
    stamp: u64,
}

struct LfuModel {
    capacity: usize,
    tick: u64,
    entries: Vec<LfuEntry>,
}

impl LfuModel {
    fn bump(&mut self, pos: usize) {
        self.tick += 1;
        let entry = &mut self.entries[pos];
        entry.freq += 1;
        entry.stamp = self.tick;
    }

    fn get(&mut self, key: u8) -> Option<u32> {
        let pos = self.entries.iter().position(|e| e.key == key)?;
        self.bump(pos);
        Some(self.entries[pos].value)
    }

    fn put(&mut self, key: u8, value: u32) -> Option<u32> {
        if let Some(pos) = self.entries.iter().position(|e| e.key == key) {
            let old = std::mem::replace(&mut self.entries[pos].value, value);
            self.bump(pos);
            return Some(old);
        }
        if self.entries.len() == self.capacity
            && let Some(pos) = self.victim_pos()
        {
            self.entries.remove(pos);
        }
        self.tick += 1;
        self.entries.push(LfuEntry {
            key,
            value,
            freq: 1,
            stamp: self.tick,
        });
        None
    }

    fn victim_pos(&self) -> Option<usize> {
        self.entries
            .iter()
            .enumerate()
            .min_by_key(|(_, e)| (e.freq, e.stamp))
            .map(|(pos, _)| pos)
    }

    fn victim(&self) -> Option<u8> {
        self.victim_pos().map(|pos| self.entries[pos].key)
    }
}

proptest! {
    /// Property: LruCache matches the reference model step for step
    #[cfg_attr(miri, ignore)]
    #[test]
    fn prop_lru_matches_model(
        capacity in 1usize..8,
        ops in prop::collection::vec(op_strategy(), 0..300)
    ) {
        let mut cache = LruCache::new(capacity);
        let mut model = LruModel { capacity, entries: Vec::new() };

        for op in ops {
            match op {
                Op::Get(k) => {
                    prop_assert_eq!(cache.get(&k).copied(), model.get(k));
                }
                Op::Put(k, v) => {
                    prop_assert_eq!(cache.put(k, v), model.put(k, v));
                }
            }
            prop_assert_eq!(cache.len(), model.entries.len());
            prop_assert_eq!(cache.peek_lru().map(|(k, _)| *k), model.victim());
            let order: Vec<u8> = cache.iter().map(|(k, _)| *k).collect();
            let expected: Vec<u8> = model.entries.iter().map(|(k, _)| *k).collect();
            prop_assert_eq!(order, expected);
            prop_assert!(cache.check_invariants().is_ok());
        }
    }

    /// Property: LfuCache matches the reference model step for step
    #[cfg_attr(miri, ignore)]
    #[test]
    fn prop_lfu_matches_model(
        capacity in 1usize..8,
        ops in prop::collection::vec(op_strategy(), 0..300)
    ) {
        let mut cache = LfuCache::new(capacity);
        let mut model = LfuModel { capacity, tick: 0, entries: Vec::new() };

        for op in ops {
            match op {
                Op::Get(k) => {
                    prop_assert_eq!(cache.get(&k).copied(), model.get(k));
                }
                Op::Put(k, v) => {
                    prop_assert_eq!(cache.put(k, v), model.put(k, v));
                }
            }
            prop_assert_eq!(cache.len(), model.entries.len());
            prop_assert_eq!(cache.peek_lfu().map(|(k, _)| *k), model.victim());
            for entry in &model.entries {
                prop_assert_eq!(cache.frequency(&entry.key), Some(entry.freq));
            }
            prop_assert_eq!(
                cache.min_frequency(),
                model.entries.iter().map(|e| e.freq).min()
            );
            prop_assert!(cache.check_invariants().is_ok());
        }
    }

    /// Property: the next new-key put into a full cache evicts the predicted victim
    #[cfg_attr(miri, ignore)]
    #[test]
    fn prop_eviction_removes_predicted_victim(
        capacity in 1usize..6,
        ops in prop::collection::vec(op_strategy(), 0..100)
    ) {
        let mut lru = LruCache::new(capacity);
        let mut lfu = LfuCache::new(capacity);
        for op in &ops {
            match *op {
                Op::Get(k) => {
                    lru.get(&k);
                    lfu.get(&k);
                }
                Op::Put(k, v) => {
                    lru.put(k, v);
                    lfu.put(k, v);
                }
            }
        }

        // keys >= 16 are never produced by op_strategy
        let fresh = 200u8;
        if lru.len() == capacity {
            let victim = lru.peek_lru().map(|(k, _)| *k).unwrap();
            lru.put(fresh, 0);
            prop_assert!(!lru.contains(&victim));
            prop_assert_eq!(lru.len(), capacity);
        }
        if lfu.len() == capacity {
            let victim = lfu.peek_lfu().map(|(k, _)| *k).unwrap();
            lfu.put(fresh, 0);
            prop_assert!(!lfu.contains(&victim));
            prop_assert_eq!(lfu.frequency(&fresh), Some(1));
        }
    }
}
