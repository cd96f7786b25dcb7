#![no_main]

use fixcache::policy::lru::LruCache;
use fixcache::traits::{FixedCapacityMap, LruPolicy};
use libfuzzer_sys::fuzz_target;

// Fuzz arbitrary get/put/peek sequences on LruCache
//
// The first byte picks the capacity; each following triple is (op, key, value).
fuzz_target!(|data: &[u8]| {
    let Some((&cap, rest)) = data.split_first() else {
        return;
    };
    let capacity = usize::from(cap % 32) + 1;
    let mut cache: LruCache<u8, u8> = LruCache::new(capacity);

    for chunk in rest.chunks_exact(3) {
        let (op, key, value) = (chunk[0] % 4, chunk[1], chunk[2]);

        match op {
            0 => {
                let was_full = cache.len() == capacity;
                let victim = cache.peek_lru().map(|(k, _)| *k);
                let existed = cache.contains(&key);
                cache.put(key, value);
                if was_full && !existed {
                    assert!(!cache.contains(&victim.unwrap()));
                }
                assert_eq!(cache.peek(&key), Some(&value));
                assert_eq!(cache.recency_rank(&key), Some(0));
            }
            1 => {
                if cache.get(&key).is_some() {
                    assert_eq!(cache.recency_rank(&key), Some(0));
                }
            }
            2 => {
                let _ = cache.peek(&key);
            }
            3 => {
                let before: Vec<u8> = cache.iter().map(|(k, _)| *k).collect();
                let _ = cache.contains(&key);
                let after: Vec<u8> = cache.iter().map(|(k, _)| *k).collect();
                assert_eq!(before, after);
            }
            _ => unreachable!(),
        }

        assert!(cache.len() <= capacity);
        cache.check_invariants().unwrap();
    }

    let snapshot = cache.metrics_snapshot();
    assert_eq!(snapshot.cache_len, cache.len());
});
