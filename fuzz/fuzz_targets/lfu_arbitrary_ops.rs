#![no_main]

use fixcache::policy::lfu::LfuCache;
use fixcache::traits::{FixedCapacityMap, LfuPolicy};
use libfuzzer_sys::fuzz_target;

// Fuzz arbitrary get/put sequences on LfuCache
//
// Checks frequency accounting and that eviction always removes the entry
// peek_lfu predicted.
fuzz_target!(|data: &[u8]| {
    let Some((&cap, rest)) = data.split_first() else {
        return;
    };
    let capacity = usize::from(cap % 32) + 1;
    let mut cache: LfuCache<u8, u8> = LfuCache::new(capacity);

    for chunk in rest.chunks_exact(3) {
        let (op, key, value) = (chunk[0] % 3, chunk[1], chunk[2]);
        let freq_before = cache.frequency(&key);

        match op {
            0 => {
                let victim = cache.peek_lfu().map(|(k, _)| *k);
                let was_full = cache.len() == capacity;
                let previous = cache.put(key, value);
                assert_eq!(previous.is_some(), freq_before.is_some());
                if was_full && freq_before.is_none() {
                    assert!(!cache.contains(&victim.unwrap()));
                }
                assert_eq!(cache.peek(&key), Some(&value));
            }
            1 => {
                let hit = cache.get(&key).is_some();
                assert_eq!(hit, freq_before.is_some());
            }
            2 => {
                let _ = cache.peek(&key);
                assert_eq!(cache.frequency(&key), freq_before);
            }
            _ => unreachable!(),
        }

        if op != 2 {
            let expected = match freq_before {
                Some(f) => f.saturating_add(1),
                None if op == 0 => 1,
                None => {
                    assert!(!cache.contains(&key));
                    continue;
                }
            };
            assert_eq!(cache.frequency(&key), Some(expected));
            assert_eq!(cache.min_frequency().map(|m| m <= expected), Some(true));
        }

        assert!(cache.len() <= capacity);
        cache.check_invariants().unwrap();
    }

    let snapshot = cache.metrics_snapshot();
    assert_eq!(snapshot.get_calls, snapshot.get_hits + snapshot.get_misses);
});
