#![no_main]

use fixcache::ds::FrequencyBuckets;
use libfuzzer_sys::fuzz_target;

// Fuzz arbitrary operation sequences on FrequencyBuckets
//
// Tests random sequences of insert, touch, pop_min and peek_min to find
// edge cases in bucket linking and min_freq maintenance.
fuzz_target!(|data: &[u8]| {
    let mut buckets: FrequencyBuckets<u8, u8> = FrequencyBuckets::new();

    for chunk in data.chunks_exact(2) {
        let (op, key) = (chunk[0] % 5, chunk[1]);

        match op {
            0 => {
                buckets.insert(key, chunk[0]);
            }
            1 => {
                buckets.touch(&key);
            }
            2 => {
                if let Some((min_key, _, freq)) = buckets.peek_min() {
                    let min_key = *min_key;
                    assert_eq!(buckets.pop_min().map(|(k, _, f)| (k, f)), Some((min_key, freq)));
                    assert!(!buckets.contains(&min_key));
                }
            }
            3 => {
                let _ = buckets.touch_get(&key);
            }
            4 => {
                if let Some(min) = buckets.min_freq() {
                    assert!(!buckets.bucket_keys(min).is_empty());
                }
            }
            _ => unreachable!(),
        }

        buckets.check_invariants().unwrap();

        if buckets.is_empty() {
            assert_eq!(buckets.min_freq(), None);
            assert!(buckets.peek_min().is_none());
        } else {
            assert!(buckets.min_freq().is_some());
        }
    }
});
