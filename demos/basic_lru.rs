use fixcache::policy::lru::LruCache;
use fixcache::traits::{FixedCapacityMap, LruPolicy};

fn main() {
    let mut cache: LruCache<u32, String> = LruCache::new(2);

    cache.put(1, "alpha".to_string());
    cache.put(2, "beta".to_string());

    if let Some(value) = cache.get(&1) {
        println!("hit 1: {}", value);
    }

    println!("next victim: {:?}", cache.peek_lru().map(|(k, _)| *k));
    cache.put(3, "gamma".to_string());

    println!("contains 2? {}", cache.contains(&2));
    println!("get 3: {:?}", cache.get(&3));
}

// Expected output:
// hit 1: alpha
// next victim: Some(2)
// contains 2? false
// get 3: Some("gamma")
//
// Explanation: capacity=2; after get(&1), key 1 is MRU and key 2 is LRU.
// Putting key 3 evicts key 2.
