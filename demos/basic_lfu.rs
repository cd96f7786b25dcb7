use fixcache::policy::lfu::LfuCache;
use fixcache::traits::{FixedCapacityMap, LfuPolicy};

fn main() {
    let mut cache: LfuCache<&str, String> = LfuCache::new(2);

    cache.put("a", "alpha".to_string());
    cache.put("b", "beta".to_string());

    cache.get(&"a");
    println!("freq a: {:?}, freq b: {:?}", cache.frequency(&"a"), cache.frequency(&"b"));
    cache.put("c", "gamma".to_string());

    println!("contains a? {}", cache.contains(&"a"));
    println!("contains b? {}", cache.contains(&"b"));

    // "c" is the only frequency-1 entry, so "d" replaces it
    cache.put("d", "delta".to_string());
    println!("contains c? {}", cache.contains(&"c"));
}

// Expected output:
// freq a: Some(2), freq b: Some(1)
// contains a? true
// contains b? false
// contains c? false
//
// Explanation: capacity=2; "a" is accessed before inserting "c", so "b" is evicted.
