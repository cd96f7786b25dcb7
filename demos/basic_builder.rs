//! Example demonstrating runtime policy selection with CacheBuilder.
//!
//! Run with: cargo run --example basic_builder

use fixcache::builder::{CacheBuilder, CachePolicy};
use fixcache::traits::FixedCapacityMap;

fn main() {
    println!("=== CacheBuilder Examples ===\n");

    // Example 1: LRU Cache
    println!("1. LRU Cache");
    let mut lru = CacheBuilder::new(3).build::<u64, String>(CachePolicy::Lru);

    lru.put(1, "one".to_string());
    lru.put(2, "two".to_string());
    lru.put(3, "three".to_string());

    // Access key 1 to make it MRU
    lru.get(&1);

    // Put key 4, evicts LRU (key 2)
    lru.put(4, "four".to_string());

    println!("   contains 1? {} (was accessed)", lru.contains(&1));
    println!("   contains 2? {} (evicted as LRU)", lru.contains(&2));
    println!("   contains 4? {} (just inserted)", lru.contains(&4));
    println!();

    // Example 2: LFU Cache
    println!("2. LFU Cache");
    let mut lfu = CacheBuilder::new(3).build::<u64, String>(CachePolicy::Lfu);

    lfu.put(1, "one".to_string());
    lfu.put(2, "two".to_string());
    lfu.put(3, "three".to_string());

    lfu.get(&1);
    lfu.get(&1);
    lfu.get(&3);

    // Put key 4, evicts key 2 (lowest frequency)
    lfu.put(4, "four".to_string());

    println!("   contains 1? {} (highest frequency)", lfu.contains(&1));
    println!("   contains 2? {} (never accessed)", lfu.contains(&2));
    println!();

    // Example 3: Common operations
    println!("3. Common Operations");
    let mut cache = CacheBuilder::new(10).build::<u64, String>(CachePolicy::Lru);

    let old = cache.put(1, "original".to_string());
    println!("   put returned: {:?}", old);
    let old = cache.put(1, "updated".to_string());
    println!("   put returned previous: {:?}", old);

    if let Some(value) = cache.get(&1) {
        println!("   get(&1): {}", value);
    }

    // peek and contains don't update access order
    println!("   peek(&1): {:?}", cache.peek(&1));
    println!("   contains(&99): {}", cache.contains(&99));
    println!(
        "   len: {}, capacity: {}, is_empty: {}",
        cache.len(),
        cache.capacity(),
        cache.is_empty()
    );
    println!();

    // Example 4: Invalid capacity
    println!("4. Invalid Capacity");
    match CacheBuilder::new(0).try_build::<u64, String>(CachePolicy::Lfu) {
        Ok(_) => println!("   unexpected success"),
        Err(err) => println!("   error: {}", err),
    }
}

// Expected output:
// === CacheBuilder Examples ===
//
// 1. LRU Cache
//    contains 1? true (was accessed)
//    contains 2? false (evicted as LRU)
//    contains 4? true (just inserted)
//
// 2. LFU Cache
//    contains 1? true (highest frequency)
//    contains 2? false (never accessed)
//
// 3. Common Operations
//    put returned: None
//    put returned previous: Some("original")
//    get(&1): updated
//    peek(&1): Some("updated")
//    contains(&99): false
//    len: 1, capacity: 10, is_empty: false
//
// 4. Invalid Capacity
//    error: capacity must be greater than zero
