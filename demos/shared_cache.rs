//! Sharing one cache between threads.
//!
//! Run with: cargo run --example shared_cache --features concurrency

use std::thread;

use fixcache::policy::lfu::LfuCache;
use fixcache::sync::ConcurrentCache;
use fixcache::traits::LfuPolicy;

fn main() {
    let cache = ConcurrentCache::new(LfuCache::<u32, String>::new(8));
    cache.put(0, "config".to_string());

    let handles: Vec<_> = (1..=4)
        .map(|worker| {
            let cache = cache.clone();
            thread::spawn(move || {
                for _ in 0..10 {
                    let _ = cache.get(&0);
                }
                cache.put(worker, format!("worker-{worker}"));
            })
        })
        .collect();
    for handle in handles {
        handle.join().expect("worker thread panicked");
    }

    println!("len: {}", cache.len());
    println!("freq of key 0: {:?}", cache.with(|c| c.frequency(&0)));
    println!("get 3: {:?}", cache.get(&3));
}

// Expected output:
// len: 5
// freq of key 0: Some(41)
// get 3: Some("worker-3")
