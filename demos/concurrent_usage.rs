//! Concurrent Memoization Usage Examples
//!
//! Demonstrates the thread-safe memoizer and the map strategies behind it:
//! sharing one memoizer across a thread pool, racing threads on a cold key,
//! swapping in the lock-free snapshot strategy, and sharing one backing store
//! between two memoizers.
//!
//! Run with: cargo run --example concurrent_usage --features concurrent

extern crate memo_rs;

use memo_rs::map::{LockedMap, SharedMap, SnapshotMap};
use memo_rs::ConcurrentMemo;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::{Duration, Instant};

fn main() {
    println!("Concurrent Memoization Usage Examples");
    println!("=====================================\n");

    shared_across_threads();
    racing_on_a_cold_key();
    lock_free_backing();
    explicit_cache_sharing();
    atomic_map_operations();
}

fn shared_across_threads() {
    println!("1. One memoizer, many threads");
    println!("-----------------------------");

    let memo = Arc::new(ConcurrentMemo::new(|x: u64| {
        thread::sleep(Duration::from_millis(10));
        x * x
    }));

    // Warm the cache, then fan out readers.
    for x in 0..8 {
        memo.call(x);
    }

    let start = Instant::now();
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let memo = Arc::clone(&memo);
            thread::spawn(move || {
                let mut sum = 0;
                for x in 0..8 {
                    sum += memo.call(x);
                }
                sum
            })
        })
        .collect();
    for handle in handles {
        assert_eq!(handle.join().unwrap(), 140);
    }

    println!("   4 threads x 8 warm calls in {:?}", start.elapsed());
    println!(
        "   hits: {}, misses: {}\n",
        memo.counters().hits(),
        memo.counters().misses()
    );
}

fn racing_on_a_cold_key() {
    println!("2. Racing threads on a cold key");
    println!("-------------------------------");

    let runs = Arc::new(AtomicUsize::new(0));
    let counting = Arc::clone(&runs);
    let memo = Arc::new(ConcurrentMemo::new(move |x: u64| {
        counting.fetch_add(1, Ordering::SeqCst);
        thread::sleep(Duration::from_millis(5));
        x + 1
    }));

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let memo = Arc::clone(&memo);
            thread::spawn(move || memo.call(41))
        })
        .collect();
    for handle in handles {
        assert_eq!(handle.join().unwrap(), 42);
    }

    // No single-flight: several racers may each have computed, but every
    // caller got the correct answer and the cache converged to one entry.
    println!("   underlying runs: {} (1..=4 possible)", runs.load(Ordering::SeqCst));
    println!("   cached entries: {}\n", memo.len());
}

fn lock_free_backing() {
    println!("3. Lock-free snapshot backing");
    println!("-----------------------------");

    let memo = Arc::new(ConcurrentMemo::with_map(
        |x: u64| x.wrapping_mul(2654435761),
        SnapshotMap::new(),
    ));

    let handles: Vec<_> = (0..4)
        .map(|t| {
            let memo = Arc::clone(&memo);
            thread::spawn(move || {
                for x in 0..64 {
                    memo.call(x % (16 + t));
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    println!("   entries after 4 writer threads: {}", memo.len());
    println!("   readers never blocked: every get ran on an immutable snapshot\n");
}

fn explicit_cache_sharing() {
    println!("4. Two memoizers, one cache");
    println!("---------------------------");

    let shared: Arc<LockedMap<u64, u64>> = Arc::new(LockedMap::new());
    let first = ConcurrentMemo::with_map(|x: u64| x * 10, Arc::clone(&shared));
    let second = ConcurrentMemo::with_map(|x: u64| x * 10, Arc::clone(&shared));

    first.call(3);
    second.call(3); // hit: the entry came from `first`

    println!("   second memoizer hits: {}", second.counters().hits());
    println!("   shared store entries: {}\n", shared.len());
}

fn atomic_map_operations() {
    println!("5. Atomic compound map operations");
    println!("---------------------------------");

    let map: Arc<SnapshotMap<&'static str, usize>> = Arc::new(SnapshotMap::new());

    let handles: Vec<_> = (0..8)
        .map(|t| {
            let map = Arc::clone(&map);
            thread::spawn(move || map.insert_if_absent("leader", t).is_none())
        })
        .collect();
    let winners = handles
        .into_iter()
        .map(|h| h.join().unwrap())
        .filter(|&won| won)
        .count();

    println!("   8 threads raced insert_if_absent: {} winner", winners);
    println!("   elected value: {:?}", map.get(&"leader"));

    let current = map.get(&"leader").unwrap();
    let swapped = map.replace_if(&"leader", &current, 99);
    println!("   conditional replace succeeded: {swapped}");
    println!("   final map entries: {:?}", map.entries());
}
