//! Memoization Usage Examples
//!
//! Walks through each memoization policy with a deliberately slow function,
//! showing how often the wrapped function actually runs.
//!
//! Run with: cargo run --example memo_usage --features std

extern crate memo_rs;

use core::num::NonZeroUsize;
use core::time::Duration;
use memo_rs::compose::then;
use memo_rs::func::{memoize, memoize_with_limit};
use memo_rs::{BoundedMemo, ExpiringMemo, Memo, MemoMetrics};
use std::cell::Cell;
use std::thread;
use std::time::Instant;

fn main() {
    println!("Memoization Usage Examples");
    println!("==========================\n");

    unlimited_memoization();
    bounded_memoization();
    expiring_memoization();
    closure_wrappers();
    composition();
    metrics_report();
}

/// Simulates an expensive computation.
fn slow_square(x: u64) -> u64 {
    thread::sleep(Duration::from_millis(20));
    x * x
}

fn unlimited_memoization() {
    println!("1. Unlimited memoization");
    println!("------------------------");

    let mut memo = Memo::new(slow_square);

    let start = Instant::now();
    let first = memo.call(12);
    let cold = start.elapsed();

    let start = Instant::now();
    let second = memo.call(12);
    let warm = start.elapsed();

    println!("   first call:  {} ({:?})", first, cold);
    println!("   second call: {} ({:?}, served from cache)", second, warm);
    println!("   cached entries: {}\n", memo.len());
}

fn bounded_memoization() {
    println!("2. Bounded memoization (LRU)");
    println!("----------------------------");

    let mut memo = BoundedMemo::new(slow_square, NonZeroUsize::new(2).unwrap());

    memo.call(2);
    memo.call(3);
    memo.call(4); // capacity 2: the entry for 2 is evicted

    println!("   after calling with 2, 3, 4 at capacity 2:");
    println!("   2 cached: {}", memo.is_cached(&2));
    println!("   3 cached: {}", memo.is_cached(&3));
    println!("   4 cached: {}", memo.is_cached(&4));
    println!("   evictions: {}\n", memo.counters().evictions);
}

fn expiring_memoization() {
    println!("3. Expiring memoization (TTL)");
    println!("-----------------------------");

    let mut memo = ExpiringMemo::new(slow_square, Duration::from_millis(50));

    memo.call(7);
    memo.call(7); // fresh: served from cache
    thread::sleep(Duration::from_millis(80));
    memo.call(7); // stale: recomputed

    println!("   calls: 3, underlying runs: {}", memo.counters().misses);
    println!("   expirations observed: {}\n", memo.counters().expirations);
}

fn closure_wrappers() {
    println!("4. Closure wrappers");
    println!("-------------------");

    let calls = Cell::new(0u32);
    let mut double = memoize(|x: u32| {
        calls.set(calls.get() + 1);
        x * 2
    });

    for x in [2, 3, 2, 3, 2] {
        double(x);
    }
    println!("   5 calls over 2 distinct inputs ran the function {} times", calls.get());

    let mut bounded = memoize_with_limit(slow_square, NonZeroUsize::new(16).unwrap());
    println!("   bounded wrapper result: {}\n", bounded(9));
}

fn composition() {
    println!("5. Composition feeding memoization");
    println!("----------------------------------");

    let mut pipeline = memoize(then(|x: u32| x + 1, |x: u32| x * 2));
    println!("   then(+1, *2) memoized at 3: {}", pipeline(3));
    println!("   cached repeat:              {}\n", pipeline(3));
}

fn metrics_report() {
    println!("6. Metrics report");
    println!("-----------------");

    let mut memo = Memo::new(|x: u32| x + 1);
    memo.call(1);
    memo.call(1);
    memo.call(2);

    println!("   strategy: {}", memo.strategy_name());
    for (name, value) in memo.metrics() {
        println!("   {name}: {value}");
    }
}
