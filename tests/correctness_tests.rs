//! Correctness Tests for the Memoizer Family
//!
//! This suite validates the observable contract of each memoization policy
//! using call-counting functions: a memoized wrapper must be observably
//! equivalent to the function it wraps, except for how often the underlying
//! function runs.
//!
//! ## Test Strategy
//! - Small capacities (1-3 entries) for predictable eviction behavior
//! - A manually advanced clock for expiration, so nothing sleeps
//! - Every eviction test asserts exactly which input must be recomputed

use core::cell::Cell;
use core::num::NonZeroUsize;
use core::time::Duration;
use memo_rs::clock::Clock;
use memo_rs::func::{memoize, memoize_with_limit};
use memo_rs::{AccessOrderMap, BoundedMemo, ExpiringMemo, Memo, MemoMetrics};

/// Manually advanced clock shared by reference with the memoizer under test.
struct StepClock(Cell<Duration>);

impl StepClock {
    fn start() -> Self {
        StepClock(Cell::new(Duration::ZERO))
    }

    fn advance_ms(&self, ms: u64) {
        self.0.set(self.0.get() + Duration::from_millis(ms));
    }
}

impl Clock for &StepClock {
    fn now(&self) -> Duration {
        self.0.get()
    }
}

/// Wraps a doubling function that counts its invocations.
fn counting_double(calls: &Cell<u32>) -> impl FnMut(i32) -> i32 + '_ {
    move |x| {
        calls.set(calls.get() + 1);
        x * 2
    }
}

// ============================================================================
// SEGMENT 1: UNLIMITED MEMOIZATION
// ============================================================================

#[test]
fn test_memoize_caches_results_without_recalculation() {
    let calls = Cell::new(0);
    let mut memoized = memoize(counting_double(&calls));

    assert_eq!(memoized(2), 4);
    assert_eq!(calls.get(), 1);

    assert_eq!(memoized(2), 4);
    assert_eq!(calls.get(), 1); // call count must not increase
}

#[test]
fn test_memoize_caches_different_inputs_independently() {
    let calls = Cell::new(0);
    let mut memoized = memoize(counting_double(&calls));

    assert_eq!(memoized(2), 4);
    assert_eq!(memoized(3), 6);
    assert_eq!(calls.get(), 2);

    assert_eq!(memoized(2), 4);
    assert_eq!(memoized(3), 6);
    assert_eq!(calls.get(), 2); // still 2: one computation per distinct input
}

#[test]
fn test_memo_struct_reports_hits_and_misses() {
    let mut memo = Memo::new(|x: i32| x * 2);
    memo.call(2);
    memo.call(2);
    memo.call(3);

    assert_eq!(memo.counters().misses, 2);
    assert_eq!(memo.counters().hits, 1);
    assert_eq!(memo.counters().requests(), 3);
    assert_eq!(memo.strategy_name(), "Unbounded");
}

#[test]
fn test_memo_grows_without_eviction() {
    let mut memo = Memo::new(|x: u32| x + 1);
    for x in 0..1000 {
        memo.call(x);
    }
    assert_eq!(memo.len(), 1000);
}

// ============================================================================
// SEGMENT 2: BOUNDED MEMOIZATION (LRU)
// ============================================================================

#[test]
fn test_bounded_memoize_eviction_behavior() {
    let calls = Cell::new(0);
    let mut memoized = memoize_with_limit(counting_double(&calls), NonZeroUsize::new(2).unwrap());

    assert_eq!(memoized(2), 4);
    assert_eq!(memoized(3), 6);
    assert_eq!(memoized(4), 8);
    assert_eq!(calls.get(), 3);

    // The most recently inserted key is still cached.
    assert_eq!(memoized(4), 8);
    assert_eq!(calls.get(), 3);

    // Key 2 was the least recently used when 4 overflowed the bound.
    assert_eq!(memoized(2), 4);
    assert_eq!(calls.get(), 4);
}

#[test]
fn test_bounded_memoize_hit_protects_entry_from_eviction() {
    let calls = Cell::new(0);
    let mut memo = BoundedMemo::new(counting_double(&calls), NonZeroUsize::new(2).unwrap());

    memo.call(2);
    memo.call(3);

    // Touch 2 so that 3 becomes the eviction candidate.
    memo.call(2);
    memo.call(4);

    assert!(memo.is_cached(&2));
    assert!(!memo.is_cached(&3));
    assert!(memo.is_cached(&4));
}

#[test]
fn test_bounded_memoize_never_exceeds_capacity() {
    let calls = Cell::new(0);
    let mut memo = BoundedMemo::new(counting_double(&calls), NonZeroUsize::new(3).unwrap());

    for round in 0..3 {
        for x in 0..20 {
            memo.call(x + round);
            assert!(memo.len() <= 3);
        }
    }
}

#[test]
fn test_bounded_memoize_repeated_input_is_stable() {
    let calls = Cell::new(0);
    let mut memo = BoundedMemo::new(counting_double(&calls), NonZeroUsize::new(1).unwrap());

    for _ in 0..10 {
        assert_eq!(memo.call(5), 10);
    }
    assert_eq!(calls.get(), 1);
}

// ============================================================================
// SEGMENT 3: EXPIRING MEMOIZATION (TTL)
// ============================================================================

#[test]
fn test_expiration_serves_fresh_and_recomputes_stale() {
    let clock = StepClock::start();
    let calls = Cell::new(0);
    let mut memo = ExpiringMemo::with_clock(
        counting_double(&calls),
        Duration::from_millis(100),
        &clock,
    );

    assert_eq!(memo.call(2), 4);
    assert_eq!(calls.get(), 1);

    // Within the TTL: served from cache.
    assert_eq!(memo.call(2), 4);
    assert_eq!(calls.get(), 1);

    // Past the TTL: recomputed.
    clock.advance_ms(150);
    assert_eq!(memo.call(2), 4);
    assert_eq!(calls.get(), 2);
}

#[test]
fn test_expiration_refreshes_stamp_on_recompute() {
    let clock = StepClock::start();
    let calls = Cell::new(0);
    let mut memo = ExpiringMemo::with_clock(
        counting_double(&calls),
        Duration::from_millis(100),
        &clock,
    );

    memo.call(1);
    clock.advance_ms(150);
    memo.call(1); // recompute at t=150
    clock.advance_ms(99);
    memo.call(1); // t=249, entry is 99ms old: fresh
    assert_eq!(calls.get(), 2);
}

#[test]
fn test_expiration_is_per_key() {
    let clock = StepClock::start();
    let calls = Cell::new(0);
    let mut memo = ExpiringMemo::with_clock(
        counting_double(&calls),
        Duration::from_millis(100),
        &clock,
    );

    memo.call(1);
    clock.advance_ms(70);
    memo.call(2);
    clock.advance_ms(70);

    // Key 1 is 140ms old and expired; key 2 is 70ms old and fresh.
    memo.call(1);
    memo.call(2);
    assert_eq!(calls.get(), 3);
    assert_eq!(memo.counters().expirations, 1);
}

// ============================================================================
// SEGMENT 4: ACCESS-ORDERED MAP INVARIANT
// ============================================================================

#[test]
fn test_front_is_always_least_recently_touched() {
    let mut map = AccessOrderMap::new();
    map.insert("a", 1);
    map.insert("b", 2);
    map.insert("c", 3);
    assert_eq!(map.front().map(|(k, _)| *k), Some("a"));

    map.get(&"a");
    assert_eq!(map.front().map(|(k, _)| *k), Some("b"));

    map.insert("b", 20);
    assert_eq!(map.front().map(|(k, _)| *k), Some("c"));

    map.get(&"c");
    assert_eq!(map.front().map(|(k, _)| *k), Some("a"));
}

#[test]
fn test_iteration_order_is_recency_order() {
    let mut map = AccessOrderMap::new();
    for i in 0..5 {
        map.insert(i, i);
    }
    map.get(&0);
    map.get(&2);

    let order: Vec<i32> = map.iter().map(|(k, _)| *k).collect();
    assert_eq!(order, [1, 3, 4, 0, 2]);
}

#[test]
fn test_interleaved_operations_maintain_invariant() {
    let mut map = AccessOrderMap::new();
    map.insert(1, 1);
    map.insert(2, 2);
    map.insert(3, 3);
    map.remove(&1);
    map.get(&2);
    map.insert(4, 4);
    map.pop_front(); // removes 3, the least recently touched

    let order: Vec<i32> = map.iter().map(|(k, _)| *k).collect();
    assert_eq!(order, [2, 4]);
}

// ============================================================================
// SEGMENT 5: WRAPPER INDEPENDENCE
// ============================================================================

#[test]
fn test_each_wrapper_owns_a_private_cache() {
    let calls = Cell::new(0);
    let count = |x: i32| {
        calls.set(calls.get() + 1);
        x
    };

    let mut first = memoize(count);
    let mut second = memoize(count);

    first(7);
    second(7);
    assert_eq!(calls.get(), 2); // no implicit sharing between wrappers
}

#[test]
fn test_composition_wraps_into_memoization() {
    use memo_rs::compose::{compose, then};

    let calls = Cell::new(0);
    let mut pipeline = memoize(then(
        |x: i32| {
            calls.set(calls.get() + 1);
            x + 1
        },
        |x: i32| x * 2,
    ));

    assert_eq!(pipeline(3), 8);
    assert_eq!(pipeline(3), 8);
    assert_eq!(calls.get(), 1);

    let reversed = compose(|x: i32| x * 2, |x: i32| x + 1);
    assert_eq!(reversed(3), 8);
}
