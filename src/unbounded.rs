//! Unlimited Memoization
//!
//! The simplest policy: every distinct input is cached forever. A hit
//! returns a clone of the stored result; a miss invokes the wrapped
//! function, stores the result unconditionally, and returns it.
//!
//! There is no eviction — unbounded growth is the accepted tradeoff for
//! simplicity. If the input domain is unbounded, use
//! [`BoundedMemo`](crate::BoundedMemo) instead; if the memoizer must be
//! shared across threads, use [`ConcurrentMemo`](crate::concurrent) — this
//! type requires `&mut self` and has no synchronization.
//!
//! # Failure Semantics
//!
//! A panic in the wrapped function propagates to the caller. The result is
//! stored only after the function returns, so a failed computation leaves
//! the cache unchanged.

extern crate alloc;

use crate::metrics::{MemoCounters, MemoMetrics};
use alloc::collections::BTreeMap;
use alloc::string::String;
use core::fmt;
use core::hash::{BuildHasher, Hash};

#[cfg(feature = "hashbrown")]
use hashbrown::DefaultHashBuilder;
#[cfg(feature = "hashbrown")]
use hashbrown::HashMap;

#[cfg(not(feature = "hashbrown"))]
use std::collections::hash_map::RandomState as DefaultHashBuilder;
#[cfg(not(feature = "hashbrown"))]
use std::collections::HashMap;

/// A memoized wrapper around a unary function, caching every result.
///
/// # Examples
///
/// ```
/// use memo_rs::Memo;
///
/// let mut fib = Memo::new(|n: u64| {
///     // pretend this is expensive
///     (1..=n).product::<u64>()
/// });
///
/// assert_eq!(fib.call(5), 120);
/// assert_eq!(fib.call(5), 120); // cached
/// assert_eq!(fib.len(), 1);
/// ```
pub struct Memo<T, R, F, S = DefaultHashBuilder> {
    cache: HashMap<T, R, S>,
    func: F,
    counters: MemoCounters,
}

impl<T: Hash + Eq, R, F> Memo<T, R, F, DefaultHashBuilder> {
    /// Wraps `func` with an empty cache and the default hasher.
    pub fn new(func: F) -> Self {
        Self::with_hasher(func, DefaultHashBuilder::default())
    }
}

impl<T: Hash + Eq, R, F, S: BuildHasher> Memo<T, R, F, S> {
    /// Wraps `func` with an empty cache and the given hash builder.
    pub fn with_hasher(func: F, hash_builder: S) -> Self {
        Memo {
            cache: HashMap::with_hasher(hash_builder),
            func,
            counters: MemoCounters::new(),
        }
    }

    /// Returns the number of cached results.
    #[inline]
    pub fn len(&self) -> usize {
        self.cache.len()
    }

    /// Returns `true` if nothing has been cached yet.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }

    /// Returns the hit/miss counters.
    #[inline]
    pub fn counters(&self) -> &MemoCounters {
        &self.counters
    }

    /// Drops all cached results.
    pub fn clear(&mut self) {
        self.cache.clear();
    }
}

impl<T, R, F, S> Memo<T, R, F, S>
where
    T: Hash + Eq + Clone,
    R: Clone,
    F: FnMut(T) -> R,
    S: BuildHasher,
{
    /// Invokes the wrapped function through the cache.
    ///
    /// Returns the cached result when `input` has been seen before;
    /// otherwise computes, stores, and returns it.
    pub fn call(&mut self, input: T) -> R {
        if let Some(value) = self.cache.get(&input) {
            self.counters.record_hit();
            return value.clone();
        }
        self.counters.record_miss();
        let value = (self.func)(input.clone());
        self.cache.insert(input, value.clone());
        value
    }
}

impl<T: Hash + Eq, R, F, S: BuildHasher> MemoMetrics for Memo<T, R, F, S> {
    fn metrics(&self) -> BTreeMap<String, f64> {
        self.counters.as_metrics()
    }

    fn strategy_name(&self) -> &'static str {
        "Unbounded"
    }
}

impl<T, R, F, S> fmt::Debug for Memo<T, R, F, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Memo")
            .field("len", &self.cache.len())
            .field("counters", &self.counters)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repeat_input_computes_once() {
        let mut calls = 0u32;
        let mut memo = Memo::new(|x: i32| {
            calls += 1;
            x * 2
        });

        // Closure borrows `calls`, so assert through the counters instead.
        assert_eq!(memo.call(2), 4);
        assert_eq!(memo.call(2), 4);
        assert_eq!(memo.counters().misses, 1);
        assert_eq!(memo.counters().hits, 1);
        drop(memo);
        assert_eq!(calls, 1);
    }

    #[test]
    fn test_distinct_inputs_cached_independently() {
        use core::cell::Cell;

        let calls = Cell::new(0u32);
        let mut memo = Memo::new(|x: i32| {
            calls.set(calls.get() + 1);
            x * 2
        });

        assert_eq!(memo.call(2), 4);
        assert_eq!(memo.call(3), 6);
        assert_eq!(memo.call(2), 4);
        assert_eq!(memo.call(3), 6);
        assert_eq!(calls.get(), 2);
        assert_eq!(memo.len(), 2);
    }

    #[test]
    fn test_clear_forces_recompute() {
        use core::cell::Cell;

        let calls = Cell::new(0u32);
        let mut memo = Memo::new(|x: i32| {
            calls.set(calls.get() + 1);
            x + 1
        });

        memo.call(1);
        memo.clear();
        assert!(memo.is_empty());
        memo.call(1);
        assert_eq!(calls.get(), 2);
    }

    #[test]
    fn test_metrics_report() {
        let mut memo = Memo::new(|x: u32| x);
        memo.call(1);
        memo.call(1);
        memo.call(2);

        let report = memo.metrics();
        assert_eq!(report.get("requests"), Some(&3.0));
        assert_eq!(report.get("cache_hits"), Some(&1.0));
        assert_eq!(report.get("cache_misses"), Some(&2.0));
        assert_eq!(memo.strategy_name(), "Unbounded");
    }

    #[test]
    fn test_panic_in_function_caches_nothing() {
        extern crate std;

        let mut memo = Memo::new(|x: i32| {
            if x < 0 {
                panic!("negative input");
            }
            x * 2
        });

        let result = std::panic::catch_unwind(core::panic::AssertUnwindSafe(|| memo.call(-1)));
        assert!(result.is_err());
        assert!(memo.is_empty());

        // The memoizer keeps working after the failed call.
        assert_eq!(memo.call(1), 2);
        assert_eq!(memo.len(), 1);
    }
}
