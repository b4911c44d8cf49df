//! Thread-Safe Memoization
//!
//! [`ConcurrentMemo`] applies the unlimited-memoize policy on top of any
//! [`SharedMap`] strategy, so the wrapped function can be called through
//! `&self` from many threads at once.
//!
//! # Race Semantics
//!
//! Two threads missing on the same key concurrently may both invoke the
//! wrapped function and both store their result; the last write wins, and
//! both callers return a correct value. The memoizer does **not** coalesce
//! concurrent computations of the same key — single-flight semantics are
//! deliberately out of scope. If the wrapped function is expensive enough
//! that duplicate computation hurts, de-duplicate upstream.
//!
//! A consequence worth knowing: the wrapped function runs *outside* any map
//! operation, so a slow computation never blocks other keys, and the map
//! strategies' atomicity guarantees are never held hostage to user code.
//!
//! # Choosing a Strategy
//!
//! [`ConcurrentMemo::new`] uses [`LockedMap`](crate::map::LockedMap), the
//! right default for thread-pool workloads. [`ConcurrentMemo::with_map`]
//! accepts any strategy — [`SnapshotMap`](crate::map::SnapshotMap) for
//! lock-free read-mostly caches — or an `Arc`-wrapped map to share one
//! backing store between several memoizers. Sharing is always explicit:
//! every memoizer built with `new` owns a private cache.

extern crate alloc;

use crate::map::{LockedMap, SharedMap};
use crate::metrics::{MemoMetrics, SharedMemoCounters};
use alloc::collections::BTreeMap;
use alloc::string::String;
use core::fmt;
use core::hash::Hash;

/// A thread-safe memoized wrapper around a unary function.
///
/// # Examples
///
/// ```rust,ignore
/// use memo_rs::ConcurrentMemo;
/// use std::sync::Arc;
/// use std::thread;
///
/// let memo = Arc::new(ConcurrentMemo::new(|x: u64| x * x));
///
/// let handles: Vec<_> = (0..4)
///     .map(|_| {
///         let memo = Arc::clone(&memo);
///         thread::spawn(move || memo.call(12))
///     })
///     .collect();
///
/// for handle in handles {
///     assert_eq!(handle.join().unwrap(), 144);
/// }
/// ```
pub struct ConcurrentMemo<T, R, F, M = LockedMap<T, R>> {
    map: M,
    func: F,
    counters: SharedMemoCounters,
    _marker: core::marker::PhantomData<(T, R)>,
}

impl<T, R, F> ConcurrentMemo<T, R, F, LockedMap<T, R>>
where
    T: Hash + Eq + Clone,
    R: Clone,
{
    /// Wraps `func` with a private lock-based cache.
    pub fn new(func: F) -> Self {
        Self::with_map(func, LockedMap::new())
    }
}

impl<T, R, F, M> ConcurrentMemo<T, R, F, M>
where
    T: Hash + Eq + Clone,
    R: Clone,
    M: SharedMap<T, R>,
{
    /// Wraps `func` over an explicit backing map.
    ///
    /// Pass an `Arc`-wrapped map to share one cache between several
    /// memoizers or other owners.
    pub fn with_map(func: F, map: M) -> Self {
        ConcurrentMemo {
            map,
            func,
            counters: SharedMemoCounters::new(),
            _marker: core::marker::PhantomData,
        }
    }

    /// Returns the number of cached results.
    #[inline]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Returns `true` if nothing has been cached yet.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Returns the hit/miss counters.
    #[inline]
    pub fn counters(&self) -> &SharedMemoCounters {
        &self.counters
    }

    /// Drops all cached results.
    pub fn clear(&self) {
        self.map.clear();
    }

    /// Invokes the wrapped function through the cache.
    ///
    /// Concurrent callers with the same missing input may each compute; the
    /// last write wins and every caller gets a correct result.
    pub fn call(&self, input: T) -> R
    where
        F: Fn(T) -> R,
    {
        if let Some(value) = self.map.get(&input) {
            self.counters.record_hit();
            return value;
        }
        self.counters.record_miss();
        let value = (self.func)(input.clone());
        self.map.insert(input, value.clone());
        value
    }
}

impl<T, R, F, M> MemoMetrics for ConcurrentMemo<T, R, F, M>
where
    T: Hash + Eq + Clone,
    R: Clone,
    M: SharedMap<T, R>,
{
    fn metrics(&self) -> BTreeMap<String, f64> {
        self.counters.as_metrics()
    }

    fn strategy_name(&self) -> &'static str {
        "Concurrent"
    }
}

impl<T, R, F, M> fmt::Debug for ConcurrentMemo<T, R, F, M>
where
    T: Hash + Eq + Clone,
    R: Clone,
    M: SharedMap<T, R>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConcurrentMemo")
            .field("len", &self.map.len())
            .field("counters", &self.counters)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::map::SnapshotMap;

    extern crate std;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;
    use std::thread;
    use std::vec::Vec;

    #[test]
    fn test_repeat_input_computes_once() {
        let calls = AtomicUsize::new(0);
        let memo = ConcurrentMemo::new(|x: i32| {
            calls.fetch_add(1, Ordering::SeqCst);
            x * 2
        });

        assert_eq!(memo.call(2), 4);
        assert_eq!(memo.call(2), 4);
        assert_eq!(memo.counters().hits(), 1);
        assert_eq!(memo.counters().misses(), 1);
        drop(memo);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_multi_threaded_callers_agree() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counting = Arc::clone(&calls);
        let memo = Arc::new(ConcurrentMemo::new(move |x: u64| {
            counting.fetch_add(1, Ordering::SeqCst);
            x * x
        }));

        let mut handles: Vec<std::thread::JoinHandle<u64>> = Vec::new();
        for _ in 0..8 {
            let memo = Arc::clone(&memo);
            handles.push(thread::spawn(move || memo.call(12)));
        }
        for handle in handles {
            assert_eq!(handle.join().unwrap(), 144);
        }

        // Racing threads may each have computed, but the cache converged.
        assert_eq!(memo.len(), 1);
        assert!(calls.load(Ordering::SeqCst) >= 1);
        assert!(calls.load(Ordering::SeqCst) <= 8);
    }

    #[test]
    fn test_snapshot_map_backing() {
        let memo = ConcurrentMemo::with_map(|x: i32| x + 1, SnapshotMap::new());
        assert_eq!(memo.call(1), 2);
        assert_eq!(memo.call(1), 2);
        assert_eq!(memo.counters().hits(), 1);
        assert_eq!(memo.len(), 1);
    }

    #[test]
    fn test_shared_backing_store_is_explicit() {
        let shared: Arc<LockedMap<i32, i32>> = Arc::new(LockedMap::new());
        let first = ConcurrentMemo::with_map(|x: i32| x * 10, Arc::clone(&shared));
        let second = ConcurrentMemo::with_map(|x: i32| x * 10, Arc::clone(&shared));

        first.call(3);
        // The second memoizer sees the first one's entry.
        assert_eq!(second.call(3), 30);
        assert_eq!(second.counters().hits(), 1);
        assert_eq!(second.counters().misses(), 0);
        assert_eq!(shared.len(), 1);
    }

    #[test]
    fn test_clear_through_shared_reference() {
        let memo = ConcurrentMemo::new(|x: i32| x);
        memo.call(1);
        memo.call(2);
        assert_eq!(memo.len(), 2);
        memo.clear();
        assert!(memo.is_empty());
    }

    #[test]
    fn test_metrics_report() {
        let memo = ConcurrentMemo::new(|x: i32| x);
        memo.call(1);
        memo.call(1);

        let report = memo.metrics();
        assert_eq!(report.get("requests"), Some(&2.0));
        assert_eq!(report.get("cache_hits"), Some(&1.0));
        assert_eq!(memo.strategy_name(), "Concurrent");
    }
}
