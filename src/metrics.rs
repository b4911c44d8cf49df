//! Memoizer Metrics
//!
//! Every memoizer tracks how often it served a cached value versus invoking
//! the wrapped function, and reports the counters through a common
//! [`MemoMetrics`] trait using BTreeMap-based reporting.
//!
//! # Why BTreeMap over HashMap?
//!
//! BTreeMap keys iterate in a deterministic order, so reports are stable
//! across runs — metrics output can be diffed, logged, and asserted on in
//! tests without sorting first. With half a dozen keys the O(log n) lookup
//! cost is irrelevant.
//!
//! # Counter Sets
//!
//! - [`MemoCounters`]: plain `u64` counters for the single-threaded
//!   memoizers, which already require `&mut self` to call.
//! - [`SharedMemoCounters`]: atomic counters for the concurrent memoizer,
//!   updated through `&self` without any lock.

extern crate alloc;

use alloc::collections::BTreeMap;
use alloc::string::{String, ToString};
use core::sync::atomic::{AtomicU64, Ordering};

/// Common reporting interface implemented by every memoizer.
///
/// # Examples
///
/// ```
/// use memo_rs::{Memo, MemoMetrics};
///
/// let mut memo = Memo::new(|x: u32| x * 2);
/// memo.call(1);
/// memo.call(1);
///
/// let report = memo.metrics();
/// assert_eq!(report.get("cache_hits"), Some(&1.0));
/// assert_eq!(report.get("cache_misses"), Some(&1.0));
/// assert_eq!(memo.strategy_name(), "Unbounded");
/// ```
pub trait MemoMetrics {
    /// Returns all counters as a deterministic-order name → value map.
    fn metrics(&self) -> BTreeMap<String, f64>;

    /// Returns the name of the memoization policy.
    fn strategy_name(&self) -> &'static str;
}

/// Hit/miss/eviction counters for the single-threaded memoizers.
#[derive(Debug, Default, Clone)]
pub struct MemoCounters {
    /// Calls answered from the cache.
    pub hits: u64,
    /// Calls that invoked the wrapped function.
    pub misses: u64,
    /// Entries evicted to stay within a capacity bound.
    pub evictions: u64,
    /// Entries found expired and recomputed.
    pub expirations: u64,
}

impl MemoCounters {
    /// Creates a zeroed counter set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Total calls observed, hits and misses combined.
    pub fn requests(&self) -> u64 {
        self.hits + self.misses
    }

    #[inline]
    pub(crate) fn record_hit(&mut self) {
        self.hits += 1;
    }

    #[inline]
    pub(crate) fn record_miss(&mut self) {
        self.misses += 1;
    }

    #[inline]
    pub(crate) fn record_eviction(&mut self) {
        self.evictions += 1;
    }

    #[inline]
    pub(crate) fn record_expiration(&mut self) {
        self.expirations += 1;
    }

    /// Renders the counters as a report map.
    pub fn as_metrics(&self) -> BTreeMap<String, f64> {
        let mut report = BTreeMap::new();
        report.insert("requests".to_string(), self.requests() as f64);
        report.insert("cache_hits".to_string(), self.hits as f64);
        report.insert("cache_misses".to_string(), self.misses as f64);
        report.insert("evictions".to_string(), self.evictions as f64);
        report.insert("expirations".to_string(), self.expirations as f64);
        report
    }
}

/// Atomic hit/miss counters for the concurrent memoizer.
///
/// Counters are updated with relaxed ordering; they are monitoring data, not
/// synchronization, and must never be used to reason about the order of
/// cache operations.
#[derive(Debug, Default)]
pub struct SharedMemoCounters {
    hits: AtomicU64,
    misses: AtomicU64,
}

impl SharedMemoCounters {
    /// Creates a zeroed counter set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Calls answered from the cache.
    pub fn hits(&self) -> u64 {
        self.hits.load(Ordering::Relaxed)
    }

    /// Calls that invoked the wrapped function.
    pub fn misses(&self) -> u64 {
        self.misses.load(Ordering::Relaxed)
    }

    /// Total calls observed, hits and misses combined.
    pub fn requests(&self) -> u64 {
        self.hits() + self.misses()
    }

    #[inline]
    pub(crate) fn record_hit(&self) {
        self.hits.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub(crate) fn record_miss(&self) {
        self.misses.fetch_add(1, Ordering::Relaxed);
    }

    /// Renders the counters as a report map.
    pub fn as_metrics(&self) -> BTreeMap<String, f64> {
        let mut report = BTreeMap::new();
        report.insert("requests".to_string(), self.requests() as f64);
        report.insert("cache_hits".to_string(), self.hits() as f64);
        report.insert("cache_misses".to_string(), self.misses() as f64);
        report
    }
}
