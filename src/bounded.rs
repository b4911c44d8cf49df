//! Size-Bounded Memoization
//!
//! Keeps at most `capacity` cached results, evicting by recency. The cache
//! is an [`AccessOrderMap`]: hits and insertions both promote the touched
//! entry, so the entry at the front is always the least recently used and is
//! the one evicted when an insertion overflows the bound.
//!
//! Eviction removes exactly one entry per overflowing insertion — the cache
//! can never exceed `capacity` by more than the entry being inserted, and
//! never shrinks below it spontaneously.
//!
//! # Capacity
//!
//! Capacity is [`NonZeroUsize`]: a zero-capacity memoizer is meaningless
//! (every call would compute and immediately evict) and cannot be expressed.
//!
//! # Thread Safety
//!
//! Not thread-safe; `call` takes `&mut self`. Use
//! [`ConcurrentMemo`](crate::concurrent) for cross-thread sharing.

extern crate alloc;

use crate::config::BoundedMemoConfig;
use crate::metrics::{MemoCounters, MemoMetrics};
use crate::order::AccessOrderMap;
use alloc::collections::BTreeMap;
use alloc::string::String;
use core::fmt;
use core::hash::{BuildHasher, Hash};
use core::num::NonZeroUsize;

#[cfg(feature = "hashbrown")]
use hashbrown::DefaultHashBuilder;

#[cfg(not(feature = "hashbrown"))]
use std::collections::hash_map::RandomState as DefaultHashBuilder;

/// A memoized wrapper keeping at most `capacity` results, evicting LRU.
///
/// # Examples
///
/// ```
/// use memo_rs::BoundedMemo;
/// use core::num::NonZeroUsize;
///
/// let mut memo = BoundedMemo::new(|x: u32| x * 2, NonZeroUsize::new(2).unwrap());
///
/// memo.call(2);
/// memo.call(3);
/// memo.call(4); // evicts the entry for 2
///
/// assert_eq!(memo.len(), 2);
/// ```
pub struct BoundedMemo<T, R, F, S = DefaultHashBuilder> {
    cache: AccessOrderMap<T, R, S>,
    capacity: NonZeroUsize,
    func: F,
    counters: MemoCounters,
}

impl<T: Hash + Eq, R, F> BoundedMemo<T, R, F, DefaultHashBuilder> {
    /// Wraps `func` with an LRU cache of at most `capacity` entries.
    pub fn new(func: F, capacity: NonZeroUsize) -> Self {
        Self::with_hasher(func, capacity, DefaultHashBuilder::default())
    }

    /// Creates a bounded memoizer from a configuration with an optional
    /// hasher.
    pub fn init(func: F, config: BoundedMemoConfig, hasher: Option<DefaultHashBuilder>) -> Self {
        Self::with_hasher(func, config.capacity, hasher.unwrap_or_default())
    }
}

impl<T: Hash + Eq, R, F, S: BuildHasher> BoundedMemo<T, R, F, S> {
    /// Wraps `func` with an LRU cache using the given hash builder.
    pub fn with_hasher(func: F, capacity: NonZeroUsize, hash_builder: S) -> Self {
        BoundedMemo {
            cache: AccessOrderMap::with_hasher(hash_builder),
            capacity,
            func,
            counters: MemoCounters::new(),
        }
    }

    /// Returns the maximum number of cached results.
    #[inline]
    pub fn capacity(&self) -> NonZeroUsize {
        self.capacity
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

    /// Returns the hit/miss/eviction counters.
    #[inline]
    pub fn counters(&self) -> &MemoCounters {
        &self.counters
    }

    /// Returns `true` if a result for `input` is currently cached.
    ///
    /// Does not touch recency.
    pub fn is_cached(&self, input: &T) -> bool {
        self.cache.contains_key(input)
    }

    /// Drops all cached results.
    pub fn clear(&mut self) {
        self.cache.clear();
    }
}

impl<T, R, F, S> BoundedMemo<T, R, F, S>
where
    T: Hash + Eq + Clone,
    R: Clone,
    F: FnMut(T) -> R,
    S: BuildHasher,
{
    /// Invokes the wrapped function through the cache.
    ///
    /// A hit re-promotes the entry to most-recently-used. A miss computes,
    /// inserts, and — if the cache now exceeds its capacity — evicts the
    /// least recently used entry.
    pub fn call(&mut self, input: T) -> R {
        if let Some(value) = self.cache.get(&input) {
            let value = value.clone();
            self.counters.record_hit();
            return value;
        }
        self.counters.record_miss();
        let value = (self.func)(input.clone());
        self.cache.insert(input, value.clone());
        if self.cache.len() > self.capacity.get() {
            self.cache.pop_front();
            self.counters.record_eviction();
        }
        value
    }
}

impl<T: Hash + Eq, R, F, S: BuildHasher> MemoMetrics for BoundedMemo<T, R, F, S> {
    fn metrics(&self) -> BTreeMap<String, f64> {
        self.counters.as_metrics()
    }

    fn strategy_name(&self) -> &'static str {
        "LRU"
    }
}

impl<T, R, F, S> fmt::Debug for BoundedMemo<T, R, F, S>
where
    T: Hash + Eq,
    S: BuildHasher,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BoundedMemo")
            .field("capacity", &self.capacity)
            .field("len", &self.cache.len())
            .field("counters", &self.counters)
            .finish()
    }
}
