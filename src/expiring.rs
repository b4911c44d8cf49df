//! Time-Expiring Memoization
//!
//! Each cached result carries the clock reading taken when it was stored. A
//! call finding an entry younger than the time-to-live returns it; a call
//! finding the entry missing or expired invokes the wrapped function and
//! stores the fresh result with a fresh reading.
//!
//! Expired entries are purged lazily — by being overwritten on the next
//! access to the same key. There is no background sweep, so an entry whose
//! key is never touched again stays in memory; pair with
//! [`clear`](ExpiringMemo::clear) if that matters.
//!
//! # Clocks
//!
//! The memoizer is generic over [`Clock`] so expiration is testable by
//! advancing a manual clock. With the `std` feature,
//! [`ExpiringMemo::new`] wires in [`MonotonicClock`](crate::MonotonicClock).

extern crate alloc;

use crate::clock::Clock;
use crate::metrics::{MemoCounters, MemoMetrics};
use alloc::collections::BTreeMap;
use alloc::string::String;
use core::fmt;
use core::hash::{BuildHasher, Hash};
use core::time::Duration;

#[cfg(feature = "std")]
use crate::config::ExpiringMemoConfig;

#[cfg(feature = "hashbrown")]
use hashbrown::DefaultHashBuilder;
#[cfg(feature = "hashbrown")]
use hashbrown::HashMap;

#[cfg(not(feature = "hashbrown"))]
use std::collections::hash_map::RandomState as DefaultHashBuilder;
#[cfg(not(feature = "hashbrown"))]
use std::collections::HashMap;

/// A cached result together with the clock reading at which it was stored.
struct Stamped<R> {
    value: R,
    stored: Duration,
}

/// A memoized wrapper whose cached results expire after a time-to-live.
///
/// # Examples
///
/// Production use with the system clock (requires the `std` feature):
///
/// ```rust,ignore
/// use memo_rs::ExpiringMemo;
/// use core::time::Duration;
///
/// let mut memo = ExpiringMemo::new(|x: u32| x * 2, Duration::from_millis(100));
/// assert_eq!(memo.call(2), 4);
/// assert_eq!(memo.call(2), 4); // served from cache within the TTL
/// ```
pub struct ExpiringMemo<T, R, F, C, S = DefaultHashBuilder> {
    cache: HashMap<T, Stamped<R>, S>,
    time_to_live: Duration,
    clock: C,
    func: F,
    counters: MemoCounters,
}

#[cfg(feature = "std")]
impl<T: Hash + Eq, R, F> ExpiringMemo<T, R, F, crate::clock::MonotonicClock, DefaultHashBuilder> {
    /// Wraps `func` with the monotonic system clock.
    pub fn new(func: F, time_to_live: Duration) -> Self {
        Self::with_clock(func, time_to_live, crate::clock::MonotonicClock::new())
    }

    /// Creates an expiring memoizer from a configuration with an optional
    /// hasher, using the monotonic system clock.
    pub fn init(func: F, config: ExpiringMemoConfig, hasher: Option<DefaultHashBuilder>) -> Self {
        Self::with_clock_and_hasher(
            func,
            config.time_to_live,
            crate::clock::MonotonicClock::new(),
            hasher.unwrap_or_default(),
        )
    }
}

impl<T: Hash + Eq, R, F, C: Clock> ExpiringMemo<T, R, F, C, DefaultHashBuilder> {
    /// Wraps `func` with an explicit clock.
    pub fn with_clock(func: F, time_to_live: Duration, clock: C) -> Self {
        Self::with_clock_and_hasher(func, time_to_live, clock, DefaultHashBuilder::default())
    }
}

impl<T: Hash + Eq, R, F, C: Clock, S: BuildHasher> ExpiringMemo<T, R, F, C, S> {
    /// Wraps `func` with an explicit clock and hash builder.
    pub fn with_clock_and_hasher(
        func: F,
        time_to_live: Duration,
        clock: C,
        hash_builder: S,
    ) -> Self {
        ExpiringMemo {
            cache: HashMap::with_hasher(hash_builder),
            time_to_live,
            clock,
            func,
            counters: MemoCounters::new(),
        }
    }

    /// Returns the configured time-to-live.
    #[inline]
    pub fn time_to_live(&self) -> Duration {
        self.time_to_live
    }

    /// Returns the number of cached results, including any that have
    /// expired but not yet been overwritten.
    #[inline]
    pub fn len(&self) -> usize {
        self.cache.len()
    }

    /// Returns `true` if nothing is cached.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }

    /// Returns the hit/miss/expiration counters.
    #[inline]
    pub fn counters(&self) -> &MemoCounters {
        &self.counters
    }

    /// Drops all cached results, expired or not.
    pub fn clear(&mut self) {
        self.cache.clear();
    }
}

impl<T, R, F, C, S> ExpiringMemo<T, R, F, C, S>
where
    T: Hash + Eq + Clone,
    R: Clone,
    F: FnMut(T) -> R,
    C: Clock,
    S: BuildHasher,
{
    /// Invokes the wrapped function through the cache.
    ///
    /// Returns the cached result while it is younger than the time-to-live;
    /// otherwise recomputes and stores the result with a fresh clock
    /// reading. The reading is taken after the function returns, so a slow
    /// computation cannot produce an entry that is already stale.
    pub fn call(&mut self, input: T) -> R {
        let now = self.clock.now();
        if let Some(entry) = self.cache.get(&input) {
            if now.saturating_sub(entry.stored) < self.time_to_live {
                self.counters.record_hit();
                return entry.value.clone();
            }
            self.counters.record_expiration();
        }
        self.counters.record_miss();
        let value = (self.func)(input.clone());
        let stored = self.clock.now();
        self.cache.insert(
            input,
            Stamped {
                value: value.clone(),
                stored,
            },
        );
        value
    }
}

impl<T: Hash + Eq, R, F, C: Clock, S: BuildHasher> MemoMetrics for ExpiringMemo<T, R, F, C, S> {
    fn metrics(&self) -> BTreeMap<String, f64> {
        self.counters.as_metrics()
    }

    fn strategy_name(&self) -> &'static str {
        "TTL"
    }
}

impl<T, R, F, C, S> fmt::Debug for ExpiringMemo<T, R, F, C, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExpiringMemo")
            .field("time_to_live", &self.time_to_live)
            .field("len", &self.cache.len())
            .field("counters", &self.counters)
            .finish()
    }
}
