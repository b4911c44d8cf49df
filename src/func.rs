//! Closure-Returning Memoization Wrappers
//!
//! Each function here takes a unary function and hands back a closure with
//! the same call signature, memoized under one of the crate's policies. Use
//! these when the call site just wants "the same function, but cached" and
//! has no use for the struct API (inspection, counters, custom hashers or
//! clocks).
//!
//! ```
//! use memo_rs::func::memoize;
//!
//! let mut double = memoize(|x: u64| x * 2);
//! assert_eq!(double(21), 42);
//! assert_eq!(double(21), 42); // cached
//! ```
//!
//! Every wrapper owns a private cache; two closures produced by two calls
//! never share state. For an explicitly shared cache, build a
//! [`ConcurrentMemo`](crate::concurrent) over an `Arc`-wrapped map instead.

use crate::bounded::BoundedMemo;
use crate::unbounded::Memo;
use core::hash::Hash;
use core::num::NonZeroUsize;

#[cfg(feature = "std")]
use crate::expiring::ExpiringMemo;
#[cfg(feature = "std")]
use core::time::Duration;

#[cfg(feature = "concurrent")]
use crate::concurrent::ConcurrentMemo;

/// Returns a closure that caches every result of `func` forever.
///
/// # Examples
///
/// ```
/// use memo_rs::func::memoize;
///
/// let mut calls = 0;
/// let mut double = memoize(|x: i32| {
///     calls += 1;
///     x * 2
/// });
/// assert_eq!(double(2), 4);
/// assert_eq!(double(2), 4);
/// drop(double);
/// assert_eq!(calls, 1);
/// ```
pub fn memoize<T, R, F>(func: F) -> impl FnMut(T) -> R
where
    T: Hash + Eq + Clone,
    R: Clone,
    F: FnMut(T) -> R,
{
    let mut memo = Memo::new(func);
    move |input| memo.call(input)
}

/// Returns a closure that caches at most `capacity` results of `func`,
/// evicting the least recently used entry on overflow.
///
/// # Examples
///
/// ```
/// use memo_rs::func::memoize_with_limit;
/// use core::num::NonZeroUsize;
///
/// let mut lookup = memoize_with_limit(|x: u32| x + 1, NonZeroUsize::new(2).unwrap());
/// lookup(2);
/// lookup(3);
/// lookup(4); // the entry for 2 is evicted
/// ```
pub fn memoize_with_limit<T, R, F>(func: F, capacity: NonZeroUsize) -> impl FnMut(T) -> R
where
    T: Hash + Eq + Clone,
    R: Clone,
    F: FnMut(T) -> R,
{
    let mut memo = BoundedMemo::new(func, capacity);
    move |input| memo.call(input)
}

/// Returns a closure that caches results of `func` for `time_to_live`,
/// recomputing on the first call after an entry expires.
///
/// Requires the `std` feature; the closure reads the monotonic system
/// clock. For a custom clock, use
/// [`ExpiringMemo::with_clock`](crate::ExpiringMemo::with_clock).
///
/// # Examples
///
/// ```rust,ignore
/// use memo_rs::func::memoize_with_expiration;
/// use core::time::Duration;
///
/// let mut cached = memoize_with_expiration(|x: u32| x * 2, Duration::from_millis(100));
/// cached(2);
/// cached(2); // cached
/// std::thread::sleep(Duration::from_millis(150));
/// cached(2); // expired: recomputed
/// ```
#[cfg(feature = "std")]
pub fn memoize_with_expiration<T, R, F>(func: F, time_to_live: Duration) -> impl FnMut(T) -> R
where
    T: Hash + Eq + Clone,
    R: Clone,
    F: FnMut(T) -> R,
{
    let mut memo = ExpiringMemo::new(func, time_to_live);
    move |input| memo.call(input)
}

/// Returns a thread-safe closure that caches every result of `func`.
///
/// The closure takes `&self` captures only, so it can be called from many
/// threads at once (wrap it in an `Arc` to share it). Concurrent callers
/// missing on the same input may each compute; the last write wins and
/// every caller gets a correct result.
///
/// # Examples
///
/// ```rust,ignore
/// use memo_rs::func::concurrent_memoize;
/// use std::sync::Arc;
///
/// let square = Arc::new(concurrent_memoize(|x: u64| x * x));
/// let worker = Arc::clone(&square);
/// std::thread::spawn(move || worker(9)).join().unwrap();
/// assert_eq!(square(9), 81);
/// ```
#[cfg(feature = "concurrent")]
pub fn concurrent_memoize<T, R, F>(func: F) -> impl Fn(T) -> R + Send + Sync
where
    T: Hash + Eq + Clone + Send + Sync,
    R: Clone + Send + Sync,
    F: Fn(T) -> R + Send + Sync,
{
    let memo = ConcurrentMemo::new(func);
    move |input| memo.call(input)
}
