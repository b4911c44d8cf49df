#![doc = include_str!("../README.md")]
//!
//! ---
//!
//! # Code Reference
//!
//! This section provides quick code examples and API references for each
//! memoization policy.
//!
//! ## Policy Selection Guide
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────────┐
//! │                     Which Memoizer Should I Use?                             │
//! ├─────────────────────────────────────────────────────────────────────────────┤
//! │                                                                              │
//! │  Will the wrapped function be called from multiple threads?                  │
//! │                                                                              │
//! │  ┌─────────────────┐                                                         │
//! │  │   Yes, shared   │──────▶ ┌────────────────┐                              │
//! │  │ across threads  │        │ ConcurrentMemo │                              │
//! │  └─────────────────┘        └────────────────┘                              │
//! │                                                                              │
//! │  No — is the input domain bounded?                                           │
//! │                                                                              │
//! │  ┌─────────────────┐   No   ┌────────────────┐                              │
//! │  │ Bounded input   │───────▶│  BoundedMemo   │  (LRU eviction)              │
//! │  │    domain?      │        └────────────────┘                              │
//! │  └────────┬────────┘                                                         │
//! │           │ Yes                                                              │
//! │           ▼                                                                  │
//! │  Do results go stale over time?                                              │
//! │                                                                              │
//! │       Yes  ┌────────────────┐      No  ┌────────────────┐                   │
//! │       ───▶ │  ExpiringMemo  │      ───▶│      Memo      │                   │
//! │            └────────────────┘          └────────────────┘                   │
//! │                                                                              │
//! └─────────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Quick Reference
//!
//! | Type | Policy | Best Use Case |
//! |------|--------|---------------|
//! | [`Memo`] | Cache everything forever | Small, bounded input domains |
//! | [`BoundedMemo`] | Keep at most N entries, evict LRU | Unbounded domains, fixed memory budget |
//! | [`ExpiringMemo`] | Entries expire after a TTL | Results that go stale |
//! | [`ConcurrentMemo`] | Thread-safe unlimited cache | Shared across threads |
//!
//! ## Code Examples
//!
//! ### Unlimited memoization
//!
//! Caches every distinct input forever. The simplest policy; unbounded growth
//! is the accepted tradeoff.
//!
//! ```rust
//! use memo_rs::Memo;
//!
//! let mut memo = Memo::new(|x: u64| x * x);
//! assert_eq!(memo.call(7), 49);
//! assert_eq!(memo.call(7), 49); // cached, the closure runs once
//! assert_eq!(memo.len(), 1);
//! ```
//!
//! ### Bounded memoization (LRU)
//!
//! Keeps at most `capacity` entries; inserting beyond that evicts the least
//! recently used entry. A cache hit re-promotes the entry's recency.
//!
//! ```rust
//! use memo_rs::BoundedMemo;
//! use core::num::NonZeroUsize;
//!
//! let mut memo = BoundedMemo::new(|x: u32| x * 2, NonZeroUsize::new(2).unwrap());
//! memo.call(2);
//! memo.call(3);
//! memo.call(4); // the entry for 2 is evicted
//! assert_eq!(memo.len(), 2);
//! ```
//!
//! ### Expiring memoization (TTL)
//!
//! Entries are valid for a fixed time-to-live and recomputed on the next
//! access after expiring. Expired entries are purged lazily, by overwrite;
//! there is no background sweep.
//!
//! ```rust
//! use memo_rs::clock::Clock;
//! use memo_rs::ExpiringMemo;
//! use core::cell::Cell;
//! use core::time::Duration;
//!
//! #[derive(Debug)]
//! struct StepClock(Cell<Duration>);
//! impl Clock for &StepClock {
//!     fn now(&self) -> Duration {
//!         self.0.get()
//!     }
//! }
//!
//! let clock = StepClock(Cell::new(Duration::ZERO));
//! let mut memo = ExpiringMemo::with_clock(|x: u32| x * 2, Duration::from_millis(100), &clock);
//!
//! assert_eq!(memo.call(2), 4);
//! clock.0.set(Duration::from_millis(150));
//! assert_eq!(memo.call(2), 4); // expired: recomputed with a fresh stamp
//! ```
//!
//! With the `std` feature, `ExpiringMemo::new` wires in the monotonic system
//! clock so no clock plumbing is needed.
//!
//! ### Concurrent memoization
//!
//! Enable the `concurrent` feature for the thread-safe variant:
//!
//! ```toml
//! [dependencies]
//! memo-rs = { version = "0.2", features = ["concurrent"] }
//! ```
//!
//! ```rust,ignore
//! use memo_rs::ConcurrentMemo;
//! use std::sync::Arc;
//!
//! let memo = Arc::new(ConcurrentMemo::new(|x: u64| x + 1));
//!
//! // Safe to share across threads; calls go through &self.
//! let clone = Arc::clone(&memo);
//! std::thread::spawn(move || {
//!     clone.call(41);
//! });
//! ```
//!
//! Two threads missing on the same key may both compute; the last write wins
//! and both callers get a correct value. Single-flight de-duplication is
//! deliberately not provided.
//!
//! ## Map Strategies
//!
//! The concurrent memoizer is generic over a [`SharedMap`] strategy:
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────────────┐
//! │                        SharedMap strategies                        │
//! │                                                                    │
//! │  LockedMap                LocalMap              SnapshotMap        │
//! │  ┌──────────┐             ┌──────────┐          ┌──────────┐       │
//! │  │ RwLock   │             │ RefCell  │          │ ArcSwap  │       │
//! │  │ HashMap  │             │ HashMap  │          │ snapshot │       │
//! │  └──────────┘             └──────────┘          └──────────┘       │
//! │  lock per op              single thread         CAS retry loop     │
//! └────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! All three expose identical map semantics; only throughput characteristics
//! differ. [`SnapshotMap`](map::snapshot::SnapshotMap) performs a full copy
//! per mutation in exchange for lock-free linearizable compound operations.
//!
//! ## Modules
//!
//! - [`unbounded`]: unlimited memoization
//! - [`bounded`]: size-bounded memoization with LRU eviction
//! - [`expiring`]: time-to-live memoization
//! - [`concurrent`]: thread-safe memoization (requires the `concurrent` feature)
//! - [`func`]: closure-returning wrappers over the memoizer types
//! - [`compose`]: function composition combinators
//! - [`map`]: the concurrent map abstraction and its strategies
//! - [`order`]: the access-ordered map backing the bounded memoizer
//! - [`clock`]: clock abstraction for the expiring memoizer
//! - [`config`]: configuration structures
//! - [`metrics`]: hit/miss counters and reporting

#![no_std]

#[cfg(test)]
extern crate scoped_threadpool;

/// Clock abstraction for time-based expiration.
///
/// Provides the `Clock` trait consumed by the expiring memoizer and, with the
/// `std` feature, a monotonic implementation backed by `std::time::Instant`.
pub mod clock;

/// Function composition combinators.
///
/// Provides `then` and `compose` for chaining unary functions.
pub mod compose;

/// Memoizer configuration structures.
///
/// Provides configuration structures for the bounded and expiring memoizers.
pub mod config;

/// Closure-returning memoization wrappers.
///
/// Provides `memoize`, `memoize_with_limit`, `memoize_with_expiration`, and
/// `concurrent_memoize`, each returning a closure with the wrapped function's
/// call signature.
pub mod func;

/// Access-ordered map.
///
/// A mutable map whose iteration order equals recency of access, least
/// recently used first. This is the backing store for the bounded memoizer.
pub mod order;

/// Concurrent map abstraction.
///
/// Provides the `SharedMap` trait and its strategies: lock-based,
/// single-threaded, and lock-free copy-on-write.
pub mod map;

/// Memoizer metrics.
///
/// Hit/miss/eviction counters and a common reporting trait, shared by all
/// memoizer types.
pub mod metrics;

/// Unlimited memoization.
///
/// Caches every distinct input with no eviction.
pub mod unbounded;

/// Size-bounded memoization.
///
/// Keeps at most a fixed number of entries, evicting the least recently used
/// entry on overflow.
pub mod bounded;

/// Time-expiring memoization.
///
/// Entries are valid for a fixed time-to-live and lazily recomputed on the
/// next access after expiration.
pub mod expiring;

/// Thread-safe memoization.
///
/// A memoizer callable through `&self` from many threads, backed by any
/// `SharedMap` strategy.
///
/// Available when the `concurrent` feature is enabled.
#[cfg(feature = "concurrent")]
pub mod concurrent;

// Re-export memoizer types
pub use bounded::BoundedMemo;
pub use expiring::ExpiringMemo;
pub use unbounded::Memo;

#[cfg(feature = "concurrent")]
pub use concurrent::ConcurrentMemo;

// Re-export the map abstraction
pub use map::{DefaultSharedMap, LocalMap, SharedMap};

#[cfg(feature = "concurrent")]
pub use map::{LockedMap, SnapshotMap};

// Re-export supporting types
pub use clock::Clock;
pub use metrics::{MemoCounters, MemoMetrics};
pub use order::AccessOrderMap;

#[cfg(feature = "std")]
pub use clock::MonotonicClock;
