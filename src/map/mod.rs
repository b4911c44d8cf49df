//! Concurrent Map Abstraction
//!
//! A mutable key→value map contract that is safe to drive through `&self`,
//! with a strategy chosen per execution environment:
//!
//! | Strategy | Backing | Availability |
//! |----------|---------|--------------|
//! | [`LockedMap`] | `parking_lot::RwLock<HashMap>` | `concurrent` feature |
//! | [`LocalMap`] | `RefCell<HashMap>` | always |
//! | [`SnapshotMap`] | `arc-swap` snapshot cell | `concurrent` feature |
//!
//! All three implement [`SharedMap`] with identical observable semantics;
//! only throughput characteristics differ. [`DefaultSharedMap`] names the
//! strategy matching the build: lock-based when the `concurrent` feature is
//! on, single-threaded otherwise.
//!
//! # Contract
//!
//! The compound operations ([`insert_if_absent`](SharedMap::insert_if_absent),
//! [`remove_if`](SharedMap::remove_if), [`replace_if`](SharedMap::replace_if),
//! [`replace`](SharedMap::replace)) are atomic: no interleaving with another
//! operation can be observed between their check and their act. Plain
//! operations follow the usual map contract — absent keys yield `None` or
//! `false`, never a panic.
//!
//! The [`keys`](SharedMap::keys), [`values`](SharedMap::values), and
//! [`entries`](SharedMap::entries) views are owned snapshots taken at the
//! time of the call; they are not connected back to the live map, and
//! mutating them has no effect on it.
//!
//! # Sharing
//!
//! `SharedMap` is implemented for `Arc<M>` wherever `M` implements it, so a
//! single backing store can be handed to several owners explicitly:
//!
//! ```rust,ignore
//! use memo_rs::map::LockedMap;
//! use std::sync::Arc;
//!
//! let shared = Arc::new(LockedMap::new());
//! let a = memo_rs::ConcurrentMemo::with_map(|x: u32| x + 1, Arc::clone(&shared));
//! let b = memo_rs::ConcurrentMemo::with_map(|x: u32| x + 1, shared);
//! // a and b now consult the same cache.
//! ```

extern crate alloc;

use alloc::sync::Arc;
use alloc::vec::Vec;
use core::borrow::Borrow;
use core::hash::Hash;

pub mod local;

#[cfg(feature = "concurrent")]
pub mod locked;

#[cfg(feature = "concurrent")]
pub mod snapshot;

pub use local::LocalMap;

#[cfg(feature = "concurrent")]
pub use locked::LockedMap;

#[cfg(feature = "concurrent")]
pub use snapshot::SnapshotMap;

/// The map strategy matching the build: lock-based with the `concurrent`
/// feature, single-threaded otherwise.
#[cfg(feature = "concurrent")]
pub type DefaultSharedMap<K, V> = LockedMap<K, V>;

/// The map strategy matching the build: lock-based with the `concurrent`
/// feature, single-threaded otherwise.
#[cfg(not(feature = "concurrent"))]
pub type DefaultSharedMap<K, V> = LocalMap<K, V>;

/// A mutable key→value map driven entirely through `&self`.
///
/// Implementations guarantee that every operation — including the compound
/// check-then-act ones — is atomic with respect to all others. How that is
/// achieved (a lock, a compare-and-swap loop, or nothing at all in a
/// single-threaded environment) is the strategy's business; callers observe
/// no difference beyond throughput.
pub trait SharedMap<K, V>
where
    K: Hash + Eq + Clone,
    V: Clone,
{
    /// Returns the number of entries.
    fn len(&self) -> usize;

    /// Returns `true` if the map contains no entries.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns `true` if the map contains the key.
    fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq;

    /// Returns `true` if any entry maps to `value`.
    fn contains_value(&self, value: &V) -> bool
    where
        V: PartialEq;

    /// Returns a clone of the value for `key`, if present.
    fn get<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq;

    /// Inserts a key-value pair, returning the previous value if any.
    fn insert(&self, key: K, value: V) -> Option<V>;

    /// Inserts every pair from `entries` as a single atomic step.
    fn insert_all<I>(&self, entries: I)
    where
        I: IntoIterator<Item = (K, V)>;

    /// Removes a key, returning its value if it was present.
    fn remove<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq;

    /// Removes all entries.
    fn clear(&self);

    /// Atomically inserts `value` only if `key` is absent.
    ///
    /// Returns the existing value when the key is already present (and
    /// leaves it untouched), or `None` when the insert happened.
    fn insert_if_absent(&self, key: K, value: V) -> Option<V>;

    /// Atomically removes `key` only if it currently maps to `expected`.
    ///
    /// Returns `true` if the entry was removed.
    fn remove_if<Q>(&self, key: &Q, expected: &V) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
        V: PartialEq;

    /// Atomically replaces the value for `key` only if it currently maps to
    /// `expected`.
    ///
    /// Returns `true` if the value was replaced.
    fn replace_if<Q>(&self, key: &Q, expected: &V, value: V) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
        V: PartialEq;

    /// Atomically replaces the value for `key` only if the key is present.
    ///
    /// Returns the previous value, or `None` (with no insertion) when the
    /// key was absent.
    fn replace<Q>(&self, key: &Q, value: V) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq;

    /// Returns an owned snapshot of all keys.
    fn keys(&self) -> Vec<K>;

    /// Returns an owned snapshot of all values.
    fn values(&self) -> Vec<V>;

    /// Returns an owned snapshot of all entries.
    fn entries(&self) -> Vec<(K, V)>;
}

impl<K, V, M> SharedMap<K, V> for Arc<M>
where
    K: Hash + Eq + Clone,
    V: Clone,
    M: SharedMap<K, V>,
{
    fn len(&self) -> usize {
        (**self).len()
    }

    fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        (**self).contains_key(key)
    }

    fn contains_value(&self, value: &V) -> bool
    where
        V: PartialEq,
    {
        (**self).contains_value(value)
    }

    fn get<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        (**self).get(key)
    }

    fn insert(&self, key: K, value: V) -> Option<V> {
        (**self).insert(key, value)
    }

    fn insert_all<I>(&self, entries: I)
    where
        I: IntoIterator<Item = (K, V)>,
    {
        (**self).insert_all(entries);
    }

    fn remove<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        (**self).remove(key)
    }

    fn clear(&self) {
        (**self).clear();
    }

    fn insert_if_absent(&self, key: K, value: V) -> Option<V> {
        (**self).insert_if_absent(key, value)
    }

    fn remove_if<Q>(&self, key: &Q, expected: &V) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
        V: PartialEq,
    {
        (**self).remove_if(key, expected)
    }

    fn replace_if<Q>(&self, key: &Q, expected: &V, value: V) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
        V: PartialEq,
    {
        (**self).replace_if(key, expected, value)
    }

    fn replace<Q>(&self, key: &Q, value: V) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        (**self).replace(key, value)
    }

    fn keys(&self) -> Vec<K> {
        (**self).keys()
    }

    fn values(&self) -> Vec<V> {
        (**self).values()
    }

    fn entries(&self) -> Vec<(K, V)> {
        (**self).entries()
    }
}
