//! Lock-Free Copy-On-Write Map Strategy
//!
//! [`SnapshotMap`] satisfies the [`SharedMap`](crate::map::SharedMap)
//! contract without any lock. The entire map lives as one immutable snapshot
//! behind an [`arc_swap::ArcSwap`] cell; every mutating operation builds a
//! full copy reflecting its change and installs it with a compare-and-swap,
//! retrying from scratch when another thread got there first.
//!
//! # How It Works
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────────────┐
//! │                          SnapshotMap                              │
//! │                                                                   │
//! │   readers ──────▶ load ─────▶ Arc<HashMap>  (snapshot, immutable) │
//! │                                    ▲                              │
//! │   writers ──▶ load ── copy ── CAS ─┘                              │
//! │                 ▲              │ lost the race                    │
//! │                 └──── retry ◀──┘                                  │
//! └───────────────────────────────────────────────────────────────────┘
//! ```
//!
//! All mutating operations funnel through one primitive: atomically replace
//! snapshot `S` with `op(S)`, retrying on contention. The compound map
//! operations differ only in the copy they build and the result they
//! thread out of the loop, which makes every one of them linearizable.
//!
//! # Trade-offs
//!
//! - **Pros**: readers never block, never retry, and always see a fully
//!   formed map; compound operations are atomic without a lock.
//! - **Cons**: every mutation copies the whole map — O(n) per write. Suited
//!   to small or read-mostly maps, not large write-heavy ones.
//!
//! The retry loop has no iteration bound. Under sustained write contention a
//! thread may loop several times before its CAS lands; this is the accepted
//! cost of lock freedom here, not a bug.
//!
//! # Consistency
//!
//! Read operations (`get`, `len`, `contains_key`, the views) take one
//! snapshot and answer from it. A reader may therefore observe a snapshot
//! that a concurrent writer has already superseded — internally consistent,
//! linearizable at the moment the snapshot was loaded rather than the moment
//! the call returns.

extern crate alloc;

use crate::map::SharedMap;
use alloc::sync::Arc;
use alloc::vec::Vec;
use arc_swap::ArcSwap;
use core::borrow::Borrow;
use core::fmt;
use core::hash::{BuildHasher, Hash};
use core::mem;

#[cfg(feature = "hashbrown")]
use hashbrown::DefaultHashBuilder;
#[cfg(feature = "hashbrown")]
use hashbrown::HashMap;

#[cfg(not(feature = "hashbrown"))]
use std::collections::hash_map::RandomState as DefaultHashBuilder;
#[cfg(not(feature = "hashbrown"))]
use std::collections::HashMap;

/// Lock-free map strategy holding one atomically swappable snapshot.
///
/// # Examples
///
/// ```rust,ignore
/// use memo_rs::map::{SharedMap, SnapshotMap};
/// use std::sync::Arc;
///
/// let map = Arc::new(SnapshotMap::new());
///
/// let handles: Vec<_> = (0..4)
///     .map(|t| {
///         let map = Arc::clone(&map);
///         std::thread::spawn(move || map.insert_if_absent("winner", t))
///     })
///     .collect();
///
/// let wins = handles
///     .into_iter()
///     .filter(|h| h.join().unwrap().is_none())
///     .count();
/// assert_eq!(wins, 1); // exactly one thread claimed the key
/// ```
pub struct SnapshotMap<K, V, S = DefaultHashBuilder> {
    snapshot: ArcSwap<HashMap<K, V, S>>,
}

impl<K: Hash + Eq, V> SnapshotMap<K, V, DefaultHashBuilder> {
    /// Creates an empty map with the default hasher.
    pub fn new() -> Self {
        Self::with_hasher(DefaultHashBuilder::default())
    }
}

impl<K: Hash + Eq, V> Default for SnapshotMap<K, V, DefaultHashBuilder> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Hash + Eq, V, S: BuildHasher> SnapshotMap<K, V, S> {
    /// Creates an empty map with the given hash builder.
    pub fn with_hasher(hash_builder: S) -> Self {
        SnapshotMap {
            snapshot: ArcSwap::from_pointee(HashMap::with_hasher(hash_builder)),
        }
    }
}

impl<K, V, S> SnapshotMap<K, V, S>
where
    K: Hash + Eq + Clone,
    V: Clone,
    S: BuildHasher + Clone,
{
    /// Atomically replaces the current snapshot with `op(snapshot)`.
    ///
    /// `op` receives the current snapshot and returns the full replacement
    /// map together with the operation's result value. When the
    /// compare-and-swap loses to a concurrent update, the whole
    /// read-copy-swap cycle reruns against the fresh snapshot; `op` must
    /// therefore be pure with respect to the map it is given.
    fn update<F, R>(&self, mut op: F) -> R
    where
        F: FnMut(&HashMap<K, V, S>) -> (HashMap<K, V, S>, R),
    {
        let mut current = self.snapshot.load();
        loop {
            let (next, result) = op(&current);
            let previous = self.snapshot.compare_and_swap(&*current, Arc::new(next));
            if Arc::ptr_eq(&*previous, &*current) {
                return result;
            }
            // Lost the race; rerun against the snapshot that beat us.
            current = previous;
        }
    }

    /// Answers a read from the current snapshot, without retrying.
    fn read<F, R>(&self, op: F) -> R
    where
        F: FnOnce(&HashMap<K, V, S>) -> R,
    {
        op(&self.snapshot.load())
    }
}

impl<K, V, S> SharedMap<K, V> for SnapshotMap<K, V, S>
where
    K: Hash + Eq + Clone,
    V: Clone,
    S: BuildHasher + Clone,
{
    fn len(&self) -> usize {
        self.read(|map| map.len())
    }

    fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.read(|map| map.contains_key(key))
    }

    fn contains_value(&self, value: &V) -> bool
    where
        V: PartialEq,
    {
        self.read(|map| map.values().any(|v| v == value))
    }

    fn get<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.read(|map| map.get(key).cloned())
    }

    fn insert(&self, key: K, value: V) -> Option<V> {
        self.update(|map| {
            let mut next = map.clone();
            let previous = next.insert(key.clone(), value.clone());
            (next, previous)
        })
    }

    fn insert_all<I>(&self, entries: I)
    where
        I: IntoIterator<Item = (K, V)>,
    {
        let entries: Vec<(K, V)> = entries.into_iter().collect();
        self.update(|map| {
            let mut next = map.clone();
            next.extend(entries.iter().cloned());
            (next, ())
        });
    }

    fn remove<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.update(|map| {
            let mut next = map.clone();
            let previous = next.remove(key);
            (next, previous)
        })
    }

    fn clear(&self) {
        self.update(|map| (HashMap::with_hasher(map.hasher().clone()), ()));
    }

    fn insert_if_absent(&self, key: K, value: V) -> Option<V> {
        self.update(|map| {
            let mut next = map.clone();
            let existing = match next.get(&key) {
                Some(existing) => Some(existing.clone()),
                None => {
                    next.insert(key.clone(), value.clone());
                    None
                }
            };
            (next, existing)
        })
    }

    fn remove_if<Q>(&self, key: &Q, expected: &V) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
        V: PartialEq,
    {
        self.update(|map| {
            let mut next = map.clone();
            let removed = match next.get(key) {
                Some(existing) if existing == expected => {
                    next.remove(key);
                    true
                }
                _ => false,
            };
            (next, removed)
        })
    }

    fn replace_if<Q>(&self, key: &Q, expected: &V, value: V) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
        V: PartialEq,
    {
        self.update(|map| {
            let mut next = map.clone();
            let replaced = match next.get_mut(key) {
                Some(existing) if existing == expected => {
                    *existing = value.clone();
                    true
                }
                _ => false,
            };
            (next, replaced)
        })
    }

    fn replace<Q>(&self, key: &Q, value: V) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.update(|map| {
            let mut next = map.clone();
            let previous = next
                .get_mut(key)
                .map(|existing| mem::replace(existing, value.clone()));
            (next, previous)
        })
    }

    fn keys(&self) -> Vec<K> {
        self.read(|map| map.keys().cloned().collect())
    }

    fn values(&self) -> Vec<V> {
        self.read(|map| map.values().cloned().collect())
    }

    fn entries(&self) -> Vec<(K, V)> {
        self.read(|map| map.iter().map(|(k, v)| (k.clone(), v.clone())).collect())
    }
}

impl<K, V, S> fmt::Debug for SnapshotMap<K, V, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SnapshotMap")
            .field("len", &self.snapshot.load().len())
            .finish()
    }
}
