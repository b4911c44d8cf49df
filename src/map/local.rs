//! Single-Threaded Map Strategy
//!
//! [`LocalMap`] satisfies the [`SharedMap`](crate::map::SharedMap) contract
//! with a plain hash map behind a `RefCell`. It is meant for execution
//! environments where parallel mutation cannot occur — single-threaded
//! binaries, per-thread caches, event-loop runtimes — and pays no
//! synchronization cost at all.
//!
//! The compound operations are plain check-then-act: with nothing to race
//! against, that is already atomic. The type is deliberately `!Sync`
//! (`RefCell` is not `Sync`), so misuse across threads is a compile error
//! rather than a data race.

extern crate alloc;

use crate::map::SharedMap;
use alloc::vec::Vec;
use core::borrow::Borrow;
use core::cell::RefCell;
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

/// Map strategy for single-threaded environments.
///
/// # Examples
///
/// ```
/// use memo_rs::map::{LocalMap, SharedMap};
///
/// let map = LocalMap::new();
/// assert_eq!(map.insert("a", 1), None);
/// assert_eq!(map.insert_if_absent("a", 99), Some(1));
/// assert_eq!(map.get(&"a"), Some(1));
/// ```
pub struct LocalMap<K, V, S = DefaultHashBuilder> {
    inner: RefCell<HashMap<K, V, S>>,
}

impl<K: Hash + Eq, V> LocalMap<K, V, DefaultHashBuilder> {
    /// Creates an empty map with the default hasher.
    pub fn new() -> Self {
        Self::with_hasher(DefaultHashBuilder::default())
    }
}

impl<K: Hash + Eq, V> Default for LocalMap<K, V, DefaultHashBuilder> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Hash + Eq, V, S: BuildHasher> LocalMap<K, V, S> {
    /// Creates an empty map with the given hash builder.
    pub fn with_hasher(hash_builder: S) -> Self {
        LocalMap {
            inner: RefCell::new(HashMap::with_hasher(hash_builder)),
        }
    }
}

impl<K, V, S> SharedMap<K, V> for LocalMap<K, V, S>
where
    K: Hash + Eq + Clone,
    V: Clone,
    S: BuildHasher,
{
    fn len(&self) -> usize {
        self.inner.borrow().len()
    }

    fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.inner.borrow().contains_key(key)
    }

    fn contains_value(&self, value: &V) -> bool
    where
        V: PartialEq,
    {
        self.inner.borrow().values().any(|v| v == value)
    }

    fn get<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.inner.borrow().get(key).cloned()
    }

    fn insert(&self, key: K, value: V) -> Option<V> {
        self.inner.borrow_mut().insert(key, value)
    }

    fn insert_all<I>(&self, entries: I)
    where
        I: IntoIterator<Item = (K, V)>,
    {
        self.inner.borrow_mut().extend(entries);
    }

    fn remove<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.inner.borrow_mut().remove(key)
    }

    fn clear(&self) {
        self.inner.borrow_mut().clear();
    }

    fn insert_if_absent(&self, key: K, value: V) -> Option<V> {
        let mut inner = self.inner.borrow_mut();
        match inner.get(&key) {
            Some(existing) => Some(existing.clone()),
            None => {
                inner.insert(key, value);
                None
            }
        }
    }

    fn remove_if<Q>(&self, key: &Q, expected: &V) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
        V: PartialEq,
    {
        let mut inner = self.inner.borrow_mut();
        match inner.get(key) {
            Some(existing) if existing == expected => {
                inner.remove(key);
                true
            }
            _ => false,
        }
    }

    fn replace_if<Q>(&self, key: &Q, expected: &V, value: V) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
        V: PartialEq,
    {
        let mut inner = self.inner.borrow_mut();
        match inner.get_mut(key) {
            Some(existing) if existing == expected => {
                *existing = value;
                true
            }
            _ => false,
        }
    }

    fn replace<Q>(&self, key: &Q, value: V) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        let mut inner = self.inner.borrow_mut();
        inner
            .get_mut(key)
            .map(|existing| core::mem::replace(existing, value))
    }

    fn keys(&self) -> Vec<K> {
        self.inner.borrow().keys().cloned().collect()
    }

    fn values(&self) -> Vec<V> {
        self.inner.borrow().values().cloned().collect()
    }

    fn entries(&self) -> Vec<(K, V)> {
        self.inner
            .borrow()
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }
}

impl<K, V, S> fmt::Debug for LocalMap<K, V, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LocalMap")
            .field("len", &self.inner.borrow().len())
            .finish()
    }
}
