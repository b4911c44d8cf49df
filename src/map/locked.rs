//! Lock-Based Map Strategy
//!
//! [`LockedMap`] satisfies the [`SharedMap`](crate::map::SharedMap) contract
//! with a hash map behind a `parking_lot::RwLock`. Reads share the lock;
//! writes and the compound check-then-act operations take it exclusively,
//! which is what makes them atomic.
//!
//! The lock is held only for the duration of one operation — never across a
//! call into user code — so the strategy cannot deadlock against the
//! memoizers built on top of it.
//!
//! This is the default strategy of [`DefaultSharedMap`](crate::map::DefaultSharedMap)
//! when the `concurrent` feature is enabled.

extern crate alloc;

use crate::map::SharedMap;
use alloc::vec::Vec;
use core::borrow::Borrow;
use core::fmt;
use core::hash::{BuildHasher, Hash};
use parking_lot::RwLock;

#[cfg(feature = "hashbrown")]
use hashbrown::DefaultHashBuilder;
#[cfg(feature = "hashbrown")]
use hashbrown::HashMap;

#[cfg(not(feature = "hashbrown"))]
use std::collections::hash_map::RandomState as DefaultHashBuilder;
#[cfg(not(feature = "hashbrown"))]
use std::collections::HashMap;

/// Thread-safe map strategy backed by a reader-writer lock.
///
/// # Examples
///
/// ```rust,ignore
/// use memo_rs::map::{LockedMap, SharedMap};
/// use std::sync::Arc;
///
/// let map = Arc::new(LockedMap::new());
/// let writer = Arc::clone(&map);
/// std::thread::spawn(move || {
///     writer.insert("key", 42);
/// })
/// .join()
/// .unwrap();
///
/// assert_eq!(map.get(&"key"), Some(42));
/// ```
pub struct LockedMap<K, V, S = DefaultHashBuilder> {
    inner: RwLock<HashMap<K, V, S>>,
}

impl<K: Hash + Eq, V> LockedMap<K, V, DefaultHashBuilder> {
    /// Creates an empty map with the default hasher.
    pub fn new() -> Self {
        Self::with_hasher(DefaultHashBuilder::default())
    }
}

impl<K: Hash + Eq, V> Default for LockedMap<K, V, DefaultHashBuilder> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Hash + Eq, V, S: BuildHasher> LockedMap<K, V, S> {
    /// Creates an empty map with the given hash builder.
    pub fn with_hasher(hash_builder: S) -> Self {
        LockedMap {
            inner: RwLock::new(HashMap::with_hasher(hash_builder)),
        }
    }
}

impl<K, V, S> SharedMap<K, V> for LockedMap<K, V, S>
where
    K: Hash + Eq + Clone,
    V: Clone,
    S: BuildHasher,
{
    fn len(&self) -> usize {
        self.inner.read().len()
    }

    fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.inner.read().contains_key(key)
    }

    fn contains_value(&self, value: &V) -> bool
    where
        V: PartialEq,
    {
        self.inner.read().values().any(|v| v == value)
    }

    fn get<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.inner.read().get(key).cloned()
    }

    fn insert(&self, key: K, value: V) -> Option<V> {
        self.inner.write().insert(key, value)
    }

    fn insert_all<I>(&self, entries: I)
    where
        I: IntoIterator<Item = (K, V)>,
    {
        self.inner.write().extend(entries);
    }

    fn remove<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
    {
        self.inner.write().remove(key)
    }

    fn clear(&self) {
        self.inner.write().clear();
    }

    fn insert_if_absent(&self, key: K, value: V) -> Option<V> {
        let mut inner = self.inner.write();
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
        let mut inner = self.inner.write();
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
        let mut inner = self.inner.write();
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
        let mut inner = self.inner.write();
        inner
            .get_mut(key)
            .map(|existing| core::mem::replace(existing, value))
    }

    fn keys(&self) -> Vec<K> {
        self.inner.read().keys().cloned().collect()
    }

    fn values(&self) -> Vec<V> {
        self.inner.read().values().cloned().collect()
    }

    fn entries(&self) -> Vec<(K, V)> {
        self.inner
            .read()
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }
}

impl<K, V, S> fmt::Debug for LockedMap<K, V, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LockedMap")
            .field("len", &self.inner.read().len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    extern crate std;
    use std::string::ToString;
    use std::sync::Arc;
    use std::thread;
    use std::vec::Vec;

    #[test]
    fn test_basic_operations() {
        let map: LockedMap<&str, i32> = LockedMap::new();
        assert!(map.is_empty());

        assert_eq!(map.insert("a", 1), None);
        assert_eq!(map.insert("a", 2), Some(1));
        assert_eq!(map.get(&"a"), Some(2));
        assert!(map.contains_key(&"a"));
        assert!(map.contains_value(&2));
        assert_eq!(map.remove(&"a"), Some(2));
        assert!(map.is_empty());
    }

    #[test]
    fn test_compound_operations() {
        let map: LockedMap<&str, i32> = LockedMap::new();

        assert_eq!(map.insert_if_absent("a", 1), None);
        assert_eq!(map.insert_if_absent("a", 2), Some(1));

        assert!(!map.replace_if(&"a", &9, 10));
        assert!(map.replace_if(&"a", &1, 10));
        assert_eq!(map.replace(&"a", 20), Some(10));
        assert_eq!(map.replace(&"missing", 1), None);

        assert!(!map.remove_if(&"a", &10));
        assert!(map.remove_if(&"a", &20));
        assert!(map.is_empty());
    }

    #[test]
    fn test_concurrent_writers() {
        let map: Arc<LockedMap<std::string::String, usize>> = Arc::new(LockedMap::new());
        let num_threads = 8;
        let ops_per_thread = 500;

        let mut handles: Vec<std::thread::JoinHandle<()>> = Vec::new();
        for t in 0..num_threads {
            let map = Arc::clone(&map);
            handles.push(thread::spawn(move || {
                for i in 0..ops_per_thread {
                    let key = std::format!("thread_{}_key_{}", t, i);
                    map.insert(key.clone(), t * 1000 + i);
                    assert_eq!(map.get(&key), Some(t * 1000 + i));
                }
            }));
        }
        for handle in handles {
            handle.join().unwrap();
        }

        assert_eq!(map.len(), num_threads * ops_per_thread);
    }

    #[test]
    fn test_concurrent_insert_if_absent_single_winner() {
        let map: Arc<LockedMap<&'static str, usize>> = Arc::new(LockedMap::new());
        let num_threads = 8;

        let mut handles: Vec<std::thread::JoinHandle<bool>> = Vec::new();
        for t in 0..num_threads {
            let map = Arc::clone(&map);
            handles.push(thread::spawn(move || {
                map.insert_if_absent("key", t).is_none()
            }));
        }

        let winners = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|won| *won)
            .count();

        assert_eq!(winners, 1);
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn test_views_snapshot() {
        let map: LockedMap<std::string::String, i32> = LockedMap::new();
        map.insert("a".to_string(), 1);
        map.insert("b".to_string(), 2);

        let mut keys = map.keys();
        keys.sort_unstable();
        assert_eq!(keys, ["a".to_string(), "b".to_string()]);

        map.clear();
        // The snapshot is unaffected by the clear.
        assert_eq!(keys.len(), 2);
        assert!(map.is_empty());
    }
}
