//! Compute-once cache
//!
//! Each key owns a `OnceLock` cell. The map shard is locked only long enough
//! to fetch or insert the cell; the computation itself runs under the cell's
//! initialization guard, so a computation may recursively populate other
//! keys without deadlocking, and concurrent first requests for the same key
//! run the computation once. Entries are never evicted.

use dashmap::DashMap;
use std::hash::Hash;
use std::sync::{Arc, OnceLock};

pub struct Memo<K, V> {
    cells: DashMap<K, Arc<OnceLock<V>>>,
}

impl<K, V> Memo<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    pub fn new() -> Self {
        Self {
            cells: DashMap::new(),
        }
    }

    /// Cached value for `key`, computing it on first request
    pub fn get_or_compute(&self, key: &K, compute: impl FnOnce() -> V) -> V {
        let existing = self.cells.get(key).map(|cell| Arc::clone(cell.value()));
        let cell = match existing {
            Some(cell) => cell,
            None => Arc::clone(self.cells.entry(key.clone()).or_default().value()),
        };
        cell.get_or_init(compute).clone()
    }

    /// Cached value for `key` if already computed
    pub fn get(&self, key: &K) -> Option<V> {
        self.cells.get(key).and_then(|cell| cell.value().get().cloned())
    }

    /// Insert `value` unless `key` already holds one
    ///
    /// Returns `false` when an earlier value was kept.
    pub fn seed(&self, key: K, value: V) -> bool {
        let cell = Arc::clone(self.cells.entry(key).or_default().value());
        cell.set(value).is_ok()
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

impl<K, V> Default for Memo<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    fn default() -> Self {
        Self::new()
    }
}
