//! Read-through lookup cache that is cleared wholesale on reload.

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Memoizes `K -> V` lookups for the lifetime of one data generation.
///
/// Concurrent readers that miss may compute the same value twice; the first
/// insert wins. [`clear`](Self::clear) bumps the generation, and values
/// computed against an older generation are returned to their caller but
/// never stored, so a slow reader cannot repopulate the cache with stale data.
#[derive(Debug)]
pub struct ReloadCache<K, V> {
    generation: AtomicU64,
    entries: RwLock<HashMap<K, V>>,
}

impl<K, V> Default for ReloadCache<K, V> {
    fn default() -> Self {
        Self {
            generation: AtomicU64::new(0),
            entries: RwLock::new(HashMap::new()),
        }
    }
}

impl<K: Eq + Hash, V: Clone> ReloadCache<K, V> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current generation. Starts at 0 and grows by one per [`clear`](Self::clear).
    pub fn generation(&self) -> u64 {
        self.generation.load(Ordering::Acquire)
    }

    pub fn get(&self, key: &K) -> Option<V> {
        self.read().get(key).cloned()
    }

    /// Returns the cached value or computes and stores it.
    pub fn get_or_insert_with(&self, key: K, compute: impl FnOnce() -> V) -> V {
        let generation = self.generation();
        self.get_or_insert_at(generation, key, compute)
    }

    /// Like [`get_or_insert_with`](Self::get_or_insert_with), but the value is
    /// only stored if the cache is still at `generation`.
    ///
    /// Callers that read other reloadable state before computing capture the
    /// generation first, then read that state.
    pub fn get_or_insert_at(&self, generation: u64, key: K, compute: impl FnOnce() -> V) -> V {
        if let Some(value) = self.get(&key) {
            return value;
        }

        let value = compute();

        let mut entries = self.write();
        if self.generation() != generation {
            return value;
        }
        entries.entry(key).or_insert(value).clone()
    }

    /// Drops every entry and returns the new generation.
    pub fn clear(&self) -> u64 {
        let mut entries = self.write();
        entries.clear();
        self.generation.fetch_add(1, Ordering::AcqRel) + 1
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    fn read(&self) -> RwLockReadGuard<'_, HashMap<K, V>> {
        // Entries are plain values; a panicking writer cannot leave them torn.
        self.entries.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<K, V>> {
        self.entries.write().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn computes_once_per_key() {
        let cache: ReloadCache<u32, String> = ReloadCache::new();
        let calls = Cell::new(0);
        let compute = || {
            calls.set(calls.get() + 1);
            "value".to_string()
        };
        assert_eq!(cache.get_or_insert_with(1, compute), "value");
        assert_eq!(cache.get_or_insert_with(1, compute), "value");
        assert_eq!(calls.get(), 1);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn clear_bumps_generation() {
        let cache: ReloadCache<u32, u32> = ReloadCache::new();
        cache.get_or_insert_with(1, || 10);
        assert_eq!(cache.clear(), 1);
        assert!(cache.is_empty());
        assert_eq!(cache.get_or_insert_with(1, || 20), 20);
    }

    #[test]
    fn stale_generation_is_not_stored() {
        let cache: ReloadCache<u32, u32> = ReloadCache::new();
        let before = cache.generation();
        cache.clear();
        assert_eq!(cache.get_or_insert_at(before, 7, || 1), 1);
        assert_eq!(cache.get(&7), None);
    }

    #[test]
    fn first_insert_wins() {
        let cache: ReloadCache<u32, u32> = ReloadCache::new();
        let generation = cache.generation();
        let value = cache.get_or_insert_at(generation, 3, || {
            // Another reader fills the slot while this one computes.
            cache.get_or_insert_with(3, || 1);
            2
        });
        assert_eq!(value, 1);
    }
}
