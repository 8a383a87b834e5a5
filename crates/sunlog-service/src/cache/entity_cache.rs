//! In-memory entity cache with copy-on-read snapshots.

use parking_lot::RwLock;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Process-wide mapping from an opaque string key to a list of entities.
///
/// Values are stored as `Arc<Vec<T>>` snapshots: callers always receive a
/// shared immutable list, never the live map contents, so a reader can
/// never corrupt the cache for later readers. Singleton lookups are stored
/// as one-element lists under their own key.
///
/// Each individual operation is atomic, but the surrounding check-miss →
/// query-store → populate sequence is not: two concurrent readers can both
/// miss and both populate the same key (an idempotent overwrite), and a
/// reader can re-insert a key after a concurrent writer cleared the cache.
/// That stale entry survives until the next write clears it again. Both
/// races are part of the contract of this cache.
pub struct EntityCache<T> {
    entries: RwLock<HashMap<String, Arc<Vec<T>>>>,
}

impl<T> Default for EntityCache<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> EntityCache<T> {
    /// Creates an empty cache.
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Returns the snapshot stored under `key`, if any.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<Arc<Vec<T>>> {
        let hit = self.entries.read().get(key).cloned();
        match hit {
            Some(snapshot) => {
                debug!("Cache hit for key '{}'", key);
                Some(snapshot)
            }
            None => {
                debug!("Cache miss for key '{}'", key);
                None
            }
        }
    }

    /// Stores `values` under `key` and returns the stored snapshot.
    pub fn put(&self, key: impl Into<String>, values: Vec<T>) -> Arc<Vec<T>> {
        let snapshot = Arc::new(values);
        self.entries.write().insert(key.into(), snapshot.clone());
        snapshot
    }

    /// Returns true if `key` currently has an entry.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.read().contains_key(key)
    }

    /// Drops every entry. This is the only removal path.
    pub fn clear(&self) {
        self.entries.write().clear();
        debug!("Cache cleared");
    }

    /// Number of keys currently cached.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    /// Returns true if no keys are cached.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}

impl<T> fmt::Debug for EntityCache<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EntityCache")
            .field("keys", &self.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::thread;

    #[test]
    fn test_put_then_get_returns_same_snapshot() {
        let cache = EntityCache::new();
        let stored = cache.put("all", vec![1, 2, 3]);
        let fetched = cache.get("all").unwrap();
        assert!(Arc::ptr_eq(&stored, &fetched));
        assert_eq!(*fetched, vec![1, 2, 3]);
    }

    #[test]
    fn test_get_missing_key() {
        let cache: EntityCache<i32> = EntityCache::new();
        assert!(cache.get("absent").is_none());
        assert!(!cache.contains_key("absent"));
    }

    #[test]
    fn test_put_overwrites_existing_key() {
        let cache = EntityCache::new();
        cache.put("key", vec![1]);
        cache.put("key", vec![2]);
        assert_eq!(*cache.get("key").unwrap(), vec![2]);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_clear_drops_every_key() {
        let cache = EntityCache::new();
        cache.put("a", vec![1]);
        cache.put("b", vec![2]);
        assert_eq!(cache.len(), 2);

        cache.clear();
        assert!(cache.is_empty());
        assert!(cache.get("a").is_none());
        assert!(cache.get("b").is_none());
    }

    #[test]
    fn test_snapshot_survives_clear() {
        // Copy-on-read: a snapshot handed out before a clear stays readable.
        let cache = EntityCache::new();
        let snapshot = cache.put("key", vec![1, 2]);
        cache.clear();
        assert_eq!(*snapshot, vec![1, 2]);
    }

    #[test]
    fn test_concurrent_puts_and_clears_do_not_corrupt() {
        let cache = Arc::new(EntityCache::new());
        let mut handles = Vec::new();
        for worker in 0..8 {
            let cache = Arc::clone(&cache);
            handles.push(thread::spawn(move || {
                for i in 0..200 {
                    cache.put(format!("key_{}", worker), vec![i]);
                    if i % 50 == 0 {
                        cache.clear();
                    }
                    let _ = cache.get(&format!("key_{}", worker));
                }
            }));
        }
        for handle in handles {
            handle.join().unwrap();
        }
        // Every surviving entry is a well-formed one-element list.
        for worker in 0..8 {
            if let Some(snapshot) = cache.get(&format!("key_{}", worker)) {
                assert_eq!(snapshot.len(), 1);
            }
        }
    }
}
