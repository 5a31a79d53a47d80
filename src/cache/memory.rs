//! Memory Cache Store Module
//!
//! In-process cache driver backed by a shared HashMap with TTL expiration.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde_json::Value;
use tracing::debug;

use crate::cache::{key, CacheDriver, CacheRecord, Ttl};

// == Memory Cache Store ==
/// Thread-safe in-memory cache storage with TTL support.
///
/// Entries are keyed by the hashed key, the same identifier the file driver
/// uses for filenames.
#[derive(Debug)]
pub struct MemoryCacheStore {
    /// Hashed key to record storage
    entries: RwLock<HashMap<String, CacheRecord>>,
    /// Default TTL in seconds for entries without explicit TTL
    default_ttl: Ttl,
}

impl MemoryCacheStore {
    // == Constructor ==
    /// Creates a new, empty store.
    ///
    /// # Arguments
    /// * `default_ttl` - TTL for entries stored without an explicit one
    pub fn new(default_ttl: Ttl) -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
            default_ttl,
        }
    }

    pub fn default_ttl(&self) -> Ttl {
        self.default_ttl
    }

    // Poisoned guards are used as-is.
    fn read(&self) -> RwLockReadGuard<'_, HashMap<String, CacheRecord>> {
        self.entries.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, HashMap<String, CacheRecord>> {
        self.entries.write().unwrap_or_else(PoisonError::into_inner)
    }
}

// == Cache Driver Implementation ==
impl CacheDriver for MemoryCacheStore {
    fn name(&self) -> &'static str {
        "memory"
    }

    fn fetch(&self, key: &str) -> Option<Value> {
        let id = key::encode(key);

        {
            let entries = self.read();
            match entries.get(&id) {
                Some(record) if !record.is_expired() => return Some(record.value.clone()),
                Some(_) => {}
                None => return None,
            }
        }

        // Re-check under the write lock; another caller may have replaced it.
        let mut entries = self.write();
        match entries.get(&id) {
            Some(record) if !record.is_expired() => Some(record.value.clone()),
            Some(_) => {
                entries.remove(&id);
                debug!("Evicted expired in-memory entry {}", id);
                None
            }
            None => None,
        }
    }

    fn set(&self, key: &str, value: Value, ttl: Option<Ttl>) -> bool {
        let record = CacheRecord::new(value, ttl.unwrap_or(self.default_ttl));
        self.write().insert(key::encode(key), record);
        true
    }

    fn delete(&self, key: &str) -> bool {
        self.write().remove(&key::encode(key)).is_some()
    }

    fn clear(&self) -> bool {
        self.write().clear();
        true
    }

    fn has(&self, key: &str) -> bool {
        self.read().contains_key(&key::encode(key))
    }

    fn is_expired(&self, key: &str) -> bool {
        self.read()
            .get(&key::encode(key))
            .map_or(true, CacheRecord::is_expired)
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::Arc;
    use std::thread::{self, sleep};
    use std::time::Duration;

    #[test]
    fn test_store_new() {
        let store = MemoryCacheStore::new(Ttl::secs(300));
        assert!(!store.has("anything"));
        assert_eq!(store.default_ttl(), Ttl::secs(300));
    }

    #[test]
    fn test_store_set_and_get() {
        let store = MemoryCacheStore::new(Ttl::secs(300));

        assert!(store.set("key1", json!("value1"), None));
        assert_eq!(store.get("key1", json!(null)), json!("value1"));
        assert!(store.has("key1"));
    }

    #[test]
    fn test_store_get_nonexistent() {
        let store = MemoryCacheStore::new(Ttl::secs(300));
        assert_eq!(store.get("nonexistent", json!(7)), json!(7));
    }

    #[test]
    fn test_store_delete() {
        let store = MemoryCacheStore::new(Ttl::secs(300));

        store.set("key1", json!("value1"), None);
        assert!(store.delete("key1"));
        assert!(!store.delete("key1"));

        assert!(!store.has("key1"));
    }

    #[test]
    fn test_store_overwrite() {
        let store = MemoryCacheStore::new(Ttl::secs(300));

        store.set("key1", json!("value1"), None);
        store.set("key1", json!("value2"), None);

        assert_eq!(store.get("key1", json!(null)), json!("value2"));
    }

    #[test]
    fn test_store_ttl_expiration() {
        let store = MemoryCacheStore::new(Ttl::secs(300));

        store.set("key1", json!("value1"), Some(Ttl::secs(1)));
        assert_eq!(store.get("key1", json!(null)), json!("value1"));

        sleep(Duration::from_millis(1100));

        assert!(store.has("key1"));
        assert!(store.is_expired("key1"));
        assert_eq!(store.get("key1", json!(null)), json!(null));
        assert!(!store.has("key1"));
    }

    #[test]
    fn test_store_fetch_distinguishes_stored_null() {
        let store = MemoryCacheStore::new(Ttl::secs(300));
        store.set("nothing", json!(null), None);

        assert_eq!(store.fetch("nothing"), Some(json!(null)));
        assert_eq!(store.fetch("absent"), None);
    }

    #[test]
    fn test_store_clear() {
        let store = MemoryCacheStore::new(Ttl::secs(300));
        store.set("a", json!(1), None);
        store.set("b", json!(2), None);

        assert!(store.clear());
        assert!(!store.has("a"));
        assert!(!store.has("b"));
    }

    #[test]
    fn test_store_shared_across_threads() {
        let store = Arc::new(MemoryCacheStore::new(Ttl::secs(300)));

        let handles: Vec<_> = (0..4)
            .map(|i| {
                let store = Arc::clone(&store);
                thread::spawn(move || {
                    for j in 0..25 {
                        store.set(&format!("k{}_{}", i, j), json!(j), None);
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        for i in 0..4 {
            for j in 0..25 {
                assert!(store.has(&format!("k{}_{}", i, j)));
            }
        }
        assert_eq!(store.get("k3_24", json!(null)), json!(24));
    }
}
