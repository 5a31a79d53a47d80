//! Cache Driver Module
//!
//! The capability contract shared by every cache backend.

use std::collections::HashMap;

use serde_json::Value;

use crate::cache::Ttl;

// == Cache Driver ==
/// Operations every cache backend provides.
///
/// Steady-state operations never fail loudly: reads degrade to the supplied
/// default, writes and deletes report `false`. Bulk operations attempt every
/// item and fold the outcomes into one aggregate result.
pub trait CacheDriver: Send + Sync {
    /// Short backend name used in logs.
    fn name(&self) -> &'static str;

    /// Returns the stored value, or `None` when the key is absent, expired or
    /// unreadable. The entry is read once.
    ///
    /// An expired entry is removed as a side effect.
    fn fetch(&self, key: &str) -> Option<Value>;

    /// Returns the stored value, or `default` when the key is absent or expired.
    fn get(&self, key: &str, default: Value) -> Value {
        self.fetch(key).unwrap_or(default)
    }

    /// Stores `value` under `key` for `ttl`, or the backend's default TTL.
    fn set(&self, key: &str, value: Value, ttl: Option<Ttl>) -> bool;

    /// Removes `key`. Returns `false` if it was not present.
    fn delete(&self, key: &str) -> bool;

    /// Removes every entry. Returns `true` only if every removal succeeded.
    fn clear(&self) -> bool;

    /// Whether an entry exists for `key`, regardless of expiry.
    fn has(&self, key: &str) -> bool;

    /// Whether the entry for `key` is missing, unreadable or past its expiry.
    fn is_expired(&self, key: &str) -> bool;

    // == Bulk Operations ==
    /// Applies [`get`](Self::get) to each key.
    fn get_multiple(&self, keys: &[String], default: Value) -> HashMap<String, Value> {
        keys.iter()
            .map(|key| (key.clone(), self.get(key, default.clone())))
            .collect()
    }

    /// Applies [`set`](Self::set) to each pair with the same TTL.
    fn set_multiple(&self, entries: Vec<(String, Value)>, ttl: Option<Ttl>) -> bool {
        let mut success = true;
        for (key, value) in entries {
            if !self.set(&key, value, ttl) {
                success = false;
            }
        }
        success
    }

    /// Applies [`delete`](Self::delete) to each key.
    fn delete_multiple(&self, keys: &[String]) -> bool {
        let mut success = true;
        for key in keys {
            if !self.delete(key) {
                success = false;
            }
        }
        success
    }
}
