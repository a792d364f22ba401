//! Synchronous key-value persistence substrate.

use std::collections::BTreeMap;
use std::sync::{Mutex, PoisonError};

use crate::error::SubstrateError;

/// The storage contract every collection is persisted through.
///
/// Implementations are synchronous and local. There are no transactions and
/// no atomicity across keys.
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`.
    fn get(&self, key: &str) -> Result<Option<String>, SubstrateError>;

    /// Store `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> Result<(), SubstrateError>;

    /// Remove `key`. Removing an absent key is not an error.
    fn remove(&self, key: &str) -> Result<(), SubstrateError>;

    /// List every key currently stored.
    fn keys(&self) -> Result<Vec<String>, SubstrateError>;
}

/// In-memory substrate, optionally bounded by a byte quota.
///
/// The quota counts key and value bytes, the way browser storage does.
#[derive(Debug, Default)]
pub struct MemoryKeyValueStore {
    entries: Mutex<BTreeMap<String, String>>,
    quota: Option<usize>,
}

impl MemoryKeyValueStore {
    /// Create an unbounded store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store that rejects writes growing it past `bytes`
    pub fn with_quota(bytes: usize) -> Self {
        Self {
            entries: Mutex::new(BTreeMap::new()),
            quota: Some(bytes),
        }
    }

    /// Total bytes held (keys plus values).
    ///
    /// Reads through a poisoned lock; every write is a single map operation,
    /// so the map is never left half-updated.
    pub fn used_bytes(&self) -> usize {
        let entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);
        entries.iter().map(|(k, v)| k.len() + v.len()).sum()
    }

    /// Number of stored keys, read through a poisoned lock like `used_bytes`
    pub fn len(&self) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// Whether the store holds no keys
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl KeyValueStore for MemoryKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, SubstrateError> {
        let entries = self.entries.lock().map_err(|_| SubstrateError::Poisoned)?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), SubstrateError> {
        let mut entries = self.entries.lock().map_err(|_| SubstrateError::Poisoned)?;

        if let Some(quota) = self.quota {
            let used: usize = entries
                .iter()
                .filter(|(k, _)| k.as_str() != key)
                .map(|(k, v)| k.len() + v.len())
                .sum();
            let needed = key.len() + value.len();
            let available = quota.saturating_sub(used);
            if needed > available {
                return Err(SubstrateError::QuotaExceeded {
                    key: key.to_string(),
                    needed,
                    available,
                });
            }
        }

        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), SubstrateError> {
        let mut entries = self.entries.lock().map_err(|_| SubstrateError::Poisoned)?;
        entries.remove(key);
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>, SubstrateError> {
        let entries = self.entries.lock().map_err(|_| SubstrateError::Poisoned)?;
        Ok(entries.keys().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[test]
    fn set_get_remove() {
        let kv = MemoryKeyValueStore::new();
        assert_eq!(kv.get("a").unwrap(), None);

        kv.set("a", "1").unwrap();
        assert_eq!(kv.get("a").unwrap(), Some("1".to_string()));

        kv.set("a", "2").unwrap();
        assert_eq!(kv.get("a").unwrap(), Some("2".to_string()));
        assert_eq!(kv.len(), 1);

        kv.remove("a").unwrap();
        assert_eq!(kv.get("a").unwrap(), None);
        kv.remove("a").unwrap();
    }

    #[test]
    fn keys_are_sorted() {
        let kv = MemoryKeyValueStore::new();
        kv.set("guest_tags", "[]").unwrap();
        kv.set("guest_views", "[]").unwrap();
        kv.set("basic", "x").unwrap();
        assert_eq!(kv.keys().unwrap(), vec!["basic", "guest_tags", "guest_views"]);
    }

    #[test]
    fn quota_rejects_oversized_write() {
        let kv = MemoryKeyValueStore::with_quota(10);
        kv.set("k", "12345").unwrap();
        assert_eq!(kv.used_bytes(), 6);

        let err = kv.set("other", "123456").unwrap_err();
        assert!(matches!(err, SubstrateError::QuotaExceeded { available: 4, .. }));
        assert_eq!(kv.get("other").unwrap(), None);
    }

    #[test]
    fn size_queries_survive_poisoned_lock() {
        let kv = Arc::new(MemoryKeyValueStore::new());
        kv.set("k", "v").unwrap();

        let writer = Arc::clone(&kv);
        let _ = std::thread::spawn(move || {
            let _guard = writer.entries.lock().unwrap();
            panic!("writer died holding the lock");
        })
        .join();

        assert!(kv.entries.is_poisoned());
        assert_eq!(kv.len(), 1);
        assert_eq!(kv.used_bytes(), 2);
        assert_eq!(kv.get("k"), Err(SubstrateError::Poisoned));
    }

    #[test]
    fn quota_counts_replaced_value_once() {
        let kv = MemoryKeyValueStore::with_quota(10);
        kv.set("k", "123456789").unwrap();
        // Overwriting the same key frees the old value first
        kv.set("k", "987654321").unwrap();
        assert_eq!(kv.get("k").unwrap(), Some("987654321".to_string()));
    }
}
