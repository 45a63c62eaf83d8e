//! Key-value persistence seam and the in-module localStorage mirror.
//!
//! The stores only ever talk to [`KeyValueStore`]. In the browser the
//! backend is a [`MemoryStore`]: the JS bridge seeds it from `localStorage`
//! on page load (`/api/storage/restore`) and later drains its dirty journal
//! back into `localStorage` (`/api/storage/persist`).
//!
//! ## Lifecycle
//!
//! - **Page load:** bridge posts every known key, loaded via [`MemoryStore::restore`]
//! - **Every mutation:** store writes its full blob, key joins the dirty journal
//! - **Flush:** bridge calls persist, [`MemoryStore::take_dirty`] empties the journal

use std::cell::RefCell;
use std::collections::HashMap;

use crate::error::{StorageError, StoreError};

/// String-keyed blob storage. Methods take `&self`: every implementation is
/// shared between the stores of one single-threaded App.
pub trait KeyValueStore {
    /// Read a key. `Ok(None)` means the key was never written.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Overwrite a key with a new value.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// Per-origin `localStorage` limit of the common browsers (5 MiB).
pub const BROWSER_QUOTA: usize = 5 * 1024 * 1024;

/// In-memory mirror of `localStorage` with a write journal.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RefCell<HashMap<String, String>>,
    /// Keys written since the last flush, in first-write order.
    dirty: RefCell<Vec<String>>,
    /// Byte limit over all keys and values, like the browser's quota.
    quota: Option<usize>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// A mirror that rejects writes once keys plus values exceed `limit` bytes.
    pub fn with_quota(limit: usize) -> Self {
        Self {
            quota: Some(limit),
            ..Self::default()
        }
    }

    /// Seed entries read from the real `localStorage`. Not journaled.
    pub fn restore<I>(&self, entries: I) -> usize
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut map = self.entries.borrow_mut();
        let mut count = 0;
        for (key, value) in entries {
            map.insert(key, value);
            count += 1;
        }
        count
    }

    /// Seed from the bridge's JSON object of raw `localStorage` strings.
    pub fn restore_json(&self, json: &str) -> Result<usize, StoreError> {
        if json.trim().is_empty() {
            return Ok(0);
        }
        let entries: HashMap<String, String> =
            serde_json::from_str(json).map_err(StoreError::Restore)?;
        Ok(self.restore(entries))
    }

    /// Drain the journal, returning each dirty key with its current value.
    pub fn take_dirty(&self) -> Vec<(String, String)> {
        let keys: Vec<String> = self.dirty.borrow_mut().drain(..).collect();
        let map = self.entries.borrow();
        keys.into_iter()
            .filter_map(|key| map.get(&key).map(|value| (key.clone(), value.clone())))
            .collect()
    }

    pub fn has_dirty(&self) -> bool {
        !self.dirty.borrow().is_empty()
    }

    /// Forget everything, journal included.
    pub fn clear(&self) {
        self.entries.borrow_mut().clear();
        self.dirty.borrow_mut().clear();
    }

    /// Bytes used by every entry except `key`.
    fn used_bytes_excluding(&self, key: &str) -> usize {
        self.entries
            .borrow()
            .iter()
            .filter(|(k, _)| k.as_str() != key)
            .map(|(k, v)| k.len() + v.len())
            .sum()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.borrow().get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        if let Some(limit) = self.quota {
            let needed = self.used_bytes_excluding(key) + key.len() + value.len();
            if needed > limit {
                return Err(StorageError::QuotaExceeded {
                    key: key.to_string(),
                    needed,
                    limit,
                });
            }
        }
        self.entries
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        let mut dirty = self.dirty.borrow_mut();
        if !dirty.iter().any(|k| k == key) {
            dirty.push(key.to_string());
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_key_is_none() {
        let store = MemoryStore::new();
        assert_eq!(store.get("nope").unwrap(), None);
    }

    #[test]
    fn set_then_get() {
        let store = MemoryStore::new();
        store.set("APP_LANGUAGE", "EN").unwrap();
        assert_eq!(store.get("APP_LANGUAGE").unwrap().as_deref(), Some("EN"));
    }

    #[test]
    fn restore_does_not_mark_dirty() {
        let store = MemoryStore::new();
        let count = store.restore([("APP_LANGUAGE".to_string(), "TH".to_string())]);
        assert_eq!(count, 1);
        assert!(!store.has_dirty());
        assert_eq!(store.get("APP_LANGUAGE").unwrap().as_deref(), Some("TH"));
    }

    #[test]
    fn take_dirty_dedupes_and_drains() {
        let store = MemoryStore::new();
        store.set("a", "1").unwrap();
        store.set("b", "2").unwrap();
        store.set("a", "3").unwrap();

        let dirty = store.take_dirty();
        assert_eq!(
            dirty,
            vec![
                ("a".to_string(), "3".to_string()),
                ("b".to_string(), "2".to_string()),
            ]
        );
        assert!(!store.has_dirty());
        assert!(store.take_dirty().is_empty());
    }

    #[test]
    fn restore_json_parses_string_object() {
        let store = MemoryStore::new();
        let count = store
            .restore_json(r#"{"APP_LANGUAGE":"EN","WHEEL_HISTORY":"[]"}"#)
            .unwrap();
        assert_eq!(count, 2);
        assert_eq!(store.get("WHEEL_HISTORY").unwrap().as_deref(), Some("[]"));
    }

    #[test]
    fn restore_json_rejects_non_string_values() {
        let store = MemoryStore::new();
        let result = store.restore_json(r#"{"APP_LANGUAGE": 3}"#);
        assert!(matches!(result, Err(StoreError::Restore(_))));
    }

    #[test]
    fn quota_rejects_oversized_write_and_keeps_old_value() {
        let store = MemoryStore::with_quota(16);
        store.set("k", "small").unwrap();
        let err = store.set("k", "this value is far too long").unwrap_err();
        assert!(matches!(err, StorageError::QuotaExceeded { limit: 16, .. }));
        assert_eq!(store.get("k").unwrap().as_deref(), Some("small"));
    }

    #[test]
    fn quota_counts_replacement_not_sum() {
        let store = MemoryStore::with_quota(10);
        store.set("k", "12345").unwrap();
        // Overwriting the same key only counts the new value.
        store.set("k", "abcdefgh").unwrap();
    }
}
