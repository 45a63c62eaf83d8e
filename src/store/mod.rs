//! Persisted stores — profiles, win history, language — plus the in-memory
//! theme toggle.
//!
//! Each store loads its own blob once (load-or-default) and writes its whole
//! snapshot back after every mutation. Storage failures are logged and the
//! in-memory state stays authoritative.

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::StoreError;
use crate::storage::KeyValueStore;

pub mod history;
pub mod language;
pub mod profiles;
pub mod theme;

/// Profile map, JSON object of name → item list.
pub const PROFILES_KEY: &str = "GLUECKSRAD_PROFILES_V2";
/// Profile map written by the first release; same shape, read once for migration.
pub const LEGACY_PROFILES_KEY: &str = "GLUECKSRAD_PROFILES";
/// Win history, JSON array newest first.
pub const HISTORY_KEY: &str = "WHEEL_HISTORY";
/// Language code as a bare string.
pub const LANGUAGE_KEY: &str = "APP_LANGUAGE";

/// Read and parse a JSON blob. `Ok(None)` when the key was never written.
pub(crate) fn read_json<T: DeserializeOwned>(
    storage: &dyn KeyValueStore,
    key: &str,
) -> Result<Option<T>, StoreError> {
    let Some(raw) = storage.get(key)? else {
        return Ok(None);
    };
    serde_json::from_str(&raw)
        .map(Some)
        .map_err(|source| StoreError::Malformed {
            key: key.to_string(),
            source,
        })
}

/// Serialize and write a JSON blob.
pub(crate) fn write_json<T: Serialize + ?Sized>(
    storage: &dyn KeyValueStore,
    key: &str,
    value: &T,
) -> Result<(), StoreError> {
    let json = serde_json::to_string(value).map_err(|source| StoreError::Malformed {
        key: key.to_string(),
        source,
    })?;
    storage.set(key, &json)?;
    Ok(())
}

/// Write-through used after every mutation; failures are logged only.
pub(crate) fn persist<T: Serialize + ?Sized>(storage: &dyn KeyValueStore, key: &str, value: &T) {
    if let Err(e) = write_json(storage, key, value) {
        log::warn!("failed to persist {}: {}", key, e);
    }
}
