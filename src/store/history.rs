//! Win history — flat, newest-first log of spin outcomes across all profiles.
//!
//! Entries are immutable once recorded and only ever cleared in bulk.
//! Filtering by profile is the caller's job (see `stats`).

use std::rc::Rc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::storage::KeyValueStore;
use crate::store::{HISTORY_KEY, persist, read_json};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WinEntry {
    pub id: String,
    /// Profile name at the time of the spin.
    pub profile: String,
    /// Label of the drawn item.
    pub winner: String,
    /// Stored as Unix milliseconds.
    #[serde(with = "chrono::serde::ts_milliseconds")]
    pub timestamp: DateTime<Utc>,
}

impl WinEntry {
    pub fn new(profile: &str, winner: &str) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            profile: profile.to_string(),
            winner: winner.to_string(),
            timestamp: Utc::now(),
        }
    }
}

pub struct HistoryStore {
    storage: Rc<dyn KeyValueStore>,
    entries: Vec<WinEntry>,
}

impl HistoryStore {
    /// Load the stored log. Missing, unreadable or malformed → empty.
    pub fn load(storage: Rc<dyn KeyValueStore>) -> Self {
        let entries = match read_json::<Vec<WinEntry>>(&*storage, HISTORY_KEY) {
            Ok(Some(entries)) => {
                log::info!("loaded {} history entries", entries.len());
                entries
            }
            Ok(None) => Vec::new(),
            Err(e) => {
                log::warn!("{}, starting with empty history", e);
                Vec::new()
            }
        };
        Self { storage, entries }
    }

    /// All entries, newest first.
    pub fn entries(&self) -> &[WinEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Prepend a new entry stamped now and persist the log.
    pub fn record_win(&mut self, profile: &str, winner: &str) -> &WinEntry {
        self.entries.insert(0, WinEntry::new(profile, winner));
        self.persist();
        &self.entries[0]
    }

    pub fn clear_history(&mut self) {
        self.entries.clear();
        self.persist();
    }

    fn persist(&self) {
        persist(&*self.storage, HISTORY_KEY, &self.entries);
    }
}
