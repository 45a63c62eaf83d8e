//! Profile store — named, ordered item lists and the current-profile pointer.
//!
//! ## Lifecycle
//!
//! - **First run:** no `GLUECKSRAD_PROFILES_V2` blob. A legacy
//!   `GLUECKSRAD_PROFILES` map is adopted if present, otherwise the built-in
//!   `Standard` profile; either way the result is written immediately.
//! - **Every load:** blob parsed; an unparsable or empty map falls back to
//!   the defaults in memory.
//! - **Every mutation:** full map written back.
//!
//! The current profile is not persisted and starts at `Standard` (or the
//! first profile when `Standard` is absent).

use std::rc::Rc;

use indexmap::IndexMap;

use crate::storage::KeyValueStore;
use crate::store::{LEGACY_PROFILES_KEY, PROFILES_KEY, persist, read_json};
use crate::wheel::item::{self, Item, MIN_EDIT_WEIGHT};

/// Profile name → items, in creation order.
pub type ProfileMap = IndexMap<String, Vec<Item>>;

pub const DEFAULT_PROFILE: &str = "Standard";

/// The built-in profile set used on first run and by reset.
pub fn default_profiles() -> ProfileMap {
    let mut map = ProfileMap::new();
    map.insert(DEFAULT_PROFILE.to_string(), item::default_items());
    map
}

pub struct ProfileStore {
    storage: Rc<dyn KeyValueStore>,
    profiles: ProfileMap,
    current: String,
}

impl ProfileStore {
    /// Load the persisted map, or bootstrap it on first run.
    pub fn load(storage: Rc<dyn KeyValueStore>) -> Self {
        let profiles = match read_json::<ProfileMap>(&*storage, PROFILES_KEY) {
            Ok(Some(map)) if !map.is_empty() => {
                log::info!("loaded {} profiles", map.len());
                map
            }
            Ok(Some(_)) => {
                log::warn!("stored profile map is empty, using defaults");
                default_profiles()
            }
            Ok(None) => first_run(&*storage),
            Err(e) => {
                log::warn!("{}, using default profiles", e);
                default_profiles()
            }
        };
        let current = resolve_current(&profiles, DEFAULT_PROFILE);
        Self {
            storage,
            profiles,
            current,
        }
    }

    pub fn current(&self) -> &str {
        &self.current
    }

    /// Items of the current profile.
    pub fn current_items(&self) -> &[Item] {
        self.items(&self.current).unwrap_or(&[])
    }

    pub fn items(&self, name: &str) -> Option<&[Item]> {
        self.profiles.get(name).map(Vec::as_slice)
    }

    pub fn profiles(&self) -> &ProfileMap {
        &self.profiles
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.profiles.keys().map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.profiles.contains_key(name)
    }

    /// Switch the current profile. Unknown names are ignored, never created.
    pub fn set_current_profile(&mut self, name: &str) -> bool {
        if !self.profiles.contains_key(name) {
            log::debug!("profile {:?} does not exist, not switching", name);
            return false;
        }
        self.current = name.to_string();
        true
    }

    /// Replace the current profile's item list.
    pub fn replace_items(&mut self, items: Vec<Item>) {
        self.profiles.insert(self.current.clone(), items);
        self.persist();
    }

    /// Create an empty profile and switch to it. An existing name is only
    /// switched to, never overwritten. Returns whether a profile was created.
    pub fn create_profile(&mut self, name: &str) -> bool {
        let name = name.trim();
        if name.is_empty() {
            return false;
        }
        if self.profiles.contains_key(name) {
            self.current = name.to_string();
            return false;
        }
        self.profiles.insert(name.to_string(), Vec::new());
        self.current = name.to_string();
        self.persist();
        true
    }

    /// Discard every profile and restore the built-in `Standard` profile.
    pub fn reset_to_default(&mut self) {
        self.profiles = default_profiles();
        self.current = DEFAULT_PROFILE.to_string();
        self.persist();
    }

    // ── Item editing ───────────────────────────────────────────────
    //
    // Each helper builds a new list for the current profile and hands it to
    // `replace_items`, so every edit is one full write.

    /// Append a participant. Returns the new item's id, or `None` for a blank label.
    pub fn add_item(&mut self, label: &str) -> Option<String> {
        let label = label.trim();
        if label.is_empty() {
            return None;
        }
        let item = Item::new(label);
        let id = item.id.clone();
        let mut items = self.current_items().to_vec();
        items.push(item);
        self.replace_items(items);
        Some(id)
    }

    /// Step a weight by `delta`, never below 1.
    pub fn adjust_weight(&mut self, id: &str, delta: f64) -> bool {
        self.edit_item(id, |item| {
            item.weight = (item.weight + delta).max(MIN_EDIT_WEIGHT);
        })
    }

    /// Recolor an item; only palette colors are accepted.
    pub fn set_color(&mut self, id: &str, color: &str) -> bool {
        if !item::is_palette_color(color) {
            return false;
        }
        self.edit_item(id, |item| item.color = color.to_lowercase())
    }

    pub fn remove_item(&mut self, id: &str) -> bool {
        let items = self.current_items();
        if !items.iter().any(|i| i.id == id) {
            return false;
        }
        let remaining = items.iter().filter(|i| i.id != id).cloned().collect();
        self.replace_items(remaining);
        true
    }

    fn edit_item<F>(&mut self, id: &str, f: F) -> bool
    where
        F: FnOnce(&mut Item),
    {
        let mut items = self.current_items().to_vec();
        let Some(item) = items.iter_mut().find(|i| i.id == id) else {
            return false;
        };
        f(item);
        self.replace_items(items);
        true
    }

    fn persist(&self) {
        persist(&*self.storage, PROFILES_KEY, &self.profiles);
    }
}

/// No V2 blob yet: adopt a legacy map if there is one, else the defaults,
/// and write the result as the stored baseline.
fn first_run(storage: &dyn KeyValueStore) -> ProfileMap {
    let profiles = match read_json::<ProfileMap>(storage, LEGACY_PROFILES_KEY) {
        Ok(Some(map)) if !map.is_empty() => {
            log::info!("migrating {} profiles from {}", map.len(), LEGACY_PROFILES_KEY);
            map
        }
        Ok(_) => {
            log::info!("no stored profiles, writing defaults");
            default_profiles()
        }
        Err(e) => {
            log::warn!("ignoring legacy profiles: {}", e);
            default_profiles()
        }
    };
    persist(storage, PROFILES_KEY, &profiles);
    profiles
}

/// `wanted` if it exists, else `Standard`, else the first profile.
fn resolve_current(profiles: &ProfileMap, wanted: &str) -> String {
    if profiles.contains_key(wanted) {
        wanted.to_string()
    } else if profiles.contains_key(DEFAULT_PROFILE) {
        DEFAULT_PROFILE.to_string()
    } else {
        profiles
            .keys()
            .next()
            .cloned()
            .unwrap_or_else(|| DEFAULT_PROFILE.to_string())
    }
}
