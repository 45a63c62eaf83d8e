//! App container — the orchestration layer that owns one instance of every
//! store, the wheel, the RNG and the configuration.
//!
//! Uses `thread_local!` + `RefCell` for safe mutable access in single-threaded
//! WASM. The Worker keeps the module alive, so the App persists across
//! `handle_request` calls for the whole browser session. Until
//! [`init`] runs there is no App and feature routes answer "not ready";
//! nothing can write defaults over data the bridge has not restored yet.

use std::cell::RefCell;
use std::rc::Rc;

use rand::SeedableRng;
use rand::rngs::StdRng;
use serde::Serialize;

use crate::config::WheelConfig;
use crate::error::WheelError;
use crate::storage::{BROWSER_QUOTA, KeyValueStore, MemoryStore};
use crate::store::history::{HistoryStore, WinEntry};
use crate::store::language::{Language, LanguageStore};
use crate::store::profiles::{ProfileMap, ProfileStore};
use crate::store::theme::Theme;
use crate::wheel::spin::{SpinRequest, Wheel};

pub struct App {
    profiles: ProfileStore,
    history: HistoryStore,
    language: LanguageStore,
    theme: Theme,
    wheel: Wheel,
    config: WheelConfig,
    rng: StdRng,
}

/// Export view of the whole App state.
#[derive(Debug, Serialize)]
pub struct Snapshot<'a> {
    pub current_profile: &'a str,
    pub profiles: &'a ProfileMap,
    pub history: &'a [WinEntry],
    pub language: Language,
    pub theme: Theme,
    pub rotation: f64,
    pub spinning: bool,
}

impl App {
    /// Load every store from `storage` with an entropy-seeded RNG.
    pub fn load(storage: Rc<dyn KeyValueStore>, config: WheelConfig) -> Self {
        Self::with_rng(storage, config, StdRng::from_entropy())
    }

    pub fn with_rng(storage: Rc<dyn KeyValueStore>, config: WheelConfig, rng: StdRng) -> Self {
        Self {
            profiles: ProfileStore::load(storage.clone()),
            history: HistoryStore::load(storage.clone()),
            language: LanguageStore::load(storage),
            theme: Theme::default(),
            wheel: Wheel::new(),
            config,
            rng,
        }
    }

    pub fn profiles(&self) -> &ProfileStore {
        &self.profiles
    }

    pub fn profiles_mut(&mut self) -> &mut ProfileStore {
        &mut self.profiles
    }

    pub fn history(&self) -> &HistoryStore {
        &self.history
    }

    pub fn history_mut(&mut self) -> &mut HistoryStore {
        &mut self.history
    }

    pub fn language(&self) -> Language {
        self.language.language()
    }

    pub fn set_language(&mut self, language: Language) {
        self.language.set_language(language);
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn toggle_theme(&mut self) {
        self.theme.toggle();
    }

    pub fn wheel(&self) -> &Wheel {
        &self.wheel
    }

    pub fn config(&self) -> &WheelConfig {
        &self.config
    }

    /// Spin the wheel over the current profile's items.
    pub fn spin(&mut self) -> Result<SpinRequest, WheelError> {
        let profile = self.profiles.current();
        let items = self.profiles.current_items();
        self.wheel
            .request_spin(profile, items, &self.config, &mut self.rng)
    }

    /// Finish spin `spin_id` and record its winner. `None` if that spin is
    /// not the one in flight (already completed, or never started).
    pub fn complete_spin(&mut self, spin_id: u64) -> Option<WinEntry> {
        let plan = self.wheel.complete(spin_id)?;
        Some(self.history.record_win(&plan.profile, &plan.label).clone())
    }

    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            current_profile: self.profiles.current(),
            profiles: self.profiles.profiles(),
            history: self.history.entries(),
            language: self.language(),
            theme: self.theme,
            rotation: self.wheel.rotation(),
            spinning: self.wheel.is_spinning(),
        }
    }
}

thread_local! {
    static STORAGE: Rc<MemoryStore> = Rc::new(MemoryStore::with_quota(BROWSER_QUOTA));
    static APP: RefCell<Option<App>> = const { RefCell::new(None) };
}

/// The localStorage mirror shared by every store. Writes past the browser
/// quota fail here, before the page would reject them.
pub fn storage() -> Rc<MemoryStore> {
    STORAGE.with(Rc::clone)
}

/// Load (or reload) every store from the mirror.
pub fn init(config: WheelConfig) {
    let storage: Rc<dyn KeyValueStore> = storage();
    let app = App::load(storage, config);
    APP.with(|cell| *cell.borrow_mut() = Some(app));
}

pub fn is_ready() -> bool {
    APP.with(|cell| cell.borrow().is_some())
}

/// Execute a closure with read access to the App, if initialised.
pub fn with_app<F, R>(f: F) -> Option<R>
where
    F: FnOnce(&App) -> R,
{
    APP.with(|cell| cell.borrow().as_ref().map(f))
}

/// Execute a closure with mutable access to the App, if initialised.
pub fn with_app_mut<F, R>(f: F) -> Option<R>
where
    F: FnOnce(&mut App) -> R,
{
    APP.with(|cell| cell.borrow_mut().as_mut().map(f))
}

/// Drop the App and empty the mirror (used by tests to isolate state).
pub fn reset() {
    APP.with(|cell| *cell.borrow_mut() = None);
    STORAGE.with(|s| s.clear());
}
