//! Language preference — DE, EN or TH, stored as a bare uppercase code.

use std::fmt;
use std::rc::Rc;

use serde::{Deserialize, Serialize};

use crate::storage::KeyValueStore;
use crate::store::LANGUAGE_KEY;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Language {
    #[default]
    De,
    En,
    Th,
}

impl Language {
    pub const ALL: [Language; 3] = [Language::De, Language::En, Language::Th];

    pub fn code(self) -> &'static str {
        match self {
            Language::De => "DE",
            Language::En => "EN",
            Language::Th => "TH",
        }
    }

    pub fn flag(self) -> &'static str {
        match self {
            Language::De => "\u{1F1E9}\u{1F1EA}", // 🇩🇪
            Language::En => "\u{1F1FA}\u{1F1F8}", // 🇺🇸
            Language::Th => "\u{1F1F9}\u{1F1ED}", // 🇹🇭
        }
    }

    /// Case-insensitive code lookup.
    pub fn parse(code: &str) -> Option<Language> {
        match code.trim().to_ascii_uppercase().as_str() {
            "DE" => Some(Language::De),
            "EN" => Some(Language::En),
            "TH" => Some(Language::Th),
            _ => None,
        }
    }

    /// Like [`Language::parse`] but unknown codes become German.
    pub fn parse_lenient(code: &str) -> Language {
        Self::parse(code).unwrap_or_default()
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

pub struct LanguageStore {
    storage: Rc<dyn KeyValueStore>,
    language: Language,
}

impl LanguageStore {
    /// Missing key or read failure → German; unknown stored codes normalise to German.
    pub fn load(storage: Rc<dyn KeyValueStore>) -> Self {
        let language = match storage.get(LANGUAGE_KEY) {
            Ok(Some(raw)) => {
                let language = Language::parse_lenient(&raw);
                if Language::parse(&raw).is_none() {
                    log::warn!("unknown stored language {:?}, using {}", raw, language);
                }
                language
            }
            Ok(None) => Language::default(),
            Err(e) => {
                log::warn!("{}, using {}", e, Language::default());
                Language::default()
            }
        };
        Self { storage, language }
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn set_language(&mut self, language: Language) {
        self.language = language;
        if let Err(e) = self.storage.set(LANGUAGE_KEY, language.code()) {
            log::warn!("failed to persist {}: {}", LANGUAGE_KEY, e);
        }
    }
}
