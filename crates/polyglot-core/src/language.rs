//! Language registry: the single source of truth for supported languages.
//!
//! The table is built once on first access and never mutated afterwards.
//! Insertion order is display order.

use serde::Serialize;
use std::sync::OnceLock;

use crate::config::Lang;
use crate::error::{Error, Result};

/// A supported language with its display metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LanguageEntry {
    /// ISO 639-1 language code (e.g., "en", "fr")
    pub code: &'static str,
    /// English display name
    pub name: &'static str,
    /// Flag emoji
    pub flag: &'static str,
    /// Whether speech voices are commonly available for this language
    pub has_tts: bool,
}

impl LanguageEntry {
    const fn new(code: &'static str, name: &'static str, flag: &'static str, has_tts: bool) -> Self {
        Self {
            code,
            name,
            flag,
            has_tts,
        }
    }

    /// Dropdown/header label, e.g. "🇪🇸 Spanish"
    pub fn label(&self) -> String {
        format!("{} {}", self.flag, self.name)
    }

    pub fn lang(&self) -> Lang {
        Lang::new(self.code)
    }
}

const LANGUAGES: &[LanguageEntry] = &[
    LanguageEntry::new("en", "English", "🇬🇧", true),
    LanguageEntry::new("es", "Spanish", "🇪🇸", true),
    LanguageEntry::new("it", "Italian", "🇮🇹", true),
    LanguageEntry::new("fr", "French", "🇫🇷", true),
    LanguageEntry::new("pt", "Portuguese", "🇵🇹", true),
    LanguageEntry::new("el", "Greek", "🇬🇷", true),
    LanguageEntry::new("de", "German", "🇩🇪", true),
    LanguageEntry::new("nl", "Dutch", "🇳🇱", true),
    LanguageEntry::new("no", "Norwegian", "🇳🇴", true),
    LanguageEntry::new("ro", "Romanian", "🇷🇴", true),
    LanguageEntry::new("ru", "Russian", "🇷🇺", true),
    LanguageEntry::new("tr", "Turkish", "🇹🇷", true),
    LanguageEntry::new("fi", "Finnish", "🇫🇮", true),
    LanguageEntry::new("hu", "Hungarian", "🇭🇺", true),
    LanguageEntry::new("he", "Hebrew", "🇮🇱", true),
    LanguageEntry::new("fa", "Farsi", "🇮🇷", true),
    LanguageEntry::new("mn", "Mongolian", "🇲🇳", false),
    LanguageEntry::new("zh", "Chinese", "🇨🇳", true),
    LanguageEntry::new("ar", "Arabic", "🇸🇦", true),
    LanguageEntry::new("hi", "Hindi", "🇮🇳", true),
    LanguageEntry::new("sr", "Serbian", "🇷🇸", true),
    LanguageEntry::new("hy", "Armenian", "🇦🇲", false),
    LanguageEntry::new("lt", "Lithuanian", "🇱🇹", true),
    LanguageEntry::new("sq", "Albanian", "🇦🇱", false),
    LanguageEntry::new("id", "Indonesian", "🇮🇩", true),
    LanguageEntry::new("km", "Khmer", "🇰🇭", false),
];

/// Process-wide, read-only language table.
pub struct LanguageRegistry {
    languages: Vec<LanguageEntry>,
}

static REGISTRY: OnceLock<LanguageRegistry> = OnceLock::new();

impl LanguageRegistry {
    /// Get the global registry, initializing it on first call.
    pub fn get() -> &'static Self {
        REGISTRY.get_or_init(|| Self {
            languages: LANGUAGES.to_vec(),
        })
    }

    /// Look up a language by code. Unknown codes are an error, never substituted.
    pub fn lookup(&self, code: &str) -> Result<&LanguageEntry> {
        self.languages
            .iter()
            .find(|lang| lang.code == code)
            .ok_or_else(|| Error::UnknownLanguage(code.to_string()))
    }

    /// All languages in display order.
    pub fn all(&self) -> &[LanguageEntry] {
        &self.languages
    }
}

/// Look up a language in the global registry.
pub fn lookup(code: &str) -> Result<&'static LanguageEntry> {
    LanguageRegistry::get().lookup(code)
}

/// All languages of the global registry in display order.
pub fn all() -> &'static [LanguageEntry] {
    LanguageRegistry::get().all()
}
