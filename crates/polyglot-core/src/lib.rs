//! Polyglot Core Library
//!
//! This library provides the core functionality for multi-target translation:
//! - Language registry with display and speech metadata
//! - Two-tier translation (MyMemory, falling back to Lingva)
//! - Sequential batch translation into many target languages
//! - Text-to-speech playback handle

pub mod batch;
pub mod config;
pub mod error;
pub mod language;
pub mod speech;
pub mod translator;
pub mod util;

pub use batch::{BatchRequest, BatchTranslator};
pub use config::{
    AppConfig, Lang, ProviderConfig, SpeechConfig, DEFAULT_NEUTRAL_LANG, DEFAULT_SOURCE_LANG,
};
pub use error::{Error, Result};
pub use language::{LanguageEntry, LanguageRegistry};
pub use speech::{CommandSpeechEngine, SpeechEngine, SpeechPlayer, Utterance};
pub use translator::{
    FallbackTranslator, LingvaTranslator, MyMemoryTranslator, TranslationOutcome,
    TranslationRequest, Translator, TRANSLATION_FAILED, TRANSLATION_UNAVAILABLE,
};
