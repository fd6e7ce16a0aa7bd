//! Askama templates for the translation widget.
//!
//! ## Template Structure
//!
//! - `base.html` - Common layout with CSS/JS
//! - `index.html` - The widget: source input, target selection, results area
//! - `partials/translation_box.html` - One result box, streamed over SSE

use askama::Template;
use askama_web::WebTemplate;
use polyglot_core::{AppConfig, LanguageEntry, TranslationOutcome, language};

// =============================================================================
// Full Page Templates
// =============================================================================

/// Widget page.
///
/// Speech settings are rendered into data attributes; the browser owns playback.
#[derive(Template, WebTemplate)]
#[template(path = "index.html")]
pub struct IndexTemplate {
    pub languages: Vec<LanguageEntry>,
    pub default_source: String,
    pub neutral_lang: String,
    pub speech_rate: f32,
    pub speech_pitch: f32,
    pub speech_volume: f32,
}

impl IndexTemplate {
    pub fn new(config: &AppConfig) -> Self {
        Self {
            languages: language::all().to_vec(),
            default_source: config.source_lang.to_string(),
            neutral_lang: config.neutral_lang.to_string(),
            speech_rate: config.speech.rate,
            speech_pitch: config.speech.pitch,
            speech_volume: config.speech.volume,
        }
    }
}

// =============================================================================
// Fragment Templates (SSE payloads)
// =============================================================================

/// A single translation result box.
///
/// Error outcomes keep the same box; `is_error` only changes styling.
#[derive(Template, WebTemplate)]
#[template(path = "partials/translation_box.html")]
pub struct TranslationBoxTemplate {
    pub code: String,
    pub label: String,
    pub text: String,
    pub is_error: bool,
    pub can_listen: bool,
}

impl From<&TranslationOutcome> for TranslationBoxTemplate {
    fn from(outcome: &TranslationOutcome) -> Self {
        let label = outcome
            .language()
            .map_or_else(|_| outcome.to_lang.to_string(), LanguageEntry::label);

        Self {
            code: outcome.to_lang.to_string(),
            label,
            text: outcome.text.clone(),
            is_error: outcome.is_error,
            can_listen: outcome.can_listen(),
        }
    }
}
