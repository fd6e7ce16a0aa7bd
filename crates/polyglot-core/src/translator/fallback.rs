use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, error, warn};

use super::traits::Translator;
use super::{http_client, LingvaTranslator, MyMemoryTranslator};
use crate::config::{AppConfig, Lang};
use crate::error::{Error, Result};
use crate::language::{self, LanguageEntry};

/// Message shown in place of a translation when both providers failed
pub const TRANSLATION_FAILED: &str = "Error: Translation failed";
/// Text shown when the secondary provider answered without a translation
pub const TRANSLATION_UNAVAILABLE: &str = "Translation unavailable";

/// One source text headed for one target language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationRequest {
    pub source_text: String,
    pub from: Lang,
    pub to: Lang,
}

impl TranslationRequest {
    pub fn new(source_text: impl Into<String>, from: impl Into<Lang>, to: impl Into<Lang>) -> Self {
        Self {
            source_text: source_text.into(),
            from: from.into(),
            to: to.into(),
        }
    }
}

/// Terminal result of translating into one target language.
///
/// When `is_error` is set, `text` holds a human-readable failure message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TranslationOutcome {
    pub to_lang: Lang,
    pub text: String,
    pub is_error: bool,
    /// Provider that produced `text`; `None` when both failed
    pub served_by: Option<&'static str>,
}

impl TranslationOutcome {
    fn translated(to_lang: Lang, text: String, provider: &'static str) -> Self {
        Self {
            to_lang,
            text,
            is_error: false,
            served_by: Some(provider),
        }
    }

    fn failed(to_lang: Lang) -> Self {
        Self {
            to_lang,
            text: TRANSLATION_FAILED.to_string(),
            is_error: true,
            served_by: None,
        }
    }

    /// Registry entry of the target language, for display and speech.
    pub fn language(&self) -> Result<&'static LanguageEntry> {
        language::lookup(self.to_lang.as_str())
    }

    /// Whether a listen action should be offered. Error text is speakable too.
    pub fn can_listen(&self) -> bool {
        self.language().is_ok_and(|lang| lang.has_tts)
    }
}

/// Two-tier translation client.
///
/// The primary provider is tried once; an error, an empty answer or an echo of
/// the input (for any target other than the neutral language) sends the
/// request to the secondary provider, also tried once. `translate` never
/// fails: every path ends in a `TranslationOutcome`.
pub struct FallbackTranslator {
    primary: Arc<dyn Translator>,
    secondary: Arc<dyn Translator>,
    neutral: Lang,
}

impl FallbackTranslator {
    pub fn new(primary: Arc<dyn Translator>, secondary: Arc<dyn Translator>, neutral: Lang) -> Self {
        Self {
            primary,
            secondary,
            neutral,
        }
    }

    /// Create the MyMemory -> Lingva client described by the configuration
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let client = http_client(&config.providers)?;

        let primary = MyMemoryTranslator::new(client.clone(), config.providers.mymemory_url.clone());
        let secondary = LingvaTranslator::new(client, config.providers.lingva_url.clone());

        Ok(Self::new(
            Arc::new(primary),
            Arc::new(secondary),
            config.neutral_lang.clone(),
        ))
    }

    /// Translate `text` from `from` into `to`
    pub async fn translate(&self, text: &str, from: &Lang, to: &Lang) -> TranslationOutcome {
        let request = TranslationRequest::new(text, from.clone(), to.clone());
        self.translate_request(&request).await
    }

    pub async fn translate_request(&self, request: &TranslationRequest) -> TranslationOutcome {
        match self.try_primary(request).await {
            Ok(text) => {
                return TranslationOutcome::translated(request.to.clone(), text, self.primary.name());
            }
            Err(e) => {
                warn!(
                    "{} failed for {}, falling back to {}: {}",
                    self.primary.name(),
                    request.to,
                    self.secondary.name(),
                    e
                );
            }
        }

        match self
            .secondary
            .translate(&request.source_text, &request.from, &request.to)
            .await
        {
            Ok(text) if text.is_empty() => {
                debug!("{} returned no text for {}", self.secondary.name(), request.to);
                TranslationOutcome::translated(
                    request.to.clone(),
                    TRANSLATION_UNAVAILABLE.to_string(),
                    self.secondary.name(),
                )
            }
            Ok(text) => TranslationOutcome::translated(request.to.clone(), text, self.secondary.name()),
            Err(e) => {
                error!("{} fallback failed for {}: {}", self.secondary.name(), request.to, e);
                TranslationOutcome::failed(request.to.clone())
            }
        }
    }

    /// Primary call plus the empty and passthrough heuristics
    async fn try_primary(&self, request: &TranslationRequest) -> Result<String> {
        let provider = self.primary.name();
        let text = self
            .primary
            .translate(&request.source_text, &request.from, &request.to)
            .await?;

        if text.is_empty() || text == TRANSLATION_UNAVAILABLE {
            return Err(Error::EmptyTranslation(provider));
        }

        if request.to != self.neutral && text == request.source_text {
            return Err(Error::PassthroughTranslation {
                provider,
                target: request.to.to_string(),
            });
        }

        Ok(text)
    }
}
