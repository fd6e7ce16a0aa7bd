//! Batch translation: one source text into many target languages.
//!
//! Targets are processed strictly one after another, in the order given.
//! A failed target yields an error outcome and the batch moves on.

use futures::stream::{self, Stream, StreamExt};
use tracing::info;

use crate::config::{AppConfig, Lang};
use crate::error::{Error, Result};
use crate::language::LanguageRegistry;
use crate::translator::{FallbackTranslator, TranslationOutcome, TranslationRequest};

/// A validated translate action.
///
/// Construction is the boundary check: the text is non-empty after trimming,
/// at least one target is present, and every code is known to the registry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BatchRequest {
    text: String,
    from: Lang,
    targets: Vec<Lang>,
}

impl BatchRequest {
    pub fn new<I, T>(text: &str, from: impl Into<Lang>, targets: I) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
        T: Into<Lang>,
    {
        let text = text.trim();
        if text.is_empty() {
            return Err(Error::EmptySourceText);
        }

        let registry = LanguageRegistry::get();
        let from = from.into();
        registry.lookup(from.as_str())?;

        let targets: Vec<Lang> = targets.into_iter().map(Into::into).collect();
        if targets.is_empty() {
            return Err(Error::NoTargetLanguages);
        }
        for target in &targets {
            registry.lookup(target.as_str())?;
        }

        Ok(Self {
            text: text.to_string(),
            from,
            targets,
        })
    }

    /// Source text, already trimmed
    pub fn text(&self) -> &str {
        &self.text
    }

    pub const fn from(&self) -> &Lang {
        &self.from
    }

    pub fn targets(&self) -> &[Lang] {
        &self.targets
    }

    fn requests(&self) -> impl Iterator<Item = TranslationRequest> + '_ {
        self.targets
            .iter()
            .map(|to| TranslationRequest::new(self.text.clone(), self.from.clone(), to.clone()))
    }
}

/// Sequential fan-out over the fallback client.
pub struct BatchTranslator {
    client: FallbackTranslator,
}

impl BatchTranslator {
    pub const fn new(client: FallbackTranslator) -> Self {
        Self { client }
    }

    pub fn from_config(config: &AppConfig) -> Result<Self> {
        Ok(Self::new(FallbackTranslator::from_config(config)?))
    }

    /// Outcomes in target order; each request starts only after the previous
    /// one resolved. Dropping the stream stops the batch before the next target.
    pub fn stream<'a>(
        &'a self,
        request: &'a BatchRequest,
    ) -> impl Stream<Item = TranslationOutcome> + 'a {
        info!(
            "Translating {} chars from {} into {} languages",
            request.text.chars().count(),
            request.from,
            request.targets.len()
        );

        stream::iter(request.requests())
            .then(move |req| async move { self.client.translate_request(&req).await })
    }

    /// Translate into every target, collecting outcomes in target order
    pub async fn translate_to_many(&self, request: &BatchRequest) -> Vec<TranslationOutcome> {
        self.stream(request).collect().await
    }
}
