use async_trait::async_trait;
use crate::config::Lang;
use crate::error::Result;

/// Trait for translation backends
///
/// Implementations report transport, status and body-shape problems as errors.
/// A response without translated text is `Ok` with an empty string; deciding
/// whether that is a failure belongs to the caller.
#[async_trait]
pub trait Translator: Send + Sync {
    /// Human-readable backend name, used in logs and outcomes
    fn name(&self) -> &'static str;

    /// Translate text from source language to target language
    async fn translate(
        &self,
        text: &str,
        source: &Lang,
        target: &Lang,
    ) -> Result<String>;
}
