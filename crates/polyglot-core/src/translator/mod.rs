mod traits;
mod mymemory;
mod lingva;
mod fallback;

pub use traits::Translator;
pub use mymemory::MyMemoryTranslator;
pub use lingva::LingvaTranslator;
pub use fallback::{
    FallbackTranslator, TranslationOutcome, TranslationRequest, TRANSLATION_FAILED,
    TRANSLATION_UNAVAILABLE,
};

use reqwest::Client;
use std::time::Duration;

use crate::config::ProviderConfig;
use crate::error::{Error, Result};

/// Build the HTTP client shared by both providers.
///
/// No timeout is set unless `timeout_secs` is configured. A zero timeout
/// would fail every request and is rejected.
pub fn http_client(config: &ProviderConfig) -> Result<Client> {
    if config.timeout_secs == Some(0) {
        return Err(Error::ConfigInvalid {
            field: "providers.timeout_secs".to_string(),
            reason: "must be greater than zero".to_string(),
        });
    }

    let mut builder = Client::builder().user_agent(config.user_agent.clone());

    if let Some(secs) = config.timeout_secs {
        builder = builder.timeout(Duration::from_secs(secs));
    }

    builder.build().map_err(|e| Error::TranslationRequest {
        provider: "http client",
        reason: e.to_string(),
    })
}

/// Classify a reqwest failure for the given provider
fn transport_error(provider: &'static str, e: &reqwest::Error) -> Error {
    if e.is_timeout() {
        Error::TranslationTimeout(provider)
    } else if e.is_decode() {
        Error::MalformedResponse {
            provider,
            reason: e.to_string(),
        }
    } else {
        Error::TranslationRequest {
            provider,
            reason: e.to_string(),
        }
    }
}

/// Check the status of a provider response and read its body
async fn read_body(provider: &'static str, response: reqwest::Response) -> Result<String> {
    let status = response.status();
    if !status.is_success() {
        return Err(Error::TranslationStatus {
            provider,
            status: status.as_u16(),
        });
    }

    response
        .text()
        .await
        .map_err(|e| transport_error(provider, &e))
}
