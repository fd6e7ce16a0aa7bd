use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use super::traits::Translator;
use super::{read_body, transport_error};
use crate::config::Lang;
use crate::error::{Error, Result};

const NAME: &str = "Lingva";

/// Lingva Translate API (secondary provider).
///
/// `GET <endpoint>?text=..&source=..&target=..&format=text`
pub struct LingvaTranslator {
    client: Client,
    /// Full endpoint URL (e.g., "https://lingva.ml/api/v1/translate")
    pub endpoint: String,
}

#[derive(Debug, Deserialize)]
struct LingvaResponse {
    #[serde(default)]
    translation: Option<String>,
}

impl LingvaTranslator {
    pub fn new(client: Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }
}

fn parse_response(body: &str) -> Result<String> {
    let response: LingvaResponse =
        serde_json::from_str(body).map_err(|e| Error::MalformedResponse {
            provider: NAME,
            reason: e.to_string(),
        })?;
    Ok(response.translation.unwrap_or_default())
}

#[async_trait]
impl Translator for LingvaTranslator {
    fn name(&self) -> &'static str {
        NAME
    }

    async fn translate(&self, text: &str, source: &Lang, target: &Lang) -> Result<String> {
        debug!("{} request {} -> {}", NAME, source, target);

        let response = self
            .client
            .get(&self.endpoint)
            .query(&[
                ("text", text),
                ("source", source.as_str()),
                ("target", target.as_str()),
                ("format", "text"),
            ])
            .send()
            .await
            .map_err(|e| transport_error(NAME, &e))?;

        let body = read_body(NAME, response).await?;
        parse_response(&body)
    }
}
