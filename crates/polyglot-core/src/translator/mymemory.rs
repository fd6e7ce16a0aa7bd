use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use super::traits::Translator;
use super::{read_body, transport_error};
use crate::config::Lang;
use crate::error::{Error, Result};

const NAME: &str = "MyMemory";

/// MyMemory translation API (primary provider).
///
/// `GET <endpoint>?q=<text>&langpair=<source>|<target>`
pub struct MyMemoryTranslator {
    client: Client,
    /// Full endpoint URL (e.g., "https://api.mymemory.translated.net/get")
    pub endpoint: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct MyMemoryResponse {
    response_data: ResponseData,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ResponseData {
    #[serde(default)]
    translated_text: Option<String>,
}

impl MyMemoryTranslator {
    pub fn new(client: Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
        }
    }

    fn request_url(&self, text: &str, source: &Lang, target: &Lang) -> String {
        format!(
            "{}?q={}&langpair={}|{}",
            self.endpoint,
            urlencoding::encode(text),
            urlencoding::encode(source.as_str()),
            urlencoding::encode(target.as_str())
        )
    }
}

/// Extract `responseData.translatedText`; a missing or null field yields "".
fn parse_response(body: &str) -> Result<String> {
    let response: MyMemoryResponse =
        serde_json::from_str(body).map_err(|e| Error::MalformedResponse {
            provider: NAME,
            reason: e.to_string(),
        })?;
    Ok(response.response_data.translated_text.unwrap_or_default())
}

#[async_trait]
impl Translator for MyMemoryTranslator {
    fn name(&self) -> &'static str {
        NAME
    }

    async fn translate(&self, text: &str, source: &Lang, target: &Lang) -> Result<String> {
        debug!("{} request {} -> {}", NAME, source, target);

        let response = self
            .client
            .get(self.request_url(text, source, target))
            .send()
            .await
            .map_err(|e| transport_error(NAME, &e))?;

        let body = read_body(NAME, response).await?;
        parse_response(&body)
    }
}
