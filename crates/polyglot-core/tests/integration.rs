//! Integration tests for polyglot-core
//!
//! These tests verify the end-to-end workflow:
//! - Real provider clients against mock HTTP servers
//! - Fallback from MyMemory to Lingva
//! - Batch ordering and per-target failure isolation

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use futures::StreamExt;
use polyglot_core::{
    AppConfig, BatchRequest, BatchTranslator, Error, FallbackTranslator, Lang, ProviderConfig,
    Result, TRANSLATION_FAILED, TranslationOutcome, Translator,
};
use wiremock::{
    matchers::{method, path, query_param},
    Mock, MockServer, ResponseTemplate,
};

// =============================================================================
// Mock Translator for Testing
// =============================================================================

/// Answers "<text>@<target>" after a per-target delay, recording call order.
struct DelayedTranslator {
    calls: AtomicUsize,
    log: std::sync::Mutex<Vec<String>>,
    fail_for: Option<&'static str>,
}

impl DelayedTranslator {
    fn new(fail_for: Option<&'static str>) -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
            log: std::sync::Mutex::new(Vec::new()),
            fail_for,
        })
    }

    fn delay_for(target: &Lang) -> Duration {
        // Earlier targets are slower, so a concurrent implementation would reorder
        match target.as_str() {
            "fr" => Duration::from_millis(60),
            "de" => Duration::from_millis(30),
            _ => Duration::from_millis(1),
        }
    }
}

#[async_trait]
impl Translator for DelayedTranslator {
    fn name(&self) -> &'static str {
        "delayed"
    }

    async fn translate(&self, text: &str, _source: &Lang, target: &Lang) -> Result<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.log.lock().unwrap().push(format!("start:{target}"));
        tokio::time::sleep(Self::delay_for(target)).await;
        self.log.lock().unwrap().push(format!("end:{target}"));

        if self.fail_for == Some(target.as_str()) {
            return Err(Error::TranslationTimeout("delayed"));
        }
        Ok(format!("{text}@{target}"))
    }
}

struct AlwaysFails;

#[async_trait]
impl Translator for AlwaysFails {
    fn name(&self) -> &'static str {
        "always-fails"
    }

    async fn translate(&self, _text: &str, _source: &Lang, _target: &Lang) -> Result<String> {
        Err(Error::TranslationStatus {
            provider: "always-fails",
            status: 502,
        })
    }
}

// =============================================================================
// Test Fixtures
// =============================================================================

async fn providers() -> (MockServer, MockServer, AppConfig) {
    let mymemory = MockServer::start().await;
    let lingva = MockServer::start().await;

    let config = AppConfig {
        providers: ProviderConfig {
            timeout_secs: Some(5),
            ..ProviderConfig::new(
                format!("{}/get", mymemory.uri()),
                format!("{}/api/v1/translate", lingva.uri()),
            )
        },
        ..Default::default()
    };

    (mymemory, lingva, config)
}

fn mymemory_says(target: &str, text: &str) -> Mock {
    Mock::given(method("GET"))
        .and(path("/get"))
        .and(query_param("langpair", format!("en|{target}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "responseData": { "translatedText": text },
            "responseStatus": 200
        })))
}

fn lingva_says(target: &str, text: &str) -> Mock {
    Mock::given(method("GET"))
        .and(path("/api/v1/translate"))
        .and(query_param("target", target))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({ "translation": text })),
        )
}

// =============================================================================
// Fallback Pipeline Tests
// =============================================================================

#[tokio::test]
async fn test_primary_translation_over_http() {
    let (mymemory, lingva, config) = providers().await;
    mymemory_says("es", "Hola").expect(1).mount(&mymemory).await;
    lingva_says("es", "unused").expect(0).mount(&lingva).await;

    let client = FallbackTranslator::from_config(&config).unwrap();
    let outcome = client.translate("Hello", &Lang::new("en"), &Lang::new("es")).await;

    assert_eq!(outcome.to_lang.as_str(), "es");
    assert_eq!(outcome.text, "Hola");
    assert!(!outcome.is_error);
}

#[tokio::test]
async fn test_passthrough_falls_back_over_http() {
    let (mymemory, lingva, config) = providers().await;
    mymemory_says("fr", "Hello").expect(1).mount(&mymemory).await;
    lingva_says("fr", "Bonjour").expect(1).mount(&lingva).await;

    let client = FallbackTranslator::from_config(&config).unwrap();
    let outcome = client.translate("Hello", &Lang::new("en"), &Lang::new("fr")).await;

    assert_eq!(outcome.text, "Bonjour");
    assert!(!outcome.is_error);
    assert_eq!(outcome.served_by, Some("Lingva"));
}

#[tokio::test]
async fn test_malformed_primary_falls_back_over_http() {
    let (mymemory, lingva, config) = providers().await;
    Mock::given(method("GET"))
        .and(path("/get"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "responseData": null,
            "responseDetails": "INVALID LANGUAGE PAIR"
        })))
        .mount(&mymemory)
        .await;
    lingva_says("de", "Hallo").expect(1).mount(&lingva).await;

    let client = FallbackTranslator::from_config(&config).unwrap();
    let outcome = client.translate("Hello", &Lang::new("en"), &Lang::new("de")).await;
    assert_eq!(outcome.text, "Hallo");
}

#[tokio::test]
async fn test_both_providers_down_over_http() {
    let (mymemory, lingva, config) = providers().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&mymemory)
        .await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(429))
        .expect(1)
        .mount(&lingva)
        .await;

    let client = FallbackTranslator::from_config(&config).unwrap();
    let outcome = client.translate("Hello", &Lang::new("en"), &Lang::new("it")).await;

    assert!(outcome.is_error);
    assert_eq!(outcome.text, TRANSLATION_FAILED);
}

#[tokio::test]
async fn test_timeout_falls_back() {
    let (mymemory, lingva, mut config) = providers().await;
    config.providers.timeout_secs = Some(1);

    Mock::given(method("GET"))
        .and(path("/get"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(serde_json::json!({ "responseData": { "translatedText": "late" } }))
                .set_delay(Duration::from_secs(3)),
        )
        .mount(&mymemory)
        .await;
    lingva_says("pt", "Olá").mount(&lingva).await;

    let client = FallbackTranslator::from_config(&config).unwrap();
    let outcome = client.translate("Hello", &Lang::new("en"), &Lang::new("pt")).await;
    assert_eq!(outcome.text, "Olá");
}

#[tokio::test]
async fn test_zero_timeout_is_rejected_before_any_request() {
    let (mymemory, lingva, mut config) = providers().await;
    config.providers.timeout_secs = Some(0);
    mymemory_says("es", "Hola").expect(0).mount(&mymemory).await;
    lingva_says("es", "Hola").expect(0).mount(&lingva).await;

    assert!(config.validate().is_err());
    assert!(matches!(
        FallbackTranslator::from_config(&config),
        Err(Error::ConfigInvalid { .. })
    ));
    assert!(BatchTranslator::from_config(&config).is_err());
}

// =============================================================================
// Batch Tests
// =============================================================================

#[tokio::test]
async fn test_batch_over_http_isolates_failures() {
    let (mymemory, lingva, config) = providers().await;
    mymemory_says("es", "Hola").mount(&mymemory).await;
    mymemory_says("fr", "Hello").mount(&mymemory).await;
    mymemory_says("ru", "Hello").mount(&mymemory).await;
    lingva_says("fr", "Bonjour").mount(&lingva).await;
    Mock::given(method("GET"))
        .and(path("/api/v1/translate"))
        .and(query_param("target", "ru"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&lingva)
        .await;

    let batch = BatchTranslator::from_config(&config).unwrap();
    let request = BatchRequest::new("Hello", "en", ["ru", "es", "fr"]).unwrap();
    let outcomes = batch.translate_to_many(&request).await;

    let summary: Vec<_> = outcomes
        .iter()
        .map(|o| (o.to_lang.as_str(), o.text.as_str(), o.is_error))
        .collect();
    assert_eq!(
        summary,
        [
            ("ru", TRANSLATION_FAILED, true),
            ("es", "Hola", false),
            ("fr", "Bonjour", false),
        ]
    );
}

#[tokio::test]
async fn test_batch_preserves_order_and_runs_sequentially() {
    let primary = DelayedTranslator::new(None);
    let client = FallbackTranslator::new(primary.clone(), Arc::new(AlwaysFails), Lang::new("en"));
    let batch = BatchTranslator::new(client);

    let request = BatchRequest::new("Hi", "en", ["fr", "de", "es"]).unwrap();
    let outcomes = batch.translate_to_many(&request).await;

    let texts: Vec<_> = outcomes.iter().map(|o| o.text.as_str()).collect();
    assert_eq!(texts, ["Hi@fr", "Hi@de", "Hi@es"]);

    let log = primary.log.lock().unwrap().clone();
    assert_eq!(
        log,
        ["start:fr", "end:fr", "start:de", "end:de", "start:es", "end:es"]
    );
}

#[tokio::test]
async fn test_batch_continues_after_failed_target() {
    let primary = DelayedTranslator::new(Some("de"));
    let client = FallbackTranslator::new(primary.clone(), Arc::new(AlwaysFails), Lang::new("en"));
    let batch = BatchTranslator::new(client);

    let request = BatchRequest::new("Hi", "en", ["fr", "de", "es"]).unwrap();
    let outcomes = batch.translate_to_many(&request).await;

    assert_eq!(outcomes.len(), 3);
    assert!(!outcomes[0].is_error);
    assert!(outcomes[1].is_error);
    assert!(!outcomes[2].is_error);
    assert_eq!(primary.calls.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn test_dropping_stream_stops_batch() {
    let primary = DelayedTranslator::new(None);
    let client = FallbackTranslator::new(primary.clone(), Arc::new(AlwaysFails), Lang::new("en"));
    let batch = BatchTranslator::new(client);

    let request = BatchRequest::new("Hi", "en", ["fr", "de", "es"]).unwrap();
    let first: Vec<TranslationOutcome> = batch.stream(&request).take(1).collect().await;

    assert_eq!(first.len(), 1);
    assert_eq!(primary.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_identical_batches_are_idempotent() {
    let primary = DelayedTranslator::new(Some("es"));
    let client = FallbackTranslator::new(primary, Arc::new(AlwaysFails), Lang::new("en"));
    let batch = BatchTranslator::new(client);

    let request = BatchRequest::new("Hi", "en", ["es", "it"]).unwrap();
    assert_eq!(
        batch.translate_to_many(&request).await,
        batch.translate_to_many(&request).await
    );
}

#[test]
fn test_unknown_target_rejected_before_batch() {
    let err = BatchRequest::new("Hello", "en", ["es", "fr", "xx-unknown"]).unwrap_err();
    assert!(err.is_caller_error());
    assert!(matches!(err, Error::UnknownLanguage(code) if code == "xx-unknown"));
}
