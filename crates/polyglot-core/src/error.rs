use thiserror::Error;

/// Unified error type for polyglot-core
///
/// This enum encompasses all error cases that can occur in the library:
/// - Provider operations (HTTP requests, response parsing, soft failures)
/// - Caller contract violations (empty text, no targets, unknown languages)
/// - Speech playback
/// - Configuration operations (loading, validation)
/// - General I/O operations
///
/// Provider errors never cross the fallback client boundary; they are logged
/// and folded into a `TranslationOutcome` instead.
#[derive(Error, Debug)]
pub enum Error {
    // ==========================================================================
    // Provider Errors
    // ==========================================================================
    /// Translation API request failed at the transport level
    #[error("{provider} request failed: {reason}")]
    TranslationRequest {
        provider: &'static str,
        reason: String,
    },

    /// Translation API answered with a non-success status
    #[error("{provider} returned HTTP {status}")]
    TranslationStatus { provider: &'static str, status: u16 },

    /// Response body did not have the expected shape
    #[error("malformed {provider} response: {reason}")]
    MalformedResponse {
        provider: &'static str,
        reason: String,
    },

    /// Translation request timed out
    #[error("{0} request timed out")]
    TranslationTimeout(&'static str),

    /// Provider answered but carried no translated text
    #[error("{0} returned no translated text")]
    EmptyTranslation(&'static str),

    /// Provider echoed the input back for a non-neutral target
    #[error("{provider} echoed the input untranslated for target '{target}'")]
    PassthroughTranslation {
        provider: &'static str,
        target: String,
    },

    // ==========================================================================
    // Caller Errors
    // ==========================================================================
    /// Source text is empty after trimming
    #[error("Please enter some text first!")]
    EmptySourceText,

    /// No target languages were selected
    #[error("Select at least one target language!")]
    NoTargetLanguages,

    /// Language code is not present in the registry
    #[error("unknown language code: '{0}'")]
    UnknownLanguage(String),

    // ==========================================================================
    // Speech Errors
    // ==========================================================================
    /// Language has no text-to-speech support
    #[error("text-to-speech is not available for '{0}'")]
    SpeechUnsupported(String),

    /// Speech engine failed to start or stop
    #[error("speech engine error: {0}")]
    SpeechEngine(String),

    // ==========================================================================
    // Configuration Errors
    // ==========================================================================
    /// Failed to load configuration file
    #[error("failed to load config: {0}")]
    ConfigLoad(String),

    /// Invalid configuration value
    #[error("invalid config value for '{field}': {reason}")]
    ConfigInvalid { field: String, reason: String },

    // ==========================================================================
    // I/O Errors
    // ==========================================================================
    /// General I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Whether this error is a caller contract violation rather than a
    /// provider or environment failure.
    pub const fn is_caller_error(&self) -> bool {
        matches!(
            self,
            Self::EmptySourceText | Self::NoTargetLanguages | Self::UnknownLanguage(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, Error>;
