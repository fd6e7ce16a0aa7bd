use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};
use crate::language;

/// Language codes following ISO 639-1
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Lang(pub String);

impl Lang {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// Serde default functions for common languages
fn default_source_lang() -> Lang {
    Lang::new(DEFAULT_SOURCE_LANG)
}

fn default_neutral_lang() -> Lang {
    Lang::new(DEFAULT_NEUTRAL_LANG)
}

impl std::fmt::Display for Lang {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for Lang {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for Lang {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Default source language code
pub const DEFAULT_SOURCE_LANG: &str = "en";
/// Target language exempt from the passthrough heuristic
pub const DEFAULT_NEUTRAL_LANG: &str = "en";
/// Primary provider endpoint
pub const DEFAULT_MYMEMORY_URL: &str = "https://api.mymemory.translated.net/get";
/// Secondary provider endpoint
pub const DEFAULT_LINGVA_URL: &str = "https://lingva.ml/api/v1/translate";

/// Translation provider endpoints and transport settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    #[serde(default = "default_mymemory_url")]
    pub mymemory_url: String,
    #[serde(default = "default_lingva_url")]
    pub lingva_url: String,
    /// Request timeout in seconds. `None` leaves the transport default in place.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl ProviderConfig {
    /// Create a provider config pointing at the given endpoints
    pub fn new(mymemory_url: impl Into<String>, lingva_url: impl Into<String>) -> Self {
        Self {
            mymemory_url: mymemory_url.into(),
            lingva_url: lingva_url.into(),
            ..Default::default()
        }
    }
}

fn default_mymemory_url() -> String {
    DEFAULT_MYMEMORY_URL.to_string()
}

fn default_lingva_url() -> String {
    DEFAULT_LINGVA_URL.to_string()
}

fn default_user_agent() -> String {
    concat!("polyglot/", env!("CARGO_PKG_VERSION")).to_string()
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            mymemory_url: default_mymemory_url(),
            lingva_url: default_lingva_url(),
            timeout_secs: None,
            user_agent: default_user_agent(),
        }
    }
}

/// Speech playback settings applied to every utterance
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpeechConfig {
    /// Speaking rate (1.0 = normal)
    #[serde(default = "default_rate")]
    pub rate: f32,
    #[serde(default = "default_pitch")]
    pub pitch: f32,
    #[serde(default = "default_volume")]
    pub volume: f32,
}

const fn default_rate() -> f32 {
    // Slightly slower for clarity
    0.9
}

const fn default_pitch() -> f32 {
    1.0
}

const fn default_volume() -> f32 {
    1.0
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            rate: default_rate(),
            pitch: default_pitch(),
            volume: default_volume(),
        }
    }
}

impl SpeechConfig {
    fn validate(&self) -> Result<()> {
        if !(self.rate > 0.0 && self.rate <= 10.0) {
            return Err(invalid("speech.rate", format!("{} is outside (0, 10]", self.rate)));
        }
        if !(0.0..=2.0).contains(&self.pitch) {
            return Err(invalid("speech.pitch", format!("{} is outside [0, 2]", self.pitch)));
        }
        if !(0.0..=1.0).contains(&self.volume) {
            return Err(invalid("speech.volume", format!("{} is outside [0, 1]", self.volume)));
        }
        Ok(())
    }
}

fn invalid(field: &str, reason: String) -> Error {
    Error::ConfigInvalid {
        field: field.to_string(),
        reason,
    }
}

/// Application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Default source language
    #[serde(default = "default_source_lang")]
    pub source_lang: Lang,

    /// Target language for which an echoed input is accepted as a translation
    #[serde(default = "default_neutral_lang")]
    pub neutral_lang: Lang,

    /// Provider endpoints
    #[serde(default)]
    pub providers: ProviderConfig,

    /// Speech playback settings
    #[serde(default)]
    pub speech: SpeechConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            source_lang: default_source_lang(),
            neutral_lang: default_neutral_lang(),
            providers: ProviderConfig::default(),
            speech: SpeechConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(|e| {
            Error::ConfigLoad(format!(
                "Failed to read config file {}: {}",
                path.as_ref().display(),
                e
            ))
        })?;

        let config: Self = toml::from_str(&content)
            .map_err(|e| Error::ConfigLoad(format!("Failed to parse config: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Layer ~/.config/polyglot/config.toml, ./polyglot.toml and `POLYGLOT_*`
    /// environment variables (nested keys separated by `__`).
    pub fn try_load() -> Result<Self> {
        let mut builder = config::Config::builder();

        if let Some(user_config) = crate::util::user_config_path() {
            builder = builder.add_source(config::File::from(user_config).required(false));
        }

        builder = builder
            .add_source(config::File::from(PathBuf::from("polyglot.toml")).required(false))
            .add_source(
                config::Environment::with_prefix("POLYGLOT")
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            );

        let config: Self = builder
            .build()
            .and_then(|settings| settings.try_deserialize::<Self>())
            .map_err(|e| Error::ConfigLoad(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load from default locations, falling back to defaults on error
    pub fn load() -> Self {
        match Self::try_load() {
            Ok(config) => {
                tracing::debug!("Loaded layered configuration");
                config
            }
            Err(e) => {
                tracing::warn!("Failed to load configuration, using defaults: {}", e);
                Self::default()
            }
        }
    }

    /// Check values that serde cannot express
    pub fn validate(&self) -> Result<()> {
        for (field, lang) in [("source_lang", &self.source_lang), ("neutral_lang", &self.neutral_lang)] {
            if language::lookup(lang.as_str()).is_err() {
                return Err(invalid(field, format!("unknown language code '{lang}'")));
            }
        }
        if self.providers.timeout_secs == Some(0) {
            return Err(invalid("providers.timeout_secs", "must be greater than zero".to_string()));
        }
        self.speech.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.source_lang.as_str(), "en");
        assert_eq!(config.neutral_lang.as_str(), "en");
        assert_eq!(config.providers.timeout_secs, None);
        assert_eq!(config.providers.mymemory_url, DEFAULT_MYMEMORY_URL);
        assert!((config.speech.rate - 0.9).abs() < f32::EPSILON);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_file_partial() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "source_lang = \"fr\"\n\n[providers]\ntimeout_secs = 15\n\n[speech]\nrate = 1.2"
        )
        .unwrap();

        let config = AppConfig::from_file(file.path()).unwrap();
        assert_eq!(config.source_lang.as_str(), "fr");
        assert_eq!(config.neutral_lang.as_str(), "en");
        assert_eq!(config.providers.timeout_secs, Some(15));
        assert_eq!(config.providers.lingva_url, DEFAULT_LINGVA_URL);
        assert!((config.speech.rate - 1.2).abs() < f32::EPSILON);
        assert!((config.speech.volume - 1.0).abs() < f32::EPSILON);
    }

    #[test]
    fn test_from_file_rejects_unknown_language() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "neutral_lang = \"xx\"").unwrap();

        let err = AppConfig::from_file(file.path()).unwrap_err();
        assert!(matches!(err, Error::ConfigInvalid { ref field, .. } if field == "neutral_lang"));
    }

    #[test]
    fn test_from_file_rejects_bad_volume() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[speech]\nvolume = 1.5").unwrap();

        let err = AppConfig::from_file(file.path()).unwrap_err();
        assert!(matches!(err, Error::ConfigInvalid { ref field, .. } if field == "speech.volume"));
    }

    #[test]
    fn test_from_file_missing() {
        let err = AppConfig::from_file("/nonexistent/polyglot.toml").unwrap_err();
        assert!(matches!(err, Error::ConfigLoad(_)));
    }

    #[test]
    fn test_zero_timeout_is_invalid() {
        let mut config = AppConfig::default();
        config.providers.timeout_secs = Some(0);
        assert!(config.validate().is_err());
    }
}
