//! Text-to-speech playback.
//!
//! Speech output is a single shared device. `SpeechPlayer` owns the engine and
//! cancels whatever is playing before starting a new utterance, so at most one
//! utterance is ever active.

use std::io::Write;
use std::process::{Child, Command, Stdio};
use tracing::debug;

use crate::config::{AppConfig, Lang, SpeechConfig};
use crate::error::{Error, Result};
use crate::language::{self, LanguageEntry};
use crate::translator::TranslationOutcome;

/// A single piece of text to speak with its voice settings.
#[derive(Debug, Clone, PartialEq)]
pub struct Utterance {
    pub text: String,
    pub lang: Lang,
    pub rate: f32,
    pub pitch: f32,
    pub volume: f32,
}

impl Utterance {
    pub fn new(text: impl Into<String>, lang: Lang, settings: &SpeechConfig) -> Self {
        Self {
            text: text.into(),
            lang,
            rate: settings.rate,
            pitch: settings.pitch,
            volume: settings.volume,
        }
    }
}

/// Backend that actually produces sound.
pub trait SpeechEngine: Send {
    /// Begin speaking; returns once playback has started
    fn start(&mut self, utterance: &Utterance) -> Result<()>;

    /// Stop current playback and drop anything queued
    fn cancel_all(&mut self);

    fn is_speaking(&mut self) -> bool;

    /// Block until the current utterance finishes
    fn wait(&mut self) -> Result<()>;
}

/// Single-owner handle over a speech engine.
pub struct SpeechPlayer<E: SpeechEngine> {
    engine: E,
    settings: SpeechConfig,
    neutral: Lang,
}

impl<E: SpeechEngine> SpeechPlayer<E> {
    pub const fn new(engine: E, settings: SpeechConfig, neutral: Lang) -> Self {
        Self {
            engine,
            settings,
            neutral,
        }
    }

    pub fn from_config(engine: E, config: &AppConfig) -> Self {
        Self::new(engine, config.speech, config.neutral_lang.clone())
    }

    /// Cancel current playback, then speak `text` in `language`.
    pub fn cancel_and_speak(&mut self, text: &str, language: &LanguageEntry) -> Result<()> {
        if !language.has_tts {
            return Err(Error::SpeechUnsupported(language.code.to_string()));
        }
        if text.trim().is_empty() {
            return Err(Error::EmptySourceText);
        }

        self.engine.cancel_all();

        let utterance = Utterance::new(text, language.lang(), &self.settings);
        debug!(
            "Speaking {} chars in {} (rate {})",
            utterance.text.chars().count(),
            utterance.lang,
            utterance.rate
        );
        self.engine.start(&utterance)
    }

    /// Speak the user's input; without a language code the neutral language is used.
    pub fn speak_source(&mut self, text: &str, code: Option<&str>) -> Result<()> {
        let code = code.filter(|c| !c.is_empty()).unwrap_or(self.neutral.as_str());
        let language = language::lookup(code)?;
        self.cancel_and_speak(text.trim(), language)
    }

    /// Speak a translation result, error message included.
    pub fn speak_outcome(&mut self, outcome: &TranslationOutcome) -> Result<()> {
        let language = outcome.language()?;
        self.cancel_and_speak(&outcome.text, language)
    }

    pub fn cancel_all(&mut self) {
        self.engine.cancel_all();
    }

    pub fn is_speaking(&mut self) -> bool {
        self.engine.is_speaking()
    }

    pub fn wait(&mut self) -> Result<()> {
        self.engine.wait()
    }

    pub const fn engine(&self) -> &E {
        &self.engine
    }
}

/// Default espeak-ng words-per-minute at rate 1.0
const ESPEAK_BASE_WPM: f32 = 175.0;

/// Speech through an external `espeak-ng` process.
///
/// Cancellation kills the running process.
pub struct CommandSpeechEngine {
    program: String,
    child: Option<Child>,
}

impl CommandSpeechEngine {
    pub fn new() -> Self {
        Self::with_program("espeak-ng")
    }

    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            child: None,
        }
    }

    /// espeak-ng flags for an utterance; text is fed through stdin
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn args(utterance: &Utterance) -> Vec<String> {
        // Values are clamped before conversion
        let wpm = (ESPEAK_BASE_WPM * utterance.rate).round().clamp(80.0, 500.0) as u32;
        let pitch = (utterance.pitch * 50.0).round().clamp(0.0, 99.0) as u32;
        let amplitude = (utterance.volume * 100.0).round().clamp(0.0, 200.0) as u32;

        vec![
            "-v".to_string(),
            utterance.lang.to_string(),
            "-s".to_string(),
            wpm.to_string(),
            "-p".to_string(),
            pitch.to_string(),
            "-a".to_string(),
            amplitude.to_string(),
            "--stdin".to_string(),
        ]
    }
}

impl Default for CommandSpeechEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl SpeechEngine for CommandSpeechEngine {
    fn start(&mut self, utterance: &Utterance) -> Result<()> {
        let mut child = Command::new(&self.program)
            .args(Self::args(utterance))
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
            .map_err(|e| Error::SpeechEngine(format!("failed to start {}: {e}", self.program)))?;

        let stdin = child.stdin.take();
        self.child = Some(child);

        if let Some(mut stdin) = stdin {
            // Closing stdin lets espeak-ng start speaking
            if let Err(e) = stdin.write_all(utterance.text.as_bytes()) {
                self.cancel_all();
                return Err(Error::SpeechEngine(format!("failed to send text: {e}")));
            }
        }

        Ok(())
    }

    fn cancel_all(&mut self) {
        if let Some(mut child) = self.child.take() {
            let _ = child.kill();
            let _ = child.wait();
        }
    }

    fn is_speaking(&mut self) -> bool {
        self.child
            .as_mut()
            .is_some_and(|child| matches!(child.try_wait(), Ok(None)))
    }

    fn wait(&mut self) -> Result<()> {
        let Some(mut child) = self.child.take() else {
            return Ok(());
        };

        let status = child.wait()?;
        if status.success() {
            Ok(())
        } else {
            Err(Error::SpeechEngine(format!("{} exited with {status}", self.program)))
        }
    }
}

impl Drop for CommandSpeechEngine {
    fn drop(&mut self) {
        self.cancel_all();
    }
}
