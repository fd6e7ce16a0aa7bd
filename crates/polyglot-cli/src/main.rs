//! Polyglot CLI - translate text into several languages from the terminal.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use futures::StreamExt;
use indicatif::{ProgressBar, ProgressStyle};
use polyglot_core::{
    AppConfig, BatchRequest, BatchTranslator, CommandSpeechEngine, Lang, SpeechPlayer,
    TranslationOutcome, language,
};
use std::path::PathBuf;
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(name = "polyglot")]
#[command(author, version, about = "Translate text into several languages at once", long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,

    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Verbose output
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Translate text into one or more target languages
    Translate {
        /// Text to translate
        text: String,

        /// Source language code (default from config)
        #[arg(short, long)]
        from: Option<String>,

        /// Target language codes, comma separated (e.g. "es,fr,de")
        #[arg(short, long, value_delimiter = ',', required = true)]
        to: Vec<String>,

        /// MyMemory endpoint
        #[arg(long, env = "POLYGLOT_MYMEMORY_URL")]
        mymemory_url: Option<String>,

        /// Lingva endpoint
        #[arg(long, env = "POLYGLOT_LINGVA_URL")]
        lingva_url: Option<String>,

        /// Request timeout in seconds (no timeout by default)
        #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
        timeout: Option<u64>,

        /// Print outcomes as JSON
        #[arg(long)]
        json: bool,

        /// Speak each translation after the batch completes
        #[arg(long)]
        listen: bool,
    },

    /// List supported languages
    Languages,

    /// Speak text aloud (requires espeak-ng)
    Speak {
        /// Text to speak
        text: String,

        /// Language code (defaults to the neutral language)
        #[arg(short, long)]
        lang: Option<String>,
    },
}

fn load_config(path: Option<&PathBuf>) -> Result<AppConfig> {
    match path {
        Some(path) => AppConfig::from_file(path).context("Failed to load config file"),
        None => Ok(AppConfig::load()),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (before parsing args so env vars are available)
    dotenvy::dotenv().ok();

    let args = Args::parse();

    // Setup logging
    let log_level = match args.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let mut config = load_config(args.config.as_ref())?;

    match args.command {
        Command::Translate {
            text,
            from,
            to,
            mymemory_url,
            lingva_url,
            timeout,
            json,
            listen,
        } => {
            // Override config with CLI arguments
            if let Some(url) = mymemory_url {
                config.providers.mymemory_url = url;
            }
            if let Some(url) = lingva_url {
                config.providers.lingva_url = url;
            }
            if timeout.is_some() {
                config.providers.timeout_secs = timeout;
            }
            config.validate().context("Invalid configuration")?;
            let from = from.map_or_else(|| config.source_lang.clone(), Lang::new);

            translate(&config, &text, from, to, json, listen).await
        }
        Command::Languages => {
            print_languages();
            Ok(())
        }
        Command::Speak { text, lang } => {
            let mut player = SpeechPlayer::from_config(CommandSpeechEngine::new(), &config);
            player
                .speak_source(&text, lang.as_deref())
                .context("Failed to start speech")?;
            player.wait().context("Speech playback failed")
        }
    }
}

// CLI output is intentional
#[allow(clippy::print_stdout)]
async fn translate(
    config: &AppConfig,
    text: &str,
    from: Lang,
    to: Vec<String>,
    json: bool,
    listen: bool,
) -> Result<()> {
    let request = BatchRequest::new(text, from, to)?;
    let batch = BatchTranslator::from_config(config).context("Failed to initialize translator")?;

    info!(
        "Translating from {} into {}",
        request.from(),
        request
            .targets()
            .iter()
            .map(Lang::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    );

    // Setup progress bar
    #[allow(clippy::cast_possible_truncation)]
    let pb = ProgressBar::new(request.targets().len() as u64);
    // Template is hardcoded and valid, unwrap is safe
    #[allow(clippy::unwrap_used)]
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap()
            .progress_chars("#>-"),
    );

    let mut outcomes = Vec::with_capacity(request.targets().len());
    let mut stream = std::pin::pin!(batch.stream(&request));

    while let Some(outcome) = stream.next().await {
        if !json {
            pb.suspend(|| println!("{}", format_outcome(&outcome)));
        }
        pb.set_message(outcome.to_lang.to_string());
        pb.inc(1);
        outcomes.push(outcome);
    }

    pb.finish_and_clear();

    if json {
        println!("{}", serde_json::to_string_pretty(&outcomes)?);
    }

    if listen {
        speak_all(config, &outcomes);
    }

    Ok(())
}

/// "🇪🇸 Spanish: Hola", with provider shown at debug verbosity
fn format_outcome(outcome: &TranslationOutcome) -> String {
    let label = outcome
        .language()
        .map_or_else(|_| outcome.to_lang.to_string(), |lang| lang.label());

    match outcome.served_by {
        Some(provider) if tracing::enabled!(Level::DEBUG) => {
            format!("{label}: {} ({provider})", outcome.text)
        }
        _ => format!("{label}: {}", outcome.text),
    }
}

fn speak_all(config: &AppConfig, outcomes: &[TranslationOutcome]) {
    let mut player = SpeechPlayer::from_config(CommandSpeechEngine::new(), config);

    for outcome in outcomes.iter().filter(|o| o.can_listen()) {
        if let Err(e) = player.speak_outcome(outcome).and_then(|()| player.wait()) {
            warn!("Could not speak {}: {}", outcome.to_lang, e);
            break;
        }
    }
}

// CLI output is intentional
#[allow(clippy::print_stdout)]
fn print_languages() {
    for lang in language::all() {
        let tts = if lang.has_tts { "" } else { "  (no speech)" };
        println!("{:<4} {}{}", lang.code, lang.label(), tts);
    }
}
