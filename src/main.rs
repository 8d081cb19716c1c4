//! Command-line entry point.
//!
//! # Subcommands
//!
//! * `tts` — extract a page range from a PDF and read it aloud.
//! * `stt` — transcribe an audio file or the microphone, optionally
//!   exporting the transcript to PDF / TXT and speaking it back.
//! * `gui` — launch the graphical interface.
//!
//! Flag defaults come from [`AppConfig`]; a failed config load degrades to
//! built-in defaults with a warning.  Errors propagate through `anyhow` to
//! a nonzero exit with the full error chain.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};

use pdfvoice::config::AppConfig;
use pdfvoice::pdf::{self, PageRange};
use pdfvoice::stt::{SpeechInputSession, WebSpeechRecognizer};
use pdfvoice::text;
use pdfvoice::tts::{EspeakBackend, PlaybackSettings, SpeechOutputSession};

// ---------------------------------------------------------------------------
// CLI definition
// ---------------------------------------------------------------------------

#[derive(Parser, Debug)]
#[command(name = "pdfvoice", about = "PDF ↔ Audio Converter", version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Read a PDF aloud
    Tts(TtsArgs),
    /// Transcribe audio and export to PDF/TXT
    Stt(SttArgs),
    /// Launch the graphical interface
    Gui,
}

#[derive(Args, Debug)]
struct TtsArgs {
    /// Input PDF path
    #[arg(long)]
    pdf: PathBuf,
    /// Start page (1-based)
    #[arg(long)]
    start: Option<usize>,
    /// End page (1-based, inclusive)
    #[arg(long)]
    end: Option<usize>,
    /// Speaking rate (words/minute)
    #[arg(long)]
    rate: Option<u32>,
    /// Volume (0.0–1.0)
    #[arg(long)]
    volume: Option<f32>,
    /// Voice name contains (e.g. 'English')
    #[arg(long)]
    voice: Option<String>,
}

#[derive(Args, Debug)]
struct SttArgs {
    #[command(flatten)]
    source: SttSource,
    /// Language code (e.g. en-US, fa-IR)
    #[arg(long)]
    lang: Option<String>,
    /// Max seconds to listen (mic mode)
    #[arg(long)]
    limit: Option<u64>,
    /// Output PDF path
    #[arg(long)]
    out: Option<PathBuf>,
    /// Optional TXT save path
    #[arg(long)]
    txt: Option<PathBuf>,
    /// Speak back the transcription
    #[arg(long)]
    speak_back: bool,
    /// Speaking rate for --speak-back
    #[arg(long)]
    rate: Option<u32>,
    /// Volume for --speak-back
    #[arg(long)]
    volume: Option<f32>,
}

#[derive(Args, Debug)]
#[group(required = true, multiple = false)]
struct SttSource {
    /// Audio file path (wav)
    #[arg(long)]
    audio: Option<PathBuf>,
    /// Record from the default microphone
    #[arg(long)]
    mic: bool,
}

// ---------------------------------------------------------------------------
// main
// ---------------------------------------------------------------------------

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let config = AppConfig::load().unwrap_or_else(|e| {
        log::warn!("failed to load config ({e}); using defaults");
        AppConfig::default()
    });

    match cli.command {
        Command::Tts(args) => cmd_tts(&config, args),
        Command::Stt(args) => cmd_stt(&config, args),
        Command::Gui => pdfvoice::app::run(config).map_err(|e| anyhow::anyhow!("{e}")),
    }
}

// ---------------------------------------------------------------------------
// tts subcommand
// ---------------------------------------------------------------------------

fn cmd_tts(config: &AppConfig, args: TtsArgs) -> anyhow::Result<()> {
    let range = PageRange::new(args.start, args.end);
    let text = pdf::extract_text(&args.pdf, range)
        .with_context(|| format!("extracting {}", args.pdf.display()))?;

    if text.is_empty() {
        log::warn!("no text extracted — are you using a scanned PDF?");
    }

    let settings = PlaybackSettings {
        rate: args.rate.unwrap_or(config.tts.rate),
        volume: args.volume.unwrap_or(config.tts.volume),
        voice: args.voice.or_else(|| config.tts.voice.clone()),
    };

    let session = SpeechOutputSession::new(Arc::new(EspeakBackend::new()), settings);
    session.speak_sync(text::chunks(&text, config.tts.chunk_chars))?;
    Ok(())
}

// ---------------------------------------------------------------------------
// stt subcommand
// ---------------------------------------------------------------------------

fn cmd_stt(config: &AppConfig, args: SttArgs) -> anyhow::Result<()> {
    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("creating tokio runtime")?;

    let language = args.lang.unwrap_or_else(|| config.stt.language.clone());
    let recognizer = Arc::new(WebSpeechRecognizer::from_config(&config.stt));
    let session = SpeechInputSession::new(recognizer, language);

    let transcription = match args.source.audio {
        Some(audio) => rt
            .block_on(session.transcribe_file(&audio))
            .with_context(|| format!("reading {}", audio.display()))?,
        None => rt.block_on(session.transcribe_microphone(
            config.audio.endpoint_config(),
            args.limit.map(Duration::from_secs),
        )),
    };

    let text = transcription.text().to_string();
    if text.is_empty() {
        log::warn!("nothing transcribed");
    }

    if let Some(out) = &args.out {
        let saved = pdf::write_text(&text, out, "Transcription")?;
        log::info!("saved PDF → {}", saved.display());
    }
    if let Some(txt) = &args.txt {
        std::fs::write(txt, &text)
            .with_context(|| format!("writing {}", txt.display()))?;
        log::info!("saved TXT → {}", txt.display());
    }

    if args.speak_back {
        let settings = PlaybackSettings {
            rate: args.rate.unwrap_or(config.tts.rate),
            volume: args.volume.unwrap_or(config.tts.volume),
            voice: config.tts.voice.clone(),
        };
        let session = SpeechOutputSession::new(Arc::new(EspeakBackend::new()), settings);
        session.speak_sync(text::chunks(&text, config.tts.chunk_chars))?;
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
