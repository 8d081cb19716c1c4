//! Speech synthesis backends.
//!
//! [`SynthBackend`] is the seam between the session and the actual engine.
//! The production implementation shells out to `espeak-ng --stdout`, which
//! is offline, cross-distro and returns a complete WAV on stdout.

use std::process::{Command, Stdio};

use thiserror::Error;

use crate::tts::session::PlaybackSettings;

// ---------------------------------------------------------------------------
// Voice
// ---------------------------------------------------------------------------

/// One synthesis voice advertised by the engine.
#[derive(Debug, Clone)]
pub struct Voice {
    /// Engine identifier, passed back verbatim to select the voice.
    pub id: String,
    /// Human-readable name users match against.
    pub name: String,
    /// Language tag the voice speaks.
    pub language: String,
}

/// Pick the first voice whose name contains `selector`, case-insensitively.
///
/// Returns `None` when nothing matches; the caller falls back to the engine
/// default voice.
pub fn select_voice<'a>(voices: &'a [Voice], selector: &str) -> Option<&'a Voice> {
    let needle = selector.to_lowercase();
    voices
        .iter()
        .find(|v| v.name.to_lowercase().contains(&needle))
}

// ---------------------------------------------------------------------------
// SynthError
// ---------------------------------------------------------------------------

/// Errors from the synthesis engine or the audio output path.
#[derive(Debug, Error)]
pub enum SynthError {
    /// The engine binary could not be launched at all.
    #[error("failed to launch espeak-ng (is it installed?): {0}")]
    Launch(#[from] std::io::Error),

    /// The engine ran but reported a failure.
    #[error("espeak-ng failed: {0}")]
    Engine(String),

    /// The synthesized audio could not be decoded or played.
    #[error("audio playback failed: {0}")]
    Playback(String),
}

// ---------------------------------------------------------------------------
// SynthBackend trait
// ---------------------------------------------------------------------------

/// Object-safe, thread-safe interface for speech synthesis engines.
///
/// `voice` is a resolved engine voice id (see [`select_voice`]), not the
/// user's selector string; `None` keeps the engine default.
pub trait SynthBackend: Send + Sync {
    /// Render `text` as WAV bytes with the given settings.
    fn synthesize(
        &self,
        text: &str,
        settings: &PlaybackSettings,
        voice: Option<&str>,
    ) -> Result<Vec<u8>, SynthError>;

    /// Enumerate the voices the engine offers.
    fn list_voices(&self) -> Result<Vec<Voice>, SynthError>;
}

// Compile-time assertion: the trait must stay object-safe.
const _: fn() = || {
    fn _assert_object_safe(_: Box<dyn SynthBackend>) {}
};

// ---------------------------------------------------------------------------
// EspeakBackend
// ---------------------------------------------------------------------------

/// `espeak-ng` subprocess backend.
///
/// Rate maps directly to words-per-minute (`-s`); volume 0.0–1.0 maps to
/// eSpeak's 0–200 amplitude scale (`-a`), where 0.5 is the engine default.
#[derive(Debug, Default)]
pub struct EspeakBackend;

impl EspeakBackend {
    pub fn new() -> Self {
        Self
    }
}

/// Argument list for one synthesis invocation.  Split out for testing.
fn espeak_args(settings: &PlaybackSettings, voice: Option<&str>) -> Vec<String> {
    let amplitude = (settings.volume * 200.0).round().max(0.0) as u32;
    let mut args = vec![
        "--stdout".to_string(),
        "-s".to_string(),
        settings.rate.to_string(),
        "-a".to_string(),
        amplitude.to_string(),
    ];
    if let Some(voice) = voice {
        args.push("-v".to_string());
        args.push(voice.to_string());
    }
    args
}

/// Parse the table printed by `espeak-ng --voices`.
///
/// Format (header line then one voice per line):
///
/// ```text
/// Pty Language       Age/Gender VoiceName        File       Other Languages
///  5  en-gb          --/M       English_(GB)     gmw/en
/// ```
fn parse_voice_table(table: &str) -> Vec<Voice> {
    table
        .lines()
        .skip(1)
        .filter_map(|line| {
            let fields: Vec<&str> = line.split_whitespace().collect();
            if fields.len() < 5 {
                return None;
            }
            Some(Voice {
                language: fields[1].to_string(),
                name: fields[3].to_string(),
                id: fields[4].to_string(),
            })
        })
        .collect()
}

impl SynthBackend for EspeakBackend {
    fn synthesize(
        &self,
        text: &str,
        settings: &PlaybackSettings,
        voice: Option<&str>,
    ) -> Result<Vec<u8>, SynthError> {
        let output = Command::new("espeak-ng")
            .args(espeak_args(settings, voice))
            .arg(text)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()?;

        if !output.status.success() {
            return Err(SynthError::Engine(
                String::from_utf8_lossy(&output.stderr).trim().to_string(),
            ));
        }
        Ok(output.stdout)
    }

    fn list_voices(&self) -> Result<Vec<Voice>, SynthError> {
        let output = Command::new("espeak-ng")
            .arg("--voices")
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()?;

        if !output.status.success() {
            return Err(SynthError::Engine(
                String::from_utf8_lossy(&output.stderr).trim().to_string(),
            ));
        }
        Ok(parse_voice_table(&String::from_utf8_lossy(&output.stdout)))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
