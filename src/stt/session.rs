//! Speech input sessions — file and microphone transcription.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use crate::audio::{
    encode_wav, read_audio_file, record_phrase, resample, CaptureError, EndpointConfig,
    WavError, RECOGNIZER_SAMPLE_RATE,
};
use crate::stt::recognizer::SpeechRecognizer;

// ---------------------------------------------------------------------------
// Transcription
// ---------------------------------------------------------------------------

/// Outcome of one recognition attempt.
///
/// Only [`Recognized`](Self::Recognized) carries text; the other variants
/// all read back as `""` through [`text`](Self::text), preserving the
/// "empty string, never an error" contract while letting callers tell
/// "nothing was said" apart from "the backend broke" without grepping logs.
#[derive(Debug, Clone, PartialEq)]
pub enum Transcription {
    /// The backend produced a transcript.
    Recognized(String),
    /// The audio was received but nothing intelligible was heard — a
    /// normal outcome for silence or noise.
    NoSpeech,
    /// The backend or network failed; the error has been logged.
    BackendFailed(String),
    /// No usable microphone was found; the error has been logged.
    NoMicrophone(String),
}

impl Transcription {
    /// The recognized text, or `""` for every non-recognized outcome.
    pub fn text(&self) -> &str {
        match self {
            Transcription::Recognized(text) => text,
            _ => "",
        }
    }

    /// `true` when no usable text came back, whatever the reason.
    pub fn is_empty(&self) -> bool {
        self.text().is_empty()
    }
}

// ---------------------------------------------------------------------------
// SpeechInputSession
// ---------------------------------------------------------------------------

/// Owns a recognizer handle and a language tag for its lifetime.
pub struct SpeechInputSession {
    recognizer: Arc<dyn SpeechRecognizer>,
    language: String,
}

impl SpeechInputSession {
    pub fn new(recognizer: Arc<dyn SpeechRecognizer>, language: impl Into<String>) -> Self {
        Self {
            recognizer,
            language: language.into(),
        }
    }

    /// Transcribe a whole audio file.
    ///
    /// The file is decoded in full, conditioned to 16 kHz mono and sent to
    /// the backend in one request.  Recognition failures fold into the
    /// [`Transcription`]; only *decode* errors propagate (an unreadable
    /// file is the caller's problem, not a recognition outcome).
    pub async fn transcribe_file(
        &self,
        path: impl AsRef<Path>,
    ) -> Result<Transcription, WavError> {
        let clip = read_audio_file(path.as_ref())?;
        log::info!(
            "transcribing {} ({:.1} s @ {} Hz)",
            path.as_ref().display(),
            clip.duration_secs(),
            clip.sample_rate
        );

        let samples = resample(&clip.samples, clip.sample_rate, RECOGNIZER_SAMPLE_RATE);
        let wav = encode_wav(&samples)?;
        Ok(self.recognize(&wav).await)
    }

    /// Record one phrase from the default microphone and transcribe it.
    ///
    /// Recording runs on a blocking thread: 0.5 s of ambient calibration,
    /// then capture until the phrase ends in silence or `limit` elapses
    /// (unbounded when `None`).  A missing microphone degrades to
    /// [`Transcription::NoMicrophone`], never an error.
    pub async fn transcribe_microphone(
        &self,
        endpoint: EndpointConfig,
        limit: Option<Duration>,
    ) -> Transcription {
        self.transcribe_captured(move || record_phrase(endpoint, limit))
            .await
    }

    /// Recognition half of the microphone path, split from the device so
    /// capture failures can be exercised without hardware.
    async fn transcribe_captured<F>(&self, capture: F) -> Transcription
    where
        F: FnOnce() -> Result<Vec<f32>, CaptureError> + Send + 'static,
    {
        let recorded = tokio::task::spawn_blocking(capture).await;

        let samples = match recorded {
            Ok(Ok(samples)) => samples,
            Ok(Err(e)) => {
                log::error!("no microphone available: {e}");
                return Transcription::NoMicrophone(e.to_string());
            }
            Err(e) => {
                log::error!("capture task panicked: {e}");
                return Transcription::NoMicrophone(e.to_string());
            }
        };

        if samples.is_empty() {
            return Transcription::NoSpeech;
        }

        let wav = match encode_wav(&samples) {
            Ok(wav) => wav,
            Err(e) => {
                log::error!("failed to encode captured audio: {e}");
                return Transcription::BackendFailed(e.to_string());
            }
        };
        self.recognize(&wav).await
    }

    /// Shared recognition policy: unclear audio and backend failures both
    /// collapse to an empty transcript, with the failure logged.
    async fn recognize(&self, wav: &[u8]) -> Transcription {
        match self.recognizer.recognize(wav, &self.language).await {
            Ok(Some(text)) => Transcription::Recognized(text),
            Ok(None) => {
                log::info!("nothing intelligible in the audio");
                Transcription::NoSpeech
            }
            Err(e) => {
                log::error!("recognition backend error: {e}");
                Transcription::BackendFailed(e.to_string())
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
