//! Speech input — recognition backend client and capture sessions.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │           SpeechRecognizer (async trait)                    │
//! │                                                             │
//! │   WebSpeechRecognizer ── reqwest POST (WAV) ──▶ backend     │
//! │                                                             │
//! │   SpeechInputSession                                        │
//! │     · transcribe_file  — hound decode → resample → send     │
//! │     · transcribe_microphone — calibrate → endpoint → send   │
//! │                                                             │
//! │   Result: Transcription (Recognized / NoSpeech /            │
//! │           BackendFailed / NoMicrophone)                     │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Recognition is never fatal: unclear audio, backend failures and a
//! missing microphone all collapse to an empty transcript for the caller,
//! while the [`Transcription`] variant keeps the reason available.

pub mod recognizer;
pub mod session;

pub use recognizer::{RecognizerError, SpeechRecognizer, WebSpeechRecognizer};
pub use session::{SpeechInputSession, Transcription};

#[cfg(test)]
pub use recognizer::MockRecognizer;
