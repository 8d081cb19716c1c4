//! Audio capture and conditioning for the speech recognizer.
//!
//! # Pipeline
//!
//! ```text
//! Microphone → cpal callback → AudioChunk (mpsc) → downmix_mono
//!           → resample → PhraseEndpointer → wav::encode_wav → recognizer
//!
//! Audio file → wav::read_audio_file → resample → recognizer
//! ```
//!
//! Everything downstream of this module works with **16 kHz mono `f32`**
//! samples in `[-1.0, 1.0]`.

pub mod capture;
pub mod endpoint;
pub mod resample;
pub mod wav;

pub use capture::{AudioCapture, AudioChunk, CaptureError, StreamHandle};
pub use endpoint::{record_phrase, EndpointConfig, PhraseEndpointer};
pub use resample::{downmix_mono, resample};
pub use wav::{encode_wav, read_audio_file, AudioClip, WavError};

/// Sample rate expected by the recognition backend.
pub const RECOGNIZER_SAMPLE_RATE: u32 = 16_000;
