//! Speech output — offline synthesis and playback.
//!
//! # Architecture
//!
//! ```text
//! ┌────────────────────────────────────────────────────────────┐
//! │              SynthBackend (trait)                          │
//! │                                                            │
//! │   EspeakBackend ── espeak-ng --stdout ──▶ WAV bytes        │
//! │                                              │             │
//! │                                              ▼             │
//! │   SpeechOutputSession ── rodio sink ──▶ speakers           │
//! │     · voice selector resolved once at construction         │
//! │     · speak_sync blocks; speak_async cancels-then-spawns   │
//! └────────────────────────────────────────────────────────────┘
//! ```
//!
//! The synthesis engine itself lives outside this crate (`espeak-ng`); this
//! module only maps settings to engine arguments and sequences playback.

pub mod session;
pub mod synth;

pub use session::{PlaybackHandle, PlaybackSettings, SpeechOutputSession};
pub use synth::{select_voice, EspeakBackend, SynthBackend, SynthError, Voice};
