//! Speech playback sessions.
//!
//! A [`SpeechOutputSession`] owns one synthesis backend plus a *single*
//! playback slot.  The state machine is deliberately small:
//!
//! ```text
//! Idle ── speak_sync ──▶ Speaking ──(all chunks rendered)──▶ Idle
//! Idle ── speak_async ─▶ SpeakingAsync ──▶ Idle
//!                              ▲  │
//!                              └──┘ stop() / next speak_async
//! ```
//!
//! Starting a new async playback first cancels any in-flight one — the slot
//! is swapped, never queued.  Cancellation is cooperative: the sink is
//! halted immediately and no further chunks are synthesized, but the stop
//! call itself never fails (stopping an idle session is a no-op).

use std::io::Cursor;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;

use rodio::{Decoder, OutputStream, Sink};

use crate::tts::synth::{select_voice, SynthBackend, SynthError};

// ---------------------------------------------------------------------------
// PlaybackSettings
// ---------------------------------------------------------------------------

/// Immutable per-session playback parameters.
#[derive(Debug, Clone)]
pub struct PlaybackSettings {
    /// Speaking rate, approximately words per minute.
    pub rate: u32,
    /// Output volume, 0.0–1.0 by convention (not enforced).
    pub volume: f32,
    /// Optional case-insensitive substring matched against voice names;
    /// first match wins, no match keeps the engine default.
    pub voice: Option<String>,
}

impl Default for PlaybackSettings {
    fn default() -> Self {
        Self {
            rate: 180,
            volume: 0.9,
            voice: None,
        }
    }
}

// ---------------------------------------------------------------------------
// PlaybackHandle
// ---------------------------------------------------------------------------

/// Shared slot holding the sink of the active playback, if any.
type SinkSlot = Arc<Mutex<Option<Arc<Sink>>>>;

/// Cancellation handle for an in-flight playback.
///
/// Cheap to clone; all clones control the same playback.
#[derive(Clone)]
pub struct PlaybackHandle {
    cancelled: Arc<AtomicBool>,
    sink: SinkSlot,
}

impl PlaybackHandle {
    fn new() -> Self {
        Self {
            cancelled: Arc::new(AtomicBool::new(false)),
            sink: Arc::new(Mutex::new(None)),
        }
    }

    /// Request an immediate halt.
    ///
    /// The current sink is stopped (which also wakes the thread blocked in
    /// `sleep_until_end`) and the cancel flag prevents any further chunk
    /// from being synthesized.  Safe to call at any time, any number of
    /// times.
    pub fn stop(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
        if let Ok(slot) = self.sink.lock() {
            if let Some(sink) = slot.as_ref() {
                sink.stop();
            }
        }
    }

    /// `true` once [`stop`](Self::stop) has been requested.
    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }
}

// ---------------------------------------------------------------------------
// SpeechOutputSession
// ---------------------------------------------------------------------------

/// Owns a synthesis backend and at most one active playback.
pub struct SpeechOutputSession {
    backend: Arc<dyn SynthBackend>,
    settings: PlaybackSettings,
    /// Voice id resolved from the selector at construction; `None` keeps
    /// the engine default.
    voice_id: Option<String>,
    /// Handle of the most recently started async playback.
    playback: Option<PlaybackHandle>,
}

impl SpeechOutputSession {
    /// Create a session and resolve the voice selector against the
    /// backend's voice list.
    ///
    /// Voice resolution is best-effort: a failed voice listing or an
    /// unmatched selector falls back to the engine default with a warning,
    /// never an error.
    pub fn new(backend: Arc<dyn SynthBackend>, settings: PlaybackSettings) -> Self {
        let voice_id = match settings.voice.as_deref() {
            Some(selector) => match backend.list_voices() {
                Ok(voices) => {
                    let found = select_voice(&voices, selector).map(|v| v.id.clone());
                    if found.is_none() {
                        log::warn!(
                            "no voice matching {selector:?}; using the engine default"
                        );
                    }
                    found
                }
                Err(e) => {
                    log::warn!("could not list voices ({e}); using the engine default");
                    None
                }
            },
            None => None,
        };

        Self {
            backend,
            settings,
            voice_id,
            playback: None,
        }
    }

    /// Speak `chunks` in order, blocking until every chunk has been
    /// rendered.  Empty chunks are skipped.
    pub fn speak_sync(
        &self,
        chunks: impl IntoIterator<Item = String>,
    ) -> Result<(), SynthError> {
        let handle = PlaybackHandle::new();
        render(
            self.backend.as_ref(),
            &self.settings,
            self.voice_id.as_deref(),
            chunks.into_iter().collect(),
            &handle,
        )
    }

    /// Start speaking `chunks` on a background thread and return
    /// immediately.
    ///
    /// Any playback already running on this session is cancelled first —
    /// last writer wins, nothing is queued.  The returned handle (also
    /// retained by the session) exposes [`PlaybackHandle::stop`].
    pub fn speak_async(&mut self, chunks: Vec<String>) -> PlaybackHandle {
        self.stop();

        let handle = PlaybackHandle::new();
        let thread_handle = handle.clone();
        let backend = Arc::clone(&self.backend);
        let settings = self.settings.clone();
        let voice_id = self.voice_id.clone();

        thread::spawn(move || {
            if let Err(e) = render(
                backend.as_ref(),
                &settings,
                voice_id.as_deref(),
                chunks,
                &thread_handle,
            ) {
                log::error!("background playback failed: {e}");
            }
        });

        self.playback = Some(handle.clone());
        handle
    }

    /// Cancel the in-flight async playback, if any.  Never fails.
    pub fn stop(&self) {
        if let Some(handle) = &self.playback {
            handle.stop();
        }
    }
}

impl Drop for SpeechOutputSession {
    fn drop(&mut self) {
        self.stop();
    }
}

// ---------------------------------------------------------------------------
// render — shared by the sync and async paths
// ---------------------------------------------------------------------------

/// Synthesize and enqueue every chunk, then block until the sink drains.
///
/// The output stream lives on the calling thread for the whole playback
/// (rodio streams are thread-bound).  The cancel flag is checked before
/// each synthesis call; `PlaybackHandle::stop` additionally clears the sink
/// so cancellation takes effect mid-chunk.
fn render(
    backend: &dyn SynthBackend,
    settings: &PlaybackSettings,
    voice_id: Option<&str>,
    chunks: Vec<String>,
    handle: &PlaybackHandle,
) -> Result<(), SynthError> {
    let (_stream, stream_handle) =
        OutputStream::try_default().map_err(|e| SynthError::Playback(e.to_string()))?;
    let sink = Arc::new(
        Sink::try_new(&stream_handle).map_err(|e| SynthError::Playback(e.to_string()))?,
    );

    if let Ok(mut slot) = handle.sink.lock() {
        *slot = Some(Arc::clone(&sink));
    }

    for chunk in chunks {
        if handle.is_cancelled() {
            break;
        }
        if chunk.is_empty() {
            continue;
        }
        let wav = backend.synthesize(&chunk, settings, voice_id)?;
        let source = Decoder::new(Cursor::new(wav))
            .map_err(|e| SynthError::Playback(e.to_string()))?;
        sink.append(source);
    }

    if !handle.is_cancelled() {
        sink.sleep_until_end();
    }

    if let Ok(mut slot) = handle.sink.lock() {
        slot.take();
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tts::synth::Voice;
    use std::sync::atomic::AtomicUsize;

    /// Backend stub that records what it was asked to synthesize.
    struct RecordingBackend {
        calls: AtomicUsize,
        voices: Vec<Voice>,
    }

    impl RecordingBackend {
        fn new(voices: Vec<Voice>) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                voices,
            }
        }
    }

    impl SynthBackend for RecordingBackend {
        fn synthesize(
            &self,
            _text: &str,
            _settings: &PlaybackSettings,
            _voice: Option<&str>,
        ) -> Result<Vec<u8>, SynthError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Err(SynthError::Engine("stub".into()))
        }

        fn list_voices(&self) -> Result<Vec<Voice>, SynthError> {
            Ok(self.voices.clone())
        }
    }

    fn voice(name: &str, id: &str) -> Voice {
        Voice {
            id: id.into(),
            name: name.into(),
            language: "en".into(),
        }
    }

    #[test]
    fn default_settings_match_documented_values() {
        let s = PlaybackSettings::default();
        assert_eq!(s.rate, 180);
        assert!((s.volume - 0.9).abs() < 1e-6);
        assert!(s.voice.is_none());
    }

    #[test]
    fn voice_selector_resolves_at_construction() {
        let backend = Arc::new(RecordingBackend::new(vec![
            voice("Persian", "ira/fa"),
            voice("English (Great Britain)", "gmw/en"),
        ]));
        let session = SpeechOutputSession::new(
            backend,
            PlaybackSettings {
                voice: Some("english".into()),
                ..Default::default()
            },
        );
        assert_eq!(session.voice_id.as_deref(), Some("gmw/en"));
    }

    #[test]
    fn unmatched_selector_keeps_engine_default() {
        let backend = Arc::new(RecordingBackend::new(vec![voice("Persian", "ira/fa")]));
        let session = SpeechOutputSession::new(
            backend,
            PlaybackSettings {
                voice: Some("Zira".into()),
                ..Default::default()
            },
        );
        assert!(session.voice_id.is_none());
    }

    #[test]
    fn no_selector_skips_voice_listing() {
        let backend = Arc::new(RecordingBackend::new(Vec::new()));
        let session = SpeechOutputSession::new(backend, PlaybackSettings::default());
        assert!(session.voice_id.is_none());
    }

    #[test]
    fn stop_on_idle_session_is_a_no_op() {
        let backend = Arc::new(RecordingBackend::new(Vec::new()));
        let session = SpeechOutputSession::new(backend, PlaybackSettings::default());
        session.stop(); // must not panic
    }

    #[test]
    fn handle_stop_sets_cancel_flag() {
        let handle = PlaybackHandle::new();
        assert!(!handle.is_cancelled());
        handle.stop();
        assert!(handle.is_cancelled());
        handle.stop(); // idempotent
        assert!(handle.is_cancelled());
    }

    #[test]
    fn clones_share_cancellation_state() {
        let handle = PlaybackHandle::new();
        let clone = handle.clone();
        clone.stop();
        assert!(handle.is_cancelled());
    }
}
