//! Ambient-noise calibration and end-of-phrase detection.
//!
//! [`PhraseEndpointer`] is a pure state machine fed 16 kHz mono frames:
//!
//! 1. **Calibrate** — the first `calibration_secs` of audio measure the
//!    ambient RMS level; the speech threshold becomes
//!    `max(threshold_floor, ambient_rms * threshold_gain)`.
//! 2. **Record** — every subsequent frame is kept.  Once speech has been
//!    heard, `silence_hold_secs` of continuous sub-threshold audio ends the
//!    phrase.  An optional time limit caps the recording either way.
//!
//! [`record_phrase`] is the device-facing wrapper that drives the state
//! machine from a live microphone stream.

use std::sync::mpsc;
use std::time::Duration;

use crate::audio::{
    downmix_mono, resample, AudioCapture, CaptureError, RECOGNIZER_SAMPLE_RATE,
};

// ---------------------------------------------------------------------------
// EndpointConfig
// ---------------------------------------------------------------------------

/// Tuning knobs for calibration and silence detection.
#[derive(Debug, Clone)]
pub struct EndpointConfig {
    /// Seconds of leading audio used to measure ambient noise.
    pub calibration_secs: f32,
    /// Seconds of continuous silence (after speech) that end the phrase.
    pub silence_hold_secs: f32,
    /// Lower bound for the speech threshold, whatever the ambient level.
    pub threshold_floor: f32,
    /// Multiplier applied to the ambient RMS to form the speech threshold.
    pub threshold_gain: f32,
}

impl Default for EndpointConfig {
    fn default() -> Self {
        Self {
            calibration_secs: 0.5,
            silence_hold_secs: 0.8,
            threshold_floor: 0.01,
            threshold_gain: 1.5,
        }
    }
}

// ---------------------------------------------------------------------------
// PhraseEndpointer
// ---------------------------------------------------------------------------

/// Pure phrase-boundary detector over 16 kHz mono frames.
///
/// # Example
///
/// ```rust
/// use pdfvoice::audio::{EndpointConfig, PhraseEndpointer};
///
/// let mut ep = PhraseEndpointer::new(EndpointConfig::default(), None);
/// ep.push(&vec![0.0_f32; 8_000]);  // 0.5 s ambience → calibration
/// ep.push(&vec![0.5_f32; 8_000]);  // 0.5 s speech
/// ep.push(&vec![0.0_f32; 16_000]); // 1 s silence → phrase over
/// assert!(ep.is_done());
/// ```
pub struct PhraseEndpointer {
    config: EndpointConfig,
    /// Cap on recorded (post-calibration) samples; `None` = unbounded.
    limit_samples: Option<usize>,

    // calibration
    calibrating: bool,
    energy_sum: f64,
    energy_count: usize,
    threshold: f32,

    // recording
    samples: Vec<f32>,
    heard_speech: bool,
    silent_run: usize,
    done: bool,
}

impl PhraseEndpointer {
    pub fn new(config: EndpointConfig, limit_secs: Option<f32>) -> Self {
        Self {
            limit_samples: limit_secs
                .map(|s| (s * RECOGNIZER_SAMPLE_RATE as f32) as usize),
            threshold: config.threshold_floor,
            config,
            calibrating: true,
            energy_sum: 0.0,
            energy_count: 0,
            samples: Vec::new(),
            heard_speech: false,
            silent_run: 0,
            done: false,
        }
    }

    /// Feed the next frame of 16 kHz mono audio.
    pub fn push(&mut self, frame: &[f32]) {
        if self.done || frame.is_empty() {
            return;
        }

        if self.calibrating {
            self.energy_sum += frame.iter().map(|&s| (s as f64) * (s as f64)).sum::<f64>();
            self.energy_count += frame.len();

            let needed =
                (self.config.calibration_secs * RECOGNIZER_SAMPLE_RATE as f32) as usize;
            if self.energy_count >= needed.max(1) {
                let ambient = (self.energy_sum / self.energy_count as f64).sqrt() as f32;
                self.threshold = (ambient * self.config.threshold_gain)
                    .max(self.config.threshold_floor);
                self.calibrating = false;
                log::debug!(
                    "calibrated: ambient rms {ambient:.4}, speech threshold {:.4}",
                    self.threshold
                );
            }
            return;
        }

        self.samples.extend_from_slice(frame);

        let rms = frame_rms(frame);
        if rms > self.threshold {
            self.heard_speech = true;
            self.silent_run = 0;
        } else if self.heard_speech {
            self.silent_run += frame.len();
            let hold =
                (self.config.silence_hold_secs * RECOGNIZER_SAMPLE_RATE as f32) as usize;
            if self.silent_run >= hold {
                self.done = true;
            }
        }

        if let Some(limit) = self.limit_samples {
            if self.samples.len() >= limit {
                self.samples.truncate(limit);
                self.done = true;
            }
        }
    }

    /// `true` once the phrase has ended (silence hold or time limit).
    pub fn is_done(&self) -> bool {
        self.done
    }

    /// Speech threshold currently in effect (floor until calibrated).
    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    /// Consume the endpointer and return the recorded phrase.
    pub fn into_samples(self) -> Vec<f32> {
        self.samples
    }
}

fn frame_rms(frame: &[f32]) -> f32 {
    let mean_sq: f32 = frame.iter().map(|s| s * s).sum::<f32>() / frame.len() as f32;
    mean_sq.sqrt()
}

// ---------------------------------------------------------------------------
// record_phrase
// ---------------------------------------------------------------------------

/// Record one phrase from the default microphone.
///
/// Blocks until the endpointer declares the phrase over, then returns the
/// recorded 16 kHz mono samples.  With `limit = None` and no speech, this
/// blocks indefinitely — callers wanting a bound must pass one.
///
/// # Errors
///
/// [`CaptureError::NoDevice`] (and friends) when no usable microphone
/// exists; the input session maps this to an empty transcription.
pub fn record_phrase(
    config: EndpointConfig,
    limit: Option<Duration>,
) -> Result<Vec<f32>, CaptureError> {
    let capture = AudioCapture::open_default()?;
    let channels = capture.channels();

    let (tx, rx) = mpsc::channel();
    let handle = capture.start(tx)?;

    let mut endpointer =
        PhraseEndpointer::new(config, limit.map(|d| d.as_secs_f32()));

    while let Ok(chunk) = rx.recv() {
        let mono = downmix_mono(&chunk.samples, channels);
        let frame = resample(&mono, chunk.sample_rate, RECOGNIZER_SAMPLE_RATE);
        endpointer.push(&frame);
        if endpointer.is_done() {
            break;
        }
    }

    drop(handle);
    Ok(endpointer.into_samples())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
