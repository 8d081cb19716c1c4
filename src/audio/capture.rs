//! Default-microphone capture via `cpal`.
//!
//! [`AudioCapture::open_default`] grabs the system default input device with
//! its preferred configuration; [`AudioCapture::start`] streams raw
//! [`AudioChunk`]s over an mpsc channel from the cpal callback thread.  The
//! returned [`StreamHandle`] is a RAII guard — dropping it stops recording.

use std::sync::mpsc;

use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use thiserror::Error;

// ---------------------------------------------------------------------------
// AudioChunk
// ---------------------------------------------------------------------------

/// One buffer of raw microphone audio as delivered by the cpal callback.
///
/// Samples are interleaved `f32` in `[-1.0, 1.0]` at the device's native
/// rate and channel count; condition them with
/// [`crate::audio::downmix_mono`] and [`crate::audio::resample`] before
/// handing them to the recognizer.
#[derive(Debug, Clone)]
pub struct AudioChunk {
    /// Interleaved PCM samples.
    pub samples: Vec<f32>,
    /// Native sample rate of this chunk in Hz.
    pub sample_rate: u32,
    /// Number of interleaved channels.
    pub channels: u16,
}

// ---------------------------------------------------------------------------
// CaptureError
// ---------------------------------------------------------------------------

/// Errors raised while opening or starting the microphone stream.
#[derive(Debug, Error)]
pub enum CaptureError {
    /// No input device exists on the default audio host — the "no
    /// microphone" case the sessions degrade gracefully on.
    #[error("no microphone found on the default audio host")]
    NoDevice,

    #[error("failed to query default input config: {0}")]
    DefaultConfig(#[from] cpal::DefaultStreamConfigError),

    #[error("failed to build input stream: {0}")]
    BuildStream(#[from] cpal::BuildStreamError),

    #[error("failed to start input stream: {0}")]
    PlayStream(#[from] cpal::PlayStreamError),
}

// ---------------------------------------------------------------------------
// StreamHandle
// ---------------------------------------------------------------------------

/// RAII guard keeping the cpal stream alive; drop to stop recording.
pub struct StreamHandle {
    _stream: cpal::Stream,
}

// ---------------------------------------------------------------------------
// AudioCapture
// ---------------------------------------------------------------------------

/// Wrapper around the default input device and its stream configuration.
pub struct AudioCapture {
    device: cpal::Device,
    config: cpal::StreamConfig,
    sample_rate: u32,
    channels: u16,
}

impl AudioCapture {
    /// Open the system default input device with its preferred
    /// configuration.
    ///
    /// # Errors
    ///
    /// [`CaptureError::NoDevice`] when the host has no input device, or
    /// [`CaptureError::DefaultConfig`] when it cannot report a default
    /// stream configuration.
    pub fn open_default() -> Result<Self, CaptureError> {
        let host = cpal::default_host();
        let device = host.default_input_device().ok_or(CaptureError::NoDevice)?;
        let supported = device.default_input_config()?;

        let channels = supported.channels();
        let sample_rate = supported.sample_rate().0;

        log::debug!(
            "microphone: {} ({sample_rate} Hz, {channels} ch)",
            device.name().unwrap_or_else(|_| "<unnamed>".into())
        );

        Ok(Self {
            config: supported.into(),
            device,
            sample_rate,
            channels,
        })
    }

    /// Begin streaming [`AudioChunk`]s to `tx`.
    ///
    /// The cpal callback runs on its own audio thread; send errors (receiver
    /// dropped) are ignored so that thread never panics.
    pub fn start(&self, tx: mpsc::Sender<AudioChunk>) -> Result<StreamHandle, CaptureError> {
        let sample_rate = self.sample_rate;
        let channels = self.channels;

        let stream = self.device.build_input_stream(
            &self.config,
            move |data: &[f32], _: &cpal::InputCallbackInfo| {
                let _ = tx.send(AudioChunk {
                    samples: data.to_vec(),
                    sample_rate,
                    channels,
                });
            },
            |err: cpal::StreamError| {
                log::error!("microphone stream error: {err}");
            },
            None,
        )?;

        stream.play()?;
        Ok(StreamHandle { _stream: stream })
    }

    /// Native sample rate of the device in Hz.
    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Number of interleaved channels in each chunk.
    pub fn channels(&self) -> u16 {
        self.channels
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn audio_chunk_is_send() {
        fn assert_send<T: Send>() {}
        assert_send::<AudioChunk>();
    }

    #[test]
    fn capture_error_messages_name_the_microphone() {
        assert!(CaptureError::NoDevice.to_string().contains("microphone"));
    }
}
