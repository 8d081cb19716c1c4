//! WAV reading and encoding via `hound`.
//!
//! [`read_audio_file`] loads a whole audio file into a mono `f32` clip at
//! its native rate; [`encode_wav`] packs 16 kHz mono samples into the
//! 16-bit PCM WAV payload the recognition backend expects.

use std::io::Cursor;
use std::path::Path;

use thiserror::Error;

use crate::audio::{downmix_mono, RECOGNIZER_SAMPLE_RATE};

// ---------------------------------------------------------------------------
// WavError
// ---------------------------------------------------------------------------

/// Errors from decoding or encoding WAV data.
#[derive(Debug, Error)]
pub enum WavError {
    #[error("failed to read audio file: {0}")]
    Decode(#[from] hound::Error),
}

// ---------------------------------------------------------------------------
// AudioClip
// ---------------------------------------------------------------------------

/// A fully decoded, mono audio clip at its source sample rate.
#[derive(Debug, Clone)]
pub struct AudioClip {
    /// Mono samples in `[-1.0, 1.0]`.
    pub samples: Vec<f32>,
    /// Source sample rate in Hz.
    pub sample_rate: u32,
}

impl AudioClip {
    /// Clip duration in seconds.
    pub fn duration_secs(&self) -> f32 {
        if self.sample_rate == 0 {
            return 0.0;
        }
        self.samples.len() as f32 / self.sample_rate as f32
    }
}

// ---------------------------------------------------------------------------
// read_audio_file
// ---------------------------------------------------------------------------

/// Decode an entire WAV file into a mono [`AudioClip`].
///
/// Integer formats of any bit depth are normalized to `[-1.0, 1.0]`;
/// multi-channel audio is averaged down to mono.
pub fn read_audio_file(path: impl AsRef<Path>) -> Result<AudioClip, WavError> {
    let mut reader = hound::WavReader::open(path.as_ref())?;
    let spec = reader.spec();

    let samples: Vec<f32> = match spec.sample_format {
        hound::SampleFormat::Float => reader.samples::<f32>().collect::<Result<_, _>>()?,
        hound::SampleFormat::Int => {
            let scale = (1_i64 << (spec.bits_per_sample - 1)) as f32;
            reader
                .samples::<i32>()
                .map(|s| s.map(|v| v as f32 / scale))
                .collect::<Result<_, _>>()?
        }
    };

    Ok(AudioClip {
        samples: downmix_mono(&samples, spec.channels),
        sample_rate: spec.sample_rate,
    })
}

// ---------------------------------------------------------------------------
// encode_wav
// ---------------------------------------------------------------------------

/// Encode 16 kHz mono `f32` samples as an in-memory 16-bit PCM WAV file.
pub fn encode_wav(samples: &[f32]) -> Result<Vec<u8>, WavError> {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate: RECOGNIZER_SAMPLE_RATE,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };

    let mut cursor = Cursor::new(Vec::new());
    {
        let mut writer = hound::WavWriter::new(&mut cursor, spec)?;
        for &s in samples {
            writer.write_sample((s.clamp(-1.0, 1.0) * i16::MAX as f32) as i16)?;
        }
        writer.finalize()?;
    }
    Ok(cursor.into_inner())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
