//! Application settings structs, defaults and TOML persistence.
//!
//! All structs implement `Serialize`, `Deserialize`, `Default` and `Clone`
//! so they round-trip through `settings.toml` and can be cloned into worker
//! threads.  CLI flags override these values per invocation.

use anyhow::Result;
use serde::{Deserialize, Serialize};

use super::AppPaths;
use crate::audio::EndpointConfig;
use crate::tts::PlaybackSettings;

// ---------------------------------------------------------------------------
// TtsConfig
// ---------------------------------------------------------------------------

/// Defaults for speech output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TtsConfig {
    /// Speaking rate, approximately words per minute.
    pub rate: u32,
    /// Output volume, 0.0–1.0 by convention.
    pub volume: f32,
    /// Voice-name substring selector; `None` keeps the engine default.
    pub voice: Option<String>,
    /// Characters per chunk fed to the synthesizer.
    pub chunk_chars: usize,
}

impl Default for TtsConfig {
    fn default() -> Self {
        Self {
            rate: 180,
            volume: 0.9,
            voice: None,
            chunk_chars: 1_800,
        }
    }
}

impl TtsConfig {
    /// Per-session playback settings derived from these defaults.
    pub fn playback_settings(&self) -> PlaybackSettings {
        PlaybackSettings {
            rate: self.rate,
            volume: self.volume,
            voice: self.voice.clone(),
        }
    }
}

// ---------------------------------------------------------------------------
// SttConfig
// ---------------------------------------------------------------------------

/// Defaults and connection details for speech recognition.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SttConfig {
    /// Recognition language as a BCP-47-style tag (e.g. `en-US`, `fa-IR`).
    /// Passed through to the backend unvalidated.
    pub language: String,
    /// Base URL of the recognition endpoint.
    pub base_url: String,
    /// API key appended to the request — `None` for keyless endpoints.
    pub api_key: Option<String>,
    /// Per-request HTTP timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for SttConfig {
    fn default() -> Self {
        Self {
            language: "en-US".into(),
            base_url: "http://www.google.com".into(),
            api_key: None,
            timeout_secs: 10,
        }
    }
}

// ---------------------------------------------------------------------------
// AudioConfig
// ---------------------------------------------------------------------------

/// Microphone calibration and end-of-phrase detection settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AudioConfig {
    /// Seconds of leading audio used for ambient-noise calibration.
    pub calibration_secs: f32,
    /// Seconds of continuous silence that end a phrase.
    pub silence_hold_secs: f32,
    /// Lower bound for the speech RMS threshold.
    pub threshold_floor: f32,
    /// Multiplier applied to the ambient RMS to form the threshold.
    pub threshold_gain: f32,
}

impl Default for AudioConfig {
    fn default() -> Self {
        let endpoint = EndpointConfig::default();
        Self {
            calibration_secs: endpoint.calibration_secs,
            silence_hold_secs: endpoint.silence_hold_secs,
            threshold_floor: endpoint.threshold_floor,
            threshold_gain: endpoint.threshold_gain,
        }
    }
}

impl AudioConfig {
    /// Endpointer configuration derived from these settings.
    pub fn endpoint_config(&self) -> EndpointConfig {
        EndpointConfig {
            calibration_secs: self.calibration_secs,
            silence_hold_secs: self.silence_hold_secs,
            threshold_floor: self.threshold_floor,
            threshold_gain: self.threshold_gain,
        }
    }
}

// ---------------------------------------------------------------------------
// AppConfig  (top-level)
// ---------------------------------------------------------------------------

/// Top-level application configuration, serialized as `settings.toml`.
///
/// # Persistence
///
/// ```rust,no_run
/// use pdfvoice::config::AppConfig;
///
/// // Load (returns Default when the file is missing)
/// let config = AppConfig::load().unwrap();
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Speech output defaults.
    pub tts: TtsConfig,
    /// Speech recognition defaults and endpoint.
    pub stt: SttConfig,
    /// Microphone calibration / endpointing.
    pub audio: AudioConfig,
}

impl AppConfig {
    /// Load configuration from the platform-appropriate `settings.toml`.
    ///
    /// A missing file yields `Ok(AppConfig::default())` so first runs need
    /// no special-casing.
    pub fn load() -> Result<Self> {
        Self::load_from(&AppPaths::new().settings_file)
    }

    /// Load from an explicit path (useful for tests).
    pub fn load_from(path: &std::path::Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// Save to the platform-appropriate `settings.toml`, creating parent
    /// directories as needed.
    pub fn save(&self) -> Result<()> {
        self.save_to(&AppPaths::new().settings_file)
    }

    /// Save to an explicit path (useful for tests).
    pub fn save_to(&self, path: &std::path::Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn round_trip_toml() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("settings.toml");

        let original = AppConfig::default();
        original.save_to(&path).expect("save");
        let loaded = AppConfig::load_from(&path).expect("load");

        assert_eq!(original.tts.rate, loaded.tts.rate);
        assert_eq!(original.tts.volume, loaded.tts.volume);
        assert_eq!(original.tts.chunk_chars, loaded.tts.chunk_chars);
        assert_eq!(original.stt.language, loaded.stt.language);
        assert_eq!(original.stt.base_url, loaded.stt.base_url);
        assert_eq!(original.stt.timeout_secs, loaded.stt.timeout_secs);
        assert_eq!(original.audio.calibration_secs, loaded.audio.calibration_secs);
    }

    #[test]
    fn load_missing_returns_default() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("nonexistent.toml");

        let config = AppConfig::load_from(&path).expect("should not error");
        assert_eq!(config.tts.rate, 180);
        assert_eq!(config.stt.language, "en-US");
    }

    #[test]
    fn default_values_are_the_documented_ones() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.tts.rate, 180);
        assert!((cfg.tts.volume - 0.9).abs() < 1e-6);
        assert!(cfg.tts.voice.is_none());
        assert_eq!(cfg.tts.chunk_chars, 1_800);
        assert_eq!(cfg.stt.language, "en-US");
        assert!(cfg.stt.api_key.is_none());
        assert!((cfg.audio.calibration_secs - 0.5).abs() < 1e-6);
    }

    #[test]
    fn round_trip_modified_values() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("modified.toml");

        let mut cfg = AppConfig::default();
        cfg.tts.rate = 220;
        cfg.tts.voice = Some("Zira".into());
        cfg.stt.language = "fa-IR".into();
        cfg.stt.api_key = Some("test-key".into());
        cfg.audio.silence_hold_secs = 1.2;

        cfg.save_to(&path).expect("save");
        let loaded = AppConfig::load_from(&path).expect("load");

        assert_eq!(loaded.tts.rate, 220);
        assert_eq!(loaded.tts.voice, Some("Zira".into()));
        assert_eq!(loaded.stt.language, "fa-IR");
        assert_eq!(loaded.stt.api_key, Some("test-key".into()));
        assert!((loaded.audio.silence_hold_secs - 1.2).abs() < 1e-6);
    }

    #[test]
    fn playback_settings_mirror_tts_config() {
        let mut tts = TtsConfig::default();
        tts.voice = Some("english".into());
        let settings = tts.playback_settings();
        assert_eq!(settings.rate, tts.rate);
        assert_eq!(settings.voice, tts.voice);
    }
}
