//! Configuration module — settings structs, TOML persistence, app paths.

pub mod paths;
pub mod settings;

pub use paths::AppPaths;
pub use settings::{AppConfig, AudioConfig, SttConfig, TtsConfig};
