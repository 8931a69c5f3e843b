use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use face_recognition_core::pipeline::face_session::SessionConfig;
use face_recognition_core::shared::constants::{
    APP_DIR_NAME, DEFAULT_CAMERA_INDEX, DEFAULT_CONFIDENCE, DEFAULT_TICK_INTERVAL_MS,
};
use serde::Deserialize;

/// Startup settings, read once from the platform config directory.
///
/// The app never writes this file; every field is optional.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub model_path: Option<PathBuf>,
    pub camera_index: u32,
    pub confidence: f32,
    pub tick_interval_ms: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            model_path: None,
            camera_index: DEFAULT_CAMERA_INDEX,
            confidence: DEFAULT_CONFIDENCE,
            tick_interval_ms: DEFAULT_TICK_INTERVAL_MS,
        }
    }
}

impl Settings {
    fn config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join(APP_DIR_NAME).join("settings.json"))
    }

    pub fn load() -> Self {
        Self::config_path()
            .map(|path| Self::load_from(&path))
            .unwrap_or_default()
    }

    /// Missing file means defaults; a malformed one is logged and ignored.
    pub fn load_from(path: &Path) -> Self {
        let Ok(json) = fs::read_to_string(path) else {
            return Self::default();
        };
        match serde_json::from_str(&json) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("Ignoring malformed settings {}: {e}", path.display());
                Self::default()
            }
        }
    }

    pub fn session_config(&self) -> SessionConfig {
        SessionConfig {
            camera_index: self.camera_index,
            confidence: self.confidence.clamp(0.0, 1.0),
            tick_interval: Duration::from_millis(self.tick_interval_ms.max(1)),
        }
    }
}
