//! Controller settings with persistence
//!
//! Settings are saved to `~/.config/strider/settings.toml`

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use strider_core::TimeConfig;
use strider_game::{CameraConfig, MovementConfig};
use tracing::{info, warn};

/// All tunable settings
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameSettings {
    pub movement: MovementConfig,
    pub camera: CameraConfig,
    pub time: TimeConfig,
}

impl GameSettings {
    /// Get the config directory path
    fn config_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("strider"))
    }

    /// Get the settings file path
    fn settings_path() -> Option<PathBuf> {
        Self::config_dir().map(|p| p.join("settings.toml"))
    }

    /// Load settings from disk; a missing file is created with defaults
    pub fn load() -> Self {
        let Some(path) = Self::settings_path() else {
            warn!("Could not determine config directory");
            return Self::default();
        };
        Self::load_from(&path)
    }

    /// Load settings from a specific file, falling back to defaults.
    ///
    /// When the file does not exist yet the defaults are written there so
    /// they can be edited.
    pub fn load_from(path: &Path) -> Self {
        if !path.exists() {
            info!("No settings file found, writing defaults");
            let settings = Self::default();
            if let Err(e) = settings.save_to(path) {
                warn!("Failed to write default settings: {}", e);
            }
            return settings;
        }

        match fs::read_to_string(path) {
            Ok(content) => match toml::from_str(&content) {
                Ok(settings) => {
                    info!("Loaded settings from {:?}", path);
                    settings
                }
                Err(e) => {
                    warn!("Failed to parse settings: {}, using defaults", e);
                    Self::default()
                }
            },
            Err(e) => {
                warn!("Failed to read settings file: {}, using defaults", e);
                Self::default()
            }
        }
    }

    /// Save settings to a specific file, creating its directory
    pub fn save_to(&self, path: &Path) -> anyhow::Result<()> {
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }

        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        info!("Saved settings to {:?}", path);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_file_keeps_defaults() {
        let settings: GameSettings = toml::from_str(
            r#"
            [movement]
            max_speed = 7.5

            [camera]
            pitch_limit_deg = 60.0
            "#,
        )
        .unwrap();

        assert_eq!(settings.movement.max_speed, 7.5);
        assert_eq!(settings.movement.jump_speed, 6.0);
        assert_eq!(settings.camera.pitch_limit_deg, 60.0);
        assert_eq!(settings.camera.max_distance, 12.0);
        assert_eq!(settings.time.time_scale, 1.0);
    }

    #[test]
    fn test_save_and_load() {
        let dir = std::env::temp_dir().join(format!("strider-settings-{}", std::process::id()));
        let path = dir.join("settings.toml");

        let mut settings = GameSettings::default();
        settings.camera.sensitivity = 0.004;
        settings.save_to(&path).unwrap();

        assert_eq!(GameSettings::load_from(&path), settings);
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_malformed_file_falls_back() {
        let dir = std::env::temp_dir().join(format!("strider-bad-{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        let path = dir.join("settings.toml");
        fs::write(&path, "movement = 3").unwrap();

        assert_eq!(GameSettings::load_from(&path), GameSettings::default());
        // The broken file is left alone for the user to fix
        assert_eq!(fs::read_to_string(&path).unwrap(), "movement = 3");
        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_missing_file_writes_defaults() {
        let dir = std::env::temp_dir().join(format!("strider-fresh-{}", std::process::id()));
        let path = dir.join("nested").join("settings.toml");
        let _ = fs::remove_dir_all(&dir);

        assert_eq!(GameSettings::load_from(&path), GameSettings::default());
        assert!(path.exists());

        let written: GameSettings = toml::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written, GameSettings::default());
        fs::remove_dir_all(&dir).unwrap();
    }
}
