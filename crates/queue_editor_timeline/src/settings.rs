// SPDX-License-Identifier: MIT OR Apache-2.0
//! Playback settings.
//!
//! Stored as RON so they can be edited by hand:
//!
//! ```ron
//! (
//!     step_duration: 0.5,
//!     looping: true,
//!     resolution_order: StorageOrder,
//! )
//! ```

use crate::error::SettingsError;
use crate::resolve::{ResolutionOrder, Resolver};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Settings file name
pub const SETTINGS_FILE_NAME: &str = "playback.ron";

/// How documents are played back and resolved
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlaybackSettings {
    /// Seconds each step takes to animate
    pub step_duration: f32,
    /// Playback speed multiplier
    pub speed: f32,
    /// Whether playback wraps at either end
    pub looping: bool,
    /// Winner selection among qualifying effects
    pub resolution_order: ResolutionOrder,
}

impl Default for PlaybackSettings {
    fn default() -> Self {
        Self {
            step_duration: 1.0,
            speed: 1.0,
            looping: false,
            resolution_order: ResolutionOrder::StorageOrder,
        }
    }
}

impl PlaybackSettings {
    /// Parse settings from RON
    pub fn from_ron(source: &str) -> Result<Self, SettingsError> {
        Ok(ron::from_str(source)?)
    }

    /// Serialize settings to pretty RON
    pub fn to_ron(&self) -> Result<String, SettingsError> {
        Ok(ron::ser::to_string_pretty(
            self,
            ron::ser::PrettyConfig::default(),
        )?)
    }

    /// Load settings from a file
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let contents = std::fs::read_to_string(path)?;
        let settings = Self::from_ron(&contents)?;
        tracing::debug!("Loaded playback settings from {:?}", path);
        Ok(settings)
    }

    /// Save settings to a file
    pub fn save(&self, path: &Path) -> Result<(), SettingsError> {
        std::fs::write(path, self.to_ron()?)?;
        Ok(())
    }

    /// Resolver configured by these settings
    pub fn resolver(&self) -> Resolver {
        Resolver::new(self.resolution_order)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = PlaybackSettings::default();
        assert_eq!(settings.step_duration, 1.0);
        assert!(!settings.looping);
        assert_eq!(settings.resolver(), Resolver::default());
    }

    #[test]
    fn test_partial_file() {
        let settings = PlaybackSettings::from_ron("(looping: true, resolution_order: IndexOrder)")
            .unwrap();
        assert!(settings.looping);
        assert_eq!(settings.step_duration, 1.0);
        assert_eq!(settings.resolver().order, ResolutionOrder::IndexOrder);
    }

    #[test]
    fn test_serialization() {
        let settings = PlaybackSettings {
            step_duration: 0.5,
            ..PlaybackSettings::default()
        };
        let ron_str = settings.to_ron().unwrap();
        let loaded = PlaybackSettings::from_ron(&ron_str).unwrap();
        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_invalid_file() {
        assert!(matches!(
            PlaybackSettings::from_ron("(step_duration: \"slow\")"),
            Err(SettingsError::Parse(_))
        ));
    }

    #[test]
    fn test_file_round_trip() {
        let settings = PlaybackSettings {
            speed: 2.0,
            looping: true,
            ..PlaybackSettings::default()
        };
        let path = std::env::temp_dir().join(format!("queue-settings-{}.ron", uuid::Uuid::new_v4()));

        settings.save(&path).unwrap();
        let loaded = PlaybackSettings::load(&path);
        std::fs::remove_file(&path).unwrap();

        assert_eq!(loaded.unwrap(), settings);
    }

    #[test]
    fn test_load_missing_file() {
        let path = std::env::temp_dir().join(format!("queue-missing-{}.ron", uuid::Uuid::new_v4()));
        assert!(matches!(
            PlaybackSettings::load(&path),
            Err(SettingsError::Io(_))
        ));
    }
}
