//! Player preferences
//!
//! Audio levels only; the game has no other user-facing options.

use std::path::Path;

use serde::{Deserialize, Serialize};

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Master volume (0.0 - 1.0)
    pub master_volume: f32,
    /// Sound effects volume (0.0 - 1.0)
    pub sfx_volume: f32,
    /// Extra attenuation for the launch "boing", which is loud on its own
    pub launch_volume: f32,
    /// Silence all effects
    pub muted: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            master_volume: 0.8,
            sfx_volume: 1.0,
            launch_volume: 0.6,
            muted: false,
        }
    }
}

impl Settings {
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str::<Settings>(json).map(|mut s| {
            s.master_volume = s.master_volume.clamp(0.0, 1.0);
            s.sfx_volume = s.sfx_volume.clamp(0.0, 1.0);
            s.launch_volume = s.launch_volume.clamp(0.0, 1.0);
            s
        })
    }

    /// Load settings from a JSON file, falling back to defaults on any error
    pub fn load_or_default(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => match Self::from_json(&json) {
                Ok(settings) => {
                    log::info!("Loaded settings from {}", path.display());
                    settings
                }
                Err(e) => {
                    log::warn!("Invalid settings {}: {} - using defaults", path.display(), e);
                    Self::default()
                }
            },
            Err(_) => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }

    /// Effective volume for sound effects (0 when muted)
    pub fn effect_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effect_volume() {
        let mut s = Settings::default();
        assert!((s.effect_volume() - 0.8).abs() < 1e-6);
        s.muted = true;
        assert_eq!(s.effect_volume(), 0.0);
    }

    #[test]
    fn test_volume_clamped_on_load() {
        let s = Settings::from_json(r#"{ "master_volume": 4.0 }"#).expect("valid json");
        assert_eq!(s.master_volume, 1.0);
        assert_eq!(s.launch_volume, 0.6);
    }
}
