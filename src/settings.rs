//! Game settings and gameplay tuning
//!
//! Stored as JSON next to the binary (or wherever the host points). A
//! missing or unreadable file is not an error; defaults are used instead.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::SceneResult;
use crate::gesture::SwipeRules;

/// Gameplay thresholds
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Gestures ===
    pub swipe: SwipeRules,

    // === Face ===
    /// Upper lip shrug above which the mouth counts as open
    pub mouth_open_threshold: f32,
    /// Cheek puff band for rinsing
    pub cheek_low: f32,
    pub cheek_high: f32,
    /// Threshold crossings needed to rinse
    pub rinse_crossings: u32,

    // === Puzzle counters ===
    /// Brush strokes before the teeth need rinsing
    pub teeth_strokes: u32,
    /// Stroke count at which the paste is used up
    pub paste_removed_at: u32,
    /// Wet towel swipes to clear the dirt
    pub dirt_strokes: u32,
    /// Dirt alpha removed per wipe
    pub dirt_alpha_step: f32,
    /// Ear stick swipes per ear
    pub ear_swipes: u32,

    // === Device motion ===
    /// Max razor rotation (radians) reachable by tilting
    pub razor_rotation_limit: f32,
    /// Acceleration magnitude (g) that shakes the razor loose
    pub jerk_threshold: f32,
    /// Gravity-x band for shaking the deodorant
    pub tilt_low: f32,
    pub tilt_high: f32,
    /// Threshold crossings needed to shake the deodorant
    pub shake_crossings: u32,
    /// Compass window (degrees) either side of the calibrated heading
    pub heading_window: f32,
    /// Gravity-z window either side of the calibrated tilt
    pub gravity_z_window: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            swipe: SwipeRules::default(),

            mouth_open_threshold: 0.11,
            cheek_low: 0.3,
            cheek_high: 0.55,
            rinse_crossings: 6,

            teeth_strokes: 6,
            paste_removed_at: 4,
            dirt_strokes: 4,
            dirt_alpha_step: 0.25,
            ear_swipes: 3,

            razor_rotation_limit: 1.0,
            jerk_threshold: 2.5,
            tilt_low: -0.35,
            tilt_high: 0.35,
            shake_crossings: 6,
            heading_window: 80.0,
            gravity_z_window: 0.6,
        }
    }
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Feedback ===
    /// Emit vibration requests
    pub haptics: bool,
    /// Emit sound requests
    pub sounds: bool,

    // === Accessibility ===
    /// Reduced motion (no spinning debris, no nose pulse)
    pub reduced_motion: bool,

    /// Seed for the scene's random drift
    pub seed: u64,

    pub tuning: Tuning,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            haptics: true,
            sounds: true,
            reduced_motion: false,
            seed: 0x5eed,
            tuning: Tuning::default(),
        }
    }
}

impl Settings {
    /// Load settings from a JSON file, falling back to defaults
    pub fn load(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let json = match std::fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) => {
                log::info!("Using default settings ({}: {})", path.display(), e);
                return Self::default();
            }
        };
        match serde_json::from_str(&json) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(e) => {
                log::warn!("Ignoring malformed settings {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    /// Save settings as pretty JSON
    pub fn save(&self, path: impl AsRef<Path>) -> SceneResult<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path.as_ref(), json)?;
        log::info!("Settings saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let settings: Settings =
            serde_json::from_str(r#"{ "haptics": false, "tuning": { "ear_swipes": 5 } }"#).unwrap();
        assert!(!settings.haptics);
        assert!(settings.sounds);
        assert_eq!(settings.tuning.ear_swipes, 5);
        assert_eq!(settings.tuning.teeth_strokes, 6);
        assert_eq!(settings.tuning.swipe.min_distance, 50.0);
    }

    #[test]
    fn test_load_falls_back_on_missing_and_malformed() {
        let dir = std::env::temp_dir();
        let missing = dir.join("mirror-chores-no-such-settings.json");
        assert_eq!(Settings::load(&missing), Settings::default());

        let malformed = dir.join(format!("mirror-chores-bad-{}.json", std::process::id()));
        std::fs::write(&malformed, "{ haptics: nope").unwrap();
        assert_eq!(Settings::load(&malformed), Settings::default());
        std::fs::remove_file(&malformed).unwrap();
    }

    #[test]
    fn test_save_then_load() {
        let path = std::env::temp_dir().join(format!("mirror-chores-{}.json", std::process::id()));
        let mut settings = Settings::default();
        settings.seed = 42;
        settings.tuning.jerk_threshold = 3.0;
        settings.save(&path).unwrap();
        assert_eq!(Settings::load(&path), settings);
        std::fs::remove_file(&path).unwrap();
    }
}
