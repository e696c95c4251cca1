//! Game settings and tuning
//!
//! Stored as JSON next to the binary. Missing fields fall back to defaults so
//! older files keep loading.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use crate::consts::*;

/// Errors loading or saving settings
#[derive(Debug, Error)]
pub enum SettingsError {
    /// I/O error while reading/writing.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    /// Serialization/deserialization failure.
    #[error("serde error: {0}")]
    Serde(#[from] serde_json::Error),
    /// A value that would break the simulation
    #[error("invalid setting `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

/// Game settings/preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Geometry ===
    /// Enemy diameter (also the collision circle)
    pub enemy_draw_size: f32,
    /// Turret hull diameter
    pub player_draw_size: f32,

    // === Cannon ===
    pub max_cannon_range: f32,
    /// Range gained per tick of charging
    pub charge_per_tick: f32,

    // === Turret ===
    /// Turn acceleration (radians per second, applied per tick)
    pub turn_acceleration: f32,
    pub wheel_acceleration: f32,
    pub player_lives: u8,

    // === View ===
    /// Start in first-person mode
    pub first_person: bool,
    /// Shake the view when the turret is hit
    pub screen_shake: bool,

    // === Audio ===
    /// Swap left/right when placing enemy sound emitters
    pub stereo_reversed: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            enemy_draw_size: ENEMY_DRAW_SIZE,
            player_draw_size: PLAYER_DRAW_SIZE,

            max_cannon_range: MAX_CANNON_RANGE,
            charge_per_tick: CHARGE_PER_TICK,

            turn_acceleration: TURN_ACCELERATION,
            wheel_acceleration: WHEEL_ACCELERATION,
            player_lives: PLAYER_LIVES,

            first_person: false,
            screen_shake: true,

            stereo_reversed: false,
        }
    }
}

impl Settings {
    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), SettingsError> {
        let positive = |v: f32| v.is_finite() && v > 0.0;
        if !positive(self.enemy_draw_size) {
            return Err(SettingsError::Invalid {
                field: "enemy_draw_size",
                reason: "must be a positive number",
            });
        }
        if !positive(self.player_draw_size) {
            return Err(SettingsError::Invalid {
                field: "player_draw_size",
                reason: "must be a positive number",
            });
        }
        if !positive(self.max_cannon_range) {
            return Err(SettingsError::Invalid {
                field: "max_cannon_range",
                reason: "must be a positive number",
            });
        }
        if !positive(self.charge_per_tick) {
            return Err(SettingsError::Invalid {
                field: "charge_per_tick",
                reason: "must be a positive number",
            });
        }
        if self.player_lives == 0 {
            return Err(SettingsError::Invalid {
                field: "player_lives",
                reason: "must be at least 1",
            });
        }
        Ok(())
    }

    /// Effective screen shake offset scale for `shake_ticks` remaining
    pub fn shake_amount(&self, shake_ticks: u32) -> f32 {
        if self.screen_shake {
            shake_ticks as f32
        } else {
            0.0
        }
    }

    /// Parse settings from JSON
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Load settings, falling back to defaults on any error
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        match Self::load_from(path) {
            Ok(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            Err(err) => {
                log::info!("Using default settings ({}: {err})", path.display());
                Self::default()
            }
        }
    }

    /// Save settings as pretty JSON
    pub fn save_to(&self, path: impl AsRef<Path>) -> Result<(), SettingsError> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path.as_ref(), json)?;
        log::info!("Settings saved to {}", path.as_ref().display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(Settings::default().validate().is_ok());
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let settings = Settings::from_json(r#"{ "enemy_draw_size": 50.0 }"#).unwrap();
        assert_eq!(settings.enemy_draw_size, 50.0);
        assert_eq!(settings.max_cannon_range, MAX_CANNON_RANGE);
    }

    #[test]
    fn test_invalid_values_rejected() {
        let err = Settings::from_json(r#"{ "charge_per_tick": 0.0 }"#).unwrap_err();
        assert!(matches!(
            err,
            SettingsError::Invalid {
                field: "charge_per_tick",
                ..
            }
        ));
        assert!(matches!(
            Settings::from_json("not json"),
            Err(SettingsError::Serde(_))
        ));
    }

    #[test]
    fn test_save_and_load_file() {
        let path = std::env::temp_dir().join(format!("turret_arena_settings_{}.json", std::process::id()));
        let settings = Settings {
            stereo_reversed: true,
            player_lives: 3,
            ..Default::default()
        };
        settings.save_to(&path).unwrap();
        assert_eq!(Settings::load_from(&path).unwrap(), settings);
        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_missing_file_falls_back() {
        let settings = Settings::load_or_default("/nonexistent/turret_arena.json");
        assert_eq!(settings, Settings::default());
        assert!(matches!(
            Settings::load_from("/nonexistent/turret_arena.json"),
            Err(SettingsError::Io(_))
        ));
    }

    #[test]
    fn test_shake_respects_toggle() {
        let mut settings = Settings::default();
        assert_eq!(settings.shake_amount(10), 10.0);
        settings.screen_shake = false;
        assert_eq!(settings.shake_amount(10), 0.0);
    }
}
