//! Simulation settings
//!
//! Tunables that a driver may want to change without recompiling. Every field
//! defaults to the matching constant in [`crate::consts`], so a JSON file only
//! needs the keys it overrides.

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::{SimError, SimResult};

/// Simulation settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// RNG seed for food placement and particle bursts
    pub seed: u64,

    // === Arena ===
    pub arena_width: f32,
    pub arena_height: f32,

    // === Food ===
    /// Number of food items kept on the field
    pub food_count: u32,
    /// Full extent of the square food box
    pub food_size: f32,

    // === Effects ===
    /// Particles per eaten food (0 disables bursts)
    pub particle_burst: usize,

    // === Debug ===
    /// Start with the OBB overlay enabled
    pub debug: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: 0x5EED,
            arena_width: ARENA_WIDTH,
            arena_height: ARENA_HEIGHT,
            food_count: FOOD_TARGET,
            food_size: FOOD_SIZE,
            particle_burst: PARTICLE_BURST,
            debug: false,
        }
    }
}

impl Settings {
    /// Default settings with a specific seed
    pub fn with_seed(seed: u64) -> Self {
        Self {
            seed,
            ..Self::default()
        }
    }

    /// Arena size as a vector
    pub fn arena_size(&self) -> Vec2 {
        Vec2::new(self.arena_width, self.arena_height)
    }

    /// Parse and validate settings from a JSON string
    pub fn from_json(json: &str) -> SimResult<Self> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> SimResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| SimError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Reject values the simulation cannot run with.
    ///
    /// The arena must fit the initial head segment around its center.
    pub fn validate(&self) -> SimResult<()> {
        let min_side = 2.0 * MAX_WIDTH;
        if !(self.arena_width >= min_side) {
            return Err(SimError::UnsafeValue {
                name: "arena_width",
                value: self.arena_width,
                safe_range: "[48.0, ∞)",
            });
        }
        if !(self.arena_height >= min_side) {
            return Err(SimError::UnsafeValue {
                name: "arena_height",
                value: self.arena_height,
                safe_range: "[48.0, ∞)",
            });
        }
        if !(self.food_size > 0.0 && self.food_size.is_finite()) {
            return Err(SimError::UnsafeValue {
                name: "food_size",
                value: self.food_size,
                safe_range: "(0.0, ∞)",
            });
        }
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
    fn test_partial_json_uses_defaults() {
        let settings = Settings::from_json(r#"{ "seed": 7, "food_count": 5 }"#).unwrap();
        assert_eq!(settings.seed, 7);
        assert_eq!(settings.food_count, 5);
        assert_eq!(settings.arena_width, ARENA_WIDTH);
        assert_eq!(settings.particle_burst, PARTICLE_BURST);
    }

    #[test]
    fn test_rejects_tiny_arena() {
        let err = Settings::from_json(r#"{ "arena_width": 10.0 }"#).unwrap_err();
        assert!(matches!(
            err,
            SimError::UnsafeValue {
                name: "arena_width",
                ..
            }
        ));
    }

    #[test]
    fn test_rejects_nan_food_size() {
        let settings = Settings {
            food_size: f32::NAN,
            ..Settings::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn test_rejects_malformed_json() {
        let err = Settings::from_json("{ seed: ").unwrap_err();
        assert!(matches!(err, SimError::Parse(_)));
    }

    #[test]
    fn test_load_missing_file() {
        let err = Settings::load("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, SimError::Io { .. }));
    }
}
