//! Simulation settings
//!
//! Read from an optional JSON file. Missing fields fall back to defaults so a
//! partial file such as `{"debug": true}` is valid.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::{WORLD_HEIGHT, WORLD_WIDTH};
use crate::sim::ObstacleLayout;

#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings file: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid settings JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("world size must be positive, got {width}x{height}")]
    InvalidWorld { width: f32, height: f32 },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === World ===
    pub world_width: f32,
    pub world_height: f32,
    /// Fixed seed; a time-based one is used when absent
    pub seed: Option<u64>,
    pub obstacles: ObstacleLayout,

    // === Tuning ===
    /// Fixed seconds between enemy spawns, overriding the per-wave pacing
    pub spawn_interval: Option<f32>,

    // === Debug ===
    /// Start with the debug overlay on
    pub debug: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            world_width: WORLD_WIDTH,
            world_height: WORLD_HEIGHT,
            seed: None,
            obstacles: ObstacleLayout::default(),
            spawn_interval: None,
            debug: false,
        }
    }
}

impl Settings {
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Reject world sizes the simulation cannot lay out
    pub fn validate(&self) -> Result<(), SettingsError> {
        let valid = |v: f32| v.is_finite() && v > 0.0;
        if !valid(self.world_width) || !valid(self.world_height) {
            return Err(SettingsError::InvalidWorld {
                width: self.world_width,
                height: self.world_height,
            });
        }
        Ok(())
    }

    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let json = fs::read_to_string(path.as_ref())?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.as_ref().display());
        Ok(settings)
    }

    /// Load settings, falling back to defaults on any error
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        match Self::load(path.as_ref()) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("{e}; using default settings");
                Self::default()
            }
        }
    }

    /// Write settings as pretty JSON
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), SettingsError> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path.as_ref(), json)?;
        log::info!("Settings saved to {}", path.as_ref().display());
        Ok(())
    }
}
