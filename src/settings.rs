//! Startup configuration
//!
//! Loaded once from JSON before the first tick. Any field left out keeps
//! its default.

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::palette::{DEFAULT_PALETTE, Palette};
use crate::sim::WaveTable;

/// Run configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// 16 colors as one run of 6-digit hex values
    pub palette: String,
    /// RNG seed for the run
    pub seed: u64,
    /// Screen size in pixels
    pub width: f32,
    pub height: f32,
    /// Attack waves
    pub waves: WaveTable,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            palette: DEFAULT_PALETTE.to_string(),
            seed: 0,
            width: crate::consts::SCREEN_WIDTH,
            height: crate::consts::SCREEN_HEIGHT,
            waves: WaveTable::standard(),
        }
    }
}

impl Settings {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn screen(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    /// Check the settings are usable and parse the palette
    pub fn validate(&self) -> Result<Palette, ConfigError> {
        let valid = |v: f32| v.is_finite() && v > 0.0;
        if !valid(self.width) || !valid(self.height) {
            return Err(ConfigError::InvalidScreen {
                width: self.width,
                height: self.height,
            });
        }
        if let Some((index, reason)) = self.waves.first_problem() {
            return Err(ConfigError::InvalidWave { index, reason });
        }
        Ok(Palette::from_hex(&self.palette)?)
    }
}
