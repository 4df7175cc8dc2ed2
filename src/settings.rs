//! Board settings
//!
//! Loaded from JSON; any field left out takes its default.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::{DEFAULT_COLS, DEFAULT_LIT_PROBABILITY, DEFAULT_ROWS};
use crate::error::{GridError, SettingsError};
use crate::sim::grid::{check_dimensions, check_probability};

/// Parameters for dealing a new board
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Board height in cells
    pub rows: usize,
    /// Board width in cells
    pub cols: usize,
    /// Chance each cell starts lit (0.0 - 1.0)
    pub lit_probability: f64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            rows: DEFAULT_ROWS,
            cols: DEFAULT_COLS,
            lit_probability: DEFAULT_LIT_PROBABILITY,
        }
    }
}

impl Settings {
    /// Check the values a board can actually be built from
    pub fn validate(&self) -> Result<(), GridError> {
        check_dimensions(self.rows, self.cols)?;
        check_probability(self.lit_probability)
    }

    /// Parse and validate settings from a JSON document
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file that must exist
    pub fn load_file(path: &Path) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Load settings from a JSON file. A missing file yields the defaults.
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        match Self::load_file(path) {
            Err(SettingsError::Io(e)) if e.kind() == std::io::ErrorKind::NotFound => {
                log::info!("No settings at {}, using defaults", path.display());
                Ok(Self::default())
            }
            result => result,
        }
    }
}
