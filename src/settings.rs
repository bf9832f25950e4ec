//! User settings file (TOML) for the command-line tool.
//!
//! Every field is optional. Missing fields fall back to the full ramp,
//! 128 columns, an 8px font and a neutral lightness of 50.

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::config::{DEFAULT_OUTPUT_WIDTH, DEFAULT_RAMP};
use crate::Result;

pub const DEFAULT_FONT_SIZE: f32 = 8.0;

/// Lightness slider value that maps to a gain of 1.0.
pub const NEUTRAL_LIGHTNESS: u32 = 50;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// Glyphs, lightest first.
    pub chars: String,
    /// Output width in characters.
    pub width: usize,
    /// Font size in pixels used to measure the glyph ratio.
    pub font_size: f32,
    /// Monospace font file used to measure the glyph ratio.
    pub font: Option<PathBuf>,
    /// Explicit glyph height/width ratio, overrides `font`.
    pub ratio: Option<f64>,
    /// Lightness slider, 50 is neutral.
    pub lightness: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            chars: DEFAULT_RAMP.to_string(),
            width: DEFAULT_OUTPUT_WIDTH,
            font_size: DEFAULT_FONT_SIZE,
            font: None,
            ratio: None,
            lightness: NEUTRAL_LIGHTNESS,
        }
    }
}

impl Settings {
    /// Load settings from `path`, or defaults when no path is given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let content = std::fs::read_to_string(path)?;
        let settings = toml::from_str(&content)?;
        log::debug!("loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Gain applied to pooled lightness: `lightness / 50`, with 0 meaning unset.
    pub fn lightness_gain(&self) -> f64 {
        if self.lightness == 0 {
            return 1.0;
        }
        self.lightness as f64 / NEUTRAL_LIGHTNESS as f64
    }
}
