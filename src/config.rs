//! Conversion configuration and ramp presets.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::aspect::DEFAULT_GLYPH_ASPECT_RATIO;

/// 92-glyph ramp, lightest glyph first.
pub const DEFAULT_RAMP: &str =
    " `.-':_,^=;><+!rc*/z?sLTv)J7(|Fi{C}fI31tlu[neoZ5Yxjya]2ESwqkP6h9d4VpOGbUAKXHm8RD#$Bg0MNWQ%&@";

/// Short 10-level density ramp.
pub const SIMPLE_RAMP: &str = " .:-=+*#%@";

pub const DEFAULT_OUTPUT_WIDTH: usize = 128;

/// Upper bound on `output_width * output_height`.
pub const MAX_GRID_CELLS: usize = 1 << 26;

/// Reasons a [`ConversionConfig`] is rejected before any pixel is read.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    #[error("ramp must contain at least one character")]
    EmptyRamp,
    #[error("output width must be positive")]
    ZeroOutputWidth,
    #[error("source dimensions must be positive, got {width}x{height}")]
    ZeroSourceDimensions { width: usize, height: usize },
    #[error("glyph aspect ratio must be a positive number, got {0}")]
    InvalidAspectRatio(f64),
    #[error("lightness gain must be a positive number, got {0}")]
    InvalidLightnessGain(f64),
    #[error("output grid of {width}x{rows} cells exceeds the {} cell limit", MAX_GRID_CELLS)]
    GridTooLarge { width: usize, rows: f64 },
}

/// Everything one conversion needs besides the pixels themselves.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConversionConfig {
    /// Glyphs ordered lightest to darkest.
    pub ramp: String,
    pub output_width: usize,
    pub source_width: usize,
    pub source_height: usize,
    /// Glyph height divided by glyph width.
    #[serde(default = "default_glyph_aspect_ratio")]
    pub glyph_aspect_ratio: f64,
    #[serde(default = "default_lightness_gain")]
    pub lightness_gain: f64,
}

fn default_glyph_aspect_ratio() -> f64 {
    DEFAULT_GLYPH_ASPECT_RATIO
}

fn default_lightness_gain() -> f64 {
    1.0
}

impl ConversionConfig {
    pub fn new(
        ramp: impl Into<String>,
        output_width: usize,
        source_width: usize,
        source_height: usize,
    ) -> Self {
        Self {
            ramp: ramp.into(),
            output_width,
            source_width,
            source_height,
            glyph_aspect_ratio: DEFAULT_GLYPH_ASPECT_RATIO,
            lightness_gain: 1.0,
        }
    }

    pub fn with_glyph_aspect_ratio(mut self, ratio: f64) -> Self {
        self.glyph_aspect_ratio = ratio;
        self
    }

    pub fn with_lightness_gain(mut self, gain: f64) -> Self {
        self.lightness_gain = gain;
        self
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.ramp.is_empty() {
            return Err(ConfigError::EmptyRamp);
        }
        if self.output_width == 0 {
            return Err(ConfigError::ZeroOutputWidth);
        }
        if self.source_width == 0 || self.source_height == 0 {
            return Err(ConfigError::ZeroSourceDimensions {
                width: self.source_width,
                height: self.source_height,
            });
        }
        if !(self.glyph_aspect_ratio.is_finite() && self.glyph_aspect_ratio > 0.0) {
            return Err(ConfigError::InvalidAspectRatio(self.glyph_aspect_ratio));
        }
        if !(self.lightness_gain.is_finite() && self.lightness_gain > 0.0) {
            return Err(ConfigError::InvalidLightnessGain(self.lightness_gain));
        }
        let rows = self.output_rows();
        let fits = rows <= MAX_GRID_CELLS as f64
            && self
                .output_width
                .checked_mul(self.output_height())
                .is_some_and(|cells| cells <= MAX_GRID_CELLS);
        if !fits {
            return Err(ConfigError::GridTooLarge {
                width: self.output_width,
                rows: rows.floor(),
            });
        }
        Ok(())
    }

    /// Number of grid rows.
    ///
    /// `floor(output_width * source_height / (source_width * glyph_aspect_ratio))`,
    /// at least 1. Tall glyphs (ratio > 1) therefore yield fewer rows.
    pub fn output_height(&self) -> usize {
        (self.output_rows().floor() as usize).max(1)
    }

    fn output_rows(&self) -> f64 {
        self.output_width as f64 * self.source_height as f64
            / (self.source_width as f64 * self.glyph_aspect_ratio)
    }

    /// Expected RGBA buffer length for the source dimensions.
    pub fn expected_buffer_len(&self) -> usize {
        self.source_width
            .saturating_mul(self.source_height)
            .saturating_mul(4)
    }
}
