//! Image to ASCII art converter.
//!
//! Pixels are reduced to HSL lightness, pooled into a character grid whose
//! height is corrected for the glyph aspect ratio, and each cell is mapped to
//! a glyph from a user-supplied ramp (lightest first).

pub mod aspect;
pub mod color;
pub mod config;
pub mod glyph;
pub mod pool;
pub mod render;
pub mod settings;

#[cfg(not(target_arch = "wasm32"))]
pub mod worker;

#[cfg(target_arch = "wasm32")]
pub mod wasm;

pub use aspect::{FixedRatio, GlyphMetrics, DEFAULT_GLYPH_ASPECT_RATIO};
#[cfg(not(target_arch = "wasm32"))]
pub use aspect::FontMetrics;
pub use config::{ConfigError, ConversionConfig, DEFAULT_RAMP, SIMPLE_RAMP};
pub use glyph::GlyphGrid;
pub use pool::LightnessGrid;
pub use render::{RenderedGrid, Token};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AsciifyError {
    #[error("Invalid config: {0}")]
    InvalidConfig(#[from] ConfigError),
    #[error("Pixel buffer has {actual} bytes, expected {expected} for a {width}x{height} RGBA image")]
    SizeMismatch {
        expected: usize,
        actual: usize,
        width: usize,
        height: usize,
    },
    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),
    #[error("Font error: {0}")]
    Font(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Settings error: {0}")]
    Settings(#[from] toml::de::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Worker error: {0}")]
    Worker(String),
}

pub type Result<T> = std::result::Result<T, AsciifyError>;

/// Convert an RGBA buffer into a rendered glyph grid.
///
/// Fails before reading any pixel if the config is invalid or the buffer is
/// not `4 * source_width * source_height` bytes long.
pub fn convert(pixels: &[u8], config: &ConversionConfig) -> Result<RenderedGrid> {
    let lightness = pool::pool(pixels, config)?;
    let ramp: Vec<char> = config.ramp.chars().collect();
    let glyphs = GlyphGrid::from_lightness(&lightness, &ramp, config.lightness_gain)
        .ok_or(ConfigError::EmptyRamp)?;
    Ok(render::render(&glyphs))
}

/// Reusable conversion settings, applied to images of any size.
#[derive(Debug, Clone, PartialEq)]
pub struct Converter {
    ramp: String,
    width: usize,
    glyph_aspect_ratio: f64,
    lightness_gain: f64,
}

impl Default for Converter {
    fn default() -> Self {
        Self::new(DEFAULT_RAMP)
    }
}

impl Converter {
    pub fn new(ramp: impl Into<String>) -> Self {
        Self {
            ramp: ramp.into(),
            width: config::DEFAULT_OUTPUT_WIDTH,
            glyph_aspect_ratio: DEFAULT_GLYPH_ASPECT_RATIO,
            lightness_gain: 1.0,
        }
    }

    pub fn with_width(mut self, width: usize) -> Self {
        self.width = width;
        self
    }

    pub fn with_glyph_aspect_ratio(mut self, ratio: f64) -> Self {
        self.glyph_aspect_ratio = ratio;
        self
    }

    /// Measure the glyph ratio from `metrics` at `font_size`.
    pub fn with_glyph_metrics(
        self,
        metrics: &impl GlyphMetrics,
        font_size: f32,
    ) -> Result<Self> {
        let ratio = metrics.glyph_aspect_ratio(font_size)?;
        Ok(self.with_glyph_aspect_ratio(ratio))
    }

    pub fn with_lightness_gain(mut self, gain: f64) -> Self {
        self.lightness_gain = gain;
        self
    }

    /// Full config for a source image of the given size.
    pub fn config_for(&self, source_width: usize, source_height: usize) -> ConversionConfig {
        ConversionConfig::new(self.ramp.clone(), self.width, source_width, source_height)
            .with_glyph_aspect_ratio(self.glyph_aspect_ratio)
            .with_lightness_gain(self.lightness_gain)
    }

    pub fn convert_rgba(&self, pixels: &[u8], width: usize, height: usize) -> Result<RenderedGrid> {
        convert(pixels, &self.config_for(width, height))
    }

    pub fn convert_image(&self, image: &image::DynamicImage) -> Result<RenderedGrid> {
        let rgba = image.to_rgba8();
        let (w, h) = (rgba.width() as usize, rgba.height() as usize);
        self.convert_rgba(rgba.as_raw(), w, h)
    }
}
