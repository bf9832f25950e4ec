//! Glyph aspect ratio (height / width) used to correct vertical sampling.

use crate::{AsciifyError, Result};

/// Monospace cells are roughly twice as tall as they are wide.
pub const DEFAULT_GLYPH_ASPECT_RATIO: f64 = 2.0;

/// Glyph measured when estimating the ratio of a font.
pub const PROBE_GLYPH: char = '@';

/// Source of glyph height/width ratios for a given font size.
pub trait GlyphMetrics {
    /// Height/width ratio of one glyph rendered at `font_size` pixels.
    fn glyph_aspect_ratio(&self, font_size: f32) -> Result<f64>;
}

/// A ratio known up front, independent of font size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedRatio(pub f64);

impl Default for FixedRatio {
    fn default() -> Self {
        Self(DEFAULT_GLYPH_ASPECT_RATIO)
    }
}

impl GlyphMetrics for FixedRatio {
    fn glyph_aspect_ratio(&self, _font_size: f32) -> Result<f64> {
        Ok(self.0)
    }
}

/// Measures [`PROBE_GLYPH`] in a real font: line height over advance width.
#[cfg(not(target_arch = "wasm32"))]
pub struct FontMetrics {
    font: fontdue::Font,
}

#[cfg(not(target_arch = "wasm32"))]
impl FontMetrics {
    pub fn from_bytes(data: Vec<u8>) -> Result<Self> {
        let font = fontdue::Font::from_bytes(data, fontdue::FontSettings::default())
            .map_err(|e| AsciifyError::Font(e.to_string()))?;
        Ok(Self { font })
    }

    pub fn from_file(path: impl AsRef<std::path::Path>) -> Result<Self> {
        Self::from_bytes(std::fs::read(path)?)
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl GlyphMetrics for FontMetrics {
    fn glyph_aspect_ratio(&self, font_size: f32) -> Result<f64> {
        if !(font_size.is_finite() && font_size > 0.0) {
            return Err(AsciifyError::Font(format!("invalid font size {font_size}")));
        }
        let line = self
            .font
            .horizontal_line_metrics(font_size)
            .ok_or_else(|| AsciifyError::Font("font has no horizontal line metrics".into()))?;
        let width = self.font.metrics(PROBE_GLYPH, font_size).advance_width;
        if width <= 0.0 {
            return Err(AsciifyError::Font(format!(
                "glyph {PROBE_GLYPH:?} has zero advance width"
            )));
        }
        let ratio = line.new_line_size as f64 / width as f64;
        log::debug!("glyph aspect ratio at {font_size}px: {ratio:.3}");
        Ok(ratio)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_ratio_ignores_font_size() {
        let metrics = FixedRatio(1.75);
        assert_eq!(metrics.glyph_aspect_ratio(8.0).unwrap(), 1.75);
        assert_eq!(metrics.glyph_aspect_ratio(42.5).unwrap(), 1.75);
    }

    #[test]
    fn test_fixed_ratio_default() {
        assert_eq!(FixedRatio::default().0, DEFAULT_GLYPH_ASPECT_RATIO);
    }

    #[cfg(not(target_arch = "wasm32"))]
    const DEJAVU_SANS_MONO: &[u8] = include_bytes!("../assets/DejaVuSansMono.ttf");

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn test_font_metrics_measures_real_font() {
        let metrics = FontMetrics::from_bytes(DEJAVU_SANS_MONO.to_vec()).unwrap();
        let small = metrics.glyph_aspect_ratio(8.0).unwrap();
        let large = metrics.glyph_aspect_ratio(16.0).unwrap();

        // DejaVu Sans Mono: (1901 + 483) / 1233 font units
        assert!((1.85..2.0).contains(&small), "ratio at 8px: {small}");
        assert!(small.fract() != 0.0);
        assert!((small - large).abs() < 1e-3, "{small} vs {large}");
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn test_font_metrics_rejects_bad_font_size() {
        let metrics = FontMetrics::from_bytes(DEJAVU_SANS_MONO.to_vec()).unwrap();
        for size in [0.0, -8.0, f32::NAN] {
            assert!(matches!(metrics.glyph_aspect_ratio(size), Err(AsciifyError::Font(_))));
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn test_font_metrics_rejects_garbage() {
        let result = FontMetrics::from_bytes(vec![0u8; 16]);
        assert!(matches!(result, Err(AsciifyError::Font(_))));
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn test_font_metrics_missing_file_is_io_error() {
        let result = FontMetrics::from_file("/nonexistent/font.ttf");
        assert!(matches!(result, Err(AsciifyError::Io(_))));
    }
}
