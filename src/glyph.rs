//! Lightness to glyph mapping and the resulting character grid.

use serde::Serialize;

use crate::pool::LightnessGrid;

/// Pick the ramp glyph for a lightness value.
///
/// `lightness` is multiplied by `gain` and clamped to `[0, 1]`, then indexes
/// `floor(l * N)` into the ramp, capped at `N - 1` so full lightness lands on
/// the last glyph. Returns `None` only for an empty ramp.
pub fn map_lightness(lightness: f64, gain: f64, ramp: &[char]) -> Option<char> {
    let last = ramp.len().checked_sub(1)?;
    let l = (lightness * gain).clamp(0.0, 1.0);
    // NaN falls through clamp unchanged and casts to 0
    let index = ((l * ramp.len() as f64).floor() as usize).min(last);
    Some(ramp[index])
}

/// Character grid in raster order, `width * height` glyphs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GlyphGrid {
    width: usize,
    height: usize,
    glyphs: Vec<char>,
}

impl GlyphGrid {
    /// Map every pooled cell through `ramp`.
    ///
    /// Returns `None` if the ramp is empty.
    pub fn from_lightness(grid: &LightnessGrid, ramp: &[char], gain: f64) -> Option<Self> {
        let glyphs = grid
            .values()
            .iter()
            .map(|&l| map_lightness(l, gain, ramp))
            .collect::<Option<Vec<_>>>()?;
        Some(Self {
            width: grid.width(),
            height: grid.height(),
            glyphs,
        })
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn get(&self, x: usize, y: usize) -> Option<char> {
        if x >= self.width || y >= self.height {
            return None;
        }
        Some(self.glyphs[y * self.width + x])
    }

    pub fn rows(&self) -> impl Iterator<Item = &[char]> {
        self.glyphs.chunks_exact(self.width)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RAMP: &[char] = &[' ', '.', ':', '#'];

    #[test]
    fn test_zero_maps_to_first_glyph() {
        assert_eq!(map_lightness(0.0, 1.0, RAMP), Some(' '));
    }

    #[test]
    fn test_one_maps_to_last_glyph() {
        assert_eq!(map_lightness(1.0, 1.0, RAMP), Some('#'));
    }

    #[test]
    fn test_index_is_floor_of_l_times_n() {
        assert_eq!(map_lightness(0.24, 1.0, RAMP), Some(' '));
        assert_eq!(map_lightness(0.25, 1.0, RAMP), Some('.'));
        assert_eq!(map_lightness(0.5, 1.0, RAMP), Some(':'));
        assert_eq!(map_lightness(0.99, 1.0, RAMP), Some('#'));
    }

    #[test]
    fn test_every_lightness_in_range_maps() {
        for i in 0..=1000 {
            let l = i as f64 / 1000.0;
            assert!(map_lightness(l, 1.0, RAMP).is_some());
        }
    }

    #[test]
    fn test_gain_scales_then_clamps() {
        assert_eq!(map_lightness(0.25, 2.0, RAMP), Some(':'));
        assert_eq!(map_lightness(0.9, 5.0, RAMP), Some('#'));
        assert_eq!(map_lightness(0.9, 0.1, RAMP), Some(' '));
    }

    #[test]
    fn test_out_of_range_input_clamps() {
        assert_eq!(map_lightness(-3.0, 1.0, RAMP), Some(' '));
        assert_eq!(map_lightness(7.0, 1.0, RAMP), Some('#'));
        assert_eq!(map_lightness(f64::NAN, 1.0, RAMP), Some(' '));
    }

    #[test]
    fn test_single_glyph_ramp() {
        assert_eq!(map_lightness(0.0, 1.0, &['x']), Some('x'));
        assert_eq!(map_lightness(1.0, 1.0, &['x']), Some('x'));
    }

    #[test]
    fn test_empty_ramp_is_none() {
        assert_eq!(map_lightness(0.5, 1.0, &[]), None);
    }

    #[test]
    fn test_grid_from_pooled_lightness() {
        use crate::config::ConversionConfig;
        use crate::pool::pool;

        // 3x2 grays, one pixel per cell
        let pixels: Vec<u8> = [0u8, 128, 255, 255, 128, 0]
            .iter()
            .flat_map(|&v| [v, v, v, 255])
            .collect();
        let cfg = ConversionConfig::new("x", 3, 3, 2).with_glyph_aspect_ratio(1.0);
        let grid = GlyphGrid::from_lightness(&pool(&pixels, &cfg).unwrap(), RAMP, 1.0).unwrap();

        assert_eq!((grid.width(), grid.height()), (3, 2));
        assert_eq!(grid.get(0, 0), Some(' '));
        assert_eq!(grid.get(1, 0), Some(':'));
        assert_eq!(grid.get(2, 0), Some('#'));
        assert_eq!(grid.get(3, 0), None);
        assert_eq!(grid.get(0, 2), None);

        let rows: Vec<String> = grid.rows().map(|r| r.iter().collect()).collect();
        assert_eq!(rows, vec![" :#", "#: "]);
        assert!(GlyphGrid::from_lightness(&pool(&pixels, &cfg).unwrap(), &[], 1.0).is_none());
    }
}
