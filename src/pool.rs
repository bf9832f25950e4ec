//! Pooling of RGBA pixels into a grid of average lightness values.
//!
//! Every source pixel lands in exactly one cell:
//! `(x * out_w / src_w, y * out_h / src_h)` in integer arithmetic, clamped to
//! the grid. Each cell holds the mean lightness of its contributors.
//!
//! When the grid is finer than the source some cells receive no pixels. Those
//! take the lightness of the source pixel under the cell centre and keep a
//! contributor count of zero.

use crate::color::rgb_to_lightness;
use crate::config::ConversionConfig;
use crate::{AsciifyError, Result};

/// Averaged lightness per output cell, row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct LightnessGrid {
    width: usize,
    height: usize,
    values: Vec<f64>,
    counts: Vec<u32>,
}

impl LightnessGrid {
    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Number of source pixels averaged into each cell.
    pub fn counts(&self) -> &[u32] {
        &self.counts
    }

    pub fn value(&self, x: usize, y: usize) -> Option<f64> {
        (x < self.width && y < self.height).then(|| self.values[y * self.width + x])
    }

    pub fn contributors(&self, x: usize, y: usize) -> Option<u32> {
        (x < self.width && y < self.height).then(|| self.counts[y * self.width + x])
    }

    /// Cells filled from the nearest source pixel instead of an average.
    pub fn empty_cells(&self) -> usize {
        self.counts.iter().filter(|&&c| c == 0).count()
    }
}

/// Check config and buffer length before touching any pixel.
pub fn check_input(pixels: &[u8], config: &ConversionConfig) -> Result<()> {
    config.validate()?;
    let expected = config.expected_buffer_len();
    if pixels.len() != expected {
        return Err(AsciifyError::SizeMismatch {
            expected,
            actual: pixels.len(),
            width: config.source_width,
            height: config.source_height,
        });
    }
    Ok(())
}

/// Pool an RGBA buffer into `output_width x output_height` cells.
pub fn pool(pixels: &[u8], config: &ConversionConfig) -> Result<LightnessGrid> {
    check_input(pixels, config)?;

    let (src_w, src_h) = (config.source_width, config.source_height);
    let (out_w, out_h) = (config.output_width, config.output_height());

    let mut sums = vec![0.0f64; out_w * out_h];
    let mut counts = vec![0u32; out_w * out_h];

    for (i, px) in pixels.chunks_exact(4).enumerate() {
        let (x, y) = (i % src_w, i / src_w);
        let cell = cell_index(y, src_h, out_h) * out_w + cell_index(x, src_w, out_w);
        sums[cell] += rgb_to_lightness(px[0], px[1], px[2]);
        counts[cell] += 1;
    }

    let mut values = Vec::with_capacity(sums.len());
    for (cell, (&sum, &count)) in sums.iter().zip(&counts).enumerate() {
        let value = if count > 0 {
            sum / count as f64
        } else {
            let (cx, cy) = (cell % out_w, cell / out_w);
            let sx = centre_source_index(cx, out_w, src_w);
            let sy = centre_source_index(cy, out_h, src_h);
            let px = &pixels[(sy * src_w + sx) * 4..][..4];
            rgb_to_lightness(px[0], px[1], px[2])
        };
        values.push(value);
    }

    let grid = LightnessGrid {
        width: out_w,
        height: out_h,
        values,
        counts,
    };
    log::debug!(
        "pooled {src_w}x{src_h} px into {out_w}x{out_h} cells ({} empty)",
        grid.empty_cells()
    );
    Ok(grid)
}

/// Destination cell along one axis for a source coordinate.
fn cell_index(pos: usize, src: usize, out: usize) -> usize {
    let cell = pos as u64 * out as u64 / src as u64;
    (cell as usize).min(out - 1)
}

/// Source coordinate under the centre of cell `cell` along one axis.
fn centre_source_index(cell: usize, out: usize, src: usize) -> usize {
    let pos = (2 * cell as u64 + 1) * src as u64 / (2 * out as u64);
    (pos as usize).min(src - 1)
}
