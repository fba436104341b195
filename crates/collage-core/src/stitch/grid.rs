//! Grid layout.
//!
//! All cells share one size: the widest input width by the tallest input
//! height. Each image is scaled to fit its cell (upscaling allowed), centered
//! inside it, and placed row-major in input order.
//!
//! # Capacity
//!
//! When both `rows` and `cols` are given explicitly the grid may hold fewer
//! cells than there are images. The trailing images are left out and the
//! result reports how many were dropped.

use tracing::{debug, trace, warn};

use super::{canvas_extent, resample_all, validate_inputs, Placement, Stitched};
use crate::error::EngineResult;
use crate::geometry::{center_offset, fit_size};
use crate::raster::{Color, RasterImage};
use crate::resample::FilterType;

/// Resolved number of rows and columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridLayout {
    pub rows: u32,
    pub cols: u32,
}

impl GridLayout {
    /// Resolve rows and columns for `count` images. Zero means infer.
    ///
    /// - both zero: `cols = ceil(sqrt(count))`, `rows = ceil(count / cols)`
    /// - rows zero: `rows = ceil(count / cols)`
    /// - cols zero: `cols = ceil(count / rows)`
    /// - neither zero: used as given
    pub fn infer(count: usize, rows: u32, cols: u32) -> Self {
        let count = count as u64;
        let (rows, cols) = match (rows, cols) {
            (0, 0) => {
                let cols = ceil_sqrt(count);
                (count.div_ceil(cols.max(1)), cols)
            }
            (0, cols) => (count.div_ceil(cols as u64), cols as u64),
            (rows, 0) => (rows as u64, count.div_ceil(rows as u64)),
            (rows, cols) => (rows as u64, cols as u64),
        };
        Self {
            rows: rows.min(u32::MAX as u64) as u32,
            cols: cols.min(u32::MAX as u64) as u32,
        }
    }

    /// Number of cells in the grid.
    pub fn capacity(&self) -> usize {
        (self.rows as u64 * self.cols as u64).min(usize::MAX as u64) as usize
    }

    /// Row and column of the cell at `index` (row-major).
    pub fn cell_of(&self, index: usize) -> (u32, u32) {
        let cols = self.cols.max(1) as usize;
        ((index / cols) as u32, (index % cols) as u32)
    }
}

/// Smallest `c` with `c * c >= n`.
fn ceil_sqrt(n: u64) -> u64 {
    let mut c = (n as f64).sqrt() as u64;
    while c * c > n {
        c -= 1;
    }
    while c * c < n {
        c += 1;
    }
    c
}

/// Arrange images in a grid using Lanczos3 resampling.
///
/// See [`stitch_grid_with`].
pub fn stitch_grid(
    images: &[RasterImage],
    rows: u32,
    cols: u32,
    spacing: u32,
    background: Color,
) -> EngineResult<Stitched> {
    stitch_grid_with(images, rows, cols, spacing, background, FilterType::Lanczos3)
}

/// Arrange images in a grid.
///
/// # Returns
///
/// The composed image together with [`Placement::Truncated`] when the grid
/// had fewer cells than images.
///
/// # Errors
///
/// - `EngineError::EmptyInput` if `images` is empty
/// - `EngineError::ZeroSizedImage` if an input has no pixels
pub fn stitch_grid_with(
    images: &[RasterImage],
    rows: u32,
    cols: u32,
    spacing: u32,
    background: Color,
    filter: FilterType,
) -> EngineResult<Stitched> {
    validate_inputs(images)?;

    let layout = GridLayout::infer(images.len(), rows, cols);
    debug!(
        count = images.len(),
        rows = layout.rows,
        cols = layout.cols,
        "Resolved grid layout"
    );

    let cell_w = images.iter().map(|img| img.width).max().unwrap_or(0);
    let cell_h = images.iter().map(|img| img.height).max().unwrap_or(0);

    let out_w = grid_extent(layout.cols, cell_w, spacing)?;
    let out_h = grid_extent(layout.rows, cell_h, spacing)?;

    trace!(out_w, out_h, cell_w, cell_h, spacing, "stitch_grid");

    let placed = images.len().min(layout.capacity());
    let dropped = images.len() - placed;
    let placed_images = &images[..placed];

    let sizes: Vec<(u32, u32)> = placed_images
        .iter()
        .map(|img| fit_size(img.width, img.height, cell_w, cell_h, true))
        .collect();
    let resized = resample_all(placed_images, &sizes, filter)?;

    let mut canvas = RasterImage::filled(out_w, out_h, background);
    for (idx, img) in resized.iter().enumerate() {
        let (row, col) = layout.cell_of(idx);
        let origin_x = col as u64 * (cell_w as u64 + spacing as u64);
        let origin_y = row as u64 * (cell_h as u64 + spacing as u64);
        let (dx, dy) = center_offset(cell_w, cell_h, img.width, img.height);
        // fit_size keeps images inside their cell, so offsets are never negative
        let x = (origin_x as i64 + dx.max(0)) as u32;
        let y = (origin_y as i64 + dy.max(0)) as u32;
        canvas.paste(img, x, y);
    }

    let placement = if dropped > 0 {
        warn!(dropped, capacity = layout.capacity(), "Grid too small, images dropped");
        Placement::Truncated { dropped }
    } else {
        Placement::Placed
    };

    Ok(Stitched {
        image: canvas,
        placement,
    })
}

/// `count * cell + spacing * (count - 1)`, or one cell when `count` is zero.
fn grid_extent(count: u32, cell: u32, spacing: u32) -> EngineResult<u32> {
    if count == 0 {
        return Ok(cell);
    }
    let count = count as u64;
    canvas_extent(count * cell as u64 + spacing as u64 * (count - 1))
}


// ============================================================================
// Property-Based Tests
// ============================================================================
