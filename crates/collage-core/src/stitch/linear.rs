//! Horizontal and vertical concatenation.
//!
//! Every image gets its own scale factor so that all images share one
//! height (horizontal) or one width (vertical). Each image keeps its own
//! aspect ratio.

use tracing::{debug, trace};

use super::{canvas_extent, resample_all, validate_inputs};
use crate::error::EngineResult;
use crate::raster::{Color, RasterImage};
use crate::resample::FilterType;

/// Direction images are laid out in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    /// Left to right, shared height.
    Horizontal,
    /// Top to bottom, shared width.
    Vertical,
}

/// Concatenate images along `axis` using Lanczos3 resampling.
///
/// See [`stitch_linear_with`].
pub fn stitch_linear(
    images: &[RasterImage],
    spacing: u32,
    background: Color,
    axis: Axis,
) -> EngineResult<RasterImage> {
    stitch_linear_with(images, spacing, background, axis, FilterType::Lanczos3)
}

/// Concatenate images along `axis`.
///
/// The shared extent is the largest height (horizontal) or width (vertical)
/// among the inputs. Each image is scaled to that extent, the other side
/// being rounded to the nearest pixel. Images are placed in input order with
/// `spacing` background pixels between them.
///
/// # Errors
///
/// - `EngineError::EmptyInput` if `images` is empty
/// - `EngineError::ZeroSizedImage` if an input has no pixels
pub fn stitch_linear_with(
    images: &[RasterImage],
    spacing: u32,
    background: Color,
    axis: Axis,
    filter: FilterType,
) -> EngineResult<RasterImage> {
    validate_inputs(images)?;

    let shared = match axis {
        Axis::Horizontal => images.iter().map(|img| img.height).max(),
        Axis::Vertical => images.iter().map(|img| img.width).max(),
    }
    .unwrap_or(0);

    let sizes: Vec<(u32, u32)> = images
        .iter()
        .map(|img| match axis {
            Axis::Horizontal => (scaled_extent(img.width, img.height, shared), shared),
            Axis::Vertical => (shared, scaled_extent(img.height, img.width, shared)),
        })
        .collect();

    let along: u64 = sizes
        .iter()
        .map(|&(w, h)| match axis {
            Axis::Horizontal => w as u64,
            Axis::Vertical => h as u64,
        })
        .sum::<u64>()
        + spacing as u64 * (images.len() as u64 - 1);
    let along = canvas_extent(along)?;

    let (out_w, out_h) = match axis {
        Axis::Horizontal => (along, shared),
        Axis::Vertical => (shared, along),
    };

    trace!(count = images.len(), out_w, out_h, spacing, ?axis, "stitch_linear");

    let resized = resample_all(images, &sizes, filter)?;

    let mut canvas = RasterImage::filled(out_w, out_h, background);
    let mut cursor = 0u32;
    for img in &resized {
        match axis {
            Axis::Horizontal => {
                canvas.paste(img, cursor, 0);
                cursor = cursor.saturating_add(img.width).saturating_add(spacing);
            }
            Axis::Vertical => {
                canvas.paste(img, 0, cursor);
                cursor = cursor.saturating_add(img.height).saturating_add(spacing);
            }
        }
    }

    debug!(count = images.len(), width = out_w, height = out_h, "Stitched linear layout");
    Ok(canvas)
}

/// `free * shared / fixed`, rounded half up, at least one pixel.
fn scaled_extent(free: u32, fixed: u32, shared: u32) -> u32 {
    let numerator = 2 * free as u64 * shared as u64 + fixed as u64;
    let value = numerator / (2 * fixed as u64);
    (value.min(u32::MAX as u64) as u32).max(1)
}


// ============================================================================
// Property-Based Tests
// ============================================================================
