//! Rectangle, margin and scale-to-fit math shared by the crop, stitch and
//! viewport code.
//!
//! # Coordinate System
//!
//! - Origin is the top-left corner
//! - Rectangles are half-open: `[left, right) x [top, bottom)`
//! - Margins are pixel distances measured inward from each edge

use serde::{Deserialize, Serialize};

/// Pixel distances to remove from each edge of an image.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct Margins {
    pub left: u32,
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
}

impl Margins {
    /// No margins: cropping with these returns the whole image.
    pub const ZERO: Margins = Margins::new(0, 0, 0, 0);

    pub const fn new(left: u32, top: u32, right: u32, bottom: u32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Check if all margins are zero.
    pub fn is_zero(&self) -> bool {
        *self == Self::ZERO
    }

    /// Resolve these margins against an image of the given size.
    ///
    /// The right and bottom edges are clamped so they never cross to the left
    /// of (or above) the left and top edges. Margins that overlap therefore
    /// collapse to a zero-area region, which is reported as `None`.
    pub fn resolve(&self, width: u32, height: u32) -> Option<CropRegion> {
        let left = self.left;
        let top = self.top;
        let right = left.max(width.saturating_sub(self.right));
        let bottom = top.max(height.saturating_sub(self.bottom));

        if right <= left || bottom <= top {
            return None;
        }

        Some(CropRegion {
            left,
            top,
            right,
            bottom,
        })
    }
}

/// A non-empty rectangle in image pixel space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CropRegion {
    pub left: u32,
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
}

impl CropRegion {
    /// Build a region from two arbitrary corners.
    ///
    /// Corners may be given in any order. Returns `None` if the corners share
    /// a row or column.
    pub fn from_corners(x1: u32, y1: u32, x2: u32, y2: u32) -> Option<Self> {
        let (left, right) = (x1.min(x2), x1.max(x2));
        let (top, bottom) = (y1.min(y2), y1.max(y2));
        if right == left || bottom == top {
            return None;
        }
        Some(Self {
            left,
            top,
            right,
            bottom,
        })
    }

    pub fn width(&self) -> u32 {
        self.right - self.left
    }

    pub fn height(&self) -> u32 {
        self.bottom - self.top
    }

    /// Express this region as margins relative to an image of the given size.
    pub fn to_margins(&self, width: u32, height: u32) -> Margins {
        Margins {
            left: self.left,
            top: self.top,
            right: width.saturating_sub(self.right),
            bottom: height.saturating_sub(self.bottom),
        }
    }
}

/// Largest uniform scale that fits `src` inside `bound`.
///
/// With `allow_upscale` false the result is capped at `1.0`, which is what
/// display previews want. Grid cells allow upscaling so small images fill
/// their cell.
///
/// Returns `0.0` for a zero-sized source.
pub fn scale_to_fit(src_w: u32, src_h: u32, bound_w: u32, bound_h: u32, allow_upscale: bool) -> f64 {
    if src_w == 0 || src_h == 0 {
        return 0.0;
    }
    let scale = (bound_w as f64 / src_w as f64).min(bound_h as f64 / src_h as f64);
    if allow_upscale {
        scale
    } else {
        scale.min(1.0)
    }
}

/// Integer size of `src` after scaling it to fit inside `bound`.
///
/// The limiting axis lands exactly on its bound and the other axis is
/// floored, so the result never exceeds the bound. Neither side drops
/// below one pixel.
pub fn fit_size(src_w: u32, src_h: u32, bound_w: u32, bound_h: u32, allow_upscale: bool) -> (u32, u32) {
    if src_w == 0 || src_h == 0 {
        return (0, 0);
    }

    let fits = src_w <= bound_w && src_h <= bound_h;
    if fits && !allow_upscale {
        return (src_w, src_h);
    }

    let (sw, sh) = (src_w as u64, src_h as u64);
    let (bw, bh) = (bound_w as u64, bound_h as u64);

    // bw/sw <= bh/sh without dividing
    if bw * sh <= bh * sw {
        let h = (sh * bw) / sw;
        (bound_w.max(1), (h as u32).max(1))
    } else {
        let w = (sw * bh) / sh;
        ((w as u32).max(1), bound_h.max(1))
    }
}

/// Offset that centers an `inner` box inside an `outer` box.
///
/// Uses floor division, so odd differences leave the extra pixel on the
/// right/bottom. Negative offsets are returned when `inner` is larger.
pub fn center_offset(outer_w: u32, outer_h: u32, inner_w: u32, inner_h: u32) -> (i64, i64) {
    let dx = (outer_w as i64 - inner_w as i64).div_euclid(2);
    let dy = (outer_h as i64 - inner_h as i64).div_euclid(2);
    (dx, dy)
}


// ============================================================================
// Property-Based Tests
// ============================================================================
