//! Mapping between a display viewport and image pixel space.
//!
//! An image is shown in a viewport scaled to fit (never upscaled) and
//! centered. Crop margins stored in image pixels are projected forward to
//! draw the crop rectangle, and rectangles dragged by the user are projected
//! back to produce new margins.
//!
//! A [`ViewportMapping`] is a plain value computed from the current image and
//! viewport sizes. Hosts recompute it whenever either size changes instead of
//! caching scale and offset next to their widgets.
//!
//! # Interactive Selection
//!
//! A drag is three calls: [`begin_drag`] on mouse-down, [`DragSelection::update_drag`]
//! on every move (returns the rubber band to draw), and
//! [`DragSelection::commit_drag`] on mouse-up (returns the margins). The host
//! keeps the [`DragSelection`] between calls; nothing else is remembered.

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::error::{EngineError, EngineResult};
use crate::geometry::{center_offset, fit_size, scale_to_fit, Margins};
use crate::raster::RasterImage;
use crate::resample::{resize_to_fit, FilterType};

/// An axis-aligned rectangle in viewport coordinates with `x1 <= x2`, `y1 <= y2`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ViewportRect {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

impl ViewportRect {
    /// Rectangle spanned by two corners given in any order.
    pub fn from_points(a: (f64, f64), b: (f64, f64)) -> Self {
        Self {
            x1: a.0.min(b.0),
            y1: a.1.min(b.1),
            x2: a.0.max(b.0),
            y2: a.1.max(b.1),
        }
    }

    pub fn width(&self) -> f64 {
        self.x2 - self.x1
    }

    pub fn height(&self) -> f64 {
        self.y2 - self.y1
    }
}

/// Scale and offset that place an image inside a viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewportMapping {
    /// Viewport pixels per image pixel (at most 1.0).
    pub scale: f64,
    /// Top-left corner of the displayed image inside the viewport.
    pub offset: (i64, i64),
    /// Source image size.
    pub image_size: (u32, u32),
    /// Viewport size.
    pub viewport_size: (u32, u32),
    /// Size of the scaled image as drawn.
    pub displayed_size: (u32, u32),
}

impl ViewportMapping {
    /// Compute the mapping for an image shown in a viewport.
    ///
    /// # Errors
    ///
    /// - `EngineError::DegenerateViewport` if either viewport side is 1 or less.
    ///   The viewport has not been laid out yet; retry once it has a size.
    /// - `EngineError::ZeroSizedImage` if the image has no pixels.
    pub fn new(
        image_width: u32,
        image_height: u32,
        viewport_width: u32,
        viewport_height: u32,
    ) -> EngineResult<Self> {
        if viewport_width <= 1 || viewport_height <= 1 {
            return Err(EngineError::DegenerateViewport {
                width: viewport_width,
                height: viewport_height,
            });
        }
        if image_width == 0 || image_height == 0 {
            return Err(EngineError::ZeroSizedImage { index: 0 });
        }

        let scale = scale_to_fit(image_width, image_height, viewport_width, viewport_height, false);
        let displayed_size = fit_size(image_width, image_height, viewport_width, viewport_height, false);
        let offset = center_offset(
            viewport_width,
            viewport_height,
            displayed_size.0,
            displayed_size.1,
        );

        trace!(
            image_width,
            image_height,
            viewport_width,
            viewport_height,
            scale,
            "viewport mapping"
        );

        Ok(Self {
            scale,
            offset,
            image_size: (image_width, image_height),
            viewport_size: (viewport_width, viewport_height),
            displayed_size,
        })
    }

    /// Project an image point into the viewport.
    pub fn to_viewport(&self, x: f64, y: f64) -> (f64, f64) {
        (
            x * self.scale + self.offset.0 as f64,
            y * self.scale + self.offset.1 as f64,
        )
    }

    /// Project a viewport point back to image pixels, clamped to the image.
    ///
    /// Results lie in `[0, width] x [0, height]`; the far edge is included so
    /// a drag to the image border yields a zero margin.
    pub fn to_image(&self, x: f64, y: f64) -> (u32, u32) {
        let (w, h) = self.image_size;
        let ix = ((x - self.offset.0 as f64) / self.scale).floor();
        let iy = ((y - self.offset.1 as f64) / self.scale).floor();
        (clamp_axis(ix, w), clamp_axis(iy, h))
    }

    /// Viewport rectangle for the region left by `margins`.
    ///
    /// Returns `None` when the margins leave nothing to draw.
    pub fn margins_to_viewport(&self, margins: &Margins) -> Option<ViewportRect> {
        let (w, h) = self.image_size;
        let region = margins.resolve(w, h)?;
        let top_left = self.to_viewport(region.left as f64, region.top as f64);
        let bottom_right = self.to_viewport(region.right as f64, region.bottom as f64);
        Some(ViewportRect::from_points(top_left, bottom_right))
    }

    /// Margins described by a rectangle drawn in the viewport.
    pub fn rect_to_margins(&self, rect: &ViewportRect) -> Margins {
        let (w, h) = self.image_size;
        let (x1, y1) = self.to_image(rect.x1, rect.y1);
        let (x2, y2) = self.to_image(rect.x2, rect.y2);
        Margins {
            left: x1,
            top: y1,
            right: w - x2.max(x1),
            bottom: h - y2.max(y1),
        }
    }
}

fn clamp_axis(value: f64, max: u32) -> u32 {
    if value.is_nan() || value <= 0.0 {
        0
    } else if value >= max as f64 {
        max
    } else {
        value as u32
    }
}

/// A selection drag in progress. Only the start point is remembered.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragSelection {
    pub start: (f64, f64),
}

/// Start a drag at a viewport point (mouse-down).
pub fn begin_drag(x: f64, y: f64) -> DragSelection {
    DragSelection { start: (x, y) }
}

impl DragSelection {
    /// Rubber band between the start point and the pointer (mouse-move).
    pub fn update_drag(&self, x: f64, y: f64) -> ViewportRect {
        ViewportRect::from_points(self.start, (x, y))
    }

    /// Finish the drag and convert it to margins (mouse-up).
    pub fn commit_drag(self, mapping: &ViewportMapping, x: f64, y: f64) -> Margins {
        mapping.rect_to_margins(&self.update_drag(x, y))
    }
}

/// Downscale `image` for display in a viewport and return the mapping used.
///
/// The preview is never larger than the source.
pub fn render_preview(
    image: &RasterImage,
    viewport_width: u32,
    viewport_height: u32,
) -> EngineResult<(RasterImage, ViewportMapping)> {
    let mapping = ViewportMapping::new(image.width, image.height, viewport_width, viewport_height)?;
    let preview = resize_to_fit(image, viewport_width, viewport_height, false, FilterType::Lanczos3)?;
    Ok((preview, mapping))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raster::Color;

    fn mapping_1600x900_in_800x600() -> ViewportMapping {
        ViewportMapping::new(1600, 900, 800, 600).unwrap()
    }

    #[test]
    fn test_mapping_fits_and_centers() {
        let m = mapping_1600x900_in_800x600();
        assert!((m.scale - 0.5).abs() < 1e-12);
        assert_eq!(m.displayed_size, (800, 450));
        assert_eq!(m.offset, (0, 75));
    }

    #[test]
    fn test_mapping_never_upscales() {
        let m = ViewportMapping::new(200, 100, 800, 600).unwrap();
        assert_eq!(m.scale, 1.0);
        assert_eq!(m.displayed_size, (200, 100));
        assert_eq!(m.offset, (300, 250));
    }

    #[test]
    fn test_degenerate_viewport() {
        assert_eq!(
            ViewportMapping::new(100, 100, 1, 600),
            Err(EngineError::DegenerateViewport {
                width: 1,
                height: 600
            })
        );
        assert!(ViewportMapping::new(100, 100, 800, 0).is_err());
    }

    #[test]
    fn test_zero_sized_image() {
        assert_eq!(
            ViewportMapping::new(0, 100, 800, 600),
            Err(EngineError::ZeroSizedImage { index: 0 })
        );
    }

    #[test]
    fn test_forward_inverse_round_trip() {
        let m = mapping_1600x900_in_800x600();

        let (vx, vy) = m.to_viewport(0.0, 0.0);
        assert_eq!((vx, vy), (0.0, 75.0));
        assert_eq!(m.to_image(vx, vy), (0, 0));

        let (vx, vy) = m.to_viewport(1600.0, 900.0);
        assert_eq!((vx, vy), (800.0, 525.0));
        assert_eq!(m.to_image(vx, vy), (1600, 900));
    }

    #[test]
    fn test_inverse_clamps_outside_points() {
        let m = mapping_1600x900_in_800x600();
        // Above the letterboxed image and off to the right
        assert_eq!(m.to_image(-50.0, 10.0), (0, 0));
        assert_eq!(m.to_image(900.0, 590.0), (1600, 900));
    }

    #[test]
    fn test_margins_to_viewport() {
        let m = mapping_1600x900_in_800x600();
        let rect = m.margins_to_viewport(&Margins::new(100, 100, 300, 200)).unwrap();

        assert_eq!(rect.x1, 50.0);
        assert_eq!(rect.y1, 125.0);
        assert_eq!(rect.x2, 650.0);
        assert_eq!(rect.y2, 425.0);
    }

    #[test]
    fn test_margins_to_viewport_empty_region() {
        let m = mapping_1600x900_in_800x600();
        assert!(m.margins_to_viewport(&Margins::new(800, 0, 800, 0)).is_none());
    }

    #[test]
    fn test_rect_to_margins() {
        let m = mapping_1600x900_in_800x600();
        let rect = ViewportRect::from_points((650.0, 425.0), (50.0, 125.0));
        assert_eq!(m.rect_to_margins(&rect), Margins::new(100, 100, 300, 200));
    }

    #[test]
    fn test_drag_sequence() {
        let m = mapping_1600x900_in_800x600();
        let drag = begin_drag(700.0, 500.0);

        let band = drag.update_drag(100.0, 100.0);
        assert_eq!(band, ViewportRect { x1: 100.0, y1: 100.0, x2: 700.0, y2: 500.0 });

        let margins = drag.commit_drag(&m, 100.0, 100.0);
        // (100 - 0) / 0.5 = 200, (100 - 75) / 0.5 = 50, (700) / 0.5 = 1400, (500 - 75) / 0.5 = 850
        assert_eq!(margins, Margins::new(200, 50, 200, 50));
    }

    #[test]
    fn test_drag_beyond_image_gives_zero_margins() {
        let m = mapping_1600x900_in_800x600();
        let margins = begin_drag(-10.0, 0.0).commit_drag(&m, 810.0, 600.0);
        assert_eq!(margins, Margins::ZERO);
    }

    #[test]
    fn test_render_preview() {
        let img = RasterImage::filled(1600, 900, Color::new(10, 20, 30));
        let (preview, mapping) = render_preview(&img, 800, 600).unwrap();

        assert_eq!(preview.dimensions(), (800, 450));
        assert_eq!(mapping.offset, (0, 75));
    }

    #[test]
    fn test_render_preview_matches_displayed_size() {
        for &(iw, ih, vw, vh) in &[(301, 97, 64, 48), (97, 301, 64, 48), (250, 300, 100, 100), (7, 500, 33, 9)] {
            let img = RasterImage::filled(iw, ih, Color::WHITE);
            let (preview, mapping) = render_preview(&img, vw, vh).unwrap();
            assert_eq!(preview.dimensions(), mapping.displayed_size, "{}x{} in {}x{}", iw, ih, vw, vh);
            assert!(preview.width <= vw && preview.height <= vh);
        }
    }

    #[test]
    fn test_render_preview_small_image_unchanged() {
        let img = RasterImage::filled(40, 30, Color::BLACK);
        let (preview, _) = render_preview(&img, 800, 600).unwrap();
        assert_eq!(preview, img);
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================
