//! Resampling used by the stitchers and by preview generation.
//!
//! Thin wrapper over `image::imageops::resize` that works on [`RasterImage`]
//! and reports failures as [`EngineError::Resample`].

use serde::{Deserialize, Serialize};
use tracing::trace;

use crate::error::{EngineError, EngineResult};
use crate::geometry::fit_size;
use crate::raster::RasterImage;

/// Interpolation used when an image changes size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterType {
    /// Pixel replication. Blocky, but never blends colours.
    Nearest,
    /// Linear (triangle) interpolation.
    Bilinear,
    /// Windowed sinc over 3 lobes. Sharpest result for downscaling.
    #[default]
    Lanczos3,
}

impl FilterType {
    /// The matching `image` crate filter.
    pub fn to_image_filter(self) -> image::imageops::FilterType {
        use image::imageops::FilterType as Img;
        match self {
            FilterType::Nearest => Img::Nearest,
            FilterType::Bilinear => Img::Triangle,
            FilterType::Lanczos3 => Img::Lanczos3,
        }
    }
}

/// Resample `image` to exactly `width x height`.
///
/// A request for the current size returns a copy without filtering.
///
/// # Errors
///
/// `EngineError::Resample` when a target side is zero, and
/// `EngineError::InvalidPixelData` when the pixel buffer length disagrees
/// with the stated dimensions.
pub fn resize(
    image: &RasterImage,
    width: u32,
    height: u32,
    filter: FilterType,
) -> EngineResult<RasterImage> {
    if width == 0 || height == 0 {
        return Err(EngineError::Resample(format!(
            "target size {}x{} has a zero dimension",
            width, height
        )));
    }
    image.validate()?;
    if image.dimensions() == (width, height) {
        return Ok(image.clone());
    }

    trace!(
        from_w = image.width,
        from_h = image.height,
        to_w = width,
        to_h = height,
        ?filter,
        "resize"
    );

    let source = image
        .to_rgb_image()
        .ok_or_else(|| EngineError::Resample("pixel buffer does not match dimensions".to_string()))?;
    let scaled = image::imageops::resize(&source, width, height, filter.to_image_filter());
    Ok(RasterImage::from_rgb_image(scaled))
}

/// Resample `image` to the largest size that fits `bound_w x bound_h`
/// with its aspect ratio kept.
///
/// Without `allow_upscale`, an image that already fits comes back as-is.
pub fn resize_to_fit(
    image: &RasterImage,
    bound_w: u32,
    bound_h: u32,
    allow_upscale: bool,
    filter: FilterType,
) -> EngineResult<RasterImage> {
    if bound_w == 0 || bound_h == 0 {
        return Err(EngineError::Resample(format!(
            "bound {}x{} has a zero dimension",
            bound_w, bound_h
        )));
    }

    let (width, height) = fit_size(image.width, image.height, bound_w, bound_h, allow_upscale);
    resize(image, width, height, filter)
}
