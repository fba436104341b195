//! Margin-based cropping.
//!
//! Margins are pixel distances removed from each edge. They are resolved
//! against each image's own size, so one set of margins can be applied to a
//! batch of images with different dimensions.
//!
//! # Example
//!
//! ```ignore
//! // Trim a 10px border
//! let cropped = crop(&image, Margins::new(10, 10, 10, 10))?;
//! ```

#[cfg(feature = "parallel")]
use rayon::prelude::*;
use tracing::{debug, trace};

use crate::error::{EngineError, EngineResult};
use crate::geometry::{CropRegion, Margins};
use crate::raster::RasterImage;

/// Crop an image by removing `margins` from its edges.
///
/// # Returns
///
/// A new `RasterImage` holding exactly the pixels of the resolved region,
/// without resampling.
///
/// # Errors
///
/// Returns `EngineError::EmptyRegion` when the margins overlap and leave no
/// pixels. Callers running a batch should skip the image and continue.
/// Returns `EngineError::InvalidPixelData` when the buffer length does not
/// match the dimensions.
pub fn crop(image: &RasterImage, margins: Margins) -> EngineResult<RasterImage> {
    image.validate()?;
    let region = margins
        .resolve(image.width, image.height)
        .ok_or(EngineError::EmptyRegion {
            width: image.width,
            height: image.height,
        })?;

    trace!(
        width = image.width,
        height = image.height,
        left = region.left,
        top = region.top,
        right = region.right,
        bottom = region.bottom,
        "crop"
    );

    Ok(copy_region(image, &region))
}

/// Copy the pixels of `region` out of `image`.
///
/// `region` must lie inside the image.
pub(crate) fn copy_region(image: &RasterImage, region: &CropRegion) -> RasterImage {
    // Fast path: full region returns a clone
    if region.left == 0
        && region.top == 0
        && region.right == image.width
        && region.bottom == image.height
    {
        return image.clone();
    }

    let out_width = region.width() as usize;
    let out_height = region.height() as usize;
    let src_stride = image.width as usize * 3;
    let row_bytes = out_width * 3;

    let mut output = Vec::with_capacity(row_bytes * out_height);

    // Copy pixel data row by row
    for y in region.top as usize..region.bottom as usize {
        let start = y * src_stride + region.left as usize * 3;
        output.extend_from_slice(&image.pixels[start..start + row_bytes]);
    }

    RasterImage {
        width: region.width(),
        height: region.height(),
        pixels: output,
    }
}

/// Outcome of cropping one image in a batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CropItem {
    /// The crop produced pixels.
    Cropped(RasterImage),
    /// The image was left out; the error says why.
    Skipped(EngineError),
}

impl CropItem {
    pub fn is_cropped(&self) -> bool {
        matches!(self, CropItem::Cropped(_))
    }
}

/// Per-image results of [`crop_batch`], in input order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchCropReport {
    pub items: Vec<CropItem>,
}

impl BatchCropReport {
    /// Number of images that produced a crop.
    pub fn succeeded(&self) -> usize {
        self.items.iter().filter(|item| item.is_cropped()).count()
    }

    /// Number of images that were skipped.
    pub fn skipped(&self) -> usize {
        self.items.len() - self.succeeded()
    }

    /// Cropped images paired with their input index.
    pub fn cropped(&self) -> impl Iterator<Item = (usize, &RasterImage)> {
        self.items.iter().enumerate().filter_map(|(idx, item)| match item {
            CropItem::Cropped(image) => Some((idx, image)),
            CropItem::Skipped(_) => None,
        })
    }

    /// Consume the report, keeping only the cropped images and their indices.
    pub fn into_cropped(self) -> Vec<(usize, RasterImage)> {
        self.items
            .into_iter()
            .enumerate()
            .filter_map(|(idx, item)| match item {
                CropItem::Cropped(image) => Some((idx, image)),
                CropItem::Skipped(_) => None,
            })
            .collect()
    }
}

/// Apply the same margins to every image.
///
/// Images whose margins resolve to an empty region are skipped; the rest of
/// the batch is still processed. Results keep the input order.
pub fn crop_batch(images: &[RasterImage], margins: Margins) -> BatchCropReport {
    let crop_one = |(idx, image): (usize, &RasterImage)| match crop(image, margins) {
        Ok(cropped) => CropItem::Cropped(cropped),
        Err(err) => CropItem::Skipped(err.at_index(idx)),
    };

    #[cfg(feature = "parallel")]
    let items: Vec<CropItem> = images.par_iter().enumerate().map(crop_one).collect();
    #[cfg(not(feature = "parallel"))]
    let items: Vec<CropItem> = images.iter().enumerate().map(crop_one).collect();

    let report = BatchCropReport { items };
    debug!(
        total = images.len(),
        succeeded = report.succeeded(),
        skipped = report.skipped(),
        "crop batch finished"
    );
    report
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Create a test image where each pixel has a unique value based on position.
    fn test_image(width: u32, height: u32) -> RasterImage {
        let mut pixels = Vec::with_capacity((width * height * 3) as usize);
        for y in 0..height {
            for x in 0..width {
                // Use position to create unique pixel values
                let v = ((y * width + x) % 256) as u8;
                pixels.push(v); // R
                pixels.push(v); // G
                pixels.push(v); // B
            }
        }
        RasterImage {
            width,
            height,
            pixels,
        }
    }

    #[test]
    fn test_zero_margins_returns_copy() {
        let img = test_image(100, 100);
        let result = crop(&img, Margins::ZERO).unwrap();

        assert_eq!(result, img);
    }

    #[test]
    fn test_uniform_border() {
        let img = test_image(100, 80);
        let result = crop(&img, Margins::new(10, 10, 10, 10)).unwrap();

        assert_eq!(result.width, 80);
        assert_eq!(result.height, 60);
        assert_eq!(result.pixels.len(), 80 * 60 * 3);
    }

    #[test]
    fn test_crop_pixel_values_preserved() {
        let img = test_image(10, 10);
        let result = crop(&img, Margins::new(3, 3, 3, 3)).unwrap();

        // First pixel should be from (3, 3)
        // Value = (3 * 10 + 3) % 256 = 33
        assert_eq!(result.pixel(0, 0), Some([33, 33, 33]));
        // Last pixel should be from (6, 6)
        assert_eq!(result.pixel(3, 3), Some([66, 66, 66]));
    }

    #[test]
    fn test_asymmetric_margins() {
        let img = test_image(200, 100);
        let result = crop(&img, Margins::new(0, 5, 150, 0)).unwrap();

        assert_eq!(result.width, 50);
        assert_eq!(result.height, 95);
        assert_eq!(result.pixel(0, 0), Some([((5 * 200) % 256) as u8; 3]));
    }

    #[test]
    fn test_margins_meeting_in_the_middle_are_empty() {
        let img = test_image(100, 100);
        let result = crop(&img, Margins::new(50, 0, 50, 0));

        assert_eq!(
            result,
            Err(EngineError::EmptyRegion {
                width: 100,
                height: 100
            })
        );
    }

    #[test]
    fn test_oversized_margins_are_empty() {
        let img = test_image(10, 10);
        assert!(crop(&img, Margins::new(0, 0, 0, 500)).is_err());
        assert!(crop(&img, Margins::new(500, 0, 0, 0)).is_err());
    }

    #[test]
    fn test_single_pixel_crop() {
        let img = test_image(10, 10);
        let result = crop(&img, Margins::new(9, 9, 0, 0)).unwrap();

        assert_eq!(result.dimensions(), (1, 1));
        assert_eq!(result.pixel(0, 0), Some([99, 99, 99]));
    }

    #[test]
    fn test_batch_skips_empty_regions_and_keeps_order() {
        let images = vec![test_image(100, 100), test_image(20, 20), test_image(60, 40)];
        let report = crop_batch(&images, Margins::new(15, 0, 15, 0));

        assert_eq!(report.items.len(), 3);
        assert_eq!(report.succeeded(), 2);
        assert_eq!(report.skipped(), 1);
        assert!(matches!(
            report.items[1],
            CropItem::Skipped(EngineError::EmptyRegion { .. })
        ));

        let cropped: Vec<_> = report.cropped().map(|(idx, img)| (idx, img.width)).collect();
        assert_eq!(cropped, vec![(0, 70), (2, 30)]);
    }

    #[test]
    fn test_batch_into_cropped() {
        let images = vec![test_image(10, 10), test_image(30, 30)];
        let kept = crop_batch(&images, Margins::new(0, 0, 0, 12)).into_cropped();

        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].0, 1);
        assert_eq!(kept[0].1.dimensions(), (30, 18));
    }

    #[test]
    fn test_short_buffer_is_an_error() {
        let broken = RasterImage {
            width: 10,
            height: 10,
            pixels: vec![0; 30],
        };
        assert_eq!(
            crop(&broken, Margins::new(1, 1, 1, 1)),
            Err(EngineError::InvalidPixelData {
                index: 0,
                expected: 300,
                actual: 30
            })
        );
    }

    #[test]
    fn test_batch_reports_bad_buffer_at_its_position() {
        let broken = RasterImage {
            width: 8,
            height: 8,
            pixels: vec![0; 3],
        };
        let images = vec![test_image(20, 20), broken, test_image(20, 20)];
        let report = crop_batch(&images, Margins::new(2, 2, 2, 2));

        assert_eq!(report.succeeded(), 2);
        assert_eq!(
            report.items[1],
            CropItem::Skipped(EngineError::InvalidPixelData {
                index: 1,
                expected: 192,
                actual: 3
            })
        );
    }

    #[test]
    fn test_empty_batch() {
        let report = crop_batch(&[], Margins::ZERO);
        assert_eq!(report.succeeded(), 0);
        assert_eq!(report.skipped(), 0);
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================
