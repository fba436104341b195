//! Compositing several images into one.
//!
//! Three layouts are supported:
//!
//! - **Grid**: every image is scaled into a shared cell size and placed
//!   row-major. Rows and columns may be inferred from the image count.
//! - **Horizontal**: images are scaled to a common height and placed
//!   left to right.
//! - **Vertical**: images are scaled to a common width and placed
//!   top to bottom.
//!
//! Input order is significant in every mode. All layouts leave `spacing`
//! pixels of background between neighbouring images.
//!
//! # Parallelism
//!
//! With the `parallel` feature the per-image resample step runs on the rayon
//! pool. Results are collected by input index, so the output is identical to
//! the sequential build.

mod grid;
mod linear;

use serde::{Deserialize, Serialize};
#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::error::{EngineError, EngineResult};
use crate::raster::{Color, RasterImage};
use crate::resample::{resize, FilterType};

pub use grid::{stitch_grid, stitch_grid_with, GridLayout};
pub use linear::{stitch_linear, stitch_linear_with, Axis};

/// Layout used to combine images.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StitchMode {
    #[default]
    Grid,
    Horizontal,
    Vertical,
}

impl std::str::FromStr for StitchMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "grid" => Ok(StitchMode::Grid),
            "horizontal" | "h" => Ok(StitchMode::Horizontal),
            "vertical" | "v" => Ok(StitchMode::Vertical),
            other => Err(format!(
                "unknown stitch mode '{}': expected grid, horizontal or vertical",
                other
            )),
        }
    }
}

/// Parameters for a stitch request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StitchConfig {
    /// Layout to use.
    pub mode: StitchMode,
    /// Gap between neighbouring images, in pixels.
    pub spacing: u32,
    /// Colour of the gaps and of unused cell area.
    pub background: Color,
    /// Grid rows (0 = infer). Ignored by the linear modes.
    pub rows: u32,
    /// Grid columns (0 = infer). Ignored by the linear modes.
    pub cols: u32,
    /// Resampling filter for scaled images.
    pub filter: FilterType,
}

impl Default for StitchConfig {
    fn default() -> Self {
        Self {
            mode: StitchMode::Grid,
            spacing: 10,
            background: Color::WHITE,
            rows: 0,
            cols: 3,
            filter: FilterType::Lanczos3,
        }
    }
}

/// Whether every input image made it into the output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// All images were placed.
    Placed,
    /// The grid was too small; the trailing `dropped` images were left out.
    Truncated { dropped: usize },
}

impl Placement {
    /// Number of images left out of the output.
    pub fn dropped(&self) -> usize {
        match self {
            Placement::Placed => 0,
            Placement::Truncated { dropped } => *dropped,
        }
    }
}

/// A stitched image and how its inputs were placed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Stitched {
    pub image: RasterImage,
    pub placement: Placement,
}

/// Stitch `images` with the layout described by `config`.
///
/// # Errors
///
/// - `EngineError::EmptyInput` if `images` is empty
/// - `EngineError::ZeroSizedImage` if an input has no pixels
/// - `EngineError::InvalidPixelData` if an input buffer does not match its size
pub fn stitch(images: &[RasterImage], config: &StitchConfig) -> EngineResult<Stitched> {
    match config.mode {
        StitchMode::Grid => stitch_grid_with(
            images,
            config.rows,
            config.cols,
            config.spacing,
            config.background,
            config.filter,
        ),
        StitchMode::Horizontal | StitchMode::Vertical => {
            let axis = if config.mode == StitchMode::Horizontal {
                Axis::Horizontal
            } else {
                Axis::Vertical
            };
            let image =
                stitch_linear_with(images, config.spacing, config.background, axis, config.filter)?;
            Ok(Stitched {
                image,
                placement: Placement::Placed,
            })
        }
    }
}

/// Reject empty input, zero-sized images and mis-sized pixel buffers.
fn validate_inputs(images: &[RasterImage]) -> EngineResult<()> {
    if images.is_empty() {
        return Err(EngineError::EmptyInput);
    }
    for (index, img) in images.iter().enumerate() {
        if img.width == 0 || img.height == 0 {
            return Err(EngineError::ZeroSizedImage { index });
        }
        img.validate().map_err(|e| e.at_index(index))?;
    }
    Ok(())
}

/// Resample each image to its target size, keeping input order.
fn resample_all(
    images: &[RasterImage],
    sizes: &[(u32, u32)],
    filter: FilterType,
) -> EngineResult<Vec<RasterImage>> {
    let resample_one = |(image, &(w, h)): (&RasterImage, &(u32, u32))| resize(image, w, h, filter);

    #[cfg(feature = "parallel")]
    let resized = images.par_iter().zip(sizes.par_iter()).map(resample_one).collect();
    #[cfg(not(feature = "parallel"))]
    let resized = images.iter().zip(sizes.iter()).map(resample_one).collect();

    resized
}

/// Convert a canvas extent to `u32`.
fn canvas_extent(value: u64) -> EngineResult<u32> {
    u32::try_from(value)
        .map_err(|_| EngineError::Resample(format!("output extent {} is too large", value)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid(width: u32, height: u32) -> RasterImage {
        RasterImage::filled(width, height, Color::new(40, 80, 120))
    }

    #[test]
    fn test_default_config_matches_tool_defaults() {
        let config = StitchConfig::default();
        assert_eq!(config.mode, StitchMode::Grid);
        assert_eq!(config.spacing, 10);
        assert_eq!(config.background, Color::WHITE);
        assert_eq!((config.rows, config.cols), (0, 3));
        assert_eq!(config.filter, FilterType::Lanczos3);
    }

    #[test]
    fn test_mode_from_str() {
        assert_eq!("grid".parse::<StitchMode>().unwrap(), StitchMode::Grid);
        assert_eq!("Horizontal".parse::<StitchMode>().unwrap(), StitchMode::Horizontal);
        assert_eq!("v".parse::<StitchMode>().unwrap(), StitchMode::Vertical);
        assert!("diagonal".parse::<StitchMode>().is_err());
    }

    #[test]
    fn test_stitch_empty_input() {
        let result = stitch(&[], &StitchConfig::default());
        assert_eq!(result, Err(EngineError::EmptyInput));
    }

    #[test]
    fn test_stitch_zero_sized_input() {
        let images = vec![solid(10, 10), RasterImage::new(0, 5, vec![])];
        let result = stitch(&images, &StitchConfig::default());
        assert_eq!(result, Err(EngineError::ZeroSizedImage { index: 1 }));
    }

    #[test]
    fn test_stitch_short_buffer_is_an_error() {
        let broken = RasterImage {
            width: 10,
            height: 10,
            pixels: vec![0; 3],
        };
        let expected = Err(EngineError::InvalidPixelData {
            index: 1,
            expected: 300,
            actual: 3,
        });
        for mode in [StitchMode::Grid, StitchMode::Horizontal, StitchMode::Vertical] {
            let config = StitchConfig {
                mode,
                ..StitchConfig::default()
            };
            let images = vec![solid(10, 10), broken.clone()];
            assert_eq!(stitch(&images, &config), expected, "{:?}", mode);
        }
    }

    #[test]
    fn test_stitch_dispatches_horizontal() {
        let config = StitchConfig {
            mode: StitchMode::Horizontal,
            spacing: 4,
            ..Default::default()
        };
        let out = stitch(&[solid(10, 20), solid(30, 20)], &config).unwrap();
        assert_eq!(out.image.dimensions(), (44, 20));
        assert_eq!(out.placement, Placement::Placed);
    }

    #[test]
    fn test_stitch_dispatches_vertical() {
        let config = StitchConfig {
            mode: StitchMode::Vertical,
            spacing: 0,
            ..Default::default()
        };
        let out = stitch(&[solid(20, 10), solid(20, 30)], &config).unwrap();
        assert_eq!(out.image.dimensions(), (20, 40));
    }

    #[test]
    fn test_stitch_dispatches_grid_with_truncation() {
        let config = StitchConfig {
            rows: 1,
            cols: 2,
            spacing: 0,
            ..Default::default()
        };
        let images = vec![solid(10, 10), solid(10, 10), solid(10, 10)];
        let out = stitch(&images, &config).unwrap();
        assert_eq!(out.image.dimensions(), (20, 10));
        assert_eq!(out.placement, Placement::Truncated { dropped: 1 });
        assert_eq!(out.placement.dropped(), 1);
    }
}
