//! Error type for engine operations.

use thiserror::Error;

/// Failure states of the crop, stitch and viewport operations.
///
/// None of these are fatal. A batch skips items that fail with
/// [`EngineError::EmptyRegion`], a stitch request that fails with
/// [`EngineError::EmptyInput`] is abandoned on its own, and a mapping that
/// fails with [`EngineError::DegenerateViewport`] is retried once the
/// viewport has been laid out.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EngineError {
    /// Crop margins leave no pixels.
    #[error("Crop margins leave an empty region of a {width}x{height} image")]
    EmptyRegion { width: u32, height: u32 },

    /// A stitch was requested with no images.
    #[error("No images to stitch")]
    EmptyInput,

    /// The viewport has not been sized yet.
    #[error("Viewport {width}x{height} is too small to map onto")]
    DegenerateViewport { width: u32, height: u32 },

    /// An input image has zero width or height.
    #[error("Image {index} has zero width or height")]
    ZeroSizedImage { index: usize },

    /// A pixel buffer does not hold `width * height * 3` bytes.
    ///
    /// `index` is the position in the input set; single-image operations
    /// report 0.
    #[error("Image {index} has {actual} bytes of pixel data, expected {expected}")]
    InvalidPixelData {
        index: usize,
        expected: usize,
        actual: usize,
    },

    /// The resampler rejected its input.
    #[error("Resample failed: {0}")]
    Resample(String),
}

impl EngineError {
    /// Returns true if a batch should skip the item and carry on.
    pub fn is_skippable(&self) -> bool {
        matches!(self, EngineError::EmptyRegion { .. })
    }
}

impl EngineError {
    /// Re-tag a per-image error with its position in a batch.
    pub(crate) fn at_index(self, position: usize) -> Self {
        match self {
            EngineError::InvalidPixelData {
                expected, actual, ..
            } => EngineError::InvalidPixelData {
                index: position,
                expected,
                actual,
            },
            EngineError::ZeroSizedImage { .. } => EngineError::ZeroSizedImage { index: position },
            other => other,
        }
    }
}

/// Result alias for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;
