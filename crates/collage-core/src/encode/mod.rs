//! Image encoding for hosts.
//!
//! Turns a [`RasterImage`] back into file bytes. The CLI picks the format from
//! the output path extension; the WASM bindings always produce JPEG.
//!
//! # Examples
//!
//! ```ignore
//! use collage_core::encode::{encode, OutputFormat, DEFAULT_QUALITY};
//!
//! let format = OutputFormat::from_path(Path::new("stitched.png"))?;
//! let bytes = encode(&image, format, DEFAULT_QUALITY)?;
//! ```

mod jpeg;
mod png;

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::raster::RasterImage;

pub use jpeg::encode_jpeg;
pub use png::encode_png;

/// JPEG quality used when none is configured.
pub const DEFAULT_QUALITY: u8 = 95;

/// Errors that can occur during encoding.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// Pixel data length doesn't match expected dimensions
    #[error("Invalid pixel data: expected {expected} bytes (width * height * 3), got {actual}")]
    InvalidPixelData { expected: usize, actual: usize },

    /// Width or height is zero
    #[error("Invalid dimensions: width ({width}) and height ({height}) must be non-zero")]
    InvalidDimensions { width: u32, height: u32 },

    /// The underlying encoder failed
    #[error("Encoding failed: {0}")]
    EncodingFailed(String),

    /// Output extension has no matching encoder
    #[error("Unsupported output format: {0}")]
    UnsupportedFormat(String),
}

/// File formats the engine can write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Jpeg,
    Png,
}

impl OutputFormat {
    /// Pick a format from a file extension (case-insensitive).
    pub fn from_extension(ext: &str) -> Result<Self, EncodeError> {
        match ext.to_ascii_lowercase().as_str() {
            "jpg" | "jpeg" => Ok(OutputFormat::Jpeg),
            "png" => Ok(OutputFormat::Png),
            other => Err(EncodeError::UnsupportedFormat(other.to_string())),
        }
    }

    /// Pick a format from the extension of `path`.
    ///
    /// A path without an extension is an error rather than a silent JPEG.
    pub fn from_path(path: &Path) -> Result<Self, EncodeError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .ok_or_else(|| EncodeError::UnsupportedFormat(path.display().to_string()))?;
        Self::from_extension(ext)
    }

    /// Canonical file extension.
    pub fn extension(self) -> &'static str {
        match self {
            OutputFormat::Jpeg => "jpg",
            OutputFormat::Png => "png",
        }
    }
}

/// Encode `image` in `format`. `quality` only applies to JPEG.
pub fn encode(image: &RasterImage, format: OutputFormat, quality: u8) -> Result<Vec<u8>, EncodeError> {
    match format {
        OutputFormat::Jpeg => encode_jpeg(&image.pixels, image.width, image.height, quality),
        OutputFormat::Png => encode_png(&image.pixels, image.width, image.height),
    }
}

/// Shared buffer checks for the RGB8 encoders.
fn validate_rgb(pixels: &[u8], width: u32, height: u32) -> Result<(), EncodeError> {
    if width == 0 || height == 0 {
        return Err(EncodeError::InvalidDimensions { width, height });
    }
    let expected = (width as usize) * (height as usize) * 3;
    if pixels.len() != expected {
        return Err(EncodeError::InvalidPixelData {
            expected,
            actual: pixels.len(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_format_from_path() {
        assert_eq!(
            OutputFormat::from_path(&PathBuf::from("out/stitched.jpg")).unwrap(),
            OutputFormat::Jpeg
        );
        assert_eq!(
            OutputFormat::from_path(&PathBuf::from("a.JPEG")).unwrap(),
            OutputFormat::Jpeg
        );
        assert_eq!(
            OutputFormat::from_path(&PathBuf::from("a.png")).unwrap(),
            OutputFormat::Png
        );
    }

    #[test]
    fn test_format_from_path_unsupported() {
        assert!(matches!(
            OutputFormat::from_path(&PathBuf::from("a.gif")),
            Err(EncodeError::UnsupportedFormat(ext)) if ext == "gif"
        ));
        assert!(OutputFormat::from_path(&PathBuf::from("noext")).is_err());
    }

    #[test]
    fn test_extension() {
        assert_eq!(OutputFormat::Jpeg.extension(), "jpg");
        assert_eq!(OutputFormat::Png.extension(), "png");
    }

    #[test]
    fn test_encode_dispatch() {
        let image = RasterImage::filled(4, 3, crate::Color::BLACK);

        let jpeg = encode(&image, OutputFormat::Jpeg, DEFAULT_QUALITY).unwrap();
        assert_eq!(&jpeg[0..2], &[0xFF, 0xD8]);

        let png = encode(&image, OutputFormat::Png, DEFAULT_QUALITY).unwrap();
        assert_eq!(&png[1..4], b"PNG");
    }

    #[test]
    fn test_validate_rgb() {
        assert!(validate_rgb(&[0; 12], 2, 2).is_ok());
        assert!(matches!(
            validate_rgb(&[0; 11], 2, 2),
            Err(EncodeError::InvalidPixelData { expected: 12, actual: 11 })
        ));
        assert!(matches!(
            validate_rgb(&[], 0, 2),
            Err(EncodeError::InvalidDimensions { width: 0, height: 2 })
        ));
    }
}
