//! Error and orientation types for decoding.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Why an encoded image could not be turned into pixels.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The bytes do not start with any signature the decoder knows.
    #[error("Unrecognized image format")]
    InvalidFormat,

    /// The format was recognized but the data is damaged or truncated.
    #[error("Corrupted image data: {0}")]
    CorruptedFile(String),

    /// The file could not be read.
    #[error("I/O error: {0}")]
    IoError(String),
}

/// Camera orientation from the EXIF `Orientation` tag.
///
/// Discriminants are the tag values. Unknown values read as `Normal`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[repr(u8)]
pub enum Orientation {
    #[default]
    Normal = 1,
    FlipHorizontal = 2,
    Rotate180 = 3,
    FlipVertical = 4,
    /// Mirrored across the main diagonal.
    Transpose = 5,
    Rotate90CW = 6,
    /// Mirrored across the anti-diagonal.
    Transverse = 7,
    Rotate270CW = 8,
}

impl Orientation {
    /// Whether the upright image has width and height exchanged.
    pub fn swaps_dimensions(self) -> bool {
        (self as u8) >= 5
    }
}

impl From<u32> for Orientation {
    fn from(tag: u32) -> Self {
        use Orientation::*;
        [
            Normal,
            FlipHorizontal,
            Rotate180,
            FlipVertical,
            Transpose,
            Rotate90CW,
            Transverse,
            Rotate270CW,
        ]
        .into_iter()
        .find(|o| *o as u32 == tag)
        .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_orientation_tag_values() {
        for tag in 1u32..=8 {
            assert_eq!(Orientation::from(tag) as u32, tag);
        }
        assert_eq!(Orientation::from(6), Orientation::Rotate90CW);
        assert_eq!(Orientation::from(0), Orientation::Normal);
        assert_eq!(Orientation::from(9), Orientation::Normal);
    }

    #[test]
    fn test_only_quarter_turns_swap_dimensions() {
        let swapped: Vec<u32> = (1u32..=8)
            .filter(|&tag| Orientation::from(tag).swaps_dimensions())
            .collect();
        assert_eq!(swapped, vec![5, 6, 7, 8]);
    }

    #[test]
    fn test_decode_error_display() {
        let err = DecodeError::IoError("missing.jpg: not found".to_string());
        assert_eq!(err.to_string(), "I/O error: missing.jpg: not found");

        let err = DecodeError::InvalidFormat;
        assert_eq!(err.to_string(), "Unrecognized image format");
    }
}
