//! Image decoding for hosts.
//!
//! The engine itself only works on decoded [`RasterImage`](crate::RasterImage)
//! values. This module is the collaborator hosts use to get there:
//! - Decoding any supported format to RGB8
//! - Applying EXIF orientation so images appear the way cameras intended
//!
//! # Examples
//!
//! ```ignore
//! use collage_core::decode::decode_file;
//!
//! let image = decode_file(Path::new("photo.jpg"))?;
//! println!("Decoded {}x{} image", image.width, image.height);
//! ```

mod reader;
mod types;

pub use reader::{decode_file, decode_image, decode_image_no_orientation, get_orientation};
pub use types::{DecodeError, Orientation};
