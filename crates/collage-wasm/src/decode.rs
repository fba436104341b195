//! Decoding bindings.

use collage_core::decode;
use wasm_bindgen::prelude::*;

use crate::to_js_error;
use crate::types::JsRasterImage;

/// Decode JPEG, PNG, BMP, TIFF or WebP bytes to an RGB image.
///
/// EXIF orientation is applied, so portrait photos come back upright.
///
/// # Example (TypeScript)
///
/// ```typescript
/// const bytes = new Uint8Array(await file.arrayBuffer());
/// const image = decode_image(bytes);
/// ```
#[wasm_bindgen]
pub fn decode_image(bytes: &[u8]) -> Result<JsRasterImage, JsValue> {
    decode::decode_image(bytes)
        .map(JsRasterImage::from_core)
        .map_err(to_js_error)
}

/// EXIF orientation value (1-8) of encoded bytes; 1 when absent.
#[wasm_bindgen]
pub fn get_orientation(bytes: &[u8]) -> u8 {
    decode::get_orientation(bytes) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_orientation_defaults_to_normal() {
        assert_eq!(get_orientation(&[]), 1);
        assert_eq!(get_orientation(&[0xFF, 0xD8, 0xFF]), 1);
    }
}
