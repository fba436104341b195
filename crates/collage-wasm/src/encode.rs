//! Encoding bindings for saving results.

use collage_core::encode;
use wasm_bindgen::prelude::*;

use crate::to_js_error;
use crate::types::JsRasterImage;

/// Encode RGB pixel data to JPEG bytes. `quality` is clamped to 1-100.
#[wasm_bindgen]
pub fn encode_jpeg(pixels: &[u8], width: u32, height: u32, quality: u8) -> Result<Vec<u8>, JsValue> {
    encode::encode_jpeg(pixels, width, height, quality).map_err(to_js_error)
}

/// Encode a stitched or cropped image to JPEG bytes.
///
/// # Example (TypeScript)
///
/// ```typescript
/// const jpeg = encode_jpeg_from_image(result.image(), 95);
/// const writable = await fileHandle.createWritable();
/// await writable.write(new Blob([jpeg], { type: 'image/jpeg' }));
/// await writable.close();
/// ```
#[wasm_bindgen]
pub fn encode_jpeg_from_image(image: &JsRasterImage, quality: u8) -> Result<Vec<u8>, JsValue> {
    encode::encode(&image.to_core(), encode::OutputFormat::Jpeg, quality).map_err(to_js_error)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_jpeg_from_core_image() {
        let img = JsRasterImage::new(12, 12, vec![64u8; 12 * 12 * 3]);
        let jpeg = encode::encode(&img.to_core(), encode::OutputFormat::Jpeg, 95).unwrap();
        assert_eq!(&jpeg[0..2], &[0xFF, 0xD8]);
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_encode_jpeg_basic() {
        let jpeg = encode_jpeg(&vec![128u8; 30 * 20 * 3], 30, 20, 90).unwrap();
        assert_eq!(&jpeg[0..2], &[0xFF, 0xD8]);
    }

    #[wasm_bindgen_test]
    fn test_encode_jpeg_wrong_length() {
        assert!(encode_jpeg(&[0u8; 10], 2, 2, 90).is_err());
    }

    #[wasm_bindgen_test]
    fn test_encode_jpeg_from_image() {
        let img = JsRasterImage::new(8, 8, vec![200u8; 8 * 8 * 3]);
        let jpeg = encode_jpeg_from_image(&img, 95).unwrap();
        assert_eq!(&jpeg[0..2], &[0xFF, 0xD8]);
    }
}
