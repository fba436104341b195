//! Margin-based crop bindings.

use collage_core::{crop, EngineError, Margins};
use wasm_bindgen::prelude::*;

use crate::to_js_error;
use crate::types::JsRasterImage;

/// Crop `image` by per-edge margins.
///
/// `margins` is a plain object `{ left, top, right, bottom }`; missing fields
/// default to 0.
///
/// # Returns
///
/// The cropped image, or `undefined` when the margins leave an empty region.
///
/// # Example (TypeScript)
///
/// ```typescript
/// const cropped = crop_image(image, { left: 20, right: 20 });
/// if (cropped === undefined) {
///   showWarning('Margins are larger than the image');
/// }
/// ```
#[wasm_bindgen]
pub fn crop_image(image: &JsRasterImage, margins: JsValue) -> Result<Option<JsRasterImage>, JsValue> {
    let margins: Margins = serde_wasm_bindgen::from_value(margins)
        .map_err(|e| JsValue::from_str(&format!("Invalid margins: {}", e)))?;
    crop_with(image, margins).map_err(to_js_error)
}

/// Empty regions come back as `Ok(None)`; other engine errors are surfaced.
pub(crate) fn crop_with(
    image: &JsRasterImage,
    margins: Margins,
) -> Result<Option<JsRasterImage>, EngineError> {
    match crop(&image.to_core(), margins) {
        Ok(cropped) => Ok(Some(JsRasterImage::from_core(cropped))),
        Err(e) if e.is_skippable() => Ok(None),
        Err(e) => Err(e),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gradient(width: u32, height: u32) -> JsRasterImage {
        let pixels = (0..width * height)
            .flat_map(|i| [(i % 256) as u8, 0, 0])
            .collect();
        JsRasterImage::new(width, height, pixels)
    }

    #[test]
    fn test_crop_with_margins() {
        let img = gradient(10, 8);
        let cropped = crop_with(&img, Margins::new(2, 1, 3, 4)).unwrap().unwrap();
        assert_eq!(cropped.width(), 5);
        assert_eq!(cropped.height(), 3);
        // First pixel comes from (2, 1) in the source
        assert_eq!(cropped.pixels()[0], 12);
    }

    #[test]
    fn test_crop_with_zero_margins_is_identity() {
        let img = gradient(4, 4);
        let cropped = crop_with(&img, Margins::ZERO).unwrap().unwrap();
        assert_eq!(cropped.pixels(), img.pixels());
    }

    #[test]
    fn test_crop_with_empty_region() {
        let img = gradient(10, 10);
        assert!(crop_with(&img, Margins::new(6, 0, 6, 0)).unwrap().is_none());
    }

    #[test]
    fn test_crop_with_short_buffer_is_an_error() {
        let img = JsRasterImage::new(10, 10, vec![0u8; 30]);
        assert_eq!(
            crop_with(&img, Margins::new(1, 1, 1, 1)).map(|r| r.is_some()),
            Err(EngineError::InvalidPixelData {
                index: 0,
                expected: 300,
                actual: 30
            })
        );
    }
}

#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn margins_object(left: u32, right: u32) -> JsValue {
        let obj = js_sys::Object::new();
        js_sys::Reflect::set(&obj, &"left".into(), &left.into()).unwrap();
        js_sys::Reflect::set(&obj, &"right".into(), &right.into()).unwrap();
        obj.into()
    }

    #[wasm_bindgen_test]
    fn test_crop_image_partial_object() {
        let img = JsRasterImage::new(10, 4, vec![0u8; 10 * 4 * 3]);
        let cropped = crop_image(&img, margins_object(1, 2)).unwrap().unwrap();
        assert_eq!(cropped.width(), 7);
        assert_eq!(cropped.height(), 4);
    }

    #[wasm_bindgen_test]
    fn test_crop_image_empty_is_undefined() {
        let img = JsRasterImage::new(10, 4, vec![0u8; 10 * 4 * 3]);
        assert!(crop_image(&img, margins_object(5, 5)).unwrap().is_none());
    }

    #[wasm_bindgen_test]
    fn test_crop_image_rejects_bad_margins() {
        let img = JsRasterImage::new(2, 2, vec![0u8; 12]);
        assert!(crop_image(&img, JsValue::from_str("nope")).is_err());
    }
}
