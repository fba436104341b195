//! Stitch bindings.
//!
//! Images are collected in a [`JsImageSet`] and stitched with a plain config
//! object mirroring `StitchConfig`:
//!
//! ```typescript
//! const result = stitch_images(set, {
//!   mode: 'horizontal',  // 'grid' | 'horizontal' | 'vertical'
//!   spacing: 10,
//!   background: '#ffffff',
//!   rows: 0,             // grid only, 0 = infer
//!   cols: 3,             // grid only, 0 = infer
//! });
//! if (result.dropped > 0) {
//!   showWarning(`${result.dropped} images did not fit`);
//! }
//! ```

use collage_core::{stitch, EngineResult, StitchConfig, Stitched};
use wasm_bindgen::prelude::*;

use crate::to_js_error;
use crate::types::{JsImageSet, JsRasterImage};

/// A stitched image plus the number of inputs left out of a full grid.
#[wasm_bindgen]
pub struct JsStitchResult {
    image: JsRasterImage,
    dropped: usize,
}

#[wasm_bindgen]
impl JsStitchResult {
    /// The stitched image (copied).
    pub fn image(&self) -> JsRasterImage {
        JsRasterImage::new(self.image.width(), self.image.height(), self.image.pixels())
    }

    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.image.width()
    }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.image.height()
    }

    /// Trailing images that did not fit the grid.
    #[wasm_bindgen(getter)]
    pub fn dropped(&self) -> usize {
        self.dropped
    }
}

impl From<Stitched> for JsStitchResult {
    fn from(stitched: Stitched) -> Self {
        Self {
            dropped: stitched.placement.dropped(),
            image: JsRasterImage::from_core(stitched.image),
        }
    }
}

/// Stitch every image in `set`.
///
/// `config` may be `undefined` or `null` for the defaults (3-column grid,
/// 10px white spacing). Truncation is logged to the browser console.
#[wasm_bindgen]
pub fn stitch_images(set: &JsImageSet, config: JsValue) -> Result<JsStitchResult, JsValue> {
    let config: StitchConfig = if config.is_undefined() || config.is_null() {
        StitchConfig::default()
    } else {
        serde_wasm_bindgen::from_value(config)
            .map_err(|e| JsValue::from_str(&format!("Invalid stitch config: {}", e)))?
    };

    let result = stitch_with(set, &config).map_err(to_js_error)?;
    if result.dropped > 0 {
        web_sys::console::warn_1(&JsValue::from_str(&format!(
            "collage: grid too small, {} image(s) left out",
            result.dropped
        )));
    }
    Ok(result)
}

pub(crate) fn stitch_with(set: &JsImageSet, config: &StitchConfig) -> EngineResult<JsStitchResult> {
    stitch(set.images(), config).map(JsStitchResult::from)
}
