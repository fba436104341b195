//! Viewport mapping bindings for the interactive crop preview.
//!
//! The host recreates a [`JsViewportMapping`] whenever the image or the
//! canvas size changes, then uses it to draw the crop rectangle and to turn
//! a mouse drag into margins.
//!
//! ```typescript
//! const mapping = new JsViewportMapping(image.width, image.height, canvas.width, canvas.height);
//! const [x1, y1, x2, y2] = mapping.margins_to_viewport(margins) ?? [0, 0, 0, 0];
//! // on mouse-up
//! const margins = mapping.drag_to_margins(start.x, start.y, event.offsetX, event.offsetY);
//! ```

use collage_core::{render_preview, Margins, ViewportMapping, ViewportRect};
use wasm_bindgen::prelude::*;

use crate::to_js_error;
use crate::types::JsRasterImage;

/// Scale and offset of an image drawn aspect-fit inside a viewport.
#[wasm_bindgen]
pub struct JsViewportMapping {
    inner: ViewportMapping,
}

#[wasm_bindgen]
impl JsViewportMapping {
    /// Fails while the viewport is not laid out yet (either side 1px or less)
    /// or when the image is empty.
    #[wasm_bindgen(constructor)]
    pub fn new(
        image_width: u32,
        image_height: u32,
        viewport_width: u32,
        viewport_height: u32,
    ) -> Result<JsViewportMapping, JsValue> {
        ViewportMapping::new(image_width, image_height, viewport_width, viewport_height)
            .map(JsViewportMapping::from_core)
            .map_err(to_js_error)
    }

    #[wasm_bindgen(getter)]
    pub fn scale(&self) -> f64 {
        self.inner.scale
    }

    #[wasm_bindgen(getter)]
    pub fn offset_x(&self) -> f64 {
        self.inner.offset.0 as f64
    }

    #[wasm_bindgen(getter)]
    pub fn offset_y(&self) -> f64 {
        self.inner.offset.1 as f64
    }

    #[wasm_bindgen(getter)]
    pub fn displayed_width(&self) -> u32 {
        self.inner.displayed_size.0
    }

    #[wasm_bindgen(getter)]
    pub fn displayed_height(&self) -> u32 {
        self.inner.displayed_size.1
    }

    /// Image point to viewport point, as `[x, y]`.
    pub fn to_viewport(&self, x: f64, y: f64) -> Vec<f64> {
        let (vx, vy) = self.inner.to_viewport(x, y);
        vec![vx, vy]
    }

    /// Viewport point to clamped image pixel, as `[x, y]`.
    pub fn to_image(&self, x: f64, y: f64) -> Vec<u32> {
        let (ix, iy) = self.inner.to_image(x, y);
        vec![ix, iy]
    }

    /// Crop rectangle to draw for `margins`, as `[x1, y1, x2, y2]`, or
    /// `undefined` when the margins leave nothing.
    pub fn margins_to_viewport(&self, margins: JsValue) -> Result<Option<Vec<f64>>, JsValue> {
        let margins: Margins = serde_wasm_bindgen::from_value(margins)
            .map_err(|e| JsValue::from_str(&format!("Invalid margins: {}", e)))?;
        Ok(self.rect_for(&margins))
    }

    /// Margins for a drag between two viewport points (any corner order).
    pub fn drag_to_margins(&self, x1: f64, y1: f64, x2: f64, y2: f64) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.margins_for(x1, y1, x2, y2)).map_err(to_js_error)
    }
}

impl JsViewportMapping {
    pub(crate) fn from_core(inner: ViewportMapping) -> Self {
        Self { inner }
    }

    fn rect_for(&self, margins: &Margins) -> Option<Vec<f64>> {
        self.inner
            .margins_to_viewport(margins)
            .map(|r| vec![r.x1, r.y1, r.x2, r.y2])
    }

    fn margins_for(&self, x1: f64, y1: f64, x2: f64, y2: f64) -> Margins {
        self.inner
            .rect_to_margins(&ViewportRect::from_points((x1, y1), (x2, y2)))
    }
}

/// Downscale `image` to fit a viewport for display.
#[wasm_bindgen]
pub fn preview_image(
    image: &JsRasterImage,
    viewport_width: u32,
    viewport_height: u32,
) -> Result<JsRasterImage, JsValue> {
    render_preview(&image.to_core(), viewport_width, viewport_height)
        .map(|(preview, _)| JsRasterImage::from_core(preview))
        .map_err(to_js_error)
}
