//! WASM-compatible wrapper types for image data.

use collage_core::RasterImage;
use wasm_bindgen::prelude::*;

/// A decoded RGB image owned by WASM memory.
///
/// `pixels()` copies the buffer out to a `Uint8Array`; keep images on the
/// WASM side until they need to be drawn.
#[wasm_bindgen]
pub struct JsRasterImage {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

#[wasm_bindgen]
impl JsRasterImage {
    /// Create an image from dimensions and RGB pixel data (3 bytes per pixel).
    #[wasm_bindgen(constructor)]
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> JsRasterImage {
        JsRasterImage {
            width,
            height,
            pixels,
        }
    }

    #[wasm_bindgen(getter)]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[wasm_bindgen(getter)]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Number of bytes in the pixel buffer (width * height * 3)
    #[wasm_bindgen(getter)]
    pub fn byte_length(&self) -> usize {
        self.pixels.len()
    }

    /// Returns RGB pixel data as Uint8Array (copied).
    pub fn pixels(&self) -> Vec<u8> {
        self.pixels.clone()
    }

    /// Explicitly free WASM memory.
    pub fn free(self) {}
}

impl JsRasterImage {
    pub(crate) fn from_core(img: RasterImage) -> Self {
        Self {
            width: img.width,
            height: img.height,
            pixels: img.pixels,
        }
    }

    /// Clones the pixel data.
    pub(crate) fn to_core(&self) -> RasterImage {
        RasterImage {
            width: self.width,
            height: self.height,
            pixels: self.pixels.clone(),
        }
    }
}

/// Ordered list of images to stitch.
///
/// JS cannot hand a `Vec` of exported structs across the boundary, so the
/// host pushes images one by one. Order of `push` calls is stitch order.
#[wasm_bindgen]
#[derive(Default)]
pub struct JsImageSet {
    images: Vec<RasterImage>,
}

#[wasm_bindgen]
impl JsImageSet {
    #[wasm_bindgen(constructor)]
    pub fn new() -> JsImageSet {
        JsImageSet::default()
    }

    /// Append a copy of `image`.
    pub fn push(&mut self, image: &JsRasterImage) {
        self.images.push(image.to_core());
    }

    #[wasm_bindgen(getter)]
    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    /// Remove all images.
    pub fn clear(&mut self) {
        self.images.clear();
    }
}

impl JsImageSet {
    pub(crate) fn images(&self) -> &[RasterImage] {
        &self.images
    }
}
