//! Collage WASM - WebAssembly bindings for the collage engine
//!
//! This crate exposes the collage-core crop, stitch and viewport functions to
//! JavaScript. The browser host owns file pickers, canvas drawing and mouse
//! events; everything else happens here.
//!
//! # Module Structure
//!
//! - `types` - WASM-compatible wrapper types for image data
//! - `crop` - Margin-based cropping
//! - `stitch` - Grid and strip composition
//! - `viewport` - Preview coordinate mapping and drag selection
//! - `decode` / `encode` - File bytes to pixels and back
//!
//! # Usage
//!
//! ```typescript
//! import init, { decode_image, crop_image, JsImageSet, stitch_images } from '@collage/wasm';
//!
//! await init();
//!
//! const set = new JsImageSet();
//! for (const file of files) {
//!   const image = decode_image(new Uint8Array(await file.arrayBuffer()));
//!   set.push(crop_image(image, { left: 10, top: 10, right: 10, bottom: 10 }) ?? image);
//! }
//! const result = stitch_images(set, { mode: 'grid', cols: 3, background: '#ffffff' });
//! ```

use wasm_bindgen::prelude::*;

mod crop;
mod decode;
mod encode;
mod stitch;
mod types;
mod viewport;

pub use crop::crop_image;
pub use decode::{decode_image, get_orientation};
pub use encode::{encode_jpeg, encode_jpeg_from_image};
pub use stitch::{stitch_images, JsStitchResult};
pub use types::{JsImageSet, JsRasterImage};
pub use viewport::{preview_image, JsViewportMapping};

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

/// Convert any displayable error into a JS exception value.
pub(crate) fn to_js_error(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert_eq!(version(), env!("CARGO_PKG_VERSION"));
    }
}
