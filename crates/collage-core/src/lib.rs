//! Collage Core - crop, stitch and viewport mapping for raster images
//!
//! This crate holds the image engine behind the `collage` CLI and the WASM
//! bindings:
//! - Cropping by per-edge margins, one image or a whole batch
//! - Stitching images into a grid, a horizontal strip or a vertical strip
//! - Mapping between image pixels and an aspect-fit preview viewport
//!
//! Decoding and encoding live in [`decode`] and [`encode`]; the engine itself
//! only ever sees decoded [`RasterImage`] values.

pub mod crop;
pub mod decode;
pub mod encode;
pub mod error;
pub mod geometry;
pub mod raster;
pub mod resample;
pub mod stitch;
pub mod viewport;

pub use crop::{crop, crop_batch, BatchCropReport, CropItem};
pub use error::{EngineError, EngineResult};
pub use geometry::{CropRegion, Margins};
pub use raster::{Color, ColorParseError, RasterImage};
pub use resample::FilterType;
pub use stitch::{stitch, GridLayout, Placement, StitchConfig, StitchMode, Stitched};
pub use viewport::{begin_drag, render_preview, DragSelection, ViewportMapping, ViewportRect};
