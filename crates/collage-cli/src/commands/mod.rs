//! CLI command implementations

pub mod crop;
pub mod select;
pub mod stitch;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use collage_core::decode::decode_file;
use collage_core::encode::{encode, OutputFormat};
use collage_core::RasterImage;
use tracing::{debug, warn};

/// File extensions picked up when a directory is given as input.
pub const SUPPORTED_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "bmp", "tiff", "webp"];

/// Load and decode an image, applying EXIF orientation.
pub fn load_image(path: &Path) -> Result<RasterImage> {
    decode_file(path).with_context(|| format!("Failed to load: {}", path.display()))
}

/// Encode `image` by the extension of `path` and write it.
pub fn save_image(path: &Path, image: &RasterImage, quality: u8) -> Result<()> {
    let format = OutputFormat::from_path(path)
        .with_context(|| format!("Cannot write {}", path.display()))?;
    let bytes = encode(image, format, quality)
        .with_context(|| format!("Failed to encode: {}", path.display()))?;
    std::fs::write(path, bytes).with_context(|| format!("Failed to save: {}", path.display()))
}

/// Output path keeping the source file name.
///
/// Sources in a format the encoder cannot write (BMP, TIFF, WebP) are saved
/// as PNG under the same stem.
pub fn output_path(out_dir: &Path, source: &Path) -> PathBuf {
    let name = source.file_name().map(PathBuf::from).unwrap_or_else(|| PathBuf::from("image"));
    if OutputFormat::from_path(&name).is_ok() {
        out_dir.join(name)
    } else {
        out_dir.join(name.with_extension("png"))
    }
}

fn is_supported(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| SUPPORTED_EXTENSIONS.contains(&e.to_ascii_lowercase().as_str()))
        .unwrap_or(false)
}

/// Supported images directly inside `dir`, sorted by file name.
fn list_images(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files: Vec<PathBuf> = std::fs::read_dir(dir)
        .with_context(|| format!("Failed to read directory: {}", dir.display()))?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|p| p.is_file() && is_supported(p))
        .collect();
    files.sort();
    Ok(files)
}

/// The directory a directory input actually contributes images from.
fn source_dir(dir: &Path, use_cropped: bool) -> PathBuf {
    let cropped = dir.join("cropped");
    if use_cropped && cropped.is_dir() {
        debug!(dir = %cropped.display(), "Using cropped subfolder");
        cropped
    } else {
        dir.to_path_buf()
    }
}

/// Expand files, directories and glob patterns into an ordered, deduplicated list.
///
/// Directories contribute their supported images sorted by name. With
/// `use_cropped`, a directory's `cropped/` subfolder is used when present.
pub fn resolve_inputs(patterns: &[String], use_cropped: bool) -> Result<Vec<PathBuf>> {
    let mut result: Vec<PathBuf> = Vec::new();

    for pattern in patterns {
        let as_path = Path::new(pattern);

        if as_path.is_dir() {
            for file in list_images(&source_dir(as_path, use_cropped))? {
                push_unique(&mut result, file);
            }
            continue;
        }
        if as_path.exists() {
            push_unique(&mut result, as_path.to_path_buf());
            continue;
        }

        let entries =
            glob::glob(pattern).with_context(|| format!("Invalid glob pattern: {}", pattern))?;
        let mut matched = false;
        for entry in entries.flatten() {
            if entry.is_file() {
                push_unique(&mut result, entry);
                matched = true;
            }
        }
        if !matched {
            warn!(pattern = %pattern, "Pattern matched no files");
        }
    }

    Ok(result)
}

fn push_unique(paths: &mut Vec<PathBuf>, path: PathBuf) {
    if !paths.contains(&path) {
        paths.push(path);
    }
}

/// Folder that default output directories are created in.
///
/// A directory input is the folder itself; otherwise the parent of the
/// first resolved file.
pub fn base_folder(patterns: &[String], files: &[PathBuf]) -> PathBuf {
    if let Some(dir) = patterns.first().map(Path::new).filter(|p| p.is_dir()) {
        return dir.to_path_buf();
    }
    files
        .first()
        .and_then(|f| f.parent())
        .filter(|p| !p.as_os_str().is_empty())
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."))
}
