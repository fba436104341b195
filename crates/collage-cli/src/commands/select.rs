//! Select command: viewport drag to margins

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use collage_core::{begin_drag, crop, ViewportMapping};
use tracing::{debug, info};

use super::{load_image, output_path, save_image};
use crate::settings::Settings;
use crate::SelectArgs;

/// Parse a `WxH` size such as `800x600`.
pub fn parse_size(s: &str) -> Result<(u32, u32), String> {
    let (w, h) = s
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WxH, got '{}'", s))?;
    let w = w.trim().parse().map_err(|_| format!("invalid width in '{}'", s))?;
    let h = h.trim().parse().map_err(|_| format!("invalid height in '{}'", s))?;
    Ok((w, h))
}

/// Parse an `X,Y` point such as `12.5,40`.
pub fn parse_point(s: &str) -> Result<(f64, f64), String> {
    let (x, y) = s
        .split_once(',')
        .ok_or_else(|| format!("expected X,Y, got '{}'", s))?;
    let x = x.trim().parse().map_err(|_| format!("invalid x in '{}'", s))?;
    let y = y.trim().parse().map_err(|_| format!("invalid y in '{}'", s))?;
    Ok((x, y))
}

pub fn run(args: SelectArgs, settings: &Settings) -> Result<ExitCode> {
    let image = load_image(&args.image)?;
    let (vw, vh) = args.viewport;
    let mapping = ViewportMapping::new(image.width, image.height, vw, vh)
        .with_context(|| format!("Cannot map {} into a {}x{} viewport", args.image.display(), vw, vh))?;
    debug!(scale = mapping.scale, offset = ?mapping.offset, "Viewport mapping");

    let drag = begin_drag(args.from.0, args.from.1);
    let margins = drag.commit_drag(&mapping, args.to.0, args.to.1);

    println!(
        "left={} top={} right={} bottom={}",
        margins.left, margins.top, margins.right, margins.bottom
    );

    if args.apply {
        let cropped = crop(&image, margins).context("Selection is empty")?;
        let output = args.output.clone().unwrap_or_else(|| default_output(&args.image));
        if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create output directory: {}", parent.display())
            })?;
        }
        save_image(&output, &cropped, settings.quality)?;
        info!(output = %output.display(), "Wrote selection");
        println!("Cropped to {}x{} -> {}", cropped.width, cropped.height, output.display());
    }

    Ok(ExitCode::SUCCESS)
}

/// `<folder>/cropped/<name>` next to the source image.
fn default_output(image: &Path) -> PathBuf {
    let folder = image
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    output_path(&folder.join("cropped"), image)
}
