//! Crop command

use std::path::Path;
use std::process::ExitCode;

use anyhow::{bail, Context, Result};
use collage_core::{crop_batch, CropItem, Margins, RasterImage};
use tracing::{info, warn};

use super::{base_folder, load_image, output_path, resolve_inputs, save_image};
use crate::settings::Settings;
use crate::{CropArgs, MarginArgs};

impl MarginArgs {
    /// Flags that were given replace the matching edge of `base`.
    pub fn over(&self, base: Margins) -> Margins {
        Margins {
            left: self.left.unwrap_or(base.left),
            top: self.top.unwrap_or(base.top),
            right: self.right.unwrap_or(base.right),
            bottom: self.bottom.unwrap_or(base.bottom),
        }
    }
}

pub fn run(args: CropArgs, settings: &Settings) -> Result<ExitCode> {
    let files = resolve_inputs(&args.inputs, false)?;
    if files.is_empty() {
        bail!("No input images found");
    }

    let margins = args.margins.over(settings.crop);
    let out_dir = args
        .out_dir
        .clone()
        .unwrap_or_else(|| base_folder(&args.inputs, &files).join("cropped"));
    std::fs::create_dir_all(&out_dir)
        .with_context(|| format!("Failed to create output directory: {}", out_dir.display()))?;

    info!(files = files.len(), ?margins, out_dir = %out_dir.display(), "Cropping");

    let mut failed = 0usize;
    let mut sources: Vec<&Path> = Vec::with_capacity(files.len());
    let mut images: Vec<RasterImage> = Vec::with_capacity(files.len());
    for path in &files {
        match load_image(path) {
            Ok(image) => {
                sources.push(path.as_path());
                images.push(image);
            }
            Err(e) => {
                failed += 1;
                warn!("{:#}", e);
            }
        }
    }

    let report = crop_batch(&images, margins);
    let mut cropped = 0usize;
    for (source, item) in sources.iter().zip(&report.items) {
        match item {
            CropItem::Cropped(image) => {
                let output = output_path(&out_dir, source);
                match save_image(&output, image, settings.quality) {
                    Ok(()) => cropped += 1,
                    Err(e) => {
                        failed += 1;
                        warn!("{:#}", e);
                    }
                }
            }
            CropItem::Skipped(reason) => {
                warn!(file = %source.display(), "Skipped: {}", reason);
            }
        }
    }

    info!(cropped, skipped = report.skipped(), failed, "Crop finished");
    println!(
        "Cropped {} image(s) into {} ({} skipped, {} failed)",
        cropped,
        out_dir.display(),
        report.skipped(),
        failed
    );

    Ok(if cropped == 0 {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    })
}
