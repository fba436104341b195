//! Stitch command

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{bail, Context, Result};
use collage_core::{stitch, Placement, StitchConfig};
use tracing::{info, warn};

use super::{base_folder, load_image, resolve_inputs, save_image};
use crate::settings::Settings;
use crate::StitchArgs;

impl StitchArgs {
    /// Flags that were given replace the matching field of `base`.
    fn config_over(&self, base: &StitchConfig) -> StitchConfig {
        StitchConfig {
            mode: self.mode.unwrap_or(base.mode),
            spacing: self.spacing.unwrap_or(base.spacing),
            background: self.background.unwrap_or(base.background),
            rows: self.rows.unwrap_or(base.rows),
            cols: self.cols.unwrap_or(base.cols),
            filter: base.filter,
        }
    }
}

pub fn run(args: StitchArgs, settings: &Settings) -> Result<ExitCode> {
    let files = resolve_inputs(&args.inputs, args.use_cropped)?;
    if files.is_empty() {
        bail!("No input images found");
    }

    let mut images = Vec::with_capacity(files.len());
    for path in &files {
        match load_image(path) {
            Ok(image) => images.push(image),
            Err(e) => warn!("{:#}", e),
        }
    }
    if images.is_empty() {
        bail!("None of the {} input file(s) could be decoded", files.len());
    }

    let config = args.config_over(&settings.stitch);
    info!(images = images.len(), mode = ?config.mode, spacing = config.spacing, "Stitching");

    let stitched = stitch(&images, &config).context("Stitch failed")?;

    let output = args.output.clone().unwrap_or_else(|| default_output(&args.inputs, &files));
    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create output directory: {}", parent.display()))?;
    }
    save_image(&output, &stitched.image, settings.quality)?;

    println!(
        "Stitched {} image(s) into {}x{} -> {}",
        images.len() - stitched.placement.dropped(),
        stitched.image.width,
        stitched.image.height,
        output.display()
    );
    if let Placement::Truncated { dropped } = stitched.placement {
        println!(
            "warning: grid {}x{} is too small, {} image(s) left out",
            config.rows, config.cols, dropped
        );
    }

    Ok(ExitCode::SUCCESS)
}

fn default_output(inputs: &[String], files: &[PathBuf]) -> PathBuf {
    base_folder(inputs, files).join("stitched").join("stitched.jpg")
}
