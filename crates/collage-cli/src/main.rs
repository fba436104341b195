//! collage - batch crop and stitch for image folders
//!
//! Headless host for the collage engine: crops whole folders by fixed
//! margins, stitches images into a grid or strip, and converts a selection
//! dragged on a preview viewport into margins.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;
mod settings;

use settings::Settings;

#[derive(Parser)]
#[command(name = "collage")]
#[command(author, version, about = "Batch crop and stitch images")]
#[command(long_about = "
Crop image folders by per-edge margins and stitch images into a grid,
a horizontal strip or a vertical strip.

Examples:
  collage crop shots/ --left 20 --right 20          # writes shots/cropped/
  collage stitch shots/ --use-cropped --cols 4       # writes shots/stitched/stitched.jpg
  collage stitch a.jpg b.jpg --mode horizontal -o strip.png
  collage select photo.jpg --viewport 800x600 --from 50,125 --to 750,475
  collage --config collage.yaml crop 'shots/*.jpg'
")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output (debug logging)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// YAML settings file with `crop`, `stitch` and `quality` sections
    #[arg(short, long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// JPEG quality for written files (1-100)
    #[arg(short, long, global = true, value_name = "1-100")]
    quality: Option<u8>,
}

#[derive(Subcommand)]
enum Commands {
    /// Crop every input by the same margins
    Crop(CropArgs),

    /// Stitch inputs into one image
    #[command(visible_alias = "s")]
    Stitch(StitchArgs),

    /// Turn a rectangle dragged on a preview viewport into margins
    Select(SelectArgs),
}

/// Per-edge margin flags; unset edges fall back to the settings file.
#[derive(Args, Default)]
struct MarginArgs {
    /// Pixels to remove from the left edge
    #[arg(long)]
    left: Option<u32>,

    /// Pixels to remove from the top edge
    #[arg(long)]
    top: Option<u32>,

    /// Pixels to remove from the right edge
    #[arg(long)]
    right: Option<u32>,

    /// Pixels to remove from the bottom edge
    #[arg(long)]
    bottom: Option<u32>,
}

#[derive(Args)]
struct CropArgs {
    /// Input files, directories or glob patterns
    #[arg(required = true)]
    inputs: Vec<String>,

    #[command(flatten)]
    margins: MarginArgs,

    /// Output directory (default: <folder>/cropped)
    #[arg(long, value_name = "DIR")]
    out_dir: Option<PathBuf>,
}

#[derive(Args)]
struct StitchArgs {
    /// Input files, directories or glob patterns (stitched in this order)
    #[arg(required = true)]
    inputs: Vec<String>,

    /// Layout: grid, horizontal (h) or vertical (v)
    #[arg(short, long)]
    mode: Option<collage_core::StitchMode>,

    /// Gap between images in pixels
    #[arg(long)]
    spacing: Option<u32>,

    /// Gap colour as #RRGGBB
    #[arg(long)]
    background: Option<collage_core::Color>,

    /// Grid rows (0 = infer)
    #[arg(long)]
    rows: Option<u32>,

    /// Grid columns (0 = infer)
    #[arg(long)]
    cols: Option<u32>,

    /// For directory inputs, prefer their `cropped/` subfolder
    #[arg(long)]
    use_cropped: bool,

    /// Output file; format follows the extension (default: <folder>/stitched/stitched.jpg)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,
}

#[derive(Args)]
struct SelectArgs {
    /// Image the selection was drawn on
    image: PathBuf,

    /// Viewport size the image was previewed in
    #[arg(long, value_name = "WxH", value_parser = commands::select::parse_size)]
    viewport: (u32, u32),

    /// Drag start point in viewport pixels
    #[arg(long, value_name = "X,Y", value_parser = commands::select::parse_point)]
    from: (f64, f64),

    /// Drag end point in viewport pixels
    #[arg(long, value_name = "X,Y", value_parser = commands::select::parse_point)]
    to: (f64, f64),

    /// Also crop the image with the resulting margins
    #[arg(long)]
    apply: bool,

    /// Output file for --apply (default: <folder>/cropped/<name>)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = Settings::load(cli.config.as_deref()).and_then(|mut settings| {
        if let Some(quality) = cli.quality {
            settings.quality = quality;
        }
        match cli.command {
            Commands::Crop(args) => commands::crop::run(args, &settings),
            Commands::Stitch(args) => commands::stitch::run(args, &settings),
            Commands::Select(args) => commands::select::run(args, &settings),
        }
    });

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
