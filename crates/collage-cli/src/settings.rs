//! Optional YAML settings file.
//!
//! ```yaml
//! quality: 90
//! crop:
//!   left: 20
//!   right: 20
//! stitch:
//!   mode: grid
//!   cols: 4
//!   background: "#202020"
//! ```
//!
//! Every section and field is optional; command-line flags win over file values.

use std::path::Path;

use anyhow::{Context, Result};
use collage_core::encode::DEFAULT_QUALITY;
use collage_core::{Margins, StitchConfig};
use serde::Deserialize;
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    pub crop: Margins,
    pub stitch: StitchConfig,
    pub quality: u8,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            crop: Margins::ZERO,
            stitch: StitchConfig::default(),
            quality: DEFAULT_QUALITY,
        }
    }
}

impl Settings {
    /// Load settings from `path`, or the defaults when no file is given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings: {}", path.display()))?;
        let settings = Self::parse(&text)
            .with_context(|| format!("Invalid settings file: {}", path.display()))?;
        debug!(path = %path.display(), ?settings, "Loaded settings");
        Ok(settings)
    }

    fn parse(text: &str) -> Result<Self> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(text)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use collage_core::{Color, StitchMode};

    #[test]
    fn test_defaults_without_file() {
        let settings = Settings::load(None).unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.quality, 95);
        assert_eq!(settings.stitch.cols, 3);
    }

    #[test]
    fn test_parse_partial_sections() {
        let settings = Settings::parse(
            "quality: 80\ncrop:\n  left: 5\n  bottom: 7\nstitch:\n  mode: vertical\n  background: \"#102030\"\n",
        )
        .unwrap();
        assert_eq!(settings.quality, 80);
        assert_eq!(settings.crop, Margins::new(5, 0, 0, 7));
        assert_eq!(settings.stitch.mode, StitchMode::Vertical);
        assert_eq!(settings.stitch.background, Color::new(0x10, 0x20, 0x30));
        assert_eq!(settings.stitch.spacing, 10);
    }

    #[test]
    fn test_parse_empty_file() {
        assert_eq!(Settings::parse("  \n").unwrap(), Settings::default());
    }

    #[test]
    fn test_parse_rejects_unknown_keys() {
        assert!(Settings::parse("qualty: 80\n").is_err());
    }

    #[test]
    fn test_parse_rejects_bad_colour() {
        assert!(Settings::parse("stitch:\n  background: blue\n").is_err());
    }

    #[test]
    fn test_load_missing_file() {
        let err = Settings::load(Some(Path::new("/no/such/collage.yaml"))).unwrap_err();
        assert!(err.to_string().contains("Failed to read settings"));
    }
}
