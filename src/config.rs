//! Configuration for asset locations and the layout knobs of the composer.
//!
//! Every field has a default, so an empty (or missing) TOML file yields a usable
//! configuration:
//!
//! ```toml
//! [assets]
//! templates_path = "./templates"
//! fonts_path = "./templates/fonts"
//!
//! [assets.backgrounds]
//! detail = "artist-page-bg.png"
//!
//! [layout]
//! round_count = 3
//! ```

use crate::assets::{Background, FontFace};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("toml error: {0}")]
    Toml(#[from] toml::de::Error),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaperworkConfig {
    pub assets: AssetConfig,
    pub layout: LayoutConfig,
}

impl PaperworkConfig {
    /// Parse a configuration from TOML text
    pub fn from_toml(text: &str) -> Result<PaperworkConfig, ConfigError> {
        Ok(toml::from_str(text)?)
    }

    /// Load a configuration file. A file that doesn't exist yields the defaults.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<PaperworkConfig, ConfigError> {
        use std::io::ErrorKind;

        let content = match std::fs::read_to_string(path.as_ref()) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                log::debug!(
                    "config file {} not found, using defaults",
                    path.as_ref().display()
                );
                return Ok(PaperworkConfig::default());
            }
            Err(e) => return Err(e.into()),
        };

        PaperworkConfig::from_toml(&content)
    }
}

/// Where the fonts and page backgrounds live
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetConfig {
    pub templates_path: PathBuf,
    /// Defaults to `<templates_path>/fonts`
    pub fonts_path: Option<PathBuf>,
    /// Defaults to `<templates_path>/backgrounds`
    pub backgrounds_path: Option<PathBuf>,
    pub fonts: FontFiles,
    pub backgrounds: BackgroundFiles,
}

impl Default for AssetConfig {
    fn default() -> Self {
        AssetConfig {
            templates_path: PathBuf::from("./templates"),
            fonts_path: None,
            backgrounds_path: None,
            fonts: FontFiles::default(),
            backgrounds: BackgroundFiles::default(),
        }
    }
}

impl AssetConfig {
    pub fn fonts_dir(&self) -> PathBuf {
        self.fonts_path
            .clone()
            .unwrap_or_else(|| self.templates_path.join("fonts"))
    }

    pub fn backgrounds_dir(&self) -> PathBuf {
        self.backgrounds_path
            .clone()
            .unwrap_or_else(|| self.templates_path.join("backgrounds"))
    }

    pub fn font_path(&self, face: FontFace) -> PathBuf {
        let file = match face {
            FontFace::Medium => &self.fonts.medium,
            FontFace::Bold => &self.fonts.bold,
            FontFace::Semibold => &self.fonts.semibold,
        };
        self.fonts_dir().join(file)
    }

    pub fn background_path(&self, background: Background) -> PathBuf {
        let file = match background {
            Background::Roster => &self.backgrounds.roster,
            Background::Auction => &self.backgrounds.auction,
            Background::BioSummary => &self.backgrounds.bio_summary,
            Background::Detail => &self.backgrounds.detail,
        };
        self.backgrounds_dir().join(file)
    }
}

/// File names of the three font faces, relative to the fonts directory
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FontFiles {
    pub medium: String,
    pub bold: String,
    pub semibold: String,
}

impl Default for FontFiles {
    fn default() -> Self {
        FontFiles {
            medium: "Acumin Pro SemiCond Medium.ttf".to_string(),
            bold: "Acumin Pro Cond Bold.ttf".to_string(),
            semibold: "Acumin Pro SemiCond Semibold.ttf".to_string(),
        }
    }
}

/// File names of the page backgrounds, relative to the backgrounds directory
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BackgroundFiles {
    pub roster: String,
    pub auction: String,
    pub bio_summary: String,
    pub detail: String,
}

impl Default for BackgroundFiles {
    fn default() -> Self {
        BackgroundFiles {
            roster: "artist-list-bg.png".to_string(),
            auction: "auction-info-bg.png".to_string(),
            bio_summary: "bio-summary-bg.png".to_string(),
            detail: "artist-page-bg.png".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Rounds `1..=round_count` each get a bio summary
    pub round_count: u32,
    /// Past events listed on a detail page before summarizing the rest
    pub history_cap: usize,
    /// Target width of the rendered QR code, in pixels
    pub qr_pixels: u32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        LayoutConfig {
            round_count: 2,
            history_cap: 20,
            qr_pixels: 256,
        }
    }
}
