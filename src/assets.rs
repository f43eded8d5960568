//! Loading of fonts and page backgrounds.
//!
//! The composer never touches the filesystem itself: it asks an [AssetProvider] for
//! each asset and degrades (built-in font, blank background) when one can't be had.

use crate::config::AssetConfig;
use std::collections::HashMap;
use std::fmt::Debug;
use std::sync::Arc;
use thiserror::Error;

#[derive(Error, Debug, Clone)]
pub enum AssetError {
    #[error("asset not found: {0}")]
    NotFound(String),

    #[error("failed to load asset '{path}': {message}")]
    LoadFailed { path: String, message: String },
}

/// Shared asset bytes
pub type AssetData = Arc<Vec<u8>>;

/// The font faces used on the paperwork
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum FontFace {
    Medium,
    Bold,
    Semibold,
}

/// The page backgrounds, one per page type
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum Background {
    Roster,
    Auction,
    BioSummary,
    Detail,
}

/// A source of font and background bytes
pub trait AssetProvider: Send + Sync + Debug {
    fn load_font(&self, face: FontFace) -> Result<AssetData, AssetError>;

    fn load_background(&self, background: Background) -> Result<AssetData, AssetError>;

    /// A human-readable name for this provider (for logging)
    fn name(&self) -> &'static str;
}

/// Reads assets from the directories named in an [AssetConfig]. Files are read on
/// every call.
#[derive(Debug, Clone)]
pub struct FilesystemAssets {
    config: AssetConfig,
}

impl FilesystemAssets {
    pub fn new(config: AssetConfig) -> Self {
        FilesystemAssets { config }
    }

    fn read(path: &std::path::Path) -> Result<AssetData, AssetError> {
        std::fs::read(path).map(Arc::new).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                AssetError::NotFound(path.display().to_string())
            } else {
                AssetError::LoadFailed {
                    path: path.display().to_string(),
                    message: e.to_string(),
                }
            }
        })
    }
}

impl AssetProvider for FilesystemAssets {
    fn load_font(&self, face: FontFace) -> Result<AssetData, AssetError> {
        Self::read(&self.config.font_path(face))
    }

    fn load_background(&self, background: Background) -> Result<AssetData, AssetError> {
        Self::read(&self.config.background_path(background))
    }

    fn name(&self) -> &'static str {
        "FilesystemAssets"
    }
}

/// Assets held in memory, for tests and embedding. Anything not added is reported
/// as not found.
#[derive(Debug, Clone, Default)]
pub struct InMemoryAssets {
    fonts: HashMap<FontFace, AssetData>,
    backgrounds: HashMap<Background, AssetData>,
}

impl InMemoryAssets {
    pub fn new() -> Self {
        InMemoryAssets::default()
    }

    pub fn with_font(mut self, face: FontFace, data: Vec<u8>) -> Self {
        self.fonts.insert(face, Arc::new(data));
        self
    }

    pub fn with_background(mut self, background: Background, data: Vec<u8>) -> Self {
        self.backgrounds.insert(background, Arc::new(data));
        self
    }
}

impl AssetProvider for InMemoryAssets {
    fn load_font(&self, face: FontFace) -> Result<AssetData, AssetError> {
        self.fonts
            .get(&face)
            .cloned()
            .ok_or_else(|| AssetError::NotFound(format!("{face:?} font")))
    }

    fn load_background(&self, background: Background) -> Result<AssetData, AssetError> {
        self.backgrounds
            .get(&background)
            .cloned()
            .ok_or_else(|| AssetError::NotFound(format!("{background:?} background")))
    }

    fn name(&self) -> &'static str {
        "InMemoryAssets"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn filesystem_assets_resolve_configured_names() {
        let dir = tempdir().unwrap();
        fs::create_dir_all(dir.path().join("fonts")).unwrap();
        fs::create_dir_all(dir.path().join("backgrounds")).unwrap();
        fs::write(dir.path().join("fonts/medium.ttf"), b"font").unwrap();
        fs::write(dir.path().join("backgrounds/artist-list-bg.png"), b"png").unwrap();

        let mut config = AssetConfig {
            templates_path: dir.path().to_path_buf(),
            ..Default::default()
        };
        config.fonts.medium = "medium.ttf".into();
        let assets = FilesystemAssets::new(config);

        assert_eq!(&*assets.load_font(FontFace::Medium).unwrap(), b"font");
        assert_eq!(
            &*assets.load_background(Background::Roster).unwrap(),
            b"png"
        );
        assert!(matches!(
            assets.load_font(FontFace::Bold),
            Err(AssetError::NotFound(_))
        ));
        assert!(matches!(
            assets.load_background(Background::Detail),
            Err(AssetError::NotFound(_))
        ));
    }

    #[test]
    fn unreadable_assets_are_load_failures() {
        let dir = tempdir().unwrap();
        // a directory where a file is expected
        fs::create_dir_all(dir.path().join("backgrounds/auction-info-bg.png")).unwrap();
        let assets = FilesystemAssets::new(AssetConfig {
            templates_path: dir.path().to_path_buf(),
            ..Default::default()
        });
        assert!(assets.load_background(Background::Auction).is_err());
    }

    #[test]
    fn in_memory_assets() {
        let assets = InMemoryAssets::new()
            .with_font(FontFace::Bold, vec![1, 2, 3])
            .with_background(Background::Detail, vec![4]);
        assert_eq!(&*assets.load_font(FontFace::Bold).unwrap(), &[1, 2, 3]);
        assert_eq!(&*assets.load_background(Background::Detail).unwrap(), &[4]);
        assert!(assets.load_font(FontFace::Medium).is_err());
        assert_eq!(assets.name(), "InMemoryAssets");
    }
}
