//! File-backed font and icon providers.
//!
//! | Asset | Loader |
//! |---|---|
//! | Light / regular typeface (TTF, OTF) | `ab_glyph::FontArc::try_from_vec` |
//! | Fallback typeface | same, from an optional path |
//! | Logo (PNG, JPEG, WebP, TIFF) | `image::open` |

use super::backend::{AssetError, FontError, FontProvider, IconProvider};
use super::params::FontWeight;
use ab_glyph::FontArc;
use image::DynamicImage;
use std::path::{Path, PathBuf};

/// Loads typefaces from font files on disk.
#[derive(Debug, Clone)]
pub struct FileFontProvider {
    light: PathBuf,
    regular: PathBuf,
    fallback: Option<PathBuf>,
}

impl FileFontProvider {
    pub fn new(light: impl Into<PathBuf>, regular: impl Into<PathBuf>) -> Self {
        Self {
            light: light.into(),
            regular: regular.into(),
            fallback: None,
        }
    }

    /// Face used for every weight that fails to load.
    pub fn with_fallback(mut self, path: impl Into<PathBuf>) -> Self {
        self.fallback = Some(path.into());
        self
    }

    fn path_for(&self, weight: FontWeight) -> &Path {
        match weight {
            FontWeight::Light => &self.light,
            FontWeight::Regular | FontWeight::Bold => &self.regular,
        }
    }
}

/// Read and parse a font file.
pub fn load_font_file(path: &Path) -> Result<FontArc, FontError> {
    let data = std::fs::read(path)?;
    FontArc::try_from_vec(data)
        .map_err(|e| FontError::Invalid(format!("{}: {e}", path.display())))
}

impl FontProvider for FileFontProvider {
    fn load(&self, weight: FontWeight) -> Result<FontArc, FontError> {
        load_font_file(self.path_for(weight))
    }

    fn fallback(&self, _weight: FontWeight) -> Option<FontArc> {
        let path = self.fallback.as_deref()?;
        match load_font_file(path) {
            Ok(font) => Some(font),
            Err(e) => {
                log::warn!("fallback typeface failed to load: {e}");
                None
            }
        }
    }
}

/// Decodes the logo from an image file on each request.
#[derive(Debug, Clone)]
pub struct FileIconProvider {
    path: PathBuf,
}

impl FileIconProvider {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl IconProvider for FileIconProvider {
    fn icon(&self) -> Result<DynamicImage, AssetError> {
        if !self.path.exists() {
            return Err(AssetError::Io(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("logo not found at {}", self.path.display()),
            )));
        }
        Ok(image::open(&self.path)?)
    }
}

/// An already-decoded logo, or none at all.
#[derive(Debug, Clone, Default)]
pub struct StaticIcon(pub Option<DynamicImage>);

impl IconProvider for StaticIcon {
    fn icon(&self) -> Result<DynamicImage, AssetError> {
        self.0.clone().ok_or(AssetError::Missing)
    }
}
