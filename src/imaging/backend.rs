//! Capability traits the composer depends on, and their error types.
//!
//! Fonts and the logo icon are injected rather than loaded by the composer:
//!
//! - [`FontProvider`] hands out typefaces by weight, plus an optional
//!   fallback face used when a weight cannot be loaded.
//! - [`BUILTIN_FONT`] is compiled in and ends every fallback chain, so text
//!   is always drawn.
//! - [`IconProvider`] hands out the logo as a decoded image.
//!
//! The production implementations are in [`assets`](super::assets). Tests
//! use the recording mocks in [`tests`].

use super::params::FontWeight;
use ab_glyph::FontArc;
use image::DynamicImage;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FontError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid font data: {0}")]
    Invalid(String),
    #[error("No {0:?} typeface configured")]
    Unavailable(FontWeight),
}

#[derive(Error, Debug)]
pub enum AssetError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to decode icon: {0}")]
    Decode(#[from] image::ImageError),
    #[error("No icon configured")]
    Missing,
}

#[derive(Error, Debug)]
pub enum ComposeError {
    #[error("Source image is empty ({width}x{height})")]
    EmptyImage { width: u32, height: u32 },
    #[error("Font error: {0}")]
    Font(#[from] FontError),
}

/// DejaVu Sans, the last resort for every weight.
pub const BUILTIN_FONT: &[u8] = include_bytes!("../../fonts/DejaVuSans.ttf");

/// Parse the compiled-in face.
pub fn builtin_typeface() -> Result<FontArc, FontError> {
    FontArc::try_from_slice(BUILTIN_FONT)
        .map_err(|e| FontError::Invalid(format!("built-in typeface: {e}")))
}

/// Source of typefaces for the band text.
pub trait FontProvider: Send + Sync {
    /// Load the typeface for a weight.
    fn load(&self, weight: FontWeight) -> Result<FontArc, FontError>;

    /// Face used when [`load`](Self::load) fails. `None` falls through to
    /// the built-in face.
    fn fallback(&self, _weight: FontWeight) -> Option<FontArc> {
        None
    }
}

/// Source of the logo drawn at the left of the band.
pub trait IconProvider: Send + Sync {
    fn icon(&self) -> Result<DynamicImage, AssetError>;
}

/// The two faces used by one composition, resolved once up front.
///
/// Light falls back to the default regular face, regular to the default
/// bold face, and both to [`BUILTIN_FONT`]. Provider failures are logged and
/// never abort composition.
#[derive(Clone)]
pub struct Typefaces {
    light: FontArc,
    regular: FontArc,
}

impl Typefaces {
    pub fn resolve(provider: &dyn FontProvider) -> Result<Self, FontError> {
        Ok(Self {
            light: load_or_fallback(provider, FontWeight::Light, FontWeight::Regular)?,
            regular: load_or_fallback(provider, FontWeight::Regular, FontWeight::Bold)?,
        })
    }

    /// Both weights drawn with the built-in face.
    pub fn builtin() -> Result<Self, FontError> {
        let face = builtin_typeface()?;
        Ok(Self {
            light: face.clone(),
            regular: face,
        })
    }

    pub fn get(&self, weight: FontWeight) -> &FontArc {
        match weight {
            FontWeight::Light => &self.light,
            FontWeight::Regular | FontWeight::Bold => &self.regular,
        }
    }
}

fn load_or_fallback(
    provider: &dyn FontProvider,
    weight: FontWeight,
    fallback: FontWeight,
) -> Result<FontArc, FontError> {
    match provider.load(weight) {
        Ok(font) => Ok(font),
        Err(e) => {
            log::warn!("{weight:?} typeface unavailable ({e}), using default {fallback:?}");
            match provider.fallback(fallback) {
                Some(font) => Ok(font),
                None => {
                    log::warn!("no default {fallback:?} typeface, using the built-in face");
                    builtin_typeface()
                }
            }
        }
    }
}
