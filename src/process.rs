//! The generate pipeline.
//!
//! One call of [`Pipeline::process_and_save`] runs every stage for one image:
//!
//! ```text
//! ImageHandle ──read──▶ bytes ──decode──▶ DynamicImage
//!                        │
//!                        └──EXIF orientation──▶ resolve(orientation, user delta)
//!                                                   │
//!                  rotate ◀─────────────────────────┘
//!                     │
//!                  compose (geometry → plan → paint)
//!                     │
//!                  ImageSink::store ──▶ PathBuf
//! ```
//!
//! The pipeline is synchronous and holds no per-call state, so one instance
//! can be shared behind an `Arc` and run on a blocking worker. Decoded and
//! composed rasters are owned by the call and dropped when it returns,
//! whether it succeeds or not.

use crate::config::FrameConfig;
use crate::imaging::exif_reader::read_orientation;
use crate::imaging::{
    ComposeError, FileFontProvider, FileIconProvider, FontProvider, IconProvider, Profile, compose,
};
use crate::rotation::{self, Rotation};
use crate::sink::{GallerySink, ImageSink, SinkError};
use crate::types::{ImageHandle, WatermarkText};
use std::path::PathBuf;
use std::sync::Arc;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to decode image: {0}")]
    Decode(#[from] image::ImageError),
    #[error("Composition failed: {0}")]
    Compose(#[from] ComposeError),
    #[error("Failed to store image: {0}")]
    Store(#[from] SinkError),
}

/// Everything a generate call needs besides its inputs.
pub struct Pipeline {
    profile: Profile,
    fonts: Arc<dyn FontProvider>,
    icon: Arc<dyn IconProvider>,
    sink: Arc<dyn ImageSink>,
    file_prefix: String,
}

impl Pipeline {
    pub fn new(
        profile: Profile,
        fonts: Arc<dyn FontProvider>,
        icon: Arc<dyn IconProvider>,
        sink: Arc<dyn ImageSink>,
        file_prefix: impl Into<String>,
    ) -> Self {
        Self {
            profile,
            fonts,
            icon,
            sink,
            file_prefix: file_prefix.into(),
        }
    }

    /// Build the file-backed pipeline described by a config.
    pub fn from_config(config: &FrameConfig) -> Self {
        let assets = &config.assets;
        let mut fonts = FileFontProvider::new(&assets.font_light, &assets.font_regular);
        if let Some(fallback) = &assets.fallback_font {
            fonts = fonts.with_fallback(fallback);
        }
        let sink = GallerySink::new(
            &config.output.pictures_dir,
            config.output.app_folder.as_str(),
            config.quality(),
        );

        Self::new(
            Profile::for_kind(config.profile).with_caption(config.caption.as_str()),
            Arc::new(fonts),
            Arc::new(FileIconProvider::new(&assets.logo)),
            Arc::new(sink),
            config.output.file_prefix.as_str(),
        )
    }

    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    /// Decode, orient, compose and store one image.
    ///
    /// The effective rotation is the EXIF orientation of `image` plus
    /// `user_delta`, both clockwise.
    pub fn process_and_save(
        &self,
        image: &ImageHandle,
        text: &WatermarkText,
        user_delta: Rotation,
    ) -> Result<PathBuf, PipelineError> {
        let bytes = image.read_bytes()?;
        let decoded = image::load_from_memory(&bytes)?;

        let orientation = read_orientation(&bytes);
        let rotation = rotation::resolve(orientation, user_delta);
        drop(bytes);
        log::debug!(
            "{}: {}x{}, orientation {orientation:?} + {}° → {}°",
            image.describe(),
            decoded.width(),
            decoded.height(),
            user_delta.degrees(),
            rotation.degrees()
        );

        let composed = compose(
            decoded,
            rotation,
            text,
            &self.profile,
            self.fonts.as_ref(),
            self.icon.as_ref(),
        )?;
        Ok(self.sink.store(composed, &self.file_prefix)?)
    }
}
