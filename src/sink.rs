//! Persisting composed frames.
//!
//! [`GallerySink`] writes baseline JPEGs into a gallery-visible folder:
//!
//! ```text
//! <pictures_dir>/
//! └── LeicaMaker/
//!     ├── LeicaFOTOS_1740329412345.jpg
//!     └── LeicaFOTOS_1740329467890.jpg
//! ```
//!
//! The image is encoded fully in memory before the output file is created,
//! so an encode failure never leaves a file behind. Output files are opened
//! with `create_new`; two saves in the same millisecond get consecutive
//! timestamps instead of overwriting each other.

use crate::imaging::{ComposedImage, Quality};
use image::DynamicImage;
use image::codecs::jpeg::JpegEncoder;
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SinkError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("JPEG encoding failed: {0}")]
    Encode(#[from] image::ImageError),
    #[error("Cannot create output folder {path}: {source}")]
    CreateDestination { path: PathBuf, source: io::Error },
    #[error("Cannot open output file {path}: {source}")]
    OpenOutput { path: PathBuf, source: io::Error },
}

/// Destination for composed images.
pub trait ImageSink: Send + Sync {
    /// Persist the image. Returns where it was written.
    fn store(&self, image: ComposedImage, suggested_name: &str) -> Result<PathBuf, SinkError>;

    /// Boolean form of [`store`](Self::store). Failures are logged.
    fn store_ok(&self, image: ComposedImage, suggested_name: &str) -> bool {
        match self.store(image, suggested_name) {
            Ok(_) => true,
            Err(e) => {
                log::error!("failed to store {suggested_name}: {e}");
                false
            }
        }
    }
}

/// Writes JPEGs into `<pictures_dir>/<app_folder>/`.
#[derive(Debug, Clone)]
pub struct GallerySink {
    pictures_dir: PathBuf,
    app_folder: String,
    quality: Quality,
}

/// Attempts at finding a free name before giving up.
const MAX_NAME_ATTEMPTS: u32 = 1000;

impl GallerySink {
    pub fn new(
        pictures_dir: impl Into<PathBuf>,
        app_folder: impl Into<String>,
        quality: Quality,
    ) -> Self {
        Self {
            pictures_dir: pictures_dir.into(),
            app_folder: app_folder.into(),
            quality,
        }
    }

    /// Folder the images land in.
    pub fn destination(&self) -> PathBuf {
        self.pictures_dir.join(&self.app_folder)
    }
}

impl ImageSink for GallerySink {
    fn store(&self, image: ComposedImage, suggested_name: &str) -> Result<PathBuf, SinkError> {
        let bytes = encode_jpeg(image, self.quality)?;

        let dir = self.destination();
        fs::create_dir_all(&dir).map_err(|source| SinkError::CreateDestination {
            path: dir.clone(),
            source,
        })?;

        let path = write_unique(&dir, suggested_name, &bytes)?;
        log::info!("saved {} ({} bytes)", path.display(), bytes.len());
        Ok(path)
    }
}

/// Encode as baseline JPEG. Alpha is dropped; the canvas is opaque anyway.
pub fn encode_jpeg(image: ComposedImage, quality: Quality) -> Result<Vec<u8>, SinkError> {
    let rgb = DynamicImage::ImageRgba8(image.into_raster()).into_rgb8();
    let mut buf = Vec::new();
    let encoder = JpegEncoder::new_with_quality(&mut buf, quality.value() as u8);
    DynamicImage::ImageRgb8(rgb).write_with_encoder(encoder)?;
    Ok(buf)
}

/// `<name>_<epoch millis>.jpg`.
pub fn output_file_name(name: &str, millis: i64) -> String {
    format!("{name}_{millis}.jpg")
}

fn write_unique(dir: &Path, name: &str, bytes: &[u8]) -> Result<PathBuf, SinkError> {
    let base = chrono::Utc::now().timestamp_millis();

    for bump in 0..MAX_NAME_ATTEMPTS {
        let path = dir.join(output_file_name(name, base + i64::from(bump)));
        let mut file = match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(f) => f,
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists => continue,
            Err(source) => return Err(SinkError::OpenOutput { path, source }),
        };

        if let Err(e) = file.write_all(bytes).and_then(|()| file.sync_all()) {
            drop(file);
            if let Err(cleanup) = fs::remove_file(&path) {
                log::warn!("could not remove partial file {}: {cleanup}", path.display());
            }
            return Err(SinkError::Io(e));
        }
        return Ok(path);
    }

    Err(SinkError::OpenOutput {
        path: dir.join(output_file_name(name, base)),
        source: io::Error::new(io::ErrorKind::AlreadyExists, "no free file name"),
    })
}
