//! Shared value types passed between the extractor, the composer and the
//! controller.

use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Opaque reference to a decodable source image.
///
/// The handle is owned by the caller. The pipeline reads it once per
/// operation and never keeps the bytes past that operation.
#[derive(Debug, Clone)]
pub struct ImageHandle {
    source: Source,
}

#[derive(Debug, Clone)]
enum Source {
    Path(PathBuf),
    Memory(Arc<[u8]>),
}

impl ImageHandle {
    pub fn from_path(path: impl Into<PathBuf>) -> Self {
        Self {
            source: Source::Path(path.into()),
        }
    }

    pub fn from_bytes(bytes: impl Into<Arc<[u8]>>) -> Self {
        Self {
            source: Source::Memory(bytes.into()),
        }
    }

    /// Path of the source file, if the handle refers to one.
    pub fn path(&self) -> Option<&Path> {
        match &self.source {
            Source::Path(p) => Some(p),
            Source::Memory(_) => None,
        }
    }

    /// Read the full encoded image (pixel data plus metadata block).
    pub fn read_bytes(&self) -> io::Result<Arc<[u8]>> {
        match &self.source {
            Source::Path(p) => Ok(std::fs::read(p)?.into()),
            Source::Memory(bytes) => Ok(Arc::clone(bytes)),
        }
    }

    /// Short human-readable label for log lines.
    pub fn describe(&self) -> String {
        match &self.source {
            Source::Path(p) => p.display().to_string(),
            Source::Memory(bytes) => format!("<{} bytes in memory>", bytes.len()),
        }
    }
}

/// The strings actually burned into the border band.
///
/// Prefilled from EXIF when an image is picked, then edited freely by the
/// user. No validation: callers keep the text short enough to fit, since
/// every run is drawn on a single line without wrapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatermarkText {
    pub device: String,
    /// Empty (or blank) means no lens line.
    pub lens: String,
    pub params: String,
    pub date: String,
}

impl WatermarkText {
    /// The lens line renders iff the lens text is non-blank after trimming.
    pub fn has_lens(&self) -> bool {
        !self.lens.trim().is_empty()
    }
}

impl Default for WatermarkText {
    fn default() -> Self {
        Self::from(&crate::metadata::ExifFields::default())
    }
}
