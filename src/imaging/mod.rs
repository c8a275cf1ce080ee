//! Image processing: pure Rust, no system libraries.
//!
//! | Operation | Crate / function |
//! |---|---|
//! | **EXIF** | `kamadak-exif` (`exif::Reader`) |
//! | **Rotate** | `image::DynamicImage::rotate90/180/270` |
//! | **Canvas + logo** | `image::imageops::overlay`, Lanczos3 resize |
//! | **Text** | `imageproc::drawing::draw_text_mut` with `ab_glyph` faces |
//!
//! The module is split into:
//! - **Calculations**: Pure functions for band geometry (unit testable)
//! - **Parameters**: Data structures describing what to draw
//! - **Profile**: Named layout constants and color tables
//! - **Backend**: [`FontProvider`] / [`IconProvider`] traits + errors
//! - **Assets**: File-backed providers
//! - **Operations**: Planning and composition, combining all of the above

pub mod assets;
pub mod backend;
mod calculations;
pub mod exif_reader;
pub mod operations;
mod params;
pub mod profile;
mod render;

pub use assets::{FileFontProvider, FileIconProvider, StaticIcon};
pub use backend::{AssetError, ComposeError, FontError, FontProvider, IconProvider};
pub use calculations::FrameGeometry;
pub use operations::{ComposedImage, compose, geometry_for, plan_frame, rotate};
pub use params::{Anchor, FontWeight, FramePlan, LogoPlacement, Quality, Ratio, TextRole, TextRun};
pub use profile::{Profile, ProfileKind};
