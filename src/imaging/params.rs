//! Parameter types for frame composition.
//!
//! These structs describe *what* to draw, not *how* to draw it. They are the
//! interface between the planning step in [`operations`](super::operations)
//! (which decides where every element goes) and
//! [`render`](super::render) (which does the pixel work). Plans are plain
//! data, so layout can be asserted in tests without any font rendering.
//!
//! ## Types
//!
//! - [`Quality`]: Lossy encoding quality (1–100, default 95). Clamped on construction.
//! - [`Ratio`]: Exact per-mille ratio used for the geometry constants.
//! - [`FontWeight`] / [`Anchor`] / [`TextRole`]: How and why a run is drawn.
//! - [`TextRun`]: One single-line string with its anchor point, size and color.
//! - [`LogoPlacement`]: Square destination of the logo icon.
//! - [`FramePlan`]: Everything the renderer needs for one frame.

use super::calculations::FrameGeometry;
use image::Rgba;

/// Quality setting for lossy image encoding (1-100).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Quality(pub u32);

impl Quality {
    pub fn new(value: u32) -> Self {
        Self(value.clamp(1, 100))
    }

    pub fn value(self) -> u32 {
        self.0
    }
}

impl Default for Quality {
    fn default() -> Self {
        Self(95)
    }
}

/// A ratio stored in thousandths so that `floor(value × ratio)` is exact.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ratio(u32);

impl Ratio {
    pub const fn per_mille(n: u32) -> Self {
        Self(n)
    }

    pub fn as_f32(self) -> f32 {
        self.0 as f32 / 1000.0
    }

    /// `floor(value × ratio)` in integer arithmetic.
    pub fn floor_of(self, value: u32) -> u32 {
        (u64::from(value) * u64::from(self.0) / 1000) as u32
    }

    /// `value × ratio` in floating point.
    pub fn of(self, value: f32) -> f32 {
        value * self.as_f32()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FontWeight {
    Light,
    Regular,
    /// Only requested as the fallback for a missing regular face.
    Bold,
}

/// Which end of the run sits at `x`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Anchor {
    Left,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextRole {
    Caption,
    Device,
    Params,
    Lens,
    Date,
}

/// A single line of text to draw. `baseline` is the y of the text baseline,
/// `size` the em size in pixels.
#[derive(Debug, Clone, PartialEq)]
pub struct TextRun {
    pub role: TextRole,
    pub text: String,
    pub anchor: Anchor,
    pub x: f32,
    pub baseline: f32,
    pub size: f32,
    pub weight: FontWeight,
    pub color: Rgba<u8>,
}

/// Logo destination square, top-left corner in canvas pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogoPlacement {
    pub x: i64,
    pub y: i64,
    pub size: u32,
}

/// Complete layout of one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct FramePlan {
    pub geometry: FrameGeometry,
    pub logo: LogoPlacement,
    pub runs: Vec<TextRun>,
}

impl FramePlan {
    pub fn run(&self, role: TextRole) -> Option<&TextRun> {
        self.runs.iter().find(|r| r.role == role)
    }
}
