//! Pure geometry for the border band.
//!
//! Everything here depends only on the (rotated) source dimensions and the
//! profile ratios, so the same input always produces the same layout.

use super::params::Ratio;

/// Fixed placement of the band, padding and logo for one source size.
///
/// - `border_height = floor(W × k)`
/// - `padding = W × p`
/// - `logo_size = floor(border_height × 0.55)`
/// - logo at `x = padding`, vertically centered in the band
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameGeometry {
    /// Rotated source width (= canvas width).
    pub width: u32,
    /// Rotated source height (= top edge of the band).
    pub height: u32,
    pub border_height: u32,
    pub padding: f32,
    pub logo_size: u32,
    pub logo_x: f32,
    pub logo_y: f32,
}

impl FrameGeometry {
    pub fn new(width: u32, height: u32, border: Ratio, padding: Ratio, logo: Ratio) -> Self {
        let border_height = border.floor_of(width);
        let padding = padding.of(width as f32);
        let logo_size = logo.floor_of(border_height);
        let logo_y = height as f32 + border_height.saturating_sub(logo_size) as f32 / 2.0;

        Self {
            width,
            height,
            border_height,
            padding,
            logo_size,
            logo_x: padding,
            logo_y,
        }
    }

    /// `(W, H + border_height)`.
    pub fn canvas_size(&self) -> (u32, u32) {
        (self.width, self.height + self.border_height)
    }

    /// Absolute y of a point `fraction` of the way down the band.
    pub fn band_y(&self, fraction: f32) -> f32 {
        self.height as f32 + self.border_height as f32 * fraction
    }

    /// Vertical center of the band.
    pub fn band_center(&self) -> f32 {
        self.band_y(0.5)
    }

    /// Font size as a fraction of the band height.
    pub fn text_size(&self, fraction: f32) -> f32 {
        self.border_height as f32 * fraction
    }

    /// Left edge of the text block that follows the logo.
    pub fn text_start(&self, gap: f32) -> f32 {
        self.logo_x + self.logo_size as f32 + self.padding * gap
    }

    /// Right edge of right-anchored text.
    pub fn text_end(&self) -> f32 {
        self.width as f32 - self.padding
    }
}
