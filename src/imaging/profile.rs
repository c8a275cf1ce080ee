//! Presentation profiles.
//!
//! A profile is the named set of constants that governs the band: border
//! and padding ratios, the text layout policy, and the color table.
//!
//! | Profile | border `k` | padding `p` | Layout |
//! |---|---|---|---|
//! | two-line (canonical) | 0.125 | 0.035 | caption + model left, params / lens / date right |
//! | single-line | 0.12 | 0.04 | model left, params right, both centered in the band |

use super::params::Ratio;
use image::Rgba;
use serde::{Deserialize, Serialize};

pub const DEFAULT_CAPTION: &str = "CAPTURED WITH";

/// Which layout policy a profile uses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProfileKind {
    #[default]
    TwoLine,
    SingleLine,
}

/// Text colors by role.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    /// Small caption above the model ("CAPTURED WITH").
    pub caption: Rgba<u8>,
    /// Model name.
    pub primary: Rgba<u8>,
    /// Shooting parameters.
    pub params: Rgba<u8>,
    /// Lens and date lines.
    pub secondary: Rgba<u8>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Profile {
    pub kind: ProfileKind,
    pub border_ratio: Ratio,
    pub padding_ratio: Ratio,
    pub logo_ratio: Ratio,
    /// Gap between logo and left text block, as a fraction of padding.
    pub text_gap: f32,
    pub caption: String,
    pub palette: Palette,
}

/// Opaque color from a `0xRRGGBB` literal.
pub const fn rgb(hex: u32) -> Rgba<u8> {
    Rgba([(hex >> 16) as u8, (hex >> 8) as u8, hex as u8, 0xFF])
}

impl Profile {
    pub fn two_line() -> Self {
        Self {
            kind: ProfileKind::TwoLine,
            border_ratio: Ratio::per_mille(125),
            padding_ratio: Ratio::per_mille(35),
            logo_ratio: Ratio::per_mille(550),
            text_gap: 0.6,
            caption: DEFAULT_CAPTION.to_string(),
            palette: Palette {
                caption: rgb(0x999999),
                primary: rgb(0x111111),
                params: rgb(0x222222),
                secondary: rgb(0x888888),
            },
        }
    }

    pub fn single_line() -> Self {
        Self {
            kind: ProfileKind::SingleLine,
            border_ratio: Ratio::per_mille(120),
            padding_ratio: Ratio::per_mille(40),
            logo_ratio: Ratio::per_mille(550),
            text_gap: 0.5,
            caption: DEFAULT_CAPTION.to_string(),
            palette: Palette {
                caption: rgb(0x999999),
                primary: rgb(0x111111),
                params: rgb(0x646464),
                secondary: rgb(0x888888),
            },
        }
    }

    pub fn for_kind(kind: ProfileKind) -> Self {
        match kind {
            ProfileKind::TwoLine => Self::two_line(),
            ProfileKind::SingleLine => Self::single_line(),
        }
    }

    pub fn with_caption(mut self, caption: impl Into<String>) -> Self {
        self.caption = caption.into();
        self
    }
}

impl Default for Profile {
    fn default() -> Self {
        Self::two_line()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rgb_unpacks_channels() {
        assert_eq!(rgb(0x112233), Rgba([0x11, 0x22, 0x33, 0xFF]));
    }

    #[test]
    fn canonical_profile_is_two_line() {
        let p = Profile::default();
        assert_eq!(p.kind, ProfileKind::TwoLine);
        assert_eq!(p.border_ratio.as_f32(), 0.125);
        assert_eq!(p.caption, "CAPTURED WITH");
    }

    #[test]
    fn single_line_calibration() {
        let p = Profile::for_kind(ProfileKind::SingleLine);
        assert_eq!(p.border_ratio.floor_of(1000), 120);
        assert!((p.padding_ratio.of(1000.0) - 40.0).abs() < 1e-3);
    }
}
