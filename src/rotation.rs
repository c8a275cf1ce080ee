//! Rotation reconciliation.
//!
//! The stored EXIF orientation and the user's "rotate" presses combine into
//! a single clockwise rotation that is applied to the decoded raster before
//! composition. Only axis-aligned quarter turns exist; mirrored EXIF
//! orientations (2, 4, 5, 7) and unknown codes count as no rotation.

use std::ops::Add;

/// A clockwise quarter-turn rotation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Rotation {
    #[default]
    Deg0,
    Deg90,
    Deg180,
    Deg270,
}

impl Rotation {
    /// Map an EXIF orientation code to degrees.
    ///
    /// `1` (normal) → 0, `6` (rotate 90) → 90, `3` (rotate 180) → 180,
    /// `8` (rotate 270) → 270, anything else → 0.
    pub fn from_exif_orientation(code: u32) -> Self {
        match code {
            6 => Self::Deg90,
            3 => Self::Deg180,
            8 => Self::Deg270,
            _ => Self::Deg0,
        }
    }

    /// Normalize any multiple of 90 degrees. Other values round down to the
    /// previous quarter turn.
    pub fn from_degrees(degrees: i64) -> Self {
        match degrees.rem_euclid(360) / 90 {
            1 => Self::Deg90,
            2 => Self::Deg180,
            3 => Self::Deg270,
            _ => Self::Deg0,
        }
    }

    pub fn degrees(self) -> u32 {
        match self {
            Self::Deg0 => 0,
            Self::Deg90 => 90,
            Self::Deg180 => 180,
            Self::Deg270 => 270,
        }
    }

    /// One more quarter turn clockwise (`+90 mod 360`).
    pub fn rotated_cw(self) -> Self {
        self + Self::Deg90
    }
}

impl Add for Rotation {
    type Output = Rotation;

    fn add(self, rhs: Rotation) -> Rotation {
        Rotation::from_degrees(i64::from(self.degrees() + rhs.degrees()))
    }
}

/// Effective rotation: `(exif_degrees + user_delta) mod 360`.
///
/// A missing orientation tag counts as normal.
pub fn resolve(exif_orientation: Option<u32>, user_delta: Rotation) -> Rotation {
    let exif = exif_orientation
        .map(Rotation::from_exif_orientation)
        .unwrap_or_default();
    exif + user_delta
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exif_codes_map_to_degrees() {
        assert_eq!(Rotation::from_exif_orientation(1), Rotation::Deg0);
        assert_eq!(Rotation::from_exif_orientation(6), Rotation::Deg90);
        assert_eq!(Rotation::from_exif_orientation(3), Rotation::Deg180);
        assert_eq!(Rotation::from_exif_orientation(8), Rotation::Deg270);
    }

    #[test]
    fn mirrored_and_unknown_codes_map_to_zero() {
        for code in [0, 2, 4, 5, 7, 9, 42, u32::MAX] {
            assert_eq!(Rotation::from_exif_orientation(code), Rotation::Deg0, "{code}");
        }
    }

    #[test]
    fn rotate_press_cycles() {
        let mut r = Rotation::Deg0;
        let seen: Vec<u32> = (0..5)
            .map(|_| {
                r = r.rotated_cw();
                r.degrees()
            })
            .collect();
        assert_eq!(seen, vec![90, 180, 270, 0, 90]);
    }

    #[test]
    fn resolve_after_n_presses() {
        for code in [1u32, 3, 6, 8] {
            let exif_deg = Rotation::from_exif_orientation(code).degrees();
            let mut delta = Rotation::Deg0;
            for n in 0..12u32 {
                let expected = (exif_deg + 90 * n) % 360;
                assert_eq!(resolve(Some(code), delta).degrees(), expected);
                delta = delta.rotated_cw();
            }
        }
    }

    #[test]
    fn rotate_90_plus_two_presses_is_270() {
        let delta = Rotation::Deg0.rotated_cw().rotated_cw();
        assert_eq!(resolve(Some(6), delta), Rotation::Deg270);
    }

    #[test]
    fn missing_orientation_is_normal() {
        assert_eq!(resolve(None, Rotation::Deg180), Rotation::Deg180);
    }

    #[test]
    fn addition_is_associative() {
        let all = [Rotation::Deg0, Rotation::Deg90, Rotation::Deg180, Rotation::Deg270];
        for a in all {
            for b in all {
                for c in all {
                    assert_eq!((a + b) + c, a + (b + c));
                }
            }
        }
    }

    #[test]
    fn degrees_normalize() {
        assert_eq!(Rotation::from_degrees(450), Rotation::Deg90);
        assert_eq!(Rotation::from_degrees(-90), Rotation::Deg270);
        assert_eq!(Rotation::from_degrees(360), Rotation::Deg0);
    }
}
