//! Frame composition.
//!
//! Combines the geometry from [`calculations`](super::calculations), the
//! profile constants and the injected asset providers:
//!
//! 1. rotate the decoded source by the effective rotation
//! 2. derive [`FrameGeometry`] from the rotated size
//! 3. [`plan_frame`]: place logo and text runs (pure)
//! 4. `render::paint`: draw onto a fresh `W × (H + border)` canvas
//!
//! ## Two-line layout (canonical)
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                        photo                             │
//! ├──────────────────────────────────────────────────────────┤
//! │ ▇▇  CAPTURED WITH            28mm   F 1.7   S 1/1000 ... │  0.35 / 0.42
//! │ ▇▇  LEICA Q (TYP 116)             SUMMILUX 1:1.7/28 ASPH.│  0.58 (lens only)
//! │                                    Feb 23, 2025 at 17:50 │  0.81 / 0.68
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! Caption at 0.40 and model at 0.68 of the band; right-hand offsets depend
//! on whether a lens line renders. All text is single-line with no wrapping.

use super::backend::{ComposeError, FontProvider, IconProvider, Typefaces};
use super::calculations::FrameGeometry;
use super::params::{Anchor, FontWeight, FramePlan, LogoPlacement, TextRole, TextRun};
use super::profile::{Profile, ProfileKind};
use super::render;
use crate::rotation::Rotation;
use crate::types::WatermarkText;
use image::{DynamicImage, RgbaImage};

/// A freshly composed raster of `W × (H + border_height)`.
///
/// Owned by one generate call and consumed by the sink.
#[derive(Debug, Clone)]
pub struct ComposedImage {
    raster: RgbaImage,
    border_height: u32,
}

impl ComposedImage {
    pub fn width(&self) -> u32 {
        self.raster.width()
    }

    pub fn height(&self) -> u32 {
        self.raster.height()
    }

    pub fn border_height(&self) -> u32 {
        self.border_height
    }

    pub fn raster(&self) -> &RgbaImage {
        &self.raster
    }

    pub fn into_raster(self) -> RgbaImage {
        self.raster
    }
}

/// Apply a clockwise quarter-turn rotation.
pub fn rotate(image: DynamicImage, rotation: Rotation) -> DynamicImage {
    match rotation {
        Rotation::Deg0 => image,
        Rotation::Deg90 => image.rotate90(),
        Rotation::Deg180 => image.rotate180(),
        Rotation::Deg270 => image.rotate270(),
    }
}

/// Geometry of a rotated source under a profile.
pub fn geometry_for(width: u32, height: u32, profile: &Profile) -> FrameGeometry {
    FrameGeometry::new(
        width,
        height,
        profile.border_ratio,
        profile.padding_ratio,
        profile.logo_ratio,
    )
}

/// Place the logo and every text run. Pure; no fonts needed.
pub fn plan_frame(geometry: FrameGeometry, profile: &Profile, text: &WatermarkText) -> FramePlan {
    let logo = LogoPlacement {
        x: geometry.logo_x as i64,
        y: geometry.logo_y as i64,
        size: geometry.logo_size,
    };

    let runs = match profile.kind {
        ProfileKind::TwoLine => two_line_runs(&geometry, profile, text),
        ProfileKind::SingleLine => single_line_runs(&geometry, profile, text),
    };

    FramePlan {
        geometry,
        logo,
        runs,
    }
}

fn two_line_runs(g: &FrameGeometry, profile: &Profile, text: &WatermarkText) -> Vec<TextRun> {
    let colors = &profile.palette;
    let left_x = g.text_start(profile.text_gap);
    let right_x = g.text_end();
    let has_lens = text.has_lens();

    let mut runs = vec![
        TextRun {
            role: TextRole::Caption,
            text: profile.caption.clone(),
            anchor: Anchor::Left,
            x: left_x,
            baseline: g.band_y(0.40),
            size: g.text_size(0.12),
            weight: FontWeight::Regular,
            color: colors.caption,
        },
        TextRun {
            role: TextRole::Device,
            text: text.device.clone(),
            anchor: Anchor::Left,
            x: left_x,
            baseline: g.band_y(0.68),
            size: g.text_size(0.22),
            weight: FontWeight::Regular,
            color: colors.primary,
        },
        TextRun {
            role: TextRole::Params,
            text: text.params.clone(),
            anchor: Anchor::Right,
            x: right_x,
            baseline: g.band_y(if has_lens { 0.35 } else { 0.42 }),
            size: g.text_size(0.17),
            weight: FontWeight::Regular,
            color: colors.params,
        },
    ];

    if has_lens {
        runs.push(TextRun {
            role: TextRole::Lens,
            text: text.lens.to_uppercase(),
            anchor: Anchor::Right,
            x: right_x,
            baseline: g.band_y(0.58),
            size: g.text_size(0.15),
            weight: FontWeight::Light,
            color: colors.secondary,
        });
    }

    runs.push(TextRun {
        role: TextRole::Date,
        text: text.date.clone(),
        anchor: Anchor::Right,
        x: right_x,
        baseline: g.band_y(if has_lens { 0.81 } else { 0.68 }),
        size: g.text_size(0.15),
        weight: FontWeight::Light,
        color: colors.secondary,
    });

    runs
}

fn single_line_runs(g: &FrameGeometry, profile: &Profile, text: &WatermarkText) -> Vec<TextRun> {
    let model_size = g.text_size(0.22);
    let params_size = g.text_size(0.18);

    vec![
        TextRun {
            role: TextRole::Device,
            text: text.device.clone(),
            anchor: Anchor::Left,
            x: g.text_start(profile.text_gap),
            baseline: g.band_center() + model_size / 3.0,
            size: model_size,
            weight: FontWeight::Regular,
            color: profile.palette.primary,
        },
        TextRun {
            role: TextRole::Params,
            text: text.params.clone(),
            anchor: Anchor::Right,
            x: g.text_end(),
            baseline: g.band_center() + params_size / 3.0,
            size: params_size,
            weight: FontWeight::Regular,
            color: profile.palette.params,
        },
    ]
}

/// Rotate the decoded source and compose the framed raster.
///
/// Font and logo failures never fail composition: missing faces fall back to
/// the built-in face, a missing logo leaves its square white.
pub fn compose(
    source: DynamicImage,
    rotation: Rotation,
    text: &WatermarkText,
    profile: &Profile,
    fonts: &dyn FontProvider,
    icons: &dyn IconProvider,
) -> Result<ComposedImage, ComposeError> {
    if source.width() == 0 || source.height() == 0 {
        return Err(ComposeError::EmptyImage {
            width: source.width(),
            height: source.height(),
        });
    }

    // The decoded and rotated rasters are dropped as soon as the RGBA copy exists.
    let rotated = rotate(source, rotation).into_rgba8();
    let geometry = geometry_for(rotated.width(), rotated.height(), profile);
    log::debug!(
        "composing {}x{} rotated {}°, border {} padding {:.1}",
        geometry.width,
        geometry.height,
        rotation.degrees(),
        geometry.border_height,
        geometry.padding
    );

    let plan = plan_frame(geometry, profile, text);
    let faces = Typefaces::resolve(fonts)?;
    let logo = match icons.icon() {
        Ok(icon) => Some(icon),
        Err(e) => {
            log::warn!("logo unavailable, drawing frame without it: {e}");
            None
        }
    };

    let raster = render::paint(&rotated, &plan, &faces, logo.as_ref());
    Ok(ComposedImage {
        raster,
        border_height: geometry.border_height,
    })
}
