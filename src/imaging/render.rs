//! Pixel work: paints a [`FramePlan`] onto a fresh canvas.
//!
//! | Step | Crate / function |
//! |---|---|
//! | White canvas | `image::RgbaImage::from_pixel` |
//! | Source + logo | `image::imageops::overlay` (alpha composited) |
//! | Logo scaling | `image::imageops::resize` with `Lanczos3` |
//! | Text | `imageproc::drawing::draw_text_mut` over `ab_glyph` faces |

use super::backend::Typefaces;
use super::params::{Anchor, FramePlan, LogoPlacement, TextRun};
use ab_glyph::{Font, FontArc, PxScale, ScaleFont};
use image::imageops::{self, FilterType};
use image::{DynamicImage, Rgba, RgbaImage};
use imageproc::drawing::{draw_text_mut, text_size};

pub const BACKGROUND: Rgba<u8> = Rgba([0xFF, 0xFF, 0xFF, 0xFF]);

/// Allocate the canvas, draw the source at the origin, then the logo and
/// every text run of the plan.
pub fn paint(
    source: &RgbaImage,
    plan: &FramePlan,
    faces: &Typefaces,
    logo: Option<&DynamicImage>,
) -> RgbaImage {
    let (width, height) = plan.geometry.canvas_size();
    let mut canvas = RgbaImage::from_pixel(width, height, BACKGROUND);
    imageops::overlay(&mut canvas, source, 0, 0);

    if let Some(icon) = logo {
        draw_logo(&mut canvas, icon, plan.logo);
    }

    for run in &plan.runs {
        draw_run(&mut canvas, run, faces.get(run.weight));
    }

    canvas
}

/// Stretch the icon into its square and composite it.
fn draw_logo(canvas: &mut RgbaImage, icon: &DynamicImage, placement: LogoPlacement) {
    if placement.size == 0 {
        return;
    }
    let scaled = imageops::resize(
        &icon.to_rgba8(),
        placement.size,
        placement.size,
        FilterType::Lanczos3,
    );
    imageops::overlay(canvas, &scaled, placement.x, placement.y);
}

fn draw_run(canvas: &mut RgbaImage, run: &TextRun, font: &FontArc) {
    if run.text.is_empty() || run.size <= 0.0 {
        return;
    }
    let scale = em_scale(font, run.size);
    let ascent = font.as_scaled(scale).ascent();

    let left = match run.anchor {
        Anchor::Left => run.x,
        Anchor::Right => {
            let (w, _) = text_size(scale, font, &run.text);
            run.x - w as f32
        }
    };
    let top = run.baseline - ascent;

    draw_text_mut(
        canvas,
        run.color,
        left.round() as i32,
        top.round() as i32,
        scale,
        font,
        &run.text,
    );
}

/// Scale at which one em of the face is `size` pixels.
///
/// `PxScale` measures ascent-to-descent height; faces whose em box differs
/// from that height are corrected with `height / units_per_em`.
pub fn em_scale(font: &FontArc, size: f32) -> PxScale {
    match font.units_per_em() {
        Some(upem) if upem > 0.0 => PxScale::from(size * font.height_unscaled() / upem),
        _ => PxScale::from(size),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::imaging::calculations::FrameGeometry;
    use crate::imaging::params::{FontWeight, Ratio, TextRole};

    fn faces() -> Typefaces {
        Typefaces::builtin().unwrap()
    }

    fn plan(width: u32, height: u32) -> FramePlan {
        let geometry = FrameGeometry::new(
            width,
            height,
            Ratio::per_mille(125),
            Ratio::per_mille(35),
            Ratio::per_mille(550),
        );
        FramePlan {
            geometry,
            logo: LogoPlacement {
                x: geometry.logo_x as i64,
                y: geometry.logo_y as i64,
                size: geometry.logo_size,
            },
            runs: Vec::new(),
        }
    }

    #[test]
    fn band_is_white_and_source_at_origin() {
        let source = RgbaImage::from_pixel(80, 60, Rgba([10, 20, 30, 255]));
        let out = paint(&source, &plan(80, 60), &faces(), None);

        assert_eq!(out.dimensions(), (80, 70));
        assert_eq!(*out.get_pixel(0, 0), Rgba([10, 20, 30, 255]));
        assert_eq!(*out.get_pixel(79, 59), Rgba([10, 20, 30, 255]));
        assert_eq!(*out.get_pixel(0, 60), BACKGROUND);
        assert_eq!(*out.get_pixel(79, 69), BACKGROUND);
    }

    #[test]
    fn transparent_source_blends_over_white() {
        let source = RgbaImage::from_pixel(8, 8, Rgba([0, 0, 0, 0]));
        let out = paint(&source, &plan(8, 8), &faces(), None);
        assert_eq!(*out.get_pixel(4, 4), BACKGROUND);
    }

    #[test]
    fn logo_fills_its_square() {
        let source = RgbaImage::from_pixel(400, 300, Rgba([0, 0, 0, 255]));
        let p = plan(400, 300);
        // border 50, logo 27, padding 14, logo_y 300 + 11.5
        assert_eq!(p.logo, LogoPlacement { x: 14, y: 311, size: 27 });

        let red = Rgba([255, 0, 0, 255]);
        let icon = DynamicImage::ImageRgba8(RgbaImage::from_pixel(64, 32, red));
        let out = paint(&source, &p, &faces(), Some(&icon));

        assert_eq!(*out.get_pixel(14 + 13, 311 + 13), red);
        assert_eq!(*out.get_pixel(14 + 26, 311 + 26), red);
        assert_eq!(*out.get_pixel(14 + 27, 311 + 13), BACKGROUND);
        assert_eq!(*out.get_pixel(13, 311 + 13), BACKGROUND);
    }

    // =========================================================================
    // Text placement with the built-in face
    // =========================================================================

    fn run(text: &str, anchor: Anchor, x: f32, baseline: f32, size: f32) -> TextRun {
        TextRun {
            role: TextRole::Params,
            text: text.into(),
            anchor,
            x,
            baseline,
            size,
            weight: FontWeight::Regular,
            color: Rgba([0, 0, 0, 0xFF]),
        }
    }

    /// Dark pixels in the band of a 600x400 source.
    fn band_ink(out: &RgbaImage) -> Vec<(u32, u32)> {
        out.enumerate_pixels()
            .filter(|(_, y, px)| *y >= 400 && px[0] < 128)
            .map(|(x, y, _)| (x, y))
            .collect()
    }

    #[test]
    fn right_anchored_run_ends_at_its_x() {
        let source = RgbaImage::from_pixel(600, 400, BACKGROUND);
        let mut p = plan(600, 400);
        p.runs.push(run("ISO 250", Anchor::Right, 579.0, 440.0, 16.0));
        let out = paint(&source, &p, &faces(), None);

        let ink = band_ink(&out);
        assert!(!ink.is_empty());
        let right = ink.iter().map(|&(x, _)| x).max().unwrap();
        let left = ink.iter().map(|&(x, _)| x).min().unwrap();
        assert!((573..=580).contains(&right), "rightmost ink at {right}");
        assert!(left < 540, "run is too narrow, starts at {left}");
    }

    #[test]
    fn run_sits_on_its_baseline_at_em_size() {
        let source = RgbaImage::from_pixel(600, 400, BACKGROUND);
        let mut p = plan(600, 400);
        p.runs.push(run("LEICA", Anchor::Left, 40.0, 440.0, 20.0));
        let out = paint(&source, &p, &faces(), None);

        let ink = band_ink(&out);
        let top = ink.iter().map(|&(_, y)| y).min().unwrap();
        let bottom = ink.iter().map(|&(_, y)| y).max().unwrap();
        let left = ink.iter().map(|&(x, _)| x).min().unwrap();
        // flat-bottomed capitals end on the baseline; cap height is 0.73 em
        assert!((437..=440).contains(&bottom), "lowest ink at {bottom}");
        assert!((423..=428).contains(&top), "highest ink at {top}");
        assert!((40..=43).contains(&left), "leftmost ink at {left}");
    }

    #[test]
    fn empty_runs_draw_nothing() {
        let source = RgbaImage::from_pixel(600, 400, BACKGROUND);
        let mut p = plan(600, 400);
        p.runs.push(run("", Anchor::Left, 40.0, 440.0, 20.0));
        p.runs.push(run("LEICA", Anchor::Left, 40.0, 440.0, 0.0));
        let out = paint(&source, &p, &faces(), None);
        assert!(band_ink(&out).is_empty());
    }
}
