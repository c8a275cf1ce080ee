//! Camera metadata extraction and normalization.
//!
//! Turns the raw EXIF attribute strings of a picked photo into the
//! fully-populated [`ExifFields`] tuple, and from there into the editable
//! [`WatermarkText`] prefill.
//!
//! ## Fallback policy
//!
//! Extraction is total. Every field has a fixed default and a missing or
//! malformed tag only replaces that one field:
//!
//! | Field | Source tag | Normalization | Default |
//! |---|---|---|---|
//! | model | `Model` | uppercased | `LEICA Q (TYP 116)` |
//! | lens | `LensModel` | as is | empty (no lens line) |
//! | focal length | `FocalLength` (`num/den`) | `floor(num/den)` | `28` |
//! | f-number | `FNumber` | as is | `1.7` |
//! | exposure | `ExposureTime` (decimal) | `1/round(1/v)` when `0 < v < 1` | `1/1000` |
//! | ISO | `PhotographicSensitivity` | as is | `250` |
//! | date | `DateTimeOriginal` | `MMM d, yyyy 'at' HH:mm` | `Feb 23, 2025 at 17:50` |
//!
//! When the metadata block itself cannot be read, the whole default tuple is
//! returned instead.
//!
//! ## Parameter line
//!
//! The formatted sub-fields are joined with three spaces between groups:
//!
//! ```text
//! 28mm   F 1.7   S 1/1000   ISO 250
//! ```
//!
//! The spacing is a presentation contract and must not drift.

use crate::imaging::exif_reader::{RawExif, read_raw_exif};
use crate::types::{ImageHandle, WatermarkText};
use chrono::NaiveDateTime;

pub const DEFAULT_MODEL: &str = "LEICA Q (TYP 116)";
pub const DEFAULT_FOCAL_LENGTH_MM: u32 = 28;
pub const DEFAULT_F_NUMBER: &str = "1.7";
pub const DEFAULT_EXPOSURE: &str = "1/1000";
pub const DEFAULT_ISO: &str = "250";
pub const DEFAULT_CAPTURED_AT: &str = "Feb 23, 2025 at 17:50";

const EXIF_DATE_FORMAT: &str = "%Y:%m:%d %H:%M:%S";
const DISPLAY_DATE_FORMAT: &str = "%b %-d, %Y at %H:%M";

/// Normalized camera metadata. Always fully populated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExifFields {
    pub model: String,
    /// Empty means absent.
    pub lens_model: String,
    pub focal_length_mm: u32,
    pub f_number: String,
    pub exposure: String,
    pub iso: String,
    pub captured_at: String,
}

impl Default for ExifFields {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            lens_model: String::new(),
            focal_length_mm: DEFAULT_FOCAL_LENGTH_MM,
            f_number: DEFAULT_F_NUMBER.to_string(),
            exposure: DEFAULT_EXPOSURE.to_string(),
            iso: DEFAULT_ISO.to_string(),
            captured_at: DEFAULT_CAPTURED_AT.to_string(),
        }
    }
}

impl ExifFields {
    /// Apply the per-field fallback policy to raw attribute strings.
    pub fn from_raw(raw: &RawExif) -> Self {
        let model = non_blank(raw.model.as_deref())
            .map(str::to_uppercase)
            .unwrap_or_else(|| DEFAULT_MODEL.to_string());

        let lens_model = raw.lens_model.clone().unwrap_or_default();

        let focal_length_mm = raw
            .focal_length
            .as_deref()
            .and_then(parse_focal_length)
            .unwrap_or_else(|| {
                log::debug!("focal length missing or malformed, using {DEFAULT_FOCAL_LENGTH_MM}");
                DEFAULT_FOCAL_LENGTH_MM
            });

        let f_number = non_blank(raw.f_number.as_deref())
            .unwrap_or(DEFAULT_F_NUMBER)
            .to_string();

        let exposure = format_exposure(raw.exposure_time.as_deref());

        let iso = non_blank(raw.iso.as_deref())
            .unwrap_or(DEFAULT_ISO)
            .to_string();

        let captured_at = raw
            .date_time_original
            .as_deref()
            .and_then(format_capture_date)
            .unwrap_or_else(|| DEFAULT_CAPTURED_AT.to_string());

        Self {
            model,
            lens_model,
            focal_length_mm,
            f_number,
            exposure,
            iso,
            captured_at,
        }
    }

    /// The display parameter line burned into the right-hand block.
    pub fn params_text(&self) -> String {
        format!(
            "{}mm   F {}   S {}   ISO {}",
            self.focal_length_mm, self.f_number, self.exposure, self.iso
        )
    }
}

impl From<&ExifFields> for WatermarkText {
    fn from(fields: &ExifFields) -> Self {
        Self {
            device: fields.model.clone(),
            lens: fields.lens_model.clone(),
            params: fields.params_text(),
            date: fields.captured_at.clone(),
        }
    }
}

/// Extract normalized metadata from an image. Never fails.
///
/// An unreadable handle or a missing/corrupt EXIF block yields
/// [`ExifFields::default`].
pub fn extract(image: &ImageHandle) -> ExifFields {
    let bytes = match image.read_bytes() {
        Ok(b) => b,
        Err(e) => {
            log::debug!("cannot read {} for EXIF: {e}", image.describe());
            return ExifFields::default();
        }
    };

    match read_raw_exif(&bytes) {
        Some(raw) => ExifFields::from_raw(&raw),
        None => {
            log::debug!("no EXIF block in {}, using defaults", image.describe());
            ExifFields::default()
        }
    }
}

/// `floor(num/den)` for a rational `"num/den"` tag.
///
/// Returns `None` unless the value splits into exactly two numeric parts
/// with a positive denominator.
pub fn parse_focal_length(raw: &str) -> Option<u32> {
    let (num, den) = split_rational(raw)?;
    if den <= 0.0 || num < 0.0 {
        return None;
    }
    let mm = (num / den).floor();
    mm.is_finite().then_some(mm as u32)
}

/// Format an exposure time for display.
///
/// Decimal values below one second become a reciprocal (`0.004` → `1/250`),
/// longer exposures pass through as written. Absent, unparsable or
/// non-positive input yields the default.
pub fn format_exposure(raw: Option<&str>) -> String {
    let Some(raw) = non_blank(raw) else {
        return DEFAULT_EXPOSURE.to_string();
    };

    let value = raw.parse::<f64>().ok().or_else(|| {
        let (num, den) = split_rational(raw)?;
        (den != 0.0).then(|| num / den)
    });

    match value {
        Some(v) if v.is_finite() && v > 0.0 && v < 1.0 => {
            format!("1/{}", (1.0 / v).round() as u64)
        }
        Some(v) if v.is_finite() && v >= 1.0 => raw.to_string(),
        _ => {
            log::debug!("unusable exposure time {raw:?}, using {DEFAULT_EXPOSURE}");
            DEFAULT_EXPOSURE.to_string()
        }
    }
}

/// Reformat an EXIF timestamp (`yyyy:MM:dd HH:mm:ss`) for display.
pub fn format_capture_date(raw: &str) -> Option<String> {
    NaiveDateTime::parse_from_str(raw.trim(), EXIF_DATE_FORMAT)
        .ok()
        .map(|dt| dt.format(DISPLAY_DATE_FORMAT).to_string())
}

fn split_rational(raw: &str) -> Option<(f64, f64)> {
    let parts: Vec<&str> = raw.trim().split('/').collect();
    if parts.len() != 2 {
        return None;
    }
    let num = parts[0].trim().parse::<f64>().ok()?;
    let den = parts[1].trim().parse::<f64>().ok()?;
    Some((num, den))
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|s| !s.is_empty())
}
