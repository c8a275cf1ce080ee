//! Raw EXIF attribute access on top of `kamadak-exif`.
//!
//! Values come back as plain attribute strings, the way camera apps expose
//! them: rationals that carry a ratio (focal length) as `"num/den"`,
//! rationals that carry a quantity (f-number, exposure time) as decimal
//! strings, integer tags as decimal integers, ASCII tags trimmed.
//! Interpretation of those strings lives in [`crate::metadata`].

use exif::{Exif, Field, In, Reader, Tag, Value};
use std::io::Cursor;

/// Attribute strings as stored in the image. `None` = tag absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawExif {
    pub model: Option<String>,
    pub lens_model: Option<String>,
    pub focal_length: Option<String>,
    pub f_number: Option<String>,
    pub iso: Option<String>,
    pub exposure_time: Option<String>,
    pub orientation: Option<u32>,
    pub date_time_original: Option<String>,
}

/// Parse the EXIF block of an encoded image (JPEG, TIFF, PNG, WebP).
///
/// Returns `None` when the container has no readable EXIF block.
pub fn read_raw_exif(bytes: &[u8]) -> Option<RawExif> {
    let exif = parse_container(bytes)?;

    Some(RawExif {
        model: ascii(&exif, Tag::Model),
        lens_model: ascii(&exif, Tag::LensModel),
        focal_length: field(&exif, Tag::FocalLength).and_then(ratio_string),
        f_number: field(&exif, Tag::FNumber).and_then(decimal_string),
        iso: field(&exif, Tag::PhotographicSensitivity)
            .and_then(|f| f.value.get_uint(0))
            .map(|v| v.to_string()),
        exposure_time: field(&exif, Tag::ExposureTime).and_then(decimal_string),
        orientation: field(&exif, Tag::Orientation).and_then(|f| f.value.get_uint(0)),
        date_time_original: ascii(&exif, Tag::DateTimeOriginal),
    })
}

/// Read only the orientation tag. `None` if unreadable or missing.
pub fn read_orientation(bytes: &[u8]) -> Option<u32> {
    let exif = parse_container(bytes)?;
    field(&exif, Tag::Orientation)?.value.get_uint(0)
}

fn parse_container(bytes: &[u8]) -> Option<Exif> {
    let mut cursor = Cursor::new(bytes);
    match Reader::new().read_from_container(&mut cursor) {
        Ok(exif) => Some(exif),
        Err(e) => {
            log::debug!("EXIF read failed: {e}");
            None
        }
    }
}

fn field(exif: &Exif, tag: Tag) -> Option<&Field> {
    exif.get_field(tag, In::PRIMARY)
}

fn ascii(exif: &Exif, tag: Tag) -> Option<String> {
    match &field(exif, tag)?.value {
        Value::Ascii(parts) => {
            let s = parts
                .iter()
                .map(|p| String::from_utf8_lossy(p))
                .collect::<Vec<_>>()
                .join(" ");
            let s = s.trim_matches(|c: char| c == '\0' || c.is_whitespace());
            (!s.is_empty()).then(|| s.to_string())
        }
        _ => None,
    }
}

/// `"num/den"` of the first rational component.
fn ratio_string(field: &Field) -> Option<String> {
    match &field.value {
        Value::Rational(v) => v.first().map(|r| format!("{}/{}", r.num, r.denom)),
        Value::SRational(v) => v.first().map(|r| format!("{}/{}", r.num, r.denom)),
        _ => None,
    }
}

/// Decimal rendering of the first rational component (`17/10` → `"1.7"`).
///
/// Whole values keep one decimal place (`2/1` → `"2.0"`).
fn decimal_string(field: &Field) -> Option<String> {
    let value = match &field.value {
        Value::Rational(v) => {
            let r = v.first()?;
            (r.denom != 0).then(|| r.num as f64 / r.denom as f64)?
        }
        Value::SRational(v) => {
            let r = v.first()?;
            (r.denom != 0).then(|| r.num as f64 / r.denom as f64)?
        }
        _ => return None,
    };
    if value.is_finite() && value.fract() == 0.0 {
        Some(format!("{value:.1}"))
    } else {
        Some(value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::{ExifTags, jpeg_bytes, jpeg_with_exif};

    #[test]
    fn plain_jpeg_has_no_exif() {
        assert_eq!(read_raw_exif(&jpeg_bytes(16, 16)), None);
        assert_eq!(read_orientation(&jpeg_bytes(16, 16)), None);
    }

    #[test]
    fn garbage_has_no_exif() {
        assert_eq!(read_raw_exif(b"nope"), None);
    }

    #[test]
    fn reads_attribute_strings() {
        let bytes = jpeg_with_exif(32, 24, &ExifTags::leica_q());
        let raw = read_raw_exif(&bytes).unwrap();
        assert_eq!(raw.model.as_deref(), Some("LEICA Q (Typ 116)"));
        assert_eq!(raw.lens_model.as_deref(), Some("SUMMILUX 1:1.7/28 ASPH."));
        assert_eq!(raw.focal_length.as_deref(), Some("28/1"));
        assert_eq!(raw.f_number.as_deref(), Some("1.7"));
        assert_eq!(raw.iso.as_deref(), Some("250"));
        assert_eq!(raw.exposure_time.as_deref(), Some("0.001"));
        assert_eq!(raw.orientation, Some(1));
        assert_eq!(
            raw.date_time_original.as_deref(),
            Some("2025:02:23 17:50:12")
        );
    }

    #[test]
    fn whole_quantities_keep_a_decimal_place() {
        let tags = ExifTags {
            f_number: Some((2, 1)),
            exposure_time: Some((2, 1)),
            ..ExifTags::leica_q()
        };
        let raw = read_raw_exif(&jpeg_with_exif(8, 8, &tags)).unwrap();
        assert_eq!(raw.f_number.as_deref(), Some("2.0"));
        assert_eq!(raw.exposure_time.as_deref(), Some("2.0"));
        // ratios are untouched
        assert_eq!(raw.focal_length.as_deref(), Some("28/1"));

        let tags = ExifTags {
            f_number: Some((160, 10)),
            exposure_time: Some((1, 4)),
            ..ExifTags::leica_q()
        };
        let raw = read_raw_exif(&jpeg_with_exif(8, 8, &tags)).unwrap();
        assert_eq!(raw.f_number.as_deref(), Some("16.0"));
        assert_eq!(raw.exposure_time.as_deref(), Some("0.25"));
    }

    #[test]
    fn reads_orientation_only() {
        let tags = ExifTags {
            orientation: Some(6),
            ..ExifTags::default()
        };
        let bytes = jpeg_with_exif(8, 8, &tags);
        assert_eq!(read_orientation(&bytes), Some(6));
    }
}
