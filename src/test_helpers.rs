//! Shared test utilities: synthetic JPEGs with and without an embedded EXIF
//! block.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let bytes = jpeg_with_exif(64, 48, &ExifTags::leica_q());
//! let handle = ImageHandle::from_bytes(bytes);
//! ```

use exif::experimental::Writer;
use exif::{Field, In, Rational, Tag, Value};
use image::{ImageEncoder, RgbImage};
use std::io::Cursor;

// =========================================================================
// Plain images
// =========================================================================

/// Gradient RGB test pattern.
pub fn gradient(width: u32, height: u32) -> RgbImage {
    RgbImage::from_fn(width, height, |x, y| {
        image::Rgb([(x % 256) as u8, (y % 256) as u8, 128])
    })
}

/// Encode a small valid JPEG with the given dimensions.
pub fn jpeg_bytes(width: u32, height: u32) -> Vec<u8> {
    let img = gradient(width, height);
    let mut buf = Vec::new();
    image::codecs::jpeg::JpegEncoder::new_with_quality(&mut buf, 90)
        .write_image(img.as_raw(), width, height, image::ExtendedColorType::Rgb8)
        .unwrap();
    buf
}

// =========================================================================
// EXIF fixtures
// =========================================================================

/// Tags to embed into a synthetic JPEG. `None` = tag omitted.
#[derive(Debug, Clone, Default)]
pub struct ExifTags {
    pub model: Option<&'static str>,
    pub lens_model: Option<&'static str>,
    pub focal_length: Option<(u32, u32)>,
    pub f_number: Option<(u32, u32)>,
    pub iso: Option<u16>,
    pub exposure_time: Option<(u32, u32)>,
    pub orientation: Option<u16>,
    pub date_time_original: Option<&'static str>,
}

impl ExifTags {
    /// `FocalLength=28/1, FNumber=1.7, ISO=250, ExposureTime=1/1000`.
    pub fn leica_q() -> Self {
        Self {
            model: Some("LEICA Q (Typ 116)"),
            lens_model: Some("SUMMILUX 1:1.7/28 ASPH."),
            focal_length: Some((28, 1)),
            f_number: Some((17, 10)),
            iso: Some(250),
            exposure_time: Some((1, 1000)),
            orientation: Some(1),
            date_time_original: Some("2025:02:23 17:50:12"),
        }
    }

    fn fields(&self) -> Vec<Field> {
        let mut fields = Vec::new();
        let mut push = |tag: Tag, value: Value| {
            fields.push(Field {
                tag,
                ifd_num: In::PRIMARY,
                value,
            })
        };
        let ascii = |s: &str| Value::Ascii(vec![s.as_bytes().to_vec()]);
        let rational = |(num, denom): (u32, u32)| Value::Rational(vec![Rational { num, denom }]);

        if let Some(s) = self.model {
            push(Tag::Model, ascii(s));
        }
        if let Some(o) = self.orientation {
            push(Tag::Orientation, Value::Short(vec![o]));
        }
        if let Some(r) = self.exposure_time {
            push(Tag::ExposureTime, rational(r));
        }
        if let Some(r) = self.f_number {
            push(Tag::FNumber, rational(r));
        }
        if let Some(iso) = self.iso {
            push(Tag::PhotographicSensitivity, Value::Short(vec![iso]));
        }
        if let Some(s) = self.date_time_original {
            push(Tag::DateTimeOriginal, ascii(s));
        }
        if let Some(r) = self.focal_length {
            push(Tag::FocalLength, rational(r));
        }
        if let Some(s) = self.lens_model {
            push(Tag::LensModel, ascii(s));
        }
        fields
    }
}

/// Encode a JPEG and splice an APP1 `Exif` segment right after SOI.
pub fn jpeg_with_exif(width: u32, height: u32, tags: &ExifTags) -> Vec<u8> {
    let fields = tags.fields();
    let mut writer = Writer::new();
    for field in &fields {
        writer.push_field(field);
    }
    let mut tiff = Cursor::new(Vec::new());
    writer.write(&mut tiff, false).unwrap();
    let tiff = tiff.into_inner();

    let jpeg = jpeg_bytes(width, height);
    assert_eq!(&jpeg[..2], &[0xFF, 0xD8], "encoder must emit SOI first");

    let segment_len = (2 + 6 + tiff.len()) as u16;
    let mut out = Vec::with_capacity(jpeg.len() + tiff.len() + 10);
    out.extend_from_slice(&jpeg[..2]);
    out.extend_from_slice(&[0xFF, 0xE1]);
    out.extend_from_slice(&segment_len.to_be_bytes());
    out.extend_from_slice(b"Exif\0\0");
    out.extend_from_slice(&tiff);
    out.extend_from_slice(&jpeg[2..]);
    out
}
