//! # Leica Frame
//!
//! Turns a photo into a "shot on" frame: the original image on top, a white
//! band below it carrying a brand logo, the camera model and the shooting
//! parameters read from the photo's EXIF, written as a new JPEG into a
//! gallery-visible folder.
//!
//! # Architecture: Extract → Edit → Generate
//!
//! ```text
//! 1. Extract   image bytes  →  ExifFields → WatermarkText   (prefill, never fails)
//! 2. Edit      user changes text and presses "rotate"       (EditableSession)
//! 3. Generate  decode → orient → compose → store            (Pipeline, off-thread)
//! ```
//!
//! The UI layer is not part of this crate. It owns one [`session::EditableSession`]
//! per screen and forwards its events to a [`controller::Controller`], which
//! returns what to redraw.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`types`] | Shared value types: `ImageHandle`, `WatermarkText` |
//! | [`metadata`] | EXIF normalization with per-field fallbacks |
//! | [`rotation`] | EXIF orientation + user quarter turns → one clockwise rotation |
//! | [`imaging`] | Band geometry, text layout, rendering, asset providers, EXIF reading |
//! | [`sink`] | Writes composed frames as JPEG into the gallery folder |
//! | [`process`] | The generate pipeline, shared across calls |
//! | [`session`] | Per-screen editing state and status messages |
//! | [`controller`] | Event handlers, single-flight async generate |
//! | [`config`] | Optional `frame.toml`, merged over stock defaults |
//!
//! # Design Decisions
//!
//! ## Geometry Depends on Width Only
//!
//! The band height, padding and logo size are fixed fractions of the rotated
//! image width, so a portrait and a landscape shot of the same width get the
//! same band. Ratios are stored in thousandths and floored in integer
//! arithmetic, which keeps `floor(W × 0.125)` exact for every width.
//!
//! ## Planning Is Separate From Painting
//!
//! [`imaging::plan_frame`] computes every text run and the logo square as
//! plain data. Rendering only consumes the plan. Layout is asserted in tests
//! without loading a single font.
//!
//! ## Missing Assets Degrade, Never Fail
//!
//! A typeface that fails to load falls back to a configured default face,
//! then to DejaVu Sans compiled into the crate, so text is always drawn. A
//! missing logo leaves its square white. Only decode, composition and storage errors fail a generate
//! call, and the UI sees those as `false`.
//!
//! ## Metadata Never Fails
//!
//! Every EXIF field has a default. A photo without metadata still produces a
//! complete, editable set of strings.

pub mod config;
pub mod controller;
pub mod imaging;
pub mod metadata;
pub mod process;
pub mod rotation;
pub mod session;
pub mod sink;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
