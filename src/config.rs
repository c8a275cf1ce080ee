//! Frame configuration.
//!
//! Handles loading, validating, and merging `frame.toml`. The file is
//! optional: stock defaults reproduce the stock look and output location, and
//! a user file only overrides the keys it names.
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional - defaults shown below
//!
//! profile = "two-line"          # or "single-line"
//! caption = "CAPTURED WITH"     # small line above the model (two-line only)
//!
//! [output]
//! pictures_dir = "Pictures"     # gallery-visible root
//! app_folder = "LeicaMaker"     # subfolder created on first save
//! file_prefix = "LeicaFOTOS"    # <prefix>_<epoch millis>.jpg
//! quality = 95                  # JPEG quality (1-100)
//!
//! [assets]
//! font_light = "fonts/font_light.ttf"
//! font_regular = "fonts/font_regular.ttf"
//! # fallback_font = "/usr/share/fonts/truetype/noto/NotoSans-Regular.ttf"
//! logo = "logo.png"
//! ```
//!
//! Relative paths are resolved against the directory the config was loaded
//! from. Unknown keys are rejected to catch typos early.

use crate::imaging::{ProfileKind, Quality};
use crate::imaging::profile::DEFAULT_CAPTION;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const CONFIG_FILE_NAME: &str = "frame.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("TOML serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Frame configuration loaded from `frame.toml`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FrameConfig {
    /// Layout profile of the band.
    pub profile: ProfileKind,
    /// Caption drawn above the model name.
    pub caption: String,
    /// Where and how composed images are written.
    pub output: OutputConfig,
    /// Fonts and logo.
    pub assets: AssetsConfig,
}

impl Default for FrameConfig {
    fn default() -> Self {
        Self {
            profile: ProfileKind::default(),
            caption: DEFAULT_CAPTION.to_string(),
            output: OutputConfig::default(),
            assets: AssetsConfig::default(),
        }
    }
}

impl FrameConfig {
    /// Validate config values are within acceptable ranges.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(1..=100).contains(&self.output.quality) {
            return Err(ConfigError::Validation(
                "output.quality must be 1-100".into(),
            ));
        }
        check_file_component("output.app_folder", &self.output.app_folder)?;
        check_file_component("output.file_prefix", &self.output.file_prefix)?;
        Ok(())
    }

    /// Make every relative path absolute with respect to `base`.
    pub fn resolve_paths(mut self, base: &Path) -> Self {
        let rebase = |p: &mut PathBuf| {
            if p.is_relative() {
                *p = base.join(&*p);
            }
        };
        rebase(&mut self.output.pictures_dir);
        rebase(&mut self.assets.font_light);
        rebase(&mut self.assets.font_regular);
        rebase(&mut self.assets.logo);
        if let Some(fallback) = self.assets.fallback_font.as_mut() {
            rebase(fallback);
        }
        self
    }

    pub fn quality(&self) -> Quality {
        Quality::new(self.output.quality)
    }
}

fn check_file_component(key: &str, value: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::Validation(format!("{key} must not be empty")));
    }
    if value.contains(['/', '\\']) || value == "." || value == ".." {
        return Err(ConfigError::Validation(format!(
            "{key} must be a single name, got {value:?}"
        )));
    }
    Ok(())
}

/// Output location and encoding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputConfig {
    /// Gallery-visible pictures root.
    pub pictures_dir: PathBuf,
    /// Subfolder of `pictures_dir` the images are written to.
    pub app_folder: String,
    /// File name prefix, followed by `_<epoch millis>.jpg`.
    pub file_prefix: String,
    /// JPEG quality (1 = worst, 100 = best).
    pub quality: u32,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            pictures_dir: PathBuf::from("Pictures"),
            app_folder: "LeicaMaker".to_string(),
            file_prefix: "LeicaFOTOS".to_string(),
            quality: Quality::default().value(),
        }
    }
}

/// Font and logo locations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AssetsConfig {
    pub font_light: PathBuf,
    pub font_regular: PathBuf,
    /// Typeface used when a configured face cannot be loaded.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fallback_font: Option<PathBuf>,
    /// Logo image, stretched into a square at the left of the band.
    pub logo: PathBuf,
}

impl Default for AssetsConfig {
    fn default() -> Self {
        Self {
            font_light: PathBuf::from("fonts/font_light.ttf"),
            font_regular: PathBuf::from("fonts/font_regular.ttf"),
            fallback_font: None,
            logo: PathBuf::from("logo.png"),
        }
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
///
/// This is the base layer user overrides are merged onto.
pub fn stock_defaults_value() -> Result<toml::Value, ConfigError> {
    Ok(toml::Value::try_from(FrameConfig::default())?)
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Load `frame.toml` from a directory as a raw TOML value.
///
/// Returns `Ok(None)` if the directory has no `frame.toml`.
pub fn load_raw_config(dir: &Path) -> Result<Option<toml::Value>, ConfigError> {
    let config_path = dir.join(CONFIG_FILE_NAME);
    if !config_path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(&config_path)?;
    let value: toml::Value = toml::from_str(&content)?;
    Ok(Some(value))
}

/// Merge an optional overlay onto a base value, then deserialize and validate.
pub fn resolve_config(
    base: toml::Value,
    overlay: Option<toml::Value>,
) -> Result<FrameConfig, ConfigError> {
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: FrameConfig = merged.try_into()?;
    config.validate()?;
    Ok(config)
}

/// Load config from `frame.toml` in the given directory.
///
/// Merges user values on top of stock defaults, rejects unknown keys,
/// validates, and resolves relative paths against `dir`.
pub fn load_config(dir: &Path) -> Result<FrameConfig, ConfigError> {
    let base = stock_defaults_value()?;
    let overlay = load_raw_config(dir)?;
    if overlay.is_none() {
        log::debug!("no {CONFIG_FILE_NAME} in {}, using stock defaults", dir.display());
    }
    Ok(resolve_config(base, overlay)?.resolve_paths(dir))
}

/// Returns a fully-commented stock `frame.toml` with all keys and explanations.
pub fn stock_config_toml() -> &'static str {
    r##"# Leica Frame Configuration
# =========================
# All settings are optional. Remove or comment out any you don't need.
# Values shown below are the defaults.
#
# Relative paths are resolved against the directory holding this file.
# Unknown keys will cause an error.

# Band layout: "two-line" (caption + model left, params/lens/date right)
# or "single-line" (model left, params right).
profile = "two-line"

# Small caption above the model name (two-line layout only).
caption = "CAPTURED WITH"

# ---------------------------------------------------------------------------
# Output
# ---------------------------------------------------------------------------
[output]
# Gallery-visible pictures root.
pictures_dir = "Pictures"

# Subfolder created under pictures_dir on first save.
app_folder = "LeicaMaker"

# Files are named <file_prefix>_<epoch millis>.jpg
file_prefix = "LeicaFOTOS"

# JPEG encoding quality (1 = worst, 100 = best).
quality = 95

# ---------------------------------------------------------------------------
# Assets
# ---------------------------------------------------------------------------
[assets]
# Light face: lens and date lines.
font_light = "fonts/font_light.ttf"

# Regular face: caption, model and shooting parameters.
font_regular = "fonts/font_regular.ttf"

# Used when a face above cannot be loaded. Without it, the built-in
# DejaVu Sans is used.
# fallback_font = "/usr/share/fonts/truetype/noto/NotoSans-Regular.ttf"

# Logo stretched into a square at the left of the band. Skipped if missing.
logo = "logo.png"
"##
}
