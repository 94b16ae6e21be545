use crate::error::ConfigError;
use crate::rendering::ImageFormat;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use title_art::{effective_min_size, LayoutParams, Rgb};

/// Settings for one generation run, loaded from config.yaml.
///
/// Every field has a default so an empty file (or no file at all) gives a
/// working 800x600 PNG setup with white text on a procedural background.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct GenerationConfig {
    #[serde(default = "default_width")]
    pub width: u32,

    #[serde(default = "default_height")]
    pub height: u32,

    /// Static background; falls back to the procedural one when unreadable
    #[serde(default)]
    pub background_image: Option<PathBuf>,

    /// Speckle the procedural background
    #[serde(default)]
    pub noise: bool,

    /// Font file tried before any system font
    #[serde(default)]
    pub font_path: Option<PathBuf>,

    /// Smallest font size layout may choose (values below 16 mean 32)
    #[serde(default = "default_font_size")]
    pub font_size: u32,

    /// `#RRGGBB` or `#RGB`
    #[serde(default = "default_font_color")]
    pub font_color: String,

    /// Generate an image for each section heading of the article body
    #[serde(default)]
    pub draw_sub: bool,

    #[serde(default)]
    pub format: ImageFormat,

    /// Lossy quality for WEBP output (1-100)
    #[serde(default = "default_quality")]
    pub quality: u8,

    /// Losslessly re-compress PNG output
    #[serde(default = "default_optimize_png")]
    pub optimize_png: bool,

    /// Base directory for relative `background_image` and `font_path`
    #[serde(default)]
    pub asset_root: Option<PathBuf>,

    /// Public URL prefix stripped from main-image references
    #[serde(default)]
    pub storage_url: Option<String>,
}

fn default_width() -> u32 {
    800
}

fn default_height() -> u32 {
    600
}

fn default_font_size() -> u32 {
    title_art::layout::DEFAULT_FONT_SIZE
}

fn default_font_color() -> String {
    "#FFFFFF".to_string()
}

fn default_quality() -> u8 {
    100
}

fn default_optimize_png() -> bool {
    true
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
            background_image: None,
            noise: false,
            font_path: None,
            font_size: default_font_size(),
            font_color: default_font_color(),
            draw_sub: false,
            format: ImageFormat::default(),
            quality: default_quality(),
            optimize_png: default_optimize_png(),
            asset_root: None,
            storage_url: None,
        }
    }
}

impl GenerationConfig {
    /// Load configuration from a YAML file.
    ///
    /// A missing or unparsable file is logged and replaced by defaults.
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(content) => match Self::from_yaml_str(&content) {
                Ok(config) => {
                    tracing::info!(
                        path = %path.display(),
                        width = config.width,
                        height = config.height,
                        format = %config.format,
                        "Loaded configuration"
                    );
                    config
                }
                Err(e) => {
                    tracing::warn!(%e, path = %path.display(), "Failed to parse config, using defaults");
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!(%e, path = %path.display(), "Failed to read config, using defaults");
                Self::default()
            }
        }
    }

    pub fn from_yaml_str(content: &str) -> Result<Self, serde_yaml::Error> {
        // An empty document deserializes to unit, not to an empty mapping.
        if content.trim().is_empty() {
            return Ok(Self::default());
        }
        serde_yaml::from_str(content)
    }

    /// Check the values a run cannot work around.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::InvalidDimensions {
                width: self.width,
                height: self.height,
            });
        }
        if !(1..=100).contains(&self.quality) {
            return Err(ConfigError::InvalidQuality(self.quality));
        }
        self.text_color()?;
        Ok(())
    }

    pub fn text_color(&self) -> Result<Rgb, ConfigError> {
        self.font_color
            .parse::<Rgb>()
            .map_err(|source| ConfigError::InvalidColor {
                value: self.font_color.clone(),
                source,
            })
    }

    pub fn layout_params(&self) -> LayoutParams {
        LayoutParams::new(self.width, self.height, effective_min_size(self.font_size))
    }

    /// Resolve a configured path against `asset_root` when it is relative.
    pub fn resolve_path(&self, path: &Path) -> PathBuf {
        match &self.asset_root {
            Some(root) if path.is_relative() => root.join(path),
            _ => path.to_path_buf(),
        }
    }

    pub fn background_path(&self) -> Option<PathBuf> {
        self.background_image
            .as_deref()
            .map(|path| self.resolve_path(path))
    }

    pub fn font_file(&self) -> Option<PathBuf> {
        self.font_path.as_deref().map(|path| self.resolve_path(path))
    }

    /// Remove the `storage_url` prefix from a stored image location.
    pub fn public_reference<'a>(&self, location: &'a str) -> &'a str {
        match self.storage_url.as_deref() {
            Some(prefix) if !prefix.is_empty() => {
                location.strip_prefix(prefix).unwrap_or(location)
            }
            _ => location,
        }
    }
}
