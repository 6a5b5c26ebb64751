//! Render configuration.

use crate::error::{CardError, CardResult};
use crate::loader::DEFAULT_PLACEHOLDER_TILE;
use cardforge_canvas2d::{CanvasColor, FontConfig};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Options that affect how a card is painted and encoded. Every field has a
/// default, so a config file only needs the keys it changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderConfig {
    /// Device pixels per logical unit.
    pub scale: f32,
    /// Pixel density written to the PNG.
    pub ppi: f32,
    pub placeholder_tile_size: u32,
    pub font_family: String,
    pub font_dirs: Vec<PathBuf>,
    pub load_system_fonts: bool,
    /// CSS color for card text.
    pub text_color: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            scale: 1.0,
            ppi: 72.0,
            placeholder_tile_size: DEFAULT_PLACEHOLDER_TILE,
            font_family: "sans-serif".to_string(),
            font_dirs: Vec::new(),
            load_system_fonts: true,
            text_color: "#ffffff".to_string(),
        }
    }
}

impl RenderConfig {
    pub fn from_json(json: &str) -> CardResult<Self> {
        let config: RenderConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: &Path) -> CardResult<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn validate(&self) -> CardResult<()> {
        if !(self.scale.is_finite() && self.scale > 0.0) {
            return Err(CardError::Config(format!(
                "scale must be a positive number, got {}",
                self.scale
            )));
        }
        if !(self.ppi.is_finite() && self.ppi > 0.0) {
            return Err(CardError::Config(format!(
                "ppi must be a positive number, got {}",
                self.ppi
            )));
        }
        if self.font_family.trim().is_empty() {
            return Err(CardError::Config("font_family must not be empty".to_string()));
        }
        self.text_color()?;
        Ok(())
    }

    pub fn text_color(&self) -> CardResult<CanvasColor> {
        self.text_color
            .parse()
            .map_err(|_| CardError::Config(format!("invalid text_color: {}", self.text_color)))
    }

    pub fn font_config(&self) -> FontConfig {
        FontConfig {
            load_system_fonts: self.load_system_fonts,
            font_dirs: self.font_dirs.clone(),
            ..FontConfig::default()
        }
    }
}
