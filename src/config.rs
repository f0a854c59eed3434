//! Editor settings, read from an optional JSON file.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::surface::Color4;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Thickness of box walls and size of the anchor squares.
    pub line_offset: f32,
    pub box_color: Color4,
    pub highlight_color: Color4,
    pub label_font_size: f32,
    pub window_size: (f32, f32),
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            line_offset: 4.0,
            box_color: Color4::LIGHT_GREY,
            highlight_color: Color4::CADET_BLUE,
            label_font_size: 15.0,
            window_size: (1200.0, 800.0),
        }
    }
}

impl EditorConfig {
    /// Without a path the defaults are used. A path that can't be read or
    /// parsed is an error.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let data = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("read {}: {e}", path.display())))?;
        let cfg = Self::from_json(&data)?;
        tracing::debug!(path = %path.display(), ?cfg, "loaded config");
        Ok(cfg)
    }

    pub fn from_json(data: &str) -> Result<Self> {
        let cfg: Self = serde_json::from_str(data)?;
        cfg.validate()?;
        Ok(cfg)
    }

    fn validate(&self) -> Result<()> {
        if !(self.line_offset > 0.0) {
            return Err(Error::Config(format!(
                "line_offset must be positive, got {}",
                self.line_offset
            )));
        }
        if !(self.label_font_size > 0.0) {
            return Err(Error::Config(format!(
                "label_font_size must be positive, got {}",
                self.label_font_size
            )));
        }
        Ok(())
    }

    pub fn line_width(&self) -> f32 {
        (self.line_offset / 2.0).ceil()
    }

    pub fn box_style(&self) -> BoxStyle {
        BoxStyle {
            line_offset: self.line_offset,
            line_width: self.line_width(),
            color: self.box_color.clone(),
            highlight: self.highlight_color.clone(),
            font_size: self.label_font_size,
        }
    }
}

/// Drawing parameters shared by every box in a container.
#[derive(Clone, Debug, PartialEq)]
pub struct BoxStyle {
    pub line_offset: f32,
    pub line_width: f32,
    pub color: Color4,
    pub highlight: Color4,
    pub font_size: f32,
}

impl Default for BoxStyle {
    fn default() -> Self {
        EditorConfig::default().box_style()
    }
}
