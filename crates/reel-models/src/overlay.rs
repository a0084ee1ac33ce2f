//! Text overlay content, position and style.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::template::TemplateError;

/// Font weight for overlay text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema, Default)]
#[serde(rename_all = "snake_case")]
pub enum FontWeight {
    #[default]
    Normal,
    Bold,
}

/// Normalized overlay anchor position.
///
/// `x` and `y` are fractions of the frame (0.0 = left/top edge,
/// 1.0 = right/bottom edge), independent of output resolution.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct OverlayPosition {
    pub x: f64,
    pub y: f64,
}

impl Default for OverlayPosition {
    fn default() -> Self {
        // Lower-third center, the usual caption spot
        Self { x: 0.5, y: 0.8 }
    }
}

impl OverlayPosition {
    pub fn is_normalized(&self) -> bool {
        (0.0..=1.0).contains(&self.x) && (0.0..=1.0).contains(&self.y)
    }
}

/// Visual style for overlay text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct OverlayStyle {
    /// Font size in pixels at output resolution.
    #[serde(default = "default_font_size")]
    pub font_size: u32,
    #[serde(default)]
    pub weight: FontWeight,
    /// Text color, any FFmpeg color spec ("white", "#ffcc00", ...).
    #[serde(default = "default_color")]
    pub color: String,
    /// Stroke (border) color; no stroke when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke_color: Option<String>,
    /// Stroke width in pixels.
    #[serde(default = "default_stroke_width")]
    pub stroke_width: u32,
    /// Background box color; no box when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
}

fn default_font_size() -> u32 {
    64
}

fn default_color() -> String {
    "white".to_string()
}

fn default_stroke_width() -> u32 {
    4
}

impl Default for OverlayStyle {
    fn default() -> Self {
        Self {
            font_size: default_font_size(),
            weight: FontWeight::Normal,
            color: default_color(),
            stroke_color: Some("black".to_string()),
            stroke_width: default_stroke_width(),
            background_color: None,
        }
    }
}

/// A text overlay owned by exactly one scene.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct TextOverlay {
    /// Text to burn in. May contain `{{variable}}` placeholders that are
    /// substituted from the request's content variables at render time.
    pub content: String,
    #[serde(default)]
    pub position: OverlayPosition,
    #[serde(default)]
    pub style: OverlayStyle,
}

impl TextOverlay {
    /// Create an overlay with default styling at a normalized position.
    pub fn new(content: impl Into<String>, x: f64, y: f64) -> Self {
        Self {
            content: content.into(),
            position: OverlayPosition { x, y },
            style: OverlayStyle::default(),
        }
    }

    /// Check content and position invariants.
    pub fn validate(&self) -> Result<(), TemplateError> {
        if self.content.trim().is_empty() {
            return Err(TemplateError::EmptyOverlay);
        }
        if !self.position.is_normalized() {
            return Err(TemplateError::OverlayOutOfRange {
                x: self.position.x,
                y: self.position.y,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_content_rejected() {
        let overlay = TextOverlay::new("  ", 0.5, 0.5);
        assert!(overlay.validate().is_err());
    }

    #[test]
    fn test_position_out_of_range_rejected() {
        let overlay = TextOverlay::new("ok", 1.5, 0.5);
        assert!(overlay.validate().is_err());
        let overlay = TextOverlay::new("ok", 0.5, -0.1);
        assert!(overlay.validate().is_err());
    }

    #[test]
    fn test_style_defaults() {
        let style = OverlayStyle::default();
        assert_eq!(style.font_size, 64);
        assert_eq!(style.color, "white");
        assert_eq!(style.stroke_color.as_deref(), Some("black"));
        assert!(style.background_color.is_none());
    }
}
