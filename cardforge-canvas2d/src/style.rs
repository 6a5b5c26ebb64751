//! Paint and text placement styles.

use crate::geometry::CanvasColor;
use crate::gradient::CanvasGradient;

/// Paint source used by fills, strokes and text.
#[derive(Debug, Clone)]
pub enum FillStyle {
    Color(tiny_skia::Color),
    LinearGradient(CanvasGradient),
}

impl Default for FillStyle {
    fn default() -> Self {
        FillStyle::Color(tiny_skia::Color::BLACK)
    }
}

impl From<CanvasColor> for FillStyle {
    fn from(color: CanvasColor) -> Self {
        FillStyle::Color(color.into())
    }
}

impl From<CanvasGradient> for FillStyle {
    fn from(gradient: CanvasGradient) -> Self {
        FillStyle::LinearGradient(gradient)
    }
}

/// Horizontal placement of text relative to its anchor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextAlign {
    #[default]
    Left,
    Right,
    Center,
}

impl TextAlign {
    /// Offset from the anchor to the left edge of a run `width` wide.
    pub fn x_offset(self, width: f32) -> f32 {
        match self {
            TextAlign::Left => 0.0,
            TextAlign::Right => -width,
            TextAlign::Center => -width / 2.0,
        }
    }
}

/// Which line of the em box sits on the anchor's y coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TextBaseline {
    Top,
    Middle,
    #[default]
    Alphabetic,
    Bottom,
}

impl TextBaseline {
    /// Offset from the anchor to the alphabetic baseline.
    pub fn y_offset(self, ascent: f32, descent: f32) -> f32 {
        match self {
            TextBaseline::Top => ascent,
            TextBaseline::Middle => (ascent - descent) / 2.0,
            TextBaseline::Alphabetic => 0.0,
            TextBaseline::Bottom => -descent,
        }
    }
}
