//! Frame style palettes.

use crate::input::FrameStyle;
use cardforge_canvas2d::CanvasColor;

/// Colors derived from a frame style. Gradient stops are spaced evenly.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameStylePalette {
    pub background_stops: &'static [CanvasColor],
    pub panel_fill: CanvasColor,
    pub border_stops: &'static [CanvasColor],
}

const fn rgb(r: u8, g: u8, b: u8) -> CanvasColor {
    CanvasColor::from_rgba8(r, g, b, 255)
}

const NEO: FrameStylePalette = FrameStylePalette {
    background_stops: &[rgb(15, 23, 42), rgb(30, 58, 138), rgb(14, 165, 233)],
    panel_fill: CanvasColor::from_rgba8(15, 23, 42, 217),
    border_stops: &[rgb(56, 189, 248), rgb(168, 85, 247)],
};

const CLASSIC: FrameStylePalette = FrameStylePalette {
    background_stops: &[rgb(124, 45, 18), rgb(180, 83, 9), rgb(251, 191, 36)],
    panel_fill: CanvasColor::from_rgba8(68, 33, 6, 217),
    border_stops: &[rgb(253, 230, 138), rgb(180, 83, 9)],
};

const DARK: FrameStylePalette = FrameStylePalette {
    background_stops: &[rgb(2, 6, 23), rgb(17, 24, 39), rgb(31, 41, 55)],
    panel_fill: CanvasColor::from_rgba8(3, 7, 18, 230),
    border_stops: &[rgb(75, 85, 99), rgb(156, 163, 175)],
};

const HOLO: FrameStylePalette = FrameStylePalette {
    background_stops: &[
        rgb(240, 171, 252),
        rgb(147, 197, 253),
        rgb(134, 239, 172),
        rgb(253, 230, 138),
    ],
    panel_fill: CanvasColor::from_rgba8(17, 24, 39, 191),
    border_stops: &[
        rgb(244, 114, 182),
        rgb(96, 165, 250),
        rgb(52, 211, 153),
        rgb(250, 204, 21),
    ],
};

/// Resolve the palette for a frame style.
pub fn resolve_frame(style: FrameStyle) -> FrameStylePalette {
    match style {
        FrameStyle::Neo => NEO,
        FrameStyle::Classic => CLASSIC,
        FrameStyle::Dark => DARK,
        FrameStyle::Holo => HOLO,
    }
}

impl FrameStylePalette {
    /// Fill color of the race tag badge.
    pub fn accent(&self) -> CanvasColor {
        self.border_stops[0]
    }
}
