//! Text measurement and layout helpers using cosmic-text.

use crate::font_parser::ParsedFont;
use cosmic_text::{Attrs, Buffer, CacheKeyFlags, Family, FontSystem, Metrics, Shaping};

/// Text metrics returned by measureText().
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextMetrics {
    /// Width of the text in pixels.
    pub width: f32,
    /// Distance from baseline to top of the line box.
    pub ascent: f32,
    /// Distance from baseline to bottom of the line box.
    pub descent: f32,
}

/// Map a CSS family name onto a cosmic-text family, honoring generic names.
pub(crate) fn family_for(name: &str) -> Family<'_> {
    match name {
        "sans-serif" => Family::SansSerif,
        "serif" => Family::Serif,
        "monospace" => Family::Monospace,
        "cursive" => Family::Cursive,
        "fantasy" => Family::Fantasy,
        other => Family::Name(other),
    }
}

/// Shape `text` into a single-line buffer with the given font.
pub(crate) fn shape_line(
    font_system: &mut FontSystem,
    text: &str,
    font: &ParsedFont,
    hinting_enabled: bool,
) -> Buffer {
    let metrics = Metrics::new(font.size_px, font.size_px * 1.2);
    let mut buffer = Buffer::new(font_system, metrics);

    let family = font
        .families
        .first()
        .map(|f| family_for(f))
        .unwrap_or(Family::SansSerif);

    let mut attrs = Attrs::new()
        .family(family)
        .weight(font.weight)
        .style(font.style);
    if !hinting_enabled {
        attrs = attrs.cache_key_flags(CacheKeyFlags::DISABLE_HINTING);
    }

    buffer.set_text(font_system, text, &attrs, Shaping::Advanced, None);
    buffer.shape_until_scroll(font_system, false);
    buffer
}

/// Collect width and ascent/descent from a shaped buffer.
pub(crate) fn buffer_metrics(buffer: &Buffer, font: &ParsedFont) -> TextMetrics {
    let mut width: f32 = 0.0;
    let mut ascent: f32 = 0.0;
    let mut descent: f32 = 0.0;
    for run in buffer.layout_runs() {
        width = width.max(run.line_w);
        ascent = ascent.max(run.line_y - run.line_top);
        descent = descent.max((run.line_top + run.line_height) - run.line_y);
    }
    if ascent == 0.0 && descent == 0.0 {
        ascent = font.size_px * 0.8;
        descent = font.size_px * 0.2;
    }
    TextMetrics {
        width,
        ascent,
        descent,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generic_family_mapping() {
        assert_eq!(family_for("sans-serif"), Family::SansSerif);
        assert_eq!(family_for("Noto Sans"), Family::Name("Noto Sans"));
    }
}
