//! Text rendering operations for Canvas2dContext.

use super::Canvas2dContext;
use crate::error::Canvas2dResult;
use crate::font_parser::parse_font;
use crate::style::{TextAlign, TextBaseline};
use crate::text::{buffer_metrics, shape_line, TextMetrics};
use cosmic_text::Command;
use tiny_skia::Transform;

impl Canvas2dContext {
    /// Set the font from a CSS font string.
    pub fn set_font(&mut self, font: &str) -> Canvas2dResult<()> {
        self.state.font = parse_font(font)?;
        Ok(())
    }

    /// Set the text alignment.
    pub fn set_text_align(&mut self, align: TextAlign) {
        self.state.text_align = align;
    }

    /// Set the text baseline.
    pub fn set_text_baseline(&mut self, baseline: TextBaseline) {
        self.state.text_baseline = baseline;
    }

    /// Measure text with the current font.
    pub fn measure_text(&mut self, text: &str) -> TextMetrics {
        let buffer = shape_line(
            &mut self.font_system,
            text,
            &self.state.font,
            self.hinting_enabled,
        );
        buffer_metrics(&buffer, &self.state.font)
    }

    /// Fill text at the specified position.
    ///
    /// Glyphs are rendered as vector outlines through the current transform
    /// and clip. Characters with no available font produce no output.
    pub fn fill_text(&mut self, text: &str, x: f32, y: f32) {
        log::debug!(target: "canvas", "fillText \"{}\" {} {}", text, x, y);
        if text.is_empty() {
            return;
        }

        let font = self.state.font.clone();
        let buffer = shape_line(&mut self.font_system, text, &font, self.hinting_enabled);
        let metrics = buffer_metrics(&buffer, &font);

        let base_x = x + self.state.text_align.x_offset(metrics.width);
        let base_y = y + self
            .state
            .text_baseline
            .y_offset(metrics.ascent, metrics.descent);

        let transform = self.state.transform;
        let clip_mask = self.create_clip_mask();
        let style = self.state.fill_style.clone();
        let painted = self.with_paint_from_style(style, |ctx, paint| {
            for run in buffer.layout_runs() {
                for glyph in run.glyphs.iter() {
                    let physical_glyph = glyph.physical((base_x, base_y), 1.0);
                    let glyph_x = base_x + glyph.x + glyph.font_size * glyph.x_offset;
                    let glyph_y = base_y + glyph.y - glyph.font_size * glyph.y_offset;

                    let Some(commands) = ctx
                        .swash_cache
                        .get_outline_commands(&mut ctx.font_system, physical_glyph.cache_key)
                    else {
                        continue;
                    };

                    // Font outlines are y-up
                    let mut path_builder = tiny_skia::PathBuilder::new();
                    for cmd in commands {
                        match cmd {
                            Command::MoveTo(p) => path_builder.move_to(p.x, -p.y),
                            Command::LineTo(p) => path_builder.line_to(p.x, -p.y),
                            Command::QuadTo(ctrl, end) => {
                                path_builder.quad_to(ctrl.x, -ctrl.y, end.x, -end.y)
                            }
                            Command::CurveTo(c1, c2, end) => {
                                path_builder.cubic_to(c1.x, -c1.y, c2.x, -c2.y, end.x, -end.y)
                            }
                            Command::Close => path_builder.close(),
                        }
                    }

                    if let Some(path) = path_builder.finish() {
                        let glyph_transform =
                            Transform::from_translate(glyph_x, glyph_y).post_concat(transform);
                        ctx.pixmap.fill_path(
                            &path,
                            paint,
                            tiny_skia::FillRule::Winding,
                            glyph_transform,
                            clip_mask.as_ref(),
                        );
                    }
                }
            }
        });
        if painted.is_none() {
            log::debug!(target: "canvas", "fillText skipped, fill style has no paint");
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::font_config::FontConfig;
    use crate::style::{TextAlign, TextBaseline};
    use crate::Canvas2dContext;

    fn ctx() -> Canvas2dContext {
        let config = FontConfig {
            load_system_fonts: false,
            ..FontConfig::default()
        };
        Canvas2dContext::with_config(64, 64, config).unwrap()
    }

    #[test]
    fn test_set_font_updates_state() {
        let mut ctx = ctx();
        ctx.set_font("bold 40px sans-serif").unwrap();
        assert_eq!(ctx.state.font.size_px, 40.0);
        assert_eq!(ctx.state.font.weight, cosmic_text::Weight::BOLD);
        assert!(ctx.set_font("bold Arial").is_err());
        assert_eq!(ctx.state.font.size_px, 40.0);
    }

    #[test]
    fn test_text_align_and_baseline_saved() {
        let mut ctx = ctx();
        ctx.save();
        ctx.set_text_align(TextAlign::Center);
        ctx.set_text_baseline(TextBaseline::Middle);
        ctx.restore();
        assert_eq!(ctx.state.text_align, TextAlign::Left);
        assert_eq!(ctx.state.text_baseline, TextBaseline::Alphabetic);
    }

    #[test]
    fn test_text_without_fonts_is_noop() {
        let mut ctx = ctx();
        ctx.set_fill_style("#ffffff").unwrap();
        ctx.fill_text("hello", 4.0, 32.0);
        ctx.fill_text("", 4.0, 32.0);
        assert!(ctx.data().iter().all(|&b| b == 0));
        // Falls back to size-derived metrics when nothing is shaped
        let metrics = ctx.measure_text("");
        assert_eq!(metrics.width, 0.0);
        assert!(metrics.ascent > 0.0);
    }
}
