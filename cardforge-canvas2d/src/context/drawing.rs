//! Fill, stroke, clip, and paint helper operations for Canvas2dContext.

use super::Canvas2dContext;
use crate::geometry::RectParams;
use crate::gradient::CanvasGradient;
use crate::style::FillStyle;
use tiny_skia::Transform;

impl Canvas2dContext {
    // --- Clipping ---

    /// Intersect the clipping region with the current path (non-zero winding).
    ///
    /// The clip is part of the drawing state and is undone by `restore`.
    pub fn clip(&mut self) {
        log::debug!(target: "canvas", "clip");
        let Some(path) = self.path.finish() else {
            return;
        };
        // Nested clips keep the innermost path; the renderer never nests them
        if self.state.clip_path.is_some() {
            log::debug!(target: "canvas", "clip replaces existing clip path");
        }
        self.state.clip_path = Some(path);
    }

    // --- Drawing operations ---

    /// Fill the current path using the non-zero winding rule.
    pub fn fill(&mut self) {
        log::debug!(target: "canvas", "fill");
        let Some(path) = self.path.finish() else {
            return;
        };
        let clip_mask = self.create_clip_mask();
        let style = self.state.fill_style.clone();
        let painted = self.with_paint_from_style(style, |ctx, paint| {
            ctx.pixmap.fill_path(
                &path,
                paint,
                tiny_skia::FillRule::Winding,
                Transform::identity(),
                clip_mask.as_ref(),
            );
        });
        if painted.is_none() {
            log::debug!(target: "canvas", "fill skipped, fill style has no paint");
        }
    }

    /// Stroke the current path.
    pub fn stroke(&mut self) {
        log::debug!(target: "canvas", "stroke");
        let Some(path) = self.path.finish() else {
            return;
        };

        let stroke = self.state.device_stroke();

        let clip_mask = self.create_clip_mask();
        let style = self.state.stroke_style.clone();
        let painted = self.with_paint_from_style(style, |ctx, paint| {
            ctx.pixmap.stroke_path(
                &path,
                paint,
                &stroke,
                Transform::identity(),
                clip_mask.as_ref(),
            );
        });
        if painted.is_none() {
            log::debug!(target: "canvas", "stroke skipped, stroke style has no paint");
        }
    }

    /// Fill a rectangle.
    pub fn fill_rect(&mut self, params: &RectParams) {
        log::debug!(target: "canvas", "fillRect {} {} {} {}", params.x, params.y, params.width, params.height);
        self.begin_path();
        self.rect(params);
        self.fill();
    }

    /// Stroke a rectangle.
    pub fn stroke_rect(&mut self, params: &RectParams) {
        log::debug!(target: "canvas", "strokeRect {} {} {} {}", params.x, params.y, params.width, params.height);
        self.begin_path();
        self.rect(params);
        self.stroke();
    }

    /// Clear a rectangle (set pixels to transparent).
    pub fn clear_rect(&mut self, params: &RectParams) {
        log::debug!(target: "canvas", "clearRect {} {} {} {}", params.x, params.y, params.width, params.height);
        let mut pb = tiny_skia::PathBuilder::new();
        let corners = [
            (params.x, params.y),
            (params.x + params.width, params.y),
            (params.x + params.width, params.y + params.height),
            (params.x, params.y + params.height),
        ];
        for (i, (x, y)) in corners.into_iter().enumerate() {
            let (tx, ty) = self.transform_point(x, y);
            if i == 0 {
                pb.move_to(tx, ty);
            } else {
                pb.line_to(tx, ty);
            }
        }
        pb.close();

        if let Some(path) = pb.finish() {
            let paint = tiny_skia::Paint {
                blend_mode: tiny_skia::BlendMode::Clear,
                ..Default::default()
            };
            let clip_mask = self.create_clip_mask();
            self.pixmap.fill_path(
                &path,
                &paint,
                tiny_skia::FillRule::Winding,
                Transform::identity(),
                clip_mask.as_ref(),
            );
        }
    }

    // --- Private paint helpers ---

    pub(crate) fn create_clip_mask(&self) -> Option<tiny_skia::Mask> {
        self.state.clip_path.as_ref().and_then(|clip_path| {
            let mut mask = tiny_skia::Mask::new(self.width, self.height)?;
            mask.fill_path(
                clip_path,
                tiny_skia::FillRule::Winding,
                true,
                Transform::identity(),
            );
            Some(mask)
        })
    }

    /// Build a paint for `style` and hand it to `draw`.
    ///
    /// Returns `None` when the style cannot produce a shader (a gradient
    /// without stops paints nothing).
    pub(crate) fn with_paint_from_style<R>(
        &mut self,
        style: FillStyle,
        draw: impl for<'a> FnOnce(&mut Self, &tiny_skia::Paint<'a>) -> R,
    ) -> Option<R> {
        let mut paint = tiny_skia::Paint {
            anti_alias: true,
            ..Default::default()
        };

        match style {
            FillStyle::Color(mut color) => {
                if self.state.global_alpha < 1.0 {
                    color.set_alpha((color.alpha() * self.state.global_alpha).clamp(0.0, 1.0));
                }
                paint.set_color(color);
            }
            FillStyle::LinearGradient(gradient) => {
                paint.shader = self.create_gradient_shader(&gradient)?;
            }
        }
        Some(draw(self, &paint))
    }

    pub(crate) fn create_gradient_shader(
        &self,
        gradient: &CanvasGradient,
    ) -> Option<tiny_skia::Shader<'static>> {
        if gradient.stops.is_empty() {
            return None;
        }

        let stops: Vec<tiny_skia::GradientStop> = gradient
            .stops
            .iter()
            .map(|stop| {
                let mut color: tiny_skia::Color = stop.color.into();
                if self.state.global_alpha < 1.0 {
                    color.set_alpha((color.alpha() * self.state.global_alpha).clamp(0.0, 1.0));
                }
                tiny_skia::GradientStop::new(stop.offset, color)
            })
            .collect();

        tiny_skia::LinearGradient::new(
            tiny_skia::Point {
                x: gradient.x0,
                y: gradient.y0,
            },
            tiny_skia::Point {
                x: gradient.x1,
                y: gradient.y1,
            },
            stops,
            tiny_skia::SpreadMode::Pad,
            self.state.transform,
        )
    }
}
