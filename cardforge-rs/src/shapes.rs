//! Rounded-rectangle primitive shared by every card section.

use cardforge_canvas2d::{ArcToParams, Canvas2dContext, RectParams};

/// Which operations to apply to a shape path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapePaint {
    Fill,
    Stroke,
    FillAndStroke,
}

/// Corner radius actually drawn: `radius` clamped to `0..=min(w, h) / 2`.
pub fn effective_radius(width: f32, height: f32, radius: f32) -> f32 {
    let max = (width.min(height) / 2.0).max(0.0);
    if radius.is_finite() {
        radius.clamp(0.0, max)
    } else {
        0.0
    }
}

/// Build a rounded-rectangle path from four connected corner arcs.
///
/// Returns `false` (leaving the path empty) for rectangles without area.
pub fn round_rect_path(ctx: &mut Canvas2dContext, rect: &RectParams, radius: f32) -> bool {
    ctx.begin_path();
    if !(rect.width > 0.0 && rect.height > 0.0) {
        log::debug!("skipping degenerate rounded rect {rect:?}");
        return false;
    }

    let r = effective_radius(rect.width, rect.height, radius);
    let (x, y, right, bottom) = (rect.x, rect.y, rect.right(), rect.bottom());

    ctx.move_to(x + r, y);
    let corners = [
        (right, y, right, bottom),
        (right, bottom, x, bottom),
        (x, bottom, x, y),
        (x, y, right, y),
    ];
    for (x1, y1, x2, y2) in corners {
        ctx.arc_to(&ArcToParams {
            x1,
            y1,
            x2,
            y2,
            radius: r,
        });
    }
    ctx.close_path();
    true
}

/// Paint a rounded rectangle with the context's current fill and stroke styles.
pub fn round_rect(ctx: &mut Canvas2dContext, rect: &RectParams, radius: f32, paint: ShapePaint) {
    if !round_rect_path(ctx, rect, radius) {
        return;
    }
    if matches!(paint, ShapePaint::Fill | ShapePaint::FillAndStroke) {
        ctx.fill();
    }
    if matches!(paint, ShapePaint::Stroke | ShapePaint::FillAndStroke) {
        ctx.stroke();
    }
}
