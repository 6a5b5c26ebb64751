//! Arc operations using bezier curve approximation.
//!
//! tiny-skia does not support arc primitives directly, so we approximate
//! arcs using cubic bezier curves.

use crate::geometry::{ArcParams, ArcToParams};
use std::f32::consts::PI;
use tiny_skia::PathBuilder;

/// Add a circular arc to the path using bezier curve approximation.
///
/// The arc starts with a `move_to` to its first point; callers that need the
/// arc connected to an existing subpath merge it with a line segment.
pub fn arc(path: &mut PathBuilder, params: &ArcParams) {
    let ArcParams {
        x,
        y,
        radius,
        start_angle,
        end_angle,
        anticlockwise,
    } = *params;

    if radius <= 0.0 || !radius.is_finite() {
        return;
    }

    // Angle sweep in the drawing direction, limited to one full turn
    let mut sweep = if anticlockwise {
        start_angle - end_angle
    } else {
        end_angle - start_angle
    };
    if sweep >= 2.0 * PI {
        sweep = 2.0 * PI;
    } else {
        sweep = sweep.rem_euclid(2.0 * PI);
    }
    let direction = if anticlockwise { -1.0 } else { 1.0 };

    path.move_to(x + radius * start_angle.cos(), y + radius * start_angle.sin());
    if sweep == 0.0 {
        return;
    }

    // One cubic segment per quarter turn (or part of one)
    let num_segments = ((sweep / (PI / 2.0)).ceil() as usize).max(1);
    let segment_angle = sweep / num_segments as f32 * direction;

    for i in 0..num_segments {
        let angle1 = start_angle + i as f32 * segment_angle;
        let angle2 = angle1 + segment_angle;
        arc_segment(path, x, y, radius, angle1, angle2);
    }
}

/// Add a single arc segment as a cubic bezier curve.
fn arc_segment(path: &mut PathBuilder, cx: f32, cy: f32, r: f32, angle1: f32, angle2: f32) {
    // Calculate bezier control point factor
    let k = 4.0 / 3.0 * ((angle2 - angle1) / 4.0).tan();

    // Points on the unit circle
    let x1 = angle1.cos();
    let y1 = angle1.sin();
    let x2 = angle2.cos();
    let y2 = angle2.sin();

    // Control points on the unit circle
    let cp1x = x1 - k * y1;
    let cp1y = y1 + k * x1;
    let cp2x = x2 + k * y2;
    let cp2y = y2 - k * x2;

    path.cubic_to(
        cx + r * cp1x,
        cy + r * cp1y,
        cx + r * cp2x,
        cy + r * cp2y,
        cx + r * x2,
        cy + r * y2,
    );
}

/// Add an arc connecting two tangent lines (arcTo operation).
///
/// `(x0, y0)` is the current point. The path receives a line to the first
/// tangent point followed by the arc; it never starts a new subpath.
pub fn arc_to(path: &mut PathBuilder, x0: f32, y0: f32, params: &ArcToParams) {
    let ArcToParams {
        x1,
        y1,
        x2,
        y2,
        radius,
    } = *params;

    if radius <= 0.0 {
        path.line_to(x1, y1);
        return;
    }

    // Vectors from corner to adjacent points
    let v1x = x0 - x1;
    let v1y = y0 - y1;
    let v2x = x2 - x1;
    let v2y = y2 - y1;

    let len1 = (v1x * v1x + v1y * v1y).sqrt();
    let len2 = (v2x * v2x + v2y * v2y).sqrt();

    if len1 < 1e-6 || len2 < 1e-6 {
        path.line_to(x1, y1);
        return;
    }

    let v1x = v1x / len1;
    let v1y = v1y / len1;
    let v2x = v2x / len2;
    let v2y = v2y / len2;

    // Angle between the two legs; collinear legs degrade to a straight line
    let cross = v1x * v2y - v1y * v2x;
    let dot = v1x * v2x + v1y * v2y;
    let angle = cross.atan2(dot);

    if angle.abs() < 1e-6 || (PI - angle.abs()).abs() < 1e-6 {
        path.line_to(x1, y1);
        return;
    }

    // Tangent points along each leg
    let seg_len = radius / (angle / 2.0).tan().abs();
    let start_x = x1 + v1x * seg_len;
    let start_y = y1 + v1y * seg_len;
    let end_x = x1 + v2x * seg_len;
    let end_y = y1 + v2y * seg_len;

    // Arc center lies on the bisector, `radius` away from both legs
    let bx = v1x + v2x;
    let by = v1y + v2y;
    let blen = (bx * bx + by * by).sqrt();
    let center_dist = (radius * radius + seg_len * seg_len).sqrt();
    let cx = x1 + bx / blen * center_dist;
    let cy = y1 + by / blen * center_dist;

    let start_angle = (start_y - cy).atan2(start_x - cx);
    let end_angle = (end_y - cy).atan2(end_x - cx);

    path.line_to(start_x, start_y);

    // Sweep direction follows the turn of the corner
    let mut arc_path = PathBuilder::new();
    arc(
        &mut arc_path,
        &ArcParams {
            x: cx,
            y: cy,
            radius,
            start_angle,
            end_angle,
            anticlockwise: cross > 0.0,
        },
    );
    if let Some(arc_path) = arc_path.finish() {
        for segment in arc_path.segments() {
            if let tiny_skia::PathSegment::CubicTo(c1, c2, p) = segment {
                path.cubic_to(c1.x, c1.y, c2.x, c2.y, p.x, p.y);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn last_point(builder: PathBuilder) -> (f32, f32) {
        let path = builder.finish().unwrap();
        let p = path.points().last().copied().unwrap();
        (p.x, p.y)
    }

    #[test]
    fn test_arc_full_circle() {
        let mut builder = PathBuilder::new();
        arc(
            &mut builder,
            &ArcParams {
                x: 50.0,
                y: 50.0,
                radius: 50.0,
                start_angle: 0.0,
                end_angle: 2.0 * PI,
                anticlockwise: false,
            },
        );
        let path = builder.finish().unwrap();
        let bounds = path.bounds();
        assert!((bounds.width() - 100.0).abs() < 0.5);
        assert!((bounds.height() - 100.0).abs() < 0.5);
    }

    #[test]
    fn test_arc_quarter_circle_ends_at_bottom() {
        let mut builder = PathBuilder::new();
        arc(
            &mut builder,
            &ArcParams {
                x: 50.0,
                y: 50.0,
                radius: 50.0,
                start_angle: 0.0,
                end_angle: PI / 2.0,
                anticlockwise: false,
            },
        );
        let (x, y) = last_point(builder);
        assert!((x - 50.0).abs() < 1e-3);
        assert!((y - 100.0).abs() < 1e-3);
    }

    #[test]
    fn test_arc_to_rounds_corner() {
        // Top-right corner of a 100x100 box with radius 10
        let mut builder = PathBuilder::new();
        builder.move_to(0.0, 0.0);
        arc_to(
            &mut builder,
            0.0,
            0.0,
            &ArcToParams {
                x1: 100.0,
                y1: 0.0,
                x2: 100.0,
                y2: 100.0,
                radius: 10.0,
            },
        );
        let (x, y) = last_point(builder);
        assert!((x - 100.0).abs() < 1e-3);
        assert!((y - 10.0).abs() < 1e-3);
    }

    #[test]
    fn test_arc_to_zero_radius_is_line() {
        let mut builder = PathBuilder::new();
        builder.move_to(0.0, 0.0);
        arc_to(
            &mut builder,
            0.0,
            0.0,
            &ArcToParams {
                x1: 100.0,
                y1: 0.0,
                x2: 100.0,
                y2: 100.0,
                radius: 0.0,
            },
        );
        assert_eq!(last_point(builder), (100.0, 0.0));
    }
}
