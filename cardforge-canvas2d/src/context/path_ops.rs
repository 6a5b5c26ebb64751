//! Path building.
//!
//! Points are mapped through the current transform as they are added, so
//! the stored path is always in device space.

use super::Canvas2dContext;
use crate::geometry::{ArcParams, ArcToParams, RectParams};
use tiny_skia::{PathBuilder, PathSegment, Transform};

/// Device-space path under construction plus the pen position.
#[derive(Debug, Clone)]
pub(crate) struct DevicePath {
    builder: PathBuilder,
    current: Option<(f32, f32)>,
    subpath_start: (f32, f32),
}

impl Default for DevicePath {
    fn default() -> Self {
        Self {
            builder: PathBuilder::new(),
            current: None,
            subpath_start: (0.0, 0.0),
        }
    }
}

impl DevicePath {
    fn move_to(&mut self, x: f32, y: f32) {
        self.builder.move_to(x, y);
        self.current = Some((x, y));
        self.subpath_start = (x, y);
    }

    fn line_to(&mut self, x: f32, y: f32) {
        self.builder.line_to(x, y);
        self.current = Some((x, y));
    }

    fn close(&mut self) {
        if self.current.is_some() {
            self.builder.close();
            self.current = Some(self.subpath_start);
        }
    }

    pub fn current(&self) -> Option<(f32, f32)> {
        self.current
    }

    /// Snapshot of the path so far. `None` while it has no segments.
    pub fn finish(&self) -> Option<tiny_skia::Path> {
        self.builder.clone().finish()
    }
}

impl Canvas2dContext {
    pub fn begin_path(&mut self) {
        log::debug!(target: "canvas", "beginPath");
        self.path = DevicePath::default();
    }

    pub(crate) fn transform_point(&self, x: f32, y: f32) -> (f32, f32) {
        map_point(&self.state.transform, x, y)
    }

    pub fn move_to(&mut self, x: f32, y: f32) {
        log::debug!(target: "canvas", "moveTo {} {}", x, y);
        let (tx, ty) = self.transform_point(x, y);
        self.path.move_to(tx, ty);
    }

    /// Draw a line to a point. Without a current point this acts as `move_to`.
    pub fn line_to(&mut self, x: f32, y: f32) {
        log::debug!(target: "canvas", "lineTo {} {}", x, y);
        let (tx, ty) = self.transform_point(x, y);
        if self.path.current().is_some() {
            self.path.line_to(tx, ty);
        } else {
            self.path.move_to(tx, ty);
        }
    }

    pub fn close_path(&mut self) {
        log::debug!(target: "canvas", "closePath");
        self.path.close();
    }

    /// Add a closed rectangle subpath.
    pub fn rect(&mut self, params: &RectParams) {
        let corners = [
            (params.x, params.y),
            (params.x + params.width, params.y),
            (params.x + params.width, params.y + params.height),
            (params.x, params.y + params.height),
        ];
        for (i, (x, y)) in corners.into_iter().enumerate() {
            let (tx, ty) = self.transform_point(x, y);
            if i == 0 {
                self.path.move_to(tx, ty);
            } else {
                self.path.line_to(tx, ty);
            }
        }
        self.path.close();
    }

    /// Add a circular arc, connected to the current point by a straight line.
    pub fn arc(&mut self, params: &ArcParams) {
        let mut arc_builder = PathBuilder::new();
        crate::arc::arc(&mut arc_builder, params);
        if let Some(path) = arc_builder.finish() {
            self.append_transformed_path(&path, self.state.transform);
        }
    }

    /// Add a line to the first tangent point, then an arc of `radius`
    /// tangent to both legs of the corner at `(x1, y1)`.
    pub fn arc_to(&mut self, params: &ArcToParams) {
        let Some((x0, y0)) = self.path.current() else {
            self.move_to(params.x1, params.y1);
            return;
        };

        let transform = self.state.transform;
        let Some(inverse) = transform.invert() else {
            let (tx, ty) = self.transform_point(params.x1, params.y1);
            self.path.line_to(tx, ty);
            return;
        };

        // The arc is built in user space from the pen position
        let (local_x0, local_y0) = map_point(&inverse, x0, y0);
        let mut arc_builder = PathBuilder::new();
        arc_builder.move_to(local_x0, local_y0);
        crate::arc::arc_to(&mut arc_builder, local_x0, local_y0, params);
        if let Some(path) = arc_builder.finish() {
            self.append_transformed_path(&path, transform);
        }
    }

    /// Append `path` mapped through `transform`. A leading move joins the
    /// existing subpath with a line when there is a current point.
    fn append_transformed_path(&mut self, path: &tiny_skia::Path, transform: Transform) {
        let map = |p: tiny_skia::Point| map_point(&transform, p.x, p.y);
        for (i, segment) in path.segments().enumerate() {
            match segment {
                PathSegment::MoveTo(p) => {
                    let (x, y) = map(p);
                    if i == 0 && self.path.current().is_some() {
                        self.path.line_to(x, y);
                    } else {
                        self.path.move_to(x, y);
                    }
                }
                PathSegment::LineTo(p) => {
                    let (x, y) = map(p);
                    self.path.line_to(x, y);
                }
                PathSegment::QuadTo(ctrl, p) => {
                    let (cx, cy) = map(ctrl);
                    let (x, y) = map(p);
                    self.path.builder.quad_to(cx, cy, x, y);
                    self.path.current = Some((x, y));
                }
                PathSegment::CubicTo(c1, c2, p) => {
                    let (c1x, c1y) = map(c1);
                    let (c2x, c2y) = map(c2);
                    let (x, y) = map(p);
                    self.path.builder.cubic_to(c1x, c1y, c2x, c2y, x, y);
                    self.path.current = Some((x, y));
                }
                PathSegment::Close => self.path.close(),
            }
        }
    }

    /// Device-space bounds of the current path, if it has any segments.
    pub fn current_path_bounds(&self) -> Option<RectParams> {
        let b = self.path.finish()?.bounds();
        Some(RectParams::new(b.x(), b.y(), b.width(), b.height()))
    }
}

fn map_point(transform: &Transform, x: f32, y: f32) -> (f32, f32) {
    (
        transform.sx * x + transform.kx * y + transform.tx,
        transform.ky * x + transform.sy * y + transform.ty,
    )
}
