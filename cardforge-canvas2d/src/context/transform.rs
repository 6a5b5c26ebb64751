//! Current transformation matrix.

use super::Canvas2dContext;
use tiny_skia::Transform;

impl Canvas2dContext {
    pub fn translate(&mut self, x: f32, y: f32) {
        log::debug!(target: "canvas", "translate {} {}", x, y);
        self.state.transform = self.state.transform.pre_translate(x, y);
    }

    pub fn scale(&mut self, x: f32, y: f32) {
        log::debug!(target: "canvas", "scale {} {}", x, y);
        self.state.transform = self.state.transform.pre_scale(x, y);
    }

    /// Replace the current transform. Non-invertible matrices are ignored
    /// since no point could be drawn through them.
    pub fn set_transform(&mut self, transform: Transform) {
        log::debug!(target: "canvas", "setTransform {:?}", transform);
        if transform.is_finite() && transform.invert().is_some() {
            self.state.transform = transform;
        }
    }

    pub fn reset_transform(&mut self) {
        self.state.transform = Transform::identity();
    }

    pub fn get_transform(&self) -> Transform {
        self.state.transform
    }
}
