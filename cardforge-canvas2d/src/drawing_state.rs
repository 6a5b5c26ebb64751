//! The part of the context that `save`/`restore` snapshot.

use crate::font_parser::ParsedFont;
use crate::style::{FillStyle, TextAlign, TextBaseline};
use tiny_skia::{FilterQuality, Stroke, Transform};

const MITER_LIMIT: f32 = 10.0;

#[derive(Debug, Clone)]
pub(crate) struct DrawingState {
    pub fill_style: FillStyle,
    pub stroke_style: FillStyle,
    /// Line width in user space.
    pub line_width: f32,
    pub font: ParsedFont,
    pub text_align: TextAlign,
    pub text_baseline: TextBaseline,
    pub global_alpha: f32,
    pub transform: Transform,
    /// Clip region, already in device space.
    pub clip_path: Option<tiny_skia::Path>,
    pub image_smoothing_enabled: bool,
}

impl Default for DrawingState {
    fn default() -> Self {
        Self {
            fill_style: FillStyle::default(),
            stroke_style: FillStyle::default(),
            line_width: 1.0,
            font: ParsedFont::default(),
            text_align: TextAlign::default(),
            text_baseline: TextBaseline::default(),
            global_alpha: 1.0,
            transform: Transform::identity(),
            clip_path: None,
            image_smoothing_enabled: true,
        }
    }
}

impl DrawingState {
    /// Stroke settings for a device-space path.
    ///
    /// Paths are transformed as they are built, so the user-space line width
    /// is scaled by the mean axis scale of the current transform.
    pub fn device_stroke(&self) -> Stroke {
        let t = &self.transform;
        let scale =
            ((t.sx * t.sx + t.ky * t.ky).sqrt() + (t.kx * t.kx + t.sy * t.sy).sqrt()) / 2.0;
        Stroke {
            width: self.line_width * scale,
            miter_limit: MITER_LIMIT,
            ..Stroke::default()
        }
    }

    pub fn filter_quality(&self) -> FilterQuality {
        if self.image_smoothing_enabled {
            FilterQuality::Bilinear
        } else {
            FilterQuality::Nearest
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_device_stroke_follows_scale() {
        let mut state = DrawingState {
            line_width: 3.0,
            ..DrawingState::default()
        };
        assert_eq!(state.device_stroke().width, 3.0);

        state.transform = Transform::from_scale(2.0, 2.0);
        assert_eq!(state.device_stroke().width, 6.0);
        assert_eq!(state.device_stroke().miter_limit, MITER_LIMIT);
    }

    #[test]
    fn test_filter_quality() {
        let mut state = DrawingState::default();
        assert_eq!(state.filter_quality(), FilterQuality::Bilinear);
        state.image_smoothing_enabled = false;
        assert_eq!(state.filter_quality(), FilterQuality::Nearest);
    }
}
