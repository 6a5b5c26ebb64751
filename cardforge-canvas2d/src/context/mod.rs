//! The drawing context and its state stack. Operations are split across
//! the submodules by concern.

mod drawing;
mod image_ops;
mod path_ops;
mod text_rendering;
mod transform;

use path_ops::DevicePath;

use crate::drawing_state::DrawingState;
use crate::error::{Canvas2dError, Canvas2dResult};
use crate::font_config::{FontConfig, ResolvedFontConfig};
use crate::geometry::CanvasColor;
use crate::gradient::CanvasGradient;
use cosmic_text::{FontSystem, SwashCache};
use tiny_skia::Pixmap;

/// Largest width or height accepted for a surface.
const MAX_DIMENSION: u32 = 32767;

/// A raster surface with Canvas 2D drawing state.
///
/// Pixels are stored premultiplied. Paths are flattened into device space as
/// they are built, so changing the transform mid-path only affects the points
/// added afterwards.
pub struct Canvas2dContext {
    pub(crate) width: u32,
    pub(crate) height: u32,
    pub(crate) pixmap: Pixmap,
    pub(crate) font_system: FontSystem,
    pub(crate) swash_cache: SwashCache,
    pub(crate) state: DrawingState,
    state_stack: Vec<DrawingState>,
    pub(crate) path: DevicePath,
    pub(crate) hinting_enabled: bool,
}

impl Canvas2dContext {
    /// Surface with the default font setup, which scans system fonts.
    pub fn new(width: u32, height: u32) -> Canvas2dResult<Self> {
        Self::with_config(width, height, FontConfig::default())
    }

    pub fn with_config(width: u32, height: u32, config: FontConfig) -> Canvas2dResult<Self> {
        Self::with_resolved(width, height, &config.resolve())
    }

    /// Surface sharing an already loaded font database.
    pub fn with_resolved(
        width: u32,
        height: u32,
        resolved: &ResolvedFontConfig,
    ) -> Canvas2dResult<Self> {
        if width == 0 || height == 0 || width > MAX_DIMENSION || height > MAX_DIMENSION {
            return Err(Canvas2dError::InvalidDimensions { width, height });
        }

        let pixmap =
            Pixmap::new(width, height).ok_or(Canvas2dError::InvalidDimensions { width, height })?;

        let font_system =
            FontSystem::new_with_locale_and_db("en".to_string(), resolved.fontdb.clone());

        Ok(Self {
            width,
            height,
            pixmap,
            font_system,
            swash_cache: SwashCache::new(),
            state: DrawingState::default(),
            state_stack: Vec::new(),
            path: DevicePath::default(),
            hinting_enabled: resolved.hinting_enabled,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Raw premultiplied RGBA pixel buffer.
    pub fn data(&self) -> &[u8] {
        self.pixmap.data()
    }

    pub fn save(&mut self) {
        log::debug!(target: "canvas", "save");
        self.state_stack.push(self.state.clone());
    }

    /// Restore the previously saved drawing state. Unbalanced calls are ignored.
    pub fn restore(&mut self) {
        log::debug!(target: "canvas", "restore");
        if let Some(state) = self.state_stack.pop() {
            self.state = state;
        }
    }

    /// Number of saved states on the stack.
    pub fn save_depth(&self) -> usize {
        self.state_stack.len()
    }

    /// Clear every pixel to transparent and drop all state, saved states
    /// and the current path.
    pub fn reset(&mut self) {
        log::debug!(target: "canvas", "reset");
        self.pixmap.fill(tiny_skia::Color::TRANSPARENT);
        self.state = DrawingState::default();
        self.state_stack.clear();
        self.begin_path();
    }

    /// Solid fill from a CSS color such as `"#0f172a"` or `"rgba(0,0,0,0.35)"`.
    pub fn set_fill_style(&mut self, css: &str) -> Canvas2dResult<()> {
        self.set_fill_style_color(css.parse()?);
        Ok(())
    }

    pub fn set_fill_style_color(&mut self, color: CanvasColor) {
        self.state.fill_style = color.into();
    }

    pub fn set_fill_style_gradient(&mut self, gradient: CanvasGradient) {
        self.state.fill_style = gradient.into();
    }

    /// Solid stroke from a CSS color.
    pub fn set_stroke_style(&mut self, css: &str) -> Canvas2dResult<()> {
        self.set_stroke_style_color(css.parse()?);
        Ok(())
    }

    pub fn set_stroke_style_color(&mut self, color: CanvasColor) {
        self.state.stroke_style = color.into();
    }

    pub fn set_stroke_style_gradient(&mut self, gradient: CanvasGradient) {
        self.state.stroke_style = gradient.into();
    }

    /// Line width in user space. Non-finite and non-positive widths are ignored.
    pub fn set_line_width(&mut self, width: f32) {
        if width.is_finite() && width > 0.0 {
            self.state.line_width = width;
        }
    }

    /// Opacity applied to every later paint. Values outside `0.0..=1.0` are ignored.
    pub fn set_global_alpha(&mut self, alpha: f32) {
        if alpha.is_finite() && (0.0..=1.0).contains(&alpha) {
            self.state.global_alpha = alpha;
        }
    }

    /// Bilinear (true) or nearest-neighbour (false) sampling for scaled images.
    pub fn set_image_smoothing_enabled(&mut self, enabled: bool) {
        self.state.image_smoothing_enabled = enabled;
    }

    /// Gradient along the line from `(x0, y0)` to `(x1, y1)` in user space.
    pub fn create_linear_gradient(&self, x0: f32, y0: f32, x1: f32, y1: f32) -> CanvasGradient {
        CanvasGradient::new_linear(x0, y0, x1, y1)
    }
}
