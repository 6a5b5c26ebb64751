//! Card renderer.
//!
//! A render pass repaints the whole surface from a [`CardInput`]: frame,
//! illustration panel, header strip, secondary labels, then the technique grid.
//! Each section saves and restores the drawing state around its own work.

use crate::config::RenderConfig;
use crate::error::CardResult;
use crate::input::CardInput;
use crate::layout::{
    CardLayout, FrameLayout, GridLayout, HeaderLayout, IllustrationLayout, TextItem,
    CANVAS_HEIGHT, CANVAS_WIDTH,
};
use crate::palette::{resolve_frame, FrameStylePalette};
use crate::shapes::{round_rect, round_rect_path, ShapePaint};
use cardforge_canvas2d::{Canvas2dContext, CanvasColor, ResolvedFontConfig};

const ILLUSTRATION_FILL: CanvasColor = CanvasColor::from_rgba8(255, 255, 255, 20);
const CAPTION_COLOR: CanvasColor = CanvasColor::from_rgba8(255, 255, 255, 153);
const SECTION_FILL: CanvasColor = CanvasColor::from_rgba8(0, 0, 0, 89);
const GRID_LINE: CanvasColor = CanvasColor::from_rgba8(255, 255, 255, 89);
const TAG_TEXT: CanvasColor = CanvasColor::from_rgba8(15, 23, 42, 255);
const GRID_LINE_WIDTH: f32 = 1.0;
const MIN_TEXT_PX: f32 = 8.0;

/// The drawing surface a card is painted on.
pub struct CardSurface {
    ctx: Canvas2dContext,
    scale: f32,
    ppi: f32,
    font_family: String,
    text_color: CanvasColor,
}

impl CardSurface {
    /// Create a blank (fully transparent) surface, loading fonts per `config`.
    pub fn new(config: &RenderConfig) -> CardResult<Self> {
        let resolved = config.font_config().resolve();
        Self::with_resolved(config, &resolved)
    }

    /// Create a blank surface sharing an already resolved font database.
    pub fn with_resolved(config: &RenderConfig, fonts: &ResolvedFontConfig) -> CardResult<Self> {
        config.validate()?;
        let width = (CANVAS_WIDTH * config.scale).round() as u32;
        let height = (CANVAS_HEIGHT * config.scale).round() as u32;
        let ctx = Canvas2dContext::with_resolved(width, height, fonts)?;
        log::debug!(
            "created {width}x{height} card surface ({} font faces)",
            fonts.face_count()
        );
        Ok(Self {
            ctx,
            scale: config.scale,
            ppi: config.ppi,
            font_family: config.font_family.clone(),
            text_color: config.text_color()?,
        })
    }

    pub fn width(&self) -> u32 {
        self.ctx.width()
    }

    pub fn height(&self) -> u32 {
        self.ctx.height()
    }

    pub fn ppi(&self) -> f32 {
        self.ppi
    }

    pub fn context(&self) -> &Canvas2dContext {
        &self.ctx
    }

    /// Straight-alpha RGBA of the device pixel at `(x, y)`.
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let data = self.ctx.get_image_data(x as i32, y as i32, 1, 1);
        [data[0], data[1], data[2], data[3]]
    }

    /// Repaint the whole surface from `input`.
    pub fn render(&mut self, input: &CardInput) {
        let layout = CardLayout::compute(input);
        let palette = resolve_frame(input.frame_style);
        log::debug!("rendering card with {} frame", input.frame_style);

        self.ctx.reset();
        self.ctx.scale(self.scale, self.scale);

        self.draw_frame(&layout.frame, &palette);
        self.draw_illustration(&layout.illustration, input);
        self.draw_header(&layout.header, &palette);
        self.draw_labels(&layout.labels);
        self.draw_grid(&layout.grid);
    }

    fn draw_frame(&mut self, frame: &FrameLayout, palette: &FrameStylePalette) {
        let ctx = &mut self.ctx;
        ctx.save();

        let bg = frame.background;
        let mut background = ctx.create_linear_gradient(bg.x, bg.y, bg.right(), bg.bottom());
        background.add_even_stops(palette.background_stops);
        ctx.set_fill_style_gradient(background);
        ctx.fill_rect(&bg);

        ctx.set_fill_style_color(palette.panel_fill);
        round_rect(ctx, &frame.panel, frame.panel_radius, ShapePaint::Fill);

        let b = frame.border;
        let mut border = ctx.create_linear_gradient(b.x, b.y, b.right(), b.bottom());
        border.add_even_stops(palette.border_stops);
        ctx.set_stroke_style_gradient(border);
        ctx.set_line_width(frame.border_width);
        round_rect(ctx, &frame.border, frame.border_radius, ShapePaint::Stroke);

        ctx.restore();
    }

    fn draw_illustration(&mut self, section: &IllustrationLayout, input: &CardInput) {
        self.ctx.save();

        self.ctx.set_fill_style_color(ILLUSTRATION_FILL);
        round_rect(&mut self.ctx, &section.panel, section.radius, ShapePaint::Fill);

        match (&input.illustration, section.image) {
            (Some(image), Some(dest)) => match image.as_image_data() {
                Ok(data) => {
                    self.ctx.save();
                    if round_rect_path(&mut self.ctx, &section.panel, section.radius) {
                        self.ctx.clip();
                    }
                    self.ctx
                        .draw_image_data_scaled(&data, dest.x, dest.y, dest.width, dest.height);
                    self.ctx.restore();
                }
                Err(err) => log::warn!("Skipping illustration: {err}"),
            },
            _ => {
                if let Some(caption) = &section.caption {
                    self.draw_text(caption, CAPTION_COLOR);
                }
            }
        }

        self.ctx.restore();
    }

    fn draw_header(&mut self, header: &HeaderLayout, palette: &FrameStylePalette) {
        self.ctx.save();

        self.ctx.set_fill_style_color(SECTION_FILL);
        round_rect(&mut self.ctx, &header.panel, header.radius, ShapePaint::Fill);

        let color = self.text_color;
        self.draw_text(&header.title, color);
        self.draw_text(&header.username, color);
        self.draw_text(&header.monster_name, color);

        if let Some(tag) = &header.race_tag {
            self.ctx.set_fill_style_color(palette.accent());
            round_rect(&mut self.ctx, &tag.rect, tag.radius, ShapePaint::Fill);
            self.draw_text(&tag.text, TAG_TEXT);
        }

        self.ctx.restore();
    }

    fn draw_labels(&mut self, labels: &[TextItem]) {
        self.ctx.save();
        let color = self.text_color;
        for label in labels {
            self.draw_text(label, color);
        }
        self.ctx.restore();
    }

    fn draw_grid(&mut self, grid: &GridLayout) {
        self.ctx.save();

        self.ctx.set_fill_style_color(SECTION_FILL);
        round_rect(&mut self.ctx, &grid.panel, grid.radius, ShapePaint::Fill);

        self.ctx.set_stroke_style_color(GRID_LINE);
        self.ctx.set_line_width(GRID_LINE_WIDTH);
        let color = self.text_color;
        for cell in &grid.cells {
            self.ctx.stroke_rect(&cell.rect);
            self.draw_text(&cell.text, color);
        }

        self.ctx.restore();
    }

    /// Draw one text item. Empty text draws nothing.
    ///
    /// Text wider than `max_width` is drawn at a proportionally smaller size,
    /// and ink outside `clip` is discarded.
    fn draw_text(&mut self, item: &TextItem, color: CanvasColor) {
        if item.text.is_empty() {
            return;
        }
        if let Some(rect) = &item.clip {
            self.ctx.save();
            self.ctx.begin_path();
            self.ctx.rect(rect);
            self.ctx.clip();
        }

        self.set_item_font(item, item.size_px);
        if let Some(max_width) = item.max_width {
            let width = self.ctx.measure_text(&item.text).width;
            if width > max_width {
                let size_px = (item.size_px * max_width / width).max(MIN_TEXT_PX);
                log::debug!("shrinking {:?} from {}px to {size_px}px", item.text, item.size_px);
                self.set_item_font(item, size_px);
            }
        }
        self.ctx.set_fill_style_color(color);
        self.ctx.set_text_align(item.align);
        self.ctx.set_text_baseline(item.baseline);
        self.ctx.fill_text(&item.text, item.x, item.y);

        if item.clip.is_some() {
            self.ctx.restore();
        }
    }

    fn set_item_font(&mut self, item: &TextItem, size_px: f32) {
        let weight = if item.bold { "bold " } else { "" };
        let font = format!("{weight}{size_px}px {}", css_family(&self.font_family));
        if let Err(err) = self.ctx.set_font(&font) {
            log::warn!("Invalid font {font:?}, keeping previous font: {err}");
        }
    }
}

/// Quote a family name unless it is a CSS generic family.
fn css_family(family: &str) -> String {
    match family {
        "sans-serif" | "serif" | "monospace" | "cursive" | "fantasy" => family.to_string(),
        name => format!("\"{}\"", name.replace('"', "")),
    }
}

/// Render `input` onto `surface`. Without a surface the pass is a no-op.
pub fn render(surface: Option<&mut CardSurface>, input: &CardInput) -> bool {
    match surface {
        Some(surface) => {
            surface.render(input);
            true
        }
        None => {
            log::debug!("no render surface, skipping render pass");
            false
        }
    }
}
