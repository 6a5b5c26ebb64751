//! Card geometry.
//!
//! [`CardLayout::compute`] turns a [`CardInput`] into every rectangle, anchor
//! and display string a render pass paints. Coordinates are logical units on
//! the 720×1136 card.

use crate::fit::fit_contain;
use crate::input::{
    truncate_chars, CardInput, BATTLE_MEME_CAP, EX_CAP, MONSTER_NAME_CAP, RACE_CAP,
    ROWS_PER_CLASS, TECHNIQUE_CAP, TITLE_CAP, USERNAME_CAP,
};
use cardforge_canvas2d::{RectParams, TextAlign, TextBaseline};

pub const CANVAS_WIDTH: f32 = 720.0;
pub const CANVAS_HEIGHT: f32 = 1136.0;

const FRAME_PADDING: f32 = 18.0;
const FRAME_RADIUS: f32 = 28.0;
const BORDER_INSET: f32 = 6.0;
const BORDER_WIDTH: f32 = 8.0;

const ILLUSTRATION_X: f32 = 48.0;
const ILLUSTRATION_Y: f32 = 180.0;
const ILLUSTRATION_HEIGHT: f32 = 580.0;
const ILLUSTRATION_RADIUS: f32 = 20.0;
pub const ILLUSTRATION_CAPTION: &str = "No illustration";

const HEADER_X: f32 = 32.0;
const HEADER_Y: f32 = 64.0;
const HEADER_HEIGHT: f32 = 132.0;
const HEADER_RADIUS: f32 = 18.0;
const HEADER_TEXT_INSET: f32 = 20.0;
const HEADER_FIRST_LINE: f32 = 40.0;
const HEADER_SECOND_LINE: f32 = 96.0;

pub const TAG_WIDTH: f32 = 88.0;
pub const TAG_HEIGHT: f32 = 32.0;
const TAG_MARGIN: f32 = 12.0;
const TAG_GAP: f32 = 12.0;
const TAG_PADDING: f32 = 8.0;

const LABEL_FIRST_BASELINE: f32 = 796.0;
const LABEL_LINE_HEIGHT: f32 = 34.0;

const GRID_HEIGHT: f32 = 240.0;
const GRID_BOTTOM_MARGIN: f32 = 42.0;
const GRID_RADIUS: f32 = 16.0;
const CELL_PADDING: f32 = 10.0;

const SMALL_TEXT: f32 = 22.0;
const LARGE_TEXT: f32 = 40.0;
const LABEL_TEXT: f32 = 24.0;
const TAG_TEXT: f32 = 18.0;
const CELL_TEXT: f32 = 18.0;

/// One piece of text anchored at `(x, y)`.
#[derive(Debug, Clone, PartialEq)]
pub struct TextItem {
    pub text: String,
    pub x: f32,
    pub y: f32,
    pub size_px: f32,
    pub bold: bool,
    pub align: TextAlign,
    pub baseline: TextBaseline,
    /// Widest the text may be; wider runs are drawn at a smaller size.
    pub max_width: Option<f32>,
    /// Ink outside this rectangle is discarded.
    pub clip: Option<RectParams>,
}

impl TextItem {
    fn new(text: &str, x: f32, y: f32, size_px: f32) -> Self {
        Self {
            text: text.to_string(),
            x,
            y,
            size_px,
            bold: false,
            align: TextAlign::Left,
            baseline: TextBaseline::Alphabetic,
            max_width: None,
            clip: None,
        }
    }

    fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    fn aligned(mut self, align: TextAlign) -> Self {
        self.align = align;
        self
    }

    fn middle(mut self) -> Self {
        self.baseline = TextBaseline::Middle;
        self
    }

    fn fit_within(mut self, width: f32) -> Self {
        self.max_width = Some(width);
        self
    }

    fn clipped_to(mut self, rect: RectParams) -> Self {
        self.clip = Some(rect);
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FrameLayout {
    pub background: RectParams,
    pub panel: RectParams,
    pub panel_radius: f32,
    pub border: RectParams,
    pub border_radius: f32,
    pub border_width: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct IllustrationLayout {
    pub panel: RectParams,
    pub radius: f32,
    /// Destination of the contain-fitted image.
    pub image: Option<RectParams>,
    /// Drawn instead of the image when there is none.
    pub caption: Option<TextItem>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RaceTag {
    pub rect: RectParams,
    pub radius: f32,
    pub text: TextItem,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HeaderLayout {
    pub panel: RectParams,
    pub radius: f32,
    pub title: TextItem,
    pub username: TextItem,
    pub monster_name: TextItem,
    pub race_tag: Option<RaceTag>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GridCell {
    /// Index into the technique list (`column * 6 + row`).
    pub index: usize,
    pub column: usize,
    pub row: usize,
    pub rect: RectParams,
    pub text: TextItem,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GridLayout {
    pub panel: RectParams,
    pub radius: f32,
    pub columns: usize,
    pub rows: usize,
    pub cells: Vec<GridCell>,
}

impl GridLayout {
    pub fn cell(&self, column: usize, row: usize) -> Option<&GridCell> {
        self.cells
            .iter()
            .find(|cell| cell.column == column && cell.row == row)
    }
}

/// Everything a render pass paints, in section order.
#[derive(Debug, Clone, PartialEq)]
pub struct CardLayout {
    pub frame: FrameLayout,
    pub illustration: IllustrationLayout,
    pub header: HeaderLayout,
    pub labels: Vec<TextItem>,
    pub grid: GridLayout,
}

impl CardLayout {
    pub fn compute(input: &CardInput) -> Self {
        Self {
            frame: frame_layout(),
            illustration: illustration_layout(input),
            header: header_layout(input),
            labels: label_layout(input),
            grid: grid_layout(input),
        }
    }
}

fn frame_layout() -> FrameLayout {
    let background = RectParams::new(0.0, 0.0, CANVAS_WIDTH, CANVAS_HEIGHT);
    let panel = background.inset(FRAME_PADDING);
    FrameLayout {
        background,
        panel,
        panel_radius: FRAME_RADIUS,
        border: panel.inset(BORDER_INSET),
        border_radius: FRAME_RADIUS - BORDER_INSET,
        border_width: BORDER_WIDTH,
    }
}

fn illustration_layout(input: &CardInput) -> IllustrationLayout {
    let panel = RectParams::new(
        ILLUSTRATION_X,
        ILLUSTRATION_Y,
        CANVAS_WIDTH - 2.0 * ILLUSTRATION_X,
        ILLUSTRATION_HEIGHT,
    );

    let image = input.illustration.as_ref().and_then(|img| {
        let fit = fit_contain(
            img.width as f32,
            img.height as f32,
            panel.width,
            panel.height,
        );
        (fit.width > 0.0 && fit.height > 0.0).then(|| {
            RectParams::new(
                panel.x + fit.offset_x,
                panel.y + fit.offset_y,
                fit.width,
                fit.height,
            )
        })
    });

    let caption = image.is_none().then(|| {
        let (cx, cy) = panel.center();
        TextItem::new(ILLUSTRATION_CAPTION, cx, cy, LABEL_TEXT)
            .aligned(TextAlign::Center)
            .middle()
    });

    IllustrationLayout {
        panel,
        radius: ILLUSTRATION_RADIUS,
        image,
        caption,
    }
}

fn header_layout(input: &CardInput) -> HeaderLayout {
    let panel = RectParams::new(
        HEADER_X,
        HEADER_Y,
        CANVAS_WIDTH - 2.0 * HEADER_X,
        HEADER_HEIGHT,
    );

    let race = truncate_chars(input.race.trim(), RACE_CAP);
    let race_tag = (!race.is_empty()).then(|| {
        let rect = RectParams::new(
            panel.right() - TAG_MARGIN - TAG_WIDTH,
            panel.y + TAG_MARGIN,
            TAG_WIDTH,
            TAG_HEIGHT,
        );
        let (cx, cy) = rect.center();
        RaceTag {
            rect,
            radius: TAG_HEIGHT / 2.0,
            text: TextItem::new(race, cx, cy, TAG_TEXT)
                .bold()
                .aligned(TextAlign::Center)
                .middle()
                .fit_within(TAG_WIDTH - 2.0 * TAG_PADDING)
                .clipped_to(rect),
        }
    });

    // The tag takes space from the username's right edge
    let reserved = if race_tag.is_some() {
        TAG_WIDTH + TAG_GAP
    } else {
        0.0
    };
    let first_line = panel.y + HEADER_FIRST_LINE;

    HeaderLayout {
        panel,
        radius: HEADER_RADIUS,
        title: TextItem::new(
            truncate_chars(&input.title, TITLE_CAP),
            panel.x + HEADER_TEXT_INSET,
            first_line,
            SMALL_TEXT,
        ),
        username: TextItem::new(
            truncate_chars(&input.username, USERNAME_CAP),
            panel.right() - HEADER_TEXT_INSET - reserved,
            first_line,
            SMALL_TEXT,
        )
        .aligned(TextAlign::Right),
        monster_name: TextItem::new(
            truncate_chars(&input.monster_name, MONSTER_NAME_CAP),
            panel.center().0,
            panel.y + HEADER_SECOND_LINE,
            LARGE_TEXT,
        )
        .bold()
        .aligned(TextAlign::Center),
        race_tag,
    }
}

fn label_layout(input: &CardInput) -> Vec<TextItem> {
    let lines = [
        ("EX", truncate_chars(&input.ex_name, EX_CAP)),
        ("Battle Meme", truncate_chars(&input.battle_meme_name, BATTLE_MEME_CAP)),
    ];

    let mut y = LABEL_FIRST_BASELINE;
    let mut labels = Vec::new();
    for (name, value) in lines {
        if value.is_empty() {
            continue;
        }
        labels.push(TextItem::new(
            &format!("{name}: {value}"),
            ILLUSTRATION_X,
            y,
            LABEL_TEXT,
        ));
        y += LABEL_LINE_HEIGHT;
    }
    labels
}

fn grid_layout(input: &CardInput) -> GridLayout {
    let panel = RectParams::new(
        ILLUSTRATION_X,
        CANVAS_HEIGHT - GRID_BOTTOM_MARGIN - GRID_HEIGHT,
        CANVAS_WIDTH - 2.0 * ILLUSTRATION_X,
        GRID_HEIGHT,
    );
    let columns = input.class_count().get() as usize;
    let rows = ROWS_PER_CLASS;
    let cell_width = panel.width / columns as f32;
    let cell_height = panel.height / rows as f32;

    let cells = (0..columns * rows)
        .map(|index| {
            let column = index / rows;
            let row = index % rows;
            let rect = RectParams::new(
                panel.x + column as f32 * cell_width,
                panel.y + row as f32 * cell_height,
                cell_width,
                cell_height,
            );
            let text = TextItem::new(
                truncate_chars(input.technique(index), TECHNIQUE_CAP),
                rect.x + CELL_PADDING,
                rect.y + cell_height / 2.0,
                CELL_TEXT,
            )
            .middle()
            .clipped_to(rect);
            GridCell {
                index,
                column,
                row,
                rect,
                text,
            }
        })
        .collect();

    GridLayout {
        panel,
        radius: GRID_RADIUS,
        columns,
        rows,
        cells,
    }
}
