//! Rectangles, arc parameters, colors and image views shared by the context
//! and its callers.

use crate::error::{Canvas2dError, Canvas2dResult};
use std::str::FromStr;

/// Parameters for a circular arc.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcParams {
    /// X coordinate of the arc center.
    pub x: f32,
    /// Y coordinate of the arc center.
    pub y: f32,
    /// Radius of the arc.
    pub radius: f32,
    /// Starting angle in radians.
    pub start_angle: f32,
    /// Ending angle in radians.
    pub end_angle: f32,
    /// If true, draw arc counterclockwise.
    pub anticlockwise: bool,
}

/// Parameters for an arcTo operation.
///
/// The arc is drawn from the current point through a tangent defined by
/// two control points with a given radius.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ArcToParams {
    /// First control point X.
    pub x1: f32,
    /// First control point Y.
    pub y1: f32,
    /// Second control point X.
    pub x2: f32,
    /// Second control point Y.
    pub y2: f32,
    /// Arc radius.
    pub radius: f32,
}

/// Parameters for a rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RectParams {
    /// X coordinate of the rectangle origin.
    pub x: f32,
    /// Y coordinate of the rectangle origin.
    pub y: f32,
    /// Width of the rectangle.
    pub width: f32,
    /// Height of the rectangle.
    pub height: f32,
}

impl RectParams {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Right edge.
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Bottom edge.
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Center point.
    pub fn center(&self) -> (f32, f32) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Shrink the rectangle by `amount` on every side.
    pub fn inset(&self, amount: f32) -> Self {
        Self {
            x: self.x + amount,
            y: self.y + amount,
            width: self.width - 2.0 * amount,
            height: self.height - 2.0 * amount,
        }
    }

    /// Whether `other` lies entirely inside this rectangle (edges inclusive).
    pub fn contains_rect(&self, other: &RectParams) -> bool {
        const EPS: f32 = 1e-3;
        other.x >= self.x - EPS
            && other.y >= self.y - EPS
            && other.right() <= self.right() + EPS
            && other.bottom() <= self.bottom() + EPS
    }
}

/// A backend-neutral RGBA color with 8-bit components.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CanvasColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl CanvasColor {
    pub const WHITE: CanvasColor = CanvasColor::from_rgba8(255, 255, 255, 255);
    pub const BLACK: CanvasColor = CanvasColor::from_rgba8(0, 0, 0, 255);

    /// Create a color from 8-bit RGBA components.
    pub const fn from_rgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Create a color from floating-point RGBA components (each in 0.0..=1.0).
    pub fn from_rgba_f32(r: f32, g: f32, b: f32, a: f32) -> Self {
        Self {
            r: (r.clamp(0.0, 1.0) * 255.0).round() as u8,
            g: (g.clamp(0.0, 1.0) * 255.0).round() as u8,
            b: (b.clamp(0.0, 1.0) * 255.0).round() as u8,
            a: (a.clamp(0.0, 1.0) * 255.0).round() as u8,
        }
    }
}

impl FromStr for CanvasColor {
    type Err = Canvas2dError;

    /// Parse a CSS color string (`#rgb`, `rgba(...)`, named colors, ...).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parsed = csscolorparser::parse(s)
            .map_err(|e| Canvas2dError::InvalidColor(format!("{}: {}", s, e)))?;
        let [r, g, b, a] = parsed.to_array();
        Ok(CanvasColor::from_rgba_f32(r, g, b, a))
    }
}

impl From<CanvasColor> for tiny_skia::Color {
    fn from(c: CanvasColor) -> Self {
        tiny_skia::Color::from_rgba8(c.r, c.g, c.b, c.a)
    }
}

/// Borrowed premultiplied RGBA8 pixel data for drawImage operations.
#[derive(Debug, Clone, Copy)]
pub struct CanvasImageDataRef<'a> {
    pub data: &'a [u8],
    pub width: u32,
    pub height: u32,
}

impl<'a> CanvasImageDataRef<'a> {
    /// Wrap pixel data, checking that its length matches `width * height * 4`.
    pub fn new(data: &'a [u8], width: u32, height: u32) -> Canvas2dResult<Self> {
        let expected = width as usize * height as usize * 4;
        if data.len() != expected {
            return Err(Canvas2dError::ImageDataLength {
                expected,
                actual: data.len(),
            });
        }
        Ok(Self {
            data,
            width,
            height,
        })
    }
}
