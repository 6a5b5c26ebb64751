//! Canvas 2D drawing surface used by the card renderer.
//!
//! This crate provides the subset of the Canvas 2D API that card rendering
//! needs, without a browser or JavaScript runtime. It uses:
//! - `tiny-skia` for 2D graphics rendering
//! - `cosmic-text` for text shaping, measurement, and rendering
//! - `fontdb` for font database management
//!
//! # Example
//!
//! ```rust,ignore
//! use cardforge_canvas2d::{Canvas2dContext, RectParams};
//!
//! let mut ctx = Canvas2dContext::new(400, 300)?;
//! ctx.set_fill_style("#ff0000")?;
//! ctx.fill_rect(&RectParams { x: 10.0, y: 10.0, width: 100.0, height: 50.0 });
//! let png_data = ctx.to_png(None)?;
//! ```

mod arc;
mod context;
mod drawing_state;
mod error;
mod font_config;
mod font_parser;
mod geometry;
mod gradient;
mod style;
mod text;

pub use context::Canvas2dContext;
pub use error::{Canvas2dError, Canvas2dResult};
pub use font_config::{FontConfig, ResolvedFontConfig};
pub use geometry::{ArcParams, ArcToParams, CanvasColor, CanvasImageDataRef, RectParams};
pub use gradient::{CanvasGradient, GradientStop};
pub use style::{FillStyle, TextAlign, TextBaseline};
pub use text::TextMetrics;
