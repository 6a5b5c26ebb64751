#![doc = include_str!("../README.md")]

pub mod config;
pub mod editor;
pub mod error;
pub mod export;
pub mod fit;
pub mod input;
pub mod layout;
pub mod loader;
pub mod palette;
pub mod renderer;
pub mod shapes;

pub use config::RenderConfig;
pub use editor::{CardEditor, CardFields};
pub use error::{CardError, CardResult};
pub use input::{CardInput, ClassCount, FrameStyle};
pub use layout::CardLayout;
pub use renderer::CardSurface;

pub use cardforge_canvas2d;
pub use serde_json;
