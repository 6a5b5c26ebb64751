//! Error types for cardforge-rs.

use cardforge_canvas2d::Canvas2dError;
use thiserror::Error;

pub type CardResult<T> = Result<T, CardError>;

#[derive(Debug, Error)]
pub enum CardError {
    #[error(transparent)]
    Canvas(#[from] Canvas2dError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to decode image: {0}")]
    ImageDecode(String),

    #[error("Class count must be between 1 and 4, got {0}")]
    InvalidClassCount(u8),

    #[error("Unknown frame style: {0}")]
    InvalidFrameStyle(String),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

impl From<image::ImageError> for CardError {
    fn from(err: image::ImageError) -> Self {
        CardError::ImageDecode(err.to_string())
    }
}
