use thiserror::Error;

pub type Canvas2dResult<T> = Result<T, Canvas2dError>;

#[derive(Debug, Error)]
pub enum Canvas2dError {
    /// Width or height is zero or above the largest supported surface.
    #[error("Invalid canvas dimensions {width}x{height}")]
    InvalidDimensions { width: u32, height: u32 },

    #[error("Invalid CSS font: {0}")]
    InvalidFont(String),

    #[error("Invalid CSS color: {0}")]
    InvalidColor(String),

    /// Pixel buffer length does not match the stated image dimensions.
    #[error("Image data holds {actual} bytes, {expected} expected")]
    ImageDataLength { expected: usize, actual: usize },

    #[error("PNG encoding failed: {0}")]
    Png(#[from] png::EncodingError),
}
