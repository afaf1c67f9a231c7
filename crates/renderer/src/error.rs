//! Error types for glyph rendering.

use thiserror::Error;

pub type RenderResult<T> = Result<T, RenderError>;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Invalid arrow style: {0}")]
    Style(String),

    #[error("Invalid glyph SVG: {0}")]
    Svg(String),

    #[error("Cannot allocate {width}x{height} pixmap")]
    Pixmap { width: u32, height: u32 },

    #[error("PNG encoding failed: {0}")]
    Png(String),
}
