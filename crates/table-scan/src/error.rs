//! Error types for table scanning.

use renderer::RenderError;
use thiserror::Error;

pub type ScanResult<T> = Result<T, ScanError>;

/// Errors that abort a scan pass.
#[derive(Debug, Error)]
pub enum ScanError {
    /// A wind row cell did not read as `angle°/speed`.
    #[error("Row {row} ('{label}'), column {column}: cell '{text}' is not angle°/speed")]
    CellPattern {
        row: usize,
        column: usize,
        label: String,
        text: String,
    },

    #[error("Row {row} ('{label}'): unknown wind unit '{unit}'")]
    UnknownUnit {
        row: usize,
        label: String,
        unit: String,
    },

    #[error("Row {row} ('{label}'): wind height '{height}' is out of range")]
    HeightOutOfRange {
        row: usize,
        label: String,
        height: String,
    },

    #[error("No cell at row {row}, column {column}")]
    NoSuchCell { row: usize, column: usize },

    #[error("Invalid label selector: {0}")]
    Selector(String),

    #[error(transparent)]
    Render(#[from] RenderError),
}
