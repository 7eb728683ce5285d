use std::io;

use thiserror::Error;

/// Errors originating from the palette grid model.
#[derive(Debug, Error)]
pub enum Error {
    #[error("palette grid needs at least one column")]
    ZeroColumns,

    #[error("palette grid needs at least one row")]
    ZeroRows,

    #[error("palette grid of {columns}x{rows} cells is too large")]
    TooManyCells { columns: usize, rows: usize },

    #[error("border width must be a finite non-negative number, got {0}")]
    InvalidBorderWidth(f32),

    #[error("preview diameter must be a finite positive number, got {0}")]
    InvalidPreviewDiameter(f32),

    #[error("palette cells are degenerate: {width}x{height}")]
    DegenerateCell { width: f32, height: f32 },

    #[error("palette settings IO failed: {0}")]
    Io(#[from] io::Error),

    #[error("palette settings JSON failed: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenient result alias for fallible operations in this crate.
pub type Result<T> = std::result::Result<T, Error>;
