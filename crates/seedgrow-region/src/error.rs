//! Error types for seedgrow-region

use thiserror::Error;

/// Errors that can occur during region growing
#[derive(Debug, Error)]
pub enum RegionError {
    /// Core library error
    #[error("core error: {0}")]
    Core(#[from] seedgrow_core::Error),

    /// Unsupported pixel depth for this operation
    #[error("unsupported depth: expected {expected}, got {actual}")]
    UnsupportedDepth { expected: &'static str, actual: u32 },

    /// Seed lies outside the image
    #[error("seed ({row}, {col}) is outside the {height}x{width} image")]
    OutOfBounds {
        row: i64,
        col: i64,
        height: u32,
        width: u32,
    },

    /// Empty image
    #[error("empty image: no pixels to process")]
    EmptyGrid,
}

/// Result type for region operations
pub type RegionResult<T> = Result<T, RegionError>;
