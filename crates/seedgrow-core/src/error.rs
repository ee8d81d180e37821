//! Error types for seedgrow-core

use thiserror::Error;

/// Errors raised by image construction, access and conversion
#[derive(Error, Debug)]
pub enum Error {
    /// Zero width or height
    #[error("image cannot be {width}x{height}")]
    InvalidDimension { width: u32, height: u32 },

    /// Pixel or element index outside its container
    #[error("index {index} out of range for length {len}")]
    IndexOutOfBounds { index: usize, len: usize },

    /// Two images that must match in size do not
    #[error("images differ in size: {}x{} vs {}x{}", .expected.0, .expected.1, .actual.0, .actual.1)]
    DimensionMismatch {
        expected: (u32, u32),
        actual: (u32, u32),
    },

    /// Depth is valid but the operation does not handle it
    #[error("operation not available at {0} bpp")]
    UnsupportedDepth(u32),

    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    /// Nothing to operate on
    #[error("empty input: {0}")]
    NullInput(&'static str),
}

/// Result type alias for seedgrow-core operations
pub type Result<T> = std::result::Result<T, Error>;
