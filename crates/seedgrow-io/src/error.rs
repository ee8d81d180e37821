//! I/O error types

use thiserror::Error;

/// Errors raised while reading or writing PNG and PNM images
#[derive(Error, Debug)]
pub enum IoError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Format not recognized, or its feature is disabled
    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),

    /// Malformed header or truncated pixel data
    #[error("invalid image data: {0}")]
    InvalidData(String),

    /// The PNG decoder rejected the stream
    #[error("decode error: {0}")]
    DecodeError(String),

    /// The PNG encoder rejected the image or its text
    #[error("encode error: {0}")]
    EncodeError(String),

    /// Decoded header describes an image the core cannot hold
    #[error("core error: {0}")]
    Core(#[from] seedgrow_core::Error),
}

/// Convenience alias for I/O results.
pub type IoResult<T> = Result<T, IoError>;
