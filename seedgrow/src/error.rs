//! Error types for the seedgrow tool

use crate::config::ConfigError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by the batch pipeline
#[derive(Debug, Error)]
pub enum AppError {
    /// Invalid or unreadable configuration
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Image decoding or encoding failed
    #[error("image I/O error: {0}")]
    Io(#[from] seedgrow_io::IoError),

    /// Region growing failed (e.g. seed out of bounds)
    #[error("region growing failed: {0}")]
    Region(#[from] seedgrow_region::RegionError),

    /// Image conversion or drawing failed
    #[error("core error: {0}")]
    Core(#[from] seedgrow_core::Error),

    /// Input image does not exist
    #[error("image not found: {}", .0.display())]
    ImageNotFound(PathBuf),

    /// Output directory could not be created
    #[error("failed to create directory {}: {source}", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result type for pipeline operations
pub type AppResult<T> = Result<T, AppError>;
