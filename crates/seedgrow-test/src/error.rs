//! Error types for the regression harness

use thiserror::Error;

/// Errors that stop a regression check from running
#[derive(Debug, Error)]
pub enum TestError {
    /// Output or golden image could not be decoded
    #[error("cannot read {path}: {message}")]
    ImageLoad { path: String, message: String },

    /// Output image could not be encoded
    #[error("cannot write {path}: {message}")]
    ImageWrite { path: String, message: String },

    /// Golden or regout directory is missing and cannot be made
    #[error("cannot create {path}: {message}")]
    DirectoryCreate { path: String, message: String },

    /// Copying or reading a golden file failed
    #[error("golden file I/O: {0}")]
    Io(#[from] std::io::Error),
}

pub type TestResult<T> = Result<T, TestError>;
