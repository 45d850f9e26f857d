//! Error types for Clipline.

use thiserror::Error;

/// Main error type for Clipline operations.
#[derive(Error, Debug)]
pub enum ClipLineError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Result type alias for Clipline operations.
pub type Result<T> = std::result::Result<T, ClipLineError>;
