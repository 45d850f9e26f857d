//! Ingestion errors.

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("unsupported media type: {0}")]
    Unsupported(PathBuf),
    #[error("metadata for {path} not ready after {waited:?}")]
    MetadataTimeout { path: PathBuf, waited: Duration },
    #[error("probe failed for {path}: {reason}")]
    Probe { path: PathBuf, reason: String },
    #[error("invalid duration {duration} for {path}")]
    InvalidDuration { path: PathBuf, duration: f64 },
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
