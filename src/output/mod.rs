//! Output writers for snapshot data.
//!
//! The binary codec in [`crate::codec`] is the canonical snapshot format;
//! this module adds a JSON export surface for tooling that wants a
//! self-describing file.

pub mod json;

pub use json::{read_snapshot, write_snapshot, Snapshot};

use std::path::Path;
use thiserror::Error;

/// Errors that can occur during file output
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to write file: {0}")]
    WriteFailed(#[from] std::io::Error),

    #[error("Failed to serialize JSON: {0}")]
    SerializationFailed(#[from] serde_json::Error),

    #[error("Invalid output path: {0}")]
    InvalidPath(String),
}

/// Reject paths that cannot possibly be written to
pub(crate) fn validate_path(path: &Path) -> Result<(), OutputError> {
    if path.as_os_str().is_empty() {
        return Err(OutputError::InvalidPath("empty path".to_string()));
    }
    if path.is_dir() {
        return Err(OutputError::InvalidPath(format!(
            "{} is a directory",
            path.display()
        )));
    }
    Ok(())
}
