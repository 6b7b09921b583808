//! JSON snapshot writer and reader.
//!
//! Wraps a tree in a small versioned envelope with a generation timestamp
//! and writes it as pretty-printed JSON.

use chrono::Utc;
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use super::OutputError;
use crate::node::Node;

/// Schema version of the JSON envelope
pub const SNAPSHOT_VERSION: &str = "1.0.0";

/// A tree plus the metadata needed to interpret it later
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    /// Envelope schema version
    pub version: String,

    /// RFC 3339 timestamp of when the snapshot was taken
    pub generated_at: String,

    /// The statistics tree itself
    pub root: Node,
}

impl Snapshot {
    /// Wrap a tree in a freshly timestamped envelope
    pub fn new(root: Node) -> Self {
        Self {
            version: SNAPSHOT_VERSION.to_string(),
            generated_at: Utc::now().to_rfc3339(),
            root,
        }
    }
}

/// Write a snapshot to a JSON file
///
/// # Errors
/// * [`OutputError::WriteFailed`] - I/O error during write
/// * [`OutputError::SerializationFailed`] - JSON serialization error
/// * [`OutputError::InvalidPath`] - path cannot be created or is invalid
pub fn write_snapshot(snapshot: &Snapshot, output_path: impl AsRef<Path>) -> Result<(), OutputError> {
    let output_path = output_path.as_ref();

    info!("Writing snapshot to: {}", output_path.display());

    super::validate_path(output_path)?;

    if let Some(parent) = output_path.parent() {
        if !parent.exists() && !parent.as_os_str().is_empty() {
            debug!("Creating parent directories: {}", parent.display());
            std::fs::create_dir_all(parent).map_err(|e| {
                OutputError::InvalidPath(format!(
                    "Cannot create directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }
    }

    let file = File::create(output_path).map_err(OutputError::WriteFailed)?;
    let writer = BufWriter::new(file);

    serde_json::to_writer_pretty(writer, snapshot).map_err(OutputError::SerializationFailed)?;

    Ok(())
}

/// Read a snapshot back from a JSON file
pub fn read_snapshot(input_path: impl AsRef<Path>) -> Result<Snapshot, OutputError> {
    let input_path = input_path.as_ref();

    debug!("Reading snapshot from: {}", input_path.display());

    let file = File::open(input_path).map_err(OutputError::WriteFailed)?;
    let snapshot: Snapshot =
        serde_json::from_reader(file).map_err(OutputError::SerializationFailed)?;

    debug!(
        "Snapshot loaded: version {}, root '{}'",
        snapshot.version,
        snapshot.root.name()
    );

    Ok(snapshot)
}
