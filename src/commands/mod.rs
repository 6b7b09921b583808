//! CLI command implementations.
//!
//! These wrap the library surface for the `stattree` binary: dump a binary
//! snapshot as text, diff two snapshots, or convert one to JSON.

use anyhow::{Context, Result};
use log::info;
use std::path::{Path, PathBuf};

use crate::codec;
use crate::output::{write_snapshot, Snapshot};
use crate::render::{render_tree_with, RenderOptions};

/// Read a binary snapshot and print its text rendering to stdout
pub fn execute_dump(file: &Path, percents: bool) -> Result<()> {
    let root = codec::read_file(file)
        .with_context(|| format!("failed to read snapshot {}", file.display()))?;

    print!("{}", render_tree_with(&root, RenderOptions { percents }));
    Ok(())
}

/// Diff two binary snapshots and render the delta tree.
///
/// With `output` set, the delta is written as a binary snapshot instead of
/// printed.
pub fn execute_diff(baseline: &Path, target: &Path, output: Option<PathBuf>) -> Result<()> {
    let previous = codec::read_file(baseline)
        .with_context(|| format!("failed to read baseline {}", baseline.display()))?;
    let current = codec::read_file(target)
        .with_context(|| format!("failed to read target {}", target.display()))?;

    let delta = current
        .subtract(&previous)
        .context("snapshots are not structurally comparable")?;

    match output {
        Some(path) => {
            codec::write_file(&delta, &path)
                .with_context(|| format!("failed to write delta to {}", path.display()))?;
            info!("delta snapshot written to {}", path.display());
        }
        None => print!("{}", delta.render()),
    }
    Ok(())
}

/// Convert a binary snapshot to a timestamped JSON file
pub fn execute_export(file: &Path, output: &Path) -> Result<()> {
    let root = codec::read_file(file)
        .with_context(|| format!("failed to read snapshot {}", file.display()))?;

    let snapshot = Snapshot::new(root);
    write_snapshot(&snapshot, output)
        .with_context(|| format!("failed to write JSON to {}", output.display()))?;

    info!("JSON snapshot written to {}", output.display());
    Ok(())
}

/// Display version information
pub fn display_version() {
    println!("stattree {}", env!("CARGO_PKG_VERSION"));
    println!("snapshot format: DSN1");
}
