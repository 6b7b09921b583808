//! stattree CLI
//!
//! Inspect, diff, and convert hierarchical statistics snapshots produced
//! by the stattree library.

use anyhow::Result;
use clap::{Parser, Subcommand};
use env_logger::Env;
use std::path::PathBuf;

use stattree::commands::{display_version, execute_diff, execute_dump, execute_export};

/// stattree - hierarchical statistics snapshots
#[derive(Parser, Debug)]
#[command(name = "stattree")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
enum Commands {
    /// Render a binary snapshot as text
    Dump {
        /// Path to the snapshot file
        file: PathBuf,

        /// Suppress percentage-of-parent prefixes
        #[arg(long)]
        no_percents: bool,
    },

    /// Diff two snapshots (target minus baseline) and render the delta
    Diff {
        /// Baseline (earlier) snapshot
        baseline: PathBuf,

        /// Target (later) snapshot
        target: PathBuf,

        /// Write the delta as a binary snapshot instead of printing it
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Convert a binary snapshot to JSON
    Export {
        /// Path to the snapshot file
        file: PathBuf,

        /// Output path for the JSON file
        #[arg(short, long, default_value = "snapshot.json")]
        output: PathBuf,
    },

    /// Display version information
    Version,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let log_level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(Env::default().default_filter_or(log_level)).init();

    match cli.command {
        Commands::Dump { file, no_percents } => {
            execute_dump(&file, !no_percents)?;
        }

        Commands::Diff {
            baseline,
            target,
            output,
        } => {
            execute_diff(&baseline, &target, output)?;
        }

        Commands::Export { file, output } => {
            execute_export(&file, &output)?;
        }

        Commands::Version => {
            display_version();
        }
    }

    Ok(())
}
