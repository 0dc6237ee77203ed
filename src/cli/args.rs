//! `gold` subcommands: `show`, `diff`, `normalize` and `list`. Defaults for
//! the fixture root and golden suffix match [`crate::GoldConfig`].

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::config::{DEFAULT_FIXTURE_DIR, DEFAULT_NAME_SUFFIX};

/// The main CLI argument structure.
#[derive(Debug, Parser)]
#[command(
    name = "gold",
    version,
    about = "Inspect, compare and normalize golden files."
)]
pub struct GoldArgs {
    /// Enable debug logging.
    #[arg(long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// An enumeration of all available CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Print a golden file exactly as stored.
    Show {
        /// Path to the golden file.
        #[arg(required = true)]
        file: PathBuf,
    },
    /// Compare two files after line-ending normalization.
    Diff {
        /// The expected (golden) file.
        #[arg(required = true)]
        expected: PathBuf,
        /// The actual output file.
        #[arg(required = true)]
        actual: PathBuf,
        /// Disable colors.
        #[arg(long)]
        plain: bool,
    },
    /// Normalize line endings to `\n`.
    Normalize {
        /// The file to normalize.
        #[arg(required = true)]
        file: PathBuf,
        /// Rewrite the file in place instead of printing it.
        #[arg(long)]
        write: bool,
    },
    /// List golden files under a fixture directory.
    List {
        /// The fixture directory.
        #[arg(default_value = DEFAULT_FIXTURE_DIR)]
        dir: PathBuf,
        /// File suffix that marks a golden.
        #[arg(long, default_value = DEFAULT_NAME_SUFFIX)]
        suffix: String,
    },
}
