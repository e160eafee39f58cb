//! Command-line interface definitions.
//!
//! All CLI arguments are defined with the clap derive API. The binary has
//! a single interactive mode: files listed on the command line seed the
//! collection, and the TUI takes it from there.
//!
//! # Example
//!
//! ```bash
//! # Start the TUI with three files preloaded
//! dupelens invoice_final.pdf invoice_final_v2.pdf readme.txt
//!
//! # Start with an empty collection and add files interactively
//! dupelens
//!
//! # Verbose logging for debugging
//! dupelens -v report.pdf report_v2.pdf
//! ```

use clap::{Parser, ValueEnum};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Smart duplicate finder with interactive TUI.
///
/// dupelens scores every pair of submitted files for name similarity and
/// reports likely duplicates. Only file metadata is used; content is never
/// read or hashed.
#[derive(Debug, Parser)]
#[command(name = "dupelens")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Files to preload into the collection
    #[arg(value_name = "FILES")]
    pub files: Vec<PathBuf>,

    /// Increase verbosity level (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Suppress all output except errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Disable colored output
    #[arg(long, env = "NO_COLOR")]
    pub no_color: bool,

    /// Emit errors as JSON on stderr (for scripting)
    #[arg(long)]
    pub json_errors: bool,

    /// TUI color theme
    #[arg(long, value_enum)]
    pub theme: Option<ThemeArg>,
}

/// Theme selection argument.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum ThemeArg {
    /// Detect from the terminal environment (default)
    #[default]
    Auto,
    /// High-contrast dark palette
    Dark,
    /// High-contrast light palette
    Light,
}
