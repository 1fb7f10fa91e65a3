//! Command-line argument definitions for the tserr CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Flags given here take precedence over the configuration
//! file.

use std::path::PathBuf;

use clap::Parser;

/// Parse TypeScript compiler diagnostics into structured JSON
#[derive(Parser, Debug, Default)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to a file holding diagnostic text; reads stdin when absent or `-`
    #[arg(help = "Path to the input file, or - for stdin")]
    pub input: Option<String>,

    /// Path to the output JSON file; writes to stdout when absent
    #[arg(short, long)]
    pub output: Option<String>,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Directory holding `<code>.md` explanation documents
    #[arg(short, long)]
    pub dir: Option<PathBuf>,

    /// TypeScript `diagnosticMessages.json` to use instead of the bundled one
    #[arg(short, long)]
    pub registry: Option<PathBuf>,

    /// Report offsets in UTF-16 code units
    #[arg(long)]
    pub utf16: bool,

    /// Report items as `firstItem`, `secondItem`, ... instead of `items`
    #[arg(long)]
    pub legacy_items: bool,

    /// Pretty-print the JSON output
    #[arg(long)]
    pub pretty: bool,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "warn")]
    pub log_level: String,
}

impl Args {
    /// Returns `true` if the blob should be read from stdin.
    pub fn reads_stdin(&self) -> bool {
        self.input.as_deref().is_none_or(|input| input == "-")
    }
}
