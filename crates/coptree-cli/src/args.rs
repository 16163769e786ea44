//! Command-line argument definitions for the Coptree CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`]. Arguments select the input document, the view and the
//! sentence to show, the output destination, configuration file selection,
//! and logging verbosity.

use clap::Parser;

/// Command-line arguments for the Coptree viewer
#[derive(Parser, Debug, Default)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the input CoNLL-U file
    #[arg(help = "Path to the input file")]
    pub input: String,

    /// View to render (text, graph, table, svg, html, conllu)
    #[arg(long, default_value = "text")]
    pub view: String,

    /// Sentence to show, starting at 1
    #[arg(short, long)]
    pub sentence: Option<usize>,

    /// Render every sentence instead of one
    #[arg(short, long)]
    pub all: bool,

    /// Path to the output file; prints to stdout when absent
    #[arg(short, long)]
    pub output: Option<String>,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Browse the document interactively
    #[arg(short, long)]
    pub interactive: bool,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "warn")]
    pub log_level: String,
}
