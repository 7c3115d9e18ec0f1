//! Command-line argument definitions for the netgraph CLI.
//!
//! This module defines the [`Args`] structure parsed from the command line
//! using [`clap`].

use clap::Parser;

/// Load a graph description, apply its scripted updates and export the
/// node labels as SVG
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the input graph file (TOML)
    #[arg(help = "Path to the input file")]
    pub input: String,

    /// Path to the output SVG file with the label overlay
    #[arg(short, long, default_value = "labels.svg")]
    pub output: String,

    /// Path to configuration file (TOML)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Log level (off, error, warn, info, debug, trace)
    #[arg(long, default_value = "info")]
    pub log_level: String,
}
