//! # CLI Structure and Argument Parsing
//!
//! `exemplar` has three subcommands that form a pipeline:
//!
//! ```bash
//! # Compile examples/ into a JSON dataset
//! exemplar build --examples-dir examples --output data/examples.json
//!
//! # Render the dataset as a static site
//! exemplar site --data data/examples.json --out docs
//!
//! # Serve pages straight from the dataset (or from the examples)
//! exemplar serve --data data/examples.json --addr 127.0.0.1:5001
//! ```
//!
//! Global options (`--verbose`, `--quiet`, `--no-color`, `--config`) apply to
//! every subcommand.

use clap::{Parser, Subcommand};
use std::net::SocketAddr;
use std::path::PathBuf;

/// Main CLI structure for the `exemplar` command.
#[derive(Parser, Clone, Debug)]
#[command(name = "exemplar")]
#[command(version)]
#[command(about = "exemplar - Turn annotated example programs into documentation", long_about = None)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,

    /// Enable debug logging
    #[arg(short = 'v', long, global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Suppress informational messages (only show errors)
    #[arg(short = 'q', long, global = true)]
    pub quiet: bool,

    /// Disable all ANSI colors in output (also respects `NO_COLOR` env)
    #[arg(long = "no-color", global = true)]
    pub no_color: bool,

    /// Path to configuration file (overrides `./exemplar.toml`). Also via `EXEMPLAR_CONFIG`.
    #[arg(long, global = true, value_name = "FILE", env = "EXEMPLAR_CONFIG")]
    pub config: Option<PathBuf>,
}

/// Available subcommands.
#[derive(Subcommand, Clone, Debug)]
pub enum Commands {
    /// Compile an examples directory into a JSON dataset
    Build {
        /// Directory holding the numbered example directories
        #[arg(long, value_name = "DIR", default_value = "examples")]
        examples_dir: PathBuf,

        /// Where to write the dataset
        #[arg(short, long, value_name = "FILE", default_value = "data/examples.json")]
        output: PathBuf,

        /// Section manifest (defaults to sections.toml or sections.json in the examples directory)
        #[arg(long, value_name = "FILE")]
        sections: Option<PathBuf>,
    },

    /// Render a dataset as a static HTML site
    Site {
        /// Dataset produced by `exemplar build`
        #[arg(long, value_name = "FILE", default_value = "data/examples.json")]
        data: PathBuf,

        /// Output directory
        #[arg(long, value_name = "DIR", default_value = "docs")]
        out: PathBuf,
    },

    /// Serve pages over HTTP
    Serve {
        /// Dataset produced by `exemplar build`
        #[arg(long, value_name = "FILE", default_value = "data/examples.json")]
        data: PathBuf,

        /// Compile this examples directory in memory instead of reading `--data`
        #[arg(long, value_name = "DIR")]
        examples_dir: Option<PathBuf>,

        /// Address to listen on
        #[arg(long, value_name = "ADDR", default_value = "127.0.0.1:5001")]
        addr: SocketAddr,
    },
}
