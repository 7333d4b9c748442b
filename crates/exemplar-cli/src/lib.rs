//! exemplar CLI - build, render, and serve annotated example sites.
//!
//! The binary is a thin wrapper over [`run`]; the HTTP server is public so
//! it can be driven directly from integration tests.

use anyhow::Result;
use clap::Parser;
use exemplar_core::SiteConfig;

pub mod cli;
mod commands;
pub mod error;
pub mod server;
mod utils;

use cli::{Cli, Commands};
use error::CliError;

/// Parse arguments, initialize logging, and run the selected command.
///
/// # Errors
///
/// Returns an error if configuration loading or the command fails.
pub async fn run() -> Result<()> {
    let cli = Cli::parse();
    utils::initialize_logging(&cli)?;
    execute_command(cli).await
}

async fn execute_command(cli: Cli) -> Result<()> {
    let config = SiteConfig::discover(cli.config.as_deref()).map_err(CliError::from)?;

    match cli.command {
        Commands::Build {
            examples_dir,
            output,
            sections,
        } => {
            commands::build_corpus(&config, &examples_dir, &output, sections.as_deref())?;
        },

        Commands::Site { data, out } => {
            commands::generate_site(&config, &data, &out)?;
        },

        Commands::Serve {
            data,
            examples_dir,
            addr,
        } => {
            commands::serve_corpus(config, &data, examples_dir.as_deref(), addr).await?;
        },
    }

    Ok(())
}
