//! `exemplar site`: render a dataset as a static site.

use anyhow::{Context, Result, anyhow};
use exemplar_core::render::SiteWriter;
use exemplar_core::{Dataset, SiteConfig};
use std::path::Path;

use crate::error::CliError;

/// Load the dataset at `data` and write the site under `out`.
///
/// A missing or empty dataset is an error.
pub fn execute(config: &SiteConfig, data: &Path, out: &Path) -> Result<()> {
    if !data.exists() {
        return Err(CliError::not_found(anyhow!(
            "Dataset not found: {} (run `exemplar build` first)",
            data.display()
        ))
        .into());
    }

    let dataset =
        Dataset::load(data).with_context(|| format!("Failed to load dataset {}", data.display()))?;
    if dataset.is_empty() {
        return Err(CliError::usage(anyhow!("Dataset {} contains no examples", data.display())).into());
    }

    let summary = SiteWriter::new(config)
        .write(&dataset, out)
        .with_context(|| format!("Failed to write site to {}", out.display()))?;

    println!(
        "Generated {} pages ({} images) in {}",
        summary.pages,
        summary.images,
        out.display()
    );
    Ok(())
}
