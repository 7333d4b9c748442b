//! `exemplar build`: compile an examples directory into a dataset file.

use anyhow::{Context, Result};
use exemplar_core::{CorpusBuilder, SiteConfig};
use std::path::Path;
use tracing::{info, warn};

/// Compile `examples_dir` and write the dataset to `output`.
///
/// Skipped examples are reported but do not fail the build.
pub fn execute(
    config: &SiteConfig,
    examples_dir: &Path,
    output: &Path,
    sections: Option<&Path>,
) -> Result<()> {
    let report = CorpusBuilder::new(config)
        .build(examples_dir, sections)
        .with_context(|| format!("Failed to build corpus from {}", examples_dir.display()))?;

    if report.dataset.is_empty() {
        warn!("No examples compiled from {}", examples_dir.display());
    }

    report
        .dataset
        .save(output)
        .with_context(|| format!("Failed to write dataset to {}", output.display()))?;
    info!("Dataset written to {}", output.display());

    println!(
        "Built {} examples ({} skipped) -> {}",
        report.dataset.examples.len(),
        report.skipped.len(),
        output.display()
    );
    for skipped in &report.skipped {
        println!("  skipped: {skipped}");
    }
    Ok(())
}
