//! Static site writer.
//!
//! ```text
//! docs/
//! ├── index.html
//! ├── llms.txt
//! ├── static/                 copied from output.static_dir
//! └── 001-basic-generation/
//!     ├── index.html
//!     └── images/<filename>
//! ```

use super::{LinkStyle, PageRenderer, render_llms_txt};
use crate::Result;
use crate::config::SiteConfig;
use crate::dataset::Dataset;
use crate::example::ExampleRecord;
use std::fs;
use std::io;
use std::path::Path;
use tracing::{debug, info, warn};

/// Counts of what a site build produced.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SiteSummary {
    /// HTML pages written, including the index.
    pub pages: usize,
    /// Images copied next to their pages.
    pub images: usize,
    /// Static asset files copied.
    pub static_files: usize,
}

/// Writes a dataset out as a static site.
pub struct SiteWriter<'a> {
    config: &'a SiteConfig,
}

impl<'a> SiteWriter<'a> {
    /// Create a writer for the given configuration.
    #[must_use]
    pub const fn new(config: &'a SiteConfig) -> Self {
        Self { config }
    }

    /// Render every page of `dataset` under `out_dir`.
    ///
    /// Missing images and static assets are logged and skipped.
    ///
    /// # Errors
    ///
    /// Returns an error if `out_dir` or a page cannot be written.
    pub fn write(&self, dataset: &Dataset, out_dir: &Path) -> Result<SiteSummary> {
        fs::create_dir_all(out_dir)?;
        info!("Generating static site in {}", out_dir.display());

        let mut summary = SiteSummary {
            static_files: self.copy_static(out_dir),
            ..SiteSummary::default()
        };

        let renderer = PageRenderer::new(&self.config.site, LinkStyle::Relative);
        fs::write(out_dir.join("index.html"), renderer.index(dataset))?;
        summary.pages += 1;

        for record in &dataset.examples {
            let page_dir = out_dir.join(&record.id);
            fs::create_dir_all(&page_dir)?;
            fs::write(page_dir.join("index.html"), renderer.example(dataset, record))?;
            summary.pages += 1;
            summary.images += copy_images(record, &page_dir);
            debug!("Generated page for {}", record.id);
        }

        let llms_path = out_dir.join(&self.config.output.llms_file);
        fs::write(&llms_path, render_llms_txt(dataset, self.config))?;

        info!(
            "Wrote {} pages, {} images, {} static files",
            summary.pages, summary.images, summary.static_files
        );
        Ok(summary)
    }

    fn copy_static(&self, out_dir: &Path) -> usize {
        let Some(source) = self.config.output.static_dir.as_deref() else {
            return 0;
        };
        if !source.is_dir() {
            warn!("Static directory {} does not exist", source.display());
            return 0;
        }
        match copy_dir(source, &out_dir.join("static")) {
            Ok(count) => count,
            Err(e) => {
                warn!("Failed to copy static files from {}: {e}", source.display());
                0
            },
        }
    }
}

fn copy_images(record: &ExampleRecord, page_dir: &Path) -> usize {
    if record.image_data.is_empty() {
        return 0;
    }
    let images_dir = page_dir.join("images");
    if let Err(e) = fs::create_dir_all(&images_dir) {
        warn!("{}: cannot create {}: {e}", record.id, images_dir.display());
        return 0;
    }

    record
        .image_data
        .iter()
        .filter(|image| match fs::copy(&image.path, images_dir.join(&image.filename)) {
            Ok(_) => true,
            Err(e) => {
                warn!("{}: skipping image {}: {e}", record.id, image.path.display());
                false
            },
        })
        .count()
}

fn copy_dir(source: &Path, target: &Path) -> io::Result<usize> {
    fs::create_dir_all(target)?;
    let mut copied = 0;
    for entry in fs::read_dir(source)? {
        let entry = entry?;
        let path = entry.path();
        let dest = target.join(entry.file_name());
        if path.is_dir() {
            copied += copy_dir(&path, &dest)?;
        } else {
            fs::copy(&path, &dest)?;
            copied += 1;
        }
    }
    Ok(copied)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::corpus::CorpusBuilder;
    use tempfile::TempDir;

    fn corpus(root: &Path) -> Dataset {
        let examples = root.join("examples");
        let hello = examples.join("001-hello");
        fs::create_dir_all(&hello).unwrap();
        fs::write(hello.join("hello.py"), "# Hello\nprint('hi')\n").unwrap();
        fs::write(hello.join("output-chart.png"), b"\x89PNG").unwrap();
        let bye = examples.join("002-bye");
        fs::create_dir_all(&bye).unwrap();
        fs::write(bye.join("bye.py"), "# Bye\nprint('bye')\n").unwrap();

        CorpusBuilder::new(&SiteConfig::default())
            .build(&examples, None)
            .unwrap()
            .dataset
    }

    #[test]
    fn test_writes_full_site() -> Result<()> {
        let root = TempDir::new().unwrap();
        let dataset = corpus(root.path());

        let assets = root.path().join("assets");
        fs::create_dir_all(assets.join("js")).unwrap();
        fs::write(assets.join("js").join("app.js"), "//").unwrap();

        let mut config = SiteConfig::default();
        config.output.static_dir = Some(assets);

        let out = root.path().join("docs");
        let summary = SiteWriter::new(&config).write(&dataset, &out)?;

        assert_eq!(summary.pages, 3);
        assert_eq!(summary.images, 1);
        assert_eq!(summary.static_files, 1);
        assert!(out.join("index.html").is_file());
        assert!(out.join("001-hello").join("index.html").is_file());
        assert!(out.join("001-hello").join("images").join("output-chart.png").is_file());
        assert!(out.join("002-bye").join("index.html").is_file());
        assert!(out.join("static").join("js").join("app.js").is_file());
        assert!(fs::read_to_string(out.join("llms.txt")).unwrap().contains("### Bye"));
        Ok(())
    }

    #[test]
    fn test_missing_image_is_skipped() -> Result<()> {
        let root = TempDir::new().unwrap();
        let dataset = corpus(root.path());
        fs::remove_file(root.path().join("examples/001-hello/output-chart.png")).unwrap();

        let config = SiteConfig::default();
        let summary = SiteWriter::new(&config).write(&dataset, &root.path().join("docs"))?;
        assert_eq!(summary.images, 0);
        assert_eq!(summary.pages, 3);
        Ok(())
    }

    #[test]
    fn test_uncreatable_output_is_fatal() {
        let root = TempDir::new().unwrap();
        let dataset = corpus(root.path());
        let blocker = root.path().join("file");
        fs::write(&blocker, "x").unwrap();

        let config = SiteConfig::default();
        assert!(SiteWriter::new(&config).write(&dataset, &blocker.join("docs")).is_err());
    }
}
