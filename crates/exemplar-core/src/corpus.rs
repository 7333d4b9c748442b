//! Corpus assembly.
//!
//! Collects compiled examples, orders them by their numeric prefix, and
//! optionally groups them under sections declared in an external manifest.
//!
//! ## Section Manifest
//!
//! ```toml
//! [[sections]]
//! id = "basics"
//! title = "Basics"
//! description = "Getting started"
//! order = 1
//! examples = ["001-basic-generation", "002-streaming-text"]
//! ```
//!
//! A JSON manifest (`{"sections": [...]}`) is accepted when the file has a
//! `.json` extension. Examples claimed by no section land in a trailing
//! catch-all section. A missing or malformed manifest never fails a build:
//! the corpus falls back to a flat list.

use crate::config::SiteConfig;
use crate::dataset::Dataset;
use crate::example::{ExampleCompiler, ExampleRecord};
use crate::naming::is_example_candidate;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Identifier of the synthesized catch-all section.
pub const DEFAULT_SECTION_ID: &str = "other";

/// Title of the synthesized catch-all section.
pub const DEFAULT_SECTION_TITLE: &str = "Other Examples";

/// Manifest file names looked up next to the examples, in order.
pub const MANIFEST_FILE_NAMES: [&str; 2] = ["sections.toml", "sections.json"];

/// A named grouping of examples.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Section {
    /// Stable identifier.
    pub id: String,
    /// Display title.
    pub title: String,
    /// Optional free text.
    #[serde(default)]
    pub description: String,
    /// Position among sections.
    #[serde(default)]
    pub order: u32,
    /// Example identifiers in this section.
    #[serde(default)]
    pub examples: Vec<String>,
}

/// Externally declared sections.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionManifest {
    /// Declared sections, in any order.
    #[serde(default)]
    pub sections: Vec<Section>,
}

impl SectionManifest {
    /// Load a manifest from TOML, or JSON when the extension is `.json`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let is_json = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("json"));
        if is_json {
            Ok(serde_json::from_str(&content)?)
        } else {
            Ok(toml::from_str(&content)?)
        }
    }

    /// Load a manifest, degrading to `None` on any problem.
    ///
    /// A missing file is expected and only logged at debug level; an
    /// unreadable or malformed one is a warning.
    #[must_use]
    pub fn load_optional(path: &Path) -> Option<Self> {
        if !path.exists() {
            debug!("No section manifest at {}", path.display());
            return None;
        }
        match Self::load(path) {
            Ok(manifest) => Some(manifest),
            Err(e) => {
                warn!(
                    "Ignoring section manifest {}: {e}; using flat ordering",
                    path.display()
                );
                None
            },
        }
    }

    /// Find the first manifest file present in `dir`.
    #[must_use]
    pub fn locate(dir: &Path) -> Option<PathBuf> {
        MANIFEST_FILE_NAMES
            .iter()
            .map(|name| dir.join(name))
            .find(|path| path.exists())
    }
}

/// List example directories under `examples_dir`, sorted by name.
///
/// Only directories whose name starts with a digit are returned.
///
/// # Errors
///
/// Returns [`Error::NotFound`] if `examples_dir` is not a directory and
/// [`Error::Io`] if it cannot be listed.
pub fn scan_examples_directory(examples_dir: &Path) -> Result<Vec<PathBuf>> {
    if !examples_dir.is_dir() {
        return Err(Error::NotFound(format!(
            "examples directory {}",
            examples_dir.display()
        )));
    }

    let mut dirs: Vec<PathBuf> = fs::read_dir(examples_dir)?
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.is_dir())
        .filter(|path| {
            path.file_name()
                .and_then(|n| n.to_str())
                .is_some_and(is_example_candidate)
        })
        .collect();
    dirs.sort();
    Ok(dirs)
}

/// Orders records and groups them into sections.
pub struct CorpusAssembler;

impl CorpusAssembler {
    /// Assemble records into a dataset.
    ///
    /// Records are stably sorted by order, so ties keep discovery order.
    /// Without a manifest the result is that flat list. With one, each
    /// record joins the first section (by section order) that lists it,
    /// unclaimed records join a trailing catch-all section, and the final
    /// ordering is by section then by record order.
    #[must_use]
    pub fn assemble(mut records: Vec<ExampleRecord>, manifest: Option<&SectionManifest>) -> Dataset {
        records.sort_by_key(|r| r.order);

        let Some(manifest) = manifest else {
            return Dataset::new(records, Vec::new());
        };

        let mut declared = manifest.sections.clone();
        declared.sort_by_key(|s| s.order);

        let known: HashSet<&str> = records.iter().map(|r| r.id.as_str()).collect();
        for section in &declared {
            for id in section.examples.iter().filter(|id| !known.contains(id.as_str())) {
                warn!("Section '{}' lists unknown example '{id}'", section.id);
            }
        }

        let mut buckets: Vec<Vec<ExampleRecord>> = vec![Vec::new(); declared.len()];
        let mut unassigned = Vec::new();
        for record in records {
            match declared.iter().position(|s| s.examples.contains(&record.id)) {
                Some(index) => buckets[index].push(record),
                None => unassigned.push(record),
            }
        }

        let mut sections = Vec::with_capacity(declared.len() + 1);
        let mut examples = Vec::new();

        let catch_all = (!unassigned.is_empty()).then(|| Section {
            id: DEFAULT_SECTION_ID.to_string(),
            title: DEFAULT_SECTION_TITLE.to_string(),
            description: String::new(),
            order: declared.iter().map(|s| s.order).max().map_or(0, |m| m.saturating_add(1)),
            examples: Vec::new(),
        });

        let groups = declared
            .into_iter()
            .zip(buckets)
            .chain(catch_all.map(|section| (section, unassigned)));

        for (mut section, members) in groups {
            section.examples = members.iter().map(|r| r.id.clone()).collect();
            for mut record in members {
                record.section_id = Some(section.id.clone());
                record.section_title = Some(section.title.clone());
                examples.push(record);
            }
            sections.push(section);
        }

        Dataset::new(examples, sections)
    }
}

/// Outcome of a corpus build: the dataset plus every skipped entry.
#[derive(Debug)]
pub struct BuildReport {
    /// The assembled corpus.
    pub dataset: Dataset,
    /// Per-entry errors for examples left out of the corpus.
    pub skipped: Vec<Error>,
}

/// Builds a corpus from an examples directory.
pub struct CorpusBuilder<'a> {
    config: &'a SiteConfig,
}

impl<'a> CorpusBuilder<'a> {
    /// Create a builder with the given configuration.
    #[must_use]
    pub const fn new(config: &'a SiteConfig) -> Self {
        Self { config }
    }

    /// Compile every example under `examples_dir` and assemble the corpus.
    ///
    /// `manifest_path` overrides manifest discovery in `examples_dir`.
    ///
    /// # Errors
    ///
    /// Only directory-level failures are returned: a missing or unreadable
    /// examples directory. Problems with individual examples are collected
    /// in [`BuildReport::skipped`].
    pub fn build(&self, examples_dir: &Path, manifest_path: Option<&Path>) -> Result<BuildReport> {
        info!("Scanning examples directory: {}", examples_dir.display());
        let dirs = scan_examples_directory(examples_dir)?;
        info!("Found {} example directories", dirs.len());

        let compiler = ExampleCompiler::new(&self.config.source);
        let mut records = Vec::with_capacity(dirs.len());
        let mut skipped = Vec::new();

        for dir in &dirs {
            info!("Processing example: {}", display_name(dir));
            match compiler.compile(dir) {
                Ok(record) => records.push(record),
                Err(e) => {
                    warn!("Skipping {}: {e}", dir.display());
                    skipped.push(e);
                },
            }
        }

        let manifest = manifest_path
            .map(Path::to_path_buf)
            .or_else(|| SectionManifest::locate(examples_dir))
            .and_then(|path| SectionManifest::load_optional(&path));

        let dataset = CorpusAssembler::assemble(records, manifest.as_ref());
        info!(
            "Assembled {} examples in {} sections ({} skipped)",
            dataset.examples.len(),
            dataset.sections.len(),
            skipped.len()
        );
        Ok(BuildReport { dataset, skipped })
    }
}

fn display_name(dir: &Path) -> String {
    dir.file_name()
        .map_or_else(|| dir.display().to_string(), |n| n.to_string_lossy().into_owned())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn record(id: &str, order: u32) -> ExampleRecord {
        ExampleRecord {
            id: id.to_string(),
            title: id.to_string(),
            description: String::new(),
            order,
            code_segments: Vec::new(),
            shell_segments: Vec::new(),
            image_data: Vec::new(),
            documentation_links: Vec::new(),
            section_id: None,
            section_title: None,
        }
    }

    fn section(id: &str, order: u32, examples: &[&str]) -> Section {
        Section {
            id: id.to_string(),
            title: id.to_uppercase(),
            description: String::new(),
            order,
            examples: examples.iter().map(ToString::to_string).collect(),
        }
    }

    fn orders(dataset: &Dataset) -> Vec<u32> {
        dataset.examples.iter().map(|e| e.order).collect()
    }

    #[test]
    fn test_flat_order_without_manifest() {
        let records = vec![record("003-c", 3), record("001-a", 1), record("002-b", 2)];
        let dataset = CorpusAssembler::assemble(records, None);
        assert_eq!(orders(&dataset), vec![1, 2, 3]);
        assert!(dataset.sections.is_empty());
    }

    #[test]
    fn test_ties_keep_discovery_order() {
        let records = vec![record("001-z", 1), record("001-a", 1)];
        let dataset = CorpusAssembler::assemble(records, None);
        let ids: Vec<&str> = dataset.examples.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["001-z", "001-a"]);
    }

    #[test]
    fn test_unassigned_go_to_trailing_default_section() {
        let records = vec![record("003-c", 3), record("001-a", 1), record("002-b", 2)];
        let manifest = SectionManifest {
            sections: vec![section("basics", 1, &["001-a", "003-c"])],
        };
        let dataset = CorpusAssembler::assemble(records, Some(&manifest));

        assert_eq!(orders(&dataset), vec![1, 3, 2]);
        assert_eq!(dataset.sections.len(), 2);
        assert_eq!(dataset.sections[0].id, "basics");
        assert_eq!(dataset.sections[0].examples, vec!["001-a", "003-c"]);
        assert_eq!(dataset.sections[1].id, DEFAULT_SECTION_ID);
        assert_eq!(dataset.sections[1].order, 2);
        assert_eq!(dataset.sections[1].examples, vec!["002-b"]);
        assert_eq!(dataset.examples[2].section_title.as_deref(), Some(DEFAULT_SECTION_TITLE));
    }

    #[test]
    fn test_sections_ordered_by_section_order() {
        let records = vec![record("001-a", 1), record("002-b", 2)];
        let manifest = SectionManifest {
            sections: vec![section("later", 9, &["001-a"]), section("first", 1, &["002-b"])],
        };
        let dataset = CorpusAssembler::assemble(records, Some(&manifest));
        assert_eq!(orders(&dataset), vec![2, 1]);
        assert_eq!(dataset.examples[0].section_id.as_deref(), Some("first"));
        assert_eq!(dataset.sections.len(), 2);
    }

    #[test]
    fn test_first_listing_section_wins() {
        let records = vec![record("001-a", 1)];
        let manifest = SectionManifest {
            sections: vec![section("two", 2, &["001-a"]), section("one", 1, &["001-a"])],
        };
        let dataset = CorpusAssembler::assemble(records, Some(&manifest));
        assert_eq!(dataset.examples[0].section_id.as_deref(), Some("one"));
        assert!(dataset.sections[1].examples.is_empty());
    }

    #[test]
    fn test_manifest_toml_and_json() -> Result<()> {
        let dir = TempDir::new().unwrap();
        let toml_path = dir.path().join("sections.toml");
        fs::write(
            &toml_path,
            "[[sections]]\nid = \"basics\"\ntitle = \"Basics\"\norder = 1\nexamples = [\"001-a\"]\n",
        )
        .unwrap();
        let json_path = dir.path().join("sections.json");
        fs::write(
            &json_path,
            r#"{"sections": [{"id": "basics", "title": "Basics", "order": 1, "examples": ["001-a"]}]}"#,
        )
        .unwrap();

        assert_eq!(SectionManifest::load(&toml_path)?, SectionManifest::load(&json_path)?);
        assert_eq!(SectionManifest::locate(dir.path()), Some(toml_path));
        Ok(())
    }

    #[test]
    fn test_malformed_manifest_degrades() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("sections.toml");
        fs::write(&path, "[[sections]]\nid = 3\n").unwrap();
        assert!(SectionManifest::load_optional(&path).is_none());
        assert!(SectionManifest::load_optional(&dir.path().join("missing.toml")).is_none());
    }

    #[test]
    fn test_scan_missing_directory_is_fatal() {
        let dir = TempDir::new().unwrap();
        let err = scan_examples_directory(&dir.path().join("nope")).unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
        assert!(err.is_fatal());
    }

    #[test]
    fn test_build_skips_bad_entries() -> Result<()> {
        let root = TempDir::new().unwrap();
        let examples = root.path();
        for (name, file, content) in [
            ("002-second", "second.py", "# Second\nx = 2\n"),
            ("001-first", "first.py", "# First\nx = 1\n"),
            ("003-nosource", "nosource.sh", "$ ls\n"),
            ("7up", "up.py", "# Up\n"),
        ] {
            let dir = examples.join(name);
            fs::create_dir_all(&dir).unwrap();
            fs::write(dir.join(file), content).unwrap();
        }
        fs::create_dir_all(examples.join("static")).unwrap();

        let config = SiteConfig::default();
        let report = CorpusBuilder::new(&config).build(examples, None)?;

        let ids: Vec<&str> = report.dataset.examples.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["001-first", "002-second"]);
        assert_eq!(report.skipped.len(), 2);
        assert!(report.skipped.iter().all(|e| !e.is_fatal()));
        Ok(())
    }
}
