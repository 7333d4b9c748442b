//! Example compilation.
//!
//! One example directory becomes one [`ExampleRecord`]: the primary source
//! file is segmented, its leading comment becomes the title and
//! description, comment targets are resolved, and the optional transcript,
//! images, and documentation links are attached.
//!
//! ```text
//! 002-streaming-text/
//! ├── streaming-text.py          primary source
//! ├── streaming-text.sh          transcript (optional)
//! ├── streaming-text_links.txt   one URL per line (optional)
//! └── diagram.png                images (optional)
//! ```

use crate::align::resolve_targets;
use crate::config::SourceSettings;
use crate::naming::parse_example_name;
use crate::segment::{LineClassifier, Segment, build_segments};
use crate::shell::{CommandOutput, TranscriptParser};
use crate::title::extract_title;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// An image attached to an example.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRef {
    /// Location of the image at build time.
    pub path: PathBuf,
    /// File name, used as the published name under `images/`.
    pub filename: String,
    /// Human-readable caption derived from the file name.
    pub caption: String,
}

impl ImageRef {
    /// Build a reference for the image at `path`.
    ///
    /// Returns `None` when the path has no valid UTF-8 file name.
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        let filename = path.file_name()?.to_str()?.to_string();
        let stem = path.file_stem()?.to_str()?;
        Some(Self {
            path: path.to_path_buf(),
            caption: caption_from_stem(stem),
            filename,
        })
    }
}

/// Turn `bounding-boxes_result` into `Bounding boxes result`.
#[must_use]
pub fn caption_from_stem(stem: &str) -> String {
    let spaced = stem
        .split(['-', '_'])
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ");
    let mut chars = spaced.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}

/// A fully compiled documentation page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExampleRecord {
    /// Source directory name, e.g. `001-basic-generation`.
    pub id: String,
    /// Page title.
    pub title: String,
    /// Free-text description below the title.
    pub description: String,
    /// Numeric order from the directory prefix.
    pub order: u32,
    /// Body segments of the primary source file.
    pub code_segments: Vec<Segment>,
    /// Command/output pairs from the transcript.
    #[serde(default)]
    pub shell_segments: Vec<CommandOutput>,
    /// Attached images, ordered by file name.
    #[serde(default)]
    pub image_data: Vec<ImageRef>,
    /// External documentation URLs.
    #[serde(default)]
    pub documentation_links: Vec<String>,
    /// Section this example belongs to, once grouped.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section_id: Option<String>,
    /// Title of the section this example belongs to, once grouped.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section_title: Option<String>,
}

/// Files discovered in one example directory.
#[derive(Debug, Default)]
struct ExampleFiles {
    source: Option<PathBuf>,
    transcript: Option<PathBuf>,
    links: Option<PathBuf>,
    images: Vec<PathBuf>,
}

/// Compiles example directories into [`ExampleRecord`]s.
pub struct ExampleCompiler<'a> {
    settings: &'a SourceSettings,
    classifier: LineClassifier,
    transcript_parser: TranscriptParser,
}

impl<'a> ExampleCompiler<'a> {
    /// Create a compiler using the given source conventions.
    #[must_use]
    pub fn new(settings: &'a SourceSettings) -> Self {
        Self {
            settings,
            classifier: settings.classifier(),
            transcript_parser: settings.transcript_parser(),
        }
    }

    /// Compile one example directory.
    ///
    /// Unreadable optional assets are logged and left out; they never fail
    /// the example.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidExample`] when the directory name has no
    /// numeric prefix or no primary source file exists, and [`Error::Io`]
    /// when the directory or primary source cannot be read.
    pub fn compile(&self, dir: &Path) -> Result<ExampleRecord> {
        let id = dir
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| Error::invalid_example(dir.display().to_string(), "non UTF-8 name"))?
            .to_string();
        let name = parse_example_name(&id)?;

        let files = self.discover_files(dir, &name.slug)?;
        let source_path = files
            .source
            .ok_or_else(|| Error::invalid_example(&id, "no primary source file found"))?;

        let source = fs::read_to_string(&source_path).map_err(|e| {
            Error::invalid_example(&id, format!("cannot read {}: {e}", source_path.display()))
        })?;
        let segments = self.segment_source(&source);
        debug!(
            "{id}: {} segments from {}",
            segments.segments.len(),
            source_path.display()
        );

        let shell_segments = files
            .transcript
            .as_deref()
            .and_then(|path| read_optional(&id, path))
            .map(|content| self.transcript_parser.parse(&content))
            .unwrap_or_default();

        let documentation_links = files
            .links
            .as_deref()
            .and_then(|path| read_optional(&id, path))
            .map(|content| parse_links(&content))
            .unwrap_or_default();

        let image_data = files
            .images
            .iter()
            .filter_map(|path| {
                let image = ImageRef::from_path(path);
                if image.is_none() {
                    warn!("{id}: skipping image with unusable name {}", path.display());
                }
                image
            })
            .collect();

        Ok(ExampleRecord {
            id,
            title: segments.title,
            description: segments.description,
            order: name.order,
            code_segments: segments.segments,
            shell_segments,
            image_data,
            documentation_links,
            section_id: None,
            section_title: None,
        })
    }

    /// Segment a primary source file: build, split off the title, then
    /// resolve comment targets on the body.
    #[must_use]
    pub fn segment_source(&self, source: &str) -> crate::title::TitledSegments {
        let mut titled = extract_title(build_segments(source, &self.classifier));
        resolve_targets(&mut titled.segments);
        titled
    }

    fn discover_files(&self, dir: &Path, slug: &str) -> Result<ExampleFiles> {
        let mut paths: Vec<PathBuf> = fs::read_dir(dir)?
            .filter_map(|entry| entry.ok().map(|e| e.path()))
            .filter(|path| path.is_file())
            .collect();
        paths.sort();

        let mut files = ExampleFiles::default();
        let mut sources = Vec::new();
        let mut transcripts = Vec::new();

        for path in paths {
            if self.settings.is_links_file(&path) {
                if files.links.is_none() {
                    files.links = Some(path);
                }
            } else if self.settings.is_source_file(&path) {
                sources.push(path);
            } else if self.settings.is_transcript_file(&path) {
                transcripts.push(path);
            } else if self.settings.is_image_file(&path) {
                files.images.push(path);
            }
        }

        files.source = pick_preferred(sources, slug);
        files.transcript = pick_preferred(transcripts, slug);
        Ok(files)
    }
}

/// Prefer the file whose stem equals the slug, else the first by name.
fn pick_preferred(candidates: Vec<PathBuf>, slug: &str) -> Option<PathBuf> {
    let position = candidates
        .iter()
        .position(|p| p.file_stem().and_then(|s| s.to_str()) == Some(slug))
        .unwrap_or(0);
    candidates.into_iter().nth(position)
}

fn read_optional(id: &str, path: &Path) -> Option<String> {
    match fs::read_to_string(path) {
        Ok(content) => Some(content),
        Err(e) => {
            warn!("{id}: skipping unreadable {}: {e}", path.display());
            None
        },
    }
}

/// One URL per non-empty line; `#` lines are comments.
#[must_use]
pub fn parse_links(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(ToString::to_string)
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::segment::LineRange;
    use tempfile::TempDir;

    fn example_dir(root: &TempDir, name: &str, files: &[(&str, &str)]) -> PathBuf {
        let dir = root.path().join(name);
        fs::create_dir_all(&dir).unwrap();
        for (file, content) in files {
            fs::write(dir.join(file), content).unwrap();
        }
        dir
    }

    #[test]
    fn test_unreadable_optional_assets_are_skipped() -> Result<()> {
        let root = TempDir::new().unwrap();
        let dir = example_dir(
            &root,
            "004-latin",
            &[("latin.py", "# Latin

# Show it
print('ok')
")],
        );
        fs::write(dir.join("latin.sh"), b"# Run
$ python latin.py
\xFF\xFE
").unwrap();
        fs::write(dir.join("latin_links.txt"), b"https://example.com/\xC3(
").unwrap();

        let settings = SourceSettings::default();
        let record = ExampleCompiler::new(&settings).compile(&dir)?;

        assert_eq!(record.title, "Latin");
        assert!(record.shell_segments.is_empty());
        assert!(record.documentation_links.is_empty());
        assert!(!record.code_segments.is_empty());
        assert!(record.code_segments.iter().any(|s| s.display_code.contains("print('ok')")));
        Ok(())
    }

    #[test]
    fn test_compile_full_example() -> Result<()> {
        let root = TempDir::new().unwrap();
        let dir = example_dir(
            &root,
            "002-streaming-text",
            &[
                (
                    "streaming-text.py",
                    "# Streaming text\n# Print tokens as they arrive.\nimport os\n\n# Stream it\nfor c in 'abc':\n    print(c)\n",
                ),
                ("streaming-text.sh", "# Run it\n$ python streaming-text.py\na\nb\nc\n"),
                (
                    "streaming-text_links.txt",
                    "https://example.com/docs\n\n# ignored\nhttps://example.com/api\n",
                ),
                ("b-result.png", "png"),
                ("a_flow.gif", "gif"),
                ("notes.md", "ignored"),
            ],
        );
        let settings = SourceSettings::default();
        let record = ExampleCompiler::new(&settings).compile(&dir)?;

        assert_eq!(record.id, "002-streaming-text");
        assert_eq!(record.order, 2);
        assert_eq!(record.title, "Streaming text");
        assert_eq!(record.description, "Print tokens as they arrive.");
        assert_eq!(record.code_segments.len(), 3);
        assert_eq!(record.code_segments[0].line_range, LineRange::new(3, 4));
        assert_eq!(record.code_segments[1].annotation, "Stream it");
        assert_eq!(
            record.code_segments[1].target_line_range,
            LineRange::new(6, 7)
        );
        assert_eq!(record.shell_segments.len(), 1);
        assert_eq!(record.shell_segments[0].explanation, "Run it");
        assert_eq!(record.shell_segments[0].output, "a\nb\nc");
        assert_eq!(
            record.documentation_links,
            vec!["https://example.com/docs", "https://example.com/api"]
        );
        let names: Vec<&str> = record.image_data.iter().map(|i| i.filename.as_str()).collect();
        assert_eq!(names, vec!["a_flow.gif", "b-result.png"]);
        assert_eq!(record.image_data[1].caption, "B result");
        assert!(record.section_id.is_none());
        Ok(())
    }

    #[test]
    fn test_prefers_source_named_after_slug() -> Result<()> {
        let root = TempDir::new().unwrap();
        let dir = example_dir(
            &root,
            "003-system-prompt",
            &[
                ("aaa_helper.py", "# Helper\nx = 1\n"),
                ("system-prompt.py", "# System prompt\ny = 2\n"),
            ],
        );
        let settings = SourceSettings::default();
        let record = ExampleCompiler::new(&settings).compile(&dir)?;
        assert_eq!(record.title, "System prompt");
        Ok(())
    }

    #[test]
    fn test_missing_source_is_invalid_example() {
        let root = TempDir::new().unwrap();
        let dir = example_dir(&root, "004-empty", &[("empty.sh", "$ ls\n")]);
        let settings = SourceSettings::default();
        let err = ExampleCompiler::new(&settings).compile(&dir).unwrap_err();
        assert!(matches!(err, Error::InvalidExample { .. }));
        assert!(!err.is_fatal());
    }

    #[test]
    fn test_malformed_prefix_is_invalid_example() {
        let root = TempDir::new().unwrap();
        let dir = example_dir(&root, "5x-broken", &[("broken.py", "x = 1\n")]);
        let settings = SourceSettings::default();
        let err = ExampleCompiler::new(&settings).compile(&dir).unwrap_err();
        assert!(matches!(err, Error::InvalidExample { .. }));
    }

    #[test]
    fn test_untitled_when_code_first() -> Result<()> {
        let root = TempDir::new().unwrap();
        let dir = example_dir(&root, "006-bare", &[("bare.py", "print(1)\n")]);
        let settings = SourceSettings::default();
        let record = ExampleCompiler::new(&settings).compile(&dir)?;
        assert_eq!(record.title, crate::title::UNTITLED);
        assert_eq!(record.code_segments.len(), 1);
        assert!(record.shell_segments.is_empty());
        Ok(())
    }

    #[test]
    fn test_caption_from_stem() {
        assert_eq!(caption_from_stem("bounding-boxes_result"), "Bounding boxes result");
        assert_eq!(caption_from_stem("x"), "X");
        assert_eq!(caption_from_stem("--"), "");
    }

    #[test]
    fn test_record_json_field_names() {
        let record = ExampleRecord {
            id: "001-a".into(),
            title: "A".into(),
            description: String::new(),
            order: 1,
            code_segments: Vec::new(),
            shell_segments: Vec::new(),
            image_data: Vec::new(),
            documentation_links: Vec::new(),
            section_id: None,
            section_title: None,
        };
        let json = serde_json::to_value(&record).unwrap();
        for key in [
            "id",
            "title",
            "description",
            "order",
            "code_segments",
            "shell_segments",
            "image_data",
            "documentation_links",
        ] {
            assert!(json.get(key).is_some(), "missing {key}");
        }
        assert!(json.get("section_id").is_none());
    }
}
