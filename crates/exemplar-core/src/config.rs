//! Site and source configuration.
//!
//! Configuration lives in an optional `exemplar.toml`. Every key has a
//! default, so an empty file (or no file) is a valid configuration.
//!
//! ## Example Configuration File
//!
//! ```toml
//! [site]
//! title = "Gemini by Example"
//! description = "Learn the Gemini API through annotated examples"
//! intro = "A hands-on introduction using annotated code examples."
//! footer_links = [{ label = "Source", url = "https://github.com/example/site" }]
//!
//! [source]
//! comment_marker = "#"
//! extensions = ["py"]
//! transcript_extension = "sh"
//! prompt_marker = "$"
//!
//! [output]
//! static_dir = "static"
//! llms_file = "llms.txt"
//! ```
//!
//! ## Discovery
//!
//! [`SiteConfig::discover`] uses an explicit path when one is given (it must
//! exist), then `./exemplar.toml`, then built-in defaults.

use crate::segment::LineClassifier;
use crate::shell::TranscriptParser;
use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// File name looked up in the working directory when no path is given.
pub const CONFIG_FILE_NAME: &str = "exemplar.toml";

/// Complete configuration for a build.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteConfig {
    /// Presentation settings for generated pages.
    pub site: SiteSettings,
    /// How example directories and files are read.
    pub source: SourceSettings,
    /// Where generated artifacts go.
    pub output: OutputSettings,
}

/// Presentation settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SiteSettings {
    /// Site name shown in the header and page titles.
    pub title: String,
    /// Meta description and `llms.txt` summary.
    pub description: String,
    /// Introductory paragraph on the index page.
    pub intro: String,
    /// Links rendered in the page footer.
    pub footer_links: Vec<FooterLink>,
}

/// One footer link.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FooterLink {
    /// Link text.
    pub label: String,
    /// Link target.
    pub url: String,
}

/// Example source conventions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SourceSettings {
    /// Single-line comment marker of the primary source language.
    pub comment_marker: String,
    /// Extensions (without dot) accepted for the primary source file.
    pub extensions: Vec<String>,
    /// Extension of the shell transcript file.
    pub transcript_extension: String,
    /// Marker that introduces a command in a transcript.
    pub prompt_marker: String,
    /// File name suffix of the documentation links file.
    pub links_suffix: String,
    /// Extensions (without dot) treated as images.
    pub image_extensions: Vec<String>,
}

/// Output settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct OutputSettings {
    /// Shared static assets copied into the generated site.
    pub static_dir: Option<PathBuf>,
    /// File name of the flat text export.
    pub llms_file: String,
}

impl Default for SiteSettings {
    fn default() -> Self {
        Self {
            title: "Exemplar".to_string(),
            description: "Learn by annotated example".to_string(),
            intro: "A hands-on introduction using annotated example programs.".to_string(),
            footer_links: Vec::new(),
        }
    }
}

impl Default for SourceSettings {
    fn default() -> Self {
        Self {
            comment_marker: crate::segment::DEFAULT_COMMENT_MARKER.to_string(),
            extensions: vec!["py".to_string()],
            transcript_extension: "sh".to_string(),
            prompt_marker: crate::shell::DEFAULT_PROMPT_MARKER.to_string(),
            links_suffix: "_links.txt".to_string(),
            image_extensions: ["png", "jpg", "jpeg", "gif"]
                .iter()
                .map(ToString::to_string)
                .collect(),
        }
    }
}

impl Default for OutputSettings {
    fn default() -> Self {
        Self {
            static_dir: None,
            llms_file: "llms.txt".to_string(),
        }
    }
}

impl SourceSettings {
    /// Classifier for primary source lines.
    #[must_use]
    pub fn classifier(&self) -> LineClassifier {
        LineClassifier::new(self.comment_marker.clone())
    }

    /// Parser for transcript files. Transcripts always use `#` comments.
    #[must_use]
    pub fn transcript_parser(&self) -> TranscriptParser {
        TranscriptParser::new(crate::segment::DEFAULT_COMMENT_MARKER, self.prompt_marker.clone())
    }

    /// Whether `path` has one of the primary source extensions.
    #[must_use]
    pub fn is_source_file(&self, path: &Path) -> bool {
        has_extension(path, &self.extensions)
    }

    /// Whether `path` is a transcript file.
    #[must_use]
    pub fn is_transcript_file(&self, path: &Path) -> bool {
        has_extension(path, std::slice::from_ref(&self.transcript_extension))
    }

    /// Whether `path` is an image.
    #[must_use]
    pub fn is_image_file(&self, path: &Path) -> bool {
        has_extension(path, &self.image_extensions)
    }

    /// Whether `path` is a documentation links file.
    #[must_use]
    pub fn is_links_file(&self, path: &Path) -> bool {
        path.file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|n| n.ends_with(self.links_suffix.as_str()))
    }
}

fn has_extension(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|ext| extensions.iter().any(|x| x.eq_ignore_ascii_case(ext)))
}

impl SiteConfig {
    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the file cannot be read or parsed, or if
    /// it contains unknown keys.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Failed to read {}: {e}", path.display())))?;
        let config: Self = toml::from_str(&content)
            .map_err(|e| Error::Config(format!("Failed to parse {}: {e}", path.display())))?;
        config.validate()?;
        Ok(config)
    }

    /// Resolve configuration from an explicit path, `./exemplar.toml`, or
    /// defaults, in that order.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if an explicit path does not exist or any
    /// discovered file is malformed.
    pub fn discover(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            if !path.exists() {
                return Err(Error::Config(format!(
                    "Config file not found: {}",
                    path.display()
                )));
            }
            tracing::debug!("Loading config from {}", path.display());
            return Self::load(path);
        }

        let local = Path::new(CONFIG_FILE_NAME);
        if local.exists() {
            tracing::debug!("Loading config from ./{CONFIG_FILE_NAME}");
            return Self::load(local);
        }

        tracing::debug!("No {CONFIG_FILE_NAME} found, using defaults");
        Ok(Self::default())
    }

    fn validate(&self) -> Result<()> {
        if self.source.comment_marker.trim().is_empty() {
            return Err(Error::Config("source.comment_marker must not be empty".into()));
        }
        if self.source.prompt_marker.trim().is_empty() {
            return Err(Error::Config("source.prompt_marker must not be empty".into()));
        }
        if self.source.extensions.is_empty() {
            return Err(Error::Config(
                "source.extensions must list at least one extension".into(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_config(content: &str) -> (TempDir, PathBuf) {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(&path, content).unwrap();
        (dir, path)
    }

    #[test]
    fn test_default_config_values() {
        let config = SiteConfig::default();
        assert_eq!(config.source.comment_marker, "#");
        assert_eq!(config.source.extensions, vec!["py"]);
        assert_eq!(config.source.transcript_extension, "sh");
        assert_eq!(config.output.llms_file, "llms.txt");
        assert!(config.output.static_dir.is_none());
    }

    #[test]
    fn test_empty_file_is_default() -> Result<()> {
        let (_dir, path) = write_config("");
        assert_eq!(SiteConfig::load(&path)?, SiteConfig::default());
        Ok(())
    }

    #[test]
    fn test_partial_override() -> Result<()> {
        let (_dir, path) = write_config(
            r#"
[site]
title = "Rust by Example"
footer_links = [{ label = "Source", url = "https://example.com" }]

[source]
comment_marker = "//"
extensions = ["rs"]
"#,
        );
        let config = SiteConfig::load(&path)?;
        assert_eq!(config.site.title, "Rust by Example");
        assert_eq!(config.site.footer_links.len(), 1);
        assert_eq!(config.source.comment_marker, "//");
        assert_eq!(config.source.transcript_extension, "sh");
        assert_eq!(config.output.llms_file, "llms.txt");
        Ok(())
    }

    #[test]
    fn test_unknown_keys_rejected() {
        let (_dir, path) = write_config("[site]\ntitel = \"typo\"\n");
        assert!(matches!(SiteConfig::load(&path), Err(Error::Config(_))));
    }

    #[test]
    fn test_invalid_toml_rejected() {
        let (_dir, path) = write_config("[site\ntitle = 1");
        assert!(matches!(SiteConfig::load(&path), Err(Error::Config(_))));
    }

    #[test]
    fn test_empty_marker_rejected() {
        let (_dir, path) = write_config("[source]\ncomment_marker = \" \"\n");
        assert!(SiteConfig::load(&path).is_err());
    }

    #[test]
    fn test_discover_missing_explicit_path() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nope.toml");
        assert!(matches!(
            SiteConfig::discover(Some(&missing)),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn test_file_kind_predicates() {
        let source = SourceSettings::default();
        assert!(source.is_source_file(Path::new("a/basic.py")));
        assert!(source.is_source_file(Path::new("a/BASIC.PY")));
        assert!(!source.is_source_file(Path::new("a/basic.sh")));
        assert!(source.is_transcript_file(Path::new("basic.sh")));
        assert!(source.is_image_file(Path::new("cat.jpeg")));
        assert!(source.is_links_file(Path::new("basic_links.txt")));
        assert!(!source.is_links_file(Path::new("links.md")));
    }
}
