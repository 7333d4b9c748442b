//! # exemplar-core
//!
//! Core functionality for exemplar - a compiler that turns a directory of
//! numbered, annotated example programs into a documentation corpus.
//!
//! Each example directory (`001-basic-generation/`) holds one primary source
//! file whose comments are prose and whose code is the example, plus an
//! optional shell transcript, images, and a links file. The pipeline is:
//!
//! ```text
//! examples/  →  ExampleRecord per directory  →  Dataset (JSON)  →  HTML / llms.txt
//! ```
//!
//! ## Architecture
//!
//! - **Segmentation**: [`segment`] splits a source file into maximal comment
//!   and code runs, [`align`] points each comment at the code it describes,
//!   and [`title`] lifts the leading comment into page metadata.
//! - **Transcripts**: [`shell`] extracts command/output pairs.
//! - **Compilation**: [`example`] compiles one directory, [`corpus`] orders
//!   and groups every directory into a [`Dataset`].
//! - **Rendering**: [`render`] produces HTML pages, the `llms.txt` export,
//!   and the static site on disk.
//!
//! ## Quick Start
//!
//! ```rust
//! use exemplar_core::{LineClassifier, build_segments, extract_title, resolve_targets};
//!
//! let source = "# Hello\n# A first example.\n\n# Greet\nprint('hi')\n";
//! let mut titled = extract_title(build_segments(source, &LineClassifier::default()));
//! resolve_targets(&mut titled.segments);
//!
//! assert_eq!(titled.title, "Hello");
//! assert_eq!(titled.description, "A first example.");
//! assert_eq!(titled.segments[1].annotation, "Greet");
//! ```

/// Comment-to-code target resolution
pub mod align;
/// Site and source configuration
pub mod config;
/// Corpus scanning, ordering, and sections
pub mod corpus;
/// Compiled corpus artifact
pub mod dataset;
/// Error types and result aliases
pub mod error;
/// Per-directory example compilation
pub mod example;
/// `NNN-slug` directory naming
pub mod naming;
/// HTML, `llms.txt`, and static site output
pub mod render;
/// Line classification and segment building
pub mod segment;
/// Shell transcript parsing
pub mod shell;
/// Title and description extraction
pub mod title;

pub use align::resolve_targets;
pub use config::{CONFIG_FILE_NAME, SiteConfig, SiteSettings, SourceSettings};
pub use corpus::{BuildReport, CorpusAssembler, CorpusBuilder, Section, SectionManifest};
pub use dataset::Dataset;
pub use error::{Error, Result};
pub use example::{ExampleCompiler, ExampleRecord, ImageRef};
pub use naming::{ExampleName, parse_example_name};
pub use segment::{LineClassifier, LineRange, Segment, build_segments};
pub use shell::{CommandOutput, TranscriptParser, extract_commands};
pub use title::{TitledSegments, extract_title};
