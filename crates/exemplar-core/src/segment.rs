//! Line classification and segment building.
//!
//! A source file is walked top to bottom. Each physical line is labelled
//! "comment" or "code" by a [`LineClassifier`], and consecutive lines with
//! the same label are folded into one [`Segment`]. Segments partition the
//! file exactly: concatenating every segment's raw text in order yields the
//! original file byte for byte.
//!
//! ## Example
//!
//! ```rust
//! use exemplar_core::segment::{build_segments, LineClassifier};
//!
//! let classifier = LineClassifier::default();
//! let segments = build_segments("# Say hello\nprint('hi')\n", &classifier);
//!
//! assert_eq!(segments.len(), 2);
//! assert!(segments[0].is_comment);
//! assert_eq!(segments[0].annotation, "Say hello");
//! assert_eq!(segments[1].display_code, "print('hi')\n");
//! ```

use serde::{Deserialize, Serialize};

/// Default single-line comment marker.
pub const DEFAULT_COMMENT_MARKER: &str = "#";

/// A 1-based inclusive range of physical lines.
///
/// Serialized as a two-element array `[start, end]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "(usize, usize)", into = "(usize, usize)")]
pub struct LineRange {
    /// First line of the range (1-based).
    pub start: usize,
    /// Last line of the range (1-based, inclusive).
    pub end: usize,
}

impl LineRange {
    /// Create a new range.
    #[must_use]
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Number of lines covered by the range.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.end + 1 - self.start
    }

    /// Whether the range covers no lines. Never true for ranges produced by
    /// the segment builder.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.end < self.start
    }
}

impl From<(usize, usize)> for LineRange {
    fn from((start, end): (usize, usize)) -> Self {
        Self { start, end }
    }
}

impl From<LineRange> for (usize, usize) {
    fn from(range: LineRange) -> Self {
        (range.start, range.end)
    }
}

impl std::fmt::Display for LineRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}-{}", self.start, self.end)
    }
}

/// Labels physical lines as comment or code.
///
/// A line is a comment if, after stripping leading whitespace, it starts with
/// the comment marker. Blank lines are code: a blank line is what ends a
/// comment block sitting above executable code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineClassifier {
    marker: String,
}

impl LineClassifier {
    /// Create a classifier for the given single-line comment marker.
    #[must_use]
    pub fn new(marker: impl Into<String>) -> Self {
        Self {
            marker: marker.into(),
        }
    }

    /// The comment marker this classifier recognizes.
    #[must_use]
    pub fn marker(&self) -> &str {
        &self.marker
    }

    /// Whether `line` is a comment line.
    #[must_use]
    pub fn is_comment(&self, line: &str) -> bool {
        !self.marker.is_empty() && line.trim_start().starts_with(self.marker.as_str())
    }

    /// Strip the marker and at most one following space from a comment line.
    ///
    /// Returns `None` when the line carries no marker. Trailing whitespace,
    /// including the line terminator, is dropped.
    #[must_use]
    pub fn annotation_text<'a>(&self, line: &'a str) -> Option<&'a str> {
        if self.marker.is_empty() {
            return None;
        }
        let rest = line
            .trim_end()
            .trim_start()
            .strip_prefix(self.marker.as_str())?;
        Some(rest.strip_prefix(' ').unwrap_or(rest))
    }
}

impl Default for LineClassifier {
    fn default() -> Self {
        Self::new(DEFAULT_COMMENT_MARKER)
    }
}

/// A maximal contiguous run of lines sharing one classification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    /// Raw text of every line in the segment, terminators included.
    #[serde(rename = "code")]
    pub raw: String,
    /// Same as `raw` for code segments, empty for comment segments.
    pub display_code: String,
    /// Marker-stripped comment text joined by newlines. Empty for code.
    pub annotation: String,
    /// Classification shared by every line of the segment.
    pub is_comment: bool,
    /// First line of the segment (1-based).
    pub start_line: usize,
    /// Lines covered by the segment.
    pub line_range: LineRange,
    /// Range of the code this segment documents. Equal to `line_range`
    /// until the target resolver runs.
    pub target_line_range: LineRange,
}

impl Segment {
    /// Whether this is a code segment.
    #[must_use]
    pub const fn is_code(&self) -> bool {
        !self.is_comment
    }
}

/// Accumulator for the segment currently being built.
struct OpenSegment {
    raw: String,
    display_code: String,
    annotation: String,
    is_comment: bool,
    start_line: usize,
}

impl OpenSegment {
    fn close(self, end_line: usize) -> Segment {
        let line_range = LineRange::new(self.start_line, end_line);
        Segment {
            raw: self.raw,
            display_code: self.display_code,
            annotation: self.annotation,
            is_comment: self.is_comment,
            start_line: self.start_line,
            line_range,
            target_line_range: line_range,
        }
    }
}

/// Folds classified lines into segments, one line at a time.
///
/// ```rust
/// use exemplar_core::segment::{LineClassifier, SegmentBuilder};
///
/// let classifier = LineClassifier::default();
/// let mut builder = SegmentBuilder::new(&classifier);
/// builder.push_line("# one\n");
/// builder.push_line("# two\n");
/// builder.push_line("x = 1\n");
/// let segments = builder.finish();
///
/// assert_eq!(segments[0].annotation, "one\ntwo");
/// assert_eq!(segments[0].line_range.end, 2);
/// assert_eq!(segments[1].start_line, 3);
/// ```
pub struct SegmentBuilder<'a> {
    classifier: &'a LineClassifier,
    segments: Vec<Segment>,
    current: Option<OpenSegment>,
    line_number: usize,
}

impl<'a> SegmentBuilder<'a> {
    /// Create an empty builder.
    #[must_use]
    pub const fn new(classifier: &'a LineClassifier) -> Self {
        Self {
            classifier,
            segments: Vec::new(),
            current: None,
            line_number: 0,
        }
    }

    /// Feed the next physical line, terminator included.
    pub fn push_line(&mut self, line: &str) {
        self.line_number += 1;
        let is_comment = self.classifier.is_comment(line);

        match self.current.as_mut() {
            Some(open) if open.is_comment == is_comment => {
                open.raw.push_str(line);
                if is_comment {
                    if let Some(text) = self.classifier.annotation_text(line) {
                        if !open.annotation.is_empty() {
                            open.annotation.push('\n');
                        }
                        open.annotation.push_str(text);
                    }
                } else {
                    open.display_code.push_str(line);
                }
            },
            _ => {
                if let Some(open) = self.current.take() {
                    self.segments.push(open.close(self.line_number - 1));
                }
                self.current = Some(self.open(line, is_comment));
            },
        }
    }

    fn open(&self, line: &str, is_comment: bool) -> OpenSegment {
        let (display_code, annotation) = if is_comment {
            let text = self.classifier.annotation_text(line).unwrap_or_default();
            (String::new(), text.to_string())
        } else {
            (line.to_string(), String::new())
        };
        OpenSegment {
            raw: line.to_string(),
            display_code,
            annotation,
            is_comment,
            start_line: self.line_number,
        }
    }

    /// Close the open segment and return every segment in file order.
    #[must_use]
    pub fn finish(mut self) -> Vec<Segment> {
        if let Some(open) = self.current.take() {
            self.segments.push(open.close(self.line_number));
        }
        self.segments
    }
}

/// Split `source` into segments.
///
/// An empty source yields no segments; a source without comments yields a
/// single code segment spanning every line.
#[must_use]
pub fn build_segments(source: &str, classifier: &LineClassifier) -> Vec<Segment> {
    let mut builder = SegmentBuilder::new(classifier);
    for line in source.split_inclusive('\n') {
        builder.push_line(line);
    }
    builder.finish()
}
