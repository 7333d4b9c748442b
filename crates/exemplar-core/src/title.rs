//! Page title and description extraction.
//!
//! The first comment block of an example is page metadata, not body
//! content: its first line is the title and the rest is the description.

use crate::segment::Segment;

/// Title used when a file does not open with a comment block.
pub const UNTITLED: &str = "Untitled Example";

/// Result of splitting the leading comment block off a segment list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TitledSegments {
    /// Trimmed first line of the leading comment.
    pub title: String,
    /// Remaining lines of the leading comment, trimmed. May be empty.
    pub description: String,
    /// Body segments, without the leading comment.
    pub segments: Vec<Segment>,
}

/// Split the leading comment segment into a title and description.
///
/// When the first segment is code, or there are no segments, the title is
/// [`UNTITLED`], the description is empty, and nothing is removed.
#[must_use]
pub fn extract_title(segments: Vec<Segment>) -> TitledSegments {
    let mut segments = segments.into_iter().peekable();

    let Some(first) = segments.next_if(|s| s.is_comment) else {
        return TitledSegments {
            title: UNTITLED.to_string(),
            description: String::new(),
            segments: segments.collect(),
        };
    };

    let (title, rest) = first
        .annotation
        .split_once('\n')
        .unwrap_or((first.annotation.as_str(), ""));

    TitledSegments {
        title: title.trim().to_string(),
        description: rest.trim().to_string(),
        segments: segments.collect(),
    }
}
