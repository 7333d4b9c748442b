//! Page row layout.
//!
//! Turns an example body into display groups. Each code segment becomes a
//! row carrying the annotations of every comment that targets its range. A
//! comment that targets its own range, or a row whose code is blank, is
//! stand-alone prose and opens a new group with that prose as its header.

use crate::segment::Segment;
use std::collections::HashMap;

/// One two-column row: prose on the left, code on the right.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRow<'a> {
    /// Annotations attached to this code, in source order.
    pub annotations: Vec<&'a str>,
    /// Display code with surrounding blank lines removed.
    pub code: &'a str,
}

/// A run of rows under an optional header.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PageGroup<'a> {
    /// Stand-alone prose that opened this group.
    pub header: Vec<&'a str>,
    /// Rows in source order.
    pub rows: Vec<PageRow<'a>>,
}

impl PageGroup<'_> {
    fn is_empty(&self) -> bool {
        self.header.is_empty() && self.rows.is_empty()
    }
}

/// Lay out body segments into groups.
#[must_use]
pub fn page_groups(segments: &[Segment]) -> Vec<PageGroup<'_>> {
    let mut attached: HashMap<_, Vec<&str>> = HashMap::new();
    for segment in segments.iter().filter(|s| s.is_comment) {
        if segment.target_line_range != segment.line_range {
            attached
                .entry(segment.target_line_range)
                .or_default()
                .push(segment.annotation.as_str());
        }
    }

    let mut groups = Vec::new();
    let mut current = PageGroup::default();

    for segment in segments {
        let header = if segment.is_comment {
            if segment.target_line_range != segment.line_range {
                continue;
            }
            vec![segment.annotation.as_str()]
        } else {
            let annotations = attached.remove(&segment.line_range).unwrap_or_default();
            let code = segment.display_code.trim_matches('\n');
            if !code.trim().is_empty() {
                current.rows.push(PageRow { annotations, code });
                continue;
            }
            if annotations.is_empty() {
                continue;
            }
            annotations
        };

        if !current.is_empty() {
            groups.push(std::mem::take(&mut current));
        }
        current.header = header;
    }

    if !current.is_empty() {
        groups.push(current);
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::align::resolve_targets;
    use crate::segment::{LineClassifier, build_segments};

    fn segments(source: &str) -> Vec<Segment> {
        let mut segments = build_segments(source, &LineClassifier::default());
        resolve_targets(&mut segments);
        segments
    }

    #[test]
    fn test_annotation_pairs_with_following_code() {
        let segs = segments("# Set up\nx = 1\n# Print it\nprint(x)\n");
        let groups = page_groups(&segs);
        assert_eq!(groups.len(), 1);
        assert!(groups[0].header.is_empty());
        assert_eq!(
            groups[0].rows,
            vec![
                PageRow { annotations: vec!["Set up"], code: "x = 1" },
                PageRow { annotations: vec!["Print it"], code: "print(x)" },
            ]
        );
    }

    #[test]
    fn test_stand_alone_comment_opens_group() {
        let segs = segments("# Only prose here\n");
        let groups = page_groups(&segs);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].header, vec!["Only prose here"]);
        assert!(groups[0].rows.is_empty());
    }

    #[test]
    fn test_comment_before_blank_line_becomes_header() {
        let segs = segments("x = 1\n# Part two\n\n# Do it\ny = 2\n");
        let groups = page_groups(&segs);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].rows[0].code, "x = 1");
        assert_eq!(groups[1].header, vec!["Part two"]);
        assert_eq!(groups[1].rows[0].annotations, vec!["Do it"]);
    }

    #[test]
    fn test_trailing_comment_attaches_to_previous_code() {
        let segs = segments("x = 1\n# That was x\n");
        let groups = page_groups(&segs);
        assert_eq!(groups[0].rows[0].annotations, vec!["That was x"]);
    }

    #[test]
    fn test_blank_code_without_annotations_is_dropped() {
        let segs = segments("x = 1\n# note\ny = 2\n");
        let groups = page_groups(&segs);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].rows.len(), 2);
        assert!(page_groups(&[]).is_empty());
    }
}
