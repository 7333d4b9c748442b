//! Comment-to-code alignment.
//!
//! Every comment segment gets a target line range naming the code it
//! documents:
//!
//! 1. the nearest code segment after it, if any;
//! 2. otherwise the segment immediately before it, if that is code
//!    (a trailing remark at the end of the file);
//! 3. otherwise its own range (a stand-alone annotation).
//!
//! Code segments are never touched, and resolving twice gives the same
//! result.

use crate::segment::{LineRange, Segment};

/// Compute the target range for the segment at `index`.
///
/// Code segments target their own range.
///
/// # Panics
///
/// Panics if `index` is out of bounds.
#[must_use]
pub fn target_for(segments: &[Segment], index: usize) -> LineRange {
    let segment = &segments[index];
    if segment.is_code() {
        return segment.line_range;
    }

    if let Some(next_code) = segments[index + 1..].iter().find(|s| s.is_code()) {
        return next_code.line_range;
    }

    match index.checked_sub(1).map(|prev| &segments[prev]) {
        Some(prev) if prev.is_code() => prev.line_range,
        _ => segment.line_range,
    }
}

/// Assign `target_line_range` on every comment segment.
pub fn resolve_targets(segments: &mut [Segment]) {
    let targets: Vec<Option<LineRange>> = (0..segments.len())
        .map(|index| segments[index].is_comment.then(|| target_for(segments, index)))
        .collect();

    for (segment, target) in segments.iter_mut().zip(targets) {
        if let Some(target) = target {
            segment.target_line_range = target;
        }
    }
}
