//! `NNN-slug` directory name convention.
//!
//! Example directories carry an explicit numeric order as a prefix, e.g.
//! `001-basic-generation`. The prefix drives sorting and "next example"
//! navigation; the slug names the primary source and transcript files.

use regex::Regex;
use std::sync::LazyLock;

use crate::{Error, Result};

static EXAMPLE_NAME: LazyLock<Regex> = LazyLock::new(|| {
    // The pattern is a literal; failure here is a programming error.
    #[allow(clippy::expect_used)]
    Regex::new(r"^(\d+)-([^/\\]+)$").expect("valid example name pattern")
});

/// Parsed example directory name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExampleName {
    /// Numeric order from the prefix.
    pub order: u32,
    /// Everything after the first dash.
    pub slug: String,
}

/// Whether a directory name looks like an example directory at all.
///
/// Only names that start with a digit are considered; anything else (for
/// example `static` or `.git`) is not part of the corpus.
#[must_use]
pub fn is_example_candidate(name: &str) -> bool {
    name.chars().next().is_some_and(|c| c.is_ascii_digit())
}

/// Parse `<digits>-<slug>` into an [`ExampleName`].
///
/// ```rust
/// use exemplar_core::naming::parse_example_name;
///
/// let name = parse_example_name("007-bounding-boxes")?;
/// assert_eq!(name.order, 7);
/// assert_eq!(name.slug, "bounding-boxes");
/// # Ok::<(), exemplar_core::Error>(())
/// ```
///
/// # Errors
///
/// Returns [`Error::InvalidExample`] when the name has no numeric prefix, no
/// slug, or an order that does not fit in `u32`.
pub fn parse_example_name(name: &str) -> Result<ExampleName> {
    let captures = EXAMPLE_NAME
        .captures(name)
        .ok_or_else(|| Error::invalid_example(name, "expected '<number>-<slug>' directory name"))?;

    let order = captures[1]
        .parse::<u32>()
        .map_err(|e| Error::invalid_example(name, format!("invalid numeric prefix: {e}")))?;

    Ok(ExampleName {
        order,
        slug: captures[2].to_string(),
    })
}
