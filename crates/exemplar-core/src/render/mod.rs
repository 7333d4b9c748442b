//! Output renderers.
//!
//! Everything here is a pure function of a [`Dataset`](crate::dataset::Dataset)
//! and the site settings, except [`SiteWriter`] which puts the rendered
//! pages on disk.

mod html;
mod layout;
mod llms;
mod site;

pub use html::{PageRenderer, annotation_html};
pub use layout::{PageGroup, PageRow, page_groups};
pub use llms::render_llms_txt;
pub use site::{SiteSummary, SiteWriter};

/// How generated pages link to each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LinkStyle {
    /// Relative links for a static site that may live under any prefix.
    Relative,
    /// Root-absolute links for the live server.
    Absolute,
}

impl LinkStyle {
    /// Link to the index from a page at `depth` (0 = index, 1 = example).
    #[must_use]
    pub fn home(self, depth: usize) -> String {
        match self {
            Self::Absolute => "/".to_string(),
            Self::Relative if depth == 0 => "./".to_string(),
            Self::Relative => "../".repeat(depth),
        }
    }

    /// Link to example `id` from a page at `depth`.
    #[must_use]
    pub fn example(self, id: &str, depth: usize) -> String {
        match self {
            Self::Absolute => format!("/{id}"),
            Self::Relative => format!("{}{id}/", "../".repeat(depth)),
        }
    }

    /// Link to an image of example `id` from that example's page.
    #[must_use]
    pub fn image(self, id: &str, filename: &str) -> String {
        match self {
            Self::Absolute => format!("/{id}/images/{filename}"),
            Self::Relative => format!("images/{filename}"),
        }
    }
}
