//! The compiled corpus as a single JSON document.

use crate::Result;
use crate::corpus::Section;
use crate::example::ExampleRecord;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Every compiled example, in presentation order, plus optional sections.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dataset {
    /// When the corpus was assembled. Artifacts without a stamp load with
    /// the current time.
    #[serde(default = "Utc::now")]
    pub generated_at: DateTime<Utc>,
    /// Examples ordered for presentation.
    pub examples: Vec<ExampleRecord>,
    /// Sections in presentation order; empty for a flat corpus.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub sections: Vec<Section>,
}

/// A run of examples sharing a section, borrowed from a [`Dataset`].
#[derive(Debug, Clone)]
pub struct SectionGroup<'a> {
    /// The section, or `None` for a flat corpus.
    pub section: Option<&'a Section>,
    /// Members, in presentation order.
    pub examples: Vec<&'a ExampleRecord>,
}

impl Dataset {
    /// Create a dataset stamped with the current time.
    #[must_use]
    pub fn new(examples: Vec<ExampleRecord>, sections: Vec<Section>) -> Self {
        Self {
            generated_at: Utc::now(),
            examples,
            sections,
        }
    }

    /// Read a dataset from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not a dataset.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Write the dataset as pretty-printed JSON, creating parent directories.
    ///
    /// # Errors
    ///
    /// Returns an error if the file or its directory cannot be written.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        Ok(())
    }

    /// Look up an example by id.
    #[must_use]
    pub fn find(&self, id: &str) -> Option<&ExampleRecord> {
        self.examples.iter().find(|e| e.id == id)
    }

    /// The first example, in presentation order, whose order is strictly
    /// greater than `order`.
    #[must_use]
    pub fn next_after(&self, order: u32) -> Option<&ExampleRecord> {
        self.examples.iter().find(|e| e.order > order)
    }

    /// Whether the corpus has no examples.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.examples.is_empty()
    }

    /// Examples grouped by section, in presentation order.
    ///
    /// A flat corpus yields one group with no section. Sections without
    /// members are left out.
    #[must_use]
    pub fn sections_with_examples(&self) -> Vec<SectionGroup<'_>> {
        if self.sections.is_empty() {
            return vec![SectionGroup {
                section: None,
                examples: self.examples.iter().collect(),
            }];
        }

        self.sections
            .iter()
            .map(|section| SectionGroup {
                section: Some(section),
                examples: self
                    .examples
                    .iter()
                    .filter(|e| e.section_id.as_deref() == Some(section.id.as_str()))
                    .collect(),
            })
            .filter(|group| !group.examples.is_empty())
            .collect()
    }
}
