use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

/// Read-only snapshot derived from a fused document. Never mutated after
/// extraction.
///
/// Extraction never fails: unparseable input yields a report whose
/// `parse_error` is set and whose counters stay at their defaults.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StatisticsReport {
    /// Tag name of the document root.
    pub root_tag: String,
    /// Attributes carried by the document root.
    pub root_attributes: BTreeMap<String, String>,
    /// Total number of elements in the tree.
    pub total_elements: usize,
    /// Number of distinct element tags.
    pub element_types: usize,
    /// Occurrences per element tag.
    pub element_counts: BTreeMap<String, usize>,
    /// Maximum element depth, the root sitting at depth zero.
    pub max_depth: usize,
    /// Total length of all text content, in characters.
    pub total_text_length: usize,
    /// Size of the document text in bytes.
    pub xml_size_bytes: usize,
    /// Whether the document contains CDATA sections.
    pub has_cdata: bool,
    /// Extracted project reference identifiers, deduplicated, case preserved.
    pub project_references: BTreeSet<String>,
    /// Set when the input could not be parsed.
    pub parse_error: Option<String>,
}

impl StatisticsReport {
    /// Report for input that could not be parsed.
    pub fn invalid(error: impl Into<String>) -> Self {
        Self {
            parse_error: Some(error.into()),
            ..Self::default()
        }
    }

    pub fn is_valid(&self) -> bool {
        self.parse_error.is_none()
    }
}
