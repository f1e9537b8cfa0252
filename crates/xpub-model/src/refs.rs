use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Required vs available identifier sets; the `missing` difference is the
/// sole gating signal of the pipeline.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReferenceSet {
    /// Identifiers the export requires.
    pub required: BTreeSet<String>,
    /// Identifiers currently known to the record store.
    pub available: BTreeSet<String>,
    /// `required − available`.
    pub missing: BTreeSet<String>,
}

impl ReferenceSet {
    /// Pure set difference; no I/O, no ordering dependence.
    pub fn check(required: BTreeSet<String>, available: BTreeSet<String>) -> Self {
        let missing = required.difference(&available).cloned().collect();
        Self {
            required,
            available,
            missing,
        }
    }

    /// True when every required identifier is available.
    pub fn passes(&self) -> bool {
        self.missing.is_empty()
    }

    /// Missing identifiers, sorted and deduplicated.
    pub fn missing_list(&self) -> Vec<String> {
        self.missing.iter().cloned().collect()
    }
}
