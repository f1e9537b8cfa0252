use serde::{Deserialize, Serialize};

/// Synthetic root element of every fused document.
pub const FUSED_ROOT: &str = "merged_data";

/// Wrapper element holding the primary export inside the fused document.
pub const PRIMARY_WRAPPER: &str = "philidor4_data";

/// One ingested XML document. Immutable once read.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceDocument {
    /// Raw textual content.
    pub content: String,
    /// Origin label: the export file name or a configuration slot name.
    pub origin: String,
    /// Declared character encoding, lower-cased; `utf-8` when absent.
    pub encoding: String,
}

impl SourceDocument {
    pub fn new(content: impl Into<String>, origin: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            origin: origin.into(),
            encoding: "utf-8".to_string(),
        }
    }
}
