use serde::{Deserialize, Serialize};
use std::fmt;

/// The fixed set of configuration documents fused alongside every export.
///
/// `ALL` is the fusion enumeration order; it never changes between runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfigSlot {
    Presentation,
    Projects,
    LegalMentions,
    About,
}

impl ConfigSlot {
    pub const ALL: [ConfigSlot; 4] = [
        ConfigSlot::Presentation,
        ConfigSlot::Projects,
        ConfigSlot::LegalMentions,
        ConfigSlot::About,
    ];

    /// Name of the wrapper element this slot contributes to the fused document.
    pub fn wrapper_name(self) -> &'static str {
        match self {
            Self::Presentation => "presentation_data",
            Self::Projects => "projects_data",
            Self::LegalMentions => "legal_mentions_data",
            Self::About => "about_data",
        }
    }

    /// Conventional file name of the slot document inside the data directory.
    pub fn file_name(self) -> &'static str {
        match self {
            Self::Presentation => "presentation.xml",
            Self::Projects => "projects.xml",
            Self::LegalMentions => "legal_mentions.xml",
            Self::About => "about.xml",
        }
    }
}

impl fmt::Display for ConfigSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.wrapper_name())
    }
}
