use std::fmt;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Globally unique identifier of one pipeline run. Names the workspace
/// directory and addresses the retained artifacts.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RunId(String);

impl RunId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// First eight characters, used in artifact file names.
    pub fn short(&self) -> &str {
        let end = self.0.len().min(8);
        &self.0[..end]
    }
}

impl fmt::Display for RunId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// What the orchestrator hands to the transformation engine. Immutable,
/// consumed exactly once.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransformationRequest {
    /// Serialized fused document.
    pub input: PathBuf,
    /// Transformation program location.
    pub stylesheet: PathBuf,
}

/// Success payload of one run, retained for the lifetime of the run's
/// workspace so the archive stays downloadable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransformationResult {
    pub run_id: RunId,
    /// Wall-clock duration of the engine invocation, in seconds.
    pub duration_secs: f64,
    /// Number of files written under the workspace output directory,
    /// including the run report.
    pub output_files_count: usize,
    /// Flat list of top-level output file names, individually retrievable.
    pub files: Vec<String>,
    /// Result archive inside the workspace.
    pub archive_path: PathBuf,
    /// Output directory inside the workspace.
    pub output_dir: PathBuf,
}
