use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::run::RunId;

/// Error taxonomy of the pipeline.
///
/// Recoverable per-slot failures during fusion are deliberately *not* part of
/// this enum; they are annotated inside the fused document and the run
/// continues. Everything here terminates the run.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The primary export cannot be read or is not well-formed.
    #[error("source document: {0}")]
    Source(String),
    /// The record store could not be read at validation time.
    #[error("record store: {0}")]
    RecordStore(String),
    /// Identifiers required by the export are unknown to the record store.
    /// User-correctable; the transformation engine is never invoked.
    #[error("unresolved project references: {}", missing.join(", "))]
    MissingReferences { missing: Vec<String> },
    /// The external transformation engine failed to compile or run.
    #[error("transformation engine: {0}")]
    Engine(String),
    /// Report or archive generation failed; partial artifacts are invalid.
    #[error("packaging: {0}")]
    Packaging(String),
    /// Workspace creation or intermediate I/O failed.
    #[error("workspace: {0}")]
    Workspace(String),
}

pub type Result<T> = std::result::Result<T, PipelineError>;

impl PipelineError {
    /// The terminal failure category this error maps to.
    pub fn kind(&self) -> FailureKind {
        match self {
            Self::Source(_) | Self::RecordStore(_) | Self::Workspace(_) => FailureKind::Fatal,
            Self::MissingReferences { .. } => FailureKind::Validation,
            Self::Engine(_) => FailureKind::Engine,
            Self::Packaging(_) => FailureKind::Packaging,
        }
    }
}

/// Terminal failure categories reported to callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// Unrecoverable read/parse or I/O failure.
    Fatal,
    /// The reference gate blocked the run; correctable by the user.
    Validation,
    /// The transformation engine reported an error.
    Engine,
    /// The result archive could not be produced.
    Packaging,
}

impl std::fmt::Display for FailureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::Fatal => "fatal",
            Self::Validation => "validation",
            Self::Engine => "engine",
            Self::Packaging => "packaging",
        };
        f.write_str(label)
    }
}

/// Terminal failure report of one run. Exactly one of these (or a
/// [`crate::TransformationResult`]) ends every run; never both.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunFailure {
    pub run_id: RunId,
    pub kind: FailureKind,
    pub message: String,
    /// Populated for validation gate failures only; sorted and deduplicated.
    pub missing_references: Vec<String>,
}

impl RunFailure {
    pub fn new(run_id: RunId, error: PipelineError) -> Self {
        let kind = error.kind();
        let missing_references = match &error {
            PipelineError::MissingReferences { missing } => missing.clone(),
            _ => Vec::new(),
        };
        Self {
            run_id,
            kind,
            message: error.to_string(),
            missing_references,
        }
    }
}
