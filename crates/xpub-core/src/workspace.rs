//! Per-run temporary workspace lifecycle.
//!
//! Each run owns one uniquely named directory tree. The fused-document
//! intermediate is deleted as soon as the engine no longer needs it; the
//! output directory and archive are retained until the run is discarded or
//! evicted from the registry.

use std::fs;
use std::path::{Path, PathBuf};

use xpub_model::{PipelineError, Result, RunId};

/// Subdirectory the engine writes its output files into.
pub const OUTPUT_DIR_NAME: &str = "output";

/// File name of the serialized fused document.
pub const FUSED_DOCUMENT_NAME: &str = "merged_data.xml";

/// Default base directory for run workspaces.
pub fn default_workspace_base() -> PathBuf {
    std::env::temp_dir().join("xpub")
}

/// A run's temporary directory tree. Owned exclusively by one run; two runs
/// never share a workspace.
#[derive(Debug, Clone)]
pub struct Workspace {
    run_id: RunId,
    root: PathBuf,
}

impl Workspace {
    /// Create `base/<run id>` together with its output subdirectory.
    pub fn create(base: &Path, run_id: &RunId) -> Result<Self> {
        let root = base.join(run_id.as_str());
        fs::create_dir_all(root.join(OUTPUT_DIR_NAME)).map_err(|error| {
            PipelineError::Workspace(format!("create {}: {error}", root.display()))
        })?;
        Ok(Self {
            run_id: run_id.clone(),
            root,
        })
    }

    pub fn run_id(&self) -> &RunId {
        &self.run_id
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn output_dir(&self) -> PathBuf {
        self.root.join(OUTPUT_DIR_NAME)
    }

    pub fn fused_document_path(&self) -> PathBuf {
        self.root.join(FUSED_DOCUMENT_NAME)
    }

    pub fn archive_path(&self) -> PathBuf {
        self.root
            .join(format!("transformation_results_{}.zip", self.run_id.short()))
    }

    /// Remove the fused intermediate; the engine output stays.
    pub fn discard_intermediates(&self) {
        let _ = fs::remove_file(self.fused_document_path());
    }

    /// Remove the whole workspace tree. Best effort; a vanished directory is
    /// not an error.
    pub fn discard(&self) {
        let _ = fs::remove_dir_all(&self.root);
    }
}
