//! Engine driver for xsltproc-compatible external processors.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;

use tracing::debug;

use xpub_fuse::well_formed;

use crate::{CompiledProgram, EngineError, TransformationEngine};

/// Drives an external XSLT processor executable. Compilation here is a
/// cheap well-formedness check of the stylesheet; the processor reports its
/// own compile errors at run time through its exit status.
#[derive(Debug, Clone)]
pub struct CommandEngine {
    binary: PathBuf,
}

impl CommandEngine {
    pub fn new(binary: impl Into<PathBuf>) -> Self {
        Self {
            binary: binary.into(),
        }
    }
}

impl Default for CommandEngine {
    fn default() -> Self {
        Self::new("xsltproc")
    }
}

impl TransformationEngine for CommandEngine {
    fn compile(&self, stylesheet: &Path) -> Result<Box<dyn CompiledProgram>, EngineError> {
        let content = fs::read_to_string(stylesheet).map_err(|error| {
            EngineError::Compile(format!("cannot read {}: {error}", stylesheet.display()))
        })?;
        well_formed(&content).map_err(EngineError::Compile)?;
        Ok(Box::new(CompiledCommand {
            binary: self.binary.clone(),
            stylesheet: stylesheet.to_path_buf(),
        }))
    }
}

struct CompiledCommand {
    binary: PathBuf,
    stylesheet: PathBuf,
}

impl CompiledProgram for CompiledCommand {
    fn run(
        &self,
        input: &Path,
        primary_output: &Path,
        output_dir: &Path,
    ) -> Result<(), EngineError> {
        debug!(
            binary = %self.binary.display(),
            stylesheet = %self.stylesheet.display(),
            input = %input.display(),
            "invoking transformation engine"
        );
        let output = Command::new(&self.binary)
            .arg("--output")
            .arg(primary_output)
            .arg("--stringparam")
            .arg("output-dir")
            .arg(output_dir)
            .arg(&self.stylesheet)
            .arg(input)
            .output()
            .map_err(|error| {
                EngineError::Runtime(format!("cannot launch {}: {error}", self.binary.display()))
            })?;
        if output.status.success() {
            return Ok(());
        }
        let stderr = String::from_utf8_lossy(&output.stderr);
        Err(EngineError::Runtime(format!(
            "{} exited with {}: {}",
            self.binary.display(),
            output.status,
            stderr.trim()
        )))
    }
}
