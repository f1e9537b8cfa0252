//! Seam to the external transformation engine.
//!
//! The engine itself is a collaborator, not part of this system: it is
//! anything that can compile a transformation program and apply it to an
//! input document, writing its output files under a hinted directory. The
//! pipeline always supplies a single nominal primary output path even when
//! the program emits most of its real output as side files.

pub mod command;

use std::path::Path;

use thiserror::Error;

pub use command::CommandEngine;

#[derive(Debug, Error)]
pub enum EngineError {
    /// The transformation program could not be compiled.
    #[error("stylesheet compilation failed: {0}")]
    Compile(String),
    /// The transformation itself failed.
    #[error("transformation failed: {0}")]
    Runtime(String),
}

/// An external engine capable of compiling transformation programs.
pub trait TransformationEngine {
    fn compile(&self, stylesheet: &Path) -> Result<Box<dyn CompiledProgram>, EngineError>;
}

/// A compiled transformation program, runnable against one input document.
pub trait CompiledProgram {
    /// Apply the program. `primary_output` is the nominal main output file;
    /// additional outputs are written under `output_dir`.
    fn run(
        &self,
        input: &Path,
        primary_output: &Path,
        output_dir: &Path,
    ) -> Result<(), EngineError>;
}
