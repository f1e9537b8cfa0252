//! Worker signalling: progress notices then exactly one terminal event.

use std::fs;
use std::path::Path;
use std::sync::Arc;

use xpub_core::{PipelineConfig, RunEvent, RunRegistry, spawn_run};
use xpub_engine::{CompiledProgram, EngineError, TransformationEngine};
use xpub_model::FailureKind;
use xpub_validate::InMemoryRecordStore;

struct PageEngine;

impl TransformationEngine for PageEngine {
    fn compile(&self, _stylesheet: &Path) -> Result<Box<dyn CompiledProgram>, EngineError> {
        Ok(Box::new(PageProgram))
    }
}

struct PageProgram;

impl CompiledProgram for PageProgram {
    fn run(
        &self,
        _input: &Path,
        primary_output: &Path,
        output_dir: &Path,
    ) -> Result<(), EngineError> {
        fs::write(primary_output, "<primary/>")
            .map_err(|error| EngineError::Runtime(error.to_string()))?;
        fs::write(output_dir.join("index.html"), "<html/>")
            .map_err(|error| EngineError::Runtime(error.to_string()))?;
        Ok(())
    }
}

fn config_in(dir: &Path, export: &str, available: &[&str]) -> (PipelineConfig, InMemoryRecordStore) {
    let export_path = dir.join("export.xml");
    fs::write(&export_path, export).expect("write export");
    let stylesheet_path = dir.join("site.xsl");
    fs::write(&stylesheet_path, "<stylesheet/>").expect("write stylesheet");
    let data_dir = dir.join("data");
    fs::create_dir_all(&data_dir).expect("data dir");

    let mut config = PipelineConfig::new(&export_path, &stylesheet_path, &data_dir);
    config.workspace_base = dir.join("workspaces");
    let store = InMemoryRecordStore::new(available.iter().map(|id| (*id).to_string()));
    (config, store)
}

#[test]
fn worker_reports_progress_then_one_terminal_event() {
    let dir = tempfile::tempdir().expect("tempdir");
    let (config, store) = config_in(
        dir.path(),
        "<response><item><projet>alpha</projet></item></response>",
        &["alpha"],
    );
    let registry = Arc::new(RunRegistry::new(4));
    let handle = spawn_run(
        config,
        Box::new(PageEngine),
        Box::new(store),
        Arc::clone(&registry),
    )
    .expect("spawn");
    let run_id = handle.run_id().clone();

    let mut progress = 0usize;
    let mut terminal = 0usize;
    let mut result = None;
    for event in handle.events().iter() {
        match event {
            RunEvent::Progress(_) => progress += 1,
            RunEvent::Finished {
                result: finished, ..
            } => {
                terminal += 1;
                result = Some(finished);
            }
            RunEvent::Failed(_) => terminal += 1,
        }
    }
    assert!(progress >= 5, "one notice per stage, got {progress}");
    assert_eq!(terminal, 1);
    let result = result.expect("success payload");
    assert_eq!(result.run_id, run_id);

    // retained before the terminal event: addressable right away
    assert!(registry.result(&run_id).is_some());
    assert!(registry.file_path(&run_id, "index.html").is_some());
}

#[test]
fn wait_returns_the_failure_payload() {
    let dir = tempfile::tempdir().expect("tempdir");
    let (config, store) = config_in(
        dir.path(),
        "<response><item><projet>alpha</projet></item></response>",
        &[],
    );
    let registry = Arc::new(RunRegistry::new(4));
    let handle = spawn_run(
        config,
        Box::new(PageEngine),
        Box::new(store),
        Arc::clone(&registry),
    )
    .expect("spawn");

    let failure = handle
        .wait(|_| {})
        .expect_err("gate must block");
    assert_eq!(failure.kind, FailureKind::Validation);
    assert_eq!(failure.missing_references, vec!["alpha".to_string()]);
    assert!(registry.is_empty());
}
