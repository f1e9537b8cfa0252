//! Run registry retention, addressing and eviction.

use std::fs;
use std::path::Path;

use xpub_core::{RunRecord, RunRegistry, Workspace};
use xpub_model::{RunId, TransformationResult};

fn record(base: &Path, id: &str) -> RunRecord {
    let run_id = RunId::new(id);
    let workspace = Workspace::create(base, &run_id).expect("workspace");
    fs::write(workspace.output_dir().join("report.xml"), "<r/>").expect("write");
    let result = TransformationResult {
        run_id,
        duration_secs: 0.1,
        output_files_count: 1,
        files: vec!["report.xml".to_string()],
        archive_path: workspace.archive_path(),
        output_dir: workspace.output_dir(),
    };
    RunRecord { result, workspace }
}

#[test]
fn retains_and_addresses_runs_by_id() {
    let dir = tempfile::tempdir().expect("tempdir");
    let registry = RunRegistry::new(4);
    registry.insert(record(dir.path(), "one"));

    let run_id = RunId::new("one");
    assert!(registry.result(&run_id).is_some());
    assert!(registry.archive_path(&run_id).is_some());
    let path = registry.file_path(&run_id, "report.xml").expect("listed file");
    assert!(path.exists());
    // only listed top-level names resolve
    assert!(registry.file_path(&run_id, "secret.txt").is_none());
    assert!(registry.result(&RunId::new("unknown")).is_none());
}

#[test]
fn eviction_is_oldest_first_and_deletes_the_workspace() {
    let dir = tempfile::tempdir().expect("tempdir");
    let registry = RunRegistry::new(2);
    registry.insert(record(dir.path(), "one"));
    registry.insert(record(dir.path(), "two"));
    registry.insert(record(dir.path(), "three"));

    assert_eq!(registry.len(), 2);
    assert!(registry.result(&RunId::new("one")).is_none());
    assert!(!dir.path().join("one").exists());
    assert!(dir.path().join("two").exists());
    assert!(dir.path().join("three").exists());
}

#[test]
fn discard_removes_artifacts() {
    let dir = tempfile::tempdir().expect("tempdir");
    let registry = RunRegistry::new(4);
    registry.insert(record(dir.path(), "one"));

    assert!(registry.discard(&RunId::new("one")));
    assert!(!registry.discard(&RunId::new("one")));
    assert!(registry.is_empty());
    assert!(!dir.path().join("one").exists());
}
