//! Gate extraction paths and the missing-set computation.

use std::collections::BTreeSet;
use std::fs;

use xpub_model::ReferenceSet;
use xpub_validate::{
    InMemoryRecordStore, RecordStore, XmlRecordStore, declared_references, required_references,
};

const FUSED: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<merged_data generated="2025-01-01T00:00:00Z" source_file="export.xml">
  <philidor4_data>
    <response>
      <item>
        <projet>alpha</projet>
      </item>
      <item>
        <projet>beta</projet>
      </item>
      <item>
        <projet>alpha</projet>
      </item>
    </response>
  </philidor4_data>
  <projects_data source_file="projects.xml">
    <projects>
      <project id="alpha" name="Alpha"/>
      <project id="gamma"/>
    </projects>
  </projects_data>
</merged_data>
"#;

fn set(values: &[&str]) -> BTreeSet<String> {
    values.iter().map(|v| (*v).to_string()).collect()
}

#[test]
fn extracts_required_identifiers() {
    let required = required_references(FUSED).expect("extract required");
    assert_eq!(required, set(&["alpha", "beta"]));
}

#[test]
fn extracts_declared_identifiers() {
    let declared = declared_references(FUSED).expect("extract declared");
    assert_eq!(declared, set(&["alpha", "gamma"]));
}

#[test]
fn requirement_path_is_anchored_to_the_primary() {
    // a `response`/`item`/`projet` chain outside the primary wrapper is
    // ignored
    let xml = r#"<merged_data>
  <about_data>
    <response><item><projet>stray</projet></item></response>
  </about_data>
</merged_data>"#;
    let required = required_references(xml).expect("extract");
    assert!(required.is_empty());
}

#[test]
fn missing_is_the_set_difference() {
    let refs = ReferenceSet::check(set(&["alpha", "beta"]), set(&["alpha", "gamma"]));
    assert_eq!(refs.missing_list(), vec!["beta".to_string()]);
    assert!(!refs.passes());
}

#[test]
fn available_superset_never_blocks() {
    let required = required_references(FUSED).expect("extract");
    let mut available = required.clone();
    available.insert("unrelated".to_string());
    assert!(ReferenceSet::check(required, available).passes());
}

#[test]
fn xml_record_store_lists_project_ids() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("projects.xml");
    fs::write(
        &path,
        "<projects count=\"2\"><project id=\"alpha\"/><project id=\"beta\">desc</project></projects>",
    )
    .expect("write registry");

    let store = XmlRecordStore::new(&path);
    assert_eq!(store.record_ids().expect("read"), set(&["alpha", "beta"]));
}

#[test]
fn unreadable_record_store_is_an_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let store = XmlRecordStore::new(dir.path().join("absent.xml"));
    assert!(store.record_ids().is_err());
}

#[test]
fn in_memory_store_snapshots() {
    let store = InMemoryRecordStore::new(["alpha".to_string(), "beta".to_string()]);
    assert_eq!(store.record_ids().expect("read"), set(&["alpha", "beta"]));
}
