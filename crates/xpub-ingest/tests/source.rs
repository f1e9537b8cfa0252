//! Unit tests for source document reading.

use std::fs;

use xpub_ingest::{declared_encoding, read_source_document};
use xpub_model::PipelineError;

#[test]
fn detects_declared_encoding() {
    let xml = "<?xml version=\"1.0\" encoding=\"ISO-8859-1\"?><a/>";
    assert_eq!(declared_encoding(xml), Some("iso-8859-1".to_string()));
}

#[test]
fn missing_declaration_has_no_encoding() {
    assert_eq!(declared_encoding("<a/>"), None);
}

#[test]
fn reads_document_with_origin_label() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("export.xml");
    fs::write(&path, "<?xml version=\"1.0\" encoding=\"UTF-8\"?><response/>").expect("write");

    let document = read_source_document(&path).expect("read");
    assert_eq!(document.origin, "export.xml");
    assert_eq!(document.encoding, "utf-8");
    assert!(document.content.contains("<response/>"));
}

#[test]
fn missing_file_is_a_source_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let error = read_source_document(&dir.path().join("absent.xml"))
        .expect_err("must fail");
    assert!(matches!(error, PipelineError::Source(_)));
}
