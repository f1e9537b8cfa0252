//! Read interface over the record-management collaborator.

use std::collections::BTreeSet;
use std::fs;
use std::path::PathBuf;

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use xpub_model::{PipelineError, Result};

/// Read access to the identifiers currently known to the record store.
/// The pipeline never writes through this interface; it takes one snapshot
/// at the start of validation.
pub trait RecordStore {
    fn record_ids(&self) -> Result<BTreeSet<String>>;
}

/// Record store backed by the serialized projects registry document:
/// every `project` element's `id` attribute, at any depth.
#[derive(Debug, Clone)]
pub struct XmlRecordStore {
    path: PathBuf,
}

impl XmlRecordStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl RecordStore for XmlRecordStore {
    fn record_ids(&self) -> Result<BTreeSet<String>> {
        let content = fs::read_to_string(&self.path).map_err(|error| {
            PipelineError::RecordStore(format!("cannot read {}: {error}", self.path.display()))
        })?;
        scan_project_ids(&content)
    }
}

/// In-memory record store, mainly for tests and embedding callers.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRecordStore {
    ids: BTreeSet<String>,
}

impl InMemoryRecordStore {
    pub fn new(ids: impl IntoIterator<Item = String>) -> Self {
        Self {
            ids: ids.into_iter().collect(),
        }
    }
}

impl RecordStore for InMemoryRecordStore {
    fn record_ids(&self) -> Result<BTreeSet<String>> {
        Ok(self.ids.clone())
    }
}

fn scan_project_ids(content: &str) -> Result<BTreeSet<String>> {
    let mut reader = Reader::from_str(content);
    let mut ids = BTreeSet::new();
    loop {
        match reader.read_event() {
            Ok(Event::Start(start)) | Ok(Event::Empty(start)) => {
                collect_id(&start, &mut ids)?;
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(error) => {
                return Err(PipelineError::RecordStore(format!(
                    "projects registry: {error}"
                )));
            }
        }
    }
    Ok(ids)
}

fn collect_id(start: &BytesStart<'_>, ids: &mut BTreeSet<String>) -> Result<()> {
    if start.name().as_ref() != b"project" {
        return Ok(());
    }
    for attribute in start.attributes() {
        let attribute = attribute
            .map_err(|error| PipelineError::RecordStore(format!("projects registry: {error}")))?;
        if attribute.key.as_ref() == b"id" {
            let value = attribute
                .unescape_value()
                .map_err(|error| PipelineError::RecordStore(format!("projects registry: {error}")))?;
            let value = value.trim();
            if !value.is_empty() {
                ids.insert(value.to_string());
            }
        }
    }
    Ok(())
}
