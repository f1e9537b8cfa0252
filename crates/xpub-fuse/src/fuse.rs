//! Document fusion: combine the cleaned export with the configuration
//! documents into one composite tree.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use chrono::{SecondsFormat, Utc};
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, Event};

use xpub_ingest::clean_document;
use xpub_model::{
    ConfigSlot, FUSED_ROOT, PRIMARY_WRAPPER, PipelineError, Result, SourceDocument,
};

use crate::scan::well_formed;

/// A fused composite document, ready to hand to the transformation engine.
#[derive(Debug, Clone)]
pub struct FusedDocument {
    /// Pretty-printed XML text with a UTF-8 declaration.
    pub xml: String,
    /// Generation timestamp stamped on the synthetic root.
    pub generated: String,
    /// File name of the primary export.
    pub source_file: String,
    /// Slots that failed to read or parse, with the failure description.
    /// Recorded as `error` attributes inside the document as well.
    pub slot_errors: BTreeMap<ConfigSlot, String>,
}

/// Fuse the cleaned primary document with the configuration slots.
///
/// Only an ill-formed primary fails the fusion. Every declared slot yields a
/// wrapper element: content-tagged when its file reads and parses, otherwise
/// an empty wrapper carrying the failure description in an `error` attribute.
pub fn fuse_documents(
    primary: &SourceDocument,
    slots: &[(ConfigSlot, PathBuf)],
) -> Result<FusedDocument> {
    well_formed(&primary.content).map_err(PipelineError::Source)?;

    let generated = Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true);
    let mut writer = Writer::new_with_indent(Vec::new(), b' ', 2);
    writer
        .write_event(Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))
        .map_err(write_error)?;

    let mut root = BytesStart::new(FUSED_ROOT);
    root.push_attribute(("generated", generated.as_str()));
    root.push_attribute(("source_file", primary.origin.as_str()));
    writer.write_event(Event::Start(root)).map_err(write_error)?;

    writer
        .write_event(Event::Start(BytesStart::new(PRIMARY_WRAPPER)))
        .map_err(write_error)?;
    copy_content(&primary.content, &mut writer)?;
    writer
        .write_event(Event::End(BytesEnd::new(PRIMARY_WRAPPER)))
        .map_err(write_error)?;

    let mut slot_errors = BTreeMap::new();
    for (slot, path) in slots {
        match load_slot(path) {
            Ok(content) => {
                let mut wrapper = BytesStart::new(slot.wrapper_name());
                wrapper.push_attribute(("source_file", slot.file_name()));
                writer.write_event(Event::Start(wrapper)).map_err(write_error)?;
                copy_content(&content, &mut writer)?;
                writer
                    .write_event(Event::End(BytesEnd::new(slot.wrapper_name())))
                    .map_err(write_error)?;
            }
            Err(error) => {
                let mut wrapper = BytesStart::new(slot.wrapper_name());
                wrapper.push_attribute(("error", error.as_str()));
                wrapper.push_attribute(("source_file", slot.file_name()));
                writer.write_event(Event::Empty(wrapper)).map_err(write_error)?;
                slot_errors.insert(*slot, error);
            }
        }
    }

    writer
        .write_event(Event::End(BytesEnd::new(FUSED_ROOT)))
        .map_err(write_error)?;

    let xml = String::from_utf8(writer.into_inner())
        .map_err(|error| PipelineError::Workspace(format!("fused document not UTF-8: {error}")))?;
    Ok(FusedDocument {
        xml,
        generated,
        source_file: primary.origin.clone(),
        slot_errors,
    })
}

/// Read, clean and well-formedness-check one slot file.
fn load_slot(path: &Path) -> std::result::Result<String, String> {
    let raw = fs::read_to_string(path)
        .map_err(|error| format!("cannot read {}: {error}", path.display()))?;
    let cleaned = clean_document(&raw);
    well_formed(&cleaned)?;
    Ok(cleaned)
}

/// Copy a validated document's events into the writer, dropping any XML
/// declaration or doctype so the result stays a single document.
fn copy_content(xml: &str, writer: &mut Writer<Vec<u8>>) -> Result<()> {
    let mut reader = quick_xml::Reader::from_str(xml);
    reader.config_mut().trim_text(true);
    loop {
        match reader.read_event() {
            Ok(Event::Eof) => return Ok(()),
            Ok(Event::Decl(_) | Event::DocType(_)) => {}
            Ok(event) => writer.write_event(event).map_err(write_error)?,
            Err(error) => return Err(PipelineError::Source(error.to_string())),
        }
    }
}

fn write_error(error: std::io::Error) -> PipelineError {
    PipelineError::Workspace(format!("write fused document: {error}"))
}
