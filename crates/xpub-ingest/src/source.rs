//! Reading source documents from disk.

use std::fs;
use std::path::Path;

use quick_xml::Reader;
use quick_xml::events::Event;

use xpub_model::{PipelineError, Result, SourceDocument};

/// Read a source document, labelling it with its file name and declared
/// character encoding.
pub fn read_source_document(path: &Path) -> Result<SourceDocument> {
    let content = fs::read_to_string(path)
        .map_err(|error| PipelineError::Source(format!("cannot read {}: {error}", path.display())))?;
    let origin = path
        .file_name()
        .and_then(|v| v.to_str())
        .unwrap_or("unknown")
        .to_string();
    let mut document = SourceDocument::new(content, origin);
    if let Some(encoding) = declared_encoding(&document.content) {
        document.encoding = encoding;
    }
    Ok(document)
}

/// Encoding named in the XML declaration, lower-cased; `None` when the
/// document carries no declaration.
pub fn declared_encoding(content: &str) -> Option<String> {
    let mut reader = Reader::from_str(content);
    match reader.read_event() {
        Ok(Event::Decl(decl)) => decl
            .encoding()
            .and_then(|v| v.ok())
            .map(|v| String::from_utf8_lossy(&v).to_lowercase()),
        _ => None,
    }
}
