//! Reference extraction for the validation gate.
//!
//! Two fixed paths are read out of the fused document:
//! - required: primary wrapper -> `response` -> repeated `item` -> child
//!   `projet` text value;
//! - declared: projects slot wrapper -> repeated `project` elements -> `id`
//!   attribute.

use std::collections::BTreeSet;

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use xpub_model::{ConfigSlot, PRIMARY_WRAPPER, PipelineError, Result};

/// Project identifiers the export requires.
pub fn required_references(fused_xml: &str) -> Result<BTreeSet<String>> {
    let mut reader = Reader::from_str(fused_xml);
    reader.config_mut().trim_text(true);
    let mut stack: Vec<String> = Vec::new();
    let mut buffer = String::new();
    let mut required = BTreeSet::new();
    loop {
        match reader.read_event() {
            Ok(Event::Start(start)) => {
                stack.push(element_name(&start));
                buffer.clear();
            }
            Ok(Event::Text(text)) => {
                if at_requirement(&stack) {
                    buffer.push_str(&text.xml_content().map_err(parse_error)?);
                }
            }
            Ok(Event::GeneralRef(reference)) => {
                if at_requirement(&stack) {
                    if let Ok(Some(ch)) = reference.resolve_char_ref() {
                        buffer.push(ch);
                    }
                }
            }
            Ok(Event::End(_)) => {
                if at_requirement(&stack) {
                    let value = buffer.trim();
                    if !value.is_empty() {
                        required.insert(value.to_string());
                    }
                }
                stack.pop();
                buffer.clear();
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(error) => return Err(parse_error(error)),
        }
    }
    Ok(required)
}

/// Project identifiers declared in the projects slot of the fused document.
/// This is the XML rendition of the record store; stand-alone record stores
/// are read through [`crate::RecordStore`] instead.
pub fn declared_references(fused_xml: &str) -> Result<BTreeSet<String>> {
    let mut reader = Reader::from_str(fused_xml);
    reader.config_mut().trim_text(true);
    let mut stack: Vec<String> = Vec::new();
    let mut declared = BTreeSet::new();
    loop {
        match reader.read_event() {
            Ok(Event::Start(start)) => {
                let name = element_name(&start);
                if name == "project" && in_projects_slot(&stack) {
                    collect_project_id(&start, &mut declared)?;
                }
                stack.push(name);
            }
            Ok(Event::Empty(start)) => {
                if element_name(&start) == "project" && in_projects_slot(&stack) {
                    collect_project_id(&start, &mut declared)?;
                }
            }
            Ok(Event::End(_)) => {
                stack.pop();
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(error) => return Err(parse_error(error)),
        }
    }
    Ok(declared)
}

/// The stack tail must be `response`/`item`/`projet`, somewhere below the
/// primary wrapper.
fn at_requirement(stack: &[String]) -> bool {
    let n = stack.len();
    if n < 3 || stack[n - 1] != "projet" || stack[n - 2] != "item" || stack[n - 3] != "response" {
        return false;
    }
    stack[..n - 3].iter().any(|name| name == PRIMARY_WRAPPER)
}

fn in_projects_slot(stack: &[String]) -> bool {
    let wrapper = ConfigSlot::Projects.wrapper_name();
    stack.iter().any(|name| name == wrapper)
}

fn collect_project_id(start: &BytesStart<'_>, declared: &mut BTreeSet<String>) -> Result<()> {
    for attribute in start.attributes() {
        let attribute = attribute.map_err(|error| parse_error(error.to_string()))?;
        if attribute.key.as_ref() == b"id" {
            let value = attribute.unescape_value().map_err(parse_error)?;
            let value = value.trim();
            if !value.is_empty() {
                declared.insert(value.to_string());
            }
        }
    }
    Ok(())
}

fn element_name(start: &BytesStart<'_>) -> String {
    String::from_utf8_lossy(start.name().as_ref()).into_owned()
}

fn parse_error(error: impl std::fmt::Display) -> PipelineError {
    PipelineError::Source(format!("fused document: {error}"))
}
