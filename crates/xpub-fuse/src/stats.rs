//! Statistics extraction over a fused document.

use std::sync::LazyLock;

use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};
use regex::Regex;

use xpub_model::StatisticsReport;

/// Reference rule (b): `project` followed by a separator and a word token in
/// free text. The captured token keeps its original case.
static TEXT_REFERENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)project[_-](\w+)").expect("valid reference pattern"));

/// Extract a [`StatisticsReport`] from fused document text.
///
/// Never fails: unparseable input yields a report tagged with the parser
/// error instead. Running the extraction twice on the same text yields the
/// same report.
pub fn extract_statistics(xml: &str) -> StatisticsReport {
    match scan_statistics(xml) {
        Ok(report) => report,
        Err(error) => StatisticsReport::invalid(error),
    }
}

fn scan_statistics(xml: &str) -> Result<StatisticsReport, String> {
    let mut reader = Reader::from_str(xml);
    let mut report = StatisticsReport {
        xml_size_bytes: xml.len(),
        has_cdata: xml.contains("<![CDATA["),
        ..StatisticsReport::default()
    };
    let mut depth = 0usize;
    let mut root_seen = false;
    loop {
        match reader.read_event() {
            Ok(Event::Start(start)) => {
                record_element(&mut report, &start, depth, &mut root_seen)?;
                depth += 1;
            }
            Ok(Event::Empty(start)) => {
                record_element(&mut report, &start, depth, &mut root_seen)?;
            }
            Ok(Event::End(_)) => depth = depth.saturating_sub(1),
            Ok(Event::Text(text)) => {
                let value = text.xml_content().map_err(|error| error.to_string())?;
                report.total_text_length += value.chars().count();
                collect_text_references(&value, &mut report);
            }
            Ok(Event::CData(data)) => {
                let value = String::from_utf8_lossy(&data);
                report.total_text_length += value.chars().count();
                collect_text_references(&value, &mut report);
            }
            Ok(Event::GeneralRef(reference)) => {
                report.total_text_length += reference_length(&reference);
            }
            Ok(Event::Eof) => break,
            Ok(_) => {}
            Err(error) => return Err(error.to_string()),
        }
    }
    if !root_seen {
        return Err("document has no root element".to_string());
    }
    report.element_types = report.element_counts.len();
    Ok(report)
}

fn record_element(
    report: &mut StatisticsReport,
    start: &BytesStart<'_>,
    depth: usize,
    root_seen: &mut bool,
) -> Result<(), String> {
    let name = String::from_utf8_lossy(start.name().as_ref()).into_owned();
    report.total_elements += 1;
    if depth > report.max_depth {
        report.max_depth = depth;
    }
    if !*root_seen {
        *root_seen = true;
        report.root_tag = name.clone();
        for attribute in start.attributes() {
            let attribute = attribute.map_err(|error| error.to_string())?;
            let key = String::from_utf8_lossy(attribute.key.as_ref()).into_owned();
            let value = attribute
                .unescape_value()
                .map_err(|error| error.to_string())?
                .into_owned();
            report.root_attributes.insert(key, value);
        }
    }
    *report.element_counts.entry(name).or_insert(0) += 1;

    // Reference rule (a): any attribute whose name contains "project".
    for attribute in start.attributes() {
        let attribute = attribute.map_err(|error| error.to_string())?;
        let key = String::from_utf8_lossy(attribute.key.as_ref()).to_lowercase();
        if key.contains("project") {
            let value = attribute
                .unescape_value()
                .map_err(|error| error.to_string())?
                .into_owned();
            if !value.is_empty() {
                report.project_references.insert(value);
            }
        }
    }
    Ok(())
}

fn collect_text_references(text: &str, report: &mut StatisticsReport) {
    for capture in TEXT_REFERENCE.captures_iter(text) {
        if let Some(token) = capture.get(1) {
            report.project_references.insert(token.as_str().to_string());
        }
    }
}

/// Character length a general reference contributes to the text content.
fn reference_length(reference: &quick_xml::events::BytesRef<'_>) -> usize {
    if let Ok(Some(_)) = reference.resolve_char_ref() {
        return 1;
    }
    let raw: &[u8] = reference;
    match raw {
        b"amp" | b"lt" | b"gt" | b"quot" | b"apos" => 1,
        other => other.len() + 2,
    }
}
