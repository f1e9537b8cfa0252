//! Statistics extraction and reference rules.

use xpub_fuse::extract_statistics;

#[test]
fn counts_elements_and_depth() {
    let xml = "<root version=\"2\"><child><leaf/></child><child/></root>";
    let report = extract_statistics(xml);
    assert!(report.is_valid());
    assert_eq!(report.root_tag, "root");
    assert_eq!(report.root_attributes.get("version"), Some(&"2".to_string()));
    assert_eq!(report.total_elements, 4);
    assert_eq!(report.element_types, 3);
    assert_eq!(report.element_counts.get("child"), Some(&2));
    assert_eq!(report.max_depth, 2);
    assert_eq!(report.xml_size_bytes, xml.len());
}

#[test]
fn collects_references_from_attribute_names() {
    let xml = "<doc><item data-project=\"alpha\" PROJECT_ID=\"beta\" other=\"ignored\"/></doc>";
    let report = extract_statistics(xml);
    assert!(report.project_references.contains("alpha"));
    assert!(report.project_references.contains("beta"));
    assert!(!report.project_references.contains("ignored"));
}

#[test]
fn collects_references_from_text() {
    let xml = "<doc><note>See project_gamma and Project-Delta for details</note></doc>";
    let report = extract_statistics(xml);
    assert!(report.project_references.contains("gamma"));
    // captured token keeps its case
    assert!(report.project_references.contains("Delta"));
    assert!(!report.project_references.contains("delta"));
}

#[test]
fn references_are_deduplicated() {
    let xml = "<doc project=\"alpha\"><note>project_alpha</note></doc>";
    let report = extract_statistics(xml);
    assert_eq!(
        report.project_references.iter().filter(|r| *r == "alpha").count(),
        1
    );
}

#[test]
fn extraction_is_idempotent() {
    let xml = "<doc project=\"alpha\"><note>project_beta and project-gamma</note></doc>";
    let first = extract_statistics(xml);
    let second = extract_statistics(xml);
    assert_eq!(first, second);
}

#[test]
fn text_length_counts_characters() {
    let xml = "<a>abc<b>de</b></a>";
    let report = extract_statistics(xml);
    assert_eq!(report.total_text_length, 5);
}

#[test]
fn cdata_is_detected() {
    let xml = "<a><![CDATA[raw project_epsilon]]></a>";
    let report = extract_statistics(xml);
    assert!(report.has_cdata);
    assert!(report.project_references.contains("epsilon"));
}

#[test]
fn invalid_input_yields_error_report() {
    let report = extract_statistics("no markup here");
    assert!(!report.is_valid());
    assert!(report.parse_error.is_some());
    assert_eq!(report.total_elements, 0);

    let report = extract_statistics("<a><b></c></a>");
    assert!(!report.is_valid());
}
