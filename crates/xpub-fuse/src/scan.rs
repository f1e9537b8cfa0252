//! Well-formedness scanning without building a tree.

use quick_xml::Reader;
use quick_xml::events::Event;

/// Scan a document for well-formedness.
///
/// Returns the parser's error description on the first ill-formed construct.
/// A document with no root element, or with elements left open at the end of
/// input, is rejected as well.
pub fn well_formed(xml: &str) -> Result<(), String> {
    let mut reader = Reader::from_str(xml);
    let mut open = 0usize;
    let mut seen_root = false;
    loop {
        match reader.read_event() {
            Ok(Event::Eof) => break,
            Ok(Event::Start(_)) => {
                seen_root = true;
                open += 1;
            }
            Ok(Event::Empty(_)) => seen_root = true,
            Ok(Event::End(_)) => open = open.saturating_sub(1),
            Ok(_) => {}
            Err(error) => return Err(error.to_string()),
        }
    }
    if !seen_root {
        return Err("document has no root element".to_string());
    }
    if open > 0 {
        return Err(format!("unexpected end of document: {open} unclosed element(s)"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::well_formed;

    #[test]
    fn accepts_well_formed_documents() {
        assert!(well_formed("<a><b/>text</a>").is_ok());
        assert!(well_formed("<?xml version=\"1.0\"?><a/>").is_ok());
    }

    #[test]
    fn rejects_empty_input() {
        assert!(well_formed("").is_err());
        assert!(well_formed("   ").is_err());
    }

    #[test]
    fn rejects_unclosed_elements() {
        assert!(well_formed("<a><b></b>").is_err());
    }

    #[test]
    fn rejects_mismatched_tags() {
        assert!(well_formed("<a><b></a></b>").is_err());
    }
}
