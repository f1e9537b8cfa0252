//! Unit tests for the document cleaner.

use proptest::prelude::*;
use xpub_ingest::clean_document;

#[test]
fn rewrites_anonymous_tags() {
    let input = "<auteurs><Anonyme>X</Anonyme></auteurs>";
    assert_eq!(
        clean_document(input),
        "<auteurs><item key=\"Anonyme\">X</item></auteurs>"
    );
}

#[test]
fn removes_empty_function_name_blocks() {
    let input = "<a><nomsFonctions><item key=\"\"></item></nomsFonctions><b/></a>";
    assert_eq!(clean_document(input), "<a><b/></a>");
}

#[test]
fn strips_forbidden_control_characters() {
    let input = "<a>\u{0}bad\u{1F}\u{7F}</a>";
    assert_eq!(clean_document(input), "<a>bad</a>");
}

#[test]
fn normalizes_line_endings() {
    let input = "<a>one\r\ntwo\rthree</a>";
    assert_eq!(clean_document(input), "<a>one\ntwo\nthree</a>");
}

#[test]
fn clean_text_passes_through() {
    let input = "<response><item key=\"x\">ok</item></response>";
    assert_eq!(clean_document(input), input);
}

#[test]
fn cleaning_is_idempotent_on_known_inputs() {
    let inputs = [
        "<auteurs><Anonyme>X</Anonyme></auteurs>",
        "<a><nomsFonctions><item key=\"\"></item></nomsFonctions></a>",
        "  <a>padded</a>  ",
        "",
    ];
    for input in inputs {
        let once = clean_document(input);
        assert_eq!(clean_document(&once), once, "input: {input:?}");
    }
}

proptest! {
    #[test]
    fn cleaned_text_is_normalized(input in ".*") {
        let cleaned = clean_document(&input);
        prop_assert!(!cleaned.contains('\r'));
        prop_assert!(!cleaned.contains('\u{0}'), "cleaned output must not contain NUL");
        prop_assert!(!cleaned.contains('\u{7F}'), "cleaned output must not contain DEL");
        prop_assert_eq!(cleaned.trim(), cleaned.as_str());
    }
}
