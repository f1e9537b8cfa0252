//! Textual repair of known export malformations, applied strictly before
//! parsing.

/// Anonymous contributor entries are exported with a tag that collides with
/// the keyed item vocabulary of the rest of the document.
const ANONYMOUS_OPEN: &str = "<Anonyme>";
const ANONYMOUS_OPEN_REPLACEMENT: &str = "<item key=\"Anonyme\">";
const ANONYMOUS_CLOSE: &str = "</Anonyme>";
const ANONYMOUS_CLOSE_REPLACEMENT: &str = "</item>";

/// Empty function-name blocks are emitted with an empty keyed item inside;
/// they carry no information and trip up downstream consumers.
const EMPTY_FUNCTION_NAMES: &str = "<nomsFonctions><item key=\"\"></item></nomsFonctions>";

/// Repair known malformed constructs in raw export text.
///
/// Purely textual, never structural: substitutions that do not match are
/// no-ops and the function is idempotent. Also strips characters forbidden by
/// XML 1.0, normalizes line endings to `\n` and trims surrounding whitespace.
pub fn clean_document(content: &str) -> String {
    let content = content.replace(ANONYMOUS_OPEN, ANONYMOUS_OPEN_REPLACEMENT);
    let content = content.replace(ANONYMOUS_CLOSE, ANONYMOUS_CLOSE_REPLACEMENT);
    let content = content.replace(EMPTY_FUNCTION_NAMES, "");
    let content: String = content.chars().filter(|ch| !is_forbidden(*ch)).collect();
    let content = content.replace("\r\n", "\n").replace('\r', "\n");
    content.trim().to_string()
}

/// Control characters not allowed in XML 1.0 documents.
fn is_forbidden(ch: char) -> bool {
    matches!(
        ch,
        '\u{00}'..='\u{08}' | '\u{0B}' | '\u{0C}' | '\u{0E}'..='\u{1F}' | '\u{7F}'
    )
}
