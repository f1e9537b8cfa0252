//! Two-pass entity decoding of engine output files.
//!
//! The transformation step can emit twice-escaped entities (a single
//! character serialized as `&amp;#xE9;`). Packaging decodes exactly twice;
//! this is a fixed, known transformation, not a general normalizer.

use std::fs;
use std::path::Path;

use quick_xml::escape::unescape;
use walkdir::WalkDir;

use xpub_model::{PipelineError, Result};

/// Decode entities exactly twice. A pass over text that does not unescape
/// cleanly (bare ampersands, unknown entities) leaves that text unchanged,
/// so clean files pass through untouched.
pub fn decode_twice(content: &str) -> String {
    let once = decode_pass(content);
    decode_pass(&once)
}

fn decode_pass(content: &str) -> String {
    match unescape(content) {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => content.to_string(),
    }
}

/// Rewrite every textual file under `output_dir` in place with its two-pass
/// decoding. Non-UTF-8 files are left as they are.
pub fn decode_output_entities(output_dir: &Path) -> Result<()> {
    for entry in WalkDir::new(output_dir) {
        let entry = entry
            .map_err(|error| PipelineError::Packaging(format!("walk output: {error}")))?;
        if !entry.file_type().is_file() {
            continue;
        }
        let Ok(content) = fs::read_to_string(entry.path()) else {
            continue;
        };
        let decoded = decode_twice(&content);
        if decoded != content {
            fs::write(entry.path(), decoded).map_err(|error| {
                PipelineError::Packaging(format!(
                    "rewrite {}: {error}",
                    entry.path().display()
                ))
            })?;
        }
    }
    Ok(())
}
