//! Packaging: entity decoding, archive layout and the viewable file list.

use std::collections::BTreeSet;
use std::fs::{self, File};

use xpub_report::{
    count_output_files, decode_output_entities, decode_twice, package_results, top_level_files,
};

#[test]
fn double_encoded_entity_decodes_to_one_character() {
    assert_eq!(decode_twice("caf&amp;#xE9;"), "café");
    assert_eq!(decode_twice("&amp;amp;"), "&");
}

#[test]
fn single_and_clean_text_pass_through() {
    // a single-encoded entity decodes on the first pass; the second is a no-op
    assert_eq!(decode_twice("caf&#xE9;"), "café");
    assert_eq!(decode_twice("café"), "café");
    // text that does not unescape cleanly is left unchanged
    assert_eq!(decode_twice("fish & chips"), "fish & chips");
}

#[test]
fn decode_rewrites_files_in_place() {
    let dir = tempfile::tempdir().expect("tempdir");
    let encoded = dir.path().join("page.html");
    let clean = dir.path().join("clean.html");
    fs::write(&encoded, "<p>caf&amp;#xE9;</p>").expect("write");
    fs::write(&clean, "<p>plain</p>").expect("write");

    decode_output_entities(dir.path()).expect("decode");
    assert_eq!(fs::read_to_string(&encoded).expect("read"), "<p>café</p>");
    assert_eq!(fs::read_to_string(&clean).expect("read"), "<p>plain</p>");
}

#[test]
fn archive_contains_outputs_and_statics() {
    let dir = tempfile::tempdir().expect("tempdir");
    let output = dir.path().join("output");
    fs::create_dir_all(output.join("css")).expect("mkdir");
    fs::write(output.join("report.xml"), "<transformation-report/>").expect("write");
    fs::write(output.join("page.html"), "<html/>").expect("write");
    fs::write(output.join("css").join("site.css"), "body{}").expect("write");

    let statics = dir.path().join("statics");
    fs::create_dir_all(statics.join("img")).expect("mkdir");
    fs::write(statics.join("img").join("logo.svg"), "<svg/>").expect("write");

    let archive_path = dir.path().join("results.zip");
    let summary =
        package_results(&output, &archive_path, Some(&statics)).expect("package");

    assert_eq!(summary.archived_count, 4);
    assert_eq!(
        summary.files,
        vec!["page.html".to_string(), "report.xml".to_string()]
    );

    let archive = File::open(&archive_path).expect("open archive");
    let mut zip = zip::ZipArchive::new(archive).expect("read archive");
    let names: BTreeSet<String> = (0..zip.len())
        .map(|i| zip.by_index(i).expect("entry").name().to_string())
        .collect();
    let expected: BTreeSet<String> = [
        "output/report.xml",
        "output/page.html",
        "output/css/site.css",
        "output/statics/img/logo.svg",
    ]
    .iter()
    .map(|n| (*n).to_string())
    .collect();
    assert_eq!(names, expected);
}

#[test]
fn missing_statics_directory_is_skipped() {
    let dir = tempfile::tempdir().expect("tempdir");
    let output = dir.path().join("output");
    fs::create_dir_all(&output).expect("mkdir");
    fs::write(output.join("report.xml"), "<r/>").expect("write");

    let archive_path = dir.path().join("results.zip");
    let summary = package_results(&output, &archive_path, Some(&dir.path().join("nowhere")))
        .expect("package");
    assert_eq!(summary.archived_count, 1);
}

#[test]
fn counts_files_recursively() {
    let dir = tempfile::tempdir().expect("tempdir");
    fs::create_dir_all(dir.path().join("sub")).expect("mkdir");
    fs::write(dir.path().join("a.txt"), "a").expect("write");
    fs::write(dir.path().join("sub").join("b.txt"), "b").expect("write");
    assert_eq!(count_output_files(dir.path()), 2);
    assert_eq!(top_level_files(dir.path()).expect("list"), vec!["a.txt"]);
}
