//! End-to-end compilation of the sample document under `examples/`

use casemark::pipeline;
use pretty_assertions::assert_eq;
use std::path::PathBuf;

fn examples_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("examples")
}

fn compile_sample() -> pipeline::CompileResult {
    let examples = examples_dir();
    pipeline::compile_file(&examples.join("notes.cm"), &examples.join("webography"))
        .expect("sample document should compile")
}

#[test]
fn test_sample_document_compiles_cleanly() {
    let result = compile_sample();
    assert_eq!(result.warnings, vec![]);
    assert!(result.html.starts_with("<html>\n"));
    assert!(result.html.ends_with("</html>\n"));
}

#[test]
fn test_sample_document_structure() {
    let html = compile_sample().html;

    assert!(html.contains("    <title>Field Notes</title>"));

    // Top-level content renders before the cases.
    let intro_at = html.find("Short investigation notes").unwrap();
    let tooling_at = html.find("<h4 id=\"Tooling\">Tooling</h4>").unwrap();
    assert!(intro_at < tooling_at);

    // The nested case sits one level deeper than its parent.
    assert!(html.contains("      <div class=\"case\">\n        <h4 id=\"Editor_Setup\">"));

    // The linked case wraps its heading text in the link.
    assert!(html.contains(
        "<h4 id=\"References\"><a href=\"https://www.rust-lang.org/\">References</a></h4>"
    ));
}

#[test]
fn test_sample_document_inline_constructs() {
    let html = compile_sample().html;

    assert!(html.contains("<a href=\"https://doc.rust-lang.org/\">the Rust docs</a>"));
    assert!(html.contains("<img src=\"editors.png\" alt=\"Editor comparison chart\"/>"));

    // rustsite is cited first in the document, book second.
    assert!(html.contains("Background reading lives at <sup><a href=\"#s1\">[1]</a></sup>"));
    assert!(html.contains("treatment in <sup><a href=\"#s2\">[2]</a></sup>"));
}

#[test]
fn test_sample_document_footnote_list() {
    let html = compile_sample().html;

    let footnotes = "<ol>\
        <li id=\"s1\">1. The Rust Programming Language, 2024 \
        <a href=\"https://www.rust-lang.org/\">https://www.rust-lang.org/</a></li>\
        <li id=\"s2\">2. The Rust Book, 2023 \
        <a href=\"https://doc.rust-lang.org/book/\">https://doc.rust-lang.org/book/</a></li>\
        </ol>";
    assert!(html.contains(footnotes));

    // Loaded but never cited: absent from the list.
    assert!(!html.contains("Never Cited"));
}
