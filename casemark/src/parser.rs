//! Block-structured parser for casemark documents
//!
//! Converts a sequence of input lines into a [`Document`] tree. The grammar
//! is deliberately permissive: unrecognized lines are skipped, truncated
//! structure yields a partial tree, and no parse ever fails. Every sub-parse
//! takes a start index and returns the node together with the index of the
//! first line it did not consume, which is what makes case nesting a plain
//! mutual recursion over the same line slice.

use crate::ast::{Block, CaseNode, Document};
use crate::diagnostics::{Diagnostics, Warning};

/// Parse a complete document from its input lines.
///
/// Lines are expected to be already split on line boundaries with no
/// trailing newline. Parsing is total: any input produces a (possibly
/// partial or empty) document, with structural problems recorded in `diag`.
pub fn parse_lines(lines: &[String], diag: &mut Diagnostics) -> Document {
    Parser { lines, diag }.document()
}

struct Parser<'a> {
    lines: &'a [String],
    diag: &'a mut Diagnostics,
}

impl Parser<'_> {
    /// Preamble scan followed by the content region.
    ///
    /// The preamble skips blank lines, consumes `title:` and `!nlp`
    /// directives, and ends at `content {`. Any other non-blank line ends
    /// the preamble without being consumed; the content region then starts
    /// there, so a missing `content {` opener degrades gracefully.
    fn document(&mut self) -> Document {
        let mut doc = Document::default();

        let mut i = 0;
        while i < self.lines.len() {
            let line = self.lines[i].trim();

            if let Some(rest) = line.strip_prefix("title:") {
                doc.title = rest.trim().to_string();
                i += 1;
            } else if line == "!nlp" {
                doc.no_paragraph = true;
                i += 1;
            } else if line == "content {" {
                i += 1;
                break;
            } else if line.is_empty() {
                i += 1;
            } else {
                break;
            }
        }

        self.content_region(i, &mut doc);
        doc
    }

    /// Top-level content region: appends blocks and cases to the document.
    /// Returns the index just past the closing `}`, or the end of input.
    fn content_region(&mut self, start: usize, doc: &mut Document) -> usize {
        let mut i = start;

        while i < self.lines.len() {
            let line = self.lines[i].trim();

            if line == "}" {
                return i + 1;
            } else if line.starts_with("case(") {
                let (case, next) = self.case(i, doc.no_paragraph);
                doc.cases.push(case);
                i = next;
            } else if line == "text {" {
                let (block, next) = self.text_block(i, doc.no_paragraph);
                doc.content.push(block);
                i = next;
            } else if line == "sources {" {
                let (block, next) = self.sources_block(i);
                doc.content.push(block);
                i = next;
            } else {
                // Unrecognized directives are ignored, not rejected
                i += 1;
            }
        }

        i
    }

    /// A `case(TITLE)` or `case(TITLE)(LINK) {` section and its body,
    /// recursing into sub-cases.
    fn case(&mut self, start: usize, no_paragraph: bool) -> (CaseNode, usize) {
        let mut case = CaseNode::default();
        self.case_header(self.lines[start].trim(), start, &mut case);

        let mut i = start + 1;
        while i < self.lines.len() {
            let line = self.lines[i].trim();

            if line == "}" {
                return (case, i + 1);
            } else if line == "text {" {
                let (block, next) = self.text_block(i, no_paragraph);
                case.body.push(block);
                i = next;
            } else if line == "sources {" {
                let (block, next) = self.sources_block(i);
                case.body.push(block);
                i = next;
            } else if line.starts_with("case(") {
                let (child, next) = self.case(i, no_paragraph);
                case.children.push(child);
                i = next;
            } else {
                i += 1;
            }
        }

        self.diag.warn(Warning::UnterminatedBlock {
            kind: "case",
            line: start + 1,
        });
        (case, i)
    }

    /// Title is everything between `case(` and the first `)`. A link, if
    /// present, sits in a second parenthesis pair that is followed by `) {`.
    /// Detection is prefix/contains only, never bracket-balanced: titles or
    /// links containing `)` are not supported (best effort, no error).
    fn case_header(&mut self, header: &str, start: usize, case: &mut CaseNode) {
        let rest = &header["case(".len()..];

        let Some(title_end) = rest.find(')') else {
            self.diag.warn(Warning::MalformedCaseHeader { line: start + 1 });
            return;
        };
        case.title = rest[..title_end].to_string();

        let remaining = &rest[title_end + 1..];
        if remaining.starts_with('(') && remaining.contains(") {") {
            if let Some(link_end) = remaining[1..].find(')') {
                let link = &remaining[1..1 + link_end];
                if !link.is_empty() {
                    case.link = Some(link.to_string());
                }
            }
        }
    }

    fn text_block(&mut self, start: usize, no_paragraph: bool) -> (Block, usize) {
        let (content, next) = self.block_body(start, "text");
        (
            Block::Text {
                content,
                no_paragraph,
            },
            next,
        )
    }

    fn sources_block(&mut self, start: usize) -> (Block, usize) {
        let (content, next) = self.block_body(start, "sources");
        (Block::Sources { content }, next)
    }

    /// Read the body of a raw block: lines after the opener up to a line
    /// equal to exactly `}`, each trimmed, blanks dropped, joined with
    /// single spaces. The terminator is never brace-counted, so a `}` line
    /// inside the content closes the block.
    fn block_body(&mut self, start: usize, kind: &'static str) -> (String, usize) {
        let mut parts: Vec<&str> = Vec::new();

        let mut i = start + 1;
        while i < self.lines.len() {
            let line = self.lines[i].trim();
            if line == "}" {
                return (parts.join(" "), i + 1);
            }
            if !line.is_empty() {
                parts.push(line);
            }
            i += 1;
        }

        self.diag.warn(Warning::UnterminatedBlock {
            kind,
            line: start + 1,
        });
        (parts.join(" "), i)
    }
}
