//! Indented HTML renderer
//!
//! Walks the document tree depth first and emits HTML indented two spaces
//! per nesting level. Leaf content goes through the inline processor, backed
//! by the citation registry, at emission time. Content is emitted verbatim
//! (no entity escaping): a block with no inline constructs renders exactly
//! as its trimmed, space-joined source.

use crate::ast::{Block, CaseNode, Document};
use crate::diagnostics::Diagnostics;
use crate::inline::InlineProcessor;
use crate::webography::Webography;

/// Render a document to its complete HTML text.
///
/// The registry is borrowed mutably because citation numbers are assigned
/// lazily while rendering; each render session should get its own instance.
pub fn render(document: &Document, webography: &mut Webography, diag: &mut Diagnostics) -> String {
    let mut renderer = HtmlRenderer {
        webography,
        diag,
        out: String::new(),
    };
    renderer.document(document);
    renderer.out
}

struct HtmlRenderer<'a> {
    webography: &'a mut Webography,
    diag: &'a mut Diagnostics,
    out: String,
}

impl HtmlRenderer<'_> {
    /// Write one output line at the given nesting level
    fn push_line(&mut self, level: usize, text: &str) {
        for _ in 0..level {
            self.out.push_str("  ");
        }
        self.out.push_str(text);
        self.out.push('\n');
    }

    fn document(&mut self, document: &Document) {
        self.push_line(0, "<html>");
        self.push_line(1, "<head>");
        self.push_line(2, &format!("<title>{}</title>", document.title));
        self.push_line(1, "</head>");
        self.push_line(1, "<body>");
        for block in &document.content {
            self.block(block, 2);
        }
        for case in &document.cases {
            self.case(case, 2);
        }
        self.push_line(1, "</body>");
        self.push_line(0, "</html>");
    }

    fn case(&mut self, case: &CaseNode, level: usize) {
        self.push_line(level, "<div class=\"case\">");

        let id = case.anchor_id();
        let heading = match &case.link {
            Some(link) => format!(
                "<h4 id=\"{id}\"><a href=\"{link}\">{}</a></h4>",
                case.title
            ),
            None => format!("<h4 id=\"{id}\">{}</h4>", case.title),
        };
        self.push_line(level + 1, &heading);

        for block in &case.body {
            self.block(block, level + 1);
        }
        for child in &case.children {
            self.case(child, level + 1);
        }

        self.push_line(level, "</div>");
    }

    /// A text or sources block. The wrapping div is emitted even when the
    /// resolved content is empty; only the inner line is suppressed.
    fn block(&mut self, block: &Block, level: usize) {
        match block {
            Block::Text {
                content,
                no_paragraph,
            } => {
                self.push_line(level, "<div class=\"text-block\">");
                let resolved = self.resolve_inline(content);
                if !resolved.is_empty() {
                    if *no_paragraph {
                        self.push_line(level + 1, &resolved);
                    } else {
                        self.push_line(level + 1, &format!("<p>{resolved}</p>"));
                    }
                }
                self.push_line(level, "</div>");
            }
            Block::Sources { content } => {
                self.push_line(level, "<div class=\"sources\">");
                let resolved = self.resolve_inline(content);
                if !resolved.is_empty() {
                    self.push_line(level + 1, &resolved);
                }
                self.push_line(level, "</div>");
            }
        }
    }

    /// Inline-process then trim the block content
    fn resolve_inline(&mut self, raw: &str) -> String {
        let mut processor = InlineProcessor::new(self.webography, self.diag);
        processor.process(raw).trim().to_string()
    }
}
