//! Document tree produced by the block parser
//!
//! Block content is stored raw; inline constructs are resolved by the
//! renderer at emission time, so the tree itself is plain data.

/// A parsed document: preamble metadata plus the content region
#[derive(Debug, Default, Clone)]
pub struct Document {
    /// Title from the `title:` directive (empty if absent)
    pub title: String,

    /// Suppress paragraph wrapping of text blocks (`!nlp` directive);
    /// set once at parse start and inherited by every text block
    pub no_paragraph: bool,

    /// Top-level text and sources blocks, in document order
    pub content: Vec<Block>,

    /// Top-level cases, in document order (always rendered after `content`)
    pub cases: Vec<CaseNode>,
}

/// A paragraph-like content unit inside the document or a case body
///
/// The grammar is closed, so the block kinds are a fixed sum type with a
/// single rendering dispatch rather than an open-ended trait.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Block {
    /// A `text { .. }` block
    Text {
        /// Raw content, inline constructs not yet resolved
        content: String,
        /// Inherited from the owning document at parse time
        no_paragraph: bool,
    },

    /// A `sources { .. }` block; never paragraph-wrapped, class `sources`
    Sources {
        /// Raw content, inline constructs not yet resolved
        content: String,
    },
}

/// A titled, optionally linked, nestable section
#[derive(Debug, Default, Clone)]
pub struct CaseNode {
    /// Section title; also the source of the heading anchor id
    pub title: String,

    /// Optional external link wrapped around the rendered heading text
    pub link: Option<String>,

    /// Body blocks, in source order
    pub body: Vec<Block>,

    /// Nested sub-cases, rendered after the body (unbounded depth)
    pub children: Vec<CaseNode>,
}

impl CaseNode {
    /// Anchor id of the rendered heading: the trimmed title with spaces
    /// replaced by underscores.
    ///
    /// Titles that collide after this transform silently collide in the
    /// output; uniqueness is the document author's responsibility.
    pub fn anchor_id(&self) -> String {
        self.title.trim().replace(' ', "_")
    }
}
