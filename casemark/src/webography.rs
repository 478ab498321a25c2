//! Citation registry ("webography")
//!
//! Loads bibliography entries from a line-oriented record file and assigns
//! footnote numbers lazily: an entry gets its number the first time it is
//! cited and keeps it for the rest of the render. One registry instance is
//! created per compile and injected wherever citations are resolved; there
//! is no process-wide state.

use crate::diagnostics::{Diagnostics, Warning};
use std::collections::HashMap;
use std::fmt::Write as _;
use std::io::ErrorKind;
use std::path::Path;

/// One bibliography record
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Entry {
    /// Key used by `${keyword}` citations
    pub keyword: String,

    /// Display name shown in the footnote list
    pub name: String,

    /// Display date shown in the footnote list
    pub date: String,

    /// Optional URL linked from the footnote list
    pub url: Option<String>,
}

/// The citation registry: all loaded entries plus the ordered sequence of
/// entries that have actually been referenced
#[derive(Debug, Default)]
pub struct Webography {
    entries: HashMap<String, Entry>,

    /// Keywords in first-reference order; position + 1 is the footnote
    /// number. A keyword enters at most once.
    cited: Vec<String>,
}

impl Webography {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a registry from a record file.
    ///
    /// A missing or unreadable file is not an error: the registry comes
    /// back empty and citations resolve to nothing.
    pub fn load_path(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(text) => Self::from_records(&text),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                log::debug!("no webography at {}", path.display());
                Self::new()
            }
            Err(e) => {
                log::warn!("failed to read webography {}: {}", path.display(), e);
                Self::new()
            }
        }
    }

    /// Parse the record format: `T:` keyword, `L:` URL, `N:` name, `D:`
    /// date, one field per line.
    ///
    /// A blank line commits the open record. A new `T:` line while a record
    /// is still open commits the open record first, tolerating missing
    /// blank-line separators. Records without a keyword are dropped.
    pub fn from_records(text: &str) -> Self {
        let mut registry = Self::new();
        let mut current: Option<Entry> = None;

        for raw in text.lines() {
            let line = raw.trim();

            if line.is_empty() {
                registry.commit(current.take());
                continue;
            }

            if let Some(rest) = line.strip_prefix("T: ") {
                registry.commit(current.take());
                current = Some(Entry {
                    keyword: rest.trim().to_string(),
                    ..Entry::default()
                });
            } else if let Some(entry) = current.as_mut() {
                if let Some(rest) = line.strip_prefix("L: ") {
                    let url = rest.trim();
                    if !url.is_empty() {
                        entry.url = Some(url.to_string());
                    }
                } else if let Some(rest) = line.strip_prefix("N: ") {
                    entry.name = rest.trim().to_string();
                } else if let Some(rest) = line.strip_prefix("D: ") {
                    entry.date = rest.trim().to_string();
                }
            }
        }

        registry.commit(current.take());
        registry
    }

    fn commit(&mut self, entry: Option<Entry>) {
        if let Some(entry) = entry {
            if !entry.keyword.is_empty() {
                self.entries.insert(entry.keyword.clone(), entry);
            }
        }
    }

    /// Number of loaded entries, cited or not
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if no entries were loaded
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Resolve a citation keyword to its superscript reference markup.
    ///
    /// The first resolution of a keyword appends it to the referenced-order
    /// sequence and fixes its number; later resolutions reuse that number.
    /// Numbers are 1-based and independent of the keyword's position in the
    /// loaded file. Unknown keywords produce an empty string and a warning,
    /// and do not enter the sequence.
    pub fn resolve(&mut self, keyword: &str, diag: &mut Diagnostics) -> String {
        if !self.entries.contains_key(keyword) {
            diag.warn(Warning::UnknownKeyword(keyword.to_string()));
            return String::new();
        }

        let number = match self.cited.iter().position(|k| k == keyword) {
            Some(position) => position + 1,
            None => {
                self.cited.push(keyword.to_string());
                self.cited.len()
            }
        };

        format!("<sup><a href=\"#s{number}\">[{number}]</a></sup>")
    }

    /// Render the footnote list: an ordered list over the entries referenced
    /// so far, in first-reference order, item N anchored as `sN`.
    ///
    /// Entries that were loaded but never referenced do not appear. Returns
    /// an empty string when nothing has been referenced yet.
    pub fn render_footnotes(&self) -> String {
        if self.cited.is_empty() {
            return String::new();
        }

        let mut out = String::from("<ol>");
        for (index, keyword) in self.cited.iter().enumerate() {
            let number = index + 1;
            let Some(entry) = self.entries.get(keyword) else {
                continue;
            };
            let _ = write!(
                out,
                "<li id=\"s{number}\">{number}. {}, {}",
                entry.name, entry.date
            );
            if let Some(url) = &entry.url {
                let _ = write!(out, " <a href=\"{url}\">{url}</a>");
            }
            out.push_str("</li>");
        }
        out.push_str("</ol>");
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RECORDS: &str = "\
T: alpha
N: Alpha Site
D: 2021
L: https://alpha.example

T: beta
N: Beta Paper
D: 2019

T: gamma
N: Gamma Archive
D: 2024
L: https://gamma.example
";

    #[test]
    fn test_from_records_parses_fields() {
        let mut registry = Webography::from_records(RECORDS);
        assert_eq!(registry.len(), 3);

        let mut diag = Diagnostics::new();
        assert_eq!(
            registry.resolve("alpha", &mut diag),
            "<sup><a href=\"#s1\">[1]</a></sup>"
        );
        assert!(diag.is_empty());
    }

    #[test]
    fn test_from_records_tolerates_missing_separator() {
        // No blank line between records: the second `T:` force-commits the
        // open record.
        let text = "T: one\nN: First\nT: two\nN: Second\n";
        let mut registry = Webography::from_records(text);
        assert_eq!(registry.len(), 2);

        let mut diag = Diagnostics::new();
        registry.resolve("one", &mut diag);
        registry.resolve("two", &mut diag);
        assert_eq!(
            registry.render_footnotes(),
            "<ol><li id=\"s1\">1. First, </li><li id=\"s2\">2. Second, </li></ol>"
        );
    }

    #[test]
    fn test_record_without_keyword_is_dropped() {
        let registry = Webography::from_records("N: Orphan\nD: 2020\n");
        assert!(registry.is_empty());
    }

    #[test]
    fn test_numbering_follows_first_reference_order() {
        let mut registry = Webography::from_records(RECORDS);
        let mut diag = Diagnostics::new();

        // Referenced out of file order: beta, alpha, beta again, gamma.
        assert_eq!(
            registry.resolve("beta", &mut diag),
            "<sup><a href=\"#s1\">[1]</a></sup>"
        );
        assert_eq!(
            registry.resolve("alpha", &mut diag),
            "<sup><a href=\"#s2\">[2]</a></sup>"
        );
        assert_eq!(
            registry.resolve("beta", &mut diag),
            "<sup><a href=\"#s1\">[1]</a></sup>"
        );
        assert_eq!(
            registry.resolve("gamma", &mut diag),
            "<sup><a href=\"#s3\">[3]</a></sup>"
        );

        let footnotes = registry.render_footnotes();
        assert_eq!(
            footnotes,
            "<ol>\
             <li id=\"s1\">1. Beta Paper, 2019</li>\
             <li id=\"s2\">2. Alpha Site, 2021 <a href=\"https://alpha.example\">https://alpha.example</a></li>\
             <li id=\"s3\">3. Gamma Archive, 2024 <a href=\"https://gamma.example\">https://gamma.example</a></li>\
             </ol>"
        );
    }

    #[test]
    fn test_unknown_keyword_resolves_empty_and_warns() {
        let mut registry = Webography::from_records(RECORDS);
        let mut diag = Diagnostics::new();

        assert_eq!(registry.resolve("missing", &mut diag), "");
        assert_eq!(
            diag.warnings(),
            &[Warning::UnknownKeyword("missing".to_string())]
        );
        // The unknown keyword never enters the footnote list.
        assert_eq!(registry.render_footnotes(), "");
    }

    #[test]
    fn test_footnotes_empty_before_any_reference() {
        let registry = Webography::from_records(RECORDS);
        assert_eq!(registry.render_footnotes(), "");
    }

    #[test]
    fn test_load_path_missing_file_yields_empty_registry() {
        let registry = Webography::load_path(Path::new("/nonexistent/webography"));
        assert!(registry.is_empty());
    }
}
