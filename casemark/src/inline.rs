//! Inline construct processor
//!
//! Rewrites the brace-delimited micro-syntax inside block content: images,
//! links, the footnote list and `${keyword}` citations. The scan is a single
//! left-to-right pass; anything that does not fully match is copied through
//! verbatim, so this processor cannot fail.
//!
//! Inline spans are brace-depth matched, unlike the block grammar's bare `}`
//! terminators. The two disciplines are intentional and must not be unified:
//! unifying them changes the output for content with literal braces.

use crate::diagnostics::Diagnostics;
use crate::webography::Webography;

const IMAGE_PREFIX: &str = "{img/";
const FOOTNOTES_TOKEN: &str = "{footnotes}";

/// Scans a raw content string and substitutes inline constructs.
///
/// Borrows the registry mutably because resolving a citation may assign a
/// new footnote number.
pub struct InlineProcessor<'a> {
    webography: &'a mut Webography,
    diag: &'a mut Diagnostics,
}

impl<'a> InlineProcessor<'a> {
    pub fn new(webography: &'a mut Webography, diag: &'a mut Diagnostics) -> Self {
        Self { webography, diag }
    }

    /// Resolve every inline construct in `content`, returning the HTML.
    ///
    /// At each `{` the constructs are tried in priority order: image, link,
    /// footnote list. `${` triggers a citation. On no match the current
    /// character is copied verbatim and the scan advances.
    pub fn process(&mut self, content: &str) -> String {
        let bytes = content.as_bytes();
        let mut out = String::with_capacity(content.len() * 2);

        let mut i = 0;
        while i < bytes.len() {
            let substituted = match bytes[i] {
                b'{' => Self::try_image(content, i)
                    .or_else(|| Self::try_link(content, i))
                    .or_else(|| self.try_footnote_list(content, i)),
                b'$' if bytes.get(i + 1) == Some(&b'{') => self.try_citation(content, i),
                _ => None,
            };

            match substituted {
                Some((html, next)) => {
                    out.push_str(&html);
                    i = next;
                }
                None => {
                    // Literal copy up to the next byte that could start a
                    // construct. The delimiters are ASCII, so the slice
                    // boundaries stay on UTF-8 character boundaries.
                    let mut j = i + 1;
                    while j < bytes.len() && bytes[j] != b'{' && bytes[j] != b'$' {
                        j += 1;
                    }
                    out.push_str(&content[i..j]);
                    i = j;
                }
            }
        }

        out
    }

    /// `{img/PATH}{ALT}` becomes `<img src="PATH" alt="ALT"/>`. The `img/`
    /// prefix is a marker, not part of PATH.
    fn try_image(content: &str, start: usize) -> Option<(String, usize)> {
        if !content[start..].starts_with(IMAGE_PREFIX) {
            return None;
        }

        let path_end = find_closing_brace(content, start + 1)?;
        if content.as_bytes().get(path_end + 1) != Some(&b'{') {
            return None;
        }
        let alt_end = find_closing_brace(content, path_end + 2)?;

        let path = &content[start + IMAGE_PREFIX.len()..path_end];
        let alt = &content[path_end + 2..alt_end];
        Some((format!("<img src=\"{path}\" alt=\"{alt}\"/>"), alt_end + 1))
    }

    /// `{URL}` or `{URL}{TEXT}` becomes `<a href="URL">TEXT</a>`; the URL
    /// must begin with `http://` or `https://`, and TEXT defaults to the
    /// URL itself.
    fn try_link(content: &str, start: usize) -> Option<(String, usize)> {
        let after = &content[start + 1..];
        if !after.starts_with("http://") && !after.starts_with("https://") {
            return None;
        }

        let url_end = find_closing_brace(content, start + 1)?;
        let url = &content[start + 1..url_end];

        let mut text = url;
        let mut end = url_end + 1;
        if content.as_bytes().get(end) == Some(&b'{') {
            if let Some(text_end) = find_closing_brace(content, end + 1) {
                text = &content[end + 1..text_end];
                end = text_end + 1;
            }
        }

        Some((format!("<a href=\"{url}\">{text}</a>"), end))
    }

    /// The literal `{footnotes}` token expands to the footnote list for
    /// everything referenced so far.
    fn try_footnote_list(&self, content: &str, start: usize) -> Option<(String, usize)> {
        if !content[start..].starts_with(FOOTNOTES_TOKEN) {
            return None;
        }
        Some((
            self.webography.render_footnotes(),
            start + FOOTNOTES_TOKEN.len(),
        ))
    }

    /// `${KEYWORD}` resolves through the registry, assigning the footnote
    /// number on first reference.
    fn try_citation(&mut self, content: &str, start: usize) -> Option<(String, usize)> {
        let keyword_end = find_closing_brace(content, start + 2)?;
        let keyword = &content[start + 2..keyword_end];
        Some((self.webography.resolve(keyword, self.diag), keyword_end + 1))
    }
}

/// Find the `}` balancing an already-consumed `{`, scanning from `start`.
///
/// Depth starts at one, increments on `{`, decrements on `}`; the returned
/// index is where depth reaches zero. `None` if the input ends first, in
/// which case the construct attempt fails and the caller falls back to
/// literal copy.
pub(crate) fn find_closing_brace(content: &str, start: usize) -> Option<usize> {
    let mut depth = 1usize;
    for (index, &byte) in content.as_bytes().iter().enumerate().skip(start) {
        match byte {
            b'{' => depth += 1,
            b'}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(index);
                }
            }
            _ => {}
        }
    }
    None
}
