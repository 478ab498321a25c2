//! Compilation pipeline
//!
//! Orchestrates the stages around the core engine: read the input file into
//! lines, load the webography, parse, render, write the output. The core
//! itself never fails; the errors here are strictly I/O.

use crate::diagnostics::{Diagnostics, Warning};
use crate::parser;
use crate::renderer;
use crate::webography::Webography;
use std::io::Write;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors from the I/O surface of the pipeline
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("failed to read {path}: {source}", path = .0.display(), source = .1)]
    ReadInput(PathBuf, #[source] std::io::Error),

    #[error("failed to write {path}: {source}", path = .0.display(), source = .1)]
    WriteOutput(PathBuf, #[source] std::io::Error),
}

/// The outcome of compiling one document
#[derive(Debug)]
pub struct CompileResult {
    /// The complete rendered HTML text
    pub html: String,

    /// Warnings recorded while parsing and rendering, in arrival order
    pub warnings: Vec<Warning>,
}

/// Compile a document file against the webography at `webography_path`.
///
/// Reads the input into lines, loads the registry (missing registry file is
/// fine, it just stays empty), parses and renders. Only the input read can
/// fail.
pub fn compile_file(input: &Path, webography_path: &Path) -> Result<CompileResult, PipelineError> {
    let text = std::fs::read_to_string(input)
        .map_err(|e| PipelineError::ReadInput(input.to_path_buf(), e))?;
    let lines: Vec<String> = text.lines().map(str::to_string).collect();
    log::debug!("read {} lines from {}", lines.len(), input.display());

    let webography = Webography::load_path(webography_path);
    log::debug!("webography has {} entries", webography.len());

    Ok(compile_lines(&lines, webography))
}

/// Compile already-split lines against a loaded registry.
///
/// This is the pure core entry point: it cannot fail, and each call owns a
/// fresh registry and diagnostics, so repeated compiles never interfere.
pub fn compile_lines(lines: &[String], mut webography: Webography) -> CompileResult {
    let mut diag = Diagnostics::new();
    let document = parser::parse_lines(lines, &mut diag);
    let html = renderer::render(&document, &mut webography, &mut diag);
    CompileResult {
        html,
        warnings: diag.into_warnings(),
    }
}

/// Write the rendered HTML to a file, or to stdout when no path is given
pub fn write_output(html: &str, output: Option<&Path>) -> Result<(), PipelineError> {
    match output {
        Some(path) => {
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() {
                    std::fs::create_dir_all(parent)
                        .map_err(|e| PipelineError::WriteOutput(path.to_path_buf(), e))?;
                }
            }
            std::fs::write(path, html)
                .map_err(|e| PipelineError::WriteOutput(path.to_path_buf(), e))
        }
        None => std::io::stdout()
            .lock()
            .write_all(html.as_bytes())
            .map_err(|e| PipelineError::WriteOutput(PathBuf::from("<stdout>"), e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn as_lines(source: &str) -> Vec<String> {
        source.lines().map(str::to_string).collect()
    }

    #[test]
    fn test_compile_lines_basic_document() {
        let lines = as_lines(
            "title: Demo\ncontent {\ntext { \nHello {https://example.com}{world}\n}\n}\n",
        );
        let result = compile_lines(&lines, Webography::new());
        assert!(result.html.contains("<title>Demo</title>"));
        assert!(result
            .html
            .contains("<p>Hello <a href=\"https://example.com\">world</a></p>"));
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_compile_file_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("doc.cm");
        let bib = dir.path().join("webography");
        std::fs::write(
            &input,
            "title: T\ncontent {\ntext {\ncited ${src}\n}\n}\n",
        )
        .unwrap();
        std::fs::write(&bib, "T: src\nN: Source\nD: 2020\n").unwrap();

        let result = compile_file(&input, &bib).unwrap();
        assert!(result.html.contains("<sup><a href=\"#s1\">[1]</a></sup>"));
        assert!(result.warnings.is_empty());
    }

    #[test]
    fn test_compile_file_missing_webography_is_tolerated() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("doc.cm");
        std::fs::write(&input, "content {\ntext {\n${unknown} {footnotes}\n}\n}\n").unwrap();

        let result = compile_file(&input, &dir.path().join("no-such-file")).unwrap();
        // Both the citation and the footnote list degrade to nothing.
        assert!(result.html.contains("    <div class=\"text-block\">\n    </div>\n"));
        assert_eq!(
            result.warnings,
            vec![Warning::UnknownKeyword("unknown".to_string())]
        );
    }

    #[test]
    fn test_compile_file_missing_input_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent.cm");
        let err = compile_file(&missing, Path::new("webography")).unwrap_err();
        assert!(matches!(err, PipelineError::ReadInput(path, _) if path == missing));
    }

    #[test]
    fn test_write_output_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("nested/out.html");
        write_output("<html></html>\n", Some(&target)).unwrap();
        assert_eq!(
            std::fs::read_to_string(&target).unwrap(),
            "<html></html>\n"
        );
    }
}
