//! Structural warnings collected while compiling
//!
//! The compiler never fails on malformed input; it degrades and keeps going.
//! These warnings make the degradation visible on request (`check`,
//! `build --strict`) without changing the default output.

use thiserror::Error;

/// A non-fatal problem noticed while compiling a document
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Warning {
    /// A block opener was never closed before end of input
    #[error("unterminated {kind} block starting at line {line}")]
    UnterminatedBlock {
        /// Block kind: "text", "sources" or "case"
        kind: &'static str,
        /// 1-based line number of the opening line
        line: usize,
    },

    /// A `case(` header with no closing parenthesis; the case keeps an
    /// empty title and an empty anchor id
    #[error("malformed case header at line {line}")]
    MalformedCaseHeader {
        /// 1-based line number of the header
        line: usize,
    },

    /// A `${keyword}` citation with no matching webography entry
    #[error("unknown webography keyword '{0}'")]
    UnknownKeyword(String),
}

/// Collector for the warnings raised during one compile
#[derive(Debug, Default)]
pub struct Diagnostics {
    warnings: Vec<Warning>,
}

impl Diagnostics {
    /// Create an empty collector
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a warning, logging it as it arrives
    pub fn warn(&mut self, warning: Warning) {
        log::warn!("{warning}");
        self.warnings.push(warning);
    }

    /// Warnings recorded so far, in arrival order
    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    /// True if nothing has been recorded
    pub fn is_empty(&self) -> bool {
        self.warnings.is_empty()
    }

    /// Consume the collector, returning the recorded warnings
    pub fn into_warnings(self) -> Vec<Warning> {
        self.warnings
    }
}
