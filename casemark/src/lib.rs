//! casemark - compiler for the casemark markup language
//!
//! Casemark is a small line-oriented markup language built around nestable
//! titled sections ("cases"), text and sources blocks, and a brace-delimited
//! inline micro-syntax for images, links and citations. This crate turns a
//! document into static, indented HTML.
//!
//! The engine has four pieces, wired together by [`pipeline`]:
//! - [`parser`] converts raw input lines into a [`ast::Document`] tree
//! - [`inline`] resolves inline constructs inside block content
//! - [`webography`] tracks cited sources and assigns footnote numbers
//! - [`renderer`] walks the tree and emits the HTML text
//!
//! The grammar is fixed and the engine is total: malformed input degrades to
//! a partial tree or literal passthrough, never an error. Problems noticed
//! along the way are collected as [`diagnostics::Warning`]s.

#![deny(unsafe_code)]
#![allow(clippy::module_name_repetitions)]

pub mod ast;
pub mod diagnostics;
pub mod inline;
pub mod parser;
pub mod pipeline;
pub mod renderer;
pub mod webography;
