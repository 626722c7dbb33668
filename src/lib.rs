//! # Introduction
//!
//! The front end of the Rill language: raw source bytes in, a typed token
//! stream and an abstract syntax tree out, failing fast with one precise
//! diagnostic on the first malformed input.
//!
//! ## Pipeline
//!
//! ```text
//! Source → TokenStream → Parser → AST
//! ```
//!
//! 1. [`parser::lexer`] — scans tokens on demand into append-only storage;
//!    a saved [`parser::Mark`] replays previously produced tokens without
//!    re-scanning.
//! 2. [`parser::Parser`] — LL(1) recursive descent over the stream; six
//!    precedence tiers, statements and expressions unified through three
//!    contextual positions (outer / delimited / inner).
//! 3. [`parser::ast`] — the Pair/List tagged tree, borrowing all token
//!    text from the source buffer.
//!
//! [`diagnostics`] turns byte offsets into 1-based line/column pairs for
//! error rendering.
//!
//! ## The Rill language
//!
//! A small imperative language: `do … end` blocks, `if`/`elif`/`else`,
//! `while`, `return`, typed `var` declarations over `nat`/`int`/`bool`,
//! and `#` line comments.  Statement shapes may appear anywhere an
//! expression can, including conditions and call arguments.
//!
//! ## Resource limits
//!
//! Parsing is single-threaded and synchronous.  Nesting depth is bounded
//! only by the native call stack; pathologically deep input can exhaust
//! it.

pub mod diagnostics;
pub mod parser;

use parser::{Node, ParseError, Parser};

/// Parse a whole program: convenience entry over [`Parser`].
pub fn parse(source: &str) -> Result<Node<'_>, ParseError> {
    Parser::new(source).parse_program()
}
