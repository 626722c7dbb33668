//! Rill source code parser
//!
//! This module transforms Rill source text into an Abstract Syntax Tree:
//! - [`lexer`]: tokenization (source text → token stream, scanned on
//!   demand with mark/backtrack replay)
//! - [`parse`]: the [`Parser`] coordinator and error type
//! - [`ast`]: AST node definitions
//!
//! # Parser implementation
//!
//! Hand-written LL(1) recursive descent with one loop per operator
//! precedence tier.  No parser generator, no grammar-level backtracking.
//! Parser methods are split across `declarations`, `statements` and
//! `expressions` using `impl Parser` blocks, each extending the shared
//! parser state with related productions.

pub mod ast;
pub mod lexer;
pub mod parse;

mod declarations;
mod expressions;
mod statements;

pub use ast::{Node, NodeBody, NodeKind};
pub use lexer::{LexError, Mark, Token, TokenKind, TokenStream};
pub use parse::{ParseError, Parser};
