//! Main parser coordinator
//!
//! Provides the [`Parser`] struct, the [`ParseError`] type, shared helper
//! methods, and the program entry point.  The grammar itself is split
//! across sibling modules using `impl Parser` blocks:
//!
//! - `declarations`: `var` declaration chains
//! - `statements`: blocks, `if`/`elif`/`else`, `while`, `do`, `return`,
//!   and the three statement-expression positions
//! - `expressions`: the six-tier precedence climb, terms, and calls
//!
//! The parser is LL(1): every decision looks at the single next token's
//! kind.  There is no backtracking at the grammar layer — [`super::lexer`]'s
//! mark/backtrack facility exists for external callers of the token stream.
//! Any token outside the active FIRST/FOLLOW set is fatal; the first error
//! propagates out of every grammar function via `Result`.

use crate::diagnostics::locate;
use crate::parser::ast::{Node, NodeKind};
use crate::parser::lexer::{LexError, Token, TokenKind, TokenStream};
use thiserror::Error;

/// Fatal parse error, rendered in the canonical diagnostic format.
///
/// `found` is the quoted spelling of the offending token, or `EOF`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("[{position}] Errant token encountered: {found}")]
    Errant {
        position: crate::diagnostics::Position,
        found: String,
    },

    #[error("[{position}] Errant token encountered: {found}, expected: {expected}")]
    Expected {
        position: crate::diagnostics::Position,
        found: String,
        expected: String,
    },

    #[error(transparent)]
    Lex(#[from] LexError),
}

/// Recursive descent parser over a [`TokenStream`].
///
/// One parser instance performs one parse; all state is local, so parses
/// are independently re-entrant.  Nesting depth is bounded only by the
/// native call stack.
pub struct Parser<'src> {
    pub(crate) tokens: TokenStream<'src>,
}

impl<'src> Parser<'src> {
    pub fn new(source: &'src str) -> Self {
        Self {
            tokens: TokenStream::new(source),
        }
    }

    /// Build a parser over an existing stream, picking up at its current
    /// read cursor.  Lets a driver dump tokens, backtrack, and then parse
    /// the same stream.
    pub fn with_stream(tokens: TokenStream<'src>) -> Self {
        Self { tokens }
    }

    /// Parse a whole program: zero or more block members up to EOF.
    ///
    /// Empty input is a valid program and yields an empty block.
    pub fn parse_program(&mut self) -> Result<Node<'src>, ParseError> {
        let token = self.peek()?;
        match token.kind {
            TokenKind::Var => self.parse_program_block(),
            kind if kind.starts_statement() || kind.starts_expression() => {
                self.parse_program_block()
            }
            TokenKind::Eof => Ok(Node::list(NodeKind::Block, "", Vec::new())),
            _ => Err(self.errant_expected(token, "\"var\" statement or expression or EOF")),
        }
    }

    fn parse_program_block(&mut self) -> Result<Node<'src>, ParseError> {
        let root = self.parse_block()?;
        self.expect(TokenKind::Eof)?;
        Ok(root)
    }

    // ===== Helper methods =====

    pub(crate) fn peek(&mut self) -> Result<Token<'src>, ParseError> {
        Ok(self.tokens.peek()?)
    }

    pub(crate) fn peek_kind(&mut self) -> Result<TokenKind, ParseError> {
        Ok(self.tokens.peek()?.kind)
    }

    pub(crate) fn consume(&mut self) -> Result<Token<'src>, ParseError> {
        Ok(self.tokens.consume()?)
    }

    /// Consume the next token, requiring an exact kind.
    pub(crate) fn expect(&mut self, kind: TokenKind) -> Result<Token<'src>, ParseError> {
        let token = self.peek()?;
        if token.kind == kind {
            self.consume()
        } else {
            Err(self.errant_expected(token, kind.name()))
        }
    }

    /// Errant-token error with no expectation description.
    pub(crate) fn errant(&self, token: Token<'src>) -> ParseError {
        ParseError::Errant {
            position: locate(self.tokens.source(), token.offset),
            found: render_found(&token),
        }
    }

    /// Errant-token error naming the expected construct.
    pub(crate) fn errant_expected(&self, token: Token<'src>, expected: &str) -> ParseError {
        ParseError::Expected {
            position: locate(self.tokens.source(), token.offset),
            found: render_found(&token),
            expected: expected.to_string(),
        }
    }
}

fn render_found(token: &Token<'_>) -> String {
    if token.kind == TokenKind::Eof {
        "EOF".to_string()
    } else {
        format!("\"{}\"", token.text)
    }
}
