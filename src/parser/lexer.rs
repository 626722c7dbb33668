//! Tokenizer for Rill source code
//!
//! Converts the source buffer into a stream of typed [`Token`]s consumed by
//! the parser.  Tokens are scanned on demand and retained in append-only
//! storage, so a previously saved position ([`Mark`]) can be restored with
//! [`TokenStream::backtrack`] and the same tokens re-delivered without
//! re-scanning the buffer.
//!
//! Token text is never copied: every token borrows a subslice of the source
//! buffer and records its byte offset for diagnostics.

use crate::diagnostics::{locate, Position};
use rustc_hash::FxHashMap;
use thiserror::Error;

/// Classification of a token, one variant per lexeme family.
///
/// The six comparison spellings (`< <= > >= == !=`) collapse into the single
/// [`TokenKind::Compare`] kind — the grammar treats them as one precedence
/// tier and the exact spelling survives in the token text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    // Keywords
    True,
    False,
    Nil,
    Not,
    Or,
    And,
    End,
    Do,
    If,
    Elif,
    Else,
    While,
    Return,
    Var,

    // Type names
    Nat,
    Int,
    Bool,

    // Operators
    Plus,      // +
    Minus,     // -
    Star,      // *
    Slash,     // /
    Percent,   // %
    Assign,    // =
    AssignAlt, // :=
    Compare,   // < <= > >= == !=

    // Punctuation
    LParen,    // (
    RParen,    // )
    Comma,     // ,
    Colon,     // :
    Semicolon, // ;

    Ident,
    Number,

    Eof,
}

impl TokenKind {
    /// Stable human-readable name, used in diagnostics and by downstream
    /// consumers of the token stream.
    pub fn name(self) -> &'static str {
        match self {
            TokenKind::True => "\"true\"",
            TokenKind::False => "\"false\"",
            TokenKind::Nil => "\"nil\"",
            TokenKind::Not => "\"not\"",
            TokenKind::Or => "\"or\"",
            TokenKind::And => "\"and\"",
            TokenKind::End => "\"end\"",
            TokenKind::Do => "\"do\"",
            TokenKind::If => "\"if\"",
            TokenKind::Elif => "\"elif\"",
            TokenKind::Else => "\"else\"",
            TokenKind::While => "\"while\"",
            TokenKind::Return => "\"return\"",
            TokenKind::Var => "\"var\"",
            TokenKind::Nat => "\"nat\"",
            TokenKind::Int => "\"int\"",
            TokenKind::Bool => "\"bool\"",
            TokenKind::Plus => "\"+\"",
            TokenKind::Minus => "\"-\"",
            TokenKind::Star => "\"*\"",
            TokenKind::Slash => "\"/\"",
            TokenKind::Percent => "\"%\"",
            TokenKind::Assign => "\"=\"",
            TokenKind::AssignAlt => "\":=\"",
            TokenKind::Compare => "comparison operator",
            TokenKind::LParen => "\"(\"",
            TokenKind::RParen => "\")\"",
            TokenKind::Comma => "\",\"",
            TokenKind::Colon => "\":\"",
            TokenKind::Semicolon => "\";\"",
            TokenKind::Ident => "identifier",
            TokenKind::Number => "number literal",
            TokenKind::Eof => "EOF",
        }
    }

    /// FIRST set of the statement non-terminals.
    pub fn starts_statement(self) -> bool {
        matches!(
            self,
            TokenKind::Do | TokenKind::Return | TokenKind::If | TokenKind::While
        )
    }

    /// FIRST set of the expression grammar (precedence tier 0).
    pub fn starts_expression(self) -> bool {
        matches!(self, TokenKind::Not | TokenKind::Plus | TokenKind::Minus)
            || self.starts_term()
    }

    /// FIRST set of a term: parenthesized expression, identifier, literal.
    pub fn starts_term(self) -> bool {
        matches!(
            self,
            TokenKind::LParen
                | TokenKind::Ident
                | TokenKind::Number
                | TokenKind::True
                | TokenKind::False
                | TokenKind::Nil
        )
    }

    /// FIRST set of a type name in a declaration.
    pub fn starts_type(self) -> bool {
        matches!(self, TokenKind::Nat | TokenKind::Int | TokenKind::Bool)
    }
}

/// A single token: its kind and the exact text it was scanned from.
///
/// `text` borrows the source buffer and `offset` is its byte position
/// within that buffer, so diagnostics can recover a line/column without a
/// separate token→location table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'src> {
    pub kind: TokenKind,
    pub text: &'src str,
    pub offset: usize,
}

/// Lexical error: input bytes that form no token.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LexError {
    #[error("[{position}] Unrecognized character: '{ch}'")]
    UnrecognizedChar { position: Position, ch: char },

    #[error("[{position}] Malformed number literal: \"{text}\"")]
    MalformedNumber { position: Position, text: String },
}

/// Saved read-cursor position, restored with [`TokenStream::backtrack`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mark(usize);

/// On-demand tokenizer with append-only token storage.
///
/// Scanning happens lazily: [`peek`](Self::peek) and
/// [`consume`](Self::consume) only touch the source buffer when the read
/// cursor reaches the end of the tokens produced so far.  Once produced, a
/// token is never rescanned; backtracking replays the stored tokens.
pub struct TokenStream<'src> {
    source: &'src str,
    keywords: FxHashMap<&'static str, TokenKind>,
    /// Byte offset where scanning resumes.
    scan: usize,
    tokens: Vec<Token<'src>>,
    cursor: usize,
}

impl<'src> TokenStream<'src> {
    pub fn new(source: &'src str) -> Self {
        Self {
            source,
            keywords: keyword_table(),
            scan: 0,
            tokens: Vec::new(),
            cursor: 0,
        }
    }

    /// The source buffer this stream scans.
    pub fn source(&self) -> &'src str {
        self.source
    }

    /// Return the token at the read cursor without advancing.
    pub fn peek(&mut self) -> Result<Token<'src>, LexError> {
        self.fill()?;
        Ok(self.tokens[self.cursor])
    }

    /// Return the token at the read cursor and advance past it.
    ///
    /// The cursor never advances past EOF; consuming at the end keeps
    /// returning the EOF token.
    pub fn consume(&mut self) -> Result<Token<'src>, LexError> {
        self.fill()?;
        let token = self.tokens[self.cursor];
        if token.kind != TokenKind::Eof {
            self.cursor += 1;
        }
        Ok(token)
    }

    /// Save the current read position.  After a
    /// [`backtrack`](Self::backtrack) to this mark, the next `consume`
    /// re-delivers the same token that `consume` would deliver now.
    pub fn mark(&self) -> Mark {
        Mark(self.cursor)
    }

    /// Reset the read cursor to `mark`.  Subsequent `peek`/`consume` calls
    /// replay the stored tokens from that point; nothing is rescanned.
    pub fn backtrack(&mut self, mark: Mark) {
        debug_assert!(mark.0 <= self.tokens.len());
        self.cursor = mark.0;
    }

    /// Scan one more token if the cursor sits at the end of storage.
    fn fill(&mut self) -> Result<(), LexError> {
        if self.cursor == self.tokens.len() {
            let token = self.scan_token()?;
            self.tokens.push(token);
        }
        Ok(())
    }

    /// Scan the next token from the buffer (storage untouched).
    fn scan_token(&mut self) -> Result<Token<'src>, LexError> {
        self.skip_trivia();

        let bytes = self.source.as_bytes();
        let start = self.scan;
        if start >= bytes.len() {
            return Ok(Token {
                kind: TokenKind::Eof,
                text: &self.source[self.source.len()..],
                offset: self.source.len(),
            });
        }

        match bytes[start] {
            b'0'..=b'9' => self.scan_number(start),
            b'A'..=b'Z' | b'a'..=b'z' | b'_' => Ok(self.scan_word(start)),
            b'+' => Ok(self.punct(start, 1, TokenKind::Plus)),
            b'-' => Ok(self.punct(start, 1, TokenKind::Minus)),
            b'*' => Ok(self.punct(start, 1, TokenKind::Star)),
            b'/' => Ok(self.punct(start, 1, TokenKind::Slash)),
            b'%' => Ok(self.punct(start, 1, TokenKind::Percent)),
            b'(' => Ok(self.punct(start, 1, TokenKind::LParen)),
            b')' => Ok(self.punct(start, 1, TokenKind::RParen)),
            b',' => Ok(self.punct(start, 1, TokenKind::Comma)),
            b';' => Ok(self.punct(start, 1, TokenKind::Semicolon)),
            b'=' => {
                if self.peek_byte(start + 1) == Some(b'=') {
                    Ok(self.punct(start, 2, TokenKind::Compare))
                } else {
                    Ok(self.punct(start, 1, TokenKind::Assign))
                }
            }
            b':' => {
                if self.peek_byte(start + 1) == Some(b'=') {
                    Ok(self.punct(start, 2, TokenKind::AssignAlt))
                } else {
                    Ok(self.punct(start, 1, TokenKind::Colon))
                }
            }
            b'<' | b'>' => {
                if self.peek_byte(start + 1) == Some(b'=') {
                    Ok(self.punct(start, 2, TokenKind::Compare))
                } else {
                    Ok(self.punct(start, 1, TokenKind::Compare))
                }
            }
            b'!' => {
                if self.peek_byte(start + 1) == Some(b'=') {
                    Ok(self.punct(start, 2, TokenKind::Compare))
                } else {
                    Err(self.unrecognized(start))
                }
            }
            _ => Err(self.unrecognized(start)),
        }
    }

    /// Skip whitespace and `#` line comments.
    fn skip_trivia(&mut self) {
        let bytes = self.source.as_bytes();
        while let Some(&byte) = bytes.get(self.scan) {
            match byte {
                b' ' | b'\t' | b'\r' | b'\n' => self.scan += 1,
                b'#' => {
                    while let Some(&b) = bytes.get(self.scan) {
                        self.scan += 1;
                        if b == b'\n' {
                            break;
                        }
                    }
                }
                _ => break,
            }
        }
    }

    /// Scan a run of decimal digits.  Digits running straight into
    /// identifier characters (`12ab`) are a malformed literal.
    fn scan_number(&mut self, start: usize) -> Result<Token<'src>, LexError> {
        let bytes = self.source.as_bytes();
        let mut end = start;
        while matches!(bytes.get(end), Some(b'0'..=b'9')) {
            end += 1;
        }
        if matches!(bytes.get(end), Some(b'A'..=b'Z' | b'a'..=b'z' | b'_')) {
            while matches!(
                bytes.get(end),
                Some(b'0'..=b'9' | b'A'..=b'Z' | b'a'..=b'z' | b'_')
            ) {
                end += 1;
            }
            return Err(LexError::MalformedNumber {
                position: locate(self.source, start),
                text: self.source[start..end].to_string(),
            });
        }
        self.scan = end;
        Ok(Token {
            kind: TokenKind::Number,
            text: &self.source[start..end],
            offset: start,
        })
    }

    /// Scan an identifier and classify it against the reserved-word set.
    fn scan_word(&mut self, start: usize) -> Token<'src> {
        let bytes = self.source.as_bytes();
        let mut end = start;
        while matches!(
            bytes.get(end),
            Some(b'0'..=b'9' | b'A'..=b'Z' | b'a'..=b'z' | b'_')
        ) {
            end += 1;
        }
        self.scan = end;
        let text = &self.source[start..end];
        let kind = self.keywords.get(text).copied().unwrap_or(TokenKind::Ident);
        Token {
            kind,
            text,
            offset: start,
        }
    }

    fn punct(&mut self, start: usize, len: usize, kind: TokenKind) -> Token<'src> {
        self.scan = start + len;
        Token {
            kind,
            text: &self.source[start..start + len],
            offset: start,
        }
    }

    fn peek_byte(&self, at: usize) -> Option<u8> {
        self.source.as_bytes().get(at).copied()
    }

    fn unrecognized(&self, start: usize) -> LexError {
        // Always on a char boundary: a multi-byte sequence reaches the
        // catch-all arm at its first byte.
        let ch = self.source[start..].chars().next().unwrap_or('\0');
        LexError::UnrecognizedChar {
            position: locate(self.source, start),
            ch,
        }
    }
}

/// Exact-match reserved-word table.
///
/// Built per stream rather than held in a global, so parses stay
/// independently re-entrant.  Only the classification outcome is
/// contractual, not the lookup strategy.
fn keyword_table() -> FxHashMap<&'static str, TokenKind> {
    [
        ("true", TokenKind::True),
        ("false", TokenKind::False),
        ("nil", TokenKind::Nil),
        ("not", TokenKind::Not),
        ("or", TokenKind::Or),
        ("and", TokenKind::And),
        ("end", TokenKind::End),
        ("do", TokenKind::Do),
        ("if", TokenKind::If),
        ("elif", TokenKind::Elif),
        ("else", TokenKind::Else),
        ("while", TokenKind::While),
        ("return", TokenKind::Return),
        ("var", TokenKind::Var),
        ("nat", TokenKind::Nat),
        ("int", TokenKind::Int),
        ("bool", TokenKind::Bool),
    ]
    .into_iter()
    .collect()
}
