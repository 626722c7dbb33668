//! Source position computation for diagnostics
//!
//! Tokens carry only a byte offset into the source buffer.  A 1-based
//! line/column pair is derived from that offset on demand by scanning the
//! buffer for newlines — a pure function of `(source, offset)`, computed
//! only when an error is actually reported.

use std::fmt;

/// A 1-based line/column position in the source buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub fn new(line: usize, column: usize) -> Self {
        Self { line, column }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.column)
    }
}

/// Compute the position of `offset` within `source`.
///
/// `line` is 1 plus the number of newline bytes strictly before `offset`;
/// `column` is the distance from the last such newline, so an offset on
/// the first line yields `column = offset + 1`.
pub fn locate(source: &str, offset: usize) -> Position {
    let offset = offset.min(source.len());
    let mut line = 1;
    let mut last_newline: Option<usize> = None;

    for (i, byte) in source.as_bytes()[..offset].iter().enumerate() {
        if *byte == b'\n' {
            line += 1;
            last_newline = Some(i);
        }
    }

    let column = match last_newline {
        Some(nl) => offset - nl,
        None => offset + 1,
    };

    Position::new(line, column)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_line_columns() {
        assert_eq!(locate("abc", 0), Position::new(1, 1));
        assert_eq!(locate("abc", 2), Position::new(1, 3));
    }

    #[test]
    fn test_line_counting() {
        let source = "one\ntwo\nthree";
        assert_eq!(locate(source, 4), Position::new(2, 1));
        assert_eq!(locate(source, 6), Position::new(2, 3));
        assert_eq!(locate(source, 8), Position::new(3, 1));
        assert_eq!(locate(source, 12), Position::new(3, 5));
    }

    #[test]
    fn test_offset_on_newline() {
        // The newline byte itself still belongs to the line it ends.
        assert_eq!(locate("ab\ncd", 2), Position::new(1, 3));
        assert_eq!(locate("ab\ncd", 3), Position::new(2, 1));
    }

    #[test]
    fn test_offset_clamped_to_buffer_end() {
        assert_eq!(locate("ab", 99), Position::new(1, 3));
        assert_eq!(locate("", 0), Position::new(1, 1));
    }

    #[test]
    fn test_display() {
        assert_eq!(Position::new(3, 7).to_string(), "3:7");
    }
}
