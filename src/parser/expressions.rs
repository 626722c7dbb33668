//! Expression parsing implementation
//!
//! Six precedence tiers, loosest to tightest, each implemented as one
//! method that parses the next-tighter tier and then folds same-tier
//! operators into [`NodeKind::BinaryOp`] pairs:
//!
//! 0. assignment `=` / `:=` (right-associative)
//! 1. `or` / `and`
//! 2. optional `not` prefix, then the collapsed comparison family
//! 3. additive `+` / `-`
//! 4. multiplicative `*` / `/` / `%`
//! 5. optional sign prefix `+` / `-`, then a term
//!
//! A term is a parenthesized expression, an identifier (optionally a
//! call), or a literal.  All binary tiers except assignment fold
//! left-to-right, so `1-2-3` parses as `(1-2)-3`.
//!
//! All parsing methods are `pub(crate)` methods on the [`Parser`] struct.

use crate::parser::ast::{Node, NodeKind};
use crate::parser::lexer::TokenKind;
use crate::parser::parse::{ParseError, Parser};

impl<'src> Parser<'src> {
    /// Parse an expression (tier 0: assignment, right-associative).
    ///
    /// `a = b = c` binds as `a = (b = c)`; the grammar left chained
    /// assignment unresolved upstream and this front end settles on the
    /// conventional right associativity.
    pub(crate) fn parse_expression(&mut self) -> Result<Node<'src>, ParseError> {
        let target = self.parse_logical()?;

        if matches!(
            self.peek_kind()?,
            TokenKind::Assign | TokenKind::AssignAlt
        ) {
            let op = self.consume()?;
            let value = self.parse_expression()?;
            return Ok(Node::binary(op.text, target, value));
        }

        Ok(target)
    }

    /// Tier 1: `or` and `and`, one shared tier, left-associative.
    fn parse_logical(&mut self) -> Result<Node<'src>, ParseError> {
        let mut left = self.parse_comparison()?;

        while matches!(self.peek_kind()?, TokenKind::Or | TokenKind::And) {
            let op = self.consume()?;
            let right = self.parse_comparison()?;
            left = Node::binary(op.text, left, right);
        }

        Ok(left)
    }

    /// Tier 2: optional single `not` prefix feeding the comparison chain.
    ///
    /// `not` wraps only the first operand, so `not a < b` parses as
    /// `(not a) < b` and `not a and b` as `(not a) and b`.  A doubled
    /// `not not a` is a syntax error, as in the reference grammar.
    fn parse_comparison(&mut self) -> Result<Node<'src>, ParseError> {
        let mut left = if self.peek_kind()? == TokenKind::Not {
            let op = self.consume()?;
            Node::unary(op.text, self.parse_additive()?)
        } else {
            self.parse_additive()?
        };

        while self.peek_kind()? == TokenKind::Compare {
            let op = self.consume()?;
            let right = self.parse_additive()?;
            left = Node::binary(op.text, left, right);
        }

        Ok(left)
    }

    /// Tier 3: `+` and `-`, left-associative.
    fn parse_additive(&mut self) -> Result<Node<'src>, ParseError> {
        let mut left = self.parse_multiplicative()?;

        while matches!(self.peek_kind()?, TokenKind::Plus | TokenKind::Minus) {
            let op = self.consume()?;
            let right = self.parse_multiplicative()?;
            left = Node::binary(op.text, left, right);
        }

        Ok(left)
    }

    /// Tier 4: `*`, `/` and `%`, left-associative.
    fn parse_multiplicative(&mut self) -> Result<Node<'src>, ParseError> {
        let mut left = self.parse_unary()?;

        while matches!(
            self.peek_kind()?,
            TokenKind::Star | TokenKind::Slash | TokenKind::Percent
        ) {
            let op = self.consume()?;
            let right = self.parse_unary()?;
            left = Node::binary(op.text, left, right);
        }

        Ok(left)
    }

    /// Tier 5: optional single `+`/`-` sign prefix wrapping a term.
    fn parse_unary(&mut self) -> Result<Node<'src>, ParseError> {
        if matches!(self.peek_kind()?, TokenKind::Plus | TokenKind::Minus) {
            let op = self.consume()?;
            let operand = self.parse_term()?;
            return Ok(Node::unary(op.text, operand));
        }
        self.parse_term()
    }

    /// Term: `( expr )`, identifier (optionally a call), or literal.
    fn parse_term(&mut self) -> Result<Node<'src>, ParseError> {
        let token = self.peek()?;
        match token.kind {
            TokenKind::LParen => {
                self.consume()?;
                let inner = self.parse_expression()?;
                self.expect(TokenKind::RParen)?;
                Ok(inner)
            }
            TokenKind::Ident => {
                self.consume()?;
                let ident = Node::leaf(NodeKind::Ident, token.text);
                self.parse_call_suffix(ident)
            }
            TokenKind::Number | TokenKind::True | TokenKind::False | TokenKind::Nil => {
                self.consume()?;
                Ok(Node::leaf(NodeKind::Literal, token.text))
            }
            _ => Err(self.errant(token)),
        }
    }

    /// Call suffix after an identifier: `( args… )`, or nothing.
    ///
    /// The call node lists the callee first, then the arguments in order.
    /// Arguments are delimited-position statement-or-expressions, so an
    /// argument may itself be a `do`-block or an `if`.
    fn parse_call_suffix(&mut self, callee: Node<'src>) -> Result<Node<'src>, ParseError> {
        if self.peek_kind()? != TokenKind::LParen {
            return Ok(callee);
        }
        self.consume()?;

        let mut children = vec![callee];
        let next = self.peek()?;
        if next.kind.starts_statement() || next.kind.starts_expression() {
            children.push(self.parse_delimited_stmt_expr()?);
            while self.peek_kind()? == TokenKind::Comma {
                self.consume()?;
                children.push(self.parse_delimited_stmt_expr()?);
            }
        }
        self.expect(TokenKind::RParen)?;

        Ok(Node::list(NodeKind::Call, "", children))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Render an expression tree as an s-expression for shape assertions.
    fn sexpr(node: &Node<'_>) -> String {
        match node.kind {
            NodeKind::BinaryOp => format!(
                "({} {} {})",
                node.text,
                sexpr(node.left().unwrap()),
                sexpr(node.right().unwrap())
            ),
            NodeKind::UnaryOp => {
                format!("({} {})", node.text, sexpr(node.left().unwrap()))
            }
            NodeKind::Call => {
                let parts: Vec<String> =
                    node.children().iter().map(sexpr).collect();
                format!("(call {})", parts.join(" "))
            }
            _ => node.text.to_string(),
        }
    }

    fn expr(source: &str) -> String {
        let mut parser = Parser::new(source);
        let node = parser.parse_expression().expect(source);
        sexpr(&node)
    }

    #[test]
    fn test_left_associative_additive() {
        assert_eq!(expr("1-2-3"), "(- (- 1 2) 3)");
    }

    #[test]
    fn test_multiplicative_binds_tighter() {
        assert_eq!(expr("1+2*3"), "(+ 1 (* 2 3))");
        assert_eq!(expr("1*2+3"), "(+ (* 1 2) 3)");
    }

    #[test]
    fn test_parentheses_override_precedence() {
        assert_eq!(expr("(1+2)*3"), "(* (+ 1 2) 3)");
    }

    #[test]
    fn test_multiplicative_chain_left_assoc() {
        assert_eq!(expr("8/4%3"), "(% (/ 8 4) 3)");
    }

    #[test]
    fn test_not_binds_tighter_than_and() {
        assert_eq!(expr("not a and b"), "(and (not a) b)");
    }

    #[test]
    fn test_not_binds_tighter_than_comparison() {
        assert_eq!(expr("not a < b"), "(< (not a) b)");
    }

    #[test]
    fn test_or_and_share_a_tier() {
        assert_eq!(expr("a or b and c"), "(and (or a b) c)");
    }

    #[test]
    fn test_comparison_left_assoc_keeps_spelling() {
        assert_eq!(expr("a <= b == c"), "(== (<= a b) c)");
    }

    #[test]
    fn test_sign_prefix() {
        assert_eq!(expr("-x * y"), "(* (- x) y)");
        assert_eq!(expr("1 - -2"), "(- 1 (- 2))");
    }

    #[test]
    fn test_assignment_right_associative() {
        assert_eq!(expr("a = b = c"), "(= a (= b c))");
        assert_eq!(expr("a := b = c"), "(:= a (= b c))");
    }

    #[test]
    fn test_call_with_arguments() {
        assert_eq!(expr("f(1,2)"), "(call f 1 2)");
    }

    #[test]
    fn test_call_without_arguments() {
        assert_eq!(expr("f()"), "(call f)");
    }

    #[test]
    fn test_nested_calls() {
        assert_eq!(expr("f(g(x), 1+2)"), "(call f (call g x) (+ 1 2))");
    }

    #[test]
    fn test_literals() {
        assert_eq!(expr("true or nil == false"), "(or true (== nil false))");
    }

    #[test]
    fn test_double_not_is_errant() {
        let mut parser = Parser::new("not not a");
        let err = parser.parse_expression().unwrap_err();
        assert_eq!(err.to_string(), "[1:5] Errant token encountered: \"not\"");
    }

    #[test]
    fn test_double_sign_is_errant() {
        let mut parser = Parser::new("--x");
        assert!(parser.parse_expression().is_err());
    }

    #[test]
    fn test_unclosed_paren_reports_eof() {
        let mut parser = Parser::new("(1+2");
        let err = parser.parse_expression().unwrap_err();
        assert_eq!(
            err.to_string(),
            "[1:5] Errant token encountered: EOF, expected: \")\""
        );
    }
}
