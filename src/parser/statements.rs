//! Statement parsing implementation
//!
//! Statements and expressions share one grammar, distinguished by three
//! contextual positions that govern the trailing terminator:
//!
//! - **outer** (block member, outer `return` operand): a bare expression
//!   must be followed by `;`; statement shapes terminate themselves
//! - **delimited** (if/while condition, call argument): no terminator,
//!   the enclosing `:` / `,` / `)` delimits
//! - **inner** (if/elif/else/while body): no terminator, delimited by
//!   `end` / `elif` / `else`
//!
//! One method per position wraps the shared statement grammar, so blocks,
//! conditions, branch bodies and call arguments all reuse a single
//! statement-or-expression rule.
//!
//! All parsing methods are `pub(crate)` methods on the [`Parser`] struct.

use crate::parser::ast::{Node, NodeKind};
use crate::parser::lexer::TokenKind;
use crate::parser::parse::{ParseError, Parser};

impl<'src> Parser<'src> {
    /// Parse block members until a block FOLLOW token
    /// (`end` / `elif` / `else` / EOF), which is left unconsumed.
    pub(crate) fn parse_block(&mut self) -> Result<Node<'src>, ParseError> {
        let mut members = Vec::new();

        loop {
            let token = self.peek()?;
            match token.kind {
                TokenKind::Var => {
                    self.consume()?;
                    self.parse_var_declaration(token.text, &mut members)?;
                }
                kind if kind.starts_statement() || kind.starts_expression() => {
                    members.push(self.parse_outer_stmt_expr()?);
                }
                TokenKind::End | TokenKind::Elif | TokenKind::Else | TokenKind::Eof => {
                    break;
                }
                _ => {
                    return Err(self
                        .errant_expected(token, "\"var\", statement or expression"));
                }
            }
        }

        Ok(Node::list(NodeKind::Block, "", members))
    }

    /// Statement in outer position: `do`-blocks consume their own `end`.
    pub(crate) fn parse_outer_stmt(&mut self) -> Result<Node<'src>, ParseError> {
        let token = self.peek()?;
        match token.kind {
            TokenKind::Do => {
                self.consume()?;
                let mut block = self.parse_block()?;
                block.text = token.text;
                self.expect(TokenKind::End)?;
                Ok(block)
            }
            TokenKind::Return => {
                self.consume()?;
                let operand = self.parse_outer_stmt_expr()?;
                Ok(Node::pair(NodeKind::Return, token.text, Some(operand), None))
            }
            TokenKind::If => self.parse_if_statement(),
            TokenKind::While => self.parse_while_statement(),
            _ => Err(self.errant_expected(token, "statement")),
        }
    }

    /// Statement in inner position.
    ///
    /// An inner `do`-block does not consume its own `end`: the enclosing
    /// construct's `end` closes both.  Likewise an inner `return` operand
    /// needs no terminator.
    pub(crate) fn parse_inner_stmt(&mut self) -> Result<Node<'src>, ParseError> {
        let token = self.peek()?;
        match token.kind {
            TokenKind::Do => {
                self.consume()?;
                let mut block = self.parse_block()?;
                block.text = token.text;
                Ok(block)
            }
            TokenKind::Return => {
                self.consume()?;
                let operand = self.parse_inner_stmt_expr()?;
                Ok(Node::pair(NodeKind::Return, token.text, Some(operand), None))
            }
            TokenKind::If => self.parse_if_statement(),
            TokenKind::While => self.parse_while_statement(),
            _ => Err(self.errant_expected(token, "statement")),
        }
    }

    /// `if cond: body [elif cond: body]* [else: body] end`
    ///
    /// Builds an if-list of if-case pairs; the final `else` case has no
    /// condition.  (The reference grammar writes the else body without a
    /// `:`; the case node's text still carries its introducing keyword.)
    fn parse_if_statement(&mut self) -> Result<Node<'src>, ParseError> {
        let if_token = self.expect(TokenKind::If)?;
        let mut cases = vec![self.parse_if_case(if_token.text)?];

        loop {
            let token = self.peek()?;
            match token.kind {
                TokenKind::Elif => {
                    self.consume()?;
                    cases.push(self.parse_if_case(token.text)?);
                }
                TokenKind::Else => {
                    self.consume()?;
                    let body = self.parse_inner_stmt_expr()?;
                    cases.push(Node::pair(
                        NodeKind::IfCase,
                        token.text,
                        None,
                        Some(body),
                    ));
                    break;
                }
                TokenKind::End => break,
                _ => return Err(self.errant_expected(token, "\"else\" or \"end\"")),
            }
        }
        self.expect(TokenKind::End)?;

        Ok(Node::list(NodeKind::IfList, "", cases))
    }

    /// One conditioned case: delimited condition, `:`, inner body.
    fn parse_if_case(&mut self, keyword: &'src str) -> Result<Node<'src>, ParseError> {
        let condition = self.parse_delimited_stmt_expr()?;
        self.expect(TokenKind::Colon)?;
        let body = self.parse_inner_stmt_expr()?;
        Ok(Node::pair(
            NodeKind::IfCase,
            keyword,
            Some(condition),
            Some(body),
        ))
    }

    /// `while cond: body end`
    fn parse_while_statement(&mut self) -> Result<Node<'src>, ParseError> {
        let while_token = self.expect(TokenKind::While)?;
        let condition = self.parse_delimited_stmt_expr()?;
        self.expect(TokenKind::Colon)?;
        let body = self.parse_inner_stmt_expr()?;
        self.expect(TokenKind::End)?;

        Ok(Node::pair(
            NodeKind::While,
            while_token.text,
            Some(condition),
            Some(body),
        ))
    }

    /// Outer position: a bare expression requires a trailing `;`.
    pub(crate) fn parse_outer_stmt_expr(&mut self) -> Result<Node<'src>, ParseError> {
        let token = self.peek()?;
        if token.kind.starts_statement() {
            self.parse_outer_stmt()
        } else if token.kind.starts_expression() {
            let expr = self.parse_expression()?;
            self.expect(TokenKind::Semicolon)?;
            Ok(expr)
        } else {
            Err(self.errant_expected(token, "statement or expression"))
        }
    }

    /// Delimited position: no terminator; the caller's `:` / `,` / `)`
    /// delimits.  Statement shapes parse as outer statements, so an
    /// inline `do`-block keeps its own `end`.
    pub(crate) fn parse_delimited_stmt_expr(&mut self) -> Result<Node<'src>, ParseError> {
        let token = self.peek()?;
        if token.kind.starts_statement() {
            self.parse_outer_stmt()
        } else if token.kind.starts_expression() {
            self.parse_expression()
        } else {
            Err(self.errant_expected(token, "statement or expression"))
        }
    }

    /// Inner position: no terminator; `end` / `elif` / `else` delimit.
    pub(crate) fn parse_inner_stmt_expr(&mut self) -> Result<Node<'src>, ParseError> {
        let token = self.peek()?;
        if token.kind.starts_statement() {
            self.parse_inner_stmt()
        } else if token.kind.starts_expression() {
            self.parse_expression()
        } else {
            Err(self.errant_expected(token, "statement or expression"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn program(source: &str) -> Node<'_> {
        Parser::new(source).parse_program().expect(source)
    }

    fn program_err(source: &str) -> ParseError {
        Parser::new(source).parse_program().unwrap_err()
    }

    #[test]
    fn test_bare_expression_needs_semicolon() {
        let root = program("1+2;");
        assert_eq!(root.children().len(), 1);
        assert_eq!(root.children()[0].kind, NodeKind::BinaryOp);

        let err = program_err("1+2 4;");
        assert_eq!(
            err.to_string(),
            "[1:5] Errant token encountered: \"4\", expected: \";\""
        );
    }

    #[test]
    fn test_condition_needs_no_semicolon() {
        let root = program("if 1+2: 3 end");
        let if_list = &root.children()[0];
        assert_eq!(if_list.kind, NodeKind::IfList);
        let case = &if_list.children()[0];
        assert_eq!(case.kind, NodeKind::IfCase);
        assert_eq!(case.text, "if");
        assert_eq!(case.left().unwrap().kind, NodeKind::BinaryOp);
        assert_eq!(case.right().unwrap().text, "3");
    }

    #[test]
    fn test_if_elif_else_chain() {
        let root = program("if a: 1 elif b: 2 elif c: 3 else 4 end");
        let if_list = &root.children()[0];
        let cases = if_list.children();
        assert_eq!(cases.len(), 4);
        assert_eq!(cases[0].text, "if");
        assert_eq!(cases[1].text, "elif");
        assert_eq!(cases[2].text, "elif");
        assert_eq!(cases[3].text, "else");
        // The final else case has no condition.
        assert!(cases[3].left().is_none());
        assert_eq!(cases[3].right().unwrap().text, "4");
    }

    #[test]
    fn test_if_rejects_second_else() {
        let err = program_err("if a: 1 else 2 else 3 end");
        assert_eq!(
            err.to_string(),
            "[1:16] Errant token encountered: \"else\", expected: \"end\""
        );
    }

    #[test]
    fn test_while_statement() {
        let root = program("while x < 10: x = x + 1 end");
        let node = &root.children()[0];
        assert_eq!(node.kind, NodeKind::While);
        assert_eq!(node.text, "while");
        assert_eq!(node.left().unwrap().text, "<");
        assert_eq!(node.right().unwrap().text, "=");
    }

    #[test]
    fn test_outer_do_block_tagged_and_closed() {
        let root = program("do 1; 2; end");
        let block = &root.children()[0];
        assert_eq!(block.kind, NodeKind::Block);
        assert_eq!(block.text, "do");
        assert_eq!(block.children().len(), 2);
    }

    #[test]
    fn test_inner_do_block_shares_enclosing_end() {
        // The inner do-block is closed by the if's own `end`.
        let root = program("if a: do 1; end");
        let case = &root.children()[0].children()[0];
        let body = case.right().unwrap();
        assert_eq!(body.kind, NodeKind::Block);
        assert_eq!(body.text, "do");
    }

    #[test]
    fn test_return_outer_consumes_terminator() {
        let root = program("return 1+2;");
        let node = &root.children()[0];
        assert_eq!(node.kind, NodeKind::Return);
        assert_eq!(node.left().unwrap().text, "+");
        assert!(node.right().is_none());
    }

    #[test]
    fn test_return_inner_needs_no_terminator() {
        let root = program("if a: return 1 end");
        let case = &root.children()[0].children()[0];
        assert_eq!(case.right().unwrap().kind, NodeKind::Return);
    }

    #[test]
    fn test_statement_condition() {
        // A do-block in delimited position keeps its own end.
        let root = program("if do true; end: 1 end");
        let case = &root.children()[0].children()[0];
        assert_eq!(case.left().unwrap().kind, NodeKind::Block);
    }

    #[test]
    fn test_statement_as_call_argument() {
        let root = program("f(do 1; end, 2);");
        let call = &root.children()[0];
        assert_eq!(call.kind, NodeKind::Call);
        assert_eq!(call.children().len(), 3);
        assert_eq!(call.children()[1].kind, NodeKind::Block);
    }

    #[test]
    fn test_block_member_errant_token() {
        let err = program_err("1; : 2;");
        assert_eq!(
            err.to_string(),
            "[1:4] Errant token encountered: \":\", expected: \"var\", statement or expression"
        );
    }

    #[test]
    fn test_missing_colon_after_condition() {
        let err = program_err("while x end");
        assert_eq!(
            err.to_string(),
            "[1:9] Errant token encountered: \"end\", expected: \":\""
        );
    }

    #[test]
    fn test_unterminated_if_reports_eof() {
        let err = program_err("if a: 1");
        assert_eq!(
            err.to_string(),
            "[1:8] Errant token encountered: EOF, expected: \"else\" or \"end\""
        );
    }

    #[test]
    fn test_diagnostic_line_and_column() {
        let err = program_err("1;\n2;\n  )");
        assert_eq!(
            err.to_string(),
            "[3:3] Errant token encountered: \")\", expected: \"var\", statement or expression"
        );
    }
}
