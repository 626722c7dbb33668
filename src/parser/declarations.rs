//! Variable declaration parsing
//!
//! `var x int = 1, y int = 2;` — one `var` keyword introduces a chain of
//! declarations, each `ident type = initializer`, linked by commas under a
//! single trailing terminator.  Every link yields its own [`NodeKind::Var`]
//! list node `[type, assign-pair(ident, initializer)]` carrying the `var`
//! keyword text; the links are appended to the enclosing block in order.
//!
//! The continuation rule depends on the initializer's shape: after a bare
//! expression, `,` continues the chain and `;` closes it; after a
//! statement-shaped initializer (already self-terminated), `,` continues
//! and any block-member FIRST or block FOLLOW token may come next with no
//! terminator at all.

use crate::parser::ast::{Node, NodeKind};
use crate::parser::lexer::TokenKind;
use crate::parser::parse::{ParseError, Parser};

impl<'src> Parser<'src> {
    /// Parse a declaration chain after its `var` keyword has been
    /// consumed, appending one `Var` node per link to `block`.
    pub(crate) fn parse_var_declaration(
        &mut self,
        keyword: &'src str,
        block: &mut Vec<Node<'src>>,
    ) -> Result<(), ParseError> {
        let ident = self.expect(TokenKind::Ident)?;
        let ty = self.parse_type()?;
        let assign = self.expect(TokenKind::Assign)?;

        let token = self.peek()?;
        if token.kind.starts_statement() {
            let init = self.parse_outer_stmt()?;
            block.push(var_node(keyword, ty, assign.text, ident.text, init));
            self.parse_var_stmt_next(keyword, block)
        } else if token.kind.starts_expression() {
            let init = self.parse_expression()?;
            block.push(var_node(keyword, ty, assign.text, ident.text, init));
            self.parse_var_expr_next(keyword, block)
        } else {
            Err(self.errant_expected(token, "statement or expression"))
        }
    }

    /// Continuation after a bare-expression initializer: `,` or `;`.
    fn parse_var_expr_next(
        &mut self,
        keyword: &'src str,
        block: &mut Vec<Node<'src>>,
    ) -> Result<(), ParseError> {
        let token = self.peek()?;
        match token.kind {
            TokenKind::Comma => {
                self.consume()?;
                self.parse_var_declaration(keyword, block)
            }
            TokenKind::Semicolon => {
                self.consume()?;
                Ok(())
            }
            _ => Err(self.errant_expected(token, "\",\" or \";\"")),
        }
    }

    /// Continuation after a statement-shaped initializer: `,` chains on;
    /// otherwise the next token must be able to follow a block member.
    fn parse_var_stmt_next(
        &mut self,
        keyword: &'src str,
        block: &mut Vec<Node<'src>>,
    ) -> Result<(), ParseError> {
        let token = self.peek()?;
        match token.kind {
            TokenKind::Comma => {
                self.consume()?;
                self.parse_var_declaration(keyword, block)
            }
            TokenKind::End
            | TokenKind::Elif
            | TokenKind::Else
            | TokenKind::Eof
            | TokenKind::Var => Ok(()),
            kind if kind.starts_statement() || kind.starts_expression() => Ok(()),
            _ => Err(self
                .errant_expected(token, "\",\" or \"end\" or EOF or block member")),
        }
    }

    /// Type name: `nat`, `int` or `bool`.
    pub(crate) fn parse_type(&mut self) -> Result<Node<'src>, ParseError> {
        let token = self.peek()?;
        if token.kind.starts_type() {
            self.consume()?;
            Ok(Node::leaf(NodeKind::Type, token.text))
        } else {
            Err(self.errant_expected(token, "\"nat\" or \"int\" or \"bool\""))
        }
    }
}

fn var_node<'src>(
    keyword: &'src str,
    ty: Node<'src>,
    assign: &'src str,
    ident: &'src str,
    init: Node<'src>,
) -> Node<'src> {
    let target = Node::leaf(NodeKind::Ident, ident);
    let binding = Node::pair(NodeKind::BinaryOp, assign, Some(target), Some(init));
    Node::list(NodeKind::Var, keyword, vec![ty, binding])
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
    fn test_single_declaration() {
        let root = program("var x int = 1;");
        assert_eq!(root.children().len(), 1);
        let decl = &root.children()[0];
        assert_eq!(decl.kind, NodeKind::Var);
        assert_eq!(decl.text, "var");

        let ty = &decl.children()[0];
        assert_eq!(ty.kind, NodeKind::Type);
        assert_eq!(ty.text, "int");

        let binding = &decl.children()[1];
        assert_eq!(binding.kind, NodeKind::BinaryOp);
        assert_eq!(binding.text, "=");
        assert_eq!(binding.left().unwrap().text, "x");
        assert_eq!(binding.right().unwrap().text, "1");
    }

    #[test]
    fn test_chained_declarations_share_terminator() {
        let root = program("var x int = 1, y int = 2;");
        assert_eq!(root.children().len(), 2);
        let (first, second) = (&root.children()[0], &root.children()[1]);
        assert_eq!(first.kind, NodeKind::Var);
        assert_eq!(second.kind, NodeKind::Var);
        assert_eq!(first.children()[1].left().unwrap().text, "x");
        assert_eq!(second.children()[1].left().unwrap().text, "y");
        assert_eq!(second.children()[0].text, "int");
    }

    #[test]
    fn test_all_type_names() {
        let root = program("var a nat = 0, b int = -1, c bool = true;");
        let types: Vec<&str> = root
            .children()
            .iter()
            .map(|decl| decl.children()[0].text)
            .collect();
        assert_eq!(types, vec!["nat", "int", "bool"]);
    }

    #[test]
    fn test_declaration_requires_primary_assign() {
        // `:=` is an expression operator; declarations take `=` only.
        let err = program_err("var x int := 1;");
        assert_eq!(
            err.to_string(),
            "[1:11] Errant token encountered: \":=\", expected: \"=\""
        );
    }

    #[test]
    fn test_bad_type_name() {
        let err = program_err("var x float = 1;");
        assert_eq!(
            err.to_string(),
            "[1:7] Errant token encountered: \"float\", expected: \"nat\" or \"int\" or \"bool\""
        );
    }

    #[test]
    fn test_missing_terminator() {
        let err = program_err("var x int = 1 var");
        assert_eq!(
            err.to_string(),
            "[1:15] Errant token encountered: \"var\", expected: \",\" or \";\""
        );
    }

    #[test]
    fn test_statement_initializer_needs_no_terminator() {
        let root = program("var x int = do 1; end var y int = 2;");
        assert_eq!(root.children().len(), 2);
        let first = &root.children()[0];
        assert_eq!(first.children()[1].right().unwrap().kind, NodeKind::Block);
    }

    #[test]
    fn test_statement_initializer_chains_with_comma() {
        let root = program("var x int = do 1; end, y int = 2;");
        assert_eq!(root.children().len(), 2);
    }

    #[test]
    fn test_statement_initializer_rejects_semicolon() {
        let err = program_err("var x int = do 1; end;");
        assert_eq!(
            err.to_string(),
            "[1:22] Errant token encountered: \";\", expected: \",\" or \"end\" or EOF or block member"
        );
    }

    #[test]
    fn test_expression_initializer_is_full_expression() {
        let root = program("var x bool = not a and f(1);");
        let binding = &root.children()[0].children()[1];
        assert_eq!(binding.right().unwrap().text, "and");
    }
}
