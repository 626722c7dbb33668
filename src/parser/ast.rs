//! AST node definitions for the Rill front end
//!
//! The tree is a tagged variant with two shapes: a [`Pair`](NodeBody::Pair)
//! with up to two owned children, and a [`List`](NodeBody::List) with an
//! ordered sequence of owned children.  Both carry a [`NodeKind`] and the
//! token text the node was built from, borrowed from the source buffer.
//!
//! Ownership is strictly parent-owns-child: no sharing, no cycles.  The
//! whole tree is released at once when the root is dropped.

/// What a node represents.  List kinds: `Block`, `Var`, `IfList`, `Call`.
/// Everything else is a pair (possibly with no children at all for the
/// leaf kinds `Ident`, `Literal`, `Type`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    Block,
    Var,
    Type,
    Ident,
    Literal,
    BinaryOp,
    UnaryOp,
    IfList,
    IfCase,
    While,
    Return,
    Call,
}

impl NodeKind {
    /// Stable human-readable name for diagnostics and AST consumers.
    pub fn name(self) -> &'static str {
        match self {
            NodeKind::Block => "block",
            NodeKind::Var => "var",
            NodeKind::Type => "type",
            NodeKind::Ident => "ident",
            NodeKind::Literal => "literal",
            NodeKind::BinaryOp => "binary-op",
            NodeKind::UnaryOp => "unary-op",
            NodeKind::IfList => "if-list",
            NodeKind::IfCase => "if-case",
            NodeKind::While => "while",
            NodeKind::Return => "return",
            NodeKind::Call => "call",
        }
    }
}

/// The two node shapes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeBody<'src> {
    Pair {
        left: Option<Box<Node<'src>>>,
        right: Option<Box<Node<'src>>>,
    },
    List { children: Vec<Node<'src>> },
}

/// One AST node.  `text` carries the spelling of the token the node was
/// built from (operator, identifier, literal, keyword) and is overwritten
/// exactly once for `do`-blocks, which tag the block with the `do` token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node<'src> {
    pub kind: NodeKind,
    pub text: &'src str,
    pub body: NodeBody<'src>,
}

impl<'src> Node<'src> {
    /// A childless pair node (identifier, literal, type name).
    pub fn leaf(kind: NodeKind, text: &'src str) -> Self {
        Self::pair(kind, text, None, None)
    }

    pub fn pair(
        kind: NodeKind,
        text: &'src str,
        left: Option<Node<'src>>,
        right: Option<Node<'src>>,
    ) -> Self {
        Node {
            kind,
            text,
            body: NodeBody::Pair {
                left: left.map(Box::new),
                right: right.map(Box::new),
            },
        }
    }

    pub fn list(kind: NodeKind, text: &'src str, children: Vec<Node<'src>>) -> Self {
        Node {
            kind,
            text,
            body: NodeBody::List { children },
        }
    }

    /// Binary-operator pair: `text` is the operator spelling.
    pub fn binary(text: &'src str, left: Node<'src>, right: Node<'src>) -> Self {
        Self::pair(NodeKind::BinaryOp, text, Some(left), Some(right))
    }

    /// Unary-operator pair: the operand sits in `left`, `right` is unused.
    pub fn unary(text: &'src str, operand: Node<'src>) -> Self {
        Self::pair(NodeKind::UnaryOp, text, Some(operand), None)
    }

    pub fn left(&self) -> Option<&Node<'src>> {
        match &self.body {
            NodeBody::Pair { left, .. } => left.as_deref(),
            NodeBody::List { .. } => None,
        }
    }

    pub fn right(&self) -> Option<&Node<'src>> {
        match &self.body {
            NodeBody::Pair { right, .. } => right.as_deref(),
            NodeBody::List { .. } => None,
        }
    }

    /// Children of a list node; empty for pair nodes.
    pub fn children(&self) -> &[Node<'src>] {
        match &self.body {
            NodeBody::List { children } => children,
            NodeBody::Pair { .. } => &[],
        }
    }
}
