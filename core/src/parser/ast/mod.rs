mod class;
mod expression;
mod function;
mod literal;
mod module;
mod pattern;
mod statement;

use serde::{Serialize, Serializer};

use crate::lexer::token::{Position, Span};
use crate::options::SourceType;

pub use class::{Class, ClassBody, ClassMethod};
pub use expression::{
    ArrowBody, AssignmentOperator, BinaryOperator, Expr, ExprKind, LogicalOperator, MethodKind,
    ObjectMember, UnaryOperator, UpdateOperator,
};
pub use function::Function;
pub use literal::{Extra, TemplateElement, TemplateValue};
pub use module::{ExportDefault, ExportSpecifier, ImportSpecifier};
pub use pattern::{Pattern, PatternKind, PatternProperty};
pub use statement::{
    BlockStatement, CatchClause, ForInit, ForLeft, Stmt, StmtKind, SwitchCase, VarKind,
    VariableDeclaration, VariableDeclarator,
};

/// A syntax tree node: its kind-specific payload plus its source span.
///
/// A node serializes as one JSON object carrying `type`, the payload
/// fields, `start`, `end` and `loc`.
#[derive(Debug, Clone, PartialEq)]
pub struct Node<K> {
    pub kind: K,
    pub span: Span,
}

impl<K> Node<K> {
    pub fn new(kind: K, span: Span) -> Self {
        Self { kind, span }
    }
}

/// Payload of a [`Node`].
pub trait NodeKind: Serialize {
    /// The name an identifier node carries in `loc.identifierName`.
    fn identifier_name(&self) -> Option<&str> {
        None
    }
}

#[derive(Serialize)]
struct NodeRepr<'a, K> {
    #[serde(flatten)]
    kind: &'a K,
    start: usize,
    end: usize,
    loc: LocationRepr<'a>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct LocationRepr<'a> {
    start: Position,
    end: Position,
    #[serde(skip_serializing_if = "Option::is_none")]
    identifier_name: Option<&'a str>,
}

impl<K: NodeKind> Serialize for Node<K> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        NodeRepr {
            kind: &self.kind,
            start: self.span.start,
            end: self.span.end,
            loc: LocationRepr {
                start: self.span.loc.start,
                end: self.span.loc.end,
                identifier_name: self.kind.identifier_name(),
            },
        }
        .serialize(serializer)
    }
}

/// The root of every parse.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub struct Program {
    pub source_type: SourceType,
    pub body: Vec<Stmt>,
    /// Every comment in source order; serialized beside the program by
    /// [`crate::to_json`].
    #[serde(skip)]
    pub comments: Vec<Node<Comment>>,
}

/// A `//` or `/* */` comment; `value` excludes the delimiters.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum Comment {
    CommentLine { value: String },
    CommentBlock { value: String },
}

/// A binding or reference name used outside expression position.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct Identifier {
    pub name: String,
}

impl NodeKind for Identifier {
    fn identifier_name(&self) -> Option<&str> {
        Some(&self.name)
    }
}

impl NodeKind for Program {}
impl NodeKind for Comment {}
