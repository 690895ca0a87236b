use serde::Serialize;

use super::expression::Expr;
use super::{Node, NodeKind};

pub type Pattern = Node<PatternKind>;

/// Binding and assignment targets.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all_fields = "camelCase")]
pub enum PatternKind {
    Identifier {
        name: String,
    },
    ObjectPattern {
        properties: Vec<Node<PatternProperty>>,
    },
    ArrayPattern {
        elements: Vec<Option<Pattern>>,
    },
    AssignmentPattern {
        left: Box<Pattern>,
        right: Box<Expr>,
    },
    RestElement {
        argument: Box<Pattern>,
    },
    /// Only valid as an assignment target, never in a binding.
    MemberExpression {
        object: Box<Expr>,
        property: Box<Expr>,
        computed: bool,
    },
}

impl PatternKind {
    pub fn as_identifier(&self) -> Option<&str> {
        match self {
            PatternKind::Identifier { name } => Some(name),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all_fields = "camelCase")]
pub enum PatternProperty {
    ObjectProperty {
        key: Box<Expr>,
        value: Box<Pattern>,
        computed: bool,
        shorthand: bool,
    },
    RestElement {
        argument: Box<Pattern>,
    },
}

impl NodeKind for PatternKind {
    fn identifier_name(&self) -> Option<&str> {
        self.as_identifier()
    }
}

impl NodeKind for PatternProperty {}
