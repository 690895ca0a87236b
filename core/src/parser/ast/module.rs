use serde::Serialize;

use super::expression::Expr;
use super::statement::Stmt;
use super::{Identifier, Node, NodeKind};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub enum ImportSpecifier {
    /// `import { imported as local }`
    ImportSpecifier {
        imported: Node<Identifier>,
        local: Node<Identifier>,
    },
    /// `import local from`
    ImportDefaultSpecifier { local: Node<Identifier> },
    /// `import * as local from`
    ImportNamespaceSpecifier { local: Node<Identifier> },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct ExportSpecifier {
    pub local: Node<Identifier>,
    pub exported: Node<Identifier>,
}

/// What follows `export default`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ExportDefault {
    Declaration(Box<Stmt>),
    Expression(Box<Expr>),
}

impl NodeKind for ImportSpecifier {}
impl NodeKind for ExportSpecifier {}
