use serde::Serialize;

use super::expression::{Expr, MethodKind};
use super::pattern::Pattern;
use super::statement::BlockStatement;
use super::{Identifier, Node, NodeKind};

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Class {
    pub id: Option<Node<Identifier>>,
    pub super_class: Option<Box<Expr>>,
    pub body: Node<ClassBody>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct ClassBody {
    pub body: Vec<Node<ClassMethod>>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct ClassMethod {
    pub kind: MethodKind,
    pub key: Box<Expr>,
    pub computed: bool,
    #[serde(rename = "static")]
    pub is_static: bool,
    pub params: Vec<Pattern>,
    pub body: Node<BlockStatement>,
    pub generator: bool,
    #[serde(rename = "async")]
    pub is_async: bool,
}

impl NodeKind for ClassBody {}
impl NodeKind for ClassMethod {}
