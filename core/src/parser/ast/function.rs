use serde::Serialize;

use super::pattern::Pattern;
use super::statement::BlockStatement;
use super::{Identifier, Node};

/// Shared payload of function declarations and expressions.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Function {
    pub id: Option<Node<Identifier>>,
    pub params: Vec<Pattern>,
    pub body: Node<BlockStatement>,
    pub generator: bool,
    #[serde(rename = "async")]
    pub is_async: bool,
}
