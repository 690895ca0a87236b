use serde::Serialize;

use super::class::Class;
use super::expression::Expr;
use super::function::Function;
use super::module::{ExportDefault, ExportSpecifier, ImportSpecifier};
use super::pattern::Pattern;
use super::{Identifier, Node, NodeKind};

pub type Stmt = Node<StmtKind>;

/// Statement AST nodes.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all_fields = "camelCase")]
pub enum StmtKind {
    ExpressionStatement {
        expression: Box<Expr>,
    },
    VariableDeclaration(VariableDeclaration),
    EmptyStatement,
    BlockStatement {
        body: Vec<Stmt>,
    },
    IfStatement {
        test: Box<Expr>,
        consequent: Box<Stmt>,
        alternate: Option<Box<Stmt>>,
    },
    ForStatement {
        init: Option<ForInit>,
        test: Option<Box<Expr>>,
        update: Option<Box<Expr>>,
        body: Box<Stmt>,
    },
    ForInStatement {
        left: ForLeft,
        right: Box<Expr>,
        body: Box<Stmt>,
    },
    ForOfStatement {
        left: ForLeft,
        right: Box<Expr>,
        body: Box<Stmt>,
    },
    WhileStatement {
        test: Box<Expr>,
        body: Box<Stmt>,
    },
    DoWhileStatement {
        body: Box<Stmt>,
        test: Box<Expr>,
    },
    ReturnStatement {
        argument: Option<Box<Expr>>,
    },
    BreakStatement {
        label: Option<Node<Identifier>>,
    },
    ContinueStatement {
        label: Option<Node<Identifier>>,
    },
    ThrowStatement {
        argument: Box<Expr>,
    },
    TryStatement {
        block: Node<BlockStatement>,
        handler: Option<Node<CatchClause>>,
        finalizer: Option<Node<BlockStatement>>,
    },
    SwitchStatement {
        discriminant: Box<Expr>,
        cases: Vec<Node<SwitchCase>>,
    },
    LabeledStatement {
        label: Node<Identifier>,
        body: Box<Stmt>,
    },
    WithStatement {
        object: Box<Expr>,
        body: Box<Stmt>,
    },
    DebuggerStatement,
    FunctionDeclaration(Function),
    ClassDeclaration(Class),
    ImportDeclaration {
        specifiers: Vec<Node<ImportSpecifier>>,
        source: Box<Expr>,
    },
    ExportNamedDeclaration {
        declaration: Option<Box<Stmt>>,
        specifiers: Vec<Node<ExportSpecifier>>,
        source: Option<Box<Expr>>,
    },
    ExportDefaultDeclaration {
        declaration: ExportDefault,
    },
    ExportAllDeclaration {
        source: Box<Expr>,
    },
}

/// A `{ ... }` body owned by functions, `try` and `catch`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct BlockStatement {
    pub body: Vec<Stmt>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VariableDeclaration {
    pub kind: VarKind,
    pub declarations: Vec<Node<VariableDeclarator>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum VarKind {
    Var,
    Let,
    Const,
}

impl VarKind {
    pub fn as_str(self) -> &'static str {
        match self {
            VarKind::Var => "var",
            VarKind::Let => "let",
            VarKind::Const => "const",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct VariableDeclarator {
    pub id: Pattern,
    pub init: Option<Expr>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct SwitchCase {
    pub test: Option<Expr>,
    pub consequent: Vec<Stmt>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type")]
pub struct CatchClause {
    pub param: Pattern,
    pub body: Node<BlockStatement>,
}

/// The first clause of a C-style `for`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ForInit {
    Declaration(Box<Stmt>),
    Expression(Box<Expr>),
}

/// The left side of `for-in` and `for-of`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ForLeft {
    Declaration(Box<Stmt>),
    Pattern(Box<Pattern>),
}

impl NodeKind for StmtKind {}
impl NodeKind for BlockStatement {}
impl NodeKind for VariableDeclarator {}
impl NodeKind for SwitchCase {}
impl NodeKind for CatchClause {}
