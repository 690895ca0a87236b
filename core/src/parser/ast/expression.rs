use serde::Serialize;

use super::class::Class;
use super::function::Function;
use super::literal::{Extra, TemplateElement, serialize_number};
use super::pattern::Pattern;
use super::statement::BlockStatement;
use super::{Node, NodeKind};

pub type Expr = Node<ExprKind>;

/// Expression AST nodes.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all_fields = "camelCase")]
pub enum ExprKind {
    Identifier {
        name: String,
    },
    NumericLiteral {
        #[serde(serialize_with = "serialize_number")]
        value: f64,
        extra: Extra,
    },
    StringLiteral {
        value: String,
        extra: Extra,
    },
    BooleanLiteral {
        value: bool,
    },
    NullLiteral,
    RegExpLiteral {
        pattern: String,
        flags: String,
    },
    TemplateLiteral {
        quasis: Vec<Node<TemplateElement>>,
        expressions: Vec<Expr>,
    },
    TaggedTemplateExpression {
        tag: Box<Expr>,
        quasi: Box<Expr>,
    },
    ThisExpression,
    Super,
    ArrayExpression {
        elements: Vec<Option<Expr>>,
    },
    ObjectExpression {
        properties: Vec<Node<ObjectMember>>,
    },
    FunctionExpression(Function),
    ArrowFunctionExpression {
        params: Vec<Pattern>,
        body: ArrowBody,
        #[serde(rename = "async")]
        is_async: bool,
        expression: bool,
    },
    ClassExpression(Class),
    UnaryExpression {
        operator: UnaryOperator,
        prefix: bool,
        argument: Box<Expr>,
    },
    UpdateExpression {
        operator: UpdateOperator,
        prefix: bool,
        argument: Box<Expr>,
    },
    BinaryExpression {
        operator: BinaryOperator,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    LogicalExpression {
        operator: LogicalOperator,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    AssignmentExpression {
        operator: AssignmentOperator,
        left: Box<Pattern>,
        right: Box<Expr>,
    },
    ConditionalExpression {
        test: Box<Expr>,
        consequent: Box<Expr>,
        alternate: Box<Expr>,
    },
    CallExpression {
        callee: Box<Expr>,
        arguments: Vec<Expr>,
    },
    NewExpression {
        callee: Box<Expr>,
        arguments: Vec<Expr>,
    },
    MemberExpression {
        object: Box<Expr>,
        property: Box<Expr>,
        computed: bool,
    },
    SequenceExpression {
        expressions: Vec<Expr>,
    },
    YieldExpression {
        argument: Option<Box<Expr>>,
        delegate: bool,
    },
    AwaitExpression {
        argument: Box<Expr>,
    },
    SpreadElement {
        argument: Box<Expr>,
    },
}

impl ExprKind {
    pub fn identifier(name: impl Into<String>) -> Self {
        ExprKind::Identifier { name: name.into() }
    }

    pub fn is_arrow(&self) -> bool {
        matches!(self, ExprKind::ArrowFunctionExpression { .. })
    }
}

/// Arrow function body: a block or a bare expression.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ArrowBody {
    Block(Node<BlockStatement>),
    Expression(Box<Expr>),
}

/// Members of an object literal.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all_fields = "camelCase")]
pub enum ObjectMember {
    ObjectProperty {
        key: Box<Expr>,
        value: Box<Expr>,
        computed: bool,
        shorthand: bool,
    },
    ObjectMethod {
        kind: MethodKind,
        key: Box<Expr>,
        computed: bool,
        params: Vec<Pattern>,
        body: Node<BlockStatement>,
        generator: bool,
        #[serde(rename = "async")]
        is_async: bool,
    },
    SpreadElement {
        argument: Box<Expr>,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MethodKind {
    Constructor,
    Method,
    Get,
    Set,
}

macro_rules! operator_enum {
    ($(#[$meta:meta])* $name:ident { $($variant:ident => $text:literal),+ $(,)? }) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
        pub enum $name {
            $(
                #[serde(rename = $text)]
                $variant,
            )+
        }

        impl $name {
            pub fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $text,)+
                }
            }
        }
    };
}

operator_enum!(
    /// Prefix operators that build `UnaryExpression`.
    UnaryOperator {
        Minus => "-",
        Plus => "+",
        Not => "!",
        BitNot => "~",
        Typeof => "typeof",
        Void => "void",
        Delete => "delete",
    }
);

operator_enum!(UpdateOperator {
    Increment => "++",
    Decrement => "--",
});

operator_enum!(
    /// Operators that build `BinaryExpression`.
    BinaryOperator {
        EqEq => "==",
        NotEq => "!=",
        EqEqEq => "===",
        NotEqEq => "!==",
        Less => "<",
        LessEq => "<=",
        Greater => ">",
        GreaterEq => ">=",
        Shl => "<<",
        Shr => ">>",
        UShr => ">>>",
        Add => "+",
        Sub => "-",
        Mul => "*",
        Div => "/",
        Rem => "%",
        Exp => "**",
        BitOr => "|",
        BitXor => "^",
        BitAnd => "&",
        In => "in",
        Instanceof => "instanceof",
    }
);

operator_enum!(LogicalOperator {
    Or => "||",
    And => "&&",
});

operator_enum!(
    /// `=` and the compound assignment operators.
    AssignmentOperator {
        Assign => "=",
        AddAssign => "+=",
        SubAssign => "-=",
        MulAssign => "*=",
        DivAssign => "/=",
        RemAssign => "%=",
        ExpAssign => "**=",
        ShlAssign => "<<=",
        ShrAssign => ">>=",
        UShrAssign => ">>>=",
        BitOrAssign => "|=",
        BitXorAssign => "^=",
        BitAndAssign => "&=",
    }
);

impl NodeKind for ExprKind {
    fn identifier_name(&self) -> Option<&str> {
        match self {
            ExprKind::Identifier { name } => Some(name),
            _ => None,
        }
    }
}

impl NodeKind for ObjectMember {}
