use super::{Printer, starts_ambiguously};
use crate::parser::ast::{
    ArrowBody, BinaryOperator, BlockStatement, Class, Expr, ExprKind, Function, LogicalOperator,
    MethodKind, Node, ObjectMember, Pattern, UnaryOperator,
};

pub(super) const SEQUENCE: u8 = 1;
pub(super) const ASSIGN: u8 = 2;
const CONDITIONAL: u8 = 3;
const UNARY: u8 = 15;
const POSTFIX: u8 = 16;
const CALL: u8 = 17;
pub(super) const PRIMARY: u8 = 18;

fn binary_precedence(operator: BinaryOperator) -> u8 {
    use BinaryOperator::*;
    match operator {
        BitOr => 6,
        BitXor => 7,
        BitAnd => 8,
        EqEq | NotEq | EqEqEq | NotEqEq => 9,
        Less | LessEq | Greater | GreaterEq | In | Instanceof => 10,
        Shl | Shr | UShr => 11,
        Add | Sub => 12,
        Mul | Div | Rem => 13,
        Exp => 14,
    }
}

fn logical_precedence(operator: LogicalOperator) -> u8 {
    match operator {
        LogicalOperator::Or => 4,
        LogicalOperator::And => 5,
    }
}

fn precedence(expr: &Expr) -> u8 {
    match &expr.kind {
        ExprKind::SequenceExpression { .. } => SEQUENCE,
        ExprKind::AssignmentExpression { .. }
        | ExprKind::ArrowFunctionExpression { .. }
        | ExprKind::YieldExpression { .. }
        | ExprKind::SpreadElement { .. } => ASSIGN,
        ExprKind::ConditionalExpression { .. } => CONDITIONAL,
        ExprKind::LogicalExpression { operator, .. } => logical_precedence(*operator),
        ExprKind::BinaryExpression { operator, .. } => binary_precedence(*operator),
        ExprKind::UnaryExpression { .. } | ExprKind::AwaitExpression { .. } => UNARY,
        ExprKind::UpdateExpression { prefix: true, .. } => UNARY,
        ExprKind::UpdateExpression { prefix: false, .. } => POSTFIX,
        ExprKind::CallExpression { .. }
        | ExprKind::NewExpression { .. }
        | ExprKind::MemberExpression { .. }
        | ExprKind::TaggedTemplateExpression { .. } => CALL,
        _ => PRIMARY,
    }
}

/// A call anywhere in a member chain would be taken as the `new` arguments.
fn has_call(expr: &Expr) -> bool {
    match &expr.kind {
        ExprKind::CallExpression { .. } => true,
        ExprKind::MemberExpression { object, .. } => has_call(object),
        ExprKind::TaggedTemplateExpression { tag, .. } => has_call(tag),
        _ => false,
    }
}

impl Printer {
    /// Print `expr`, parenthesized when it binds looser than `min`.
    pub(super) fn expr(&mut self, expr: &Expr, min: u8) {
        let in_operator = self.no_in
            && matches!(
                expr.kind,
                ExprKind::BinaryExpression {
                    operator: BinaryOperator::In,
                    ..
                }
            );
        if precedence(expr) < min || in_operator {
            let saved = std::mem::replace(&mut self.no_in, false);
            self.push("(");
            self.expr_unparenthesized(expr);
            self.push(")");
            self.no_in = saved;
        } else {
            self.expr_unparenthesized(expr);
        }
    }

    fn expr_unparenthesized(&mut self, expr: &Expr) {
        match &expr.kind {
            ExprKind::Identifier { name } => self.push(name),
            ExprKind::NumericLiteral { extra, .. } | ExprKind::StringLiteral { extra, .. } => {
                self.push(&extra.raw)
            }
            ExprKind::BooleanLiteral { value } => self.push(if *value { "true" } else { "false" }),
            ExprKind::NullLiteral => self.push("null"),
            ExprKind::RegExpLiteral { pattern, flags } => {
                self.push("/");
                self.push(pattern);
                self.push("/");
                self.push(flags);
            }
            ExprKind::TemplateLiteral { quasis, expressions } => {
                self.push("`");
                for (index, quasi) in quasis.iter().enumerate() {
                    self.push(&quasi.kind.value.raw);
                    if let Some(expression) = expressions.get(index) {
                        self.push("${");
                        self.expr(expression, SEQUENCE);
                        self.push("}");
                    }
                }
                self.push("`");
            }
            ExprKind::TaggedTemplateExpression { tag, quasi } => {
                self.expr(tag, CALL);
                self.expr(quasi, PRIMARY);
            }
            ExprKind::ThisExpression => self.push("this"),
            ExprKind::Super => self.push("super"),
            ExprKind::ArrayExpression { elements } => {
                self.elements(elements, |p, element| p.expr(element, ASSIGN));
            }
            ExprKind::ObjectExpression { properties } => self.object(properties),
            ExprKind::FunctionExpression(function) => self.function(function),
            ExprKind::ArrowFunctionExpression {
                params,
                body,
                is_async,
                ..
            } => self.arrow(params, body, *is_async),
            ExprKind::ClassExpression(class) => self.class(class),
            ExprKind::UnaryExpression {
                operator, argument, ..
            } => {
                self.push(operator.as_str());
                if needs_unary_space(*operator, argument) {
                    self.push(" ");
                }
                self.expr(argument, UNARY);
            }
            ExprKind::UpdateExpression {
                operator,
                prefix,
                argument,
            } => {
                if *prefix {
                    self.push(operator.as_str());
                    self.expr(argument, UNARY);
                } else {
                    self.expr(argument, CALL);
                    self.push(operator.as_str());
                }
            }
            ExprKind::BinaryExpression {
                operator,
                left,
                right,
            } => {
                let precedence = binary_precedence(*operator);
                let (left_min, right_min) = if *operator == BinaryOperator::Exp {
                    (POSTFIX, precedence)
                } else {
                    (precedence, precedence + 1)
                };
                self.expr(left, left_min);
                self.push(" ");
                self.push(operator.as_str());
                self.push(" ");
                self.expr(right, right_min);
            }
            ExprKind::LogicalExpression {
                operator,
                left,
                right,
            } => {
                let precedence = logical_precedence(*operator);
                self.expr(left, precedence);
                self.push(" ");
                self.push(operator.as_str());
                self.push(" ");
                self.expr(right, precedence + 1);
            }
            ExprKind::AssignmentExpression {
                operator,
                left,
                right,
            } => {
                self.pattern(left);
                self.push(" ");
                self.push(operator.as_str());
                self.push(" ");
                self.expr(right, ASSIGN);
            }
            ExprKind::ConditionalExpression {
                test,
                consequent,
                alternate,
            } => {
                self.expr(test, CONDITIONAL + 1);
                self.push(" ? ");
                let saved = std::mem::replace(&mut self.no_in, false);
                self.expr(consequent, ASSIGN);
                self.no_in = saved;
                self.push(" : ");
                self.expr(alternate, ASSIGN);
            }
            ExprKind::CallExpression { callee, arguments } => {
                self.expr(callee, CALL);
                self.arguments(arguments);
            }
            ExprKind::NewExpression { callee, arguments } => {
                self.push("new ");
                if has_call(callee) {
                    self.push("(");
                    self.expr(callee, SEQUENCE);
                    self.push(")");
                } else {
                    self.expr(callee, CALL);
                }
                self.arguments(arguments);
            }
            ExprKind::MemberExpression {
                object,
                property,
                computed,
            } => self.member(object, property, *computed),
            ExprKind::SequenceExpression { expressions } => {
                self.comma_separated(expressions, |p, expression| p.expr(expression, ASSIGN));
            }
            ExprKind::YieldExpression { argument, delegate } => {
                self.push(if *delegate { "yield*" } else { "yield" });
                if let Some(argument) = argument {
                    self.push(" ");
                    self.expr(argument, ASSIGN);
                }
            }
            ExprKind::AwaitExpression { argument } => {
                self.push("await ");
                self.expr(argument, UNARY);
            }
            ExprKind::SpreadElement { argument } => {
                self.push("...");
                self.expr(argument, ASSIGN);
            }
        }
    }

    pub(super) fn member(&mut self, object: &Expr, property: &Expr, computed: bool) {
        if !computed && matches!(object.kind, ExprKind::NumericLiteral { .. }) {
            self.push("(");
            self.expr(object, SEQUENCE);
            self.push(")");
        } else {
            self.expr(object, CALL);
        }
        if computed {
            self.push("[");
            let saved = std::mem::replace(&mut self.no_in, false);
            self.expr(property, SEQUENCE);
            self.no_in = saved;
            self.push("]");
        } else {
            self.push(".");
            self.expr(property, PRIMARY);
        }
    }

    fn arguments(&mut self, arguments: &[Expr]) {
        let saved = std::mem::replace(&mut self.no_in, false);
        self.push("(");
        self.comma_separated(arguments, |p, argument| p.expr(argument, ASSIGN));
        self.push(")");
        self.no_in = saved;
    }

    fn object(&mut self, properties: &[Node<ObjectMember>]) {
        if properties.is_empty() {
            self.push("{}");
            return;
        }
        let saved = std::mem::replace(&mut self.no_in, false);
        self.push("{ ");
        self.comma_separated(properties, |p, property| match &property.kind {
            ObjectMember::ObjectProperty {
                key,
                value,
                computed,
                shorthand,
            } => {
                if *shorthand {
                    p.expr(value, ASSIGN);
                } else {
                    p.property_key(key, *computed);
                    p.push(": ");
                    p.expr(value, ASSIGN);
                }
            }
            ObjectMember::ObjectMethod {
                kind,
                key,
                computed,
                params,
                body,
                generator,
                is_async,
            } => p.method(*kind, key, *computed, params, body, *generator, *is_async),
            ObjectMember::SpreadElement { argument } => {
                p.push("...");
                p.expr(argument, ASSIGN);
            }
        });
        self.push(" }");
        self.no_in = saved;
    }

    #[allow(clippy::too_many_arguments)]
    pub(super) fn method(
        &mut self,
        kind: MethodKind,
        key: &Expr,
        computed: bool,
        params: &[Pattern],
        body: &Node<BlockStatement>,
        generator: bool,
        is_async: bool,
    ) {
        match kind {
            MethodKind::Get => self.push("get "),
            MethodKind::Set => self.push("set "),
            MethodKind::Method | MethodKind::Constructor => {}
        }
        if is_async {
            self.push("async ");
        }
        if generator {
            self.push("*");
        }
        self.property_key(key, computed);
        self.params(params);
        self.push(" ");
        self.block(&body.kind.body);
    }

    pub(super) fn function(&mut self, function: &Function) {
        let saved = std::mem::replace(&mut self.no_in, false);
        if function.is_async {
            self.push("async ");
        }
        self.push(if function.generator {
            "function* "
        } else {
            "function "
        });
        if let Some(id) = &function.id {
            self.push(&id.kind.name);
        }
        self.params(&function.params);
        self.push(" ");
        self.block(&function.body.kind.body);
        self.no_in = saved;
    }

    fn arrow(&mut self, params: &[Pattern], body: &ArrowBody, is_async: bool) {
        if is_async {
            self.push("async ");
        }
        self.params(params);
        self.push(" => ");
        match body {
            ArrowBody::Block(block) => {
                let saved = std::mem::replace(&mut self.no_in, false);
                self.block(&block.kind.body);
                self.no_in = saved;
            }
            ArrowBody::Expression(expr) if starts_ambiguously(expr) => {
                let saved = std::mem::replace(&mut self.no_in, false);
                self.push("(");
                self.expr(expr, SEQUENCE);
                self.push(")");
                self.no_in = saved;
            }
            ArrowBody::Expression(expr) => self.expr(expr, ASSIGN),
        }
    }

    pub(super) fn class(&mut self, class: &Class) {
        let saved = std::mem::replace(&mut self.no_in, false);
        self.push("class ");
        if let Some(id) = &class.id {
            self.push(&id.kind.name);
            self.push(" ");
        }
        if let Some(super_class) = &class.super_class {
            self.push("extends ");
            self.expr(super_class, CALL);
            self.push(" ");
        }
        self.push("{");
        self.indent += 1;
        for method in &class.body.kind.body {
            self.newline();
            let method = &method.kind;
            if method.is_static {
                self.push("static ");
            }
            self.method(
                method.kind,
                &method.key,
                method.computed,
                &method.params,
                &method.body,
                method.generator,
                method.is_async,
            );
        }
        self.indent -= 1;
        if !class.body.kind.body.is_empty() {
            self.newline();
        }
        self.push("}");
        self.no_in = saved;
    }
}

/// `- -x` and `+ +x` must not fuse into `--`/`++`; word operators need a space.
fn needs_unary_space(operator: UnaryOperator, argument: &Expr) -> bool {
    let sign = match operator {
        UnaryOperator::Minus => "-",
        UnaryOperator::Plus => "+",
        UnaryOperator::Typeof | UnaryOperator::Void | UnaryOperator::Delete => return true,
        UnaryOperator::Not | UnaryOperator::BitNot => return false,
    };
    match &argument.kind {
        ExprKind::UnaryExpression { operator, .. } => operator.as_str() == sign,
        ExprKind::UpdateExpression {
            operator,
            prefix: true,
            ..
        } => operator.as_str().starts_with(sign),
        _ => false,
    }
}
