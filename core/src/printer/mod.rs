//! Source regeneration from the AST.
//!
//! The output is not a formatter: it only guarantees that reparsing it
//! gives back the same tree (ignoring spans). Parentheses are inserted
//! wherever precedence or a statement-level ambiguity requires them.

mod print_expr;
mod print_stmt;

use crate::parser::ast::{Expr, ExprKind, Node, Pattern, PatternKind, PatternProperty, Program};

/// Render a program as JavaScript source.
pub fn print(program: &Node<Program>) -> String {
    let mut printer = Printer::default();
    for stmt in &program.kind.body {
        printer.stmt(stmt);
        printer.newline();
    }
    printer.out
}

#[derive(Default)]
struct Printer {
    out: String,
    indent: usize,
    /// Inside a `for` init, where a bare `in` would end the clause.
    no_in: bool,
}

impl Printer {
    fn push(&mut self, text: &str) {
        self.out.push_str(text);
    }

    fn newline(&mut self) {
        self.out.push('\n');
        for _ in 0..self.indent {
            self.out.push_str("  ");
        }
    }

    fn comma_separated<T>(&mut self, items: &[T], mut each: impl FnMut(&mut Self, &T)) {
        for (index, item) in items.iter().enumerate() {
            if index > 0 {
                self.push(", ");
            }
            each(self, item);
        }
    }

    /// `[a, , b]`; a trailing hole needs its own comma.
    fn elements<T>(&mut self, items: &[Option<T>], mut each: impl FnMut(&mut Self, &T)) {
        self.push("[");
        for (index, item) in items.iter().enumerate() {
            if index > 0 {
                self.push(if item.is_some() { ", " } else { "," });
            }
            if let Some(item) = item {
                each(self, item);
            }
        }
        if matches!(items.last(), Some(None)) {
            self.push(",");
        }
        self.push("]");
    }

    fn pattern(&mut self, pattern: &Pattern) {
        match &pattern.kind {
            PatternKind::Identifier { name } => self.push(name),
            PatternKind::ArrayPattern { elements } => {
                self.elements(elements, |p, element| p.pattern(element));
            }
            PatternKind::ObjectPattern { properties } => {
                if properties.is_empty() {
                    self.push("{}");
                    return;
                }
                self.push("{ ");
                self.comma_separated(properties, |p, property| match &property.kind {
                    PatternProperty::ObjectProperty {
                        key,
                        value,
                        computed,
                        shorthand,
                    } => {
                        if !*shorthand {
                            p.property_key(key, *computed);
                            p.push(": ");
                        }
                        p.pattern(value);
                    }
                    PatternProperty::RestElement { argument } => {
                        p.push("...");
                        p.pattern(argument);
                    }
                });
                self.push(" }");
            }
            PatternKind::AssignmentPattern { left, right } => {
                self.pattern(left);
                self.push(" = ");
                self.expr(right, print_expr::ASSIGN);
            }
            PatternKind::RestElement { argument } => {
                self.push("...");
                self.pattern(argument);
            }
            PatternKind::MemberExpression {
                object,
                property,
                computed,
            } => self.member(object, property, *computed),
        }
    }

    fn params(&mut self, params: &[Pattern]) {
        self.push("(");
        self.comma_separated(params, |p, param| p.pattern(param));
        self.push(")");
    }

    fn property_key(&mut self, key: &Expr, computed: bool) {
        if computed {
            self.push("[");
            self.expr(key, print_expr::ASSIGN);
            self.push("]");
        } else {
            self.expr(key, print_expr::PRIMARY);
        }
    }
}

/// Whether printing `expr` first emits `{`, `function` or `class`, which
/// would change its meaning at the start of a statement.
fn starts_ambiguously(expr: &Expr) -> bool {
    match &expr.kind {
        ExprKind::ObjectExpression { .. }
        | ExprKind::FunctionExpression(_)
        | ExprKind::ClassExpression(_) => true,
        ExprKind::CallExpression { callee: first, .. }
        | ExprKind::MemberExpression { object: first, .. }
        | ExprKind::TaggedTemplateExpression { tag: first, .. }
        | ExprKind::BinaryExpression { left: first, .. }
        | ExprKind::LogicalExpression { left: first, .. }
        | ExprKind::ConditionalExpression { test: first, .. } => starts_ambiguously(first),
        ExprKind::UpdateExpression {
            prefix: false,
            argument,
            ..
        } => starts_ambiguously(argument),
        ExprKind::SequenceExpression { expressions } => {
            expressions.first().is_some_and(starts_ambiguously)
        }
        ExprKind::AssignmentExpression { left, .. } => match &left.kind {
            PatternKind::ObjectPattern { .. } => true,
            PatternKind::MemberExpression { object, .. } => starts_ambiguously(object),
            _ => false,
        },
        _ => false,
    }
}
