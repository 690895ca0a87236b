use super::print_expr::{ASSIGN, SEQUENCE};
use super::{Printer, starts_ambiguously};
use crate::parser::ast::{
    ExportDefault, Expr, ForInit, ForLeft, ImportSpecifier, Node, Stmt, StmtKind,
    VariableDeclaration,
};

impl Printer {
    pub(super) fn stmt(&mut self, stmt: &Stmt) {
        match &stmt.kind {
            StmtKind::ExpressionStatement { expression } => {
                self.statement_expression(expression);
                self.push(";");
            }
            StmtKind::VariableDeclaration(declaration) => {
                self.var_declaration(declaration);
                self.push(";");
            }
            StmtKind::EmptyStatement => self.push(";"),
            StmtKind::BlockStatement { body } => self.block(body),
            StmtKind::IfStatement {
                test,
                consequent,
                alternate,
            } => {
                self.push("if (");
                self.expr(test, SEQUENCE);
                self.push(") ");
                self.stmt(consequent);
                if let Some(alternate) = alternate {
                    self.push(" else ");
                    self.stmt(alternate);
                }
            }
            StmtKind::ForStatement {
                init,
                test,
                update,
                body,
            } => {
                self.push("for (");
                self.no_in = true;
                match init {
                    Some(ForInit::Declaration(declaration)) => self.for_declaration(declaration),
                    Some(ForInit::Expression(expr)) => self.expr(expr, SEQUENCE),
                    None => {}
                }
                self.no_in = false;
                self.push(";");
                if let Some(test) = test {
                    self.push(" ");
                    self.expr(test, SEQUENCE);
                }
                self.push(";");
                if let Some(update) = update {
                    self.push(" ");
                    self.expr(update, SEQUENCE);
                }
                self.push(") ");
                self.stmt(body);
            }
            StmtKind::ForInStatement { left, right, body } => {
                self.for_in_of(left, "in", right, SEQUENCE, body)
            }
            StmtKind::ForOfStatement { left, right, body } => {
                self.for_in_of(left, "of", right, ASSIGN, body)
            }
            StmtKind::WhileStatement { test, body } => {
                self.push("while (");
                self.expr(test, SEQUENCE);
                self.push(") ");
                self.stmt(body);
            }
            StmtKind::DoWhileStatement { body, test } => {
                self.push("do ");
                self.stmt(body);
                self.push(" while (");
                self.expr(test, SEQUENCE);
                self.push(");");
            }
            StmtKind::ReturnStatement { argument } => {
                self.keyword_with_argument("return", argument.as_deref())
            }
            StmtKind::BreakStatement { label } | StmtKind::ContinueStatement { label } => {
                self.push(if matches!(stmt.kind, StmtKind::BreakStatement { .. }) {
                    "break"
                } else {
                    "continue"
                });
                if let Some(label) = label {
                    self.push(" ");
                    self.push(&label.kind.name);
                }
                self.push(";");
            }
            StmtKind::ThrowStatement { argument } => {
                self.keyword_with_argument("throw", Some(argument))
            }
            StmtKind::TryStatement {
                block,
                handler,
                finalizer,
            } => {
                self.push("try ");
                self.block(&block.kind.body);
                if let Some(handler) = handler {
                    self.push(" catch (");
                    self.pattern(&handler.kind.param);
                    self.push(") ");
                    self.block(&handler.kind.body.kind.body);
                }
                if let Some(finalizer) = finalizer {
                    self.push(" finally ");
                    self.block(&finalizer.kind.body);
                }
            }
            StmtKind::SwitchStatement {
                discriminant,
                cases,
            } => {
                self.push("switch (");
                self.expr(discriminant, SEQUENCE);
                self.push(") {");
                self.indent += 1;
                for case in cases {
                    self.newline();
                    match &case.kind.test {
                        Some(test) => {
                            self.push("case ");
                            self.expr(test, SEQUENCE);
                            self.push(":");
                        }
                        None => self.push("default:"),
                    }
                    self.indent += 1;
                    for stmt in &case.kind.consequent {
                        self.newline();
                        self.stmt(stmt);
                    }
                    self.indent -= 1;
                }
                self.indent -= 1;
                self.newline();
                self.push("}");
            }
            StmtKind::LabeledStatement { label, body } => {
                self.push(&label.kind.name);
                self.push(": ");
                self.stmt(body);
            }
            StmtKind::WithStatement { object, body } => {
                self.push("with (");
                self.expr(object, SEQUENCE);
                self.push(") ");
                self.stmt(body);
            }
            StmtKind::DebuggerStatement => self.push("debugger;"),
            StmtKind::FunctionDeclaration(function) => self.function(function),
            StmtKind::ClassDeclaration(class) => self.class(class),
            StmtKind::ImportDeclaration { specifiers, source } => {
                self.import(specifiers, source)
            }
            StmtKind::ExportNamedDeclaration {
                declaration,
                specifiers,
                source,
            } => {
                self.push("export ");
                if let Some(declaration) = declaration {
                    self.stmt(declaration);
                    return;
                }
                self.push("{ ");
                self.comma_separated(specifiers, |p, specifier| {
                    let specifier = &specifier.kind;
                    p.push(&specifier.local.kind.name);
                    if specifier.exported.kind.name != specifier.local.kind.name {
                        p.push(" as ");
                        p.push(&specifier.exported.kind.name);
                    }
                });
                self.push(" }");
                if let Some(source) = source {
                    self.push(" from ");
                    self.expr(source, SEQUENCE);
                }
                self.push(";");
            }
            StmtKind::ExportDefaultDeclaration { declaration } => {
                self.push("export default ");
                match declaration {
                    ExportDefault::Declaration(declaration) => self.stmt(declaration),
                    ExportDefault::Expression(expr) => {
                        if starts_ambiguously(expr) {
                            self.push("(");
                            self.expr(expr, SEQUENCE);
                            self.push(")");
                        } else {
                            self.expr(expr, ASSIGN);
                        }
                        self.push(";");
                    }
                }
            }
            StmtKind::ExportAllDeclaration { source } => {
                self.push("export * from ");
                self.expr(source, SEQUENCE);
                self.push(";");
            }
        }
    }

    pub(super) fn block(&mut self, body: &[Stmt]) {
        if body.is_empty() {
            self.push("{}");
            return;
        }
        self.push("{");
        self.indent += 1;
        for stmt in body {
            self.newline();
            self.stmt(stmt);
        }
        self.indent -= 1;
        self.newline();
        self.push("}");
    }

    fn statement_expression(&mut self, expr: &Expr) {
        if starts_ambiguously(expr) {
            self.push("(");
            self.expr(expr, SEQUENCE);
            self.push(")");
        } else {
            self.expr(expr, SEQUENCE);
        }
    }

    fn keyword_with_argument(&mut self, keyword: &str, argument: Option<&Expr>) {
        self.push(keyword);
        if let Some(argument) = argument {
            self.push(" ");
            self.expr(argument, SEQUENCE);
        }
        self.push(";");
    }

    fn var_declaration(&mut self, declaration: &VariableDeclaration) {
        self.push(declaration.kind.as_str());
        self.push(" ");
        self.comma_separated(&declaration.declarations, |p, declarator| {
            p.pattern(&declarator.kind.id);
            if let Some(init) = &declarator.kind.init {
                p.push(" = ");
                p.expr(init, ASSIGN);
            }
        });
    }

    /// A declaration inside a `for` head, without its `;`.
    fn for_declaration(&mut self, declaration: &Stmt) {
        if let StmtKind::VariableDeclaration(declaration) = &declaration.kind {
            self.var_declaration(declaration);
        }
    }

    fn for_in_of(&mut self, left: &ForLeft, keyword: &str, right: &Expr, min: u8, body: &Stmt) {
        self.push("for (");
        self.no_in = true;
        match left {
            ForLeft::Declaration(declaration) => self.for_declaration(declaration),
            ForLeft::Pattern(pattern) => self.pattern(pattern),
        }
        self.no_in = false;
        self.push(" ");
        self.push(keyword);
        self.push(" ");
        self.expr(right, min);
        self.push(") ");
        self.stmt(body);
    }

    fn import(&mut self, specifiers: &[Node<ImportSpecifier>], source: &Expr) {
        self.push("import ");
        let mut named = Vec::new();
        let mut wrote_binding = false;
        for specifier in specifiers {
            match &specifier.kind {
                ImportSpecifier::ImportDefaultSpecifier { local } => {
                    self.push(&local.kind.name);
                    wrote_binding = true;
                }
                ImportSpecifier::ImportNamespaceSpecifier { local } => {
                    if wrote_binding {
                        self.push(", ");
                    }
                    self.push("* as ");
                    self.push(&local.kind.name);
                    wrote_binding = true;
                }
                ImportSpecifier::ImportSpecifier { imported, local } => {
                    named.push((imported, local));
                }
            }
        }
        if !named.is_empty() {
            if wrote_binding {
                self.push(", ");
            }
            self.push("{ ");
            self.comma_separated(&named, |p, (imported, local)| {
                p.push(&imported.kind.name);
                if imported.kind.name != local.kind.name {
                    p.push(" as ");
                    p.push(&local.kind.name);
                }
            });
            self.push(" }");
            wrote_binding = true;
        }
        if wrote_binding {
            self.push(" from ");
        }
        self.expr(source, SEQUENCE);
        self.push(";");
    }
}
