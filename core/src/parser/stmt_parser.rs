use super::ast::{
    BlockStatement, CatchClause, Expr, ExprKind, Identifier, Node, PatternKind, Stmt, StmtKind,
    VarKind, VariableDeclaration, VariableDeclarator,
};
use super::{LabelKind, LabelScope, Parser};
use crate::errors::ParseError;
use crate::lexer::token::{Span, TokenKind};

impl Parser<'_> {
    /// Statement at program level, where module declarations are allowed.
    pub(super) fn parse_top_level_statement(&mut self) -> Result<Stmt, ParseError> {
        match self.current.kind {
            TokenKind::Import | TokenKind::Export if self.options.is_module() => {
                self.parse_module_item()
            }
            _ => self.parse_statement(),
        }
    }

    pub(super) fn parse_statement(&mut self) -> Result<Stmt, ParseError> {
        self.nested(Self::parse_statement_level)
    }

    fn parse_statement_level(&mut self) -> Result<Stmt, ParseError> {
        let start = self.start();
        match &self.current.kind {
            TokenKind::LeftBrace => {
                let block = self.parse_block()?;
                Ok(Node::new(
                    StmtKind::BlockStatement {
                        body: block.kind.body,
                    },
                    block.span,
                ))
            }
            TokenKind::Semicolon => {
                self.advance()?;
                Ok(self.finish(start, StmtKind::EmptyStatement))
            }
            TokenKind::Var | TokenKind::Let | TokenKind::Const => {
                let declaration = self.parse_var_declaration(false)?;
                self.consume_stmt_terminator()?;
                Ok(self.finish(start, declaration.kind))
            }
            TokenKind::Function => self.parse_function_declaration(start, false, true),
            TokenKind::Class => {
                let class = self.parse_class(true)?;
                Ok(self.finish(start, StmtKind::ClassDeclaration(class)))
            }
            TokenKind::If => self.parse_if(),
            TokenKind::For => self.parse_for(),
            TokenKind::While => self.parse_while(),
            TokenKind::Do => self.parse_do_while(),
            TokenKind::Return => self.parse_return(),
            TokenKind::Break | TokenKind::Continue => self.parse_break_continue(),
            TokenKind::Throw => self.parse_throw(),
            TokenKind::Try => self.parse_try(),
            TokenKind::Switch => self.parse_switch(),
            TokenKind::With => self.parse_with(),
            TokenKind::Debugger => {
                self.advance()?;
                self.consume_stmt_terminator()?;
                Ok(self.finish(start, StmtKind::DebuggerStatement))
            }
            TokenKind::Import | TokenKind::Export => Err(self.error_at(
                "`import` and `export` may only appear at the top level of a module",
                start,
            )),
            TokenKind::Enum => Err(self.error_at("`enum` is a reserved word", start)),
            _ if self.check_ident("async") => {
                let next = self.peek()?;
                if next.kind == TokenKind::Function && !next.newline_before {
                    self.advance()?;
                    self.parse_function_declaration(start, true, true)
                } else {
                    self.parse_expression_statement()
                }
            }
            _ => self.parse_expression_statement(),
        }
    }

    /// Body of `if`, loops and labels: no lexical declarations there.
    pub(super) fn parse_sub_statement(&mut self) -> Result<Stmt, ParseError> {
        if matches!(
            self.current.kind,
            TokenKind::Let | TokenKind::Const | TokenKind::Class
        ) {
            return Err(self.error_at(
                "lexical declaration cannot appear in a single-statement context",
                self.current.span,
            ));
        }
        self.parse_statement()
    }

    pub(super) fn parse_block(&mut self) -> Result<Node<BlockStatement>, ParseError> {
        let start = self.start();
        self.expect(&TokenKind::LeftBrace)?;
        let mut body = Vec::new();
        while !self.check(&TokenKind::RightBrace) {
            if self.check(&TokenKind::Eof) {
                return Err(self.unexpected());
            }
            body.push(self.parse_statement()?);
        }
        self.expect(&TokenKind::RightBrace)?;
        Ok(self.finish(start, BlockStatement { body }))
    }

    /// Function declaration; `start` covers a consumed `async`.
    pub(super) fn parse_function_declaration(
        &mut self,
        start: Span,
        is_async: bool,
        id_required: bool,
    ) -> Result<Stmt, ParseError> {
        let function = self.parse_function(is_async, id_required)?;
        Ok(self.finish(start, StmtKind::FunctionDeclaration(function)))
    }

    /// `var`/`let`/`const` with its declarators, without the terminator.
    /// Inside a `for` head missing initializers are checked by the caller.
    pub(super) fn parse_var_declaration(&mut self, in_for: bool) -> Result<Stmt, ParseError> {
        let start = self.start();
        let kind = match self.current.kind {
            TokenKind::Var => VarKind::Var,
            TokenKind::Let => VarKind::Let,
            TokenKind::Const => VarKind::Const,
            _ => return Err(self.expected("variable declaration")),
        };
        self.advance()?;

        let mut declarations = Vec::new();
        loop {
            let decl_start = self.start();
            let id = self.parse_binding_target()?;
            let init = if self.eat(&TokenKind::Assign)? {
                Some(self.parse_assign(false)?)
            } else {
                None
            };
            let declarator = self.finish(decl_start, VariableDeclarator { id, init });
            if !in_for {
                self.check_initializer(kind, &declarator)?;
            }
            declarations.push(declarator);
            if !self.eat(&TokenKind::Comma)? {
                break;
            }
        }
        Ok(self.finish(
            start,
            StmtKind::VariableDeclaration(VariableDeclaration { kind, declarations }),
        ))
    }

    pub(super) fn check_initializer(
        &self,
        kind: VarKind,
        declarator: &Node<VariableDeclarator>,
    ) -> Result<(), ParseError> {
        if declarator.kind.init.is_some() {
            return Ok(());
        }
        if kind == VarKind::Const {
            return Err(self.error_at("missing initializer in const declaration", declarator.span));
        }
        if !matches!(declarator.kind.id.kind, PatternKind::Identifier { .. }) {
            return Err(self.error_at(
                "missing initializer in destructuring declaration",
                declarator.span,
            ));
        }
        Ok(())
    }

    fn parse_if(&mut self) -> Result<Stmt, ParseError> {
        let start = self.start();
        self.expect(&TokenKind::If)?;
        let test = self.parse_paren_expression()?;
        let consequent = self.parse_sub_statement()?;
        let alternate = if self.eat(&TokenKind::Else)? {
            Some(Box::new(self.parse_sub_statement()?))
        } else {
            None
        };
        Ok(self.finish(
            start,
            StmtKind::IfStatement {
                test: Box::new(test),
                consequent: Box::new(consequent),
                alternate,
            },
        ))
    }

    /// `( expression )` after `if`, `while`, `switch` and `with`.
    pub(super) fn parse_paren_expression(&mut self) -> Result<Expr, ParseError> {
        self.expect(&TokenKind::LeftParen)?;
        let expr = self.with_in_allowed(|p| p.parse_expression())?;
        self.expect(&TokenKind::RightParen)?;
        Ok(expr)
    }

    fn parse_return(&mut self) -> Result<Stmt, ParseError> {
        let start = self.start();
        if !self.context.in_function && !self.options.allow_return_outside_function {
            return Err(self.error_at("`return` outside of function", start));
        }
        self.advance()?;
        let argument = if self.at_statement_end() {
            None
        } else {
            Some(Box::new(self.parse_expression()?))
        };
        self.consume_stmt_terminator()?;
        Ok(self.finish(start, StmtKind::ReturnStatement { argument }))
    }

    fn parse_break_continue(&mut self) -> Result<Stmt, ParseError> {
        let start = self.start();
        let is_break = self.check(&TokenKind::Break);
        self.advance()?;

        let label = if !self.current.newline_before && matches!(self.current.kind, TokenKind::Ident(_))
        {
            Some(self.parse_binding_identifier()?)
        } else {
            None
        };

        let valid = match &label {
            Some(label) => self.labels.iter().any(|scope| {
                scope.name.as_deref() == Some(label.kind.name.as_str())
                    && (is_break || scope.kind == LabelKind::Loop)
            }),
            None => self.labels.iter().any(|scope| {
                scope.name.is_none() && (scope.kind == LabelKind::Loop || is_break)
            }),
        };
        if !valid {
            let keyword = if is_break { "break" } else { "continue" };
            let message = match &label {
                Some(label) => format!("unknown label `{}` for `{keyword}`", label.kind.name),
                None if is_break => "`break` must be inside a loop or switch".to_string(),
                None => "`continue` must be inside a loop".to_string(),
            };
            return Err(self.error_at(message, start));
        }

        self.consume_stmt_terminator()?;
        Ok(self.finish(
            start,
            if is_break {
                StmtKind::BreakStatement { label }
            } else {
                StmtKind::ContinueStatement { label }
            },
        ))
    }

    fn parse_throw(&mut self) -> Result<Stmt, ParseError> {
        let start = self.start();
        self.advance()?;
        if self.current.newline_before {
            return Err(self.error_at("illegal newline after `throw`", self.current.span));
        }
        let argument = self.parse_expression()?;
        self.consume_stmt_terminator()?;
        Ok(self.finish(
            start,
            StmtKind::ThrowStatement {
                argument: Box::new(argument),
            },
        ))
    }

    fn parse_try(&mut self) -> Result<Stmt, ParseError> {
        let start = self.start();
        self.expect(&TokenKind::Try)?;
        let block = self.parse_block()?;

        let handler = if self.check(&TokenKind::Catch) {
            let catch_start = self.start();
            self.advance()?;
            self.expect(&TokenKind::LeftParen)?;
            let param = self.parse_binding_target()?;
            self.expect(&TokenKind::RightParen)?;
            let body = self.parse_block()?;
            Some(self.finish(catch_start, CatchClause { param, body }))
        } else {
            None
        };

        let finalizer = if self.eat(&TokenKind::Finally)? {
            Some(self.parse_block()?)
        } else {
            None
        };

        if handler.is_none() && finalizer.is_none() {
            return Err(self.error_at("missing `catch` or `finally` after `try`", start));
        }
        Ok(self.finish(
            start,
            StmtKind::TryStatement {
                block,
                handler,
                finalizer,
            },
        ))
    }

    fn parse_with(&mut self) -> Result<Stmt, ParseError> {
        let start = self.start();
        self.expect(&TokenKind::With)?;
        let object = self.parse_paren_expression()?;
        let body = self.parse_sub_statement()?;
        Ok(self.finish(
            start,
            StmtKind::WithStatement {
                object: Box::new(object),
                body: Box::new(body),
            },
        ))
    }

    /// Expression statement, or a labeled statement when an identifier
    /// is followed by `:`.
    fn parse_expression_statement(&mut self) -> Result<Stmt, ParseError> {
        let start = self.start();
        let starts_with_ident = matches!(self.current.kind, TokenKind::Ident(_));
        let expr = self.parse_expression()?;

        if starts_with_ident && expr.span == start && self.check(&TokenKind::Colon) {
            if let ExprKind::Identifier { name } = &expr.kind {
                let label = Node::new(Identifier { name: name.clone() }, expr.span);
                return self.parse_labeled(start, label);
            }
        }

        self.consume_stmt_terminator()?;
        Ok(self.finish(
            start,
            StmtKind::ExpressionStatement {
                expression: Box::new(expr),
            },
        ))
    }

    fn parse_labeled(
        &mut self,
        start: Span,
        label: Node<Identifier>,
    ) -> Result<Stmt, ParseError> {
        self.expect(&TokenKind::Colon)?;
        if self
            .labels
            .iter()
            .any(|scope| scope.name.as_deref() == Some(label.kind.name.as_str()))
        {
            return Err(self.error_at(
                format!("label `{}` has already been declared", label.kind.name),
                label.span,
            ));
        }

        let kind = if matches!(
            self.current.kind,
            TokenKind::For | TokenKind::While | TokenKind::Do
        ) {
            LabelKind::Loop
        } else {
            LabelKind::Plain
        };
        // `a: b: while (...)` makes both labels loop labels
        let body_start = self.current.span.start;
        for scope in self.labels.iter_mut().rev() {
            if scope.name.is_none() || scope.body_start != start.start {
                break;
            }
            scope.body_start = body_start;
            scope.kind = kind;
        }

        self.labels.push(LabelScope {
            name: Some(label.kind.name.clone()),
            kind,
            body_start,
        });
        let body = self.parse_sub_statement();
        self.labels.pop();
        let body = body?;

        Ok(self.finish(
            start,
            StmtKind::LabeledStatement {
                label,
                body: Box::new(body),
            },
        ))
    }

    /// Run `f` with an implicit loop or switch scope for `break`/`continue`.
    pub(super) fn with_breakable<T>(
        &mut self,
        kind: LabelKind,
        f: impl FnOnce(&mut Self) -> Result<T, ParseError>,
    ) -> Result<T, ParseError> {
        self.labels.push(LabelScope {
            name: None,
            kind,
            body_start: self.current.span.start,
        });
        let result = f(self);
        self.labels.pop();
        result
    }
}
