use super::ast::{
    ExportDefault, ExportSpecifier, Expr, Identifier, ImportSpecifier, Node, Stmt, StmtKind,
};
use super::Parser;
use crate::errors::ParseError;
use crate::lexer::token::{Span, TokenKind};

impl Parser<'_> {
    /// `import` or `export` at the top level of a module.
    pub(super) fn parse_module_item(&mut self) -> Result<Stmt, ParseError> {
        match self.current.kind {
            TokenKind::Import => self.parse_import(),
            TokenKind::Export => self.parse_export(),
            _ => Err(self.expected("`import` or `export`")),
        }
    }

    fn parse_import(&mut self) -> Result<Stmt, ParseError> {
        let start = self.start();
        self.expect(&TokenKind::Import)?;

        let mut specifiers = Vec::new();
        if !matches!(self.current.kind, TokenKind::String(_)) {
            if matches!(self.current.kind, TokenKind::Ident(_)) {
                let local = self.parse_binding_identifier()?;
                let span = local.span;
                specifiers.push(Node::new(
                    ImportSpecifier::ImportDefaultSpecifier { local },
                    span,
                ));
                if self.eat(&TokenKind::Comma)?
                    && !matches!(self.current.kind, TokenKind::Star | TokenKind::LeftBrace)
                {
                    return Err(self.expected("`*` or `{`"));
                }
            }

            if self.check(&TokenKind::Star) {
                let spec_start = self.start();
                self.advance()?;
                self.expect_ident("as")?;
                let local = self.parse_binding_identifier()?;
                specifiers.push(self.finish(
                    spec_start,
                    ImportSpecifier::ImportNamespaceSpecifier { local },
                ));
            } else if self.check(&TokenKind::LeftBrace) {
                self.parse_import_specifiers(&mut specifiers)?;
            } else if specifiers.is_empty() {
                return Err(self.unexpected());
            }

            self.expect_ident("from")?;
        }

        let source = self.parse_module_source()?;
        self.consume_stmt_terminator()?;
        Ok(self.finish(
            start,
            StmtKind::ImportDeclaration {
                specifiers,
                source: Box::new(source),
            },
        ))
    }

    fn parse_import_specifiers(
        &mut self,
        specifiers: &mut Vec<Node<ImportSpecifier>>,
    ) -> Result<(), ParseError> {
        self.expect(&TokenKind::LeftBrace)?;
        while !self.check(&TokenKind::RightBrace) {
            let spec_start = self.start();
            let is_keyword = self.current.kind.is_keyword();
            let imported = self.parse_identifier_name()?;
            let local = if self.check_ident("as") {
                self.advance()?;
                self.parse_binding_identifier()?
            } else if is_keyword {
                return Err(self.error_at(
                    format!("`{}` cannot be used as an imported binding", imported.kind.name),
                    imported.span,
                ));
            } else {
                imported.clone()
            };
            specifiers.push(self.finish(
                spec_start,
                ImportSpecifier::ImportSpecifier { imported, local },
            ));
            if !self.check(&TokenKind::RightBrace) {
                self.expect(&TokenKind::Comma)?;
            }
        }
        self.expect(&TokenKind::RightBrace)?;
        Ok(())
    }

    fn parse_module_source(&mut self) -> Result<Expr, ParseError> {
        if !matches!(self.current.kind, TokenKind::String(_)) {
            return Err(self.expected("module source string"));
        }
        self.parse_literal()
    }

    fn parse_export(&mut self) -> Result<Stmt, ParseError> {
        let start = self.start();
        self.expect(&TokenKind::Export)?;

        match self.current.kind {
            TokenKind::Star => {
                self.advance()?;
                self.expect_ident("from")?;
                let source = self.parse_module_source()?;
                self.consume_stmt_terminator()?;
                Ok(self.finish(
                    start,
                    StmtKind::ExportAllDeclaration {
                        source: Box::new(source),
                    },
                ))
            }
            TokenKind::Default => {
                self.advance()?;
                let declaration = self.parse_export_default()?;
                Ok(self.finish(start, StmtKind::ExportDefaultDeclaration { declaration }))
            }
            TokenKind::Var | TokenKind::Let | TokenKind::Const => {
                let declaration = self.parse_var_declaration(false)?;
                self.consume_stmt_terminator()?;
                let declaration = self.finish(declaration.span, declaration.kind);
                Ok(self.export_declaration(start, declaration))
            }
            TokenKind::Function | TokenKind::Class => {
                let declaration = self.parse_statement()?;
                Ok(self.export_declaration(start, declaration))
            }
            _ if self.check_ident("async") => {
                let declaration = self.parse_statement()?;
                if !matches!(declaration.kind, StmtKind::FunctionDeclaration(_)) {
                    return Err(self.error_at("expected `function` after `async`", declaration.span));
                }
                Ok(self.export_declaration(start, declaration))
            }
            TokenKind::LeftBrace => self.parse_export_named(start),
            _ => Err(self.unexpected()),
        }
    }

    fn export_declaration(&self, start: Span, declaration: Stmt) -> Stmt {
        self.finish(
            start,
            StmtKind::ExportNamedDeclaration {
                declaration: Some(Box::new(declaration)),
                specifiers: Vec::new(),
                source: None,
            },
        )
    }

    /// Function and class declarations may omit their name after `export default`.
    fn parse_export_default(&mut self) -> Result<ExportDefault, ParseError> {
        let start = self.start();
        match self.current.kind {
            TokenKind::Function => {
                let function = self.parse_function(false, false)?;
                let stmt = self.finish(start, StmtKind::FunctionDeclaration(function));
                Ok(ExportDefault::Declaration(Box::new(stmt)))
            }
            TokenKind::Class => {
                let class = self.parse_class(false)?;
                let stmt = self.finish(start, StmtKind::ClassDeclaration(class));
                Ok(ExportDefault::Declaration(Box::new(stmt)))
            }
            _ if self.check_ident("async") && self.async_function_follows()? => {
                self.advance()?;
                let function = self.parse_function(true, false)?;
                let stmt = self.finish(start, StmtKind::FunctionDeclaration(function));
                Ok(ExportDefault::Declaration(Box::new(stmt)))
            }
            _ => {
                let expr = self.with_in_allowed(|p| p.parse_assign(false))?;
                self.consume_stmt_terminator()?;
                Ok(ExportDefault::Expression(Box::new(expr)))
            }
        }
    }

    fn async_function_follows(&self) -> Result<bool, ParseError> {
        let next = self.peek()?;
        Ok(next.kind == TokenKind::Function && !next.newline_before)
    }

    /// `export { a, b as c }` with an optional `from "source"`.
    fn parse_export_named(&mut self, start: Span) -> Result<Stmt, ParseError> {
        self.expect(&TokenKind::LeftBrace)?;
        let mut specifiers = Vec::new();
        let mut reserved_local: Option<Node<Identifier>> = None;
        while !self.check(&TokenKind::RightBrace) {
            let spec_start = self.start();
            let is_keyword = self.current.kind.is_keyword();
            let local = self.parse_identifier_name()?;
            if is_keyword && reserved_local.is_none() {
                reserved_local = Some(local.clone());
            }
            let exported = if self.check_ident("as") {
                self.advance()?;
                self.parse_identifier_name()?
            } else {
                local.clone()
            };
            specifiers.push(self.finish(spec_start, ExportSpecifier { local, exported }));
            if !self.check(&TokenKind::RightBrace) {
                self.expect(&TokenKind::Comma)?;
            }
        }
        self.expect(&TokenKind::RightBrace)?;

        let source = if self.check_ident("from") {
            self.advance()?;
            Some(Box::new(self.parse_module_source()?))
        } else {
            if let Some(local) = reserved_local {
                return Err(self.error_at(
                    format!("`{}` is a reserved word and cannot be exported", local.kind.name),
                    local.span,
                ));
            }
            None
        };
        self.consume_stmt_terminator()?;
        Ok(self.finish(
            start,
            StmtKind::ExportNamedDeclaration {
                declaration: None,
                specifiers,
                source,
            },
        ))
    }
}
