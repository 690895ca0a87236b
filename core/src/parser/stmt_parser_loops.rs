use super::ast::{ForInit, ForLeft, Stmt, StmtKind};
use super::{LabelKind, Parser};
use crate::errors::ParseError;
use crate::lexer::token::{Span, TokenKind};

impl Parser<'_> {
    /// `for (init; test; update)`, `for (left in right)` or `for (left of right)`.
    pub(super) fn parse_for(&mut self) -> Result<Stmt, ParseError> {
        let start = self.start();
        self.expect(&TokenKind::For)?;
        if self.check_ident("await") {
            return Err(self.error_at("`for await` is not supported", self.current.span));
        }
        self.expect(&TokenKind::LeftParen)?;

        let init = match self.current.kind {
            TokenKind::Semicolon => None,
            TokenKind::Var | TokenKind::Let | TokenKind::Const => {
                let declaration = self.with_no_in(true, |p| p.parse_var_declaration(true))?;
                let StmtKind::VariableDeclaration(decl) = &declaration.kind else {
                    return Err(self.error_at("invalid `for` declaration", declaration.span));
                };
                if self.at_for_in_of() {
                    if decl.declarations.len() != 1 {
                        return Err(self.error_at(
                            "only a single declaration is allowed in a `for` loop head",
                            declaration.span,
                        ));
                    }
                    if let Some(declarator) = decl.declarations.iter().find(|d| d.kind.init.is_some()) {
                        return Err(self.error_at(
                            "`for` loop variable declaration may not have an initializer",
                            declarator.span,
                        ));
                    }
                    return self.parse_for_in_of(start, ForLeft::Declaration(Box::new(declaration)));
                }
                for declarator in &decl.declarations {
                    self.check_initializer(decl.kind, declarator)?;
                }
                Some(ForInit::Declaration(Box::new(declaration)))
            }
            _ => {
                let outer_cover = self.cover_init.take();
                let expr = self.with_no_in(true, |p| p.parse_sequence(true))?;
                if self.at_for_in_of() {
                    let pattern = self.to_pattern(expr, false)?;
                    self.cover_init = outer_cover;
                    return self.parse_for_in_of(start, ForLeft::Pattern(Box::new(pattern)));
                }
                if let Some(span) = self.cover_init.take() {
                    return Err(self.error_at(
                        "shorthand property initializer is only valid in a destructuring pattern",
                        span,
                    ));
                }
                self.cover_init = outer_cover;
                Some(ForInit::Expression(Box::new(expr)))
            }
        };

        self.expect(&TokenKind::Semicolon)?;
        let test = if self.check(&TokenKind::Semicolon) {
            None
        } else {
            Some(Box::new(self.with_in_allowed(|p| p.parse_expression())?))
        };
        self.expect(&TokenKind::Semicolon)?;
        let update = if self.check(&TokenKind::RightParen) {
            None
        } else {
            Some(Box::new(self.with_in_allowed(|p| p.parse_expression())?))
        };
        self.expect(&TokenKind::RightParen)?;

        let body = self.parse_loop_body()?;
        Ok(self.finish(
            start,
            StmtKind::ForStatement {
                init,
                test,
                update,
                body: Box::new(body),
            },
        ))
    }

    fn at_for_in_of(&self) -> bool {
        self.check(&TokenKind::In) || self.check_ident("of")
    }

    fn parse_for_in_of(&mut self, start: Span, left: ForLeft) -> Result<Stmt, ParseError> {
        let is_of = self.check_ident("of");
        self.advance()?;
        let right = self.with_in_allowed(|p| {
            if is_of {
                p.parse_assign(false)
            } else {
                p.parse_expression()
            }
        })?;
        self.expect(&TokenKind::RightParen)?;
        let body = Box::new(self.parse_loop_body()?);
        let right = Box::new(right);
        let kind = if is_of {
            StmtKind::ForOfStatement { left, right, body }
        } else {
            StmtKind::ForInStatement { left, right, body }
        };
        Ok(self.finish(start, kind))
    }

    pub(super) fn parse_while(&mut self) -> Result<Stmt, ParseError> {
        let start = self.start();
        self.expect(&TokenKind::While)?;
        let test = self.parse_paren_expression()?;
        let body = self.parse_loop_body()?;
        Ok(self.finish(
            start,
            StmtKind::WhileStatement {
                test: Box::new(test),
                body: Box::new(body),
            },
        ))
    }

    /// `do body while (test)`; the trailing `;` is optional even on one line.
    pub(super) fn parse_do_while(&mut self) -> Result<Stmt, ParseError> {
        let start = self.start();
        self.expect(&TokenKind::Do)?;
        let body = self.parse_loop_body()?;
        self.expect(&TokenKind::While)?;
        let test = self.parse_paren_expression()?;
        self.eat(&TokenKind::Semicolon)?;
        Ok(self.finish(
            start,
            StmtKind::DoWhileStatement {
                body: Box::new(body),
                test: Box::new(test),
            },
        ))
    }

    fn parse_loop_body(&mut self) -> Result<Stmt, ParseError> {
        self.with_breakable(LabelKind::Loop, |p| p.parse_sub_statement())
    }
}
