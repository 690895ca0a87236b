use super::Parser;
use super::ast::{AssignmentOperator, Expr, ExprKind, Pattern, PatternKind, UpdateOperator};
use super::expr_ops::{assignment_operator, infix_operator, unary_operator};
use crate::errors::ParseError;
use crate::lexer::token::{Span, TokenKind};

impl Parser<'_> {
    /// Expression, including the comma operator.
    pub(super) fn parse_expression(&mut self) -> Result<Expr, ParseError> {
        self.parse_sequence(false)
    }

    pub(super) fn parse_sequence(&mut self, defer_cover: bool) -> Result<Expr, ParseError> {
        let start = self.start();
        let first = self.parse_assign(defer_cover)?;
        if !self.check(&TokenKind::Comma) {
            return Ok(first);
        }
        let mut expressions = vec![first];
        while self.eat(&TokenKind::Comma)? {
            expressions.push(self.parse_assign(defer_cover)?);
        }
        Ok(self.finish(start, ExprKind::SequenceExpression { expressions }))
    }

    /// AssignmentExpression. With `defer_cover` a pending `{a = 1}`
    /// shorthand is handed to the caller instead of being rejected, since
    /// an enclosing array, object or parameter list may still turn into
    /// a pattern.
    pub(super) fn parse_assign(&mut self, defer_cover: bool) -> Result<Expr, ParseError> {
        self.nested(|p| p.parse_assign_level(defer_cover))
    }

    fn parse_assign_level(&mut self, defer_cover: bool) -> Result<Expr, ParseError> {
        if self.context.is_generator && self.check_ident("yield") {
            return self.parse_yield();
        }

        let start = self.start();
        let outer_cover = self.cover_init.take();
        let left = self.parse_conditional()?;
        if self.is_bare_arrow(&left) {
            self.cover_init = outer_cover;
            return Ok(left);
        }

        let Some(operator) = assignment_operator(&self.current.kind) else {
            match self.cover_init.take() {
                Some(span) if !defer_cover => {
                    return Err(self.error_at(
                        "shorthand property initializer is only valid in a destructuring pattern",
                        span,
                    ));
                }
                Some(span) => self.cover_init = Some(outer_cover.unwrap_or(span)),
                None => self.cover_init = outer_cover,
            }
            return Ok(left);
        };

        let target = if operator == AssignmentOperator::Assign {
            self.to_pattern(left, false)?
        } else {
            self.to_simple_target(left)?
        };
        self.cover_init = None;
        self.advance()?;
        let right = self.parse_assign(false)?;
        self.cover_init = outer_cover;
        Ok(self.finish(
            start,
            ExprKind::AssignmentExpression {
                operator,
                left: Box::new(target),
                right: Box::new(right),
            },
        ))
    }

    fn parse_conditional(&mut self) -> Result<Expr, ParseError> {
        let start = self.start();
        let test = self.parse_binary_expression()?;
        if self.is_bare_arrow(&test) || !self.check(&TokenKind::Question) {
            return Ok(test);
        }
        self.advance()?;
        let consequent = self.with_in_allowed(|p| p.parse_assign(false))?;
        self.expect(&TokenKind::Colon)?;
        let alternate = self.parse_assign(false)?;
        Ok(self.finish(
            start,
            ExprKind::ConditionalExpression {
                test: Box::new(test),
                consequent: Box::new(consequent),
                alternate: Box::new(alternate),
            },
        ))
    }

    pub(super) fn parse_unary(&mut self) -> Result<Expr, ParseError> {
        let start = self.start();
        if let Some(operator) = unary_operator(&self.current.kind) {
            self.advance()?;
            let argument = self.nested(Self::parse_unary)?;
            self.reject_bare_arrow(&argument)?;
            return Ok(self.finish(
                start,
                ExprKind::UnaryExpression {
                    operator,
                    prefix: true,
                    argument: Box::new(argument),
                },
            ));
        }

        if let Some(operator) = update_operator(&self.current.kind) {
            self.advance()?;
            let argument = self.nested(Self::parse_unary)?;
            self.check_simple_target(&argument)?;
            return Ok(self.finish(
                start,
                ExprKind::UpdateExpression {
                    operator,
                    prefix: true,
                    argument: Box::new(argument),
                },
            ));
        }

        if self.context.is_async && self.check_ident("await") {
            self.advance()?;
            let argument = self.nested(Self::parse_unary)?;
            self.reject_bare_arrow(&argument)?;
            return Ok(self.finish(
                start,
                ExprKind::AwaitExpression {
                    argument: Box::new(argument),
                },
            ));
        }

        self.parse_postfix()
    }

    fn parse_postfix(&mut self) -> Result<Expr, ParseError> {
        let start = self.start();
        let expr = self.parse_lhs_expression()?;
        if self.is_bare_arrow(&expr) || self.current.newline_before {
            return Ok(expr);
        }
        let Some(operator) = update_operator(&self.current.kind) else {
            return Ok(expr);
        };
        self.check_simple_target(&expr)?;
        self.advance()?;
        Ok(self.finish(
            start,
            ExprKind::UpdateExpression {
                operator,
                prefix: false,
                argument: Box::new(expr),
            },
        ))
    }

    /// Member, call and `new` chains.
    pub(super) fn parse_lhs_expression(&mut self) -> Result<Expr, ParseError> {
        let start = self.start();
        let expr = if self.check(&TokenKind::New) {
            self.parse_new()?
        } else {
            self.parse_primary()?
        };
        self.parse_subscripts(start, expr, false)
    }

    fn parse_new(&mut self) -> Result<Expr, ParseError> {
        let start = self.start();
        self.expect(&TokenKind::New)?;
        if self.check(&TokenKind::Dot) {
            return Err(self.error_at("`new.target` is not supported", self.current.span));
        }

        let callee_start = self.start();
        let callee = if self.check(&TokenKind::New) {
            self.nested(Self::parse_new)?
        } else {
            let primary = self.parse_primary()?;
            self.parse_subscripts(callee_start, primary, true)?
        };
        self.reject_bare_arrow(&callee)?;

        let arguments = if self.check(&TokenKind::LeftParen) {
            self.parse_arguments(false)?
        } else {
            Vec::new()
        };
        Ok(self.finish(
            start,
            ExprKind::NewExpression {
                callee: Box::new(callee),
                arguments,
            },
        ))
    }

    pub(super) fn parse_subscripts(
        &mut self,
        start: Span,
        mut expr: Expr,
        no_call: bool,
    ) -> Result<Expr, ParseError> {
        if self.is_bare_arrow(&expr) {
            return Ok(expr);
        }
        loop {
            expr = match &self.current.kind {
                TokenKind::Dot => {
                    self.advance()?;
                    let name = self.parse_identifier_name()?;
                    let property = Expr::new(ExprKind::identifier(name.kind.name), name.span);
                    self.finish(
                        start,
                        ExprKind::MemberExpression {
                            object: Box::new(expr),
                            property: Box::new(property),
                            computed: false,
                        },
                    )
                }
                TokenKind::LeftBracket => {
                    self.advance()?;
                    let property = self.with_in_allowed(|p| p.parse_expression())?;
                    self.expect(&TokenKind::RightBracket)?;
                    self.finish(
                        start,
                        ExprKind::MemberExpression {
                            object: Box::new(expr),
                            property: Box::new(property),
                            computed: true,
                        },
                    )
                }
                TokenKind::LeftParen if !no_call => {
                    let arguments = self.parse_arguments(false)?;
                    self.finish(
                        start,
                        ExprKind::CallExpression {
                            callee: Box::new(expr),
                            arguments,
                        },
                    )
                }
                TokenKind::Template(_) if self.current.lexeme.starts_with('`') => {
                    let quasi = self.parse_template()?;
                    self.finish(
                        start,
                        ExprKind::TaggedTemplateExpression {
                            tag: Box::new(expr),
                            quasi: Box::new(quasi),
                        },
                    )
                }
                _ => return Ok(expr),
            };
        }
    }

    /// Parenthesized argument list, spread and trailing comma allowed.
    pub(super) fn parse_arguments(&mut self, defer_cover: bool) -> Result<Vec<Expr>, ParseError> {
        self.expect(&TokenKind::LeftParen)?;
        let mut arguments = Vec::new();
        self.with_in_allowed(|p| {
            while !p.check(&TokenKind::RightParen) {
                let argument = if p.check(&TokenKind::DotDotDot) {
                    let start = p.start();
                    p.advance()?;
                    let argument = p.parse_assign(defer_cover)?;
                    p.finish(
                        start,
                        ExprKind::SpreadElement {
                            argument: Box::new(argument),
                        },
                    )
                } else {
                    p.parse_assign(defer_cover)?
                };
                arguments.push(argument);
                if !p.check(&TokenKind::RightParen) {
                    p.expect(&TokenKind::Comma)?;
                }
            }
            Ok(())
        })?;
        self.expect(&TokenKind::RightParen)?;
        Ok(arguments)
    }

    fn parse_yield(&mut self) -> Result<Expr, ParseError> {
        let start = self.start();
        self.advance()?;
        let mut delegate = false;
        let argument = if self.current.newline_before {
            None
        } else if self.eat(&TokenKind::Star)? {
            delegate = true;
            Some(Box::new(self.parse_assign(false)?))
        } else if self.at_expression_start() {
            Some(Box::new(self.parse_assign(false)?))
        } else {
            None
        };
        Ok(self.finish(start, ExprKind::YieldExpression { argument, delegate }))
    }

    fn at_expression_start(&self) -> bool {
        match &self.current.kind {
            TokenKind::Plus | TokenKind::Minus | TokenKind::Slash | TokenKind::SlashEquals => true,
            TokenKind::Template(_) => self.current.lexeme.starts_with('`'),
            kind if infix_operator(kind, false).is_some() || assignment_operator(kind).is_some() => {
                false
            }
            TokenKind::RightParen
            | TokenKind::RightBracket
            | TokenKind::RightBrace
            | TokenKind::Comma
            | TokenKind::Semicolon
            | TokenKind::Colon
            | TokenKind::Question
            | TokenKind::Arrow
            | TokenKind::Dot
            | TokenKind::Eof => false,
            _ => true,
        }
    }

    /// An arrow function that was not wrapped in parentheses ends the
    /// surrounding operator chain.
    pub(super) fn is_bare_arrow(&self, expr: &Expr) -> bool {
        expr.kind.is_arrow() && expr.span.end == self.prev_span.end
    }

    fn reject_bare_arrow(&self, expr: &Expr) -> Result<(), ParseError> {
        if self.is_bare_arrow(expr) {
            return Err(self.error_at("arrow function must be parenthesized here", expr.span));
        }
        Ok(())
    }

    fn check_simple_target(&self, expr: &Expr) -> Result<(), ParseError> {
        match expr.kind {
            ExprKind::Identifier { .. } | ExprKind::MemberExpression { .. } => Ok(()),
            _ => Err(self.error_at("invalid left-hand side in update expression", expr.span)),
        }
    }

    /// Target of a compound assignment: a name or a member access.
    fn to_simple_target(&self, expr: Expr) -> Result<Pattern, ParseError> {
        match expr.kind {
            ExprKind::Identifier { name } => {
                Ok(Pattern::new(PatternKind::Identifier { name }, expr.span))
            }
            ExprKind::MemberExpression {
                object,
                property,
                computed,
            } => Ok(Pattern::new(
                PatternKind::MemberExpression {
                    object,
                    property,
                    computed,
                },
                expr.span,
            )),
            _ => Err(self.error_at("invalid left-hand side in assignment", expr.span)),
        }
    }
}

fn update_operator(kind: &TokenKind) -> Option<UpdateOperator> {
    match kind {
        TokenKind::PlusPlus => Some(UpdateOperator::Increment),
        TokenKind::MinusMinus => Some(UpdateOperator::Decrement),
        _ => None,
    }
}
