use super::ast::{
    ArrowBody, BlockStatement, Expr, ExprKind, Function, MethodKind, Node, Pattern, PatternKind,
};
use super::{FunctionContext, Parser};
use crate::errors::ParseError;
use crate::lexer::token::{Span, TokenKind};

impl Parser<'_> {
    /// `function [*] [name] (params) { body }`. The current token is
    /// `function`; a preceding `async` has already been consumed.
    pub(super) fn parse_function(
        &mut self,
        is_async: bool,
        id_required: bool,
    ) -> Result<Function, ParseError> {
        self.expect(&TokenKind::Function)?;
        let generator = self.eat(&TokenKind::Star)?;
        if is_async && generator {
            return Err(self.error_at("async generators are not supported", self.prev_span));
        }

        let id = if matches!(self.current.kind, TokenKind::Ident(_)) {
            Some(self.parse_binding_identifier()?)
        } else if id_required {
            return Err(self.expected("function name"));
        } else {
            None
        };

        let context = FunctionContext {
            in_function: true,
            is_async,
            is_generator: generator,
        };
        let (params, body) = self.with_function_context(context, |p| {
            let params = p.parse_params()?;
            let body = p.parse_function_body()?;
            Ok((params, body))
        })?;

        Ok(Function {
            id,
            params,
            body,
            generator,
            is_async,
        })
    }

    /// Formal parameter list including the parentheses.
    pub(super) fn parse_params(&mut self) -> Result<Vec<Pattern>, ParseError> {
        self.expect(&TokenKind::LeftParen)?;
        let mut params = Vec::new();
        while !self.check(&TokenKind::RightParen) {
            if self.check(&TokenKind::DotDotDot) {
                let start = self.start();
                self.advance()?;
                let argument = self.parse_binding_target()?;
                params.push(self.finish(
                    start,
                    PatternKind::RestElement {
                        argument: Box::new(argument),
                    },
                ));
                break;
            }
            params.push(self.parse_binding_element()?);
            if !self.check(&TokenKind::RightParen) {
                self.expect(&TokenKind::Comma)?;
            }
        }
        self.expect(&TokenKind::RightParen)?;
        Ok(params)
    }

    /// `{ statements }` of a function, method or arrow.
    pub(super) fn parse_function_body(&mut self) -> Result<Node<BlockStatement>, ParseError> {
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

    /// Parameters and body of an object or class method.
    pub(super) fn parse_method(
        &mut self,
        kind: MethodKind,
        is_async: bool,
        generator: bool,
    ) -> Result<(Vec<Pattern>, Node<BlockStatement>), ParseError> {
        let context = FunctionContext {
            in_function: true,
            is_async,
            is_generator: generator,
        };
        let params_start = self.start();
        let (params, body) = self.with_function_context(context, |p| {
            let params = p.parse_params()?;
            let body = p.parse_function_body()?;
            Ok((params, body))
        })?;

        match kind {
            MethodKind::Get if !params.is_empty() => Err(self.error_at(
                "getter must not have any formal parameters",
                params_start,
            )),
            MethodKind::Set if params.len() != 1 => Err(self.error_at(
                "setter must have exactly one formal parameter",
                params_start,
            )),
            _ => Ok((params, body)),
        }
    }

    /// Everything from `=>` on, given the already converted parameters.
    pub(super) fn parse_arrow_function(
        &mut self,
        start: Span,
        params: Vec<Pattern>,
        is_async: bool,
    ) -> Result<Expr, ParseError> {
        self.expect(&TokenKind::Arrow)?;
        let context = FunctionContext {
            in_function: true,
            is_async,
            is_generator: false,
        };
        let no_in = self.no_in;
        let (body, expression) = self.with_function_context(context, |p| {
            if p.check(&TokenKind::LeftBrace) {
                Ok((ArrowBody::Block(p.parse_function_body()?), false))
            } else {
                let body = p.with_no_in(no_in, |p| p.parse_assign(false))?;
                Ok((ArrowBody::Expression(Box::new(body)), true))
            }
        })?;
        Ok(self.finish(
            start,
            ExprKind::ArrowFunctionExpression {
                params,
                body,
                is_async,
                expression,
            },
        ))
    }
}
