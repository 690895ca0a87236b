use super::Parser;
use super::ast::{Class, ClassBody, ClassMethod, Expr, ExprKind, MethodKind, Node};
use super::expr_literals::PropertyHead;
use crate::errors::ParseError;
use crate::lexer::token::TokenKind;

impl Parser<'_> {
    /// `class [name] [extends expr] { methods }`, current token `class`.
    pub(super) fn parse_class(&mut self, id_required: bool) -> Result<Class, ParseError> {
        self.expect(&TokenKind::Class)?;
        let id = if matches!(self.current.kind, TokenKind::Ident(_)) {
            Some(self.parse_binding_identifier()?)
        } else if id_required {
            return Err(self.expected("class name"));
        } else {
            None
        };

        let super_class = if self.eat(&TokenKind::Extends)? {
            Some(Box::new(self.parse_lhs_expression()?))
        } else {
            None
        };

        let body_start = self.start();
        self.expect(&TokenKind::LeftBrace)?;
        let mut methods: Vec<Node<ClassMethod>> = Vec::new();
        while !self.check(&TokenKind::RightBrace) {
            if self.eat(&TokenKind::Semicolon)? {
                continue;
            }
            if self.check(&TokenKind::Eof) {
                return Err(self.unexpected());
            }
            let method = self.parse_class_method()?;
            if method.kind.kind == MethodKind::Constructor
                && methods
                    .iter()
                    .any(|m| m.kind.kind == MethodKind::Constructor)
            {
                return Err(self.error_at("duplicate constructor in the same class", method.span));
            }
            methods.push(method);
        }
        self.expect(&TokenKind::RightBrace)?;

        Ok(Class {
            id,
            super_class,
            body: self.finish(body_start, ClassBody { body: methods }),
        })
    }

    fn parse_class_method(&mut self) -> Result<Node<ClassMethod>, ParseError> {
        let start = self.start();
        let mut is_static = false;
        let head = if self.check_ident("static") {
            self.advance()?;
            if self.check(&TokenKind::LeftParen) {
                PropertyHead {
                    key: Expr::new(ExprKind::identifier("static"), start),
                    computed: false,
                    shorthand_name: Some("static".into()),
                    kind: MethodKind::Method,
                    generator: false,
                    is_async: false,
                }
            } else {
                is_static = true;
                self.parse_property_head()?
            }
        } else {
            self.parse_property_head()?
        };

        if !self.check(&TokenKind::LeftParen) {
            return Err(self.expected("`(`"));
        }

        let mut kind = head.kind;
        if !is_static && !head.computed && key_is(&head.key, "constructor") {
            if head.has_modifier() {
                return Err(self.error_at(
                    "class constructor cannot be a getter, setter, generator or async",
                    head.key.span,
                ));
            }
            kind = MethodKind::Constructor;
        }
        if is_static && !head.computed && key_is(&head.key, "prototype") {
            return Err(self.error_at(
                "classes may not have a static property named `prototype`",
                head.key.span,
            ));
        }

        let (params, body) = self.parse_method(kind, head.is_async, head.generator)?;
        Ok(self.finish(
            start,
            ClassMethod {
                kind,
                key: Box::new(head.key),
                computed: head.computed,
                is_static,
                params,
                body,
                generator: head.generator,
                is_async: head.is_async,
            },
        ))
    }
}

fn key_is(key: &Expr, name: &str) -> bool {
    match &key.kind {
        ExprKind::Identifier { name: key } => key == name,
        ExprKind::StringLiteral { value, .. } => value == name,
        _ => false,
    }
}
