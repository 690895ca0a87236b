use super::Parser;
use super::ast::{
    AssignmentOperator, Expr, ExprKind, Extra, MethodKind, Node, ObjectMember, Pattern,
    PatternKind, TemplateElement, TemplateValue,
};
use crate::errors::ParseError;
use crate::lexer::token::{Position, Span, TokenKind};

/// Key and modifiers shared by object members and class methods.
pub(super) struct PropertyHead {
    pub key: Expr,
    pub computed: bool,
    /// Set when the key is a plain identifier, usable as a shorthand.
    pub shorthand_name: Option<String>,
    pub kind: MethodKind,
    pub generator: bool,
    pub is_async: bool,
}

impl PropertyHead {
    /// `get`, `set`, `async` or `*` was written before the key.
    pub fn has_modifier(&self) -> bool {
        self.kind != MethodKind::Method || self.generator || self.is_async
    }
}

impl Parser<'_> {
    pub(super) fn parse_primary(&mut self) -> Result<Expr, ParseError> {
        let start = self.start();
        match &self.current.kind {
            TokenKind::Ident(name) if name == "async" => self.parse_async_primary(),
            TokenKind::Ident(name) => {
                let name = name.clone();
                if name == "yield" && self.context.is_generator {
                    return Err(self.unexpected());
                }
                self.advance()?;
                if self.check(&TokenKind::Arrow) && !self.current.newline_before {
                    let param = Pattern::new(PatternKind::Identifier { name }, start);
                    return self.parse_arrow_function(start, vec![param], false);
                }
                Ok(Expr::new(ExprKind::identifier(name), start))
            }
            TokenKind::Number(_) | TokenKind::String(_) => self.parse_literal(),
            TokenKind::True | TokenKind::False => {
                let value = self.check(&TokenKind::True);
                let token = self.advance()?;
                Ok(Expr::new(ExprKind::BooleanLiteral { value }, token.span))
            }
            TokenKind::Null => {
                let token = self.advance()?;
                Ok(Expr::new(ExprKind::NullLiteral, token.span))
            }
            TokenKind::This => {
                let token = self.advance()?;
                Ok(Expr::new(ExprKind::ThisExpression, token.span))
            }
            TokenKind::Super => {
                let token = self.advance()?;
                Ok(Expr::new(ExprKind::Super, token.span))
            }
            TokenKind::Slash | TokenKind::SlashEquals => {
                self.current = self.scanner.rescan_regex(&self.current)?;
                let token = self.advance()?;
                match token.kind {
                    TokenKind::Regex { pattern, flags } => {
                        Ok(Expr::new(ExprKind::RegExpLiteral { pattern, flags }, token.span))
                    }
                    _ => Err(self.error_at("expected regular expression", token.span)),
                }
            }
            TokenKind::Template(_) if self.current.lexeme.starts_with('`') => self.parse_template(),
            TokenKind::LeftParen => self.parse_paren_or_arrow(),
            TokenKind::LeftBracket => self.parse_array_literal(),
            TokenKind::LeftBrace => self.parse_object_literal(),
            TokenKind::Function => {
                let function = self.parse_function(false, false)?;
                Ok(self.finish(start, ExprKind::FunctionExpression(function)))
            }
            TokenKind::Class => {
                let class = self.parse_class(false)?;
                Ok(self.finish(start, ExprKind::ClassExpression(class)))
            }
            TokenKind::Enum => Err(self.error_at("`enum` is a reserved word", start)),
            _ => Err(self.unexpected()),
        }
    }

    /// Numeric or string literal, keeping the source text in `extra.raw`.
    pub(super) fn parse_literal(&mut self) -> Result<Expr, ParseError> {
        let token = self.advance()?;
        let extra = Extra {
            raw: token.lexeme.to_string(),
        };
        let kind = match token.kind {
            TokenKind::Number(value) => ExprKind::NumericLiteral { value, extra },
            TokenKind::String(value) => ExprKind::StringLiteral { value, extra },
            _ => return Err(self.error_at("expected literal", token.span)),
        };
        Ok(Expr::new(kind, token.span))
    }

    /// `async` as a modifier (`async function`, `async x =>`,
    /// `async (...) =>`) or as a plain identifier.
    fn parse_async_primary(&mut self) -> Result<Expr, ParseError> {
        let start = self.start();
        self.advance()?;
        let ident = Expr::new(ExprKind::identifier("async"), start);

        if self.check(&TokenKind::Arrow) && !self.current.newline_before {
            let param = Pattern::new(PatternKind::Identifier { name: "async".into() }, start);
            return self.parse_arrow_function(start, vec![param], false);
        }
        if self.current.newline_before {
            return Ok(ident);
        }

        match &self.current.kind {
            TokenKind::Function => {
                let function = self.parse_function(true, false)?;
                Ok(self.finish(start, ExprKind::FunctionExpression(function)))
            }
            TokenKind::Ident(_) => {
                let param = self.parse_binding_identifier()?;
                if !self.check(&TokenKind::Arrow) || self.current.newline_before {
                    return Err(self.expected("`=>`"));
                }
                let param = Pattern::new(
                    PatternKind::Identifier {
                        name: param.kind.name,
                    },
                    param.span,
                );
                self.parse_arrow_function(start, vec![param], true)
            }
            TokenKind::LeftParen => {
                let outer_cover = self.cover_init.take();
                let arguments = self.parse_arguments(true)?;
                if self.check(&TokenKind::Arrow) && !self.current.newline_before {
                    let params = self.to_params(arguments)?;
                    self.cover_init = outer_cover;
                    return self.parse_arrow_function(start, params, true);
                }
                if let Some(span) = self.cover_init.take() {
                    return Err(self.error_at(
                        "shorthand property initializer is only valid in a destructuring pattern",
                        span,
                    ));
                }
                self.cover_init = outer_cover;
                Ok(self.finish(
                    start,
                    ExprKind::CallExpression {
                        callee: Box::new(ident),
                        arguments,
                    },
                ))
            }
            _ => Ok(ident),
        }
    }

    /// A parenthesized expression, or the parameter list of an arrow
    /// function when `=>` follows the closing parenthesis.
    fn parse_paren_or_arrow(&mut self) -> Result<Expr, ParseError> {
        let start = self.start();
        self.expect(&TokenKind::LeftParen)?;
        let outer_cover = self.cover_init.take();

        let mut items = Vec::new();
        let mut rest: Option<Pattern> = None;
        let mut trailing_comma: Option<Span> = None;
        self.with_in_allowed(|p| {
            while !p.check(&TokenKind::RightParen) {
                if p.check(&TokenKind::DotDotDot) {
                    let rest_start = p.start();
                    p.advance()?;
                    let argument = p.parse_binding_target()?;
                    rest = Some(p.finish(
                        rest_start,
                        PatternKind::RestElement {
                            argument: Box::new(argument),
                        },
                    ));
                    break;
                }
                items.push(p.parse_assign(true)?);
                if !p.check(&TokenKind::RightParen) {
                    let comma = p.expect(&TokenKind::Comma)?;
                    if p.check(&TokenKind::RightParen) {
                        trailing_comma = Some(comma.span);
                    }
                }
            }
            Ok(())
        })?;
        let close = self.expect(&TokenKind::RightParen)?;

        if self.check(&TokenKind::Arrow) && !self.current.newline_before {
            let mut params = items
                .into_iter()
                .map(|item| self.to_pattern(item, true))
                .collect::<Result<Vec<_>, _>>()?;
            params.extend(rest);
            self.cover_init = outer_cover;
            return self.parse_arrow_function(start, params, false);
        }

        if let Some(rest) = rest {
            return Err(self.error_at("unexpected token `...`", rest.span));
        }
        if let Some(span) = trailing_comma {
            return Err(self.error_at("unexpected trailing comma", span));
        }
        if let Some(span) = self.cover_init.take() {
            return Err(self.error_at(
                "shorthand property initializer is only valid in a destructuring pattern",
                span,
            ));
        }
        self.cover_init = outer_cover;

        match items.len() {
            0 => Err(self.error_at("unexpected token `)`", close.span)),
            1 => Ok(items.remove(0)),
            _ => {
                let span = items[0].span.to(items[items.len() - 1].span);
                Ok(Expr::new(ExprKind::SequenceExpression { expressions: items }, span))
            }
        }
    }

    fn parse_array_literal(&mut self) -> Result<Expr, ParseError> {
        let start = self.start();
        self.expect(&TokenKind::LeftBracket)?;
        let mut elements = Vec::new();
        self.with_in_allowed(|p| {
            while !p.check(&TokenKind::RightBracket) {
                if p.eat(&TokenKind::Comma)? {
                    elements.push(None);
                    continue;
                }
                let element = if p.check(&TokenKind::DotDotDot) {
                    let spread_start = p.start();
                    p.advance()?;
                    let argument = p.parse_assign(true)?;
                    p.finish(
                        spread_start,
                        ExprKind::SpreadElement {
                            argument: Box::new(argument),
                        },
                    )
                } else {
                    p.parse_assign(true)?
                };
                elements.push(Some(element));
                if !p.check(&TokenKind::RightBracket) {
                    p.expect(&TokenKind::Comma)?;
                }
            }
            Ok(())
        })?;
        self.expect(&TokenKind::RightBracket)?;
        Ok(self.finish(start, ExprKind::ArrayExpression { elements }))
    }

    fn parse_object_literal(&mut self) -> Result<Expr, ParseError> {
        let start = self.start();
        self.expect(&TokenKind::LeftBrace)?;
        let mut properties = Vec::new();
        self.with_in_allowed(|p| {
            while !p.check(&TokenKind::RightBrace) {
                properties.push(p.parse_object_member()?);
                if !p.check(&TokenKind::RightBrace) {
                    p.expect(&TokenKind::Comma)?;
                }
            }
            Ok(())
        })?;
        self.expect(&TokenKind::RightBrace)?;
        Ok(self.finish(start, ExprKind::ObjectExpression { properties }))
    }

    fn parse_object_member(&mut self) -> Result<Node<ObjectMember>, ParseError> {
        let start = self.start();
        if self.eat(&TokenKind::DotDotDot)? {
            let argument = self.parse_assign(true)?;
            return Ok(self.finish(
                start,
                ObjectMember::SpreadElement {
                    argument: Box::new(argument),
                },
            ));
        }

        let head = self.parse_property_head()?;
        if head.has_modifier() || self.check(&TokenKind::LeftParen) {
            let (params, body) = self.parse_method(head.kind, head.is_async, head.generator)?;
            return Ok(self.finish(
                start,
                ObjectMember::ObjectMethod {
                    kind: head.kind,
                    key: Box::new(head.key),
                    computed: head.computed,
                    params,
                    body,
                    generator: head.generator,
                    is_async: head.is_async,
                },
            ));
        }

        if self.eat(&TokenKind::Colon)? {
            let value = self.parse_assign(true)?;
            return Ok(self.finish(
                start,
                ObjectMember::ObjectProperty {
                    key: Box::new(head.key),
                    value: Box::new(value),
                    computed: head.computed,
                    shorthand: false,
                },
            ));
        }

        let Some(name) = head.shorthand_name else {
            return Err(self.expected("`:`"));
        };
        let key_span = head.key.span;
        let value = if self.eat(&TokenKind::Assign)? {
            let right = self.parse_assign(false)?;
            let left = Pattern::new(PatternKind::Identifier { name }, key_span);
            let value = self.finish(
                start,
                ExprKind::AssignmentExpression {
                    operator: AssignmentOperator::Assign,
                    left: Box::new(left),
                    right: Box::new(right),
                },
            );
            self.cover_init.get_or_insert(value.span);
            value
        } else {
            Expr::new(ExprKind::identifier(name), key_span)
        };
        Ok(self.finish(
            start,
            ObjectMember::ObjectProperty {
                key: Box::new(head.key),
                value: Box::new(value),
                computed: false,
                shorthand: true,
            },
        ))
    }

    /// Member key with its optional `get`/`set`/`async`/`*` prefix.
    pub(super) fn parse_property_head(&mut self) -> Result<PropertyHead, ParseError> {
        let mut kind = MethodKind::Method;
        let mut is_async = false;

        let modifier = match &self.current.kind {
            TokenKind::Ident(word) if matches!(word.as_str(), "get" | "set" | "async") => {
                Some(word.clone())
            }
            _ => None,
        };
        if let Some(word) = modifier {
            let word_start = self.start();
            self.advance()?;
            if matches!(
                self.current.kind,
                TokenKind::Colon
                    | TokenKind::LeftParen
                    | TokenKind::Comma
                    | TokenKind::RightBrace
                    | TokenKind::Assign
            ) {
                return Ok(PropertyHead {
                    key: Expr::new(ExprKind::identifier(word.clone()), word_start),
                    computed: false,
                    shorthand_name: Some(word),
                    kind,
                    generator: false,
                    is_async,
                });
            }
            match word.as_str() {
                "get" => kind = MethodKind::Get,
                "set" => kind = MethodKind::Set,
                _ if self.current.newline_before => return Err(self.unexpected()),
                _ => is_async = true,
            }
        }

        let generator = self.check(&TokenKind::Star);
        if generator {
            if kind != MethodKind::Method {
                return Err(self.unexpected());
            }
            if is_async {
                return Err(self.error_at("async generators are not supported", self.current.span));
            }
            self.advance()?;
        }

        let (key, computed, name) = self.parse_property_name()?;
        let plain = kind == MethodKind::Method && !generator && !is_async;
        Ok(PropertyHead {
            key,
            computed,
            shorthand_name: name.filter(|_| plain),
            kind,
            generator,
            is_async,
        })
    }

    /// Property key: identifier, keyword, string, number or `[expr]`.
    /// Returns the key, whether it is computed, and its name when it was
    /// written as a plain identifier.
    pub(super) fn parse_property_name(
        &mut self,
    ) -> Result<(Expr, bool, Option<String>), ParseError> {
        let start = self.start();
        match &self.current.kind {
            TokenKind::Ident(name) => {
                let name = name.clone();
                self.advance()?;
                Ok((Expr::new(ExprKind::identifier(name.clone()), start), false, Some(name)))
            }
            TokenKind::String(_) | TokenKind::Number(_) => Ok((self.parse_literal()?, false, None)),
            TokenKind::LeftBracket => {
                self.advance()?;
                let key = self.with_in_allowed(|p| p.parse_assign(false))?;
                self.expect(&TokenKind::RightBracket)?;
                Ok((key, true, None))
            }
            kind if kind.is_keyword() => {
                let name = self.current.lexeme.to_string();
                self.advance()?;
                Ok((Expr::new(ExprKind::identifier(name), start), false, None))
            }
            _ => Err(self.expected("property name")),
        }
    }

    /// Template literal; each `${...}` substitution is followed by a
    /// continuation token from the scanner.
    pub(super) fn parse_template(&mut self) -> Result<Expr, ParseError> {
        let start = self.start();
        let mut quasis = Vec::new();
        let mut expressions = Vec::new();
        loop {
            if !matches!(self.current.kind, TokenKind::Template(_)) {
                return Err(self.expected("template literal"));
            }
            let token = self.advance()?;
            let TokenKind::Template(chunk) = token.kind else {
                return Err(self.error_at("expected template literal", token.span));
            };

            // delimiters: "`" or "}" before the text, "`" or "${" after it
            let closing = if chunk.tail { 1 } else { 2 };
            let loc = token.span.loc;
            let span = Span::new(
                token.span.start + 1,
                token.span.end - closing,
                Position::new(loc.start.line, loc.start.column + 1),
                Position::new(loc.end.line, loc.end.column - closing),
            );
            quasis.push(Node::new(
                TemplateElement {
                    value: TemplateValue {
                        raw: chunk.raw,
                        cooked: chunk.cooked,
                    },
                    tail: chunk.tail,
                },
                span,
            ));
            if chunk.tail {
                break;
            }

            expressions.push(self.with_in_allowed(|p| p.parse_expression())?);
            if !self.current.lexeme.starts_with('}') {
                return Err(self.expected("`}`"));
            }
        }
        Ok(self.finish(start, ExprKind::TemplateLiteral { quasis, expressions }))
    }
}
