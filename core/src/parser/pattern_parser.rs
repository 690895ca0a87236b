use super::Parser;
use super::ast::{
    AssignmentOperator, Expr, ExprKind, Node, ObjectMember, Pattern, PatternKind, PatternProperty,
};
use crate::errors::ParseError;
use crate::lexer::token::{Span, TokenKind};

impl Parser<'_> {
    /// Identifier, array pattern or object pattern in a declaration.
    pub(super) fn parse_binding_target(&mut self) -> Result<Pattern, ParseError> {
        self.nested(Self::parse_binding_target_level)
    }

    fn parse_binding_target_level(&mut self) -> Result<Pattern, ParseError> {
        match self.current.kind {
            TokenKind::LeftBracket => self.parse_array_binding(),
            TokenKind::LeftBrace => self.parse_object_binding(),
            _ => {
                let ident = self.parse_binding_identifier()?;
                Ok(Pattern::new(
                    PatternKind::Identifier {
                        name: ident.kind.name,
                    },
                    ident.span,
                ))
            }
        }
    }

    /// Binding target with an optional `= default`.
    pub(super) fn parse_binding_element(&mut self) -> Result<Pattern, ParseError> {
        let start = self.start();
        let target = self.parse_binding_target()?;
        if !self.eat(&TokenKind::Assign)? {
            return Ok(target);
        }
        let right = self.with_in_allowed(|p| p.parse_assign(false))?;
        Ok(self.finish(
            start,
            PatternKind::AssignmentPattern {
                left: Box::new(target),
                right: Box::new(right),
            },
        ))
    }

    fn parse_rest_binding(&mut self) -> Result<Pattern, ParseError> {
        let start = self.start();
        self.expect(&TokenKind::DotDotDot)?;
        let argument = self.parse_binding_target()?;
        Ok(self.finish(
            start,
            PatternKind::RestElement {
                argument: Box::new(argument),
            },
        ))
    }

    fn parse_array_binding(&mut self) -> Result<Pattern, ParseError> {
        let start = self.start();
        self.expect(&TokenKind::LeftBracket)?;
        let mut elements = Vec::new();
        while !self.check(&TokenKind::RightBracket) {
            if self.eat(&TokenKind::Comma)? {
                elements.push(None);
                continue;
            }
            if self.check(&TokenKind::DotDotDot) {
                elements.push(Some(self.parse_rest_binding()?));
                break;
            }
            elements.push(Some(self.parse_binding_element()?));
            if !self.check(&TokenKind::RightBracket) {
                self.expect(&TokenKind::Comma)?;
            }
        }
        self.expect(&TokenKind::RightBracket)?;
        Ok(self.finish(start, PatternKind::ArrayPattern { elements }))
    }

    fn parse_object_binding(&mut self) -> Result<Pattern, ParseError> {
        let start = self.start();
        self.expect(&TokenKind::LeftBrace)?;
        let mut properties = Vec::new();
        while !self.check(&TokenKind::RightBrace) {
            let prop_start = self.start();
            if self.eat(&TokenKind::DotDotDot)? {
                let ident = self.parse_binding_identifier()?;
                let argument = Pattern::new(
                    PatternKind::Identifier {
                        name: ident.kind.name,
                    },
                    ident.span,
                );
                properties.push(self.finish(
                    prop_start,
                    PatternProperty::RestElement {
                        argument: Box::new(argument),
                    },
                ));
                break;
            }

            let (key, computed, name) = self.parse_property_name()?;
            let (value, shorthand) = if self.eat(&TokenKind::Colon)? {
                (self.parse_binding_element()?, false)
            } else {
                let Some(name) = name else {
                    return Err(self.expected("`:`"));
                };
                let target = Pattern::new(PatternKind::Identifier { name }, key.span);
                if self.eat(&TokenKind::Assign)? {
                    let right = self.with_in_allowed(|p| p.parse_assign(false))?;
                    let pattern = self.finish(
                        prop_start,
                        PatternKind::AssignmentPattern {
                            left: Box::new(target),
                            right: Box::new(right),
                        },
                    );
                    (pattern, true)
                } else {
                    (target, true)
                }
            };
            properties.push(self.finish(
                prop_start,
                PatternProperty::ObjectProperty {
                    key: Box::new(key),
                    value: Box::new(value),
                    computed,
                    shorthand,
                },
            ));
            if !self.check(&TokenKind::RightBrace) {
                self.expect(&TokenKind::Comma)?;
            }
        }
        self.expect(&TokenKind::RightBrace)?;
        Ok(self.finish(start, PatternKind::ObjectPattern { properties }))
    }

    /// Reinterpret an already parsed expression as a pattern. Binding
    /// patterns (parameters) may not contain member expressions.
    pub(super) fn to_pattern(&self, expr: Expr, binding: bool) -> Result<Pattern, ParseError> {
        let span = expr.span;
        let kind = match expr.kind {
            ExprKind::Identifier { name } => PatternKind::Identifier { name },
            ExprKind::MemberExpression {
                object,
                property,
                computed,
            } if !binding => PatternKind::MemberExpression {
                object,
                property,
                computed,
            },
            ExprKind::AssignmentExpression {
                operator: AssignmentOperator::Assign,
                left,
                right,
            } => {
                if binding {
                    self.check_binding(&left)?;
                }
                PatternKind::AssignmentPattern { left, right }
            }
            ExprKind::ArrayExpression { elements } => {
                let count = elements.len();
                let mut patterns = Vec::with_capacity(count);
                for (index, element) in elements.into_iter().enumerate() {
                    let pattern = match element {
                        None => None,
                        Some(Expr {
                            kind: ExprKind::SpreadElement { argument },
                            span,
                        }) => {
                            if index + 1 != count {
                                return Err(self.error_at(
                                    "rest element must be last in a destructuring pattern",
                                    span,
                                ));
                            }
                            Some(self.to_rest(*argument, span, binding)?)
                        }
                        Some(element) => Some(self.to_pattern(element, binding)?),
                    };
                    patterns.push(pattern);
                }
                PatternKind::ArrayPattern { elements: patterns }
            }
            ExprKind::ObjectExpression { properties } => {
                let count = properties.len();
                let mut converted = Vec::with_capacity(count);
                for (index, member) in properties.into_iter().enumerate() {
                    let member_span = member.span;
                    let property = match member.kind {
                        ObjectMember::ObjectProperty {
                            key,
                            value,
                            computed,
                            shorthand,
                        } => PatternProperty::ObjectProperty {
                            key,
                            value: Box::new(self.to_pattern(*value, binding)?),
                            computed,
                            shorthand,
                        },
                        ObjectMember::SpreadElement { argument } => {
                            if index + 1 != count {
                                return Err(self.error_at(
                                    "rest element must be last in a destructuring pattern",
                                    member_span,
                                ));
                            }
                            let argument = self.to_pattern(*argument, binding)?;
                            if !matches!(
                                argument.kind,
                                PatternKind::Identifier { .. } | PatternKind::MemberExpression { .. }
                            ) {
                                return Err(self.error_at(
                                    "invalid rest element in object pattern",
                                    argument.span,
                                ));
                            }
                            PatternProperty::RestElement {
                                argument: Box::new(argument),
                            }
                        }
                        ObjectMember::ObjectMethod { .. } => {
                            return Err(self.error_at(
                                "object methods cannot appear in a destructuring pattern",
                                member_span,
                            ));
                        }
                    };
                    converted.push(Node::new(property, member_span));
                }
                PatternKind::ObjectPattern {
                    properties: converted,
                }
            }
            _ => {
                let message = if binding {
                    "invalid parameter"
                } else {
                    "invalid assignment target"
                };
                return Err(self.error_at(message, span));
            }
        };
        Ok(Pattern::new(kind, span))
    }

    fn to_rest(&self, argument: Expr, span: Span, binding: bool) -> Result<Pattern, ParseError> {
        if matches!(argument.kind, ExprKind::AssignmentExpression { .. }) {
            return Err(self.error_at("rest element cannot have a default value", argument.span));
        }
        let argument = self.to_pattern(argument, binding)?;
        Ok(Pattern::new(
            PatternKind::RestElement {
                argument: Box::new(argument),
            },
            span,
        ))
    }

    /// Arrow parameters collected as call arguments, as in `async (a, ...b) =>`.
    pub(super) fn to_params(&self, arguments: Vec<Expr>) -> Result<Vec<Pattern>, ParseError> {
        let count = arguments.len();
        let mut params = Vec::with_capacity(count);
        for (index, argument) in arguments.into_iter().enumerate() {
            match argument.kind {
                ExprKind::SpreadElement { argument: inner } => {
                    if index + 1 != count {
                        return Err(self.error_at(
                            "rest parameter must be last formal parameter",
                            argument.span,
                        ));
                    }
                    params.push(self.to_rest(*inner, argument.span, true)?);
                }
                kind => params.push(self.to_pattern(Expr::new(kind, argument.span), true)?),
            }
        }
        Ok(params)
    }

    /// A binding pattern may not assign to member expressions.
    fn check_binding(&self, pattern: &Pattern) -> Result<(), ParseError> {
        match &pattern.kind {
            PatternKind::Identifier { .. } => Ok(()),
            PatternKind::MemberExpression { .. } => {
                Err(self.error_at("invalid destructuring target", pattern.span))
            }
            PatternKind::AssignmentPattern { left, .. } => self.check_binding(left),
            PatternKind::RestElement { argument } => self.check_binding(argument),
            PatternKind::ArrayPattern { elements } => elements
                .iter()
                .flatten()
                .try_for_each(|element| self.check_binding(element)),
            PatternKind::ObjectPattern { properties } => {
                properties.iter().try_for_each(|property| match &property.kind {
                    PatternProperty::ObjectProperty { value, .. } => self.check_binding(value),
                    PatternProperty::RestElement { argument } => self.check_binding(argument),
                })
            }
        }
    }
}
