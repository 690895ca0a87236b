use super::Parser;
use super::ast::{
    AssignmentOperator, BinaryOperator, Expr, ExprKind, LogicalOperator, UnaryOperator,
};
use crate::errors::ParseError;
use crate::lexer::token::{Span, TokenKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum InfixOp {
    Logical(LogicalOperator),
    Binary(BinaryOperator),
}

/// Precedence of a binary operator token, loosest first. `in` is not an
/// operator while parsing a `for` head.
pub(super) fn infix_operator(kind: &TokenKind, no_in: bool) -> Option<(u8, InfixOp)> {
    use BinaryOperator as B;
    let binary = |prec, op| Some((prec, InfixOp::Binary(op)));
    match kind {
        TokenKind::PipePipe => Some((1, InfixOp::Logical(LogicalOperator::Or))),
        TokenKind::AmpAmp => Some((2, InfixOp::Logical(LogicalOperator::And))),
        TokenKind::Pipe => binary(3, B::BitOr),
        TokenKind::Caret => binary(4, B::BitXor),
        TokenKind::Amp => binary(5, B::BitAnd),
        TokenKind::EqEq => binary(6, B::EqEq),
        TokenKind::NotEq => binary(6, B::NotEq),
        TokenKind::EqEqEq => binary(6, B::EqEqEq),
        TokenKind::NotEqEq => binary(6, B::NotEqEq),
        TokenKind::Less => binary(7, B::Less),
        TokenKind::Greater => binary(7, B::Greater),
        TokenKind::LessEq => binary(7, B::LessEq),
        TokenKind::GreaterEq => binary(7, B::GreaterEq),
        TokenKind::Instanceof => binary(7, B::Instanceof),
        TokenKind::In if !no_in => binary(7, B::In),
        TokenKind::Shl => binary(8, B::Shl),
        TokenKind::Shr => binary(8, B::Shr),
        TokenKind::UShr => binary(8, B::UShr),
        TokenKind::Plus => binary(9, B::Add),
        TokenKind::Minus => binary(9, B::Sub),
        TokenKind::Star => binary(10, B::Mul),
        TokenKind::Slash => binary(10, B::Div),
        TokenKind::Percent => binary(10, B::Rem),
        TokenKind::StarStar => binary(11, B::Exp),
        _ => None,
    }
}

pub(super) fn unary_operator(kind: &TokenKind) -> Option<UnaryOperator> {
    Some(match kind {
        TokenKind::Minus => UnaryOperator::Minus,
        TokenKind::Plus => UnaryOperator::Plus,
        TokenKind::Bang => UnaryOperator::Not,
        TokenKind::Tilde => UnaryOperator::BitNot,
        TokenKind::Typeof => UnaryOperator::Typeof,
        TokenKind::Void => UnaryOperator::Void,
        TokenKind::Delete => UnaryOperator::Delete,
        _ => return None,
    })
}

pub(super) fn assignment_operator(kind: &TokenKind) -> Option<AssignmentOperator> {
    use AssignmentOperator as A;
    Some(match kind {
        TokenKind::Assign => A::Assign,
        TokenKind::PlusEquals => A::AddAssign,
        TokenKind::MinusEquals => A::SubAssign,
        TokenKind::StarEquals => A::MulAssign,
        TokenKind::SlashEquals => A::DivAssign,
        TokenKind::PercentEquals => A::RemAssign,
        TokenKind::StarStarEquals => A::ExpAssign,
        TokenKind::ShlEquals => A::ShlAssign,
        TokenKind::ShrEquals => A::ShrAssign,
        TokenKind::UShrEquals => A::UShrAssign,
        TokenKind::PipeEquals => A::BitOrAssign,
        TokenKind::CaretEquals => A::BitXorAssign,
        TokenKind::AmpEquals => A::BitAndAssign,
        _ => return None,
    })
}

impl Parser<'_> {
    /// Binary and logical expressions by precedence climbing.
    pub(super) fn parse_binary_expression(&mut self) -> Result<Expr, ParseError> {
        let start = self.start();
        let left_unary = self.at_unary_operator();
        let left = self.parse_unary()?;
        self.parse_binary_rhs(start, left, left_unary, 1)
    }

    fn parse_binary_rhs(
        &mut self,
        start: Span,
        mut left: Expr,
        mut left_unary: bool,
        min_prec: u8,
    ) -> Result<Expr, ParseError> {
        if self.is_bare_arrow(&left) {
            return Ok(left);
        }
        while let Some((prec, op)) = infix_operator(&self.current.kind, self.no_in) {
            if prec < min_prec {
                break;
            }
            let right_assoc = op == InfixOp::Binary(BinaryOperator::Exp);
            if right_assoc && left_unary {
                return Err(self.error_at(
                    "unary operator used immediately before `**` must be parenthesized",
                    left.span,
                ));
            }
            self.advance()?;

            let right_start = self.start();
            let right_unary = self.at_unary_operator();
            let right = self.parse_unary()?;
            if self.is_bare_arrow(&right) {
                return Err(self.error_at("arrow function must be parenthesized here", right.span));
            }
            let next_min = if right_assoc { prec } else { prec + 1 };
            let right = self.parse_binary_rhs(right_start, right, right_unary, next_min)?;

            let (left_box, right_box) = (Box::new(left), Box::new(right));
            left = self.finish(
                start,
                match op {
                    InfixOp::Logical(operator) => ExprKind::LogicalExpression {
                        operator,
                        left: left_box,
                        right: right_box,
                    },
                    InfixOp::Binary(operator) => ExprKind::BinaryExpression {
                        operator,
                        left: left_box,
                        right: right_box,
                    },
                },
            );
            left_unary = false;
        }
        Ok(left)
    }

    fn at_unary_operator(&self) -> bool {
        unary_operator(&self.current.kind).is_some()
            || (self.context.is_async && self.check_ident("await"))
    }
}
