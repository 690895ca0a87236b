use super::ast::{Stmt, StmtKind, SwitchCase};
use super::{LabelKind, Parser};
use crate::errors::ParseError;
use crate::lexer::token::TokenKind;

impl Parser<'_> {
    pub(super) fn parse_switch(&mut self) -> Result<Stmt, ParseError> {
        let start = self.start();
        self.expect(&TokenKind::Switch)?;
        let discriminant = self.parse_paren_expression()?;
        self.expect(&TokenKind::LeftBrace)?;

        let cases = self.with_breakable(LabelKind::Switch, |p| {
            let mut cases = Vec::new();
            let mut seen_default = false;
            while !p.check(&TokenKind::RightBrace) {
                let case_start = p.start();
                let test = match p.current.kind {
                    TokenKind::Case => {
                        p.advance()?;
                        Some(p.with_in_allowed(|p| p.parse_expression())?)
                    }
                    TokenKind::Default => {
                        if seen_default {
                            return Err(p.error_at(
                                "multiple `default` clauses in switch statement",
                                case_start,
                            ));
                        }
                        seen_default = true;
                        p.advance()?;
                        None
                    }
                    _ => return Err(p.expected("`case` or `default`")),
                };
                p.expect(&TokenKind::Colon)?;
                let consequent = p.parse_case_body()?;
                cases.push(p.finish(case_start, SwitchCase { test, consequent }));
            }
            Ok(cases)
        })?;

        self.expect(&TokenKind::RightBrace)?;
        Ok(self.finish(
            start,
            StmtKind::SwitchStatement {
                discriminant: Box::new(discriminant),
                cases,
            },
        ))
    }

    fn parse_case_body(&mut self) -> Result<Vec<Stmt>, ParseError> {
        let mut body = Vec::new();
        while !matches!(
            self.current.kind,
            TokenKind::Case | TokenKind::Default | TokenKind::RightBrace
        ) {
            if self.check(&TokenKind::Eof) {
                return Err(self.unexpected());
            }
            body.push(self.parse_statement()?);
        }
        Ok(body)
    }
}
