use super::Parser;
use crate::errors::ParseError;
use crate::lexer::token::TokenKind;

impl Parser<'_> {
    /// End a statement at `;`, before `}` or end of input, or at a line break.
    pub(super) fn consume_stmt_terminator(&mut self) -> Result<(), ParseError> {
        if self.eat(&TokenKind::Semicolon)? {
            return Ok(());
        }
        if self.check(&TokenKind::RightBrace)
            || self.check(&TokenKind::Eof)
            || self.current.newline_before
        {
            return Ok(());
        }
        Err(self.unexpected())
    }

    /// `return`, `break` and `continue` take nothing after a line break.
    pub(super) fn at_statement_end(&self) -> bool {
        matches!(
            self.current.kind,
            TokenKind::Semicolon | TokenKind::RightBrace | TokenKind::Eof
        ) || self.current.newline_before
    }
}
