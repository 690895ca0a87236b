use std::fmt;

use miette::Diagnostic;
use thiserror::Error;

use crate::lexer::token::Span;

/// Classification of a syntax failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseErrorKind {
    /// Grammar violation or a character that starts no token.
    UnexpectedToken,
    /// String, template, regex or comment not closed in time.
    UnterminatedLiteral,
    /// Malformed escape sequence or numeric literal.
    InvalidEscape,
    /// Input ended in the middle of a construct.
    UnexpectedEndOfInput,
}

impl fmt::Display for ParseErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            ParseErrorKind::UnexpectedToken => "unexpected token",
            ParseErrorKind::UnterminatedLiteral => "unterminated literal",
            ParseErrorKind::InvalidEscape => "invalid escape",
            ParseErrorKind::UnexpectedEndOfInput => "unexpected end of input",
        };
        f.write_str(text)
    }
}

#[derive(Debug, Clone, PartialEq, Error, Diagnostic)]
#[error("SyntaxError: {message} ({line}:{column})")]
#[diagnostic(code(kaiju::syntax), help("check the syntax around this location"))]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub message: String,
    pub offset: usize,
    pub line: usize,
    pub column: usize,

    #[label("here")]
    pub span: miette::SourceSpan,
}

impl ParseError {
    pub fn new(kind: ParseErrorKind, message: impl Into<String>, span: Span) -> Self {
        Self {
            kind,
            message: message.into(),
            offset: span.start,
            line: span.loc.start.line,
            column: span.loc.start.column,
            span: (span.start, span.len()).into(),
        }
    }

    pub fn unexpected_token(message: impl Into<String>, span: Span) -> Self {
        Self::new(ParseErrorKind::UnexpectedToken, message, span)
    }

    pub fn unterminated(message: impl Into<String>, span: Span) -> Self {
        Self::new(ParseErrorKind::UnterminatedLiteral, message, span)
    }

    pub fn invalid_escape(message: impl Into<String>, span: Span) -> Self {
        Self::new(ParseErrorKind::InvalidEscape, message, span)
    }

    pub fn unexpected_end(span: Span) -> Self {
        Self::new(
            ParseErrorKind::UnexpectedEndOfInput,
            "unexpected end of input",
            span,
        )
    }

    /// The input could be completed by appending more text.
    pub fn is_incomplete_input(&self) -> bool {
        match self.kind {
            ParseErrorKind::UnexpectedEndOfInput => true,
            ParseErrorKind::UnterminatedLiteral => !self.message.contains("line break"),
            _ => false,
        }
    }
}
