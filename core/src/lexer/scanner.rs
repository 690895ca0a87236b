use super::cursor::{Cursor, is_line_terminator};
use super::token::{CommentTrivia, Position, Span, Token, TokenKind};
use crate::errors::ParseError;

/// Produces tokens from source text one at a time.
///
/// The scanner is cheap to clone, which the parser uses for the rare
/// places that need more than one token of lookahead.
#[derive(Debug, Clone)]
pub struct Scanner<'src> {
    pub(super) cursor: Cursor<'src>,
    pub(super) source: &'src str,
    /// Open `{` count for every template substitution we are inside of.
    pub(super) template_braces: Vec<usize>,
    done: bool,
    record_comments: bool,
    /// Comments skipped since the last `take_comments`.
    comments: Vec<CommentTrivia>,
}

impl<'src> Scanner<'src> {
    pub fn new(source: &'src str) -> Self {
        let mut scanner = Self {
            cursor: Cursor::new(source),
            source,
            template_braces: Vec::new(),
            done: false,
            record_comments: false,
            comments: Vec::new(),
        };
        if source.starts_with("#!") {
            while scanner
                .cursor
                .peek_char()
                .is_some_and(|c| !is_line_terminator(c))
            {
                scanner.cursor.advance_char();
            }
        }
        scanner
    }

    pub fn source(&self) -> &'src str {
        self.source
    }

    /// Keep the comments skipped between tokens for `take_comments`.
    pub fn with_comments(mut self) -> Self {
        self.record_comments = true;
        self
    }

    pub fn take_comments(&mut self) -> Vec<CommentTrivia> {
        std::mem::take(&mut self.comments)
    }

    fn record_comment(&mut self, block: bool, start: usize, start_pos: Position) {
        if self.record_comments {
            let span = self.span_from(start, start_pos);
            self.comments.push(CommentTrivia { block, span });
        }
    }

    /// Scan the next token. Once the input is exhausted every call
    /// returns an `Eof` token positioned at the end of the source.
    pub fn next_token(&mut self) -> Result<Token<'src>, ParseError> {
        let newline_before = self.skip_whitespace_and_comments()?;

        let start = self.cursor.pos();
        let start_pos = self.cursor.position();
        let Some(ch) = self.cursor.advance_char() else {
            return Ok(Token {
                kind: TokenKind::Eof,
                lexeme: "",
                span: Span::point(start, start_pos),
                newline_before,
            });
        };

        let kind = match ch {
            '(' => TokenKind::LeftParen,
            ')' => TokenKind::RightParen,
            '[' => TokenKind::LeftBracket,
            ']' => TokenKind::RightBracket,
            ';' => TokenKind::Semicolon,
            ',' => TokenKind::Comma,
            ':' => TokenKind::Colon,
            '?' => TokenKind::Question,
            '~' => TokenKind::Tilde,
            '{' => {
                if let Some(depth) = self.template_braces.last_mut() {
                    *depth += 1;
                }
                TokenKind::LeftBrace
            }
            '}' => match self.template_braces.last_mut() {
                Some(0) => {
                    self.template_braces.pop();
                    self.scan_template(start, start_pos)?
                }
                Some(depth) => {
                    *depth -= 1;
                    TokenKind::RightBrace
                }
                None => TokenKind::RightBrace,
            },
            '.' => {
                if self.cursor.peek().is_some_and(|c| c.is_ascii_digit()) {
                    self.scan_number('.', start, start_pos)?
                } else if self.cursor.peek() == Some(b'.') && self.cursor.peek_next() == Some(b'.')
                {
                    self.cursor.advance();
                    self.cursor.advance();
                    TokenKind::DotDotDot
                } else {
                    TokenKind::Dot
                }
            }
            '+' => {
                if self.cursor.match_char(b'+') {
                    TokenKind::PlusPlus
                } else if self.cursor.match_char(b'=') {
                    TokenKind::PlusEquals
                } else {
                    TokenKind::Plus
                }
            }
            '-' => {
                if self.cursor.match_char(b'-') {
                    TokenKind::MinusMinus
                } else if self.cursor.match_char(b'=') {
                    TokenKind::MinusEquals
                } else {
                    TokenKind::Minus
                }
            }
            '*' => {
                if self.cursor.match_char(b'*') {
                    if self.cursor.match_char(b'=') {
                        TokenKind::StarStarEquals
                    } else {
                        TokenKind::StarStar
                    }
                } else if self.cursor.match_char(b'=') {
                    TokenKind::StarEquals
                } else {
                    TokenKind::Star
                }
            }
            '/' => {
                if self.cursor.match_char(b'=') {
                    TokenKind::SlashEquals
                } else {
                    TokenKind::Slash
                }
            }
            '%' => {
                if self.cursor.match_char(b'=') {
                    TokenKind::PercentEquals
                } else {
                    TokenKind::Percent
                }
            }
            '<' => {
                if self.cursor.match_char(b'<') {
                    if self.cursor.match_char(b'=') {
                        TokenKind::ShlEquals
                    } else {
                        TokenKind::Shl
                    }
                } else if self.cursor.match_char(b'=') {
                    TokenKind::LessEq
                } else {
                    TokenKind::Less
                }
            }
            '>' => {
                if self.cursor.match_char(b'>') {
                    if self.cursor.match_char(b'>') {
                        if self.cursor.match_char(b'=') {
                            TokenKind::UShrEquals
                        } else {
                            TokenKind::UShr
                        }
                    } else if self.cursor.match_char(b'=') {
                        TokenKind::ShrEquals
                    } else {
                        TokenKind::Shr
                    }
                } else if self.cursor.match_char(b'=') {
                    TokenKind::GreaterEq
                } else {
                    TokenKind::Greater
                }
            }
            '=' => {
                if self.cursor.match_char(b'=') {
                    if self.cursor.match_char(b'=') {
                        TokenKind::EqEqEq
                    } else {
                        TokenKind::EqEq
                    }
                } else if self.cursor.match_char(b'>') {
                    TokenKind::Arrow
                } else {
                    TokenKind::Assign
                }
            }
            '!' => {
                if self.cursor.match_char(b'=') {
                    if self.cursor.match_char(b'=') {
                        TokenKind::NotEqEq
                    } else {
                        TokenKind::NotEq
                    }
                } else {
                    TokenKind::Bang
                }
            }
            '&' => {
                if self.cursor.match_char(b'&') {
                    TokenKind::AmpAmp
                } else if self.cursor.match_char(b'=') {
                    TokenKind::AmpEquals
                } else {
                    TokenKind::Amp
                }
            }
            '|' => {
                if self.cursor.match_char(b'|') {
                    TokenKind::PipePipe
                } else if self.cursor.match_char(b'=') {
                    TokenKind::PipeEquals
                } else {
                    TokenKind::Pipe
                }
            }
            '^' => {
                if self.cursor.match_char(b'=') {
                    TokenKind::CaretEquals
                } else {
                    TokenKind::Caret
                }
            }
            '"' | '\'' => self.scan_string(ch, start, start_pos)?,
            '`' => self.scan_template(start, start_pos)?,
            c if c.is_ascii_digit() => self.scan_number(c, start, start_pos)?,
            '\\' => self.scan_identifier(None, start, start_pos)?,
            c if is_ident_start(c) => self.scan_identifier(Some(c), start, start_pos)?,
            other => {
                return Err(ParseError::unexpected_token(
                    format!("unexpected character `{other}`"),
                    self.span_from(start, start_pos),
                ));
            }
        };

        Ok(self.make_token(kind, start, start_pos, newline_before))
    }

    /// Re-read a `/` or `/=` token as the start of a regular expression.
    pub fn rescan_regex(&mut self, slash: &Token<'src>) -> Result<Token<'src>, ParseError> {
        let start = slash.span.start;
        let start_pos = slash.span.loc.start;
        self.cursor.reset(
            start + 1,
            Position::new(start_pos.line, start_pos.column + 1),
        );

        let mut in_class = false;
        loop {
            match self.cursor.peek_char() {
                None => {
                    return Err(ParseError::unterminated(
                        "unterminated regular expression",
                        self.span_from(start, start_pos),
                    ));
                }
                Some(c) if is_line_terminator(c) => {
                    return Err(ParseError::unterminated(
                        "unterminated regular expression: line break in pattern",
                        self.span_from(start, start_pos),
                    ));
                }
                Some('/') if !in_class => break,
                Some('\\') => {
                    self.cursor.advance();
                    if self
                        .cursor
                        .peek_char()
                        .is_none_or(is_line_terminator)
                    {
                        continue;
                    }
                    self.cursor.advance_char();
                }
                Some(c) => {
                    match c {
                        '[' => in_class = true,
                        ']' => in_class = false,
                        _ => {}
                    }
                    self.cursor.advance_char();
                }
            }
        }
        let pattern = self.source[start + 1..self.cursor.pos()].to_string();
        self.cursor.advance();

        let flags_start = self.cursor.pos();
        while self.cursor.peek_char().is_some_and(is_ident_part) {
            self.cursor.advance_char();
        }
        let flags = self.cursor.slice_from(flags_start).to_string();

        Ok(self.make_token(
            TokenKind::Regex { pattern, flags },
            start,
            start_pos,
            slash.newline_before,
        ))
    }

    /// Skip whitespace and comments, reporting whether a line
    /// terminator was crossed.
    fn skip_whitespace_and_comments(&mut self) -> Result<bool, ParseError> {
        let mut newline = false;
        loop {
            match self.cursor.peek_char() {
                Some(c) if is_line_terminator(c) => {
                    newline = true;
                    self.cursor.advance_char();
                }
                Some(c) if is_whitespace(c) => {
                    self.cursor.advance_char();
                }
                Some('/') if self.cursor.peek_next() == Some(b'/') => {
                    let start = self.cursor.pos();
                    let start_pos = self.cursor.position();
                    while self
                        .cursor
                        .peek_char()
                        .is_some_and(|c| !is_line_terminator(c))
                    {
                        self.cursor.advance_char();
                    }
                    self.record_comment(false, start, start_pos);
                }
                Some('/') if self.cursor.peek_next() == Some(b'*') => {
                    let start = self.cursor.pos();
                    let start_pos = self.cursor.position();
                    self.cursor.advance();
                    self.cursor.advance();
                    loop {
                        match self.cursor.peek_char() {
                            Some('*') if self.cursor.peek_next() == Some(b'/') => {
                                self.cursor.advance();
                                self.cursor.advance();
                                self.record_comment(true, start, start_pos);
                                break;
                            }
                            Some(c) => {
                                newline |= is_line_terminator(c);
                                self.cursor.advance_char();
                            }
                            None => {
                                return Err(ParseError::unterminated(
                                    "unterminated comment",
                                    self.span_from(start, start_pos),
                                ));
                            }
                        }
                    }
                }
                _ => return Ok(newline),
            }
        }
    }

    fn make_token(
        &self,
        kind: TokenKind,
        start: usize,
        start_pos: Position,
        newline_before: bool,
    ) -> Token<'src> {
        Token {
            kind,
            lexeme: &self.source[start..self.cursor.pos()],
            span: self.span_from(start, start_pos),
            newline_before,
        }
    }

    /// Span from `start` up to the cursor.
    pub(super) fn span_from(&self, start: usize, start_pos: Position) -> Span {
        Span::new(start, self.cursor.pos(), start_pos, self.cursor.position())
    }
}

impl<'src> Iterator for Scanner<'src> {
    type Item = Result<Token<'src>, ParseError>;

    /// Yields every token up to and including `Eof`, or stops after the
    /// first error.
    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let result = self.next_token();
        if result
            .as_ref()
            .map_or(true, |token| token.kind == TokenKind::Eof)
        {
            self.done = true;
        }
        Some(result)
    }
}

fn is_whitespace(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\u{0B}' | '\u{0C}' | '\u{A0}' | '\u{FEFF}')
        || (c.is_whitespace() && !is_line_terminator(c))
}

pub(super) fn is_ident_start(c: char) -> bool {
    c == '$' || c == '_' || c.is_alphabetic()
}

pub(super) fn is_ident_part(c: char) -> bool {
    is_ident_start(c) || c.is_alphanumeric() || c == '\u{200C}' || c == '\u{200D}'
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        Scanner::new(source)
            .map(|token| token.map(|t| t.kind))
            .collect::<Result<_, _>>()
            .unwrap()
    }

    #[test]
    fn iterator_stops_after_eof() {
        let mut scanner = Scanner::new("a");
        assert!(matches!(scanner.next(), Some(Ok(Token { kind: TokenKind::Ident(_), .. }))));
        assert!(matches!(scanner.next(), Some(Ok(Token { kind: TokenKind::Eof, .. }))));
        assert!(scanner.next().is_none());
    }

    #[test]
    fn longest_punctuator_wins() {
        assert_eq!(
            kinds(">>>= **= ... => !== <<"),
            vec![
                TokenKind::UShrEquals,
                TokenKind::StarStarEquals,
                TokenKind::DotDotDot,
                TokenKind::Arrow,
                TokenKind::NotEqEq,
                TokenKind::Shl,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn records_comments_only_when_asked() {
        let source = "a // one\n/* two */ b";
        let mut scanner = Scanner::new(source).with_comments();
        while scanner.next().is_some() {}
        let comments = scanner.take_comments();
        assert_eq!(comments.len(), 2);
        assert!(!comments[0].block);
        assert_eq!((comments[0].span.start, comments[0].span.end), (2, 8));
        assert_eq!(comments[0].text(source), " one");
        assert!(comments[1].block);
        assert_eq!(comments[1].text(source), " two ");
        assert!(scanner.take_comments().is_empty());

        let mut plain = Scanner::new(source);
        while plain.next().is_some() {}
        assert!(plain.take_comments().is_empty());
    }

    #[test]
    fn skips_hashbang_line() {
        assert_eq!(
            kinds("#!/usr/bin/env node\nx"),
            vec![TokenKind::Ident("x".into()), TokenKind::Eof]
        );
    }
}
