use super::cursor::is_line_terminator;
use super::scanner::Scanner;
use super::token::{Position, TemplateChunk, TokenKind};
use crate::errors::ParseError;

impl Scanner<'_> {
    /// Scan a string literal; the opening quote is already consumed.
    pub(super) fn scan_string(
        &mut self,
        quote: char,
        start: usize,
        start_pos: Position,
    ) -> Result<TokenKind, ParseError> {
        let mut value = String::new();
        loop {
            match self.cursor.peek_char() {
                Some(c) if c == quote => {
                    self.cursor.advance();
                    return Ok(TokenKind::String(value));
                }
                Some('\\') => {
                    self.cursor.advance();
                    self.read_escape(&mut value, false, start, start_pos)?;
                }
                Some('\n' | '\r') => {
                    return Err(ParseError::unterminated(
                        "unterminated string literal: line break before closing quote",
                        self.span_from(start, start_pos),
                    ));
                }
                Some(c) => {
                    self.cursor.advance_char();
                    value.push(c);
                }
                None => {
                    return Err(ParseError::unterminated(
                        "unterminated string literal",
                        self.span_from(start, start_pos),
                    ));
                }
            }
        }
    }

    /// Scan template text up to a closing backtick or `${`. Called right
    /// after the opening backtick or the `}` that ends a substitution.
    pub(super) fn scan_template(
        &mut self,
        start: usize,
        start_pos: Position,
    ) -> Result<TokenKind, ParseError> {
        let content_start = self.cursor.pos();
        let mut cooked = String::new();
        let (content_end, tail) = loop {
            match self.cursor.peek_char() {
                Some('`') => {
                    let end = self.cursor.pos();
                    self.cursor.advance();
                    break (end, true);
                }
                Some('$') if self.cursor.peek_next() == Some(b'{') => {
                    let end = self.cursor.pos();
                    self.cursor.advance();
                    self.cursor.advance();
                    self.template_braces.push(0);
                    break (end, false);
                }
                Some('\\') => {
                    self.cursor.advance();
                    self.read_escape(&mut cooked, true, start, start_pos)?;
                }
                Some('\r') => {
                    self.cursor.advance();
                    self.cursor.match_char(b'\n');
                    cooked.push('\n');
                }
                Some(c) => {
                    self.cursor.advance_char();
                    cooked.push(c);
                }
                None => {
                    return Err(ParseError::unterminated(
                        "unterminated template literal",
                        self.span_from(start, start_pos),
                    ));
                }
            }
        };

        let raw = self.source[content_start..content_end]
            .replace("\r\n", "\n")
            .replace('\r', "\n");
        Ok(TokenKind::Template(TemplateChunk { cooked, raw, tail }))
    }

    /// Decode one escape sequence; the backslash is already consumed.
    /// Legacy octal escapes are accepted in strings but not in templates.
    fn read_escape(
        &mut self,
        out: &mut String,
        in_template: bool,
        start: usize,
        start_pos: Position,
    ) -> Result<(), ParseError> {
        let escape_start = self.cursor.pos() - 1;
        let escape_pos = Position::new(
            self.cursor.position().line,
            self.cursor.position().column.saturating_sub(1),
        );
        let Some(c) = self.cursor.advance_char() else {
            return Err(ParseError::unterminated(
                "unterminated literal",
                self.span_from(start, start_pos),
            ));
        };

        match c {
            // line continuation
            '\r' => {
                self.cursor.match_char(b'\n');
            }
            c if is_line_terminator(c) => {}
            'n' => out.push('\n'),
            't' => out.push('\t'),
            'r' => out.push('\r'),
            'b' => out.push('\u{08}'),
            'f' => out.push('\u{0C}'),
            'v' => out.push('\u{0B}'),
            '0' if !self.cursor.peek().is_some_and(|d| d.is_ascii_digit()) => out.push('\0'),
            '0'..='9' if in_template => {
                return Err(ParseError::invalid_escape(
                    "octal escape sequences are not allowed in templates",
                    self.span_from(escape_start, escape_pos),
                ));
            }
            '8' | '9' => out.push(c),
            '0'..='7' => out.push(self.read_legacy_octal(c)),
            'x' => {
                let code = self.read_hex_digits(2, escape_start, escape_pos)?;
                out.push(char::from_u32(code).unwrap_or(char::REPLACEMENT_CHARACTER));
            }
            'u' => {
                let code = self.read_unicode_escape(escape_start, escape_pos)?;
                out.push(self.finish_surrogate(code, escape_start, escape_pos)?);
            }
            other => out.push(other),
        }
        Ok(())
    }

    /// `\1`..`\377`: up to three octal digits, only two when the first
    /// is `4`..`7`.
    fn read_legacy_octal(&mut self, first: char) -> char {
        let mut code = first as u32 - '0' as u32;
        let max_digits = if first <= '3' { 3 } else { 2 };
        for _ in 1..max_digits {
            match self.cursor.peek() {
                Some(d @ b'0'..=b'7') => {
                    self.cursor.advance();
                    code = code * 8 + u32::from(d - b'0');
                }
                _ => break,
            }
        }
        char::from_u32(code).unwrap_or(char::REPLACEMENT_CHARACTER)
    }

    /// Pair a high surrogate with a following `\uDC00`..`\uDFFF` escape.
    /// Unpaired surrogates decode to U+FFFD.
    fn finish_surrogate(
        &mut self,
        code: u32,
        escape_start: usize,
        escape_pos: Position,
    ) -> Result<char, ParseError> {
        if (0xD800..=0xDBFF).contains(&code)
            && self.cursor.peek() == Some(b'\\')
            && self.cursor.peek_next() == Some(b'u')
        {
            let save = self.cursor.clone();
            self.cursor.advance();
            self.cursor.advance();
            let low = self.read_unicode_escape(escape_start, escape_pos)?;
            if (0xDC00..=0xDFFF).contains(&low) {
                let combined = 0x10000 + ((code - 0xD800) << 10) + (low - 0xDC00);
                return Ok(char::from_u32(combined).unwrap_or(char::REPLACEMENT_CHARACTER));
            }
            self.cursor = save;
        }
        Ok(char::from_u32(code).unwrap_or(char::REPLACEMENT_CHARACTER))
    }

    /// Read the code point of `XXXX` or `{X...}` after `\u`.
    pub(super) fn read_unicode_escape(
        &mut self,
        start: usize,
        start_pos: Position,
    ) -> Result<u32, ParseError> {
        if !self.cursor.match_char(b'{') {
            return self.read_hex_digits(4, start, start_pos);
        }
        let mut code: u32 = 0;
        let mut digits = 0;
        while let Some(d) = self.cursor.peek().and_then(|c| (c as char).to_digit(16)) {
            self.cursor.advance();
            code = code.saturating_mul(16).saturating_add(d);
            digits += 1;
        }
        if digits == 0 || code > 0x10FFFF || !self.cursor.match_char(b'}') {
            return Err(ParseError::invalid_escape(
                "invalid unicode escape sequence",
                self.span_from(start, start_pos),
            ));
        }
        Ok(code)
    }

    fn read_hex_digits(
        &mut self,
        count: usize,
        start: usize,
        start_pos: Position,
    ) -> Result<u32, ParseError> {
        let mut code = 0;
        for _ in 0..count {
            match self.cursor.peek().and_then(|c| (c as char).to_digit(16)) {
                Some(d) => {
                    self.cursor.advance();
                    code = code * 16 + d;
                }
                None => {
                    return Err(ParseError::invalid_escape(
                        "invalid hexadecimal escape sequence",
                        self.span_from(start, start_pos),
                    ));
                }
            }
        }
        Ok(code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn string_value(source: &str) -> String {
        match Scanner::new(source).next_token().unwrap().kind {
            TokenKind::String(s) => s,
            other => panic!("expected string, got {other:?}"),
        }
    }

    #[test]
    fn decodes_escapes() {
        assert_eq!(string_value(r#""a\nb\x41B\u{43}""#), "a\nbABC");
        assert_eq!(string_value(r#"'😀'"#), "\u{1F600}");
        assert_eq!(string_value(r#"'\uD83D'"#), "\u{FFFD}");
        assert_eq!(string_value("'a\\\nb'"), "ab");
        assert_eq!(string_value(r#"'\q\0'"#), "q\0");
    }

    #[test]
    fn decodes_legacy_octal_escapes() {
        assert_eq!(string_value(r#"'\101\7\08'"#), "A\u{7}\08");
        assert_eq!(string_value(r#"'\400'"#), " 0");
        assert_eq!(string_value(r#"'\8\9'"#), "89");
    }

    #[test]
    fn template_raw_normalizes_carriage_returns() {
        match Scanner::new("`a\r\nb\\n`").next_token().unwrap().kind {
            TokenKind::Template(chunk) => {
                assert_eq!(chunk.cooked, "a\nb\n");
                assert_eq!(chunk.raw, "a\nb\\n");
                assert!(chunk.tail);
            }
            other => panic!("expected template, got {other:?}"),
        }
    }
}
