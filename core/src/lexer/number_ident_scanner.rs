use super::scanner::{Scanner, is_ident_part, is_ident_start};
use super::token::{Position, TokenKind};
use crate::errors::ParseError;

impl<'src> Scanner<'src> {
    /// Scan a numeric literal whose first character (a digit or `.`)
    /// has already been consumed.
    pub(super) fn scan_number(
        &mut self,
        first: char,
        start: usize,
        start_pos: Position,
    ) -> Result<TokenKind, ParseError> {
        let value = if first == '0' {
            match self.cursor.peek() {
                Some(b'x' | b'X') => self.scan_radix_digits(16, start, start_pos)?,
                Some(b'o' | b'O') => self.scan_radix_digits(8, start, start_pos)?,
                Some(b'b' | b'B') => self.scan_radix_digits(2, start, start_pos)?,
                Some(c) if c.is_ascii_digit() => self.scan_legacy_octal(start, start_pos)?,
                _ => self.scan_decimal(first, start, start_pos)?,
            }
        } else {
            self.scan_decimal(first, start, start_pos)?
        };

        if self
            .cursor
            .peek_char()
            .is_some_and(|c| c == '\\' || is_ident_start(c) || c.is_ascii_digit())
        {
            return Err(ParseError::invalid_escape(
                "identifier starts immediately after numeric literal",
                self.span_from(start, start_pos),
            ));
        }
        Ok(TokenKind::Number(value))
    }

    fn scan_radix_digits(
        &mut self,
        radix: u32,
        start: usize,
        start_pos: Position,
    ) -> Result<f64, ParseError> {
        self.cursor.advance(); // prefix letter
        let mut value = 0.0;
        let mut digits = 0;
        while let Some(digit) = self.cursor.peek().and_then(|c| (c as char).to_digit(radix)) {
            self.cursor.advance();
            value = value * radix as f64 + digit as f64;
            digits += 1;
        }
        if digits == 0 {
            return Err(ParseError::invalid_escape(
                format!("expected base-{radix} digits after prefix"),
                self.span_from(start, start_pos),
            ));
        }
        Ok(value)
    }

    /// `017` is octal; `019` falls back to a decimal literal.
    fn scan_legacy_octal(&mut self, start: usize, start_pos: Position) -> Result<f64, ParseError> {
        self.skip_digits();
        let text = self.cursor.slice_from(start);
        if text.bytes().all(|c| (b'0'..=b'7').contains(&c)) {
            return Ok(text
                .bytes()
                .fold(0.0, |acc, c| acc * 8.0 + (c - b'0') as f64));
        }
        self.scan_decimal_tail(text.to_string(), start, start_pos)
    }

    fn scan_decimal(
        &mut self,
        first: char,
        start: usize,
        start_pos: Position,
    ) -> Result<f64, ParseError> {
        if first == '.' {
            let frac_start = self.cursor.pos();
            self.skip_digits();
            let fraction = self.cursor.slice_from(frac_start).to_string();
            return self.scan_exponent(String::new(), fraction, start, start_pos);
        }
        self.skip_digits();
        let integer = self.cursor.slice_from(start).to_string();
        self.scan_decimal_tail(integer, start, start_pos)
    }

    fn scan_decimal_tail(
        &mut self,
        integer: String,
        start: usize,
        start_pos: Position,
    ) -> Result<f64, ParseError> {
        let mut fraction = String::new();
        if self.cursor.match_char(b'.') {
            let frac_start = self.cursor.pos();
            self.skip_digits();
            fraction.push_str(self.cursor.slice_from(frac_start));
        }
        self.scan_exponent(integer, fraction, start, start_pos)
    }

    fn scan_exponent(
        &mut self,
        integer: String,
        fraction: String,
        start: usize,
        start_pos: Position,
    ) -> Result<f64, ParseError> {
        let mut sign = "";
        let mut exponent = String::new();
        if matches!(self.cursor.peek(), Some(b'e' | b'E')) {
            self.cursor.advance();
            if self.cursor.match_char(b'-') {
                sign = "-";
            } else {
                self.cursor.match_char(b'+');
            }
            let exp_start = self.cursor.pos();
            self.skip_digits();
            exponent.push_str(self.cursor.slice_from(exp_start));
            if exponent.is_empty() {
                return Err(ParseError::invalid_escape(
                    "malformed exponent in numeric literal",
                    self.span_from(start, start_pos),
                ));
            }
        }

        let normalized = format!(
            "{}.{}e{sign}{}",
            or_zero(&integer),
            or_zero(&fraction),
            or_zero(&exponent)
        );
        normalized.parse::<f64>().map_err(|_| {
            ParseError::invalid_escape(
                "malformed numeric literal",
                self.span_from(start, start_pos),
            )
        })
    }

    fn skip_digits(&mut self) {
        while self.cursor.peek().is_some_and(|c| c.is_ascii_digit()) {
            self.cursor.advance();
        }
    }

    /// Scan an identifier or keyword. `first` is the already consumed
    /// start character, or `None` when the name opened with a `\`.
    pub(super) fn scan_identifier(
        &mut self,
        first: Option<char>,
        start: usize,
        start_pos: Position,
    ) -> Result<TokenKind, ParseError> {
        let mut name = String::new();
        let mut escaped = false;
        match first {
            Some(c) => name.push(c),
            None => {
                name.push(self.identifier_escape(true, start, start_pos)?);
                escaped = true;
            }
        }

        loop {
            match self.cursor.peek_char() {
                Some('\\') => {
                    self.cursor.advance();
                    name.push(self.identifier_escape(false, start, start_pos)?);
                    escaped = true;
                }
                Some(c) if is_ident_part(c) => {
                    self.cursor.advance_char();
                    name.push(c);
                }
                _ => break,
            }
        }

        match TokenKind::keyword(&name) {
            Some(_) if escaped => Err(ParseError::invalid_escape(
                format!("keyword `{name}` must not contain escape sequences"),
                self.span_from(start, start_pos),
            )),
            Some(keyword) => Ok(keyword),
            None => Ok(TokenKind::Ident(name)),
        }
    }

    /// Decode `\uXXXX` or `\u{X}` inside an identifier, backslash consumed.
    fn identifier_escape(
        &mut self,
        at_start: bool,
        start: usize,
        start_pos: Position,
    ) -> Result<char, ParseError> {
        let invalid = |scanner: &Self| {
            ParseError::invalid_escape(
                "invalid unicode escape sequence in identifier",
                scanner.span_from(start, start_pos),
            )
        };
        if !self.cursor.match_char(b'u') {
            return Err(invalid(self));
        }
        let code = self.read_unicode_escape(start, start_pos)?;
        match char::from_u32(code) {
            Some(c) if at_start && is_ident_start(c) => Ok(c),
            Some(c) if !at_start && is_ident_part(c) => Ok(c),
            _ => Err(invalid(self)),
        }
    }
}

fn or_zero(digits: &str) -> &str {
    if digits.is_empty() { "0" } else { digits }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn number(source: &str) -> f64 {
        match Scanner::new(source).next_token().unwrap().kind {
            TokenKind::Number(n) => n,
            other => panic!("expected number, got {other:?}"),
        }
    }

    #[test]
    fn numeric_forms() {
        assert_eq!(number("0x1F"), 31.0);
        assert_eq!(number("0o17"), 15.0);
        assert_eq!(number("0b101"), 5.0);
        assert_eq!(number("017"), 15.0);
        assert_eq!(number("019"), 19.0);
        assert_eq!(number(".5"), 0.5);
        assert_eq!(number("5."), 5.0);
        assert_eq!(number("1.5e3"), 1500.0);
        assert_eq!(number("2E-2"), 0.02);
    }

    #[test]
    fn escaped_identifier_is_decoded() {
        let token = Scanner::new("\\u0061b").next_token().unwrap();
        assert_eq!(token.kind, TokenKind::Ident("ab".into()));
        assert_eq!(token.lexeme, "\\u0061b");
    }
}
