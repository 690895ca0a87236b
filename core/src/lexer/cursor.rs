use super::token::Position;

/// Character-level reader over the source string.
///
/// Works on bytes but keeps line and column in step with the characters
/// it passes, so every offset it reports has a matching [`Position`].
#[derive(Debug, Clone)]
pub struct Cursor<'src> {
    source: &'src str,
    pos: usize,
    line: usize,
    column: usize,
}

impl<'src> Cursor<'src> {
    pub fn new(source: &'src str) -> Self {
        Self {
            source,
            pos: 0,
            line: 1,
            column: 0,
        }
    }

    /// Current byte position in the source.
    pub fn pos(&self) -> usize {
        self.pos
    }

    /// Line and column of the current byte position.
    pub fn position(&self) -> Position {
        Position::new(self.line, self.column)
    }

    /// Move back (or forward) to a previously observed offset.
    pub fn reset(&mut self, pos: usize, at: Position) {
        self.pos = pos;
        self.line = at.line;
        self.column = at.column;
    }

    /// Peek at the current byte without advancing.
    pub fn peek(&self) -> Option<u8> {
        self.source.as_bytes().get(self.pos).copied()
    }

    /// Peek at the next byte (one ahead of current).
    pub fn peek_next(&self) -> Option<u8> {
        self.peek_at(1)
    }

    pub fn peek_at(&self, n: usize) -> Option<u8> {
        self.source.as_bytes().get(self.pos + n).copied()
    }

    /// Decode the character starting at the current position.
    pub fn peek_char(&self) -> Option<char> {
        self.source.get(self.pos..)?.chars().next()
    }

    /// Advance one byte and return it.
    pub fn advance(&mut self) -> Option<u8> {
        let ch = self.peek()?;
        match ch {
            b'\n' => self.new_line(),
            b'\r' if self.peek_next() != Some(b'\n') => self.new_line(),
            0xE2 if self.at_unicode_line_separator() => self.new_line(),
            // continuation bytes belong to the character already counted
            c if c & 0xC0 == 0x80 => {}
            _ => self.column += 1,
        }
        self.pos += 1;
        Some(ch)
    }

    /// Advance over one whole character and return it.
    pub fn advance_char(&mut self) -> Option<char> {
        let ch = self.peek_char()?;
        for _ in 0..ch.len_utf8() {
            self.advance();
        }
        Some(ch)
    }

    /// Advance if the current byte matches `expected`.
    pub fn match_char(&mut self, expected: u8) -> bool {
        if self.peek() == Some(expected) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Return a slice of the source from `start` to the current position.
    pub fn slice_from(&self, start: usize) -> &'src str {
        &self.source[start..self.pos]
    }

    /// Whether the cursor has reached the end.
    pub fn is_at_end(&self) -> bool {
        self.pos >= self.source.len()
    }

    /// Byte length of the line terminator at the cursor, if any.
    pub fn line_terminator_len(&self) -> Option<usize> {
        match self.peek()? {
            b'\r' if self.peek_next() == Some(b'\n') => Some(2),
            b'\r' | b'\n' => Some(1),
            0xE2 if self.at_unicode_line_separator() => Some(3),
            _ => None,
        }
    }

    fn at_unicode_line_separator(&self) -> bool {
        self.peek_next() == Some(0x80) && matches!(self.peek_at(2), Some(0xA8 | 0xA9))
    }

    fn new_line(&mut self) {
        self.line += 1;
        self.column = 0;
    }
}

/// JavaScript line terminators: LF, CR, LS and PS.
pub fn is_line_terminator(ch: char) -> bool {
    matches!(ch, '\n' | '\r' | '\u{2028}' | '\u{2029}')
}
