pub mod cursor;
mod number_ident_scanner;
pub mod scanner;
mod string_scanner;
pub mod token;

use crate::errors::ParseError;
use token::Token;

/// Tokenize a whole source text. The last token is always `Eof`.
pub fn lex(source: &str) -> Result<Vec<Token<'_>>, ParseError> {
    scanner::Scanner::new(source).collect()
}
