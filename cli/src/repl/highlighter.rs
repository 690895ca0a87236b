use std::borrow::Cow;

use kaiju::lexer::scanner::Scanner;
use kaiju::lexer::token::{TokenCategory, TokenKind};
use owo_colors::OwoColorize;

/// Color a line token by token. Text between tokens (whitespace and
/// comments) and anything after a lexical error is left as typed.
pub fn highlight_line(line: &str) -> Cow<'_, str> {
    let mut out = String::with_capacity(line.len() * 2);
    let mut last = 0;
    for token in Scanner::new(line) {
        let Ok(token) = token else { break };
        if token.kind == TokenKind::Eof {
            break;
        }
        out.push_str(&line[last..token.span.start]);
        let text = token.lexeme;
        let styled = match token.kind.category() {
            TokenCategory::Keyword => text.blue().bold().to_string(),
            TokenCategory::Number => text.yellow().to_string(),
            TokenCategory::String | TokenCategory::Template => text.green().to_string(),
            TokenCategory::Regex => text.magenta().to_string(),
            TokenCategory::Identifier => text.to_string(),
            TokenCategory::Punctuator | TokenCategory::EndOfInput => text.bright_black().to_string(),
        };
        out.push_str(&styled);
        last = token.span.end;
    }
    out.push_str(&line[last..]);
    Cow::Owned(out)
}

/// The primary prompt is magenta while entries parse as modules.
pub fn highlight_prompt(prompt: &str, module: bool) -> Cow<'_, str> {
    if prompt == "> " {
        let marker = if module {
            ">".magenta().bold().to_string()
        } else {
            ">".bright_green().bold().to_string()
        };
        return Cow::Owned(format!("{marker} "));
    }
    if prompt == "... " {
        return Cow::Owned(format!("{} ", "...".yellow().bold()));
    }
    Cow::Borrowed(prompt)
}

pub fn highlight_hint(hint: &str) -> Cow<'_, str> {
    Cow::Owned(hint.bright_black().to_string())
}
