use kaiju::lexer::scanner::Scanner;
use kaiju::lexer::token::TokenKind;
use rustyline::completion::Pair;

const COMMANDS: [&str; 7] = [".help", ".module", ".script", ".print", ".json", ".load", ".exit"];

const KEYWORDS: [&str; 36] = [
    "async", "await", "break", "case", "catch", "class", "const", "continue", "debugger",
    "default", "delete", "do", "else", "export", "extends", "false", "finally", "for",
    "function", "if", "import", "in", "instanceof", "let", "new", "null", "return", "super",
    "switch", "this", "throw", "true", "try", "typeof", "while", "yield",
];

/// Complete REPL commands at the start of a line, otherwise keywords and
/// identifiers already used earlier in the same line.
pub fn complete_line(line: &str, pos: usize) -> (usize, Vec<Pair>) {
    let safe_pos = pos.min(line.len());
    let prefix = &line[..safe_pos];

    if prefix.starts_with('.') && !prefix.contains(' ') {
        let commands = COMMANDS
            .iter()
            .copied()
            .filter(|cmd| cmd.starts_with(prefix))
            .map(str::to_string)
            .collect::<Vec<_>>();
        return (0, pairs(commands));
    }

    let start = word_start(prefix);
    let needle = &prefix[start..];
    if needle.is_empty() {
        return (start, Vec::new());
    }

    let mut words = KEYWORDS
        .iter()
        .map(|kw| kw.to_string())
        .chain(identifiers(&line[..start]))
        .filter(|word| word.starts_with(needle) && word != needle)
        .collect::<Vec<_>>();
    words.sort();
    words.dedup();
    (start, pairs(words))
}

/// Identifier names in `source`, up to the first lexical error.
fn identifiers(source: &str) -> Vec<String> {
    Scanner::new(source)
        .map_while(Result::ok)
        .filter_map(|token| match token.kind {
            TokenKind::Ident(name) => Some(name),
            _ => None,
        })
        .collect()
}

fn pairs(values: Vec<String>) -> Vec<Pair> {
    values
        .into_iter()
        .map(|v| Pair {
            display: v.clone(),
            replacement: v,
        })
        .collect()
}

fn word_start(prefix: &str) -> usize {
    prefix
        .char_indices()
        .rev()
        .find(|(_, ch)| !is_ident_char(*ch))
        .map_or(0, |(idx, ch)| idx + ch.len_utf8())
}

fn is_ident_char(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '_' || ch == '$'
}

#[cfg(test)]
mod tests {
    use super::*;

    fn replacements(line: &str) -> Vec<String> {
        complete_line(line, line.len())
            .1
            .into_iter()
            .map(|pair| pair.replacement)
            .collect()
    }

    #[test]
    fn completes_commands() {
        assert_eq!(replacements(".mo"), vec![".module"]);
    }

    #[test]
    fn completes_keywords_and_seen_identifiers() {
        assert_eq!(replacements("let counter = 1; cou"), vec!["counter"]);
        assert_eq!(replacements("x instanceof Foo; fu"), vec!["function"]);
    }
}
