use kaiju::lexer::lex;
use kaiju::lexer::scanner::Scanner;
use kaiju::lexer::token::{TokenCategory, TokenKind};

fn token_kinds(source: &str) -> Vec<TokenKind> {
    lex(source)
        .expect("lexing failed")
        .into_iter()
        .map(|token| token.kind)
        .collect()
}

fn number(source: &str) -> f64 {
    match token_kinds(source).first() {
        Some(TokenKind::Number(value)) => *value,
        other => panic!("expected a number for {source:?}, got {other:?}"),
    }
}

fn string(source: &str) -> String {
    match token_kinds(source).first() {
        Some(TokenKind::String(value)) => value.clone(),
        other => panic!("expected a string for {source:?}, got {other:?}"),
    }
}

#[test]
fn test_simple_statement() {
    assert_eq!(
        token_kinds("let x = 42;"),
        vec![
            TokenKind::Let,
            TokenKind::Ident("x".into()),
            TokenKind::Assign,
            TokenKind::Number(42.0),
            TokenKind::Semicolon,
            TokenKind::Eof,
        ]
    );
}

#[test]
fn test_empty_source_is_just_eof() {
    let tokens = lex("  // only a comment\n").expect("lexing failed");
    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].kind, TokenKind::Eof);
    assert_eq!(tokens[0].span.start, 20);
}

#[test]
fn test_maximal_munch() {
    assert_eq!(
        token_kinds("a >>>= b >>> c >> d > e"),
        vec![
            TokenKind::Ident("a".into()),
            TokenKind::UShrEquals,
            TokenKind::Ident("b".into()),
            TokenKind::UShr,
            TokenKind::Ident("c".into()),
            TokenKind::Shr,
            TokenKind::Ident("d".into()),
            TokenKind::Greater,
            TokenKind::Ident("e".into()),
            TokenKind::Eof,
        ]
    );
    assert_eq!(
        token_kinds("a **= b ** c === d !== e"),
        vec![
            TokenKind::Ident("a".into()),
            TokenKind::StarStarEquals,
            TokenKind::Ident("b".into()),
            TokenKind::StarStar,
            TokenKind::Ident("c".into()),
            TokenKind::EqEqEq,
            TokenKind::Ident("d".into()),
            TokenKind::NotEqEq,
            TokenKind::Ident("e".into()),
            TokenKind::Eof,
        ]
    );
    assert_eq!(
        token_kinds("...x => y"),
        vec![
            TokenKind::DotDotDot,
            TokenKind::Ident("x".into()),
            TokenKind::Arrow,
            TokenKind::Ident("y".into()),
            TokenKind::Eof,
        ]
    );
}

#[test]
fn test_contextual_words_are_identifiers() {
    for word in ["async", "await", "yield", "of", "get", "set", "static", "as", "from"] {
        assert_eq!(token_kinds(word)[0], TokenKind::Ident(word.into()), "{word}");
    }
    assert_eq!(token_kinds("let")[0], TokenKind::Let);
    assert_eq!(token_kinds("enum")[0], TokenKind::Enum);
    assert_eq!(token_kinds("instanceof")[0], TokenKind::Instanceof);
}

#[test]
fn test_numeric_literals() {
    assert_eq!(number("0"), 0.0);
    assert_eq!(number("42"), 42.0);
    assert_eq!(number("3.25"), 3.25);
    assert_eq!(number(".5"), 0.5);
    assert_eq!(number("5."), 5.0);
    assert_eq!(number("1e3"), 1000.0);
    assert_eq!(number("2.5E-1"), 0.25);
    assert_eq!(number("0x1F"), 31.0);
    assert_eq!(number("0o17"), 15.0);
    assert_eq!(number("0B101"), 5.0);
    assert_eq!(number("017"), 15.0);
    assert_eq!(number("019"), 19.0);
}

#[test]
fn test_member_access_on_number() {
    assert_eq!(
        token_kinds("1..toString"),
        vec![
            TokenKind::Number(1.0),
            TokenKind::Dot,
            TokenKind::Ident("toString".into()),
            TokenKind::Eof,
        ]
    );
}

#[test]
fn test_string_escapes() {
    assert_eq!(string(r#""plain""#), "plain");
    assert_eq!(string(r"'it\'s'"), "it's");
    assert_eq!(string(r#""\n\t\r\b\f\v\0""#), "\n\t\r\u{8}\u{c}\u{b}\0");
    assert_eq!(string(r#""\x41B\u{43}""#), "ABC");
    assert_eq!(string(r#""😀""#), "\u{1F600}");
    assert_eq!(string("\"a\\\nb\""), "ab");
    assert_eq!(string(r#""\q""#), "q");
}

#[test]
fn test_legacy_octal_escapes_in_strings() {
    assert_eq!(string(r"'\1'"), "\u{1}");
    assert_eq!(string(r"'\08'"), "\u{0}8");
    assert_eq!(string(r"'\8'"), "8");
    assert_eq!(string(r"'\101\1010'"), "AA0");
    assert_eq!(string(r"'\477'"), "'7");
    assert!(kaiju::parse(r"x = '\12' + '\9';").is_ok());
}

#[test]
fn test_lexeme_keeps_source_text() {
    let tokens = lex(r#"x = "ab" + 0x10"#).expect("lexing failed");
    assert_eq!(tokens[2].lexeme, r#""ab""#);
    assert_eq!(tokens[4].lexeme, "0x10");
    assert_eq!(tokens[2].kind, TokenKind::String("ab".into()));
}

#[test]
fn test_positions_and_line_breaks() {
    let tokens = lex("a\n  bb /* x\n */ c").expect("lexing failed");

    assert_eq!(tokens[0].span.loc.start.line, 1);
    assert_eq!(tokens[0].span.loc.start.column, 0);
    assert!(!tokens[0].newline_before);

    let b = &tokens[1];
    assert_eq!((b.span.start, b.span.end), (4, 6));
    assert_eq!((b.span.loc.start.line, b.span.loc.start.column), (2, 2));
    assert_eq!((b.span.loc.end.line, b.span.loc.end.column), (2, 4));
    assert!(b.newline_before);

    // a multi-line block comment counts as a line break
    let c = &tokens[2];
    assert_eq!(c.span.loc.start.line, 3);
    assert!(c.newline_before);
}

#[test]
fn test_columns_count_characters() {
    let tokens = lex("'é' + x").expect("lexing failed");
    let x = &tokens[2];
    assert_eq!(x.span.start, 7);
    assert_eq!(x.span.loc.start.column, 6);
}

#[test]
fn test_crlf_is_one_line_break() {
    let tokens = lex("a\r\nb").expect("lexing failed");
    assert_eq!(tokens[1].span.loc.start.line, 2);
    assert_eq!(tokens[1].span.loc.start.column, 0);
}

#[test]
fn test_template_chunks() {
    let tokens = lex("`a${b}c${ {d} }e`").expect("lexing failed");
    let chunks: Vec<(String, bool)> = tokens
        .iter()
        .filter_map(|token| match &token.kind {
            TokenKind::Template(chunk) => Some((chunk.cooked.clone(), chunk.tail)),
            _ => None,
        })
        .collect();
    assert_eq!(
        chunks,
        vec![
            ("a".to_string(), false),
            ("c".to_string(), false),
            ("e".to_string(), true),
        ]
    );
    // braces inside a substitution do not close it
    assert!(tokens.iter().any(|token| token.kind == TokenKind::LeftBrace));
    assert!(tokens.iter().any(|token| token.kind == TokenKind::RightBrace));
}

#[test]
fn test_template_raw_and_cooked() {
    let tokens = lex(r"`a\nb`").expect("lexing failed");
    let TokenKind::Template(chunk) = &tokens[0].kind else {
        panic!("expected template, got {:?}", tokens[0].kind);
    };
    assert_eq!(chunk.raw, r"a\nb");
    assert_eq!(chunk.cooked, "a\nb");
    assert!(chunk.tail);
}

#[test]
fn test_categories() {
    let categories: Vec<TokenCategory> = lex("if (x) return 'y' + 1 + `t`")
        .expect("lexing failed")
        .iter()
        .map(|token| token.kind.category())
        .collect();
    assert_eq!(
        categories,
        vec![
            TokenCategory::Keyword,
            TokenCategory::Punctuator,
            TokenCategory::Identifier,
            TokenCategory::Punctuator,
            TokenCategory::Keyword,
            TokenCategory::String,
            TokenCategory::Punctuator,
            TokenCategory::Number,
            TokenCategory::Punctuator,
            TokenCategory::Template,
            TokenCategory::EndOfInput,
        ]
    );
}

#[test]
fn test_scanner_iterator_yields_eof_once() {
    let kinds: Vec<TokenKind> = Scanner::new("a b")
        .map(|token| token.expect("lexing failed").kind)
        .collect();
    assert_eq!(kinds.len(), 3);
    assert_eq!(kinds.last(), Some(&TokenKind::Eof));
}

#[test]
fn test_scanner_iterator_stops_after_error() {
    let results: Vec<_> = Scanner::new("a @ b").collect();
    assert_eq!(results.len(), 2);
    assert!(results[0].is_ok());
    assert!(results[1].is_err());
}

#[test]
fn test_slash_is_division_until_the_parser_asks() {
    assert_eq!(
        token_kinds("a / b /= c"),
        vec![
            TokenKind::Ident("a".into()),
            TokenKind::Slash,
            TokenKind::Ident("b".into()),
            TokenKind::SlashEquals,
            TokenKind::Ident("c".into()),
            TokenKind::Eof,
        ]
    );
}
