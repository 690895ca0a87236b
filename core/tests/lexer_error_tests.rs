use kaiju::lexer::lex;
use kaiju::{ParseError, ParseErrorKind, ParseOptions};

fn lex_error(source: &str) -> ParseError {
    match lex(source) {
        Ok(tokens) => panic!("expected {source:?} to fail, got {} tokens", tokens.len()),
        Err(err) => err,
    }
}

#[test]
fn test_unterminated_string() {
    let err = lex_error("x = \"abc");
    assert_eq!(err.kind, ParseErrorKind::UnterminatedLiteral);
    assert_eq!(err.offset, 4);
    assert_eq!((err.line, err.column), (1, 4));
    assert!(err.is_incomplete_input());
}

#[test]
fn test_line_break_inside_string() {
    let err = lex_error("'abc\ndef'");
    assert_eq!(err.kind, ParseErrorKind::UnterminatedLiteral);
    assert!(err.message.contains("line break"));
    assert!(!err.is_incomplete_input());
}

#[test]
fn test_unterminated_block_comment() {
    let err = lex_error("a /* never closed");
    assert_eq!(err.kind, ParseErrorKind::UnterminatedLiteral);
    assert_eq!(err.offset, 2);
    assert_eq!(err.message, "unterminated comment");
}

#[test]
fn test_unterminated_template() {
    let err = lex_error("`abc ${x}");
    assert_eq!(err.kind, ParseErrorKind::UnterminatedLiteral);
    assert!(err.is_incomplete_input());
}

#[test]
fn test_invalid_escapes() {
    for source in [r#""\x4""#, r#""\xZZ""#, r#""\u12""#, r#""\u{110000}""#, r"`\1`", r"`\08`"] {
        let err = lex_error(source);
        assert_eq!(err.kind, ParseErrorKind::InvalidEscape, "{source}");
    }
}

#[test]
fn test_invalid_escape_points_at_the_backslash() {
    let err = lex_error(r#"s = "ok\xZZ""#);
    assert_eq!(err.offset, 7);
}

#[test]
fn test_malformed_numbers() {
    for source in ["0x", "0b2", "1e", "1e+", "3in x", "0o9"] {
        let err = lex_error(source);
        assert_eq!(err.kind, ParseErrorKind::InvalidEscape, "{source}");
    }
}

#[test]
fn test_unknown_character() {
    let err = lex_error("a # b");
    assert_eq!(err.kind, ParseErrorKind::UnexpectedToken);
    assert_eq!(err.offset, 2);
    assert_eq!(err.message, "unexpected character `#`");
}

#[test]
fn test_error_display_includes_position() {
    let err = lex_error("ok;\n  @");
    assert_eq!(err.to_string(), "SyntaxError: unexpected character `@` (2:2)");
}

#[test]
fn test_parse_reports_lexer_errors() {
    let err = kaiju::parse_with_options("let s = 'abc", &ParseOptions::default())
        .expect_err("unterminated string should fail");
    assert_eq!(err.kind, ParseErrorKind::UnterminatedLiteral);
    assert_eq!(err.offset, 8);
}
