use kaiju::ParseOptions;

/// Inline hint after the cursor: the parse error of a finished line.
pub fn hint_for(line: &str, pos: usize, options: &ParseOptions) -> Option<String> {
    if pos < line.len() || line.trim().is_empty() || line.trim_start().starts_with('.') {
        return None;
    }
    match kaiju::parse_with_options(line, options) {
        Err(err) if !err.is_incomplete_input() => Some(format!("  # {}", err.message)),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hints_only_for_complete_errors() {
        let options = ParseOptions::default();
        assert_eq!(hint_for("let x = 1;", 10, &options), None);
        assert_eq!(hint_for("function f(", 11, &options), None);
        let hint = hint_for("let 1 = x;", 10, &options);
        assert!(hint.is_some_and(|h| h.contains("expected identifier")));
    }

    #[test]
    fn no_hint_in_the_middle_of_a_line() {
        assert_eq!(hint_for("let 1", 2, &ParseOptions::default()), None);
    }
}
