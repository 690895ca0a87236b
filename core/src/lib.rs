pub mod errors;
mod json;
pub mod lexer;
pub mod options;
pub mod parser;
pub mod printer;

pub use errors::{KaijuError, ParseError, ParseErrorKind};
pub use options::{ParseOptions, SourceType};
pub use parser::ast::{Node, Program};
pub use printer::print;

/// Parse a script with default options.
pub fn parse(source: &str) -> Result<Node<Program>, ParseError> {
    parser::parse(source, &ParseOptions::default())
}

pub fn parse_with_options(
    source: &str,
    options: &ParseOptions,
) -> Result<Node<Program>, ParseError> {
    parser::parse(source, options)
}

/// Serialize a program as compact babylon-style JSON: a `File` node
/// holding the `program` and its `comments`.
pub fn to_json(program: &Node<Program>) -> Result<String, KaijuError> {
    Ok(serde_json::to_string(&json::File::new(program))?)
}

pub fn to_json_pretty(program: &Node<Program>) -> Result<String, KaijuError> {
    Ok(serde_json::to_string_pretty(&json::File::new(program))?)
}

/// Parse and serialize in one step.
pub fn parse_to_json(source: &str, options: &ParseOptions) -> Result<String, KaijuError> {
    let program = parse_with_options(source, options)?;
    to_json(&program)
}

/// True when `source` fails only because it ends too early, so an
/// interactive caller should read another line.
pub fn needs_more_input(source: &str, options: &ParseOptions) -> bool {
    match parse_with_options(source, options) {
        Ok(_) => false,
        Err(err) => err.is_incomplete_input(),
    }
}
