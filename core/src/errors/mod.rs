mod parse_error;

pub use parse_error::{ParseError, ParseErrorKind};

use miette::Diagnostic;
use thiserror::Error;

/// Unified error type for callers that parse, serialize and do I/O.
#[derive(Debug, Error, Diagnostic)]
pub enum KaijuError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Parse(#[from] ParseError),

    #[error("failed to serialize syntax tree: {0}")]
    #[diagnostic(code(kaiju::json))]
    Json(#[from] serde_json::Error),

    #[error("i/o error: {0}")]
    #[diagnostic(code(kaiju::io))]
    Io(#[from] std::io::Error),
}
