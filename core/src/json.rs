//! The babylon `File` envelope around a parsed program.

use serde::Serialize;

use crate::lexer::token::Span;
use crate::parser::ast::{Comment, Node, Program};

#[derive(Serialize)]
#[serde(tag = "type", rename = "File")]
pub(crate) struct File<'a> {
    #[serde(flatten)]
    span: Span,
    program: ProgramWithDirectives<'a>,
    comments: &'a [Node<Comment>],
}

#[derive(Serialize)]
struct ProgramWithDirectives<'a> {
    #[serde(flatten)]
    program: &'a Node<Program>,
    /// Always empty: directive prologues stay in `body` as expression
    /// statements.
    directives: [(); 0],
}

impl<'a> File<'a> {
    pub(crate) fn new(program: &'a Node<Program>) -> Self {
        Self {
            span: program.span,
            program: ProgramWithDirectives {
                program,
                directives: [],
            },
            comments: &program.kind.comments,
        }
    }
}
