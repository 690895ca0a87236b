pub mod ast;
mod class_parser;
mod expr_literals;
mod expr_ops;
mod expr_parser;
mod function_parser;
mod module_parser;
mod pattern_parser;
mod stmt_parser;
mod stmt_parser_loops;
mod stmt_terminator;
mod switch_parser;

use std::mem;

use crate::errors::ParseError;
use crate::lexer::scanner::Scanner;
use crate::lexer::token::{Position, Span, Token, TokenKind};
use crate::options::ParseOptions;
use ast::{Comment, Identifier, Node, Program};

/// Parse a complete source text into a `Program`.
pub fn parse(source: &str, options: &ParseOptions) -> Result<Node<Program>, ParseError> {
    let mut parser = Parser::new(source, *options)?;
    parser.parse_program()
}

#[derive(Debug, Clone, Copy, Default)]
struct FunctionContext {
    in_function: bool,
    is_async: bool,
    is_generator: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LabelKind {
    Loop,
    Switch,
    Plain,
}

#[derive(Debug, Clone)]
struct LabelScope {
    /// `None` for the implicit scope a loop or switch opens.
    name: Option<String>,
    kind: LabelKind,
    /// Offset where the labeled body starts.
    body_start: usize,
}

/// Recursive-descent parser with one token of lookahead.
pub struct Parser<'src> {
    scanner: Scanner<'src>,
    current: Token<'src>,
    prev_span: Span,
    options: ParseOptions,
    context: FunctionContext,
    labels: Vec<LabelScope>,
    /// Inside a `for` head where `in` ends the expression.
    no_in: bool,
    /// First `{a = 1}` shorthand still waiting to become a pattern.
    cover_init: Option<Span>,
    /// Productions currently open on the call stack.
    depth: usize,
    comments: Vec<Node<Comment>>,
}

impl<'src> Parser<'src> {
    pub fn new(source: &'src str, options: ParseOptions) -> Result<Self, ParseError> {
        let mut scanner = Scanner::new(source).with_comments();
        let current = scanner.next_token()?;
        let mut parser = Self {
            scanner,
            current,
            prev_span: Span::point(0, Position::START),
            options,
            context: FunctionContext::default(),
            labels: Vec::new(),
            no_in: false,
            cover_init: None,
            depth: 0,
            comments: Vec::new(),
        };
        parser.collect_comments();
        Ok(parser)
    }

    pub fn parse_program(&mut self) -> Result<Node<Program>, ParseError> {
        let mut body = Vec::new();
        while !self.check(&TokenKind::Eof) {
            body.push(self.parse_top_level_statement()?);
        }
        let eof = self.current.span;
        Ok(Node::new(
            Program {
                source_type: self.options.source_type,
                body,
                comments: mem::take(&mut self.comments),
            },
            Span::new(0, eof.start, Position::START, eof.loc.start),
        ))
    }

    /// Move to the next token and return the one just passed.
    fn advance(&mut self) -> Result<Token<'src>, ParseError> {
        let next = if self.current.kind == TokenKind::Eof {
            self.current.clone()
        } else {
            let next = self.scanner.next_token()?;
            self.collect_comments();
            next
        };
        let prev = mem::replace(&mut self.current, next);
        self.prev_span = prev.span;
        Ok(prev)
    }

    /// Move the comments skipped before `current` into the program's list.
    fn collect_comments(&mut self) {
        let source = self.scanner.source();
        for trivia in self.scanner.take_comments() {
            let value = trivia.text(source).to_string();
            let kind = if trivia.block {
                Comment::CommentBlock { value }
            } else {
                Comment::CommentLine { value }
            };
            self.comments.push(Node::new(kind, trivia.span));
        }
    }

    /// The token after `current`, without consuming anything.
    fn peek(&self) -> Result<Token<'src>, ParseError> {
        self.scanner.clone().next_token()
    }

    fn check(&self, kind: &TokenKind) -> bool {
        &self.current.kind == kind
    }

    /// Contextual keywords such as `of`, `as` and `async` lex as identifiers.
    fn check_ident(&self, name: &str) -> bool {
        matches!(&self.current.kind, TokenKind::Ident(n) if n == name)
    }

    fn eat(&mut self, kind: &TokenKind) -> Result<bool, ParseError> {
        if self.check(kind) {
            self.advance()?;
            Ok(true)
        } else {
            Ok(false)
        }
    }

    fn expect(&mut self, kind: &TokenKind) -> Result<Token<'src>, ParseError> {
        if self.check(kind) {
            self.advance()
        } else {
            Err(self.expected(&kind.to_string()))
        }
    }

    fn expect_ident(&mut self, name: &str) -> Result<(), ParseError> {
        if self.check_ident(name) {
            self.advance()?;
            Ok(())
        } else {
            Err(self.expected(&format!("`{name}`")))
        }
    }

    fn expected(&self, what: &str) -> ParseError {
        if self.current.kind == TokenKind::Eof {
            return ParseError::unexpected_end(self.current.span);
        }
        ParseError::unexpected_token(
            format!("expected {what}, found {}", self.current.kind),
            self.current.span,
        )
    }

    fn unexpected(&self) -> ParseError {
        if self.current.kind == TokenKind::Eof {
            return ParseError::unexpected_end(self.current.span);
        }
        ParseError::unexpected_token(
            format!("unexpected token {}", self.current.kind),
            self.current.span,
        )
    }

    fn error_at(&self, message: impl Into<String>, span: Span) -> ParseError {
        ParseError::unexpected_token(message, span)
    }

    /// Span of the token a new node starts at.
    fn start(&self) -> Span {
        self.current.span
    }

    /// Close a node that began at `start` and ends with the last consumed token.
    fn finish<K>(&self, start: Span, kind: K) -> Node<K> {
        Node::new(kind, start.to(self.prev_span))
    }

    /// Identifier used as a binding or label.
    fn parse_binding_identifier(&mut self) -> Result<Node<Identifier>, ParseError> {
        let name = match &self.current.kind {
            TokenKind::Ident(name) => name.clone(),
            TokenKind::Enum => {
                return Err(self.error_at("`enum` is a reserved word", self.current.span));
            }
            _ => return Err(self.expected("identifier")),
        };
        if (name == "yield" && self.context.is_generator) || (name == "await" && self.context.is_async)
        {
            return Err(self.error_at(
                format!("`{name}` cannot be used as an identifier here"),
                self.current.span,
            ));
        }
        let token = self.advance()?;
        Ok(Node::new(Identifier { name }, token.span))
    }

    /// Any identifier or keyword, as allowed after `.` and in module specifiers.
    fn parse_identifier_name(&mut self) -> Result<Node<Identifier>, ParseError> {
        let name = match &self.current.kind {
            TokenKind::Ident(name) => name.clone(),
            kind if kind.is_keyword() => self.current.lexeme.to_string(),
            _ => return Err(self.expected("identifier")),
        };
        let token = self.advance()?;
        Ok(Node::new(Identifier { name }, token.span))
    }

    fn with_no_in<T>(
        &mut self,
        no_in: bool,
        f: impl FnOnce(&mut Self) -> Result<T, ParseError>,
    ) -> Result<T, ParseError> {
        let saved = mem::replace(&mut self.no_in, no_in);
        let result = f(self);
        self.no_in = saved;
        result
    }

    fn with_in_allowed<T>(
        &mut self,
        f: impl FnOnce(&mut Self) -> Result<T, ParseError>,
    ) -> Result<T, ParseError> {
        self.with_no_in(false, f)
    }

    /// Run one recursive production, failing instead of recursing past
    /// `ParseOptions::max_depth`.
    fn nested<T>(
        &mut self,
        f: impl FnOnce(&mut Self) -> Result<T, ParseError>,
    ) -> Result<T, ParseError> {
        if self.depth >= self.options.max_depth {
            return Err(self.error_at("nesting too deep", self.current.span));
        }
        self.depth += 1;
        let result = f(self);
        self.depth -= 1;
        result
    }

    /// Run `f` inside a fresh function body: labels, `in` handling and
    /// pending shorthand initializers do not cross the boundary.
    fn with_function_context<T>(
        &mut self,
        context: FunctionContext,
        f: impl FnOnce(&mut Self) -> Result<T, ParseError>,
    ) -> Result<T, ParseError> {
        let saved_context = mem::replace(&mut self.context, context);
        let saved_labels = mem::take(&mut self.labels);
        let saved_no_in = mem::replace(&mut self.no_in, false);
        let saved_cover = self.cover_init.take();
        let result = f(self);
        self.context = saved_context;
        self.labels = saved_labels;
        self.no_in = saved_no_in;
        self.cover_init = saved_cover;
        result
    }
}
