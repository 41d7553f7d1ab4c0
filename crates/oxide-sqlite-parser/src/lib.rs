//! # oxide-sqlite-parser
//!
//! A SQLite SQL parser producing a positioned AST, with streaming statement
//! splitting and contextual syntax errors.
//!
//! This crate provides:
//! - A backtracking parser over the SQLite grammar with Pratt expression parsing
//! - Syntax errors that name the construct they occurred in and what was expected
//! - A streaming transform that emits statements as their text arrives
//!
//! ## Parsing a document
//!
//! ```rust
//! use oxide_sqlite_parser::{parse, ParseOptions, Statement};
//!
//! let program = parse("SELECT 1;", &ParseOptions::default()).unwrap();
//! assert!(matches!(program.statements[0], Statement::Select(_)));
//! assert_eq!(program.span.end.offset, 9);
//! ```
//!
//! ## Syntax errors
//!
//! Errors carry a location, the innermost construct and the expected tokens:
//!
//! ```rust
//! use oxide_sqlite_parser::{parse, ParseOptions};
//!
//! let error = parse("SELECT FROM;", &ParseOptions::default()).unwrap_err();
//! assert_eq!(error.location.offset, 7);
//! assert_eq!(error.rule.as_deref(), Some("SELECT statement"));
//! assert!(error.expected.iter().any(|e| e == "expression"));
//! ```
//!
//! ## Streaming
//!
//! ```rust
//! use oxide_sqlite_parser::{create_parser, create_stitcher};
//!
//! let mut transform = create_parser();
//! transform.write("SELECT 1; SEL").unwrap();
//! transform.write("ECT 2;").unwrap();
//! transform.end().unwrap();
//!
//! let mut stitcher = create_stitcher();
//! stitcher.consume(&mut transform);
//! assert_eq!(stitcher.finish().unwrap().statements.len(), 2);
//! ```

pub mod ast;
pub mod error;
pub mod lexer;
pub mod options;
pub mod parser;
pub mod stitcher;
pub mod stream;
pub mod trace;

use tracing::debug;

pub use ast::{Expr, Program, Statement};
pub use error::{Error, Result};
pub use lexer::{Lexer, Position, Span, Token, TokenKind};
pub use options::ParseOptions;
pub use parser::{ErrorKind, Parser, SyntaxError};
pub use stitcher::{StitchError, Stitcher};
pub use stream::{ParserTransform, StreamEvent, StreamState};

/// Parser name.
pub const NAME: &str = "sqlite-parser";

/// Crate version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Parses `source` into a program.
///
/// With `options.streaming` set, only the first `;`-terminated statement is
/// parsed and a statement cut off by the end of `source` fails with
/// [`ErrorKind::Incomplete`].
///
/// # Errors
///
/// Returns a [`SyntaxError`] describing the furthest point the parser reached.
pub fn parse(source: &str, options: &ParseOptions) -> std::result::Result<Program, SyntaxError> {
    debug!(len = source.len(), streaming = options.streaming, "parse");
    let mut engine = Parser::new(source, options);
    let result = if options.streaming {
        engine
            .parse_streaming_statement()
            .map(|(statement, _)| Program::new(statement.into_iter().collect(), Position::START))
    } else {
        engine.parse_program()
    };
    result.map_err(|failure| parser::format(&failure, source, Position::START))
}

/// Creates a streaming parser with default options.
#[must_use]
pub fn create_parser() -> ParserTransform {
    ParserTransform::default()
}

/// Creates a streaming parser with `options`.
#[must_use]
pub fn create_parser_with(options: ParseOptions) -> ParserTransform {
    ParserTransform::new(options)
}

/// Creates a stitcher that collects a stream back into a program.
#[must_use]
pub fn create_stitcher() -> Stitcher {
    Stitcher::new()
}
