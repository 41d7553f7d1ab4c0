//! Incremental parsing of a chunked text stream.
//!
//! [`ParserTransform`] buffers written text and emits each statement as soon
//! as its terminating `;` arrives. A statement cut off by the end of a chunk
//! stays buffered until the next write completes it. Emitted text is dropped
//! from the buffer, so memory is bounded by the statement in flight.
//!
//! A chunk with no `;` outside strings and comments cannot finish a statement,
//! so `write` only appends it. Syntax errors in a statement surface once its
//! terminator arrives, or at [`ParserTransform::end`].
//!
//! ```
//! use oxide_sqlite_parser::{create_parser, StreamEvent};
//!
//! let mut transform = create_parser();
//! assert_eq!(transform.write("SELEC").unwrap(), 0);
//! assert_eq!(transform.write("T 1;").unwrap(), 1);
//! assert!(matches!(transform.next_event(), Some(StreamEvent::Statement(_))));
//! ```

use core::fmt;
use std::collections::VecDeque;

use tracing::{debug, trace, warn};

use crate::ast::Statement;
use crate::error::{Error, Result};
use crate::lexer::Position;
use crate::options::ParseOptions;
use crate::parser::{format, ErrorKind, Parser, SyntaxError};

/// Lifecycle of a [`ParserTransform`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StreamState {
    /// Accepting writes.
    Open,
    /// A syntax error was emitted. Terminal.
    Errored,
    /// The stream ended or was closed. Terminal.
    Closed,
}

impl StreamState {
    /// Returns the state name in lowercase.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Errored => "errored",
            Self::Closed => "closed",
        }
    }
}

impl fmt::Display for StreamState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An item produced by the transform.
#[derive(Debug, Clone, PartialEq)]
pub enum StreamEvent {
    /// A complete statement, with absolute positions.
    Statement(Statement),
    /// The stream failed. No further events follow.
    Error(SyntaxError),
    /// The stream ended cleanly. No further events follow.
    Closed,
}

/// Lexical context at the end of the text fed so far.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
enum Lexical {
    #[default]
    Code,
    /// Inside a string, blob or quoted identifier closed by `close`.
    Quoted { close: char },
    LineComment,
    BlockComment,
}

/// Finds statement terminators in text arriving in pieces.
#[derive(Debug, Default)]
struct Terminators {
    lexical: Lexical,
    /// Last character fed, for `--`, `/*` and `*/` split across chunks.
    last: Option<char>,
}

impl Terminators {
    /// Feeds `chunk` and reports whether it holds a `;` outside strings,
    /// quoted identifiers and comments.
    ///
    /// A doubled quote leaves and re-enters the quoted state, which is all
    /// the escaping the lexer knows.
    fn feed(&mut self, chunk: &str) -> bool {
        let mut found = false;
        for c in chunk.chars() {
            let last = self.last.replace(c);
            self.lexical = match (self.lexical, c) {
                (Lexical::Code, ';') => {
                    found = true;
                    Lexical::Code
                }
                (Lexical::Code, '\'' | '"' | '`') => Lexical::Quoted { close: c },
                (Lexical::Code, '[') => Lexical::Quoted { close: ']' },
                (Lexical::Code, '-') if last == Some('-') => Lexical::LineComment,
                (Lexical::Code, '*') if last == Some('/') => {
                    self.last = None;
                    Lexical::BlockComment
                }
                (Lexical::Quoted { close }, _) if c == close => Lexical::Code,
                (Lexical::LineComment, '\n') => Lexical::Code,
                (Lexical::BlockComment, '/') if last == Some('*') => {
                    self.last = None;
                    Lexical::Code
                }
                (lexical, _) => lexical,
            };
        }
        found
    }
}

/// Streaming SQLite parser.
#[derive(Debug)]
pub struct ParserTransform {
    options: ParseOptions,
    state: StreamState,
    buffer: String,
    /// Document position of the first buffered byte.
    base: Position,
    events: VecDeque<StreamEvent>,
    terminators: Terminators,
}

impl Default for ParserTransform {
    fn default() -> Self {
        Self::new(ParseOptions::default())
    }
}

impl ParserTransform {
    /// Creates an open transform. The `streaming` flag of `options` is
    /// ignored; the transform picks the start rule itself.
    #[must_use]
    pub fn new(options: ParseOptions) -> Self {
        Self {
            options,
            state: StreamState::Open,
            buffer: String::new(),
            base: Position::START,
            events: VecDeque::new(),
            terminators: Terminators::default(),
        }
    }

    /// Returns the current state.
    #[must_use]
    pub const fn state(&self) -> StreamState {
        self.state
    }

    /// Returns the text that has been written but not yet emitted.
    #[must_use]
    pub fn buffered(&self) -> &str {
        &self.buffer
    }

    /// Returns the document position of the first buffered byte.
    #[must_use]
    pub const fn position(&self) -> Position {
        self.base
    }

    /// Appends `chunk` and emits every statement it completes.
    ///
    /// The buffer is only parsed when `chunk` holds a `;` outside strings and
    /// comments. Returns the number of statements emitted by this call.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidState`] if the stream is not open, and
    /// [`Error::Syntax`] if the buffered text cannot start a statement. A
    /// syntax error moves the stream to [`StreamState::Errored`].
    pub fn write(&mut self, chunk: &str) -> Result<usize> {
        self.ensure_open("write")?;
        self.buffer.push_str(chunk);
        if !self.terminators.feed(chunk) {
            trace!(buffered = self.buffer.len(), "no terminator in chunk");
            return Ok(0);
        }

        let options = self.options.streaming(true);
        let mut emitted = 0;
        loop {
            let outcome =
                Parser::with_start(&self.buffer, self.base, &options).parse_streaming_statement();
            match outcome {
                Ok((statement, end)) => {
                    self.consume_to(end);
                    let Some(statement) = statement else {
                        break;
                    };
                    self.emit(statement);
                    emitted += 1;
                }
                Err(failure) if failure.kind == ErrorKind::Incomplete => break,
                Err(failure) => {
                    let error = format(&failure, &self.buffer, self.base);
                    return Err(self.fail(error));
                }
            }
        }
        Ok(emitted)
    }

    /// Flushes the buffer and ends the stream.
    ///
    /// The remaining text is parsed as a whole document, so a final statement
    /// without `;` is accepted. Returns the number of statements emitted.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidState`] if the stream is not open, and
    /// [`Error::Syntax`] if the remainder does not parse.
    pub fn end(&mut self) -> Result<usize> {
        self.ensure_open("end")?;
        let tail = core::mem::take(&mut self.buffer);
        let base = self.base;
        let options = self.options.streaming(false);

        let outcome = Parser::with_start(&tail, base, &options).parse_program();
        match outcome {
            Ok(program) => {
                self.base = base.advance_over(&tail);
                let emitted = program.statements.len();
                for statement in program.statements {
                    self.emit(statement);
                }
                self.transition(StreamState::Closed);
                self.events.push_back(StreamEvent::Closed);
                Ok(emitted)
            }
            Err(failure) => {
                let error = format(&failure, &tail, base);
                self.buffer = tail;
                Err(self.fail(error))
            }
        }
    }

    /// Discards buffered text.
    ///
    /// An open stream also drops its pending events, moves to
    /// [`StreamState::Closed`] and gets a final [`StreamEvent::Closed`].
    /// Closing a finished stream leaves its events alone.
    pub fn close(&mut self) {
        self.buffer.clear();
        self.terminators = Terminators::default();
        if self.state == StreamState::Open {
            self.events.clear();
            self.transition(StreamState::Closed);
            self.events.push_back(StreamEvent::Closed);
        }
    }

    /// Pops the oldest pending event.
    pub fn next_event(&mut self) -> Option<StreamEvent> {
        self.events.pop_front()
    }

    /// Drains all pending events in order.
    pub fn events(&mut self) -> impl Iterator<Item = StreamEvent> + '_ {
        self.events.drain(..)
    }

    fn ensure_open(&self, operation: &'static str) -> Result<()> {
        if self.state == StreamState::Open {
            return Ok(());
        }
        warn!(operation, state = %self.state, "rejected operation on finished stream");
        Err(Error::InvalidState {
            operation,
            state: self.state,
        })
    }

    /// Drops buffered text up to the document position `end`.
    fn consume_to(&mut self, end: Position) {
        let consumed = end
            .offset
            .saturating_sub(self.base.offset)
            .min(self.buffer.len());
        self.buffer.drain(..consumed);
        self.base = end;
    }

    fn emit(&mut self, statement: Statement) {
        let span = statement.span();
        debug!(
            kind = statement.kind(),
            start = span.start.offset,
            end = span.end.offset,
            "emitting statement"
        );
        self.events.push_back(StreamEvent::Statement(statement));
    }

    fn fail(&mut self, error: SyntaxError) -> Error {
        debug!(offset = error.location.offset, "stream failed: {}", error.message);
        self.events.push_back(StreamEvent::Error(error.clone()));
        self.transition(StreamState::Errored);
        Error::Syntax(error)
    }

    fn transition(&mut self, to: StreamState) {
        debug!(from = %self.state, to = %to, "stream state changed");
        self.state = to;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn statements(transform: &mut ParserTransform) -> Vec<Statement> {
        transform
            .events()
            .filter_map(|event| match event {
                StreamEvent::Statement(statement) => Some(statement),
                _ => None,
            })
            .collect()
    }

    #[test]
    fn test_statement_split_across_chunks() {
        let mut transform = ParserTransform::default();
        assert_eq!(transform.write("SELEC").unwrap(), 0);
        assert_eq!(transform.buffered(), "SELEC");
        assert_eq!(transform.write("T 1;").unwrap(), 1);
        assert_eq!(transform.buffered(), "");

        let emitted = statements(&mut transform);
        assert_eq!(emitted.len(), 1);
        assert_eq!(emitted[0].span().start.offset, 0);
        assert_eq!(emitted[0].span().end.offset, 9);
    }

    #[test]
    fn test_two_statements_in_one_chunk() {
        let mut transform = ParserTransform::default();
        assert_eq!(transform.write("SELECT 1; SELECT 2;").unwrap(), 2);
        let emitted = statements(&mut transform);
        assert_eq!(emitted[1].span().start.offset, 10);
        assert_eq!(transform.buffered(), "");
        assert_eq!(transform.position().offset, 19);
    }

    #[test]
    fn test_end_flushes_unterminated_statement() {
        let mut transform = ParserTransform::default();
        transform.write("SELECT 1").unwrap();
        assert_eq!(transform.end().unwrap(), 1);
        assert_eq!(transform.state(), StreamState::Closed);
        let events: Vec<_> = transform.events().collect();
        assert!(matches!(events[0], StreamEvent::Statement(_)));
        assert_eq!(events[1], StreamEvent::Closed);
    }

    #[test]
    fn test_end_with_only_separators() {
        let mut transform = ParserTransform::default();
        transform.write("SELECT 1; ;\n").unwrap();
        assert_eq!(transform.end().unwrap(), 0);
        let events: Vec<_> = transform.events().collect();
        assert_eq!(events.len(), 2);
        assert_eq!(events[1], StreamEvent::Closed);
    }

    #[test]
    fn test_syntax_error_is_terminal() {
        let mut transform = ParserTransform::default();
        let err = transform.write("SELECT FROM t;").unwrap_err();
        let Error::Syntax(error) = err else {
            panic!("expected syntax error");
        };
        assert_eq!(error.location.offset, 7);
        assert_eq!(transform.state(), StreamState::Errored);
        assert!(matches!(transform.next_event(), Some(StreamEvent::Error(_))));

        assert!(matches!(
            transform.write("SELECT 1;"),
            Err(Error::InvalidState {
                operation: "write",
                state: StreamState::Errored
            })
        ));
        assert!(transform.end().is_err());
    }

    #[test]
    fn test_error_positions_are_absolute() {
        let mut transform = ParserTransform::default();
        transform.write("SELECT 1;\nSELECT ").unwrap();
        let Err(Error::Syntax(error)) = transform.write("FROM t;") else {
            panic!("expected syntax error");
        };
        assert_eq!(error.location.line, 2);
        assert_eq!(error.location.column, 8);
        assert_eq!(error.excerpt, "2 | SELECT FROM t;\n           ^");
    }

    #[test]
    fn test_end_reports_truncated_statement() {
        let mut transform = ParserTransform::default();
        transform.write("SELECT 1 +").unwrap();
        let Err(Error::Syntax(error)) = transform.end() else {
            panic!("expected syntax error");
        };
        assert_eq!(error.kind(), ErrorKind::Syntax);
        assert_eq!(error.found, None);
        assert_eq!(transform.state(), StreamState::Errored);
    }

    #[test]
    fn test_terminators_skip_strings_and_comments() {
        let mut scan = Terminators::default();
        assert!(!scan.feed("SELECT 'a;b', [c;d], \"e;\"\"f\", `g;` -- h;\n"));
        assert!(!scan.feed("/* i; */ x'3B'"));
        assert!(scan.feed(" 'it''s';"));
        assert_eq!(scan.lexical, Lexical::Code);
    }

    #[test]
    fn test_terminators_across_chunks() {
        let mut scan = Terminators::default();
        assert!(!scan.feed("SELECT 1 -"));
        assert!(!scan.feed("- done;"));
        assert_eq!(scan.lexical, Lexical::LineComment);
        assert!(scan.feed("\n;"));

        assert!(!scan.feed("/"));
        assert!(!scan.feed("* a; *"));
        assert_eq!(scan.lexical, Lexical::BlockComment);
        assert!(!scan.feed("/"));
        assert_eq!(scan.lexical, Lexical::Code);
        assert!(scan.feed("* 2;"));

        assert!(!scan.feed("SELECT 'x"));
        assert!(!scan.feed("'';"));
        assert!(scan.feed("';"));
    }

    #[test]
    fn test_chunk_without_terminator_is_not_parsed() {
        let mut transform = ParserTransform::default();
        assert_eq!(transform.write("SELECT FROM t").unwrap(), 0);
        assert_eq!(transform.state(), StreamState::Open);
        assert_eq!(transform.write(" WHERE 'a;b'").unwrap(), 0);
        assert_eq!(transform.next_event(), None);

        let Err(Error::Syntax(error)) = transform.write(";") else {
            panic!("expected syntax error");
        };
        assert_eq!(error.location.offset, 7);
        assert_eq!(transform.state(), StreamState::Errored);
    }

    #[test]
    fn test_terminator_in_later_chunk_emits_buffered_statement() {
        let mut transform = ParserTransform::default();
        for chunk in ["INSERT INTO t ", "VALUES ('a;", "b'), (2)", " -- x;\n"] {
            assert_eq!(transform.write(chunk).unwrap(), 0);
        }
        assert_eq!(transform.write(";").unwrap(), 1);
        assert_eq!(transform.buffered(), "");
    }

    #[test]
    fn test_close_after_end_keeps_events() {
        let mut transform = ParserTransform::default();
        transform.write("SELECT 1;").unwrap();
        transform.end().unwrap();
        transform.close();
        transform.close();
        let events: Vec<_> = transform.events().collect();
        assert!(matches!(events[0], StreamEvent::Statement(_)));
        assert_eq!(events[1..], [StreamEvent::Closed]);
    }

    #[test]
    fn test_close_is_idempotent() {
        let mut transform = ParserTransform::default();
        transform.write("SELECT 1; SELECT").unwrap();
        transform.close();
        transform.close();
        assert_eq!(transform.state(), StreamState::Closed);
        assert_eq!(transform.buffered(), "");
        let events: Vec<_> = transform.events().collect();
        assert_eq!(events, vec![StreamEvent::Closed]);
    }

    #[test]
    fn test_close_keeps_errored_state() {
        let mut transform = ParserTransform::default();
        assert!(transform.write("DROP 1;").is_err());
        transform.close();
        assert_eq!(transform.state(), StreamState::Errored);
        assert!(matches!(transform.next_event(), Some(StreamEvent::Error(_))));
        assert_eq!(transform.next_event(), None);
    }

    #[test]
    fn test_transform_is_send() {
        fn assert_send<T: Send>() {}
        assert_send::<ParserTransform>();
    }
}
