//! The backtracking parse engine.
//!
//! The source is lexed up front and rules run over the token buffer. Every
//! rule goes through [`Parser::rule`], which keeps the trace balanced and
//! restores the cursor on failure. A handful of rules are memoized by
//! `(rule, token index)`.
//!
//! Failures carry no data. Each failed terminal check instead records what
//! it expected at the current token; the record at the furthest token
//! reached wins and ties are merged. When every alternative is exhausted
//! that record becomes the [`Failure`].

use std::collections::HashMap;

use tracing::{debug, trace};

use super::error::{ErrorKind, Expected};
use super::rules::RuleId;
use crate::ast::{Expr, Program, SelectStatement, Statement, TableRef};
use crate::lexer::{Keyword, Lexer, Position, Span, Token, TokenKind};
use crate::options::ParseOptions;
use crate::trace::{Frame, Outcome, Tracer};

/// Backtracking failure marker. Details live in the parser's furthest record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Fail;

pub(crate) type PResult<T> = Result<T, Fail>;

/// The furthest failure of a parse, before formatting.
#[derive(Debug, Clone, PartialEq)]
pub struct Failure {
    /// Incomplete, syntax error or trailing input.
    pub kind: ErrorKind,
    /// Start of the furthest token that could not be matched.
    pub location: Position,
    /// Source text of that token; `None` at end of input.
    pub found: Option<String>,
    /// Everything that would have been accepted there, in the order tried.
    pub expected: Vec<Expected>,
    /// Active rules when the furthest point was first reached, innermost last.
    /// Empty when tracing is disabled.
    pub frames: Vec<Frame>,
    /// The input nested deeper than [`ParseOptions::max_depth`]. `location`
    /// is where the limit was hit and `expected` is empty.
    pub too_deep: bool,
}

#[derive(Debug, Default)]
struct Furthest {
    pos: usize,
    expected: Vec<Expected>,
    frames: Vec<Frame>,
}

/// Rule results that can be stored in the memo table.
pub(crate) trait Memoized: Sized + Clone {
    fn into_value(self) -> Value;
    fn from_value(value: Value) -> Option<Self>;
}

macro_rules! memoized {
    ($($variant:ident($ty:ty)),* $(,)?) => {
        #[derive(Debug, Clone)]
        pub(crate) enum Value {
            $($variant($ty)),*
        }

        $(
            impl Memoized for $ty {
                fn into_value(self) -> Value {
                    Value::$variant(self)
                }

                fn from_value(value: Value) -> Option<Self> {
                    match value {
                        Value::$variant(inner) => Some(inner),
                        #[allow(unreachable_patterns)]
                        _ => None,
                    }
                }
            }
        )*
    };
}

memoized! {
    Statement(Statement),
    Select(SelectStatement),
    Expr(Expr),
    TableRef(TableRef),
}

/// A memo entry. The first success at a key only records that it happened;
/// the value is stored when the key is parsed a second time, so subtrees are
/// cloned only where they are reused.
#[derive(Debug, Clone)]
enum Memo {
    Visited,
    Success { value: Value, end: usize },
    Failure,
}

/// SQLite parser over one source buffer.
pub struct Parser<'a> {
    source: &'a str,
    base: Position,
    tokens: Vec<Token>,
    pos: usize,
    streaming: bool,
    memo: Option<HashMap<(RuleId, usize), Memo>>,
    tracer: Option<Tracer>,
    furthest: Furthest,
    trailing_at: Option<usize>,
    depth: usize,
    max_depth: usize,
    /// Token where the nesting limit was hit. Once set, every rule fails.
    too_deep: Option<usize>,
}

impl<'a> Parser<'a> {
    /// Creates a parser for a whole document.
    #[must_use]
    pub fn new(source: &'a str, options: &ParseOptions) -> Self {
        Self::with_start(source, Position::START, options)
    }

    /// Creates a parser for a buffer whose first byte sits at `start` in the
    /// enclosing document. Node positions are absolute.
    #[must_use]
    pub fn with_start(source: &'a str, start: Position, options: &ParseOptions) -> Self {
        let tokens = Lexer::with_start(source, start).tokenize();
        Self {
            source,
            base: start,
            tokens,
            pos: 0,
            streaming: options.streaming,
            memo: options.memoize.then(HashMap::new),
            tracer: options.trace.then(Tracer::new),
            furthest: Furthest::default(),
            trailing_at: None,
            depth: 0,
            max_depth: options.max_depth,
            too_deep: None,
        }
    }

    /// Returns the tracer, if tracing is enabled.
    #[must_use]
    pub const fn tracer(&self) -> Option<&Tracer> {
        self.tracer.as_ref()
    }

    /// Parses the whole buffer as a list of statements.
    ///
    /// Statements are separated by `;`; the last one may omit it. Empty
    /// statements are skipped.
    ///
    /// # Errors
    ///
    /// Returns the furthest failure if the buffer is not a statement list.
    /// Text left over after the last statement is reported as
    /// [`ErrorKind::TrailingInput`].
    pub fn parse_program(&mut self) -> Result<Program, Failure> {
        debug!(offset = self.base.offset, len = self.source.len(), "parsing program");
        let result = self.rule(RuleId::Program, |p| {
            let statements = p.statement_list()?;
            if p.end_of_input().is_err() {
                if !statements.is_empty() {
                    p.trailing_at = Some(p.pos);
                }
                return Err(Fail);
            }
            Ok(statements)
        });
        match result {
            Ok(statements) => {
                debug!(statements = statements.len(), "parsed program");
                Ok(Program::new(statements, self.base))
            }
            Err(Fail) => Err(self.failure()),
        }
    }

    /// Parses one `;`-terminated statement from the start of the buffer,
    /// skipping empty statements before it.
    ///
    /// Returns the statement, or `None` if the buffer holds no statement, and
    /// the position after the last consumed token.
    ///
    /// # Errors
    ///
    /// Returns the furthest failure. In streaming mode a failure at the end
    /// of the buffer is reported as [`ErrorKind::Incomplete`].
    pub fn parse_streaming_statement(&mut self) -> Result<(Option<Statement>, Position), Failure> {
        let result = self.rule(RuleId::StreamingStatement, |p| {
            while p.check(&TokenKind::Semicolon) {
                p.bump();
            }
            if p.at_eof() {
                return Ok(None);
            }
            let mut statement = p.statement()?;
            let semicolon = p.punct(&TokenKind::Semicolon)?;
            statement.extend_to(semicolon.end);
            Ok(Some(statement))
        });
        match result {
            Ok(statement) => {
                if let Some(statement) = &statement {
                    debug!(kind = statement.kind(), end = self.prev_end().offset, "parsed statement");
                }
                Ok((statement, self.prev_end()))
            }
            Err(Fail) => Err(self.failure()),
        }
    }

    /// Parses the buffer as exactly one statement with an optional `;`.
    ///
    /// # Errors
    ///
    /// Returns the furthest failure.
    pub fn parse_statement(&mut self) -> Result<Statement, Failure> {
        let result = self.statement().and_then(|mut statement| {
            if self.check(&TokenKind::Semicolon) {
                statement.extend_to(self.bump().end);
            }
            self.end_of_input()?;
            Ok(statement)
        });
        result.map_err(|Fail| self.failure())
    }

    /// Parses the buffer as exactly one expression.
    ///
    /// # Errors
    ///
    /// Returns the furthest failure.
    pub fn parse_expression(&mut self) -> Result<Expr, Failure> {
        let result = self.expression().and_then(|expr| {
            self.end_of_input()?;
            Ok(expr)
        });
        result.map_err(|Fail| self.failure())
    }

    /// statement_list <- ';'* (statement (';'+ statement)*)? ';'*
    fn statement_list(&mut self) -> PResult<Vec<Statement>> {
        let mut statements = Vec::new();
        loop {
            while self.check(&TokenKind::Semicolon) {
                self.bump();
            }
            let Some(mut statement) = self.optional(Self::statement) else {
                break;
            };
            let terminated = self.check(&TokenKind::Semicolon);
            if terminated {
                statement.extend_to(self.bump().end);
            } else {
                self.record(Expected::Token(TokenKind::Semicolon.describe()));
            }
            statements.push(statement);
            if !terminated {
                break;
            }
        }
        Ok(statements)
    }

    // --- Rule wrappers ---

    /// Runs `body` as rule `id`.
    ///
    /// The trace is balanced on every path and the cursor is restored on
    /// failure. If the rule has a label and failed without the furthest
    /// point moving past its first token, the expectations it recorded there
    /// are replaced by the label.
    ///
    /// Entering more than `max_depth` nested rules aborts the whole parse.
    pub(crate) fn rule<T>(
        &mut self,
        id: RuleId,
        body: impl FnOnce(&mut Self) -> PResult<T>,
    ) -> PResult<T> {
        if self.too_deep.is_some() {
            return Err(Fail);
        }
        if self.depth >= self.max_depth {
            debug!(rule = id.name(), depth = self.depth, "nesting limit reached");
            self.too_deep = Some(self.pos);
            return Err(Fail);
        }
        let start = self.pos;
        let mark = (self.furthest.pos, self.furthest.expected.len());
        self.depth += 1;
        self.enter(id);
        let result = body(self);
        self.depth -= 1;
        if result.is_err() {
            self.pos = start;
            if let Some(label) = id.label() {
                self.collapse(start, mark, label);
            }
        }
        self.exit(id, result.is_ok());
        result
    }

    /// Like [`Parser::rule`], consulting and filling the memo table.
    pub(crate) fn memo_rule<T: Memoized>(
        &mut self,
        id: RuleId,
        body: impl FnOnce(&mut Self) -> PResult<T>,
    ) -> PResult<T> {
        let key = (id, self.pos);
        let cached = self.memo.as_ref().and_then(|memo| memo.get(&key)).cloned();
        let revisit = matches!(cached, Some(Memo::Visited));
        if let Some(memo @ (Memo::Success { .. } | Memo::Failure)) = cached {
            trace!(rule = id.name(), token = key.1, "memo hit");
            return self.rule(id, |p| match memo {
                Memo::Success { value, end } => {
                    p.pos = end;
                    T::from_value(value).ok_or(Fail)
                }
                Memo::Visited | Memo::Failure => Err(Fail),
            });
        }

        let result = self.rule(id, body);
        let end = self.pos;
        if let Some(memo) = self.memo.as_mut() {
            let entry = match &result {
                Ok(value) if revisit => Memo::Success {
                    value: value.clone().into_value(),
                    end,
                },
                Ok(_) => Memo::Visited,
                Err(Fail) => Memo::Failure,
            };
            memo.insert(key, entry);
        }
        result
    }

    /// Runs `body`, restoring the cursor and returning `None` if it fails.
    pub(crate) fn optional<T>(&mut self, body: impl FnOnce(&mut Self) -> PResult<T>) -> Option<T> {
        let start = self.pos;
        if let Ok(value) = body(self) {
            Some(value)
        } else {
            self.pos = start;
            None
        }
    }

    fn enter(&mut self, id: RuleId) {
        let offset = self.current().span.start;
        if let Some(tracer) = self.tracer.as_mut() {
            tracer.enter(id, offset);
        }
    }

    fn exit(&mut self, id: RuleId, matched: bool) {
        if let Some(tracer) = self.tracer.as_mut() {
            let outcome = if matched {
                Outcome::Matched
            } else {
                Outcome::Failed
            };
            tracer.exit(id, outcome);
        }
    }

    // --- Furthest failure ---

    fn snapshot(&self) -> Vec<Frame> {
        self.tracer
            .as_ref()
            .map(|tracer| tracer.frames().to_vec())
            .unwrap_or_default()
    }

    /// Records that `expected` would have been accepted at the current token.
    pub(crate) fn record(&mut self, expected: Expected) {
        use core::cmp::Ordering;

        match self.pos.cmp(&self.furthest.pos) {
            Ordering::Less => {}
            Ordering::Greater => {
                self.furthest.pos = self.pos;
                self.furthest.expected.clear();
                self.furthest.expected.push(expected);
                self.furthest.frames = self.snapshot();
            }
            Ordering::Equal => {
                if self.furthest.expected.is_empty() {
                    self.furthest.frames = self.snapshot();
                }
                if !self.furthest.expected.contains(&expected) {
                    self.furthest.expected.push(expected);
                }
            }
        }
    }

    fn collapse(&mut self, start: usize, mark: (usize, usize), label: &'static str) {
        if self.furthest.pos != start {
            return;
        }
        if mark.0 == start {
            self.furthest.expected.truncate(mark.1);
        } else {
            self.furthest.expected.clear();
            self.furthest.frames = self.snapshot();
        }
        let expected = Expected::Label(label);
        if !self.furthest.expected.contains(&expected) {
            self.furthest.expected.push(expected);
        }
    }

    /// Records `expected` and fails.
    pub(crate) fn fail<T>(&mut self, expected: Expected) -> PResult<T> {
        self.record(expected);
        Err(Fail)
    }

    fn failure(&self) -> Failure {
        if let Some(pos) = self.too_deep {
            let token = self.token_at(pos);
            return Failure {
                kind: ErrorKind::Syntax,
                location: token.span.start,
                found: (!token.is_eof()).then(|| String::from(self.text(token.span))),
                expected: Vec::new(),
                frames: Vec::new(),
                too_deep: true,
            };
        }
        let token = self.token_at(self.furthest.pos);
        let found = (!token.is_eof()).then(|| String::from(self.text(token.span)));
        let failure = Failure {
            kind: self.classify(),
            location: token.span.start,
            found,
            expected: self.furthest.expected.clone(),
            frames: self.furthest.frames.clone(),
            too_deep: false,
        };
        debug!(
            kind = failure.kind.name(),
            offset = failure.location.offset,
            expected = failure.expected.len(),
            "parse failed"
        );
        failure
    }

    fn classify(&self) -> ErrorKind {
        let token = self.token_at(self.furthest.pos);
        if self.streaming {
            let buffer_end = self.base.offset + self.source.len();
            let last_real = self.tokens.len().saturating_sub(2);
            if token.is_eof()
                || (self.furthest.pos == last_real && token.span.end.offset == buffer_end)
            {
                return ErrorKind::Incomplete;
            }
        }
        if self.trailing_at == Some(self.furthest.pos) {
            ErrorKind::TrailingInput
        } else {
            ErrorKind::Syntax
        }
    }

    // --- Token access ---

    fn token_at(&self, index: usize) -> &Token {
        // The lexer always ends the buffer with an Eof token.
        let last = self.tokens.len().saturating_sub(1);
        &self.tokens[index.min(last)]
    }

    pub(crate) fn current(&self) -> &Token {
        self.token_at(self.pos)
    }

    pub(crate) fn peek(&self) -> &TokenKind {
        &self.current().kind
    }

    fn peek_nth(&self, n: usize) -> &TokenKind {
        &self.token_at(self.pos + n).kind
    }

    pub(crate) fn at_eof(&self) -> bool {
        self.current().is_eof()
    }

    /// Start of the current token.
    pub(crate) fn start(&self) -> Position {
        self.current().span.start
    }

    /// End of the last consumed token.
    pub(crate) fn prev_end(&self) -> Position {
        match self.pos.checked_sub(1) {
            Some(index) => self.token_at(index).span.end,
            None => self.base,
        }
    }

    /// Span from `start` to the end of the last consumed token.
    pub(crate) fn span_from(&self, start: Position) -> Span {
        Span::new(start, self.prev_end())
    }

    /// Source text covered by `span`.
    pub(crate) fn text(&self, span: Span) -> &'a str {
        let from = span.start.offset.saturating_sub(self.base.offset);
        let to = span.end.offset.saturating_sub(self.base.offset);
        self.source.get(from..to).unwrap_or_default()
    }

    /// Consumes the current token and returns its span.
    pub(crate) fn bump(&mut self) -> Span {
        let span = self.current().span;
        if !self.at_eof() {
            self.pos += 1;
        }
        span
    }

    // --- Terminals ---

    /// Checks the current token's kind without consuming or recording.
    pub(crate) fn check(&self, kind: &TokenKind) -> bool {
        core::mem::discriminant(self.peek()) == core::mem::discriminant(kind)
    }

    /// Checks for a keyword without consuming or recording.
    pub(crate) fn check_keyword(&self, keyword: Keyword) -> bool {
        matches!(self.peek(), TokenKind::Keyword(kw) if *kw == keyword)
    }

    /// Notes a lookahead of `n` tokens. In streaming mode a lookahead that runs
    /// into the end of the buffer records `expected` there: the token it looked
    /// for may still arrive, so the failure must count as incomplete.
    fn lookahead(&mut self, n: usize, expected: Expected) {
        let eof = self.tokens.len().saturating_sub(1);
        let index = (self.pos + n).min(eof);
        if self.streaming && n > 0 && index == eof {
            let pos = core::mem::replace(&mut self.pos, index);
            self.record(expected);
            self.pos = pos;
        }
    }

    /// Checks the kind of the token `n` ahead without consuming it.
    pub(crate) fn check_at(&mut self, n: usize, kind: &TokenKind) -> bool {
        self.lookahead(n, Expected::Token(kind.describe()));
        core::mem::discriminant(self.peek_nth(n)) == core::mem::discriminant(kind)
    }

    /// Checks for a keyword `n` tokens ahead without consuming it.
    pub(crate) fn check_keyword_at(&mut self, n: usize, keyword: Keyword) -> bool {
        self.lookahead(n, Expected::Keyword(keyword));
        matches!(self.peek_nth(n), TokenKind::Keyword(kw) if *kw == keyword)
    }

    /// Consumes the given punctuation token.
    pub(crate) fn punct(&mut self, kind: &TokenKind) -> PResult<Span> {
        if self.check(kind) {
            Ok(self.bump())
        } else {
            self.fail(Expected::Token(kind.describe()))
        }
    }

    /// Consumes the given punctuation token if present.
    pub(crate) fn eat(&mut self, kind: &TokenKind) -> bool {
        self.punct(kind).is_ok()
    }

    /// Consumes the given keyword.
    pub(crate) fn keyword(&mut self, keyword: Keyword) -> PResult<Span> {
        if self.check_keyword(keyword) {
            Ok(self.bump())
        } else {
            self.fail(Expected::Keyword(keyword))
        }
    }

    /// Consumes the given keyword if present.
    pub(crate) fn eat_keyword(&mut self, keyword: Keyword) -> bool {
        self.keyword(keyword).is_ok()
    }

    /// Consumes the first of `keywords` that is present.
    pub(crate) fn one_of(&mut self, keywords: &[Keyword]) -> PResult<Keyword> {
        for &keyword in keywords {
            if self.eat_keyword(keyword) {
                return Ok(keyword);
            }
        }
        Err(Fail)
    }

    pub(crate) fn end_of_input(&mut self) -> PResult<()> {
        if self.at_eof() {
            Ok(())
        } else {
            self.fail(Expected::EndOfInput)
        }
    }

    /// Returns true if the current token can be used as a name.
    pub(crate) fn check_name(&self) -> bool {
        match self.peek() {
            TokenKind::Identifier(_) => true,
            TokenKind::Keyword(kw) => !kw.is_reserved(),
            _ => false,
        }
    }

    /// Consumes an identifier or non-reserved keyword. `what` describes the
    /// name in error messages, e.g. "table name".
    pub(crate) fn name(&mut self, what: &'static str) -> PResult<String> {
        match self.peek() {
            TokenKind::Identifier(name) => {
                let name = name.clone();
                self.bump();
                Ok(name)
            }
            TokenKind::Keyword(kw) if !kw.is_reserved() => {
                let span = self.bump();
                Ok(String::from(self.text(span)))
            }
            _ => self.fail(Expected::Label(what)),
        }
    }

    /// Like [`Parser::name`], also accepting a string literal.
    pub(crate) fn name_or_string(&mut self, what: &'static str) -> PResult<String> {
        if let TokenKind::String(value) = self.peek() {
            let value = value.clone();
            self.bump();
            return Ok(value);
        }
        self.name(what)
    }

    /// Parses `item (',' item)*`.
    pub(crate) fn comma_list<T>(
        &mut self,
        mut item: impl FnMut(&mut Self) -> PResult<T>,
    ) -> PResult<Vec<T>> {
        let mut items = vec![item(self)?];
        loop {
            let start = self.pos;
            if !self.eat(&TokenKind::Comma) {
                break;
            }
            match item(self) {
                Ok(value) => items.push(value),
                Err(Fail) => {
                    self.pos = start;
                    break;
                }
            }
        }
        Ok(items)
    }

    /// Parses `'(' item (',' item)* ')'`.
    pub(crate) fn paren_list<T>(
        &mut self,
        item: impl FnMut(&mut Self) -> PResult<T>,
    ) -> PResult<Vec<T>> {
        self.punct(&TokenKind::LeftParen)?;
        let items = self.comma_list(item)?;
        self.punct(&TokenKind::RightParen)?;
        Ok(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parser(source: &str) -> Parser<'_> {
        Parser::new(source, &ParseOptions::default())
    }

    #[test]
    fn test_record_keeps_furthest() {
        let mut p = parser("SELECT 1");
        p.record(Expected::Keyword(Keyword::With));
        p.bump();
        p.record(Expected::Label("expression"));
        p.record(Expected::Keyword(Keyword::Distinct));
        p.record(Expected::Label("expression"));
        p.pos = 0;
        p.record(Expected::Keyword(Keyword::Select));

        assert_eq!(p.furthest.pos, 1);
        assert_eq!(
            p.furthest.expected,
            vec![
                Expected::Label("expression"),
                Expected::Keyword(Keyword::Distinct)
            ]
        );
    }

    #[test]
    fn test_labelled_rule_collapses_expectations() {
        let mut p = parser("FROM");
        let result: PResult<()> = p.rule(RuleId::Expression, |p| {
            p.record(Expected::Token("'('"));
            p.fail(Expected::Label("number"))
        });
        assert!(result.is_err());
        assert_eq!(p.furthest.expected, vec![Expected::Label("expression")]);
    }

    #[test]
    fn test_rule_restores_cursor_and_trace() {
        let mut p = parser("SELECT 1");
        let result: PResult<()> = p.rule(RuleId::Select, |p| {
            p.bump();
            p.bump();
            Err(Fail)
        });
        assert!(result.is_err());
        assert_eq!(p.pos, 0);
        assert_eq!(p.tracer().map(Tracer::depth), Some(0));
    }

    #[test]
    fn test_memo_stores_value_on_revisit() {
        let mut p = parser("1 + 2");
        let first = p.memo_rule(RuleId::Expression, Parser::expression_body);
        let end = p.pos;
        let key = (RuleId::Expression, 0);
        assert!(matches!(p.memo.as_ref().and_then(|m| m.get(&key)), Some(Memo::Visited)));

        p.pos = 0;
        let second = p.memo_rule(RuleId::Expression, Parser::expression_body);
        assert!(matches!(
            p.memo.as_ref().and_then(|m| m.get(&key)),
            Some(Memo::Success { .. })
        ));

        p.pos = 0;
        let third = p.memo_rule(RuleId::Expression, |_| Err(Fail));
        assert_eq!(first, second);
        assert_eq!(first, third);
        assert_eq!(p.pos, end);
    }

    #[test]
    fn test_lookahead_past_buffer_end_is_incomplete() {
        let streaming = ParseOptions::default().streaming(true);
        for sql in [
            "SELECT * FROM t NOT ",
            "SELECT a FROM t WHERE a NOT ",
            "INSERT INTO t VALUES (1) ON ",
            "CREATE TABLE t (a TEXT NOT ",
        ] {
            let failure = Parser::new(sql, &streaming)
                .parse_streaming_statement()
                .unwrap_err();
            assert_eq!(failure.kind, ErrorKind::Incomplete, "{sql}");
        }

        // A whole document reports the unmatched keyword itself.
        let failure = parser("SELECT * FROM t NOT ").parse_program().unwrap_err();
        assert_eq!(failure.kind, ErrorKind::TrailingInput);
        assert_eq!(failure.found.as_deref(), Some("NOT"));
    }

    #[test]
    fn test_leading_separators_record_nothing() {
        let failure = parser(";; SELEC 1").parse_program().unwrap_err();
        assert_eq!(failure.expected[0], Expected::Label("statement"));
        assert!(!failure.expected.contains(&Expected::Token("';'")));
    }

    #[test]
    fn test_nesting_limit_aborts_parse() {
        let options = ParseOptions::default().max_depth(12);
        let sql = format!("SELECT {}1{};", "(".repeat(20), ")".repeat(20));
        let mut p = Parser::new(&sql, &options);
        let failure = p.parse_program().unwrap_err();
        assert!(failure.too_deep);
        assert_eq!(failure.kind, ErrorKind::Syntax);
        assert_eq!(failure.found.as_deref(), Some("("));
        assert_eq!(p.depth, 0);
        assert_eq!(p.tracer().map(Tracer::depth), Some(0));

        let shallow = "SELECT (1);";
        assert!(Parser::new(shallow, &options).parse_program().is_ok());
    }

    #[test]
    fn test_nesting_limit_is_not_incomplete_when_streaming() {
        let options = ParseOptions::default().streaming(true).max_depth(10);
        let sql = format!("SELECT {}", "(".repeat(20));
        let failure = Parser::new(&sql, &options)
            .parse_streaming_statement()
            .unwrap_err();
        assert!(failure.too_deep);
        assert_eq!(failure.kind, ErrorKind::Syntax);
    }

    #[test]
    fn test_trace_is_balanced_after_parse() {
        for sql in ["SELECT a FROM t WHERE b IN (SELECT c FROM u);", "SELECT FROM;"] {
            let mut p = parser(sql);
            let _ = p.parse_program();
            assert_eq!(p.tracer().map(Tracer::depth), Some(0), "{sql}");
        }
    }

    #[test]
    fn test_name_accepts_unreserved_keywords() {
        let mut p = parser("key");
        assert_eq!(p.name("column name"), Ok(String::from("key")));

        let mut p = parser("from");
        assert!(p.name("column name").is_err());
        assert_eq!(p.furthest.expected, vec![Expected::Label("column name")]);
    }
}
