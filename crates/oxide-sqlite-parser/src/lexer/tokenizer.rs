//! Hand-written scanner for SQLite source text.

use super::{Keyword, Position, Span, Token, TokenKind};

/// Splits SQLite source text into [`Token`]s.
///
/// Positions are reported relative to a base [`Position`], so a buffer that
/// starts in the middle of a larger document still yields absolute offsets,
/// lines and columns. Malformed lexemes become [`TokenKind::Error`] tokens
/// instead of stopping the scan.
pub struct Lexer<'a> {
    input: &'a str,
    /// Byte offset of the next unread character.
    pos: usize,
    /// Byte offset where the current lexeme begins.
    start: usize,
    cursor: Position,
    token_start: Position,
}

impl<'a> Lexer<'a> {
    /// Creates a new lexer for the given input.
    #[must_use]
    pub const fn new(input: &'a str) -> Self {
        Self::with_start(input, Position::START)
    }

    /// Creates a lexer whose first byte sits at `start` in the enclosing document.
    #[must_use]
    pub const fn with_start(input: &'a str, start: Position) -> Self {
        Self {
            input,
            pos: 0,
            start: 0,
            cursor: start,
            token_start: start,
        }
    }

    fn peek(&self) -> Option<char> {
        self.peek_nth(0)
    }

    fn peek_nth(&self, n: usize) -> Option<char> {
        self.input[self.pos..].chars().nth(n)
    }

    fn digit_at(&self, n: usize) -> bool {
        self.peek_nth(n).is_some_and(|c| c.is_ascii_digit())
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        self.cursor = self.cursor.advance(c);
        Some(c)
    }

    /// Consumes `expected` if it is the next character.
    fn eat(&mut self, expected: char) -> bool {
        let matched = self.peek() == Some(expected);
        if matched {
            self.bump();
        }
        matched
    }

    /// Consumes characters while `pred` holds and returns how many were taken.
    fn eat_while(&mut self, pred: impl Fn(char) -> bool) -> usize {
        let mut taken = 0;
        while self.peek().is_some_and(&pred) {
            self.bump();
            taken += 1;
        }
        taken
    }

    /// The text of the lexeme scanned so far.
    fn lexeme(&self) -> &'a str {
        &self.input[self.start..self.pos]
    }

    const fn token(&self, kind: TokenKind) -> Token {
        Token::new(kind, Span::new(self.token_start, self.cursor))
    }

    fn error(&self, message: impl Into<String>) -> Token {
        self.token(TokenKind::Error(message.into()))
    }

    fn is_identifier_char(c: char) -> bool {
        c.is_alphanumeric() || c == '_' || c == '$'
    }

    /// Skips whitespace, `--` line comments and `/* */` block comments.
    fn skip_trivia(&mut self) {
        loop {
            self.eat_while(char::is_whitespace);
            match (self.peek(), self.peek_nth(1)) {
                (Some('-'), Some('-')) => {
                    self.eat_while(|c| c != '\n');
                }
                (Some('/'), Some('*')) => self.skip_block_comment(),
                _ => return,
            }
        }
    }

    /// An unterminated block comment runs to the end of the input.
    fn skip_block_comment(&mut self) {
        self.bump();
        self.bump();
        while let Some(c) = self.bump() {
            if c == '*' && self.eat('/') {
                return;
            }
        }
    }

    fn scan_identifier(&mut self) -> Token {
        self.eat_while(Self::is_identifier_char);
        let text = self.lexeme();
        match Keyword::from_str(text) {
            Some(keyword) => self.token(TokenKind::Keyword(keyword)),
            None => self.token(TokenKind::Identifier(String::from(text))),
        }
    }

    /// Reads a delimited body, starting at its opening character. The closing
    /// character escapes itself by doubling, except for `]`. Returns `None` when
    /// the input ends first.
    fn scan_delimited(&mut self, close: char) -> Option<String> {
        self.bump();
        let mut value = String::new();
        loop {
            let c = self.bump()?;
            if c != close {
                value.push(c);
            } else if close != ']' && self.eat(close) {
                value.push(close);
            } else {
                return Some(value);
            }
        }
    }

    /// `"name"`, `` `name` `` or `[name]`.
    fn scan_quoted_identifier(&mut self, close: char) -> Token {
        match self.scan_delimited(close) {
            Some(name) => self.token(TokenKind::Identifier(name)),
            None => self.error("Unterminated quoted identifier"),
        }
    }

    fn scan_string(&mut self) -> Token {
        match self.scan_delimited('\'') {
            Some(value) => self.token(TokenKind::String(value)),
            None => self.error("Unterminated string literal"),
        }
    }

    /// Integer, real or `0x` hexadecimal literal. SQLite accepts both `1.` and `.5`.
    fn scan_number(&mut self) -> Token {
        if self.peek() == Some('0') && matches!(self.peek_nth(1), Some('x' | 'X')) {
            return self.scan_hex_number();
        }

        let is_digit = |c: char| c.is_ascii_digit();
        self.eat_while(is_digit);
        let fraction = self.eat('.');
        if fraction {
            self.eat_while(is_digit);
        }
        let exponent = self.eat('e') || self.eat('E');
        if exponent {
            if !self.eat('+') {
                self.eat('-');
            }
            self.eat_while(is_digit);
        }

        // "1abc" is a malformed number, not a number followed by a name
        if self.eat_while(Self::is_identifier_char) > 0 {
            return self.error("Invalid numeric literal");
        }

        let text = self.lexeme();
        if fraction || exponent {
            return match text.parse::<f64>() {
                Ok(value) => self.token(TokenKind::Float(value)),
                Err(e) => self.error(format!("Invalid float: {e}")),
            };
        }
        // Integers too large for 64 bits are read as reals
        match (text.parse::<i64>(), text.parse::<f64>()) {
            (Ok(value), _) => self.token(TokenKind::Integer(value)),
            (Err(_), Ok(value)) => self.token(TokenKind::Float(value)),
            (Err(e), Err(_)) => self.error(format!("Invalid integer: {e}")),
        }
    }

    #[allow(clippy::cast_possible_wrap)]
    fn scan_hex_number(&mut self) -> Token {
        self.bump();
        self.bump();
        let digits_start = self.pos;
        self.eat_while(Self::is_identifier_char);
        match u64::from_str_radix(&self.input[digits_start..self.pos], 16) {
            // two's complement, as SQLite stores it
            Ok(value) => self.token(TokenKind::Integer(value as i64)),
            Err(e) => self.error(format!("Invalid hexadecimal integer: {e}")),
        }
    }

    /// `X'..'` literal. The body ends at the first quote and must hold an even
    /// number of hex digits.
    fn scan_blob(&mut self) -> Token {
        self.bump();
        self.bump();
        let digits_start = self.pos;
        self.eat_while(|c| c != '\'');
        let digits = &self.input[digits_start..self.pos];
        if !self.eat('\'') {
            return self.error("Unterminated blob literal");
        }
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return self.error("Invalid character in blob literal");
        }
        if digits.len() % 2 != 0 {
            return self.error("Odd number of hex digits in blob literal");
        }
        let bytes = (0..digits.len())
            .step_by(2)
            .filter_map(|i| u8::from_str_radix(&digits[i..i + 2], 16).ok())
            .collect();
        self.token(TokenKind::Blob(bytes))
    }

    /// `?` may be followed by digits; `:`, `@` and `$` need a name.
    fn scan_variable(&mut self, sigil: char) -> Token {
        self.bump();
        if sigil == '?' {
            self.eat_while(|c| c.is_ascii_digit());
        } else if self.eat_while(Self::is_identifier_char) == 0 {
            return self.error(format!("Expected parameter name after {sigil}"));
        }
        self.token(TokenKind::Variable(String::from(self.lexeme())))
    }

    fn scan_punctuation(&mut self, c: char) -> Token {
        self.bump();
        let kind = match c {
            '(' => TokenKind::LeftParen,
            ')' => TokenKind::RightParen,
            ',' => TokenKind::Comma,
            ';' => TokenKind::Semicolon,
            '.' => TokenKind::Dot,
            '+' => TokenKind::Plus,
            '*' => TokenKind::Star,
            '/' => TokenKind::Slash,
            '%' => TokenKind::Percent,
            '~' => TokenKind::BitNot,
            '&' => TokenKind::BitAnd,
            '-' if self.eat('>') => {
                if self.eat('>') {
                    TokenKind::LongArrow
                } else {
                    TokenKind::Arrow
                }
            }
            '-' => TokenKind::Minus,
            '=' => {
                self.eat('=');
                TokenKind::Eq
            }
            '<' if self.eat('=') => TokenKind::LtEq,
            '<' if self.eat('>') => TokenKind::NotEq,
            '<' if self.eat('<') => TokenKind::LeftShift,
            '<' => TokenKind::Lt,
            '>' if self.eat('=') => TokenKind::GtEq,
            '>' if self.eat('>') => TokenKind::RightShift,
            '>' => TokenKind::Gt,
            '!' if self.eat('=') => TokenKind::NotEq,
            '|' if self.eat('|') => TokenKind::Concat,
            '|' => TokenKind::BitOr,
            _ => return self.error(format!("Unexpected character: {c}")),
        };
        self.token(kind)
    }

    /// Scans the next token. Returns `Eof` once the input is exhausted.
    #[must_use]
    pub fn next_token(&mut self) -> Token {
        self.skip_trivia();
        self.start = self.pos;
        self.token_start = self.cursor;

        let Some(c) = self.peek() else {
            return self.token(TokenKind::Eof);
        };

        match c {
            '\'' => self.scan_string(),
            '"' | '`' => self.scan_quoted_identifier(c),
            '[' => self.scan_quoted_identifier(']'),
            'X' | 'x' if self.peek_nth(1) == Some('\'') => self.scan_blob(),
            '.' if self.digit_at(1) => self.scan_number(),
            _ if c.is_ascii_digit() => self.scan_number(),
            _ if c.is_alphabetic() || c == '_' => self.scan_identifier(),
            '?' | ':' | '@' | '$' => self.scan_variable(c),
            _ => self.scan_punctuation(c),
        }
    }
    /// Tokenizes the entire input and returns all tokens, ending with `Eof`.
    #[must_use]
    pub fn tokenize(&mut self) -> Vec<Token> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token();
            let done = token.is_eof();
            tokens.push(token);
            if done {
                return tokens;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::TokenKind as K;

    fn tokenize(input: &str) -> Vec<Token> {
        Lexer::new(input).tokenize()
    }

    /// Compares kinds, leaving out the final `Eof`.
    #[track_caller]
    fn assert_kinds(input: &str, expected: &[TokenKind]) {
        let mut kinds: Vec<_> = tokenize(input).into_iter().map(|t| t.kind).collect();
        assert_eq!(kinds.pop(), Some(K::Eof), "{input}");
        assert_eq!(kinds, expected, "{input}");
    }

    fn ident(name: &str) -> TokenKind {
        K::Identifier(String::from(name))
    }

    fn is_error(input: &str) -> bool {
        matches!(tokenize(input)[0].kind, K::Error(_))
    }

    #[test]
    fn test_trivia_only_yields_eof() {
        assert_kinds("", &[]);
        let tokens = tokenize("   \n\t  -- note\n/* block */");
        assert_eq!(tokens.len(), 1);
        assert_eq!(tokens[0].span.start.offset, 26);
    }

    #[test]
    fn test_unterminated_block_comment_runs_to_end() {
        assert_kinds(
            "SELECT -- comment\nFROM /* block */ WHERE /* open",
            &[
                K::Keyword(Keyword::Select),
                K::Keyword(Keyword::From),
                K::Keyword(Keyword::Where),
            ],
        );
    }

    #[test]
    fn test_keywords_ignore_case() {
        assert_kinds(
            "select FROM wHeRe",
            &[
                K::Keyword(Keyword::Select),
                K::Keyword(Keyword::From),
                K::Keyword(Keyword::Where),
            ],
        );
    }

    #[test]
    fn test_identifier_forms() {
        assert_kinds(
            "foo bar_baz _qux a$b",
            &[ident("foo"), ident("bar_baz"), ident("_qux"), ident("a$b")],
        );
        assert_kinds(
            "\"column \"\"name\"\"\" `another` [third one]",
            &[ident("column \"name\""), ident("another"), ident("third one")],
        );
        // a quoted keyword is a name
        assert_kinds("\"select\"", &[ident("select")]);
        assert!(is_error("[open"));
    }

    #[test]
    fn test_numeric_literals() {
        assert_kinds(
            "42 3.25 .5 1. 1e10 2.5e-3 0x1F",
            &[
                K::Integer(42),
                K::Float(3.25),
                K::Float(0.5),
                K::Float(1.0),
                K::Float(1e10),
                K::Float(2.5e-3),
                K::Integer(31),
            ],
        );
        assert_kinds("99999999999999999999", &[K::Float(1e20)]);
        assert_kinds("0xFFFFFFFFFFFFFFFF", &[K::Integer(-1)]);
    }

    #[test]
    fn test_malformed_numbers() {
        assert!(is_error("1e"));
        assert!(is_error("12abc"));
        assert!(is_error("0x"));
    }

    #[test]
    fn test_string_literals() {
        assert_kinds(
            "'hello' 'it''s' ''",
            &[
                K::String(String::from("hello")),
                K::String(String::from("it's")),
                K::String(String::new()),
            ],
        );
        let tokens = tokenize("SELECT 'abc");
        assert!(matches!(tokens[1].kind, K::Error(_)));
        assert_eq!(tokens[1].span.end.offset, 11);
    }

    #[test]
    fn test_blob_literals() {
        assert_kinds(
            "X'48454C4C4F' x''",
            &[K::Blob(vec![0x48, 0x45, 0x4C, 0x4C, 0x4F]), K::Blob(vec![])],
        );
        assert!(is_error("x'ABC'"));
        assert!(is_error("X'zz'"));
        assert!(is_error("X'00"));
    }

    #[test]
    fn test_operators() {
        assert_kinds(
            "+ - * / % = == != <> < <= > >= || -> ->>",
            &[
                K::Plus,
                K::Minus,
                K::Star,
                K::Slash,
                K::Percent,
                K::Eq,
                K::Eq,
                K::NotEq,
                K::NotEq,
                K::Lt,
                K::LtEq,
                K::Gt,
                K::GtEq,
                K::Concat,
                K::Arrow,
                K::LongArrow,
            ],
        );
        assert_kinds(
            "a&b|~c<<1>>2",
            &[
                ident("a"),
                K::BitAnd,
                ident("b"),
                K::BitOr,
                K::BitNot,
                ident("c"),
                K::LeftShift,
                K::Integer(1),
                K::RightShift,
                K::Integer(2),
            ],
        );
        assert!(is_error("!"));
        assert!(is_error("#"));
    }

    #[test]
    fn test_bind_parameters() {
        let var = |text: &str| K::Variable(String::from(text));
        assert_kinds(
            "? ?12 :name @id $v",
            &[var("?"), var("?12"), var(":name"), var("@id"), var("$v")],
        );
        assert!(is_error(": x"));
    }

    #[test]
    fn test_positions_track_lines() {
        let tokens = tokenize("SELECT id\n  FROM t");
        assert_eq!(tokens[0].span.start, Position::new(0, 1, 1));
        assert_eq!(tokens[0].span.end, Position::new(6, 1, 7));
        assert_eq!(tokens[1].span.start, Position::new(7, 1, 8));
        assert_eq!(tokens[2].span.start, Position::new(12, 2, 3));
    }

    #[test]
    fn test_with_start_offsets_positions() {
        let base = Position::new(100, 4, 9);
        let tokens = Lexer::with_start("x\ny", base).tokenize();
        assert_eq!(tokens[0].span.start, base);
        assert_eq!(tokens[1].span.start, Position::new(102, 5, 1));
        assert_eq!(tokens[2].span.start.offset, 103);
    }
}
