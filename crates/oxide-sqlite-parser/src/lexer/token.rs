//! Tokens produced by the [`Lexer`](super::Lexer).

use super::Span;

/// Declares [`Keyword`] together with the spelling of each variant.
macro_rules! keywords {
    ($($variant:ident => $text:literal,)+) => {
        /// SQLite keywords.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum Keyword {
            $(
                #[doc = $text]
                $variant,
            )+
        }

        impl Keyword {
            /// Every keyword, in declaration order.
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            /// Looks up a keyword, ignoring ASCII case.
            #[must_use]
            #[allow(clippy::should_implement_trait)]
            pub fn from_str(s: &str) -> Option<Self> {
                match s.to_ascii_uppercase().as_str() {
                    $($text => Some(Self::$variant),)+
                    _ => None,
                }
            }

            /// The upper-case spelling used in messages.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $text,)+
                }
            }
        }
    };
}

keywords! {
    // Data Query Language (DQL)
    Select => "SELECT",
    From => "FROM",
    Where => "WHERE",
    Order => "ORDER",
    By => "BY",
    Group => "GROUP",
    Having => "HAVING",
    Limit => "LIMIT",
    Offset => "OFFSET",
    Distinct => "DISTINCT",
    All => "ALL",
    Window => "WINDOW",

    // Joins
    Join => "JOIN",
    Inner => "INNER",
    Left => "LEFT",
    Right => "RIGHT",
    Full => "FULL",
    Outer => "OUTER",
    Cross => "CROSS",
    Natural => "NATURAL",
    On => "ON",
    Using => "USING",
    Indexed => "INDEXED",

    // Set operations
    Union => "UNION",
    Intersect => "INTERSECT",
    Except => "EXCEPT",

    // Data Manipulation Language (DML)
    Insert => "INSERT",
    Into => "INTO",
    Values => "VALUES",
    Update => "UPDATE",
    Set => "SET",
    Delete => "DELETE",
    Returning => "RETURNING",
    Do => "DO",
    Nothing => "NOTHING",

    // Data Definition Language (DDL)
    Create => "CREATE",
    Drop => "DROP",
    Alter => "ALTER",
    Table => "TABLE",
    Index => "INDEX",
    View => "VIEW",
    Trigger => "TRIGGER",
    Virtual => "VIRTUAL",
    Database => "DATABASE",
    Rename => "RENAME",
    To => "TO",
    Add => "ADD",
    Column => "COLUMN",
    Without => "WITHOUT",
    Strict => "STRICT",
    Generated => "GENERATED",
    Always => "ALWAYS",
    Stored => "STORED",

    // Constraints
    Primary => "PRIMARY",
    Key => "KEY",
    Foreign => "FOREIGN",
    References => "REFERENCES",
    Unique => "UNIQUE",
    Check => "CHECK",
    Default => "DEFAULT",
    Constraint => "CONSTRAINT",
    Cascade => "CASCADE",
    Restrict => "RESTRICT",
    Action => "ACTION",
    No => "NO",
    Match => "MATCH",
    Deferrable => "DEFERRABLE",
    Initially => "INITIALLY",
    Deferred => "DEFERRED",
    Immediate => "IMMEDIATE",
    Collate => "COLLATE",
    Autoincrement => "AUTOINCREMENT",

    // Conflict resolution
    Conflict => "CONFLICT",
    Replace => "REPLACE",
    Abort => "ABORT",
    Rollback => "ROLLBACK",
    Fail => "FAIL",
    Ignore => "IGNORE",

    // Logical operators
    And => "AND",
    Or => "OR",
    Not => "NOT",
    In => "IN",
    Between => "BETWEEN",
    Like => "LIKE",
    Glob => "GLOB",
    Regexp => "REGEXP",
    Escape => "ESCAPE",
    Is => "IS",
    Isnull => "ISNULL",
    Notnull => "NOTNULL",
    Null => "NULL",
    True => "TRUE",
    False => "FALSE",
    Exists => "EXISTS",

    // Ordering
    Asc => "ASC",
    Desc => "DESC",
    Nulls => "NULLS",
    First => "FIRST",
    Last => "LAST",

    // Common clauses
    As => "AS",
    Case => "CASE",
    When => "WHEN",
    Then => "THEN",
    Else => "ELSE",
    End => "END",
    Cast => "CAST",
    Raise => "RAISE",
    If => "IF",
    Temp => "TEMP",
    Temporary => "TEMPORARY",

    // Literals
    CurrentDate => "CURRENT_DATE",
    CurrentTime => "CURRENT_TIME",
    CurrentTimestamp => "CURRENT_TIMESTAMP",

    // Triggers
    Before => "BEFORE",
    After => "AFTER",
    Instead => "INSTEAD",
    Of => "OF",
    For => "FOR",
    Each => "EACH",
    Row => "ROW",

    // Transactions
    Begin => "BEGIN",
    Commit => "COMMIT",
    Transaction => "TRANSACTION",
    Exclusive => "EXCLUSIVE",
    Savepoint => "SAVEPOINT",
    Release => "RELEASE",

    // Common table expressions
    With => "WITH",
    Recursive => "RECURSIVE",
    Materialized => "MATERIALIZED",

    // Window functions
    Over => "OVER",
    Partition => "PARTITION",
    Filter => "FILTER",
    Rows => "ROWS",
    Range => "RANGE",
    Groups => "GROUPS",
    Unbounded => "UNBOUNDED",
    Preceding => "PRECEDING",
    Following => "FOLLOWING",
    Current => "CURRENT",
    Exclude => "EXCLUDE",
    Others => "OTHERS",
    Ties => "TIES",

    // Administration
    Pragma => "PRAGMA",
    Attach => "ATTACH",
    Detach => "DETACH",
    Vacuum => "VACUUM",
    Analyze => "ANALYZE",
    Reindex => "REINDEX",
    Explain => "EXPLAIN",
    Query => "QUERY",
    Plan => "PLAN",
}

impl Keyword {
    /// Returns true if the keyword can never be used as a bare identifier.
    ///
    /// SQLite lets most keywords double as names; only these are rejected
    /// where a table, column or alias name is expected.
    #[must_use]
    pub const fn is_reserved(self) -> bool {
        matches!(
            self,
            Self::All
                | Self::Alter
                | Self::And
                | Self::As
                | Self::Between
                | Self::Case
                | Self::Check
                | Self::Collate
                | Self::Constraint
                | Self::Create
                | Self::Cross
                | Self::CurrentDate
                | Self::CurrentTime
                | Self::CurrentTimestamp
                | Self::Default
                | Self::Deferrable
                | Self::Delete
                | Self::Distinct
                | Self::Drop
                | Self::Else
                | Self::Escape
                | Self::Except
                | Self::Exists
                | Self::False
                | Self::Foreign
                | Self::From
                | Self::Full
                | Self::Glob
                | Self::Group
                | Self::Having
                | Self::In
                | Self::Index
                | Self::Indexed
                | Self::Inner
                | Self::Insert
                | Self::Intersect
                | Self::Into
                | Self::Is
                | Self::Isnull
                | Self::Join
                | Self::Left
                | Self::Like
                | Self::Limit
                | Self::Match
                | Self::Natural
                | Self::Not
                | Self::Notnull
                | Self::Null
                | Self::On
                | Self::Or
                | Self::Order
                | Self::Outer
                | Self::Primary
                | Self::Raise
                | Self::References
                | Self::Regexp
                | Self::Returning
                | Self::Right
                | Self::Select
                | Self::Set
                | Self::Table
                | Self::Then
                | Self::To
                | Self::True
                | Self::Union
                | Self::Unique
                | Self::Update
                | Self::Using
                | Self::Values
                | Self::When
                | Self::Where
                | Self::Window
                | Self::With
        )
    }
}

/// What a [`Token`] is. Literal values are already decoded.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    /// Decimal or `0x` hexadecimal integer.
    Integer(i64),
    Float(f64),
    /// String literal with `''` escapes resolved.
    String(String),
    /// `X'..'` literal.
    Blob(Vec<u8>),
    /// Bare or quoted name. Quotes are stripped.
    Identifier(String),
    Keyword(Keyword),
    /// `?`, `?NNN`, `:name`, `@name` or `$name`, kept as written.
    Variable(String),

    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    /// `=` or `==`.
    Eq,
    /// `!=` or `<>`.
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,
    /// `||`.
    Concat,
    /// `->`.
    Arrow,
    /// `->>`.
    LongArrow,
    BitAnd,
    BitOr,
    BitNot,
    LeftShift,
    RightShift,

    LeftParen,
    RightParen,
    Comma,
    Semicolon,
    Dot,

    Eof,
    /// A malformed lexeme. The message says what was wrong.
    Error(String),
}

impl TokenKind {
    /// Returns a short human-readable description, used in error messages.
    #[must_use]
    pub const fn describe(&self) -> &'static str {
        match self {
            Self::Integer(_) | Self::Float(_) => "number",
            Self::String(_) => "string literal",
            Self::Blob(_) => "blob literal",
            Self::Identifier(_) => "identifier",
            Self::Keyword(kw) => kw.as_str(),
            Self::Variable(_) => "bind parameter",
            Self::Plus => "'+'",
            Self::Minus => "'-'",
            Self::Star => "'*'",
            Self::Slash => "'/'",
            Self::Percent => "'%'",
            Self::Eq => "'='",
            Self::NotEq => "'!='",
            Self::Lt => "'<'",
            Self::LtEq => "'<='",
            Self::Gt => "'>'",
            Self::GtEq => "'>='",
            Self::Concat => "'||'",
            Self::Arrow => "'->'",
            Self::LongArrow => "'->>'",
            Self::BitAnd => "'&'",
            Self::BitOr => "'|'",
            Self::BitNot => "'~'",
            Self::LeftShift => "'<<'",
            Self::RightShift => "'>>'",
            Self::LeftParen => "'('",
            Self::RightParen => "')'",
            Self::Comma => "','",
            Self::Semicolon => "';'",
            Self::Dot => "'.'",
            Self::Eof => "end of input",
            Self::Error(_) => "invalid token",
        }
    }
}

/// A lexeme and where it sits in the document.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    #[must_use]
    pub const fn new(kind: TokenKind, span: Span) -> Self {
        Self { kind, span }
    }

    #[must_use]
    pub const fn is_eof(&self) -> bool {
        matches!(self.kind, TokenKind::Eof)
    }

    #[must_use]
    pub const fn as_keyword(&self) -> Option<Keyword> {
        if let TokenKind::Keyword(keyword) = self.kind {
            Some(keyword)
        } else {
            None
        }
    }
}
