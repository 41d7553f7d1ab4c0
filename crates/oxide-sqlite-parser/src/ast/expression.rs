//! Expression AST types.

use serde::Serialize;

use super::statement::{OrderBy, SelectStatement};
use super::types::{QualifiedName, TypeName};
use crate::lexer::Span;

/// A constant, tagged by `variant` when serialized.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "variant", content = "value", rename_all = "kebab-case")]
pub enum Literal {
    Integer(i64),
    Float(f64),
    String(String),
    Blob(Vec<u8>),
    /// `TRUE` or `FALSE`.
    Boolean(bool),
    Null,
    CurrentTime,
    CurrentDate,
    CurrentTimestamp,
}

/// Operators that combine two operands with a single token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum BinaryOp {
    Or,
    And,
    Eq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,
    BitAnd,
    BitOr,
    LeftShift,
    RightShift,
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Concat,
    /// JSON `->`.
    Extract,
    /// JSON `->>`.
    ExtractText,
}

/// Unary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum UnaryOp {
    /// Negation (-)
    Neg,
    /// Identity (+)
    Plus,
    /// Logical NOT
    Not,
    /// Bitwise NOT (~)
    BitNot,
}

/// Pattern-matching operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum LikeOp {
    Like,
    Glob,
    Regexp,
    Match,
}

/// The right-hand side of an IN expression.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "variant", rename_all = "kebab-case")]
pub enum InTarget {
    /// `IN (a, b, c)`, possibly empty.
    List {
        /// The listed values.
        items: Vec<Expr>,
    },
    /// `IN (SELECT ...)`.
    Subquery {
        /// The subquery.
        query: Box<SelectStatement>,
    },
    /// `IN table`.
    Table {
        /// The table name.
        table: QualifiedName,
    },
}

/// The action of a RAISE function.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum RaiseAction {
    Ignore,
    Rollback,
    Abort,
    Fail,
}

/// Frame units of a window frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum FrameUnits {
    Rows,
    Range,
    Groups,
}

/// One end of a window frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "variant", content = "offset", rename_all = "kebab-case")]
pub enum FrameBound {
    /// UNBOUNDED PRECEDING
    UnboundedPreceding,
    /// expr PRECEDING
    Preceding(Box<Expr>),
    /// CURRENT ROW
    CurrentRow,
    /// expr FOLLOWING
    Following(Box<Expr>),
    /// UNBOUNDED FOLLOWING
    UnboundedFollowing,
}

/// The EXCLUDE clause of a window frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum FrameExclude {
    NoOthers,
    CurrentRow,
    Group,
    Ties,
}

/// A window frame specification.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrameSpec {
    /// ROWS, RANGE or GROUPS.
    pub units: FrameUnits,
    /// Frame start (or the only bound when BETWEEN is not used).
    pub start: FrameBound,
    /// Frame end, present for `BETWEEN start AND end`.
    pub end: Option<FrameBound>,
    /// EXCLUDE clause.
    pub exclude: Option<FrameExclude>,
}

/// A window definition, either inline after OVER or in a WINDOW clause.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WindowDefinition {
    /// Name of the window this one extends.
    pub base: Option<String>,
    /// PARTITION BY expressions.
    pub partition_by: Vec<Expr>,
    /// ORDER BY terms.
    pub order_by: Vec<OrderBy>,
    /// Frame specification.
    pub frame: Option<FrameSpec>,
    /// Source span.
    #[serde(flatten)]
    pub span: Span,
}

/// The OVER clause of a window function call.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "variant", content = "window", rename_all = "kebab-case")]
pub enum Over {
    /// `OVER name`
    Named(String),
    /// `OVER (...)`
    Definition(WindowDefinition),
}

/// A function call expression.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FunctionCall {
    /// The function name.
    pub name: String,
    /// The arguments.
    pub args: Vec<Expr>,
    /// Whether DISTINCT was specified.
    pub distinct: bool,
    /// Whether the argument list was `*`.
    pub star: bool,
    /// FILTER (WHERE ...) clause.
    pub filter: Option<Box<Expr>>,
    /// OVER clause.
    pub over: Option<Over>,
}

/// An SQL expression with its source span.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Expr {
    /// What kind of expression this is.
    #[serde(flatten)]
    pub kind: ExprKind,
    /// Source span.
    #[serde(flatten)]
    pub span: Span,
}

impl Expr {
    /// Creates a new expression.
    #[must_use]
    pub const fn new(kind: ExprKind, span: Span) -> Self {
        Self { kind, span }
    }
}

/// The kinds of SQL expression.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum ExprKind {
    /// A literal value.
    Literal(Literal),

    /// A bind parameter, kept verbatim (`?`, `?1`, `:name`, `@name`, `$name`).
    Variable {
        /// Parameter text.
        name: String,
    },

    /// A column reference, optionally qualified.
    Column {
        /// Schema name (optional).
        schema: Option<String>,
        /// Table name or alias (optional).
        table: Option<String>,
        /// Column name.
        name: String,
    },

    /// A binary expression.
    Binary {
        left: Box<Expr>,
        op: BinaryOp,
        right: Box<Expr>,
    },

    /// A unary expression.
    Unary {
        op: UnaryOp,
        operand: Box<Expr>,
    },

    /// `expr COLLATE name`.
    Collate {
        /// The collated expression.
        expr: Box<Expr>,
        /// Collation name.
        collation: String,
    },

    /// LIKE, GLOB, REGEXP or MATCH.
    Like {
        expr: Box<Expr>,
        op: LikeOp,
        pattern: Box<Expr>,
        /// ESCAPE character expression.
        escape: Option<Box<Expr>>,
        /// Whether NOT was given.
        negated: bool,
    },

    /// IS NULL, ISNULL, NOTNULL and NOT NULL.
    IsNull {
        expr: Box<Expr>,
        /// Whether this is a NOT NULL test.
        negated: bool,
    },

    /// `a IS b`, `a IS NOT b`, and the DISTINCT FROM forms.
    Is {
        left: Box<Expr>,
        right: Box<Expr>,
        /// True for IS NOT and IS DISTINCT FROM.
        negated: bool,
    },

    /// BETWEEN expression.
    Between {
        expr: Box<Expr>,
        low: Box<Expr>,
        high: Box<Expr>,
        /// Whether this is NOT BETWEEN.
        negated: bool,
    },

    /// IN expression.
    In {
        expr: Box<Expr>,
        /// The list, subquery or table to check against.
        target: InTarget,
        /// Whether this is NOT IN.
        negated: bool,
    },

    /// EXISTS (subquery).
    Exists {
        /// The subquery.
        query: Box<SelectStatement>,
    },

    /// A scalar subquery.
    Subquery {
        /// The subquery.
        query: Box<SelectStatement>,
    },

    /// A parenthesized expression.
    Paren {
        /// The inner expression.
        expr: Box<Expr>,
    },

    /// A row value: `(a, b, ...)` with at least two items.
    Row {
        /// The items.
        items: Vec<Expr>,
    },

    /// CAST expression.
    Cast {
        /// Expression to cast.
        expr: Box<Expr>,
        /// Target type.
        type_name: TypeName,
    },

    /// CASE expression.
    Case {
        /// The operand (if any).
        operand: Option<Box<Expr>>,
        /// WHEN/THEN clauses.
        when_clauses: Vec<(Expr, Expr)>,
        /// ELSE clause.
        else_clause: Option<Box<Expr>>,
    },

    /// A function call.
    Function(FunctionCall),

    /// RAISE(...) inside a trigger body.
    Raise {
        /// What RAISE does.
        action: RaiseAction,
        /// Error message, absent for IGNORE.
        message: Option<Box<Expr>>,
    },
}
