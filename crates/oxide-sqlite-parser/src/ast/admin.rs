//! Database administration and transaction control statements.

use serde::Serialize;

use super::expression::Expr;
use super::statement::Statement;
use super::types::QualifiedName;
use crate::lexer::Span;

/// The value of a PRAGMA assignment or call.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "variant", content = "value", rename_all = "kebab-case")]
pub enum PragmaValue {
    /// A signed number.
    Number(Expr),
    /// A name or keyword such as `ON`, `WAL` or `DELETE`.
    Name(String),
    /// A string literal.
    String(String),
}

/// A PRAGMA statement.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PragmaStatement {
    /// Pragma name, optionally schema-qualified.
    pub name: QualifiedName,
    /// Value given with `=` or in parentheses.
    pub value: Option<PragmaValue>,
    /// Source span.
    #[serde(flatten)]
    pub span: Span,
}

/// BEGIN transaction behaviour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum TransactionMode {
    Deferred,
    Immediate,
    Exclusive,
}

/// Transaction control actions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "kebab-case")]
pub enum TransactionAction {
    /// BEGIN [mode] [TRANSACTION]
    Begin {
        /// Locking mode.
        mode: Option<TransactionMode>,
    },
    /// COMMIT or END [TRANSACTION]
    Commit,
    /// ROLLBACK [TRANSACTION] [TO [SAVEPOINT] name]
    Rollback {
        /// Savepoint to roll back to.
        savepoint: Option<String>,
    },
    /// SAVEPOINT name
    Savepoint {
        /// Savepoint name.
        name: String,
    },
    /// RELEASE [SAVEPOINT] name
    Release {
        /// Savepoint name.
        name: String,
    },
}

/// A transaction control statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TransactionStatement {
    /// The action.
    #[serde(flatten)]
    pub action: TransactionAction,
    /// Source span.
    #[serde(flatten)]
    pub span: Span,
}

/// ATTACH [DATABASE] expr AS schema.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AttachStatement {
    /// File name expression.
    pub expr: Expr,
    /// Schema name.
    pub schema: String,
    /// Source span.
    #[serde(flatten)]
    pub span: Span,
}

/// DETACH [DATABASE] schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DetachStatement {
    /// Schema name.
    pub schema: String,
    /// Source span.
    #[serde(flatten)]
    pub span: Span,
}

/// VACUUM [schema] [INTO file].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VacuumStatement {
    /// Schema name.
    pub schema: Option<String>,
    /// Target file expression.
    pub into: Option<Expr>,
    /// Source span.
    #[serde(flatten)]
    pub span: Span,
}

/// ANALYZE [name].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnalyzeStatement {
    /// Schema, table or index name.
    pub target: Option<QualifiedName>,
    /// Source span.
    #[serde(flatten)]
    pub span: Span,
}

/// REINDEX [name].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReindexStatement {
    /// Collation, table or index name.
    pub target: Option<QualifiedName>,
    /// Source span.
    #[serde(flatten)]
    pub span: Span,
}

/// EXPLAIN [QUERY PLAN] statement.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExplainStatement {
    /// Whether QUERY PLAN was given.
    pub query_plan: bool,
    /// The explained statement.
    pub statement: Box<Statement>,
    /// Source span.
    #[serde(flatten)]
    pub span: Span,
}
