//! Names and type names shared by statements and expressions.

use core::fmt;

use serde::Serialize;

use super::expression::Expr;
use crate::lexer::Span;

/// A possibly schema-qualified object name, such as `main.users`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct QualifiedName {
    /// Schema name (optional).
    pub schema: Option<String>,
    /// Object name.
    pub name: String,
    /// Source span.
    #[serde(flatten)]
    pub span: Span,
}

impl fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.schema {
            Some(schema) => write!(f, "{schema}.{}", self.name),
            None => f.write_str(&self.name),
        }
    }
}

/// Type affinity, as SQLite derives it from a declared type name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Affinity {
    Integer,
    Text,
    Blob,
    Real,
    Numeric,
}

impl Affinity {
    /// Returns the SQL representation of the affinity.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Integer => "INTEGER",
            Self::Text => "TEXT",
            Self::Blob => "BLOB",
            Self::Real => "REAL",
            Self::Numeric => "NUMERIC",
        }
    }
}

/// A declared column type. SQLite type names are free-form: one or more
/// words optionally followed by one or two signed numbers in parentheses.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TypeName {
    /// The words of the type name joined by single spaces, e.g. `UNSIGNED BIG INT`.
    pub name: String,
    /// Size arguments, e.g. `255` in `VARCHAR(255)`.
    pub args: Vec<Expr>,
    /// Source span.
    #[serde(flatten)]
    pub span: Span,
}

impl TypeName {
    /// Determines the column affinity using SQLite's substring rules.
    #[must_use]
    pub fn affinity(&self) -> Affinity {
        let name = self.name.to_ascii_uppercase();
        if name.contains("INT") {
            Affinity::Integer
        } else if name.contains("CHAR") || name.contains("CLOB") || name.contains("TEXT") {
            Affinity::Text
        } else if name.contains("BLOB") || name.is_empty() {
            Affinity::Blob
        } else if name.contains("REAL") || name.contains("FLOA") || name.contains("DOUB") {
            Affinity::Real
        } else {
            Affinity::Numeric
        }
    }
}
