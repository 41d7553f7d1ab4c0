//! Schema definition statements: CREATE, ALTER and DROP.

use serde::Serialize;

use super::expression::Expr;
use super::statement::{ConflictResolution, OrderDirection, SelectStatement, Statement};
use super::types::{QualifiedName, TypeName};
use crate::lexer::Span;

/// A column or expression in an index definition, a PRIMARY KEY/UNIQUE
/// constraint, or an upsert target.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndexedColumn {
    /// Column name or expression, COLLATE included.
    pub expr: Expr,
    /// Sort order.
    pub direction: Option<OrderDirection>,
    /// Source span.
    #[serde(flatten)]
    pub span: Span,
}

/// Foreign key actions (`ON DELETE CASCADE`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReferentialAction {
    SetNull,
    SetDefault,
    Cascade,
    Restrict,
    NoAction,
}

impl ReferentialAction {
    /// Returns the SQL representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::SetNull => "SET NULL",
            Self::SetDefault => "SET DEFAULT",
            Self::Cascade => "CASCADE",
            Self::Restrict => "RESTRICT",
            Self::NoAction => "NO ACTION",
        }
    }
}

/// Foreign key clause (`REFERENCES parent (cols) ...`).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForeignKeyClause {
    /// Referenced table.
    pub table: String,
    /// Referenced columns.
    pub columns: Vec<String>,
    /// ON DELETE action.
    pub on_delete: Option<ReferentialAction>,
    /// ON UPDATE action.
    pub on_update: Option<ReferentialAction>,
    /// MATCH name.
    pub match_name: Option<String>,
    /// `Some(true)` for DEFERRABLE INITIALLY DEFERRED, `Some(false)` for any
    /// other explicit deferrable clause.
    pub deferred: Option<bool>,
    /// Source span.
    #[serde(flatten)]
    pub span: Span,
}

/// Column constraint kinds.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "variant", rename_all = "kebab-case")]
pub enum ColumnConstraintKind {
    /// PRIMARY KEY [ASC|DESC] [conflict] [AUTOINCREMENT]
    PrimaryKey {
        /// Sort order.
        direction: Option<OrderDirection>,
        /// ON CONFLICT resolution.
        on_conflict: Option<ConflictResolution>,
        /// Whether AUTOINCREMENT was given.
        autoincrement: bool,
    },
    /// NOT NULL [conflict]
    NotNull {
        /// ON CONFLICT resolution.
        on_conflict: Option<ConflictResolution>,
    },
    /// NULL
    Null,
    /// UNIQUE [conflict]
    Unique {
        /// ON CONFLICT resolution.
        on_conflict: Option<ConflictResolution>,
    },
    /// CHECK (expr)
    Check {
        /// The check expression.
        expr: Expr,
    },
    /// DEFAULT value
    Default {
        /// The default value.
        value: Expr,
    },
    /// COLLATE name
    Collate {
        /// Collation name.
        collation: String,
    },
    /// REFERENCES ...
    References(ForeignKeyClause),
    /// [GENERATED ALWAYS] AS (expr) [STORED|VIRTUAL]
    Generated {
        /// The generating expression.
        expr: Expr,
        /// Whether STORED was given.
        stored: bool,
    },
}

/// A column constraint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnConstraint {
    /// Constraint name (CONSTRAINT name).
    pub name: Option<String>,
    /// What the constraint enforces.
    pub kind: ColumnConstraintKind,
    /// Source span.
    #[serde(flatten)]
    pub span: Span,
}

/// Column definition for CREATE TABLE and ALTER TABLE ADD COLUMN.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColumnDef {
    /// Column name.
    pub name: String,
    /// Declared type, if any.
    pub type_name: Option<TypeName>,
    /// Constraints in declaration order.
    pub constraints: Vec<ColumnConstraint>,
    /// Source span.
    #[serde(flatten)]
    pub span: Span,
}

impl ColumnDef {
    /// Returns true if a column constraint declares this column the primary key.
    #[must_use]
    pub fn is_primary_key(&self) -> bool {
        self.constraints
            .iter()
            .any(|c| matches!(c.kind, ColumnConstraintKind::PrimaryKey { .. }))
    }

    /// Returns true if the column has a NOT NULL constraint.
    #[must_use]
    pub fn is_not_null(&self) -> bool {
        self.constraints
            .iter()
            .any(|c| matches!(c.kind, ColumnConstraintKind::NotNull { .. }))
    }
}

/// Table constraint kinds.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "variant", rename_all = "kebab-case")]
pub enum TableConstraintKind {
    /// PRIMARY KEY (cols) [conflict]
    PrimaryKey {
        /// Key columns.
        columns: Vec<IndexedColumn>,
        /// ON CONFLICT resolution.
        on_conflict: Option<ConflictResolution>,
    },
    /// UNIQUE (cols) [conflict]
    Unique {
        /// Unique columns.
        columns: Vec<IndexedColumn>,
        /// ON CONFLICT resolution.
        on_conflict: Option<ConflictResolution>,
    },
    /// CHECK (expr)
    Check {
        /// The check expression.
        expr: Expr,
    },
    /// FOREIGN KEY (cols) REFERENCES ...
    ForeignKey {
        /// Referencing columns.
        columns: Vec<String>,
        /// Referenced table and options.
        clause: ForeignKeyClause,
    },
}

/// A table constraint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableConstraint {
    /// Constraint name (CONSTRAINT name).
    pub name: Option<String>,
    /// What the constraint enforces.
    pub kind: TableConstraintKind,
    /// Source span.
    #[serde(flatten)]
    pub span: Span,
}

/// Body of a CREATE TABLE statement.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "variant", rename_all = "kebab-case")]
pub enum TableDefinition {
    /// `(columns, constraints) [options]`
    Columns {
        /// Column definitions.
        columns: Vec<ColumnDef>,
        /// Table constraints.
        constraints: Vec<TableConstraint>,
        /// WITHOUT ROWID.
        without_rowid: bool,
        /// STRICT.
        strict: bool,
    },
    /// `AS select`
    AsSelect {
        /// The query.
        query: Box<SelectStatement>,
    },
}

/// A CREATE TABLE statement.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreateTableStatement {
    /// TEMP or TEMPORARY.
    pub temporary: bool,
    /// IF NOT EXISTS.
    pub if_not_exists: bool,
    /// Table name.
    pub name: QualifiedName,
    /// Columns or AS SELECT.
    pub definition: TableDefinition,
    /// Source span.
    #[serde(flatten)]
    pub span: Span,
}

/// A CREATE INDEX statement.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreateIndexStatement {
    /// UNIQUE.
    pub unique: bool,
    /// IF NOT EXISTS.
    pub if_not_exists: bool,
    /// Index name.
    pub name: QualifiedName,
    /// Indexed table.
    pub table: String,
    /// Indexed columns.
    pub columns: Vec<IndexedColumn>,
    /// Partial index condition.
    pub where_clause: Option<Expr>,
    /// Source span.
    #[serde(flatten)]
    pub span: Span,
}

/// A CREATE VIEW statement.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreateViewStatement {
    /// TEMP or TEMPORARY.
    pub temporary: bool,
    /// IF NOT EXISTS.
    pub if_not_exists: bool,
    /// View name.
    pub name: QualifiedName,
    /// Column names.
    pub columns: Vec<String>,
    /// The view query.
    pub query: Box<SelectStatement>,
    /// Source span.
    #[serde(flatten)]
    pub span: Span,
}

/// A CREATE VIRTUAL TABLE statement.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreateVirtualTableStatement {
    /// IF NOT EXISTS.
    pub if_not_exists: bool,
    /// Table name.
    pub name: QualifiedName,
    /// Module name.
    pub module: String,
    /// Module arguments as raw source text.
    pub args: Vec<String>,
    /// Source span.
    #[serde(flatten)]
    pub span: Span,
}

/// When a trigger fires relative to its event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum TriggerTiming {
    Before,
    After,
    InsteadOf,
}

/// The event a trigger listens to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "variant", rename_all = "kebab-case")]
pub enum TriggerEvent {
    /// DELETE
    Delete,
    /// INSERT
    Insert,
    /// UPDATE [OF columns]
    Update {
        /// Watched columns; empty for any column.
        columns: Vec<String>,
    },
}

/// A CREATE TRIGGER statement.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CreateTriggerStatement {
    /// TEMP or TEMPORARY.
    pub temporary: bool,
    /// IF NOT EXISTS.
    pub if_not_exists: bool,
    /// Trigger name.
    pub name: QualifiedName,
    /// BEFORE, AFTER or INSTEAD OF.
    pub timing: Option<TriggerTiming>,
    /// Triggering event.
    pub event: TriggerEvent,
    /// Table the trigger is attached to.
    pub table: String,
    /// FOR EACH ROW.
    pub for_each_row: bool,
    /// WHEN condition.
    pub when: Option<Expr>,
    /// Statements between BEGIN and END.
    pub body: Vec<Statement>,
    /// Source span.
    #[serde(flatten)]
    pub span: Span,
}

/// ALTER TABLE actions.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "variant", rename_all = "kebab-case")]
pub enum AlterTableAction {
    /// RENAME TO new_name
    RenameTable {
        /// New table name.
        to: String,
    },
    /// RENAME [COLUMN] old TO new
    RenameColumn {
        /// Current column name.
        from: String,
        /// New column name.
        to: String,
    },
    /// ADD [COLUMN] definition
    AddColumn {
        /// The new column.
        column: ColumnDef,
    },
    /// DROP [COLUMN] name
    DropColumn {
        /// Dropped column.
        name: String,
    },
}

/// An ALTER TABLE statement.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlterTableStatement {
    /// Altered table.
    pub table: QualifiedName,
    /// What to change.
    pub action: AlterTableAction,
    /// Source span.
    #[serde(flatten)]
    pub span: Span,
}

/// The kind of object a DROP statement removes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum DropObject {
    Table,
    Index,
    View,
    Trigger,
}

impl DropObject {
    /// Returns the SQL representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Table => "TABLE",
            Self::Index => "INDEX",
            Self::View => "VIEW",
            Self::Trigger => "TRIGGER",
        }
    }
}

/// A DROP statement.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DropStatement {
    /// What is dropped.
    pub object: DropObject,
    /// IF EXISTS.
    pub if_exists: bool,
    /// Object name.
    pub name: QualifiedName,
    /// Source span.
    #[serde(flatten)]
    pub span: Span,
}
