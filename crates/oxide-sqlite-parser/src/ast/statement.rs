//! SQL statement AST types: queries, data manipulation and the statement enum.

use serde::Serialize;

use super::admin::{
    AnalyzeStatement, AttachStatement, DetachStatement, ExplainStatement, PragmaStatement,
    ReindexStatement, TransactionStatement, VacuumStatement,
};
use super::ddl::{
    AlterTableStatement, CreateIndexStatement, CreateTableStatement, CreateTriggerStatement,
    CreateViewStatement, CreateVirtualTableStatement, DropStatement, IndexedColumn,
};
use super::expression::{Expr, WindowDefinition};
use super::types::QualifiedName;
use crate::lexer::{Position, Span};

/// Order direction for ORDER BY.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum OrderDirection {
    /// Ascending order (default).
    #[default]
    Asc,
    /// Descending order.
    Desc,
}

/// Null ordering for ORDER BY.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum NullOrdering {
    /// NULLs come first.
    First,
    /// NULLs come last.
    Last,
}

/// An ORDER BY clause entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OrderBy {
    /// The expression to order by.
    pub expr: Expr,
    /// The direction (ASC or DESC).
    pub direction: OrderDirection,
    /// Null ordering (optional).
    pub nulls: Option<NullOrdering>,
    /// Source span.
    #[serde(flatten)]
    pub span: Span,
}

/// LIMIT clause. `LIMIT a, b` is stored with `b` as the count and `a` as the offset.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Limit {
    /// Maximum number of rows.
    pub count: Expr,
    /// Rows to skip.
    pub offset: Option<Expr>,
    /// Source span.
    #[serde(flatten)]
    pub span: Span,
}

/// Conflict resolution algorithm (`OR ROLLBACK`, `ON CONFLICT IGNORE`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ConflictResolution {
    Rollback,
    Abort,
    Fail,
    Ignore,
    Replace,
}

/// Join type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum JoinType {
    /// INNER JOIN or plain JOIN.
    Inner,
    /// LEFT OUTER JOIN.
    Left,
    /// RIGHT OUTER JOIN.
    Right,
    /// FULL OUTER JOIN.
    Full,
    /// CROSS JOIN.
    Cross,
    /// A comma between table references.
    Comma,
}

/// A JOIN clause.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JoinClause {
    /// The type of join.
    pub join_type: JoinType,
    /// Whether NATURAL was given.
    pub natural: bool,
    /// The table to join.
    pub table: TableRef,
    /// The ON condition.
    pub on: Option<Expr>,
    /// USING columns (alternative to ON).
    pub using: Vec<String>,
    /// Source span.
    #[serde(flatten)]
    pub span: Span,
}

/// INDEXED BY / NOT INDEXED hint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "variant", content = "index", rename_all = "kebab-case")]
pub enum IndexedBy {
    /// INDEXED BY name
    Index(String),
    /// NOT INDEXED
    NotIndexed,
}

/// A table reference in a FROM clause.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum TableRef {
    /// A table name.
    Table {
        /// Table name.
        name: QualifiedName,
        /// Alias.
        alias: Option<String>,
        /// Index hint.
        indexed: Option<IndexedBy>,
        /// Source span.
        #[serde(flatten)]
        span: Span,
    },
    /// A table-valued function, e.g. `json_each(x)`.
    Function {
        /// Function name.
        name: QualifiedName,
        /// Arguments.
        args: Vec<Expr>,
        /// Alias.
        alias: Option<String>,
        /// Source span.
        #[serde(flatten)]
        span: Span,
    },
    /// A subquery.
    Subquery {
        /// The subquery.
        query: Box<SelectStatement>,
        /// Alias.
        alias: Option<String>,
        /// Source span.
        #[serde(flatten)]
        span: Span,
    },
    /// A parenthesized join.
    Nested {
        /// The inner join tree.
        inner: Box<TableRef>,
        /// Source span.
        #[serde(flatten)]
        span: Span,
    },
    /// A joined table.
    Join {
        /// Left side of the join.
        left: Box<TableRef>,
        /// The join clause.
        join: Box<JoinClause>,
        /// Source span.
        #[serde(flatten)]
        span: Span,
    },
}

impl TableRef {
    /// Returns the source span.
    #[must_use]
    pub const fn span(&self) -> Span {
        match self {
            Self::Table { span, .. }
            | Self::Function { span, .. }
            | Self::Subquery { span, .. }
            | Self::Nested { span, .. }
            | Self::Join { span, .. } => *span,
        }
    }
}

/// A column in the result list of a SELECT, or in a RETURNING clause.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum SelectColumn {
    /// `*`
    Wildcard {
        /// Source span.
        #[serde(flatten)]
        span: Span,
    },
    /// `table.*`
    TableWildcard {
        /// Table name or alias.
        table: String,
        /// Source span.
        #[serde(flatten)]
        span: Span,
    },
    /// An expression with an optional alias.
    Expression {
        /// The expression.
        expr: Expr,
        /// Column alias.
        alias: Option<String>,
        /// Source span.
        #[serde(flatten)]
        span: Span,
    },
}

/// A named window in a WINDOW clause.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NamedWindow {
    /// Window name.
    pub name: String,
    /// Window definition.
    pub definition: WindowDefinition,
}

/// One SELECT ... or VALUES ... block of a (possibly compound) query.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum SelectCore {
    /// SELECT columns FROM ... WHERE ... GROUP BY ... HAVING ... WINDOW ...
    #[serde(rename = "select-core")]
    Select {
        /// Whether to select DISTINCT values.
        distinct: bool,
        /// The columns to select.
        columns: Vec<SelectColumn>,
        /// The FROM clause.
        from: Option<TableRef>,
        /// The WHERE clause.
        where_clause: Option<Expr>,
        /// GROUP BY expressions.
        group_by: Vec<Expr>,
        /// HAVING clause.
        having: Option<Expr>,
        /// WINDOW clause.
        windows: Vec<NamedWindow>,
        /// Source span.
        #[serde(flatten)]
        span: Span,
    },
    /// VALUES (...), (...)
    Values {
        /// The rows.
        rows: Vec<Vec<Expr>>,
        /// Source span.
        #[serde(flatten)]
        span: Span,
    },
}

/// Compound select operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum CompoundOperator {
    Union,
    UnionAll,
    Intersect,
    Except,
}

/// A compound operator together with the block that follows it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompoundSelect {
    /// The operator.
    pub operator: CompoundOperator,
    /// The right-hand block.
    pub core: SelectCore,
}

/// A common table expression.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommonTableExpr {
    /// CTE name.
    pub name: String,
    /// Column names (optional).
    pub columns: Vec<String>,
    /// `Some(true)` for MATERIALIZED, `Some(false)` for NOT MATERIALIZED.
    pub materialized: Option<bool>,
    /// The CTE body.
    pub query: Box<SelectStatement>,
    /// Source span.
    #[serde(flatten)]
    pub span: Span,
}

/// WITH clause.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WithClause {
    /// Whether RECURSIVE was given.
    pub recursive: bool,
    /// The common table expressions.
    pub tables: Vec<CommonTableExpr>,
    /// Source span.
    #[serde(flatten)]
    pub span: Span,
}

/// A SELECT statement.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SelectStatement {
    /// WITH clause.
    pub with: Option<WithClause>,
    /// The first block.
    pub core: SelectCore,
    /// Further blocks joined by compound operators.
    pub compound: Vec<CompoundSelect>,
    /// ORDER BY clauses.
    pub order_by: Vec<OrderBy>,
    /// LIMIT clause.
    pub limit: Option<Limit>,
    /// Source span.
    #[serde(flatten)]
    pub span: Span,
}

/// Source of data for INSERT.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "variant", content = "value", rename_all = "kebab-case")]
pub enum InsertSource {
    /// VALUES (...), (...), ...
    Values(Vec<Vec<Expr>>),
    /// SELECT ...
    Query(Box<SelectStatement>),
    /// DEFAULT VALUES
    DefaultValues,
}

/// Action taken by an upsert clause.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "variant", rename_all = "kebab-case")]
pub enum ConflictAction {
    /// DO NOTHING
    DoNothing,
    /// DO UPDATE SET ... [WHERE ...]
    DoUpdate {
        /// SET assignments.
        assignments: Vec<UpdateAssignment>,
        /// WHERE clause.
        where_clause: Option<Expr>,
    },
}

/// ON CONFLICT clause for UPSERT.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OnConflict {
    /// Conflict target columns.
    pub columns: Vec<IndexedColumn>,
    /// WHERE clause on the conflict target.
    pub target_where: Option<Expr>,
    /// Action to take on conflict.
    pub action: ConflictAction,
    /// Source span.
    #[serde(flatten)]
    pub span: Span,
}

/// An INSERT or REPLACE statement.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InsertStatement {
    /// WITH clause.
    pub with: Option<WithClause>,
    /// `OR ...` resolution; REPLACE INTO is stored as `Replace`.
    pub or_action: Option<ConflictResolution>,
    /// Target table.
    pub table: QualifiedName,
    /// Alias.
    pub alias: Option<String>,
    /// Column names (optional).
    pub columns: Vec<String>,
    /// Values to insert.
    pub source: InsertSource,
    /// Upsert clauses.
    pub on_conflict: Vec<OnConflict>,
    /// RETURNING columns.
    pub returning: Vec<SelectColumn>,
    /// Source span.
    #[serde(flatten)]
    pub span: Span,
}

/// An assignment in UPDATE SET.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UpdateAssignment {
    /// Target column names; several for `(a, b) = (...)`.
    pub columns: Vec<String>,
    /// Value expression.
    pub value: Expr,
    /// Source span.
    #[serde(flatten)]
    pub span: Span,
}

/// An UPDATE statement.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UpdateStatement {
    /// WITH clause.
    pub with: Option<WithClause>,
    /// `OR ...` resolution.
    pub or_action: Option<ConflictResolution>,
    /// Target table.
    pub table: QualifiedName,
    /// Alias.
    pub alias: Option<String>,
    /// Index hint.
    pub indexed: Option<IndexedBy>,
    /// SET assignments.
    pub assignments: Vec<UpdateAssignment>,
    /// FROM clause (for joins in UPDATE).
    pub from: Option<TableRef>,
    /// WHERE clause.
    pub where_clause: Option<Expr>,
    /// RETURNING columns.
    pub returning: Vec<SelectColumn>,
    /// ORDER BY clauses.
    pub order_by: Vec<OrderBy>,
    /// LIMIT clause.
    pub limit: Option<Limit>,
    /// Source span.
    #[serde(flatten)]
    pub span: Span,
}

/// A DELETE statement.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeleteStatement {
    /// WITH clause.
    pub with: Option<WithClause>,
    /// Target table.
    pub table: QualifiedName,
    /// Alias.
    pub alias: Option<String>,
    /// Index hint.
    pub indexed: Option<IndexedBy>,
    /// WHERE clause.
    pub where_clause: Option<Expr>,
    /// RETURNING columns.
    pub returning: Vec<SelectColumn>,
    /// ORDER BY clauses.
    pub order_by: Vec<OrderBy>,
    /// LIMIT clause.
    pub limit: Option<Limit>,
    /// Source span.
    #[serde(flatten)]
    pub span: Span,
}

/// A SQL statement.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum Statement {
    /// SELECT statement.
    Select(SelectStatement),
    /// INSERT or REPLACE statement.
    Insert(InsertStatement),
    /// UPDATE statement.
    Update(UpdateStatement),
    /// DELETE statement.
    Delete(DeleteStatement),
    /// CREATE TABLE statement.
    CreateTable(CreateTableStatement),
    /// CREATE INDEX statement.
    CreateIndex(CreateIndexStatement),
    /// CREATE TRIGGER statement.
    CreateTrigger(CreateTriggerStatement),
    /// CREATE VIEW statement.
    CreateView(CreateViewStatement),
    /// CREATE VIRTUAL TABLE statement.
    CreateVirtualTable(CreateVirtualTableStatement),
    /// ALTER TABLE statement.
    AlterTable(AlterTableStatement),
    /// DROP TABLE, INDEX, VIEW or TRIGGER.
    Drop(DropStatement),
    /// PRAGMA statement.
    Pragma(PragmaStatement),
    /// BEGIN, COMMIT, ROLLBACK, SAVEPOINT or RELEASE.
    #[serde(rename = "transaction-control")]
    Transaction(TransactionStatement),
    /// ATTACH statement.
    Attach(AttachStatement),
    /// DETACH statement.
    Detach(DetachStatement),
    /// VACUUM statement.
    Vacuum(VacuumStatement),
    /// ANALYZE statement.
    Analyze(AnalyzeStatement),
    /// REINDEX statement.
    Reindex(ReindexStatement),
    /// EXPLAIN [QUERY PLAN] statement.
    Explain(ExplainStatement),
}

impl Statement {
    /// Returns the source span, including the terminating `;` if there was one.
    #[must_use]
    pub const fn span(&self) -> Span {
        match self {
            Self::Select(s) => s.span,
            Self::Insert(s) => s.span,
            Self::Update(s) => s.span,
            Self::Delete(s) => s.span,
            Self::CreateTable(s) => s.span,
            Self::CreateIndex(s) => s.span,
            Self::CreateTrigger(s) => s.span,
            Self::CreateView(s) => s.span,
            Self::CreateVirtualTable(s) => s.span,
            Self::AlterTable(s) => s.span,
            Self::Drop(s) => s.span,
            Self::Pragma(s) => s.span,
            Self::Transaction(s) => s.span,
            Self::Attach(s) => s.span,
            Self::Detach(s) => s.span,
            Self::Vacuum(s) => s.span,
            Self::Analyze(s) => s.span,
            Self::Reindex(s) => s.span,
            Self::Explain(s) => s.span,
        }
    }

    /// Returns the external kind tag, e.g. `create-table`.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Select(_) => "select",
            Self::Insert(_) => "insert",
            Self::Update(_) => "update",
            Self::Delete(_) => "delete",
            Self::CreateTable(_) => "create-table",
            Self::CreateIndex(_) => "create-index",
            Self::CreateTrigger(_) => "create-trigger",
            Self::CreateView(_) => "create-view",
            Self::CreateVirtualTable(_) => "create-virtual-table",
            Self::AlterTable(_) => "alter-table",
            Self::Drop(_) => "drop",
            Self::Pragma(_) => "pragma",
            Self::Transaction(_) => "transaction-control",
            Self::Attach(_) => "attach",
            Self::Detach(_) => "detach",
            Self::Vacuum(_) => "vacuum",
            Self::Analyze(_) => "analyze",
            Self::Reindex(_) => "reindex",
            Self::Explain(_) => "explain",
        }
    }

    /// Moves the end of the span, used to cover a trailing `;`.
    pub(crate) fn extend_to(&mut self, end: Position) {
        let span = match self {
            Self::Select(s) => &mut s.span,
            Self::Insert(s) => &mut s.span,
            Self::Update(s) => &mut s.span,
            Self::Delete(s) => &mut s.span,
            Self::CreateTable(s) => &mut s.span,
            Self::CreateIndex(s) => &mut s.span,
            Self::CreateTrigger(s) => &mut s.span,
            Self::CreateView(s) => &mut s.span,
            Self::CreateVirtualTable(s) => &mut s.span,
            Self::AlterTable(s) => &mut s.span,
            Self::Drop(s) => &mut s.span,
            Self::Pragma(s) => &mut s.span,
            Self::Transaction(s) => &mut s.span,
            Self::Attach(s) => &mut s.span,
            Self::Detach(s) => &mut s.span,
            Self::Vacuum(s) => &mut s.span,
            Self::Analyze(s) => &mut s.span,
            Self::Reindex(s) => &mut s.span,
            Self::Explain(s) => &mut s.span,
        };
        span.end = end;
    }
}

/// A whole document: statements in source order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename = "program")]
pub struct Program {
    /// The statements.
    pub statements: Vec<Statement>,
    /// Source span: the merge of the statement spans.
    #[serde(flatten)]
    pub span: Span,
}

impl Program {
    /// Builds a program from statements, spanning from the first to the last.
    /// An empty program has an empty span at `start`.
    #[must_use]
    pub fn new(statements: Vec<Statement>, start: Position) -> Self {
        let span = match (statements.first(), statements.last()) {
            (Some(first), Some(last)) => first.span().merge(last.span()),
            _ => Span::empty(start),
        };
        Self { statements, span }
    }
}
