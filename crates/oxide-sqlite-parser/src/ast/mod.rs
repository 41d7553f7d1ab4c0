//! Abstract Syntax Tree (AST) types for SQLite statements.
//!
//! Every node carries a [`Span`](crate::lexer::Span) of absolute start/end
//! positions. Nodes serialize to the external shape
//! `{ "type": <kind>, "start": {...}, "end": {...}, ...fields }`.

mod admin;
mod ddl;
mod expression;
mod statement;
mod types;

pub use admin::{
    AnalyzeStatement, AttachStatement, DetachStatement, ExplainStatement, PragmaStatement,
    PragmaValue, ReindexStatement, TransactionAction, TransactionMode, TransactionStatement,
    VacuumStatement,
};
pub use ddl::{
    AlterTableAction, AlterTableStatement, ColumnConstraint, ColumnConstraintKind, ColumnDef,
    CreateIndexStatement, CreateTableStatement, CreateTriggerStatement, CreateViewStatement,
    CreateVirtualTableStatement, DropObject, DropStatement, ForeignKeyClause, IndexedColumn,
    ReferentialAction, TableConstraint, TableConstraintKind, TableDefinition, TriggerEvent,
    TriggerTiming,
};
pub use expression::{
    BinaryOp, Expr, ExprKind, FrameBound, FrameExclude, FrameSpec, FrameUnits, FunctionCall,
    InTarget, LikeOp, Literal, Over, RaiseAction, UnaryOp, WindowDefinition,
};
pub use statement::{
    CommonTableExpr, CompoundOperator, CompoundSelect, ConflictAction, ConflictResolution,
    DeleteStatement, IndexedBy, InsertSource, InsertStatement, JoinClause, JoinType, Limit,
    NamedWindow, NullOrdering, OnConflict, OrderBy, OrderDirection, Program, SelectColumn,
    SelectCore, SelectStatement, Statement, TableRef, UpdateAssignment, UpdateStatement,
    WithClause,
};
pub use types::{Affinity, QualifiedName, TypeName};
