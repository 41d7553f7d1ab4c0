//! The grammar's rule table.
//!
//! Rules are addressed by [`RuleId`]. The static [`RULES`] table, indexed by
//! `RuleId as usize`, carries everything the engine and the error formatter
//! need to know about a rule without any string lookup at parse time.

/// Identifies a grammar rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RuleId {
    Program,
    StreamingStatement,
    Statement,
    Explain,
    Select,
    SelectCore,
    WithClause,
    CommonTableExpr,
    ResultColumn,
    FromClause,
    JoinClause,
    TableOrSubquery,
    WhereClause,
    GroupByClause,
    HavingClause,
    WindowClause,
    WindowDefinition,
    OrderByClause,
    LimitClause,
    ValuesClause,
    Insert,
    UpsertClause,
    ReturningClause,
    Update,
    SetClause,
    Delete,
    CreateTable,
    ColumnDefinition,
    ColumnConstraint,
    TableConstraint,
    ForeignKeyClause,
    TypeName,
    CreateIndex,
    CreateView,
    CreateTrigger,
    CreateVirtualTable,
    AlterTable,
    Drop,
    Pragma,
    Transaction,
    Attach,
    Detach,
    Vacuum,
    Analyze,
    Reindex,
    Expression,
    Operand,
    CaseExpression,
    CastExpression,
    FunctionCall,
    RaiseFunction,
    QualifiedName,
}

/// Static description of a rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RuleInfo {
    /// The rule this entry describes.
    pub id: RuleId,
    /// Name used in traces.
    pub name: &'static str,
    /// Expectation reported in place of the rule's terminals when it fails
    /// without getting past its first token.
    pub label: Option<&'static str>,
    /// Human-readable construct name used by error messages. Rules without a
    /// context are too low-level to be named.
    pub context: Option<&'static str>,
}

const fn info(
    id: RuleId,
    name: &'static str,
    label: Option<&'static str>,
    context: Option<&'static str>,
) -> RuleInfo {
    RuleInfo {
        id,
        name,
        label,
        context,
    }
}

/// Number of rules.
pub const RULE_COUNT: usize = RuleId::QualifiedName as usize + 1;

/// The rule table, indexed by `RuleId as usize`.
pub static RULES: [RuleInfo; RULE_COUNT] = [
    info(RuleId::Program, "program", None, None),
    info(RuleId::StreamingStatement, "streaming_statement", None, None),
    info(RuleId::Statement, "statement", Some("statement"), None),
    info(RuleId::Explain, "explain", None, Some("EXPLAIN statement")),
    info(RuleId::Select, "select", None, Some("SELECT statement")),
    info(RuleId::SelectCore, "select_core", None, None),
    info(RuleId::WithClause, "with_clause", None, Some("WITH clause")),
    info(
        RuleId::CommonTableExpr,
        "common_table_expression",
        None,
        Some("common table expression"),
    ),
    info(RuleId::ResultColumn, "result_column", None, None),
    info(RuleId::FromClause, "from_clause", None, Some("FROM clause")),
    info(RuleId::JoinClause, "join_clause", None, Some("JOIN clause")),
    info(
        RuleId::TableOrSubquery,
        "table_or_subquery",
        Some("table or subquery"),
        None,
    ),
    info(RuleId::WhereClause, "where_clause", None, Some("WHERE clause")),
    info(
        RuleId::GroupByClause,
        "group_by_clause",
        None,
        Some("GROUP BY clause"),
    ),
    info(RuleId::HavingClause, "having_clause", None, Some("HAVING clause")),
    info(RuleId::WindowClause, "window_clause", None, Some("WINDOW clause")),
    info(
        RuleId::WindowDefinition,
        "window_definition",
        None,
        Some("window definition"),
    ),
    info(
        RuleId::OrderByClause,
        "order_by_clause",
        None,
        Some("ORDER BY clause"),
    ),
    info(RuleId::LimitClause, "limit_clause", None, Some("LIMIT clause")),
    info(RuleId::ValuesClause, "values_clause", None, Some("VALUES clause")),
    info(RuleId::Insert, "insert", None, Some("INSERT statement")),
    info(
        RuleId::UpsertClause,
        "upsert_clause",
        None,
        Some("ON CONFLICT clause"),
    ),
    info(
        RuleId::ReturningClause,
        "returning_clause",
        None,
        Some("RETURNING clause"),
    ),
    info(RuleId::Update, "update", None, Some("UPDATE statement")),
    info(RuleId::SetClause, "set_clause", None, Some("SET clause")),
    info(RuleId::Delete, "delete", None, Some("DELETE statement")),
    info(
        RuleId::CreateTable,
        "create_table",
        None,
        Some("CREATE TABLE statement"),
    ),
    info(
        RuleId::ColumnDefinition,
        "column_definition",
        None,
        Some("column definition"),
    ),
    info(RuleId::ColumnConstraint, "column_constraint", None, None),
    info(
        RuleId::TableConstraint,
        "table_constraint",
        None,
        Some("table constraint"),
    ),
    info(
        RuleId::ForeignKeyClause,
        "foreign_key_clause",
        None,
        Some("foreign key clause"),
    ),
    info(RuleId::TypeName, "type_name", Some("type name"), None),
    info(
        RuleId::CreateIndex,
        "create_index",
        None,
        Some("CREATE INDEX statement"),
    ),
    info(
        RuleId::CreateView,
        "create_view",
        None,
        Some("CREATE VIEW statement"),
    ),
    info(
        RuleId::CreateTrigger,
        "create_trigger",
        None,
        Some("CREATE TRIGGER statement"),
    ),
    info(
        RuleId::CreateVirtualTable,
        "create_virtual_table",
        None,
        Some("CREATE VIRTUAL TABLE statement"),
    ),
    info(
        RuleId::AlterTable,
        "alter_table",
        None,
        Some("ALTER TABLE statement"),
    ),
    info(RuleId::Drop, "drop", None, Some("DROP statement")),
    info(RuleId::Pragma, "pragma", None, Some("PRAGMA statement")),
    info(
        RuleId::Transaction,
        "transaction",
        None,
        Some("transaction statement"),
    ),
    info(RuleId::Attach, "attach", None, Some("ATTACH statement")),
    info(RuleId::Detach, "detach", None, Some("DETACH statement")),
    info(RuleId::Vacuum, "vacuum", None, Some("VACUUM statement")),
    info(RuleId::Analyze, "analyze", None, Some("ANALYZE statement")),
    info(RuleId::Reindex, "reindex", None, Some("REINDEX statement")),
    info(RuleId::Expression, "expression", Some("expression"), None),
    info(RuleId::Operand, "operand", Some("expression"), None),
    info(
        RuleId::CaseExpression,
        "case_expression",
        None,
        Some("CASE expression"),
    ),
    info(
        RuleId::CastExpression,
        "cast_expression",
        None,
        Some("CAST expression"),
    ),
    info(RuleId::FunctionCall, "function_call", None, Some("function call")),
    info(
        RuleId::RaiseFunction,
        "raise_function",
        None,
        Some("RAISE function"),
    ),
    info(RuleId::QualifiedName, "qualified_name", None, None),
];

impl RuleId {
    /// Returns the rule's table entry.
    #[must_use]
    pub fn info(self) -> &'static RuleInfo {
        &RULES[self as usize]
    }

    /// Returns the trace name.
    #[must_use]
    pub fn name(self) -> &'static str {
        self.info().name
    }

    /// Returns the failure label, if the rule has one.
    #[must_use]
    pub fn label(self) -> Option<&'static str> {
        self.info().label
    }

    /// Returns the nameable context, if the rule has one.
    #[must_use]
    pub fn context(self) -> Option<&'static str> {
        self.info().context
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_table_is_indexed_by_id() {
        for (index, entry) in RULES.iter().enumerate() {
            assert_eq!(entry.id as usize, index, "rule {} is out of place", entry.name);
        }
    }

    #[test]
    fn test_names_are_unique() {
        for (i, a) in RULES.iter().enumerate() {
            for b in &RULES[i + 1..] {
                assert_ne!(a.name, b.name);
            }
        }
    }

    #[test]
    fn test_statement_rules_are_nameable() {
        assert_eq!(RuleId::Select.context(), Some("SELECT statement"));
        assert_eq!(RuleId::WhereClause.context(), Some("WHERE clause"));
        assert_eq!(RuleId::SelectCore.context(), None);
        assert_eq!(RuleId::Expression.label(), Some("expression"));
    }
}
