//! INSERT, UPDATE and DELETE.

use crate::ast::{
    ConflictAction, ConflictResolution, DeleteStatement, InsertSource, InsertStatement,
    OnConflict, SelectColumn, SelectCore, SelectStatement, UpdateAssignment, UpdateStatement,
};
use crate::lexer::{Keyword, TokenKind};
use crate::parser::engine::{PResult, Parser};
use crate::parser::rules::RuleId;

/// Unwraps a query that is nothing but a VALUES list.
fn plain_values(query: SelectStatement) -> InsertSource {
    let is_plain = query.with.is_none()
        && query.compound.is_empty()
        && query.order_by.is_empty()
        && query.limit.is_none();
    match query.core {
        SelectCore::Values { rows, .. } if is_plain => InsertSource::Values(rows),
        core => InsertSource::Query(Box::new(SelectStatement { core, ..query })),
    }
}

impl Parser<'_> {
    /// insert <- with_clause? (INSERT (OR conflict)? / REPLACE) INTO
    ///           qualified_name (AS name)? name_list?
    ///           (DEFAULT VALUES / select upsert_clause*) returning_clause?
    pub(crate) fn insert(&mut self) -> PResult<InsertStatement> {
        self.rule(RuleId::Insert, |p| {
            let start = p.start();
            let with = p.clause_if(Keyword::With, Self::with_clause)?;
            let or_action = if p.eat_keyword(Keyword::Replace) {
                Some(ConflictResolution::Replace)
            } else {
                p.keyword(Keyword::Insert)?;
                p.or_conflict()?
            };
            p.keyword(Keyword::Into)?;
            let table = p.qualified_name("table name")?;
            let alias = if p.eat_keyword(Keyword::As) {
                Some(p.name("alias")?)
            } else {
                None
            };
            let columns = if p.check(&TokenKind::LeftParen) {
                p.name_list("column name")?
            } else {
                Vec::new()
            };

            let mut on_conflict = Vec::new();
            let source = if p.eat_keyword(Keyword::Default) {
                p.keyword(Keyword::Values)?;
                InsertSource::DefaultValues
            } else {
                let query = p.select()?;
                while p.check_keyword(Keyword::On) && p.check_keyword_at(1, Keyword::Conflict) {
                    on_conflict.push(p.upsert_clause()?);
                }
                plain_values(query)
            };
            let returning = p
                .clause_if(Keyword::Returning, Self::returning_clause)?
                .unwrap_or_default();

            Ok(InsertStatement {
                with,
                or_action,
                table,
                alias,
                columns,
                source,
                on_conflict,
                returning,
                span: p.span_from(start),
            })
        })
    }

    /// upsert_clause <- ON CONFLICT ('(' indexed_column_list ')' where_clause?)?
    ///                  DO (NOTHING / UPDATE set_clause where_clause?)
    fn upsert_clause(&mut self) -> PResult<OnConflict> {
        self.rule(RuleId::UpsertClause, |p| {
            let start = p.start();
            p.keyword(Keyword::On)?;
            p.keyword(Keyword::Conflict)?;
            let (columns, target_where) = if p.check(&TokenKind::LeftParen) {
                let columns = p.paren_list(Self::indexed_column)?;
                let target_where = p.clause_if(Keyword::Where, Self::where_clause)?;
                (columns, target_where)
            } else {
                (Vec::new(), None)
            };
            p.keyword(Keyword::Do)?;
            let action = if p.eat_keyword(Keyword::Nothing) {
                ConflictAction::DoNothing
            } else {
                p.keyword(Keyword::Update)?;
                let assignments = p.set_clause()?;
                let where_clause = p.clause_if(Keyword::Where, Self::where_clause)?;
                ConflictAction::DoUpdate {
                    assignments,
                    where_clause,
                }
            };
            Ok(OnConflict {
                columns,
                target_where,
                action,
                span: p.span_from(start),
            })
        })
    }

    /// returning_clause <- RETURNING result_column (',' result_column)*
    pub(crate) fn returning_clause(&mut self) -> PResult<Vec<SelectColumn>> {
        self.rule(RuleId::ReturningClause, |p| {
            p.keyword(Keyword::Returning)?;
            p.comma_list(Self::result_column)
        })
    }

    /// update <- with_clause? UPDATE (OR conflict)? qualified_name alias? indexed_by?
    ///           set_clause from_clause? where_clause? returning_clause?
    ///           order_by_clause? limit_clause?
    pub(crate) fn update(&mut self) -> PResult<UpdateStatement> {
        self.rule(RuleId::Update, |p| {
            let start = p.start();
            let with = p.clause_if(Keyword::With, Self::with_clause)?;
            p.keyword(Keyword::Update)?;
            let or_action = p.or_conflict()?;
            let table = p.qualified_name("table name")?;
            let alias = p.alias()?;
            let indexed = p.indexed_by()?;
            let assignments = p.set_clause()?;
            let from = p.clause_if(Keyword::From, Self::from_clause)?;
            let where_clause = p.clause_if(Keyword::Where, Self::where_clause)?;
            let returning = p
                .clause_if(Keyword::Returning, Self::returning_clause)?
                .unwrap_or_default();
            let order_by = p
                .clause_if(Keyword::Order, Self::order_by_clause)?
                .unwrap_or_default();
            let limit = p.clause_if(Keyword::Limit, Self::limit_clause)?;

            Ok(UpdateStatement {
                with,
                or_action,
                table,
                alias,
                indexed,
                assignments,
                from,
                where_clause,
                returning,
                order_by,
                limit,
                span: p.span_from(start),
            })
        })
    }

    /// set_clause <- SET assignment (',' assignment)*
    /// assignment <- (name / name_list) '=' expression
    fn set_clause(&mut self) -> PResult<Vec<UpdateAssignment>> {
        self.rule(RuleId::SetClause, |p| {
            p.keyword(Keyword::Set)?;
            p.comma_list(|p| {
                let start = p.start();
                let columns = if p.check(&TokenKind::LeftParen) {
                    p.name_list("column name")?
                } else {
                    vec![p.name("column name")?]
                };
                p.punct(&TokenKind::Eq)?;
                let value = p.expression()?;
                Ok(UpdateAssignment {
                    columns,
                    value,
                    span: p.span_from(start),
                })
            })
        })
    }

    /// delete <- with_clause? DELETE FROM qualified_name alias? indexed_by?
    ///           where_clause? returning_clause? order_by_clause? limit_clause?
    pub(crate) fn delete(&mut self) -> PResult<DeleteStatement> {
        self.rule(RuleId::Delete, |p| {
            let start = p.start();
            let with = p.clause_if(Keyword::With, Self::with_clause)?;
            p.keyword(Keyword::Delete)?;
            p.keyword(Keyword::From)?;
            let table = p.qualified_name("table name")?;
            let alias = p.alias()?;
            let indexed = p.indexed_by()?;
            let where_clause = p.clause_if(Keyword::Where, Self::where_clause)?;
            let returning = p
                .clause_if(Keyword::Returning, Self::returning_clause)?
                .unwrap_or_default();
            let order_by = p
                .clause_if(Keyword::Order, Self::order_by_clause)?
                .unwrap_or_default();
            let limit = p.clause_if(Keyword::Limit, Self::limit_clause)?;

            Ok(DeleteStatement {
                with,
                table,
                alias,
                indexed,
                where_clause,
                returning,
                order_by,
                limit,
                span: p.span_from(start),
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::ast::{ConflictAction, ConflictResolution, InsertSource, Statement};
    use crate::options::ParseOptions;
    use crate::parser::Parser;

    fn statement(sql: &str) -> Statement {
        Parser::new(sql, &ParseOptions::default())
            .parse_statement()
            .unwrap_or_else(|failure| panic!("{sql}: {failure:?}"))
    }

    #[test]
    fn test_insert_values_unwrapped() {
        let Statement::Insert(insert) = statement("INSERT INTO t (a, b) VALUES (1, 2), (3, 4)")
        else {
            panic!("expected INSERT");
        };
        assert_eq!(insert.columns, vec![String::from("a"), String::from("b")]);
        assert!(matches!(insert.source, InsertSource::Values(ref rows) if rows.len() == 2));
    }

    #[test]
    fn test_replace_into_select() {
        let Statement::Insert(insert) = statement("REPLACE INTO t SELECT * FROM s") else {
            panic!("expected INSERT");
        };
        assert_eq!(insert.or_action, Some(ConflictResolution::Replace));
        assert!(matches!(insert.source, InsertSource::Query(_)));
    }

    #[test]
    fn test_upsert() {
        let Statement::Insert(insert) = statement(
            "INSERT INTO kv (k, v) VALUES ('a', 1) \
             ON CONFLICT (k) DO UPDATE SET v = excluded.v WHERE v < excluded.v \
             RETURNING *",
        ) else {
            panic!("expected INSERT");
        };
        assert_eq!(insert.on_conflict.len(), 1);
        let upsert = &insert.on_conflict[0];
        assert_eq!(upsert.columns.len(), 1);
        assert!(matches!(
            upsert.action,
            ConflictAction::DoUpdate { where_clause: Some(_), .. }
        ));
        assert_eq!(insert.returning.len(), 1);
    }

    #[test]
    fn test_update_row_value_assignment() {
        let Statement::Update(update) =
            statement("UPDATE OR IGNORE t AS x SET (a, b) = (1, 2), c = 3 WHERE id = 1")
        else {
            panic!("expected UPDATE");
        };
        assert_eq!(update.or_action, Some(ConflictResolution::Ignore));
        assert_eq!(update.alias.as_deref(), Some("x"));
        assert_eq!(update.assignments.len(), 2);
        assert_eq!(update.assignments[0].columns.len(), 2);
    }

    #[test]
    fn test_delete_with_limit() {
        let Statement::Delete(delete) =
            statement("DELETE FROM logs WHERE ts < 10 ORDER BY ts LIMIT 100")
        else {
            panic!("expected DELETE");
        };
        assert!(delete.where_clause.is_some());
        assert_eq!(delete.order_by.len(), 1);
        assert!(delete.limit.is_some());
    }
}
