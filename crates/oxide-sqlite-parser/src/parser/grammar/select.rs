//! SELECT statements and the clauses shared with DML.

use crate::ast::{
    CommonTableExpr, CompoundOperator, CompoundSelect, JoinClause, JoinType, Limit, NamedWindow,
    NullOrdering, OrderBy, OrderDirection, SelectColumn, SelectCore, SelectStatement, TableRef,
    WithClause,
};
use crate::lexer::{Keyword, TokenKind};
use crate::parser::engine::{PResult, Parser};
use crate::parser::error::Expected;
use crate::parser::rules::RuleId;

impl Parser<'_> {
    /// select <- with_clause? select_core (compound_operator select_core)*
    ///           order_by_clause? limit_clause?
    pub(crate) fn select(&mut self) -> PResult<SelectStatement> {
        self.memo_rule(RuleId::Select, |p| {
            let start = p.start();
            let with = p.clause_if(Keyword::With, Self::with_clause)?;
            let core = p.select_core()?;
            let mut compound = Vec::new();
            while let Some(operator) = p.compound_operator() {
                compound.push(CompoundSelect {
                    operator,
                    core: p.select_core()?,
                });
            }
            let order_by = p
                .clause_if(Keyword::Order, Self::order_by_clause)?
                .unwrap_or_default();
            let limit = p.clause_if(Keyword::Limit, Self::limit_clause)?;
            Ok(SelectStatement {
                with,
                core,
                compound,
                order_by,
                limit,
                span: p.span_from(start),
            })
        })
    }

    /// `'(' select ')'`
    pub(crate) fn subquery(&mut self) -> PResult<Box<SelectStatement>> {
        self.punct(&TokenKind::LeftParen)?;
        let query = self.select()?;
        self.punct(&TokenKind::RightParen)?;
        Ok(Box::new(query))
    }

    /// Returns true if a parenthesized subquery starts at the current token.
    pub(crate) fn at_subquery(&mut self) -> bool {
        self.check(&TokenKind::LeftParen)
            && [Keyword::Select, Keyword::With, Keyword::Values]
                .into_iter()
                .any(|keyword| self.check_keyword_at(1, keyword))
    }

    fn compound_operator(&mut self) -> Option<CompoundOperator> {
        if self.eat_keyword(Keyword::Union) {
            if self.eat_keyword(Keyword::All) {
                Some(CompoundOperator::UnionAll)
            } else {
                Some(CompoundOperator::Union)
            }
        } else if self.eat_keyword(Keyword::Intersect) {
            Some(CompoundOperator::Intersect)
        } else if self.eat_keyword(Keyword::Except) {
            Some(CompoundOperator::Except)
        } else {
            None
        }
    }

    /// select_core <- SELECT (DISTINCT / ALL)? result_column (',' result_column)*
    ///                from_clause? where_clause? group_by_clause? having_clause?
    ///                window_clause?
    ///              / values_clause
    fn select_core(&mut self) -> PResult<SelectCore> {
        self.rule(RuleId::SelectCore, |p| {
            let start = p.start();
            if p.check_keyword(Keyword::Values) {
                let rows = p.values_clause()?;
                return Ok(SelectCore::Values {
                    rows,
                    span: p.span_from(start),
                });
            }
            if p.keyword(Keyword::Select).is_err() {
                return p.fail(Expected::Keyword(Keyword::Values));
            }

            let distinct = if p.eat_keyword(Keyword::Distinct) {
                true
            } else {
                p.eat_keyword(Keyword::All);
                false
            };
            let columns = p.comma_list(Self::result_column)?;
            let from = p.clause_if(Keyword::From, Self::from_clause)?;
            let where_clause = p.clause_if(Keyword::Where, Self::where_clause)?;
            let group_by = p
                .clause_if(Keyword::Group, Self::group_by_clause)?
                .unwrap_or_default();
            let having = p.clause_if(Keyword::Having, Self::having_clause)?;
            let windows = p
                .clause_if(Keyword::Window, Self::window_clause)?
                .unwrap_or_default();

            Ok(SelectCore::Select {
                distinct,
                columns,
                from,
                where_clause,
                group_by,
                having,
                windows,
                span: p.span_from(start),
            })
        })
    }

    /// result_column <- '*' / name '.' '*' / expression alias?
    pub(crate) fn result_column(&mut self) -> PResult<SelectColumn> {
        self.rule(RuleId::ResultColumn, |p| {
            let start = p.start();
            if p.eat(&TokenKind::Star) {
                return Ok(SelectColumn::Wildcard {
                    span: p.span_from(start),
                });
            }
            if p.check_name()
                && p.check_at(1, &TokenKind::Dot)
                && p.check_at(2, &TokenKind::Star)
            {
                let table = p.name("table name")?;
                p.bump();
                p.bump();
                return Ok(SelectColumn::TableWildcard {
                    table,
                    span: p.span_from(start),
                });
            }
            let expr = p.expression()?;
            let alias = p.alias()?;
            Ok(SelectColumn::Expression {
                expr,
                alias,
                span: p.span_from(start),
            })
        })
    }

    /// with_clause <- WITH RECURSIVE? common_table_expr (',' common_table_expr)*
    pub(crate) fn with_clause(&mut self) -> PResult<WithClause> {
        self.rule(RuleId::WithClause, |p| {
            let start = p.start();
            p.keyword(Keyword::With)?;
            let recursive = p.eat_keyword(Keyword::Recursive);
            let tables = p.comma_list(Self::common_table_expr)?;
            Ok(WithClause {
                recursive,
                tables,
                span: p.span_from(start),
            })
        })
    }

    /// common_table_expr <- name name_list? AS (NOT? MATERIALIZED)? '(' select ')'
    fn common_table_expr(&mut self) -> PResult<CommonTableExpr> {
        self.rule(RuleId::CommonTableExpr, |p| {
            let start = p.start();
            let name = p.name("table name")?;
            let columns = if p.check(&TokenKind::LeftParen) {
                p.name_list("column name")?
            } else {
                Vec::new()
            };
            p.keyword(Keyword::As)?;
            let materialized = if p.eat_keyword(Keyword::Materialized) {
                Some(true)
            } else if p.eat_keyword(Keyword::Not) {
                p.keyword(Keyword::Materialized)?;
                Some(false)
            } else {
                None
            };
            let query = p.subquery()?;
            Ok(CommonTableExpr {
                name,
                columns,
                materialized,
                query,
                span: p.span_from(start),
            })
        })
    }

    /// from_clause <- FROM join_source
    pub(crate) fn from_clause(&mut self) -> PResult<TableRef> {
        self.rule(RuleId::FromClause, |p| {
            p.keyword(Keyword::From)?;
            p.join_source()
        })
    }

    /// join_source <- table_or_subquery join_clause*
    fn join_source(&mut self) -> PResult<TableRef> {
        let mut left = self.table_or_subquery()?;
        while let Some(join) = self.join_clause()? {
            let span = left.span().merge(join.span);
            left = TableRef::Join {
                left: Box::new(left),
                join: Box::new(join),
                span,
            };
        }
        Ok(left)
    }

    /// join_clause <- join_operator table_or_subquery join_constraint?
    fn join_clause(&mut self) -> PResult<Option<JoinClause>> {
        let start = self.start();
        let Some((join_type, natural)) = self.join_operator()? else {
            return Ok(None);
        };
        self.rule(RuleId::JoinClause, |p| {
            let table = p.table_or_subquery()?;
            let mut on = None;
            let mut using = Vec::new();
            if p.eat_keyword(Keyword::On) {
                on = Some(p.expression()?);
            } else if p.eat_keyword(Keyword::Using) {
                using = p.name_list("column name")?;
            }
            Ok(JoinClause {
                join_type,
                natural,
                table,
                on,
                using,
                span: p.span_from(start),
            })
        })
        .map(Some)
    }

    /// join_operator <- ',' / NATURAL? (LEFT / RIGHT / FULL) OUTER? JOIN
    ///                / NATURAL? (INNER / CROSS)? JOIN
    fn join_operator(&mut self) -> PResult<Option<(JoinType, bool)>> {
        if self.eat(&TokenKind::Comma) {
            return Ok(Some((JoinType::Comma, false)));
        }
        let natural = self.eat_keyword(Keyword::Natural);
        let join_type = if self.eat_keyword(Keyword::Left) {
            Some(JoinType::Left)
        } else if self.eat_keyword(Keyword::Right) {
            Some(JoinType::Right)
        } else if self.eat_keyword(Keyword::Full) {
            Some(JoinType::Full)
        } else if self.eat_keyword(Keyword::Inner) {
            Some(JoinType::Inner)
        } else if self.eat_keyword(Keyword::Cross) {
            Some(JoinType::Cross)
        } else {
            None
        };
        if matches!(
            join_type,
            Some(JoinType::Left | JoinType::Right | JoinType::Full)
        ) {
            self.eat_keyword(Keyword::Outer);
        }
        if natural || join_type.is_some() {
            self.keyword(Keyword::Join)?;
        } else if !self.eat_keyword(Keyword::Join) {
            return Ok(None);
        }
        Ok(Some((join_type.unwrap_or(JoinType::Inner), natural)))
    }

    /// table_or_subquery <- '(' select ')' alias?
    ///                    / '(' join_source ')'
    ///                    / qualified_name '(' expression_list? ')' alias?
    ///                    / qualified_name alias? indexed_by?
    pub(crate) fn table_or_subquery(&mut self) -> PResult<TableRef> {
        self.memo_rule(RuleId::TableOrSubquery, |p| {
            let start = p.start();
            if p.at_subquery() {
                if let Some(query) = p.optional(Self::subquery) {
                    let alias = p.alias()?;
                    return Ok(TableRef::Subquery {
                        query,
                        alias,
                        span: p.span_from(start),
                    });
                }
            }
            if p.eat(&TokenKind::LeftParen) {
                let inner = p.join_source()?;
                p.punct(&TokenKind::RightParen)?;
                return Ok(TableRef::Nested {
                    inner: Box::new(inner),
                    span: p.span_from(start),
                });
            }

            let name = p.qualified_name("table name")?;
            if p.eat(&TokenKind::LeftParen) {
                let args = if p.check(&TokenKind::RightParen) {
                    Vec::new()
                } else {
                    p.comma_list(Self::expression)?
                };
                p.punct(&TokenKind::RightParen)?;
                let alias = p.alias()?;
                return Ok(TableRef::Function {
                    name,
                    args,
                    alias,
                    span: p.span_from(start),
                });
            }
            let alias = p.alias()?;
            let indexed = p.indexed_by()?;
            Ok(TableRef::Table {
                name,
                alias,
                indexed,
                span: p.span_from(start),
            })
        })
    }

    /// where_clause <- WHERE expression
    pub(crate) fn where_clause(&mut self) -> PResult<crate::ast::Expr> {
        self.rule(RuleId::WhereClause, |p| {
            p.keyword(Keyword::Where)?;
            p.expression()
        })
    }

    /// group_by_clause <- GROUP BY expression (',' expression)*
    fn group_by_clause(&mut self) -> PResult<Vec<crate::ast::Expr>> {
        self.rule(RuleId::GroupByClause, |p| {
            p.keyword(Keyword::Group)?;
            p.keyword(Keyword::By)?;
            p.comma_list(Self::expression)
        })
    }

    /// having_clause <- HAVING expression
    fn having_clause(&mut self) -> PResult<crate::ast::Expr> {
        self.rule(RuleId::HavingClause, |p| {
            p.keyword(Keyword::Having)?;
            p.expression()
        })
    }

    /// window_clause <- WINDOW name AS window_definition (',' name AS window_definition)*
    fn window_clause(&mut self) -> PResult<Vec<NamedWindow>> {
        self.rule(RuleId::WindowClause, |p| {
            p.keyword(Keyword::Window)?;
            p.comma_list(|p| {
                let name = p.name("window name")?;
                p.keyword(Keyword::As)?;
                let definition = p.window_definition()?;
                Ok(NamedWindow { name, definition })
            })
        })
    }

    /// order_by_clause <- ORDER BY ordering_term (',' ordering_term)*
    pub(crate) fn order_by_clause(&mut self) -> PResult<Vec<OrderBy>> {
        self.rule(RuleId::OrderByClause, |p| {
            p.keyword(Keyword::Order)?;
            p.keyword(Keyword::By)?;
            p.comma_list(Self::ordering_term)
        })
    }

    /// ordering_term <- expression (ASC / DESC)? (NULLS (FIRST / LAST))?
    pub(crate) fn ordering_term(&mut self) -> PResult<OrderBy> {
        let start = self.start();
        let expr = self.expression()?;
        let direction = if self.eat_keyword(Keyword::Desc) {
            OrderDirection::Desc
        } else {
            self.eat_keyword(Keyword::Asc);
            OrderDirection::Asc
        };
        let nulls = if self.eat_keyword(Keyword::Nulls) {
            if self.eat_keyword(Keyword::First) {
                Some(NullOrdering::First)
            } else {
                self.keyword(Keyword::Last)?;
                Some(NullOrdering::Last)
            }
        } else {
            None
        };
        Ok(OrderBy {
            expr,
            direction,
            nulls,
            span: self.span_from(start),
        })
    }

    /// limit_clause <- LIMIT expression ((OFFSET / ',') expression)?
    pub(crate) fn limit_clause(&mut self) -> PResult<Limit> {
        self.rule(RuleId::LimitClause, |p| {
            let start = p.start();
            p.keyword(Keyword::Limit)?;
            let first = p.expression()?;
            let (count, offset) = if p.eat_keyword(Keyword::Offset) {
                (first, Some(p.expression()?))
            } else if p.eat(&TokenKind::Comma) {
                (p.expression()?, Some(first))
            } else {
                (first, None)
            };
            Ok(Limit {
                count,
                offset,
                span: p.span_from(start),
            })
        })
    }

    /// values_clause <- VALUES '(' expression_list ')' (',' '(' expression_list ')')*
    pub(crate) fn values_clause(&mut self) -> PResult<Vec<Vec<crate::ast::Expr>>> {
        self.rule(RuleId::ValuesClause, |p| {
            p.keyword(Keyword::Values)?;
            p.comma_list(|p| p.paren_list(Self::expression))
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::ast::{ExprKind, SelectColumn, SelectCore, Statement, TableRef};
    use crate::options::ParseOptions;
    use crate::parser::Parser;

    fn select(sql: &str) -> crate::ast::SelectStatement {
        match Parser::new(sql, &ParseOptions::default()).parse_statement() {
            Ok(Statement::Select(select)) => select,
            other => panic!("expected SELECT, got {other:?}"),
        }
    }

    #[test]
    fn test_select_core_clauses() {
        let select = select("SELECT DISTINCT a, b AS c FROM t WHERE a > 1 GROUP BY a HAVING count(*) > 2");
        let SelectCore::Select {
            distinct,
            columns,
            from,
            where_clause,
            group_by,
            having,
            ..
        } = &select.core
        else {
            panic!("expected select core");
        };
        assert!(*distinct);
        assert_eq!(columns.len(), 2);
        assert!(matches!(&columns[1], SelectColumn::Expression { alias: Some(a), .. } if a == "c"));
        assert!(matches!(from, Some(TableRef::Table { .. })));
        assert!(where_clause.is_some());
        assert_eq!(group_by.len(), 1);
        assert!(having.is_some());
    }

    #[test]
    fn test_limit_comma_form_swaps_operands() {
        let select = select("SELECT * FROM t LIMIT 5, 10");
        let limit = select.limit.expect("limit");
        assert!(matches!(limit.count.kind, ExprKind::Literal(crate::ast::Literal::Integer(10))));
        assert!(matches!(
            limit.offset.map(|e| e.kind),
            Some(ExprKind::Literal(crate::ast::Literal::Integer(5)))
        ));
    }

    #[test]
    fn test_table_wildcard() {
        let select = select("SELECT u.* FROM users u");
        let SelectCore::Select { columns, .. } = &select.core else {
            panic!("expected select core");
        };
        assert!(matches!(&columns[0], SelectColumn::TableWildcard { table, .. } if table == "u"));
    }

    #[test]
    fn test_join_tree_is_left_deep() {
        let select = select("SELECT * FROM a JOIN b ON a.id = b.id LEFT JOIN c USING (id)");
        let SelectCore::Select { from: Some(TableRef::Join { left, join, .. }), .. } = &select.core
        else {
            panic!("expected join");
        };
        assert_eq!(join.join_type, crate::ast::JoinType::Left);
        assert_eq!(join.using, vec![String::from("id")]);
        assert!(matches!(left.as_ref(), TableRef::Join { .. }));
    }
}
