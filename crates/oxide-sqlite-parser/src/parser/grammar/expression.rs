//! Expressions, parsed with Pratt binding powers.

use crate::ast::{
    BinaryOp, Expr, ExprKind, FrameBound, FrameExclude, FrameSpec, FrameUnits, FunctionCall,
    InTarget, LikeOp, Literal, Over, RaiseAction, TypeName, WindowDefinition,
};
use crate::lexer::{Keyword, Span, TokenKind};
use crate::parser::engine::{Fail, PResult, Parser};
use crate::parser::error::Expected;
use crate::parser::pratt::{self, COLLATE_BP, EQUALITY_BP, EQUALITY_RHS_BP};
use crate::parser::rules::RuleId;

/// Keywords that may follow `NOT` in an operator position.
const NOT_SUFFIXES: [Keyword; 7] = [
    Keyword::Null,
    Keyword::In,
    Keyword::Like,
    Keyword::Glob,
    Keyword::Regexp,
    Keyword::Match,
    Keyword::Between,
];

/// What follows a left operand.
enum Suffix {
    Binary(BinaryOp, Expr),
    Collate(String),
    IsNull(bool),
    Is {
        right: Expr,
        negated: bool,
    },
    Like {
        op: LikeOp,
        pattern: Expr,
        escape: Option<Expr>,
        negated: bool,
    },
    Between {
        low: Expr,
        high: Expr,
        negated: bool,
    },
    In {
        target: InTarget,
        negated: bool,
    },
}

impl Suffix {
    fn apply(self, left: Expr, span: Span) -> Expr {
        let left = Box::new(left);
        let kind = match self {
            Self::Binary(op, right) => ExprKind::Binary {
                left,
                op,
                right: Box::new(right),
            },
            Self::Collate(collation) => ExprKind::Collate {
                expr: left,
                collation,
            },
            Self::IsNull(negated) => ExprKind::IsNull {
                expr: left,
                negated,
            },
            Self::Is { right, negated } => ExprKind::Is {
                left,
                right: Box::new(right),
                negated,
            },
            Self::Like {
                op,
                pattern,
                escape,
                negated,
            } => ExprKind::Like {
                expr: left,
                op,
                pattern: Box::new(pattern),
                escape: escape.map(Box::new),
                negated,
            },
            Self::Between { low, high, negated } => ExprKind::Between {
                expr: left,
                low: Box::new(low),
                high: Box::new(high),
                negated,
            },
            Self::In { target, negated } => ExprKind::In {
                expr: left,
                target,
                negated,
            },
        };
        Expr::new(kind, span)
    }
}

fn like_op(keyword: Keyword) -> Option<LikeOp> {
    match keyword {
        Keyword::Like => Some(LikeOp::Like),
        Keyword::Glob => Some(LikeOp::Glob),
        Keyword::Regexp => Some(LikeOp::Regexp),
        Keyword::Match => Some(LikeOp::Match),
        _ => None,
    }
}

impl Parser<'_> {
    /// expression <- operand (operator operand)*
    pub(crate) fn expression(&mut self) -> PResult<Expr> {
        self.memo_rule(RuleId::Expression, Self::expression_body)
    }

    pub(crate) fn expression_body(&mut self) -> PResult<Expr> {
        self.expr_bp(0)
    }

    /// Parses an expression whose operators all bind at least as tightly as
    /// `min_bp`.
    pub(crate) fn expr_bp(&mut self, min_bp: u8) -> PResult<Expr> {
        let mut lhs = self.operand()?;
        loop {
            // A suffix that fails part way leaves the operator unconsumed.
            match self.optional(|p| p.suffix(min_bp)) {
                Some(Some(suffix)) => {
                    let span = self.span_from(lhs.span.start);
                    lhs = suffix.apply(lhs, span);
                }
                Some(None) | None => break,
            }
        }
        Ok(lhs)
    }

    fn suffix(&mut self, min_bp: u8) -> PResult<Option<Suffix>> {
        if let Some((op, left_bp, right_bp)) = pratt::infix(self.peek()) {
            if left_bp < min_bp {
                return Ok(None);
            }
            self.bump();
            let rhs = self.expr_bp(right_bp)?;
            return Ok(Some(Suffix::Binary(op, rhs)));
        }

        let Some(keyword) = self.current().as_keyword() else {
            return Ok(None);
        };
        if keyword == Keyword::Collate {
            if COLLATE_BP < min_bp {
                return Ok(None);
            }
            self.bump();
            return self.name("collation name").map(|name| Some(Suffix::Collate(name)));
        }

        let negated = keyword == Keyword::Not;
        let operator = if negated {
            let next = NOT_SUFFIXES
                .into_iter()
                .find(|&next| self.check_keyword_at(1, next));
            let Some(next) = next else {
                return Ok(None);
            };
            next
        } else {
            keyword
        };
        let equality_family = negated
            || matches!(
                operator,
                Keyword::Is
                    | Keyword::Isnull
                    | Keyword::Notnull
                    | Keyword::In
                    | Keyword::Like
                    | Keyword::Glob
                    | Keyword::Regexp
                    | Keyword::Match
                    | Keyword::Between
            );
        if !equality_family || EQUALITY_BP < min_bp {
            return Ok(None);
        }
        if negated {
            self.bump();
        }
        self.bump();

        let suffix = match operator {
            Keyword::Null | Keyword::Notnull => Suffix::IsNull(true),
            Keyword::Isnull => Suffix::IsNull(false),
            Keyword::Is => {
                let not = self.eat_keyword(Keyword::Not);
                let distinct = self
                    .optional(|p| {
                        p.keyword(Keyword::Distinct)?;
                        p.keyword(Keyword::From)
                    })
                    .is_some();
                let right = self.expr_bp(EQUALITY_RHS_BP)?;
                Suffix::Is {
                    right,
                    negated: not ^ distinct,
                }
            }
            Keyword::Between => {
                let low = self.expr_bp(EQUALITY_RHS_BP)?;
                self.keyword(Keyword::And)?;
                let high = self.expr_bp(EQUALITY_RHS_BP)?;
                Suffix::Between { low, high, negated }
            }
            Keyword::In => Suffix::In {
                target: self.in_target()?,
                negated,
            },
            _ => {
                let op = like_op(operator).ok_or(Fail)?;
                let pattern = self.expr_bp(EQUALITY_RHS_BP)?;
                let escape = if self.eat_keyword(Keyword::Escape) {
                    Some(self.expr_bp(EQUALITY_RHS_BP)?)
                } else {
                    None
                };
                Suffix::Like {
                    op,
                    pattern,
                    escape,
                    negated,
                }
            }
        };
        Ok(Some(suffix))
    }

    /// in_target <- '(' select ')' / '(' expression_list? ')' / qualified_name
    fn in_target(&mut self) -> PResult<InTarget> {
        if self.at_subquery() {
            return self.subquery().map(|query| InTarget::Subquery { query });
        }
        if self.eat(&TokenKind::LeftParen) {
            let items = if self.check(&TokenKind::RightParen) {
                Vec::new()
            } else {
                self.comma_list(Self::expression)?
            };
            self.punct(&TokenKind::RightParen)?;
            return Ok(InTarget::List { items });
        }
        let table = self.qualified_name("table name")?;
        Ok(InTarget::Table { table })
    }

    /// operand <- unary_operator expression / literal / bind_parameter
    ///          / '(' select ')' / '(' expression_list ')' / EXISTS '(' select ')'
    ///          / cast / case / raise / function_call / column_ref
    pub(crate) fn operand(&mut self) -> PResult<Expr> {
        self.memo_rule(RuleId::Operand, Self::operand_body)
    }

    fn operand_body(&mut self) -> PResult<Expr> {
        let start = self.start();
        if let Some((op, bp)) = pratt::prefix(self.peek()) {
            self.bump();
            let operand = self.expr_bp(bp)?;
            return Ok(Expr::new(
                ExprKind::Unary {
                    op,
                    operand: Box::new(operand),
                },
                self.span_from(start),
            ));
        }

        if let Some(literal) = self.literal_value() {
            return Ok(Expr::new(ExprKind::Literal(literal), self.span_from(start)));
        }

        if let TokenKind::Variable(name) = self.peek() {
            let name = name.clone();
            self.bump();
            return Ok(Expr::new(ExprKind::Variable { name }, self.span_from(start)));
        }

        if self.check(&TokenKind::LeftParen) {
            if self.at_subquery() {
                if let Some(query) = self.optional(Self::subquery) {
                    return Ok(Expr::new(ExprKind::Subquery { query }, self.span_from(start)));
                }
            }
            self.bump();
            let items = self.comma_list(Self::expression)?;
            self.punct(&TokenKind::RightParen)?;
            let kind = match <[Expr; 1]>::try_from(items) {
                Ok([expr]) => ExprKind::Paren {
                    expr: Box::new(expr),
                },
                Err(items) => ExprKind::Row { items },
            };
            return Ok(Expr::new(kind, self.span_from(start)));
        }

        if self.eat_keyword(Keyword::Exists) {
            let query = self.subquery()?;
            return Ok(Expr::new(ExprKind::Exists { query }, self.span_from(start)));
        }
        if self.check_keyword(Keyword::Cast) && self.check_at(1, &TokenKind::LeftParen) {
            return self.cast_expression();
        }
        if self.check_keyword(Keyword::Case) {
            return self.case_expression();
        }
        if self.check_keyword(Keyword::Raise) {
            return self.raise_function();
        }

        if self.check_name() {
            if self.check_at(1, &TokenKind::LeftParen) {
                let call = self.function_call()?;
                return Ok(Expr::new(ExprKind::Function(call), self.span_from(start)));
            }
            return self.column_ref();
        }

        self.fail(Expected::Label("expression"))
    }

    /// column_ref <- (name '.')? (name '.')? name
    fn column_ref(&mut self) -> PResult<Expr> {
        let start = self.start();
        let mut parts = vec![self.name("column name")?];
        while parts.len() < 3 {
            let Some(part) = self.optional(|p| {
                p.punct(&TokenKind::Dot)?;
                p.name("column name")
            }) else {
                break;
            };
            parts.push(part);
        }
        let name = parts.pop().ok_or(Fail)?;
        let table = parts.pop();
        let schema = parts.pop();
        Ok(Expr::new(
            ExprKind::Column {
                schema,
                table,
                name,
            },
            self.span_from(start),
        ))
    }

    /// Consumes a literal value token.
    pub(crate) fn literal_value(&mut self) -> Option<Literal> {
        let literal = match self.peek() {
            TokenKind::Integer(n) => Literal::Integer(*n),
            TokenKind::Float(f) => Literal::Float(*f),
            TokenKind::String(s) => Literal::String(s.clone()),
            TokenKind::Blob(b) => Literal::Blob(b.clone()),
            TokenKind::Keyword(Keyword::Null) => Literal::Null,
            TokenKind::Keyword(Keyword::True) => Literal::Boolean(true),
            TokenKind::Keyword(Keyword::False) => Literal::Boolean(false),
            TokenKind::Keyword(Keyword::CurrentTime) => Literal::CurrentTime,
            TokenKind::Keyword(Keyword::CurrentDate) => Literal::CurrentDate,
            TokenKind::Keyword(Keyword::CurrentTimestamp) => Literal::CurrentTimestamp,
            _ => return None,
        };
        self.bump();
        Some(literal)
    }

    /// signed_number <- ('+' / '-')? numeric_literal
    pub(crate) fn signed_number(&mut self) -> PResult<Expr> {
        let start = self.start();
        let negative = if self.eat(&TokenKind::Minus) {
            true
        } else {
            self.eat(&TokenKind::Plus);
            false
        };
        let literal = match self.peek() {
            TokenKind::Integer(n) if negative => Literal::Integer(n.checked_neg().ok_or(Fail)?),
            TokenKind::Integer(n) => Literal::Integer(*n),
            TokenKind::Float(f) if negative => Literal::Float(-f),
            TokenKind::Float(f) => Literal::Float(*f),
            _ => return self.fail(Expected::Label("number")),
        };
        self.bump();
        Ok(Expr::new(ExprKind::Literal(literal), self.span_from(start)))
    }

    /// cast <- CAST '(' expression AS type_name ')'
    fn cast_expression(&mut self) -> PResult<Expr> {
        self.rule(RuleId::CastExpression, |p| {
            let start = p.start();
            p.keyword(Keyword::Cast)?;
            p.punct(&TokenKind::LeftParen)?;
            let expr = p.expression()?;
            p.keyword(Keyword::As)?;
            let type_name = p.type_name()?;
            p.punct(&TokenKind::RightParen)?;
            Ok(Expr::new(
                ExprKind::Cast {
                    expr: Box::new(expr),
                    type_name,
                },
                p.span_from(start),
            ))
        })
    }

    /// case <- CASE expression? (WHEN expression THEN expression)+
    ///         (ELSE expression)? END
    fn case_expression(&mut self) -> PResult<Expr> {
        self.rule(RuleId::CaseExpression, |p| {
            let start = p.start();
            p.keyword(Keyword::Case)?;
            let operand = if p.check_keyword(Keyword::When) {
                None
            } else {
                Some(Box::new(p.expression()?))
            };

            let mut when_clauses = Vec::new();
            p.keyword(Keyword::When)?;
            loop {
                let condition = p.expression()?;
                p.keyword(Keyword::Then)?;
                let result = p.expression()?;
                when_clauses.push((condition, result));
                if !p.eat_keyword(Keyword::When) {
                    break;
                }
            }

            let else_clause = if p.eat_keyword(Keyword::Else) {
                Some(Box::new(p.expression()?))
            } else {
                None
            };
            p.keyword(Keyword::End)?;

            Ok(Expr::new(
                ExprKind::Case {
                    operand,
                    when_clauses,
                    else_clause,
                },
                p.span_from(start),
            ))
        })
    }

    /// raise <- RAISE '(' (IGNORE / (ROLLBACK / ABORT / FAIL) ',' expression) ')'
    fn raise_function(&mut self) -> PResult<Expr> {
        self.rule(RuleId::RaiseFunction, |p| {
            let start = p.start();
            p.keyword(Keyword::Raise)?;
            p.punct(&TokenKind::LeftParen)?;
            let (action, message) = if p.eat_keyword(Keyword::Ignore) {
                (RaiseAction::Ignore, None)
            } else {
                let action = match p.one_of(&[Keyword::Rollback, Keyword::Abort, Keyword::Fail])? {
                    Keyword::Rollback => RaiseAction::Rollback,
                    Keyword::Abort => RaiseAction::Abort,
                    _ => RaiseAction::Fail,
                };
                p.punct(&TokenKind::Comma)?;
                (action, Some(Box::new(p.expression()?)))
            };
            p.punct(&TokenKind::RightParen)?;
            Ok(Expr::new(ExprKind::Raise { action, message }, p.span_from(start)))
        })
    }

    /// function_call <- name '(' (DISTINCT? expression_list / '*')? ')'
    ///                  filter_clause? over_clause?
    fn function_call(&mut self) -> PResult<FunctionCall> {
        self.rule(RuleId::FunctionCall, |p| {
            let name = p.name("function name")?;
            p.punct(&TokenKind::LeftParen)?;
            let mut distinct = false;
            let mut star = false;
            let mut args = Vec::new();
            if p.eat(&TokenKind::Star) {
                star = true;
            } else if !p.check(&TokenKind::RightParen) {
                distinct = p.eat_keyword(Keyword::Distinct);
                args = p.comma_list(Self::expression)?;
            }
            p.punct(&TokenKind::RightParen)?;

            let filter = if p.check_keyword(Keyword::Filter)
                && p.check_at(1, &TokenKind::LeftParen)
            {
                p.bump();
                p.punct(&TokenKind::LeftParen)?;
                p.keyword(Keyword::Where)?;
                let condition = p.expression()?;
                p.punct(&TokenKind::RightParen)?;
                Some(Box::new(condition))
            } else {
                None
            };

            let over = if p.eat_keyword(Keyword::Over) {
                if p.check(&TokenKind::LeftParen) {
                    Some(Over::Definition(p.window_definition()?))
                } else {
                    Some(Over::Named(p.name("window name")?))
                }
            } else {
                None
            };

            Ok(FunctionCall {
                name,
                args,
                distinct,
                star,
                filter,
                over,
            })
        })
    }

    /// window_definition <- '(' name? (PARTITION BY expression_list)?
    ///                      order_by_clause? frame_spec? ')'
    pub(crate) fn window_definition(&mut self) -> PResult<WindowDefinition> {
        self.rule(RuleId::WindowDefinition, |p| {
            let start = p.start();
            p.punct(&TokenKind::LeftParen)?;
            let base = if p.check_name()
                && ![Keyword::Partition, Keyword::Rows, Keyword::Range, Keyword::Groups]
                    .into_iter()
                    .any(|keyword| p.check_keyword(keyword))
            {
                Some(p.name("window name")?)
            } else {
                None
            };
            let partition_by = if p.eat_keyword(Keyword::Partition) {
                p.keyword(Keyword::By)?;
                p.comma_list(Self::expression)?
            } else {
                Vec::new()
            };
            let order_by = p
                .clause_if(Keyword::Order, Self::order_by_clause)?
                .unwrap_or_default();
            let frame = if let Some(units) = p.frame_units() {
                Some(p.frame_spec(units)?)
            } else {
                None
            };
            p.punct(&TokenKind::RightParen)?;
            Ok(WindowDefinition {
                base,
                partition_by,
                order_by,
                frame,
                span: p.span_from(start),
            })
        })
    }

    fn frame_units(&mut self) -> Option<FrameUnits> {
        if self.eat_keyword(Keyword::Rows) {
            Some(FrameUnits::Rows)
        } else if self.eat_keyword(Keyword::Range) {
            Some(FrameUnits::Range)
        } else if self.eat_keyword(Keyword::Groups) {
            Some(FrameUnits::Groups)
        } else {
            None
        }
    }

    /// frame_spec <- units (BETWEEN frame_bound AND frame_bound / frame_bound)
    ///               (EXCLUDE (NO OTHERS / CURRENT ROW / GROUP / TIES))?
    fn frame_spec(&mut self, units: FrameUnits) -> PResult<FrameSpec> {
        let (start, end) = if self.eat_keyword(Keyword::Between) {
            let start = self.frame_bound()?;
            self.keyword(Keyword::And)?;
            (start, Some(self.frame_bound()?))
        } else {
            (self.frame_bound()?, None)
        };
        let exclude = if self.eat_keyword(Keyword::Exclude) {
            Some(if self.eat_keyword(Keyword::No) {
                self.keyword(Keyword::Others)?;
                FrameExclude::NoOthers
            } else if self.eat_keyword(Keyword::Current) {
                self.keyword(Keyword::Row)?;
                FrameExclude::CurrentRow
            } else if self.eat_keyword(Keyword::Group) {
                FrameExclude::Group
            } else {
                self.keyword(Keyword::Ties)?;
                FrameExclude::Ties
            })
        } else {
            None
        };
        Ok(FrameSpec {
            units,
            start,
            end,
            exclude,
        })
    }

    fn frame_bound(&mut self) -> PResult<FrameBound> {
        if self.eat_keyword(Keyword::Unbounded) {
            return if self.eat_keyword(Keyword::Preceding) {
                Ok(FrameBound::UnboundedPreceding)
            } else {
                self.keyword(Keyword::Following)?;
                Ok(FrameBound::UnboundedFollowing)
            };
        }
        if self.check_keyword(Keyword::Current) && self.check_keyword_at(1, Keyword::Row) {
            self.bump();
            self.bump();
            return Ok(FrameBound::CurrentRow);
        }
        let offset = Box::new(self.expression()?);
        if self.eat_keyword(Keyword::Preceding) {
            Ok(FrameBound::Preceding(offset))
        } else {
            self.keyword(Keyword::Following)?;
            Ok(FrameBound::Following(offset))
        }
    }

    /// type_name <- name+ ('(' signed_number (',' signed_number)? ')')?
    pub(crate) fn type_name(&mut self) -> PResult<TypeName> {
        self.rule(RuleId::TypeName, |p| {
            let start = p.start();
            let mut words = vec![p.name("type name")?];
            while p.check_name() && !p.check_keyword(Keyword::Generated) {
                words.push(p.name("type name")?);
            }
            let args = if p.eat(&TokenKind::LeftParen) {
                let mut args = vec![p.signed_number()?];
                if p.eat(&TokenKind::Comma) {
                    args.push(p.signed_number()?);
                }
                p.punct(&TokenKind::RightParen)?;
                args
            } else {
                Vec::new()
            };
            Ok(TypeName {
                name: words.join(" "),
                args,
                span: p.span_from(start),
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::ParseOptions;

    fn expr(sql: &str) -> Expr {
        Parser::new(sql, &ParseOptions::default())
            .parse_expression()
            .unwrap_or_else(|failure| panic!("{sql}: {failure:?}"))
    }

    #[test]
    fn test_precedence() {
        let e = expr("1 + 2 * 3");
        let ExprKind::Binary { op, right, .. } = e.kind else {
            panic!("expected binary expression");
        };
        assert_eq!(op, BinaryOp::Add);
        assert!(matches!(
            right.kind,
            ExprKind::Binary {
                op: BinaryOp::Mul,
                ..
            }
        ));
    }

    #[test]
    fn test_not_binds_looser_than_comparison() {
        let e = expr("NOT a = b AND c");
        let ExprKind::Binary { left, op, .. } = e.kind else {
            panic!("expected AND");
        };
        assert_eq!(op, BinaryOp::And);
        assert!(matches!(left.kind, ExprKind::Unary { .. }));
    }

    #[test]
    fn test_is_distinct_from() {
        assert!(matches!(
            expr("a IS DISTINCT FROM b").kind,
            ExprKind::Is { negated: true, .. }
        ));
        assert!(matches!(
            expr("a IS NOT DISTINCT FROM b").kind,
            ExprKind::Is { negated: false, .. }
        ));
        assert!(matches!(
            expr("a IS NOT NULL").kind,
            ExprKind::Is { negated: true, .. }
        ));
    }

    #[test]
    fn test_null_tests() {
        assert!(matches!(
            expr("a ISNULL").kind,
            ExprKind::IsNull { negated: false, .. }
        ));
        assert!(matches!(
            expr("a NOTNULL").kind,
            ExprKind::IsNull { negated: true, .. }
        ));
        assert!(matches!(
            expr("a NOT NULL").kind,
            ExprKind::IsNull { negated: true, .. }
        ));
    }

    #[test]
    fn test_between_and_conjunction() {
        let e = expr("x BETWEEN 1 AND 5 AND y");
        let ExprKind::Binary { left, op, .. } = e.kind else {
            panic!("expected AND");
        };
        assert_eq!(op, BinaryOp::And);
        assert!(matches!(left.kind, ExprKind::Between { negated: false, .. }));
    }

    #[test]
    fn test_in_targets() {
        assert!(matches!(
            expr("a IN ()").kind,
            ExprKind::In { target: InTarget::List { ref items }, .. } if items.is_empty()
        ));
        assert!(matches!(
            expr("a NOT IN (SELECT b FROM t)").kind,
            ExprKind::In { target: InTarget::Subquery { .. }, negated: true, .. }
        ));
        assert!(matches!(
            expr("a IN main.t").kind,
            ExprKind::In { target: InTarget::Table { .. }, .. }
        ));
    }

    #[test]
    fn test_like_with_escape() {
        let e = expr("name NOT LIKE '%x!%' ESCAPE '!'");
        assert!(matches!(
            e.kind,
            ExprKind::Like { op: LikeOp::Like, negated: true, escape: Some(_), .. }
        ));
    }

    #[test]
    fn test_row_value_and_paren() {
        assert!(matches!(expr("(1)").kind, ExprKind::Paren { .. }));
        assert!(matches!(expr("(1, 2)").kind, ExprKind::Row { ref items } if items.len() == 2));
    }

    #[test]
    fn test_column_ref_parts() {
        let ExprKind::Column { schema, table, name } = expr("main.users.id").kind else {
            panic!("expected column");
        };
        assert_eq!(schema.as_deref(), Some("main"));
        assert_eq!(table.as_deref(), Some("users"));
        assert_eq!(name, "id");
    }

    #[test]
    fn test_window_function() {
        let ExprKind::Function(call) = expr(
            "sum(x) FILTER (WHERE x > 0) OVER (PARTITION BY g ORDER BY t \
             ROWS BETWEEN UNBOUNDED PRECEDING AND CURRENT ROW EXCLUDE TIES)",
        )
        .kind
        else {
            panic!("expected function call");
        };
        assert!(call.filter.is_some());
        let Some(Over::Definition(window)) = call.over else {
            panic!("expected inline window");
        };
        assert_eq!(window.partition_by.len(), 1);
        let frame = window.frame.expect("frame");
        assert_eq!(frame.units, FrameUnits::Rows);
        assert_eq!(frame.start, FrameBound::UnboundedPreceding);
        assert_eq!(frame.end, Some(FrameBound::CurrentRow));
        assert_eq!(frame.exclude, Some(FrameExclude::Ties));
    }

    #[test]
    fn test_cast_and_case() {
        let ExprKind::Cast { type_name, .. } = expr("CAST(x AS VARCHAR(10))").kind else {
            panic!("expected cast");
        };
        assert_eq!(type_name.name, "VARCHAR");
        assert_eq!(type_name.args.len(), 1);

        let ExprKind::Case { operand, when_clauses, else_clause } =
            expr("CASE WHEN a THEN 1 WHEN b THEN 2 ELSE 3 END").kind
        else {
            panic!("expected case");
        };
        assert!(operand.is_none());
        assert_eq!(when_clauses.len(), 2);
        assert!(else_clause.is_some());
    }

    #[test]
    fn test_expression_span() {
        let e = expr("a  +  b");
        assert_eq!(e.span.start.offset, 0);
        assert_eq!(e.span.end.offset, 7);
    }

    #[test]
    fn test_dangling_operator_is_rejected() {
        assert!(Parser::new("1 +", &ParseOptions::default())
            .parse_expression()
            .is_err());
    }
}
