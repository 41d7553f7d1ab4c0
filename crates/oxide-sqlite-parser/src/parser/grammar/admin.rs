//! PRAGMA, transaction control, ATTACH/DETACH, maintenance and EXPLAIN.

use crate::ast::{
    AnalyzeStatement, AttachStatement, DetachStatement, ExplainStatement, PragmaStatement,
    PragmaValue, QualifiedName, ReindexStatement, TransactionAction, TransactionMode,
    TransactionStatement, VacuumStatement,
};
use crate::lexer::{Keyword, TokenKind};
use crate::parser::engine::{PResult, Parser};
use crate::parser::error::Expected;
use crate::parser::rules::RuleId;

impl Parser<'_> {
    /// pragma <- PRAGMA qualified_name ('=' pragma_value / '(' pragma_value ')')?
    pub(crate) fn pragma(&mut self) -> PResult<PragmaStatement> {
        self.rule(RuleId::Pragma, |p| {
            let start = p.start();
            p.keyword(Keyword::Pragma)?;
            let name = p.qualified_name("pragma name")?;
            let value = if p.eat(&TokenKind::Eq) {
                Some(p.pragma_value()?)
            } else if p.eat(&TokenKind::LeftParen) {
                let value = p.pragma_value()?;
                p.punct(&TokenKind::RightParen)?;
                Some(value)
            } else {
                None
            };
            Ok(PragmaStatement {
                name,
                value,
                span: p.span_from(start),
            })
        })
    }

    /// pragma_value <- signed_number / name / string
    ///
    /// Any keyword is accepted as a name, so `ON`, `FULL` and `DELETE` work.
    fn pragma_value(&mut self) -> PResult<PragmaValue> {
        match self.peek() {
            TokenKind::Plus | TokenKind::Minus | TokenKind::Integer(_) | TokenKind::Float(_) => {
                self.signed_number().map(PragmaValue::Number)
            }
            TokenKind::String(value) => {
                let value = value.clone();
                self.bump();
                Ok(PragmaValue::String(value))
            }
            TokenKind::Identifier(name) => {
                let name = name.clone();
                self.bump();
                Ok(PragmaValue::Name(name))
            }
            TokenKind::Keyword(_) => {
                let span = self.bump();
                Ok(PragmaValue::Name(String::from(self.text(span))))
            }
            _ => self.fail(Expected::Label("pragma value")),
        }
    }

    /// transaction <- BEGIN (DEFERRED / IMMEDIATE / EXCLUSIVE)? TRANSACTION?
    ///              / (COMMIT / END) TRANSACTION?
    ///              / ROLLBACK TRANSACTION? (TO SAVEPOINT? name)?
    ///              / SAVEPOINT name
    ///              / RELEASE SAVEPOINT? name
    pub(crate) fn transaction(&mut self) -> PResult<TransactionStatement> {
        self.rule(RuleId::Transaction, |p| {
            let start = p.start();
            let action = match p.one_of(&[
                Keyword::Begin,
                Keyword::Commit,
                Keyword::End,
                Keyword::Rollback,
                Keyword::Savepoint,
                Keyword::Release,
            ])? {
                Keyword::Begin => {
                    let mode = if p.eat_keyword(Keyword::Deferred) {
                        Some(TransactionMode::Deferred)
                    } else if p.eat_keyword(Keyword::Immediate) {
                        Some(TransactionMode::Immediate)
                    } else if p.eat_keyword(Keyword::Exclusive) {
                        Some(TransactionMode::Exclusive)
                    } else {
                        None
                    };
                    p.eat_keyword(Keyword::Transaction);
                    TransactionAction::Begin { mode }
                }
                Keyword::Commit | Keyword::End => {
                    p.eat_keyword(Keyword::Transaction);
                    TransactionAction::Commit
                }
                Keyword::Rollback => {
                    p.eat_keyword(Keyword::Transaction);
                    let savepoint = if p.eat_keyword(Keyword::To) {
                        p.eat_keyword(Keyword::Savepoint);
                        Some(p.name("savepoint name")?)
                    } else {
                        None
                    };
                    TransactionAction::Rollback { savepoint }
                }
                Keyword::Savepoint => TransactionAction::Savepoint {
                    name: p.name("savepoint name")?,
                },
                _ => {
                    p.eat_keyword(Keyword::Savepoint);
                    TransactionAction::Release {
                        name: p.name("savepoint name")?,
                    }
                }
            };
            Ok(TransactionStatement {
                action,
                span: p.span_from(start),
            })
        })
    }

    /// attach <- ATTACH DATABASE? expression AS name
    pub(crate) fn attach(&mut self) -> PResult<AttachStatement> {
        self.rule(RuleId::Attach, |p| {
            let start = p.start();
            p.keyword(Keyword::Attach)?;
            p.eat_keyword(Keyword::Database);
            let expr = p.expression()?;
            p.keyword(Keyword::As)?;
            let schema = p.name("schema name")?;
            Ok(AttachStatement {
                expr,
                schema,
                span: p.span_from(start),
            })
        })
    }

    /// detach <- DETACH DATABASE? name
    pub(crate) fn detach(&mut self) -> PResult<DetachStatement> {
        self.rule(RuleId::Detach, |p| {
            let start = p.start();
            p.keyword(Keyword::Detach)?;
            p.eat_keyword(Keyword::Database);
            let schema = p.name("schema name")?;
            Ok(DetachStatement {
                schema,
                span: p.span_from(start),
            })
        })
    }

    /// vacuum <- VACUUM name? (INTO expression)?
    pub(crate) fn vacuum(&mut self) -> PResult<VacuumStatement> {
        self.rule(RuleId::Vacuum, |p| {
            let start = p.start();
            p.keyword(Keyword::Vacuum)?;
            let schema = if p.check_name() {
                Some(p.name("schema name")?)
            } else {
                None
            };
            let into = if p.eat_keyword(Keyword::Into) {
                Some(p.expression()?)
            } else {
                None
            };
            Ok(VacuumStatement {
                schema,
                into,
                span: p.span_from(start),
            })
        })
    }

    /// analyze <- ANALYZE qualified_name?
    pub(crate) fn analyze(&mut self) -> PResult<AnalyzeStatement> {
        self.rule(RuleId::Analyze, |p| {
            let start = p.start();
            p.keyword(Keyword::Analyze)?;
            let target = p.optional_target()?;
            Ok(AnalyzeStatement {
                target,
                span: p.span_from(start),
            })
        })
    }

    /// reindex <- REINDEX qualified_name?
    pub(crate) fn reindex(&mut self) -> PResult<ReindexStatement> {
        self.rule(RuleId::Reindex, |p| {
            let start = p.start();
            p.keyword(Keyword::Reindex)?;
            let target = p.optional_target()?;
            Ok(ReindexStatement {
                target,
                span: p.span_from(start),
            })
        })
    }

    fn optional_target(&mut self) -> PResult<Option<QualifiedName>> {
        if self.check_name() {
            self.qualified_name("object name").map(Some)
        } else {
            Ok(None)
        }
    }

    /// explain <- EXPLAIN (QUERY PLAN)? statement
    pub(crate) fn explain(&mut self) -> PResult<ExplainStatement> {
        self.rule(RuleId::Explain, |p| {
            let start = p.start();
            p.keyword(Keyword::Explain)?;
            let query_plan = if p.eat_keyword(Keyword::Query) {
                p.keyword(Keyword::Plan)?;
                true
            } else {
                false
            };
            let statement = Box::new(p.statement()?);
            Ok(ExplainStatement {
                query_plan,
                statement,
                span: p.span_from(start),
            })
        })
    }
}
