//! The SQLite grammar, as methods on [`Parser`].
//!
//! Each rule is a method that runs its body through [`Parser::rule`] or
//! [`Parser::memo_rule`]. Alternatives are tried in order and the first that
//! matches wins. Once a clause's introducing keyword has matched, the rest of
//! the clause is required.

mod admin;
mod ddl;
mod dml;
mod expression;
mod select;

use super::engine::{Fail, PResult, Parser};
use super::error::Expected;
use super::rules::RuleId;
use crate::ast::{ConflictResolution, IndexedBy, QualifiedName, Statement};
use crate::lexer::{Keyword, TokenKind};

type Alternative<'a> = fn(&mut Parser<'a>) -> PResult<Statement>;

impl<'a> Parser<'a> {
    /// statement <- explain / select / insert / update / delete / create_* /
    ///              alter_table / drop / pragma / transaction / attach /
    ///              detach / vacuum / analyze / reindex
    pub(crate) fn statement(&mut self) -> PResult<Statement> {
        self.memo_rule(RuleId::Statement, Self::statement_body)
    }

    fn statement_body(&mut self) -> PResult<Statement> {
        let alternatives: [Alternative<'a>; 19] = [
            |p| p.explain().map(Statement::Explain),
            |p| p.select().map(Statement::Select),
            |p| p.insert().map(Statement::Insert),
            |p| p.update().map(Statement::Update),
            |p| p.delete().map(Statement::Delete),
            |p| p.create_table().map(Statement::CreateTable),
            |p| p.create_index().map(Statement::CreateIndex),
            |p| p.create_view().map(Statement::CreateView),
            |p| p.create_trigger().map(Statement::CreateTrigger),
            |p| p.create_virtual_table().map(Statement::CreateVirtualTable),
            |p| p.alter_table().map(Statement::AlterTable),
            |p| p.drop_statement().map(Statement::Drop),
            |p| p.pragma().map(Statement::Pragma),
            |p| p.transaction().map(Statement::Transaction),
            |p| p.attach().map(Statement::Attach),
            |p| p.detach().map(Statement::Detach),
            |p| p.vacuum().map(Statement::Vacuum),
            |p| p.analyze().map(Statement::Analyze),
            |p| p.reindex().map(Statement::Reindex),
        ];
        for alternative in alternatives {
            if let Some(statement) = self.optional(alternative) {
                return Ok(statement);
            }
        }
        Err(Fail)
    }

    // --- Shared pieces ---

    /// Parses `clause` if the current token is `keyword`, otherwise records
    /// the keyword as an alternative and returns `None`.
    pub(crate) fn clause_if<T>(
        &mut self,
        keyword: Keyword,
        clause: impl FnOnce(&mut Self) -> PResult<T>,
    ) -> PResult<Option<T>> {
        if self.check_keyword(keyword) {
            clause(self).map(Some)
        } else {
            self.record(Expected::Keyword(keyword));
            Ok(None)
        }
    }

    /// qualified_name <- name ('.' name)?
    pub(crate) fn qualified_name(&mut self, what: &'static str) -> PResult<QualifiedName> {
        self.rule(RuleId::QualifiedName, |p| {
            let start = p.start();
            let first = p.name(what)?;
            let second = p.optional(|p| {
                p.punct(&TokenKind::Dot)?;
                p.name(what)
            });
            let (schema, name) = match second {
                Some(name) => (Some(first), name),
                None => (None, first),
            };
            Ok(QualifiedName {
                schema,
                name,
                span: p.span_from(start),
            })
        })
    }

    /// alias <- AS name / name
    pub(crate) fn alias(&mut self) -> PResult<Option<String>> {
        if self.eat_keyword(Keyword::As) {
            return self.name_or_string("alias").map(Some);
        }
        if self.check_name() || matches!(self.peek(), TokenKind::String(_)) {
            return self.name_or_string("alias").map(Some);
        }
        Ok(None)
    }

    /// `'(' name (',' name)* ')'`
    pub(crate) fn name_list(&mut self, what: &'static str) -> PResult<Vec<String>> {
        self.paren_list(|p| p.name(what))
    }

    /// Optional `IF NOT EXISTS`.
    pub(crate) fn if_not_exists(&mut self) -> bool {
        self.optional(|p| {
            p.keyword(Keyword::If)?;
            p.keyword(Keyword::Not)?;
            p.keyword(Keyword::Exists)
        })
        .is_some()
    }

    /// Optional `IF EXISTS`.
    pub(crate) fn if_exists(&mut self) -> bool {
        self.optional(|p| {
            p.keyword(Keyword::If)?;
            p.keyword(Keyword::Exists)
        })
        .is_some()
    }

    /// Optional `TEMP` or `TEMPORARY`.
    pub(crate) fn temporary(&mut self) -> bool {
        self.eat_keyword(Keyword::Temp) || self.eat_keyword(Keyword::Temporary)
    }

    /// ROLLBACK / ABORT / FAIL / IGNORE / REPLACE
    pub(crate) fn conflict_resolution(&mut self) -> PResult<ConflictResolution> {
        let keyword = self.one_of(&[
            Keyword::Rollback,
            Keyword::Abort,
            Keyword::Fail,
            Keyword::Ignore,
            Keyword::Replace,
        ])?;
        Ok(match keyword {
            Keyword::Rollback => ConflictResolution::Rollback,
            Keyword::Abort => ConflictResolution::Abort,
            Keyword::Fail => ConflictResolution::Fail,
            Keyword::Ignore => ConflictResolution::Ignore,
            _ => ConflictResolution::Replace,
        })
    }

    /// Optional `OR conflict` after INSERT or UPDATE.
    pub(crate) fn or_conflict(&mut self) -> PResult<Option<ConflictResolution>> {
        if self.eat_keyword(Keyword::Or) {
            self.conflict_resolution().map(Some)
        } else {
            Ok(None)
        }
    }

    /// Optional `ON CONFLICT conflict` inside a constraint.
    pub(crate) fn on_conflict_resolution(&mut self) -> PResult<Option<ConflictResolution>> {
        if self.check_keyword(Keyword::On) && self.check_keyword_at(1, Keyword::Conflict) {
            self.bump();
            self.bump();
            self.conflict_resolution().map(Some)
        } else {
            Ok(None)
        }
    }

    /// Optional `INDEXED BY name` or `NOT INDEXED`.
    pub(crate) fn indexed_by(&mut self) -> PResult<Option<IndexedBy>> {
        if self.eat_keyword(Keyword::Indexed) {
            self.keyword(Keyword::By)?;
            return self.name("index name").map(|name| Some(IndexedBy::Index(name)));
        }
        if self.check_keyword(Keyword::Not) && self.check_keyword_at(1, Keyword::Indexed) {
            self.bump();
            self.bump();
            return Ok(Some(IndexedBy::NotIndexed));
        }
        Ok(None)
    }
}
