//! CREATE, ALTER and DROP.

use crate::ast::{
    AlterTableAction, AlterTableStatement, ColumnConstraint, ColumnConstraintKind, ColumnDef,
    CreateIndexStatement, CreateTableStatement, CreateTriggerStatement, CreateViewStatement,
    CreateVirtualTableStatement, DropObject, DropStatement, Expr, ExprKind, ForeignKeyClause,
    IndexedColumn, Literal, OrderDirection, ReferentialAction, TableConstraint,
    TableConstraintKind, TableDefinition, TriggerEvent, TriggerTiming,
};
use crate::lexer::{Keyword, Span, TokenKind};
use crate::parser::engine::{PResult, Parser};
use crate::parser::error::Expected;
use crate::parser::rules::RuleId;

const TABLE_CONSTRAINT_START: [Keyword; 5] = [
    Keyword::Constraint,
    Keyword::Primary,
    Keyword::Unique,
    Keyword::Check,
    Keyword::Foreign,
];

const COLUMN_CONSTRAINT_START: [Keyword; 10] = [
    Keyword::Constraint,
    Keyword::Primary,
    Keyword::Null,
    Keyword::Unique,
    Keyword::Check,
    Keyword::Default,
    Keyword::Collate,
    Keyword::References,
    Keyword::Generated,
    Keyword::As,
];

impl Parser<'_> {
    fn at_any_keyword(&self, keywords: &[Keyword]) -> bool {
        keywords.iter().any(|&keyword| self.check_keyword(keyword))
    }

    fn at_column_constraint(&mut self) -> bool {
        self.at_any_keyword(&COLUMN_CONSTRAINT_START)
            || (self.check_keyword(Keyword::Not) && self.check_keyword_at(1, Keyword::Null))
    }

    /// create_table <- CREATE (TEMP / TEMPORARY)? TABLE if_not_exists? qualified_name
    ///                 (AS select / '(' column_definition (',' column_definition)*
    ///                 (','? table_constraint)* ')' table_options)
    pub(crate) fn create_table(&mut self) -> PResult<CreateTableStatement> {
        self.rule(RuleId::CreateTable, |p| {
            let start = p.start();
            p.keyword(Keyword::Create)?;
            let temporary = p.temporary();
            p.keyword(Keyword::Table)?;
            let if_not_exists = p.if_not_exists();
            let name = p.qualified_name("table name")?;

            let definition = if p.eat_keyword(Keyword::As) {
                TableDefinition::AsSelect {
                    query: Box::new(p.select()?),
                }
            } else {
                p.table_columns()?
            };

            Ok(CreateTableStatement {
                temporary,
                if_not_exists,
                name,
                definition,
                span: p.span_from(start),
            })
        })
    }

    fn table_columns(&mut self) -> PResult<TableDefinition> {
        self.punct(&TokenKind::LeftParen)?;
        let mut columns = vec![self.column_definition()?];
        let mut constraints = Vec::new();
        loop {
            let comma = self.eat(&TokenKind::Comma);
            let at_constraint = self.at_any_keyword(&TABLE_CONSTRAINT_START);
            if at_constraint && (comma || !constraints.is_empty()) {
                constraints.push(self.table_constraint()?);
            } else if comma && constraints.is_empty() {
                columns.push(self.column_definition()?);
            } else if comma {
                constraints.push(self.table_constraint()?);
            } else {
                break;
            }
        }
        self.punct(&TokenKind::RightParen)?;

        let mut without_rowid = false;
        let mut strict = false;
        while self.check_keyword(Keyword::Without) || self.check_keyword(Keyword::Strict) {
            if self.eat_keyword(Keyword::Strict) {
                strict = true;
            } else {
                self.bump();
                match self.peek() {
                    TokenKind::Identifier(word) if word.eq_ignore_ascii_case("rowid") => {
                        self.bump();
                        without_rowid = true;
                    }
                    _ => return self.fail(Expected::Label("ROWID")),
                }
            }
            if !self.eat(&TokenKind::Comma) {
                break;
            }
        }

        Ok(TableDefinition::Columns {
            columns,
            constraints,
            without_rowid,
            strict,
        })
    }

    /// column_definition <- name type_name? column_constraint*
    pub(crate) fn column_definition(&mut self) -> PResult<ColumnDef> {
        self.rule(RuleId::ColumnDefinition, |p| {
            let start = p.start();
            let name = p.name("column name")?;
            let type_name = if p.check_keyword(Keyword::Generated) {
                None
            } else {
                p.optional(Self::type_name)
            };
            let mut constraints = Vec::new();
            while p.at_column_constraint() {
                constraints.push(p.column_constraint()?);
            }
            Ok(ColumnDef {
                name,
                type_name,
                constraints,
                span: p.span_from(start),
            })
        })
    }

    /// column_constraint <- (CONSTRAINT name)?
    ///     (PRIMARY KEY (ASC / DESC)? conflict_clause AUTOINCREMENT?
    ///      / NOT NULL conflict_clause / NULL / UNIQUE conflict_clause
    ///      / CHECK '(' expression ')' / DEFAULT default_value / COLLATE name
    ///      / foreign_key_clause / (GENERATED ALWAYS)? AS '(' expression ')' (STORED / VIRTUAL)?)
    fn column_constraint(&mut self) -> PResult<ColumnConstraint> {
        self.rule(RuleId::ColumnConstraint, |p| {
            let start = p.start();
            let name = if p.eat_keyword(Keyword::Constraint) {
                Some(p.name("constraint name")?)
            } else {
                None
            };

            let kind = if p.eat_keyword(Keyword::Primary) {
                p.keyword(Keyword::Key)?;
                let direction = p.direction();
                let on_conflict = p.on_conflict_resolution()?;
                let autoincrement = p.eat_keyword(Keyword::Autoincrement);
                ColumnConstraintKind::PrimaryKey {
                    direction,
                    on_conflict,
                    autoincrement,
                }
            } else if p.eat_keyword(Keyword::Not) {
                p.keyword(Keyword::Null)?;
                ColumnConstraintKind::NotNull {
                    on_conflict: p.on_conflict_resolution()?,
                }
            } else if p.eat_keyword(Keyword::Null) {
                p.on_conflict_resolution()?;
                ColumnConstraintKind::Null
            } else if p.eat_keyword(Keyword::Unique) {
                ColumnConstraintKind::Unique {
                    on_conflict: p.on_conflict_resolution()?,
                }
            } else if p.eat_keyword(Keyword::Check) {
                ColumnConstraintKind::Check {
                    expr: p.parenthesized_expression()?,
                }
            } else if p.eat_keyword(Keyword::Default) {
                ColumnConstraintKind::Default {
                    value: p.default_value()?,
                }
            } else if p.eat_keyword(Keyword::Collate) {
                ColumnConstraintKind::Collate {
                    collation: p.name("collation name")?,
                }
            } else if p.check_keyword(Keyword::References) {
                ColumnConstraintKind::References(p.foreign_key_clause()?)
            } else {
                if p.eat_keyword(Keyword::Generated) {
                    p.keyword(Keyword::Always)?;
                }
                p.keyword(Keyword::As)?;
                let expr = p.parenthesized_expression()?;
                let stored = if p.eat_keyword(Keyword::Stored) {
                    true
                } else {
                    p.eat_keyword(Keyword::Virtual);
                    false
                };
                ColumnConstraintKind::Generated { expr, stored }
            };

            Ok(ColumnConstraint {
                name,
                kind,
                span: p.span_from(start),
            })
        })
    }

    fn direction(&mut self) -> Option<OrderDirection> {
        if self.eat_keyword(Keyword::Asc) {
            Some(OrderDirection::Asc)
        } else if self.eat_keyword(Keyword::Desc) {
            Some(OrderDirection::Desc)
        } else {
            None
        }
    }

    /// `'(' expression ')'`, returning the inner expression.
    fn parenthesized_expression(&mut self) -> PResult<Expr> {
        self.punct(&TokenKind::LeftParen)?;
        let expr = self.expression()?;
        self.punct(&TokenKind::RightParen)?;
        Ok(expr)
    }

    /// default_value <- '(' expression ')' / signed_number / literal / name
    fn default_value(&mut self) -> PResult<Expr> {
        let start = self.start();
        if self.check(&TokenKind::LeftParen) {
            let inner = self.parenthesized_expression()?;
            return Ok(Expr::new(
                ExprKind::Paren {
                    expr: Box::new(inner),
                },
                self.span_from(start),
            ));
        }
        if matches!(
            self.peek(),
            TokenKind::Plus | TokenKind::Minus | TokenKind::Integer(_) | TokenKind::Float(_)
        ) {
            return self.signed_number();
        }
        if let Some(literal) = self.literal_value() {
            return Ok(Expr::new(ExprKind::Literal(literal), self.span_from(start)));
        }
        // A bare identifier default is taken as a string.
        let name = self.name("default value")?;
        Ok(Expr::new(
            ExprKind::Literal(Literal::String(name)),
            self.span_from(start),
        ))
    }

    /// table_constraint <- (CONSTRAINT name)?
    ///     (PRIMARY KEY '(' indexed_column_list ')' conflict_clause
    ///      / UNIQUE '(' indexed_column_list ')' conflict_clause
    ///      / CHECK '(' expression ')'
    ///      / FOREIGN KEY name_list foreign_key_clause)
    fn table_constraint(&mut self) -> PResult<TableConstraint> {
        self.rule(RuleId::TableConstraint, |p| {
            let start = p.start();
            let name = if p.eat_keyword(Keyword::Constraint) {
                Some(p.name("constraint name")?)
            } else {
                None
            };

            let kind = if p.eat_keyword(Keyword::Primary) {
                p.keyword(Keyword::Key)?;
                let columns = p.paren_list(Self::indexed_column)?;
                p.eat_keyword(Keyword::Autoincrement);
                TableConstraintKind::PrimaryKey {
                    columns,
                    on_conflict: p.on_conflict_resolution()?,
                }
            } else if p.eat_keyword(Keyword::Unique) {
                let columns = p.paren_list(Self::indexed_column)?;
                TableConstraintKind::Unique {
                    columns,
                    on_conflict: p.on_conflict_resolution()?,
                }
            } else if p.eat_keyword(Keyword::Check) {
                TableConstraintKind::Check {
                    expr: p.parenthesized_expression()?,
                }
            } else {
                p.keyword(Keyword::Foreign)?;
                p.keyword(Keyword::Key)?;
                let columns = p.name_list("column name")?;
                let clause = p.foreign_key_clause()?;
                TableConstraintKind::ForeignKey { columns, clause }
            };

            Ok(TableConstraint {
                name,
                kind,
                span: p.span_from(start),
            })
        })
    }

    /// foreign_key_clause <- REFERENCES name name_list?
    ///     (ON (DELETE / UPDATE) action / MATCH name)*
    ///     (NOT? DEFERRABLE (INITIALLY (DEFERRED / IMMEDIATE))?)?
    fn foreign_key_clause(&mut self) -> PResult<ForeignKeyClause> {
        self.rule(RuleId::ForeignKeyClause, |p| {
            let start = p.start();
            p.keyword(Keyword::References)?;
            let table = p.name("table name")?;
            let columns = if p.check(&TokenKind::LeftParen) {
                p.name_list("column name")?
            } else {
                Vec::new()
            };

            let mut on_delete = None;
            let mut on_update = None;
            let mut match_name = None;
            loop {
                if p.eat_keyword(Keyword::On) {
                    if p.eat_keyword(Keyword::Delete) {
                        on_delete = Some(p.referential_action()?);
                    } else {
                        p.keyword(Keyword::Update)?;
                        on_update = Some(p.referential_action()?);
                    }
                } else if p.eat_keyword(Keyword::Match) {
                    match_name = Some(p.name("match name")?);
                } else {
                    break;
                }
            }

            let not_deferrable =
                p.check_keyword(Keyword::Not) && p.check_keyword_at(1, Keyword::Deferrable);
            let deferred = if not_deferrable || p.check_keyword(Keyword::Deferrable) {
                if not_deferrable {
                    p.bump();
                }
                p.bump();
                let initially_deferred = if p.eat_keyword(Keyword::Initially) {
                    if p.eat_keyword(Keyword::Deferred) {
                        true
                    } else {
                        p.keyword(Keyword::Immediate)?;
                        false
                    }
                } else {
                    false
                };
                Some(initially_deferred && !not_deferrable)
            } else {
                None
            };

            Ok(ForeignKeyClause {
                table,
                columns,
                on_delete,
                on_update,
                match_name,
                deferred,
                span: p.span_from(start),
            })
        })
    }

    /// SET NULL / SET DEFAULT / CASCADE / RESTRICT / NO ACTION
    fn referential_action(&mut self) -> PResult<ReferentialAction> {
        if self.eat_keyword(Keyword::Set) {
            if self.eat_keyword(Keyword::Null) {
                return Ok(ReferentialAction::SetNull);
            }
            self.keyword(Keyword::Default)?;
            return Ok(ReferentialAction::SetDefault);
        }
        if self.eat_keyword(Keyword::Cascade) {
            return Ok(ReferentialAction::Cascade);
        }
        if self.eat_keyword(Keyword::Restrict) {
            return Ok(ReferentialAction::Restrict);
        }
        self.keyword(Keyword::No)?;
        self.keyword(Keyword::Action)?;
        Ok(ReferentialAction::NoAction)
    }

    /// indexed_column <- expression (ASC / DESC)?
    pub(crate) fn indexed_column(&mut self) -> PResult<IndexedColumn> {
        let start = self.start();
        let expr = self.expression()?;
        let direction = self.direction();
        Ok(IndexedColumn {
            expr,
            direction,
            span: self.span_from(start),
        })
    }

    /// create_index <- CREATE UNIQUE? INDEX if_not_exists? qualified_name
    ///                 ON name '(' indexed_column_list ')' where_clause?
    pub(crate) fn create_index(&mut self) -> PResult<CreateIndexStatement> {
        self.rule(RuleId::CreateIndex, |p| {
            let start = p.start();
            p.keyword(Keyword::Create)?;
            let unique = p.eat_keyword(Keyword::Unique);
            p.keyword(Keyword::Index)?;
            let if_not_exists = p.if_not_exists();
            let name = p.qualified_name("index name")?;
            p.keyword(Keyword::On)?;
            let table = p.name("table name")?;
            let columns = p.paren_list(Self::indexed_column)?;
            let where_clause = p.clause_if(Keyword::Where, Self::where_clause)?;
            Ok(CreateIndexStatement {
                unique,
                if_not_exists,
                name,
                table,
                columns,
                where_clause,
                span: p.span_from(start),
            })
        })
    }

    /// create_view <- CREATE (TEMP / TEMPORARY)? VIEW if_not_exists? qualified_name
    ///                name_list? AS select
    pub(crate) fn create_view(&mut self) -> PResult<CreateViewStatement> {
        self.rule(RuleId::CreateView, |p| {
            let start = p.start();
            p.keyword(Keyword::Create)?;
            let temporary = p.temporary();
            p.keyword(Keyword::View)?;
            let if_not_exists = p.if_not_exists();
            let name = p.qualified_name("view name")?;
            let columns = if p.check(&TokenKind::LeftParen) {
                p.name_list("column name")?
            } else {
                Vec::new()
            };
            p.keyword(Keyword::As)?;
            let query = Box::new(p.select()?);
            Ok(CreateViewStatement {
                temporary,
                if_not_exists,
                name,
                columns,
                query,
                span: p.span_from(start),
            })
        })
    }

    /// create_trigger <- CREATE (TEMP / TEMPORARY)? TRIGGER if_not_exists? qualified_name
    ///     (BEFORE / AFTER / INSTEAD OF)? (DELETE / INSERT / UPDATE (OF name_list)?)
    ///     ON name (FOR EACH ROW)? (WHEN expression)? BEGIN (statement ';')+ END
    pub(crate) fn create_trigger(&mut self) -> PResult<CreateTriggerStatement> {
        self.rule(RuleId::CreateTrigger, |p| {
            let start = p.start();
            p.keyword(Keyword::Create)?;
            let temporary = p.temporary();
            p.keyword(Keyword::Trigger)?;
            let if_not_exists = p.if_not_exists();
            let name = p.qualified_name("trigger name")?;

            let timing = if p.eat_keyword(Keyword::Before) {
                Some(TriggerTiming::Before)
            } else if p.eat_keyword(Keyword::After) {
                Some(TriggerTiming::After)
            } else if p.eat_keyword(Keyword::Instead) {
                p.keyword(Keyword::Of)?;
                Some(TriggerTiming::InsteadOf)
            } else {
                None
            };

            let event = match p.one_of(&[Keyword::Delete, Keyword::Insert, Keyword::Update])? {
                Keyword::Delete => TriggerEvent::Delete,
                Keyword::Insert => TriggerEvent::Insert,
                _ => {
                    let columns = if p.eat_keyword(Keyword::Of) {
                        p.comma_list(|p| p.name("column name"))?
                    } else {
                        Vec::new()
                    };
                    TriggerEvent::Update { columns }
                }
            };

            p.keyword(Keyword::On)?;
            let table = p.name("table name")?;
            let for_each_row = p
                .optional(|p| {
                    p.keyword(Keyword::For)?;
                    p.keyword(Keyword::Each)?;
                    p.keyword(Keyword::Row)
                })
                .is_some();
            let when = if p.eat_keyword(Keyword::When) {
                Some(p.expression()?)
            } else {
                None
            };

            p.keyword(Keyword::Begin)?;
            let mut body = Vec::new();
            loop {
                let mut statement = p.statement()?;
                let semicolon = p.punct(&TokenKind::Semicolon)?;
                statement.extend_to(semicolon.end);
                body.push(statement);
                if p.eat_keyword(Keyword::End) {
                    break;
                }
            }

            Ok(CreateTriggerStatement {
                temporary,
                if_not_exists,
                name,
                timing,
                event,
                table,
                for_each_row,
                when,
                body,
                span: p.span_from(start),
            })
        })
    }

    /// create_virtual_table <- CREATE VIRTUAL TABLE if_not_exists? qualified_name
    ///                         USING name ('(' module_argument (',' module_argument)* ')')?
    pub(crate) fn create_virtual_table(&mut self) -> PResult<CreateVirtualTableStatement> {
        self.rule(RuleId::CreateVirtualTable, |p| {
            let start = p.start();
            p.keyword(Keyword::Create)?;
            p.keyword(Keyword::Virtual)?;
            p.keyword(Keyword::Table)?;
            let if_not_exists = p.if_not_exists();
            let name = p.qualified_name("table name")?;
            p.keyword(Keyword::Using)?;
            let module = p.name("module name")?;
            let args = if p.eat(&TokenKind::LeftParen) {
                p.module_arguments()?
            } else {
                Vec::new()
            };
            Ok(CreateVirtualTableStatement {
                if_not_exists,
                name,
                module,
                args,
                span: p.span_from(start),
            })
        })
    }

    /// Module arguments are kept as raw source text, split on top-level commas.
    /// Consumes the closing parenthesis.
    fn module_arguments(&mut self) -> PResult<Vec<String>> {
        let mut args = Vec::new();
        let mut current: Option<Span> = None;
        let mut depth = 0_usize;
        loop {
            match self.peek() {
                TokenKind::Eof => return self.fail(Expected::Token(TokenKind::RightParen.describe())),
                TokenKind::RightParen if depth == 0 => break,
                TokenKind::Comma if depth == 0 => {
                    if let Some(span) = current.take() {
                        args.push(String::from(self.text(span)));
                    }
                    self.bump();
                    continue;
                }
                TokenKind::LeftParen => depth += 1,
                TokenKind::RightParen => depth -= 1,
                _ => {}
            }
            let span = self.bump();
            current = Some(current.map_or(span, |arg| arg.merge(span)));
        }
        if let Some(span) = current {
            args.push(String::from(self.text(span)));
        }
        self.punct(&TokenKind::RightParen)?;
        Ok(args)
    }

    /// alter_table <- ALTER TABLE qualified_name
    ///     (RENAME TO name / RENAME COLUMN? name TO name
    ///      / ADD COLUMN? column_definition / DROP COLUMN? name)
    pub(crate) fn alter_table(&mut self) -> PResult<AlterTableStatement> {
        self.rule(RuleId::AlterTable, |p| {
            let start = p.start();
            p.keyword(Keyword::Alter)?;
            p.keyword(Keyword::Table)?;
            let table = p.qualified_name("table name")?;

            let action = if p.eat_keyword(Keyword::Rename) {
                if p.eat_keyword(Keyword::To) {
                    AlterTableAction::RenameTable {
                        to: p.name("table name")?,
                    }
                } else {
                    p.eat_keyword(Keyword::Column);
                    let from = p.name("column name")?;
                    p.keyword(Keyword::To)?;
                    let to = p.name("column name")?;
                    AlterTableAction::RenameColumn { from, to }
                }
            } else if p.eat_keyword(Keyword::Add) {
                p.eat_keyword(Keyword::Column);
                AlterTableAction::AddColumn {
                    column: p.column_definition()?,
                }
            } else {
                p.keyword(Keyword::Drop)?;
                p.eat_keyword(Keyword::Column);
                AlterTableAction::DropColumn {
                    name: p.name("column name")?,
                }
            };

            Ok(AlterTableStatement {
                table,
                action,
                span: p.span_from(start),
            })
        })
    }

    /// drop <- DROP (TABLE / INDEX / VIEW / TRIGGER) if_exists? qualified_name
    pub(crate) fn drop_statement(&mut self) -> PResult<DropStatement> {
        self.rule(RuleId::Drop, |p| {
            let start = p.start();
            p.keyword(Keyword::Drop)?;
            let object = match p.one_of(&[
                Keyword::Table,
                Keyword::Index,
                Keyword::View,
                Keyword::Trigger,
            ])? {
                Keyword::Table => DropObject::Table,
                Keyword::Index => DropObject::Index,
                Keyword::View => DropObject::View,
                _ => DropObject::Trigger,
            };
            let if_exists = p.if_exists();
            let name = p.qualified_name("object name")?;
            Ok(DropStatement {
                object,
                if_exists,
                name,
                span: p.span_from(start),
            })
        })
    }
}

#[cfg(test)]
mod tests {
    use crate::ast::{
        AlterTableAction, ColumnConstraintKind, ReferentialAction, Statement, TableConstraintKind,
        TableDefinition, TriggerEvent, TriggerTiming,
    };
    use crate::options::ParseOptions;
    use crate::parser::Parser;

    fn statement(sql: &str) -> Statement {
        Parser::new(sql, &ParseOptions::default())
            .parse_statement()
            .unwrap_or_else(|failure| panic!("{sql}: {failure:?}"))
    }

    #[test]
    fn test_create_table_columns_and_constraints() {
        let Statement::CreateTable(create) = statement(
            "CREATE TABLE IF NOT EXISTS users (\
             id INTEGER PRIMARY KEY AUTOINCREMENT, \
             email VARCHAR(255) NOT NULL UNIQUE, \
             org_id INTEGER REFERENCES orgs(id) ON DELETE CASCADE, \
             created TEXT DEFAULT CURRENT_TIMESTAMP, \
             CONSTRAINT pair UNIQUE (email, org_id), \
             CHECK (length(email) > 3)\
             ) WITHOUT ROWID, STRICT",
        ) else {
            panic!("expected CREATE TABLE");
        };
        assert!(create.if_not_exists);
        let TableDefinition::Columns {
            columns,
            constraints,
            without_rowid,
            strict,
        } = create.definition
        else {
            panic!("expected column definitions");
        };
        assert_eq!(columns.len(), 4);
        assert!(columns[0].is_primary_key());
        assert!(columns[1].is_not_null());
        assert_eq!(
            columns[1].type_name.as_ref().map(|t| t.name.as_str()),
            Some("VARCHAR")
        );
        let ColumnConstraintKind::References(fk) = &columns[2].constraints[0].kind else {
            panic!("expected REFERENCES");
        };
        assert_eq!(fk.on_delete, Some(ReferentialAction::Cascade));
        assert_eq!(constraints.len(), 2);
        assert_eq!(constraints[0].name.as_deref(), Some("pair"));
        assert!(matches!(constraints[1].kind, TableConstraintKind::Check { .. }));
        assert!(without_rowid);
        assert!(strict);
    }

    #[test]
    fn test_generated_column() {
        let Statement::CreateTable(create) =
            statement("CREATE TABLE t (a INT, b INT GENERATED ALWAYS AS (a * 2) STORED)")
        else {
            panic!("expected CREATE TABLE");
        };
        let TableDefinition::Columns { columns, .. } = create.definition else {
            panic!("expected column definitions");
        };
        assert!(matches!(
            columns[1].constraints[0].kind,
            ColumnConstraintKind::Generated { stored: true, .. }
        ));
    }

    #[test]
    fn test_deferrable_foreign_key() {
        let Statement::CreateTable(create) = statement(
            "CREATE TABLE t (a INT, FOREIGN KEY (a) REFERENCES p (id) \
             DEFERRABLE INITIALLY DEFERRED)",
        ) else {
            panic!("expected CREATE TABLE");
        };
        let TableDefinition::Columns { constraints, .. } = create.definition else {
            panic!("expected column definitions");
        };
        let TableConstraintKind::ForeignKey { clause, .. } = &constraints[0].kind else {
            panic!("expected FOREIGN KEY");
        };
        assert_eq!(clause.deferred, Some(true));
    }

    #[test]
    fn test_trigger_body() {
        let Statement::CreateTrigger(trigger) = statement(
            "CREATE TRIGGER audit AFTER UPDATE OF email ON users FOR EACH ROW \
             WHEN new.email IS NOT old.email BEGIN \
             INSERT INTO log VALUES (new.id); \
             SELECT RAISE(ABORT, 'nope'); \
             END",
        ) else {
            panic!("expected CREATE TRIGGER");
        };
        assert_eq!(trigger.timing, Some(TriggerTiming::After));
        assert_eq!(
            trigger.event,
            TriggerEvent::Update {
                columns: vec![String::from("email")]
            }
        );
        assert!(trigger.for_each_row);
        assert!(trigger.when.is_some());
        assert_eq!(trigger.body.len(), 2);
    }

    #[test]
    fn test_virtual_table_arguments() {
        let Statement::CreateVirtualTable(vt) =
            statement("CREATE VIRTUAL TABLE docs USING fts5(title, body, tokenize = 'porter ascii')")
        else {
            panic!("expected CREATE VIRTUAL TABLE");
        };
        assert_eq!(vt.module, "fts5");
        assert_eq!(vt.args, vec!["title", "body", "tokenize = 'porter ascii'"]);
    }

    #[test]
    fn test_alter_table_actions() {
        let Statement::AlterTable(alter) = statement("ALTER TABLE t RENAME COLUMN a TO b") else {
            panic!("expected ALTER TABLE");
        };
        assert_eq!(
            alter.action,
            AlterTableAction::RenameColumn {
                from: String::from("a"),
                to: String::from("b")
            }
        );
        let Statement::AlterTable(alter) = statement("ALTER TABLE t ADD COLUMN c TEXT NOT NULL")
        else {
            panic!("expected ALTER TABLE");
        };
        assert!(matches!(alter.action, AlterTableAction::AddColumn { .. }));
    }

    #[test]
    fn test_drop_if_exists() {
        let Statement::Drop(drop) = statement("DROP VIEW IF EXISTS main.v") else {
            panic!("expected DROP");
        };
        assert!(drop.if_exists);
        assert_eq!(drop.name.to_string(), "main.v");
    }
}
