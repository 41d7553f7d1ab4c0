#![allow(dead_code)]

use oxide_sqlite_parser::ast::{
    CreateTableStatement, DeleteStatement, InsertStatement, SelectStatement, UpdateStatement,
};
use oxide_sqlite_parser::{
    create_parser_with, parse, ParseOptions, Program, Statement, StreamEvent, SyntaxError,
};

pub fn parse_program(sql: &str) -> Program {
    parse(sql, &ParseOptions::default())
        .unwrap_or_else(|e| panic!("Failed to parse: {sql}\nError: {}", e.message))
}

pub fn parse_err(sql: &str) -> SyntaxError {
    match parse(sql, &ParseOptions::default()) {
        Ok(program) => panic!("Expected parse error for: {sql}\nGot: {program:?}"),
        Err(e) => e,
    }
}

pub fn parse_one(sql: &str) -> Statement {
    let mut program = parse_program(sql);
    assert_eq!(
        program.statements.len(),
        1,
        "Expected one statement in: {sql}"
    );
    program.statements.remove(0)
}

pub fn parse_select(sql: &str) -> SelectStatement {
    match parse_one(sql) {
        Statement::Select(s) => s,
        other => panic!("Expected SELECT, got {other:?}"),
    }
}

pub fn parse_insert(sql: &str) -> InsertStatement {
    match parse_one(sql) {
        Statement::Insert(i) => i,
        other => panic!("Expected INSERT, got {other:?}"),
    }
}

pub fn parse_update(sql: &str) -> UpdateStatement {
    match parse_one(sql) {
        Statement::Update(u) => u,
        other => panic!("Expected UPDATE, got {other:?}"),
    }
}

pub fn parse_delete(sql: &str) -> DeleteStatement {
    match parse_one(sql) {
        Statement::Delete(d) => d,
        other => panic!("Expected DELETE, got {other:?}"),
    }
}

pub fn parse_create_table(sql: &str) -> CreateTableStatement {
    match parse_one(sql) {
        Statement::CreateTable(c) => c,
        other => panic!("Expected CREATE TABLE, got {other:?}"),
    }
}

/// Writes `chunks` to a fresh transform, ends it, and returns every event.
pub fn stream_chunks(chunks: &[&str]) -> Vec<StreamEvent> {
    let mut transform = create_parser_with(ParseOptions::default());
    let mut events = Vec::new();
    for chunk in chunks {
        if transform.write(chunk).is_err() {
            events.extend(transform.events());
            return events;
        }
        events.extend(transform.events());
    }
    let _ = transform.end();
    events.extend(transform.events());
    events
}

/// The statements among `events`.
pub fn statements(events: &[StreamEvent]) -> Vec<Statement> {
    events
        .iter()
        .filter_map(|event| match event {
            StreamEvent::Statement(s) => Some(s.clone()),
            _ => None,
        })
        .collect()
}

/// A batch of valid statements covering every statement kind.
pub const CORPUS: &[&str] = &[
    "SELECT 1",
    "SELECT DISTINCT a, b AS c FROM t WHERE a > 1 ORDER BY b DESC LIMIT 10 OFFSET 5",
    "WITH RECURSIVE cnt(x) AS (SELECT 1 UNION ALL SELECT x + 1 FROM cnt WHERE x < 10) SELECT x FROM cnt",
    "SELECT u.name, count(*) FROM users u LEFT JOIN orders o ON o.user_id = u.id GROUP BY u.name HAVING count(*) > 2",
    "SELECT * FROM a NATURAL JOIN b CROSS JOIN (SELECT 1) AS s",
    "VALUES (1, 'a'), (2, 'b')",
    "SELECT CASE WHEN x IS NULL THEN 0 ELSE x END FROM t",
    "SELECT rank() OVER (PARTITION BY g ORDER BY v ROWS UNBOUNDED PRECEDING) FROM t",
    "INSERT INTO t (a, b) VALUES (1, 2)",
    "INSERT OR REPLACE INTO t SELECT * FROM s",
    "INSERT INTO kv(k, v) VALUES ('a', 1) ON CONFLICT(k) DO UPDATE SET v = excluded.v",
    "UPDATE t SET a = a + 1 WHERE id IN (1, 2, 3) RETURNING *",
    "DELETE FROM t WHERE created < date('now', '-1 day')",
    "CREATE TABLE IF NOT EXISTS users (id INTEGER PRIMARY KEY AUTOINCREMENT, email TEXT NOT NULL UNIQUE, age INT CHECK (age >= 0) DEFAULT 0)",
    "CREATE TABLE m (a, b, PRIMARY KEY (a, b), FOREIGN KEY (b) REFERENCES other(id) ON DELETE CASCADE) WITHOUT ROWID",
    "CREATE UNIQUE INDEX idx_users_email ON users (email COLLATE NOCASE) WHERE email IS NOT NULL",
    "CREATE VIEW v AS SELECT a FROM t",
    "CREATE TRIGGER trg AFTER INSERT ON t BEGIN UPDATE c SET n = n + 1; END",
    "CREATE VIRTUAL TABLE docs USING fts5(title, body)",
    "ALTER TABLE t ADD COLUMN c TEXT",
    "ALTER TABLE t RENAME TO u",
    "DROP TABLE IF EXISTS t",
    "PRAGMA foreign_keys = ON",
    "BEGIN IMMEDIATE",
    "COMMIT",
    "ATTACH DATABASE 'x.db' AS x",
    "DETACH x",
    "VACUUM",
    "ANALYZE main",
    "REINDEX t",
    "EXPLAIN QUERY PLAN SELECT * FROM t WHERE a = ?1",
];

/// Joins `statements` into one `;`-terminated document.
pub fn document(statements: &[&str]) -> String {
    statements
        .iter()
        .map(|s| format!("{s};"))
        .collect::<Vec<_>>()
        .join("\n")
}
