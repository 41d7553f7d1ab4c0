//! Tests for syntax error reporting.

mod common;
use common::*;

use oxide_sqlite_parser::{create_parser, parse, Error, ErrorKind, ParseOptions};

#[test]
fn error_at_end_of_input() {
    let e = parse_err("SELECT * FROM t WHERE");
    assert_eq!(e.kind(), ErrorKind::Syntax);
    assert_eq!(e.found, None);
    assert_eq!(e.location.offset, 21);
    assert!(e.message.contains("near end of input"));
    assert_eq!(e.rule.as_deref(), Some("WHERE clause"));
}

#[test]
fn error_on_second_line() {
    let e = parse_err("SELECT 1;\nSELECT * FROM WHERE;");
    assert_eq!(e.location.line, 2);
    assert_eq!(e.location.column, 15);
    assert_eq!(e.location.offset, 24);
    assert_eq!(e.rule.as_deref(), Some("FROM clause"));
    assert_eq!(
        e.excerpt,
        format!("2 | SELECT * FROM WHERE;\n{}^", " ".repeat(18))
    );
}

#[test]
fn trailing_garbage_after_statements() {
    let e = parse_err("SELECT 1; garbage");
    assert_eq!(e.kind(), ErrorKind::TrailingInput);
    assert_eq!(e.name(), "TrailingInput");
    assert_eq!(e.found.as_deref(), Some("garbage"));
}

#[test]
fn missing_separator_between_statements() {
    let e = parse_err("SELECT 1 SELECT 2");
    assert_eq!(e.kind(), ErrorKind::TrailingInput);
    assert_eq!(e.location.offset, 9);
    assert!(e.expected.iter().any(|x| x == "';'"));
}

#[test]
fn unterminated_string() {
    let e = parse_err("SELECT 'abc");
    assert_eq!(e.kind(), ErrorKind::Syntax);
    assert_eq!(e.location.offset, 7);
}

#[test]
fn reserved_word_as_table_name() {
    let e = parse_err("CREATE TABLE select (a)");
    assert_eq!(e.location.offset, 13);
    assert!(e.expected.iter().any(|x| x == "table name"));
}

#[test]
fn unknown_statement_keyword() {
    let e = parse_err("SELEC 1");
    assert_eq!(e.location.offset, 0);
    assert_eq!(e.rule, None);
    assert_eq!(e.expected[0], "statement");
}

#[test]
fn streaming_parse_of_truncated_input() {
    let options = ParseOptions::default().streaming(true);
    for sql in ["SELECT", "SELECT 1", "SELECT 'abc", "SELECT * FROM t WHERE a ="] {
        let e = parse(sql, &options).unwrap_err();
        assert!(e.is_incomplete(), "{sql}: {e:?}");
        assert_eq!(e.name(), "Incomplete");
    }
}

#[test]
fn streaming_parse_of_broken_input() {
    let options = ParseOptions::default().streaming(true);
    let e = parse("SELECT FROM t;", &options).unwrap_err();
    assert_eq!(e.kind(), ErrorKind::Syntax);
}

#[test]
fn message_lists_alternatives() {
    let e = parse_err("DROP t");
    assert_eq!(e.rule.as_deref(), Some("DROP statement"));
    assert!(e.message.contains(", or "), "{}", e.message);
}

/// Runs `f` with the stack size of a typical main thread.
fn on_main_sized_stack(f: impl FnOnce() + Send + 'static) {
    std::thread::Builder::new()
        .stack_size(8 * 1024 * 1024)
        .spawn(f)
        .unwrap()
        .join()
        .unwrap();
}

fn nested(depth: usize) -> String {
    format!("SELECT {}1{};", "(".repeat(depth), ")".repeat(depth))
}

#[test]
fn deep_nesting_is_a_syntax_error() {
    on_main_sized_stack(|| {
        let e = parse_err(&nested(300));
        assert_eq!(e.kind(), ErrorKind::Syntax);
        assert!(e.message.contains("nested too deeply"), "{}", e.message);
        assert_eq!(e.found.as_deref(), Some("("));

        let program = parse_program(&nested(40));
        assert_eq!(program.statements.len(), 1);
    });
}

#[test]
fn deep_nesting_limit_is_configurable() {
    on_main_sized_stack(|| {
        let shallow = ParseOptions::default().max_depth(20);
        let e = parse(&nested(10), &shallow).unwrap_err();
        assert!(e.message.contains("nested too deeply"), "{}", e.message);
        assert!(parse(&nested(2), &shallow).is_ok());
    });
}

#[test]
fn deep_nesting_fails_a_stream() {
    on_main_sized_stack(|| {
        let mut transform = create_parser();
        let sql = nested(300);
        let (head, tail) = sql.split_at(150);
        assert_eq!(transform.write(head).unwrap(), 0);
        let Err(Error::Syntax(e)) = transform.write(tail) else {
            panic!("expected syntax error");
        };
        assert!(!e.is_incomplete());
        assert!(e.message.contains("nested too deeply"), "{}", e.message);
    });
}

#[test]
fn leading_separators_do_not_hide_statement_expectation() {
    let e = parse_err(";; SELEC 1");
    assert_eq!(e.location.offset, 3);
    assert_eq!(e.expected[0], "statement");
    assert!(!e.expected.iter().any(|x| x == "';'"), "{:?}", e.expected);
}
