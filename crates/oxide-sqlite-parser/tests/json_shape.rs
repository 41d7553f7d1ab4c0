//! Tests for the serialized shape of nodes and errors.

mod common;
use common::*;

use serde_json::{json, Value};

#[test]
fn statement_node_shape() {
    let program = parse_program("SELECT 1;");
    let value = serde_json::to_value(&program.statements[0]).unwrap();
    assert_eq!(value["type"], "select");
    assert_eq!(value["start"], json!({ "offset": 0, "line": 1, "column": 1 }));
    assert_eq!(value["end"], json!({ "offset": 9, "line": 1, "column": 10 }));
    assert_eq!(value["core"]["type"], "select-core");
}

#[test]
fn transaction_statements_share_one_tag() {
    let program = parse_program("BEGIN; SAVEPOINT a; RELEASE a; COMMIT;");
    for statement in &program.statements {
        let value = serde_json::to_value(statement).unwrap();
        assert_eq!(value["type"], "transaction-control");
        assert_eq!(value["type"], statement.kind());
    }
}

#[test]
fn expression_node_shape() {
    let program = parse_program("SELECT a + 1 FROM t");
    let value = serde_json::to_value(&program).unwrap();
    let expr = &value["statements"][0]["core"]["columns"][0]["expr"];
    assert_eq!(expr["type"], "binary");
    assert_eq!(expr["op"], "add");
    assert_eq!(expr["left"]["type"], "column");
    assert_eq!(expr["left"]["name"], "a");
    assert_eq!(expr["right"]["type"], "literal");
    assert_eq!(expr["right"]["variant"], "integer");
    assert_eq!(expr["right"]["value"], 1);
    assert_eq!(expr["start"]["offset"], 7);
    assert_eq!(expr["end"]["offset"], 12);
}

#[test]
fn every_statement_has_a_type_and_span() {
    let program = parse_program(&document(CORPUS));
    let value = serde_json::to_value(&program).unwrap();
    let Value::Array(statements) = &value["statements"] else {
        panic!("Expected statements array");
    };
    for (statement, sql) in statements.iter().zip(CORPUS) {
        assert!(statement["type"].is_string(), "{sql}");
        assert!(statement["start"]["offset"].is_u64(), "{sql}");
        assert!(statement["end"]["offset"].is_u64(), "{sql}");
    }
}

#[test]
fn syntax_error_shape() {
    let error = parse_err("SELECT FROM;");
    let value = serde_json::to_value(&error).unwrap();
    assert_eq!(value["name"], "SyntaxError");
    assert_eq!(value["location"], json!({ "offset": 7, "line": 1, "column": 8 }));
    assert_eq!(value["found"], "FROM");
    assert_eq!(value["rule"], "SELECT statement");
    assert!(value["message"].as_str().unwrap().contains("near 'FROM'"));
    assert!(value["expected"]
        .as_array()
        .unwrap()
        .contains(&json!("expression")));
    assert_eq!(value["excerpt"], "1 | SELECT FROM;\n           ^");
}

#[test]
fn end_of_input_error_has_null_found() {
    let value = serde_json::to_value(parse_err("SELECT")).unwrap();
    assert_eq!(value["found"], Value::Null);
}
