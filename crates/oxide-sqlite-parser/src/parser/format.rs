//! Turns a raw [`Failure`] into a readable [`SyntaxError`].

use super::engine::Failure;
use super::error::SyntaxError;
use crate::lexer::Position;

/// Formats `failure`, which was produced by parsing `source` starting at `base`.
#[must_use]
pub fn format(failure: &Failure, source: &str, base: Position) -> SyntaxError {
    let rule = failure
        .frames
        .iter()
        .rev()
        .find_map(|frame| frame.rule.context());
    let expected: Vec<String> = failure
        .expected
        .iter()
        .map(|expected| String::from(expected.describe()))
        .collect();

    let near = failure
        .found
        .as_ref()
        .map_or_else(|| String::from("end of input"), |found| format!("'{found}'"));
    let mut message = format!("Syntax error found near {near}");
    if let Some(context) = rule {
        message.push_str(&format!(" ({context})"));
    }
    if failure.too_deep {
        message.push_str(": nested too deeply");
    } else if !expected.is_empty() {
        message.push_str(": expected ");
        message.push_str(&join_expected(&expected));
    }

    SyntaxError {
        kind: failure.kind,
        message,
        location: failure.location,
        found: failure.found.clone(),
        expected,
        rule: rule.map(String::from),
        excerpt: excerpt(source, base, failure.location),
    }
}

/// Joins alternatives as "a", "a or b" or "a, b, or c".
fn join_expected(items: &[String]) -> String {
    match items {
        [] => String::new(),
        [only] => only.clone(),
        [first, second] => format!("{first} or {second}"),
        [init @ .., last] => format!("{}, or {last}", init.join(", ")),
    }
}

/// The line holding `location`, behind a line-number gutter, with a caret
/// under the location on the next line.
fn excerpt(source: &str, base: Position, location: Position) -> String {
    let mut at = location.offset.saturating_sub(base.offset).min(source.len());
    while !source.is_char_boundary(at) {
        at -= 1;
    }
    let (before, after) = source.split_at(at);
    let line_start = before.rfind('\n').map_or(0, |i| i + 1);
    let line_end = after.find('\n').map_or(source.len(), |i| at + i);
    let line = source[line_start..line_end].trim_end_matches('\r');

    let gutter = format!("{} | ", location.line);
    let column = source[line_start..at].chars().count();
    format!(
        "{gutter}{line}\n{}^",
        " ".repeat(gutter.chars().count() + column)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::Keyword;
    use crate::parser::error::{ErrorKind, Expected};
    use crate::parser::rules::RuleId;
    use crate::trace::Frame;

    fn failure(found: Option<&str>, location: Position, frames: Vec<Frame>) -> Failure {
        Failure {
            kind: ErrorKind::Syntax,
            location,
            found: found.map(String::from),
            expected: vec![
                Expected::Keyword(Keyword::Distinct),
                Expected::Token("'*'"),
                Expected::Label("expression"),
            ],
            frames,
            too_deep: false,
        }
    }

    #[test]
    fn test_join_expected() {
        let items = |xs: &[&str]| xs.iter().map(|x| String::from(*x)).collect::<Vec<_>>();
        assert_eq!(join_expected(&items(&["a"])), "a");
        assert_eq!(join_expected(&items(&["a", "b"])), "a or b");
        assert_eq!(join_expected(&items(&["a", "b", "c"])), "a, b, or c");
    }

    #[test]
    fn test_message_uses_innermost_context() {
        let frames = vec![
            Frame {
                rule: RuleId::Select,
                offset: Position::START,
            },
            Frame {
                rule: RuleId::WhereClause,
                offset: Position::new(16, 1, 17),
            },
            Frame {
                rule: RuleId::Expression,
                offset: Position::new(22, 1, 23),
            },
        ];
        let source = "SELECT * FROM t WHERE ;";
        let failure = failure(Some(";"), Position::new(22, 1, 23), frames);
        let error = format(&failure, source, Position::START);
        assert_eq!(error.rule.as_deref(), Some("WHERE clause"));
        assert_eq!(
            error.message,
            "Syntax error found near ';' (WHERE clause): expected DISTINCT, '*', or expression"
        );
    }

    #[test]
    fn test_message_without_context() {
        let failure = failure(None, Position::new(6, 1, 7), vec![]);
        let error = format(&failure, "SELECT", Position::START);
        assert_eq!(error.rule, None);
        assert!(error.message.starts_with("Syntax error found near end of input: expected"));
    }

    #[test]
    fn test_excerpt_points_at_column() {
        let source = "SELECT 1;\nSELECT FROM t;";
        let failure = failure(Some("FROM"), Position::new(17, 2, 8), vec![]);
        let error = format(&failure, source, Position::START);
        assert_eq!(error.excerpt, "2 | SELECT FROM t;\n           ^");
    }

    #[test]
    fn test_excerpt_in_offset_buffer() {
        // The buffer starts at offset 10 of the document.
        let base = Position::new(10, 2, 1);
        let failure = failure(Some("FROM"), Position::new(17, 2, 8), vec![]);
        let error = format(&failure, "SELECT FROM t;", base);
        assert_eq!(error.excerpt, "2 | SELECT FROM t;\n           ^");
    }

    #[test]
    fn test_nesting_limit_message() {
        let failure = Failure {
            expected: Vec::new(),
            too_deep: true,
            ..failure(Some("("), Position::new(12, 1, 13), vec![])
        };
        let error = format(&failure, "SELECT (((((1)))))", Position::START);
        assert_eq!(error.message, "Syntax error found near '(': nested too deeply");
        assert!(error.expected.is_empty());
    }
}
