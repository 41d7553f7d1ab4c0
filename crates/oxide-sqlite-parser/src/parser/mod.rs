//! SQLite parser
//!
//! A backtracking recursive descent parser over a pre-lexed token buffer,
//! with Pratt parsing for expressions, memoization of the hot rules and
//! furthest-failure error reporting.

mod engine;
mod error;
mod format;
mod grammar;
mod pratt;
mod rules;

pub use engine::{Failure, Parser};
pub use error::{ErrorKind, Expected, Location, SyntaxError};
pub use format::format;
pub use rules::{RuleId, RuleInfo, RULES, RULE_COUNT};
