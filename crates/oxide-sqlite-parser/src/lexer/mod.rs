//! SQL Lexer/Tokenizer
//!
//! This module provides a hand-written lexer for SQLite that produces a stream of tokens.

mod span;
mod token;
mod tokenizer;

pub use span::{Position, Span};
pub use token::{Keyword, Token, TokenKind};
pub use tokenizer::Lexer;
