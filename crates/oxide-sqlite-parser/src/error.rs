//! Crate-level error type.

use crate::parser::SyntaxError;
use crate::stream::StreamState;

/// Errors returned by the streaming API.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum Error {
    /// The input could not be parsed. The stream is now errored.
    #[error(transparent)]
    Syntax(#[from] SyntaxError),

    /// The stream was used after it errored or closed.
    #[error("cannot {operation} a stream that is {state}")]
    InvalidState {
        operation: &'static str,
        state: StreamState,
    },
}

/// Result type for the streaming API.
pub type Result<T> = std::result::Result<T, Error>;
