//! Collects streamed statements back into a single [`Program`].

use tracing::debug;

use crate::ast::{Program, Statement};
use crate::lexer::Position;
use crate::parser::SyntaxError;
use crate::stream::{ParserTransform, StreamEvent};

/// Why a [`Stitcher`] could not produce a program.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum StitchError {
    /// The stream emitted an error. `statements` holds what arrived before it.
    #[error("{error}")]
    Failed {
        statements: Vec<Statement>,
        error: SyntaxError,
    },

    /// The stream never reported that it ended.
    #[error("stream ended without closing after {} statements", statements.len())]
    Unfinished { statements: Vec<Statement> },
}

impl StitchError {
    /// Returns the statements received before the stream stopped.
    #[must_use]
    pub fn statements(&self) -> &[Statement] {
        match self {
            Self::Failed { statements, .. } | Self::Unfinished { statements } => statements,
        }
    }
}

/// Accumulates [`StreamEvent`]s in arrival order.
///
/// ```
/// use oxide_sqlite_parser::{create_parser, create_stitcher};
///
/// let mut transform = create_parser();
/// let mut stitcher = create_stitcher();
/// transform.write("SELECT 1; SELECT").unwrap();
/// transform.write(" 2").unwrap();
/// transform.end().unwrap();
/// stitcher.consume(&mut transform);
/// assert_eq!(stitcher.finish().unwrap().statements.len(), 2);
/// ```
#[derive(Debug, Default)]
pub struct Stitcher {
    statements: Vec<Statement>,
    error: Option<SyntaxError>,
    closed: bool,
}

impl Stitcher {
    /// Creates an empty stitcher.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one event. Events after the first error or close are ignored.
    pub fn feed(&mut self, event: StreamEvent) {
        if self.is_finished() {
            return;
        }
        match event {
            StreamEvent::Statement(statement) => self.statements.push(statement),
            StreamEvent::Error(error) => self.error = Some(error),
            StreamEvent::Closed => self.closed = true,
        }
    }

    /// Drains and records every pending event of `transform`.
    pub fn consume(&mut self, transform: &mut ParserTransform) {
        for event in transform.events() {
            self.feed(event);
        }
    }

    /// Statements received so far.
    #[must_use]
    pub fn statements(&self) -> &[Statement] {
        &self.statements
    }

    /// Returns true once an error or close has been seen.
    #[must_use]
    pub const fn is_finished(&self) -> bool {
        self.closed || self.error.is_some()
    }

    /// Builds the program.
    ///
    /// # Errors
    ///
    /// Returns [`StitchError::Failed`] if the stream errored and
    /// [`StitchError::Unfinished`] if it never closed.
    pub fn finish(self) -> Result<Program, StitchError> {
        debug!(
            statements = self.statements.len(),
            closed = self.closed,
            failed = self.error.is_some(),
            "stitching program"
        );
        match self.error {
            Some(error) => Err(StitchError::Failed {
                statements: self.statements,
                error,
            }),
            None if self.closed => Ok(Program::new(self.statements, Position::START)),
            None => Err(StitchError::Unfinished {
                statements: self.statements,
            }),
        }
    }
}
