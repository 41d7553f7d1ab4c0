//! Rule entry/exit recording for diagnostics.
//!
//! The parser pushes a [`Frame`] when it enters a rule and pops it when the
//! rule returns, whatever the outcome. The stack is only read to build error
//! messages; running without a tracer gives the same parse results.

use tracing::trace;

use crate::lexer::Position;
use crate::parser::RuleId;

/// An active rule invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Frame {
    /// The rule being parsed.
    pub rule: RuleId,
    /// Where the attempt started.
    pub offset: Position,
}

/// How a rule attempt ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Matched,
    Failed,
}

impl Outcome {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Matched => "matched",
            Self::Failed => "failed",
        }
    }
}

/// Balanced stack of rule frames.
#[derive(Debug, Default, Clone)]
pub struct Tracer {
    frames: Vec<Frame>,
}

impl Tracer {
    /// Creates an empty tracer.
    #[must_use]
    pub const fn new() -> Self {
        Self { frames: Vec::new() }
    }

    /// Records entry into `rule` at `offset`.
    pub fn enter(&mut self, rule: RuleId, offset: Position) {
        trace!(
            rule = rule.name(),
            offset = offset.offset,
            depth = self.frames.len(),
            "enter"
        );
        self.frames.push(Frame { rule, offset });
    }

    /// Records the exit of `rule`, which must be the innermost active frame.
    pub fn exit(&mut self, rule: RuleId, outcome: Outcome) {
        let frame = self.frames.pop();
        debug_assert_eq!(frame.map(|f| f.rule), Some(rule), "unbalanced trace");
        trace!(
            rule = rule.name(),
            outcome = outcome.as_str(),
            depth = self.frames.len(),
            "exit"
        );
    }

    /// Returns the active frames, innermost last.
    #[must_use]
    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    /// Returns the number of active frames.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.frames.len()
    }
}
