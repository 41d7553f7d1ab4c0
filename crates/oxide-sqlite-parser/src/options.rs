//! Parser configuration.

use serde::{Deserialize, Serialize};

/// Options shared by [`parse`](crate::parse) and the streaming transform.
///
/// Missing fields take their defaults when deserialized, so `{}` is a valid
/// configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ParseOptions {
    /// Parse one `;`-terminated statement at a time, reporting a cut-off
    /// statement as incomplete rather than as a syntax error.
    pub streaming: bool,
    /// Record rule frames so errors can name the construct they occurred in.
    pub trace: bool,
    /// Cache results of the hot rules by token position.
    pub memoize: bool,
    /// How many grammar rules may be active at once. Each level of
    /// parentheses costs two, so the default allows about fifty. Deeper input
    /// is a syntax error instead of a stack overflow.
    pub max_depth: usize,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            streaming: false,
            trace: true,
            memoize: true,
            max_depth: 100,
        }
    }
}

impl ParseOptions {
    /// Sets streaming mode.
    #[must_use]
    pub const fn streaming(mut self, streaming: bool) -> Self {
        self.streaming = streaming;
        self
    }

    /// Enables or disables rule tracing.
    #[must_use]
    pub const fn trace(mut self, trace: bool) -> Self {
        self.trace = trace;
        self
    }

    /// Enables or disables memoization.
    #[must_use]
    pub const fn memoize(mut self, memoize: bool) -> Self {
        self.memoize = memoize;
        self
    }

    /// Sets the rule nesting limit.
    #[must_use]
    pub const fn max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = ParseOptions::default();
        assert!(!options.streaming);
        assert!(options.trace);
        assert!(options.memoize);
    }

    #[test]
    fn test_builder() {
        let options = ParseOptions::default().streaming(true).memoize(false);
        assert!(options.streaming);
        assert!(options.trace);
        assert!(!options.memoize);
    }

    #[test]
    fn test_deserialize_fills_defaults() {
        let options: ParseOptions =
            serde_json::from_str(r#"{"trace": false, "max_depth": 40}"#).unwrap();
        assert_eq!(options, ParseOptions::default().trace(false).max_depth(40));
    }
}
