//! Source locations for assertion diagnostics.
//!
//! Every failure report carries the position of the assertion that produced
//! it. Locations are captured implicitly at each call site through
//! `#[track_caller]`, so test authors never pass file or line by hand.

use std::fmt;

use serde::Serialize;

/// A file/line position, rendered as `file:line` in failure messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SourceLocation {
    pub file: &'static str,
    pub line: u32,
}

impl SourceLocation {
    /// Captures the location of the caller.
    ///
    /// Thanks to `#[track_caller]`, a zero-argument `SourceLocation::here()`
    /// inside an assertion helper resolves to the assertion's own call site,
    /// not to the helper's body.
    #[track_caller]
    pub fn here() -> Self {
        let caller = std::panic::Location::caller();
        Self {
            file: caller.file(),
            line: caller.line(),
        }
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.file, self.line)
    }
}
