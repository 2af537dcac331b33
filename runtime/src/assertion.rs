use thiserror::Error;
use tracing::error;

/// A program-level `assert` that did not hold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("assertion failed at line {line}")]
pub struct AssertionFailed {
    pub line: u32,
}

/// Support for the language's `assert` statement. The host decides what a
/// failure means (usually printing the error and exiting); this function
/// neither exits nor writes the error register.
pub fn assert_holds(condition: bool, line: u32) -> Result<(), AssertionFailed> {
    if condition {
        return Ok(());
    }
    error!(line, "assertion failed");
    Err(AssertionFailed { line })
}
