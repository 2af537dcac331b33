use std::fmt;

use serde::Serialize;
use thiserror::Error;

/// Outcome recorded in the error register by a fallible entry point.
///
/// The numeric codes are stable; generated code compares against them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorKind {
    #[default]
    NoError,
    /// Binary graph algebra on operands with different node counts.
    GraphSizeMismatch,
    /// A node index outside `[0, node_count)`.
    NodeNotInGraph,
    /// Malformed text passed to a primitive conversion.
    CastError,
    /// Storage bounds violation. Never raised by a validating entry point.
    IndexOutOfRange,
}

impl ErrorKind {
    pub const ALL: [ErrorKind; 5] = [
        ErrorKind::NoError,
        ErrorKind::GraphSizeMismatch,
        ErrorKind::NodeNotInGraph,
        ErrorKind::CastError,
        ErrorKind::IndexOutOfRange,
    ];

    pub const fn code(self) -> u8 {
        self as u8
    }

    pub fn name(self) -> &'static str {
        match self {
            ErrorKind::NoError => "NO_ERROR",
            ErrorKind::GraphSizeMismatch => "GRAPH_SIZE_MISMATCH",
            ErrorKind::NodeNotInGraph => "NODE_NOT_IN_GRAPH",
            ErrorKind::CastError => "CAST_ERROR",
            ErrorKind::IndexOutOfRange => "INDEX_OUT_OF_RANGE",
        }
    }

    pub fn is_error(self) -> bool {
        self != ErrorKind::NoError
    }

    /// The fault for this outcome, or None for `NoError`.
    pub fn fault(self) -> Option<RuntimeFault> {
        match self {
            ErrorKind::NoError => None,
            ErrorKind::GraphSizeMismatch => Some(RuntimeFault::GraphSizeMismatch),
            ErrorKind::NodeNotInGraph => Some(RuntimeFault::NodeNotInGraph),
            ErrorKind::CastError => Some(RuntimeFault::CastError),
            ErrorKind::IndexOutOfRange => Some(RuntimeFault::IndexOutOfRange),
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A failed outcome, for callers that prefer `Result` over reading the
/// register.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RuntimeFault {
    #[error("operands have different node counts")]
    GraphSizeMismatch,

    #[error("node is not in the graph")]
    NodeNotInGraph,

    #[error("text cannot be converted to the requested type")]
    CastError,

    #[error("index out of range")]
    IndexOutOfRange,
}

impl RuntimeFault {
    pub fn kind(self) -> ErrorKind {
        match self {
            RuntimeFault::GraphSizeMismatch => ErrorKind::GraphSizeMismatch,
            RuntimeFault::NodeNotInGraph => ErrorKind::NodeNotInGraph,
            RuntimeFault::CastError => ErrorKind::CastError,
            RuntimeFault::IndexOutOfRange => ErrorKind::IndexOutOfRange,
        }
    }
}

/// A value returned by an entry point together with the register state the
/// call left behind. The value is always usable, even when `error` is set.
#[derive(Debug, Clone, PartialEq)]
pub struct Checked<T> {
    pub value: T,
    pub error: ErrorKind,
}

impl<T> Checked<T> {
    pub fn is_ok(&self) -> bool {
        !self.error.is_error()
    }

    /// Drop the default value on failure.
    pub fn into_result(self) -> Result<T, RuntimeFault> {
        match self.error.fault() {
            None => Ok(self.value),
            Some(fault) => Err(fault),
        }
    }
}
