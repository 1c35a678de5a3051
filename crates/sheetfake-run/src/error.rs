//! Error types delivered to failure handlers.

use std::fmt;

use thiserror::Error;

/// Kind of value the boundary cannot carry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnsupportedKind {
    /// A date-time value
    Temporal,
    /// A numeric NaN
    NaN,
}

impl UnsupportedKind {
    /// Suggested fix shown in the serialization error message.
    pub fn remedy(self) -> &'static str {
        match self {
            UnsupportedKind::Temporal => {
                "read the range with read_display() instead of read_raw() before returning it"
            }
            UnsupportedKind::NaN => "check inputs before computing, or fall back to a default value",
        }
    }
}

impl fmt::Display for UnsupportedKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnsupportedKind::Temporal => f.write_str("temporal value"),
            UnsupportedKind::NaN => f.write_str("NaN"),
        }
    }
}

/// Errors that reach a failure handler.
///
/// None of these are ever returned to the invoking code; they are only delivered
/// through the failure handler on a later turn of the task queue.
#[derive(Debug, Error)]
pub enum RunError {
    #[error("function {0} not found")]
    OperationNotFound(String),

    #[error("[script.run] serialization failed\nproblem: {kind} at {path}\nfix: {}", .kind.remedy())]
    Serialization { kind: UnsupportedKind, path: String },

    #[error(transparent)]
    Operation(#[from] anyhow::Error),

    #[error("operation panicked: {0}")]
    Panicked(String),

    #[error("call to {0} was never delivered")]
    Undelivered(String),
}

impl RunError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, RunError::OperationNotFound(_))
    }

    pub fn is_serialization(&self) -> bool {
        matches!(self, RunError::Serialization { .. })
    }
}

pub type Result<T> = std::result::Result<T, RunError>;
